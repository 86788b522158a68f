//! Printer configuration.

use piq_ast::Mode;

/// Configuration for the pretty-printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Line width budget (default: 80)
    pub width: usize,
    /// Columns added per nesting level (default: 4)
    pub indent: usize,
    /// Print strings verbatim instead of re-escaping them
    pub mode: Mode,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            width: 80,
            indent: 4,
            mode: Mode::Normal,
        }
    }
}

impl PrinterConfig {
    /// Create config from environment variables.
    ///
    /// Reads `PIQ_WIDTH` and `PIQ_INDENT`, falling back to the defaults when
    /// a variable is unset or not a number.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let width = std::env::var("PIQ_WIDTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.width);

        let indent = std::env::var("PIQ_INDENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.indent);

        Self {
            width,
            indent,
            ..defaults
        }
    }

    /// Same configuration in preserve mode.
    pub fn preserve(self) -> Self {
        Self {
            mode: Mode::Preserve,
            ..self
        }
    }

    pub fn with_width(self, width: usize) -> Self {
        Self { width, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PrinterConfig::default();
        assert_eq!(config.width, 80);
        assert_eq!(config.indent, 4);
        assert_eq!(config.mode, Mode::Normal);
    }

    #[test]
    fn test_builders() {
        let config = PrinterConfig::default().preserve().with_width(40);
        assert_eq!(config.width, 40);
        assert_eq!(config.mode, Mode::Preserve);
    }
}
