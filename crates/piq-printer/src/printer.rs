//! Conversion of AST values to layouts.

use crate::config::PrinterConfig;
use crate::layout::{Layout, ListStyle, Renderer, Wrap};
use piq_ast::{Ast, AstKind, Mode, LINE_SEPARATOR};
use piq_lexer::literal::{escape_bytes, escape_str};
use tracing::{debug, trace};

/// Pretty-printer for piq values.
pub struct Printer {
    config: PrinterConfig,
}

impl Printer {
    pub fn new(config: PrinterConfig) -> Self {
        Self { config }
    }

    /// Print a sequence of top-level values.
    ///
    /// Every value is followed by an empty line and the output always ends
    /// with a newline.
    pub fn print(&self, values: &[Ast]) -> String {
        debug!(values = values.len(), mode = ?self.config.mode, "printing document");
        let layouts: Vec<Layout> = values.iter().map(|v| self.layout(v)).collect();
        self.renderer().render_document(&layouts)
    }

    /// Print a single value without a trailing newline.
    pub fn print_value(&self, ast: &Ast) -> String {
        self.renderer().render(&self.layout(ast))
    }

    fn renderer(&self) -> Renderer {
        Renderer::new(self.config.width, self.config.indent)
    }

    /// Build the layout of a value.
    pub fn layout(&self, ast: &Ast) -> Layout {
        trace!(kind = ast.node.describe(), loc = %ast.loc(), "layout");
        match &ast.node {
            AstKind::Int(i) => Layout::atom(i.to_string()),
            AstKind::Uint(u) => Layout::atom(format_uint(*u)),
            AstKind::Float(f) => Layout::atom(format_float(*f)),
            AstKind::Bool(b) => Layout::atom(b.to_string()),
            AstKind::AsciiString(s) => Layout::atom(quote(&escape_str(s))),
            AstKind::Utf8String(s) => match self.config.mode {
                Mode::Preserve => Layout::atom(quote(s)),
                Mode::Normal => Layout::atom(quote(&escape_str(s))),
            },
            AstKind::Binary(bytes) => Layout::atom(quote(&escape_bytes(bytes))),
            AstKind::Word(w) => Layout::atom(w.as_str()),
            AstKind::Text(text) => text_lines(text),
            AstKind::Name(name) => Layout::atom(format!(".{name}")),
            AstKind::Typename(name) => Layout::atom(format!(":{name}")),
            AstKind::Named(named) => self.pair(format!(".{}", named.name.node), &named.value),
            AstKind::Typed(typed) => self.pair(format!(":{}", typed.typename.node), &typed.value.ast),
            AstKind::List(items) => self.list(items),
            AstKind::Control(items) => {
                let items = self.items(items);
                let style = ListStyle {
                    wrap: Wrap::ForceBreaks,
                    padding: false,
                };
                Layout::list("(", items, ")", style)
            }
        }
    }

    /// Accumulate the label of a chain of names, then attach the first value
    /// that is not part of the chain.
    fn pair(&self, label: String, value: &Ast) -> Layout {
        match &value.node {
            AstKind::Name(name) => Layout::atom(format!("{label}.{name}")),
            AstKind::Typename(name) => Layout::atom(format!("{label}:{name}")),
            AstKind::Named(named) => self.pair(format!("{label}.{}", named.name.node), &named.value),
            AstKind::Typed(typed) => {
                self.pair(format!("{label}:{}", typed.typename.node), &typed.value.ast)
            }
            _ => Layout::label(Layout::atom(label), self.layout(value)),
        }
    }

    fn list(&self, items: &[Ast]) -> Layout {
        if items.is_empty() {
            return Layout::atom("[]");
        }

        let layouts = self.items(items);
        let style = match layouts.as_slice() {
            [only] if only.contains_bracketed() => ListStyle::FORCE_BREAKS,
            all if all.iter().all(Layout::is_atom) => ListStyle::WRAP_ATOMS,
            _ => ListStyle::FORCE_BREAKS,
        };
        Layout::list("[", layouts, "]", style)
    }

    /// Layouts of list elements.
    ///
    /// Text lines of adjacent elements are kept apart by an empty line so that
    /// they are read back as separate values.
    fn items(&self, items: &[Ast]) -> Vec<Layout> {
        let mut layouts = Vec::with_capacity(items.len());
        let mut after_text = false;
        for item in items {
            if after_text && matches!(item.node, AstKind::Text(_)) {
                layouts.push(Layout::blank());
            }
            layouts.push(self.layout(item));
            after_text = ends_with_text(item);
        }
        layouts
    }
}

fn ends_with_text(ast: &Ast) -> bool {
    match &ast.node {
        AstKind::Text(_) => true,
        AstKind::Named(named) => ends_with_text(&named.value),
        AstKind::Typed(typed) => ends_with_text(&typed.value.ast),
        _ => false,
    }
}

fn quote(body: &str) -> String {
    format!("\"{body}\"")
}

fn text_lines(text: &str) -> Layout {
    let lines = text
        .split(LINE_SEPARATOR)
        .map(|line| {
            if line.is_empty() {
                Layout::atom("#")
            } else {
                Layout::atom(format!("# {line}"))
            }
        })
        .collect();
    Layout::lines(lines)
}

/// Format an unsigned integer.
///
/// Values above `i64::MAX` are written in hexadecimal.
pub fn format_uint(u: u64) -> String {
    if (u as i64) >= 0 {
        u.to_string()
    } else {
        format!("0x{u:x}")
    }
}

/// Format a float with 12 significant digits.
///
/// Integral values have no fractional part, and the exponent form is used
/// for magnitudes below `1e-4` or from `1e12` on.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "0.nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "0.inf" } else { "-0.inf" }.to_string();
    }

    const DIGITS: i32 = 12;
    let scientific = format!("{:.*e}", (DIGITS - 1) as usize, f);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let precision = (DIGITS - 1 - exponent) as usize;
        strip_fraction(&format!("{f:.precision$}")).to_string()
    }
}

fn strip_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use piq_parser::{parse, parse_with, ParserConfig};

    fn print_normal(source: &str) -> String {
        let values = parse(source).unwrap();
        Printer::new(PrinterConfig::default()).print(&values)
    }

    fn print_preserved(source: &str) -> String {
        let values = parse_with(source, ParserConfig::preserve()).unwrap();
        Printer::new(PrinterConfig::default().preserve()).print(&values)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(print_normal("1 -2 true"), "1\n\n-2\n\ntrue\n\n");
        assert_eq!(print_normal("hello"), "hello\n\n");
    }

    #[test]
    fn test_uint_representation() {
        assert_eq!(format_uint(9223372036854775807), "9223372036854775807");
        assert_eq!(format_uint(9223372036854775808), "0x8000000000000000");
        assert_eq!(format_uint(u64::MAX), "0xffffffffffffffff");
    }

    #[test]
    fn test_float_format() {
        assert_eq!(format_float(f64::NAN), "0.nan");
        assert_eq!(format_float(f64::INFINITY), "0.inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-0.inf");
        assert_eq!(format_float(2.0), "2");
        assert_eq!(format_float(-2.5), "-2.5");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(123.456), "123.456");
        assert_eq!(format_float(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
        assert_eq!(format_float(123456789012345.0), "1.23456789012e+14");
    }

    #[test]
    fn test_strings() {
        assert_eq!(print_normal(r#""a\tb""#), "\"a\\tb\"\n\n");
        assert_eq!(print_normal("\"\u{e9}\\n\""), "\"\u{e9}\\n\"\n\n");
        assert_eq!(print_normal(r#""\xff""#), "\"\\xff\"\n\n");
    }

    #[test]
    fn test_preserved_string_is_verbatim() {
        assert_eq!(print_preserved(r#""\x41\n""#), "\"\\x41\\n\"\n\n");
    }

    #[test]
    fn test_flat_list() {
        assert_eq!(print_normal("[1 2 3]"), "[ 1 2 3 ]\n\n");
        assert_eq!(print_normal("[]"), "[]\n\n");
        assert_eq!(print_normal("[[] []]"), "[ [] [] ]\n\n");
    }

    #[test]
    fn test_nested_single_list_breaks() {
        assert_eq!(print_normal("[[1 2]]"), "[\n    [ 1 2 ]\n]\n\n");
    }

    #[test]
    fn test_record() {
        assert_eq!(
            print_normal(".point [ .x 1 .y 2 ]"),
            ".point [\n    .x 1\n    .y 2\n]\n\n"
        );
    }

    #[test]
    fn test_label_chain() {
        assert_eq!(print_normal(".foo.bar 1"), ".foo.bar 1\n\n");
        assert_eq!(print_normal(".a.b"), ".a.b\n\n");
        assert_eq!(print_normal(".x:int 5"), ".x:int 5\n\n");
        assert_eq!(print_normal(":int 5"), ":int 5\n\n");
    }

    #[test]
    fn test_wrapping() {
        let values = parse("[aaa bbb ccc]").unwrap();
        let printer = Printer::new(PrinterConfig::default().with_width(12));
        assert_eq!(printer.print_value(&values[0]), "[\n    aaa bbb\n    ccc\n]");
    }

    #[test]
    fn test_text() {
        assert_eq!(print_normal("#\n# x"), "#\n# x\n\n");
        assert_eq!(print_normal(".doc\n# a\n# b"), ".doc\n    # a\n    # b\n\n");
        assert_eq!(print_normal(".doc # a"), ".doc # a\n\n");
    }

    #[test]
    fn test_text_keeps_edge_spaces() {
        assert_eq!(print_preserved("# keep  \n"), "# keep  \n\n");
        assert_eq!(print_preserved("#  \n"), "#  \n\n");
        assert_eq!(
            print_preserved("[\n#   x \n]"),
            "[\n    #   x \n]\n\n"
        );
    }

    #[test]
    fn test_adjacent_text_stays_separate() {
        assert_eq!(
            print_normal("[\n# a\n\n# b\n]"),
            "[\n    # a\n\n    # b\n]\n\n"
        );
    }

    #[test]
    fn test_control_in_preserve_mode() {
        assert_eq!(
            print_preserved("(.foo a b)"),
            "(\n    .foo a\n    b\n)\n\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(print_normal(""), "\n");
    }
}
