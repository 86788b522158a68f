//! Layout tree and rendering engine.
//!
//! A layout is built from three kinds of node: atoms, lists with opening and
//! closing delimiters, and labels pairing a prefix with a body. The renderer
//! puts a list on one line when it fits in the width budget and its style
//! allows it, and otherwise breaks it over indented lines.

/// How the items of a list are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    /// Use one line when the list fits, otherwise fill lines with items.
    Atoms,
    /// Always put one item per line.
    ForceBreaks,
}

/// Formatting options of a list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyle {
    pub wrap: Wrap,
    /// Space after the opening and before the closing delimiter
    pub padding: bool,
}

impl ListStyle {
    pub const WRAP_ATOMS: ListStyle = ListStyle {
        wrap: Wrap::Atoms,
        padding: true,
    };

    pub const FORCE_BREAKS: ListStyle = ListStyle {
        wrap: Wrap::ForceBreaks,
        padding: true,
    };
}

/// A node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Atom(String),
    List {
        open: &'static str,
        items: Vec<Layout>,
        close: &'static str,
        style: ListStyle,
    },
    Label(Box<Layout>, Box<Layout>),
}

impl Layout {
    pub fn atom(text: impl Into<String>) -> Self {
        Layout::Atom(text.into())
    }

    /// An empty line.
    pub fn blank() -> Self {
        Layout::Atom(String::new())
    }

    pub fn list(open: &'static str, items: Vec<Layout>, close: &'static str, style: ListStyle) -> Self {
        Layout::List {
            open,
            items,
            close,
            style,
        }
    }

    /// Items on consecutive lines at the current indentation, without
    /// delimiters.
    pub fn lines(items: Vec<Layout>) -> Self {
        Layout::List {
            open: "",
            items,
            close: "",
            style: ListStyle::FORCE_BREAKS,
        }
    }

    pub fn label(prefix: Layout, body: Layout) -> Self {
        Layout::Label(Box::new(prefix), Box::new(body))
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Layout::Atom(_))
    }

    fn is_lines(&self) -> bool {
        matches!(self, Layout::List { open: "", close: "", .. })
    }

    /// Check whether this layout contains a list with delimiters.
    pub fn contains_bracketed(&self) -> bool {
        match self {
            Layout::Atom(_) => false,
            Layout::Label(_, body) => body.contains_bracketed(),
            Layout::List { open, items, .. } => {
                !open.is_empty() || items.iter().any(Layout::contains_bracketed)
            }
        }
    }

    /// Width of this layout on a single line, if it may be put on one.
    pub fn flat_width(&self) -> Option<usize> {
        match self {
            Layout::Atom(text) => Some(text.chars().count()),
            Layout::Label(prefix, body) => Some(prefix.flat_width()? + 1 + body.flat_width()?),
            Layout::List {
                open,
                items,
                close,
                style,
            } => {
                if style.wrap == Wrap::ForceBreaks {
                    return None;
                }
                let mut width = open.chars().count() + close.chars().count();
                if style.padding {
                    width += 2;
                }
                for item in items {
                    width += item.flat_width()?;
                }
                Some(width + items.len().saturating_sub(1))
            }
        }
    }
}

/// Renders layouts to text.
pub struct Renderer {
    width: usize,
    indent: usize,
    out: String,
    column: usize,
    /// Byte offset where the current line starts
    line_start: usize,
}

impl Renderer {
    pub fn new(width: usize, indent: usize) -> Self {
        Self {
            width,
            indent,
            out: String::new(),
            column: 0,
            line_start: 0,
        }
    }

    /// Render a single layout starting at column zero.
    pub fn render(mut self, layout: &Layout) -> String {
        self.layout(layout, 0);
        self.out
    }

    /// Render a sequence of layouts, each followed by an empty line.
    ///
    /// The result always ends with a line terminator.
    pub fn render_document(mut self, layouts: &[Layout]) -> String {
        for layout in layouts {
            self.layout(layout, 0);
            self.newline(0);
            self.newline(0);
        }
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
        self.column += text.chars().count();
    }

    fn newline(&mut self, indent: usize) {
        // A line holding only indentation is emitted empty.
        if self.out[self.line_start..].bytes().all(|b| b == b' ') {
            self.out.truncate(self.line_start);
        }
        self.out.push('\n');
        self.line_start = self.out.len();
        self.out.extend(std::iter::repeat(' ').take(indent));
        self.column = indent;
    }

    fn fits(&self, width: usize) -> bool {
        self.column + width <= self.width
    }

    fn layout(&mut self, layout: &Layout, base: usize) {
        match layout {
            Layout::Atom(text) => self.write(text),
            Layout::Label(prefix, body) => {
                self.layout(prefix, base);
                if body.is_lines() && matches!(&**body, Layout::List { items, .. } if items.len() > 1) {
                    let inner = base + self.indent;
                    self.newline(inner);
                    self.layout(body, inner);
                } else {
                    self.write(" ");
                    self.layout(body, base);
                }
            }
            Layout::List {
                open,
                items,
                close,
                style,
            } => self.list(layout, open, items, close, *style, base),
        }
    }

    fn list(&mut self, whole: &Layout, open: &str, items: &[Layout], close: &str, style: ListStyle, base: usize) {
        if whole.is_lines() {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    self.newline(base);
                }
                self.layout(item, base);
            }
            return;
        }

        if let Some(width) = whole.flat_width() {
            if self.fits(width) {
                self.write(open);
                if style.padding {
                    self.write(" ");
                }
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write(" ");
                    }
                    self.layout(item, base);
                }
                if style.padding {
                    self.write(" ");
                }
                self.write(close);
                return;
            }
        }

        let inner = base + self.indent;
        self.write(open);
        match style.wrap {
            Wrap::Atoms => {
                self.newline(inner);
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        match item.flat_width() {
                            Some(width) if self.fits(width + 1) => self.write(" "),
                            _ => self.newline(inner),
                        }
                    }
                    self.layout(item, inner);
                }
            }
            Wrap::ForceBreaks => {
                for item in items {
                    self.newline(inner);
                    self.layout(item, inner);
                }
            }
        }
        self.newline(base);
        self.write(close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(items: &[&str]) -> Vec<Layout> {
        items.iter().map(|s| Layout::atom(*s)).collect()
    }

    #[test]
    fn test_flat_list() {
        let layout = Layout::list("[", atoms(&["1", "2", "3"]), "]", ListStyle::WRAP_ATOMS);
        assert_eq!(layout.flat_width(), Some(9));
        assert_eq!(Renderer::new(80, 4).render(&layout), "[ 1 2 3 ]");
    }

    #[test]
    fn test_wrapped_atoms() {
        let layout = Layout::list("[", atoms(&["aaaa", "bbbb", "cccc"]), "]", ListStyle::WRAP_ATOMS);
        assert_eq!(
            Renderer::new(12, 2).render(&layout),
            "[\n  aaaa bbbb\n  cccc\n]"
        );
    }

    #[test]
    fn test_forced_breaks() {
        let layout = Layout::list("[", atoms(&["a", "b"]), "]", ListStyle::FORCE_BREAKS);
        assert_eq!(layout.flat_width(), None);
        assert_eq!(Renderer::new(80, 4).render(&layout), "[\n    a\n    b\n]");
    }

    #[test]
    fn test_label_with_broken_body() {
        let body = Layout::list("[", atoms(&["a"]), "]", ListStyle::FORCE_BREAKS);
        let layout = Layout::label(Layout::atom(".x"), body);
        assert_eq!(Renderer::new(80, 4).render(&layout), ".x [\n    a\n]");
    }

    #[test]
    fn test_label_with_lines_body() {
        let layout = Layout::label(Layout::atom(".doc"), Layout::lines(atoms(&["# a", "# b"])));
        assert_eq!(Renderer::new(80, 2).render(&layout), ".doc\n  # a\n  # b");

        let single = Layout::label(Layout::atom(".doc"), Layout::lines(atoms(&["# a"])));
        assert_eq!(single.flat_width(), None);
        assert_eq!(Renderer::new(80, 2).render(&single), ".doc # a");
    }

    #[test]
    fn test_blank_lines_have_no_trailing_spaces() {
        let items = vec![Layout::atom("# a"), Layout::blank(), Layout::atom("# b")];
        let layout = Layout::list("[", items, "]", ListStyle::FORCE_BREAKS);
        assert_eq!(Renderer::new(80, 4).render(&layout), "[\n    # a\n\n    # b\n]");
    }

    #[test]
    fn test_trailing_spaces_of_content_are_kept() {
        let items = vec![Layout::atom("# keep  "), Layout::atom("#  ")];
        let layout = Layout::list("[", items, "]", ListStyle::FORCE_BREAKS);
        assert_eq!(
            Renderer::new(80, 4).render(&layout),
            "[\n    # keep  \n    #  \n]"
        );
    }

    #[test]
    fn test_document() {
        let layouts = atoms(&["1", "2"]);
        assert_eq!(Renderer::new(80, 4).render_document(&layouts), "1\n\n2\n\n");
        assert_eq!(Renderer::new(80, 4).render_document(&[]), "\n");
    }

    #[test]
    fn test_contains_bracketed() {
        let inner = Layout::list("[", atoms(&["1"]), "]", ListStyle::WRAP_ATOMS);
        assert!(Layout::label(Layout::atom(".x"), inner).contains_bracketed());
        assert!(!Layout::lines(atoms(&["# a"])).contains_bracketed());
        assert!(!Layout::atom("x").contains_bracketed());
    }
}
