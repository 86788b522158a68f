//! Property-based tests over generated trees.
//!
//! Trees are restricted to what a preserve-mode read can produce: no control
//! blocks, pair values that do not start with a name, and bare names only
//! where the next value starts with a name.

use piq_ast::{at, Ast, AstKind, Position, Spanned};
use piq_parser::{expand, parse_with, ParserConfig};
use piq_printer::{Printer, PrinterConfig};
use proptest::prelude::*;
use smol_str::SmolStr;

fn node(kind: AstKind) -> Ast {
    at(&Position::new("", 1, 1), kind)
}

fn starts_with_name(ast: &Ast) -> bool {
    matches!(
        ast.node,
        AstKind::Name(_) | AstKind::Typename(_) | AstKind::Named(_) | AstKind::Typed(_)
    )
}

/// Drop bare names that would bind the value after them when read back.
fn readable(items: Vec<Ast>) -> Vec<Ast> {
    let mut out: Vec<Ast> = Vec::with_capacity(items.len());
    for item in items.into_iter().rev() {
        let bare = matches!(item.node, AstKind::Name(_) | AstKind::Typename(_));
        if bare && !out.last().map_or(true, starts_with_name) {
            continue;
        }
        out.push(item);
    }
    out.reverse();
    out
}

/// Compound names, including type parts with a module path.
fn names() -> BoxedStrategy<String> {
    r"[a-z_][a-z0-9_-]{0,3}(\.[a-z_][a-z0-9_-]{0,3}){0,2}(:([a-z]{1,3}\.[a-z]{1,3}/)?[a-z_][a-z0-9_-]{0,3}(\.[a-z_][a-z0-9_-]{0,3})?){0,2}"
        .boxed()
}

fn scalar() -> BoxedStrategy<Ast> {
    let word = "[a-z0-9][a-z0-9_+-]{0,6}".prop_map(|w| node(AstKind::Word(w.into())));
    let string = r#"([a-z0-9 é]|\\[nt"\\]){0,8}"#.prop_map(|s| node(AstKind::Utf8String(s.into())));
    let text = prop::collection::vec("[a-z ]{0,6}", 1..4)
        .prop_map(|lines| node(AstKind::Text(lines.join("\n").into())));
    prop_oneof![3 => word, 2 => string, 1 => text].boxed()
}

fn name_or_pair(names: BoxedStrategy<String>, values: BoxedStrategy<Ast>) -> BoxedStrategy<Ast> {
    (names, any::<bool>(), prop::option::of(values))
        .prop_map(|(name, typed, value)| {
            let name = SmolStr::from(name);
            let loc = Position::new("", 1, 1);
            let kind = match (typed, value) {
                (false, Some(value)) => AstKind::named(Spanned::new(name, loc), value),
                (true, Some(value)) => AstKind::typed(Spanned::new(name, loc), value),
                (false, None) => AstKind::Name(name),
                (true, None) => AstKind::Typename(name),
            };
            node(kind)
        })
        .boxed()
}

fn item(names: BoxedStrategy<String>, values: BoxedStrategy<Ast>) -> BoxedStrategy<Ast> {
    prop_oneof![3 => values.clone(), 2 => name_or_pair(names, values)].boxed()
}

fn value(names: BoxedStrategy<String>) -> BoxedStrategy<Ast> {
    scalar()
        .prop_recursive(3, 32, 5, move |inner| {
            prop::collection::vec(item(names.clone(), inner), 0..5)
                .prop_map(|items| node(AstKind::List(readable(items))))
        })
        .boxed()
}

fn document() -> impl Strategy<Value = Vec<Ast>> {
    prop::collection::vec(item(names(), value(names())), 0..6).prop_map(readable)
}

proptest! {
    #[test]
    fn test_preserved_print_reads_back(
        values in document(),
        width in prop::sample::select(vec![8usize, 30, 80]),
        indent in 1usize..5,
    ) {
        let config = PrinterConfig { width, indent, ..PrinterConfig::default() }.preserve();
        let printed = Printer::new(config).print(&values);
        prop_assert!(printed.ends_with('\n'));

        let reparsed = parse_with(&printed, ParserConfig::preserve());
        prop_assert!(reparsed.is_ok(), "{:?} reading back:\n{}", reparsed, printed);
        if let Ok(reparsed) = reparsed {
            prop_assert_eq!(reparsed, values);
        }
    }

    #[test]
    fn test_name_expansion_is_idempotent(mut values in document()) {
        for value in values.iter_mut() {
            prop_assert!(expand::expand_names(value).is_ok());
        }
        let once = values.clone();
        for value in values.iter_mut() {
            prop_assert_eq!(expand::expand_names(value).ok(), Some(false));
        }
        prop_assert_eq!(values, once);
    }
}
