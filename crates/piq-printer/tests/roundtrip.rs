//! End-to-end tests: parse, print, then read the output back.

use piq_ast::{count_controls, Ast, AstKind, Mode};
use piq_parser::{expand, parse, parse_with, ParserConfig};
use piq_printer::{print, Printer, PrinterConfig};

fn preserve(source: &str) -> Vec<Ast> {
    parse_with(source, ParserConfig::preserve()).unwrap()
}

const DOCUMENT: &str = r#"
% a configuration record
.server [
    .name "main\tserver"
    .port 8080
    .ratio 0.75
    .tags [ web api internal ]
    .limits [ .max-connections 1024 .timeout 2.5e-3 ]
    :acme.com/types/endpoint [ .path "/v1" .method get ]
]

# first paragraph
# continues here

# second paragraph
.x.y.z 42
"#;

#[test]
fn test_preserve_round_trip() {
    let first = preserve(DOCUMENT);
    let printed = print(&first, Mode::Preserve);
    let second = preserve(&printed);
    assert_eq!(first, second);
    assert_eq!(print(&second, Mode::Preserve), printed);
}

#[test]
fn test_normal_round_trip() {
    let first = parse(DOCUMENT).unwrap();
    let printed = print(&first, Mode::Normal);
    let second = parse(&printed).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_under_narrow_width() {
    let first = preserve(DOCUMENT);
    let printer = Printer::new(PrinterConfig::default().preserve().with_width(20));
    let printed = printer.print(&first);
    assert!(printed.ends_with('\n'));
    assert_eq!(preserve(&printed), first);
}

#[test]
fn test_uint_boundary() {
    let values = parse("9223372036854775807 9223372036854775808").unwrap();
    assert_eq!(values[1].node, AstKind::Uint(9223372036854775808));

    let printed = print(&values, Mode::Normal);
    assert_eq!(printed, "9223372036854775807\n\n0x8000000000000000\n\n");
    assert_eq!(parse(&printed).unwrap(), values);
}

#[test]
fn test_float_specials() {
    let values = parse("0.nan 0.inf -0.inf 2.0").unwrap();
    assert_eq!(
        print(&values, Mode::Normal),
        "0.nan\n\n0.inf\n\n-0.inf\n\n2\n\n"
    );
}

#[test]
fn test_text_joining() {
    let values = parse("# one\n# two\n\n# three").unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].node, AstKind::Text("one\ntwo".into()));

    let printed = print(&values, Mode::Normal);
    assert_eq!(printed, "# one\n# two\n\n# three\n\n");
    assert_eq!(parse(&printed).unwrap(), values);
}

#[test]
fn test_expanded_output_has_no_controls() {
    let source = ".list [ (.item 1 2 3) ]\n(:point [ .x 1 ] [ .x 2 ])";
    let values = parse(source).unwrap();
    assert!(values.iter().all(|v| count_controls(v) == 0));

    let printed = print(&values, Mode::Normal);
    assert_eq!(
        printed,
        ".list [\n    .item 1\n    .item 2\n    .item 3\n]\n\n\
         :point [\n    .x 1\n]\n\n:point [\n    .x 2\n]\n\n"
    );
}

#[test]
fn test_expanding_preserved_tree_matches_normal_parse() {
    let source = ".a.b [ (.c 1 2) ]";
    let mut raw = preserve(source);
    let normal = parse(source).unwrap();
    assert_eq!(raw.len(), normal.len());

    // Preserved words are not numbers, so compare the printed shapes.
    for value in raw.iter_mut() {
        expand::expand_controls(value).unwrap();
        expand::expand_names(value).unwrap();
    }
    assert_eq!(print(&raw, Mode::Normal), print(&normal, Mode::Normal));
}

#[test]
fn test_expansion_is_idempotent_after_printing() {
    let values = parse(".foo.bar:baz/qux [ .a.b 1 ]").unwrap();
    let printed = print(&values, Mode::Normal);
    let mut reparsed = parse(&printed).unwrap();
    for value in reparsed.iter_mut() {
        assert!(!expand::expand_names(value).unwrap());
    }
    assert_eq!(reparsed, values);
}
