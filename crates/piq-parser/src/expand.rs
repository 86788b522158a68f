//! Abbreviation expansion.
//!
//! Two passes, run in this order:
//!
//! 1. Control expansion removes `( ... )` blocks. A singleton block is just
//!    grouping and disappears. A block whose head is a name or type name
//!    stands for repeated pairs: `(.x 1 2)` is `.x 1 .x 2`, and `(:t a b)`
//!    is `:t a :t b`.
//! 2. Compound name expansion splits `.a.b:c 1` into a named `a` holding a
//!    named `b` holding a typed `c` bound to `1`.
//!
//! Both passes work in place and report whether they changed anything.

use piq_ast::*;
use piq_lexer::names;
use smol_str::SmolStr;

use crate::error::ParseError;

/// Expand every abbreviation in a single value.
pub fn expand(mut ast: Ast) -> Result<Ast, ParseError> {
    expand_controls(&mut ast)?;
    expand_names(&mut ast)?;
    Ok(ast)
}

/// Expand a sequence of top-level values.
///
/// The sequence behaves like the body of a list: control blocks may expand
/// to several values, which are spliced in place.
pub fn expand_all(values: Vec<Ast>) -> Result<Vec<Ast>, ParseError> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        splice(value, &mut out)?;
    }
    for value in &mut out {
        expand_names(value)?;
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    /// `.name`
    Name,
    /// `:typename`
    Type,
}

fn bind(marker: Marker, name: Spanned<SmolStr>, value: Ast, loc: &Loc) -> Ast {
    let kind = match marker {
        Marker::Name => AstKind::named(name, value),
        Marker::Type => AstKind::typed(name, value),
    };
    at(loc, kind)
}

fn leaf(marker: Marker, name: SmolStr, loc: &Loc) -> Ast {
    let kind = match marker {
        Marker::Name => AstKind::Name(name),
        Marker::Type => AstKind::Typename(name),
    };
    at(loc, kind)
}

// ============================================================================
// Control blocks
// ============================================================================

/// Remove control blocks from a tree.
pub fn expand_controls(ast: &mut Ast) -> Result<bool, ParseError> {
    match &mut ast.node {
        AstKind::Control(items) => {
            let items = std::mem::take(items);
            let expanded = expand_control_block(items, &ast.loc)?;
            let [single]: [Ast; 1] =
                expanded
                    .try_into()
                    .map_err(|_| ParseError::ControlOutsideList {
                        loc: Loc::clone(&ast.loc),
                    })?;
            *ast = single;
            expand_controls(ast)?;
            Ok(true)
        }
        AstKind::Named(named) => expand_controls(&mut named.value),
        AstKind::Typed(typed) => expand_controls(&mut typed.value.ast),
        AstKind::List(items) => {
            if !items.iter().any(|item| matches!(item.node, AstKind::Control(_))) {
                let mut changed = false;
                for item in items.iter_mut() {
                    changed |= expand_controls(item)?;
                }
                return Ok(changed);
            }

            let mut spliced = Vec::with_capacity(items.len());
            for item in std::mem::take(items) {
                splice(item, &mut spliced)?;
            }
            *items = spliced;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Push a list element, flattening it if it is a control block.
fn splice(item: Ast, out: &mut Vec<Ast>) -> Result<(), ParseError> {
    match item.node {
        AstKind::Control(inner) => {
            for element in expand_control_block(inner, &item.loc)? {
                splice(element, out)?;
            }
        }
        node => {
            let mut item = Spanned::new(node, item.loc);
            expand_controls(&mut item)?;
            out.push(item);
        }
    }
    Ok(())
}

/// Expand the elements of one control block, without recursing into them.
fn expand_control_block(items: Vec<Ast>, loc: &Loc) -> Result<Vec<Ast>, ParseError> {
    let mut items = items.into_iter();
    let head = items.next().ok_or_else(|| ParseError::EmptyControl {
        loc: Loc::clone(loc),
    })?;
    let tail: Vec<Ast> = items.collect();
    if tail.is_empty() {
        return Ok(vec![head]);
    }

    let (marker, name, keep_head) = match &head.node {
        AstKind::Name(n) => (Marker::Name, Spanned::with_loc_of(n.clone(), &head), false),
        AstKind::Typename(t) => (Marker::Type, Spanned::with_loc_of(t.clone(), &head), false),
        AstKind::Named(named) => (Marker::Name, named.name.clone(), true),
        AstKind::Typed(typed) => (Marker::Type, typed.typename.clone(), true),
        _ => {
            return Err(ParseError::UnsupportedControl {
                loc: Loc::clone(&head.loc),
            })
        }
    };

    let mut out = Vec::with_capacity(tail.len() + 1);
    if keep_head {
        out.push(head);
    }
    for value in tail {
        let value_loc = Loc::clone(&value.loc);
        out.push(bind(marker, name.clone(), value, &value_loc));
    }

    tracing::trace!(loc = %loc, count = out.len(), "expanded control block");
    Ok(out)
}

// ============================================================================
// Compound names
// ============================================================================

/// Split compound names and type names into nested pairs.
///
/// Applying this to an already expanded tree changes nothing.
pub fn expand_names(ast: &mut Ast) -> Result<bool, ParseError> {
    let changed = match &mut ast.node {
        AstKind::Named(named) => expand_names(&mut named.value)?,
        AstKind::Typed(typed) => expand_names(&mut typed.value.ast)?,
        AstKind::List(items) | AstKind::Control(items) => {
            let mut changed = false;
            for item in items.iter_mut() {
                changed |= expand_names(item)?;
            }
            changed
        }
        _ => false,
    };

    let (segments, name_loc) = {
        let (marker, text, name_loc) = match &ast.node {
            AstKind::Name(n) => (Marker::Name, n, &ast.loc),
            AstKind::Typename(t) => (Marker::Type, t, &ast.loc),
            AstKind::Named(named) => (Marker::Name, &named.name.node, &named.name.loc),
            AstKind::Typed(typed) => (Marker::Type, &typed.typename.node, &typed.typename.loc),
            _ => return Ok(changed),
        };
        if !text.contains(|c: char| c == '.' || c == ':') {
            return Ok(changed);
        }
        let segments = match marker {
            Marker::Name => split_name(text),
            Marker::Type => split_typename(text),
        };
        (segments, Loc::clone(name_loc))
    };

    let mut segments = segments;
    if segments.len() < 2 {
        return Ok(changed);
    }
    for (marker, segment) in &segments {
        validate_segment(*marker, segment, &name_loc)?;
    }
    let Some(innermost) = segments.pop() else {
        return Ok(changed);
    };

    let value = match std::mem::replace(&mut ast.node, AstKind::List(Vec::new())) {
        AstKind::Named(named) => Some(*named.value),
        AstKind::Typed(typed) => Some(typed.value.ast),
        _ => None,
    };
    let loc = Loc::clone(&ast.loc);
    *ast = fold_segments(innermost, segments, value, &loc, &name_loc);
    Ok(true)
}

/// Build nested pairs from the innermost segment outwards.
fn fold_segments(
    innermost: (Marker, SmolStr),
    outer: Vec<(Marker, SmolStr)>,
    value: Option<Ast>,
    loc: &Loc,
    name_loc: &Loc,
) -> Ast {
    let (marker, last) = innermost;
    let mut inner = match value {
        Some(value) => bind(marker, Spanned::new(last, Loc::clone(name_loc)), value, loc),
        None => leaf(marker, last, loc),
    };
    for (marker, segment) in outer.into_iter().rev() {
        inner = bind(marker, Spanned::new(segment, Loc::clone(name_loc)), inner, loc);
    }
    inner
}

fn validate_segment(marker: Marker, segment: &str, loc: &Loc) -> Result<(), ParseError> {
    match marker {
        Marker::Name if !names::is_valid_name(segment, false) => Err(ParseError::InvalidName {
            name: SmolStr::from(segment),
            loc: Loc::clone(loc),
        }),
        Marker::Type if !names::is_valid_typename(segment, false) => {
            Err(ParseError::InvalidTypename {
                name: SmolStr::from(segment),
                loc: Loc::clone(loc),
            })
        }
        _ => Ok(()),
    }
}

/// Tokenize the text of a `.`-introduced name.
fn split_name(text: &str) -> Vec<(Marker, SmolStr)> {
    let mut parts = text.split(':');
    let mut out: Vec<(Marker, SmolStr)> = parts
        .next()
        .unwrap_or_default()
        .split('.')
        .map(|segment| (Marker::Name, SmolStr::from(segment)))
        .collect();
    for part in parts {
        out.extend(split_type_part(part));
    }
    out
}

/// Tokenize the text of a `:`-introduced type name.
fn split_typename(text: &str) -> Vec<(Marker, SmolStr)> {
    text.split(':').flat_map(split_type_part).collect()
}

/// Tokenize one `:`-separated part. Dots before the last `/` belong to the
/// module path and do not separate anything.
fn split_type_part(part: &str) -> Vec<(Marker, SmolStr)> {
    let (path, local) = match part.rfind('/') {
        Some(i) => part.split_at(i + 1),
        None => ("", part),
    };
    let mut segments = local.split('.');
    let first = segments.next().unwrap_or_default();

    let mut out = vec![(Marker::Type, SmolStr::from(format!("{path}{first}")))];
    out.extend(segments.map(|segment| (Marker::Name, SmolStr::from(segment))));
    out
}
