//! Mapping of annotation type expressions to declaration type expressions.
//!
//! The mapping is an ordered list of stages. Each stage sees the output of the
//! previous one and either hands its result on or finishes the mapping early.
//! Later stages rely on the shape earlier stages produce (aliases are expanded
//! before nullable markers are stripped, class lookup happens on the stripped
//! name), so the order in [`STAGES`] is part of the contract.

use std::sync::LazyLock;

use dtsgen_core::{MetaDatabase, TypeRef};
use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::{Error, Result};

/// Fallback when nothing is known about a type.
pub const ANY: &str = "any";

/// Upper bound on alias substitution passes.
///
/// The bundled table reaches its fixpoint in a handful of passes; only a
/// table with mutually referencing entries (`A -> B`, `B -> A`) gets here.
const ALIAS_PASS_LIMIT: usize = 256;

static PROMISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^.a-zA-Z0-9_])Promise<").expect("valid regex"));

static LOOSE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^.a-zA-Z])(var|\*)([^.a-zA-Z]|$)").expect("valid regex"));

const ARRAY_OPEN: &str = "Array<";

/// Compiled alias table.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: IndexMap<String, String>,
    /// `None` for an empty table.
    pattern: Option<Regex>,
}

impl AliasTable {
    /// Compile `aliases` into a single token-boundary-aware pattern.
    ///
    /// Alternatives keep table order, so earlier entries win when two could
    /// match at the same position.
    pub fn new(aliases: &IndexMap<String, String>) -> Result<Self> {
        if aliases.is_empty() {
            return Ok(Self {
                aliases: IndexMap::new(),
                pattern: None,
            });
        }

        let alternatives = aliases
            .keys()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            "(^|[^.a-zA-Z0-9])({alternatives})($|[^.a-zA-Z0-9<])"
        ))
        .map_err(Error::AliasTable)?;

        Ok(Self {
            aliases: aliases.clone(),
            pattern: Some(pattern),
        })
    }

    /// Substitute the first alias occurrence, or `None` when nothing matches.
    fn substitute_once(&self, expr: &str) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        if !pattern.is_match(expr) {
            return None;
        }
        let replaced = pattern.replace(expr, |caps: &Captures| {
            let target = self.aliases.get(&caps[2]).map_or(&caps[2], String::as_str);
            format!("{}{}{}", &caps[1], target, &caps[3])
        });
        Some(replaced.into_owned())
    }
}

/// Outcome of one stage.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Hand the expression to the next stage.
    Next(String),
    /// Mapping is complete.
    Done(String),
}

type Stage = fn(&TypeMapper<'_>, String) -> Flow;

/// The mapping pipeline, in application order.
const STAGES: &[(&str, Stage)] = &[
    ("opaque", opaque_to_any),
    ("bare-array", bare_array),
    ("aliases", substitute_aliases),
    ("nullable", strip_nullable),
    ("known-class", qualify_known_class),
    ("promise", qualify_promise),
    ("loose-tokens", loose_tokens_to_unknown),
    ("array-generic", array_generic_to_postfix),
];

/// Maps annotation type expressions to declaration syntax.
///
/// Pure and total: every input maps to some output, and equal inputs map to
/// equal outputs. Mapping an already mapped expression returns it unchanged.
pub struct TypeMapper<'a> {
    aliases: &'a AliasTable,
    db: &'a dyn MetaDatabase,
}

impl<'a> TypeMapper<'a> {
    pub fn new(aliases: &'a AliasTable, db: &'a dyn MetaDatabase) -> Self {
        Self { aliases, db }
    }

    /// Map a type expression; `None` means the annotation carried no type.
    pub fn map_type(&self, expr: Option<&str>) -> String {
        let Some(expr) = expr else {
            return ANY.to_string();
        };

        let mut current = expr.to_string();
        for (name, stage) in STAGES {
            match stage(self, current) {
                Flow::Next(next) => current = next,
                Flow::Done(done) => {
                    tracing::trace!(input = expr, output = %done, stage = name, "mapped type");
                    return done;
                }
            }
        }
        tracing::trace!(input = expr, output = %current, "mapped type");
        current
    }

    /// Map a structured type reference, appending `[]` per array dimension.
    pub fn map_type_ref(&self, ty: Option<&TypeRef>) -> String {
        match ty.and_then(TypeRef::resolve) {
            Some((name, dimensions)) => {
                let mut mapped = self.map_type(Some(name));
                for _ in 0..dimensions {
                    mapped.push_str("[]");
                }
                mapped
            }
            None => ANY.to_string(),
        }
    }
}

// ============================================================================
// Stages
// ============================================================================

/// Empty and opaque function markers carry no usable type.
pub(crate) fn opaque_to_any(_: &TypeMapper<'_>, expr: String) -> Flow {
    if expr.is_empty() || expr == "[[ Function ]]" {
        Flow::Done(ANY.to_string())
    } else {
        Flow::Next(expr)
    }
}

/// A bare `Array` says nothing about its elements.
pub(crate) fn bare_array(_: &TypeMapper<'_>, expr: String) -> Flow {
    if expr == "Array" {
        Flow::Done("any[]".to_string())
    } else {
        Flow::Next(expr)
    }
}

/// Replace alias tokens until none is left.
///
/// A match consumes its boundary characters, so adjacent tokens (`Map|Map`)
/// need another pass; passes repeat until the expression stops changing.
pub(crate) fn substitute_aliases(mapper: &TypeMapper<'_>, mut expr: String) -> Flow {
    for _ in 0..ALIAS_PASS_LIMIT {
        match mapper.aliases.substitute_once(&expr) {
            Some(next) => expr = next,
            None => return Flow::Next(expr),
        }
    }
    tracing::warn!(expr = %expr, "alias substitution did not settle, check the alias table for cycles");
    Flow::Next(expr)
}

/// Drop a nullable marker and everything after it (`String?` -> `String`).
pub(crate) fn strip_nullable(_: &TypeMapper<'_>, mut expr: String) -> Flow {
    if let Some(pos) = expr.find('?') {
        expr.truncate(pos);
    }
    Flow::Next(expr)
}

/// Described classes are qualified with `globalThis.` so the ambient
/// namespace blocks cannot shadow them.
pub(crate) fn qualify_known_class(mapper: &TypeMapper<'_>, expr: String) -> Flow {
    let is_known = |name: &str| name.contains('.') && mapper.db.contains(name);
    if is_known(&expr) || is_known(&expr.replace("[]", "")) {
        Flow::Done(format!("globalThis.{expr}"))
    } else {
        Flow::Next(expr)
    }
}

pub(crate) fn qualify_promise(_: &TypeMapper<'_>, expr: String) -> Flow {
    Flow::Next(
        PROMISE
            .replace_all(&expr, "${1}globalThis.Promise<")
            .into_owned(),
    )
}

/// Standalone `var` and `*` become `unknown`.
pub(crate) fn loose_tokens_to_unknown(_: &TypeMapper<'_>, mut expr: String) -> Flow {
    while LOOSE_TOKEN.is_match(&expr) {
        expr = LOOSE_TOKEN
            .replace_all(&expr, "${1}unknown${3}")
            .into_owned();
    }
    Flow::Next(expr)
}

/// `Array<T>` -> `(T)[]`, leaving `qx.data.Array<T>` alone.
///
/// Brackets are matched by depth, so nested generics rewrite from the inside
/// out: `Array<Array<string>>` becomes `((string)[])[]`.
pub(crate) fn array_generic_to_postfix(_: &TypeMapper<'_>, expr: String) -> Flow {
    Flow::Done(rewrite_array_generics(&expr))
}

fn rewrite_array_generics(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut rest = expr;
    while let Some(start) = rest.find(ARRAY_OPEN) {
        out.push_str(&rest[..start]);
        let body = &rest[start + ARRAY_OPEN.len()..];
        match closing_bracket(body) {
            Some(end) if !out.ends_with("qx.data.") => {
                out.push('(');
                out.push_str(&rewrite_array_generics(&body[..end]));
                out.push_str(")[]");
                rest = &body[end + 1..];
            }
            _ => {
                out.push_str(ARRAY_OPEN);
                rest = body;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the `>` closing an already opened `<`.
fn closing_bracket(body: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (pos, ch) in body.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
    }
    None
}
