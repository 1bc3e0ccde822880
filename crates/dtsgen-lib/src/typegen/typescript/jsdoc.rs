//! Rewriting of member documentation for the declaration file.

use std::sync::LazyLock;

use regex::Regex;

static RELATIVE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@link #([^}]+)\}").expect("valid regex"));

static TYPED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@param|@return").expect("valid regex"));

/// Rewrite raw doc lines of a member declared on `class_name`.
///
/// Entries may hold several lines each; blank lines are dropped.
pub(crate) fn rewrite_doc(raw: &[String], class_name: &str) -> Vec<String> {
    raw.join("\n")
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| rewrite_line(line, class_name))
        .collect()
}

fn rewrite_line(line: &str, class_name: &str) -> String {
    let line = qualify_links(line, class_name);
    let line = if TYPED_TAG.is_match(&line) {
        strip_type_expression(&line)
    } else {
        line
    };
    line.trim().to_string()
}

/// `{@link #member}` -> `{@link a.b.Class.member}`.
pub(crate) fn qualify_links(line: &str, class_name: &str) -> String {
    RELATIVE_LINK
        .replace_all(line, |caps: &regex::Captures| {
            format!("{{@link {}.{}}}", class_name, &caps[1])
        })
        .into_owned()
}

/// Drop the first `{...}` type expression, keeping the prose around it.
///
/// Inline tags (`{@link ...}`) are not type expressions and are kept.
pub(crate) fn strip_type_expression(line: &str) -> String {
    match find_type_expression(line) {
        Some((open, close)) => format!(
            "{} {}",
            line[..open].trim(),
            line[close + 1..].trim()
        ),
        None => line.to_string(),
    }
}

/// Byte offsets of the opening and matching closing brace.
fn find_type_expression(line: &str) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = line[search_from..].find('{') {
        let open = search_from + offset;
        if bytes.get(open + 1) == Some(&b'@') {
            search_from = open + 1;
            continue;
        }

        let mut depth = 0usize;
        for (idx, &byte) in bytes.iter().enumerate().skip(open) {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some((open, idx));
                    }
                }
                _ => {}
            }
        }
        return None;
    }

    None
}

/// Render a doc comment block, ending with a link to the source file.
pub(crate) fn render_doc_block(lines: &[String], source_link: &str, indent: &str) -> String {
    let mut out = format!("{indent}/**\n");
    for line in lines {
        out.push_str(&format!("{indent} {line}\n"));
    }
    if !lines.is_empty() {
        out.push_str(&format!("{indent} *\n"));
    }
    out.push_str(&format!("{indent} * [source code]({source_link})\n"));
    out.push_str(&format!("{indent} */\n"));
    out
}
