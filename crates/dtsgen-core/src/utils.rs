/// Uppercase the first character, leaving the rest untouched.
///
/// # Examples
/// ```
/// use dtsgen_core::utils::first_up;
/// assert_eq!(first_up("value"), "Value");
/// assert_eq!(first_up("allowGrowX"), "AllowGrowX");
/// ```
pub fn first_up(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `s` can be written as a bare identifier in a declaration.
///
/// Matches `[a-zA-Z_][a-zA-Z0-9_]*`; anything else has to be quoted.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote a member name unless it is a plain identifier.
pub fn escape_member_name(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name)
    }
}
