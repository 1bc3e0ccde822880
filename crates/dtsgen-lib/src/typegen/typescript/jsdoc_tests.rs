use indoc::indoc;

use super::jsdoc::{qualify_links, render_doc_block, rewrite_doc, strip_type_expression};

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|line| line.to_string()).collect()
}

#[test]
fn relative_links_get_the_class_name() {
    assert_eq!(
        qualify_links("See {@link #setValue} and {@link #getValue}", "qx.ui.form.Field"),
        "See {@link qx.ui.form.Field.setValue} and {@link qx.ui.form.Field.getValue}"
    );
    assert_eq!(
        qualify_links("See {@link qx.Class}", "a.B"),
        "See {@link qx.Class}"
    );
}

#[test]
fn type_expressions_are_dropped() {
    assert_eq!(
        strip_type_expression("@param value {String} the new value"),
        "@param value the new value"
    );
    assert_eq!(
        strip_type_expression("@return {Map<String, {a: Number}>} nested braces"),
        "@return nested braces"
    );
    assert_eq!(
        strip_type_expression("@param cb {@link Callback} first, then {Function} type"),
        "@param cb {@link Callback} first, then type"
    );
    assert_eq!(strip_type_expression("@param plain"), "@param plain");
}

#[test]
fn rewrite_splits_joins_and_trims() {
    let raw = lines(&[
        "Sets the value.\n\n  See {@link #getValue}.  ",
        "@param value {String} new value",
        "@return {Boolean} whether it changed",
        "A line with {braces} that stay",
    ]);

    assert_eq!(
        rewrite_doc(&raw, "a.Field"),
        [
            "Sets the value.",
            "See {@link a.Field.getValue}.",
            "@param value new value",
            "@return whether it changed",
            "A line with {braces} that stay",
        ]
    );
}

#[test]
fn doc_block_ends_with_source_link() {
    let block = render_doc_block(
        &lines(&["Gets the value", "@return the value"]),
        "source/class/a/Field.js",
        "",
    );

    assert_eq!(
        block,
        indoc! {"
            /**
             Gets the value
             @return the value
             *
             * [source code](source/class/a/Field.js)
             */
        "}
    );
}

#[test]
fn empty_doc_block_has_only_the_link() {
    let block = render_doc_block(&[], "x.js", "  ");
    assert_eq!(block, "  /**\n   * [source code](x.js)\n   */\n");
}
