use dtsgen_core::{MetaDb, TypeRef};
use indexmap::IndexMap;
use serde_json::json;

use super::config::Config;
use super::types::{
    AliasTable, Flow, TypeMapper, array_generic_to_postfix, loose_tokens_to_unknown,
    strip_nullable,
};
use crate::test_utils::db;

fn widget_db() -> MetaDb {
    db([
        json!({ "className": "qx.ui.core.Widget" }),
        json!({ "className": "qx.event.type.Event" }),
    ])
}

fn default_aliases() -> AliasTable {
    AliasTable::new(&Config::default().aliases).unwrap()
}

fn map_all(db: &MetaDb, aliases: &AliasTable, inputs: &[&str]) -> Vec<String> {
    let mapper = TypeMapper::new(aliases, db);
    inputs.iter().map(|i| mapper.map_type(Some(*i))).collect()
}

#[test]
fn missing_and_opaque_types_are_any() {
    let db = widget_db();
    let aliases = default_aliases();
    let mapper = TypeMapper::new(&aliases, &db);

    assert_eq!(mapper.map_type(None), "any");
    assert_eq!(mapper.map_type(Some("")), "any");
    assert_eq!(mapper.map_type(Some("[[ Function ]]")), "any");
    assert_eq!(mapper.map_type(Some("Array")), "any[]");
}

#[test]
fn aliases_and_builtins() {
    let db = widget_db();
    let aliases = default_aliases();

    let mapped = map_all(
        &db,
        &aliases,
        &[
            "String",
            "String?",
            "Map",
            "Boolean|Number",
            "Map|Map",
            "var",
            "*",
            "Element",
            "HTMLElement",
        ],
    );

    assert_eq!(
        mapped,
        [
            "string",
            "string",
            "Record<string, any>",
            "boolean|number",
            "Record<string, any>|Record<string, any>",
            "unknown",
            "unknown",
            "HTMLElement",
            "HTMLElement",
        ]
    );
}

#[test]
fn known_classes_are_qualified() {
    let db = widget_db();
    let aliases = default_aliases();

    let mapped = map_all(
        &db,
        &aliases,
        &[
            "qx.ui.core.Widget",
            "Widget",
            "qx.ui.core.Widget[]",
            "Event",
            "qx.ui.form.Button",
        ],
    );

    assert_eq!(
        mapped,
        [
            "globalThis.qx.ui.core.Widget",
            "globalThis.qx.ui.core.Widget",
            "globalThis.qx.ui.core.Widget[]",
            "globalThis.qx.event.type.Event",
            "qx.ui.form.Button",
        ]
    );
}

#[test]
fn generics() {
    let db = widget_db();
    let aliases = default_aliases();

    let mapped = map_all(
        &db,
        &aliases,
        &[
            "Promise<String>",
            "Array<String>",
            "qx.data.Array<String>",
            "Array<Number>|Array<String>",
        ],
    );

    assert_eq!(
        mapped,
        [
            "globalThis.Promise<string>",
            "(string)[]",
            "qx.data.Array<string>",
            "(number)[]|(string)[]",
        ]
    );
}

#[test]
fn mapping_is_idempotent() {
    let db = widget_db();
    let aliases = default_aliases();
    let mapper = TypeMapper::new(&aliases, &db);

    for input in [
        "String",
        "Map",
        "Array",
        "Array<String>",
        "Promise<Widget>",
        "qx.ui.core.Widget",
        "Boolean?",
        "var",
        "Array<Array<String>>",
        "Array<Map>",
        "qx.data.Array<Array<String>>",
    ] {
        let once = mapper.map_type(Some(input));
        let twice = mapper.map_type(Some(once.as_str()));
        assert_eq!(once, twice, "mapping {input:?} twice changed the result");
    }
}

#[test]
fn cyclic_aliases_terminate() {
    let db = widget_db();
    let table: IndexMap<String, String> = [("A", "B"), ("B", "A")]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();
    let aliases = AliasTable::new(&table).unwrap();
    let mapper = TypeMapper::new(&aliases, &db);

    assert_eq!(mapper.map_type(Some("A")), "A");
}

#[test]
fn empty_alias_table_keeps_names() {
    let db = widget_db();
    let aliases = AliasTable::new(&IndexMap::new()).unwrap();
    let mapper = TypeMapper::new(&aliases, &db);

    assert_eq!(mapper.map_type(Some("String")), "String");
    assert_eq!(mapper.map_type(Some("Widget")), "Widget");
}

#[test]
fn type_refs_append_dimensions() {
    let db = widget_db();
    let aliases = default_aliases();
    let mapper = TypeMapper::new(&aliases, &db);

    let matrix = TypeRef::Described {
        name: "String".to_string(),
        dimensions: 2,
    };
    let single = TypeRef::Union(vec![TypeRef::name("Widget")]);
    let choice = TypeRef::Union(vec![TypeRef::name("String"), TypeRef::name("Number")]);

    assert_eq!(mapper.map_type_ref(Some(&matrix)), "string[][]");
    assert_eq!(
        mapper.map_type_ref(Some(&single)),
        "globalThis.qx.ui.core.Widget"
    );
    assert_eq!(mapper.map_type_ref(Some(&choice)), "any");
    assert_eq!(mapper.map_type_ref(None), "any");
}

#[test]
fn individual_stages() {
    let db = widget_db();
    let aliases = default_aliases();
    let mapper = TypeMapper::new(&aliases, &db);

    assert_eq!(
        strip_nullable(&mapper, "string?|null".to_string()),
        Flow::Next("string".to_string())
    );
    assert_eq!(
        loose_tokens_to_unknown(&mapper, "Array<*>".to_string()),
        Flow::Next("Array<unknown>".to_string())
    );
    assert_eq!(
        loose_tokens_to_unknown(&mapper, "qx.var".to_string()),
        Flow::Next("qx.var".to_string())
    );
    assert_eq!(
        array_generic_to_postfix(&mapper, "Array<number>".to_string()),
        Flow::Done("(number)[]".to_string())
    );
}

#[test]
fn nested_array_generics() {
    let db = widget_db();
    let aliases = default_aliases();

    let mapped = map_all(
        &db,
        &aliases,
        &[
            "Array<Array<String>>",
            "Array<Map>",
            "qx.data.Array<Array<String>>",
            "Array<String",
        ],
    );

    assert_eq!(
        mapped,
        [
            "((string)[])[]",
            "(Record<string, any>)[]",
            "qx.data.Array<(string)[]>",
            "Array<string",
        ]
    );
}
