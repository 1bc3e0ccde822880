use crate::meta::{
    Access, ClassKind, ClassMetadata, MemberKind, MemberType, SuperClass, TypeRef, namespace_of,
};

const WIDGET_JSON: &str = r#"{
    "className": "qx.ui.core.Widget",
    "type": "class",
    "abstract": true,
    "superClass": "qx.ui.core.LayoutItem",
    "interfaces": ["qx.core.IDisposable"],
    "mixins": "qx.ui.core.MChildrenHandling",
    "construct": {
        "type": "function",
        "params": [{ "name": "layout", "type": "qx.ui.layout.Abstract", "optional": true }]
    },
    "statics": {
        "getWidgetByElement": {
            "type": "function",
            "access": "public",
            "params": [{ "name": "element", "type": "Element" }],
            "returnType": "qx.ui.core.Widget"
        }
    },
    "members": {
        "__layoutManager": { "type": "variable", "access": "private" },
        "renderLayout": {
            "type": "function",
            "access": "protected",
            "params": [{ "name": "left" }, { "name": "top" }],
            "jsdoc": ["Renders the layout", "@param left {Integer} left position"]
        }
    },
    "properties": {
        "enabled": { "check": "Boolean", "async": true },
        "padding": { "group": ["paddingTop", "paddingRight"] }
    },
    "events": {
        "appear": { "type": "qx.event.type.Event" }
    }
}"#;

#[test]
fn class_fields() {
    let meta: ClassMetadata = serde_json::from_str(WIDGET_JSON).unwrap();

    assert_eq!(meta.class_name, "qx.ui.core.Widget");
    assert_eq!(meta.kind, ClassKind::Class);
    assert!(meta.is_abstract);
    assert!(!meta.is_singleton);
    assert_eq!(
        meta.super_class,
        Some(SuperClass::Single("qx.ui.core.LayoutItem".into()))
    );
    assert_eq!(meta.interfaces, vec!["qx.core.IDisposable"]);
    assert_eq!(meta.mixins, vec!["qx.ui.core.MChildrenHandling"]);
    assert_eq!(meta.events.len(), 1);
}

#[test]
fn member_fields() {
    let meta: ClassMetadata = serde_json::from_str(WIDGET_JSON).unwrap();

    let ctor = meta.construct.as_ref().unwrap();
    let params = ctor.params.as_ref().unwrap();
    assert_eq!(params[0].name, "layout");
    assert!(params[0].optional);

    let stat = &meta.statics["getWidgetByElement"];
    assert_eq!(stat.access, Access::Public);
    assert_eq!(stat.return_type, Some(TypeRef::name("qx.ui.core.Widget")));
    assert!(stat.is_substantial());

    let field = &meta.members["__layoutManager"];
    assert_eq!(field.kind, MemberType::Property);
    assert_eq!(field.access, Access::Private);
    assert!(!field.is_substantial());

    let render = &meta.members["renderLayout"];
    assert_eq!(render.access, Access::Protected);
    assert_eq!(render.jsdoc.len(), 2);
    assert!(!render.is_substantial());
}

#[test]
fn member_order_is_preserved() {
    let meta: ClassMetadata = serde_json::from_str(WIDGET_JSON).unwrap();
    let names: Vec<_> = meta.members.keys().map(String::as_str).collect();
    assert_eq!(names, ["__layoutManager", "renderLayout"]);
}

#[test]
fn property_fields() {
    let meta: ClassMetadata = serde_json::from_str(WIDGET_JSON).unwrap();

    let enabled = &meta.properties["enabled"];
    assert_eq!(enabled.check, Some(TypeRef::name("Boolean")));
    assert!(enabled.is_async);
    assert!(!enabled.group);
    assert!(enabled.is_substantial());

    let padding = &meta.properties["padding"];
    assert!(padding.group);
    assert!(!padding.is_substantial());
}

#[test]
fn interface_extends_many() {
    let meta: ClassMetadata = serde_json::from_str(
        r#"{ "className": "a.IBoth", "type": "interface", "superClass": ["a.IOne", "a.ITwo"] }"#,
    )
    .unwrap();

    assert!(meta.is_interface());
    assert_eq!(meta.super_names(), ["a.IOne", "a.ITwo"]);
}

#[test]
fn unknown_kind_reads_as_class() {
    let meta: ClassMetadata =
        serde_json::from_str(r#"{ "className": "a.Theme", "type": "theme" }"#).unwrap();
    assert_eq!(meta.kind, ClassKind::Class);
}

#[test]
fn class_kinds_read_by_name() {
    let kinds: Vec<ClassKind> = ["class", "interface", "mixin"]
        .into_iter()
        .map(|kind| {
            let json = format!(r#"{{ "className": "a.K", "type": "{kind}" }}"#);
            serde_json::from_str::<ClassMetadata>(&json).unwrap().kind
        })
        .collect();
    assert_eq!(kinds, [ClassKind::Class, ClassKind::Interface, ClassKind::Mixin]);

    let untyped: ClassMetadata = serde_json::from_str(r#"{ "className": "a.K" }"#).unwrap();
    assert_eq!(untyped.kind, ClassKind::Class);
}

#[test]
fn only_function_members_are_callable() {
    let meta: ClassMetadata = serde_json::from_str(
        r#"{
            "className": "a.B",
            "members": {
                "run": { "type": "function" },
                "size": { "type": "variable" },
                "bare": {}
            }
        }"#,
    )
    .unwrap();

    assert_eq!(meta.members["run"].kind, MemberType::Function);
    assert_eq!(meta.members["size"].kind, MemberType::Property);
    assert_eq!(meta.members["bare"].kind, MemberType::Property);
}

#[test]
fn substantial_requires_param_list() {
    let no_params: ClassMetadata = serde_json::from_str(
        r#"{ "className": "a.B", "members": { "run": { "type": "function" } } }"#,
    )
    .unwrap();
    assert!(!no_params.members["run"].is_substantial());

    let empty_params: ClassMetadata = serde_json::from_str(
        r#"{ "className": "a.B", "members": { "run": { "type": "function", "params": [] } } }"#,
    )
    .unwrap();
    assert!(empty_params.members["run"].is_substantial());
}

#[test]
fn type_ref_shapes() {
    let plain: TypeRef = serde_json::from_str(r#""String""#).unwrap();
    assert_eq!(plain.resolve(), Some(("String", 0)));

    let described: TypeRef =
        serde_json::from_str(r#"{ "name": "Integer", "dimensions": 2 }"#).unwrap();
    assert_eq!(described.resolve(), Some(("Integer", 2)));

    let single: TypeRef = serde_json::from_str(r#"["Number"]"#).unwrap();
    assert_eq!(single.resolve(), Some(("Number", 0)));

    let many: TypeRef = serde_json::from_str(r#"["Number", "String"]"#).unwrap();
    assert_eq!(many.resolve(), None);
}

#[test]
fn names_and_paths() {
    let meta = ClassMetadata::new("qx.ui.form.Button", ClassKind::Class);
    assert_eq!(meta.namespace(), "qx.ui.form");
    assert_eq!(meta.short_name(), "Button");
    assert_eq!(meta.source_file(), "qx/ui/form/Button.js");

    let top = ClassMetadata::new("Global", ClassKind::Class);
    assert_eq!(top.namespace(), "");
    assert_eq!(top.short_name(), "Global");
    assert_eq!(namespace_of("a.b"), "a");
}

#[test]
fn definition_lookup_by_kind() {
    let meta: ClassMetadata = serde_json::from_str(WIDGET_JSON).unwrap();

    assert!(meta.definition(MemberKind::Statics, "getWidgetByElement").is_some());
    assert!(meta.definition(MemberKind::Members, "getWidgetByElement").is_none());
    assert!(meta.definition(MemberKind::Properties, "enabled").is_some());
}
