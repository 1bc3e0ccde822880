//! Class metadata model.
//!
//! One `ClassMetadata` per class, interface or mixin, deserialized 1:1 from the
//! JSON records the metadata extractor writes. Member maps keep declaration
//! order so generated output is stable across runs.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

// ============================================================================
// Class level
// ============================================================================

/// What kind of definition a metadata record describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Interface,
    Mixin,
    #[default]
    #[serde(other)]
    Class,
}

/// Superclass reference: classes extend one type, interfaces may extend several.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SuperClass {
    Single(String),
    Many(Vec<String>),
}

impl SuperClass {
    pub fn names(&self) -> &[String] {
        match self {
            SuperClass::Single(name) => std::slice::from_ref(name),
            SuperClass::Many(names) => names,
        }
    }
}

/// Metadata for one class, interface or mixin.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMetadata {
    pub class_name: String,
    #[serde(rename = "type", default)]
    pub kind: ClassKind,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_singleton: bool,
    #[serde(default)]
    pub super_class: Option<SuperClass>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub interfaces: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub mixins: Vec<String>,
    #[serde(default)]
    pub construct: Option<MemberMetadata>,
    #[serde(default)]
    pub statics: IndexMap<String, MemberMetadata>,
    #[serde(default)]
    pub members: IndexMap<String, MemberMetadata>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyMetadata>,
    #[serde(default)]
    pub events: IndexMap<String, EventMetadata>,
    /// Source file path relative to the database root.
    #[serde(default)]
    pub class_filename: Option<String>,
}

impl ClassMetadata {
    pub fn new(class_name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            class_name: class_name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Names of the superclass(es), empty when the class extends nothing.
    pub fn super_names(&self) -> &[String] {
        self.super_class.as_ref().map_or(&[], SuperClass::names)
    }

    /// Dotted prefix of the class name (`a.b.C` -> `a.b`), empty for top-level names.
    pub fn namespace(&self) -> &str {
        namespace_of(&self.class_name)
    }

    /// Final segment of the class name (`a.b.C` -> `C`).
    pub fn short_name(&self) -> &str {
        match self.class_name.rfind('.') {
            Some(pos) => &self.class_name[pos + 1..],
            None => &self.class_name,
        }
    }

    /// Source file path relative to the database root.
    pub fn source_file(&self) -> String {
        match &self.class_filename {
            Some(path) => path.clone(),
            None => format!("{}.js", self.class_name.replace('.', "/")),
        }
    }

    /// Look up a declared member by kind.
    pub fn definition(&self, kind: MemberKind, name: &str) -> Option<Definition<'_>> {
        match kind {
            MemberKind::Statics => self.statics.get(name).map(Definition::Method),
            MemberKind::Members => self.members.get(name).map(Definition::Method),
            MemberKind::Properties => self.properties.get(name).map(Definition::Property),
        }
    }
}

/// Dotted prefix of a class name, empty when there is none.
pub fn namespace_of(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(pos) => &class_name[..pos],
        None => "",
    }
}

// ============================================================================
// Member level
// ============================================================================

/// The three member tables a class carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Statics,
    Members,
    Properties,
}

/// Declared visibility of a member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Protected,
    Private,
    #[default]
    #[serde(other)]
    Unspecified,
}

/// Whether a member is callable or a plain value slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Function,
    /// Anything but `"function"`, including a record with no `type` key.
    #[default]
    #[serde(other)]
    Property,
}

/// A type expression as written in the source annotations.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    /// `"qx.ui.core.Widget"`, `"Array<String>"`, ...
    Name(String),
    /// Alternatives; only a single alternative carries a usable type.
    Union(Vec<TypeRef>),
    /// `{ "name": "String", "dimensions": 1 }` means `string[]`.
    Described {
        name: String,
        #[serde(default)]
        dimensions: u32,
    },
}

impl TypeRef {
    pub fn name(name: impl Into<String>) -> Self {
        TypeRef::Name(name.into())
    }

    /// The base type name and array dimensions, if the expression is usable.
    pub fn resolve(&self) -> Option<(&str, u32)> {
        match self {
            TypeRef::Name(name) => Some((name, 0)),
            TypeRef::Union(items) => match items.as_slice() {
                [single] => single.resolve(),
                _ => None,
            },
            TypeRef::Described { name, dimensions } => Some((name, *dimensions)),
        }
    }
}

/// A single declared parameter.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeRef>,
    #[serde(default)]
    pub optional: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Option<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }
}

/// Metadata for a static or instance member (also used for constructors).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMetadata {
    #[serde(rename = "type", default)]
    pub kind: MemberType,
    #[serde(default)]
    pub access: Access,
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
    #[serde(rename = "async", default)]
    pub is_async: bool,
    /// Set when the member was contributed by a mixin.
    #[serde(default)]
    pub mixin: bool,
    /// `None` when the extractor saw no parameter list at all.
    #[serde(default)]
    pub params: Option<Vec<Param>>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub jsdoc: Vec<String>,
}

impl MemberMetadata {
    /// Carries a return type or a fully typed parameter list.
    pub fn is_substantial(&self) -> bool {
        self.return_type.is_some()
            || self
                .params
                .as_ref()
                .is_some_and(|params| params.iter().all(|p| p.ty.is_some()))
    }
}

/// Metadata for a declared property.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetadata {
    #[serde(default)]
    pub check: Option<TypeRef>,
    #[serde(default, deserialize_with = "flag_or_list")]
    pub group: bool,
    #[serde(rename = "async", default)]
    pub is_async: bool,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub jsdoc: Vec<String>,
}

impl PropertyMetadata {
    pub fn is_substantial(&self) -> bool {
        self.check.is_some()
    }
}

/// Event declarations are carried for completeness; they produce no output.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventMetadata {
    #[serde(rename = "type", default)]
    pub ty: Option<TypeRef>,
    #[serde(default)]
    pub jsdoc: Vec<String>,
}

/// A member definition found in some class's tables.
#[derive(Clone, Copy, Debug)]
pub enum Definition<'a> {
    Method(&'a MemberMetadata),
    Property(&'a PropertyMetadata),
}

impl Definition<'_> {
    pub fn is_substantial(&self) -> bool {
        match self {
            Definition::Method(member) => member.is_substantial(),
            Definition::Property(property) => property.is_substantial(),
        }
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
        OneOrMany::Null(()) => Vec::new(),
    })
}

fn flag_or_list<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagOrList {
        Flag(bool),
        List(Vec<String>),
    }

    Ok(match FlagOrList::deserialize(deserializer)? {
        FlagOrList::Flag(flag) => flag,
        FlagOrList::List(members) => !members.is_empty(),
    })
}
