//! Rendering of class declarations and their members.

use dtsgen_core::utils::{escape_member_name, first_up};
use dtsgen_core::{
    Access, ClassKind, ClassMetadata, Definition, HierarchyFlat, MemberKind, MemberMetadata,
    MemberType, MetaDatabase, Param, PropertyMetadata,
};
use indexmap::{IndexMap, IndexSet};

use super::jsdoc::{render_doc_block, rewrite_doc};
use super::resolve::Resolution;
use super::types::ANY;
use super::Emitter;
use crate::sink::Sink;
use crate::Result;

const INDENT: &str = "    ";

/// Superclasses that already exist in the ambient declarations.
const BUILTIN_SUPERCLASSES: &[&str] = &["Object", "Array", "Error"];

/// Per-class state shared by the class body and every inlined mixin.
pub(super) struct ClassContext<'a> {
    /// The class being declared; mixin bodies are rendered on its behalf.
    pub class: &'a ClassMetadata,
    pub hierarchy: HierarchyFlat<'a>,
    pub suppressed: Option<&'a IndexSet<String>>,
    pub source_link: String,
}

impl ClassContext<'_> {
    fn is_suppressed(&self, member: &str) -> bool {
        self.suppressed.is_some_and(|set| set.contains(member))
    }
}

/// Everything needed to print one method line.
#[derive(Default)]
pub(super) struct MethodSignature {
    pub access: Access,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_override: bool,
    pub from_mixin: bool,
    pub params: String,
    pub return_type: String,
    pub doc: Vec<String>,
}

impl<'a, D: MetaDatabase> Emitter<'a, D> {
    pub(super) fn write_class(
        &self,
        out: &mut dyn Sink,
        meta: &'a ClassMetadata,
        in_namespace: bool,
        source_link: String,
    ) -> Result<()> {
        tracing::debug!(class = %meta.class_name, "writing class");

        let ctx = ClassContext {
            class: meta,
            hierarchy: self.db.hierarchy_flat(meta),
            suppressed: self.config.suppressed_for(&meta.class_name),
            source_link,
        };

        let declare = if in_namespace { "" } else { "declare " };
        let keyword = match meta.kind {
            ClassKind::Interface => "interface ",
            _ if meta.is_abstract => "abstract class ",
            _ => "class ",
        };

        let mut head = format!(
            "  // {}\n  {declare}{keyword}{}{}",
            meta.class_name,
            meta.short_name(),
            self.extends_clause(meta)
        );
        if !meta.is_interface() && !meta.interfaces.is_empty() {
            let types = self.types();
            let implemented: Vec<String> = meta
                .interfaces
                .iter()
                .map(|name| types.map_type(Some(name.as_str())))
                .collect();
            head.push_str(" implements ");
            head.push_str(&implemented.join(", "));
        }
        head.push_str(" {\n");
        out.write_str(&head)?;

        if meta.kind == ClassKind::Class
            && let Some(construct) = &meta.construct
        {
            out.write_str(&format!(
                "{INDENT}constructor ({});\n",
                self.render_params(construct.params.as_deref().unwrap_or_default())
            ))?;
        }

        let mut inclusion_path = vec![meta.class_name.as_str()];
        self.write_class_body(out, &ctx, meta, &mut inclusion_path)?;

        out.write_str("\n  }\n")
    }

    /// ` extends X` for classes, ` extends I1, I2` for interfaces, or nothing.
    fn extends_clause(&self, meta: &ClassMetadata) -> String {
        let types = self.types();
        let mapped = |name: &String| {
            if BUILTIN_SUPERCLASSES.contains(&name.as_str()) {
                return None;
            }
            Some(types.map_type(Some(name.as_str()))).filter(|ty| ty != ANY)
        };

        let parents: Vec<String> = if meta.is_interface() {
            meta.super_names().iter().filter_map(mapped).collect()
        } else {
            meta.super_names().first().and_then(mapped).into_iter().collect()
        };

        if parents.is_empty() {
            String::new()
        } else {
            format!(" extends {}", parents.join(", "))
        }
    }

    /// Members of `meta`, then the bodies of its mixins, recursively.
    ///
    /// `inclusion_path` holds the classes whose bodies are being written;
    /// a mixin already on it is skipped.
    fn write_class_body(
        &self,
        out: &mut dyn Sink,
        ctx: &ClassContext<'a>,
        meta: &'a ClassMetadata,
        inclusion_path: &mut Vec<&'a str>,
    ) -> Result<()> {
        if meta.is_singleton {
            self.write_singleton_accessor(out, ctx, meta)?;
        }

        self.write_methods(out, ctx, meta, &meta.statics, true)?;
        self.write_methods(out, ctx, meta, &meta.members, false)?;
        self.write_properties(out, ctx, meta)?;

        for mixin in &meta.mixins {
            if inclusion_path.contains(&mixin.as_str()) {
                tracing::warn!(class = %ctx.class.class_name, mixin = %mixin, "mixin includes itself, skipping");
                continue;
            }
            out.write_str(&format!("{INDENT}// Mixin: {mixin}\n"))?;
            let Some(body) = ctx.hierarchy.mixin(mixin) else {
                tracing::warn!(class = %ctx.class.class_name, mixin = %mixin, "unknown mixin");
                continue;
            };
            inclusion_path.push(body.class_name.as_str());
            self.write_class_body(out, ctx, body, inclusion_path)?;
            inclusion_path.pop();
        }

        Ok(())
    }

    fn write_singleton_accessor(
        &self,
        out: &mut dyn Sink,
        ctx: &ClassContext<'a>,
        meta: &ClassMetadata,
    ) -> Result<()> {
        let signature = MethodSignature {
            access: Access::Public,
            is_static: true,
            return_type: self.types().map_type(Some(meta.class_name.as_str())),
            ..MethodSignature::default()
        };
        self.write_method(out, ctx, "getInstance", &signature)
    }

    /// Types and access come from the resolved definition; `abstract` and the
    /// mixin marker stay with the declaring class.
    fn write_methods(
        &self,
        out: &mut dyn Sink,
        ctx: &ClassContext<'a>,
        meta: &'a ClassMetadata,
        table: &'a IndexMap<String, MemberMetadata>,
        is_static: bool,
    ) -> Result<()> {
        let kind = if is_static {
            MemberKind::Statics
        } else {
            MemberKind::Members
        };
        let in_interface = meta.is_interface();

        for (name, declared) in table {
            let (member, is_override) = match self.resolver.resolve_member(name, kind, meta) {
                Some(Resolution {
                    definition: Definition::Method(member),
                    is_override,
                }) => (member, is_override),
                _ => (declared, false),
            };
            if member.kind != MemberType::Function {
                continue;
            }

            let signature = MethodSignature {
                access: if in_interface {
                    Access::Unspecified
                } else {
                    member.access
                },
                is_static,
                is_abstract: !in_interface && declared.is_abstract,
                is_override: !in_interface && is_override,
                from_mixin: declared.mixin,
                params: self.render_params(member.params.as_deref().unwrap_or_default()),
                return_type: match &member.return_type {
                    Some(ty) => self.types().map_type_ref(Some(ty)),
                    None => "void".to_string(),
                },
                doc: declared.jsdoc.clone(),
            };
            self.write_method(out, ctx, name, &signature)?;
        }

        Ok(())
    }

    /// Generated accessors for every non-group property.
    fn write_properties(
        &self,
        out: &mut dyn Sink,
        ctx: &ClassContext<'a>,
        meta: &'a ClassMetadata,
    ) -> Result<()> {
        let in_interface = meta.is_interface();

        for (name, declared) in &meta.properties {
            if declared.group {
                continue;
            }

            let (property, is_override): (&PropertyMetadata, bool) =
                match self.resolver.resolve_member(name, MemberKind::Properties, meta) {
                    Some(Resolution {
                        definition: Definition::Property(property),
                        is_override,
                    }) => (property, is_override),
                    _ => (declared, false),
                };

            let ty = self.types().map_type_ref(property.check.as_ref());
            let up = first_up(name);

            let mut accessors = vec![(
                format!("get{up}"),
                String::new(),
                ty.clone(),
                format!("Gets the {name} property"),
            )];
            if ty == "boolean" {
                accessors.push((
                    format!("is{up}"),
                    String::new(),
                    ty.clone(),
                    format!("Gets the {name} property"),
                ));
            }
            accessors.push((
                format!("set{up}"),
                format!("value: {ty}"),
                "void".to_string(),
                format!("Sets the {name} property"),
            ));
            accessors.push((
                format!("reset{up}"),
                String::new(),
                "void".to_string(),
                format!("Resets the {name} property"),
            ));

            if property.is_async {
                let promised = format!("globalThis.Promise<{ty}>");
                accessors.push((
                    format!("get{up}Async"),
                    String::new(),
                    promised.clone(),
                    format!("Gets the {name} property, waiting for pending changes"),
                ));
                if ty == "boolean" {
                    accessors.push((
                        format!("is{up}Async"),
                        String::new(),
                        promised,
                        format!("Gets the {name} property, waiting for pending changes"),
                    ));
                }
                accessors.push((
                    format!("set{up}Async"),
                    format!("value: {ty}"),
                    "globalThis.Promise<void>".to_string(),
                    format!("Sets the {name} property, waiting for pending changes"),
                ));
            }

            for (accessor, params, return_type, description) in accessors {
                let signature = MethodSignature {
                    access: if in_interface {
                        Access::Unspecified
                    } else {
                        property.access
                    },
                    is_override: !in_interface && is_override,
                    params,
                    return_type,
                    doc: std::iter::once(format!("* {description}"))
                        .chain(declared.jsdoc.iter().cloned())
                        .collect(),
                    ..MethodSignature::default()
                };
                self.write_method(out, ctx, &accessor, &signature)?;
            }
        }

        Ok(())
    }

    /// One method line with its doc block. Private members are omitted;
    /// suppressed ones are written as a comment.
    fn write_method(
        &self,
        out: &mut dyn Sink,
        ctx: &ClassContext<'a>,
        name: &str,
        signature: &MethodSignature,
    ) -> Result<()> {
        if signature.access == Access::Private {
            return Ok(());
        }

        let mut decl = String::new();
        let mut notes = Vec::new();
        match signature.access {
            Access::Public => decl.push_str("public "),
            Access::Protected => decl.push_str("protected "),
            Access::Private | Access::Unspecified => {}
        }
        if signature.is_static {
            decl.push_str("static ");
        }
        if signature.is_abstract {
            decl.push_str("abstract ");
            notes.push("Abstract");
        }
        if signature.is_override {
            decl.push_str("override ");
        }
        if signature.from_mixin {
            notes.push("Mixin");
        }
        decl.push_str(&format!(
            "{}({}): {};",
            escape_member_name(name),
            signature.params,
            signature.return_type
        ));

        let doc = rewrite_doc(&signature.doc, &ctx.class.class_name);
        let mut text = render_doc_block(&doc, &ctx.source_link, INDENT);
        text.push_str(INDENT);
        if ctx.is_suppressed(name) {
            text.push_str("// ");
        }
        text.push_str(&decl);
        if !notes.is_empty() {
            text.push_str(" // ");
            text.push_str(&notes.join(" "));
        }
        text.push('\n');

        out.write_str(&text)
    }

    /// `a: T, b?: U`; once a parameter is optional every later one is too.
    pub(super) fn render_params(&self, params: &[Param]) -> String {
        let types = self.types();
        let mut optional_from_here = false;

        params
            .iter()
            .map(|param| {
                optional_from_here |= param.optional || param.name == "varargs";
                format!(
                    "{}{}: {}",
                    param.name,
                    if optional_from_here { "?" } else { "" },
                    types.map_type_ref(param.ty.as_ref())
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
