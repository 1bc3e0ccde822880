//! Lookup of the most specific type information for a member.
//!
//! A member's signature may be typed anywhere in the ancestry graph: on the
//! class itself, on an interface it implements, on a mixin it includes or on
//! a superclass. The search order at every node is
//! own definition > interfaces > mixins > superclass, each category in
//! declaration order and depth-first.

use std::collections::HashSet;

use dtsgen_core::{ClassMetadata, Definition, MemberKind, MetaDatabase};

/// Outcome of a member lookup.
#[derive(Clone, Copy, Debug)]
pub struct Resolution<'a> {
    pub definition: Definition<'a>,
    /// The type information came from a mixin or a superclass.
    pub is_override: bool,
}

/// Searches the ancestry graph of a class for typed member definitions.
pub struct HierarchyResolver<'a, D: MetaDatabase + ?Sized> {
    db: &'a D,
}

impl<'a, D: MetaDatabase + ?Sized> HierarchyResolver<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// Resolve `name` in the `kind` table of `meta`.
    ///
    /// Returns `None` only when `meta` does not declare the member. When no
    /// substantial definition exists anywhere, the class's own definition is
    /// returned as a non-override.
    pub fn resolve_member(
        &self,
        name: &str,
        kind: MemberKind,
        meta: &'a ClassMetadata,
    ) -> Option<Resolution<'a>> {
        let own = meta.definition(kind, name)?;
        if own.is_substantial() {
            return Some(Resolution {
                definition: own,
                is_override: false,
            });
        }

        let mut visited = HashSet::new();
        visited.insert((meta.class_name.as_str(), kind));
        let mut search = Search {
            db: self.db,
            name,
            kind,
            visited,
        };

        // Interfaces only declare shape, so a typed interface member is not an override.
        let interfaces = interface_edges(meta);
        if let Some(definition) = search.first_of(interfaces) {
            return Some(Resolution {
                definition,
                is_override: false,
            });
        }

        if let Some(definition) = search.first_of(&meta.mixins) {
            return Some(Resolution {
                definition,
                is_override: true,
            });
        }

        if !meta.is_interface()
            && let Some(definition) = search.first_of(meta.super_names())
        {
            return Some(Resolution {
                definition,
                is_override: true,
            });
        }

        Some(Resolution {
            definition: own,
            is_override: false,
        })
    }
}

/// Interfaces to search from `meta`; an interface's superclasses are interfaces too.
fn interface_edges(meta: &ClassMetadata) -> impl Iterator<Item = &String> {
    let supers = if meta.is_interface() {
        meta.super_names()
    } else {
        &[]
    };
    meta.interfaces.iter().chain(supers)
}

struct Search<'a, 'n, D: MetaDatabase + ?Sized> {
    db: &'a D,
    name: &'n str,
    kind: MemberKind,
    /// (class name, kind) pairs already searched; guards against cyclic graphs.
    visited: HashSet<(&'a str, MemberKind)>,
}

impl<'a, D: MetaDatabase + ?Sized> Search<'a, '_, D> {
    fn first_of<'s>(
        &mut self,
        class_names: impl IntoIterator<Item = &'s String>,
    ) -> Option<Definition<'a>> {
        class_names
            .into_iter()
            .find_map(|class_name| self.visit(class_name))
    }

    /// First substantial definition at or below `class_name`.
    ///
    /// Classes missing from the database (the library extends a foreign
    /// type) end the search on that branch.
    fn visit(&mut self, class_name: &str) -> Option<Definition<'a>> {
        let meta = self.db.metadata(class_name)?;
        if !self.visited.insert((meta.class_name.as_str(), self.kind)) {
            return None;
        }

        if let Some(definition) = meta.definition(self.kind, self.name)
            && definition.is_substantial()
        {
            return Some(definition);
        }

        let supers: &[String] = if meta.is_interface() {
            &[]
        } else {
            meta.super_names()
        };

        self.first_of(interface_edges(meta))
            .or_else(|| self.first_of(&meta.mixins))
            .or_else(|| self.first_of(supers))
    }
}
