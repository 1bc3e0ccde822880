//! Metadata database: lookup by class name plus hierarchy flattening.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::meta::ClassMetadata;
use crate::{Error, Result};

/// Read-only view over the described library.
///
/// The generator never mutates the database; everything it needs is
/// reachable through these lookups.
pub trait MetaDatabase {
    /// All known class names, in no particular order.
    fn class_names(&self) -> Vec<&str>;

    fn metadata(&self, class_name: &str) -> Option<&ClassMetadata>;

    /// Directory the class source paths are relative to.
    fn root_dir(&self) -> &Path;

    fn contains(&self, class_name: &str) -> bool {
        self.metadata(class_name).is_some()
    }

    /// Every superclass, interface and mixin reachable from `meta`.
    fn hierarchy_flat<'a>(&'a self, meta: &'a ClassMetadata) -> HierarchyFlat<'a> {
        let mut flat = HierarchyFlat::default();
        let mut visited = HashSet::new();
        visited.insert(meta.class_name.as_str());
        flatten_into(self, meta, &mut flat, &mut visited);
        flat
    }
}

fn flatten_into<'a, D: MetaDatabase + ?Sized>(
    db: &'a D,
    meta: &'a ClassMetadata,
    flat: &mut HierarchyFlat<'a>,
    visited: &mut HashSet<&'a str>,
) {
    let edges = [
        (Relation::Superclass, meta.super_names()),
        (Relation::Interface, meta.interfaces.as_slice()),
        (Relation::Mixin, meta.mixins.as_slice()),
    ];

    for (relation, names) in edges {
        for name in names {
            if !visited.insert(name.as_str()) {
                continue;
            }
            let Some(target) = db.metadata(name) else {
                continue;
            };
            // Interface "superclasses" are further interfaces.
            let relation = if meta.is_interface() {
                Relation::Interface
            } else {
                relation
            };
            flat.table_mut(relation).insert(name.as_str(), target);
            flatten_into(db, target, flat, visited);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    Superclass,
    Interface,
    Mixin,
}

/// Flattened ancestry of one class, keyed by name in discovery order.
#[derive(Debug, Default)]
pub struct HierarchyFlat<'a> {
    pub superclasses: IndexMap<&'a str, &'a ClassMetadata>,
    pub interfaces: IndexMap<&'a str, &'a ClassMetadata>,
    pub mixins: IndexMap<&'a str, &'a ClassMetadata>,
}

impl<'a> HierarchyFlat<'a> {
    fn table_mut(&mut self, relation: Relation) -> &mut IndexMap<&'a str, &'a ClassMetadata> {
        match relation {
            Relation::Superclass => &mut self.superclasses,
            Relation::Interface => &mut self.interfaces,
            Relation::Mixin => &mut self.mixins,
        }
    }

    pub fn mixin(&self, name: &str) -> Option<&'a ClassMetadata> {
        self.mixins.get(name).copied()
    }
}

// ============================================================================
// In-memory database
// ============================================================================

/// Metadata database held in memory, optionally loaded from a directory of JSON records.
#[derive(Debug, Clone)]
pub struct MetaDb {
    root_dir: PathBuf,
    classes: IndexMap<String, ClassMetadata>,
}

impl MetaDb {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            classes: IndexMap::new(),
        }
    }

    pub fn from_classes(
        root_dir: impl Into<PathBuf>,
        classes: impl IntoIterator<Item = ClassMetadata>,
    ) -> Result<Self> {
        let mut db = Self::new(root_dir);
        for meta in classes {
            db.insert(meta)?;
        }
        Ok(db)
    }

    /// Load every `*.json` file below `dir`, one class per file.
    ///
    /// Files are visited in sorted order so duplicate detection is stable.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut db = Self::new(dir);

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|source| Error::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let text = fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let meta: ClassMetadata =
                serde_json::from_str(&text).map_err(|source| Error::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
            db.insert(meta)?;
        }

        Ok(db)
    }

    pub fn insert(&mut self, meta: ClassMetadata) -> Result<()> {
        if meta.class_name.is_empty() {
            return Err(Error::MissingClassName);
        }
        if self.classes.contains_key(&meta.class_name) {
            return Err(Error::DuplicateClass(meta.class_name));
        }
        self.classes.insert(meta.class_name.clone(), meta);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl MetaDatabase for MetaDb {
    fn class_names(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    fn metadata(&self, class_name: &str) -> Option<&ClassMetadata> {
        self.classes.get(class_name)
    }

    fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}
