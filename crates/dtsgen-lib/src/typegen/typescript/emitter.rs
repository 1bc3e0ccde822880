//! Core emitter struct and main emit logic.

use std::fs;
use std::path::{Component, Path, PathBuf};

use dtsgen_core::MetaDatabase;

use super::resolve::HierarchyResolver;
use super::types::{AliasTable, TypeMapper};
use super::Config;
use crate::sink::{OutputSink, Sink};
use crate::{Error, Result};

/// Base declarations every generated file starts with.
const BUNDLED_TEMPLATE: &str = include_str!("templates/base_declaration.d.ts");

/// Declaration emitter over a metadata database.
pub struct Emitter<'a, D: MetaDatabase> {
    pub(super) db: &'a D,
    pub(super) config: &'a Config,
    pub(super) aliases: AliasTable,
    pub(super) resolver: HierarchyResolver<'a, D>,
}

impl<'a, D: MetaDatabase> Emitter<'a, D> {
    pub fn new(db: &'a D, config: &'a Config) -> Result<Self> {
        Ok(Self {
            db,
            config,
            aliases: AliasTable::new(&config.aliases)?,
            resolver: HierarchyResolver::new(db),
        })
    }

    /// Type mapper over this emitter's alias table and database.
    pub fn types(&self) -> TypeMapper<'_> {
        TypeMapper::new(&self.aliases, self.db)
    }

    /// Write the declaration file to the configured output path.
    ///
    /// The file is released on every exit path; on success it is flushed
    /// and synced before returning.
    pub fn process(&self) -> Result<()> {
        let mut sink = OutputSink::create(&self.config.output)?;
        self.emit_to(&mut sink)?;
        sink.finish()
    }

    /// Emit the declarations into a string.
    pub fn emit(&self) -> Result<String> {
        let mut out = String::new();
        self.emit_to(&mut out)?;
        Ok(out)
    }

    /// Emit header, base template and every class, in sorted order.
    pub fn emit_to(&self, out: &mut dyn Sink) -> Result<()> {
        let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
        let output_dir = cwd
            .join(&self.config.output)
            .parent()
            .map_or_else(|| cwd.clone(), Path::to_path_buf);

        out.write_str(&format!(
            "// Generated declaration file at {}\n",
            self.timestamp()
        ))?;
        out.write_str(&self.base_template()?)?;
        out.write_str("\n")?;

        // Sorting keeps classes of one namespace adjacent; the grouping below depends on it.
        let mut class_names = self.db.class_names();
        class_names.sort_unstable();

        let mut open_block = false;
        let mut previous: Option<&str> = None;
        let mut emitted = 0usize;

        for class_name in class_names {
            let Some(meta) = self.db.metadata(class_name) else {
                continue;
            };
            let namespace = meta.namespace();

            if previous == Some(namespace) {
                out.write_str("\n")?;
            } else {
                if open_block {
                    out.write_str("}\n\n")?;
                    open_block = false;
                }
                if !namespace.is_empty() {
                    tracing::debug!(namespace, "opening namespace block");
                    out.write_str(&format!("declare module {namespace} {{\n"))?;
                    open_block = true;
                }
                previous = Some(namespace);
            }

            let source_link = source_link(
                &output_dir,
                &cwd.join(self.db.root_dir()).join(meta.source_file()),
            );
            self.write_class(out, meta, open_block, source_link)?;
            emitted += 1;
        }

        if open_block {
            out.write_str("}\n")?;
        }

        tracing::info!(classes = emitted, "emitted declarations");
        Ok(())
    }

    fn timestamp(&self) -> String {
        match &self.config.timestamp {
            Some(fixed) => fixed.clone(),
            None => chrono::Local::now()
                .format("%a %b %d %Y %H:%M:%S GMT%z")
                .to_string(),
        }
    }

    fn base_template(&self) -> Result<String> {
        match &self.config.base_template {
            Some(path) => fs::read_to_string(path).map_err(|source| Error::Template {
                path: path.clone(),
                source,
            }),
            None => Ok(BUNDLED_TEMPLATE.to_string()),
        }
    }
}

/// Path of `target` relative to the directory `from`, with `/` separators.
pub(super) fn source_link(from: &Path, target: &Path) -> String {
    let from: Vec<_> = from
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let to: Vec<_> = target
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..from.len() {
        result.push("..");
    }
    for component in &to[common..] {
        result.push(component.as_os_str());
    }

    if result.as_os_str().is_empty() {
        return ".".to_string();
    }
    result.to_string_lossy().replace('\\', "/")
}
