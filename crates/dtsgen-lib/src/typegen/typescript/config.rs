//! Configuration types for declaration emission.

use std::path::PathBuf;

use indexmap::{IndexMap, IndexSet};

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "qooxdoo.d.ts";

/// Short annotation type names and the declaration types they stand for.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("Event", "qx.event.type.Event"),
    ("LocalizedString", "qx.locale.LocalizedString"),
    ("LayoutItem", "qx.ui.core.LayoutItem"),
    ("Widget", "qx.ui.core.Widget"),
    ("Decorator", "qx.ui.decoration.Decorator"),
    ("MWidgetController", "qx.ui.list.core.MWidgetController"),
    ("AbstractTreeItem", "qx.ui.tree.core.AbstractTreeItem"),
    ("Axis", "qx.ui.virtual.core.Axis"),
    ("ILayer", "qx.ui.virtual.core.ILayer"),
    ("Pane", "qx.ui.virtual.core.Pane"),
    ("IDesktop", "qx.ui.window.IDesktop"),
    ("IWindowManager", "qx.ui.window.IWindowManager"),
    ("DateFormat", "qx.util.format.DateFormat"),
    ("Class", "qx.Class"),
    ("Interface", "qx.Interface"),
    ("Mixin", "qx.Mixin"),
    ("Theme", "qx.Theme"),
    ("Boolean", "boolean"),
    ("Number", "number"),
    ("String", "string"),
    ("document", "Document"),
    ("Stylesheet", "StyleSheet"),
    ("Element", "HTMLElement"),
    ("Object", "object"),
    ("Map", "Record<string, any>"),
    // Loose annotations with no declaration counterpart.
    ("var", "unknown"),
    ("*", "unknown"),
    ("arguments", "unknown"),
];

/// Members that clash with their superclass signature and are emitted commented out.
const DEFAULT_SUPPRESSED: &[(&str, &[&str])] = &[
    ("qx.ui.virtual.core.CellEvent", &["init"]),
    ("qx.ui.table.columnmodel.resizebehavior.Default", &["set"]),
    ("qx.ui.progressive.renderer.table.Widths", &["set"]),
    ("qx.ui.table.columnmodel.resizebehavior", &["set"]),
    ("qx.ui.table.pane.CellEvent", &["init"]),
    ("qx.ui.mobile.dialog.Manager", &["error"]),
    ("qx.ui.mobile.container.Navigation", &["add"]),
    ("qx.ui.website.Table", &["filter", "sort"]),
    ("qx.ui.website.DatePicker", &["init", "sort"]),
    ("qx.event.type.Orientation", &["init"]),
    ("qx.event.type.KeySequence", &["init"]),
    ("qx.event.type.KeyInput", &["init"]),
    ("qx.event.type.GeoPosition", &["init"]),
    ("qx.event.type.Drag", &["init"]),
    ("qx.bom.request.SimpleXhr", &["addListener", "addListenerOnce"]),
    ("qx.event.dispatch.AbstractBubbling", &["dispatchEvent"]),
    ("qx.event.dispatch.Direct", &["dispatchEvent"]),
    ("qx.event.dispatch.MouseCapture", &["dispatchEvent"]),
    ("qx.event.type.Native", &["init"]),
    ("qx.html.Element", &["removeListener", "removeListenerById"]),
    ("qx.html.Flash", &["setAttribute"]),
    ("qx.util.LibraryManager", &["get", "set"]),
];

/// Configuration for declaration emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Where `process()` writes the declarations
    pub(crate) output: PathBuf,
    /// Annotation type name -> declaration type name
    pub(crate) aliases: IndexMap<String, String>,
    /// Class name -> member names emitted as comments
    pub(crate) suppressed: IndexMap<String, IndexSet<String>>,
    /// Base declaration template; the bundled one when unset
    pub(crate) base_template: Option<PathBuf>,
    /// Fixed header timestamp, for reproducible output
    pub(crate) timestamp: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            suppressed: DEFAULT_SUPPRESSED
                .iter()
                .map(|(class, members)| {
                    (
                        class.to_string(),
                        members.iter().map(|m| m.to_string()).collect(),
                    )
                })
                .collect(),
            base_template: None,
            timestamp: None,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output path.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Add or replace a type alias.
    pub fn alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    /// Replace the whole alias table.
    pub fn aliases(mut self, aliases: IndexMap<String, String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Emit `member` of `class` as a comment.
    pub fn suppress(mut self, class: impl Into<String>, member: impl Into<String>) -> Self {
        self.suppressed
            .entry(class.into())
            .or_default()
            .insert(member.into());
        self
    }

    /// Replace the whole suppression table.
    pub fn suppressed(mut self, suppressed: IndexMap<String, IndexSet<String>>) -> Self {
        self.suppressed = suppressed;
        self
    }

    /// Read the base declaration template from a file.
    pub fn base_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_template = Some(path.into());
        self
    }

    /// Use a fixed header timestamp.
    pub fn timestamp(mut self, value: impl Into<String>) -> Self {
        self.timestamp = Some(value.into());
        self
    }

    pub fn output_path(&self) -> &std::path::Path {
        &self.output
    }

    pub(crate) fn suppressed_for(&self, class_name: &str) -> Option<&IndexSet<String>> {
        self.suppressed.get(class_name)
    }
}
