use rayon::prelude::*;

use super::diagnostics::{DiagnosticSink, TracingSink};
use super::item::Item;
use super::scanner;

/// Options controlling class detection.
#[derive(Clone, Debug)]
pub struct DetectorOptions {
    /// Root namespace object stripped from top-level class paths.
    pub root_namespace: String,
    pub prototype_member: String,
    pub add_property_method: String,
    pub prop_flags_function: String,
    pub getter_prefix: String,
    pub setter_prefix: String,
    /// Re-insert the terminal guard's else branch after the declaration.
    /// When disabled, a non-empty else branch rejects the match.
    pub preserve_else_branch: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            root_namespace: "_global".into(),
            prototype_member: "prototype".into(),
            add_property_method: "addProperty".into(),
            prop_flags_function: "ASSetPropFlags".into(),
            getter_prefix: "__get__".into(),
            setter_prefix: "__set__".into(),
            preserve_else_branch: true,
        }
    }
}

/// What one pass over a script found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectionReport {
    pub classes: usize,
    pub interfaces: usize,
    /// Attempts whose guards matched but whose body did not.
    pub rejected: usize,
}

impl DetectionReport {
    pub fn declarations(&self) -> usize {
        self.classes + self.interfaces
    }
}

/// One script unit: its statements and the identifier used in diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    pub path: String,
    pub commands: Vec<Item>,
}

impl Script {
    pub fn new(path: impl Into<String>, commands: Vec<Item>) -> Self {
        Self {
            path: path.into(),
            commands,
        }
    }
}

/// Recognises compiled ActionScript 2 class and interface declarations.
pub struct ClassDetector {
    options: DetectorOptions,
}

impl ClassDetector {
    pub fn new(options: DetectorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Rewrite the class idioms in one script's statement list in place.
    ///
    /// Never fails: statements that do not form a complete idiom are left
    /// untouched and each rejected attempt is reported to `sink`.
    pub fn detect(
        &self,
        commands: &mut Vec<Item>,
        script_path: &str,
        sink: &dyn DiagnosticSink,
    ) -> DetectionReport {
        scanner::scan(commands, script_path, &self.options, sink)
    }

    /// Process independent scripts in parallel. Reports are in input order.
    pub fn detect_scripts(
        &self,
        scripts: &mut [Script],
        sink: &dyn DiagnosticSink,
    ) -> Vec<DetectionReport> {
        scripts
            .par_iter_mut()
            .map(|script| self.detect(&mut script.commands, &script.path, sink))
            .collect()
    }
}

impl Default for ClassDetector {
    fn default() -> Self {
        Self::new(DetectorOptions::default())
    }
}

/// Convenience function: detect classes with default options, logging
/// rejected attempts through `tracing`.
pub fn detect_classes(commands: &mut Vec<Item>, script_path: &str) -> DetectionReport {
    ClassDetector::default().detect(commands, script_path, &TracingSink)
}
