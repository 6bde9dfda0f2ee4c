//! Recovers ActionScript 2 `class` and `interface` declarations from
//! decompiled AVM1 statement lists.
//!
//! AVM1 bytecode has no class construct. The ActionScript 2 compiler lowers
//! each class to a chain of `if (!_global.pkg) { ... }` guards, register
//! aliasing of the class and prototype objects, member assignments and a
//! closing `ASSetPropFlags` call. This crate finds that idiom in the flat
//! statement list produced by an AVM1 decompiler and replaces it with a single
//! [`Item::Class`] or [`Item::Interface`] node.

pub mod action;
pub mod types;

pub use action::*;
pub use types::PropFlags;

/// Detect classes in several scripts at once using default options.
///
/// ```rust
/// use as2_class_detector::{detect_all, Item, Script};
///
/// let mut scripts = vec![Script::new("frame_1/DoAction", vec![Item::Pop])];
/// let reports = detect_all(&mut scripts);
/// assert_eq!(reports[0].declarations(), 0);
/// assert_eq!(scripts[0].commands, vec![Item::Pop]);
/// ```
pub fn detect_all(scripts: &mut [Script]) -> Vec<DetectionReport> {
    ClassDetector::default().detect_scripts(scripts, &TracingSink)
}
