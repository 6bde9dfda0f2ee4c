//! ActionScript 2 class recovery over decompiled AVM1 statement lists.

pub mod class_body;
pub mod class_detector;
pub mod clauses;
pub mod diagnostics;
pub mod error;
pub mod item;
pub mod path;
pub mod registers;
pub mod rewrite;
pub mod scanner;

pub use class_detector::{detect_classes, ClassDetector, DetectionReport, DetectorOptions, Script};
pub use clauses::{ClassItem, ClassProperty, ClassTrait, Declaration, InterfaceItem};
pub use diagnostics::{CollectedDiagnostics, Diagnostic, DiagnosticSink, TracingSink};
pub use error::{MatchError, Severity};
pub use item::{DirectValue, FunctionItem, Item};
