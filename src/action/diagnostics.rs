use std::sync::{Mutex, MutexGuard, PoisonError};

use super::error::Severity;

/// Receives one record per rejected detection attempt.
///
/// Shared by every script processed in a batch, so implementations must
/// accept concurrent reports.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, script: &str, severity: Severity, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, script: &str, severity: Severity, message: &str) {
        match severity {
            Severity::Severe => tracing::error!(script, "{}", message),
            Severity::Warning => tracing::warn!(script, "{}", message),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub script: String,
    pub severity: Severity,
    pub message: String,
}

/// Append-only in-memory sink.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // Entries are pushed whole, so a poisoned lock still guards a valid Vec.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn for_script(&self, script: &str) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.script == script)
            .cloned()
            .collect()
    }
}

impl DiagnosticSink for CollectedDiagnostics {
    fn report(&self, script: &str, severity: Severity, message: &str) {
        self.lock().push(Diagnostic {
            script: script.to_string(),
            severity,
            message: message.to_string(),
        });
    }
}
