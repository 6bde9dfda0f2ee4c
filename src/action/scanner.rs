//! Finds the chain of `if (!_global.a) { _global.a = new Object(); }` guards
//! that precedes every compiled class, accumulating its package path.

use super::class_body;
use super::class_detector::{DetectionReport, DetectorOptions};
use super::clauses::Declaration;
use super::diagnostics::DiagnosticSink;
use super::error::MatchError;
use super::item::Item;
use super::path;
use super::rewrite;

/// Outcome of one attempt starting at a given statement.
#[derive(Debug)]
enum Attempt {
    /// The statement does not start a class idiom.
    NoMatch,
    /// The guards matched but the class body did not.
    Rejected(MatchError),
    Matched {
        /// Index of the terminal guard.
        end: usize,
        declaration: Declaration,
        else_branch: Vec<Item>,
    },
}

/// Rewrite every recognised class and interface in `commands`.
pub fn scan(
    commands: &mut Vec<Item>,
    script: &str,
    options: &DetectorOptions,
    sink: &dyn DiagnosticSink,
) -> DetectionReport {
    let mut report = DetectionReport::default();
    let mut pos = 0;
    while pos < commands.len() {
        match attempt_at(commands, pos, options) {
            Attempt::NoMatch => {}
            Attempt::Rejected(err) => {
                report.rejected += 1;
                sink.report(script, err.severity(), &err.diagnostic_message());
            }
            Attempt::Matched { end, declaration, else_branch } => {
                tracing::debug!(
                    script,
                    name = %declaration.qualified_name(),
                    start = pos,
                    end,
                    "recognised declaration"
                );
                match declaration {
                    Declaration::Class(_) => report.classes += 1,
                    Declaration::Interface(_) => report.interfaces += 1,
                }
                rewrite::splice_declaration(commands, pos, end, declaration.into_item(), else_branch);
            }
        }
        pos += 1;
    }
    report
}

fn attempt_at(commands: &[Item], pos: usize, options: &DetectorOptions) -> Attempt {
    let mut namespace = vec![options.root_namespace.clone()];
    let mut check_pos = pos;
    while check_pos < commands.len() {
        let (condition, on_true, on_false) = match &commands[check_pos] {
            Item::If { condition, on_true, on_false } => (condition, on_true, on_false),
            _ => return Attempt::NoMatch,
        };
        let tested = match condition.as_ref() {
            Item::Not(tested) => tested,
            _ => return Attempt::NoMatch,
        };
        match path::direct_submember(tested, &namespace) {
            Some(segment) => namespace.push(segment),
            None => return Attempt::NoMatch,
        }

        if creates_namespace(on_true, &namespace) {
            if matches!(commands.get(check_pos + 1), Some(Item::Pop)) {
                check_pos += 1;
            }
            check_pos += 1;
            continue;
        }

        if !on_false.is_empty() && !options.preserve_else_branch {
            return Attempt::Rejected(MatchError::assertion("else clause of the if is not empty"));
        }
        return match class_body::parse_class_body(on_true, &namespace[1..], options) {
            Ok(declaration) => Attempt::Matched {
                end: check_pos,
                declaration,
                else_branch: on_false.clone(),
            },
            Err(err) => Attempt::Rejected(err),
        };
    }
    Attempt::NoMatch
}

/// `{ _global.a.b = new Object(); }` for the namespace just tested.
fn creates_namespace(on_true: &[Item], namespace: &[String]) -> bool {
    match on_true {
        [write] => {
            matches!(write.written_value(), Some(Item::NewObject { .. }))
                && path::write_path_of(write).as_deref() == Some(namespace)
        }
        _ => false,
    }
}
