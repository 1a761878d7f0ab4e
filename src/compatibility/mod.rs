//! Part compatibility evaluation.
//!
//! Given a [`SelectedParts`], the evaluator runs a fixed, ordered set of
//! pairwise rules and reports every violation as a [`CompatibilityIssue`].
//! Issues are either blocking (`error`) or advisory (`warning`); a build is
//! compatible when no error was reported.
//!
//! # Rules
//!
//! Evaluated in this order, each skipped when either side of its pair is empty:
//!
//! 1. PCB ↔ Case: compatible group ids must match (warning when unknown)
//! 2. PCB ↔ Plate: compatible group ids must match (warning when unknown)
//! 3. Plate ↔ Case: compatible group ids must match (warning when unknown)
//! 4. PCB ↔ Switch: switch types must match
//! 5. Plate ↔ Switch: switch types must match
//! 6. Switch ↔ Keycap: switch type must match the keycap stem type
//!
//! # Example
//!
//! ```
//! use keebuilder::compatibility::CompatibilityEvaluator;
//! use keebuilder::models::SelectedParts;
//!
//! let result = CompatibilityEvaluator::new(&SelectedParts::new()).evaluate();
//! assert!(result.compatible);
//! assert!(result.issues.is_empty());
//! ```

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{PartCategory, SelectedParts};

/// How strongly an issue affects the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Known mismatch; the build cannot be assembled
    Error,
    /// Fit could not be verified from catalog data
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single rule violation between two slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityIssue {
    /// Blocking or advisory
    pub severity: Severity,
    /// The two slots involved, in rule order
    pub parts: [PartCategory; 2],
    /// Human-readable description
    pub message: String,
}

impl CompatibilityIssue {
    pub(crate) fn error(parts: [PartCategory; 2], message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            parts,
            message: message.into(),
        }
    }

    pub(crate) fn warning(parts: [PartCategory; 2], message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            parts,
            message: message.into(),
        }
    }

    /// Returns true for blocking issues.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for CompatibilityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} ↔ {}] {}",
            self.parts[0], self.parts[1], self.message
        )
    }
}

/// Verdict plus the ordered list of issues behind it.
///
/// `compatible` is always derived from `issues`; build values through
/// [`CompatibilityResult::from_issues`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// True when no issue has error severity
    pub compatible: bool,
    /// Issues in rule evaluation order
    pub issues: Vec<CompatibilityIssue>,
}

impl CompatibilityResult {
    /// Builds a result, deriving the verdict from the issues.
    #[must_use]
    pub fn from_issues(issues: Vec<CompatibilityIssue>) -> Self {
        let compatible = !issues.iter().any(CompatibilityIssue::is_error);
        Self { compatible, issues }
    }

    /// Blocking issues, in order.
    pub fn errors(&self) -> impl Iterator<Item = &CompatibilityIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    /// Advisory issues, in order.
    pub fn warnings(&self) -> impl Iterator<Item = &CompatibilityIssue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }

    /// Number of blocking issues.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of advisory issues.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Formats the result as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if self.compatible {
            message.push_str("✓ Parts are compatible\n");
        } else {
            message.push_str(&format!(
                "✗ Parts are not compatible ({} errors)\n",
                self.error_count()
            ));
        }

        if !self.issues.is_empty() {
            message.push_str("\nIssues:\n");
            for issue in &self.issues {
                let prefix = if issue.is_error() { "✗" } else { "⚠" };
                message.push_str(&format!("  {prefix} {issue}\n"));
            }
        }

        message
    }
}

impl Default for CompatibilityResult {
    fn default() -> Self {
        Self::from_issues(Vec::new())
    }
}

/// Rule engine over a part selection.
///
/// Stateless apart from the borrowed selection; evaluating twice yields equal
/// results.
pub struct CompatibilityEvaluator<'a> {
    selection: &'a SelectedParts,
}

impl<'a> CompatibilityEvaluator<'a> {
    /// Creates an evaluator for a selection.
    #[must_use]
    pub const fn new(selection: &'a SelectedParts) -> Self {
        Self { selection }
    }

    /// Runs all rules in order and derives the verdict.
    #[must_use]
    pub fn evaluate(&self) -> CompatibilityResult {
        let selection = self.selection;

        let issues: Vec<CompatibilityIssue> = [
            rules::pcb_case(selection),
            rules::pcb_plate(selection),
            rules::plate_case(selection),
            rules::pcb_switch(selection),
            rules::plate_switch(selection),
            rules::switch_keycap(selection),
        ]
        .into_iter()
        .flatten()
        .collect();

        let result = CompatibilityResult::from_issues(issues);

        tracing::debug!(
            slots = selection.populated_count(),
            errors = result.error_count(),
            warnings = result.warning_count(),
            compatible = result.compatible,
            "evaluated part compatibility"
        );

        result
    }
}

/// Evaluates a selection. Shorthand for [`CompatibilityEvaluator::evaluate`].
#[must_use]
pub fn evaluate(selection: &SelectedParts) -> CompatibilityResult {
    CompatibilityEvaluator::new(selection).evaluate()
}
