//! Findings vocabulary shared by every validator.

use std::fmt;

use serde::Serialize;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which validator produced a finding.
///
/// Variant order is the fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    City,
    Line,
    Station,
    Connection,
    Interchange,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::City,
        Category::Line,
        Category::Station,
        Category::Connection,
        Category::Interchange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::City => "city",
            Category::Line => "line",
            Category::Station => "station",
            Category::Connection => "connection",
            Category::Interchange => "interchange",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding about one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: Category,
    /// Identifier of the entity the finding concerns.
    pub id: String,
    pub message: String,
}

impl Issue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Outcome of one validator over its whole collection.
///
/// Counts are per entity: an entity with any error is failed once, an
/// entity with only warnings is passed, and `warnings` counts entities
/// that raised at least one warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub category: Category,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl ValidationResult {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            passed: 0,
            failed: 0,
            warnings: 0,
            issues: Vec::new(),
        }
    }

    /// Run the checks for one entity and tally it once.
    ///
    /// Issues are kept in the order the closure records them.
    pub fn check<F>(&mut self, subject: impl Into<String>, f: F)
    where
        F: FnOnce(&mut EntityCheck<'_>),
    {
        let mut check = EntityCheck {
            category: self.category,
            subject: subject.into(),
            issues: &mut self.issues,
            errors: 0,
            warnings: 0,
        };
        f(&mut check);

        let (errors, warnings) = (check.errors, check.warnings);
        if errors > 0 {
            self.failed += 1;
        } else {
            self.passed += 1;
        }
        if warnings > 0 {
            self.warnings += 1;
        }
    }

    /// Entities checked (warnings do not add to this).
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn has_errors(&self) -> bool {
        self.failed > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_error())
    }
}

/// Recorder for the findings of a single entity.
pub struct EntityCheck<'a> {
    category: Category,
    subject: String,
    issues: &'a mut Vec<Issue>,
    errors: usize,
    warnings: usize,
}

impl EntityCheck<'_> {
    /// Record an error; the entity will count as failed.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors += 1;
        self.push(Severity::Error, message.into());
    }

    /// Record a warning; on its own this does not fail the entity.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings += 1;
        self.push(Severity::Warning, message.into());
    }

    /// Whether any error has been recorded for this entity so far.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    fn push(&mut self, severity: Severity, message: String) {
        self.issues.push(Issue {
            severity,
            category: self.category,
            id: self.subject.clone(),
            message,
        });
    }
}
