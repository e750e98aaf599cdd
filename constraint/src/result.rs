//! Evaluation result types.

use serde::Serialize;

/// Outcome of one constraint against one domain specification. Fixed
/// once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    id: String,
    #[serde(rename = "pass")]
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl EvaluationResult {
    /// Create a passing result.
    pub fn pass(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: true,
            message: None,
        }
    }

    /// Create a failing result.
    pub fn fail(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: false,
            message: Some(message.into()),
        }
    }

    /// The constraint that was evaluated.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the constraint holds.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Why the constraint failed. `None` on success.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Failure reason, or an empty string for a passing result.
    pub fn reason(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Ordered results of a whole rule document, one per constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Evaluation {
    results: Vec<EvaluationResult>,
}

impl Evaluation {
    /// Check whether every constraint passed.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Get failing results, in document order.
    pub fn failures(&self) -> impl Iterator<Item = &EvaluationResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Get the number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvaluationResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[EvaluationResult] {
        &self.results
    }
}

impl From<Vec<EvaluationResult>> for Evaluation {
    fn from(results: Vec<EvaluationResult>) -> Self {
        Self { results }
    }
}

impl FromIterator<EvaluationResult> for Evaluation {
    fn from_iter<I: IntoIterator<Item = EvaluationResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Evaluation {
    type Item = EvaluationResult;
    type IntoIter = std::vec::IntoIter<EvaluationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a Evaluation {
    type Item = &'a EvaluationResult;
    type IntoIter = std::slice::Iter<'a, EvaluationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
