//! Classifier candidates and the outcome of checking them.

use std::fmt;

use serde::Serialize;

use crate::shape::Shape;

/// Diagnostic code a checker may leave when it rejects a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureCode {
    /// No pitch could be estimated (no staff, or a tablature staff)
    #[serde(rename = "tablature")]
    Tablature,
    /// Pitch position out of the allowed range
    #[serde(rename = "pitch")]
    Pitch,
    /// A stem crosses the candidate
    #[serde(rename = "stem")]
    Stem,
    /// Glyph too tall for the candidate
    #[serde(rename = "tooHigh")]
    TooHigh,
}

impl FailureCode {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureCode::Tablature => "tablature",
            FailureCode::Pitch => "pitch",
            FailureCode::Stem => "stem",
            FailureCode::TooHigh => "tooHigh",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Name of the rejecting checker
    pub checker: Option<&'static str>,
    pub code: Option<FailureCode>,
}

impl Failure {
    /// Failure carrying only a code, as a checker records it.
    pub fn code(code: FailureCode) -> Self {
        Self {
            checker: None,
            code: Some(code),
        }
    }

    /// The diagnostic reason: the code if any, else the checker name.
    pub fn reason(&self) -> &'static str {
        match (self.code, self.checker) {
            (Some(code), _) => code.as_str(),
            (None, Some(checker)) => checker,
            (None, None) => "",
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.checker, self.code) {
            (Some(checker), Some(code)) => write!(f, "{checker}:{code}"),
            (Some(checker), None) => f.write_str(checker),
            (None, Some(code)) => write!(f, "{code}"),
            (None, None) => Ok(()),
        }
    }
}

/// A candidate shape for one glyph, with its classifier grade.
///
/// Created by the caller, annotated once, then read back: `shape` may have
/// been refined and `failure` set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub shape: Shape,
    grade: f64,
    pub failure: Option<Failure>,
}

impl Evaluation {
    pub fn new(shape: Shape, grade: f64) -> Self {
        Self {
            shape,
            grade,
            failure: None,
        }
    }

    /// Classifier confidence, in [0, 1].
    pub fn grade(&self) -> f64 {
        self.grade
    }

    /// Whether no check has rejected this candidate.
    pub fn is_accepted(&self) -> bool {
        self.failure.is_none()
    }

    /// Record a rejection code. Returns `false` so checkers can
    /// `return eval.reject(..)`.
    pub fn reject(&mut self, code: FailureCode) -> bool {
        self.failure = Some(Failure::code(code));
        false
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.4})", self.shape, self.grade)?;
        if let Some(failure) = &self.failure {
            write!(f, " failure:{failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_prefers_code() {
        let coded = Failure {
            checker: Some("MeasureRest"),
            code: Some(FailureCode::Stem),
        };
        assert_eq!(coded.reason(), "stem");
        assert_eq!(coded.to_string(), "MeasureRest:stem");

        let bare = Failure {
            checker: Some("StaffGap"),
            code: None,
        };
        assert_eq!(bare.reason(), "StaffGap");
        assert_eq!(bare.to_string(), "StaffGap");
    }

    #[test]
    fn reject_sets_code_and_returns_false() {
        let mut eval = Evaluation::new(Shape::LongRest, 0.8);
        assert!(eval.is_accepted());
        assert!(!eval.reject(FailureCode::Pitch));
        assert_eq!(eval.failure, Some(Failure::code(FailureCode::Pitch)));
        assert_eq!(eval.to_string(), "LONG_REST(0.8000) failure:pitch");
    }
}
