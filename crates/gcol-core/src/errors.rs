//! Structured error types shared across gcol crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`GcolError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (node labels, sizes, colour counts).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the coloring engine.
///
/// The families are disjoint: a caller can always tell a malformed request
/// (`Structure`, `Parameter`, `Geometry`) apart from a well formed request that
/// has no solution (`Infeasible`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GcolError {
    /// The graph does not have a structural property the operation needs.
    #[error("structure error: {0}")]
    Structure(ErrorInfo),
    /// A strategy label, budget, colour label or other argument is malformed.
    #[error("parameter error: {0}")]
    Parameter(ErrorInfo),
    /// The requested colouring target could not be met.
    #[error("infeasible: {0}")]
    Infeasible(ErrorInfo),
    /// Node coordinates do not define an unambiguous planar embedding.
    #[error("geometry error: {0}")]
    Geometry(ErrorInfo),
    /// Serialization, schema and file errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl GcolError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GcolError::Structure(info)
            | GcolError::Parameter(info)
            | GcolError::Infeasible(info)
            | GcolError::Geometry(info)
            | GcolError::Serde(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Returns `true` for an infeasibility that was established by exhaustive
    /// search. Heuristic "not found within budget" failures return `false`.
    pub fn is_proven_infeasible(&self) -> bool {
        matches!(self, GcolError::Infeasible(info)
            if info.context.get("exhaustive").map(String::as_str) == Some("true"))
    }

    /// Appends a context entry regardless of the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            GcolError::Structure(info) => GcolError::Structure(info.with_context(key, value)),
            GcolError::Parameter(info) => GcolError::Parameter(info.with_context(key, value)),
            GcolError::Infeasible(info) => GcolError::Infeasible(info.with_context(key, value)),
            GcolError::Geometry(info) => GcolError::Geometry(info.with_context(key, value)),
            GcolError::Serde(info) => GcolError::Serde(info.with_context(key, value)),
        }
    }

    /// Sets the remediation hint regardless of the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            GcolError::Structure(info) => GcolError::Structure(info.with_hint(hint)),
            GcolError::Parameter(info) => GcolError::Parameter(info.with_hint(hint)),
            GcolError::Infeasible(info) => GcolError::Infeasible(info.with_hint(hint)),
            GcolError::Geometry(info) => GcolError::Geometry(info.with_hint(hint)),
            GcolError::Serde(info) => GcolError::Serde(info.with_hint(hint)),
        }
    }
}

/// Shorthand for a [`GcolError::Structure`] error.
pub fn structure_error(code: impl Into<String>, message: impl Into<String>) -> GcolError {
    GcolError::Structure(ErrorInfo::new(code, message))
}

/// Shorthand for a [`GcolError::Parameter`] error.
pub fn parameter_error(code: impl Into<String>, message: impl Into<String>) -> GcolError {
    GcolError::Parameter(ErrorInfo::new(code, message))
}

/// Shorthand for a [`GcolError::Geometry`] error.
pub fn geometry_error(code: impl Into<String>, message: impl Into<String>) -> GcolError {
    GcolError::Geometry(ErrorInfo::new(code, message))
}

/// Builds a [`GcolError::Infeasible`] error, recording whether the claim is
/// backed by exhaustive search.
pub fn infeasible_error(
    code: impl Into<String>,
    message: impl Into<String>,
    exhaustive: bool,
) -> GcolError {
    let info = ErrorInfo::new(code, message).with_context("exhaustive", exhaustive);
    let info = if exhaustive {
        info
    } else {
        info.with_hint("heuristic search gave up; raise it_limit or use the exact mode")
    };
    GcolError::Infeasible(info)
}
