//! Error Taxonomy - Bad Input vs Bad Wiring
//!
//! Validation failures carry the caller-supplied message untouched.
//! Configuration failures mean the validator itself is wired wrong.

use thiserror::Error;

/// Failure signaled by the assertion library.
///
/// The two variants are deliberately distinct: a [`Validation`] failure is
/// the caller's input breaking a declared constraint, a [`Configuration`]
/// failure is the validator's own setup breaking (an enum domain that does
/// not resolve or lacks a required operation).
///
/// [`Validation`]: AssertError::Validation
/// [`Configuration`]: AssertError::Configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssertError {
    /// The input violates a declared constraint.
    #[error("{0}")]
    Validation(String),

    /// The validator is misconfigured; never caused by user input.
    #[error("{0}")]
    Configuration(String),
}

impl AssertError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// The message as handed to (or built by) the failing check.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Configuration(msg) => msg,
        }
    }
}

pub type AssertResult = Result<(), AssertError>;

/// Failure surfaced by the entity marshaling layer.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error(transparent)]
    Assert(#[from] AssertError),

    #[error("Serialized form cannot be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Expected node '{expected}', found '{actual}'")]
    UnexpectedNode { expected: String, actual: String },

    #[error("Required attribute '{0}' is missing")]
    MissingAttribute(String),
}
