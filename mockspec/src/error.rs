// vim: tw=80
//! Structural errors raised while an interaction is being built.
//!
//! Every variant carries the [`Diagnostic`] of the interaction that failed, so
//! the front-end can point at the offending source text.

use crate::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{diagnostic}: invocation count must be a number, got {found}")]
    CountNotNumeric { diagnostic: Diagnostic, found: String },

    #[error("{diagnostic}: invocation count must be >= 0, got {count}")]
    CountNegative { diagnostic: Diagnostic, count: i128 },

    #[error("{diagnostic}: lower bound of invocation count must come before \
             upper bound ({min} > {max})")]
    InvertedRange { diagnostic: Diagnostic, min: usize, max: usize },

    #[error("{diagnostic}: {op} needs a preceding argument constraint")]
    NoArgumentConstraint { diagnostic: Diagnostic, op: &'static str },

    #[error("{diagnostic}: {op} before any argument list was established")]
    NoArgumentList { diagnostic: Diagnostic, op: &'static str },

    #[error("{diagnostic}: argument list kind is already established")]
    ArgumentListAlreadySet { diagnostic: Diagnostic },

    #[error("{diagnostic}: argument names need a named argument list")]
    ArgumentNameOnPositional { diagnostic: Diagnostic },

    #[error("{diagnostic}: {names} argument names for {constraints} argument \
             constraints")]
    ArgumentNamesOutOfStep {
        diagnostic: Diagnostic,
        names: usize,
        constraints: usize
    },

    #[error("{diagnostic}: invalid method name pattern `{pattern}`: {reason}")]
    InvalidMethodPattern {
        diagnostic: Diagnostic,
        pattern: String,
        reason: String
    },

    #[error("{diagnostic}: {op} cannot follow {after}")]
    OutOfOrder {
        diagnostic: Diagnostic,
        op: &'static str,
        after: &'static str
    },

    #[error("{diagnostic}: interaction was already built")]
    AlreadyBuilt { diagnostic: Diagnostic },
}

impl Error {
    /// The declaration that failed.
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            Error::CountNotNumeric { diagnostic, .. }
            | Error::CountNegative { diagnostic, .. }
            | Error::InvertedRange { diagnostic, .. }
            | Error::NoArgumentConstraint { diagnostic, .. }
            | Error::NoArgumentList { diagnostic, .. }
            | Error::ArgumentListAlreadySet { diagnostic }
            | Error::ArgumentNameOnPositional { diagnostic }
            | Error::ArgumentNamesOutOfStep { diagnostic, .. }
            | Error::InvalidMethodPattern { diagnostic, .. }
            | Error::OutOfOrder { diagnostic, .. }
            | Error::AlreadyBuilt { diagnostic } => diagnostic
        }
    }
}
