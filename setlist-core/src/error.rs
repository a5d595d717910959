//! Error types for the config assembly pipeline.
//!
//! Parameter and invariant errors are fatal and never retried. Upstream data
//! noise (a permission set missing fields, an account without an id) never
//! reaches this type: it is logged and skipped where it is found.

use crate::aws::AwsError;
use crate::parsing::ParseError;
use crate::types::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetlistError {
    /// The caller's cancellation token fired before the work completed.
    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("include and exclude filters are mutually exclusive")]
    MutuallyExclusiveFilters,

    #[error("SSO is not enabled. No SSO instances exist")]
    SsoNotEnabled,

    #[error("SSO instance is missing its {0}")]
    IncompleteInstance(&'static str),

    #[error("nil permission set returned for {arn}")]
    MissingPermissionSet { arn: String },

    #[error("gave up after {limit} pages while trying to {operation}")]
    PageLimitExceeded { operation: String, limit: usize },

    #[error("failed to {operation}: {source}")]
    Aws {
        operation: String,
        #[source]
        source: AwsError,
    },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("profile missing required field: {0}")]
    ProfileMissingField(&'static str),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<SetlistError>,
    },
}

pub type SetlistResult<T> = Result<T, SetlistError>;

impl SetlistError {
    pub(crate) fn aws(operation: impl Into<String>, source: AwsError) -> Self {
        Self::Aws {
            operation: operation.into(),
            source,
        }
    }

    /// Prefix the error with the pipeline step that produced it.
    ///
    /// `Cancelled` passes through untouched so callers can still match on it
    /// directly.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        match self {
            Self::Cancelled => Self::Cancelled,
            other => Self::Context {
                context: context.into(),
                source: Box::new(other),
            },
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The innermost error, with every [`SetlistError::Context`] layer removed.
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}
