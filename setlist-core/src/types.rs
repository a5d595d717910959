//! Validated value types.
//!
//! Construction is the only place validation happens. Once a value exists it
//! is trusted everywhere downstream.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be an empty string")]
    Empty { field: &'static str },

    #[error("invalid {field} format: {value:?}")]
    WrongFormat { field: &'static str, value: String },
}

/// Length of an AWS account ID.
pub const ACCOUNT_ID_LEN: usize = 12;

/// Whether `s` is exactly twelve ASCII digits.
pub fn is_account_id(s: &str) -> bool {
    s.len() == ACCOUNT_ID_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

/// A 12-digit AWS account ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AwsAccountId(String);

impl AwsAccountId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "account ID" });
        }
        if !is_account_id(&id) {
            return Err(ValidationError::WrongFormat {
                field: "account ID",
                value: id,
            });
        }
        Ok(Self(id))
    }
}

/// Identifier of the identity store backing the SSO instance (`d-` prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityStoreId(String);

impl IdentityStoreId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty {
                field: "identity store ID",
            });
        }
        if !id.starts_with("d-") {
            return Err(ValidationError::WrongFormat {
                field: "identity store ID",
                value: id,
            });
        }
        Ok(Self(id))
    }
}

macro_rules! non_empty_string {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ValidationError::Empty { field: $field });
                }
                Ok(Self(value))
            }
        }
    };
}

non_empty_string!(
    /// AWS region the SSO instance lives in. Only emptiness is checked here.
    Region,
    "region"
);
non_empty_string!(
    /// Name of a permission set, used as the role name in a profile.
    RoleName,
    "role name"
);
non_empty_string!(SessionName, "session name");
non_empty_string!(ProfileDescription, "profile description");
non_empty_string!(
    /// ISO-8601 duration such as `PT1H`; not parsed further.
    SessionDuration,
    "session duration"
);

macro_rules! string_value {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn into_string(self) -> String {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )+
    };
}

string_value!(
    AwsAccountId,
    IdentityStoreId,
    Region,
    RoleName,
    SessionName,
    ProfileDescription,
    SessionDuration,
);
