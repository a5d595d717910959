//! Parsing of the comma-delimited operator inputs: account ID lists,
//! permission set name lists, and the account nickname mapping.

pub mod lists;
pub mod nickname;

pub use lists::{parse_account_id_list, parse_permission_set_name_list};
pub use nickname::{parse_nickname_mapping, NicknameMapping};

use thiserror::Error;

/// Syntax errors in operator-supplied lists. Positions are 1-based and count
/// every comma-separated entry, including empty ones.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid account ID at position {position}: {token:?}")]
    InvalidAccountId { position: usize, token: String },

    #[error(
        "invalid permission set name at position {position}: {token:?} (must not contain whitespace)"
    )]
    InvalidPermissionSetName { position: usize, token: String },

    #[error(
        "invalid nickname mapping format at entry {position}: {token:?}, expected format 'accountID=nickname'"
    )]
    InvalidNicknameFormat { position: usize, token: String },

    #[error("empty account ID in mapping entry {position}")]
    EmptyNicknameAccountId { position: usize },

    #[error("empty nickname in mapping entry {position}")]
    EmptyNickname { position: usize },
}
