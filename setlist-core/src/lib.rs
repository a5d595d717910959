//! This crate provides the core business logic for setlist, a generator of
//! AWS CLI config files for an organization's IAM Identity Center (SSO):
//! - Account and permission set retrieval from AWS Organizations and SSO Admin
//! - Parsing and validation of operator-supplied filters and nicknames
//! - Deterministic rendering of `sso-session` and profile sections
//!

pub mod aws;
pub mod commands;
mod error;
mod filter;
mod model;
mod parsing;
mod permissions;
pub mod rendering;
mod types;

#[cfg(test)]
mod test_utils;

// Re-exports for a small, focused public API
pub use aws::{Account, AwsError, OrganizationsApi, PermissionSet, SsoAdminApi, MAX_PAGES};
pub use commands::{generate, GenerateInput, SetlistService};
pub use error::{SetlistError, SetlistResult};
pub use filter::{filter_accounts, filter_permission_sets};
pub use model::{ConfigFile, Profile};
pub use parsing::{
    parse_account_id_list, parse_nickname_mapping, parse_permission_set_name_list,
    NicknameMapping, ParseError,
};
pub use permissions::required_permissions;
pub use rendering::{FileBuilder, IniDocument};
pub use types::{
    AwsAccountId, IdentityStoreId, ProfileDescription, Region, RoleName, SessionDuration,
    SessionName, ValidationError,
};
