//! AWS integration: the Organizations and SSO Admin capabilities the pipeline
//! consumes, their SDK-backed implementations, and the paginated retrieval
//! built on top of them.

pub mod organizations;
pub mod sso_admin;

use crate::error::{SetlistError, SetlistResult};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use organizations::{list_accounts, AwsOrganizationsClient, OrganizationsApi};
pub use sso_admin::{
    all_permission_sets, permission_sets_for_account, resolve_instance, AwsSsoAdminClient,
    SsoAdminApi,
};

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("AWS configuration error: {0}")]
    Config(String),
    #[error("Organizations error: {0}")]
    Organizations(String),
    #[error("SSO Admin error: {0}")]
    SsoAdmin(String),
}

pub type AwsResult<T> = Result<T, AwsError>;

/// Upper bound on pages fetched by any single listing loop.
pub const MAX_PAGES: usize = 1000;

/// One page of a paginated listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    /// A page with no continuation token.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}

/// An account as reported by Organizations. Either field may be absent in a
/// malformed response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }
}

/// Metadata for the organization's SSO instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceMetadata {
    pub instance_arn: Option<String>,
    pub identity_store_id: Option<String>,
}

/// Instance metadata after the fields every downstream step needs have been
/// checked for presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsoInstance {
    pub instance_arn: String,
    pub identity_store_id: String,
}

/// A permission set as returned by a describe call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    pub arn: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub session_duration: Option<String>,
}

pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken) -> SetlistResult<()> {
    if cancel.is_cancelled() {
        return Err(SetlistError::Cancelled);
    }
    Ok(())
}

/// Drain a token-paginated listing, checking `cancel` before every request.
///
/// Any page failure discards what has been collected so far; a partial list
/// could silently drop profiles.
pub(crate) async fn collect_pages<T, F, Fut>(
    operation: &str,
    cancel: &CancellationToken,
    mut fetch: F,
) -> SetlistResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = AwsResult<Page<T>>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    for page_number in 1..=MAX_PAGES {
        ensure_not_cancelled(cancel)?;

        let page = fetch(token.take())
            .await
            .map_err(|e| SetlistError::aws(operation, e))?;
        log::trace!(
            "{}: page {} returned {} items",
            operation,
            page_number,
            page.items.len()
        );
        items.extend(page.items);

        match page.next_token {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }

    Err(SetlistError::PageLimitExceeded {
        operation: operation.to_string(),
        limit: MAX_PAGES,
    })
}
