//! AWS Organizations account directory.

use crate::aws::{collect_pages, Account, AwsError, AwsResult, Page};
use crate::error::SetlistResult;
use async_trait::async_trait;
use aws_sdk_organizations::error::DisplayErrorContext;
use aws_sdk_organizations::Client as OrganizationsClient;
use tokio_util::sync::CancellationToken;

/// The account-listing call the pipeline needs from Organizations.
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    async fn list_accounts(&self, next_token: Option<String>) -> AwsResult<Page<Account>>;
}

/// [`OrganizationsApi`] backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsOrganizationsClient {
    client: OrganizationsClient,
}

impl AwsOrganizationsClient {
    pub fn new(client: OrganizationsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationsApi for AwsOrganizationsClient {
    async fn list_accounts(&self, next_token: Option<String>) -> AwsResult<Page<Account>> {
        let response = self
            .client
            .list_accounts()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| AwsError::Organizations(DisplayErrorContext(e).to_string()))?;

        let accounts = response
            .accounts
            .unwrap_or_default()
            .into_iter()
            .map(|a| Account {
                id: a.id,
                name: a.name,
            })
            .collect();

        Ok(Page::new(accounts, response.next_token))
    }
}

/// Retrieve every account in the organization, following continuation
/// tokens until the last page.
pub async fn list_accounts(
    client: &dyn OrganizationsApi,
    cancel: &CancellationToken,
) -> SetlistResult<Vec<Account>> {
    collect_pages("list AWS accounts", cancel, |token| client.list_accounts(token)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetlistError;
    use crate::test_utils::MockOrganizations;

    #[tokio::test]
    async fn test_list_accounts_single_page() {
        let client = MockOrganizations::with_pages(vec![Page::last(vec![
            Account::new("111111111111", "Prod"),
            Account::new("222222222222", "Dev"),
        ])]);

        let accounts = list_accounts(&client, &CancellationToken::new())
            .await
            .expect("should list");

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id.as_deref(), Some("111111111111"));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_accounts_accumulates_pages() {
        let client = MockOrganizations::with_pages(vec![
            Page::new(
                vec![Account::new("111111111111", "One")],
                Some("page-2".to_string()),
            ),
            Page::new(
                vec![Account::new("222222222222", "Two")],
                Some("page-3".to_string()),
            ),
            Page::last(vec![Account::new("333333333333", "Three")]),
        ]);

        let accounts = list_accounts(&client, &CancellationToken::new())
            .await
            .expect("should list");

        let ids: Vec<_> = accounts.iter().filter_map(|a| a.id.as_deref()).collect();
        assert_eq!(ids, vec!["111111111111", "222222222222", "333333333333"]);
        assert_eq!(
            client.tokens_seen(),
            vec![None, Some("page-2".to_string()), Some("page-3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_list_accounts_keeps_malformed_entries() {
        let client = MockOrganizations::with_pages(vec![Page::last(vec![
            Account::default(),
            Account::new("111111111111", "Prod"),
        ])]);

        let accounts = list_accounts(&client, &CancellationToken::new())
            .await
            .expect("should list");
        assert_eq!(accounts.len(), 2);
        assert!(accounts[0].id.is_none());
    }

    #[tokio::test]
    async fn test_list_accounts_api_error_is_wrapped() {
        let client = MockOrganizations::failing("AccessDeniedException");

        let err = list_accounts(&client, &CancellationToken::new())
            .await
            .expect_err("should fail");

        assert!(matches!(err, SetlistError::Aws { .. }));
        assert!(err.to_string().contains("failed to list AWS accounts"));
        assert!(err.to_string().contains("AccessDeniedException"));
    }

    #[tokio::test]
    async fn test_list_accounts_cancelled_before_first_page() {
        let client = MockOrganizations::with_pages(vec![Page::last(vec![Account::new(
            "111111111111",
            "Prod",
        )])]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = list_accounts(&client, &cancel)
            .await
            .expect_err("should be cancelled");

        assert!(err.is_cancelled());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_accounts_cancelled_between_pages() {
        let cancel = CancellationToken::new();
        let client = MockOrganizations::with_pages(vec![
            Page::new(
                vec![Account::new("111111111111", "One")],
                Some("page-2".to_string()),
            ),
            Page::last(vec![Account::new("222222222222", "Two")]),
        ])
        .cancel_after_first_call(cancel.clone());

        let err = list_accounts(&client, &cancel)
            .await
            .expect_err("should be cancelled");

        assert!(err.is_cancelled());
        assert_eq!(client.calls(), 1);
    }
}
