//! Read-only listings of the organization's accounts and permission sets.

use crate::aws::{
    all_permission_sets, list_accounts, resolve_instance, Account, OrganizationsApi,
    PermissionSet, SsoAdminApi,
};
use crate::error::{SetlistError, SetlistResult};
use crate::filter::filter_accounts;
use crate::parsing::parse_account_id_list;
use log::info;
use tokio_util::sync::CancellationToken;

/// Every account in the organization, narrowed by the raw include/exclude
/// lists the same way `generate` narrows them.
pub async fn filtered_accounts(
    organizations: &dyn OrganizationsApi,
    include_accounts: &str,
    exclude_accounts: &str,
    cancel: &CancellationToken,
) -> SetlistResult<Vec<Account>> {
    let include = parse_account_id_list(include_accounts)
        .map_err(|e| SetlistError::from(e).context("invalid include-accounts"))?;
    let exclude = parse_account_id_list(exclude_accounts)
        .map_err(|e| SetlistError::from(e).context("invalid exclude-accounts"))?;

    let accounts = list_accounts(organizations, cancel)
        .await
        .map_err(|e| e.context("failed to retrieve AWS accounts"))?;
    info!("AWS accounts retrieved: {}", accounts.len());

    filter_accounts(accounts, &include, &exclude).map_err(|e| e.context("account filter error"))
}

/// Every permission set defined in the organization's SSO instance.
pub async fn instance_permission_sets(
    sso_admin: &dyn SsoAdminApi,
    cancel: &CancellationToken,
) -> SetlistResult<Vec<PermissionSet>> {
    let instance = resolve_instance(sso_admin)
        .await
        .map_err(|e| e.context("failed to retrieve SSO instance"))?;

    let permission_sets = all_permission_sets(sso_admin, &instance.instance_arn, cancel)
        .await
        .map_err(|e| e.context("failed to list permission sets"))?;
    info!("Permission sets retrieved: {}", permission_sets.len());

    Ok(permission_sets)
}

impl super::service::SetlistService {
    pub async fn accounts(
        &self,
        include_accounts: &str,
        exclude_accounts: &str,
        cancel: &CancellationToken,
    ) -> SetlistResult<Vec<Account>> {
        filtered_accounts(&self.organizations, include_accounts, exclude_accounts, cancel).await
    }

    pub async fn permission_sets(
        &self,
        cancel: &CancellationToken,
    ) -> SetlistResult<Vec<PermissionSet>> {
        instance_permission_sets(&self.sso_admin, cancel).await
    }
}
