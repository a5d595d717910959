//! The generate pipeline: SSO instance, accounts, filters, nicknames, then a
//! profile for every surviving account/permission-set pair.

use crate::aws::{
    list_accounts, permission_sets_for_account, resolve_instance, OrganizationsApi,
    PermissionSet, SsoAdminApi,
};
use crate::error::{SetlistError, SetlistResult};
use crate::filter::{filter_accounts, filter_permission_sets};
use crate::model::{ConfigFile, Profile};
use crate::parsing::{
    parse_account_id_list, parse_nickname_mapping, parse_permission_set_name_list,
};
use crate::types::{
    AwsAccountId, IdentityStoreId, ProfileDescription, Region, RoleName, SessionDuration,
    SessionName, ValidationError,
};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

/// Operator-supplied settings for one generate run. List-valued settings are
/// the raw comma-delimited strings; an empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateInput {
    pub session_name: String,
    pub region: String,
    pub friendly_name: String,
    pub nickname_mapping: String,
    pub include_accounts: String,
    pub exclude_accounts: String,
    pub include_permission_sets: String,
    pub exclude_permission_sets: String,
}

/// Assemble a [`ConfigFile`] from the organization's accounts and the SSO
/// permission sets provisioned to them.
///
/// Operator errors (bad lists, both filters set, malformed nicknames, invalid
/// region) and upstream call failures abort the run. Incomplete upstream
/// records are logged and skipped.
pub async fn generate(
    input: GenerateInput,
    sso_admin: &dyn SsoAdminApi,
    organizations: &dyn OrganizationsApi,
    cancel: &CancellationToken,
) -> SetlistResult<ConfigFile> {
    info!("Retrieving SSO instance");
    let instance = resolve_instance(sso_admin)
        .await
        .map_err(|e| e.context("failed to retrieve SSO instance"))?;
    info!("SSO instance retrieved: {}", instance.instance_arn);

    info!("Listing AWS accounts");
    let accounts = list_accounts(organizations, cancel)
        .await
        .map_err(|e| e.context("failed to retrieve AWS accounts"))?;
    info!("AWS accounts retrieved: {}", accounts.len());

    let include_accounts = parse_account_id_list(&input.include_accounts)
        .map_err(|e| SetlistError::from(e).context("invalid include-accounts"))?;
    let exclude_accounts = parse_account_id_list(&input.exclude_accounts)
        .map_err(|e| SetlistError::from(e).context("invalid exclude-accounts"))?;

    let before = accounts.len();
    let accounts = filter_accounts(accounts, &include_accounts, &exclude_accounts)
        .map_err(|e| e.context("account filter error"))?;
    info!("Accounts filtered: {} before, {} after", before, accounts.len());

    let nickname_mapping = parse_nickname_mapping(&input.nickname_mapping)
        .map_err(|e| SetlistError::from(e).context("invalid mapping format"))?;

    let identity_store_id = IdentityStoreId::new(instance.identity_store_id.as_str())
        .map_err(|e| SetlistError::from(e).context("invalid identity store ID"))?;
    let region = Region::new(input.region.as_str())
        .map_err(|e| SetlistError::from(e).context("invalid region"))?;

    let include_permission_sets = parse_permission_set_name_list(&input.include_permission_sets)
        .map_err(|e| SetlistError::from(e).context("invalid include-permission-sets"))?;
    let exclude_permission_sets = parse_permission_set_name_list(&input.exclude_permission_sets)
        .map_err(|e| SetlistError::from(e).context("invalid exclude-permission-sets"))?;

    let mut profiles = Vec::new();
    for account in &accounts {
        let Some(account_id) = account.id.as_deref() else {
            warn!("Found account with no ID, skipping");
            continue;
        };
        if let Err(e) = AwsAccountId::new(account_id) {
            warn!("Skipping account {:?}: {}", account_id, e);
            continue;
        }

        info!("Processing account {}", account_id);
        let permission_sets =
            permission_sets_for_account(sso_admin, &instance.instance_arn, account_id, cancel)
                .await
                .map_err(|e| {
                    e.context(format!(
                        "failed to list permission sets for account {account_id}"
                    ))
                })?;

        let permission_sets = filter_permission_sets(
            permission_sets,
            &include_permission_sets,
            &exclude_permission_sets,
        )
        .map_err(|e| e.context("permission set filter error"))?;
        info!(
            "Permission sets retrieved for account {}: {}",
            account_id,
            permission_sets.len()
        );

        profiles.extend(
            permission_sets
                .iter()
                .filter_map(|p| profile_for(&input.session_name, account_id, p)),
        );
    }

    let friendly_name = Some(input.friendly_name).filter(|name| !name.is_empty());

    Ok(ConfigFile {
        session_name: input.session_name,
        identity_store_id: Some(identity_store_id),
        friendly_name,
        region: Some(region),
        profiles,
        nickname_mapping,
    })
}

impl super::service::SetlistService {
    /// Run [`generate`] against the live AWS clients.
    pub async fn generate(
        &self,
        input: GenerateInput,
        cancel: &CancellationToken,
    ) -> SetlistResult<ConfigFile> {
        generate(input, &self.sso_admin, &self.organizations, cancel).await
    }
}

/// Build a profile, or log why the permission set is being skipped.
fn profile_for(
    session_name: &str,
    account_id: &str,
    permission_set: &PermissionSet,
) -> Option<Profile> {
    let (Some(name), Some(description), Some(duration)) = (
        permission_set.name.as_deref(),
        permission_set.description.as_deref(),
        permission_set.session_duration.as_deref(),
    ) else {
        warn!(
            "Found incomplete permission set data for account {}, skipping {}",
            account_id, permission_set.arn
        );
        return None;
    };

    match validated_profile(session_name, account_id, name, description, duration) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!(
                "Skipping permission set {} for account {}: {}",
                permission_set.arn, account_id, e
            );
            None
        }
    }
}

fn validated_profile(
    session_name: &str,
    account_id: &str,
    role_name: &str,
    description: &str,
    duration: &str,
) -> Result<Profile, ValidationError> {
    Ok(Profile::new(
        ProfileDescription::new(description)?,
        SessionDuration::new(duration)?,
        SessionName::new(session_name)?,
        AwsAccountId::new(account_id)?,
        RoleName::new(role_name)?,
    ))
}
