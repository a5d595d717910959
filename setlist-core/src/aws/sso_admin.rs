//! IAM Identity Center (SSO Admin): instance lookup and the permission set
//! catalog.
//!
//! Listing and describing are separate calls upstream, so they are separate
//! here too: ARNs are collected across every page first, then each ARN is
//! described in order.

use crate::aws::{
    collect_pages, ensure_not_cancelled, AwsError, AwsResult, InstanceMetadata, Page,
    PermissionSet, SsoInstance,
};
use crate::error::{SetlistError, SetlistResult};
use async_trait::async_trait;
use aws_sdk_ssoadmin::error::DisplayErrorContext;
use aws_sdk_ssoadmin::Client as SsoAdminClient;
use tokio_util::sync::CancellationToken;

/// The SSO Admin calls the pipeline depends on.
#[async_trait]
pub trait SsoAdminApi: Send + Sync {
    /// Single page; an organization has at most one instance.
    async fn list_instances(&self) -> AwsResult<Vec<InstanceMetadata>>;

    async fn list_permission_sets_provisioned_to_account(
        &self,
        instance_arn: &str,
        account_id: &str,
        next_token: Option<String>,
    ) -> AwsResult<Page<String>>;

    async fn list_permission_sets(
        &self,
        instance_arn: &str,
        next_token: Option<String>,
    ) -> AwsResult<Page<String>>;

    /// `Ok(None)` means the call succeeded but carried no permission set.
    async fn describe_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
    ) -> AwsResult<Option<PermissionSet>>;
}

/// [`SsoAdminApi`] backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsSsoAdminClient {
    client: SsoAdminClient,
}

impl AwsSsoAdminClient {
    pub fn new(client: SsoAdminClient) -> Self {
        Self { client }
    }
}

fn sdk_error<E>(e: E) -> AwsError
where
    E: std::error::Error,
{
    AwsError::SsoAdmin(DisplayErrorContext(e).to_string())
}

#[async_trait]
impl SsoAdminApi for AwsSsoAdminClient {
    async fn list_instances(&self) -> AwsResult<Vec<InstanceMetadata>> {
        let response = self
            .client
            .list_instances()
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(response
            .instances
            .unwrap_or_default()
            .into_iter()
            .map(|i| InstanceMetadata {
                instance_arn: i.instance_arn,
                identity_store_id: i.identity_store_id,
            })
            .collect())
    }

    async fn list_permission_sets_provisioned_to_account(
        &self,
        instance_arn: &str,
        account_id: &str,
        next_token: Option<String>,
    ) -> AwsResult<Page<String>> {
        let response = self
            .client
            .list_permission_sets_provisioned_to_account()
            .instance_arn(instance_arn)
            .account_id(account_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(Page::new(
            response.permission_sets.unwrap_or_default(),
            response.next_token,
        ))
    }

    async fn list_permission_sets(
        &self,
        instance_arn: &str,
        next_token: Option<String>,
    ) -> AwsResult<Page<String>> {
        let response = self
            .client
            .list_permission_sets()
            .instance_arn(instance_arn)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(Page::new(
            response.permission_sets.unwrap_or_default(),
            response.next_token,
        ))
    }

    async fn describe_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
    ) -> AwsResult<Option<PermissionSet>> {
        let response = self
            .client
            .describe_permission_set()
            .instance_arn(instance_arn)
            .permission_set_arn(permission_set_arn)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(response.permission_set.map(|p| PermissionSet {
            arn: p
                .permission_set_arn
                .unwrap_or_else(|| permission_set_arn.to_string()),
            name: p.name,
            description: p.description,
            session_duration: p.session_duration,
        }))
    }
}

/// Look up the organization's SSO instance.
///
/// Fails if SSO is not enabled or the instance lacks its ARN or identity
/// store ID.
pub async fn resolve_instance(client: &dyn SsoAdminApi) -> SetlistResult<SsoInstance> {
    let instances = client
        .list_instances()
        .await
        .map_err(|e| SetlistError::aws("list SSO instances", e))?;

    let instance = instances
        .into_iter()
        .next()
        .ok_or(SetlistError::SsoNotEnabled)?;

    let instance_arn = instance
        .instance_arn
        .ok_or(SetlistError::IncompleteInstance("instance ARN"))?;
    let identity_store_id = instance
        .identity_store_id
        .ok_or(SetlistError::IncompleteInstance("identity store ID"))?;

    Ok(SsoInstance {
        instance_arn,
        identity_store_id,
    })
}

/// Permission sets provisioned to one account, fully described.
pub async fn permission_sets_for_account(
    client: &dyn SsoAdminApi,
    instance_arn: &str,
    account_id: &str,
    cancel: &CancellationToken,
) -> SetlistResult<Vec<PermissionSet>> {
    if instance_arn.is_empty() {
        return Err(SetlistError::InvalidParameter("empty instanceArn"));
    }
    if account_id.is_empty() {
        return Err(SetlistError::InvalidParameter("empty accountId"));
    }

    let operation = format!("list permission sets provisioned to account {account_id}");
    let arns = collect_pages(&operation, cancel, |token| {
        client.list_permission_sets_provisioned_to_account(instance_arn, account_id, token)
    })
    .await?;

    describe_all(client, instance_arn, arns, cancel).await
}

/// Every permission set defined in the instance, fully described.
pub async fn all_permission_sets(
    client: &dyn SsoAdminApi,
    instance_arn: &str,
    cancel: &CancellationToken,
) -> SetlistResult<Vec<PermissionSet>> {
    if instance_arn.is_empty() {
        return Err(SetlistError::InvalidParameter("empty instanceArn"));
    }

    let arns = collect_pages("list permission sets", cancel, |token| {
        client.list_permission_sets(instance_arn, token)
    })
    .await?;

    describe_all(client, instance_arn, arns, cancel).await
}

async fn describe_all(
    client: &dyn SsoAdminApi,
    instance_arn: &str,
    arns: Vec<String>,
    cancel: &CancellationToken,
) -> SetlistResult<Vec<PermissionSet>> {
    let mut permission_sets = Vec::with_capacity(arns.len());

    for arn in arns {
        ensure_not_cancelled(cancel)?;

        let described = client
            .describe_permission_set(instance_arn, &arn)
            .await
            .map_err(|e| SetlistError::aws(format!("describe permission set {arn}"), e))?;

        match described {
            Some(permission_set) => permission_sets.push(permission_set),
            None => return Err(SetlistError::MissingPermissionSet { arn }),
        }
    }

    Ok(permission_sets)
}
