//! Scripted in-memory stand-ins for the Organizations and SSO Admin APIs.

use crate::aws::{
    Account, AwsError, AwsResult, InstanceMetadata, OrganizationsApi, Page, PermissionSet,
    SsoAdminApi,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub(crate) fn described(
    arn: &str,
    name: &str,
    description: &str,
    duration: &str,
) -> PermissionSet {
    PermissionSet {
        arn: arn.to_string(),
        name: Some(name.to_string()),
        description: Some(description.to_string()),
        session_duration: Some(duration.to_string()),
    }
}

#[derive(Default)]
pub(crate) struct MockOrganizations {
    pages: Mutex<VecDeque<Page<Account>>>,
    failure: Option<String>,
    tokens: Mutex<Vec<Option<String>>>,
    cancel_after_first: Option<CancellationToken>,
}

impl MockOrganizations {
    pub(crate) fn with_pages(pages: Vec<Page<Account>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn cancel_after_first_call(mut self, cancel: CancellationToken) -> Self {
        self.cancel_after_first = Some(cancel);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub(crate) fn tokens_seen(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrganizationsApi for MockOrganizations {
    async fn list_accounts(&self, next_token: Option<String>) -> AwsResult<Page<Account>> {
        self.tokens.lock().unwrap().push(next_token);
        if let Some(cancel) = &self.cancel_after_first {
            cancel.cancel();
        }
        if let Some(message) = &self.failure {
            return Err(AwsError::Organizations(message.clone()));
        }
        Ok(self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Page::last(vec![])))
    }
}

#[derive(Default)]
pub(crate) struct MockSsoAdmin {
    instances: Vec<InstanceMetadata>,
    instances_failure: Option<String>,
    account_pages: Mutex<HashMap<String, VecDeque<Page<String>>>>,
    instance_pages: Mutex<VecDeque<Page<String>>>,
    permission_sets: HashMap<String, PermissionSet>,
    list_failure: Option<String>,
    describe_failure: Option<String>,
    cancel_after_first_list: Option<CancellationToken>,
    cancel_after_first_describe: Option<CancellationToken>,
    list_calls: AtomicUsize,
    describe_calls: AtomicUsize,
}

impl MockSsoAdmin {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_instance(self, instance_arn: &str, identity_store_id: &str) -> Self {
        self.with_instances(vec![InstanceMetadata {
            instance_arn: Some(instance_arn.to_string()),
            identity_store_id: Some(identity_store_id.to_string()),
        }])
    }

    pub(crate) fn with_instances(mut self, instances: Vec<InstanceMetadata>) -> Self {
        self.instances = instances;
        self
    }

    pub(crate) fn fail_list_instances(mut self, message: &str) -> Self {
        self.instances_failure = Some(message.to_string());
        self
    }

    pub(crate) fn with_account_pages(self, account_id: &str, pages: Vec<Page<String>>) -> Self {
        self.account_pages
            .lock()
            .unwrap()
            .insert(account_id.to_string(), pages.into());
        self
    }

    pub(crate) fn with_instance_pages(self, pages: Vec<Page<String>>) -> Self {
        *self.instance_pages.lock().unwrap() = pages.into();
        self
    }

    pub(crate) fn with_permission_set(mut self, permission_set: PermissionSet) -> Self {
        self.permission_sets
            .insert(permission_set.arn.clone(), permission_set);
        self
    }

    pub(crate) fn fail_list(mut self, message: &str) -> Self {
        self.list_failure = Some(message.to_string());
        self
    }

    pub(crate) fn fail_describe(mut self, message: &str) -> Self {
        self.describe_failure = Some(message.to_string());
        self
    }

    pub(crate) fn cancel_after_first_list(mut self, cancel: CancellationToken) -> Self {
        self.cancel_after_first_list = Some(cancel);
        self
    }

    pub(crate) fn cancel_after_first_describe(mut self, cancel: CancellationToken) -> Self {
        self.cancel_after_first_describe = Some(cancel);
        self
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    fn record_list(&self) -> AwsResult<()> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(cancel) = &self.cancel_after_first_list {
            cancel.cancel();
        }
        match &self.list_failure {
            Some(message) => Err(AwsError::SsoAdmin(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SsoAdminApi for MockSsoAdmin {
    async fn list_instances(&self) -> AwsResult<Vec<InstanceMetadata>> {
        match &self.instances_failure {
            Some(message) => Err(AwsError::SsoAdmin(message.clone())),
            None => Ok(self.instances.clone()),
        }
    }

    async fn list_permission_sets_provisioned_to_account(
        &self,
        _instance_arn: &str,
        account_id: &str,
        _next_token: Option<String>,
    ) -> AwsResult<Page<String>> {
        self.record_list()?;
        Ok(self
            .account_pages
            .lock()
            .unwrap()
            .get_mut(account_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Page::last(vec![])))
    }

    async fn list_permission_sets(
        &self,
        _instance_arn: &str,
        _next_token: Option<String>,
    ) -> AwsResult<Page<String>> {
        self.record_list()?;
        Ok(self
            .instance_pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Page::last(vec![])))
    }

    async fn describe_permission_set(
        &self,
        _instance_arn: &str,
        permission_set_arn: &str,
    ) -> AwsResult<Option<PermissionSet>> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(cancel) = &self.cancel_after_first_describe {
            cancel.cancel();
        }
        if let Some(message) = &self.describe_failure {
            return Err(AwsError::SsoAdmin(message.clone()));
        }
        Ok(self.permission_sets.get(permission_set_arn).cloned())
    }
}
