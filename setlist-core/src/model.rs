//! In-memory model of the AWS CLI config file.

use crate::parsing::NicknameMapping;
use crate::types::{
    AwsAccountId, IdentityStoreId, ProfileDescription, Region, RoleName, SessionDuration,
    SessionName,
};

/// One account/permission-set pairing.
///
/// The section label (`{account_id}-{role_name}`) is derived when rendering,
/// so the same profile can also be rendered under a nickname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub description: String,
    pub session_duration: String,
    pub session_name: String,
    pub account_id: String,
    pub role_name: String,
}

impl Profile {
    pub fn new(
        description: ProfileDescription,
        session_duration: SessionDuration,
        session_name: SessionName,
        account_id: AwsAccountId,
        role_name: RoleName,
    ) -> Self {
        Self {
            description: description.into_string(),
            session_duration: session_duration.into_string(),
            session_name: session_name.into_string(),
            account_id: account_id.into_string(),
            role_name: role_name.into_string(),
        }
    }

    pub fn name(&self) -> String {
        format!("{}-{}", self.account_id, self.role_name)
    }
}

/// Everything needed to render a complete config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub session_name: String,
    pub identity_store_id: Option<IdentityStoreId>,
    /// Replaces the identity store ID as the start URL subdomain.
    pub friendly_name: Option<String>,
    pub region: Option<Region>,
    pub profiles: Vec<Profile>,
    pub nickname_mapping: NicknameMapping,
}

impl ConfigFile {
    /// `https://{subdomain}.awsapps.com/start`, using the friendly name when
    /// one is set.
    pub fn start_url(&self) -> String {
        let subdomain = match self.friendly_name() {
            Some(name) => name,
            None => self
                .identity_store_id
                .as_ref()
                .map_or("", IdentityStoreId::as_str),
        };
        format!("https://{subdomain}.awsapps.com/start")
    }

    pub fn has_nickname(&self, account_id: &str) -> bool {
        self.nickname_mapping.contains_key(account_id)
    }

    pub fn nickname(&self, account_id: &str) -> Option<&str> {
        self.nickname_mapping.get(account_id).map(String::as_str)
    }

    pub(crate) fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref().filter(|name| !name.is_empty())
    }
}
