//! Setlist Service Layer
//!
//! Holds the AWS clients and exposes the high-level operations (generate,
//! account and permission set listings) used by the CLI.

use crate::aws::{AwsError, AwsOrganizationsClient, AwsSsoAdminClient};
use crate::error::{SetlistError, SetlistResult};
use log::debug;

/// Organizations and SSO Admin clients sharing one loaded AWS configuration.
pub struct SetlistService {
    pub(crate) organizations: AwsOrganizationsClient,
    pub(crate) sso_admin: AwsSsoAdminClient,
}

impl SetlistService {
    /// Connect to AWS in the SSO home region.
    ///
    /// The configuration is loaded using the default credential provider chain,
    /// pinned to `region` and optionally to a named profile from the shared
    /// config files.
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials provider could be configured.
    pub async fn new(region: &str, profile: Option<&str>) -> SetlistResult<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()));
        if let Some(profile) = profile {
            debug!("Using AWS profile {}", profile);
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;

        if config.credentials_provider().is_none() {
            return Err(SetlistError::aws(
                "load AWS configuration",
                AwsError::Config("no credentials provider available".to_string()),
            ));
        }

        Ok(Self {
            organizations: AwsOrganizationsClient::new(aws_sdk_organizations::Client::new(
                &config,
            )),
            sso_admin: AwsSsoAdminClient::new(aws_sdk_ssoadmin::Client::new(&config)),
        })
    }
}
