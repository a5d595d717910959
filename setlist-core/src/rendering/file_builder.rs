//! Renders a [`ConfigFile`] into AWS CLI config format.

use super::ini::IniDocument;
use crate::error::{SetlistError, SetlistResult};
use crate::model::{ConfigFile, Profile};
use chrono::{DateTime, Utc};

pub const SSO_SESSION_KEY: &str = "sso_session";
pub const SSO_SESSION_SECTION: &str = "sso-session";
pub const SSO_START_URL_KEY: &str = "sso_start_url";
pub const SSO_REGION_KEY: &str = "sso_region";
pub const SSO_REGISTRATION_SCOPES_KEY: &str = "sso_registration_scopes";
pub const SSO_REGISTRATION_SCOPES: &str = "sso:account:access";
pub const SSO_ACCOUNT_ID_KEY: &str = "sso_account_id";
pub const SSO_ROLE_NAME_KEY: &str = "sso_role_name";

/// Timestamp format used in the generated-on comment.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S UTC";

pub struct FileBuilder {
    config: ConfigFile,
}

impl FileBuilder {
    pub fn new(config: ConfigFile) -> Self {
        Self { config }
    }

    /// Render the config, stamped with the current UTC time.
    pub fn build(&self) -> SetlistResult<IniDocument> {
        self.build_at(Utc::now())
    }

    /// Render the config with a fixed generation time.
    ///
    /// Section order: `default`, `sso-session <name>`, then each profile in
    /// order, followed directly by its nickname alias when one is mapped.
    pub fn build_at(&self, generated_at: DateTime<Utc>) -> SetlistResult<IniDocument> {
        self.validate()?;

        let mut document = IniDocument::default();
        self.add_default_section(&mut document, generated_at);
        self.add_sso_section(&mut document);

        for profile in &self.config.profiles {
            add_profile_section(&mut document, &profile.name(), profile)?;

            if let Some(nickname) = self.config.nickname(&profile.account_id) {
                let alias = format!("{}-{}", nickname, profile.role_name);
                add_profile_section(&mut document, &alias, profile)?;
            }
        }

        Ok(document)
    }

    fn validate(&self) -> SetlistResult<()> {
        if self.config.session_name.is_empty() {
            return Err(SetlistError::MissingField("SessionName"));
        }

        if self.config.identity_store_id.is_none() && self.config.friendly_name().is_none() {
            return Err(SetlistError::MissingField(
                "either IdentityStoreId or FriendlyName must be provided",
            ));
        }

        if self.config.region.is_none() {
            return Err(SetlistError::MissingField("Region"));
        }

        Ok(())
    }

    fn add_default_section(&self, document: &mut IniDocument, generated_at: DateTime<Utc>) {
        let section = document.section_mut("default");
        section.set_comment(format!(
            "# Generated on: {}",
            generated_at.format(TIMESTAMP_FORMAT)
        ));
        section.set(SSO_SESSION_KEY, self.config.session_name.as_str());
    }

    fn add_sso_section(&self, document: &mut IniDocument) {
        let name = format!("{} {}", SSO_SESSION_SECTION, self.config.session_name);
        let region = self
            .config
            .region
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        let section = document.section_mut(&name);
        section.set(SSO_START_URL_KEY, self.config.start_url());
        section.set(SSO_REGION_KEY, region);
        section.set(SSO_REGISTRATION_SCOPES_KEY, SSO_REGISTRATION_SCOPES);
    }
}

/// Profiles are normally built from validated values; this is the last check
/// before anything is written.
fn add_profile_section(
    document: &mut IniDocument,
    label: &str,
    profile: &Profile,
) -> SetlistResult<()> {
    if profile.session_name.is_empty() {
        return Err(SetlistError::ProfileMissingField("SessionName"));
    }
    if profile.account_id.is_empty() {
        return Err(SetlistError::ProfileMissingField("AccountId"));
    }
    if profile.role_name.is_empty() {
        return Err(SetlistError::ProfileMissingField("RoleName"));
    }

    let section = document.section_mut(&format!("profile {label}"));
    section.set_comment(format!(
        "# {}. Session Duration: {}",
        profile.description, profile.session_duration
    ));
    section.set(SSO_SESSION_KEY, profile.session_name.as_str());
    section.set(SSO_ACCOUNT_ID_KEY, profile.account_id.as_str());
    section.set(SSO_ROLE_NAME_KEY, profile.role_name.as_str());

    Ok(())
}
