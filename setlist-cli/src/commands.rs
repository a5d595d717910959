use crate::cli::{AccountFilterArgs, GenerateArgs, GlobalArgs};
use anyhow::{Context, Result};
use log::{debug, info};
use setlist_core::{
    required_permissions, Account, FileBuilder, GenerateInput, PermissionSet, SetlistError,
    SetlistService,
};
use std::fmt::Write as _;
use tokio_util::sync::CancellationToken;

pub fn print_permissions() {
    for permission in required_permissions() {
        println!("{permission}");
    }
}

pub async fn generate(
    global: &GlobalArgs,
    args: GenerateArgs,
    cancel: &CancellationToken,
) -> Result<()> {
    let session_name = global.require_sso_session()?.to_string();
    let region = global.require_sso_region()?.to_string();

    let service = connect(&region, global.profile.as_deref()).await?;
    let input = GenerateInput {
        session_name,
        region,
        friendly_name: args.sso_friendly_name,
        nickname_mapping: args.mapping,
        include_accounts: args.accounts.include_accounts,
        exclude_accounts: args.accounts.exclude_accounts,
        include_permission_sets: args.include_permission_sets,
        exclude_permission_sets: args.exclude_permission_sets,
    };

    let config = service
        .generate(input, cancel)
        .await
        .map_err(describe_failure)?;
    info!("Profiles generated: {}", config.profiles.len());

    let rendered = FileBuilder::new(config)
        .build()
        .context("Failed to build config file")?
        .to_string();

    if args.stdout {
        print!("{rendered}");
        return Ok(());
    }

    tokio::fs::write(&args.output, rendered)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Wrote to {}", args.output.display());

    Ok(())
}

pub async fn accounts(
    global: &GlobalArgs,
    filters: AccountFilterArgs,
    cancel: &CancellationToken,
) -> Result<()> {
    let region = global.require_sso_region()?;
    let service = connect(region, global.profile.as_deref()).await?;

    let accounts = service
        .accounts(&filters.include_accounts, &filters.exclude_accounts, cancel)
        .await
        .map_err(describe_failure)?;
    print!("{}", account_lines(&accounts));

    Ok(())
}

pub async fn permission_sets(global: &GlobalArgs, cancel: &CancellationToken) -> Result<()> {
    let region = global.require_sso_region()?;
    let service = connect(region, global.profile.as_deref()).await?;

    let permission_sets = service
        .permission_sets(cancel)
        .await
        .map_err(describe_failure)?;
    print!("{}", permission_set_lines(&permission_sets));

    Ok(())
}

async fn connect(region: &str, profile: Option<&str>) -> Result<SetlistService> {
    debug!("Loading AWS configuration for region {}", region);
    SetlistService::new(region, profile)
        .await
        .context("Failed to initialize AWS clients")
}

fn describe_failure(err: SetlistError) -> anyhow::Error {
    if err.is_cancelled() {
        anyhow::anyhow!("timed out or interrupted before completion")
    } else {
        err.into()
    }
}

fn account_lines(accounts: &[Account]) -> String {
    accounts.iter().fold(String::new(), |mut out, account| {
        let _ = writeln!(
            out,
            "{}\t{}",
            account.id.as_deref().unwrap_or_default(),
            account.name.as_deref().unwrap_or_default()
        );
        out
    })
}

fn permission_set_lines(permission_sets: &[PermissionSet]) -> String {
    permission_sets.iter().fold(String::new(), |mut out, set| {
        let _ = writeln!(
            out,
            "{}\t{}",
            set.name.as_deref().unwrap_or_default(),
            set.description.as_deref().unwrap_or_default()
        );
        out
    })
}
