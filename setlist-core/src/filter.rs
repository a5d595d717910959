//! Include/exclude filtering of accounts and permission sets.
//!
//! Include and exclude lists are mutually exclusive. Items without a key (an
//! account with no ID, a permission set with no name) never survive an active
//! filter.

use crate::aws::{Account, PermissionSet};
use crate::error::{SetlistError, SetlistResult};
use crate::types::AwsAccountId;
use std::collections::HashSet;

fn filter_by_key<T, F>(
    items: Vec<T>,
    include: &[&str],
    exclude: &[&str],
    key: F,
) -> SetlistResult<Vec<T>>
where
    F: Fn(&T) -> Option<&str>,
{
    if !include.is_empty() && !exclude.is_empty() {
        return Err(SetlistError::MutuallyExclusiveFilters);
    }

    if include.is_empty() && exclude.is_empty() {
        return Ok(items);
    }

    let keep_listed = !include.is_empty();
    let listed: HashSet<&str> = (if keep_listed { include } else { exclude })
        .iter()
        .copied()
        .collect();

    Ok(items
        .into_iter()
        .filter(|item| key(item).is_some_and(|k| listed.contains(k) == keep_listed))
        .collect())
}

/// Keep only the accounts in `include`, or drop those in `exclude`.
pub fn filter_accounts(
    accounts: Vec<Account>,
    include: &[AwsAccountId],
    exclude: &[AwsAccountId],
) -> SetlistResult<Vec<Account>> {
    let include: Vec<&str> = include.iter().map(AwsAccountId::as_str).collect();
    let exclude: Vec<&str> = exclude.iter().map(AwsAccountId::as_str).collect();

    filter_by_key(accounts, &include, &exclude, |a| a.id.as_deref())
}

/// Keep only the permission sets named in `include`, or drop those named in
/// `exclude`.
pub fn filter_permission_sets(
    permission_sets: Vec<PermissionSet>,
    include: &[String],
    exclude: &[String],
) -> SetlistResult<Vec<PermissionSet>> {
    let include: Vec<&str> = include.iter().map(String::as_str).collect();
    let exclude: Vec<&str> = exclude.iter().map(String::as_str).collect();

    filter_by_key(permission_sets, &include, &exclude, |p| p.name.as_deref())
}
