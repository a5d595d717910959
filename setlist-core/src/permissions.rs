//! IAM actions the caller's credentials must allow for a full run.

const REQUIRED_PERMISSIONS: &[&str] = &[
    "organizations:ListAccounts",
    "sso:ListInstances",
    "sso:ListPermissionSetsProvisionedToAccount",
    "sso:ListPermissionSets",
    "sso:DescribePermissionSet",
];

pub fn required_permissions() -> &'static [&'static str] {
    REQUIRED_PERMISSIONS
}
