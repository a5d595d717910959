use super::ParseError;
use crate::types::AwsAccountId;

/// Split on commas, trim each token, and drop the empty ones, keeping each
/// token's 1-based position in the original input.
fn tokens(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .split(',')
        .enumerate()
        .map(|(i, token)| (i + 1, token.trim()))
        .filter(|(_, token)| !token.is_empty())
}

/// Parse a comma-delimited list of 12-digit account IDs.
///
/// An empty input yields an empty list. The first invalid token aborts the
/// parse.
pub fn parse_account_id_list(input: &str) -> Result<Vec<AwsAccountId>, ParseError> {
    tokens(input)
        .map(|(position, token)| {
            AwsAccountId::new(token).map_err(|_| ParseError::InvalidAccountId {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a comma-delimited list of permission set names. Names may not
/// contain whitespace.
pub fn parse_permission_set_name_list(input: &str) -> Result<Vec<String>, ParseError> {
    tokens(input)
        .map(|(position, token)| {
            if token.chars().any(char::is_whitespace) {
                return Err(ParseError::InvalidPermissionSetName {
                    position,
                    token: token.to_string(),
                });
            }
            Ok(token.to_string())
        })
        .collect()
}
