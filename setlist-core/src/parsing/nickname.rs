use super::ParseError;
use std::collections::HashMap;

/// Account ID to nickname, keyed by the raw account ID string.
pub type NicknameMapping = HashMap<String, String>;

/// Parse `"accountID1=nickname1,accountID2=nickname2"` into a mapping.
///
/// Empty input yields an empty mapping. Empty entries between commas are
/// skipped; any other malformed entry fails the whole parse. A repeated
/// account ID keeps the last nickname.
pub fn parse_nickname_mapping(input: &str) -> Result<NicknameMapping, ParseError> {
    let mut mapping = NicknameMapping::new();

    for (i, token) in input.split(',').enumerate() {
        let position = i + 1;
        if token.is_empty() {
            continue;
        }

        let mut parts = token.split('=');
        let (Some(account_id), Some(nickname), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseError::InvalidNicknameFormat {
                position,
                token: token.to_string(),
            });
        };

        let account_id = account_id.trim();
        let nickname = nickname.trim();

        if account_id.is_empty() {
            return Err(ParseError::EmptyNicknameAccountId { position });
        }
        if nickname.is_empty() {
            return Err(ParseError::EmptyNickname { position });
        }

        mapping.insert(account_id.to_string(), nickname.to_string());
    }

    Ok(mapping)
}
