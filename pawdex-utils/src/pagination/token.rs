//! Stateless pagination token encoding, parsing, and validation.

use crate::time::now_unix_secs;

const TOKEN_PREFIX: &str = "pg";

/// Parsed pagination token data from a button custom ID.
#[derive(Debug, Clone)]
pub struct PaginationToken {
    /// Logical command name (e.g. `friends`).
    pub command: String,
    /// Button action (`prev` or `next`).
    pub action: String,
    /// Target page number, 1-based.
    pub page: usize,
    /// Total page count.
    pub total_pages: usize,
    /// User ID that owns this pagination session.
    pub user_id: u64,
    /// Expiry timestamp (unix seconds).
    pub expires_at: u64,
}

/// Validation outcome for pagination button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationValidationError {
    Invalid,
    WrongCommand,
    WrongUser,
    Expired,
    OutOfRange,
}

/// Build a compact custom ID carrying stateless pagination state.
pub fn build_custom_id(
    command: &str,
    action: &str,
    target_page: usize,
    total_pages: usize,
    user_id: u64,
    expires_at: u64,
) -> String {
    format!("{TOKEN_PREFIX}:{command}:{action}:{target_page}:{total_pages}:{user_id}:{expires_at}")
}

/// Parse a pagination custom ID.
pub fn parse_custom_id(custom_id: &str) -> Option<PaginationToken> {
    let mut parts = custom_id.split(':');

    let prefix = parts.next()?;
    if prefix != TOKEN_PREFIX {
        return None;
    }

    let command = parts.next()?.to_owned();
    let action = parts.next()?.to_owned();
    let page = parts.next()?.parse::<usize>().ok()?;
    let total_pages = parts.next()?.parse::<usize>().ok()?;
    let user_id = parts.next()?.parse::<u64>().ok()?;
    let expires_at = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(PaginationToken {
        command,
        action,
        page,
        total_pages,
        user_id,
        expires_at,
    })
}

/// Validate a pagination token for command/user/expiry/page bounds.
pub fn validate_custom_id(
    custom_id: &str,
    expected_command: &str,
    actor_user_id: u64,
) -> Result<PaginationToken, PaginationValidationError> {
    let token = parse_custom_id(custom_id).ok_or(PaginationValidationError::Invalid)?;

    if token.command != expected_command {
        return Err(PaginationValidationError::WrongCommand);
    }

    if token.user_id != actor_user_id {
        return Err(PaginationValidationError::WrongUser);
    }

    if token.action != "prev" && token.action != "next" {
        return Err(PaginationValidationError::Invalid);
    }

    if now_unix_secs() > token.expires_at {
        return Err(PaginationValidationError::Expired);
    }

    if token.page == 0 || token.page > token.total_pages {
        return Err(PaginationValidationError::OutOfRange);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_future() -> u64 {
        now_unix_secs() + 600
    }

    #[test]
    fn token_round_trips() {
        let id = build_custom_id("friends", "next", 2, 4, 77, far_future());
        let token = parse_custom_id(&id).unwrap();
        assert_eq!(token.command, "friends");
        assert_eq!(token.action, "next");
        assert_eq!(token.page, 2);
        assert_eq!(token.total_pages, 4);
        assert_eq!(token.user_id, 77);
    }

    #[test]
    fn validation_catches_owner_expiry_and_bounds() {
        let id = build_custom_id("friends", "next", 2, 4, 77, far_future());
        assert!(validate_custom_id(&id, "friends", 77).is_ok());
        assert_eq!(
            validate_custom_id(&id, "blocked", 77).unwrap_err(),
            PaginationValidationError::WrongCommand
        );
        assert_eq!(
            validate_custom_id(&id, "friends", 78).unwrap_err(),
            PaginationValidationError::WrongUser
        );

        let expired = build_custom_id("friends", "next", 2, 4, 77, 1);
        assert_eq!(
            validate_custom_id(&expired, "friends", 77).unwrap_err(),
            PaginationValidationError::Expired
        );

        let out_of_range = build_custom_id("friends", "prev", 9, 4, 77, far_future());
        assert_eq!(
            validate_custom_id(&out_of_range, "friends", 77).unwrap_err(),
            PaginationValidationError::OutOfRange
        );

        assert!(parse_custom_id("pgm:friends:2:77:1").is_none());
    }
}
