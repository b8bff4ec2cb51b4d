use twilight_model::id::{marker::UserMarker, Id};

/// Parse a target user from a raw argument (`<@id>`, `<@!id>`, or raw ID).
pub fn parse_target_user_id(raw: &str) -> Option<Id<UserMarker>> {
    let trimmed = raw.trim();

    let numeric = if trimmed.starts_with("<@") && trimmed.ends_with('>') {
        let without_wrappers = trimmed.strip_prefix("<@")?.strip_suffix('>')?;
        without_wrappers
            .strip_prefix('!')
            .unwrap_or(without_wrappers)
    } else {
        trimmed
    };

    // Id::new panics on zero, which is never a valid snowflake anyway.
    let id = numeric.parse::<u64>().ok().filter(|value| *value != 0)?;

    Some(Id::new(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mentions_and_raw_ids() {
        assert_eq!(parse_target_user_id("<@123>").map(Id::get), Some(123));
        assert_eq!(parse_target_user_id("<@!456>").map(Id::get), Some(456));
        assert_eq!(parse_target_user_id(" 789 ").map(Id::get), Some(789));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_target_user_id("<@>").is_none());
        assert!(parse_target_user_id("not-a-user").is_none());
        assert!(parse_target_user_id("<@12a3>").is_none());
        assert!(parse_target_user_id("0").is_none());
    }
}
