use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Render a unix timestamp as a Discord full date-time marker.
pub fn discord_timestamp(unix_secs: i64) -> String {
    format!("<t:{unix_secs}:f>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discord_timestamp_uses_full_style() {
        assert_eq!(discord_timestamp(1_700_000_000), "<t:1700000000:f>");
    }
}
