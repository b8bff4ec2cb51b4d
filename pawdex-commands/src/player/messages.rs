use twilight_http::Client;
use twilight_model::id::{marker::UserMarker, Id};

use pawdex_database::model::{DonationPolicy, RelationEntry};
use pawdex_utils::time::discord_timestamp;

/// Resolved command target, fetched once per command invocation.
#[derive(Clone, Debug)]
pub struct TargetUser {
    pub id: Id<UserMarker>,
    pub display_name: String,
    pub bot: bool,
}

/// Resolve a target user for validation and display.
///
/// Returns `None` when the id does not resolve to a Discord user.
pub async fn fetch_target_user(http: &Client, user_id: Id<UserMarker>) -> Option<TargetUser> {
    let user = http.user(user_id).await.ok()?.model().await.ok()?;

    Some(TargetUser {
        id: user_id,
        display_name: user.global_name.unwrap_or(user.name),
        bot: user.bot,
    })
}

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn unknown_user_message() -> &'static str {
    "Could not find that user."
}

pub fn self_target_message(action: &str) -> String {
    format!("You cannot {action} yourself.")
}

pub fn bot_target_message(action: &str) -> String {
    format!("You cannot {action} a bot.")
}

pub fn members_intent_missing_message() -> &'static str {
    "The same-server privacy policy is unavailable because the bot is running without the members intent."
}

pub fn donation_policy_update_message(policy: DonationPolicy) -> &'static str {
    match policy {
        DonationPolicy::AlwaysAccept => {
            "Setting updated, you will now receive all donated critters immediately."
        }
        DonationPolicy::RequestApproval => {
            "Setting updated, you will now have to approve donation requests manually."
        }
        DonationPolicy::AlwaysDeny => {
            "Setting updated, it is now impossible to donate critters to you. \
             It is still possible to perform exchanges using the trade system."
        }
        DonationPolicy::FriendsOnly => {
            "Setting updated, you will now only receive donated critters from \
             players you have added as friends."
        }
    }
}

/// Shape relation rows into numbered `(title, body)` pagination entries.
///
/// Numbering follows the store's creation-time enumeration, so an entry
/// keeps its index across pages.
pub fn relation_list_entries(entries: &[RelationEntry], since_label: &str) -> Vec<(String, String)> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            (
                format!("{}. <@{}>", index + 1, entry.other_discord_id),
                format!(
                    "{since_label} {}",
                    discord_timestamp(entry.created_at.and_utc().timestamp())
                ),
            )
        })
        .collect()
}

pub fn page_out_of_range_message(requested_page: usize, total_pages: usize) -> String {
    format!("Page {requested_page} does not exist. Available pages: 1-{total_pages}.")
}
