use chrono::NaiveDateTime;

/// Who may view a player's inventory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, sqlx::Type)]
#[repr(i32)]
pub enum PrivacyPolicy {
    Allow = 1,
    Deny = 2,
    SameServer = 3,
    Friends = 4,
}

impl PrivacyPolicy {
    /// Decode a command choice token. Unknown tokens decode to `None`.
    pub fn from_choice(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "open" | "allow" => Some(Self::Allow),
            "private" | "deny" => Some(Self::Deny),
            "sameserver" | "server" => Some(Self::SameServer),
            "friends" => Some(Self::Friends),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Allow => "Open Inventory",
            Self::Deny => "Private Inventory",
            Self::SameServer => "Same Server",
            Self::Friends => "Friends Only",
        }
    }
}

/// How unsolicited collectible gifts are handled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, sqlx::Type)]
#[repr(i32)]
pub enum DonationPolicy {
    AlwaysAccept = 1,
    RequestApproval = 2,
    AlwaysDeny = 3,
    FriendsOnly = 4,
}

impl DonationPolicy {
    /// Decode a command choice token. Unknown tokens decode to `None`.
    pub fn from_choice(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "accept" | "always" => Some(Self::AlwaysAccept),
            "approval" | "ask" => Some(Self::RequestApproval),
            "deny" | "never" => Some(Self::AlwaysDeny),
            "friends" => Some(Self::FriendsOnly),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AlwaysAccept => "Accept all donations",
            Self::RequestApproval => "Request your approval first",
            Self::AlwaysDeny => "Deny all donations",
            Self::FriendsOnly => "Accept donations from friends only",
        }
    }
}

/// The two symmetric relation kinds stored in the `relations` table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, sqlx::Type)]
#[repr(i32)]
pub enum RelationKind {
    Friend = 1,
    Block = 2,
}

/// One player identity record, created lazily on first interaction.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub discord_id: i64,
    pub privacy_policy: PrivacyPolicy,
    pub donation_policy: DonationPolicy,
}

/// One relation row from the perspective of a given player: the other
/// party already resolved to their discord id.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct RelationEntry {
    pub other_discord_id: i64,
    pub created_at: NaiveDateTime,
}

/// Flattened owned-item row as it appears in the items CSV.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct OwnedItemExport {
    pub id: i64,
    pub species: String,
    pub rarity: f64,
    pub caught_at: NaiveDateTime,
    /// Discord id of the player this item was last traded in from.
    pub traded_from: Option<i64>,
    pub shiny: bool,
    /// Species base attack with the instance bonus applied.
    pub attack: i64,
    pub attack_bonus: i64,
    /// Species base health with the instance bonus applied.
    pub health: i64,
    pub health_bonus: i64,
}

/// One trade event with both parties' received line items rendered.
#[derive(Clone, Debug)]
pub struct TradeExport {
    pub id: i64,
    pub happened_at: NaiveDateTime,
    pub player1_discord_id: i64,
    pub player2_discord_id: i64,
    pub player1_received: Vec<String>,
    pub player2_received: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privacy_choice_tokens_decode() {
        assert_eq!(PrivacyPolicy::from_choice("open"), Some(PrivacyPolicy::Allow));
        assert_eq!(PrivacyPolicy::from_choice("PRIVATE"), Some(PrivacyPolicy::Deny));
        assert_eq!(
            PrivacyPolicy::from_choice("sameserver"),
            Some(PrivacyPolicy::SameServer)
        );
        assert_eq!(PrivacyPolicy::from_choice("friends"), Some(PrivacyPolicy::Friends));
        assert_eq!(PrivacyPolicy::from_choice("everyone"), None);
    }

    #[test]
    fn donation_choice_tokens_decode() {
        assert_eq!(
            DonationPolicy::from_choice("accept"),
            Some(DonationPolicy::AlwaysAccept)
        );
        assert_eq!(
            DonationPolicy::from_choice("Approval"),
            Some(DonationPolicy::RequestApproval)
        );
        assert_eq!(DonationPolicy::from_choice("deny"), Some(DonationPolicy::AlwaysDeny));
        assert_eq!(
            DonationPolicy::from_choice("friends"),
            Some(DonationPolicy::FriendsOnly)
        );
        assert_eq!(DonationPolicy::from_choice(""), None);
        assert_eq!(DonationPolicy::from_choice("maybe"), None);
    }
}
