use crate::error::StoreError;
use crate::model::{DonationPolicy, Player, PrivacyPolicy};
use crate::Database;

const SELECT_PLAYER: &str =
    "SELECT id, discord_id, privacy_policy, donation_policy FROM players WHERE discord_id = ?1";

/// Look up a player by discord id, creating the row on first interaction.
///
/// Idempotent: concurrent callers converge on the same row. The boolean
/// reports whether this call inserted the record.
pub async fn get_or_create(db: &Database, discord_id: i64) -> Result<(Player, bool), StoreError> {
    let inserted = sqlx::query(
        "INSERT INTO players (discord_id) VALUES (?1) ON CONFLICT (discord_id) DO NOTHING",
    )
    .bind(discord_id)
    .execute(db.pool())
    .await?
    .rows_affected()
        == 1;

    let player = sqlx::query_as::<_, Player>(SELECT_PLAYER)
        .bind(discord_id)
        .fetch_one(db.pool())
        .await?;

    Ok((player, inserted))
}

/// Look up a player without creating one.
pub async fn get(db: &Database, discord_id: i64) -> Result<Option<Player>, StoreError> {
    let player = sqlx::query_as::<_, Player>(SELECT_PLAYER)
        .bind(discord_id)
        .fetch_optional(db.pool())
        .await?;

    Ok(player)
}

/// Store a new privacy policy. Unconditional and idempotent.
pub async fn set_privacy_policy(
    db: &Database,
    player_id: i64,
    policy: PrivacyPolicy,
) -> Result<(), StoreError> {
    sqlx::query("UPDATE players SET privacy_policy = ?1 WHERE id = ?2")
        .bind(policy)
        .bind(player_id)
        .execute(db.pool())
        .await?;

    Ok(())
}

/// Store a new donation policy. Unconditional and idempotent.
pub async fn set_donation_policy(
    db: &Database,
    player_id: i64,
    policy: DonationPolicy,
) -> Result<(), StoreError> {
    sqlx::query("UPDATE players SET donation_policy = ?1 WHERE id = ?2")
        .bind(policy)
        .bind(player_id)
        .execute(db.pool())
        .await?;

    Ok(())
}

/// Decode a raw donation choice token and store it.
///
/// All-or-nothing: an unknown token returns `Validation` before any write,
/// leaving the stored policy unchanged.
pub async fn set_donation_policy_raw(
    db: &Database,
    player_id: i64,
    raw: &str,
) -> Result<DonationPolicy, StoreError> {
    let policy = DonationPolicy::from_choice(raw)
        .ok_or_else(|| StoreError::validation(format!("unknown donation policy `{raw}`")))?;

    set_donation_policy(db, player_id, policy).await?;
    Ok(policy)
}

/// Delete a player record. Owned items, relations, and trade history rows
/// cascade at the schema level.
pub async fn delete(db: &Database, player_id: i64) -> Result<(), StoreError> {
    let deleted = sqlx::query("DELETE FROM players WHERE id = ?1")
        .bind(player_id)
        .execute(db.pool())
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(StoreError::NotFound);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::memory_db;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let db = memory_db().await;

        let (first, created) = get_or_create(&db, 100).await.unwrap();
        assert!(created);
        assert_eq!(first.discord_id, 100);
        assert_eq!(first.privacy_policy, PrivacyPolicy::Deny);
        assert_eq!(first.donation_policy, DonationPolicy::AlwaysAccept);

        let (second, created) = get_or_create(&db, 100).await.unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
    }

    #[tokio::test]
    async fn get_does_not_create() {
        let db = memory_db().await;
        assert!(get(&db, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn privacy_policy_is_stored() {
        let db = memory_db().await;
        let (player, _) = get_or_create(&db, 7).await.unwrap();

        set_privacy_policy(&db, player.id, PrivacyPolicy::Friends)
            .await
            .unwrap();

        let stored = get(&db, 7).await.unwrap().unwrap();
        assert_eq!(stored.privacy_policy, PrivacyPolicy::Friends);
    }

    #[tokio::test]
    async fn invalid_donation_choice_leaves_policy_unchanged() {
        let db = memory_db().await;
        let (player, _) = get_or_create(&db, 8).await.unwrap();

        set_donation_policy(&db, player.id, DonationPolicy::FriendsOnly)
            .await
            .unwrap();

        let err = set_donation_policy_raw(&db, player.id, "sometimes")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let stored = get(&db, 8).await.unwrap().unwrap();
        assert_eq!(stored.donation_policy, DonationPolicy::FriendsOnly);
    }

    #[tokio::test]
    async fn valid_donation_choice_is_stored() {
        let db = memory_db().await;
        let (player, _) = get_or_create(&db, 9).await.unwrap();

        let policy = set_donation_policy_raw(&db, player.id, "approval")
            .await
            .unwrap();
        assert_eq!(policy, DonationPolicy::RequestApproval);

        let stored = get(&db, 9).await.unwrap().unwrap();
        assert_eq!(stored.donation_policy, DonationPolicy::RequestApproval);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let db = memory_db().await;
        let (player, _) = get_or_create(&db, 10).await.unwrap();

        delete(&db, player.id).await.unwrap();
        assert!(get(&db, 10).await.unwrap().is_none());

        let err = delete(&db, player.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
