use chrono::Utc;

use crate::error::{map_insert_error, StoreError};
use crate::model::{RelationEntry, RelationKind};
use crate::Database;

/// Order a player pair into its canonical storage form.
///
/// Self-pairs are invalid for every relation kind.
pub fn canonical_pair(a: i64, b: i64) -> Result<(i64, i64), StoreError> {
    if a == b {
        return Err(StoreError::validation(
            "a relationship needs two distinct players",
        ));
    }

    Ok(if a < b { (a, b) } else { (b, a) })
}

/// Whether a relation of the given kind exists for the unordered pair.
///
/// Symmetric in argument order; a self-pair is never related.
pub async fn is_related(
    db: &Database,
    kind: RelationKind,
    a: i64,
    b: i64,
) -> Result<bool, StoreError> {
    let Ok((low, high)) = canonical_pair(a, b) else {
        return Ok(false);
    };

    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (
            SELECT 1 FROM relations
            WHERE kind = ?1 AND player_low = ?2 AND player_high = ?3
        )",
    )
    .bind(kind)
    .bind(low)
    .bind(high)
    .fetch_one(db.pool())
    .await?;

    Ok(exists)
}

/// Create a relation row for the unordered pair, stamped with the current
/// UTC time.
///
/// Fails with `Validation` on a self-pair and `Conflict` when the pair is
/// already related (pre-check, backed by the unique index for races).
pub async fn create(db: &Database, kind: RelationKind, a: i64, b: i64) -> Result<(), StoreError> {
    let (low, high) = canonical_pair(a, b)?;

    if is_related(db, kind, low, high).await? {
        return Err(StoreError::Conflict);
    }

    sqlx::query(
        "INSERT INTO relations (kind, player_low, player_high, created_at)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(kind)
    .bind(low)
    .bind(high)
    .bind(Utc::now().naive_utc())
    .execute(db.pool())
    .await
    .map_err(map_insert_error)?;

    Ok(())
}

/// Remove the relation row for the unordered pair.
///
/// Symmetric in argument order; fails with `NotFound` when no row exists.
pub async fn remove(db: &Database, kind: RelationKind, a: i64, b: i64) -> Result<(), StoreError> {
    let (low, high) = canonical_pair(a, b)?;

    let deleted = sqlx::query(
        "DELETE FROM relations WHERE kind = ?1 AND player_low = ?2 AND player_high = ?3",
    )
    .bind(kind)
    .bind(low)
    .bind(high)
    .execute(db.pool())
    .await?
    .rows_affected();

    if deleted == 0 {
        return Err(StoreError::NotFound);
    }

    Ok(())
}

/// All relations of a kind that `player_id` is part of, with the other
/// party resolved, in creation order.
///
/// The ordering is stable so list displays can number entries.
pub async fn list_for(
    db: &Database,
    kind: RelationKind,
    player_id: i64,
) -> Result<Vec<RelationEntry>, StoreError> {
    let entries = sqlx::query_as::<_, RelationEntry>(
        "SELECT p.discord_id AS other_discord_id, r.created_at
         FROM relations r
         JOIN players p
           ON p.id = CASE WHEN r.player_low = ?2 THEN r.player_high ELSE r.player_low END
         WHERE r.kind = ?1 AND (r.player_low = ?2 OR r.player_high = ?2)
         ORDER BY r.created_at ASC, r.id ASC",
    )
    .bind(kind)
    .bind(player_id)
    .fetch_all(db.pool())
    .await?;

    Ok(entries)
}

/// Atomically replace a friendship with a block for the unordered pair.
///
/// Runs in one transaction: after commit no observer can see both rows,
/// and a crash mid-way rolls back to the pre-call state. The friendship
/// row is allowed to be absent.
pub async fn replace_friendship_with_block(
    db: &Database,
    a: i64,
    b: i64,
) -> Result<(), StoreError> {
    let (low, high) = canonical_pair(a, b)?;

    let mut tx = db.pool().begin().await?;

    sqlx::query("DELETE FROM relations WHERE kind = ?1 AND player_low = ?2 AND player_high = ?3")
        .bind(RelationKind::Friend)
        .bind(low)
        .bind(high)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO relations (kind, player_low, player_high, created_at)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(RelationKind::Block)
    .bind(low)
    .bind(high)
    .bind(Utc::now().naive_utc())
    .execute(&mut *tx)
    .await
    .map_err(map_insert_error)?;

    tx.commit().await?;

    Ok(())
}
