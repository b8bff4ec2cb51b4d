use crate::error::StoreError;
use crate::model::OwnedItemExport;
use crate::Database;

/// All collectibles owned by a player, flattened for export.
///
/// Rows follow the store enumeration order (insertion id), not an
/// independent sort; the CSV preserves whatever order this returns.
pub async fn owned_items_for(
    db: &Database,
    player_id: i64,
) -> Result<Vec<OwnedItemExport>, StoreError> {
    let items = sqlx::query_as::<_, OwnedItemExport>(
        "SELECT oi.id,
                s.name AS species,
                s.rarity,
                oi.caught_at,
                oi.traded_from,
                oi.shiny,
                s.base_attack + s.base_attack * oi.attack_bonus / 100 AS attack,
                oi.attack_bonus,
                s.base_health + s.base_health * oi.health_bonus / 100 AS health,
                oi.health_bonus
         FROM owned_items oi
         JOIN species s ON s.id = oi.species_id
         WHERE oi.player_id = ?1
         ORDER BY oi.id ASC",
    )
    .bind(player_id)
    .fetch_all(db.pool())
    .await?;

    Ok(items)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDateTime;

    use crate::Database;

    pub(crate) async fn insert_species(
        db: &Database,
        name: &str,
        rarity: f64,
        base_attack: i64,
        base_health: i64,
    ) -> i64 {
        sqlx::query("INSERT INTO species (name, rarity, base_attack, base_health) VALUES (?1, ?2, ?3, ?4)")
            .bind(name)
            .bind(rarity)
            .bind(base_attack)
            .bind(base_health)
            .execute(db.pool())
            .await
            .unwrap()
            .last_insert_rowid()
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn insert_item(
        db: &Database,
        player_id: i64,
        species_id: i64,
        caught_at: NaiveDateTime,
        traded_from: Option<i64>,
        shiny: bool,
        attack_bonus: i64,
        health_bonus: i64,
    ) -> i64 {
        sqlx::query(
            "INSERT INTO owned_items
                 (player_id, species_id, caught_at, traded_from, shiny, attack_bonus, health_bonus)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(player_id)
        .bind(species_id)
        .bind(caught_at)
        .bind(traded_from)
        .bind(shiny)
        .bind(attack_bonus)
        .bind(health_bonus)
        .execute(db.pool())
        .await
        .unwrap()
        .last_insert_rowid()
    }

    pub(crate) fn date(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{date, insert_item, insert_species};
    use super::*;
    use crate::players::get_or_create;
    use crate::test_util::memory_db;

    #[tokio::test]
    async fn items_follow_store_order_with_computed_stats() {
        let db = memory_db().await;
        let (player, _) = get_or_create(&db, 50).await.unwrap();
        let species = insert_species(&db, "Ember Fox", 0.05, 200, 100).await;

        insert_item(
            &db,
            player.id,
            species,
            date("2024-03-01 12:00:00"),
            None,
            false,
            10,
            -5,
        )
        .await;
        insert_item(
            &db,
            player.id,
            species,
            date("2024-02-01 08:00:00"),
            Some(999),
            true,
            0,
            0,
        )
        .await;

        let items = owned_items_for(&db, player.id).await.unwrap();
        assert_eq!(items.len(), 2);

        // Insertion order, not date order.
        assert_eq!(items[0].caught_at, date("2024-03-01 12:00:00"));
        assert_eq!(items[0].attack, 220);
        assert_eq!(items[0].health, 95);
        assert_eq!(items[0].traded_from, None);

        assert!(items[1].shiny);
        assert_eq!(items[1].traded_from, Some(999));
        assert_eq!(items[1].species, "Ember Fox");
    }

    #[tokio::test]
    async fn empty_inventory_yields_no_rows() {
        let db = memory_db().await;
        let (player, _) = get_or_create(&db, 51).await.unwrap();
        assert!(owned_items_for(&db, player.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_player_cascades_owned_items() {
        let db = memory_db().await;
        let (player, _) = get_or_create(&db, 52).await.unwrap();
        let species = insert_species(&db, "Moss Turtle", 0.2, 50, 300).await;
        insert_item(
            &db,
            player.id,
            species,
            date("2024-01-01 00:00:00"),
            None,
            false,
            0,
            0,
        )
        .await;

        crate::players::delete(&db, player.id).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM owned_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
