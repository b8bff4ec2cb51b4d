use chrono::NaiveDateTime;

use crate::error::StoreError;
use crate::model::TradeExport;
use crate::Database;

#[derive(sqlx::FromRow)]
struct TradeRow {
    id: i64,
    happened_at: NaiveDateTime,
    player1_id: i64,
    player2_id: i64,
    player1_discord_id: i64,
    player2_discord_id: i64,
}

#[derive(sqlx::FromRow)]
struct LineItemRow {
    receiver_id: i64,
    item_id: i64,
    species: String,
}

/// Render one traded collectible for the trades CSV.
fn render_line_item(species: &str, item_id: i64) -> String {
    format!("{species} #{item_id:X}")
}

/// Every trade involving the player, ordered by event time ascending,
/// with both parties' received line items rendered.
pub async fn trade_history_for(
    db: &Database,
    player_id: i64,
) -> Result<Vec<TradeExport>, StoreError> {
    let rows = sqlx::query_as::<_, TradeRow>(
        "SELECT t.id, t.happened_at, t.player1_id, t.player2_id,
                p1.discord_id AS player1_discord_id,
                p2.discord_id AS player2_discord_id
         FROM trades t
         JOIN players p1 ON p1.id = t.player1_id
         JOIN players p2 ON p2.id = t.player2_id
         WHERE t.player1_id = ?1 OR t.player2_id = ?1
         ORDER BY t.happened_at ASC, t.id ASC",
    )
    .bind(player_id)
    .fetch_all(db.pool())
    .await?;

    let mut trades = Vec::with_capacity(rows.len());
    for row in rows {
        let line_items = sqlx::query_as::<_, LineItemRow>(
            "SELECT ti.receiver_id, ti.item_id, s.name AS species
             FROM trade_items ti
             JOIN owned_items oi ON oi.id = ti.item_id
             JOIN species s ON s.id = oi.species_id
             WHERE ti.trade_id = ?1
             ORDER BY ti.id ASC",
        )
        .bind(row.id)
        .fetch_all(db.pool())
        .await?;

        let mut player1_received = Vec::new();
        let mut player2_received = Vec::new();
        for item in line_items {
            let rendered = render_line_item(&item.species, item.item_id);
            if item.receiver_id == row.player1_id {
                player1_received.push(rendered);
            } else if item.receiver_id == row.player2_id {
                player2_received.push(rendered);
            }
        }

        trades.push(TradeExport {
            id: row.id,
            happened_at: row.happened_at,
            player1_discord_id: row.player1_discord_id,
            player2_discord_id: row.player2_discord_id,
            player1_received,
            player2_received,
        });
    }

    Ok(trades)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDateTime;

    use crate::Database;

    pub(crate) async fn insert_trade(
        db: &Database,
        happened_at: NaiveDateTime,
        player1_id: i64,
        player2_id: i64,
    ) -> i64 {
        sqlx::query("INSERT INTO trades (happened_at, player1_id, player2_id) VALUES (?1, ?2, ?3)")
            .bind(happened_at)
            .bind(player1_id)
            .bind(player2_id)
            .execute(db.pool())
            .await
            .unwrap()
            .last_insert_rowid()
    }

    pub(crate) async fn insert_trade_item(
        db: &Database,
        trade_id: i64,
        receiver_id: i64,
        item_id: i64,
    ) {
        sqlx::query("INSERT INTO trade_items (trade_id, receiver_id, item_id) VALUES (?1, ?2, ?3)")
            .bind(trade_id)
            .bind(receiver_id)
            .bind(item_id)
            .execute(db.pool())
            .await
            .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{insert_trade, insert_trade_item};
    use super::*;
    use crate::collectibles::fixtures::{date, insert_item, insert_species};
    use crate::players::get_or_create;
    use crate::test_util::memory_db;

    #[tokio::test]
    async fn history_orders_by_time_and_attributes_receivers() {
        let db = memory_db().await;
        let (alice, _) = get_or_create(&db, 1).await.unwrap();
        let (bob, _) = get_or_create(&db, 2).await.unwrap();
        let species = insert_species(&db, "Glow Moth", 0.1, 80, 60).await;

        let to_alice = insert_item(
            &db,
            alice.id,
            species,
            date("2024-01-05 10:00:00"),
            Some(2),
            false,
            0,
            0,
        )
        .await;
        let to_bob = insert_item(
            &db,
            bob.id,
            species,
            date("2024-01-05 10:00:00"),
            Some(1),
            false,
            0,
            0,
        )
        .await;

        // Later trade inserted first to prove ordering is by event time.
        let later = insert_trade(&db, date("2024-02-01 09:00:00"), alice.id, bob.id).await;
        let earlier = insert_trade(&db, date("2024-01-05 10:00:00"), bob.id, alice.id).await;
        insert_trade_item(&db, earlier, alice.id, to_alice).await;
        insert_trade_item(&db, earlier, bob.id, to_bob).await;

        let history = trade_history_for(&db, alice.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, earlier);
        assert_eq!(history[1].id, later);

        // In the earlier trade bob is player1 and alice is player2; each
        // column holds what that party actually received.
        assert_eq!(history[0].player1_discord_id, 2);
        assert_eq!(history[0].player1_received, vec![render_line_item("Glow Moth", to_bob)]);
        assert_eq!(history[0].player2_received, vec![render_line_item("Glow Moth", to_alice)]);

        assert!(history[1].player1_received.is_empty());
        assert!(history[1].player2_received.is_empty());
    }

    #[tokio::test]
    async fn uninvolved_player_has_empty_history() {
        let db = memory_db().await;
        let (loner, _) = get_or_create(&db, 3).await.unwrap();
        assert!(trade_history_for(&db, loner.id).await.unwrap().is_empty());
    }
}
