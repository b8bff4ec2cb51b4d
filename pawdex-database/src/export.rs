//! CSV serialization and archive packaging for player data exports.
//!
//! The CSV builders are pure over already-fetched rows so their shape can
//! be verified without a database.

use std::fmt::Write as _;
use std::io::{Cursor, Write as _};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::model::{OwnedItemExport, TradeExport};

/// Hard ceiling for a finished export archive.
pub const MAX_ARCHIVE_BYTES: usize = 25_000_000;

/// Failures while building an export archive.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The finished archive exceeds [`MAX_ARCHIVE_BYTES`].
    #[error("export archive is {0} bytes, above the {MAX_ARCHIVE_BYTES} byte limit")]
    TooLarge(usize),

    #[error(transparent)]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Quote a CSV field when it contains the delimiter or a quote.
///
/// The received-items columns join multiple renderings with commas, so
/// they need standard CSV quoting to stay a single field.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Render the items CSV: header first, one row per owned item in input
/// order. The header is present even for an empty inventory.
pub fn items_csv(items: &[OwnedItemExport]) -> String {
    let mut out = String::from(
        "id,hex id,critter,catch date,trade_player,rarity,shiny,attack,attack bonus,hp,hp bonus\n",
    );

    for item in items {
        let trade_player = match item.traded_from {
            Some(discord_id) => discord_id.to_string(),
            None => "None".to_owned(),
        };
        let _ = writeln!(
            out,
            "{},{:X},{},{},{},{},{},{},{},{},{}",
            item.id,
            item.id,
            csv_field(&item.species),
            item.caught_at.format(DATE_FORMAT),
            trade_player,
            item.rarity,
            item.shiny,
            item.attack,
            item.attack_bonus,
            item.health,
            item.health_bonus,
        );
    }

    out
}

/// Render the trades CSV: header first, one row per trade in input order.
///
/// Each "received" column holds the comma-joined line items that party
/// received, as a single quoted field.
pub fn trades_csv(trades: &[TradeExport]) -> String {
    let mut out = String::from("id,date,player1,player2,player1 received,player2 received\n");

    for trade in trades {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            trade.id,
            trade.happened_at.format(DATE_FORMAT),
            trade.player1_discord_id,
            trade.player2_discord_id,
            csv_field(&trade.player1_received.join(",")),
            csv_field(&trade.player2_received.join(",")),
        );
    }

    out
}

/// Package named payloads into one ZIP archive, content byte-verbatim.
///
/// Rejects archives above [`MAX_ARCHIVE_BYTES`] instead of truncating.
pub fn package(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, payload) in entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(payload)?;
    }

    let archive = writer.finish()?.into_inner();
    if archive.len() > MAX_ARCHIVE_BYTES {
        return Err(ExportError::TooLarge(archive.len()));
    }

    Ok(archive)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use chrono::NaiveDateTime;

    use super::*;

    fn date(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn sample_item(id: i64, traded_from: Option<i64>) -> OwnedItemExport {
        OwnedItemExport {
            id,
            species: "Ember Fox".to_owned(),
            rarity: 0.05,
            caught_at: date("2024-03-01 12:30:00"),
            traded_from,
            shiny: id % 2 == 0,
            attack: 220,
            attack_bonus: 10,
            health: 95,
            health_bonus: -5,
        }
    }

    #[test]
    fn items_csv_has_header_even_when_empty() {
        let csv = items_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("id,hex id,critter,"));
    }

    #[test]
    fn items_csv_row_count_matches_inventory() {
        let items = vec![sample_item(10, None), sample_item(255, Some(42))];
        let csv = items_csv(&items);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "10,A,Ember Fox,2024-03-01 12:30:00,None,0.05,true,220,10,95,-5"
        );
        assert!(lines[2].starts_with("255,FF,Ember Fox,"));
        assert!(lines[2].contains(",42,"));
    }

    #[test]
    fn trades_csv_keeps_each_party_column_consistent() {
        let trade = TradeExport {
            id: 7,
            happened_at: date("2024-01-05 10:00:00"),
            player1_discord_id: 111,
            player2_discord_id: 222,
            player1_received: vec!["Glow Moth #1A".to_owned(), "Moss Turtle #2B".to_owned()],
            player2_received: vec![],
        };

        let csv = trades_csv(&[trade]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "7,2024-01-05 10:00:00,111,222,\"Glow Moth #1A,Moss Turtle #2B\","
        );
    }

    #[test]
    fn trades_csv_header_only_for_no_trades() {
        let csv = trades_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
        assert_eq!(csv, "id,date,player1,player2,player1 received,player2 received\n");
    }

    #[test]
    fn package_round_trips_entries_byte_identical() {
        let entries = vec![
            ("a.csv".to_owned(), b"id\n1\n".to_vec()),
            ("b.csv".to_owned(), b"id\n2\n".to_vec()),
        ];

        let archive = package(&entries).unwrap();
        let mut reader = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(reader.len(), 2);

        for (name, expected) in &entries {
            let mut content = Vec::new();
            reader
                .by_name(name)
                .unwrap()
                .read_to_end(&mut content)
                .unwrap();
            assert_eq!(&content, expected);
        }
    }

    #[test]
    fn oversized_archives_are_rejected() {
        // Incompressible payload so the stored size stays above the ceiling.
        let mut payload = Vec::with_capacity(MAX_ARCHIVE_BYTES + 1_000_000);
        let mut state = 0x9E37_79B9_u32;
        while payload.len() < MAX_ARCHIVE_BYTES + 1_000_000 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            payload.extend_from_slice(&state.to_le_bytes());
        }

        let err = package(&[("big.bin".to_owned(), payload)]).unwrap_err();
        assert!(matches!(err, ExportError::TooLarge(_)));
    }
}
