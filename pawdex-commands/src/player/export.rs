use tracing::error;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_model::http::attachment::Attachment;
use twilight_model::id::Id;

use crate::player::messages::usage_message;
use crate::CommandMeta;
use pawdex_core::Context;
use pawdex_database::export::{items_csv, package, trades_csv, ExportError};
use pawdex_database::{collectibles, players, trades};

pub const META: CommandMeta = CommandMeta {
    name: "export",
    desc: "Export your player data as CSV files, delivered by DM.",
    category: "player",
    usage: "!export <critters|trades|all>",
};

const ARCHIVE_FILENAME: &str = "player_data.zip";

enum ExportKind {
    Critters,
    Trades,
    All,
}

fn parse_export_kind(raw: Option<&str>) -> Option<ExportKind> {
    match raw?.to_ascii_lowercase().as_str() {
        "critters" => Some(ExportKind::Critters),
        "trades" => Some(ExportKind::Trades),
        "all" => Some(ExportKind::All),
        _ => None,
    }
}

/// Export the caller's data and deliver the archive by DM.
///
/// Exporting never creates a player record: callers without data get a
/// notice instead of an empty archive.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(kind) = parse_export_kind(arg1) else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let author_id = msg.author.id.get();
    let Some(player) = players::get(&ctx.db, author_id as i64).await? else {
        http.create_message(msg.channel_id)
            .content("You don't have any player data to export.")
            .await?;
        return Ok(());
    };

    let mut entries: Vec<(String, Vec<u8>)> = Vec::new();
    if matches!(kind, ExportKind::Critters | ExportKind::All) {
        let items = collectibles::owned_items_for(&ctx.db, player.id).await?;
        entries.push((
            format!("{author_id}_critters.csv"),
            items_csv(&items).into_bytes(),
        ));
    }
    if matches!(kind, ExportKind::Trades | ExportKind::All) {
        let history = trades::trade_history_for(&ctx.db, player.id).await?;
        entries.push((
            format!("{author_id}_trades.csv"),
            trades_csv(&history).into_bytes(),
        ));
    }

    let archive = match package(&entries) {
        Ok(archive) => archive,
        Err(ExportError::TooLarge(size)) => {
            error!(size, user = author_id, "export archive above size ceiling");
            http.create_message(msg.channel_id)
                .content(
                    "Your data is too large to export. \
                     Please contact the bot support for more information.",
                )
                .await?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let delivered = send_archive_dm(&ctx, author_id, archive).await;
    let reply = if delivered {
        "Your player data has been sent via DMs."
    } else {
        "I couldn't send the player data to you in DM. \
         Either you blocked me or you disabled DMs in this server."
    };
    http.create_message(msg.channel_id).content(reply).await?;

    Ok(())
}

/// Deliver the archive to the user's DM channel.
///
/// Any delivery failure (closed DMs, blocked bot) is reported as
/// undeliverable rather than propagated.
async fn send_archive_dm(ctx: &Context, user_id: u64, archive: Vec<u8>) -> bool {
    let channel = match ctx.http.create_private_channel(Id::new(user_id)).await {
        Ok(response) => match response.model().await {
            Ok(channel) => channel,
            Err(source) => {
                error!(?source, user = user_id, "failed to decode DM channel");
                return false;
            }
        },
        Err(source) => {
            error!(?source, user = user_id, "failed to open DM channel");
            return false;
        }
    };

    let attachment = Attachment::from_bytes(ARCHIVE_FILENAME.to_owned(), archive, 1);
    match ctx
        .http
        .create_message(channel.id)
        .content("Here is your player data:")
        .attachments(&[attachment])
        .await
    {
        Ok(_) => true,
        Err(source) => {
            error!(?source, user = user_id, "failed to deliver export DM");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_kind_tokens() {
        assert!(matches!(
            parse_export_kind(Some("critters")),
            Some(ExportKind::Critters)
        ));
        assert!(matches!(
            parse_export_kind(Some("TRADES")),
            Some(ExportKind::Trades)
        ));
        assert!(matches!(parse_export_kind(Some("all")), Some(ExportKind::All)));
        assert!(parse_export_kind(Some("everything")).is_none());
        assert!(parse_export_kind(None).is_none());
    }
}
