use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::CommandMeta;
use pawdex_core::Context;
use pawdex_database::{players, StoreError};
use pawdex_utils::interaction::{
    build_confirmation_components, build_confirmation_custom_ids, parse_confirmation_custom_id,
    respond_ephemeral_notice, respond_update_without_components, ConfirmationAction,
};

pub const META: CommandMeta = CommandMeta {
    name: "delete",
    desc: "Delete your player data.",
    category: "player",
    usage: "!delete",
};

const CUSTOM_ID_PREFIX: &str = "delete:";

/// Ask for confirmation before deleting the caller's player data.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let author_id = msg.author.id.get();
    let (confirm_custom_id, decline_custom_id) =
        build_confirmation_custom_ids(CUSTOM_ID_PREFIX, author_id, author_id);
    let components = build_confirmation_components(confirm_custom_id, decline_custom_id);

    http.create_message(msg.channel_id)
        .content("Are you sure you want to delete your player data? This removes your critters, relationships, and trade history.")
        .components(&components)
        .await?;

    Ok(())
}

/// Handle the deletion confirmation buttons.
pub async fn handle_confirmation(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;

    let Some(component_data) = interaction.data.as_ref().and_then(|data| {
        if let twilight_model::application::interaction::InteractionData::MessageComponent(
            component,
        ) = data
        {
            Some(component)
        } else {
            None
        }
    }) else {
        return Ok(false);
    };

    let Some(parsed) = parse_confirmation_custom_id(&component_data.custom_id, CUSTOM_ID_PREFIX)
    else {
        return Ok(false);
    };

    let Some(actor_id) = interaction.author_id().map(|id| id.get()) else {
        respond_ephemeral_notice(http, &interaction, "Unable to determine interaction user.")
            .await?;
        return Ok(true);
    };

    if actor_id != parsed.requester_id {
        respond_ephemeral_notice(
            http,
            &interaction,
            "Only the user who ran the command can answer this confirmation.",
        )
        .await?;
        return Ok(true);
    }

    if parsed.action == ConfirmationAction::Decline {
        respond_update_without_components(http, &interaction, "Deletion cancelled.").await?;
        return Ok(true);
    }

    let deleted = match players::get(&ctx.db, parsed.requester_id as i64).await? {
        Some(player) => match players::delete(&ctx.db, player.id).await {
            Ok(()) => true,
            Err(StoreError::NotFound) => false,
            Err(err) => return Err(err.into()),
        },
        None => false,
    };

    let reply = if deleted {
        "Your player data has been deleted."
    } else {
        "You don't have any player data to delete."
    };
    respond_update_without_components(http, &interaction, reply).await?;

    Ok(true)
}
