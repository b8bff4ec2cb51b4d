use std::sync::Arc;

use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::player::messages::{
    bot_target_message, fetch_target_user, page_out_of_range_message, relation_list_entries,
    self_target_message, unknown_user_message, usage_message,
};
use crate::CommandMeta;
use pawdex_core::Context;
use pawdex_database::model::RelationKind;
use pawdex_database::{players, relations, StoreError};
use pawdex_utils::interaction::{
    build_confirmation_components, build_confirmation_custom_ids, parse_confirmation_custom_id,
    respond_ephemeral_notice, respond_update_without_components, ConfirmationAction,
};
use pawdex_utils::pagination::{
    build_paginated_entries_view, clamp_page, parse_one_based_page, send_paginated_message,
    total_pages, update_paginated_interaction_message, validate_interaction_for_command,
    PaginationInteractionValidation, DEFAULT_TIMEOUT_SECS,
};
use pawdex_utils::parse::parse_target_user_id;

pub const BLOCK_META: CommandMeta = CommandMeta {
    name: "block",
    desc: "Block another player.",
    category: "player",
    usage: "!block <user>",
};

pub const UNBLOCK_META: CommandMeta = CommandMeta {
    name: "unblock",
    desc: "Unblock a player.",
    category: "player",
    usage: "!unblock <user>",
};

pub const BLOCKED_META: CommandMeta = CommandMeta {
    name: "blocked",
    desc: "List the players you have blocked.",
    category: "player",
    usage: "!blocked [page]",
};

const CUSTOM_ID_PREFIX: &str = "block:";
const ENTRIES_PER_PAGE: usize = 5;
const PAGINATION_COMMAND: &str = "blocked";
const LIST_TITLE: &str = "Blocked Users List";
const LIST_FOOTER: &str = "To block a user, use !block.";

/// Block a player, asking for confirmation when they are currently a friend.
pub async fn run_block(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(target_user_id) = arg1.and_then(parse_target_user_id) else {
        let usage = usage_message(BLOCK_META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    if target_user_id == msg.author.id {
        let reply = self_target_message("block");
        http.create_message(msg.channel_id).content(&reply).await?;
        return Ok(());
    }

    let Some(target) = fetch_target_user(http, target_user_id).await else {
        http.create_message(msg.channel_id)
            .content(unknown_user_message())
            .await?;
        return Ok(());
    };

    if target.bot {
        let reply = bot_target_message("block");
        http.create_message(msg.channel_id).content(&reply).await?;
        return Ok(());
    }

    let (player, _) = players::get_or_create(&ctx.db, msg.author.id.get() as i64).await?;
    let (other, _) = players::get_or_create(&ctx.db, target_user_id.get() as i64).await?;

    if relations::is_related(&ctx.db, RelationKind::Block, player.id, other.id).await? {
        http.create_message(msg.channel_id)
            .content("You have already blocked this user.")
            .await?;
        return Ok(());
    }

    // Blocking a friend first removes the friendship; that needs an
    // explicit confirmation before any row is touched.
    if relations::is_related(&ctx.db, RelationKind::Friend, player.id, other.id).await? {
        let (confirm_custom_id, decline_custom_id) = build_confirmation_custom_ids(
            CUSTOM_ID_PREFIX,
            msg.author.id.get(),
            target_user_id.get(),
        );
        let components = build_confirmation_components(confirm_custom_id, decline_custom_id);

        http.create_message(msg.channel_id)
            .content("This user is your friend, are you sure you want to block them?")
            .components(&components)
            .await?;
        return Ok(());
    }

    match relations::create(&ctx.db, RelationKind::Block, player.id, other.id).await {
        Ok(()) => {
            let reply = format!("You have now blocked {}.", target.display_name);
            http.create_message(msg.channel_id).content(&reply).await?;
        }
        Err(StoreError::Conflict) => {
            http.create_message(msg.channel_id)
                .content("You have already blocked this user.")
                .await?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

/// Handle confirmation buttons for blocking a current friend.
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
        respond_update_without_components(http, &interaction, "Block cancelled.").await?;
        return Ok(true);
    }

    let (player, _) = players::get_or_create(&ctx.db, parsed.requester_id as i64).await?;
    let (other, _) = players::get_or_create(&ctx.db, parsed.target_id as i64).await?;

    match relations::replace_friendship_with_block(&ctx.db, player.id, other.id).await {
        Ok(()) => {
            let reply = format!("You have now blocked <@{}>.", parsed.target_id);
            respond_update_without_components(http, &interaction, &reply).await?;
        }
        Err(StoreError::Conflict) => {
            respond_update_without_components(
                http,
                &interaction,
                "You have already blocked this user.",
            )
            .await?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(true)
}

/// Remove a block.
pub async fn run_unblock(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(target_user_id) = arg1.and_then(parse_target_user_id) else {
        let usage = usage_message(UNBLOCK_META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    if target_user_id == msg.author.id {
        let reply = self_target_message("unblock");
        http.create_message(msg.channel_id).content(&reply).await?;
        return Ok(());
    }

    let Some(target) = fetch_target_user(http, target_user_id).await else {
        http.create_message(msg.channel_id)
            .content(unknown_user_message())
            .await?;
        return Ok(());
    };

    let (player, _) = players::get_or_create(&ctx.db, msg.author.id.get() as i64).await?;
    let (other, _) = players::get_or_create(&ctx.db, target_user_id.get() as i64).await?;

    match relations::remove(&ctx.db, RelationKind::Block, player.id, other.id).await {
        Ok(()) => {
            let reply = format!("{} has been unblocked.", target.display_name);
            http.create_message(msg.channel_id).content(&reply).await?;
        }
        Err(StoreError::NotFound) => {
            http.create_message(msg.channel_id)
                .content("This user isn't blocked.")
                .await?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

/// Show the paginated blocked-users list.
pub async fn run_blocked(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(requested_page) = parse_one_based_page(arg1) else {
        let usage = usage_message(BLOCKED_META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let entries = blocked_entries(&ctx, msg.author.id.get()).await?;
    if entries.is_empty() {
        http.create_message(msg.channel_id)
            .content("You haven't blocked any users!")
            .await?;
        return Ok(());
    }

    let total = total_pages(entries.len(), ENTRIES_PER_PAGE);
    if requested_page > total {
        let reply = page_out_of_range_message(requested_page, total);
        http.create_message(msg.channel_id).content(&reply).await?;
        return Ok(());
    }

    let (embed, components) = build_paginated_entries_view(
        PAGINATION_COMMAND,
        LIST_TITLE,
        &entries,
        requested_page,
        ENTRIES_PER_PAGE,
        msg.author.id.get(),
        DEFAULT_TIMEOUT_SECS,
        Some(LIST_FOOTER),
    )?;

    send_paginated_message(
        Arc::clone(&ctx.http),
        msg.channel_id,
        embed,
        components,
        total,
        DEFAULT_TIMEOUT_SECS,
    )
    .await?;

    Ok(())
}

/// Handle pagination button presses for the blocked-users list.
pub async fn handle_pagination_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;
    let (actor_id, token) =
        match validate_interaction_for_command(http, &interaction, PAGINATION_COMMAND).await? {
            PaginationInteractionValidation::NotForCommand => return Ok(false),
            PaginationInteractionValidation::HandledInvalid => return Ok(true),
            PaginationInteractionValidation::Valid {
                actor_user_id,
                token,
            } => (actor_user_id, token),
        };

    let entries = blocked_entries(&ctx, actor_id).await?;
    let total = total_pages(entries.len(), ENTRIES_PER_PAGE);
    let target_page = clamp_page(token.page, total);

    let (embed, components) = build_paginated_entries_view(
        PAGINATION_COMMAND,
        LIST_TITLE,
        &entries,
        target_page,
        ENTRIES_PER_PAGE,
        actor_id,
        DEFAULT_TIMEOUT_SECS,
        Some(LIST_FOOTER),
    )?;

    update_paginated_interaction_message(
        Arc::clone(&ctx.http),
        &interaction,
        embed,
        components,
        total,
        DEFAULT_TIMEOUT_SECS,
    )
    .await?;

    Ok(true)
}

/// Fetch the caller's blocks shaped as pagination entries.
async fn blocked_entries(ctx: &Context, discord_id: u64) -> anyhow::Result<Vec<(String, String)>> {
    let (player, _) = players::get_or_create(&ctx.db, discord_id as i64).await?;
    let rows = relations::list_for(&ctx.db, RelationKind::Block, player.id).await?;
    Ok(relation_list_entries(&rows, "Blocked at:"))
}
