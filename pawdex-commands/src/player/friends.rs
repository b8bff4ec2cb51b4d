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
use pawdex_utils::pagination::{
    build_paginated_entries_view, clamp_page, parse_one_based_page, send_paginated_message,
    total_pages, update_paginated_interaction_message, validate_interaction_for_command,
    PaginationInteractionValidation, DEFAULT_TIMEOUT_SECS,
};
use pawdex_utils::parse::parse_target_user_id;

pub const META: CommandMeta = CommandMeta {
    name: "friends",
    desc: "Add, remove, or list your friends.",
    category: "player",
    usage: "!friends <add|remove|list> [user|page]",
};

const ENTRIES_PER_PAGE: usize = 5;
const PAGINATION_COMMAND: &str = "friends";
const LIST_TITLE: &str = "Friend List";
const LIST_FOOTER: &str = "To add a friend, use !friends add.";

/// Dispatch the friends subcommands.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    match arg1 {
        Some("add") => add(ctx, msg, arg_tail).await,
        Some("remove") => remove(ctx, msg, arg_tail).await,
        Some("list") => list(ctx, msg, arg_tail).await,
        _ => {
            let usage = usage_message(META.usage);
            ctx.http
                .create_message(msg.channel_id)
                .content(&usage)
                .await?;
            Ok(())
        }
    }
}

/// Create a friendship with another player.
async fn add(ctx: Context, msg: Box<MessageCreate>, raw_target: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(target_user_id) = raw_target.and_then(parse_target_user_id) else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    if target_user_id == msg.author.id {
        let reply = self_target_message("add");
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
        let reply = bot_target_message("add");
        http.create_message(msg.channel_id).content(&reply).await?;
        return Ok(());
    }

    let (player, _) = players::get_or_create(&ctx.db, msg.author.id.get() as i64).await?;
    let (other, _) = players::get_or_create(&ctx.db, target_user_id.get() as i64).await?;

    if relations::is_related(&ctx.db, RelationKind::Block, player.id, other.id).await? {
        http.create_message(msg.channel_id)
            .content("You cannot add a blocked user. To unblock, use `!unblock`.")
            .await?;
        return Ok(());
    }

    match relations::create(&ctx.db, RelationKind::Friend, player.id, other.id).await {
        Ok(()) => {
            let reply = format!("You are now friends with {}.", target.display_name);
            http.create_message(msg.channel_id).content(&reply).await?;
        }
        Err(StoreError::Conflict) => {
            http.create_message(msg.channel_id)
                .content("You are already friends with this user!")
                .await?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

/// Remove an existing friendship.
async fn remove(
    ctx: Context,
    msg: Box<MessageCreate>,
    raw_target: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(target_user_id) = raw_target.and_then(parse_target_user_id) else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    if target_user_id == msg.author.id {
        let reply = self_target_message("remove");
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

    match relations::remove(&ctx.db, RelationKind::Friend, player.id, other.id).await {
        Ok(()) => {
            let reply = format!("{} has been removed as a friend.", target.display_name);
            http.create_message(msg.channel_id).content(&reply).await?;
        }
        Err(StoreError::NotFound) => {
            http.create_message(msg.channel_id)
                .content("You are not friends with this user.")
                .await?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

/// Show the paginated friend list.
async fn list(ctx: Context, msg: Box<MessageCreate>, page_arg: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(requested_page) = parse_one_based_page(page_arg) else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let entries = friend_entries(&ctx, msg.author.id.get()).await?;
    if entries.is_empty() {
        http.create_message(msg.channel_id)
            .content("You haven't got any friends!")
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

/// Handle pagination button presses for the friend list.
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

    let entries = friend_entries(&ctx, actor_id).await?;
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

/// Fetch the caller's friendships shaped as pagination entries.
async fn friend_entries(ctx: &Context, discord_id: u64) -> anyhow::Result<Vec<(String, String)>> {
    let (player, _) = players::get_or_create(&ctx.db, discord_id as i64).await?;
    let rows = relations::list_for(&ctx.db, RelationKind::Friend, player.id).await?;
    Ok(relation_list_entries(&rows, "Since:"))
}
