pub mod player;
pub mod utility;

use twilight_model::{
    application::interaction::InteractionData,
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
};

use pawdex_core::Context;
use pawdex_utils::COMMAND_PREFIX;

#[derive(Clone, Copy)]
enum InteractionRoute {
    FriendsButtons,
    BlockedButtons,
    HelpButtons,
    BlockConfirmation,
    DeleteConfirmation,
}

fn route_interaction(custom_id: &str) -> Option<InteractionRoute> {
    const ROUTES: [(&str, InteractionRoute); 5] = [
        ("pg:friends:", InteractionRoute::FriendsButtons),
        ("pg:blocked:", InteractionRoute::BlockedButtons),
        ("pg:help:", InteractionRoute::HelpButtons),
        ("block:", InteractionRoute::BlockConfirmation),
        ("delete:", InteractionRoute::DeleteConfirmation),
    ];

    ROUTES
        .into_iter()
        .find_map(|(prefix, route)| custom_id.starts_with(prefix).then_some(route))
}

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    player::privacy::META,
    player::donation::META,
    player::friends::META,
    player::blocks::BLOCK_META,
    player::blocks::UNBLOCK_META,
    player::blocks::BLOCKED_META,
    player::delete::META,
    player::export::META,
    // Add new commands here
];

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content_owned = msg.content.clone();
    let content = content_owned.trim();

    if !content.starts_with(COMMAND_PREFIX) {
        return Ok(());
    }

    let content = content.trim_start_matches(COMMAND_PREFIX).trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (arg1, arg_tail): (Option<String>, Option<String>) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args
                .next()
                .filter(|arg| !arg.is_empty())
                .map(ToOwned::to_owned);
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty())
                .map(ToOwned::to_owned);

            (first, tail)
        }
        None => (None, None),
    };

    let arg1 = arg1.as_deref();
    let arg_tail = arg_tail.as_deref();

    match cmd.as_str() {
        "ping" => utility::ping::run(ctx.clone(), msg).await?,
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,

        "privacy" => player::privacy::run(ctx.clone(), msg, arg1).await?,
        "donation" => player::donation::run(ctx.clone(), msg, arg1).await?,
        "friends" => player::friends::run(ctx.clone(), msg, arg1, arg_tail).await?,
        "block" => player::blocks::run_block(ctx.clone(), msg, arg1).await?,
        "unblock" => player::blocks::run_unblock(ctx.clone(), msg, arg1).await?,
        "blocked" => player::blocks::run_blocked(ctx.clone(), msg, arg1).await?,
        "delete" => player::delete::run(ctx.clone(), msg).await?,
        "export" => player::export::run(ctx.clone(), msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let custom_id = match interaction.data.as_ref() {
        Some(InteractionData::MessageComponent(data)) => data.custom_id.clone(),
        _ => return Ok(()),
    };

    let Some(route) = route_interaction(&custom_id) else {
        return Ok(());
    };

    match route {
        InteractionRoute::FriendsButtons => {
            let _handled =
                player::friends::handle_pagination_interaction(ctx.clone(), interaction).await?;
        }
        InteractionRoute::BlockedButtons => {
            let _handled =
                player::blocks::handle_pagination_interaction(ctx.clone(), interaction).await?;
        }
        InteractionRoute::HelpButtons => {
            let _handled =
                utility::help::handle_pagination_interaction(ctx.clone(), interaction).await?;
        }
        InteractionRoute::BlockConfirmation => {
            let _handled = player::blocks::handle_confirmation(ctx.clone(), interaction).await?;
        }
        InteractionRoute::DeleteConfirmation => {
            let _handled = player::delete::handle_confirmation(ctx.clone(), interaction).await?;
        }
    }

    Ok(())
}
