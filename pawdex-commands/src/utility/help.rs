use std::sync::Arc;

use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::player::messages::{page_out_of_range_message, usage_message};
use crate::{CommandMeta, COMMANDS};
use pawdex_core::Context;
use pawdex_utils::pagination::{
    build_paginated_view, clamp_page, page_window, parse_one_based_page, send_paginated_message,
    total_pages, update_paginated_interaction_message, validate_interaction_for_command,
    PaginationInteractionValidation, DEFAULT_TIMEOUT_SECS,
};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page]",
};

const HELP_COMMANDS_PER_PAGE: usize = 10;
const PAGINATION_COMMAND: &str = "help";
const TITLE: &str = "Available Commands";

/// Render the command catalog, grouped by category.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(requested_page) = parse_one_based_page(arg1) else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let commands = sorted_commands();
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);

    if requested_page > total {
        let reply = page_out_of_range_message(requested_page, total);
        http.create_message(msg.channel_id).content(&reply).await?;
        return Ok(());
    }

    let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, requested_page);
    let description = grouped_help_description(&commands[start..end]);

    let (embed, components) = build_paginated_view(
        PAGINATION_COMMAND,
        TITLE,
        description,
        requested_page,
        total,
        msg.author.id.get(),
        DEFAULT_TIMEOUT_SECS,
        None,
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

/// Handle pagination button presses for the `help` command.
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

    let commands = sorted_commands();
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);
    let target_page = clamp_page(token.page, total);

    let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, target_page);
    let description = grouped_help_description(&commands[start..end]);

    let (embed, components) = build_paginated_view(
        PAGINATION_COMMAND,
        TITLE,
        description,
        target_page,
        total,
        actor_id,
        DEFAULT_TIMEOUT_SECS,
        None,
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

fn sorted_commands() -> Vec<&'static CommandMeta> {
    let mut commands: Vec<&'static CommandMeta> = COMMANDS.iter().collect();
    commands.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    commands
}

/// Render a page of commands with a heading per category.
fn grouped_help_description(commands: &[&'static CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", command.category));
            current_category = Some(command.category);
        }

        out.push_str(&format!("• `{}` - {}\n", command.usage, command.desc));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_sorted_by_category_then_name() {
        let commands = sorted_commands();
        assert_eq!(commands.len(), COMMANDS.len());

        for pair in commands.windows(2) {
            let ordering = pair[0]
                .category
                .cmp(pair[1].category)
                .then_with(|| pair[0].name.cmp(pair[1].name));
            assert!(ordering.is_lt());
        }
    }

    #[test]
    fn description_groups_by_category() {
        let commands = sorted_commands();
        let description = grouped_help_description(&commands);

        assert_eq!(description.matches("**player**").count(), 1);
        assert_eq!(description.matches("**utility**").count(), 1);
        assert!(description.contains("• `!ping` - "));
        assert!(description.contains("• `!friends <add|remove|list> [user|page]` - "));
    }
}
