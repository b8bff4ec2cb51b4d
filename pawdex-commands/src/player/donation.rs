use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::player::messages::{donation_policy_update_message, usage_message};
use crate::CommandMeta;
use pawdex_core::Context;
use pawdex_database::{players, StoreError};

pub const META: CommandMeta = CommandMeta {
    name: "donation",
    desc: "Change how you receive critter donations.",
    category: "player",
    usage: "!donation <accept|approval|deny|friends>",
};

/// Store a new donation policy for the invoking player.
///
/// A choice token that fails to decode never reaches storage; the stored
/// policy stays unchanged and the user gets the usage text.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(raw) = arg1 else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let (player, _) = players::get_or_create(&ctx.db, msg.author.id.get() as i64).await?;

    match players::set_donation_policy_raw(&ctx.db, player.id, raw).await {
        Ok(policy) => {
            http.create_message(msg.channel_id)
                .content(donation_policy_update_message(policy))
                .await?;
        }
        Err(StoreError::Validation(_)) => {
            let usage = usage_message(META.usage);
            http.create_message(msg.channel_id).content(&usage).await?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
