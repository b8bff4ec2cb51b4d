use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::player::messages::{members_intent_missing_message, usage_message};
use crate::CommandMeta;
use pawdex_core::Context;
use pawdex_database::model::PrivacyPolicy;
use pawdex_database::players;

pub const META: CommandMeta = CommandMeta {
    name: "privacy",
    desc: "Set who may view your inventory.",
    category: "player",
    usage: "!privacy <open|private|sameserver|friends>",
};

/// Store a new privacy policy for the invoking player.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(policy) = arg1.and_then(PrivacyPolicy::from_choice) else {
        let usage = usage_message(META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    // The "same server" policy needs member lookups, which require the
    // members intent on the gateway connection.
    if policy == PrivacyPolicy::SameServer && !ctx.capabilities.members_intent {
        http.create_message(msg.channel_id)
            .content(members_intent_missing_message())
            .await?;
        return Ok(());
    }

    let (player, _) = players::get_or_create(&ctx.db, msg.author.id.get() as i64).await?;
    players::set_privacy_policy(&ctx.db, player.id, policy).await?;

    let reply = format!("Your privacy policy has been set to **{}**.", policy.label());
    http.create_message(msg.channel_id).content(&reply).await?;

    Ok(())
}
