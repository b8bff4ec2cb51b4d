use std::env;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{error, info};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use pawdex_commands::{handle_interaction, handle_message};
use pawdex_core::{Capabilities, Context};
use pawdex_database::{Database, MIGRATOR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let database_url = env::var("DATABASE_URL")?;
    let members_intent = env::var("ENABLE_MEMBERS_INTENT")
        .map(|raw| raw == "1" || raw.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));

    let connect_options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;
    MIGRATOR.run(&db_pool).await?;
    info!("SQLite connection established, migrations applied.");

    let db = Database::new(db_pool);
    let capabilities = Capabilities { members_intent };
    let ctx = Context::new(Arc::clone(&http), db, capabilities);

    // Declare which intents the bot has
    let mut intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
    if members_intent {
        intents |= Intents::GUILD_MEMBERS;
    }

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!("Pawdex is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("Pawdex has successfully awoken!");
            }

            Event::MessageCreate(msg) => {
                if let Err(source) = handle_message(ctx.clone(), msg).await {
                    error!(?source, "message handler failed");
                }
            }
            Event::InteractionCreate(interaction) => {
                if let Err(source) = handle_interaction(ctx.clone(), interaction).await {
                    error!(?source, "interaction handler failed");
                }
            }
            _ => {} // Ignore unused events
        }
    }
    Ok(())
}
