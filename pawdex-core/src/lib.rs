use std::sync::Arc;

use twilight_http::Client;

use pawdex_database::Database;

/// Runtime capabilities resolved once at startup.
///
/// Command handlers consult these flags instead of mutating shared command
/// metadata when a gateway intent is unavailable.
#[derive(Clone, Copy, Debug)]
pub struct Capabilities {
    /// Whether the gateway connection carries the members intent.
    ///
    /// The "same server" privacy policy needs member lookups and is refused
    /// when this is off.
    pub members_intent: bool,
}

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub db: Database,
    pub capabilities: Capabilities,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, db: Database, capabilities: Capabilities) -> Self {
        Self {
            http,
            db,
            capabilities,
        }
    }
}
