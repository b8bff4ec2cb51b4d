//! Stable facade for pagination helpers used by command handlers.

/// Default timeout for button-based pagination sessions.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

mod components;
pub mod interaction;
mod page;
pub mod respond;
pub mod token;
mod view;

pub use interaction::{validate_interaction_for_command, PaginationInteractionValidation};
pub use page::{clamp_page, page_window, parse_one_based_page, total_pages};
pub use respond::{respond_ephemeral_message, send_paginated_message,
    update_paginated_interaction_message};
pub use view::{build_paginated_entries_view, build_paginated_view};
