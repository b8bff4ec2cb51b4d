//! Embed and component composition helpers for paginated views.

use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;

use crate::embed::build_paginated_embed_with_footer_note;

use super::components::build_nav_components;
use super::page::{clamp_page, paginated_entries_description, total_pages};

/// Build a paginated view over titled entries (embed + navigation buttons).
///
/// Entries are `(title, body)` pairs rendered in input order.
#[allow(clippy::too_many_arguments)]
pub fn build_paginated_entries_view(
    command: &str,
    title: &str,
    entries: &[(String, String)],
    page: usize,
    per_page: usize,
    owner_user_id: u64,
    timeout_secs: u64,
    footer_note: Option<&str>,
) -> anyhow::Result<(Embed, Vec<Component>)> {
    let total = total_pages(entries.len(), per_page);
    let page = clamp_page(page, total);
    let description = paginated_entries_description(entries, per_page, page);

    build_paginated_view(
        command,
        title,
        description,
        page,
        total,
        owner_user_id,
        timeout_secs,
        footer_note,
    )
}

/// Build a paginated embed + navigation controls from a pre-rendered description.
#[allow(clippy::too_many_arguments)]
pub fn build_paginated_view(
    command: &str,
    title: &str,
    description: String,
    page: usize,
    total_pages: usize,
    owner_user_id: u64,
    timeout_secs: u64,
    footer_note: Option<&str>,
) -> anyhow::Result<(Embed, Vec<Component>)> {
    let page = clamp_page(page, total_pages);
    let total_pages = total_pages.max(1);

    let embed =
        build_paginated_embed_with_footer_note(title, description, page, total_pages, footer_note)?;
    let components = build_nav_components(command, page, total_pages, owner_user_id, timeout_secs);

    Ok((embed, components))
}
