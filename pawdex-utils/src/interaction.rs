//! Component-confirmation helpers.
//!
//! Confirmation prompts carry their whole state in the button custom id:
//! a handler prefix, the chosen action, the requester, and the target.
//! Only the requester may answer; a decline or timeout counts as "no".

use twilight_http::Client;
use twilight_model::{
    channel::message::component::{ActionRow, Button, ButtonStyle, Component},
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use crate::pagination::respond::respond_ephemeral_message;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfirmationAction {
    Confirm,
    Decline,
}

/// Parsed confirmation button state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParsedConfirmationAction {
    pub action: ConfirmationAction,
    pub requester_id: u64,
    pub target_id: u64,
}

pub fn build_confirmation_custom_id(
    prefix: &str,
    action: ConfirmationAction,
    requester_id: u64,
    target_id: u64,
) -> String {
    let action_segment = match action {
        ConfirmationAction::Confirm => "confirm",
        ConfirmationAction::Decline => "decline",
    };

    format!("{prefix}{action_segment}:{requester_id}:{target_id}")
}

pub fn build_confirmation_custom_ids(
    prefix: &str,
    requester_id: u64,
    target_id: u64,
) -> (String, String) {
    (
        build_confirmation_custom_id(prefix, ConfirmationAction::Confirm, requester_id, target_id),
        build_confirmation_custom_id(prefix, ConfirmationAction::Decline, requester_id, target_id),
    )
}

pub fn build_confirmation_components(
    confirm_custom_id: String,
    decline_custom_id: String,
) -> Vec<Component> {
    vec![Component::ActionRow(ActionRow {
        components: vec![
            Component::Button(Button {
                custom_id: Some(confirm_custom_id),
                disabled: false,
                emoji: None,
                label: Some("Confirm".to_owned()),
                style: ButtonStyle::Danger,
                url: None,
                sku_id: None,
            }),
            Component::Button(Button {
                custom_id: Some(decline_custom_id),
                disabled: false,
                emoji: None,
                label: Some("Decline".to_owned()),
                style: ButtonStyle::Secondary,
                url: None,
                sku_id: None,
            }),
        ],
    })]
}

pub fn parse_confirmation_custom_id(
    custom_id: &str,
    prefix: &str,
) -> Option<ParsedConfirmationAction> {
    let raw = custom_id.strip_prefix(prefix)?;
    let mut parts = raw.split(':');

    let action = match parts.next()? {
        "confirm" => ConfirmationAction::Confirm,
        "decline" => ConfirmationAction::Decline,
        _ => return None,
    };

    let requester_id = parts.next()?.parse::<u64>().ok()?;
    let target_id = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(ParsedConfirmationAction {
        action,
        requester_id,
        target_id,
    })
}

/// Replace the prompt message with plain text, removing the buttons.
pub async fn respond_update_without_components(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    let empty_components: [Component; 0] = [];
    let response = InteractionResponse {
        kind: InteractionResponseType::UpdateMessage,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .components(empty_components.to_vec())
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Ephemeral side-channel notice, e.g. for a non-requester pressing a button.
pub async fn respond_ephemeral_notice(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, content).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_custom_id_round_trips() {
        let (confirm, decline) = build_confirmation_custom_ids("block:", 11, 22);
        assert_eq!(confirm, "block:confirm:11:22");
        assert_eq!(decline, "block:decline:11:22");

        let parsed = parse_confirmation_custom_id(&confirm, "block:").unwrap();
        assert_eq!(parsed.action, ConfirmationAction::Confirm);
        assert_eq!(parsed.requester_id, 11);
        assert_eq!(parsed.target_id, 22);

        let parsed = parse_confirmation_custom_id(&decline, "block:").unwrap();
        assert_eq!(parsed.action, ConfirmationAction::Decline);
    }

    #[test]
    fn foreign_and_malformed_ids_are_rejected() {
        assert!(parse_confirmation_custom_id("delete:confirm:1:1", "block:").is_none());
        assert!(parse_confirmation_custom_id("block:maybe:1:2", "block:").is_none());
        assert!(parse_confirmation_custom_id("block:confirm:1:2:3", "block:").is_none());
        assert!(parse_confirmation_custom_id("block:confirm:x:2", "block:").is_none());
    }
}
