/// Generic embed builders shared across commands.
pub mod embed;
/// Generic interaction helpers for component-confirmation flows.
pub mod interaction;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Shared pagination helpers and interaction utilities.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
/// Shared time helpers.
pub mod time;
