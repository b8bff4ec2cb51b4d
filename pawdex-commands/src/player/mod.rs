/// Block, unblock, and blocked-list commands.
pub mod blocks;
/// Player data deletion with confirmation.
pub mod delete;
/// Donation policy command.
pub mod donation;
/// CSV/ZIP data export delivered by DM.
pub mod export;
/// Friend add/remove/list commands.
pub mod friends;
/// Shared reply texts and target-user resolution.
pub mod messages;
/// Privacy policy command.
pub mod privacy;
