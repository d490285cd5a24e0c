//! The `iplookup` chat command.
//!
//! The chat host is reached only through the capabilities defined here:
//! [`UserLookup`] for the user registry and [`Reply`] for sending messages.
//! Configuration arrives as a plain [`Settings`](crate::config::Settings)
//! value.

mod command;
mod query;

pub use command::{parse_trigger, IpLookup};
pub use query::resolve_query;

/// A user the chat host knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    /// Nickname, lowercase
    pub nick: String,
    /// Hostname or address from the user's hostmask, once the host has seen it
    pub host: Option<String>,
}

/// The host's registry of users currently visible to the bot.
pub trait UserLookup {
    /// Finds a user by lowercase nickname.
    fn find_user(&self, nickname: &str) -> Option<ChatUser>;
}

/// Sends messages back to the channel the command came from.
///
/// Implementations add the command's output prefix.
pub trait Reply {
    /// Sends `text` to the channel.
    fn say(&self, text: &str);

    /// Sends `text` addressed to the user who triggered the command.
    fn reply(&self, text: &str);
}
