//! Console stand-ins for the chat host's reply and user registry capabilities.

use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::config::OUTPUT_PREFIX;
use crate::plugin::{ChatUser, Reply, UserLookup};

/// Prints command output to stdout the way the bot would send it to a channel.
pub struct ConsoleReply {
    nick: String,
}

impl ConsoleReply {
    /// Creates a reply sink addressing replies to `nick`.
    pub fn new(nick: impl Into<String>) -> Self {
        Self { nick: nick.into() }
    }

    fn format_say(&self, text: &str) -> String {
        format!("{OUTPUT_PREFIX}{text}")
    }

    fn format_reply(&self, text: &str) -> String {
        format!("{}: {OUTPUT_PREFIX}{text}", self.nick)
    }
}

impl Reply for ConsoleReply {
    fn say(&self, text: &str) {
        println!("{}", self.format_say(text));
    }

    fn reply(&self, text: &str) {
        println!("{}", self.format_reply(text));
    }
}

/// Fixed user table built from `NICK=HOST` entries.
#[derive(Debug, Default)]
pub struct StaticUsers {
    users: HashMap<String, Option<String>>,
}

impl StaticUsers {
    /// Parses `NICK=HOST` entries. An empty host records a user whose host is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error for an entry without `=` or with an empty nickname.
    pub fn parse(entries: &[String]) -> Result<Self> {
        let mut users = HashMap::with_capacity(entries.len());
        for entry in entries {
            let Some((nick, host)) = entry.split_once('=') else {
                bail!("Invalid user entry '{entry}': expected NICK=HOST");
            };
            let nick = nick.trim();
            if nick.is_empty() {
                bail!("Invalid user entry '{entry}': empty nickname");
            }
            let host = host.trim();
            let host = (!host.is_empty()).then(|| host.to_string());
            users.insert(nick.to_lowercase(), host);
        }
        Ok(Self { users })
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserLookup for StaticUsers {
    fn find_user(&self, nickname: &str) -> Option<ChatUser> {
        self.users.get(nickname).map(|host| ChatUser {
            nick: nickname.to_string(),
            host: host.clone(),
        })
    }
}
