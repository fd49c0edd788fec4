//! Slash-command dispatch
//!
//! Commands are resolved through a static table mapping the command name to
//! the minimum role required and a handler function. The checks run in a
//! fixed order: name match, then permission, then argument count. Handlers
//! only read the registry; the one state change a command can request is a
//! kick, returned as a [`CommandEffect`] for the event loop to apply.

use std::collections::HashMap;

use chrono::Local;
use tracing::info;

use crate::client::Client;
use crate::types::{ClientId, Role};

/// The registry view handlers operate on
pub type Registry = HashMap<ClientId, Client>;

/// State change requested by a command, applied by the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEffect {
    /// Evict the target client from the room
    Kick(ClientId),
}

/// Command handler signature: registry snapshot, issuing client, tokens
type Handler = fn(&Registry, &Client, &[String]) -> Option<CommandEffect>;

/// Command table: name, minimum role, handler
const COMMANDS: &[(&str, Role, Handler)] = &[
    ("/users", Role::Member, list_users),
    ("/msg", Role::Member, direct_message),
    ("/time", Role::Member, server_time),
    ("/user", Role::Member, user_info),
    ("/kick", Role::Admin, kick_user),
];

/// Dispatch one command line on behalf of a client
///
/// Unknown names and permission failures are reported to the issuer only;
/// no handler runs in either case. Returns the state change the command
/// requested, if any.
pub fn dispatch(
    registry: &Registry,
    issuer_id: ClientId,
    tokens: &[String],
) -> Option<CommandEffect> {
    // The issuer may already have been evicted while its line was in flight
    let issuer = registry.get(&issuer_id)?;
    let name = tokens.first().map(String::as_str).unwrap_or_default();

    let Some((_, required, handler)) = COMMANDS.iter().find(|(n, _, _)| *n == name) else {
        let _ = issuer.send_line("Invalid command");
        return None;
    };

    if issuer.role < *required {
        let _ = issuer.send_line("Not allowed, must be admin");
        return None;
    }

    handler(registry, issuer, tokens)
}

/// `/users` - list the username of every registered client
fn list_users(registry: &Registry, issuer: &Client, _tokens: &[String]) -> Option<CommandEffect> {
    for client in registry.values() {
        let _ = issuer.send_line(client.username.as_str());
    }
    None
}

/// `/msg <user> <message>` - send a direct message to one client
fn direct_message(registry: &Registry, issuer: &Client, tokens: &[String]) -> Option<CommandEffect> {
    if tokens.len() < 3 {
        let _ = issuer.send_line("usage: /msg <user> <message>");
        return None;
    }

    let username = &tokens[1];
    let text = tokens[2..].join(" ");

    match find_by_username(registry, username) {
        Some(target) => {
            let _ = target.send_line(format!("DM from <{}>: {}", issuer.username, text));
        }
        None => {
            let _ = issuer.send_line(format!("The user '{username}' does not exist"));
        }
    }
    None
}

/// `/time` - report the server's wall-clock time
fn server_time(_registry: &Registry, issuer: &Client, _tokens: &[String]) -> Option<CommandEffect> {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S %z");
    let _ = issuer.send_line(format!("Server time: {now}"));
    None
}

/// `/user <name>` - report the username and remote address of one client
fn user_info(registry: &Registry, issuer: &Client, tokens: &[String]) -> Option<CommandEffect> {
    if tokens.len() < 2 {
        let _ = issuer.send_line("usage: /user <name>");
        return None;
    }

    let username = &tokens[1];
    match find_by_username(registry, username) {
        Some(target) => {
            let _ = issuer.send_line(format!(
                "Username: {}, address: {}",
                target.username, target.addr
            ));
        }
        None => {
            let _ = issuer.send_line(format!("The user '{username}' does not exist"));
        }
    }
    None
}

/// `/kick <name>` - notify the target, then request its eviction
fn kick_user(registry: &Registry, issuer: &Client, tokens: &[String]) -> Option<CommandEffect> {
    if tokens.len() < 2 {
        let _ = issuer.send_line("usage: /kick <name>");
        return None;
    }

    let username = &tokens[1];
    match find_by_username(registry, username) {
        Some(target) => {
            let _ = target.send_line("You have been kicked from the server");
            info!("[{}] was kicked by [{}]", target.username, issuer.username);
            Some(CommandEffect::Kick(target.id))
        }
        None => {
            let _ = issuer.send_line(format!("The user '{username}' does not exist"));
            None
        }
    }
}

/// First client whose username matches
///
/// Usernames are not unique; with duplicates this resolves to whichever
/// entry the map iteration reaches first.
fn find_by_username<'a>(registry: &'a Registry, username: &str) -> Option<&'a Client> {
    registry.values().find(|c| c.username == username)
}
