// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-text parsing.
//!
//! Commands are slash-prefixed. A trailing `@botname` on the command word is
//! stripped so group-style mentions (`/help@hushbot`) parse the same as bare
//! commands. Text that is not a recognized command parses to `None` and the
//! dispatcher ignores it.

use hush_core::HushError;
use secrecy::SecretString;

/// A parsed user command.
#[derive(Debug)]
pub enum Command {
    Start,
    Help,
    /// `/creds <title> <username> <password...>` — begins the two-step store
    /// flow. The password may contain spaces.
    StoreCredential {
        title: String,
        username: String,
        password: SecretString,
    },
    /// `/show <id>` — begins the two-step reveal flow.
    ShowCredential { id: i64 },
    /// `/listcreds`
    ListCredentials,
    /// `/context <title> <content...>`
    StoreContext { title: String, content: String },
    /// `/getcontext <prompt...>`
    QueryContext { prompt: String },
    /// `/listcontext [filter]`
    ListContexts { filter: Option<String> },
}

/// Parse a trimmed message text into a command.
///
/// Returns `Ok(None)` for plain chatter and unrecognized commands (the
/// dispatcher treats both as a deliberate no-op) and
/// `Err(HushError::Validation)` for a recognized command with malformed
/// arguments.
pub fn parse(text: &str) -> Result<Option<Command>, HushError> {
    if !text.starts_with('/') {
        return Ok(None);
    }

    let mut parts = text.split_whitespace();
    let word = match parts.next() {
        Some(w) => w,
        None => return Ok(None),
    };
    // `/creds@hushbot` == `/creds`
    let command = word.split('@').next().unwrap_or(word);
    let args: Vec<&str> = parts.collect();

    match command {
        "/start" => Ok(Some(Command::Start)),
        "/help" => Ok(Some(Command::Help)),
        "/creds" => {
            if args.len() < 3 {
                return Err(HushError::Validation(
                    "❌ Usage: /creds <title> <username> <password>".to_string(),
                ));
            }
            Ok(Some(Command::StoreCredential {
                title: args[0].to_string(),
                username: args[1].to_string(),
                password: SecretString::from(args[2..].join(" ")),
            }))
        }
        "/show" => {
            let id = args
                .first()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| {
                    HushError::Validation(
                        "❌ Please provide a valid credential number.".to_string(),
                    )
                })?;
            Ok(Some(Command::ShowCredential { id }))
        }
        "/listcreds" => Ok(Some(Command::ListCredentials)),
        "/context" => {
            if args.len() < 2 {
                return Err(HushError::Validation(
                    "❌ Usage: /context <title> <content>".to_string(),
                ));
            }
            Ok(Some(Command::StoreContext {
                title: args[0].to_string(),
                content: args[1..].join(" "),
            }))
        }
        "/getcontext" => {
            if args.is_empty() {
                return Err(HushError::Validation(
                    "❌ Usage: /getcontext <prompt>".to_string(),
                ));
            }
            Ok(Some(Command::QueryContext {
                prompt: args.join(" "),
            }))
        }
        "/listcontext" => {
            let filter = if args.is_empty() {
                None
            } else {
                Some(args.join(" "))
            };
            Ok(Some(Command::ListContexts { filter }))
        }
        _ => Ok(None),
    }
}
