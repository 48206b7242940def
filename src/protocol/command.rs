// Copyright (c) 2025 Ad Locator Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Commands and responses of the stdio protocol.
//!
//! Requests are single text lines (`search /ru/svrd`), responses are single
//! JSON lines (`{"status":"ok","advertisers":["Revdinsky"]}`).
//!
//! `load` replaces the tree with declarations sent over the session itself,
//! either inline (`load Kontur: /ru/svrd`) or as a block of lines ending
//! with a line holding only [`BLOCK_END`].

use std::path::PathBuf;

use serde::Serialize;

use crate::error::protocol::ProtocolError;
use crate::store::ReloadStats;

/// Line that closes a `load` block.
pub const BLOCK_END: &str = ".";

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Advertisers visible at a location
    Search(String),
    /// Canonical form of a location
    Normalize(String),
    /// Replace the tree with the contents of a declaration file
    Reload(PathBuf),
    /// Replace the tree with inline declaration text; empty opens a block
    Load(String),
    /// End the session
    Quit,
}

impl Command {
    /// Parses one request line. The command word is case-insensitive.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - The line is blank.
    /// * `Ok(Some(Command))` - A well-formed command.
    /// * `Err(ProtocolError)` - Unknown command or missing argument.
    pub fn parse(line: &str) -> Result<Option<Self>, ProtocolError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, argument) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "search" => Self::Search(required(argument, "search", "location")?.to_string()),
            "normalize" => Self::Normalize(required(argument, "normalize", "location")?.to_string()),
            "reload" => Self::Reload(PathBuf::from(required(argument, "reload", "path")?)),
            "load" => Self::Load(argument.to_string()),
            "quit" | "exit" => Self::Quit,
            _ => return Err(ProtocolError::UnknownCommand(word.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(
    argument: &'a str,
    command: &'static str,
    name: &'static str,
) -> Result<&'a str, ProtocolError> {
    if argument.is_empty() {
        Err(ProtocolError::MissingArgument {
            command,
            argument: name,
        })
    } else {
        Ok(argument)
    }
}

/// Payload of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    /// Result of `search`, ordered case-insensitively
    Advertisers {
        /// Advertiser names
        advertisers: Vec<String>,
    },
    /// Result of `normalize`; `null` when the input normalizes to nothing
    Location {
        /// Canonical location
        location: Option<String>,
    },
    /// Result of `reload`
    Reloaded {
        /// Counters of the reload pass
        stats: ReloadStats,
    },
    /// Acknowledgement without data
    Done {},
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    /// The command succeeded
    Ok(Body),
    /// The command failed; the session continues
    Error {
        /// Human-readable description
        message: String,
    },
}

impl Response {
    /// Builds an error response from anything displayable.
    pub fn error<E: std::fmt::Display>(error: E) -> Self {
        Self::Error {
            message: error.to_string(),
        }
    }
}
