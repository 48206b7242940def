//! Protocol module for the Ad Locator.
//!
//! A small line-oriented protocol that exposes the location store over any
//! async byte stream (stdin/stdout in the binary).

pub mod command;
pub mod session;

pub use command::{Body, Command, Response};
pub use session::Session;
