// Copyright (c) 2025 Ad Locator Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Line-oriented session over an async reader/writer pair.
//!
//! The session reads one command per line, answers each with one JSON line,
//! and keeps going after bad commands. It ends on `quit` or end of input.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::command::{Body, Command, Response, BLOCK_END};
use crate::config::protocol::ProtocolConfig;
use crate::config::store::StoreConfig;
use crate::error::protocol::ProtocolError;
use crate::error::{AdLocatorError, AdLocatorResult};
use crate::store::{LocationStore, ReloadStats};

/// One line read from the client.
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    /// A complete line without its terminator
    Line(String),
    /// The line was longer than allowed; its bytes were discarded
    TooLong(usize),
    /// The line was not UTF-8
    NotUtf8,
}

/// Reads one `\n`-terminated line, buffering at most `max_bytes` of it.
///
/// The rest of an overlong line is consumed and dropped, so a client cannot
/// grow the buffer past the limit. A trailing `\r` is stripped.
///
/// # Returns
///
/// `Ok(None)` at end of input.
async fn read_frame<R>(reader: &mut R, max_bytes: usize) -> io::Result<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let mut size = 0usize;
    let mut last = None;
    let mut terminated = false;

    while !terminated {
        let used = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                break;
            }
            let (chunk, used, done) = match available.iter().position(|&b| b == b'\n') {
                Some(end) => (&available[..end], end + 1, true),
                None => (available, available.len(), false),
            };
            // One byte of slack so a trailing '\r' can still be stripped
            let room = (max_bytes + 1).saturating_sub(line.len());
            line.extend_from_slice(&chunk[..chunk.len().min(room)]);
            size += chunk.len();
            if let Some(&byte) = chunk.last() {
                last = Some(byte);
            }
            terminated = done;
            used
        };
        reader.consume(used);
    }

    if !terminated && last.is_none() {
        return Ok(None);
    }
    if last == Some(b'\r') {
        size -= 1;
        line.truncate(size);
    }
    if size > max_bytes {
        return Ok(Some(Frame::TooLong(size)));
    }

    Ok(Some(match String::from_utf8(line) {
        Ok(line) => Frame::Line(line),
        Err(_) => Frame::NotUtf8,
    }))
}

/// Serves protocol commands against a shared store.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<LocationStore>,
    max_line_bytes: usize,
    max_input_bytes: usize,
}

impl Session {
    /// Creates a session bound to `store`.
    pub fn new(store: Arc<LocationStore>, protocol: &ProtocolConfig, limits: &StoreConfig) -> Self {
        Self {
            store,
            max_line_bytes: protocol.max_line_bytes,
            max_input_bytes: limits.max_input_bytes,
        }
    }

    /// Executes a single command.
    pub async fn handle(&self, command: Command) -> Response {
        match command {
            Command::Search(location) => {
                let advertisers = self.store.search(&location).into_sorted();
                tracing::debug!(%location, found = advertisers.len(), "Search handled");
                Response::Ok(Body::Advertisers { advertisers })
            }
            Command::Normalize(location) => Response::Ok(Body::Location {
                location: LocationStore::normalize(&location),
            }),
            Command::Reload(path) => match self.reload(path).await {
                Ok(stats) => Response::Ok(Body::Reloaded { stats }),
                Err(e) => Response::error(e),
            },
            Command::Load(text) => match self.load(text).await {
                Ok(stats) => Response::Ok(Body::Reloaded { stats }),
                Err(e) => Response::error(e),
            },
            Command::Quit => Response::Ok(Body::Done {}),
        }
    }

    /// Runs the session until `quit` or end of input.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of responses written.
    /// * `Err(AdLocatorError)` - Reading, writing or encoding failed.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> AdLocatorResult<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut written = 0;

        while let Some(frame) = read_frame(&mut reader, self.max_line_bytes).await? {
            let parsed = match frame {
                Frame::Line(line) => Command::parse(&line),
                Frame::TooLong(size) => Err(ProtocolError::LineTooLong {
                    size,
                    max_size: self.max_line_bytes,
                }),
                Frame::NotUtf8 => Err(ProtocolError::InvalidEncoding),
            };

            let (response, quit) = match parsed {
                Ok(None) => continue,
                Ok(Some(Command::Load(text))) if text.is_empty() => {
                    match self.read_block(&mut reader).await? {
                        Ok(block) => (self.handle(Command::Load(block)).await, false),
                        Err(e) => (Response::error(e), false),
                    }
                }
                Ok(Some(command)) => {
                    let quit = command == Command::Quit;
                    (self.handle(command).await, quit)
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected command");
                    (Response::error(e), false)
                }
            };

            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
            written += 1;

            if quit {
                break;
            }
        }

        tracing::info!(responses = written, "Session finished");
        Ok(written)
    }

    /// Collects the lines of a `load` block up to its terminator.
    ///
    /// A bad line inside the block rejects the whole block, but reading
    /// continues to the terminator so the session stays in step.
    async fn read_block<R>(&self, reader: &mut R) -> io::Result<Result<String, ProtocolError>>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut text = String::new();
        let mut failure = None;

        loop {
            let Some(frame) = read_frame(reader, self.max_line_bytes).await? else {
                return Ok(Err(ProtocolError::UnterminatedBlock));
            };

            match frame {
                Frame::Line(line) if line.trim() == BLOCK_END => break,
                Frame::Line(_) if failure.is_some() => {}
                Frame::Line(line) => {
                    if text.len() + line.len() + 1 > self.max_input_bytes {
                        failure = Some(ProtocolError::BlockTooLarge {
                            max_size: self.max_input_bytes,
                        });
                    } else {
                        text.push_str(&line);
                        text.push('\n');
                    }
                }
                Frame::TooLong(size) => {
                    failure.get_or_insert(ProtocolError::LineTooLong {
                        size,
                        max_size: self.max_line_bytes,
                    });
                }
                Frame::NotUtf8 => {
                    failure.get_or_insert(ProtocolError::InvalidEncoding);
                }
            }
        }

        Ok(failure.map_or(Ok(text), Err))
    }

    async fn reload(&self, path: PathBuf) -> AdLocatorResult<ReloadStats> {
        let store = Arc::clone(&self.store);
        let max_bytes = self.max_input_bytes;
        tokio::task::spawn_blocking(move || store.reload_from_path(path, max_bytes))
            .await
            .map_err(|e| AdLocatorError::Custom(format!("Reload task failed: {e}")))?
    }

    async fn load(&self, text: String) -> AdLocatorResult<ReloadStats> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.reload(&text))
            .await
            .map_err(|e| AdLocatorError::Custom(format!("Load task failed: {e}")))
    }
}
