// Remote commentary client
//
// One background thread owns a tokio runtime and talks to the phrase
// service; the frame loop only ever touches non-blocking channel ends.
// Every failure mode (connect error, timeout, malformed reply) is
// swallowed here and logged; the game keeps its canned phrase.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::config::CommentaryConfig;
use crate::debug;

use super::MatchEvent;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CommentaryRequest {
    pub(crate) seq: u64,
    pub(crate) event: &'static str,
    pub(crate) player_score: u8,
    pub(crate) opponent_score: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentaryReply {
    pub seq: u64,
    pub text: String,
}

/// Handle for the frame loop. Requests go out fire-and-forget; replies are
/// polled once per frame. Dropping the handle closes the request channel,
/// which is the worker thread's signal to exit.
pub struct RemoteCommentator {
    request_tx: mpsc::Sender<CommentaryRequest>,
    reply_rx: mpsc::Receiver<CommentaryReply>,
}

impl RemoteCommentator {
    /// Start the worker thread, or None when the capability is not
    /// configured. The rest of the game runs identically either way.
    pub fn spawn(config: &CommentaryConfig) -> Option<Self> {
        if !config.enabled || config.endpoint.is_empty() {
            return None;
        }

        let endpoint = config.endpoint.clone();
        let timeout = Duration::from_millis(config.timeout_ms);
        let (request_tx, request_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();

        thread::spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    debug::log("COMMENTARY", &format!("Failed to create runtime: {}", e));
                    return;
                }
            };
            rt.block_on(worker(endpoint, timeout, request_rx, reply_tx));
        });

        Some(Self {
            request_tx,
            reply_rx,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        request_tx: mpsc::Sender<CommentaryRequest>,
        reply_rx: mpsc::Receiver<CommentaryReply>,
    ) -> Self {
        Self {
            request_tx,
            reply_rx,
        }
    }

    /// Queue a request. A send failure only means the worker is gone, and
    /// gameplay does not care.
    pub fn request(&self, seq: u64, event: MatchEvent, player_score: u8, opponent_score: u8) {
        let _ = self.request_tx.send(CommentaryRequest {
            seq,
            event: event.wire_name(),
            player_score,
            opponent_score,
        });
    }

    /// Non-blocking poll for a finished reply
    pub fn try_recv(&self) -> Option<CommentaryReply> {
        self.reply_rx.try_recv().ok()
    }
}

async fn worker(
    endpoint: String,
    timeout: Duration,
    request_rx: mpsc::Receiver<CommentaryRequest>,
    reply_tx: mpsc::Sender<CommentaryReply>,
) {
    // Blocking recv is fine here: this thread has nothing else to do
    // between requests
    while let Ok(mut request) = request_rx.recv() {
        // Only the newest pending request is worth a round trip; replies to
        // older ones would be dropped by the sequence check anyway
        while let Ok(newer) = request_rx.try_recv() {
            request = newer;
        }

        match tokio::time::timeout(timeout, fetch(&endpoint, &request)).await {
            Ok(Ok(reply)) => {
                let _ = reply_tx.send(reply);
            }
            Ok(Err(e)) => {
                debug::log(
                    "COMMENTARY",
                    &format!("Request {} failed: {}", request.seq, e),
                );
            }
            Err(_) => {
                debug::log("COMMENTARY", &format!("Request {} timed out", request.seq));
            }
        }
    }
}

/// One request/reply round trip: connect, send the event as JSON, take the
/// first text frame as the answer.
async fn fetch(endpoint: &str, request: &CommentaryRequest) -> anyhow::Result<CommentaryReply> {
    let (mut ws, _) = connect_async(endpoint).await?;

    ws.send(Message::Text(serde_json::to_string(request)?))
        .await?;

    while let Some(message) = ws.next().await {
        if let Message::Text(text) = message? {
            return Ok(serde_json::from_str(&text)?);
        }
    }

    anyhow::bail!("connection closed before a reply arrived")
}
