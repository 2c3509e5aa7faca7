// Commentary layer: the opponent's one-liners.
//
// The round machine only talks to a sink; everything behind it is optional.
// A canned phrase appears on the same frame as the event, and if the remote
// service answers in time its line replaces the canned one. Nothing in here
// may ever stall the frame loop.

pub mod phrases;
pub mod remote;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::CommentaryConfig;

pub use remote::{CommentaryReply, RemoteCommentator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    MatchStart,
    PlayerScored,
    OpponentScored,
    OpponentHit,
}

impl MatchEvent {
    pub fn wire_name(&self) -> &'static str {
        match self {
            MatchEvent::MatchStart => "match_start",
            MatchEvent::PlayerScored => "player_scored",
            MatchEvent::OpponentScored => "opponent_scored",
            MatchEvent::OpponentHit => "opponent_hit",
        }
    }
}

/// Where the session drops match events. The simulation works the same no
/// matter what is on the other side.
pub trait CommentarySink {
    fn notify(&mut self, event: MatchEvent, player_score: u8, opponent_score: u8);

    /// Called once per frame for sinks with deferred work
    fn tick(&mut self) {}

    /// The line to show on screen right now
    fn line(&self) -> &str {
        ""
    }
}

/// Sink that swallows everything; used when no commentary is wanted
pub struct NoopSink;

impl CommentarySink for NoopSink {
    fn notify(&mut self, _event: MatchEvent, _player_score: u8, _opponent_score: u8) {}
}

/// The production sink: canned phrase immediately, remote upgrade maybe.
pub struct Commentator {
    line: String,
    seq: u64,
    remote: Option<RemoteCommentator>,
    rng: SmallRng,
}

impl Commentator {
    pub fn new(config: &CommentaryConfig) -> Self {
        Self {
            line: String::new(),
            seq: 0,
            remote: RemoteCommentator::spawn(config),
            rng: SmallRng::from_entropy(),
        }
    }

    #[cfg(test)]
    fn with_remote(remote: RemoteCommentator) -> Self {
        Self {
            line: String::new(),
            seq: 0,
            remote: Some(remote),
            rng: SmallRng::seed_from_u64(9),
        }
    }
}

impl CommentarySink for Commentator {
    fn notify(&mut self, event: MatchEvent, player_score: u8, opponent_score: u8) {
        self.seq += 1;
        self.line = phrases::pick(event, &mut self.rng).to_string();

        // Paddle-hit taunts are rapid fire; a remote round trip would
        // arrive after the rally moved on
        if event == MatchEvent::OpponentHit {
            return;
        }

        if let Some(remote) = &self.remote {
            remote.request(self.seq, event, player_score, opponent_score);
        }
    }

    fn tick(&mut self) {
        if let Some(remote) = &self.remote {
            while let Some(reply) = remote.try_recv() {
                // A reply that lost the race against a newer event is stale
                if reply.seq == self.seq {
                    self.line = reply.text;
                }
            }
        }
    }

    fn line(&self) -> &str {
        &self.line
    }
}

#[cfg(test)]
mod tests {
    use super::remote::CommentaryRequest;
    use super::*;
    use std::sync::mpsc;

    fn wired_commentator() -> (
        Commentator,
        mpsc::Receiver<CommentaryRequest>,
        mpsc::Sender<CommentaryReply>,
    ) {
        let (request_tx, request_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();
        let commentator =
            Commentator::with_remote(RemoteCommentator::from_parts(request_tx, reply_rx));
        (commentator, request_rx, reply_tx)
    }

    #[test]
    fn test_notify_shows_a_canned_phrase_immediately() {
        // No remote configured: the canned phrase is the whole story
        let mut commentator = Commentator {
            line: String::new(),
            seq: 0,
            remote: None,
            rng: SmallRng::seed_from_u64(1),
        };
        assert!(commentator.line().is_empty());

        commentator.notify(MatchEvent::MatchStart, 0, 0);
        assert!(!commentator.line().is_empty());
    }

    #[test]
    fn test_score_events_reach_the_remote() {
        let (mut commentator, request_rx, _reply_tx) = wired_commentator();
        commentator.notify(MatchEvent::PlayerScored, 1, 0);

        let request = request_rx.try_recv().expect("request should be queued");
        assert_eq!(request.event, "player_scored");
        assert_eq!(request.player_score, 1);
        assert_eq!(request.seq, 1);
    }

    #[test]
    fn test_hit_taunts_stay_local() {
        let (mut commentator, request_rx, _reply_tx) = wired_commentator();
        commentator.notify(MatchEvent::OpponentHit, 0, 0);

        assert!(!commentator.line().is_empty());
        assert!(request_rx.try_recv().is_err());
    }

    #[test]
    fn test_fresh_reply_replaces_the_canned_line() {
        let (mut commentator, _request_rx, reply_tx) = wired_commentator();
        commentator.notify(MatchEvent::OpponentScored, 0, 1);

        reply_tx
            .send(CommentaryReply {
                seq: 1,
                text: "Signature move.".to_string(),
            })
            .unwrap();
        commentator.tick();

        assert_eq!(commentator.line(), "Signature move.");
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let (mut commentator, _request_rx, reply_tx) = wired_commentator();
        commentator.notify(MatchEvent::OpponentScored, 0, 1);
        commentator.notify(MatchEvent::PlayerScored, 1, 1);
        let current = commentator.line().to_string();

        // Reply to the first event arrives after the second one happened
        reply_tx
            .send(CommentaryReply {
                seq: 1,
                text: "Old news.".to_string(),
            })
            .unwrap();
        commentator.tick();

        assert_eq!(commentator.line(), current);
    }
}
