// Built-in phrase tables. Always available; the remote service only ever
// upgrades one of these after the fact.

use rand::Rng;

use super::MatchEvent;

const MATCH_START: &[&str] = &[
    "Warm up those paws, human.",
    "Combat mode: ON. Mrow!",
    "First to five. Try to keep up~",
    "I sharpened my claws for this.",
];

const PLAYER_SCORED: &[&str] = &[
    "Mrrh?! My whiskers twitched!",
    "Static in my circuits. Rematch that point!",
    "Lucky bounce, human.",
    "Hsss... recalibrating.",
    "That one doesn't count. Okay, it counts.",
];

const OPPONENT_SCORED: &[&str] = &[
    "Purrfectly calculated.",
    "Too easy! Want a head start?",
    "Another one for the cat.",
    "I saw that coming three bounces ago.",
];

const OPPONENT_HIT: &[&str] = &[
    "Swat!",
    "Too slow!",
    "Mrow-ha!",
    "Predictable.",
    "Nice try.",
];

fn table(event: MatchEvent) -> &'static [&'static str] {
    match event {
        MatchEvent::MatchStart => MATCH_START,
        MatchEvent::PlayerScored => PLAYER_SCORED,
        MatchEvent::OpponentScored => OPPONENT_SCORED,
        MatchEvent::OpponentHit => OPPONENT_HIT,
    }
}

/// Pick a phrase for the event
pub fn pick<R: Rng>(event: MatchEvent, rng: &mut R) -> &'static str {
    let phrases = table(event);
    phrases[rng.gen_range(0..phrases.len())]
}
