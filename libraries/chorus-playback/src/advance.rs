//! Queue advancement policy
//!
//! Pure decision logic for what plays after a track ends or a skip
//! command arrives. No session state, no I/O; the session executes
//! whatever decision comes back.
//!
//! Shuffle uses bounded-retry sampling: resample a few times to avoid
//! repeating the current index, and accept a repeat if every attempt
//! collides. A perfect derangement is unnecessary at queue scale, and an
//! unbounded retry could stall on small queues.

use chorus_core::RepeatMode;
use rand::Rng;

/// Resample attempts when advancing after natural completion.
const COMPLETION_SHUFFLE_ATTEMPTS: u32 = 10;

/// Resample attempts on a manual skip.
const MANUAL_SHUFFLE_ATTEMPTS: u32 = 5;

/// Outcome of the natural-completion decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Replay the current track from the start, reusing its source
    Restart,

    /// Start the queue entry at this index
    Play(usize),

    /// Queue is exhausted; auto-continuation may replenish it
    Exhausted,

    /// Nothing to do (no active track)
    None,
}

/// Decide what plays after the current track completes naturally.
///
/// Decision order: repeat-one restart, shuffle pick, sequential advance,
/// repeat-all wrap, exhaustion.
pub fn on_completion<R: Rng>(
    queue_len: usize,
    current_index: Option<usize>,
    shuffled: bool,
    repeat: RepeatMode,
    rng: &mut R,
) -> Advance {
    let Some(index) = current_index else {
        return Advance::None;
    };

    if repeat == RepeatMode::One {
        return Advance::Restart;
    }

    if shuffled && queue_len > 1 {
        return Advance::Play(sample_avoiding(
            rng,
            queue_len,
            Some(index),
            COMPLETION_SHUFFLE_ATTEMPTS,
        ));
    }

    let next = index + 1;
    if next < queue_len {
        return Advance::Play(next);
    }

    if repeat == RepeatMode::All && queue_len > 0 {
        return Advance::Play(0);
    }

    Advance::Exhausted
}

/// Decide the target of a manual "next".
///
/// Always loops: past the end wraps to index 0 regardless of repeat mode.
/// Returns `None` only for an empty queue.
pub fn on_next<R: Rng>(
    queue_len: usize,
    current_index: Option<usize>,
    shuffled: bool,
    rng: &mut R,
) -> Option<usize> {
    if queue_len == 0 {
        return None;
    }

    if shuffled {
        let avoid = if queue_len > 1 { current_index } else { None };
        return Some(sample_avoiding(rng, queue_len, avoid, MANUAL_SHUFFLE_ATTEMPTS));
    }

    let next = current_index.map_or(0, |i| i + 1);
    Some(if next >= queue_len { 0 } else { next })
}

/// Decide the target of a manual "prev" once the restart window has
/// passed. Wraps to the last entry from index 0; under shuffle the pick
/// is uniformly random with no repeat avoidance.
pub fn on_prev<R: Rng>(
    queue_len: usize,
    current_index: Option<usize>,
    shuffled: bool,
    rng: &mut R,
) -> Option<usize> {
    if queue_len == 0 {
        return None;
    }

    if shuffled {
        return Some(rng.gen_range(0..queue_len));
    }

    let index = current_index.unwrap_or(0);
    Some(if index == 0 { queue_len - 1 } else { index - 1 })
}

/// Sample a uniformly random index, resampling up to `max_attempts` times
/// while the result equals `avoid`.
fn sample_avoiding<R: Rng>(
    rng: &mut R,
    len: usize,
    avoid: Option<usize>,
    max_attempts: u32,
) -> usize {
    let mut candidate = rng.gen_range(0..len);
    let mut attempts = 1;
    while Some(candidate) == avoid && attempts < max_attempts {
        candidate = rng.gen_range(0..len);
        attempts += 1;
    }
    candidate
}
