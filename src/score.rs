use itertools::{EitherOrBoth, Itertools};

use crate::session::Session;
use crate::util::{round2, word_count};

/// Outcome of one finished attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct TestResult {
    pub speed_wpm: u32,
    pub accuracy_percent: u32,
    pub elapsed_secs: f64,
}

/// Scores a session at its terminal transition. Pure: reads the session,
/// never mutates it.
///
/// On timeout the elapsed time is pinned to the session limit and the speed
/// is 0 regardless of partial progress. Accuracy always uses the full target
/// length as the denominator; positions the user never reached count as
/// misses, input typed past the end of the target is ignored.
pub fn score(session: &Session, timed_out: bool) -> TestResult {
    let elapsed_secs = if timed_out {
        session.seconds_limit as f64
    } else {
        let elapsed = match (session.started_at, session.ended_at) {
            (Some(start), Some(end)) => end
                .duration_since(start)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0),
            _ => 0.0,
        };
        round2(elapsed)
    };

    let words = word_count(&session.target);
    let speed_wpm = if timed_out || elapsed_secs == 0.0 {
        0
    } else {
        (words as f64 / elapsed_secs * 60.0).round() as u32
    };

    let target_len = session.target.chars().count();
    let correct = session
        .target
        .chars()
        .zip_longest(session.input.chars())
        .filter(|pair| matches!(pair, EitherOrBoth::Both(t, i) if t == i))
        .count();
    let accuracy_percent = if target_len == 0 {
        0
    } else {
        (correct as f64 / target_len as f64 * 100.0).round() as u32
    };

    TestResult {
        speed_wpm,
        accuracy_percent,
        elapsed_secs,
    }
}
