use std::time::SystemTime;

use itertools::{EitherOrBoth, Itertools};

use crate::score::{score, TestResult};

/// Default countdown for a session, in seconds.
pub const SESSION_SECS: u64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Active,
    Finished,
}

/// Classification of a single keystroke against the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Per-target-character classification consumed by the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Unmatched,
    Correct,
    Incorrect,
}

/// One attempt at reproducing a target text.
///
/// Status only moves forward: Idle -> Active -> Finished. A reset is a new
/// `Session` value, never a rewind. Completion and timeout are mutually
/// exclusive terminal triggers; whichever fires first produces the one and
/// only result.
#[derive(Debug)]
pub struct Session {
    pub target: String,
    pub input: String,
    pub started_at: Option<SystemTime>,
    pub ended_at: Option<SystemTime>,
    pub seconds_remaining: u64,
    pub seconds_limit: u64,
    pub status: Status,
    pub result: Option<TestResult>,
}

impl Session {
    pub fn new(target: String) -> Self {
        Self::with_limit(target, SESSION_SECS)
    }

    pub fn with_limit(target: String, seconds: u64) -> Self {
        Self {
            target,
            input: String::new(),
            started_at: None,
            ended_at: None,
            seconds_remaining: seconds,
            seconds_limit: seconds,
            status: Status::Idle,
            result: None,
        }
    }

    /// Applies a new value of the input buffer and classifies the most
    /// recently typed character. Returns `None` for an empty buffer
    /// (deletion) or once the session is finished.
    ///
    /// The first non-empty value starts the clock. A value equal to the
    /// target, line breaks included, finishes the session.
    pub fn on_input_change(&mut self, new_value: &str) -> Option<Outcome> {
        if self.status == Status::Finished {
            return None;
        }

        if self.started_at.is_none() && !new_value.is_empty() {
            self.started_at = Some(SystemTime::now());
            self.status = Status::Active;
        }

        let outcome = new_value.chars().last().map(|typed| {
            let pos = new_value.chars().count() - 1;
            match self.target.chars().nth(pos) {
                Some(expected) if expected == typed => Outcome::Correct,
                _ => Outcome::Incorrect,
            }
        });

        self.input = new_value.to_string();

        if self.input == self.target {
            self.ended_at = Some(SystemTime::now());
            self.finish(false);
        }

        outcome
    }

    /// Advances the countdown by one second. A no-op unless the session is
    /// running; in particular a tick racing a completed session must not
    /// produce a second result.
    pub fn on_tick(&mut self) {
        if self.status != Status::Active || self.ended_at.is_some() {
            return;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);

        if self.seconds_remaining == 0 && self.result.is_none() {
            self.finish(true);
        }
    }

    fn finish(&mut self, timed_out: bool) {
        self.status = Status::Finished;
        self.result = Some(score(self, timed_out));
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// Positional diff of the input against the target, one entry per target
    /// character. Input typed past the end of the target is not represented.
    pub fn char_states(&self) -> Vec<CharState> {
        self.target
            .chars()
            .zip_longest(self.input.chars())
            .filter_map(|pair| match pair {
                EitherOrBoth::Both(t, i) if t == i => Some(CharState::Correct),
                EitherOrBoth::Both(..) => Some(CharState::Incorrect),
                EitherOrBoth::Left(_) => Some(CharState::Unmatched),
                EitherOrBoth::Right(_) => None,
            })
            .collect()
    }

    /// Index of the next target character to type, clamped to the target
    /// length.
    pub fn cursor_pos(&self) -> usize {
        self.input
            .chars()
            .count()
            .min(self.target.chars().count())
    }
}
