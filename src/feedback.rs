use std::io::{self, Write};

use crate::session::Outcome;

/// Audio cue for a session transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    CorrectKeystroke,
    IncorrectKeystroke,
    SessionComplete,
}

/// Maps a keystroke classification to the cue it should trigger.
/// `completed` is true only when this keystroke finished the session by
/// matching the target exactly; a timeout produces no cue.
pub fn cue_for(outcome: Option<Outcome>, completed: bool) -> Option<Cue> {
    if completed {
        return Some(Cue::SessionComplete);
    }
    match outcome {
        Some(Outcome::Correct) => Some(Cue::CorrectKeystroke),
        Some(Outcome::Incorrect) => Some(Cue::IncorrectKeystroke),
        None => None,
    }
}

/// Consumer of cues. Emission never blocks the caller and never fails.
pub trait FeedbackSink {
    fn emit(&mut self, cue: Cue);
}

/// Production sink: rings the terminal bell for incorrect keystrokes and on
/// completion. Toggling it on or off has no effect on session state.
#[derive(Debug)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl FeedbackSink for TerminalBell {
    fn emit(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        match cue {
            Cue::IncorrectKeystroke | Cue::SessionComplete => {
                let mut stdout = io::stdout();
                let _ = stdout.write_all(b"\x07");
                let _ = stdout.flush();
            }
            Cue::CorrectKeystroke => {}
        }
    }
}

/// Test sink that records every cue it is handed.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub cues: Vec<Cue>,
}

impl FeedbackSink for MemorySink {
    fn emit(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_for_correct_keystroke() {
        assert_eq!(
            cue_for(Some(Outcome::Correct), false),
            Some(Cue::CorrectKeystroke)
        );
    }

    #[test]
    fn test_cue_for_incorrect_keystroke() {
        assert_eq!(
            cue_for(Some(Outcome::Incorrect), false),
            Some(Cue::IncorrectKeystroke)
        );
    }

    #[test]
    fn test_cue_for_completion_wins() {
        assert_eq!(
            cue_for(Some(Outcome::Correct), true),
            Some(Cue::SessionComplete)
        );
    }

    #[test]
    fn test_cue_for_deletion_is_silent() {
        assert_eq!(cue_for(None, false), None);
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::default();
        sink.emit(Cue::CorrectKeystroke);
        sink.emit(Cue::IncorrectKeystroke);
        sink.emit(Cue::SessionComplete);

        assert_eq!(
            sink.cues,
            vec![
                Cue::CorrectKeystroke,
                Cue::IncorrectKeystroke,
                Cue::SessionComplete
            ]
        );
    }

    #[test]
    fn test_bell_toggle() {
        let mut bell = TerminalBell::new(true);
        assert!(bell.is_enabled());

        bell.toggle();
        assert!(!bell.is_enabled());

        bell.toggle();
        assert!(bell.is_enabled());
    }

    #[test]
    fn test_disabled_bell_emit_is_a_noop() {
        let mut bell = TerminalBell::new(false);
        // Nothing observable to assert beyond not panicking and staying off.
        bell.emit(Cue::IncorrectKeystroke);
        assert!(!bell.is_enabled());
    }
}
