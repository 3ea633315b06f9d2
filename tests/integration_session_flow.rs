use std::time::{Duration, SystemTime};

use keyrate::corpus::{QuoteSet, SeededPicker, SentencePicker};
use keyrate::feedback::{cue_for, Cue, FeedbackSink, MemorySink};
use keyrate::history::History;
use keyrate::session::Session;

/// Feeds `text` to the session one character at a time, the way the key
/// handler folds keystrokes into the input buffer.
fn type_text(session: &mut Session, text: &str) {
    for c in text.chars() {
        let mut next = session.input.clone();
        next.push(c);
        session.on_input_change(&next);
    }
}

#[test]
fn exact_typing_scores_expected_wpm() {
    // "ab cd" (2 words) typed perfectly in ~2s should score 60 wpm
    let mut session = Session::new("ab cd".to_string());

    type_text(&mut session, "ab c");
    session.started_at = Some(SystemTime::now() - Duration::from_secs(2));
    session.on_input_change("ab cd");

    assert!(session.has_finished());

    let result = session.result.as_ref().unwrap();
    assert_eq!(result.speed_wpm, 60);
    assert_eq!(result.accuracy_percent, 100);
}

#[test]
fn corpus_sentence_typed_to_completion() {
    let quotes = QuoteSet::new("classic".to_string());
    let mut picker = SeededPicker::new(42);
    let target = picker.pick(&quotes);

    let mut session = Session::new(target.clone());
    type_text(&mut session, &target);

    assert!(session.has_finished());

    let result = session.result.as_ref().unwrap();
    assert_eq!(result.accuracy_percent, 100);

    let mut history = History::new();
    history.record(result.clone());
    assert_eq!(history.len(), 1);
    assert_eq!(history.best_wpm(), Some(result.speed_wpm));
}

#[test]
fn timeout_pins_speed_and_elapsed_regardless_of_progress() {
    let mut session = Session::with_limit("abcde".to_string(), 3);
    type_text(&mut session, "ab");

    for _ in 0..3 {
        session.on_tick();
    }

    assert!(session.has_finished());
    assert_eq!(session.seconds_remaining, 0);

    let result = session.result.as_ref().unwrap();
    assert_eq!(result.speed_wpm, 0);
    assert_eq!(result.elapsed_secs, 3.0);
    // "ab" matches 2 of 5 target characters
    assert_eq!(result.accuracy_percent, 40);
}

#[test]
fn exactly_one_result_survives_late_ticks_and_keys() {
    let mut session = Session::with_limit("hi".to_string(), 1);
    type_text(&mut session, "hi");

    assert!(session.has_finished());
    let result = session.result.clone();

    // the timeout trigger racing the completion must be suppressed
    for _ in 0..5 {
        session.on_tick();
    }
    session.on_input_change("hix");

    assert_eq!(session.result, result);
    assert_eq!(session.input, "hi");
}

#[test]
fn reset_mid_session_discards_everything() {
    let mut session = Session::new("hello world".to_string());
    type_text(&mut session, "hel");
    session.on_tick();
    session.on_tick();

    session = Session::new("hello world".to_string());

    assert!(session.started_at.is_none());
    assert!(session.ended_at.is_none());
    assert!(session.result.is_none());
    assert!(session.input.is_empty());
    assert_eq!(session.seconds_remaining, keyrate::session::SESSION_SECS);

    // the new session's clock starts on its own first keystroke
    session.on_input_change("h");
    assert!(session.started_at.is_some());
}

#[test]
fn keystroke_cues_reach_the_sink_in_order() {
    let mut session = Session::new("hi".to_string());
    let mut sink = MemorySink::default();

    for next in ["h", "hx", "h", "hi"] {
        let outcome = session.on_input_change(next);
        if let Some(cue) = cue_for(outcome, session.has_finished()) {
            sink.emit(cue);
        }
    }

    assert_eq!(
        sink.cues,
        vec![
            Cue::CorrectKeystroke,
            Cue::IncorrectKeystroke,
            // deleting the mistake re-classifies the now-last character
            Cue::CorrectKeystroke,
            Cue::SessionComplete,
        ]
    );
}

#[test]
fn timeout_emits_no_completion_cue() {
    let mut session = Session::with_limit("hello".to_string(), 1);
    let mut sink = MemorySink::default();

    let outcome = session.on_input_change("h");
    if let Some(cue) = cue_for(outcome, session.has_finished()) {
        sink.emit(cue);
    }

    session.on_tick();
    assert!(session.has_finished());

    // only the keystroke cue was emitted; expiry is silent
    assert_eq!(sink.cues, vec![Cue::CorrectKeystroke]);
}

#[test]
fn multi_line_target_requires_the_line_breaks() {
    let target = "Pack my box\nwith five dozen liquor jugs.";
    let mut session = Session::new(target.to_string());

    type_text(&mut session, "Pack my box");
    assert!(!session.has_finished());

    type_text(&mut session, "\nwith five dozen liquor jugs.");
    assert!(session.has_finished());

    let result = session.result.as_ref().unwrap();
    assert_eq!(result.accuracy_percent, 100);
}
