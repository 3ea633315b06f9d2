use chrono::{DateTime, Local};
use time_humanize::{Accuracy, HumanTime, Tense};

use crate::score::TestResult;

/// One recorded result, stamped with the wall-clock time it was produced.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub result: TestResult,
    pub recorded_at: DateTime<Local>,
}

impl HistoryEntry {
    /// Humanized age of the entry, e.g. "a minute ago".
    pub fn age(&self) -> String {
        let secs = (Local::now() - self.recorded_at).num_seconds().max(0) as u64;
        HumanTime::from(std::time::Duration::from_secs(secs))
            .to_text_en(Accuracy::Rough, Tense::Past)
    }
}

/// In-memory list of results for the current run, newest first. Cleared when
/// the process exits; nothing is written to disk.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a result so iteration order is newest first.
    pub fn record(&mut self, result: TestResult) {
        self.entries.insert(
            0,
            HistoryEntry {
                result,
                recorded_at: Local::now(),
            },
        );
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest speed recorded so far in this run.
    pub fn best_wpm(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.result.speed_wpm).max()
    }
}
