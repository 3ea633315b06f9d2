use include_dir::{include_dir, Dir};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static QUOTE_DIR: Dir = include_dir!("src/quotes");

/// A fixed set of target sentences embedded at compile time. Sentences may
/// contain embedded '\n' characters; the user must reproduce those too.
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct QuoteSet {
    pub name: String,
    pub size: u32,
    pub sentences: Vec<String>,
}

impl QuoteSet {
    pub fn new(file_name: String) -> Self {
        read_quote_set_from_file(format!("{file_name}.json")).unwrap()
    }
}

fn read_quote_set_from_file(file_name: String) -> Result<QuoteSet, Box<dyn Error>> {
    let file = QUOTE_DIR
        .get_file(file_name)
        .expect("Quote set file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let quotes = from_str(file_as_str).expect("Unable to deserialize quote set json");

    Ok(quotes)
}

/// Selects the target sentence for a new session.
pub trait SentencePicker {
    fn pick(&mut self, quotes: &QuoteSet) -> String;
}

/// Uniform random selection.
pub struct RandomPicker;

impl SentencePicker for RandomPicker {
    fn pick(&mut self, quotes: &QuoteSet) -> String {
        let mut rng = rand::thread_rng();
        quotes.sentences.choose(&mut rng).cloned().unwrap_or_default()
    }
}

/// Deterministic selection for tests.
pub struct SeededPicker {
    rng: StdRng,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SentencePicker for SeededPicker {
    fn pick(&mut self, quotes: &QuoteSet) -> String {
        quotes
            .sentences
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_set_new_classic() {
        let quotes = QuoteSet::new("classic".to_string());

        assert_eq!(quotes.name, "classic");
        assert!(!quotes.sentences.is_empty());
        assert!(quotes.size > 0);
    }

    #[test]
    fn test_quote_set_new_pangrams() {
        let quotes = QuoteSet::new("pangrams".to_string());

        assert_eq!(quotes.name, "pangrams");
        assert!(!quotes.sentences.is_empty());
        assert!(quotes.size > 0);
    }

    #[test]
    fn test_classic_sentences_contain_line_breaks() {
        let quotes = QuoteSet::new("classic".to_string());
        assert!(quotes.sentences.iter().all(|s| s.contains('\n')));
    }

    #[test]
    fn test_quote_set_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 2,
            "sentences": ["hello world", "first line\nsecond line"]
        }
        "#;

        let quotes: QuoteSet = from_str(json_data).expect("Failed to deserialize test quote set");

        assert_eq!(quotes.name, "test");
        assert_eq!(quotes.size, 2);
        assert_eq!(quotes.sentences.len(), 2);
        assert_eq!(quotes.sentences[1], "first line\nsecond line");
    }

    #[test]
    fn test_read_quote_set_from_file() {
        let result = read_quote_set_from_file("classic.json".to_string());
        assert!(result.is_ok());

        let quotes = result.unwrap();
        assert_eq!(quotes.name, "classic");
        assert!(!quotes.sentences.is_empty());
    }

    #[test]
    #[should_panic(expected = "Quote set file not found")]
    fn test_read_nonexistent_quote_set_file() {
        let _result = read_quote_set_from_file("nonexistent.json".to_string());
    }

    #[test]
    fn test_random_picker_picks_a_member() {
        let quotes = QuoteSet::new("classic".to_string());
        let mut picker = RandomPicker;

        for _ in 0..10 {
            let sentence = picker.pick(&quotes);
            assert!(quotes.sentences.contains(&sentence));
        }
    }

    #[test]
    fn test_seeded_picker_is_deterministic() {
        let quotes = QuoteSet::new("classic".to_string());

        let mut a = SeededPicker::new(7);
        let mut b = SeededPicker::new(7);

        for _ in 0..10 {
            assert_eq!(a.pick(&quotes), b.pick(&quotes));
        }
    }

    #[test]
    fn test_picker_on_empty_set_returns_empty_string() {
        let quotes = QuoteSet {
            name: "empty".to_string(),
            size: 0,
            sentences: vec![],
        };
        let mut picker = SeededPicker::new(0);
        assert_eq!(picker.pick(&quotes), "");
    }
}
