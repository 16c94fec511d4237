//! Interpretation of recognized speech into page commands.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    Search(String),
    /// Destination token without a leading separator.
    Navigate(String),
}

const SEARCH_PHRASES: &[&[&str]] = &[&["search", "for"], &["search"], &["find"], &["show", "me"]];
const NAVIGATE_PHRASES: &[&[&str]] = &[&["go", "to"], &["navigate", "to"], &["open"]];

impl VoiceCommand {
    /// Returns `None` for transcripts that carry no recognizable command.
    pub fn from_transcript(transcript: &str) -> Option<Self> {
        let normalized = transcript.to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        if let Some(rest) = strip_phrase(&words, NAVIGATE_PHRASES) {
            return Some(Self::Navigate(rest.join("-")));
        }
        if let Some(rest) = strip_phrase(&words, SEARCH_PHRASES) {
            return Some(Self::Search(rest.join(" ")));
        }
        None
    }
}

/// Strips the first matching phrase; a phrase with nothing after it yields `None`.
fn strip_phrase<'a, 'w>(words: &'a [&'w str], phrases: &[&[&'w str]]) -> Option<&'a [&'w str]> {
    phrases
        .iter()
        .find_map(|phrase| words.strip_prefix(*phrase))
        .filter(|rest| !rest.is_empty())
}
