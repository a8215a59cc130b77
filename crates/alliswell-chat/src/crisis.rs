//! Crisis keyword detection.
//!
//! Runs synchronously on every outgoing message before any network call. A
//! match routes the message to the local safety response instead of the
//! relay. Matching is a case-insensitive substring search; it never fails.

/// Phrases that suppress the relay call.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "kill myself",
    "end my life",
    "suicide",
    "suicidal",
    "want to die",
    "hurt myself",
    "self harm",
    "overdose",
    "can't go on",
    "no point living",
    "better off dead",
    "end it all",
    "harm myself",
];

#[derive(Debug, Clone)]
pub struct CrisisDetector {
    keywords: Vec<String>,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new(CRISIS_KEYWORDS.iter().copied())
    }
}

impl CrisisDetector {
    /// Build a detector over a custom phrase list. Blank phrases are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| normalize(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_crisis(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// The first configured phrase found in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let haystack = normalize(text);
        self.keywords
            .iter()
            .find(|k| haystack.contains(k.as_str()))
            .map(String::as_str)
    }
}

/// Check `text` against the standard keyword list.
pub fn is_crisis(text: &str) -> bool {
    let haystack = normalize(text);
    CRISIS_KEYWORDS.iter().any(|k| haystack.contains(*k))
}

/// Lowercase, fold typographic apostrophes to `'`, and collapse whitespace
/// runs to one space.
fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'");
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}
