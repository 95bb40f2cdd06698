/// The page to poll and the phrase whose disappearance triggers an alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTarget {
    pub url: String,
    pub phrase: String,
}

impl PageTarget {
    pub fn new(url: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            phrase: phrase.into(),
        }
    }

    /// Case-sensitive byte-level containment of the match phrase.
    pub fn is_present_in(&self, body: &[u8]) -> bool {
        let needle = self.phrase.as_bytes();
        if needle.is_empty() {
            return true;
        }
        body.windows(needle.len()).any(|w| w == needle)
    }
}

/// Sender and recipient of the SMS alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmsRoute {
    pub to: String,
    pub from: String,
}
