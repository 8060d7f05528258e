//! Suppression of repeated status and error notifications

/// Last delivered texts, one slot per kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupState {
    pub last_notification: Option<String>,
    /// Stored already truncated to the filter's prefix length
    pub last_error: Option<String>,
}

/// Decides whether a candidate message repeats the last delivered one.
///
/// This is a single last-value comparison per kind, not a history: a text
/// that changes and then reverts is new again. Errors are compared on their
/// leading `error_prefix_len` characters only, so failures whose tail varies
/// (ids, timestamps) do not flood the chat.
///
/// The predicates never mutate. Callers record a text once it has actually
/// been delivered, so a failed send is retried on a later cycle.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    state: DedupState,
    error_prefix_len: usize,
}

impl ChangeFilter {
    pub fn new(error_prefix_len: usize) -> Self {
        Self {
            state: DedupState::default(),
            error_prefix_len,
        }
    }

    pub fn state(&self) -> &DedupState {
        &self.state
    }

    pub fn is_new_notification(&self, text: &str) -> bool {
        self.state.last_notification.as_deref() != Some(text)
    }

    pub fn record_notification(&mut self, text: &str) {
        self.state.last_notification = Some(text.to_string());
    }

    pub fn is_new_error(&self, text: &str) -> bool {
        self.state.last_error.as_deref() != Some(self.error_prefix(text))
    }

    pub fn record_error(&mut self, text: &str) {
        self.state.last_error = Some(self.error_prefix(text).to_string());
    }

    /// Leading `error_prefix_len` characters of `text`
    fn error_prefix<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.error_prefix_len) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }
}
