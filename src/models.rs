use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shortener::{self, ShortenError, SHORT_ID_LENGTH};

/// Whether a rendered entry currently shows its link or an inline edit
/// input. The in-progress text lives in the `Editing` variant, so a row
/// can only ever show one of the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState {
    Viewing,
    Editing { buffer: String },
}

/// One submitted-and-accepted URL together with its generated alias,
/// click counter, and edit state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub short_id: String,
    pub original_url: String,
    pub clicks: u64,
    pub state: EntryState,
}

impl Entry {
    pub fn new(short_id: String, original_url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            short_id,
            original_url,
            clicks: 0,
            state: EntryState::Viewing,
        }
    }

    /// The displayed alias: base prefix plus the current identifier.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.short_id)
    }

    /// Simulated navigation; bumps this entry's own counter only.
    pub fn record_click(&mut self) {
        self.clicks += 1;
    }

    /// Click display text; blank until the first click.
    pub fn clicks_label(&self) -> String {
        if self.clicks == 0 {
            String::new()
        } else {
            format!(" Clicks: {}", self.clicks)
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EntryState::Editing { .. })
    }

    /// Viewing -> Editing, with the input pre-filled with the current
    /// identifier (the short URL minus the base prefix).
    pub fn begin_edit(&mut self) {
        if self.state == EntryState::Viewing {
            self.state = EntryState::Editing {
                buffer: self.short_id.clone(),
            };
        }
    }

    /// Editing -> Viewing. The buffer becomes the new identifier without
    /// re-validation; the click counter is untouched.
    pub fn save_edit(&mut self) {
        if let EntryState::Editing { buffer } = &self.state {
            self.short_id = buffer.clone();
            self.state = EntryState::Viewing;
        }
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut String> {
        match &mut self.state {
            EntryState::Editing { buffer } => Some(buffer),
            EntryState::Viewing => None,
        }
    }
}

/// The ordered list of short links, the widget's sole source of truth.
/// Duplicates are permitted and insertion order is append-only.
pub struct LinkList {
    base_url: String,
    entries: Vec<Entry>,
}

impl LinkList {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            entries: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creation flow: validate the input, generate an identifier, and
    /// append a new entry. Repeat submissions of the same address create
    /// independent records.
    pub fn shorten(&mut self, input: &str) -> Result<(), ShortenError> {
        if !shortener::is_valid_url(input) {
            return Err(ShortenError::InvalidUrl);
        }

        let short_id = shortener::generate_random_string(SHORT_ID_LENGTH);
        self.entries.push(Entry::new(short_id, input.to_string()));
        Ok(())
    }

    /// Deletion flow: removes every entry the input value matches. An
    /// empty input matches everything and clears the list. Returns the
    /// number of removed entries; zero matches is a no-op.
    pub fn delete_matching(&mut self, input: &str) -> usize {
        let before = self.entries.len();
        let base_url = &self.base_url;
        self.entries
            .retain(|entry| !matches_for_deletion(entry, base_url, input));
        before - self.entries.len()
    }
}

/// True when the entry should be removed for the given input value:
/// empty input, the short URL with a single trailing slash stripped, or
/// the original URL text.
fn matches_for_deletion(entry: &Entry, base_url: &str, input: &str) -> bool {
    if input.is_empty() {
        return true;
    }

    let short_url = entry.short_url(base_url);
    let short_url = short_url.strip_suffix('/').unwrap_or(&short_url);
    input == short_url || input == entry.original_url
}
