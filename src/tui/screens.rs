//! Tab state structures for TUI

use arboard::Clipboard;
use crate::templates::EMOJIS;

/// Editable text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    /// Current contents
    pub value: String,
    multiline: bool,
    digits_only: bool,
}

impl InputField {
    /// Single-line field
    pub fn new() -> Self {
        Self::default()
    }

    /// Field where Enter inserts a newline
    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    /// Field accepting only ASCII digits
    pub fn numeric(initial: u64) -> Self {
        Self {
            value: initial.to_string(),
            digits_only: true,
            ..Self::default()
        }
    }

    /// Whether Enter inserts a newline
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Add character to input
    pub fn add_char(&mut self, c: char) {
        if self.digits_only && !c.is_ascii_digit() {
            return;
        }
        self.value.push(c);
    }

    /// Insert a newline (multiline fields only)
    pub fn newline(&mut self) {
        if self.multiline {
            self.value.push('\n');
        }
    }

    /// Remove last character from input
    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Clear input
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Replace the contents
    pub fn set(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.value = if self.digits_only {
            value.chars().filter(|c| c.is_ascii_digit()).collect()
        } else if self.multiline {
            value
        } else {
            value.replace(['\r', '\n'], " ")
        };
    }

    /// Whether the field is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Contents as a number, if valid
    pub fn as_u64(&self) -> Option<u64> {
        self.value.trim().parse().ok()
    }

    /// Paste clipboard text into the field
    pub fn paste_from_clipboard(&mut self) -> Result<(), String> {
        let text = Clipboard::new()
            .and_then(|mut clipboard| clipboard.get_text())
            .map_err(|e| format!("Clipboard error: {}", e))?;

        let mut combined = self.value.clone();
        combined.push_str(text.trim_end());
        self.set(combined);
        Ok(())
    }
}

/// Focused field on the quick send tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickSendField {
    /// Recipient phone
    Phone,
    /// Message body
    Message,
}

/// Emoji popup on the quick send tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiPicker {
    /// Whether the popup is shown
    pub open: bool,
    /// Highlighted entry in [`EMOJIS`]
    pub selected_index: usize,
}

impl EmojiPicker {
    /// Entries per popup row
    pub const COLUMNS: usize = 8;

    /// Show or hide the popup
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Move the highlight by `step` entries, wrapping around
    pub fn move_by(&mut self, step: isize) {
        let len = EMOJIS.len() as isize;
        self.selected_index = (self.selected_index as isize + step).rem_euclid(len) as usize;
    }

    /// Highlighted emoji
    pub fn selected(&self) -> &'static str {
        EMOJIS[self.selected_index % EMOJIS.len()]
    }
}

/// Quick send tab state
#[derive(Debug)]
pub struct QuickSendScreen {
    /// Recipient phone
    pub phone: InputField,
    /// Message body
    pub message: InputField,
    /// Focused field
    pub focus: QuickSendField,
    /// Whether a send is in flight
    pub sending: bool,
    /// Emoji popup
    pub emoji: EmojiPicker,
}

impl QuickSendScreen {
    /// Create new quick send screen
    pub fn new() -> Self {
        Self {
            phone: InputField::new(),
            message: InputField::multiline(),
            focus: QuickSendField::Phone,
            sending: false,
            emoji: EmojiPicker::default(),
        }
    }

    /// Append the highlighted emoji to the message and close the popup
    pub fn insert_selected_emoji(&mut self) {
        let emoji = self.emoji.selected();
        self.message.value.push_str(emoji);
        self.emoji.open = false;
        self.focus = QuickSendField::Message;
    }

    /// Move focus to the other field
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            QuickSendField::Phone => QuickSendField::Message,
            QuickSendField::Message => QuickSendField::Phone,
        };
    }

    /// Currently focused field
    pub fn focused_mut(&mut self) -> &mut InputField {
        match self.focus {
            QuickSendField::Phone => &mut self.phone,
            QuickSendField::Message => &mut self.message,
        }
    }
}

impl Default for QuickSendScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Focused element on the favorites tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesField {
    /// New favorite name
    Name,
    /// New favorite phone
    Phone,
    /// Saved favorites list
    List,
}

/// Favorites tab state
#[derive(Debug)]
pub struct FavoritesScreen {
    /// New favorite name
    pub name: InputField,
    /// New favorite phone
    pub phone: InputField,
    /// Focused element
    pub focus: FavoritesField,
    /// Selected list row
    pub selected_index: usize,
}

impl FavoritesScreen {
    /// Create new favorites screen
    pub fn new() -> Self {
        Self {
            name: InputField::new(),
            phone: InputField::new(),
            focus: FavoritesField::Name,
            selected_index: 0,
        }
    }

    /// Cycle focus forward
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            FavoritesField::Name => FavoritesField::Phone,
            FavoritesField::Phone => FavoritesField::List,
            FavoritesField::List => FavoritesField::Name,
        };
    }

    /// Cycle focus backward
    pub fn previous_focus(&mut self) {
        self.focus = match self.focus {
            FavoritesField::Name => FavoritesField::List,
            FavoritesField::Phone => FavoritesField::Name,
            FavoritesField::List => FavoritesField::Phone,
        };
    }

    /// Focused text field, if focus is not on the list
    pub fn focused_mut(&mut self) -> Option<&mut InputField> {
        match self.focus {
            FavoritesField::Name => Some(&mut self.name),
            FavoritesField::Phone => Some(&mut self.phone),
            FavoritesField::List => None,
        }
    }

    /// Move to next list row
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    /// Move to previous list row
    pub fn previous(&mut self, len: usize) {
        if len > 0 {
            self.selected_index = if self.selected_index > 0 {
                self.selected_index - 1
            } else {
                len - 1
            };
        }
    }

    /// Keep the selection inside a list of `len` rows
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }
}

impl Default for FavoritesScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Focused field on the bulk send tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkField {
    /// Newline-separated recipients
    Recipients,
    /// Message body
    Message,
    /// Lower delay bound
    MinDelay,
    /// Upper delay bound
    MaxDelay,
}

/// Bulk send tab state
#[derive(Debug)]
pub struct BulkSendScreen {
    /// Newline-separated recipients
    pub recipients: InputField,
    /// Message body
    pub message: InputField,
    /// Lower delay bound (seconds)
    pub min_delay: InputField,
    /// Upper delay bound (seconds)
    pub max_delay: InputField,
    /// Focused field
    pub focus: BulkField,
    /// Paced queue (true) or immediate sending (false)
    pub use_queue: bool,
    /// Whether an immediate bulk send is in flight
    pub sending: bool,
}

impl BulkSendScreen {
    /// Create new bulk send screen with default delays
    pub fn new(min_delay: u64, max_delay: u64) -> Self {
        Self {
            recipients: InputField::multiline(),
            message: InputField::multiline(),
            min_delay: InputField::numeric(min_delay),
            max_delay: InputField::numeric(max_delay),
            focus: BulkField::Recipients,
            use_queue: true,
            sending: false,
        }
    }

    /// Cycle focus forward
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            BulkField::Recipients => BulkField::Message,
            BulkField::Message => BulkField::MinDelay,
            BulkField::MinDelay => BulkField::MaxDelay,
            BulkField::MaxDelay => BulkField::Recipients,
        };
    }

    /// Cycle focus backward
    pub fn previous_focus(&mut self) {
        self.focus = match self.focus {
            BulkField::Recipients => BulkField::MaxDelay,
            BulkField::Message => BulkField::Recipients,
            BulkField::MinDelay => BulkField::Message,
            BulkField::MaxDelay => BulkField::MinDelay,
        };
    }

    /// Currently focused field
    pub fn focused_mut(&mut self) -> &mut InputField {
        match self.focus {
            BulkField::Recipients => &mut self.recipients,
            BulkField::Message => &mut self.message,
            BulkField::MinDelay => &mut self.min_delay,
            BulkField::MaxDelay => &mut self.max_delay,
        }
    }

    /// Number of non-blank recipient lines
    pub fn recipient_count(&self) -> usize {
        self.recipients
            .value
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count()
    }
}

/// Templates tab state
#[derive(Debug, Default)]
pub struct TemplatesScreen {
    /// Selected template row
    pub selected_index: usize,
}

impl TemplatesScreen {
    /// Create new templates screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to next template
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    /// Move to previous template
    pub fn previous(&mut self, len: usize) {
        if len > 0 {
            self.selected_index = (self.selected_index + len - 1) % len;
        }
    }
}

/// Last number check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Number that was checked
    pub phone: String,
    /// Whether it is registered on WhatsApp
    pub exists: bool,
}

/// Number check tab state
#[derive(Debug, Default)]
pub struct NumberCheckScreen {
    /// Number to check
    pub phone: InputField,
    /// Whether a check is in flight
    pub checking: bool,
    /// Result of the last successful check
    pub last_result: Option<CheckOutcome>,
}

impl NumberCheckScreen {
    /// Create new number check screen
    pub fn new() -> Self {
        Self::default()
    }
}
