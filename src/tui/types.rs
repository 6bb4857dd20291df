//! Core types for TUI tabs and navigation

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Send a single message
    QuickSend,
    /// Saved recipients
    Favorites,
    /// Paced bulk sending
    BulkSend,
    /// Built-in message templates
    Templates,
    /// WhatsApp registration lookup
    NumberCheck,
}

impl Tab {
    /// Get all tabs in order
    pub fn all() -> Vec<Self> {
        vec![
            Self::QuickSend,
            Self::Favorites,
            Self::BulkSend,
            Self::Templates,
            Self::NumberCheck,
        ]
    }

    /// Position in the tab bar
    pub fn index(&self) -> usize {
        match self {
            Self::QuickSend => 0,
            Self::Favorites => 1,
            Self::BulkSend => 2,
            Self::Templates => 3,
            Self::NumberCheck => 4,
        }
    }

    /// Tab at position `index`
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Next tab, wrapping around
    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Previous tab, wrapping around
    pub fn previous(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    /// Get display label for the tab
    pub fn label(&self) -> &str {
        match self {
            Self::QuickSend => "Quick Send",
            Self::Favorites => "Favorites",
            Self::BulkSend => "Bulk Send",
            Self::Templates => "Templates",
            Self::NumberCheck => "Check Number",
        }
    }

    /// Get key hints for the tab
    pub fn help(&self) -> &str {
        match self {
            Self::QuickSend => {
                "Tab: Next field | Enter: New line | Ctrl+S: Send | Ctrl+E: Emoji | Ctrl+F: Add to favorites | Ctrl+V: Paste"
            },
            Self::Favorites => "Tab: Next field | Enter: Add / Use | d/Del: Remove | Up/Down: Select",
            Self::BulkSend => {
                "Ctrl+B: Build | Ctrl+S: Start | Ctrl+P: Pause | Ctrl+X: Clear | Ctrl+L: Load favorites | Ctrl+T: Queue mode"
            }
            Self::Templates => "Up/Down: Select | Enter: Use template",
            Self::NumberCheck => "Enter: Check number | Ctrl+V: Paste",
        }
    }
}
