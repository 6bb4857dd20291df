//! Built-in message templates

/// A reusable message body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Stable identifier
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Icon shown next to the name
    pub emoji: &'static str,
    /// Accent color (`#RRGGBB`)
    pub color: &'static str,
    /// Short excerpt for the picker
    pub preview: &'static str,
    /// Full text copied into the message field
    pub text: &'static str,
}

impl Template {
    /// Accent color as RGB components
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel =
            |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

const TEMPLATES: [Template; 4] = [
    Template {
        id: 1,
        name: "Welcome",
        emoji: "👋",
        color: "#00D4AA",
        preview: "Hey! Welcome aboard...",
        text: "Hey! 👋 Welcome aboard! We're so excited to have you here. Let us know if you need anything!",
    },
    Template {
        id: 2,
        name: "Thank You",
        emoji: "🙏",
        color: "#FF6B6B",
        preview: "Thank you so much...",
        text: "Thank you so much for your support! 🙏 It really means a lot to us. Have an amazing day! ✨",
    },
    Template {
        id: 3,
        name: "Reminder",
        emoji: "⏰",
        color: "#FFD93D",
        preview: "Quick reminder...",
        text: "Quick reminder! ⏰ Don't forget about our meeting today. See you soon! 🚀",
    },
    Template {
        id: 4,
        name: "Celebration",
        emoji: "🎉",
        color: "#A66CFF",
        preview: "Congratulations...",
        text: "Congratulations! 🎉🎊 You did it! So proud of you! Keep shining! ⭐",
    },
];

/// Emoji offered by the quick send picker
pub const EMOJIS: [&str; 16] = [
    "😀", "😂", "❤️", "🔥", "👍", "🎉", "✨", "💯", "🙏", "😍", "🤔", "👋", "💪", "🚀", "⭐", "🌟",
];

/// All built-in templates, in display order
pub fn all() -> &'static [Template] {
    &TEMPLATES
}

/// Template with `id`
pub fn find(id: u32) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}
