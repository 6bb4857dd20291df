//! Phone number helpers
//!
//! The gateway addresses chats as `<digits>@c.us`. User input may contain
//! spaces, dashes, parentheses or a leading `+`; everything but ASCII digits
//! is stripped before use.

/// Suffix appended to a digits-only phone to form a chat identifier
pub const CHAT_ID_SUFFIX: &str = "@c.us";

/// Strip every non-digit character
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Build the gateway chat identifier for a phone number
pub fn chat_id(phone: &str) -> String {
    format!("{}{}", digits_only(phone), CHAT_ID_SUFFIX)
}

/// Parse a newline-separated recipient list
///
/// Blank lines are discarded; every remaining line yields one digits-only
/// entry, in input order.
pub fn parse_recipients(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(digits_only)
        .collect()
}
