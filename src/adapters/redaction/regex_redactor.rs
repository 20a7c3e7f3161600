//! Regex-based text redaction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ports::TextRedactor;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d{1,3}[-. (]*\d{3}[-. )]*\d{3}[-. ]*\d{2,4}").expect("phone pattern is valid")
});

// Account numbers, national ids, anything else that reads as a long
// digit run.
static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{6,}").expect("digit run pattern is valid"));

/// Masks emails, phone numbers, and long digit runs before text is
/// logged or embedded in an event payload.
#[derive(Debug, Clone, Default)]
pub struct RegexRedactor;

impl RegexRedactor {
    pub fn new() -> Self {
        Self
    }
}

impl TextRedactor for RegexRedactor {
    fn redact(&self, text: &str) -> String {
        let masked = EMAIL.replace_all(text, "[email]");
        let masked = PHONE.replace_all(&masked, "[phone]");
        DIGIT_RUN.replace_all(&masked, "[number]").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_emails() {
        let redactor = RegexRedactor::new();
        assert_eq!(
            redactor.redact("wrote to sam.doe@example.org today"),
            "wrote to [email] today"
        );
    }

    #[test]
    fn masks_phone_numbers() {
        let redactor = RegexRedactor::new();
        let out = redactor.redact("call me at +1 555 123 4567 later");
        assert!(!out.contains("4567"), "got: {out}");
        assert!(out.contains("[phone]"));
    }

    #[test]
    fn masks_long_digit_runs() {
        let redactor = RegexRedactor::new();
        assert_eq!(
            redactor.redact("account 12345678 overdue"),
            "account [number] overdue"
        );
    }

    #[test]
    fn leaves_ordinary_text_untouched() {
        let redactor = RegexRedactor::new();
        let text = "slept 7 hours, mood a bit low";
        assert_eq!(redactor.redact(text), text);
    }
}
