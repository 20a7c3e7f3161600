//! Text redaction adapters.

mod regex_redactor;

pub use regex_redactor::RegexRedactor;
