//! TextRedactor port - masks user text before it leaves the pipeline.

/// Port for redacting personally identifying fragments from free text.
///
/// Every piece of user text that reaches a log line or an event payload
/// passes through this first. Structured markers (category strings,
/// crisis indicator slugs) bypass it because they never contain user
/// text by construction.
pub trait TextRedactor: Send + Sync {
    /// Returns the text with identifying fragments masked.
    fn redact(&self, text: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn TextRedactor) {}
}
