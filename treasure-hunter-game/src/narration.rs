//! Single-reader mailbox for the messages a town produces.
//!
//! Messages accumulate until the driver drains them. Draining swaps the
//! buffer out and leaves it empty, so each message is delivered once.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mailbox {
    pending: String,
}

impl Mailbox {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: String::new(),
        }
    }

    /// Append a message on its own line. Empty messages are dropped.
    pub fn post(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if message.is_empty() {
            return;
        }
        if !self.pending.is_empty() {
            self.pending.push('\n');
        }
        self.pending.push_str(message);
    }

    /// Discard anything pending and leave only `message`.
    pub fn replace(&mut self, message: impl AsRef<str>) {
        self.pending.clear();
        self.pending.push_str(message.as_ref());
    }

    /// Take everything pending, leaving the mailbox empty.
    pub fn drain(&mut self) -> String {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn peek(&self) -> &str {
        &self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
