use crate::models::Message;

/// Ordered conversation transcript. Element 0 is always the current system
/// message; the budget loop never evicts it. Entries are removed whole,
/// never edited.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new(system: Message) -> Self {
        Self {
            messages: vec![system],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove the oldest non-system entry, preserving the relative order of
    /// the rest. Returns false once only the system message remains.
    pub fn evict_oldest(&mut self) -> bool {
        if self.messages.len() > 1 {
            self.messages.remove(1);
            true
        } else {
            false
        }
    }

    /// Replace the whole transcript with a fresh system message.
    pub fn reset(&mut self, system: Message) {
        self.messages = vec![system];
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
