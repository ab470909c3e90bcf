/// What a single rule invocation returns: pass/fail plus its diagnostic messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub success: bool,
    pub messages: Vec<String>,
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            success: true,
            messages: Vec::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            messages: vec![message.into()],
        }
    }

    /// Build an outcome that fails iff any message was collected.
    pub fn from_messages(messages: Vec<String>) -> Self {
        Self {
            success: messages.is_empty(),
            messages,
        }
    }

    /// Record a violation.
    pub fn violation(&mut self, message: impl Into<String>) {
        self.success = false;
        self.messages.push(message.into());
    }
}
