//! Console-backed implementations of the UI ports, for headless runs and
//! local development.

use async_trait::async_trait;

use voltdesk_application::{ConfirmRequest, ConfirmationPrompt, Messenger};

/// Messenger that writes messages to the log instead of a UI shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn success(&self, message_key: &str, detail: Option<String>) {
        tracing::info!(message_key, detail = detail.as_deref().unwrap_or_default(), "ok");
    }

    async fn error(&self, message_key: &str, detail: Option<String>) {
        tracing::error!(message_key, detail = detail.as_deref().unwrap_or_default(), "failed");
    }
}

/// Prompt that answers every confirmation the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoPrompt {
    answer: bool,
}

impl AutoPrompt {
    /// Creates a prompt with a fixed answer.
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self { answer }
    }
}

#[async_trait]
impl ConfirmationPrompt for AutoPrompt {
    async fn confirm(&self, request: ConfirmRequest) -> bool {
        tracing::info!(
            title_key = %request.title_key,
            message_key = %request.message_key,
            count = request.count.unwrap_or_default(),
            answer = self.answer,
            "auto-answered confirmation"
        );
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn auto_prompt_returns_its_fixed_answer() {
        let request = ConfirmRequest {
            title_key: "users.assign_transactions_title".to_owned(),
            message_key: "users.assign_transactions_confirm".to_owned(),
            count: Some(3),
        };

        assert!(AutoPrompt::answering(true).confirm(request.clone()).await);
        assert!(!AutoPrompt::answering(false).confirm(request).await);
    }
}
