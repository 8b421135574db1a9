//! Shopping assistant backed by an opaque text-completion service.
//!
//! The completion service is anything implementing [`TextCompletion`]. Its failures never
//! reach the shopper: they are logged and replaced with the configured fallback text.
//! There is no retry, timeout or cancellation.

use crate::config::store::AssistantConfig;
use crate::errors::Result;
use async_trait::async_trait;
use tracing::{debug, error, instrument};

/// A text-completion collaborator: prompt in, text out.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Completes `prompt`, optionally steered by a system instruction.
    async fn complete(&self, prompt: &str, system_instruction: Option<&str>) -> Result<String>;
}

/// Who wrote a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One entry of the conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

/// Chat front for the storefront with a running conversation log.
pub struct Assistant<C> {
    client: C,
    config: AssistantConfig,
    conversation: Vec<ChatMessage>,
}

impl<C: TextCompletion> Assistant<C> {
    pub const fn new(client: C, config: AssistantConfig) -> Self {
        Self {
            client,
            config,
            conversation: Vec::new(),
        }
    }

    /// Conversation so far, oldest first.
    pub fn conversation(&self) -> &[ChatMessage] {
        &self.conversation
    }

    /// Sends a shopper message and records both it and the reply.
    ///
    /// Blank messages are ignored and yield `None`.
    #[instrument(skip(self, message))]
    pub async fn chat(&mut self, message: &str) -> Option<String> {
        if message.trim().is_empty() {
            return None;
        }

        self.conversation.push(ChatMessage {
            speaker: Speaker::User,
            text: message.to_string(),
        });

        let reply = self
            .complete_or_fallback(
                message,
                Some(&self.config.persona),
                &self.config.chat_empty_reply,
                &self.config.chat_error_reply,
            )
            .await;

        self.conversation.push(ChatMessage {
            speaker: Speaker::Assistant,
            text: reply.clone(),
        });
        Some(reply)
    }

    /// Writes marketing copy for a product from its name and feature list.
    #[instrument(skip(self, features))]
    pub async fn describe_product(&self, product_name: &str, features: &str) -> String {
        let prompt = description_prompt(product_name, features);
        self.complete_or_fallback(
            &prompt,
            None,
            &self.config.description_empty_reply,
            &self.config.description_error_reply,
        )
        .await
    }

    async fn complete_or_fallback(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        empty_reply: &str,
        error_reply: &str,
    ) -> String {
        match self.client.complete(prompt, system_instruction).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                debug!("Completion service returned an empty response");
                empty_reply.to_string()
            }
            Err(e) => {
                error!("Completion service error: {}", e);
                error_reply.to_string()
            }
        }
    }
}

/// Prompt asking for an engaging, persuasive product description.
#[must_use]
pub fn description_prompt(product_name: &str, features: &str) -> String {
    format!(
        "Write an engaging, persuasive description for the following product:\n\
         Product name: {product_name}\n\
         Features: {features}\n\
         The description should use a modern marketing style suited to online sales."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::sync::Mutex;

    /// Replays canned results and records the system instruction of each call.
    struct ScriptedCompletion {
        replies: Mutex<Vec<Result<String>>>,
        instructions: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedCompletion {
        fn new(mut replies: Vec<Result<String>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                instructions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextCompletion for ScriptedCompletion {
        async fn complete(
            &self,
            _prompt: &str,
            system_instruction: Option<&str>,
        ) -> Result<String> {
            self.instructions
                .lock()
                .map_err(|_| Error::Completion {
                    message: "poisoned".to_string(),
                })?
                .push(system_instruction.map(str::to_string));
            self.replies
                .lock()
                .map_err(|_| Error::Completion {
                    message: "poisoned".to_string(),
                })?
                .pop()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn failure() -> Result<String> {
        Err(Error::Completion {
            message: "unreachable".to_string(),
        })
    }

    #[tokio::test]
    async fn test_chat_records_conversation() {
        let client = ScriptedCompletion::new(vec![Ok("Cash on delivery, yes!".to_string())]);
        let mut assistant = Assistant::new(client, AssistantConfig::default());

        let reply = assistant.chat("Can I pay on delivery?").await;
        assert_eq!(reply.as_deref(), Some("Cash on delivery, yes!"));

        let log = assistant.conversation();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].speaker, Speaker::User);
        assert_eq!(log[0].text, "Can I pay on delivery?");
        assert_eq!(log[1].speaker, Speaker::Assistant);

        let instructions = assistant.client.instructions.lock().map(|i| i.clone());
        assert_eq!(
            instructions.ok(),
            Some(vec![Some(AssistantConfig::default().persona)])
        );
    }

    #[tokio::test]
    async fn test_chat_ignores_blank_input() {
        let client = ScriptedCompletion::new(vec![]);
        let mut assistant = Assistant::new(client, AssistantConfig::default());

        assert!(assistant.chat("   ").await.is_none());
        assert!(assistant.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_chat_falls_back_on_failure_and_empty_reply() {
        let config = AssistantConfig::default();
        let client = ScriptedCompletion::new(vec![failure(), Ok("  ".to_string())]);
        let mut assistant = Assistant::new(client, config.clone());

        assert_eq!(assistant.chat("hello").await, Some(config.chat_error_reply.clone()));
        assert_eq!(assistant.chat("hello?").await, Some(config.chat_empty_reply.clone()));
        assert_eq!(assistant.conversation().len(), 4);
        assert_eq!(assistant.conversation()[1].text, config.chat_error_reply);
    }

    #[tokio::test]
    async fn test_describe_product() {
        let config = AssistantConfig::default();
        let client = ScriptedCompletion::new(vec![
            Ok("A watch for every wrist.".to_string()),
            failure(),
            Ok(String::new()),
        ]);
        let assistant = Assistant::new(client, config.clone());

        assert_eq!(
            assistant.describe_product("Smart Watch", "GPS").await,
            "A watch for every wrist."
        );
        assert_eq!(
            assistant.describe_product("Smart Watch", "GPS").await,
            config.description_error_reply
        );
        assert_eq!(
            assistant.describe_product("Smart Watch", "GPS").await,
            config.description_empty_reply
        );
        // Descriptions are not part of the chat log and carry no persona
        assert!(assistant.conversation().is_empty());
        let instructions = assistant.client.instructions.lock().map(|i| i.clone());
        assert_eq!(instructions.ok(), Some(vec![None, None, None]));
    }

    #[test]
    fn test_description_prompt_mentions_inputs() {
        let prompt = description_prompt("Earbuds", "noise cancelling");
        assert!(prompt.contains("Earbuds"));
        assert!(prompt.contains("noise cancelling"));
    }
}
