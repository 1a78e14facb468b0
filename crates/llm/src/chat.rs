use std::sync::Arc;

use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message};

/// Placeholder in the template that gets replaced with the document chunks.
const CONTEXT_PLACEHOLDER: &str = "<<<context>>>";
/// Placeholder in the template that gets replaced with the user's message.
const QUESTION_PLACEHOLDER: &str = "<<<question>>>";

/// Sent as the system instruction with every question.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant answering questions about an \
uploaded PDF document. Use only the document excerpts in the prompt. If the answer is not in \
the excerpts, say so.";

const PROMPT_TEMPLATE: &str = "\
Context:
<<<context>>>

Question:
<<<question>>>

Answer:";

/// Answers questions about a document by prompting an LLM with its chunks.
pub struct PdfChat {
    provider: Arc<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("document has no extracted content")]
    EmptyContext,
    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl PdfChat {
    pub fn new(provider: Arc<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    /// Build from config, creating the Gemini provider.
    pub fn from_config(llm_config: &pdfchat_core::config::LlmConfig) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(llm_config)?;
        Ok(Self::new(provider, llm_config.temperature, llm_config.max_tokens))
    }

    /// Combine the chunks (as context) and the user message (as the question)
    /// into a single prompt.
    pub fn build_prompt(chunks: &[String], message: &str) -> String {
        // Substitute the question first so a chunk containing the question
        // placeholder text can't pull the message into the context.
        PROMPT_TEMPLATE
            .replace(QUESTION_PLACEHOLDER, message)
            .replacen(CONTEXT_PLACEHOLDER, &chunks.join("\n\n"), 1)
    }

    /// Send one prompt under the system instruction and return the completion unchanged.
    pub async fn generate(&self, prompt: String) -> Result<String, LlmError> {
        let messages = vec![Message::system(SYSTEM_INSTRUCTION), Message::user(prompt)];
        self.provider
            .complete(messages, self.temperature, self.max_tokens)
            .await
    }

    /// Ask a question about a document given its chunks. No retries.
    pub async fn ask(&self, chunks: &[String], message: &str) -> Result<String, ChatError> {
        if chunks.is_empty() {
            return Err(ChatError::EmptyContext);
        }

        let prompt = Self::build_prompt(chunks, message);
        info!(
            chunks = chunks.len(),
            prompt_chars = prompt.chars().count(),
            "Asking LLM"
        );

        let response = self.generate(prompt).await?;
        debug!("LLM response: {}", response);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::provider::Role;

    /// Records every prompt and answers with a canned response.
    struct RecordingProvider {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingProvider {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self { reply: Ok(text.into()), prompts: Mutex::new(Vec::new()) })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { reply: Err(()), prompts: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        async fn complete(
            &self,
            messages: Vec<Message>,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            assert_eq!(messages.len(), 2);
            assert!(matches!(messages[0].role, Role::System));
            assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
            assert!(matches!(messages[1].role, Role::User));
            self.prompts.lock().unwrap().push(messages[1].content.clone());
            self.reply.clone().map_err(|_| LlmError::Timeout)
        }
    }

    #[test]
    fn prompt_contains_context_then_question() {
        let chunks = vec!["Chunk 1".to_string(), "Chunk 2".to_string()];
        let prompt = PdfChat::build_prompt(&chunks, "Test question");

        let ctx = prompt.find("Chunk 1\n\nChunk 2").expect("context present");
        let q = prompt.find("Test question").expect("question present");
        assert!(ctx < q);
        assert!(!prompt.contains(CONTEXT_PLACEHOLDER));
        assert!(!prompt.contains(QUESTION_PLACEHOLDER));
    }

    #[test]
    fn placeholders_inside_chunks_are_left_alone() {
        let chunks = vec![format!("literal {QUESTION_PLACEHOLDER} in text")];
        let prompt = PdfChat::build_prompt(&chunks, "real question");
        assert!(prompt.contains(&format!("literal {QUESTION_PLACEHOLDER} in text")));
        assert_eq!(prompt.matches("real question").count(), 1);
    }

    #[tokio::test]
    async fn ask_single_chunk_returns_completion_unchanged() {
        let provider = RecordingProvider::replying("Mock response");
        let chat = PdfChat::new(provider.clone(), 0.2, 256);

        let chunks = vec!["This is a test chunk.".to_string()];
        let response = chat.ask(&chunks, "Test question").await.unwrap();

        assert_eq!(response, "Mock response");
        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("This is a test chunk."));
    }

    #[tokio::test]
    async fn ask_multiple_chunks_sends_one_prompt() {
        let provider = RecordingProvider::replying("Mock response");
        let chat = PdfChat::new(provider.clone(), 0.2, 256);

        let chunks = vec!["Chunk 1".to_string(), "Chunk 2".to_string()];
        assert_eq!(chat.ask(&chunks, "Test question").await.unwrap(), "Mock response");
        assert_eq!(provider.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_context_never_reaches_the_provider() {
        let provider = RecordingProvider::replying("unused");
        let chat = PdfChat::new(provider.clone(), 0.2, 256);

        let err = chat.ask(&[], "anything").await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyContext));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_errors_propagate_verbatim() {
        let provider = RecordingProvider::failing();
        let chat = PdfChat::new(provider.clone(), 0.2, 256);

        let err = chat.ask(&["ctx".to_string()], "q").await.unwrap_err();
        assert_eq!(err.to_string(), "Gemini API request timed out.");
        assert!(matches!(err, ChatError::Llm(ref e) if e.is_timeout()));
        // No retry on failure.
        assert_eq!(provider.prompts.lock().unwrap().len(), 1);
    }
}
