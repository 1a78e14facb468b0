pub mod chat;
pub mod provider;
pub mod providers;

pub use chat::{ChatError, PdfChat};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::gemini::GeminiProvider;
