//! LLM module for recap
//!
//! Wire types for the chat-completions API and the DeepSeek client behind
//! the `LlmProvider` trait.

mod client;
mod deepseek;
mod prompts;

pub use client::{
    build_provider, ChatMessage, CompletionRequest, CompletionResponse, LlmProvider,
    ProviderReply, SUMMARY_MAX_TOKENS, SUMMARY_TEMPERATURE,
};
pub use deepseek::DeepSeekClient;
pub use prompts::{build_summary_prompt, SUMMARY_PROMPT_PREFIX};
