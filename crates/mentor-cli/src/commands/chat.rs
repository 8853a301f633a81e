//! Chat command implementation.

use super::read_input;
use crate::cli::ChatArgs;
use crate::error::Result;
use crate::output::Formatter;
use mentor_domain::{ChatMessage, Challenge, LlmProvider};
use mentor_service::AiService;
use std::fs;

/// Execute the chat command.
pub async fn execute_chat<P>(args: ChatArgs, service: &AiService<P>, formatter: &Formatter) -> Result<String>
where
    P: LlmProvider + 'static,
{
    let history: Vec<ChatMessage> = match &args.history {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    // Chat works without code; never fall back to stdin here.
    let code = match &args.code {
        Some(path) => read_input(Some(path))?,
        None => String::new(),
    };

    let challenge = args
        .title
        .as_deref()
        .map(|title| Challenge::new(title.to_lowercase().replace(' ', "-"), title));

    let response = service
        .chat_with_mentor(&args.message, challenge.as_ref(), &history, &code)
        .await;
    formatter.chat(&response)
}
