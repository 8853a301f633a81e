//! Command implementations.
//!
//! Each command returns its rendered output; `main` prints it.

pub mod chat;
pub mod extract;
pub mod hint;
pub mod questions;
pub mod review;

pub use self::chat::execute_chat;
pub use self::extract::execute_extract;
pub use self::hint::execute_hint;
pub use self::questions::execute_questions;
pub use self::review::{execute_prompt, execute_review};

use crate::cli::Command;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use mentor_llm::AnyProvider;
use mentor_service::AiService;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Run one command and return its rendered output.
///
/// The provider is only built for commands that talk to one.
pub async fn run_command(command: Command, config: &Config, formatter: &Formatter) -> Result<String> {
    let service = || -> Result<AiService<AnyProvider>> {
        let provider = AnyProvider::from_config(config.llm.clone())?;
        Ok(AiService::new(provider, config.service.clone()))
    };

    match command {
        Command::Review(args) => execute_review(args, &service()?, formatter).await,
        Command::Questions(args) => execute_questions(args, &service()?, formatter).await,
        Command::Hint(args) => execute_hint(args, &service()?, formatter).await,
        Command::Chat(args) => execute_chat(args, &service()?, formatter).await,
        Command::Prompt(args) => execute_prompt(args, &service()?),
        Command::Extract(args) => execute_extract(args, formatter),
    }
}

/// Read a file, or stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Read candidate code, rejecting empty input.
pub(crate) fn read_code(path: Option<&Path>) -> Result<String> {
    let code = read_input(path)?;
    if code.trim().is_empty() {
        return Err(CliError::InvalidInput("No code provided".to_string()));
    }
    Ok(code)
}
