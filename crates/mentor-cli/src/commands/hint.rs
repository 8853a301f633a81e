//! Hint command implementation.

use super::read_code;
use crate::cli::HintArgs;
use crate::error::Result;
use crate::output::Formatter;
use mentor_domain::LlmProvider;
use mentor_service::AiService;

/// Execute the hint command.
pub async fn execute_hint<P>(args: HintArgs, service: &AiService<P>, formatter: &Formatter) -> Result<String>
where
    P: LlmProvider + 'static,
{
    let code = read_code(args.code.input.as_deref())?;
    let hint = service
        .code_hint(&code, &args.challenge.to_challenge(), args.level, &args.context)
        .await?;
    formatter.text(&hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ChallengeArgs, CodeSource};
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use mentor_llm::MockProvider;
    use mentor_service::{ServiceConfig, ServiceError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_invalid_level_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "x := 1").unwrap();

        let args = HintArgs {
            code: CodeSource {
                input: Some(file.path().to_path_buf()),
            },
            challenge: ChallengeArgs {
                title: "Warmup".to_string(),
                id: "warmup".to_string(),
            },
            level: 9,
            context: String::new(),
        };
        let service = AiService::new(MockProvider::default(), ServiceConfig::default());
        let formatter = Formatter::new(OutputFormat::Text, false);

        let result = execute_hint(args, &service, &formatter).await;
        assert!(matches!(
            result,
            Err(CliError::Service(ServiceError::InvalidHintLevel(9)))
        ));
    }
}
