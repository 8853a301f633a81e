//! Review and prompt command implementations.

use super::read_code;
use crate::cli::ReviewArgs;
use crate::error::Result;
use crate::output::Formatter;
use mentor_domain::LlmProvider;
use mentor_service::AiService;

/// Execute the review command.
pub async fn execute_review<P>(args: ReviewArgs, service: &AiService<P>, formatter: &Formatter) -> Result<String>
where
    P: LlmProvider + 'static,
{
    let code = read_code(args.code.input.as_deref())?;
    let challenge = args.challenge.to_challenge();

    if args.raw {
        let reply = service.raw_review_reply(&code, &challenge, &args.context).await?;
        return formatter.text(&reply);
    }

    let review = service.review_code(&code, &challenge, &args.context).await;
    formatter.review(&review)
}

/// Execute the prompt command.
pub fn execute_prompt<P>(args: ReviewArgs, service: &AiService<P>) -> Result<String>
where
    P: LlmProvider + 'static,
{
    let code = read_code(args.code.input.as_deref())?;
    Ok(service.review_prompt(&code, &args.challenge.to_challenge(), &args.context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ChallengeArgs, CodeSource};
    use crate::config::OutputFormat;
    use mentor_llm::MockProvider;
    use mentor_service::ServiceConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(file: &NamedTempFile, raw: bool) -> ReviewArgs {
        ReviewArgs {
            code: CodeSource {
                input: Some(file.path().to_path_buf()),
            },
            challenge: ChallengeArgs {
                title: "Two Sum".to_string(),
                id: "two-sum".to_string(),
            },
            context: String::new(),
            raw,
        }
    }

    fn code_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "func twoSum() {{}}").unwrap();
        file
    }

    #[tokio::test]
    async fn test_review_outputs_json() {
        let file = code_file();
        let service = AiService::new(
            MockProvider::new(r#"{"overall_score": 90, "interviewer_feedback": "Nice"}"#),
            ServiceConfig::default(),
        );
        let formatter = Formatter::new(OutputFormat::Json, false);

        let output = execute_review(args(&file, false), &service, &formatter).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["overall_score"], 90);
    }

    #[tokio::test]
    async fn test_raw_review_skips_extraction() {
        let file = code_file();
        let service = AiService::new(MockProvider::new("not json"), ServiceConfig::default());
        let formatter = Formatter::new(OutputFormat::Text, false);

        let output = execute_review(args(&file, true), &service, &formatter).await.unwrap();
        assert_eq!(output, "not json");
    }

    #[test]
    fn test_prompt_includes_code() {
        let file = code_file();
        let service = AiService::new(MockProvider::default(), ServiceConfig::default());
        let prompt = execute_prompt(args(&file, false), &service).unwrap();
        assert!(prompt.contains("func twoSum() {}"));
        assert!(prompt.contains("CHALLENGE: Two Sum"));
    }
}
