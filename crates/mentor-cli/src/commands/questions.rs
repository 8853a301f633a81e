//! Questions command implementation.

use super::read_code;
use crate::cli::QuestionsArgs;
use crate::error::Result;
use crate::output::Formatter;
use mentor_domain::LlmProvider;
use mentor_service::AiService;

/// Execute the questions command.
pub async fn execute_questions<P>(
    args: QuestionsArgs,
    service: &AiService<P>,
    formatter: &Formatter,
) -> Result<String>
where
    P: LlmProvider + 'static,
{
    let code = read_code(args.code.input.as_deref())?;
    let questions = service
        .interviewer_questions(&code, &args.challenge.to_challenge(), &args.progress)
        .await;
    formatter.questions(&questions)
}
