//! Extract command implementation.
//!
//! Replays a saved provider reply through the extractor, without any
//! provider configuration.

use super::read_input;
use crate::cli::{ExtractArgs, ExtractKind};
use crate::error::Result;
use crate::output::Formatter;
use mentor_extractor::{extract_plain_text, extract_review, extract_string_array};

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, formatter: &Formatter) -> Result<String> {
    let raw = read_input(args.input.as_deref())?;

    match args.kind {
        ExtractKind::Object => formatter.review(&extract_review(&raw)),
        ExtractKind::Array => formatter.questions(&extract_string_array(&raw)),
        ExtractKind::Text => formatter.text(&extract_plain_text(&raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn run(kind: ExtractKind, contents: &str) -> String {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        let args = ExtractArgs {
            kind,
            input: Some(file.path().to_path_buf()),
        };
        execute_extract(args, &Formatter::new(OutputFormat::Json, false)).unwrap()
    }

    #[test]
    fn test_extract_truncated_object() {
        let output = run(
            ExtractKind::Object,
            r#"{"overall_score": 61, "issues": [{"type":"bug","description":"off by one","solution":"<="}, {"ty"#,
        );
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["overall_score"], 61);
        assert_eq!(value["issues"][0]["type"], "bug");
    }

    #[test]
    fn test_extract_array() {
        let output = run(ExtractKind::Array, "```json\n[\"One?\", \"Two?\"]\n```");
        assert_eq!(serde_json::from_str::<Vec<String>>(&output).unwrap(), vec!["One?", "Two?"]);
    }

    #[test]
    fn test_extract_text() {
        let output = run(ExtractKind::Text, "  Think about the base case.  ");
        assert_eq!(output, "\"Think about the base case.\"");
    }
}
