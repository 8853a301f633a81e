//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use mentor_domain::{ChatResponse, ReviewResult, Severity};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format a code review.
    pub fn review(&self, review: &ReviewResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(review),
            OutputFormat::Text => Ok(self.review_text(review)),
        }
    }

    fn review_text(&self, review: &ReviewResult) -> String {
        let mut out = Vec::new();

        out.push(format!(
            "{}  {}",
            self.score("Overall", review.overall_score),
            self.score("Readability", review.readability_score)
        ));
        out.push(String::new());
        out.push(review.interviewer_feedback.clone());

        if !review.issues.is_empty() {
            out.push(String::new());
            out.push(self.issues_table(review));
        }

        if !review.suggestions.is_empty() {
            out.push(String::new());
            out.push(self.colorize("Suggestions:", "cyan"));
            for s in &review.suggestions {
                out.push(format!("  - [{}/{}] {}", s.category, s.priority, s.description));
                if !s.example.is_empty() {
                    out.push(format!("      {}", s.example));
                }
            }
        }

        let c = &review.complexity;
        out.push(String::new());
        out.push(format!("Time: {}  Space: {}", c.time_complexity, c.space_complexity));
        if c.can_optimize {
            out.push(format!("Can optimize: {}", c.optimized_approach));
        }
        out.push(format!("Tests: {}", review.test_coverage));

        if !review.follow_up_questions.is_empty() {
            out.push(String::new());
            out.push(self.list(&review.follow_up_questions));
        }

        out.join("\n")
    }

    fn issues_table(&self, review: &ReviewResult) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Line", "Type", "Severity", "Description", "Solution"]);

        for issue in &review.issues {
            let line = issue.line_number.map(|n| n.to_string()).unwrap_or_default();
            let severity = self.severity(issue.severity);
            builder.push_record([
                line.as_str(),
                issue.kind.as_str(),
                severity.as_str(),
                issue.description.as_str(),
                issue.solution.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a list of questions.
    pub fn questions(&self, questions: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(questions),
            OutputFormat::Text => Ok(self.list(questions)),
        }
    }

    /// Format a plain-text answer such as a hint.
    pub fn text(&self, text: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(text),
            OutputFormat::Text => Ok(text.to_string()),
        }
    }

    /// Format a chat reply.
    pub fn chat(&self, response: &ChatResponse) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(response),
            OutputFormat::Text => {
                let mut out = if response.success {
                    response.message.clone()
                } else {
                    self.error(&response.message)
                };
                if !response.suggestions.is_empty() {
                    out.push_str("\n\n");
                    out.push_str(&self.list(&response.suggestions));
                }
                Ok(out)
            }
        }
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    fn list(&self, items: &[String]) -> String {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn score(&self, label: &str, score: u8) -> String {
        let color = match score {
            80..=100 => "green",
            50..=79 => "yellow",
            _ => "red",
        };
        format!("{}: {}", label, self.colorize(&format!("{}/100", score), color))
    }

    fn severity(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::Critical | Severity::High => "red",
            Severity::Medium => "yellow",
            Severity::Low => "blue",
        };
        self.colorize(severity.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
