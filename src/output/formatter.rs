//! Output formatters: console, JSON, and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{Report, Row, Section};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_row(&self, row: &Row) -> String {
        match row {
            Row::Field { label, value } => format!("  {}: {}\n", label, self.colorize(value, Color::Cyan)),
            Row::Item(text) => format!("  • {}\n", text),
            Row::Note(text) => format!("  {}\n", self.colorize(text, Color::Yellow)),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&report.title(), 1));
        output.push_str(&format!(
            "Generated: {} | Dataset: {} ({} records)\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.dataset,
            report.metadata.records
        ));

        for section in report.sections() {
            output.push_str(&self.format_header(&section.title, 2));
            if section.rows.is_empty() {
                output.push_str(&self.format_row(&Row::Note("none".to_string())));
            }
            for row in &section.rows {
                output.push_str(&self.format_row(row));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn format_section(section: &Section) -> String {
        let mut output = format!("## {}\n\n", section.title);
        if section.rows.is_empty() {
            output.push_str("_none_\n");
        }
        for row in &section.rows {
            match row {
                Row::Field { label, value } => output.push_str(&format!("- **{}:** {}\n", label, value)),
                Row::Item(text) => output.push_str(&format!("- {}\n", text)),
                Row::Note(text) => output.push_str(&format!("> {}\n", text)),
            }
        }
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = format!("# {}\n\n", report.title());

        if self.include_metadata {
            output.push_str(&format!(
                "*Generated {} from `{}` ({} records), version {}*\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.dataset,
                report.metadata.records,
                report.metadata.version
            ));
        }

        for section in report.sections() {
            output.push_str(&Self::format_section(&section));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, base_name: &str, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_report{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportBody;
    use crate::processing::path_finder::BridgeRole;
    use tempfile::TempDir;

    fn report() -> Report {
        Report::new(
            "jobs.csv",
            42,
            ReportBody::BridgeRoles {
                current_role: "QA Engineer".to_string(),
                target_role: "Data Scientist".to_string(),
                bridges: vec![BridgeRole {
                    title: "Python SQL Test Automation Engineer".to_string(),
                    overlap_current: 2,
                    overlap_target: 2,
                }],
            },
        )
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false).format_report(&report()).unwrap();
        assert!(output.contains("Career Path: QA Engineer -> Data Scientist"));
        assert!(output.contains("• Python SQL Test Automation Engineer (shares 2 current, 2 target skills)"));
        assert!(output.contains("42 records"));
    }

    #[test]
    fn test_json_parses_back() {
        let output = JsonFormatter::new(false).format_report(&report()).unwrap();
        let parsed: Report = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, report_with_time(&parsed));
    }

    fn report_with_time(other: &Report) -> Report {
        let mut expected = report();
        expected.metadata.generated_at = other.metadata.generated_at;
        expected
    }

    #[test]
    fn test_markdown_layout() {
        let output = MarkdownFormatter::new(false).format_report(&report()).unwrap();
        assert!(output.starts_with("# Career Path: QA Engineer -> Data Scientist\n"));
        assert!(output.contains("## Bridge Roles"));
        assert!(!output.contains("Generated"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, true, true);
        let json = generator.generate_report(&report(), &OutputFormat::Json).unwrap();
        assert!(json.contains("\"kind\": \"bridge_roles\""));
        let markdown = generator.generate_report(&report(), &OutputFormat::Markdown).unwrap();
        assert!(markdown.contains("Generated"));
    }

    #[test]
    fn test_save_and_filename() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join(suggest_filename(&OutputFormat::Markdown, "gap", false));
        save_report_to_file("# Report", &path).unwrap();

        assert_eq!(path.file_name().unwrap(), "gap_report.md");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report");
    }
}
