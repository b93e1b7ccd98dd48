//! Text and JSON rendering of conversion reports.

use clap::ValueEnum;
use resbridge::{ConversionReport, RunSummary, ToolOutcome};

/// How run results are printed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render the result of a `convert` run.
pub fn render_summary(
    summary: &RunSummary,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(summary);
    }

    let mut out = String::new();
    for language in &summary.languages {
        let label = if language.raw_tag == language.locale {
            language.locale.clone()
        } else {
            format!("{} ({})", language.locale, language.raw_tag)
        };
        out.push_str(&format!("✅ {}\n", label));
        push_conversion(&mut out, &language.conversion);
    }
    if let Some(line) = outcome_line("Project generator", &summary.project_generator) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!(
        "=== Summary ===\nLanguages: {}\nStrings: {}\nPlural groups: {}\n",
        summary.languages.len(),
        summary.total_strings(),
        summary.total_plural_groups()
    ));
    Ok(out)
}

/// Render the result of a `convert-file` run.
pub fn render_conversion(
    report: &ConversionReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(report);
    }
    let mut out = String::from("✅ Successfully converted\n");
    push_conversion(&mut out, report);
    Ok(out)
}

fn push_conversion(out: &mut String, report: &ConversionReport) {
    out.push_str(&format!(
        "   {} ({} strings)\n",
        report.strings_path.display(),
        report.strings
    ));
    if let Some(plurals_path) = &report.plurals_path {
        out.push_str(&format!(
            "   {} ({} plural groups)\n",
            plurals_path.display(),
            report.plural_groups
        ));
    }
    if report.skipped_elements > 0 {
        out.push_str(&format!(
            "   {} unsupported elements skipped\n",
            report.skipped_elements
        ));
    }
    if let Some(line) = outcome_line("   Canonicalizer", &report.canonicalizer) {
        out.push_str(&line);
        out.push('\n');
    }
}

fn outcome_line(label: &str, outcome: &ToolOutcome) -> Option<String> {
    match outcome {
        ToolOutcome::Skipped => None,
        ToolOutcome::Succeeded => Some(format!("{}: ok", label)),
        ToolOutcome::Failed { exit_code, stderr } => {
            let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
            if stderr.is_empty() {
                Some(format!("⚠️  {}: failed ({})", label.trim_start(), code))
            } else {
                Some(format!("⚠️  {}: failed ({}): {}", label.trim_start(), code, stderr))
            }
        }
        ToolOutcome::SpawnFailed { message } => {
            Some(format!("⚠️  {}: could not start: {}", label.trim_start(), message))
        }
    }
}
