use colored::Colorize;
use mockdrive_store::{Content, EntryRecord};

use crate::cli::OutputFormat;
use crate::script::StepOutcome;

/// One-line text form of a record.
pub fn record_line(record: &EntryRecord) -> String {
    if record.is_folder() {
        format!(
            "{} {}  {}",
            format!("{}/", record.name).blue().bold(),
            format!("[{}]", record.id).dimmed(),
            record.modified_at.to_string().dimmed()
        )
    } else {
        format!(
            "{} {} {}  {}",
            record.name,
            format!("[{}]", record.id).dimmed(),
            format!("{} B", record.size.unwrap_or(0)).cyan(),
            record.modified_at.to_string().dimmed()
        )
    }
}

/// Text form of a record: the record itself, then its one-level listing.
pub fn record_text(record: &EntryRecord) -> String {
    let mut lines = vec![record_line(record)];
    lines.extend(record.children().iter().map(|child| format!("  {}", record_line(child))));
    lines.join("\n")
}

fn content_text(content: Option<&Content>) -> String {
    match content {
        Some(Content::Text(text)) => text.clone(),
        Some(Content::Binary(bytes)) => format!("<{} bytes of binary content>", bytes.len()),
        None => "<no content>".dimmed().to_string(),
    }
}

pub fn outcome_text(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Record(record) => record_text(record),
        StepOutcome::Content { id, content } => {
            format!("{} {}", format!("[{id}]").dimmed(), content_text(content.as_ref()))
        }
        StepOutcome::Deleted { id } => format!("{} deleted {}", "✓".green(), id.to_string().yellow()),
    }
}

pub fn render(outcome: &StepOutcome, format: &OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => outcome_text(outcome),
        OutputFormat::Json => serde_json::to_string_pretty(outcome)?,
    })
}
