//! Line-by-line record processing
//!
//! Each input line is parsed into the supplied record, reported, and the
//! report is written to the sink before the next line is read. Lines that
//! cannot be parsed or reported are logged and skipped; only failures of the
//! sink itself abort the run.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

use crate::error::{ErrorSeverity, ParseError, Result, StepTrackError};
use crate::models::RecordMetrics;
use crate::records::ActivityRecord;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Multi-line text block per record, separated by blank lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Outcome counts for one processing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProcessSummary {
    /// Lines seen
    pub total: usize,
    /// Lines that produced a report
    pub reported: usize,
    /// Lines that could not be parsed
    pub parse_failures: usize,
    /// Lines that parsed but could not be reported
    pub compute_failures: usize,
}

impl ProcessSummary {
    pub fn skipped(&self) -> usize {
        self.parse_failures + self.compute_failures
    }
}

enum Rendered {
    Text(String),
    Json(RecordMetrics),
}

/// Process lines in order, writing one report per valid record to `sink`
pub fn process_lines<I, W>(
    lines: I,
    record: &mut dyn ActivityRecord,
    sink: &mut W,
    format: OutputFormat,
) -> Result<ProcessSummary>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    W: Write + ?Sized,
{
    let mut summary = ProcessSummary::default();

    for (index, line) in lines.into_iter().enumerate() {
        process_line(
            Ok(line.as_ref()),
            index + 1,
            record,
            sink,
            format,
            &mut summary,
        )?;
    }

    finish(summary, sink)
}

/// Read lines from `reader` and process each one as soon as it is read
///
/// A line that is not valid UTF-8 is counted as a parse failure and skipped.
pub fn process_reader<R, W>(
    reader: R,
    record: &mut dyn ActivityRecord,
    sink: &mut W,
    format: OutputFormat,
) -> Result<ProcessSummary>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut summary = ProcessSummary::default();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let mut raw = raw?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }

        let decoded = String::from_utf8(raw)
            .map_err(|err| ParseError::Format(format!("line is not valid UTF-8: {}", err)));
        process_line(
            decoded.as_deref(),
            index + 1,
            record,
            sink,
            format,
            &mut summary,
        )?;
    }

    finish(summary, sink)
}

fn process_line<W>(
    line: std::result::Result<&str, &ParseError>,
    line_number: usize,
    record: &mut dyn ActivityRecord,
    sink: &mut W,
    format: OutputFormat,
    summary: &mut ProcessSummary,
) -> Result<()>
where
    W: Write + ?Sized,
{
    summary.total += 1;

    let parsed = match line {
        Ok(line) => record.parse(line),
        Err(err) => Err(err.clone()),
    };
    if let Err(err) = parsed {
        summary.parse_failures += 1;
        log_skipped(line_number, record.kind_name(), &err.into());
        return Ok(());
    }

    let rendered = match format {
        OutputFormat::Text => record.report().map(Rendered::Text),
        OutputFormat::Json => record.metrics().map(Rendered::Json),
    };

    match rendered {
        Ok(Rendered::Text(text)) => writeln!(sink, "{}", text)?,
        Ok(Rendered::Json(metrics)) => {
            serde_json::to_writer(&mut *sink, &metrics)?;
            writeln!(sink)?;
        }
        Err(err) => {
            summary.compute_failures += 1;
            log_skipped(line_number, record.kind_name(), &err.into());
            return Ok(());
        }
    }

    summary.reported += 1;
    tracing::trace!(line = line_number, record = record.kind_name(), "Record reported");
    Ok(())
}

fn finish<W>(summary: ProcessSummary, sink: &mut W) -> Result<ProcessSummary>
where
    W: Write + ?Sized,
{
    sink.flush()?;

    tracing::info!(
        total = summary.total,
        reported = summary.reported,
        parse_failures = summary.parse_failures,
        compute_failures = summary.compute_failures,
        "Processing finished"
    );

    Ok(summary)
}

fn log_skipped(line_number: usize, record_kind: &str, error: &StepTrackError) {
    match error.severity() {
        ErrorSeverity::Critical | ErrorSeverity::Error => tracing::error!(
            line = line_number,
            record = record_kind,
            "{}",
            error.user_message()
        ),
        ErrorSeverity::Warning | ErrorSeverity::Info => tracing::warn!(
            line = line_number,
            record = record_kind,
            "{}",
            error.user_message()
        ),
    }
}
