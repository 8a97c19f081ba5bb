//! Table and JSON presentation for search results.
//!
//! Thin glue over the record sequence: the table printer implements
//! [`RecordSink`] so the CLI can stream records straight to the terminal
//! without buffering the whole result set.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::record::{PathKind, PathRecord};
use crate::search::{RecordSink, WalkStats};

/// Streams records to stdout as aligned table rows with a summary footer.
pub struct TablePrinter {
    stream: StandardStream,
}

impl TablePrinter {
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            stream: StandardStream::stdout(choice),
        }
    }

    fn print_record(&mut self, record: &PathRecord) -> io::Result<()> {
        let (label, color) = match record.kind {
            PathKind::Folder => ("dir ", Color::Blue),
            PathKind::File => ("file", Color::Green),
        };

        self.stream.set_color(
            ColorSpec::new()
                .set_fg(Some(color))
                .set_bold(record.is_folder()),
        )?;
        write!(self.stream, "{label}")?;
        self.stream.reset()?;

        // Non-matches only appear with return_all; mark them dimly.
        let marker = match record.search_match {
            Some(false) => "!",
            _ => " ",
        };
        writeln!(
            self.stream,
            " {marker} {:>9}  {:>3}y  {:<10} {}",
            format_size(record.size_bytes),
            record.age_years,
            record.owner.as_deref().unwrap_or("-"),
            record.full_path,
        )
    }

    fn print_summary(&mut self, stats: &WalkStats) -> io::Result<()> {
        self.stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true))?;
        writeln!(
            self.stream,
            "\n{} folders, {} files, {} skipped",
            stats.folders, stats.files, stats.skipped
        )?;
        self.stream.reset()
    }
}

impl RecordSink for TablePrinter {
    fn record(&mut self, record: PathRecord) -> io::Result<()> {
        self.print_record(&record)
    }

    fn finish(&mut self, stats: &WalkStats) -> io::Result<()> {
        self.print_summary(stats)
    }
}

/// Print the full record array as pretty JSON on stdout.
pub fn print_json(records: &[PathRecord]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
}

/// Format a byte count as a short human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{bytes}B")
    }
}
