//! Interchange file (export and import)
//!
//! ```text
//! SEP=;
//! "artist";"title";"date";"category";"status"
//! "Beatles";"Abbey Road";"1969-09-26";"Album";"found"
//! ```
//!
//! Every field is quoted on export, with embedded quotes doubled. The reader
//! also accepts bare fields and ignores blank lines.

use crate::error::{NewsError, NewsResult};
use crate::models::{Classification, InterchangeRow, ReleaseStatus};
use std::io::{BufRead, Write};

/// Field delimiter
pub const DELIMITER: char = ';';

/// First line: delimiter hint for spreadsheet applications
pub const SEPARATOR_LINE: &str = "SEP=;";

/// Column names, in field order
pub const COLUMNS: [&str; 5] = ["artist", "title", "date", "category", "status"];

/// Lines preceding the data rows
const HEADER_LINES: usize = 2;

/// Interchange writer for one destination
///
/// The header pair is written exactly once, before the first row, however
/// many artists are exported into the same destination.
pub struct InterchangeWriter<W: Write> {
    writer: W,
    header_written: bool,
    rows_written: usize,
}

impl<W: Write> InterchangeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            rows_written: 0,
        }
    }

    pub fn header_written(&self) -> bool {
        self.header_written
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Write the separator and column lines unless already written
    pub fn write_header_once(&mut self) -> NewsResult<()> {
        if self.header_written {
            return Ok(());
        }

        writeln!(self.writer, "{}", SEPARATOR_LINE)?;
        writeln!(self.writer, "{}", join_quoted(COLUMNS.iter().copied()))?;
        self.header_written = true;
        Ok(())
    }

    pub fn write_row(&mut self, row: &InterchangeRow) -> NewsResult<()> {
        self.write_header_once()?;

        let fields = [
            row.artist.as_str(),
            row.title.as_str(),
            row.release_date.as_deref().unwrap_or(""),
            row.category.as_str(),
            row.status.as_str(),
        ];
        writeln!(self.writer, "{}", join_quoted(fields.into_iter()))?;
        self.rows_written += 1;
        Ok(())
    }

    /// All of an artist's rows: found, then not-found, then excluded
    pub fn write_classification(
        &mut self,
        artist: &str,
        classification: &Classification,
    ) -> NewsResult<()> {
        self.write_header_once()?;
        for row in classification.to_rows(artist) {
            self.write_row(&row)?;
        }
        Ok(())
    }

    /// Ensure the header exists, flush, and hand back the destination
    pub fn finish(mut self) -> NewsResult<W> {
        self.write_header_once()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn join_quoted<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields
        .map(quote)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Split one line into unquoted fields
fn split_fields(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        let mut field = String::new();

        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => return Err("unterminated quoted field".to_string()),
                }
            }
            match chars.next() {
                None => {
                    fields.push(field);
                    return Ok(fields);
                }
                Some(DELIMITER) => fields.push(field),
                Some(c) => return Err(format!("unexpected '{}' after closing quote", c)),
            }
        } else {
            loop {
                match chars.next() {
                    None => {
                        fields.push(field);
                        return Ok(fields);
                    }
                    Some(DELIMITER) => break,
                    Some(c) => field.push(c),
                }
            }
            fields.push(field);
        }
    }
}

/// Parse one data line; `line_number` is 1-based and used in errors
pub fn parse_row(line: &str, line_number: usize) -> NewsResult<InterchangeRow> {
    let invalid = |reason: String| NewsError::InvalidInterchangeRow {
        line: line_number,
        reason,
    };

    let fields = split_fields(line.trim_end_matches('\r')).map_err(invalid)?;
    let [artist, title, date, category, status]: [String; 5] =
        fields.try_into().map_err(|f: Vec<String>| {
            invalid(format!("expected {} fields, found {}", COLUMNS.len(), f.len()))
        })?;

    let status: ReleaseStatus = status.parse().map_err(invalid)?;

    if artist.is_empty() {
        return Err(invalid("empty artist".to_string()));
    }

    Ok(InterchangeRow {
        artist,
        title,
        release_date: Some(date).filter(|d| !d.is_empty()),
        category,
        status,
    })
}

/// Rows read from an interchange file
#[derive(Debug, Default)]
pub struct ParsedRows {
    pub rows: Vec<InterchangeRow>,
    /// Lines that failed to parse (already logged)
    pub rejected: usize,
}

/// Read every data row, skipping the two header lines and blank lines
///
/// A quoted field may span physical lines; such a record is reassembled
/// with `\n` before parsing. Unparsable rows are logged and counted, never
/// fatal.
pub fn read_rows<R: BufRead>(reader: R) -> NewsResult<ParsedRows> {
    let mut parsed = ParsedRows::default();
    let mut pending: Option<(usize, String)> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if index < HEADER_LINES {
            continue;
        }

        let (start, record) = match pending.take() {
            Some((start, mut record)) => {
                record.push('\n');
                record.push_str(line.trim_end_matches('\r'));
                (start, record)
            }
            None if line.trim().is_empty() => continue,
            None => (index + 1, line),
        };

        if has_open_quote(&record) {
            pending = Some((start, record.trim_end_matches('\r').to_string()));
            continue;
        }
        accept(&mut parsed, &record, start);
    }

    if let Some((start, record)) = pending {
        accept(&mut parsed, &record, start);
    }

    Ok(parsed)
}

fn accept(parsed: &mut ParsedRows, record: &str, line_number: usize) {
    match parse_row(record, line_number) {
        Ok(row) => parsed.rows.push(row),
        Err(e) => {
            tracing::warn!("Skipping row: {}", e);
            parsed.rejected += 1;
        }
    }
}

/// Odd quote count: a quoted field is still open at the end of `record`
fn has_open_quote(record: &str) -> bool {
    record.chars().filter(|&c| c == '"').count() % 2 == 1
}
