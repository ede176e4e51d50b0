//! Streaming row reader configured from a file's declared layout.

use std::fs::File;
use std::io::Read;

use crate::error::{DwcaError, Result};

/// Unescape a declared `fieldsTerminatedBy` value to a single byte.
///
/// The descriptor carries the delimiter as an escaped string (`\t` for a
/// tab, never a literal tab character). Anything that does not decode to
/// exactly one ASCII character is a configuration error, surfaced when a
/// reader is requested rather than at archive construction.
pub(crate) fn unescape_delimiter(raw: &str) -> Result<u8> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('\\'), Some(escape), None) => match escape {
            't' => Ok(b'\t'),
            'n' => Ok(b'\n'),
            'r' => Ok(b'\r'),
            '\\' => Ok(b'\\'),
            _ => Err(DwcaError::InvalidDelimiter(format!(
                "unknown escape sequence '\\{}'",
                escape
            ))),
        },
        (Some(ch), None, None) if ch.is_ascii() => Ok(ch as u8),
        _ => Err(DwcaError::InvalidDelimiter(format!(
            "'{}' does not unescape to a single character",
            raw
        ))),
    }
}

/// Interpret a declared `fieldsEnclosedBy` value. Empty means no
/// quoting; otherwise the first ASCII character is the quote.
///
/// Consumed, not validated: unlike the delimiter, a degenerate value
/// never fails the open. A multi-character value quotes with its first
/// character and a non-ASCII value disables quoting, the same
/// take-what-parses handling given to `ignoreHeaderLines`.
pub(crate) fn quote_byte(raw: &str) -> Option<u8> {
    raw.chars().next().filter(char::is_ascii).map(|ch| ch as u8)
}

/// A streaming reader over one tabular data file.
///
/// Rows are returned as-is: variable field counts are accepted, quoting
/// is permissive, and declared header lines are not skipped (that is
/// the caller's responsibility). The reader owns the underlying file
/// handle; dropping it releases the resource on every exit path.
pub struct RowReader<R = File> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
}

impl<R: Read> RowReader<R> {
    pub(crate) fn new(source: R, delimiter: u8, quote: Option<u8>) -> Self {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true);
        match quote {
            Some(q) => {
                builder.quote(q);
            }
            None => {
                builder.quoting(false);
            }
        }

        Self {
            reader: builder.from_reader(source),
            record: csv::StringRecord::new(),
        }
    }

    /// Read the next row; `Ok(None)` at end of data.
    ///
    /// A row-level error does not consume the reader, and the caller
    /// decides whether to continue or drop it.
    pub fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        if self.reader.read_record(&mut self.record)? {
            Ok(Some(self.record.iter().map(|s| s.to_string()).collect()))
        } else {
            Ok(None)
        }
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}
