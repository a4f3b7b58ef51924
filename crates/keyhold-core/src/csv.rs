//! Minimal CSV reading and writing for vault export/import.
//!
//! Only what the `site,username,password` interchange needs: double-quote
//! quoting with `""` escapes. A quoted field may span line breaks.

use crate::error::VaultError;

pub const CSV_HEADER: [&str; 3] = ["site", "username", "password"];

/// Quote a field if it contains a comma, a quote or a line break.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join rows with CRLF, escaping every field.
pub fn write_rows<'a, I, R>(rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = &'a str>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(escape_field).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Split a document into records of fields.
///
/// Records end at LF or CRLF outside quotes. Blank lines are skipped. An
/// unterminated quoted field is an error rather than a silently cut value.
pub fn parse_records(text: &str) -> Result<Vec<Vec<String>>, VaultError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(c),
            }
            continue;
        }

        match c {
            ',' => fields.push(std::mem::take(&mut current)),
            '"' => in_quotes = true,
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => end_record(&mut records, &mut fields, &mut current),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(VaultError::InvalidCsv(
            "unterminated quoted field".to_string(),
        ));
    }
    end_record(&mut records, &mut fields, &mut current);
    Ok(records)
}

fn end_record(records: &mut Vec<Vec<String>>, fields: &mut Vec<String>, current: &mut String) {
    fields.push(std::mem::take(current));
    let record = std::mem::take(fields);
    if !(record.len() == 1 && record[0].is_empty()) {
        records.push(record);
    }
}

/// Column positions of the interchange fields in a header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumns {
    pub site: usize,
    pub username: usize,
    pub password: usize,
}

impl CsvColumns {
    pub fn from_header(header: &[String]) -> Result<Self, VaultError> {
        let names: Vec<String> = header
            .iter()
            .map(|name| name.trim().to_lowercase())
            .collect();
        let position = |wanted: &str| names.iter().position(|name| name == wanted);

        match (position("site"), position("username"), position("password")) {
            (Some(site), Some(username), Some(password)) => Ok(Self {
                site,
                username,
                password,
            }),
            _ => Err(VaultError::InvalidCsv(
                "header must name site, username and password columns".to_string(),
            )),
        }
    }
}
