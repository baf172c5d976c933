//! Lenient CSV decoding — raw delimited text into ordered header→value rows.
//!
//! The dashboard feeds are hand-exported and occasionally sloppy, so the
//! decoder never errors: blank lines vanish, malformed quoting degrades (an
//! unterminated quote swallows the rest of the line into one field), and
//! short rows pad with empty strings.

/// One decoded row: header cell → value cell, in column order.
///
/// Keys are unique per row; lookups walk the columns in order so the first
/// matching column wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    fields: Vec<(String, String)>,
}

impl CsvRow {
    /// Exact-name lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Resolve a logical field through an ordered alias list.
    ///
    /// Each alias is tried exact-case first, then ASCII-case-insensitively,
    /// before moving to the next alias.
    pub fn field(&self, aliases: &[&str]) -> Option<&str> {
        for alias in aliases {
            if let Some(v) = self.get(alias) {
                return Some(v);
            }
            if let Some((_, v)) = self
                .fields
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(alias))
            {
                return Some(v.as_str());
            }
        }
        None
    }

    /// Column names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// (key, value) pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Decode CSV text into rows keyed by the header line.
///
/// The first non-blank line is the header. Missing trailing cells become
/// empty strings; surplus cells beyond the header are dropped. Supports both
/// `\n` and `\r\n` line endings. Empty input yields an empty Vec.
pub fn decode(text: &str) -> Vec<CsvRow> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header: Vec<String> = match lines.next() {
        Some(line) => split_fields(line).iter().map(|c| clean_cell(c)).collect(),
        None => return Vec::new(),
    };

    lines
        .map(|line| {
            let values = split_fields(line);
            let fields = header
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let value = values.get(i).map(|v| clean_cell(v)).unwrap_or_default();
                    (key.clone(), value)
                })
                .collect();
            CsvRow { fields }
        })
        .collect()
}

/// Split one line on commas, honoring a quote-toggle flag. A `"` flips the
/// in-quotes flag (and lands in the buffer for `clean_cell` to strip); a `,`
/// separates fields only outside quotes. The buffer flushes as the final
/// field at line end, so an unterminated quote keeps the rest of the line.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut buf = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                buf.push(ch);
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut buf)),
            _ => buf.push(ch),
        }
    }
    fields.push(buf);
    fields
}

/// Trim, then strip at most one leading and one trailing literal quote.
fn clean_cell(cell: &str) -> String {
    let trimmed = cell.trim();
    let stripped = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let stripped = stripped.strip_suffix('"').unwrap_or(stripped);
    stripped.to_string()
}
