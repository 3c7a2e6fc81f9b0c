// src/parse/mod.rs
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strips one layer of surrounding double quotes from a field.
static EDGE_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"|"$"#).expect("regex should parse"));

/// One parsed data row: string-keyed cells plus a synthetic id derived from
/// the row's position within the parse (the source data has no stable key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: usize,
    pub fields: HashMap<String, String>,
}

impl Record {
    /// Cell value for `name`, or `""` when the column is absent.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Header names plus the ordered records produced by one parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Parse comma-delimited text with optionally quoted fields.
///
/// The first non-blank line is the header; every later line maps positionally
/// onto the header names. Short rows pad missing trailing cells with `""`,
/// cells beyond the header are dropped, and rows that are empty after
/// trimming are skipped. Malformed quoting (an odd number of quotes in a
/// line) is not detected; the splitter degrades to treating the rest of the
/// line as quoted, which may mis-split.
pub fn parse(text: &str) -> ParsedTable {
    let lines: Vec<&str> = text
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let Some((first, rest)) = lines.split_first() else {
        return ParsedTable::default();
    };

    let headers: Vec<String> = split_fields(first)
        .into_iter()
        .enumerate()
        .map(|(j, h)| if h.is_empty() { format!("col_{}", j) } else { h })
        .collect();

    let mut records = Vec::new();
    for line in rest {
        let cells = split_fields(line);
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }

        let mut fields = HashMap::with_capacity(headers.len());
        for (j, name) in headers.iter().enumerate() {
            let value = cells.get(j).cloned().unwrap_or_default();
            fields.insert(name.clone(), value);
        }

        records.push(Record {
            id: records.len(),
            fields,
        });
    }

    ParsedTable { headers, records }
}

/// Split one line on commas that are not enclosed in double quotes, then trim
/// each field and strip its surrounding quotes.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
        .into_iter()
        .map(|f| EDGE_QUOTES.replace_all(f.trim(), "").trim().to_string())
        .collect()
}
