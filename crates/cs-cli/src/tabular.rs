//! Minimal newline/comma tabular reader (§6): no header row, no quoting, no
//! escaping. Each line is one observation; fields are split on `,` and
//! trimmed. A field that fails to parse as `f64` becomes `NaN`, which the
//! diagnostics gate already treats as a missing observation rather than a
//! parse error — so a ragged input file degrades the tier instead of
//! aborting the run.

/// One parsed line of the tabular input.
#[derive(Debug, Clone)]
pub struct Row {
    pub fields: Vec<String>,
}

impl Row {
    /// Parse the field at `index` as `f64`, returning `NaN` if the column is
    /// missing or unparsable.
    pub fn field_f64(&self, index: usize) -> f64 {
        self.fields
            .get(index)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(f64::NAN)
    }

    /// The field at `index` as a trimmed string slice, or `""` if missing.
    pub fn field_str(&self, index: usize) -> &str {
        self.fields.get(index).map(|s| s.trim()).unwrap_or("")
    }
}

/// Split `contents` into rows, skipping blank lines.
pub fn read_rows(contents: &str) -> Vec<Row> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Row {
            fields: line.split(',').map(|f| f.trim().to_string()).collect(),
        })
        .collect()
}
