//! Plain-text dataset format.
//!
//! - UTF-8, comma-separated, one example per line
//! - Optional header row (auto-detected: the first row is a header if none of
//!   its cells is a number), e.g. `x1,x2,y` or `arg0,arg1,xor`.  A first row
//!   mixing names and numbers is data, and fails to parse.
//! - The last `output_size` columns are targets, everything before them inputs
//! - Double-quoted fields with embedded commas are handled
use std::io::Write;

use crate::data::{dataset::Dataset, example::Example};
use crate::error::{NetError, Result};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parses dataset text whose last `output_size` columns are targets.
pub fn parse_csv(text: &str, output_size: usize) -> Result<Dataset> {
    if output_size == 0 {
        return Err(NetError::invalid("a dataset needs at least one target column"));
    }

    let mut lines = text.lines().enumerate().peekable();

    if let Some((_, first)) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut examples = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells = parse_csv_row(line);
        if cells.len() < output_size + 1 {
            return Err(NetError::Parse {
                line: line_no,
                message: format!(
                    "expected at least {} columns, got {}",
                    output_size + 1,
                    cells.len()
                ),
            });
        }
        match width {
            None => width = Some(cells.len()),
            Some(w) if w != cells.len() => {
                return Err(NetError::Parse {
                    line: line_no,
                    message: format!("row has {} columns but earlier rows have {}", cells.len(), w),
                });
            }
            Some(_) => {}
        }

        let split = cells.len() - output_size;
        let inputs = parse_floats(&cells[..split], line_no)?;
        let targets = parse_floats(&cells[split..], line_no)?;
        examples.push(Example::new(inputs, targets));
    }

    Dataset::new(examples)
}

/// Writes `dataset` with a `x1,..,xn,y` header (`y1,..,ym` for several targets).
pub fn write_csv<W: Write>(dataset: &Dataset, mut writer: W) -> Result<()> {
    let mut header: Vec<String> = (1..=dataset.input_size()).map(|i| format!("x{i}")).collect();
    if dataset.output_size() == 1 {
        header.push("y".to_string());
    } else {
        header.extend((1..=dataset.output_size()).map(|k| format!("y{k}")));
    }
    writeln!(writer, "{}", header.join(","))?;

    for example in dataset {
        let row: Vec<String> = example.inputs().iter()
            .chain(example.targets())
            .map(|v| format_cell(*v))
            .collect();
        writeln!(writer, "{}", row.join(","))?;
    }

    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Returns `true` if the row looks like a header (no cell is a number).
fn is_header(line: &str) -> bool {
    let cells = parse_csv_row(line);
    cells.iter().any(|c| !c.trim().is_empty())
        && cells.iter().all(|c| c.trim().parse::<f64>().is_err())
}

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Parses cells as finite `f64`; `NaN` and infinities are rejected.
fn parse_floats(cells: &[String], line: usize) -> Result<Vec<f64>> {
    cells.iter()
        .map(|c| match c.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(NetError::Parse {
                line,
                message: format!("'{c}' is not a valid finite number"),
            }),
        })
        .collect()
}

/// Whole numbers are written without a fractional part (`1`, not `1.0`).
fn format_cell(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
