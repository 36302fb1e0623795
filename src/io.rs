//! Catalog input and plan output.
//!
//! The catalog is a delimited text table with a header row:
//!
//! ```text
//! id,category,quantity,weight[,priority]
//! ```
//!
//! Rows that cannot be parsed are skipped with a warning. A missing or
//! empty priority column falls back to [`PriorityRules`].

use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::ga::GenerationRecord;
use crate::models::{Brick, PriorityRules, ScheduleGrid};

/// Parses a catalog table.
///
/// The first non-blank line is the header and is skipped. Quantities may be
/// written as integral floats (`12.0`).
///
/// # Example
///
/// ```
/// use brick_schedule::io::parse_catalog;
/// use brick_schedule::models::PriorityRules;
///
/// let text = "id,category,quantity,weight\n1,ZD-230,12,55.5\n2,QX-65,4,120\n";
/// let catalog = parse_catalog(text, ',', &PriorityRules::default());
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog[0].priority, 0);
/// assert_eq!(catalog[1].priority, 2);
/// ```
pub fn parse_catalog(text: &str, delimiter: char, rules: &PriorityRules) -> Vec<Brick> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    lines.next();

    let mut catalog = Vec::new();
    for (index, line) in lines {
        match parse_row(line, delimiter, rules) {
            Some(brick) => catalog.push(brick),
            None => warn!(line = index + 1, row = line, "skipping malformed catalog row"),
        }
    }
    catalog
}

fn parse_row(line: &str, delimiter: char, rules: &PriorityRules) -> Option<Brick> {
    let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
    if fields.len() < 4 {
        return None;
    }

    let id = fields[0].parse::<u32>().ok()?;
    let category = fields[1];
    if category.is_empty() {
        return None;
    }
    let quantity = parse_quantity(fields[2])?;
    let weight = fields[3].parse::<f64>().ok()?;

    let brick = Brick::new(id, category, quantity, weight).with_rules(rules);
    match fields.get(4).copied().filter(|s| !s.is_empty()) {
        Some(priority) => Some(brick.with_priority(priority.parse().ok()?)),
        None => Some(brick),
    }
}

fn parse_quantity(field: &str) -> Option<u32> {
    if let Ok(q) = field.parse::<u32>() {
        return Some(q);
    }
    let q = field.parse::<f64>().ok()?;
    (q >= 0.0 && q.fract() == 0.0 && q <= u32::MAX as f64).then_some(q as u32)
}

/// Reads and parses a catalog file.
///
/// # Errors
///
/// `Io` if the file cannot be read.
pub fn read_catalog(
    path: impl AsRef<Path>,
    delimiter: char,
    rules: &PriorityRules,
) -> Result<Vec<Brick>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_catalog(&text, delimiter, rules))
}

/// Writes one row per brick type with its daily totals.
///
/// Columns are `id,category,quantity,weight,priority,day_1..day_N` where
/// `N` is the grid's `actual_days`. Each day cell sums every slot of that
/// day; days without production are left empty.
pub fn write_plan_table<W: Write>(
    writer: &mut W,
    grid: &ScheduleGrid,
    catalog: &[Brick],
) -> Result<()> {
    let days = grid.actual_days();

    write!(writer, "id,category,quantity,weight,priority")?;
    for day in 1..=days {
        write!(writer, ",day_{day}")?;
    }
    writeln!(writer)?;

    for (ty, brick) in catalog.iter().enumerate() {
        write!(
            writer,
            "{},{},{},{},{}",
            brick.id, brick.category, brick.quantity, brick.weight, brick.priority
        )?;
        for day in 0..days {
            match grid.day_total_for_type(day, ty) {
                0 => write!(writer, ",")?,
                total => write!(writer, ",{total}")?,
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes the best-of-generation history as `generation,best_fitness,actual_days`.
pub fn write_progress_log<W: Write>(writer: &mut W, history: &[GenerationRecord]) -> Result<()> {
    writeln!(writer, "generation,best_fitness,actual_days")?;
    for record in history {
        writeln!(
            writer,
            "{},{},{}",
            record.generation, record.best_fitness, record.actual_days
        )?;
    }
    Ok(())
}
