//! Table rendering for CLI output using comfy-table.
//!
//! | Command | Table Function |
//! |---------|----------------|
//! | `whisker search` | `render_hits_table()` |
//! | `whisker list` | `render_items_table()` |
//! | `whisker seed --categories` | `render_categories_table()` |

use comfy_table::presets::NOTHING;
use comfy_table::{Cell, CellAlignment, ColumnConstraint, Table, Width};

use whisker_core::{Item, SearchHit};

use super::format::{format_relative_time, short_id, truncate_str};

/// Narrowest fact column before text is no longer truncated to fit.
const MIN_FACT_WIDTH: usize = 30;

/// Seed category row for `whisker seed --categories`.
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub name: String,
    pub facts: usize,
    pub description: String,
}

fn fact_width(terminal_width: usize, fixed: usize) -> usize {
    terminal_width.saturating_sub(fixed).max(MIN_FACT_WIDTH)
}

/// Render ranked search hits.
///
/// ```text
/// #   SCORE   ID         FACT
/// 1   0.412   3f9a01c2   Cats sleep 12 to 16 hours a day...
/// ```
pub fn render_hits_table(hits: &[SearchHit], terminal_width: usize) -> String {
    if hits.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(vec![
        Cell::new("#").set_alignment(CellAlignment::Right),
        Cell::new("SCORE").set_alignment(CellAlignment::Right),
        Cell::new("ID"),
        Cell::new("FACT"),
    ]);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(3)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
    ]);

    let width = fact_width(terminal_width, 26);
    for (rank, hit) in hits.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", hit.score)).set_alignment(CellAlignment::Right),
            Cell::new(short_id(&hit.item.id)),
            Cell::new(truncate_str(&hit.item.text, width)),
        ]);
    }

    table.trim_fmt().to_string()
}

/// Render stored facts in insertion order.
///
/// ```text
/// ID         ADDED      TOPIC      FACT
/// 3f9a01c2   just now   sleeping   Cats sleep 12 to 16 hours a day...
/// ```
pub fn render_items_table(items: &[Item], terminal_width: usize) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("ADDED"),
        Cell::new("TOPIC"),
        Cell::new("FACT"),
    ]);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
    ]);

    let width = fact_width(terminal_width, 36);
    for item in items {
        let topic = item
            .metadata
            .get("category")
            .or_else(|| item.metadata.get("query"))
            .map(|t| truncate_str(t, 14))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(short_id(&item.id)),
            Cell::new(format_relative_time(item.created_at)),
            Cell::new(topic),
            Cell::new(truncate_str(&item.text, width)),
        ]);
    }

    table.trim_fmt().to_string()
}

/// Render seed categories with their fact counts.
pub fn render_categories_table(rows: &[CategoryRow]) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(vec![
        Cell::new("CATEGORY"),
        Cell::new("FACTS").set_alignment(CellAlignment::Right),
        Cell::new("DESCRIPTION"),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.name),
            Cell::new(row.facts).set_alignment(CellAlignment::Right),
            Cell::new(&row.description),
        ]);
    }

    table.trim_fmt().to_string()
}
