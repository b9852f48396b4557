use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::rates::{Freshness, RateSnapshot};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Value,
    Warning,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned rate cell. Zero rates are unknown and shown as "N/A".
pub fn rate_cell(rate: f64, format_fn: impl Fn(f64) -> String) -> Cell {
    if rate > 0.0 {
        Cell::new(format_fn(rate)).set_alignment(CellAlignment::Right)
    } else {
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right)
    }
}

/// One-line description of where a snapshot's rates came from.
pub fn freshness_line(snapshot: &RateSnapshot) -> String {
    let as_of = snapshot.as_of.map_or("never".to_string(), |ts| {
        ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    });
    match snapshot.freshness {
        Freshness::Fresh | Freshness::Cached => style_text(
            &format!("Rates {} as of {as_of}", snapshot.freshness),
            StyleType::Subtle,
        ),
        Freshness::Stale => style_text(
            &format!("Upstream unavailable, showing stale rates from {as_of}"),
            StyleType::Warning,
        ),
        Freshness::Fallback => style_text(
            "Upstream unavailable, showing approximate built-in rates",
            StyleType::Error,
        ),
    }
}

/// Creates a spinner shown while rates are fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
