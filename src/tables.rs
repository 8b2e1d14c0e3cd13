use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    api::{
        hotspot::{AvailableDevice, Hotspot, HotspotStats},
        wallet::{EarningsTrendPoint, MonthlyEarnings, Transaction},
    },
    core::signal::SignalQuality,
    quantity::{bandwidth::Gigabytes, tokens::Kxt},
    statistics::AggregatedPoint,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn signal_cell(signal: SignalQuality) -> Cell {
    Cell::new(signal).fg(signal.label.color())
}

pub fn build_hotspots_table(hotspots: &[Hotspot]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("Name"),
        Cell::new("Location"),
        Cell::new("Status"),
        Cell::new("Limit").set_alignment(CellAlignment::Right),
        Cell::new("Signal"),
        Cell::new("Earnings").set_alignment(CellAlignment::Right),
        Cell::new("Since"),
    ]);
    for hotspot in hotspots {
        table.add_row(vec![
            Cell::new(&hotspot.id).add_attribute(Attribute::Dim),
            Cell::new(&hotspot.name),
            Cell::new(hotspot.location.as_deref().unwrap_or("—")),
            Cell::new(hotspot.status).fg(hotspot.status.color()),
            Cell::new(
                hotspot
                    .bandwidth_limit
                    .map_or_else(|| "—".to_owned(), |limit| format!("{limit} Mbps")),
            )
            .set_alignment(CellAlignment::Right),
            signal_cell(hotspot.signal()),
            Cell::new(hotspot.earnings).set_alignment(CellAlignment::Right),
            Cell::new(
                hotspot
                    .created_at
                    .map_or_else(|| "—".to_owned(), |at| at.format("%Y-%m-%d").to_string()),
            )
            .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

/// Aggregated stats with a grand total at the bottom.
pub fn build_aggregated_stats_table(points: &[AggregatedPoint]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Period"),
        Cell::new("Bandwidth").set_alignment(CellAlignment::Right),
        Cell::new("Earnings").set_alignment(CellAlignment::Right),
    ]);
    for point in points {
        table.add_row(vec![
            Cell::new(&point.period),
            Cell::new(point.bandwidth_used).set_alignment(CellAlignment::Right),
            Cell::new(point.earnings).set_alignment(CellAlignment::Right).fg(Color::Green),
        ]);
    }
    let total_bandwidth: Gigabytes = points.iter().map(|point| point.bandwidth_used).sum();
    let total_earnings: Kxt = points.iter().map(|point| point.earnings).sum();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(total_bandwidth).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        Cell::new(total_earnings)
            .set_alignment(CellAlignment::Right)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_hotspot_stats_table(stats: &HotspotStats) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Period"),
        Cell::new("Bandwidth").set_alignment(CellAlignment::Right),
        Cell::new("Earnings").set_alignment(CellAlignment::Right),
    ]);
    for point in &stats.stats {
        table.add_row(vec![
            Cell::new(point.period()),
            Cell::new(point.bandwidth_used).set_alignment(CellAlignment::Right),
            Cell::new(point.earnings).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_devices_table(devices: &[AvailableDevice]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Setup code", "Name", "Model", "Signal"]);
    for device in devices {
        table.add_row(vec![
            Cell::new(&device.setup_code).add_attribute(Attribute::Bold),
            Cell::new(device.name.as_deref().unwrap_or("—")),
            Cell::new(device.model.as_deref().unwrap_or("—")).add_attribute(Attribute::Dim),
            signal_cell(device.signal_strength.into()),
        ]);
    }
    table
}

pub fn build_transactions_table(transactions: &[Transaction]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("Date"),
        Cell::new("Type"),
        Cell::new("Amount").set_alignment(CellAlignment::Right),
        Cell::new("Status"),
        Cell::new("Description"),
    ]);
    for transaction in transactions {
        table.add_row(vec![
            Cell::new(&transaction.id).add_attribute(Attribute::Dim),
            Cell::new(transaction.created_at.format("%b %d %H:%M")).add_attribute(Attribute::Dim),
            Cell::new(transaction.kind).fg(transaction.kind.color()),
            Cell::new(transaction.amount).set_alignment(CellAlignment::Right),
            Cell::new(&transaction.status),
            Cell::new(transaction.description.as_deref().unwrap_or("")),
        ]);
    }
    table
}

pub fn build_monthly_earnings_table(months: &[MonthlyEarnings]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Month"),
        Cell::new("Earnings").set_alignment(CellAlignment::Right),
    ]);
    for month in months {
        table.add_row(vec![
            Cell::new(&month.month),
            Cell::new(month.earnings).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Daily earnings, coloured against the mean of the period.
pub fn build_earnings_trend_table(points: &[EarningsTrendPoint]) -> Table {
    #[expect(clippy::cast_precision_loss)]
    let mean = if points.is_empty() {
        0.0
    } else {
        points.iter().map(|point| point.earnings.0).sum::<f64>() / points.len() as f64
    };

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Date"),
        Cell::new("Earnings").set_alignment(CellAlignment::Right),
    ]);
    for point in points {
        table.add_row(vec![
            Cell::new(&point.date),
            Cell::new(point.earnings).set_alignment(CellAlignment::Right).fg(
                if point.earnings.0 >= mean { Color::Green } else { Color::DarkYellow },
            ),
        ]);
    }
    table
}
