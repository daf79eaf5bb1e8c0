//! Table rendering for tracker views.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use blade_core::{MaterialGroup, Selection};
use blade_model::{Blade, BladeStatusCounts, DamageStatus, Turbine};

pub fn turbine_table(turbines: &[&Turbine], selected: Option<i64>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Serial"),
        header_cell("Blades"),
        header_cell("Pending"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for turbine in turbines {
        table.add_row(vec![
            marker_cell(selected == Some(turbine.id)),
            Cell::new(turbine.id),
            Cell::new(&turbine.name),
            Cell::new(&turbine.serial_no),
            Cell::new(turbine.blades.len()),
            count_cell(turbine.pending_count(), Color::Yellow),
        ]);
    }
    table
}

pub fn blade_table(blades: &[&Blade], selected: Option<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("ID"),
        header_cell("Serial"),
        header_cell("Damages"),
        header_cell("Pending"),
        header_cell("In progress"),
        header_cell("Closed"),
    ]);
    apply_table_style(&mut table);
    for index in 3..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for blade in blades {
        let counts = BladeStatusCounts::for_blade(blade);
        table.add_row(vec![
            marker_cell(selected == Some(blade.id.as_str())),
            Cell::new(&blade.id),
            Cell::new(&blade.serial_no),
            Cell::new(counts.total),
            count_cell(counts.pending, Color::Yellow),
            count_cell(counts.in_progress, Color::Blue),
            count_cell(counts.closed, Color::Green),
        ]);
    }
    table
}

pub fn damage_table(blade: &Blade) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Category"),
        header_cell("Status"),
        header_cell("Radius (m)"),
        header_cell("Side"),
        header_cell("Description"),
        header_cell("Logs"),
        header_cell("Materials"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);
    for damage in &blade.damages {
        table.add_row(vec![
            Cell::new(damage.id),
            Cell::new(&damage.category),
            status_cell(damage.status),
            Cell::new(damage.radius),
            Cell::new(&damage.side),
            text_cell(&damage.description),
            Cell::new(damage.logs.len()),
            Cell::new(damage.materials_used.len()),
        ]);
    }
    table
}

pub fn materials_table(groups: &[MaterialGroup]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Material"),
        header_cell("Total"),
        header_cell("Unit"),
        header_cell("Uses"),
        header_cell("Damages"),
        header_cell("Statuses"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for group in groups {
        let damages: Vec<String> = group.damage_ids.iter().map(ToString::to_string).collect();
        let statuses: Vec<&str> = group.statuses.iter().map(DamageStatus::label).collect();
        table.add_row(vec![
            Cell::new(&group.name).add_attribute(Attribute::Bold),
            Cell::new(group.total_qty),
            Cell::new(&group.unit),
            Cell::new(group.count),
            Cell::new(damages.join(", ")),
            Cell::new(statuses.join(", ")),
        ]);
    }
    table
}

pub fn entries_table(group: &MaterialGroup) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Added"),
        header_cell("Qty"),
        header_cell("Unit"),
        header_cell("Damage"),
        header_cell("Turbine"),
        header_cell("Blade"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in &group.entries {
        table.add_row(vec![
            match entry.added_at {
                Some(added_at) => Cell::new(added_at.format("%Y-%m-%d %H:%M")),
                None => dim_cell("-"),
            },
            Cell::new(entry.qty),
            Cell::new(&entry.unit),
            Cell::new(entry.damage_id),
            entry
                .turbine_id
                .map_or_else(|| dim_cell("-"), Cell::new),
            entry
                .blade_id
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    table
}

pub fn print_selection(selection: &Selection<'_>) {
    match selection.turbine {
        Some(turbine) => println!(
            "Turbine: {} (#{}, serial {})",
            turbine.name, turbine.id, turbine.serial_no
        ),
        None => println!("Turbine: none selected"),
    }
    let Some(blade) = selection.blade else {
        println!("Blade: none selected");
        return;
    };
    let counts = BladeStatusCounts::for_blade(blade);
    println!(
        "Blade: {} (serial {}) - {} damages: {} pending, {} in progress, {} closed",
        blade.id, blade.serial_no, counts.total, counts.pending, counts.in_progress, counts.closed
    );
    if blade.damages.is_empty() {
        return;
    }
    println!("{}", damage_table(blade));
}

pub fn print_materials(groups: &[MaterialGroup], with_entries: bool) {
    if groups.is_empty() {
        println!("No materials recorded.");
        return;
    }
    println!("{}", materials_table(groups));
    if !with_entries {
        return;
    }
    for group in groups {
        println!();
        println!("{} ({})", group.name, group.unit);
        println!("{}", entries_table(group));
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn marker_cell(selected: bool) -> Cell {
    if selected {
        Cell::new("*").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("")
    }
}

fn status_cell(status: DamageStatus) -> Cell {
    let color = match status {
        DamageStatus::Pending => Color::Yellow,
        DamageStatus::InProgress => Color::Blue,
        DamageStatus::Closed => Color::Green,
    };
    Cell::new(status.label()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
