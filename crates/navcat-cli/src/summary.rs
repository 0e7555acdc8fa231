use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use navcat_model::CategoryGroupType;
use navcat_registry::{NOT_FOUND, NavCategoryGroup, NavCategoryRegistry};

use navcat_cli::report::ManifestRow;

pub fn print_manifest(rows: &[ManifestRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Mode"),
        header_cell("Name"),
        header_cell("Id"),
        header_cell("Group"),
        header_cell("In group"),
        header_cell("Flat"),
        header_cell("Key"),
        header_cell("Enabled"),
    ]);
    apply_table_style(&mut table);
    for index in [0, 3, 5, 6] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in rows {
        table.add_row(vec![
            Cell::new(row.position),
            Cell::new(row.mode).add_attribute(Attribute::Bold),
            Cell::new(&row.friendly_name),
            Cell::new(row.serialization_id),
            group_cell(row.group),
            Cell::new(row.index_in_group),
            index_cell(row.flat_index),
            key_cell(row),
            enabled_cell(row.enabled),
        ]);
    }
    println!("{table}");
}

pub fn print_menu(groups: &[NavCategoryGroup]) {
    for group in groups {
        println!("{} ({})", group.name, group.automation_name);
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Name"),
            header_cell("Automation name"),
            header_cell("Access key"),
            header_cell("Glyph"),
            header_cell("Negative"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Center);
        for category in &group.categories {
            let name = if category.is_enabled {
                Cell::new(&category.name)
            } else {
                dim_cell(&category.name)
            };
            table.add_row(vec![
                name,
                Cell::new(&category.automation_name),
                Cell::new(&category.access_key),
                Cell::new(glyph_codes(&category.glyph)),
                Cell::new(if category.supports_negative { "yes" } else { "-" }),
            ]);
        }
        println!("{table}");
    }
}

pub fn print_keys(registry: &NavCategoryRegistry) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Key"), header_cell("Mode")]);
    apply_table_style(&mut table);
    for key in registry.category_accelerator_keys() {
        table.add_row(vec![
            Cell::new(key).add_attribute(Attribute::Bold),
            Cell::new(registry.view_mode_for_virtual_key(key)),
        ]);
    }
    println!("{table}");
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

fn group_cell(group: CategoryGroupType) -> Cell {
    match group {
        CategoryGroupType::Calculator => Cell::new(group).fg(Color::Blue),
        CategoryGroupType::Converter => Cell::new(group).fg(Color::Magenta),
        CategoryGroupType::None => dim_cell(group),
    }
}

fn index_cell(index: i32) -> Cell {
    if index == NOT_FOUND {
        dim_cell("-")
    } else {
        Cell::new(index)
    }
}

fn key_cell(row: &ManifestRow) -> Cell {
    if row.accelerator_key.is_none() {
        dim_cell("-")
    } else {
        Cell::new(row.accelerator_key)
    }
}

fn enabled_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Red)
    }
}

// Glyphs are private-use code points; show them as escapes.
fn glyph_codes(glyph: &str) -> String {
    glyph
        .chars()
        .map(|ch| format!("U+{:04X}", u32::from(ch)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
