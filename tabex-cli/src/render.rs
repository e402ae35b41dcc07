//! Terminal rendering of tables and field lists.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table as TextTable};
use tabex_lib::model::Record;
use tabex_lib::resolve::{FieldEntry, FieldMap};

/// Renders `rows` with one column per field, headed by the field labels.
pub fn rows_table(fields: &FieldMap, rows: &[&Record]) -> String {
    let mut table = TextTable::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(fields.iter().map(|(_, entry)| entry.header().to_string()));

    for row in rows {
        table.add_row(
            fields
                .keys()
                .map(|field| row.get_path(field).map(|v| v.to_text()).unwrap_or_default()),
        );
    }
    table.to_string()
}

/// Renders the resolved export fields: identifier, header and kind.
pub fn fields_table(fields: &FieldMap) -> String {
    let mut table = TextTable::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["Field", "Header", "Export"]);

    for (field, entry) in fields {
        let kind = match entry {
            FieldEntry::Label(_) => "value".to_string(),
            FieldEntry::Export(descriptor) => match &descriptor.formatter {
                Some(formatter) => format!("formatter ({})", formatter.name().unwrap_or("custom")),
                None => "empty".to_string(),
            },
        };
        table.add_row([field.clone(), entry.header().to_string(), kind]);
    }
    table.to_string()
}
