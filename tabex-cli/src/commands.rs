//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use tabex_lib::Table;
use tabex_lib::document::TableDocument;
use tabex_lib::export::{DirectorySink, ExportOutcome};
use tabex_lib::props::TableProps;

use crate::paths;
use crate::render;

/// Search flags shared by `show` and `export`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SearchArgs {
    /// Only keep rows matching this query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Match the query as a subsequence instead of a substring
    #[arg(long)]
    pub fuzzy: bool,
}

impl SearchArgs {
    fn apply(&self, props: &mut TableProps) {
        if self.query.is_some() {
            props.searchable = true;
        }
        if self.fuzzy {
            props.searchable_props.fuzzy_search = true;
        }
    }
}

/// Flags of the `export` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Export only these fields, picked through the column picker
    #[arg(short, long, value_delimiter = ',')]
    pub pick: Option<Vec<String>>,

    /// File name without extension
    #[arg(short, long)]
    pub file_name: Option<String>,

    /// Directory to write into (defaults to the download directory)
    #[arg(short, long, env = "TABEX_OUT_DIR")]
    pub out: Option<PathBuf>,
}

fn load(path: &Path) -> Result<TableDocument> {
    TableDocument::from_path(path).with_context(|| format!("failed to load {}", path.display()))
}

fn build(mut document: TableDocument, search: &SearchArgs) -> Table {
    search.apply(&mut document.props);
    let query = search.query.clone();
    let mut table = document.into_table();
    if let Some(query) = query {
        table.search(query);
    }
    table
}

/// Prints the visible rows.
pub fn show(path: &Path, search: &SearchArgs) -> Result<()> {
    let table = build(load(path)?, search);
    let rows = table.visible_rows();
    println!("{}", render::rows_table(table.search_fields(), &rows));
    println!("{} of {} row(s)", rows.len(), table.rows().len());
    Ok(())
}

/// Prints the resolved export fields.
pub fn fields(path: &Path) -> Result<()> {
    let mut document = load(path)?;
    document.props.exportable = true;
    let table = document.into_table();
    let Some(button) = table.export_button() else {
        bail!("table has no export button");
    };
    println!("{}", render::fields_table(button.fields()));
    Ok(())
}

/// Exports the visible rows to a CSV file.
pub fn export(path: &Path, args: &ExportArgs) -> Result<()> {
    let mut document = load(path)?;
    let props = &mut document.props;
    props.exportable = true;
    if args.pick.is_some() {
        props.exportable_props.show_column_picker = true;
    }
    if let Some(file_name) = &args.file_name {
        props.exportable_props.file_name = Some(file_name.clone());
    }

    let mut table = build(document, &args.search);
    let mut sink = DirectorySink::new(args.out.clone().unwrap_or_else(paths::download_dir));

    let mut outcome = table.click_export(&mut sink)?;
    if outcome == ExportOutcome::PickerOpened {
        if let (Some(picks), Some(button)) = (&args.pick, table.export_button_mut()) {
            let picker = button.picker_mut();
            picker.clear();
            for field in picks {
                if !picker.set_checked(field, true) {
                    warn!("unknown field '{}' ignored", field);
                    eprintln!("warning: unknown field '{}' ignored", field);
                }
            }
        }
        outcome = table.confirm_export(&mut sink)?;
    }

    match outcome {
        ExportOutcome::Downloaded(path) => {
            info!("export written to {}", path.display());
            println!("{}", path.display());
            Ok(())
        }
        ExportOutcome::Ignored => bail!("export is disabled for this table"),
        ExportOutcome::PickerOpened => bail!("column picker was left open"),
    }
}
