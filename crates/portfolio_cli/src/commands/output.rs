use clap::ValueEnum;
use serde::Serialize;
use tabled::Tabled;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

/// Render rows as a rounded table.
pub(crate) fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = tabled::Table::new(rows);
    table.with(tabled::settings::Style::rounded());
    table.to_string()
}

pub(crate) fn print_json<T: Serialize + ?Sized>(
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
