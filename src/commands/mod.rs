//! Command handlers for the duit CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod daily;
mod dashboard;
mod delete;
mod init;
mod list;
mod recap;
mod trends;
mod update;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::{add_category, add_transaction};
pub use daily::{daily, report};
pub use dashboard::dashboard;
pub use delete::delete_transaction;
pub use init::init;
pub use list::{list_categories, list_transactions};
pub use recap::{recap, stats};
pub use trends::trends;
pub use update::update_transaction;

/// The output type for a command. This allows the command to return a
/// consistent message and, optionally, structured data alongside it.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the
    /// command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as
    /// JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Renders rows as a left-aligned text table with a header and a rule line.
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ix, cell) in row.iter().enumerate() {
            if ix < widths.len() {
                widths[ix] = widths[ix].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(ix, cell)| format!("{cell:<width$}", width = widths[ix]))
            .collect::<Vec<String>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.iter().map(|h| h.to_string()).collect()));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<String>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render_row(row.clone()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_message_only() {
        let out: Out<u64> = Out::new_message("done");
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
    }

    #[test]
    fn test_out_with_structure() {
        let out = Out::new("done", 7u64);
        assert_eq!(out.structure(), Some(&7));
    }

    #[test]
    fn test_render_table_alignment() {
        let table = render_table(
            &["Id", "Kategori"],
            &[
                vec!["1".to_string(), "Makanan".to_string()],
                vec!["12".to_string(), "Gaji".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Id  Kategori");
        assert_eq!(lines[1], "--  --------");
        assert_eq!(lines[2], "1   Makanan");
        assert_eq!(lines[3], "12  Gaji");
    }
}
