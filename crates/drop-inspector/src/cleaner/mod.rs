//! Safe, non-destructive cleaning.
//!
//! This module provides functionality for:
//! - Trimming column names
//! - Trimming text cells and turning placeholder tokens into nulls
//! - Optionally removing exact duplicate rows
//!
//! Numeric, boolean and date/time cells are never altered, even inside
//! `object` columns. Column count and order are preserved.

mod sanitizers;

pub use sanitizers::NULL_TOKENS;

use crate::table::Table;
use tracing::{debug, info};

/// Data cleaner for safe cleaning operations.
#[derive(Debug, Clone, Copy)]
pub struct DataCleaner {
    drop_exact_duplicates: bool,
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DataCleaner {
    pub fn new(drop_exact_duplicates: bool) -> Self {
        Self {
            drop_exact_duplicates,
        }
    }

    /// Perform safe cleaning on a copy of the table.
    ///
    /// Returns the cleaned table and a human-readable list of the actions
    /// taken.
    pub fn perform_safe_cleaning(&self, table: &Table) -> (Table, Vec<String>) {
        let mut cleaning_actions = Vec::new();
        let mut cleaned = table.clone();

        info!("Performing safe data cleaning...");

        // 1. Trim column names
        let mut renamed = 0;
        for column in cleaned.columns_mut() {
            let trimmed = column.name().trim().to_string();
            if trimmed != column.name() {
                column.rename(trimmed);
                renamed += 1;
            }
        }
        if renamed > 0 {
            cleaning_actions.push(format!("Trimmed {} column names", renamed));
        }

        // 2-3. Trim text cells and null out placeholders
        let mut nulled = 0;
        for column in cleaned.columns_mut() {
            if column.kind().is_textual() {
                nulled += sanitizers::sanitize_text_column(column);
            }
        }
        if nulled > 0 {
            cleaning_actions.push(format!(
                "Converted {} placeholder values to null",
                nulled
            ));
            debug!("Converted {} placeholder values to null", nulled);
        }

        // 4. Remove exact duplicate rows
        if self.drop_exact_duplicates {
            let mask = cleaned.duplicate_mask();
            let duplicates = mask.iter().filter(|dup| **dup).count();
            if duplicates > 0 {
                let keep: Vec<bool> = mask.iter().map(|dup| !dup).collect();
                let before = cleaned.height();
                cleaned = cleaned.filter_rows(&keep);
                let pct = (duplicates as f64 / before as f64) * 100.0;
                cleaning_actions.push(format!(
                    "Removed {} duplicate rows ({:.1}%)",
                    duplicates, pct
                ));
                debug!("Removed {} duplicate rows", duplicates);
            } else {
                cleaning_actions.push("No duplicate rows found".to_string());
            }
        }

        (cleaned, cleaning_actions)
    }
}

/// Clean a table with the given duplicate policy.
pub fn clean(table: &Table, drop_exact_duplicates: bool) -> Table {
    DataCleaner::new(drop_exact_duplicates)
        .perform_safe_cleaning(table)
        .0
}
