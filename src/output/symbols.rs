//! Symbol table CSV writer.

use crate::constants::symbols::{OFFSET_VALUE, ONSET_VALUE};
use crate::error::{Error, Result};
use crate::symbols::SymbolTable;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct SymbolRow {
    value: i64,
    symbol: char,
    role: &'static str,
}

/// Write `table` as `value,symbol,role` rows in table order.
pub fn write_symbol_table(path: &Path, table: &SymbolTable) -> Result<()> {
    let csv_error = |source| Error::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for entry in table.entries() {
        let role = match entry.value {
            ONSET_VALUE => "onset",
            OFFSET_VALUE => "offset",
            _ => "label",
        };
        writer
            .serialize(SymbolRow {
                value: entry.value,
                symbol: entry.symbol,
                role,
            })
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}
