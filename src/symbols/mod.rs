//! Symbol table construction and pruning.

mod table;

pub use table::{Sentinels, SymbolEntry, SymbolTable};
