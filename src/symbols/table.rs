//! Bijective label-to-character symbol table.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::annotation::AnnotationStore;
use crate::constants::symbols::{ALPHABET, OFFSET_VALUE, ONSET_VALUE, UNKNOWN_SYMBOL};
use crate::error::{Error, Result};
use crate::labels::LabelRules;

/// Onset and offset sentinel characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sentinels {
    /// Character opening every bout string.
    pub onset: char,
    /// Character closing every bout string.
    pub offset: char,
}

/// One symbol table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    /// Label value (or a reserved sentinel value).
    pub value: i64,
    /// Printable character for the value.
    pub symbol: char,
}

impl SymbolEntry {
    /// Whether this row is the onset or offset sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.value == ONSET_VALUE || self.value == OFFSET_VALUE
    }
}

/// Ordered label/character mapping with reverse lookup.
///
/// Sentinel rows, when present, come first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    by_value: HashMap<i64, char>,
    by_symbol: HashMap<char, i64>,
    sentinels: Option<Sentinels>,
}

impl SymbolTable {
    /// Build a table from candidate label values.
    ///
    /// Candidates failing `rules` are dropped, duplicates are removed keeping
    /// first occurrence, and the sentinel values are prepended when
    /// `sentinels` is set. Row `k` takes the `k`-th alphabet character;
    /// sentinel rows take their configured characters instead.
    pub fn build(
        candidates: impl IntoIterator<Item = i64>,
        rules: &LabelRules,
        sentinels: Option<Sentinels>,
    ) -> Result<Self> {
        rules.validate()?;

        let mut values: Vec<i64> = Vec::new();
        if sentinels.is_some() {
            values.push(ONSET_VALUE);
            values.push(OFFSET_VALUE);
        }

        let mut seen = HashSet::new();
        for value in candidates {
            if value == ONSET_VALUE || value == OFFSET_VALUE {
                return Err(Error::ConfigValidation {
                    message: format!("label {value} is reserved for sentinels"),
                });
            }
            if rules.keeps(value) && seen.insert(value) {
                values.push(value);
            }
        }

        let alphabet: Vec<char> = ALPHABET.chars().collect();
        if values.len() > alphabet.len() {
            return Err(Error::SymbolAlphabetExhausted {
                needed: values.len(),
                available: alphabet.len(),
            });
        }

        let entries = values
            .iter()
            .zip(&alphabet)
            .map(|(&value, &letter)| {
                let symbol = match (value, sentinels) {
                    (ONSET_VALUE, Some(s)) => s.onset,
                    (OFFSET_VALUE, Some(s)) => s.offset,
                    _ => letter,
                };
                SymbolEntry { value, symbol }
            })
            .collect();

        Self::from_entries(entries, sentinels)
    }

    /// Build a table from labels observed across an annotation store.
    ///
    /// Discovered labels are used in ascending order.
    pub fn discover(
        store: &AnnotationStore,
        rules: &LabelRules,
        sentinels: Option<Sentinels>,
    ) -> Result<Self> {
        let labels: BTreeSet<i64> = store
            .iter()
            .flat_map(|file| file.record.labels.iter().copied())
            .collect();
        Self::build(labels, rules, sentinels)
    }

    fn from_entries(entries: Vec<SymbolEntry>, sentinels: Option<Sentinels>) -> Result<Self> {
        let mut by_value = HashMap::with_capacity(entries.len());
        let mut by_symbol: HashMap<char, i64> = HashMap::with_capacity(entries.len());

        for entry in &entries {
            // '?' marks labels missing from the table and must stay unambiguous.
            if entry.symbol == UNKNOWN_SYMBOL {
                return Err(Error::SymbolCollision {
                    symbol: entry.symbol,
                    first: "unknown labels".to_string(),
                    second: describe_value(entry.value),
                });
            }
            if let Some(&other) = by_symbol.get(&entry.symbol) {
                return Err(Error::SymbolCollision {
                    symbol: entry.symbol,
                    first: describe_value(other),
                    second: describe_value(entry.value),
                });
            }
            by_symbol.insert(entry.symbol, entry.value);
            by_value.insert(entry.value, entry.symbol);
        }

        Ok(Self {
            entries,
            by_value,
            by_symbol,
            sentinels,
        })
    }

    /// Keep only rows whose value was observed in an accepted bout.
    ///
    /// Row order and characters are unchanged.
    #[must_use]
    pub fn prune(&self, seen: &BTreeSet<i64>) -> Self {
        let entries: Vec<SymbolEntry> = self
            .entries
            .iter()
            .filter(|entry| seen.contains(&entry.value))
            .copied()
            .collect();

        Self {
            by_value: entries.iter().map(|e| (e.value, e.symbol)).collect(),
            by_symbol: entries.iter().map(|e| (e.symbol, e.value)).collect(),
            entries,
            sentinels: self.sentinels,
        }
    }

    /// Character for a label value.
    pub fn symbol_for(&self, value: i64) -> Option<char> {
        self.by_value.get(&value).copied()
    }

    /// Label value for a character.
    pub fn value_for(&self, symbol: char) -> Option<i64> {
        self.by_symbol.get(&symbol).copied()
    }

    /// Whether the table holds a row for `value`.
    pub fn contains(&self, value: i64) -> bool {
        self.by_value.contains_key(&value)
    }

    /// Rows in table order.
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    /// Sentinel characters, if enabled.
    pub fn sentinels(&self) -> Option<Sentinels> {
        self.sentinels
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn describe_value(value: i64) -> String {
    match value {
        ONSET_VALUE => "onset sentinel".to_string(),
        OFFSET_VALUE => "offset sentinel".to_string(),
        label => format!("label {label}"),
    }
}
