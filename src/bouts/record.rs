//! Accepted bout records and their aligned arrays.

use chrono::NaiveDate;
use serde::Serialize;

use super::BoutBuilder;
use crate::annotation::Segment;
use crate::constants::symbols::UNKNOWN_SYMBOL;
use crate::features::FeatureMatrix;
use crate::symbols::SymbolTable;

/// Where a bout came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// 1-based position of the file in the annotation store.
    pub index: usize,
    /// File identifier.
    pub id: String,
    /// Recording date parsed from the identifier.
    pub date: NaiveDate,
}

/// Full per-file feature matrices, one column per segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileFeatures {
    /// Brainard-style features.
    pub brainard: Option<FeatureMatrix>,
    /// Tchernichovski-style features.
    pub tchernichovski: Option<FeatureMatrix>,
}

/// One accepted bout.
///
/// `durations`, `phrase_indices`, and the symbol string without sentinels
/// all have one entry per segment; `gaps` has one fewer. Feature matrices
/// have one column per segment in the same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bout {
    /// Onset sentinel, one character per segment, offset sentinel.
    pub symbols: String,
    /// Segment durations in seconds.
    pub durations: Vec<f64>,
    /// Silent gaps between consecutive segments in seconds.
    pub gaps: Vec<f64>,
    /// 1-based phrase position of each segment within the bout.
    pub phrase_indices: Vec<u32>,
    /// 1-based position of the source file in the annotation store.
    pub file_index: usize,
    /// Source file identifier.
    pub file_id: String,
    /// Recording date of the source file.
    pub date: NaiveDate,
    /// 1-based compressed day index; zero until day indices are assigned.
    pub day_index: u32,
    /// Brainard-style feature columns for the bout's segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brainard: Option<FeatureMatrix>,
    /// Tchernichovski-style feature columns for the bout's segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tchernichovski: Option<FeatureMatrix>,
}

impl Bout {
    /// Turn a finished candidate into aligned output arrays.
    pub fn align(
        builder: &BoutBuilder,
        segments: &[Segment],
        table: &SymbolTable,
        features: &FileFeatures,
        source: &SourceFile,
    ) -> Self {
        let covered: Vec<&Segment> = builder
            .segment_indices()
            .iter()
            .map(|&i| &segments[i])
            .collect();

        let sentinels = table.sentinels();
        let mut symbols = String::with_capacity(covered.len() + 2);
        if let Some(s) = sentinels {
            symbols.push(s.onset);
        }
        symbols.extend(
            covered
                .iter()
                .map(|segment| table.symbol_for(segment.label).unwrap_or(UNKNOWN_SYMBOL)),
        );
        if let Some(s) = sentinels {
            symbols.push(s.offset);
        }

        let durations = covered.iter().map(|segment| segment.duration()).collect();
        let gaps = covered
            .windows(2)
            .map(|pair| pair[1].start_time - pair[0].end_time)
            .collect();

        let columns = builder.segment_indices();
        Self {
            symbols,
            durations,
            gaps,
            phrase_indices: builder.phrase_indices().to_vec(),
            file_index: source.index,
            file_id: source.id.clone(),
            date: source.date,
            day_index: 0,
            brainard: features.brainard.as_ref().map(|m| m.select_columns(columns)),
            tchernichovski: features
                .tchernichovski
                .as_ref()
                .map(|m| m.select_columns(columns)),
        }
    }

    /// Number of segments in the bout.
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Whether the bout has no segments.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Symbol string with sentinels removed.
    pub fn syllables<'a>(&'a self, table: &SymbolTable) -> &'a str {
        let mut s = self.symbols.as_str();
        if let Some(sentinels) = table.sentinels() {
            s = s.strip_prefix(sentinels.onset).unwrap_or(s);
            s = s.strip_suffix(sentinels.offset).unwrap_or(s);
        }
        s
    }
}
