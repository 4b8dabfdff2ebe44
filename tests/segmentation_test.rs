//! End-to-end segmentation behavior through the library API.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::collections::BTreeSet;

use songbouts::annotation::{AnnotationStore, Segment, SegmentRecord};
use songbouts::bouts::{Phrase, PhraseFinder};
use songbouts::constants::symbols::{OFFSET_VALUE, ONSET_VALUE};
use songbouts::labels::LabelRules;
use songbouts::symbols::Sentinels;
use songbouts::{Conversion, ConversionOptions, Converter, convert};

fn seg(label: i64, start: f64, end: f64) -> Segment {
    Segment {
        label,
        abs_start_time: 3600.0 + start,
        start_time: start,
        end_time: end,
    }
}

fn store(files: &[(&str, Vec<Segment>)]) -> AnnotationStore {
    let mut store = AnnotationStore::new();
    for (id, segments) in files {
        store.push(*id, SegmentRecord::from_segments(segments));
    }
    store
}

fn symbol_strings(conversion: &Conversion) -> Vec<&str> {
    conversion.bouts.iter().map(|b| b.symbols.as_str()).collect()
}

/// Several days of song with varied gaps.
fn song_store() -> AnnotationStore {
    store(&[
        (
            "bird7_20200501_0600.wav",
            vec![
                seg(1, 0.00, 0.10),
                seg(1, 0.15, 0.25),
                seg(2, 0.40, 0.55),
                seg(3, 0.60, 0.70),
                seg(1, 2.00, 2.10),
                seg(2, 2.20, 2.30),
            ],
        ),
        (
            "bird7_20200501_0900.wav",
            vec![seg(4, 1.00, 1.20), seg(4, 1.30, 1.50)],
        ),
        (
            "bird7_20200504_0600.wav",
            vec![
                seg(2, 0.00, 0.10),
                seg(3, 0.30, 0.40),
                seg(3, 0.45, 0.55),
                seg(1, 0.70, 0.80),
            ],
        ),
        (
            "bird7_20200520_0600.wav",
            vec![seg(1, 5.00, 5.05), seg(2, 5.50, 5.60)],
        ),
    ])
}

#[test]
fn test_scenario_a_small_gap_merges() {
    let store = store(&[(
        "b_20200501.wav",
        vec![seg(1, 0.0, 0.2), seg(2, 0.5, 0.7)],
    )]);
    let conversion = convert(&store, ConversionOptions::default()).unwrap();
    assert_eq!(symbol_strings(&conversion), vec!["<23>"]);
    assert_eq!(conversion.bouts[0].gaps.len(), 1);
    assert!((conversion.bouts[0].gaps[0] - 0.3).abs() < 1e-9);
}

#[test]
fn test_scenario_b_large_gap_splits_and_filters_independently() {
    let store = store(&[(
        "b_20200501.wav",
        vec![
            seg(1, 0.0, 0.2),
            seg(2, 0.8, 1.0),
            seg(3, 1.1, 1.2),
        ],
    )]);

    let loose = convert(&store, ConversionOptions::default()).unwrap();
    assert_eq!(symbol_strings(&loose), vec!["<2>", "<34>"]);

    let strict = convert(
        &store,
        ConversionOptions {
            min_phrases: 2,
            ..ConversionOptions::default()
        },
    )
    .unwrap();
    assert_eq!(symbol_strings(&strict), vec!["<34>"]);
    assert_eq!(strict.summary.bouts_rejected, 1);
}

#[test]
fn test_scenario_c_single_phrase_discarded() {
    let store = store(&[(
        "b_20200501.wav",
        vec![seg(1, 0.0, 0.1), seg(1, 0.2, 0.3)],
    )]);
    let conversion = convert(
        &store,
        ConversionOptions {
            min_phrases: 2,
            ..ConversionOptions::default()
        },
    )
    .unwrap();
    assert!(conversion.bouts.is_empty());
    assert!(conversion.symbols.is_empty());
    assert_eq!(conversion.summary.days, 0);
}

#[test]
fn test_scenario_d_ignored_label_never_encoded() {
    let options = ConversionOptions {
        rules: LabelRules {
            ignore: vec![3],
            ..LabelRules::default()
        },
        ..ConversionOptions::default()
    };
    let converter = Converter::new(options);
    let full = converter.symbol_table(&song_store()).unwrap();
    assert!(!full.contains(3));

    let conversion = converter.convert(&song_store(), None).unwrap();
    assert!(!conversion.symbols.contains(3));
    for bout in &conversion.bouts {
        for symbol in bout.syllables(&conversion.symbols).chars() {
            assert_ne!(conversion.symbols.value_for(symbol), Some(3));
            assert!(conversion.symbols.value_for(symbol).is_some());
        }
    }
}

#[test]
fn test_scenario_e_join_group_relabels() {
    let store = store(&[(
        "b_20200501.wav",
        vec![
            seg(5, 0.0, 0.1),
            seg(6, 0.2, 0.3),
            seg(7, 0.4, 0.5),
            seg(5, 0.6, 0.7),
        ],
    )]);
    let options = ConversionOptions {
        rules: LabelRules {
            joins: vec![vec![5, 6, 7]],
            ..LabelRules::default()
        },
        ..ConversionOptions::default()
    };
    let conversion = convert(&store, options).unwrap();
    assert_eq!(symbol_strings(&conversion), vec!["<2222>"]);
    assert_eq!(conversion.bouts[0].phrase_indices, vec![1, 1, 1, 1]);
    let values: Vec<i64> = conversion.symbols.entries().iter().map(|e| e.value).collect();
    assert_eq!(values, vec![ONSET_VALUE, OFFSET_VALUE, 5]);
}

#[test]
fn test_array_length_laws() {
    for min_phrases in 1..=3 {
        let conversion = convert(
            &song_store(),
            ConversionOptions {
                min_phrases,
                ..ConversionOptions::default()
            },
        )
        .unwrap();
        for bout in &conversion.bouts {
            let n = bout.durations.len();
            assert!(n > 0);
            assert_eq!(bout.symbols.chars().count(), n + 2);
            assert_eq!(bout.gaps.len(), n - 1);
            assert_eq!(bout.phrase_indices.len(), n);
        }
    }
}

#[test]
fn test_without_sentinels_strings_match_segments() {
    let conversion = convert(
        &song_store(),
        ConversionOptions {
            sentinels: None,
            ..ConversionOptions::default()
        },
    )
    .unwrap();
    assert!(!conversion.bouts.is_empty());
    for bout in &conversion.bouts {
        assert_eq!(bout.symbols.chars().count(), bout.durations.len());
    }
    assert!(conversion.symbols.entries().iter().all(|e| !e.is_sentinel()));
}

#[test]
fn test_day_index_laws() {
    let conversion = convert(&song_store(), ConversionOptions::default()).unwrap();
    let mut pairs: Vec<_> = conversion
        .bouts
        .iter()
        .map(|b| (b.date, b.day_index))
        .collect();
    pairs.sort();
    pairs.dedup();

    // One index per date, starting at 1, consecutive.
    let indices: Vec<u32> = pairs.iter().map(|&(_, day)| day).collect();
    let expected: Vec<u32> = (1..=u32::try_from(pairs.len()).unwrap()).collect();
    assert_eq!(indices, expected);
    assert_eq!(conversion.summary.days, 3);
}

#[test]
fn test_pruning_law() {
    for min_phrases in 1..=3 {
        let conversion = convert(
            &song_store(),
            ConversionOptions {
                min_phrases,
                ..ConversionOptions::default()
            },
        )
        .unwrap();
        let emitted: BTreeSet<char> = conversion
            .bouts
            .iter()
            .flat_map(|b| b.symbols.chars())
            .collect();
        let table: BTreeSet<char> = conversion.symbols.entries().iter().map(|e| e.symbol).collect();
        assert_eq!(table, emitted, "min_phrases = {min_phrases}");
    }
}

#[test]
fn test_conversion_is_deterministic() {
    let options = ConversionOptions {
        min_phrases: 2,
        rules: LabelRules {
            joins: vec![vec![2, 3]],
            ..LabelRules::default()
        },
        ..ConversionOptions::default()
    };
    let first = convert(&song_store(), options.clone()).unwrap();
    let second = convert(&song_store(), options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_failed_file_is_isolated() {
    let mut broken = song_store();
    let mut record = SegmentRecord::from_segments(&[seg(1, 0.0, 0.1), seg(2, 0.2, 0.3)]);
    record.start_times.pop();
    broken.push("bird7_20200502_0600.wav", record);

    let clean = convert(&song_store(), ConversionOptions::default()).unwrap();
    let with_failure = convert(&broken, ConversionOptions::default()).unwrap();

    assert_eq!(with_failure.summary.files_failed, 1);
    assert_eq!(symbol_strings(&with_failure), symbol_strings(&clean));
    assert_eq!(with_failure.symbols, clean.symbols);
}

#[test]
fn test_ignore_dates_and_reindexing() {
    let options = ConversionOptions {
        ignore_dates: vec![chrono::NaiveDate::from_ymd_opt(2020, 5, 1).unwrap()],
        ..ConversionOptions::default()
    };
    let conversion = convert(&song_store(), options).unwrap();
    assert_eq!(conversion.summary.files_skipped, 2);
    assert!(conversion.bouts.iter().all(|b| b.file_index >= 3));
    assert_eq!(conversion.bouts[0].day_index, 1);
}

/// Phrase finder with fixed phrases, for boundary cases.
struct FixedPhrases(Vec<Phrase>);

impl PhraseFinder for FixedPhrases {
    fn find_phrases(&self, _file_id: &str, _segments: &[Segment]) -> songbouts::Result<Vec<Phrase>> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_segment_on_phrase_edge_is_dropped() {
    // Second segment's midpoint (0.5) sits exactly on the phrase end.
    let store = store(&[(
        "b_20200501.wav",
        vec![seg(1, 0.0, 0.2), seg(1, 0.4, 0.6)],
    )]);
    let finder = FixedPhrases(vec![Phrase {
        label: 1,
        start_time: 0.0,
        end_time: 0.5,
    }]);
    let conversion = Converter::new(ConversionOptions::default())
        .with_phrase_finder(finder)
        .convert(&store, None)
        .unwrap();
    assert_eq!(symbol_strings(&conversion), vec!["<2>"]);
    assert_eq!(conversion.bouts[0].durations.len(), 1);
}

#[test]
fn test_bad_phrase_boundaries_fail_file() {
    let store = store(&[("b_20200501.wav", vec![seg(1, 0.0, 0.2)])]);
    let finder = FixedPhrases(vec![Phrase {
        label: 1,
        start_time: 0.5,
        end_time: 0.1,
    }]);
    let conversion = Converter::new(ConversionOptions::default())
        .with_phrase_finder(finder)
        .convert(&store, None)
        .unwrap();
    assert!(conversion.bouts.is_empty());
    assert_eq!(conversion.summary.files_failed, 1);
}

#[test]
fn test_unknown_placeholder_cannot_be_a_sentinel() {
    let store = store(&[(
        "b_20200501.wav",
        vec![seg(1, 0.0, 0.1), seg(9, 0.2, 0.3)],
    )]);
    let options = ConversionOptions {
        syllables: Some(vec![1]),
        sentinels: Some(Sentinels {
            onset: '?',
            offset: '>',
        }),
        ..ConversionOptions::default()
    };
    let result = convert(&store, options);
    assert!(matches!(
        result,
        Err(songbouts::Error::SymbolCollision { symbol: '?', .. })
    ));
}
