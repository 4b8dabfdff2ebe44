//! Feature sources wired through a conversion.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]

use std::fmt::Write as _;
use std::path::Path;

use songbouts::annotation::{AnnotationStore, Segment, SegmentRecord};
use songbouts::features::{
    FeatureExtractor, FeatureKind, FeatureMatrix, WaveformFeatureSource, Waveform,
};
use songbouts::labels::LabelRules;
use songbouts::{ConversionOptions, Converter, convert};

const FILE_ID: &str = "bird_20200501.wav";
const OTHER_ID: &str = "bird_20200502.wav";

fn seg(label: i64, start: f64, end: f64) -> Segment {
    Segment {
        label,
        abs_start_time: start,
        start_time: start,
        end_time: end,
    }
}

/// Label 9 is noise; dropping it leaves three segments in two bouts.
fn store() -> AnnotationStore {
    let mut store = AnnotationStore::new();
    store.push(
        FILE_ID,
        SegmentRecord::from_segments(&[
            seg(1, 0.0, 0.1),
            seg(9, 0.15, 0.2),
            seg(2, 0.3, 0.4),
            seg(3, 2.0, 2.1),
        ]),
    );
    store
}

fn options() -> ConversionOptions {
    ConversionOptions {
        rules: LabelRules {
            ignore: vec![9],
            ..LabelRules::default()
        },
        ..ConversionOptions::default()
    }
}

/// Encodes row and segment start so column order is checkable.
struct StubExtractor;

impl FeatureExtractor for StubExtractor {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Brainard
    }

    fn extract(&self, waveform: &Waveform, segments: &[Segment]) -> songbouts::Result<FeatureMatrix> {
        assert_eq!(waveform.sample_rate, 8000);
        let rows = (0..FeatureKind::Brainard.feature_count())
            .map(|row| {
                segments
                    .iter()
                    .map(|s| row as f64 * 100.0 + s.start_time)
                    .collect()
            })
            .collect();
        FeatureMatrix::from_rows(rows)
    }
}

/// Serves a short silent waveform for every file in `available`.
fn loader(available: &'static [&'static str]) -> impl Fn(&str) -> songbouts::Result<Waveform> {
    move |file_id: &str| {
        if available.contains(&file_id) {
            Ok(Waveform {
                samples: vec![0.0; 800],
                sample_rate: 8000,
            })
        } else {
            Err(songbouts::Error::FeatureExtraction {
                reason: format!("no audio for {file_id}"),
            })
        }
    }
}

fn write_table(path: &Path, rows: usize, cols: usize) {
    let mut contents = String::new();
    for row in 0..rows {
        let line: Vec<String> = (0..cols).map(|col| format!("{}", row * 10 + col)).collect();
        writeln!(contents, "{}", line.join(",")).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_waveform_source_columns_follow_bout_segments() {
    let conversion = Converter::new(options())
        .with_feature_source(WaveformFeatureSource::new(loader(&[FILE_ID]), StubExtractor))
        .convert(&store(), None)
        .unwrap();

    assert_eq!(conversion.bouts.len(), 2);
    let first = conversion.bouts[0].brainard.as_ref().unwrap();
    assert_eq!((first.rows(), first.cols()), (7, 2));
    assert_eq!(first.get(0, 0), Some(0.0));
    assert_eq!(first.get(0, 1), Some(0.3));
    assert_eq!(first.get(6, 1), Some(600.3));

    let second = conversion.bouts[1].brainard.as_ref().unwrap();
    assert_eq!((second.rows(), second.cols()), (7, 1));
    assert_eq!(second.get(1, 0), Some(102.0));
    assert!(conversion.bouts[1].tchernichovski.is_none());
}

#[test]
fn test_missing_audio_fails_only_that_file() {
    let mut store = store();
    store.push(OTHER_ID, SegmentRecord::from_segments(&[seg(1, 0.0, 0.1)]));

    let conversion = Converter::new(options())
        .with_feature_source(WaveformFeatureSource::new(loader(&[OTHER_ID]), StubExtractor))
        .convert(&store, None)
        .unwrap();

    assert_eq!(conversion.summary.files_failed, 1);
    assert_eq!(conversion.bouts.len(), 1);
    assert_eq!(conversion.bouts[0].file_id, OTHER_ID);
}

#[test]
fn test_precomputed_tables_from_folder() {
    let tables = tempfile::tempdir().unwrap();
    write_table(&tables.path().join("bird_20200501.csv"), 16, 3);

    let conversion = convert(
        &store(),
        ConversionOptions {
            tchernichovski_dir: Some(tables.path().to_path_buf()),
            ..options()
        },
    )
    .unwrap();

    let first = conversion.bouts[0].tchernichovski.as_ref().unwrap();
    assert_eq!(first.to_rows()[15], vec![150.0, 151.0]);
    let second = conversion.bouts[1].tchernichovski.as_ref().unwrap();
    assert_eq!(second.get(5, 0), Some(52.0));
}

#[test]
fn test_precomputed_table_wrong_shape_fails_file() {
    let tables = tempfile::tempdir().unwrap();
    // Four columns: the table still counts the ignored segment.
    write_table(&tables.path().join("bird_20200501.csv"), 7, 4);

    let conversion = convert(
        &store(),
        ConversionOptions {
            brainard_dir: Some(tables.path().to_path_buf()),
            ..options()
        },
    )
    .unwrap();

    assert!(conversion.bouts.is_empty());
    assert_eq!(conversion.summary.files_failed, 1);
}
