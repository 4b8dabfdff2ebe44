//! Per-file label normalization.

use super::LabelRules;
use crate::annotation::Segment;

/// Drop ignored segments and rewrite joined labels to their representative.
///
/// Must run before phrase finding: phrase boundaries depend on label
/// equality between neighbours, so `6 6 5` under the join `{5, 6}` becomes
/// a single phrase.
pub fn normalize_segments(segments: Vec<Segment>, rules: &LabelRules) -> Vec<Segment> {
    segments
        .into_iter()
        .filter(|segment| !rules.is_ignored(segment.label))
        .map(|mut segment| {
            // Groups apply in order; validated groups are disjoint so at most one matches.
            for group in &rules.joins {
                if let Some(&representative) = group.first()
                    && group.contains(&segment.label)
                {
                    segment.label = representative;
                }
            }
            segment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(label: i64, start: f64) -> Segment {
        Segment {
            label,
            abs_start_time: start,
            start_time: start,
            end_time: start + 0.1,
        }
    }

    #[test]
    fn test_ignored_dropped_in_lock_step() {
        let rules = LabelRules {
            ignore: vec![9],
            ..LabelRules::default()
        };
        let out = normalize_segments(vec![seg(1, 0.0), seg(9, 0.2), seg(2, 0.4)], &rules);
        let labels: Vec<i64> = out.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![1, 2]);
        assert!((out[1].start_time - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_join_group_remapped_to_first() {
        let rules = LabelRules {
            joins: vec![vec![5, 6, 7]],
            ..LabelRules::default()
        };
        let out = normalize_segments(vec![seg(6, 0.0), seg(7, 0.2), seg(5, 0.4), seg(1, 0.6)], &rules);
        let labels: Vec<i64> = out.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![5, 5, 5, 1]);
    }

    #[test]
    fn test_zero_label_kept_by_normalizer() {
        // Zero is only excluded from the symbol table, not from the data.
        let out = normalize_segments(vec![seg(0, 0.0)], &LabelRules::default());
        assert_eq!(out.len(), 1);
    }
}
