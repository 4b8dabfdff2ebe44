//! Ignore and join rules for syllable labels.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Label filtering and merging rules shared by the symbol table builder and
/// the per-file normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelRules {
    /// Labels dropped from every file.
    pub ignore: Vec<i64>,
    /// Groups of labels collapsed onto their first member.
    pub joins: Vec<Vec<i64>>,
    /// Whether label `0` is a real syllable.
    pub include_zero: bool,
}

impl LabelRules {
    /// Check that join groups are non-empty, pairwise disjoint, and disjoint
    /// from the ignore list.
    pub fn validate(&self) -> Result<()> {
        let mut owner: HashMap<i64, String> = self
            .ignore
            .iter()
            .map(|&label| (label, "ignore list".to_string()))
            .collect();

        for (i, group) in self.joins.iter().enumerate() {
            if group.is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("join group {} is empty", i + 1),
                });
            }

            let name = format!("join group {} {group:?}", i + 1);
            for &label in group {
                match owner.get(&label) {
                    Some(first) if *first != name => {
                        return Err(Error::OverlappingLabelGroups {
                            label,
                            first: first.clone(),
                            second: name,
                        });
                    }
                    Some(_) => {}
                    None => {
                        owner.insert(label, name.clone());
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether a label is dropped outright.
    pub fn is_ignored(&self, label: i64) -> bool {
        self.ignore.contains(&label)
    }

    /// Whether a label is a non-representative member of some join group.
    pub fn is_joined_away(&self, label: i64) -> bool {
        self.joins
            .iter()
            .any(|group| group.iter().skip(1).any(|&member| member == label))
    }

    /// Whether a label can appear in the symbol table.
    pub fn keeps(&self, label: i64) -> bool {
        !self.is_ignored(label)
            && !(label == 0 && !self.include_zero)
            && !self.is_joined_away(label)
    }
}
