//! Duplicate detection.
//!
//! Two indexes over the corpus: `name -> definitions` catches redefinitions,
//! `value -> names` catches distinct classified constants sharing a value.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::parsers::ConstantDefinition;
use crate::rules::CategoryTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    /// The same name is defined more than once.
    NameRedefinition,
    /// Different names share a value without a reason to.
    ValueCollision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateConstant {
    pub kind: DuplicateKind,
    /// The redefined name, or the colliding names joined with `, `.
    pub name: String,
    /// The shared value, when there is exactly one.
    pub value: Option<i64>,
    /// Distinct values of a redefined name, when they disagree.
    pub conflicting_values: Vec<String>,
    pub defining_files: Vec<String>,
    /// Colliding names (value collisions only).
    pub related_names: Vec<String>,
    pub occurrences: usize,
}

pub struct DuplicateDetector<'a> {
    categories: &'a CategoryTable,
    reasonable_values: &'a BTreeSet<i64>,
}

impl<'a> DuplicateDetector<'a> {
    pub fn new(categories: &'a CategoryTable, reasonable_values: &'a BTreeSet<i64>) -> Self {
        Self {
            categories,
            reasonable_values,
        }
    }

    /// Findings sorted by kind, then name.
    pub fn detect(&self, constants: &[&ConstantDefinition]) -> Vec<DuplicateConstant> {
        let mut results = self.redefinitions(constants);
        results.extend(self.value_collisions(constants));
        results.sort_by(|a, b| (a.kind, &a.name).cmp(&(b.kind, &b.name)));
        tracing::debug!(duplicates = results.len(), "duplicate detection complete");
        results
    }

    fn redefinitions(&self, constants: &[&ConstantDefinition]) -> Vec<DuplicateConstant> {
        let mut by_name: BTreeMap<&str, Vec<&ConstantDefinition>> = BTreeMap::new();
        for &constant in constants {
            by_name.entry(constant.name.as_str()).or_default().push(constant);
        }

        by_name
            .into_iter()
            .filter(|(_, defs)| defs.len() > 1)
            .map(|(name, defs)| {
                let values: BTreeSet<String> = defs.iter().map(|d| d.value.to_string()).collect();
                let ints: BTreeSet<i64> = defs.iter().filter_map(|d| d.value.as_int()).collect();
                let single_value = values.len() == 1 && ints.len() == 1;
                DuplicateConstant {
                    kind: DuplicateKind::NameRedefinition,
                    name: name.to_string(),
                    value: ints.first().copied().filter(|_| single_value),
                    conflicting_values: if values.len() > 1 {
                        values.into_iter().collect()
                    } else {
                        Vec::new()
                    },
                    defining_files: distinct_files(&defs),
                    related_names: Vec::new(),
                    occurrences: defs.len(),
                }
            })
            .collect()
    }

    fn value_collisions(&self, constants: &[&ConstantDefinition]) -> Vec<DuplicateConstant> {
        let mut by_value: BTreeMap<i64, Vec<&ConstantDefinition>> = BTreeMap::new();
        for &constant in constants {
            let Some(value) = constant.value.as_int() else {
                continue;
            };
            if self.categories.classify(&constant.name).is_none() {
                continue;
            }
            by_value.entry(value).or_default().push(constant);
        }

        by_value
            .into_iter()
            .filter_map(|(value, defs)| {
                let names: BTreeSet<&str> = defs.iter().map(|d| d.name.as_str()).collect();
                if names.len() < 2 || self.is_reasonable(value, &names) {
                    return None;
                }
                let related_names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
                Some(DuplicateConstant {
                    kind: DuplicateKind::ValueCollision,
                    name: related_names.join(", "),
                    value: Some(value),
                    conflicting_values: Vec::new(),
                    defining_files: distinct_files(&defs),
                    related_names,
                    occurrences: defs.len(),
                })
            })
            .collect()
    }

    /// A shared value is reasonable when it is a common sentinel and every
    /// name comes from a different enumeration family.
    fn is_reasonable(&self, value: i64, names: &BTreeSet<&str>) -> bool {
        if !self.reasonable_values.contains(&value) {
            return false;
        }
        let mut families = BTreeSet::new();
        names.iter().all(|name| {
            self.categories
                .classify(name)
                .is_some_and(|c| families.insert(c.family))
        })
    }
}

fn distinct_files(defs: &[&ConstantDefinition]) -> Vec<String> {
    defs.iter()
        .map(|d| d.file.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{AttachedComment, ConstantValue};

    fn constant(name: &str, value: i64, file: &str) -> ConstantDefinition {
        ConstantDefinition {
            name: name.to_string(),
            value: ConstantValue::Int(value),
            file: file.to_string(),
            line: 1,
            package: "p".to_string(),
            comment: AttachedComment::default(),
            reference_tag: None,
        }
    }

    fn detect(defs: &[ConstantDefinition], reasonable: &[i64]) -> Vec<DuplicateConstant> {
        let categories = CategoryTable::standard().unwrap();
        let reasonable: BTreeSet<i64> = reasonable.iter().copied().collect();
        let refs: Vec<&ConstantDefinition> = defs.iter().collect();
        DuplicateDetector::new(&categories, &reasonable).detect(&refs)
    }

    #[test]
    fn test_redefinition_same_value() {
        let defs = [constant("Foo", 5, "a.go"), constant("Foo", 5, "b.go")];
        let found = detect(&defs, &[0, 1]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, DuplicateKind::NameRedefinition);
        assert_eq!(found[0].name, "Foo");
        assert_eq!(found[0].occurrences, 2);
        assert_eq!(found[0].value, Some(5));
        assert!(found[0].conflicting_values.is_empty());
        assert_eq!(found[0].defining_files, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_redefinition_conflicting_values() {
        let defs = [constant("MaxRetry", 3, "a.go"), constant("MaxRetry", 5, "b.go")];
        let found = detect(&defs, &[]);
        let redefinition = found
            .iter()
            .find(|d| d.kind == DuplicateKind::NameRedefinition)
            .unwrap();
        assert_eq!(redefinition.value, None);
        assert_eq!(redefinition.conflicting_values, vec!["3", "5"]);
    }

    #[test]
    fn test_cross_family_sentinel_is_reasonable() {
        let defs = [
            constant("OrderStatusPendingPayment", 0, "status_constants.go"),
            constant("PayTypeUnpaid", 0, "type_constants.go"),
            constant("UseScopeAll", 0, "scope_constants.go"),
        ];
        assert!(detect(&defs, &[0, 1]).is_empty());
    }

    #[test]
    fn test_same_family_collision() {
        let defs = [
            constant("OrderStatusDelivered", 2, "status_constants.go"),
            constant("OrderStatusShipped", 2, "status_constants.go"),
        ];
        let found = detect(&defs, &[2]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, DuplicateKind::ValueCollision);
        assert_eq!(found[0].name, "OrderStatusDelivered, OrderStatusShipped");
        assert_eq!(found[0].value, Some(2));
    }

    #[test]
    fn test_value_outside_allow_list_collides() {
        let defs = [
            constant("MaxPageSize", 100, "limit_constants.go"),
            constant("OrderTypeBulk", 100, "type_constants.go"),
        ];
        let found = detect(&defs, &[0, 1]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].related_names, vec!["MaxPageSize", "OrderTypeBulk"]);
    }

    #[test]
    fn test_unclassified_and_unparsed_excluded_from_value_index() {
        let mut unparsed = constant("StatusB", 0, "s.go");
        unparsed.value = ConstantValue::Unparsed("iota".to_string());
        let defs = [
            constant("timeoutSeconds", 30, "a.go"),
            constant("retryDelay", 30, "b.go"),
            constant("StatusA", 7, "s.go"),
            unparsed,
        ];
        assert!(detect(&defs, &[]).is_empty());
    }

    #[test]
    fn test_sorted_by_kind_then_name() {
        let defs = [
            constant("Zed", 1, "a.go"),
            constant("Zed", 1, "b.go"),
            constant("Alpha", 9, "a.go"),
            constant("Alpha", 9, "b.go"),
            constant("OrderStatusA", 8, "s.go"),
            constant("OrderStatusB", 8, "s.go"),
        ];
        let found = detect(&defs, &[]);
        let keys: Vec<(DuplicateKind, &str)> = found.iter().map(|d| (d.kind, d.name.as_str())).collect();
        assert_eq!(
            keys,
            vec![
                (DuplicateKind::NameRedefinition, "Alpha"),
                (DuplicateKind::NameRedefinition, "Zed"),
                (DuplicateKind::ValueCollision, "OrderStatusA, OrderStatusB"),
            ]
        );
    }
}
