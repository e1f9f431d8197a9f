//! Rule tables shared by the validators.
//!
//! Every table is built once per run and passed to validator constructors;
//! nothing here is global or mutated after construction.

pub mod categories;
pub mod naming;
pub mod reference;

use std::collections::BTreeSet;

use constgov_core::errors::RuleError;

pub use categories::{CategorySpec, CategoryTable, Classification, ConstantCategory};
pub use naming::NamingRules;
pub use reference::{default_reference_table, ReferenceEnumMapping, ReferenceTable};

/// Values every codebase reuses freely; never treated as domain signals.
const UBIQUITOUS_VALUES: [i64; 2] = [0, 1];

/// Sentinels reused across independent state machines.
const COMMON_SENTINELS: [i64; 3] = [-1, 0, 1];

/// The full rule set for one run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub categories: CategoryTable,
    pub reference: ReferenceTable,
    pub naming: NamingRules,
    /// Values that may be shared by constants of different families.
    pub reasonable_duplicate_values: BTreeSet<i64>,
    /// Values whose bare use outside a constants file is suspicious.
    pub magic_values: BTreeSet<i64>,
}

impl RuleSet {
    /// Standard categories and the compiled-in reference table.
    pub fn standard() -> Result<Self, RuleError> {
        Ok(Self::from_tables(
            CategoryTable::standard()?,
            default_reference_table()?,
            NamingRules::default(),
        ))
    }

    /// Build a rule set whose allow-lists are derived from the reference table.
    pub fn from_tables(categories: CategoryTable, reference: ReferenceTable, naming: NamingRules) -> Self {
        let values = reference.values();
        let magic_values = values
            .iter()
            .copied()
            .filter(|v| !UBIQUITOUS_VALUES.contains(v))
            .collect();
        let reasonable_duplicate_values = values.into_iter().chain(COMMON_SENTINELS).collect();
        Self {
            categories,
            reference,
            naming,
            reasonable_duplicate_values,
            magic_values,
        }
    }

    pub fn with_magic_values(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.magic_values = values.into_iter().collect();
        self
    }

    pub fn with_reasonable_duplicate_values(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.reasonable_duplicate_values = values.into_iter().collect();
        self
    }
}
