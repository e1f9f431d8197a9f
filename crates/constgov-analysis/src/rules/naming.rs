//! Identifier conventions for validator functions and value collections.

/// Naming rules applied to exported functions and package-level variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRules {
    /// Substring that marks a function as a validator.
    pub validator_marker: String,
    /// Required prefix for validators returning `error`.
    pub validator_prefix: String,
    /// Required prefix for validators returning `bool`.
    pub predicate_prefix: String,
    /// Variable prefixes that mark a collection of allowed values.
    pub collection_prefixes: Vec<String>,
    /// Required suffix for such collections.
    pub collection_suffix: String,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            validator_marker: "Valid".to_string(),
            validator_prefix: "Validate".to_string(),
            predicate_prefix: "IsValid".to_string(),
            collection_prefixes: vec!["All".to_string(), "Valid".to_string()],
            collection_suffix: "Values".to_string(),
        }
    }
}

impl NamingRules {
    /// Collection prefix the variable name starts with, if any. The prefix
    /// must be followed by an uppercase letter (`AllPayTypes`, not `Allowed`).
    pub fn collection_prefix<'a>(&'a self, name: &str) -> Option<&'a str> {
        self.collection_prefixes.iter().find_map(|prefix| {
            let rest = name.strip_prefix(prefix.as_str())?;
            rest.starts_with(|c: char| c.is_ascii_uppercase())
                .then_some(prefix.as_str())
        })
    }
}
