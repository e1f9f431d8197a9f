//! Constant categories: prefix classification, required identifier pattern
//! and designated file per category.

use std::fmt;

use constgov_core::errors::RuleError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Semantic category of a named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantCategory {
    Status,
    Type,
    Scope,
    Limit,
}

impl ConstantCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Type => "type",
            Self::Scope => "scope",
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for ConstantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-category requirements.
#[derive(Debug, Clone)]
pub struct CategorySpec {
    pub category: ConstantCategory,
    pub pattern: Regex,
    /// File name every constant of this category must live in.
    pub designated_file: String,
    /// Whether the category mirrors a canonical enumeration. Domain-significant
    /// constants carry stricter documentation requirements.
    pub domain_significant: bool,
}

impl CategorySpec {
    pub fn new(
        category: ConstantCategory,
        pattern: &str,
        designated_file: &str,
        domain_significant: bool,
    ) -> Result<Self, RuleError> {
        let pattern = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            category: category.name().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            category,
            pattern,
            designated_file: designated_file.to_string(),
            domain_significant,
        })
    }
}

/// Result of classifying a constant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    /// The prefix that matched; constants sharing it form one enumeration family.
    pub family: &'a str,
    pub category: ConstantCategory,
}

/// Ordered `(prefix, category)` rules plus the per-category specs.
/// The first matching prefix wins, so longer prefixes go first.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    rules: Vec<(String, ConstantCategory)>,
    specs: Vec<CategorySpec>,
}

impl CategoryTable {
    pub fn new(rules: Vec<(String, ConstantCategory)>, specs: Vec<CategorySpec>) -> Self {
        Self { rules, specs }
    }

    /// The mall-style table: status, type, scope and limit families.
    pub fn standard() -> Result<Self, RuleError> {
        let rule = |prefix: &str, category| (prefix.to_string(), category);
        let rules = vec![
            rule("OrderStatus", ConstantCategory::Status),
            rule("PayStatus", ConstantCategory::Status),
            rule("ReturnStatus", ConstantCategory::Status),
            rule("PublishStatus", ConstantCategory::Status),
            rule("ConfirmStatus", ConstantCategory::Status),
            rule("Status", ConstantCategory::Status),
            rule("OrderType", ConstantCategory::Type),
            rule("PayType", ConstantCategory::Type),
            rule("SourceType", ConstantCategory::Type),
            rule("CouponType", ConstantCategory::Type),
            rule("PromotionType", ConstantCategory::Type),
            rule("Type", ConstantCategory::Type),
            rule("UseScope", ConstantCategory::Scope),
            rule("CouponScope", ConstantCategory::Scope),
            rule("Scope", ConstantCategory::Scope),
            rule("Max", ConstantCategory::Limit),
            rule("Min", ConstantCategory::Limit),
            rule("Default", ConstantCategory::Limit),
        ];
        let specs = vec![
            CategorySpec::new(
                ConstantCategory::Status,
                r"^([A-Z][a-z0-9]+)*Status([A-Z][a-z0-9]+)+$",
                "status_constants.go",
                true,
            )?,
            CategorySpec::new(
                ConstantCategory::Type,
                r"^([A-Z][a-z0-9]+)*Type([A-Z][a-z0-9]+)+$",
                "type_constants.go",
                true,
            )?,
            CategorySpec::new(
                ConstantCategory::Scope,
                r"^([A-Z][a-z0-9]+)*Scope([A-Z][a-z0-9]+)+$",
                "scope_constants.go",
                true,
            )?,
            CategorySpec::new(
                ConstantCategory::Limit,
                r"^(Max|Min|Default)([A-Z][a-z0-9]+)+$",
                "limit_constants.go",
                false,
            )?,
        ];
        Ok(Self::new(rules, specs))
    }

    /// Classify a constant name by its prefix. The prefix must end at a word
    /// boundary: `MaxPageSize` is a limit, `Maximum` is not.
    pub fn classify(&self, name: &str) -> Option<Classification<'_>> {
        self.rules.iter().find_map(|(prefix, category)| {
            let rest = name.strip_prefix(prefix.as_str())?;
            if rest.starts_with(|c: char| c.is_ascii_lowercase()) {
                return None;
            }
            Some(Classification {
                family: prefix.as_str(),
                category: *category,
            })
        })
    }

    pub fn spec(&self, category: ConstantCategory) -> Option<&CategorySpec> {
        self.specs.iter().find(|s| s.category == category)
    }

    pub fn specs(&self) -> &[CategorySpec] {
        &self.specs
    }

    /// Whether a name belongs to a domain-significant category.
    pub fn is_domain_significant(&self, name: &str) -> bool {
        self.classify(name)
            .and_then(|c| self.spec(c.category))
            .is_some_and(|s| s.domain_significant)
    }
}
