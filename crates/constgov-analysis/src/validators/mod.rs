//! Validators. Each consumes extracted facts and a slice of the rule set,
//! and produces plain, serializable findings.

pub mod alignment;
pub mod documentation;
pub mod duplicates;
pub mod magic_numbers;
pub mod naming;

pub use alignment::{AlignmentReport, AlignmentValidator, MisalignedMapping, ObservedValue};
pub use documentation::{DocumentationReport, DocumentationValidation, DocumentationValidator};
pub use duplicates::{DuplicateConstant, DuplicateDetector, DuplicateKind};
pub use magic_numbers::MagicNumberDetector;
pub use naming::{NamingValidator, NamingViolation, ViolationType};
