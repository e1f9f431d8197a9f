//! Declaration extraction: turns source files into the fact types every
//! validator consumes. Validators never see a syntax tree.

pub mod error_tolerant;
pub mod go;
pub mod literals;
pub mod traits;
pub mod types;

pub use go::GoExtractor;
pub use traits::DeclarationExtractor;
pub use types::{
    AttachedComment, ConstantDefinition, ConstantValue, FileFacts, FunctionDecl, NumericLiteral,
    VariableDecl,
};
