//! Typed Java AST consumed by the generators.
//!
//! The front end resolves every name, type and overload before handing the
//! tree over; the generators never perform lookups of their own. Units arrive
//! as JSON, one [`CompilationUnit`] per file.

pub mod decl;
pub mod expr;
pub mod literal_value;
pub mod stmt;
pub mod types;

pub use decl::*;
pub use expr::*;
pub use literal_value::LiteralValue;
pub use stmt::*;
pub use types::*;
