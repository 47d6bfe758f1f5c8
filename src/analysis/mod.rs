//! Read-only passes over the AST: loading AST files, collecting the
//! imports a generated file needs, and deciding which members belong to
//! the public or the private declaration.

pub mod ast_cache;
pub mod import_collector;
pub mod member_filter;

pub use ast_cache::{AstCache, LoadedFile};
pub use import_collector::ImportCollector;
pub use member_filter::{DeclarationScope, MemberFilter};
