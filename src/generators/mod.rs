//! Objective-C emission: the three declaration roles, the statement and
//! expression generator, and file assembly.

pub mod base;
pub mod expression;
pub mod header;
pub mod implementation;
pub mod private_declaration;
pub mod statement;
pub mod type_declaration;

pub use base::source_builder::SourceBuilder;
pub use base::type_generator::GeneratorContext;
pub use header::{create_header_generator, GeneratedFile, HeaderGenerator, HeaderUnit};
pub use implementation::ImplementationGenerator;
pub use private_declaration::PrivateDeclarationGenerator;
pub use type_declaration::{GeneratedDeclaration, TypeDeclarationGenerator};
