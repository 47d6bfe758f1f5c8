//! Building blocks shared by every generator.

pub mod literal;
pub mod name_table;
pub mod source_builder;
pub mod source_mapping;
pub mod type_generator;
pub mod type_visitor;
