//! # java2objc-gen
//!
//! Generates Objective-C headers and implementations from a typed Java AST.
//!
//! A front end parses and resolves the Java sources and hands over one JSON
//! [`ast::CompilationUnit`] per file. This crate turns each unit into a
//! header/implementation pair for the J2ObjC runtime.
//!
//! ## Features
//!
//! - 📝 **Declarations**: public `@interface`/`@protocol` headers, class
//!   extensions for private members, and `@implementation` bodies
//! - 🔁 **Statements and expressions**: every desugared Java construct,
//!   including labeled loops, multi-catch and switch on strings
//! - 🧱 **Header layouts**: monolithic, segmented (`INCLUDE_` flags) or one
//!   file per nested type, plus optional source-path alias headers
//! - 🧠 **Memory management**: ARC or manual reference counting
//! - 🧭 **Navigation metadata**: base64 Kythe anchors appended to headers
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a java2objc.json with defaults
//! java2objc init -i ./build/ast -o ./build/objc
//!
//! # Generate
//! java2objc generate --header-style segmented
//! ```
//!
//! ### Programmatic Usage
//!
//! ```rust,no_run
//! use java2objc_gen::{generate_from_config, GenerateConfig};
//!
//! let config = GenerateConfig {
//!     input_path: "./build/ast".to_string(),
//!     output_path: "./build/objc".to_string(),
//!     verbose: Some(true),
//!     ..Default::default()
//! };
//!
//! let summary = generate_from_config(&config)?;
//! println!("wrote {} files", summary.files.len());
//! # Ok::<(), java2objc_gen::Error>(())
//! ```
//!
//! Single units can be generated in memory through
//! [`build::GenerationUnitBuilder`] and [`build::GenerationUnit::generate`].
//!
//! ## Configuration
//!
//! `java2objc.json`:
//!
//! ```json
//! {
//!   "input_path": "./build/ast",
//!   "output_path": "./build/objc",
//!   "exclude_patterns": ["/test/"],
//!   "translation": {
//!     "memory_management": "reference_counting",
//!     "header_style": "multi_file",
//!     "package_prefixes": { "com.example.util": "EU" }
//!   }
//! }
//! ```

pub mod analysis;
pub mod ast;
pub mod build;
mod error;
pub mod generators;
pub mod interface;
pub mod models;

pub use error::{Error, Result};
pub use models::*;

pub use interface::config::{GenerateConfig, HeaderStyle, MemoryManagement, TranslationOptions};
pub use interface::generate_from_config;
pub use interface::output::{Logger, ProgressReporter};

pub use build::{BuildSystem, GenerationSummary, GenerationUnit, GenerationUnitBuilder};
