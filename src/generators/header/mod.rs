//! Assembly of generated types into header and implementation files.
//!
//! Every strategy prints the same per-type declaration text; they differ
//! only in guards and in how types are spread over files.

pub mod implementation_file;
pub mod monolithic;
pub mod multi_file;
pub mod segmented;
pub mod source_alias;

use crate::build::generated_type::GeneratedType;
use crate::error::Result;
use crate::generators::base::name_table::camel_case_path;
use crate::generators::base::source_builder::SourceBuilder;
use crate::generators::base::source_mapping::metadata_comment;
use crate::generators::base::type_generator::GeneratorContext;
use crate::interface::config::HeaderStyle;
use crate::models::{Import, ImportSet, SourceMapping};
use std::collections::{BTreeSet, HashSet};

pub use implementation_file::ImplementationFileGenerator;
pub use monolithic::MonolithicHeaderGenerator;
pub use multi_file::MultiFileHeaderGenerator;
pub use segmented::SegmentedHeaderGenerator;

pub const HEADER_RUNTIME_INCLUDE: &str = "J2ObjC_header.h";
pub const SOURCE_RUNTIME_INCLUDE: &str = "J2ObjC_source.h";

/// One output file, path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub contents: String,
}

/// The types of one generation unit, already in supertype order.
#[derive(Clone, Copy)]
pub struct HeaderUnit<'a> {
    pub ctx: GeneratorContext<'a>,
    /// Output path without suffix, e.g. `com/foo/Bar`.
    pub output_path: &'a str,
    pub types: &'a [GeneratedType],
}

impl<'a> HeaderUnit<'a> {
    pub fn new(ctx: GeneratorContext<'a>, output_path: &'a str, types: &'a [GeneratedType]) -> Self {
        Self {
            ctx,
            output_path,
            types,
        }
    }

    pub fn header_path(&self) -> String {
        format!("{}{}", self.output_path, self.ctx.options.header_suffix)
    }

    pub fn implementation_path(&self) -> String {
        format!("{}{}", self.output_path, self.ctx.options.implementation_suffix)
    }

    pub fn guard_root(&self) -> String {
        camel_case_path(self.output_path)
    }

    /// Types that have a header declaration.
    pub fn public_types(&self) -> Vec<&'a GeneratedType> {
        self.types.iter().filter(|t| !t.is_private()).collect()
    }

    pub fn local_names(&self) -> HashSet<&'a str> {
        self.types.iter().map(GeneratedType::objc_name).collect()
    }
}

/// A header assembly strategy. The first returned file is the unit's main
/// header.
pub trait HeaderGenerator {
    fn generate(&self, unit: &HeaderUnit<'_>) -> Result<Vec<GeneratedFile>>;
}

pub fn create_header_generator(style: HeaderStyle) -> Box<dyn HeaderGenerator> {
    match style {
        HeaderStyle::Monolithic => Box::new(MonolithicHeaderGenerator),
        HeaderStyle::Segmented => Box::new(SegmentedHeaderGenerator),
        HeaderStyle::MultiFile => Box::new(MultiFileHeaderGenerator),
    }
}

pub fn banner(source_path: &str) -> String {
    format!(
        "//\n//  Generated by java2objc-gen.  DO NOT EDIT!\n//  source: {}\n//\n",
        source_path
    )
}

pub fn print_include(builder: &mut SourceBuilder, file: &str) {
    builder.append_line(&format!("#include \"{}\"", file));
}

/// Include file names of the given imports, deduplicated and sorted.
pub fn include_files<'i>(
    imports: impl IntoIterator<Item = &'i Import>,
    skip_types: &HashSet<&str>,
) -> BTreeSet<String> {
    imports
        .into_iter()
        .filter(|import| !skip_types.contains(import.type_name.as_str()))
        .filter_map(|import| import.import_file_name.clone())
        .collect()
}

/// Forward declarations not covered by an include and not naming a skipped type.
pub fn forward_declarations<'i>(
    forward: impl IntoIterator<Item = &'i Import>,
    includes: &ImportSet,
    skip_types: &HashSet<&str>,
) -> BTreeSet<String> {
    forward
        .into_iter()
        .filter(|import| !includes.contains(*import))
        .filter(|import| !skip_types.contains(import.type_name.as_str()))
        .map(Import::forward_declaration_text)
        .collect()
}

/// Sorted lines preceded by a blank line, or nothing.
pub fn print_block(builder: &mut SourceBuilder, lines: &BTreeSet<String>) {
    if lines.is_empty() {
        return;
    }
    builder.newline();
    for line in lines {
        builder.append_line(line);
    }
}

/// Appends declarations and collects their mappings at final offsets.
#[derive(Debug, Default)]
pub struct DeclarationPrinter {
    mappings: Vec<SourceMapping>,
}

impl DeclarationPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, builder: &mut SourceBuilder, generated: &GeneratedType) {
        let offset = builder.len();
        builder.append(generated.public_declaration());
        self.mappings.extend(
            generated
                .public_mappings()
                .iter()
                .map(|mapping| mapping.shifted(offset)),
        );
    }

    pub fn into_mappings(self) -> Vec<SourceMapping> {
        self.mappings
    }
}

/// Exactly one trailing newline.
pub fn ensure_trailing_newline(text: &str) -> String {
    let mut text = text.trim_end_matches('\n').to_string();
    text.push('\n');
    text
}

/// Final header text: trailing newline, then the navigation comment when enabled.
pub fn finish_header(
    ctx: &GeneratorContext<'_>,
    text: &str,
    mappings: &[SourceMapping],
) -> Result<String> {
    let mut text = ensure_trailing_newline(text);
    if ctx.options.navigation_metadata {
        if let Some(comment) =
            metadata_comment(mappings, &ctx.options.navigation_corpus, ctx.source_path)?
        {
            text.push_str(&comment);
        }
    }
    Ok(text)
}
