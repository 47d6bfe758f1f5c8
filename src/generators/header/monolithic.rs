use super::{
    banner, finish_header, forward_declarations, include_files, print_block, print_include,
    DeclarationPrinter, GeneratedFile, HeaderGenerator, HeaderUnit, HEADER_RUNTIME_INCLUDE,
};
use crate::build::generated_type::GeneratedType;
use crate::error::Result;
use crate::generators::base::source_builder::SourceBuilder;
use crate::models::ImportSet;
use std::collections::{BTreeSet, HashSet};

/// One include guard around every type of the unit.
pub struct MonolithicHeaderGenerator;

impl HeaderGenerator for MonolithicHeaderGenerator {
    fn generate(&self, unit: &HeaderUnit<'_>) -> Result<Vec<GeneratedFile>> {
        let types = unit.public_types();
        let contents = guarded_header(unit, &types, &unit.guard_root(), &HeaderLinks::default())?;
        Ok(vec![GeneratedFile {
            path: unit.header_path(),
            contents,
        }])
    }
}

/// Headers of other files of the same unit a guarded header must include.
#[derive(Debug, Default)]
pub struct HeaderLinks {
    /// Included before the declarations.
    pub leading: BTreeSet<String>,
    /// Included after the declarations.
    pub trailing: Vec<String>,
}

/// A header with a single guard holding `types`. Forward declarations of
/// types declared in this file are dropped; other local types are reached
/// through `links`.
pub fn guarded_header(
    unit: &HeaderUnit<'_>,
    types: &[&GeneratedType],
    guard_root: &str,
    links: &HeaderLinks,
) -> Result<String> {
    let guard = format!("_{}_H_", guard_root);
    let declared: HashSet<&str> = types.iter().map(|t| t.objc_name()).collect();
    let local = unit.local_names();

    let mut all_includes = ImportSet::new();
    for generated in types {
        all_includes.extend(generated.header_includes().iter().cloned());
    }
    let mut includes = include_files(&all_includes, &local);
    includes.extend(links.leading.iter().cloned());

    let forward = forward_declarations(
        types.iter().flat_map(|t| t.header_forward_declarations()),
        &all_includes,
        &declared,
    );

    let mut builder = SourceBuilder::new(false);
    builder.append(&banner(unit.ctx.source_path));
    builder.newline();
    builder.append_line(&format!("#ifndef {}", guard));
    builder.append_line(&format!("#define {}", guard));
    builder.newline();
    print_include(&mut builder, HEADER_RUNTIME_INCLUDE);
    for file in &includes {
        print_include(&mut builder, file);
    }
    print_block(&mut builder, &forward);

    let mut printer = DeclarationPrinter::new();
    for generated in types {
        printer.print(&mut builder, generated);
    }

    if !links.trailing.is_empty() {
        builder.newline();
        for file in &links.trailing {
            print_include(&mut builder, file);
        }
    }
    builder.newline();
    builder.append_line(&format!("#endif // {}", guard));

    finish_header(&unit.ctx, builder.as_str(), &printer.into_mappings())
}
