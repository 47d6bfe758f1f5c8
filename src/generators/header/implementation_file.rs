use super::{
    banner, ensure_trailing_newline, forward_declarations, include_files, print_block,
    print_include, GeneratedFile, HeaderUnit, SOURCE_RUNTIME_INCLUDE,
};
use crate::error::Result;
use crate::generators::base::source_builder::SourceBuilder;
use crate::models::ImportSet;

/// The `.m` file of a unit: includes, then every private declaration,
/// then every implementation, in unit order.
pub struct ImplementationFileGenerator;

impl ImplementationFileGenerator {
    pub fn generate(&self, unit: &HeaderUnit<'_>) -> Result<GeneratedFile> {
        let local = unit.local_names();
        let own_header = unit.header_path();

        let mut all_includes = ImportSet::new();
        for generated in unit.types {
            all_includes.extend(generated.implementation_includes().iter().cloned());
            all_includes.extend(generated.header_includes().iter().cloned());
        }
        let mut includes = include_files(&all_includes, &local);
        includes.remove(&own_header);
        let forward = forward_declarations(
            unit.types
                .iter()
                .flat_map(|t| t.implementation_forward_declarations()),
            &all_includes,
            &local,
        );

        let mut builder = SourceBuilder::new(false);
        builder.append(&banner(unit.ctx.source_path));
        builder.newline();
        print_include(&mut builder, SOURCE_RUNTIME_INCLUDE);
        print_include(&mut builder, &own_header);
        for file in &includes {
            print_include(&mut builder, file);
        }
        print_block(&mut builder, &forward);

        let root = unit.guard_root();
        builder.newline();
        if unit.ctx.options.is_arc() {
            builder.append_line("#if !__has_feature(objc_arc)");
            builder.append_line(&format!(
                "#error \"{} must be compiled with ARC (-fobjc-arc)\"",
                root
            ));
        } else {
            builder.append_line("#if __has_feature(objc_arc)");
            builder.append_line(&format!(
                "#error \"{} must not be compiled with ARC (-fobjc-arc)\"",
                root
            ));
        }
        builder.append_line("#endif");

        for generated in unit.types {
            builder.append(generated.private_declaration());
        }
        for generated in unit.types {
            builder.append(generated.implementation());
        }

        Ok(GeneratedFile {
            path: unit.implementation_path(),
            contents: ensure_trailing_newline(builder.as_str()),
        })
    }
}
