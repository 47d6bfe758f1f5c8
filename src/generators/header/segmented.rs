use super::{
    banner, finish_header, forward_declarations, print_block, print_include,
    DeclarationPrinter, GeneratedFile, HeaderGenerator, HeaderUnit, HEADER_RUNTIME_INCLUDE,
};
use crate::error::Result;
use crate::generators::base::name_table::camel_case_path;
use crate::generators::base::source_builder::SourceBuilder;
use crate::models::Import;
use std::collections::HashSet;

/// One guard per type in a single file. Includers may define
/// `RESTRICT_<file>` plus `INCLUDE_<type>` flags to pull in a subset.
pub struct SegmentedHeaderGenerator;

impl HeaderGenerator for SegmentedHeaderGenerator {
    fn generate(&self, unit: &HeaderUnit<'_>) -> Result<Vec<GeneratedFile>> {
        let root = unit.guard_root();
        let include_all = format!("INCLUDE_ALL_{}", root);
        let local = unit.local_names();
        let types = unit.public_types();

        let mut builder = SourceBuilder::new(false);
        builder.append(&banner(unit.ctx.source_path));
        builder.newline();
        print_include(&mut builder, HEADER_RUNTIME_INCLUDE);
        builder.newline();
        builder.append_line(&format!("#pragma push_macro(\"{}\")", include_all));
        builder.append_line(&format!("#ifdef RESTRICT_{}", root));
        builder.append_line(&format!("#define {} 0", include_all));
        builder.append_line("#else");
        builder.append_line(&format!("#define {} 1", include_all));
        builder.append_line("#endif");
        builder.append_line(&format!("#undef RESTRICT_{}", root));

        // A requested type requests its local supertypes. Walking subtypes
        // first lets the flags propagate through the whole closure.
        for generated in types.iter().rev() {
            let local_supers: Vec<&Import> = generated
                .header_includes()
                .iter()
                .filter(|import| local.contains(import.type_name.as_str()))
                .collect();
            if local_supers.is_empty() {
                continue;
            }
            builder.newline();
            builder.append_line(&format!("#if defined(INCLUDE_{})", generated.objc_name()));
            for import in local_supers {
                builder.append_line(&format!("#define INCLUDE_{} 1", import.type_name));
            }
            builder.append_line("#endif");
        }

        let mut printer = DeclarationPrinter::new();
        for generated in &types {
            let name = generated.objc_name();
            builder.newline();
            builder.append_line(&format!(
                "#if !defined ({}_) && ({} || defined(INCLUDE_{}))",
                name, include_all, name
            ));
            builder.append_line(&format!("#define {}_", name));

            let includes = generated
                .header_includes()
                .iter()
                .filter(|import| !local.contains(import.type_name.as_str()));
            let mut first = true;
            for import in includes {
                let Some(file) = &import.import_file_name else {
                    continue;
                };
                if first {
                    builder.newline();
                    first = false;
                }
                builder.append_line(&format!("#define RESTRICT_{} 1", restrict_root(file)));
                builder.append_line(&format!("#define INCLUDE_{} 1", import.type_name));
                print_include(&mut builder, file);
            }

            let own: HashSet<&str> = [name].into_iter().collect();
            let forward = forward_declarations(
                generated.header_forward_declarations(),
                generated.header_includes(),
                &own,
            );
            print_block(&mut builder, &forward);

            printer.print(&mut builder, generated);
            builder.newline();
            builder.append_line("#endif");
        }

        builder.newline();
        builder.append_line(&format!("#pragma pop_macro(\"{}\")", include_all));

        let contents = finish_header(&unit.ctx, builder.as_str(), &printer.into_mappings())?;
        Ok(vec![GeneratedFile {
            path: unit.header_path(),
            contents,
        }])
    }
}

/// Guard root of an included header: `java/lang/Runnable.h` -> `JavaLangRunnable`.
fn restrict_root(file: &str) -> String {
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    camel_case_path(stem)
}
