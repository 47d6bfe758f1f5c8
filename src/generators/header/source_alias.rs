use super::{GeneratedFile, HeaderUnit};

/// A header at the Java source's relative path that only includes the real
/// header. Skipped when the paths coincide or the real header has no
/// directory part.
pub fn alias_file(unit: &HeaderUnit<'_>) -> Option<GeneratedFile> {
    let header = unit.header_path();
    if !header.contains('/') {
        return None;
    }
    let source = unit.ctx.source_path;
    let stem = source.strip_suffix(".java").unwrap_or(source);
    let alias = format!("{}{}", stem, unit.ctx.options.header_suffix);
    if alias == header {
        return None;
    }
    Some(GeneratedFile {
        path: alias,
        contents: format!("#include \"{}\"\n", header),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::base::name_table::NameTable;
    use crate::generators::base::type_generator::GeneratorContext;
    use crate::interface::config::TranslationOptions;

    fn alias(source_path: &str, output_path: &str) -> Option<GeneratedFile> {
        let options = TranslationOptions::default();
        let names = NameTable::new();
        let ctx = GeneratorContext::new(&options, &names, source_path);
        alias_file(&HeaderUnit::new(ctx, output_path, &[]))
    }

    #[test]
    fn test_alias_points_at_real_header() {
        let file = alias("src/com/foo/Bar.java", "com/foo/Bar").unwrap();
        assert_eq!(file.path, "src/com/foo/Bar.h");
        assert_eq!(file.contents, "#include \"com/foo/Bar.h\"\n");
    }

    #[test]
    fn test_identical_path_is_skipped() {
        assert!(alias("com/foo/Bar.java", "com/foo/Bar").is_none());
    }

    #[test]
    fn test_packageless_header_is_skipped() {
        assert!(alias("src/Bar.java", "Bar").is_none());
    }
}
