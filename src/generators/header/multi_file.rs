use super::monolithic::{guarded_header, HeaderLinks};
use super::{GeneratedFile, HeaderGenerator, HeaderUnit};
use crate::build::generated_type::GeneratedType;
use crate::error::Result;
use crate::generators::base::name_table::{camel_case_path, NameTable};
use std::collections::{BTreeSet, HashMap};

/// A header per nested type next to the unit's main header. The main
/// header keeps the top-level types and includes the nested headers last,
/// so including it still declares the whole unit.
pub struct MultiFileHeaderGenerator;

impl MultiFileHeaderGenerator {
    /// Output path, without suffix, of the file declaring `generated`.
    fn type_path(unit: &HeaderUnit<'_>, generated: &GeneratedType) -> String {
        if !generated.type_name().contains('$') {
            return unit.output_path.to_string();
        }
        let short = NameTable::short_name(generated.type_name());
        match unit.output_path.rsplit_once('/') {
            Some((dir, _)) => format!("{}/{}", dir, short),
            None => short,
        }
    }
}

impl HeaderGenerator for MultiFileHeaderGenerator {
    fn generate(&self, unit: &HeaderUnit<'_>) -> Result<Vec<GeneratedFile>> {
        let suffix = &unit.ctx.options.header_suffix;
        let types = unit.public_types();

        // File paths in first-appearance order; the main header comes first.
        let mut paths: Vec<String> = vec![unit.output_path.to_string()];
        let mut grouped: HashMap<String, Vec<&GeneratedType>> = HashMap::new();
        let mut path_of: HashMap<&str, String> = HashMap::new();
        for generated in &types {
            let path = Self::type_path(unit, generated);
            if !paths.contains(&path) {
                paths.push(path.clone());
            }
            path_of.insert(generated.objc_name(), path.clone());
            grouped.entry(path).or_default().push(*generated);
        }

        let mut files = Vec::with_capacity(paths.len());
        for (idx, path) in paths.iter().enumerate() {
            let members = grouped.remove(path).unwrap_or_default();

            let mut links = HeaderLinks::default();
            let leading: BTreeSet<String> = members
                .iter()
                .flat_map(|t| t.header_includes())
                .filter_map(|import| path_of.get(import.type_name.as_str()))
                .filter(|other| *other != path)
                .map(|other| format!("{}{}", other, suffix))
                .collect();
            links.leading = leading;
            if idx == 0 {
                links.trailing = paths[1..]
                    .iter()
                    .map(|other| format!("{}{}", other, suffix))
                    .collect();
            }

            let contents = guarded_header(unit, &members, &camel_case_path(path), &links)?;
            files.push(GeneratedFile {
                path: format!("{}{}", path, suffix),
                contents,
            });
        }
        Ok(files)
    }
}
