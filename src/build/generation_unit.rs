use super::dependency_resolver::DependencyResolver;
use super::generated_type::GeneratedType;
use crate::ast::{CompilationUnit, TypeDeclaration};
use crate::error::{Error, Result};
use crate::generators::base::name_table::NameTable;
use crate::generators::base::type_generator::GeneratorContext;
use crate::generators::header::source_alias::alias_file;
use crate::generators::header::{
    create_header_generator, GeneratedFile, HeaderUnit, ImplementationFileGenerator,
};
use crate::interface::config::TranslationOptions;
use std::collections::HashMap;

/// Collects the inputs of a unit while its files are parsed. Output paths
/// are assigned late, after parsing.
#[derive(Debug, Default)]
pub struct GenerationUnitBuilder {
    name: String,
    input_files: Vec<String>,
    compilation_units: Vec<CompilationUnit>,
    errors: Vec<String>,
    output_path: Option<String>,
}

impl GenerationUnitBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn add_input_file(&mut self, path: &str) -> &mut Self {
        self.input_files.push(path.to_string());
        self
    }

    /// Fails when the unit would hold more parsed units than input files.
    pub fn add_compilation_unit(&mut self, unit: CompilationUnit) -> Result<&mut Self> {
        if self.compilation_units.len() >= self.input_files.len() {
            return Err(Error::invalid_unit(
                &self.name,
                format!(
                    "more compilation units than input files ({})",
                    self.input_files.len()
                ),
            ));
        }
        self.compilation_units.push(unit);
        Ok(self)
    }

    pub fn add_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.errors.push(message.into());
        self
    }

    pub fn assign_output_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn compilation_units(&self) -> &[CompilationUnit] {
        &self.compilation_units
    }

    pub fn build(self) -> Result<GenerationUnit> {
        let Some(output_path) = self.output_path else {
            return Err(Error::invalid_unit(&self.name, "no output path assigned"));
        };
        Ok(GenerationUnit {
            name: self.name,
            output_path,
            input_files: self.input_files,
            compilation_units: self.compilation_units,
            errors: self.errors,
        })
    }
}

/// One or more compilation units that produce one header/implementation pair.
#[derive(Debug, Clone)]
pub struct GenerationUnit {
    name: String,
    output_path: String,
    input_files: Vec<String>,
    compilation_units: Vec<CompilationUnit>,
    errors: Vec<String>,
}

/// Texts produced for a unit, each ending with a single newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// The main header comes first.
    pub headers: Vec<GeneratedFile>,
    pub implementation: GeneratedFile,
    pub alias: Option<GeneratedFile>,
}

impl GeneratedUnit {
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.headers
            .iter()
            .chain(std::iter::once(&self.implementation))
            .chain(self.alias.iter())
    }
}

impl GenerationUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output path without suffix, e.g. `com/foo/Bar`.
    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn input_files(&self) -> &[String] {
        &self.input_files
    }

    pub fn compilation_units(&self) -> &[CompilationUnit] {
        &self.compilation_units
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Source path shown in banners: the first unit's, or the unit name.
    pub fn source_path(&self) -> &str {
        self.compilation_units
            .first()
            .map_or(self.name.as_str(), |unit| unit.source_path.as_str())
    }

    /// Orders the unit's types supertype first, generates each once and
    /// assembles the files. Nothing is written.
    pub fn generate(&self, options: &TranslationOptions, names: &NameTable) -> Result<GeneratedUnit> {
        if self.compilation_units.is_empty() {
            return Err(Error::invalid_unit(&self.name, "no compilation units"));
        }

        let mut resolver = DependencyResolver::new();
        let mut declared: HashMap<&str, (&CompilationUnit, &TypeDeclaration)> = HashMap::new();
        for unit in &self.compilation_units {
            for decl in &unit.types {
                let supertypes: Vec<String> = decl.supertypes().map(str::to_string).collect();
                resolver.add_node(&decl.name, &supertypes)?;
                declared.insert(decl.name.as_str(), (unit, decl));
            }
        }

        let mut types = Vec::with_capacity(resolver.len());
        for node in resolver.resolve_build_order()? {
            let Some((unit, decl)) = declared.get(node.name.as_str()) else {
                return Err(Error::MissingName(node.name.clone()));
            };
            let ctx = GeneratorContext::new(options, names, &unit.source_path);
            types.push(GeneratedType::generate(ctx, decl)?);
        }

        let ctx = GeneratorContext::new(options, names, self.source_path());
        let header_unit = HeaderUnit::new(ctx, &self.output_path, &types);
        let headers = create_header_generator(options.header_style).generate(&header_unit)?;
        let implementation = ImplementationFileGenerator.generate(&header_unit)?;
        let alias = if options.source_alias {
            alias_file(&header_unit)
        } else {
            None
        };

        Ok(GeneratedUnit {
            headers,
            implementation,
            alias,
        })
    }
}

/// Default output path of a compilation unit: its package directories
/// followed by the main type's simple name, or the source file stem.
pub fn output_path_for(unit: &CompilationUnit) -> String {
    let stem = unit
        .main_type
        .as_deref()
        .map(|name| {
            let simple = name.rsplit('.').next().unwrap_or(name);
            simple.split('$').next().unwrap_or(simple).to_string()
        })
        .unwrap_or_else(|| {
            let file = unit.source_file_name();
            file.strip_suffix(".java").unwrap_or(file).to_string()
        });
    match unit.package.as_deref().filter(|p| !p.is_empty()) {
        Some(package) => format!("{}/{}", package.replace('.', "/"), stem),
        None => stem,
    }
}
