pub mod dependency_resolver;
pub mod generated_type;
pub mod generation_unit;
pub mod output_manager;
pub mod project_scanner;

use crate::analysis::ast_cache::{AstCache, LoadedFile};
use crate::error::Result;
use crate::interface::config::{ConfigError, GenerateConfig};
use crate::interface::output::{Logger, ProgressReporter};
use std::path::{Path, PathBuf};

pub use dependency_resolver::*;
pub use generated_type::GeneratedType;
pub use generation_unit::*;
pub use output_manager::*;
pub use project_scanner::*;

/// What one run produced.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    /// Written files, relative to the output directory.
    pub files: Vec<String>,
    /// Units skipped because their inputs could not be loaded.
    pub skipped: Vec<String>,
    /// Units whose generation failed, with the failure.
    pub failed: Vec<(String, String)>,
    /// Stale generated files removed from the output directory.
    pub cleaned: Vec<String>,
}

impl GenerationSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// End-to-end driver: load AST files, form units, generate, write.
pub struct BuildSystem {
    logger: Logger,
}

impl BuildSystem {
    pub fn new(verbose: bool, debug: bool) -> Self {
        Self {
            logger: Logger::new(verbose, debug),
        }
    }

    /// Generate from the `java2objc.json` found from the current directory.
    pub fn generate_at_build_time() -> Result<GenerationSummary> {
        let build_system = Self::new(false, false);
        build_system.run_generation(&ProjectScanner::new())
    }

    /// Run the complete generation process for the project the scanner finds
    pub fn run_generation(&self, scanner: &ProjectScanner) -> Result<GenerationSummary> {
        let Some(project_info) = scanner
            .detect_project()
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?
        else {
            self.logger
                .info("No java2objc.json found, skipping generation");
            return Ok(GenerationSummary::default());
        };
        self.logger.debug(&format!(
            "Found project at {}",
            project_info.root_path.display()
        ));

        let mut config = self.load_configuration(&project_info)?;
        config.input_path = project_info
            .resolve(&config.input_path)
            .to_string_lossy()
            .to_string();
        config.output_path = project_info
            .resolve(&config.output_path)
            .to_string_lossy()
            .to_string();
        self.generate(&config)
    }

    fn load_configuration(&self, project_info: &ProjectInfo) -> Result<GenerateConfig> {
        let content = std::fs::read_to_string(&project_info.config_path)?;
        let config: GenerateConfig = serde_json::from_str(&content).map_err(ConfigError::from)?;
        self.logger.debug(&format!(
            "Loaded configuration from {}",
            project_info.config_path.display()
        ));
        Ok(config)
    }

    /// Generate every unit below `config.input_path` into `config.output_path`.
    /// A unit that fails is reported and does not stop the others.
    pub fn generate(&self, config: &GenerateConfig) -> Result<GenerationSummary> {
        let mut reporter = ProgressReporter::new(self.logger.clone(), 4);
        let mut summary = GenerationSummary::default();

        reporter.start_step("Validating configuration");
        if let Err(e) = config.validate() {
            reporter.fail_step(&e.to_string());
            return Err(e.into());
        }
        let excludes = config.exclude_regexes()?;
        let options = &config.translation;
        let names = options.name_table();
        reporter.complete_step(Some(&format!(
            "{} headers, {}",
            options.header_style,
            if options.is_arc() { "ARC" } else { "reference counting" }
        )));

        reporter.start_step("Loading AST files");
        let mut cache = AstCache::new();
        cache.parse_and_cache_all_files(Path::new(&config.input_path), &excludes, &self.logger)?;
        reporter.complete_step(Some(&format!("Loaded {} files", cache.len())));

        reporter.start_step("Generating Objective-C sources");
        let units = self.build_units(&mut cache, Path::new(&config.input_path))?;
        let mut generated = Vec::with_capacity(units.len());
        for unit in units {
            if unit.has_errors() {
                self.logger.warning(&format!(
                    "Skipping {}: {}",
                    unit.name(),
                    unit.errors().join("; ")
                ));
                summary.skipped.push(unit.name().to_string());
                continue;
            }
            match unit.generate(options, &names) {
                Ok(output) => {
                    reporter.update_progress(&format!("Generated {}", unit.output_path()));
                    generated.push(output);
                }
                Err(e) => {
                    self.logger
                        .error(&format!("Failed to generate {}: {}", unit.name(), e));
                    summary.failed.push((unit.name().to_string(), e.to_string()));
                }
            }
        }
        reporter.complete_step(Some(&format!("Generated {} units", generated.len())));

        reporter.start_step("Writing output");
        let mut output_manager = OutputManager::new(&config.output_path);
        output_manager.prepare_output_directory()?;
        for output in &generated {
            for file in output.files() {
                output_manager.write_generated(file)?;
                self.logger.verbose(&format!("  {}", file.path));
                summary.files.push(file.path.clone());
            }
        }
        // Stale files are only removed after a clean run.
        if summary.is_success() && summary.skipped.is_empty() {
            summary.cleaned = output_manager.finalize_generation(&summary.files)?;
        }
        reporter.complete_step(Some(&format!("Wrote {} files", summary.files.len())));

        reporter.finish(&format!(
            "Generated {} files in {}",
            summary.files.len(),
            config.output_path
        ));
        Ok(summary)
    }

    /// One unit per AST file, in path order.
    fn build_units(&self, cache: &mut AstCache, input_root: &Path) -> Result<Vec<GenerationUnit>> {
        let mut units = Vec::with_capacity(cache.len());
        for (path, loaded) in cache.drain() {
            let name = display_name(&path, input_root);
            let mut builder = GenerationUnitBuilder::new(&name);
            builder.add_input_file(&path.to_string_lossy());
            match loaded {
                LoadedFile::Parsed(unit) => {
                    builder.assign_output_path(output_path_for(&unit));
                    builder.add_compilation_unit(unit)?;
                }
                LoadedFile::Failed(message) => {
                    let stem = name.strip_suffix(".json").unwrap_or(&name).to_string();
                    builder.add_error(message).assign_output_path(stem);
                }
            }
            units.push(builder.build()?);
        }
        Ok(units)
    }
}

fn display_name(path: &Path, root: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    relative.to_string_lossy().replace('\\', "/")
}
