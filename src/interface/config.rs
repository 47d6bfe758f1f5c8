use crate::generators::base::name_table::NameTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid file suffix: {0}. Suffixes must start with '.'")]
    InvalidSuffix(String),
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Memory-management model of the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryManagement {
    #[default]
    Arc,
    ReferenceCounting,
}

/// How the types of one unit are laid out across header files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStyle {
    /// One guard around the whole header
    #[default]
    Monolithic,
    /// One guard per type, selectable through `INCLUDE_` flags
    Segmented,
    /// One header per type
    MultiFile,
}

impl fmt::Display for HeaderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderStyle::Monolithic => write!(f, "monolithic"),
            HeaderStyle::Segmented => write!(f, "segmented"),
            HeaderStyle::MultiFile => write!(f, "multi_file"),
        }
    }
}

impl FromStr for HeaderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monolithic" => Ok(HeaderStyle::Monolithic),
            "segmented" => Ok(HeaderStyle::Segmented),
            "multi_file" | "multi-file" => Ok(HeaderStyle::MultiFile),
            other => Err(format!(
                "unknown header style '{}', expected monolithic, segmented or multi_file",
                other
            )),
        }
    }
}

/// Options read by the generators. Shared by reference and never mutated
/// once generation starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOptions {
    #[serde(default = "default_header_suffix")]
    pub header_suffix: String,

    #[serde(default = "default_implementation_suffix")]
    pub implementation_suffix: String,

    #[serde(default)]
    pub memory_management: MemoryManagement,

    /// Emit `#line` directives pointing back at the Java source
    #[serde(default)]
    pub emit_line_directives: bool,

    /// Append base64 navigation metadata to headers
    #[serde(default)]
    pub navigation_metadata: bool,

    #[serde(default = "default_navigation_corpus")]
    pub navigation_corpus: String,

    #[serde(default)]
    pub header_style: HeaderStyle,

    /// Also write a header named after the Java source path that includes the real one
    #[serde(default)]
    pub source_alias: bool,

    #[serde(default)]
    pub static_accessor_methods: bool,

    #[serde(default)]
    pub class_properties: bool,

    #[serde(default)]
    pub nullability: bool,

    #[serde(default = "default_true")]
    pub deprecated_declarations: bool,

    #[serde(default)]
    pub swift_enums: bool,

    /// Omit the `__metadata` and `__annotations` reflection support
    #[serde(default)]
    pub strip_reflection: bool,

    /// Package name to class-name prefix
    #[serde(default)]
    pub package_prefixes: BTreeMap<String, String>,
}

fn default_header_suffix() -> String {
    ".h".to_string()
}

fn default_implementation_suffix() -> String {
    ".m".to_string()
}

fn default_navigation_corpus() -> String {
    "java2objc".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            header_suffix: default_header_suffix(),
            implementation_suffix: default_implementation_suffix(),
            memory_management: MemoryManagement::default(),
            emit_line_directives: false,
            navigation_metadata: false,
            navigation_corpus: default_navigation_corpus(),
            header_style: HeaderStyle::default(),
            source_alias: false,
            static_accessor_methods: false,
            class_properties: false,
            nullability: false,
            deprecated_declarations: true,
            swift_enums: false,
            strip_reflection: false,
            package_prefixes: BTreeMap::new(),
        }
    }
}

impl TranslationOptions {
    pub fn is_arc(&self) -> bool {
        self.memory_management == MemoryManagement::Arc
    }

    pub fn is_reference_counted(&self) -> bool {
        self.memory_management == MemoryManagement::ReferenceCounting
    }

    pub fn name_table(&self) -> NameTable {
        NameTable::with_prefixes(self.package_prefixes.clone())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for suffix in [&self.header_suffix, &self.implementation_suffix] {
            if !suffix.starts_with('.') || suffix.len() < 2 {
                return Err(ConfigError::InvalidSuffix(suffix.clone()));
            }
        }
        if self.header_suffix == self.implementation_suffix {
            return Err(ConfigError::InvalidConfig(format!(
                "Header and implementation suffixes are both '{}'",
                self.header_suffix
            )));
        }
        if self.navigation_metadata && self.navigation_corpus.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Navigation metadata requires a corpus name".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateConfig {
    /// Directory holding the AST JSON files
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Output directory for generated Objective-C sources
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: Option<bool>,

    /// Regular expressions matched against AST file paths to skip
    #[serde(default)]
    pub exclude_patterns: Option<Vec<String>>,

    #[serde(default)]
    pub translation: TranslationOptions,
}

fn default_input_path() -> String {
    "./build/ast".to_string()
}

fn default_output_path() -> String {
    "./build/objc".to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            verbose: Some(false),
            exclude_patterns: None,
            translation: TranslationOptions::default(),
        }
    }
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.translation.validate()?;

        let input_path = Path::new(&self.input_path);
        if !input_path.exists() {
            return Err(ConfigError::InvalidConfig(format!(
                "Input path does not exist: {}",
                self.input_path
            )));
        }

        self.exclude_regexes()?;
        Ok(())
    }

    /// Compiled exclude patterns
    pub fn exclude_regexes(&self) -> Result<Vec<Regex>, ConfigError> {
        self.exclude_patterns
            .iter()
            .flatten()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// Merge with another configuration, with other taking precedence
    pub fn merge(&mut self, other: &GenerateConfig) {
        if other.input_path != default_input_path() {
            self.input_path = other.input_path.clone();
        }
        if other.output_path != default_output_path() {
            self.output_path = other.output_path.clone();
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns.clone();
        }
        if other.translation != TranslationOptions::default() {
            self.translation = other.translation.clone();
        }
    }

    /// Get effective verbose setting
    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }
}
