use crate::interface::config::{GenerateConfig, HeaderStyle, MemoryManagement};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "java2objc")]
#[command(version, about = "Generate Objective-C headers and sources from a typed Java AST")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Objective-C headers and implementations from AST JSON files
    Generate(GenerateArgs),
    /// Write a java2objc.json with default settings
    Init {
        /// Directory holding the AST JSON files
        #[arg(short = 'i', long = "input-path", default_value = "./build/ast")]
        input_path: PathBuf,

        /// Output directory for generated sources
        #[arg(short = 'o', long = "output-path", default_value = "./build/objc")]
        output_path: PathBuf,

        /// Where to write the configuration file
        #[arg(short = 'c', long = "config", default_value = "java2objc.json")]
        config_file: PathBuf,

        /// Header layout: monolithic, segmented or multi_file
        #[arg(long = "header-style")]
        header_style: Option<HeaderStyle>,

        /// Force overwrite existing configuration
        #[arg(long, action = clap::ArgAction::SetTrue)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Directory holding the AST JSON files
    #[arg(short = 'i', long = "input-path")]
    pub input_path: Option<PathBuf>,

    /// Output directory for generated sources
    #[arg(short = 'o', long = "output-path")]
    pub output_path: Option<PathBuf>,

    /// Configuration file path (default: ./java2objc.json when present)
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<PathBuf>,

    /// Verbose output
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Header layout: monolithic, segmented or multi_file
    #[arg(long = "header-style")]
    pub header_style: Option<HeaderStyle>,

    /// Generate code for automatic reference counting
    #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "rc")]
    pub arc: bool,

    /// Generate code for manual reference counting
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub rc: bool,

    /// Emit #line directives pointing back at the Java sources
    #[arg(long = "line-directives", action = clap::ArgAction::SetTrue)]
    pub line_directives: bool,

    /// Append navigation metadata to generated headers
    #[arg(long = "navigation-metadata", action = clap::ArgAction::SetTrue)]
    pub navigation_metadata: bool,

    /// Also write a header at each Java source's relative path
    #[arg(long = "source-alias", action = clap::ArgAction::SetTrue)]
    pub source_alias: bool,
}

impl GenerateArgs {
    /// Command-line values take precedence over the loaded configuration.
    /// Flags only ever switch options on.
    pub fn apply_to(&self, config: &mut GenerateConfig) {
        if let Some(input_path) = &self.input_path {
            config.input_path = input_path.to_string_lossy().to_string();
        }
        if let Some(output_path) = &self.output_path {
            config.output_path = output_path.to_string_lossy().to_string();
        }
        if self.verbose {
            config.verbose = Some(true);
        }

        let options = &mut config.translation;
        if let Some(style) = self.header_style {
            options.header_style = style;
        }
        if self.arc {
            options.memory_management = MemoryManagement::Arc;
        } else if self.rc {
            options.memory_management = MemoryManagement::ReferenceCounting;
        }
        options.emit_line_directives |= self.line_directives;
        options.navigation_metadata |= self.navigation_metadata;
        options.source_alias |= self.source_alias;
    }
}

impl From<&Commands> for GenerateConfig {
    fn from(cmd: &Commands) -> Self {
        let mut config = GenerateConfig::default();
        match cmd {
            Commands::Generate(args) => args.apply_to(&mut config),
            Commands::Init {
                input_path,
                output_path,
                header_style,
                ..
            } => {
                config.input_path = input_path.to_string_lossy().to_string();
                config.output_path = output_path.to_string_lossy().to_string();
                if let Some(style) = header_style {
                    config.translation.header_style = *style;
                }
            }
        }
        config
    }
}
