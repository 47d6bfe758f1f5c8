use crate::generators::header::GeneratedFile;
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// First line after the opening `//` of every generated header and source.
const GENERATED_MARKER: &str = "//  Generated by java2objc-gen.";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid output path: {0}")]
    InvalidPath(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Hands generated texts to the file system. Paths are relative to the
/// output directory and use `/` separators.
pub struct OutputManager {
    output_dir: PathBuf,
    managed_files: HashSet<String>,
}

impl OutputManager {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            managed_files: HashSet::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Ensure the output directory exists and is writable
    pub fn prepare_output_directory(&self) -> Result<(), OutputError> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(|e| {
                OutputError::PermissionDenied(format!(
                    "Cannot create output directory {}: {}",
                    self.output_dir.display(),
                    e
                ))
            })?;
        }

        let test_file = self.output_dir.join(".write_test");
        fs::write(&test_file, "test").map_err(|e| {
            OutputError::PermissionDenied(format!(
                "Cannot write to output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;
        fs::remove_file(&test_file).ok();

        Ok(())
    }

    /// Register a file as managed by this generator
    pub fn register_managed_file(&mut self, filename: &str) {
        self.managed_files.insert(filename.to_string());
    }

    /// Write a file below the output directory, creating parent directories.
    /// The text goes to a temporary sibling first and is renamed into place.
    pub fn write_file(&self, filename: &str, content: &str) -> Result<PathBuf, OutputError> {
        if filename.is_empty() || Path::new(filename).is_absolute() || filename.contains("..") {
            return Err(OutputError::InvalidPath(filename.to_string()));
        }
        let file_path = self.output_dir.join(filename);

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut temp_name = file_path.clone().into_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &file_path)?;

        Ok(file_path)
    }

    pub fn write_generated(&mut self, file: &GeneratedFile) -> Result<PathBuf, OutputError> {
        let path = self.write_file(&file.path, &file.contents)?;
        self.register_managed_file(&file.path);
        Ok(path)
    }

    /// Remove generated files from earlier runs that this run did not produce.
    /// Files without the generated banner are left alone unless registered.
    pub fn cleanup_old_files(&self, current_files: &[String]) -> Result<Vec<String>, OutputError> {
        let mut cleaned_files = Vec::new();

        if !self.output_dir.exists() {
            return Ok(cleaned_files);
        }

        let current_set: HashSet<&str> = current_files.iter().map(String::as_str).collect();

        for entry in WalkDir::new(&self.output_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| OutputError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative) = self.relative_name(entry.path()) else {
                continue;
            };
            if !current_set.contains(relative.as_str()) && self.is_generated_file(entry.path())? {
                fs::remove_file(entry.path())?;
                cleaned_files.push(relative);
            }
        }

        Ok(cleaned_files)
    }

    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.output_dir).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    /// A file is ours when it was registered or starts with the banner.
    fn is_generated_file(&self, path: &Path) -> Result<bool, OutputError> {
        if let Some(relative) = self.relative_name(path) {
            if self.managed_files.contains(&relative) {
                return Ok(true);
            }
        }
        if !matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("h" | "m" | "mm")
        ) {
            return Ok(false);
        }
        let mut head = Vec::with_capacity(64);
        fs::File::open(path)?.take(64).read_to_end(&mut head)?;
        let head = String::from_utf8_lossy(&head);
        Ok(head
            .strip_prefix("//\n")
            .is_some_and(|rest| rest.starts_with(GENERATED_MARKER)))
    }

    /// Verify that all expected files were generated
    pub fn verify_output(&self, expected_files: &[String]) -> Result<Vec<String>, OutputError> {
        let mut missing_files = Vec::new();

        for expected in expected_files {
            let file_path = self.output_dir.join(expected);
            if !file_path.exists() {
                missing_files.push(expected.clone());
            }
        }

        Ok(missing_files)
    }

    /// Get metadata about the files below the output directory
    pub fn get_generation_metadata(&self) -> Result<GenerationMetadata, OutputError> {
        let mut metadata = GenerationMetadata {
            output_directory: self.output_dir.clone(),
            files: Vec::new(),
            total_size: 0,
        };

        if !self.output_dir.exists() {
            return Ok(metadata);
        }

        for entry in WalkDir::new(&self.output_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| OutputError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = self.relative_name(entry.path()) else {
                continue;
            };
            let size = entry.metadata().map_err(|e| OutputError::Io(e.into()))?.len();
            metadata.total_size += size;
            metadata.files.push(FileMetadata {
                name,
                path: entry.path().to_path_buf(),
                size,
            });
        }

        Ok(metadata)
    }

    /// Finalize the generation process
    pub fn finalize_generation(&mut self, generated_files: &[String]) -> Result<Vec<String>, OutputError> {
        self.prepare_output_directory()?;

        for file in generated_files {
            self.register_managed_file(file);
        }

        let cleaned = self.cleanup_old_files(generated_files)?;

        let missing = self.verify_output(generated_files)?;
        if !missing.is_empty() {
            return Err(OutputError::InvalidPath(format!(
                "Missing generated files: {}",
                missing.join(", ")
            )));
        }

        Ok(cleaned)
    }

    /// Create a summary report of the generation process
    pub fn create_summary_report(&self) -> Result<String, OutputError> {
        let metadata = self.get_generation_metadata()?;

        let mut report = String::new();
        report.push_str("# Objective-C Generation Summary\n\n");
        report.push_str(&format!(
            "Output directory: {}\n",
            metadata.output_directory.display()
        ));
        report.push_str(&format!("Total files: {}\n", metadata.files.len()));
        report.push_str(&format!("Total size: {} bytes\n\n", metadata.total_size));

        report.push_str("## Generated Files\n\n");
        for file in &metadata.files {
            report.push_str(&format!("- **{}** ({} bytes)\n", file.name, file.size));
        }

        Ok(report)
    }
}

#[derive(Debug)]
pub struct GenerationMetadata {
    pub output_directory: PathBuf,
    pub files: Vec<FileMetadata>,
    pub total_size: u64,
}

#[derive(Debug)]
pub struct FileMetadata {
    /// Path relative to the output directory.
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}
