use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "java2objc.json";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid project structure: {0}")]
    InvalidProject(String),
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub root_path: PathBuf,
    pub config_path: PathBuf,
}

impl ProjectInfo {
    /// Resolves a configured path against the project root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_path.join(path)
        }
    }
}

pub struct ProjectScanner {
    current_dir: PathBuf,
}

impl ProjectScanner {
    pub fn new() -> Self {
        Self {
            current_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn with_current_dir<P: AsRef<Path>>(path: P) -> Self {
        Self {
            current_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Find the nearest directory holding a `java2objc.json`, walking up
    /// from the current directory.
    pub fn detect_project(&self) -> Result<Option<ProjectInfo>, ScanError> {
        let mut current = self.current_dir.clone();

        loop {
            if let Some(project_info) = self.check_directory(&current)? {
                return Ok(Some(project_info));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    fn check_directory(&self, dir: &Path) -> Result<Option<ProjectInfo>, ScanError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(None);
        }
        if !config_path.is_file() {
            return Err(ScanError::InvalidProject(format!(
                "{} is not a file",
                config_path.display()
            )));
        }
        Ok(Some(ProjectInfo {
            root_path: dir.to_path_buf(),
            config_path,
        }))
    }
}

impl Default for ProjectScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_project_with_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();

        let scanner = ProjectScanner::with_current_dir(temp_dir.path());
        let project_info = scanner.detect_project().unwrap().unwrap();

        assert_eq!(project_info.root_path, temp_dir.path());
        assert_eq!(project_info.config_path, temp_dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_detect_project_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();
        let nested = temp_dir.path().join("src/main/java");
        fs::create_dir_all(&nested).unwrap();

        let scanner = ProjectScanner::with_current_dir(&nested);
        let project_info = scanner.detect_project().unwrap().unwrap();

        assert_eq!(project_info.root_path, temp_dir.path());
    }

    #[test]
    fn test_no_project() {
        let temp_dir = TempDir::new().unwrap();

        let scanner = ProjectScanner::with_current_dir(temp_dir.path());
        let project_info = scanner.detect_project().unwrap();

        assert!(project_info.is_none());
    }

    #[test]
    fn test_config_directory_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let scanner = ProjectScanner::with_current_dir(temp_dir.path());
        assert!(matches!(
            scanner.detect_project(),
            Err(ScanError::InvalidProject(_))
        ));
    }

    #[test]
    fn test_resolve_relative_paths() {
        let project_info = ProjectInfo {
            root_path: PathBuf::from("/work/app"),
            config_path: PathBuf::from("/work/app/java2objc.json"),
        };
        assert_eq!(project_info.resolve("build/ast"), PathBuf::from("/work/app/build/ast"));
        assert_eq!(project_info.resolve("/tmp/out"), PathBuf::from("/tmp/out"));
    }
}
