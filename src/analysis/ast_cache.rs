use crate::ast::CompilationUnit;
use crate::error::Result;
use crate::interface::output::Logger;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of loading one AST file. A file that fails to load keeps its
/// error message so the unit built from it can carry it.
#[derive(Debug, Clone)]
pub enum LoadedFile {
    Parsed(CompilationUnit),
    Failed(String),
}

/// AST files below an input directory, keyed by path for a stable order.
#[derive(Debug, Default)]
pub struct AstCache {
    cache: BTreeMap<PathBuf, LoadedFile>,
}

impl AstCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file below `input_path` whose path matches none
    /// of `excludes`. Unreadable or malformed files are recorded, not fatal.
    pub fn parse_and_cache_all_files(
        &mut self,
        input_path: &Path,
        excludes: &[Regex],
        logger: &Logger,
    ) -> Result<()> {
        logger.verbose(&format!("Loading AST files from: {}", input_path.display()));

        for entry in WalkDir::new(input_path).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file() || !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }

            let display = path.to_string_lossy();
            if excludes.iter().any(|pattern| pattern.is_match(&display)) {
                logger.debug(&format!("Excluded: {}", display));
                continue;
            }

            match Self::parse_file(path) {
                Ok(unit) => {
                    logger.verbose(&format!("Parsed: {}", display));
                    self.cache.insert(path.to_path_buf(), LoadedFile::Parsed(unit));
                }
                Err(e) => {
                    logger.warning(&format!("Failed to load {}: {}", display, e));
                    self.cache
                        .insert(path.to_path_buf(), LoadedFile::Failed(e.to_string()));
                }
            }
        }

        logger.debug(&format!("Cached {} AST files", self.cache.len()));
        Ok(())
    }

    /// Parse a single file and add it to the cache
    pub fn parse_and_cache_file(&mut self, path: &Path) -> Result<()> {
        let unit = Self::parse_file(path)?;
        self.cache.insert(path.to_path_buf(), LoadedFile::Parsed(unit));
        Ok(())
    }

    fn parse_file(path: &Path) -> Result<CompilationUnit> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get(&self, path: &Path) -> Option<&CompilationUnit> {
        match self.cache.get(path) {
            Some(LoadedFile::Parsed(unit)) => Some(unit),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &LoadedFile)> {
        self.cache.iter()
    }

    /// Paths and messages of the files that failed to load
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.cache.iter().filter_map(|(path, loaded)| match loaded {
            LoadedFile::Failed(message) => Some((path, message.as_str())),
            LoadedFile::Parsed(_) => None,
        })
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.cache.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Hand the loaded files over, emptying the cache.
    pub fn drain(&mut self) -> impl Iterator<Item = (PathBuf, LoadedFile)> {
        std::mem::take(&mut self.cache).into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const UNIT_JSON: &str = r#"{
        "source_path": "com/foo/Bar.java",
        "package": "com.foo",
        "types": [{ "name": "com.foo.Bar", "kind": "class" }]
    }"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn quiet() -> Logger {
        Logger::new(false, false)
    }

    mod initialization {
        use super::*;

        #[test]
        fn test_new_creates_empty_cache() {
            let cache = AstCache::new();
            assert!(cache.is_empty());
            assert_eq!(cache.len(), 0);
        }
    }

    mod single_file_operations {
        use super::*;

        #[test]
        fn test_parse_and_cache_single_file() {
            let dir = TempDir::new().unwrap();
            let path = write(dir.path(), "Bar.json", UNIT_JSON);

            let mut cache = AstCache::new();
            cache.parse_and_cache_file(&path).unwrap();
            let unit = cache.get(&path).unwrap();
            assert_eq!(unit.source_path, "com/foo/Bar.java");
            assert_eq!(unit.types[0].name, "com.foo.Bar");
        }

        #[test]
        fn test_malformed_file_errors() {
            let dir = TempDir::new().unwrap();
            let path = write(dir.path(), "Bad.json", "{ \"source_path\": ");

            let mut cache = AstCache::new();
            assert!(cache.parse_and_cache_file(&path).is_err());
            assert!(cache.is_empty());
        }
    }

    mod directory_operations {
        use super::*;

        #[test]
        fn test_loads_only_json_files() {
            let dir = TempDir::new().unwrap();
            write(dir.path(), "com/foo/Bar.json", UNIT_JSON);
            write(dir.path(), "com/foo/notes.txt", "not an AST");

            let mut cache = AstCache::new();
            cache
                .parse_and_cache_all_files(dir.path(), &[], &quiet())
                .unwrap();
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_failures_are_recorded() {
            let dir = TempDir::new().unwrap();
            write(dir.path(), "Good.json", UNIT_JSON);
            let bad = write(dir.path(), "Bad.json", "[]");

            let mut cache = AstCache::new();
            cache
                .parse_and_cache_all_files(dir.path(), &[], &quiet())
                .unwrap();
            assert_eq!(cache.len(), 2);
            let failures: Vec<_> = cache.failures().collect();
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].0, &bad);
        }

        #[test]
        fn test_exclude_patterns() {
            let dir = TempDir::new().unwrap();
            write(dir.path(), "com/foo/Bar.json", UNIT_JSON);
            write(dir.path(), "com/foo/test/BarTest.json", UNIT_JSON);

            let excludes = vec![Regex::new("/test/").unwrap()];
            let mut cache = AstCache::new();
            cache
                .parse_and_cache_all_files(dir.path(), &excludes, &quiet())
                .unwrap();
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_drain_empties_cache_in_path_order() {
            let dir = TempDir::new().unwrap();
            write(dir.path(), "b/B.json", UNIT_JSON);
            write(dir.path(), "a/A.json", UNIT_JSON);

            let mut cache = AstCache::new();
            cache
                .parse_and_cache_all_files(dir.path(), &[], &quiet())
                .unwrap();
            let paths: Vec<PathBuf> = cache.drain().map(|(path, _)| path).collect();
            assert!(paths[0].ends_with("a/A.json"));
            assert!(paths[1].ends_with("b/B.json"));
            assert!(cache.is_empty());
        }
    }
}
