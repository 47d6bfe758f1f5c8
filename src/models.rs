use crate::ast::SourceRange;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// A reference to another type needed by a generated file.
///
/// Identity is the target type name alone: two imports of the same type with
/// different include files are the same import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Import {
    /// Generated type name, e.g. `JavaUtilList`.
    pub type_name: String,
    /// Java binary name, e.g. `java.util.List`.
    pub java_name: String,
    /// Header that declares the type, e.g. `java/util/List.h`.
    #[serde(default)]
    pub import_file_name: Option<String>,
    /// Replaces the default `@class`/`@protocol` forward declaration.
    #[serde(default)]
    pub forward_declaration: Option<String>,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub generic_parameters: Vec<String>,
}

impl Import {
    pub fn new(type_name: &str, java_name: &str, is_interface: bool) -> Self {
        Self {
            type_name: type_name.to_string(),
            java_name: java_name.to_string(),
            import_file_name: None,
            forward_declaration: None,
            is_interface,
            generic_parameters: Vec::new(),
        }
    }

    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.import_file_name = Some(file_name.to_string());
        self
    }

    pub fn forward_declaration_text(&self) -> String {
        if let Some(text) = &self.forward_declaration {
            return text.clone();
        }
        let keyword = if self.is_interface { "@protocol" } else { "@class" };
        if self.generic_parameters.is_empty() || self.is_interface {
            format!("{} {};", keyword, self.type_name)
        } else {
            format!(
                "{} {}<{}>;",
                keyword,
                self.type_name,
                self.generic_parameters.join(", ")
            )
        }
    }

    /// Sort key used when emitting `#include` lines.
    pub fn include_sort_key(&self) -> &str {
        self.import_file_name.as_deref().unwrap_or(&self.type_name)
    }
}

impl PartialEq for Import {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl Eq for Import {}

impl Hash for Import {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
    }
}

impl PartialOrd for Import {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Import {
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_name.cmp(&other.type_name)
    }
}

pub type ImportSet = BTreeSet<Import>;

/// Forward declarations and includes collected for one visibility scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedImports {
    pub forward_declarations: ImportSet,
    pub includes: ImportSet,
}

impl CollectedImports {
    /// Includes ordered by header file name.
    pub fn sorted_includes(&self) -> Vec<&Import> {
        let mut includes: Vec<&Import> = self.includes.iter().collect();
        includes.sort_by(|a, b| a.include_sort_key().cmp(b.include_sort_key()));
        includes
    }
}

/// Correlates an identifier in the Java source with its span in generated text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceMapping {
    pub identifier: String,
    pub source: SourceRange,
    pub target_begin: usize,
    pub target_end: usize,
}

impl SourceMapping {
    pub fn new(identifier: &str, source: SourceRange, target_begin: usize, length: usize) -> Self {
        Self {
            identifier: identifier.to_string(),
            source,
            target_begin,
            target_end: target_begin + length,
        }
    }

    /// The same mapping after its text was placed at `offset` in a larger file.
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            identifier: self.identifier.clone(),
            source: self.source,
            target_begin: self.target_begin + offset,
            target_end: self.target_end + offset,
        }
    }
}
