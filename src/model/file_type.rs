//! File type classification by extension.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The language or format of a source file, derived from its extension.
///
/// Extensions are matched case-insensitively, so `Main.JAVA` classifies
/// the same as `Main.java`. Anything outside the known table, including
/// extensionless paths, maps to [`FileType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    C,
    CPlusPlus,
    Groovy,
    Java,
    JavaScript,
    Kotlin,
    Properties,
    Unknown,
}

impl FileType {
    /// Classifies a bare extension, without its leading dot.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "c" => Self::C,
            "c++" => Self::CPlusPlus,
            "groovy" => Self::Groovy,
            "java" => Self::Java,
            "js" => Self::JavaScript,
            "kt" => Self::Kotlin,
            "properties" => Self::Properties,
            _ => Self::Unknown,
        }
    }

    /// Classifies a path by its final extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|extension| extension.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }

    /// The canonical extension for this type, without its leading dot.
    /// Empty for [`FileType::Unknown`].
    pub fn extension(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::CPlusPlus => "c++",
            Self::Groovy => "groovy",
            Self::Java => "java",
            Self::JavaScript => "js",
            Self::Kotlin => "kt",
            Self::Properties => "properties",
            Self::Unknown => "",
        }
    }

    /// Whether the type is one of the recognized languages or formats.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions() {
        assert_eq!(FileType::from_extension("c"), FileType::C);
        assert_eq!(FileType::from_extension("c++"), FileType::CPlusPlus);
        assert_eq!(FileType::from_extension("groovy"), FileType::Groovy);
        assert_eq!(FileType::from_extension("java"), FileType::Java);
        assert_eq!(FileType::from_extension("js"), FileType::JavaScript);
        assert_eq!(FileType::from_extension("kt"), FileType::Kotlin);
        assert_eq!(FileType::from_extension("properties"), FileType::Properties);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(FileType::from_extension("JAVA"), FileType::Java);
        assert_eq!(FileType::from_extension("Kt"), FileType::Kotlin);
    }

    #[test]
    fn unrecognized_extensions_are_unknown() {
        assert_eq!(FileType::from_extension("rs"), FileType::Unknown);
        assert_eq!(FileType::from_extension(""), FileType::Unknown);
    }

    #[test]
    fn classifies_paths_by_final_extension() {
        assert_eq!(FileType::from_path(Path::new("src/Main.java")), FileType::Java);
        assert_eq!(FileType::from_path(Path::new("app.config.js")), FileType::JavaScript);
        assert_eq!(FileType::from_path(Path::new("Makefile")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new(".gitignore")), FileType::Unknown);
    }

    #[test]
    fn display_renders_the_extension() {
        assert_eq!(FileType::Java.to_string(), "java");
        assert_eq!(FileType::CPlusPlus.to_string(), "c++");
        assert_eq!(FileType::Unknown.to_string(), "");
    }

    #[test]
    fn known_excludes_unknown() {
        assert!(FileType::Java.is_known());
        assert!(!FileType::Unknown.is_known());
    }
}
