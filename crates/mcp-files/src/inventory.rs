//! Read-only view of generated modules on disk.

use chrono::{DateTime, Utc};
use mcp_toolgen_core::{CodegenConfig, Error, Result, ToolName};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One generated module found under the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedEntry {
    /// Tool name (the directory name)
    pub name: String,
    /// Path to the module file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time, when the platform reports one
    pub modified: Option<DateTime<Utc>>,
}

/// Lists and reads modules under an output root.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_core::CodegenConfig;
/// use mcp_toolgen_files::GeneratedInventory;
/// # use tempfile::TempDir;
///
/// # let temp = TempDir::new().unwrap();
/// std::fs::create_dir_all(temp.path().join("add")).unwrap();
/// std::fs::write(temp.path().join("add/add.ts"), "export {};\n").unwrap();
///
/// let inventory = GeneratedInventory::from_config(&CodegenConfig::with_output_dir(temp.path()));
/// let entries = inventory.list_generated().unwrap();
///
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].name, "add");
/// assert_eq!(entries[0].size, 11);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratedInventory {
    root: PathBuf,
    extension: String,
}

impl GeneratedInventory {
    /// Creates an inventory over `root` for files ending in `.<extension>`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Creates an inventory matching the layout `config` writes.
    #[must_use]
    pub fn from_config(config: &CodegenConfig) -> Self {
        Self::new(&config.output_dir, &config.file_extension)
    }

    /// Output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists every tool directory that holds its module file, sorted by name.
    ///
    /// A missing root yields an empty list. Directories without a matching
    /// module file and loose files in the root are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilesystemError`] if the root or a module cannot be
    /// inspected.
    pub fn list_generated(&self) -> Result<Vec<GeneratedEntry>> {
        if !self.root.exists() {
            tracing::debug!(root = %self.root.display(), "output root does not exist");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| walk_error(&self.root, e))?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let path = self.module_path(&name);
            let metadata = match std::fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(Error::FilesystemError {
                        path: path.display().to_string(),
                        source,
                    });
                }
            };

            entries.push(GeneratedEntry {
                name,
                size: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                path,
            });
        }

        Ok(entries)
    }

    /// Reads the generated module for `tool`.
    ///
    /// # Errors
    ///
    /// - [`Error::ValidationError`] if `tool` is not a safe path segment.
    /// - [`Error::ToolNotFound`] if no module was generated for `tool`.
    /// - [`Error::FilesystemError`] for other read failures.
    pub fn read_generated(&self, tool: &ToolName) -> Result<String> {
        tool.validate_path_segment()?;

        let path = self.module_path(tool.as_str());
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                Error::ToolNotFound {
                    tool: tool.to_string(),
                }
            } else {
                Error::FilesystemError {
                    path: path.display().to_string(),
                    source,
                }
            }
        })
    }

    fn module_path(&self, name: &str) -> PathBuf {
        self.root
            .join(name)
            .join(format!("{name}.{}", self.extension))
    }
}

fn walk_error(root: &Path, error: walkdir::Error) -> Error {
    let path = error
        .path()
        .unwrap_or(root)
        .display()
        .to_string();
    let source = error
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    Error::FilesystemError { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn inventory(root: &Path) -> GeneratedInventory {
        GeneratedInventory::new(root, "ts")
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let entries = inventory(&temp.path().join("absent")).list_generated().unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_lists_sorted_and_skips_strays() {
        let temp = TempDir::new().unwrap();
        for name in ["zeta", "alpha"] {
            fs::create_dir_all(temp.path().join(name)).unwrap();
            fs::write(temp.path().join(name).join(format!("{name}.ts")), "x").unwrap();
        }
        fs::create_dir_all(temp.path().join("empty")).unwrap();
        fs::create_dir_all(temp.path().join("other")).unwrap();
        fs::write(temp.path().join("other").join("notes.md"), "x").unwrap();
        fs::write(temp.path().join("README.md"), "x").unwrap();

        let entries = inventory(temp.path()).list_generated().unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, ["alpha", "zeta"]);
        assert_eq!(entries[0].path, temp.path().join("alpha").join("alpha.ts"));
        assert!(entries[0].modified.is_some());
    }

    #[test]
    fn test_read_generated() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("add")).unwrap();
        fs::write(temp.path().join("add").join("add.ts"), "export {};\n").unwrap();

        let inventory = inventory(temp.path());
        assert_eq!(
            inventory.read_generated(&ToolName::new("add")).unwrap(),
            "export {};\n"
        );

        let err = inventory
            .read_generated(&ToolName::new("missing"))
            .unwrap_err();
        assert!(err.is_not_found());

        let err = inventory
            .read_generated(&ToolName::new("../add"))
            .unwrap_err();
        assert!(err.is_validation_error());
    }
}
