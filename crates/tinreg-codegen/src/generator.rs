use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::GeneratorConfig;
use crate::emitters;
use crate::error::CodegenError;
use crate::traits::{render, FileKind};

/// Generated files keyed by destination path, in write order.
#[derive(Debug, Clone, Default)]
pub struct GeneratedFiles {
    files: IndexMap<PathBuf, String>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. A repeated path replaces the earlier content in place.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn files(&self) -> &IndexMap<PathBuf, String> {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Write every file under `base_dir`, in order, truncating whatever was
    /// there. Absolute paths ignore `base_dir`.
    pub fn write_to_disk(&self, base_dir: &Path) -> Result<(), CodegenError> {
        for (rel_path, content) in &self.files {
            let full_path = base_dir.join(rel_path);
            let io_err = |source: std::io::Error| CodegenError::Io {
                path: full_path.clone(),
                source,
            };
            if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
            std::fs::write(&full_path, content).map_err(io_err)?;
            log::info!("wrote {} ({} bytes)", full_path.display(), content.len());
        }
        Ok(())
    }
}

/// Produces the classes file and the macros file from one configuration.
#[derive(Debug, Clone)]
pub struct RegistrationGenerator {
    config: GeneratorConfig,
}

impl RegistrationGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render a single file.
    pub fn render(&self, kind: FileKind) -> String {
        let emitter = emitters::create_emitter(kind, &self.config);
        render(emitter.as_ref(), self.config.max_arity())
    }

    /// Render both files, classes first.
    pub fn generate(&self) -> GeneratedFiles {
        let mut output = GeneratedFiles::new();
        output.add_file(
            self.config.output_classes.clone(),
            self.render(FileKind::Classes),
        );
        output.add_file(
            self.config.output_macros.clone(),
            self.render(FileKind::Macros),
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generated_files_order() {
        let config = GeneratorConfig {
            max_param: 1,
            output_classes: PathBuf::from("c.h"),
            output_macros: PathBuf::from("m.h"),
            ..GeneratorConfig::default()
        };
        let output = RegistrationGenerator::new(config).generate();
        let paths: Vec<&PathBuf> = output.files().keys().collect();
        assert_eq!(paths, vec![&PathBuf::from("c.h"), &PathBuf::from("m.h")]);
    }

    #[test]
    fn test_write_to_disk_truncates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("out.h"), "x".repeat(4096)).unwrap();

        let mut files = GeneratedFiles::new();
        files.add_file("out.h", "short");
        files.add_file("nested/deeper/m.h", "macros");
        files.write_to_disk(dir.path()).unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("out.h")).unwrap(), "short");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("nested/deeper/m.h")).unwrap(),
            "macros"
        );
    }

    #[test]
    fn test_write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way of the destination file
        std::fs::create_dir(dir.path().join("taken.h")).unwrap();

        let mut files = GeneratedFiles::new();
        files.add_file("taken.h", "text");
        match files.write_to_disk(dir.path()).unwrap_err() {
            CodegenError::Io { path, .. } => assert_eq!(path, dir.path().join("taken.h")),
            e => panic!("Expected Io, got: {:?}", e),
        }
    }
}
