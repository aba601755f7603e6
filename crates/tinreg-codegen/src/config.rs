use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::arity::Arity;
use crate::error::CodegenError;

pub const DEFAULT_MAX_PARAM: u32 = 8;
pub const DEFAULT_CLASSES_FILE: &str = "registrationclasses.h";
pub const DEFAULT_MACROS_FILE: &str = "registrationmacros.h";
pub const DEFAULT_NAMESPACE: &str = "TinScript";

/// Generator settings. Every field is optional in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Highest arity to generate (inclusive)
    pub max_param: u32,

    /// Destination of the adapter classes
    pub output_classes: PathBuf,

    /// Destination of the registration macros
    pub output_macros: PathBuf,

    /// Namespace qualifying adapter classes inside the macros
    pub namespace: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_param: DEFAULT_MAX_PARAM,
            output_classes: PathBuf::from(DEFAULT_CLASSES_FILE),
            output_macros: PathBuf::from(DEFAULT_MACROS_FILE),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, CodegenError> {
        let content = std::fs::read_to_string(path).map_err(|source| CodegenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CodegenError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn max_arity(&self) -> Arity {
        Arity::new(self.max_param)
    }
}
