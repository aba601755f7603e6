pub mod classes;
pub mod macros;

pub use classes::ClassEmitter;
pub use macros::MacroEmitter;

use crate::config::GeneratorConfig;
use crate::traits::{FileKind, UnitEmitter};

/// Create the emitter for one of the generated files.
pub fn create_emitter(kind: FileKind, config: &GeneratorConfig) -> Box<dyn UnitEmitter> {
    match kind {
        FileKind::Classes => Box::new(ClassEmitter),
        FileKind::Macros => Box::new(MacroEmitter::new(config.namespace.clone())),
    }
}
