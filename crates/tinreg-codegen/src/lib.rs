pub mod adapter;
pub mod arity;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod traits;

// Output file emitters
pub mod emitters;

// Re-exports
pub use adapter::{AdapterKind, AdapterVariant};
pub use arity::{arities, Arity, Param, ReturnSlot, Signature};
pub use config::GeneratorConfig;
pub use context::EmitContext;
pub use error::CodegenError;
pub use generator::{GeneratedFiles, RegistrationGenerator};
pub use traits::{FileKind, UnitEmitter};
