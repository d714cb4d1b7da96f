//! Go Source Decoder
//!
//! Reconstructs `gosmith_ir` types from existing Go source.
//!
//! # Architecture
//!
//! Decoding runs in two phases:
//!
//! 1. **Loading** ([`Registry::load`]): every `.go` file under the given
//!    paths is read and parsed once, then grouped into packages keyed by
//!    import path. The import path comes from the nearest `go.mod`
//!    ([`import_path`]). Loading is the only phase that can fail.
//! 2. **Resolution** ([`Decoder::get_type`] and friends): type names are
//!    looked up in the registry and decoded on demand. Results are memoized
//!    per decoder; a placeholder entry makes self-referential and mutually
//!    referential types terminate. Names that cannot be resolved come back
//!    as `None` and are logged.
//!
//! # Example
//!
//! ```
//! use gosmith_decode::{Decoder, Registry};
//!
//! let mut registry = Registry::new();
//! registry
//!     .add_source(None, "node.go", "package app\n\ntype Node struct {\n\tValue int\n\tNext *Node\n}\n")
//!     .unwrap();
//! let mut decoder = Decoder::new(registry);
//! let node = decoder.get_type("Node").unwrap();
//! assert_eq!(node.fields().len(), 2);
//! ```

mod cache;
mod context;
mod decoder;
mod error;
mod module;
mod options;
mod registry;
mod resolve;

pub use cache::Resolution;
pub use context::{default_alias, DecoderContext};
pub use decoder::Decoder;
pub use error::DecodeError;
pub use module::{import_path, module_directive};
pub use options::DecoderOptions;
pub use registry::{Package, ParsedFile, Registry};
