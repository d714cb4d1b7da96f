//! Gosmith
//!
//! Typed construction and rendering of Go source, and decoding of existing
//! Go declarations back into the same IR.
//!
//! - [`ir`]: types, values, statements and declarations
//! - [`fmt`]: rendering IR to Go text and writing files
//! - [`decode`]: loading Go packages and resolving their types
//!
//! The most used items are re-exported at the crate root.

use std::path::Path;
use std::sync::Once;

pub use gosmith_decode as decode;
pub use gosmith_fmt as fmt;
pub use gosmith_ir as ir;

pub use gosmith_decode::{DecodeError, Decoder, DecoderOptions};
pub use gosmith_fmt::{
    render_decl, render_type, render_value, write_file, ImportTable, RenderOptions, SourceFile,
    WriteError, WriteOptions,
};
pub use gosmith_ir::{
    Arg, Decl, Field, Func, Interface, IrError, Note, Receiver, Stmt, Struct, Type, TypeDecl,
    Value,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call repeatedly; only the
/// first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Load `paths` and resolve one type.
///
/// `Ok(None)` means the sources loaded but `name` did not resolve.
pub fn type_from_source<P: AsRef<Path>>(paths: &[P], name: &str) -> Result<Option<Type>, DecodeError> {
    let mut decoder = Decoder::load(paths, &DecoderOptions::default())?;
    Ok(decoder.get_type(name))
}

/// Load `paths` and resolve one interface declaration.
pub fn interface_from_source<P: AsRef<Path>>(
    paths: &[P],
    name: &str,
) -> Result<Option<Interface>, DecodeError> {
    let mut decoder = Decoder::load(paths, &DecoderOptions::default())?;
    Ok(decoder.get_interface(name))
}

/// Load `paths` and collect the methods declared on `receiver` or
/// `*receiver`.
pub fn methods_from_source<P: AsRef<Path>>(
    paths: &[P],
    receiver: &str,
) -> Result<Vec<Func>, DecodeError> {
    let mut decoder = Decoder::load(paths, &DecoderOptions::default())?;
    tracing::debug!(receiver, "collecting methods");
    Ok(decoder.get_methods(receiver))
}
