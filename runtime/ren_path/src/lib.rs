//! Ren Path - path values and path evaluation for the Ren runtime.
//!
//! This crate provides:
//! - Path construction with its three storage forms (`construct`)
//! - The data stack builders pop elements from (`DataStack`)
//! - The kind-keyed step handler table (`PathDispatch`, `PathHandler`)
//! - Get/Set evaluation of paths against a binding context (`eval_path`)
//!
//! Paths read back through `ren_cell::sequence`, which is re-exported here.
//!
//! # Tracing
//!
//! Path steps are logged at `trace`, write-backs and collections at `debug`.
//! Call [`init_tracing`] once at startup and set `RUST_LOG` (for example
//! `RUST_LOG=ren_path=trace`) to see them.

mod construct;
mod data_stack;
mod dispatch;
mod eval;
mod handlers;
mod stack;

use std::sync::Once;

pub use construct::{
    init_slash, is_allowed_element, try_build_from_elements, try_init_pairlike,
    try_init_refinement, PathBuildError, PathFlavor,
};
pub use data_stack::{DataStack, Popped};
pub use dispatch::{PathDispatch, PathHandler, PokeOutcome};
pub use eval::{eval_path, Evaluator, GroupPolicy, PathMode, PathOptions, Runtime};
pub use handlers::{
    ArrayHandler, BinaryHandler, ObjectHandler, PairHandler, PathElementsHandler, StringHandler,
    TokenHandler, TupleHandler,
};
pub use ren_cell::sequence::{is_refinement, is_slash_form, path_at, path_elements, path_len};
pub use stack::ensure_sufficient_stack;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=ren_path=debug` or `RUST_LOG=ren_path=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
