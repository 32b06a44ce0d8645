#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Terminal output primitives for ghpub frontends.
//!
//! This crate isolates terminal rendering and progress reporting so libghpub
//! can remain UI-agnostic about *how* deploy progress is shown. Use these
//! helpers in CLI or other frontends.

/// Terminal output abstractions and implementations.
mod output;

pub use output::{Output, OutputError, Quiet, Spinner, Terminal};
