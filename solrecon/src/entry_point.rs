//! Entry point wiring: configuration merge and the runnable pipeline.

pub(crate) mod config;
mod run;

pub use run::{run_with_args, run_with_args_to};
