//! litscreen-batch
//!
//! Bounded-concurrency batch screening: fan hypotheses out to a limited
//! pool of workers, collect every outcome, rank by score, and summarize.
//! See `pipeline` for the generic machinery and `screening`/`io` for the
//! hypothesis domain and its file formats.

pub mod io;
pub mod pipeline;
pub mod screening;

pub use pipeline::{run_batch, BatchResult, BatchRun};
pub use screening::{score_hypothesis, Hypothesis, HypothesisReport};
