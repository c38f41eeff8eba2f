//! Error types raised during semantic analysis.
//!
//! Every error carries the source position of the node where it was
//! detected. Analysis stops at the first error, so there is never more
//! than one error per run.

pub mod errors;
