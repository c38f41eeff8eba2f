//! Semantic analysis module.
//!
//! Transforms the untyped syntax tree into a typed expression tree while:
//!
//! - Resolving variable, function and type names through nested scopes
//! - Checking operand, argument and member types structurally
//! - Computing the closure of every function definition
//!
//! Analysis stops at the first error.

pub mod analyser;
pub mod symbol_table;
pub mod typed_ast;
pub mod types;
pub mod visitor;
