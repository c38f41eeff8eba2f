#![allow(clippy::module_inception)]

//! Semantic analysis for the langd expression language.
//!
//! Takes the syntax tree produced by the parser ([`ast`]) and turns it into a
//! fully typed expression tree ([`semantic::typed_ast`]), resolving names
//! through a nested scope chain, checking structural types and computing the
//! closure of every function definition along the way.

use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod semantic;

/// Offset into a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span used for nodes that were not produced from source text.
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}
