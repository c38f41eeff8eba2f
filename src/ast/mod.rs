/// Input syntax tree, as produced by the parser.
///
/// Submodules:
/// - ast: Blocks and expression nodes
/// - types: Type expressions used in type assignments and function inputs
pub mod ast;
pub mod types;
