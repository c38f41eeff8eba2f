//! Read-only traversal of the typed expression tree.
//!
//! Backends implement [`TypedExprVisitor`] and override only the nodes they
//! care about. Every default method descends into the node's children in
//! source order, so an override that still wants the children visited calls
//! the matching `walk_*` function itself.

use super::typed_ast::{
    TypedAssignment, TypedBinaryOperation, TypedBlock, TypedExpr, TypedFunctionCall,
    TypedFunctionDefinition, TypedMemberSelection, TypedTuple,
};
use super::types::Type;

pub trait TypedExprVisitor {
    fn visit_expr(&mut self, expr: &TypedExpr) {
        walk_expr(self, expr);
    }

    fn visit_block(&mut self, block: &TypedBlock) {
        walk_block(self, block);
    }

    fn visit_assignment(&mut self, assignment: &TypedAssignment) {
        self.visit_expr(&assignment.value);
    }

    fn visit_variable_reference(&mut self, _name: &str, _ty: &Type) {}

    fn visit_plus_operation(&mut self, operation: &TypedBinaryOperation) {
        walk_binary_operation(self, operation);
    }

    fn visit_minus_operation(&mut self, operation: &TypedBinaryOperation) {
        walk_binary_operation(self, operation);
    }

    fn visit_times_operation(&mut self, operation: &TypedBinaryOperation) {
        walk_binary_operation(self, operation);
    }

    /// String `+`; integer addition goes through `visit_plus_operation`.
    fn visit_concatenation(&mut self, operation: &TypedBinaryOperation) {
        walk_binary_operation(self, operation);
    }

    fn visit_negation(&mut self, operand: &TypedExpr) {
        self.visit_expr(operand);
    }

    fn visit_string_constant(&mut self, _value: &str) {}

    fn visit_int_constant(&mut self, _value: i64) {}

    fn visit_tuple(&mut self, tuple: &TypedTuple) {
        for element in tuple.elements.iter() {
            self.visit_expr(&element.value);
        }
    }

    fn visit_member_selection(&mut self, selection: &TypedMemberSelection) {
        self.visit_expr(&selection.expr);
    }

    fn visit_function_call(&mut self, call: &TypedFunctionCall) {
        self.visit_expr(&call.input);
    }

    fn visit_function_definition(&mut self, definition: &TypedFunctionDefinition) {
        self.visit_block(&definition.body);
    }
}

pub fn walk_block<V: TypedExprVisitor + ?Sized>(visitor: &mut V, block: &TypedBlock) {
    for expr in block.expressions.iter() {
        visitor.visit_expr(expr);
    }
}

pub fn walk_binary_operation<V: TypedExprVisitor + ?Sized>(
    visitor: &mut V,
    operation: &TypedBinaryOperation,
) {
    visitor.visit_expr(&operation.lhs);
    visitor.visit_expr(&operation.rhs);
}

pub fn walk_expr<V: TypedExprVisitor + ?Sized>(visitor: &mut V, expr: &TypedExpr) {
    match expr {
        TypedExpr::Block(block) => visitor.visit_block(block),
        TypedExpr::Assignment(assignment) => visitor.visit_assignment(assignment),
        TypedExpr::VariableReference { name, ty } => visitor.visit_variable_reference(name, ty),
        TypedExpr::PlusOperation(operation) => visitor.visit_plus_operation(operation),
        TypedExpr::MinusOperation(operation) => visitor.visit_minus_operation(operation),
        TypedExpr::TimesOperation(operation) => visitor.visit_times_operation(operation),
        TypedExpr::Concatenation(operation) => visitor.visit_concatenation(operation),
        TypedExpr::Negation(operand) => visitor.visit_negation(operand),
        TypedExpr::StringConstant(value) => visitor.visit_string_constant(value),
        TypedExpr::IntConstant(value) => visitor.visit_int_constant(*value),
        TypedExpr::Tuple(tuple) => visitor.visit_tuple(tuple),
        TypedExpr::MemberSelection(selection) => visitor.visit_member_selection(selection),
        TypedExpr::FunctionCall(call) => visitor.visit_function_call(call),
        TypedExpr::FunctionDefinition(definition) => visitor.visit_function_definition(definition),
    }
}
