//! Typed expression tree.
//!
//! Output of the analyser and input of the code generator. Each node pairs
//! a syntactic shape with its resolved type, and that type is always a pure
//! function of the node's children, so it is computed on demand instead of
//! being stored twice.

use super::{
    symbol_table::Closure,
    types::{FunctionType, TupleMember, TupleType, Type},
};

#[derive(Debug, Clone, PartialEq)]
pub enum TypedExpr {
    Block(TypedBlock),
    Assignment(TypedAssignment),
    VariableReference { name: String, ty: Type },
    PlusOperation(TypedBinaryOperation),
    MinusOperation(TypedBinaryOperation),
    TimesOperation(TypedBinaryOperation),
    Concatenation(TypedBinaryOperation),
    Negation(Box<TypedExpr>),
    StringConstant(String),
    IntConstant(i64),
    Tuple(TypedTuple),
    MemberSelection(TypedMemberSelection),
    FunctionCall(TypedFunctionCall),
    FunctionDefinition(TypedFunctionDefinition),
}

impl TypedExpr {
    pub fn get_type(&self) -> Type {
        match self {
            TypedExpr::Block(block) => block.get_type(),
            TypedExpr::Assignment(assignment) => assignment.value.get_type(),
            TypedExpr::VariableReference { ty, .. } => ty.clone(),
            TypedExpr::PlusOperation(_)
            | TypedExpr::MinusOperation(_)
            | TypedExpr::TimesOperation(_)
            | TypedExpr::Negation(_)
            | TypedExpr::IntConstant(_) => Type::Integer,
            TypedExpr::Concatenation(_) | TypedExpr::StringConstant(_) => Type::String,
            TypedExpr::Tuple(tuple) => Type::Tuple(tuple.get_type()),
            TypedExpr::MemberSelection(selection) => selection.member.ty.clone(),
            TypedExpr::FunctionCall(call) => call.result_type.clone(),
            TypedExpr::FunctionDefinition(definition) => {
                Type::Function(definition.function_type.clone())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedBlock {
    pub expressions: Vec<TypedExpr>,
}

impl TypedBlock {
    pub fn new(expressions: Vec<TypedExpr>) -> Self {
        TypedBlock { expressions }
    }

    /// Type of the last expression. The analyser never builds an empty
    /// block; one built by hand reports `Void`.
    pub fn get_type(&self) -> Type {
        self.expressions
            .last()
            .map(TypedExpr::get_type)
            .unwrap_or(Type::Void)
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedAssignment {
    pub name: String,
    pub value: Box<TypedExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedBinaryOperation {
    pub lhs: Box<TypedExpr>,
    pub rhs: Box<TypedExpr>,
}

impl TypedBinaryOperation {
    pub fn new(lhs: TypedExpr, rhs: TypedExpr) -> Self {
        TypedBinaryOperation {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedTupleElement {
    pub name: Option<String>,
    pub value: TypedExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedTuple {
    pub elements: Vec<TypedTupleElement>,
}

impl TypedTuple {
    pub fn get_type(&self) -> TupleType {
        TupleType::new(
            self.elements
                .iter()
                .map(|element| TupleMember::new(element.name.clone(), element.value.get_type()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedMemberSelection {
    pub expr: Box<TypedExpr>,
    pub member: TupleMember,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedFunctionCall {
    pub callee: String,
    pub input: Box<TypedExpr>,
    pub result_type: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedFunctionDefinition {
    pub function_type: FunctionType,
    pub closure: Closure,
    pub body: TypedBlock,
}

#[cfg(test)]
mod tests {
    use crate::semantic::{
        symbol_table::Closure,
        types::{FunctionType, TupleMember, TupleType, Type},
    };

    use super::{
        TypedBinaryOperation, TypedBlock, TypedExpr, TypedFunctionDefinition, TypedTuple,
        TypedTupleElement,
    };

    #[test]
    fn test_block_type_is_last_expression() {
        let block = TypedBlock::new(vec![
            TypedExpr::IntConstant(1),
            TypedExpr::StringConstant("x".to_string()),
        ]);

        assert_eq!(block.get_type(), Type::String);
        assert_eq!(TypedBlock::new(vec![]).get_type(), Type::Void);
    }

    #[test]
    fn test_tuple_type_preserves_order() {
        let tuple = TypedTuple {
            elements: vec![
                TypedTupleElement {
                    name: Some("b".to_string()),
                    value: TypedExpr::StringConstant("x".to_string()),
                },
                TypedTupleElement {
                    name: None,
                    value: TypedExpr::IntConstant(3),
                },
            ],
        };

        assert_eq!(
            tuple.get_type(),
            TupleType::new(vec![
                TupleMember::named("b", Type::String),
                TupleMember::positional(Type::Integer),
            ])
        );
    }

    #[test]
    fn test_operation_types() {
        let ints = TypedBinaryOperation::new(TypedExpr::IntConstant(1), TypedExpr::IntConstant(2));
        let strings = TypedBinaryOperation::new(
            TypedExpr::StringConstant("a".to_string()),
            TypedExpr::StringConstant("b".to_string()),
        );

        assert_eq!(TypedExpr::TimesOperation(ints).get_type(), Type::Integer);
        assert_eq!(TypedExpr::Concatenation(strings).get_type(), Type::String);
    }

    #[test]
    fn test_function_definition_type() {
        let function_type = FunctionType::new(TupleType::default(), Type::Integer);
        let definition = TypedExpr::FunctionDefinition(TypedFunctionDefinition {
            function_type: function_type.clone(),
            closure: Closure::default(),
            body: TypedBlock::new(vec![TypedExpr::IntConstant(0)]),
        });

        assert_eq!(definition.get_type(), Type::Function(function_type));
    }
}
