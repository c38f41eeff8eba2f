use crate::Span;

use super::types::{TupleTypeExpr, TypeExpr};

/// A sequence of expressions evaluated in order.
///
/// Blocks appear at the top level of a program and as function bodies.
/// They do not open a scope of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub expressions: Vec<Expr>,
    pub span: Span,
}

impl Block {
    pub fn new(expressions: Vec<Expr>) -> Self {
        Block {
            expressions,
            span: Span::null(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Expression node as handed over by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Element of a tuple construction. `name` is `None` for positional elements.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleElement {
    pub name: Option<String>,
    pub value: Expr,
}

impl TupleElement {
    pub fn named(name: &str, value: Expr) -> Self {
        TupleElement {
            name: Some(name.to_string()),
            value,
        }
    }

    pub fn positional(value: Expr) -> Self {
        TupleElement { name: None, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Block(Block),
    /// `name = value`
    Assignment {
        name: String,
        value: Box<Expr>,
    },
    /// `type name = ty`
    TypeAssignment {
        name: String,
        ty: TypeExpr,
    },
    Plus(Box<Expr>, Box<Expr>),
    Minus(Box<Expr>, Box<Expr>),
    Times(Box<Expr>, Box<Expr>),
    Negation(Box<Expr>),
    String(String),
    Int(i64),
    Identifier(String),
    Tuple(Vec<TupleElement>),
    /// `expr.member`
    MemberSelection {
        expr: Box<Expr>,
        member: String,
    },
    /// `(input) => body`
    FunctionDefinition {
        input: TupleTypeExpr,
        body: Box<Expr>,
    },
    /// `name(argument)`
    FunctionCall {
        name: String,
        argument: Box<Expr>,
    },
    /// `receiver.name(argument)`
    InfixFunctionCall {
        receiver: Box<Expr>,
        name: String,
        argument: Box<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            kind,
            span: Span::null(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn block(expressions: Vec<Expr>) -> Self {
        Expr::new(ExprKind::Block(Block::new(expressions)))
    }

    pub fn assignment(name: &str, value: Expr) -> Self {
        Expr::new(ExprKind::Assignment {
            name: name.to_string(),
            value: Box::new(value),
        })
    }

    pub fn type_assignment(name: &str, ty: TypeExpr) -> Self {
        Expr::new(ExprKind::TypeAssignment {
            name: name.to_string(),
            ty,
        })
    }

    pub fn plus(lhs: Expr, rhs: Expr) -> Self {
        Expr::new(ExprKind::Plus(Box::new(lhs), Box::new(rhs)))
    }

    pub fn minus(lhs: Expr, rhs: Expr) -> Self {
        Expr::new(ExprKind::Minus(Box::new(lhs), Box::new(rhs)))
    }

    pub fn times(lhs: Expr, rhs: Expr) -> Self {
        Expr::new(ExprKind::Times(Box::new(lhs), Box::new(rhs)))
    }

    pub fn negation(expr: Expr) -> Self {
        Expr::new(ExprKind::Negation(Box::new(expr)))
    }

    pub fn string(value: &str) -> Self {
        Expr::new(ExprKind::String(value.to_string()))
    }

    pub fn int(value: i64) -> Self {
        Expr::new(ExprKind::Int(value))
    }

    pub fn identifier(name: &str) -> Self {
        Expr::new(ExprKind::Identifier(name.to_string()))
    }

    pub fn tuple(elements: Vec<TupleElement>) -> Self {
        Expr::new(ExprKind::Tuple(elements))
    }

    pub fn member_selection(expr: Expr, member: &str) -> Self {
        Expr::new(ExprKind::MemberSelection {
            expr: Box::new(expr),
            member: member.to_string(),
        })
    }

    pub fn function_definition(input: TupleTypeExpr, body: Expr) -> Self {
        Expr::new(ExprKind::FunctionDefinition {
            input,
            body: Box::new(body),
        })
    }

    pub fn function_call(name: &str, argument: Expr) -> Self {
        Expr::new(ExprKind::FunctionCall {
            name: name.to_string(),
            argument: Box::new(argument),
        })
    }

    pub fn infix_function_call(receiver: Expr, name: &str, argument: Expr) -> Self {
        Expr::new(ExprKind::InfixFunctionCall {
            receiver: Box::new(receiver),
            name: name.to_string(),
            argument: Box::new(argument),
        })
    }
}
