//! Type expressions as written in source.
//!
//! These are unresolved: identifiers still have to be looked up in the
//! symbol table before they mean anything. The analyser maps them onto
//! [`crate::semantic::types::Type`].

use crate::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Reference to a named type such as `Int` or a user alias.
    Identifier { name: String, span: Span },
    Tuple(TupleTypeExpr),
    /// `input -> output`. The input has to resolve to a tuple type.
    Function {
        input: Box<TypeExpr>,
        output: Box<TypeExpr>,
        span: Span,
    },
}

impl TypeExpr {
    pub fn identifier(name: &str) -> Self {
        TypeExpr::Identifier {
            name: name.to_string(),
            span: Span::null(),
        }
    }

    pub fn function(input: TypeExpr, output: TypeExpr) -> Self {
        TypeExpr::Function {
            input: Box::new(input),
            output: Box::new(output),
            span: Span::null(),
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            TypeExpr::Identifier { span, .. } => span,
            TypeExpr::Tuple(tuple) => &tuple.span,
            TypeExpr::Function { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleTypeMemberExpr {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleTypeExpr {
    pub members: Vec<TupleTypeMemberExpr>,
    pub span: Span,
}

impl TupleTypeExpr {
    pub fn new(members: Vec<(Option<&str>, TypeExpr)>) -> Self {
        TupleTypeExpr {
            members: members
                .into_iter()
                .map(|(name, ty)| TupleTypeMemberExpr {
                    name: name.map(String::from),
                    ty,
                })
                .collect(),
            span: Span::null(),
        }
    }

    /// Tuple type whose members are all named.
    pub fn named(members: Vec<(&str, TypeExpr)>) -> Self {
        TupleTypeExpr::new(
            members
                .into_iter()
                .map(|(name, ty)| (Some(name), ty))
                .collect(),
        )
    }
}

impl From<TupleTypeExpr> for TypeExpr {
    fn from(tuple: TupleTypeExpr) -> Self {
        TypeExpr::Tuple(tuple)
    }
}
