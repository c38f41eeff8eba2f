//! Structural types.
//!
//! Types are compared by shape, never by name. Aliases registered through
//! `type X = ...` resolve to the underlying structure before they get here.

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Accepts any value; used as the result of side-effecting calls.
    Void,
    String,
    Integer,
    Tuple(TupleType),
    Function(FunctionType),
}

impl Type {
    /// Whether a value of type `other` can be used where `self` is expected.
    pub fn is_assignable_from(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Void, _) => true,
            (Type::String, Type::String) => true,
            (Type::Integer, Type::Integer) => true,
            (Type::Tuple(tuple), Type::Tuple(other)) => tuple.is_assignable_from(other),
            (Type::Function(function), Type::Function(other)) => {
                function.is_assignable_from(other)
            }
            _ => false,
        }
    }

    pub fn as_tuple(&self) -> Option<&TupleType> {
        match self {
            Type::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleMember {
    /// `None` for positional members.
    pub name: Option<String>,
    pub ty: Type,
}

impl TupleMember {
    pub fn new(name: Option<String>, ty: Type) -> Self {
        TupleMember { name, ty }
    }

    pub fn named(name: &str, ty: Type) -> Self {
        TupleMember::new(Some(name.to_string()), ty)
    }

    pub fn positional(ty: Type) -> Self {
        TupleMember::new(None, ty)
    }

    /// A missing name on either side matches any name in the same slot.
    pub fn is_assignable_from(&self, other: &TupleMember) -> bool {
        if let (Some(name), Some(other_name)) = (&self.name, &other.name) {
            if name != other_name {
                return false;
            }
        }

        self.ty.is_assignable_from(&other.ty)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TupleType {
    pub members: Vec<TupleMember>,
}

impl TupleType {
    pub fn new(members: Vec<TupleMember>) -> Self {
        TupleType { members }
    }

    pub fn is_assignable_from(&self, other: &TupleType) -> bool {
        self.members.len() == other.members.len()
            && self
                .members
                .iter()
                .zip(other.members.iter())
                .all(|(member, other_member)| member.is_assignable_from(other_member))
    }

    /// First member whose name is exactly `name`. Positional members never match.
    pub fn member(&self, name: &str) -> Option<&TupleMember> {
        self.members
            .iter()
            .find(|member| member.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub input: TupleType,
    pub output: Box<Type>,
}

impl FunctionType {
    pub fn new(input: TupleType, output: Type) -> Self {
        FunctionType {
            input,
            output: Box::new(output),
        }
    }

    // Input is checked in the same direction as the function itself, output in
    // the opposite one.
    pub fn is_assignable_from(&self, other: &FunctionType) -> bool {
        self.input.is_assignable_from(&other.input) && other.output.is_assignable_from(&self.output)
    }
}

impl From<TupleType> for Type {
    fn from(tuple: TupleType) -> Self {
        Type::Tuple(tuple)
    }
}

impl From<FunctionType> for Type {
    fn from(function: FunctionType) -> Self {
        Type::Function(function)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "Void"),
            Type::String => write!(f, "String"),
            Type::Integer => write!(f, "Int"),
            Type::Tuple(tuple) => write!(f, "{}", tuple),
            Type::Function(function) => write!(f, "{}", function),
        }
    }
}

impl Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, member) in self.members.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match &member.name {
                Some(name) => write!(f, "{}: {}", name, member.ty)?,
                None => write!(f, "{}", member.ty)?,
            }
        }
        write!(f, ")")
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input, self.output)
    }
}
