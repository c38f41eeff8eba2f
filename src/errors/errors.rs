use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Shorthand for [`ErrorImpl::SemanticError`].
    pub fn semantic(message: impl Into<String>, position: Position) -> Self {
        Error::new(
            ErrorImpl::SemanticError {
                message: message.into(),
            },
            position,
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::SymbolNotFound { .. } => "SymbolNotFound",
            ErrorImpl::TypeNotFound { .. } => "TypeNotFound",
            ErrorImpl::VariableAlreadyDefined { .. } => "VariableAlreadyDefined",
            ErrorImpl::TypeAlreadyDefined { .. } => "TypeAlreadyDefined",
            ErrorImpl::SemanticError { .. } => "SemanticError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::SymbolNotFound { symbol } => ErrorTip::Suggestion(format!(
                "`{}` is not defined in this scope or any enclosing one",
                symbol
            )),
            ErrorImpl::TypeNotFound { type_name } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, declare it with `type {} = ...` first",
                type_name, type_name
            )),
            ErrorImpl::VariableAlreadyDefined { variable } => ErrorTip::Suggestion(format!(
                "`{}` is already defined in this scope, pick another name",
                variable
            )),
            ErrorImpl::TypeAlreadyDefined { type_name } => ErrorTip::Suggestion(format!(
                "Type `{}` is already defined in this scope",
                type_name
            )),
            ErrorImpl::SemanticError { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("could not find {symbol}")]
    SymbolNotFound { symbol: String },
    #[error("could not find type {type_name}")]
    TypeNotFound { type_name: String },
    #[error("{variable} is already defined")]
    VariableAlreadyDefined { variable: String },
    #[error("type {type_name} is already defined")]
    TypeAlreadyDefined { type_name: String },
    #[error("{message}")]
    SemanticError { message: String },
}
