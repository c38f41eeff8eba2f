use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use crate::errors::errors::ErrorImpl;

use super::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub ty: Type,
}

impl Variable {
    pub fn new(name: &str, ty: Type) -> Self {
        Variable {
            name: name.to_string(),
            ty,
        }
    }
}

/// Outer variables referenced from within a scope, in first-use order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Closure {
    variables: Vec<Variable>,
}

impl Closure {
    /// Adds `variable` unless a variable with the same name was captured already.
    pub fn capture(&mut self, variable: Variable) {
        if !self.contains(&variable.name) {
            self.variables.push(variable);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.iter().any(|variable| variable.name == name)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Scope {
    pub variable_lookup: HashMap<String, Variable>,
    pub type_lookup: HashMap<String, Type>,
    pub closure: Closure,
}

impl Scope {
    pub fn declare_variable(&mut self, variable: Variable) -> Result<(), ErrorImpl> {
        if self.variable_lookup.contains_key(&variable.name) {
            Err(ErrorImpl::VariableAlreadyDefined {
                variable: variable.name,
            })
        } else {
            self.variable_lookup.insert(variable.name.clone(), variable);
            Ok(())
        }
    }

    pub fn declare_type(&mut self, name: &str, ty: Type) -> Result<(), ErrorImpl> {
        if self.type_lookup.contains_key(name) {
            Err(ErrorImpl::TypeAlreadyDefined {
                type_name: name.to_string(),
            })
        } else {
            self.type_lookup.insert(name.to_string(), ty);
            Ok(())
        }
    }

    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.variable_lookup.get(name)
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.type_lookup.get(name)
    }
}

/// Chain of nested scopes. The last scope in `scopes` is the current one;
/// the first is the root, which is never popped.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    /// Symbol table whose root scope knows `String`, `Int` and `Void`.
    pub fn new() -> Self {
        let mut root = Scope::default();
        root.type_lookup.insert(String::from("String"), Type::String);
        root.type_lookup.insert(String::from("Int"), Type::Integer);
        root.type_lookup.insert(String::from("Void"), Type::Void);

        SymbolTable { scopes: vec![root] }
    }

    /// Symbol table with a bare root scope, not even the built-in types.
    pub fn empty() -> Self {
        SymbolTable {
            scopes: vec![Scope::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn current(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn register_variable(&mut self, name: &str, ty: Type) -> Result<(), ErrorImpl> {
        self.current_mut().declare_variable(Variable::new(name, ty))
    }

    /// Resolves `name` from the innermost scope outwards. A hit in an
    /// enclosing scope is recorded in the current scope's closure.
    pub fn get_variable(&mut self, name: &str) -> Result<Variable, ErrorImpl> {
        if let Some(variable) = self.current().get_variable(name) {
            return Ok(variable.clone());
        }

        let outer = self.scopes[..self.scopes.len() - 1]
            .iter()
            .rev()
            .find_map(|scope| scope.get_variable(name))
            .cloned();

        match outer {
            Some(variable) => {
                tracing::trace!(name, depth = self.depth(), "captured outer variable");
                self.current_mut().closure.capture(variable.clone());
                Ok(variable)
            }
            None => Err(ErrorImpl::SymbolNotFound {
                symbol: name.to_string(),
            }),
        }
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.scopes
            .iter()
            .any(|scope| scope.get_variable(name).is_some())
    }

    pub fn register_type(&mut self, name: &str, ty: Type) -> Result<(), ErrorImpl> {
        self.current_mut().declare_type(name, ty)
    }

    pub fn get_type(&self, name: &str) -> Result<Type, ErrorImpl> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get_type(name))
            .cloned()
            .ok_or_else(|| ErrorImpl::TypeNotFound {
                type_name: name.to_string(),
            })
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.get_type(name).is_some())
    }

    pub fn get_closure(&self) -> Closure {
        self.current().closure.clone()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
        tracing::trace!(depth = self.depth(), "pushed scope");
    }

    /// Discards the current scope and hands back what it captured.
    /// Returns `None` when only the root scope is left.
    pub fn pop_scope(&mut self) -> Option<Closure> {
        if self.scopes.len() == 1 {
            return None;
        }

        let scope = self.scopes.pop()?;
        tracing::trace!(depth = self.depth(), captured = scope.closure.len(), "popped scope");
        Some(scope.closure)
    }

    /// Pushes a scope that is popped again when the returned guard goes out
    /// of scope, whichever way that happens.
    pub fn enter_scope(&mut self) -> ScopeGuard<'_> {
        self.push_scope();
        let depth = self.depth();
        ScopeGuard {
            symbol_table: self,
            depth,
        }
    }
}

/// Gives access to the table while the scope it pushed is live.
///
/// Dropping the guard unwinds the table to the depth it had before
/// `enter_scope`, whatever was pushed or popped through the guard meanwhile.
pub struct ScopeGuard<'a> {
    symbol_table: &'a mut SymbolTable,
    depth: usize,
}

impl Deref for ScopeGuard<'_> {
    type Target = SymbolTable;

    fn deref(&self) -> &Self::Target {
        self.symbol_table
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.symbol_table
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        while self.symbol_table.depth() >= self.depth {
            if self.symbol_table.pop_scope().is_none() {
                break;
            }
        }
    }
}
