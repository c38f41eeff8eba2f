use crate::{
    ast::{
        ast::{Block, Expr, ExprKind, TupleElement},
        types::{TupleTypeExpr, TypeExpr},
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    symbol_table::{SymbolTable, Variable},
    typed_ast::{
        TypedAssignment, TypedBinaryOperation, TypedBlock, TypedExpr, TypedFunctionCall,
        TypedFunctionDefinition, TypedMemberSelection, TypedTuple, TypedTupleElement,
    },
    types::{FunctionType, TupleMember, TupleType, Type},
};

/// Settings for a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Seed the root scope with the `String`, `Int` and `Void` type names.
    pub builtin_types: bool,
    /// Variables visible to the whole program, typically natively
    /// implemented functions.
    pub globals: Vec<Variable>,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        AnalyserConfig {
            builtin_types: true,
            globals: vec![],
        }
    }
}

impl AnalyserConfig {
    /// Adds the standard `print: (String) -> Void` function.
    pub fn with_prelude(self) -> Self {
        self.with_global(
            "print",
            FunctionType::new(
                TupleType::new(vec![TupleMember::positional(Type::String)]),
                Type::Void,
            )
            .into(),
        )
    }

    pub fn with_global(mut self, name: &str, ty: Type) -> Self {
        self.globals.push(Variable::new(name, ty));
        self
    }

    pub fn without_builtin_types(mut self) -> Self {
        self.builtin_types = false;
        self
    }
}

/// Owns the symbol table for one analysis run.
#[derive(Debug)]
pub struct Analyser {
    symbol_table: SymbolTable,
}

impl Default for Analyser {
    fn default() -> Self {
        Analyser::new()
    }
}

impl Analyser {
    pub fn new() -> Self {
        Analyser {
            symbol_table: SymbolTable::new(),
        }
    }

    /// Fails if two globals share a name.
    pub fn with_config(config: AnalyserConfig) -> Result<Self, Error> {
        let mut symbol_table = if config.builtin_types {
            SymbolTable::new()
        } else {
            SymbolTable::empty()
        };

        for global in config.globals {
            symbol_table
                .register_variable(&global.name, global.ty)
                .map_err(|error| error_at(error, &Span::null()))?;
        }

        Ok(Analyser { symbol_table })
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    /// Analyses a whole program. The program's bindings live in the root
    /// scope next to the configured globals.
    #[tracing::instrument(level = "debug", skip_all, fields(expressions = block.expressions.len()))]
    pub fn analyse(mut self, block: &Block) -> Result<TypedBlock, Error> {
        let typed = analyse_block(&mut self.symbol_table, block)?;
        tracing::debug!(ty = %typed.get_type(), "analysis complete");
        Ok(typed)
    }
}

/// Analyses `block` with the default configuration.
pub fn analyse(block: &Block) -> Result<TypedBlock, Error> {
    Analyser::new().analyse(block)
}

fn error_at(error: ErrorImpl, span: &Span) -> Error {
    Error::new(error, span.start.clone())
}

pub fn analyse_block(symbol_table: &mut SymbolTable, block: &Block) -> Result<TypedBlock, Error> {
    let mut expressions = Vec::with_capacity(block.expressions.len());
    for expr in block.expressions.iter() {
        if let Some(typed) = analyse_statement(symbol_table, expr)? {
            expressions.push(typed);
        }
    }

    if expressions.is_empty() {
        return Err(Error::semantic(
            "empty block: a block needs at least one expression producing a value",
            block.span.start.clone(),
        ));
    }

    Ok(TypedBlock::new(expressions))
}

/// Like [`analyse_expr`], except that type assignments are accepted and
/// yield no node.
pub fn analyse_statement(
    symbol_table: &mut SymbolTable,
    expr: &Expr,
) -> Result<Option<TypedExpr>, Error> {
    match &expr.kind {
        ExprKind::TypeAssignment { name, ty } => {
            let ty = map_type(symbol_table, ty)?;
            tracing::trace!(name = name.as_str(), %ty, "registered type");
            symbol_table
                .register_type(name, ty)
                .map_err(|error| error_at(error, &expr.span))?;
            Ok(None)
        }
        _ => analyse_expr(symbol_table, expr).map(Some),
    }
}

pub fn analyse_expr(symbol_table: &mut SymbolTable, expr: &Expr) -> Result<TypedExpr, Error> {
    match &expr.kind {
        ExprKind::Block(block) => Ok(TypedExpr::Block(analyse_block(symbol_table, block)?)),
        ExprKind::Assignment { name, value } => {
            let value = analyse_expr(symbol_table, value)?;
            symbol_table
                .register_variable(name, value.get_type())
                .map_err(|error| error_at(error, &expr.span))?;

            Ok(TypedExpr::Assignment(TypedAssignment {
                name: name.clone(),
                value: Box::new(value),
            }))
        }
        ExprKind::TypeAssignment { name, .. } => Err(Error::semantic(
            format!("type assignment `{}` does not produce a value", name),
            expr.span.start.clone(),
        )),
        ExprKind::Plus(lhs, rhs) => {
            let lhs = analyse_expr(symbol_table, lhs)?;
            let rhs = analyse_expr(symbol_table, rhs)?;

            match (lhs.get_type(), rhs.get_type()) {
                (Type::Integer, Type::Integer) => Ok(TypedExpr::PlusOperation(
                    TypedBinaryOperation::new(lhs, rhs),
                )),
                (Type::String, Type::String) => Ok(TypedExpr::Concatenation(
                    TypedBinaryOperation::new(lhs, rhs),
                )),
                (lhs, rhs) => Err(Error::semantic(
                    format!("cannot apply `+` to {} and {}", lhs, rhs),
                    expr.span.start.clone(),
                )),
            }
        }
        ExprKind::Minus(lhs, rhs) => Ok(TypedExpr::MinusOperation(analyse_integer_operands(
            symbol_table,
            "-",
            lhs,
            rhs,
            &expr.span,
        )?)),
        ExprKind::Times(lhs, rhs) => Ok(TypedExpr::TimesOperation(analyse_integer_operands(
            symbol_table,
            "*",
            lhs,
            rhs,
            &expr.span,
        )?)),
        ExprKind::Negation(operand) => {
            let operand = analyse_expr(symbol_table, operand)?;
            let ty = operand.get_type();
            if ty != Type::Integer {
                return Err(Error::semantic(
                    format!("cannot negate a value of type {}", ty),
                    expr.span.start.clone(),
                ));
            }

            Ok(TypedExpr::Negation(Box::new(operand)))
        }
        ExprKind::String(value) => Ok(TypedExpr::StringConstant(value.clone())),
        ExprKind::Int(value) => Ok(TypedExpr::IntConstant(*value)),
        ExprKind::Identifier(name) => {
            let variable = symbol_table
                .get_variable(name)
                .map_err(|error| error_at(error, &expr.span))?;

            Ok(TypedExpr::VariableReference {
                name: variable.name,
                ty: variable.ty,
            })
        }
        ExprKind::Tuple(elements) => Ok(TypedExpr::Tuple(analyse_tuple(symbol_table, elements)?)),
        ExprKind::MemberSelection { expr: operand, member } => {
            let operand = analyse_expr(symbol_table, operand)?;
            let ty = operand.get_type();
            let tuple = ty.as_tuple().ok_or_else(|| {
                Error::semantic(
                    format!("cannot select `{}` from a value of type {}", member, ty),
                    expr.span.start.clone(),
                )
            })?;
            let member = tuple.member(member).cloned().ok_or_else(|| {
                Error::semantic(
                    format!("no such member `{}` in {}", member, tuple),
                    expr.span.start.clone(),
                )
            })?;

            Ok(TypedExpr::MemberSelection(TypedMemberSelection {
                expr: Box::new(operand),
                member,
            }))
        }
        ExprKind::FunctionDefinition { input, body } => {
            analyse_function_definition(symbol_table, input, body, &expr.span)
        }
        ExprKind::FunctionCall { name, argument } => {
            let function_type = resolve_function(symbol_table, name, &expr.span)?;
            let input = analyse_expr(symbol_table, argument)?;
            build_call(name, function_type, input, &expr.span)
        }
        ExprKind::InfixFunctionCall {
            receiver,
            name,
            argument,
        } => {
            let receiver = analyse_expr(symbol_table, receiver)?;
            let ExprKind::Tuple(elements) = &argument.kind else {
                return Err(Error::semantic(
                    format!(
                        "the argument of infix call `.{}` must be a tuple construction",
                        name
                    ),
                    argument.span.start.clone(),
                ));
            };

            let mut input = TypedTuple {
                elements: vec![TypedTupleElement {
                    name: None,
                    value: receiver,
                }],
            };
            input
                .elements
                .extend(analyse_tuple(symbol_table, elements)?.elements);

            let function_type = resolve_function(symbol_table, name, &expr.span)?;
            build_call(name, function_type, TypedExpr::Tuple(input), &expr.span)
        }
    }
}

fn analyse_integer_operands(
    symbol_table: &mut SymbolTable,
    operator: &str,
    lhs: &Expr,
    rhs: &Expr,
    span: &Span,
) -> Result<TypedBinaryOperation, Error> {
    let lhs = analyse_expr(symbol_table, lhs)?;
    let rhs = analyse_expr(symbol_table, rhs)?;

    match (lhs.get_type(), rhs.get_type()) {
        (Type::Integer, Type::Integer) => Ok(TypedBinaryOperation::new(lhs, rhs)),
        (lhs, rhs) => Err(Error::semantic(
            format!("cannot apply `{}` to {} and {}", operator, lhs, rhs),
            span.start.clone(),
        )),
    }
}

fn analyse_tuple(
    symbol_table: &mut SymbolTable,
    elements: &[TupleElement],
) -> Result<TypedTuple, Error> {
    let elements = elements
        .iter()
        .map(|element| {
            Ok(TypedTupleElement {
                name: element.name.clone(),
                value: analyse_expr(symbol_table, &element.value)?,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(TypedTuple { elements })
}

fn analyse_function_definition(
    symbol_table: &mut SymbolTable,
    input: &TupleTypeExpr,
    body: &Expr,
    span: &Span,
) -> Result<TypedExpr, Error> {
    let mut scope = symbol_table.enter_scope();

    let input = map_tuple(&scope, input)?;
    for member in input.members.iter() {
        // Positional parameters have no name to bind.
        if let Some(name) = &member.name {
            scope
                .register_variable(name, member.ty.clone())
                .map_err(|error| error_at(error, span))?;
        }
    }

    let body = match &body.kind {
        ExprKind::Block(block) => analyse_block(&mut scope, block)?,
        _ => TypedBlock::new(vec![analyse_expr(&mut scope, body)?]),
    };
    let closure = scope.get_closure();
    drop(scope);

    let function_type = FunctionType::new(input, body.get_type());
    tracing::debug!(
        ty = %function_type,
        captured = closure.len(),
        "analysed function definition"
    );

    Ok(TypedExpr::FunctionDefinition(TypedFunctionDefinition {
        function_type,
        closure,
        body,
    }))
}

fn resolve_function(
    symbol_table: &mut SymbolTable,
    name: &str,
    span: &Span,
) -> Result<FunctionType, Error> {
    let variable = symbol_table
        .get_variable(name)
        .map_err(|error| error_at(error, span))?;

    variable.ty.as_function().cloned().ok_or_else(|| {
        Error::semantic(
            format!("`{}` is of type {} and cannot be called", name, variable.ty),
            span.start.clone(),
        )
    })
}

fn build_call(
    name: &str,
    function_type: FunctionType,
    input: TypedExpr,
    span: &Span,
) -> Result<TypedExpr, Error> {
    let input_type = input.get_type();
    if !Type::Tuple(function_type.input.clone()).is_assignable_from(&input_type) {
        return Err(Error::semantic(
            format!(
                "`{}` expects {} but was called with {}",
                name, function_type.input, input_type
            ),
            span.start.clone(),
        ));
    }

    Ok(TypedExpr::FunctionCall(TypedFunctionCall {
        callee: name.to_string(),
        input: Box::new(input),
        result_type: *function_type.output,
    }))
}

/// Resolves a type expression against the types visible in `symbol_table`.
pub fn map_type(symbol_table: &SymbolTable, ty: &TypeExpr) -> Result<Type, Error> {
    match ty {
        TypeExpr::Identifier { name, span } => symbol_table
            .get_type(name)
            .map_err(|error| error_at(error, span)),
        TypeExpr::Tuple(tuple) => Ok(Type::Tuple(map_tuple(symbol_table, tuple)?)),
        TypeExpr::Function { input, output, .. } => {
            let input = match map_type(symbol_table, input)? {
                Type::Tuple(tuple) => tuple,
                other => {
                    return Err(Error::semantic(
                        format!("function input must be a tuple type, found {}", other),
                        input.get_span().start.clone(),
                    ))
                }
            };

            Ok(Type::Function(FunctionType::new(
                input,
                map_type(symbol_table, output)?,
            )))
        }
    }
}

pub fn map_tuple(symbol_table: &SymbolTable, tuple: &TupleTypeExpr) -> Result<TupleType, Error> {
    let members = tuple
        .members
        .iter()
        .map(|member| {
            Ok(TupleMember::new(
                member.name.clone(),
                map_type(symbol_table, &member.ty)?,
            ))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(TupleType::new(members))
}
