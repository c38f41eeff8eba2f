//! End-to-end analysis of small programs.
//!
//! These tests drive the public entry points the way a compiler driver
//! would: build a syntax tree, analyse it, and inspect either the typed
//! tree or the single error that stopped analysis.

use langd::{
    ast::{
        ast::{Block, Expr, TupleElement},
        types::{TupleTypeExpr, TypeExpr},
    },
    errors::errors::ErrorImpl,
    semantic::{
        analyser::{analyse, Analyser, AnalyserConfig},
        typed_ast::TypedExpr,
        types::{FunctionType, TupleMember, TupleType, Type},
        visitor::{walk_block, TypedExprVisitor},
    },
};
use pretty_assertions::assert_eq;

#[test]
fn test_assignments_and_addition() {
    // x = 1; y = 2; z = x + y
    let program = Block::new(vec![
        Expr::assignment("x", Expr::int(1)),
        Expr::assignment("y", Expr::int(2)),
        Expr::assignment("z", Expr::plus(Expr::identifier("x"), Expr::identifier("y"))),
    ]);

    let block = analyse(&program).expect("analysis should succeed");

    assert_eq!(block.len(), 3);
    for expr in block.expressions.iter() {
        assert!(matches!(expr, TypedExpr::Assignment(_)));
    }
    match &block.expressions[2] {
        TypedExpr::Assignment(assignment) => {
            assert_eq!(assignment.name, "z");
            assert!(matches!(
                assignment.value.as_ref(),
                TypedExpr::PlusOperation(_)
            ));
            assert_eq!(assignment.value.get_type(), Type::Integer);
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_define_and_call_function() {
    // f = (a: Int) => a * 2; f((a: 3))
    let program = Block::new(vec![
        Expr::assignment(
            "f",
            Expr::function_definition(
                TupleTypeExpr::named(vec![("a", TypeExpr::identifier("Int"))]),
                Expr::times(Expr::identifier("a"), Expr::int(2)),
            ),
        ),
        Expr::function_call(
            "f",
            Expr::tuple(vec![TupleElement::named("a", Expr::int(3))]),
        ),
    ]);

    let block = analyse(&program).expect("analysis should succeed");

    let TypedExpr::Assignment(assignment) = &block.expressions[0] else {
        panic!("expected assignment");
    };
    let TypedExpr::FunctionDefinition(definition) = assignment.value.as_ref() else {
        panic!("expected function definition");
    };
    assert_eq!(
        definition.function_type,
        FunctionType::new(
            TupleType::new(vec![TupleMember::named("a", Type::Integer)]),
            Type::Integer
        )
    );
    assert!(definition.closure.is_empty());

    let TypedExpr::FunctionCall(call) = &block.expressions[1] else {
        panic!("expected function call");
    };
    assert_eq!(call.result_type, Type::Integer);
    assert_eq!(block.get_type(), Type::Integer);
}

#[test]
fn test_first_error_wins() {
    let mismatch = analyse(&Block::new(vec![Expr::plus(Expr::int(1), Expr::string("a"))]));
    assert!(matches!(
        mismatch.unwrap_err().get_kind(),
        ErrorImpl::SemanticError { .. }
    ));

    let missing = analyse(&Block::new(vec![Expr::identifier("undefinedName")]));
    assert_eq!(missing.unwrap_err().get_error_name(), "SymbolNotFound");

    let redeclared = analyse(&Block::new(vec![
        Expr::assignment("x", Expr::int(1)),
        Expr::assignment("x", Expr::int(2)),
        // Never reached: analysis stops at the redeclaration.
        Expr::identifier("undefinedName"),
    ]));
    assert_eq!(
        redeclared.unwrap_err().get_kind(),
        &ErrorImpl::VariableAlreadyDefined {
            variable: "x".to_string()
        }
    );
}

#[test]
fn test_member_selection_failures() {
    let missing_member = analyse(&Block::new(vec![
        Expr::assignment(
            "t",
            Expr::tuple(vec![TupleElement::named("present", Expr::int(1))]),
        ),
        Expr::member_selection(Expr::identifier("t"), "missing"),
    ]));
    assert_eq!(missing_member.unwrap_err().get_error_name(), "SemanticError");

    let not_a_tuple = analyse(&Block::new(vec![Expr::member_selection(Expr::int(4), "x")]));
    assert_eq!(not_a_tuple.unwrap_err().get_error_name(), "SemanticError");
}

#[test]
fn test_tuple_literal_round_trip() {
    let block = analyse(&Block::new(vec![Expr::tuple(vec![
        TupleElement::named("a", Expr::int(1)),
        TupleElement::named("b", Expr::string("x")),
    ])]))
    .unwrap();

    assert_eq!(
        block.get_type(),
        Type::Tuple(TupleType::new(vec![
            TupleMember::named("a", Type::Integer),
            TupleMember::named("b", Type::String),
        ]))
    );
}

#[test]
fn test_program_with_prelude_and_infix_calls() {
    // type Pair = (first: String, second: String)
    // join = (left: String, right: String) => left + right
    // announce = (p: Pair) => print((p.first.join((right: p.second))))
    // announce((p: (first: "a", second: "b")))
    let program = Block::new(vec![
        Expr::type_assignment(
            "Pair",
            TupleTypeExpr::named(vec![
                ("first", TypeExpr::identifier("String")),
                ("second", TypeExpr::identifier("String")),
            ])
            .into(),
        ),
        Expr::assignment(
            "join",
            Expr::function_definition(
                TupleTypeExpr::named(vec![
                    ("left", TypeExpr::identifier("String")),
                    ("right", TypeExpr::identifier("String")),
                ]),
                Expr::plus(Expr::identifier("left"), Expr::identifier("right")),
            ),
        ),
        Expr::assignment(
            "announce",
            Expr::function_definition(
                TupleTypeExpr::named(vec![("p", TypeExpr::identifier("Pair"))]),
                Expr::function_call(
                    "print",
                    Expr::tuple(vec![TupleElement::positional(Expr::infix_function_call(
                        Expr::member_selection(Expr::identifier("p"), "first"),
                        "join",
                        Expr::tuple(vec![TupleElement::named(
                            "right",
                            Expr::member_selection(Expr::identifier("p"), "second"),
                        )]),
                    ))]),
                ),
            ),
        ),
        Expr::function_call(
            "announce",
            Expr::tuple(vec![TupleElement::named(
                "p",
                Expr::tuple(vec![
                    TupleElement::named("first", Expr::string("a")),
                    TupleElement::named("second", Expr::string("b")),
                ]),
            )]),
        ),
    ]);

    let analyser = Analyser::with_config(AnalyserConfig::default().with_prelude()).unwrap();
    let block = analyser.analyse(&program).expect("analysis should succeed");

    assert_eq!(block.len(), 3);
    assert_eq!(block.get_type(), Type::Void);

    let TypedExpr::Assignment(announce) = &block.expressions[1] else {
        panic!("expected assignment");
    };
    let TypedExpr::FunctionDefinition(definition) = announce.value.as_ref() else {
        panic!("expected function definition");
    };
    let captured: Vec<&str> = definition
        .closure
        .variables()
        .iter()
        .map(|variable| variable.name.as_str())
        .collect();
    assert_eq!(captured, vec!["print", "join"]);
}

#[test]
fn test_tuple_argument_is_not_spread_over_parameters() {
    // show = (p: (first: String)) => p.first; show((first: "a"))
    let program = Block::new(vec![
        Expr::assignment(
            "show",
            Expr::function_definition(
                TupleTypeExpr::named(vec![(
                    "p",
                    TupleTypeExpr::named(vec![("first", TypeExpr::identifier("String"))]).into(),
                )]),
                Expr::member_selection(Expr::identifier("p"), "first"),
            ),
        ),
        Expr::function_call(
            "show",
            Expr::tuple(vec![
                TupleElement::named("first", Expr::string("a")),
                TupleElement::named("second", Expr::string("b")),
            ]),
        ),
    ]);

    let error = analyse(&program).unwrap_err();
    assert_eq!(error.get_error_name(), "SemanticError");
}

#[derive(Default)]
struct CallCounter {
    calls: Vec<String>,
}

impl TypedExprVisitor for CallCounter {
    fn visit_function_call(&mut self, call: &langd::semantic::typed_ast::TypedFunctionCall) {
        self.calls.push(call.callee.clone());
        self.visit_expr(&call.input);
    }
}

#[test]
fn test_backend_can_walk_typed_tree() {
    let program = Block::new(vec![
        Expr::assignment(
            "id",
            Expr::function_definition(
                TupleTypeExpr::named(vec![("v", TypeExpr::identifier("Int"))]),
                Expr::identifier("v"),
            ),
        ),
        Expr::function_call(
            "id",
            Expr::tuple(vec![TupleElement::positional(Expr::function_call(
                "id",
                Expr::tuple(vec![TupleElement::positional(Expr::int(5))]),
            ))]),
        ),
    ]);

    let block = analyse(&program).unwrap();
    let mut counter = CallCounter::default();
    walk_block(&mut counter, &block);

    assert_eq!(counter.calls, vec!["id".to_string(), "id".to_string()]);
}
