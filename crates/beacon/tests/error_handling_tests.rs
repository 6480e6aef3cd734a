//! attempt / trap / conclude, trigger and diagnostics

use beacon::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════════════════

/// Run a program and return (program output, diagnostics).
fn run(statements: Vec<Node>) -> (String, String) {
    let out = CaptureBuffer::new();
    let err = CaptureBuffer::new();
    let mut interp = Interpreter::new()
        .with_output(out.clone())
        .with_diagnostics(err.clone());
    interp.run(&Node::program(statements)).unwrap();
    (out.contents(), err.contents())
}

fn num(n: f64) -> Node {
    Node::number(n)
}

fn show(node: Node) -> Node {
    Node::show(vec![node])
}

fn say(text: &str) -> Node {
    Node::show(vec![Node::string(text)])
}

// ═══════════════════════════════════════════════════════════════════════
// attempt / trap / conclude
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_trap_and_conclude_run_once() {
    let (out, err) = run(vec![Attempt::new(
        vec![say("before"), Node::trigger("E", "bad"), say("skipped")],
        vec![say("trap")],
    )
    .with_conclude(vec![say("conclude")])
    .into_node()]);

    assert_eq!(out, "before\ntrap\nconclude\n");
    assert_eq!(err, "");
}

#[test]
fn test_no_error_skips_trap() {
    let (out, _) = run(vec![Attempt::new(vec![say("body")], vec![say("trap")])
        .with_conclude(vec![say("conclude")])
        .into_node()]);
    assert_eq!(out, "body\nconclude\n");
}

#[test]
fn test_peek_and_error_variable() {
    let (out, _) = run(vec![Attempt::new(
        vec![Node::trigger("DiskFull", "no space left")],
        vec![Node::show(vec![Node::var("kind_of"), Node::var("peek")])],
    )
    .with_peek()
    .with_error_var("kind_of")
    .into_node()]);
    assert_eq!(out, "DiskFull no space left\n");
}

#[test]
fn test_trap_scope_does_not_leak() {
    let (out, err) = run(vec![
        Attempt::new(
            vec![Node::trigger("E", "m")],
            vec![Node::assign("local", num(1.0))],
        )
        .with_peek()
        .into_node(),
        show(Node::var("peek")),
        show(Node::var("local")),
    ]);
    assert_eq!(out, "nil\nnil\n");
    assert_eq!(
        err,
        "LookupError: undefined variable `peek`\nLookupError: undefined variable `local`\n"
    );
}

#[test]
fn test_attempt_body_assignments_to_outer_names_persist() {
    let (out, _) = run(vec![
        Node::assign("progress", num(0.0)),
        Attempt::new(
            vec![
                Node::assign("progress", num(1.0)),
                Node::trigger("E", "stop"),
                Node::assign("progress", num(2.0)),
            ],
            vec![],
        )
        .into_node(),
        show(Node::var("progress")),
    ]);
    assert_eq!(out, "1\n");
}

#[test]
fn test_error_unwinds_through_calls() {
    let inner = FunctionDecl::new(
        "inner",
        &[],
        vec![Node::trigger("Deep", "from inner"), say("unreached")],
    );
    let outer = FunctionDecl::new(
        "outer",
        &[],
        vec![Node::expr(Node::call("inner", vec![])), say("unreached")],
    );
    let (out, err) = run(vec![
        Node::function(inner),
        Node::function(outer),
        Attempt::new(
            vec![Node::expr(Node::call("outer", vec![])), say("unreached")],
            vec![show(Node::var("peek"))],
        )
        .with_peek()
        .into_node(),
        say("after"),
    ]);
    assert_eq!(out, "from inner\nafter\n");
    assert_eq!(err, "");
}

#[test]
fn test_error_in_expression_stops_statement() {
    let fail = FunctionDecl::new("fail", &[], vec![Node::trigger("E", "nope")]);
    let (out, _) = run(vec![
        Node::function(fail),
        Node::assign("x", num(1.0)),
        Attempt::new(
            vec![Node::assign(
                "x",
                Node::binary(Node::call("fail", vec![]), "+", num(1.0)),
            )],
            vec![say("trapped")],
        )
        .into_node(),
        show(Node::var("x")),
    ]);
    assert_eq!(out, "trapped\n1\n");
}

#[test]
fn test_nested_attempts() {
    let inner = Attempt::new(
        vec![Node::trigger("Inner", "first")],
        vec![
            say("inner trap"),
            Node::trigger("Outer", "second"),
        ],
    )
    .with_conclude(vec![say("inner conclude")])
    .into_node();

    let (out, _) = run(vec![Attempt::new(vec![inner], vec![show(Node::var("peek"))])
        .with_peek()
        .with_conclude(vec![say("outer conclude")])
        .into_node()]);

    assert_eq!(
        out,
        "inner trap\ninner conclude\nsecond\nouter conclude\n"
    );
}

#[test]
fn test_error_in_conclude_propagates() {
    let (out, err) = run(vec![
        Attempt::new(vec![say("body")], vec![])
            .with_conclude(vec![Node::trigger("Late", "in conclude")])
            .into_node(),
        say("next"),
    ]);
    assert_eq!(out, "body\nnext\n");
    assert_eq!(err, "UncaughtError: Late: in conclude\n");
}

#[test]
fn test_recoverable_faults_do_not_reach_trap() {
    let (out, err) = run(vec![Attempt::new(
        vec![show(Node::var("missing")), say("continued")],
        vec![say("trapped")],
    )
    .into_node()]);
    assert_eq!(out, "nil\ncontinued\n");
    assert_eq!(err, "LookupError: undefined variable `missing`\n");
}

#[test]
fn test_trigger_without_message() {
    let (out, _) = run(vec![Attempt::new(
        vec![Node::Trigger(beacon::ast::Trigger {
            name: "Bare".into(),
            message: None,
        })],
        vec![Node::show(vec![Node::string("["), Node::var("peek"), Node::string("]")])],
    )
    .with_peek()
    .into_node()]);
    assert_eq!(out, "[  ]\n");
}

// ═══════════════════════════════════════════════════════════════════════
// Uncaught Errors and Diagnostics
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_uncaught_error_is_reported_and_run_continues() {
    let (out, err) = run(vec![
        say("one"),
        Node::trigger("Boom", "it broke"),
        say("two"),
    ]);
    assert_eq!(out, "one\ntwo\n");
    assert_eq!(err, "UncaughtError: Boom: it broke\n");
}

#[test]
fn test_uncaught_error_abandons_rest_of_statement() {
    let f = FunctionDecl::new(
        "f",
        &[],
        vec![say("in f"), Node::trigger("E", "m"), say("unreached")],
    );
    let (out, _) = run(vec![
        Node::function(f),
        Node::expr(Node::call("f", vec![])),
        say("next statement"),
    ]);
    assert_eq!(out, "in f\nnext statement\n");
}

#[test]
fn test_diagnostics_go_to_their_own_stream() {
    let (out, err) = run(vec![
        Node::firm("limit", num(3.0)),
        Node::assign("limit", num(4.0)),
        Node::expr(Node::call("limit", vec![])),
        show(Node::var("limit")),
    ]);
    assert_eq!(out, "3\n");
    assert_eq!(
        err,
        "ConstAssignError: cannot assign to constant `limit`\n\
         TypeMismatchError: Num is not callable\n"
    );
}

#[test]
fn test_error_categories() {
    let cases = [
        (EvalError::undefined("x"), "LookupError"),
        (
            EvalError::Arity {
                name: "f".into(),
                expected: 1,
                got: 2,
            },
            "ArityError",
        ),
        (
            EvalError::ConstAssign { name: "x".into() },
            "ConstAssignError",
        ),
        (EvalError::type_mismatch("bad"), "TypeMismatchError"),
        (
            EvalError::UnknownOperator { op: "^".into() },
            "UnknownOperatorError",
        ),
        (
            EvalError::UnknownTypeName { name: "T".into() },
            "UnknownTypeNameError",
        ),
        (
            EvalError::Raised {
                name: "E".into(),
                message: "m".into(),
            },
            "UncaughtError",
        ),
    ];
    for (err, category) in cases {
        assert_eq!(err.category(), category);
    }
}
