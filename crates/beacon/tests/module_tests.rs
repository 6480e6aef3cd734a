//! Toolkits, plug/expose, bridges, inlet, link and bring

use beacon::ast::{BridgeDecl, Bring, Link, Plug, ToolkitDecl};
use beacon::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════════════════

/// Run a program and return (program output, diagnostics).
fn run(statements: Vec<Node>) -> (String, String) {
    run_with(Interpreter::new(), statements)
}

fn run_with(interp: Interpreter, statements: Vec<Node>) -> (String, String) {
    let out = CaptureBuffer::new();
    let err = CaptureBuffer::new();
    let mut interp = interp
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

fn toolkit(name: &str, body: Vec<Node>) -> Node {
    Node::Toolkit(ToolkitDecl {
        name: name.into(),
        body,
    })
}

fn plug(name: &str) -> Node {
    Node::Plug(Plug {
        toolkit: name.into(),
        file_path: None,
    })
}

fn bring(modules: &[&str], source: &str) -> Node {
    Node::Bring(Bring {
        modules: modules.iter().map(|m| m.to_string()).collect(),
        source: source.into(),
    })
}

/// toolkit Math { spec square(x) exposed { back x * x }  spec hidden() { back 0 } }
fn math() -> Node {
    toolkit(
        "Math",
        vec![
            Node::function(
                FunctionDecl::new(
                    "square",
                    &["x"],
                    vec![Node::back(Node::binary(Node::var("x"), "*", Node::var("x")))],
                )
                .exposed(),
            ),
            Node::function(FunctionDecl::new("hidden", &[], vec![Node::back(num(0.0))])),
        ],
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Toolkits
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_plug_imports_exposed_functions_only() {
    let (out, err) = run(vec![
        math(),
        plug("Math"),
        show(Node::call("square", vec![num(4.0)])),
        show(Node::call("hidden", vec![])),
    ]);
    assert_eq!(out, "16\nnil\n");
    assert_eq!(err, "LookupError: undefined spec `hidden`\n");
}

#[test]
fn test_shared_flag_exports_too() {
    let (out, _) = run(vec![
        toolkit(
            "Greet",
            vec![Node::function(
                FunctionDecl::new("hello", &[], vec![Node::back(Node::string("hello"))]).shared(),
            )],
        ),
        plug("Greet"),
        show(Node::call("hello", vec![])),
    ]);
    assert_eq!(out, "hello\n");
}

#[test]
fn test_toolkit_names_stay_inside_without_plug() {
    let (out, err) = run(vec![math(), show(Node::call("square", vec![num(2.0)]))]);
    assert_eq!(out, "nil\n");
    assert_eq!(err, "LookupError: undefined spec `square`\n");
}

#[test]
fn test_qualified_access() {
    let (out, err) = run(vec![
        math(),
        show(Node::method_call(Node::var("Math"), "square", vec![num(3.0)])),
        show(Node::method_call(Node::var("Math"), "hidden", vec![])),
        show(Node::attr(Node::var("Math"), "square")),
    ]);
    assert_eq!(out, "9\nnil\n<Spec square>\n");
    assert_eq!(err, "LookupError: undefined export `hidden`\n");
}

#[test]
fn test_expose_statement() {
    let (out, err) = run(vec![
        toolkit(
            "Cfg",
            vec![
                Node::assign("greeting", Node::string("hi")),
                Node::assign("secret", num(1.0)),
                Node::Expose("greeting".into()),
            ],
        ),
        show(Node::attr(Node::var("Cfg"), "greeting")),
        show(Node::attr(Node::var("Cfg"), "secret")),
    ]);
    assert_eq!(out, "hi\nnil\n");
    assert_eq!(err, "LookupError: undefined attribute `secret`\n");
}

#[test]
fn test_expose_from_nested_block() {
    let (out, _) = run(vec![
        toolkit(
            "T",
            vec![Node::Embed(vec![Node::function(
                FunctionDecl::new("one", &[], vec![Node::back(num(1.0))]).exposed(),
            )])],
        ),
        show(Node::method_call(Node::var("T"), "one", vec![])),
    ]);
    assert_eq!(out, "1\n");
}

#[test]
fn test_plug_is_a_snapshot() {
    let (out, _) = run(vec![
        toolkit(
            "T",
            vec![Node::assign("v", num(1.0)), Node::Expose("v".into())],
        ),
        plug("T"),
        Node::assign("v", num(5.0)),
        Node::show(vec![Node::var("v"), Node::attr(Node::var("T"), "v")]),
    ]);
    assert_eq!(out, "5 1\n");
}

#[test]
fn test_toolkit_display() {
    let (out, _) = run(vec![
        math(),
        Node::show(vec![Node::var("Math"), Node::kind(Node::var("Math"))]),
    ]);
    assert_eq!(out, "<Toolkit Math> Toolkit\n");
}

#[test]
fn test_module_faults() {
    let (_, err) = run(vec![
        Node::assign("x", num(1.0)),
        Node::Expose("x".into()),
        toolkit("Empty", vec![Node::Expose("ghost".into())]),
        plug("Nope"),
        plug("x"),
    ]);
    let lines: Vec<&str> = err.lines().collect();
    assert_eq!(
        lines,
        vec![
            "TypeMismatchError: expose can only be used inside a toolkit",
            "LookupError: undefined identifier `ghost`",
            "LookupError: undefined toolkit `Nope`",
            "TypeMismatchError: cannot plug Num `x`",
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Bridges, inlet and link
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_bridge_is_inert() {
    let (out, err) = run(vec![
        Node::Bridge(BridgeDecl {
            name: "Native".into(),
            body: vec![Node::assign("inner", num(1.0))],
        }),
        Node::show(vec![Node::var("Native"), Node::kind(Node::var("Native"))]),
        show(Node::var("inner")),
    ]);
    assert_eq!(out, "<Bridge Native> Bridge\nnil\n");
    assert_eq!(err, "LookupError: undefined variable `inner`\n");
}

#[test]
fn test_inlet_runs_in_current_scope() {
    let (out, _) = run(vec![
        Node::Inlet(vec![Node::assign("y", num(2.0))]),
        show(Node::var("y")),
    ]);
    assert_eq!(out, "2\n");
}

#[test]
fn test_link_binds_implementation() {
    let link = |greeter: &str, value: Node| {
        Node::Link(Link {
            greeter: greeter.into(),
            implementation: Box::new(value),
        })
    };
    let (out, err) = run(vec![
        link("greeter", Node::string("impl")),
        show(Node::var("greeter")),
        Node::firm("fixed", num(1.0)),
        link("fixed", num(2.0)),
        show(Node::var("fixed")),
    ]);
    assert_eq!(out, "impl\n1\n");
    assert_eq!(err, "ConstAssignError: cannot assign to constant `fixed`\n");
}

// ═══════════════════════════════════════════════════════════════════════
// bring
// ═══════════════════════════════════════════════════════════════════════

fn library() -> MemoryLoader {
    MemoryLoader::new().with_module(
        "lib.bcn",
        vec![Node::function(FunctionDecl::new(
            "twice",
            &["x"],
            vec![Node::back(Node::binary(Node::var("x"), "*", num(2.0)))],
        ))],
    )
}

#[test]
fn test_bring_splices_module() {
    let (out, err) = run_with(
        Interpreter::new().with_loader(library()),
        vec![
            bring(&["twice"], "lib.bcn"),
            show(Node::call("twice", vec![num(21.0)])),
        ],
    );
    assert_eq!(out, "42\n");
    assert_eq!(err, "");
}

#[test]
fn test_bring_checks_requested_names() {
    let (_, err) = run_with(
        Interpreter::new().with_loader(library()),
        vec![bring(&["twice", "thrice"], "lib.bcn")],
    );
    assert_eq!(err, "LookupError: undefined module `thrice`\n");
}

#[test]
fn test_bring_failures() {
    let (_, err) = run_with(
        Interpreter::new().with_loader(library()),
        vec![bring(&[], "missing.bcn")],
    );
    assert_eq!(
        err,
        "LoadError: cannot bring `missing.bcn`: no module at `missing.bcn`\n"
    );

    let (_, err) = run(vec![bring(&[], "lib.bcn")]);
    assert_eq!(
        err,
        "LoadError: cannot bring `lib.bcn`: no module loader configured\n"
    );
}

#[test]
fn test_bring_cycle_is_reported_once() {
    let loader = MemoryLoader::new()
        .with_module(
            "a.bcn",
            vec![bring(&[], "b.bcn"), show(Node::string("loaded a"))],
        )
        .with_module(
            "b.bcn",
            vec![bring(&[], "a.bcn"), show(Node::string("loaded b"))],
        );

    let (out, err) = run_with(
        Interpreter::new().with_loader(loader),
        vec![bring(&[], "a.bcn"), bring(&[], "a.bcn")],
    );
    assert_eq!(out, "loaded b\nloaded a\nloaded b\nloaded a\n");
    assert_eq!(
        err,
        "LoadError: cannot bring `a.bcn`: module is already being brought\n\
         LoadError: cannot bring `a.bcn`: module is already being brought\n"
    );
}

#[test]
fn test_closure_loader() {
    let loader = |path: &str| -> anyhow::Result<Vec<Node>> {
        Ok(vec![Node::assign("origin", Node::string(path))])
    };
    let (out, _) = run_with(
        Interpreter::new().with_loader(loader),
        vec![bring(&["origin"], "virtual.bcn"), show(Node::var("origin"))],
    );
    assert_eq!(out, "virtual.bcn\n");
}

#[test]
fn test_plug_brings_toolkit_from_its_file() {
    let loader = MemoryLoader::new().with_module("math.bcn", vec![math()]);
    let (out, err) = run_with(
        Interpreter::new().with_loader(loader),
        vec![
            Node::Plug(Plug {
                toolkit: "Math".into(),
                file_path: Some("math.bcn".into()),
            }),
            show(Node::call("square", vec![num(5.0)])),
        ],
    );
    assert_eq!(out, "25\n");
    assert_eq!(err, "");
}
