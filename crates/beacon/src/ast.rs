//! Beacon abstract syntax tree
//!
//! The tree is produced by the external parser and handed to the runtime
//! fully built. It is immutable for the whole run. Nodes own their
//! children, except where a runtime value must keep part of the tree alive
//! on its own: function and constructor declarations sit behind `Rc` so a
//! `Function` or `Blueprint` value can hold them, and `paral`/`signal`/
//! `listen` bodies are `Rc<[Node]>` so queued tasks and registered
//! handlers point at the statements instead of copying them.

mod build;

use std::rc::Rc;

/// A single AST node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root of a program: top-level statements in order
    Program(Vec<Node>),

    // Literals
    /// Numeric literal
    Number(f64),
    /// Text literal
    String(String),
    /// `On`/`Off` literal
    Bool(bool),
    /// `Nil` literal
    Nil,
    /// Text with embedded expressions
    Interpolated(Vec<InterpolationPart>),
    /// `pack [a, b]` rendered to text
    Pack(Vec<Node>),
    /// Bare type name (`Num`, `Text`, ...) used as a value
    TypeName(String),
    /// Documentation string; evaluates to nothing
    Docstring(String),

    // Operators
    /// Binary operator application
    Binary(BinaryExpr),
    /// Unary operator application
    Unary(UnaryExpr),
    /// `kind expr`
    Kind(Box<Node>),
    /// `convert expr to Type`
    Convert(Convert),

    // Variables
    /// Variable access
    Variable(String),
    /// `target = value`
    Assign(Assign),
    /// `firm name = value`
    ConstDecl(ConstDecl),
    /// `nick Alias = Original`; parse-time only
    Nick(Nick),

    // Statements
    /// `show a, b`
    Show(Vec<Node>),
    /// Expression evaluated for its effects
    ExprStmt(Box<Node>),
    /// Block in a fresh child scope
    Embed(Vec<Node>),
    /// `ask "prompt"`
    Ask(Vec<Node>),
    /// `wait duration`; a no-op
    Wait(Option<Box<Node>>),

    // Functions
    /// `spec name(params) { ... }`
    FunctionDecl(Rc<FunctionDecl>),
    /// `back expr`
    Return(Option<Box<Node>>),
    /// `callee(args)`
    Call(Call),
    /// `object.method(args)`
    MethodCall(MethodCall),

    // Control flow
    /// `check` / `alter` / `altern`
    Check(Check),
    /// `traverse i from a to b step s`
    Traverse(Traverse),
    /// `each i in range`
    Each(Each),
    /// `until condition`
    Until(Until),
    /// Leave the enclosing loop
    Halt,
    /// Skip to the next loop iteration
    Proceed,

    // Objects
    /// `blueprint Name { ... }`
    Blueprint(BlueprintDecl),
    /// `spawn Blueprint(args)`
    Spawn(Spawn),
    /// `Child adopt Parent`
    Adopt(Adopt),
    /// `object.attribute`
    Attribute(AttributeAccess),

    // Modules
    /// `toolkit Name { ... }`
    Toolkit(ToolkitDecl),
    /// `plug Name`
    Plug(Plug),
    /// `expose name`
    Expose(String),
    /// `bridge Name { ... }`
    Bridge(BridgeDecl),
    /// `inlet { ... }`
    Inlet(Vec<Node>),
    /// `link greeter = implementation`
    Link(Link),
    /// `bring a, b from "path"`
    Bring(Bring),

    // Errors
    /// `attempt { } trap { } conclude { }`
    Attempt(Attempt),
    /// `trigger Name, "message"`
    Trigger(Trigger),

    // Scheduling
    /// `paral { ... }`: defer statements
    Paral(Rc<[Node]>),
    /// `hold { ... }`: drain deferred statements, then run the body
    Hold(Vec<Node>),
    /// `signal { "event" ... }`
    Signal(Rc<[Node]>),
    /// `listen { "event" ... }`
    Listen(Rc<[Node]>),
}

/// One piece of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationPart {
    /// Literal text
    Literal(String),
    /// Expression rendered with `to_display_string`
    Expr(Node),
}

/// Binary operator application; the operator is the upstream symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// Left operand
    pub left: Box<Node>,
    /// Operator symbol (`+`, `'=`, `..`, `is`, ...)
    pub op: String,
    /// Right operand
    pub right: Box<Node>,
}

/// Unary operator application.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    /// Operator symbol (`'` or `-`)
    pub op: String,
    /// Operand
    pub operand: Box<Node>,
}

/// Explicit coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Convert {
    /// Value to convert
    pub source: Box<Node>,
    /// Target type name (`Text` or `Num`)
    pub target: String,
}

/// Assignment to a variable or attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// `Variable` or `Attribute` node
    pub target: Box<Node>,
    /// Value expression
    pub value: Box<Node>,
}

/// Constant declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    /// Constant name
    pub name: String,
    /// Value expression
    pub value: Box<Node>,
}

/// Type alias declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Nick {
    /// Aliased type
    pub original: String,
    /// New name
    pub alias: String,
}

/// Function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Name; `None` for an anonymous function
    pub name: Option<String>,
    /// Parameter names in order. For methods, index 0 is the receiver.
    pub params: Vec<String>,
    /// Body statements
    pub body: Vec<Node>,
    /// Exported from the enclosing toolkit
    pub exposed: bool,
    /// Shared from the enclosing toolkit (same effect as `exposed`)
    pub shared: bool,
    /// Attached documentation
    pub docstring: Option<String>,
}

/// Call of a function value.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Expression producing the function (usually a `Variable`)
    pub callee: Box<Node>,
    /// Argument expressions
    pub args: Vec<Node>,
}

/// Call of a method on an instance or of an export on a toolkit.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Receiver expression
    pub object: Box<Node>,
    /// Method name
    pub method: String,
    /// Argument expressions (receiver excluded)
    pub args: Vec<Node>,
}

/// `check` statement with its `alter` chain and `altern` body.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Condition
    pub condition: Box<Node>,
    /// Body when the condition holds
    pub body: Vec<Node>,
    /// `alter` clauses, tested in order
    pub alters: Vec<Alter>,
    /// `altern` body
    pub altern: Option<Vec<Node>>,
}

/// One `alter` (else-if) clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Alter {
    /// Condition
    pub condition: Node,
    /// Body
    pub body: Vec<Node>,
}

/// Counted numeric loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Traverse {
    /// Loop variable
    pub var: String,
    /// First value
    pub start: Box<Node>,
    /// Last value (inclusive)
    pub end: Box<Node>,
    /// Step; defaults to 1
    pub step: Option<Box<Node>>,
    /// Body
    pub body: Vec<Node>,
}

/// Loop over a `Range` value.
#[derive(Debug, Clone, PartialEq)]
pub struct Each {
    /// Loop variable
    pub var: String,
    /// Expression producing a `Range`
    pub iterable: Box<Node>,
    /// Body
    pub body: Vec<Node>,
}

/// Loop until a condition becomes true.
#[derive(Debug, Clone, PartialEq)]
pub struct Until {
    /// Stop condition
    pub condition: Box<Node>,
    /// Body
    pub body: Vec<Node>,
}

/// Blueprint (class template) declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct BlueprintDecl {
    /// Blueprint name
    pub name: String,
    /// Field initialisers; a bare `Variable` declares the field as `Nil`
    pub attributes: Vec<Node>,
    /// Optional constructor
    pub constructor: Option<Rc<ConstructorDecl>>,
    /// Method declarations
    pub methods: Vec<Node>,
    /// Attached documentation
    pub docstring: Option<String>,
}

/// Blueprint constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    /// Parameters; index 0 is the receiver
    pub params: Vec<String>,
    /// Body
    pub body: Vec<Node>,
}

/// Blueprint instantiation.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawn {
    /// Expression producing a `Blueprint`
    pub blueprint: Box<Node>,
    /// Constructor arguments
    pub args: Vec<Node>,
}

/// Static inheritance: copy `parent`'s bindings into `child`.
#[derive(Debug, Clone, PartialEq)]
pub struct Adopt {
    /// Receiving blueprint
    pub child: String,
    /// Source blueprint
    pub parent: String,
}

/// Attribute read.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeAccess {
    /// Object expression
    pub object: Box<Node>,
    /// Attribute name
    pub attribute: String,
}

/// Toolkit (namespace) declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolkitDecl {
    /// Toolkit name
    pub name: String,
    /// Body statements
    pub body: Vec<Node>,
}

/// Import of a toolkit's exports.
#[derive(Debug, Clone, PartialEq)]
pub struct Plug {
    /// Toolkit name
    pub toolkit: String,
    /// Source file the parser resolved the toolkit from, if any
    pub file_path: Option<String>,
}

/// Foreign-boundary placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeDecl {
    /// Bridge name
    pub name: String,
    /// Body statements
    pub body: Vec<Node>,
}

/// Bind a name to an implementation value.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Name receiving the implementation
    pub greeter: String,
    /// Implementation expression
    pub implementation: Box<Node>,
}

/// Source-level module import.
#[derive(Debug, Clone, PartialEq)]
pub struct Bring {
    /// Names the module is expected to define
    pub modules: Vec<String>,
    /// Source path handed to the module loader
    pub source: String,
}

/// Structured error handling.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// Guarded statements
    pub body: Vec<Node>,
    /// Handler statements
    pub trap: Vec<Node>,
    /// Bind the error message as `peek` in the trap scope
    pub peek: bool,
    /// Bind the error name under this name in the trap scope
    pub error_var: Option<String>,
    /// Statements that always run afterwards
    pub conclude: Option<Vec<Node>>,
}

/// Raise a named error.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    /// Error name
    pub name: String,
    /// Error message
    pub message: Option<String>,
}

impl Node {
    /// Human-readable name of the node kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Program(_) => "program",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Bool(_) => "bool",
            Node::Nil => "nil",
            Node::Interpolated(_) => "interpolated string",
            Node::Pack(_) => "pack",
            Node::TypeName(_) => "type name",
            Node::Docstring(_) => "docstring",
            Node::Binary(_) => "binary operation",
            Node::Unary(_) => "unary operation",
            Node::Kind(_) => "kind",
            Node::Convert(_) => "convert",
            Node::Variable(_) => "variable",
            Node::Assign(_) => "assignment",
            Node::ConstDecl(_) => "constant declaration",
            Node::Nick(_) => "nick",
            Node::Show(_) => "show",
            Node::ExprStmt(_) => "expression statement",
            Node::Embed(_) => "embed",
            Node::Ask(_) => "ask",
            Node::Wait(_) => "wait",
            Node::FunctionDecl(_) => "spec declaration",
            Node::Return(_) => "back",
            Node::Call(_) => "call",
            Node::MethodCall(_) => "method call",
            Node::Check(_) => "check",
            Node::Traverse(_) => "traverse",
            Node::Each(_) => "each",
            Node::Until(_) => "until",
            Node::Halt => "halt",
            Node::Proceed => "proceed",
            Node::Blueprint(_) => "blueprint",
            Node::Spawn(_) => "spawn",
            Node::Adopt(_) => "adopt",
            Node::Attribute(_) => "attribute access",
            Node::Toolkit(_) => "toolkit",
            Node::Plug(_) => "plug",
            Node::Expose(_) => "expose",
            Node::Bridge(_) => "bridge",
            Node::Inlet(_) => "inlet",
            Node::Link(_) => "link",
            Node::Bring(_) => "bring",
            Node::Attempt(_) => "attempt",
            Node::Trigger(_) => "trigger",
            Node::Paral(_) => "paral",
            Node::Hold(_) => "hold",
            Node::Signal(_) => "signal",
            Node::Listen(_) => "listen",
        }
    }

    /// The text of a string literal, looking through an expression statement.
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            Node::ExprStmt(inner) => inner.as_string_literal(),
            _ => None,
        }
    }
}
