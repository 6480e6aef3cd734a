//! Convenience constructors for building trees by hand
//!
//! The parser normally produces the tree; these exist for embedders and
//! tests that assemble programs directly.

use std::rc::Rc;

use super::*;

impl Node {
    /// `Program` node
    pub fn program(statements: Vec<Node>) -> Self {
        Node::Program(statements)
    }

    /// Numeric literal
    pub fn number(n: f64) -> Self {
        Node::Number(n)
    }

    /// Text literal
    pub fn string(s: impl Into<String>) -> Self {
        Node::String(s.into())
    }

    /// Variable access
    pub fn var(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    /// Binary operation
    pub fn binary(left: Node, op: impl Into<String>, right: Node) -> Self {
        Node::Binary(BinaryExpr {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        })
    }

    /// Unary operation
    pub fn unary(op: impl Into<String>, operand: Node) -> Self {
        Node::Unary(UnaryExpr {
            op: op.into(),
            operand: Box::new(operand),
        })
    }

    /// `name = value`
    pub fn assign(name: impl Into<String>, value: Node) -> Self {
        Node::Assign(Assign {
            target: Box::new(Node::var(name)),
            value: Box::new(value),
        })
    }

    /// `object.attribute = value`
    pub fn assign_attr(object: Node, attribute: impl Into<String>, value: Node) -> Self {
        Node::Assign(Assign {
            target: Box::new(Node::attr(object, attribute)),
            value: Box::new(value),
        })
    }

    /// `firm name = value`
    pub fn firm(name: impl Into<String>, value: Node) -> Self {
        Node::ConstDecl(ConstDecl {
            name: name.into(),
            value: Box::new(value),
        })
    }

    /// `show items...`
    pub fn show(items: Vec<Node>) -> Self {
        Node::Show(items)
    }

    /// Expression statement
    pub fn expr(node: Node) -> Self {
        Node::ExprStmt(Box::new(node))
    }

    /// `back value`
    pub fn back(value: Node) -> Self {
        Node::Return(Some(Box::new(value)))
    }

    /// Call a function by name
    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call(Call {
            callee: Box::new(Node::var(name)),
            args,
        })
    }

    /// `object.method(args)`
    pub fn method_call(object: Node, method: impl Into<String>, args: Vec<Node>) -> Self {
        Node::MethodCall(MethodCall {
            object: Box::new(object),
            method: method.into(),
            args,
        })
    }

    /// `object.attribute`
    pub fn attr(object: Node, attribute: impl Into<String>) -> Self {
        Node::Attribute(AttributeAccess {
            object: Box::new(object),
            attribute: attribute.into(),
        })
    }

    /// `spawn Name(args)`
    pub fn spawn(blueprint: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Spawn(Spawn {
            blueprint: Box::new(Node::var(blueprint)),
            args,
        })
    }

    /// `Child adopt Parent`
    pub fn adopt(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Node::Adopt(Adopt {
            child: child.into(),
            parent: parent.into(),
        })
    }

    /// `convert source to Target`
    pub fn convert(source: Node, target: impl Into<String>) -> Self {
        Node::Convert(Convert {
            source: Box::new(source),
            target: target.into(),
        })
    }

    /// `kind expr`
    pub fn kind(expr: Node) -> Self {
        Node::Kind(Box::new(expr))
    }

    /// `check condition { body }` with no alternatives
    pub fn check(condition: Node, body: Vec<Node>) -> Self {
        Node::Check(Check {
            condition: Box::new(condition),
            body,
            alters: Vec::new(),
            altern: None,
        })
    }

    /// `traverse var from start to end { body }`
    pub fn traverse(var: impl Into<String>, start: Node, end: Node, body: Vec<Node>) -> Self {
        Node::Traverse(Traverse {
            var: var.into(),
            start: Box::new(start),
            end: Box::new(end),
            step: None,
            body,
        })
    }

    /// `each var in iterable { body }`
    pub fn each(var: impl Into<String>, iterable: Node, body: Vec<Node>) -> Self {
        Node::Each(Each {
            var: var.into(),
            iterable: Box::new(iterable),
            body,
        })
    }

    /// `until condition { body }`
    pub fn until(condition: Node, body: Vec<Node>) -> Self {
        Node::Until(Until {
            condition: Box::new(condition),
            body,
        })
    }

    /// `trigger name, "message"`
    pub fn trigger(name: impl Into<String>, message: impl Into<String>) -> Self {
        Node::Trigger(Trigger {
            name: name.into(),
            message: Some(message.into()),
        })
    }

    /// `paral { body }`
    pub fn paral(body: Vec<Node>) -> Self {
        Node::Paral(body.into())
    }

    /// `hold { body }`
    pub fn hold(body: Vec<Node>) -> Self {
        Node::Hold(body)
    }

    /// `signal "event" { body }`
    pub fn signal(event: impl Into<String>, body: Vec<Node>) -> Self {
        Node::Signal(with_event_name(event, body))
    }

    /// `listen "event" { body }`
    pub fn listen(event: impl Into<String>, body: Vec<Node>) -> Self {
        Node::Listen(with_event_name(event, body))
    }

    /// Declaration statement for a function
    pub fn function(decl: FunctionDecl) -> Self {
        Node::FunctionDecl(Rc::new(decl))
    }
}

fn with_event_name(event: impl Into<String>, body: Vec<Node>) -> Rc<[Node]> {
    let mut statements = Vec::with_capacity(body.len() + 1);
    statements.push(Node::expr(Node::string(event)));
    statements.extend(body);
    statements.into()
}

impl FunctionDecl {
    /// Named declaration with the given parameters and body.
    pub fn new(name: impl Into<String>, params: &[&str], body: Vec<Node>) -> Self {
        Self {
            name: Some(name.into()),
            params: params.iter().map(|p| p.to_string()).collect(),
            body,
            exposed: false,
            shared: false,
            docstring: None,
        }
    }

    /// Anonymous declaration.
    pub fn anonymous(params: &[&str], body: Vec<Node>) -> Self {
        Self {
            name: None,
            ..Self::new("", params, body)
        }
    }

    /// Mark as exported from the enclosing toolkit.
    pub fn exposed(mut self) -> Self {
        self.exposed = true;
        self
    }

    /// Mark as shared from the enclosing toolkit.
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    /// Attach documentation.
    pub fn documented(mut self, doc: impl Into<String>) -> Self {
        self.docstring = Some(doc.into());
        self
    }

    /// Name shown in diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

impl BlueprintDecl {
    /// Empty blueprint.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            constructor: None,
            methods: Vec::new(),
            docstring: None,
        }
    }

    /// Add a field initialiser (or a bare `Variable` for a `Nil` field).
    pub fn attribute(mut self, attribute: Node) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a `Nil` field.
    pub fn field(self, name: impl Into<String>) -> Self {
        self.attribute(Node::var(name))
    }

    /// Add a method.
    pub fn method(mut self, decl: FunctionDecl) -> Self {
        self.methods.push(Node::function(decl));
        self
    }

    /// Set the constructor.
    pub fn constructor(mut self, params: &[&str], body: Vec<Node>) -> Self {
        self.constructor = Some(Rc::new(ConstructorDecl {
            params: params.iter().map(|p| p.to_string()).collect(),
            body,
        }));
        self
    }

    /// Wrap as a declaration statement.
    pub fn into_node(self) -> Node {
        Node::Blueprint(self)
    }
}

impl Attempt {
    /// `attempt { body } trap { trap }` with no `conclude`.
    pub fn new(body: Vec<Node>, trap: Vec<Node>) -> Self {
        Self {
            body,
            trap,
            peek: false,
            error_var: None,
            conclude: None,
        }
    }

    /// Expose the error message as `peek` in the trap body.
    pub fn with_peek(mut self) -> Self {
        self.peek = true;
        self
    }

    /// Bind the error name in the trap body.
    pub fn with_error_var(mut self, name: impl Into<String>) -> Self {
        self.error_var = Some(name.into());
        self
    }

    /// Add a `conclude` body.
    pub fn with_conclude(mut self, conclude: Vec<Node>) -> Self {
        self.conclude = Some(conclude);
        self
    }

    /// Wrap as a statement.
    pub fn into_node(self) -> Node {
        Node::Attempt(self)
    }
}
