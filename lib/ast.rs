use std::fmt;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    Quit,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Id(String),
    Assign { name: String, value: Box<Node> },

    Integer(i64),
    Float(f64),
    Bool(bool),

    Negate(Box<Node>),

    Multiply(Box<Node>, Box<Node>),
    Divide(Box<Node>, Box<Node>),
    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),

    Lt(Box<Node>, Box<Node>),
    Le(Box<Node>, Box<Node>),
    Gt(Box<Node>, Box<Node>),
    Ge(Box<Node>, Box<Node>),
    Neq(Box<Node>, Box<Node>),
    Eq(Box<Node>, Box<Node>),

    Command(Command),
}

impl Node {
    pub fn assign(name: impl Into<String>, value: Node) -> Self {
        Node::Assign {
            name: name.into(),
            value: Box::new(value),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Id(name) => write!(f, "{}", name),
            Node::Assign { name, value } => write!(f, "(:= {} {})", name, value),
            Node::Integer(value) => write!(f, "{}", value),
            Node::Float(value) => write!(f, "{:?}", value),
            Node::Bool(value) => write!(f, "{}", value),
            Node::Negate(value) => write!(f, "(- {})", value),
            Node::Multiply(left, right) => write!(f, "(* {} {})", left, right),
            Node::Divide(left, right) => write!(f, "(/ {} {})", left, right),
            Node::Add(left, right) => write!(f, "(+ {} {})", left, right),
            Node::Sub(left, right) => write!(f, "(- {} {})", left, right),
            Node::Lt(left, right) => write!(f, "(< {} {})", left, right),
            Node::Le(left, right) => write!(f, "(<= {} {})", left, right),
            Node::Gt(left, right) => write!(f, "(> {} {})", left, right),
            Node::Ge(left, right) => write!(f, "(>= {} {})", left, right),
            Node::Neq(left, right) => write!(f, "(<> {} {})", left, right),
            Node::Eq(left, right) => write!(f, "(= {} {})", left, right),
            Node::Command(Command::Quit) => write!(f, "(quit)"),
        }
    }
}
