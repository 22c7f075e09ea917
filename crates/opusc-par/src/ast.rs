//! AST model: uniform binary nodes with cons-cell sequence encoding.
//!
//! Every node carries the same record: a kind tag, the anchor token it grew
//! from, two child links, and the attribute slots the semantic analyzer
//! fills in (inferred type, foldability, folded value).
//!
//! Sequences — the program, code blocks, parameter lists, argument lists —
//! are encoded as right-leaning cons-cells: each node of the sequence kind
//! holds one element on its left and the rest of the sequence on its right,
//! with an empty node of the same kind terminating the chain. This keeps
//! every traversal a plain binary walk.

use std::fmt;

use opusc_lex::Token;
use opusc_util::SourceLocation;

/// A compile-time value produced by constant folding.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// The type name this value infers to.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "String",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
        }
    }
}

/// The closed set of AST node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    CodeBlock,
    Error,
    Literal,
    BooleanLiteral,
    Identifier,
    TypeAnnotation,
    VariableDeclaration,
    ConstantDeclaration,
    Assignment,
    Binary,
    Unary,
    Postfix,
    FunctionCall,
    Argument,
    ArgumentLabel,
    ArgumentList,
    FunctionDefinition,
    FunctionSignature,
    FunctionImplementation,
    Parameter,
    ParameterLabel,
    ParameterList,
    FunctionReturnType,
    ReturnStatement,
    ConditionalStatement,
    ConditionalBody,
    RepeatUntilStatement,
    ForInStatement,
    ForInContext,
}

/// The sentinel inferred type meaning "not yet analyzed".
pub const TYPE_ANY: &str = "Any";

/// A single AST node.
///
/// Created by the parser; the analyzer is the only mutator and writes the
/// `inferred_type`, `foldable`, and `value` attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// What the node represents.
    pub kind: NodeKind,
    /// The token the node is most closely associated with. Empty sequence
    /// terminators have none.
    pub token: Option<Token>,
    /// Left child.
    pub left: Option<Box<Node>>,
    /// Right child.
    pub right: Option<Box<Node>>,
    /// Inferred type name; [`TYPE_ANY`] until analyzed.
    pub inferred_type: String,
    /// Whether the subtree is a compile-time constant.
    pub foldable: bool,
    /// The folded value, when `foldable` and folding succeeded.
    pub value: Option<Value>,
}

impl Node {
    /// Creates a node anchored to a token, with empty children.
    pub fn new(kind: NodeKind, token: Token) -> Self {
        Self {
            kind,
            token: Some(token),
            left: None,
            right: None,
            inferred_type: TYPE_ANY.to_string(),
            foldable: true,
            value: None,
        }
    }

    /// Creates an unanchored node. Used for sequence cells and terminators.
    pub fn empty(kind: NodeKind) -> Self {
        Self {
            kind,
            token: None,
            left: None,
            right: None,
            inferred_type: TYPE_ANY.to_string(),
            foldable: true,
            value: None,
        }
    }

    /// Builds a right-leaning cons-cell chain of the given kind from the
    /// items, terminated by an empty node of the same kind.
    pub fn sequence(kind: NodeKind, items: Vec<Node>) -> Node {
        let mut chain = Node::empty(kind);
        for item in items.into_iter().rev() {
            let mut cell = Node::empty(kind);
            cell.left = Some(Box::new(item));
            cell.right = Some(Box::new(chain));
            chain = cell;
        }
        chain
    }

    /// Attaches a left child.
    pub fn with_left(mut self, child: Node) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    /// Attaches a right child.
    pub fn with_right(mut self, child: Node) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    /// True for a sequence terminator: no anchor and no children.
    pub fn is_terminal(&self) -> bool {
        self.token.is_none() && self.left.is_none() && self.right.is_none()
    }

    /// The anchor token's location, or the dummy location for unanchored
    /// nodes.
    pub fn location(&self) -> SourceLocation {
        self.token
            .as_ref()
            .map(|t| t.location)
            .unwrap_or(SourceLocation::DUMMY)
    }

    /// The anchor token's lexeme, or the empty string.
    pub fn lexeme(&self) -> &str {
        self.token.as_ref().map(|t| t.lexeme.as_str()).unwrap_or("")
    }

    /// Number of elements in a cons-cell sequence rooted here.
    pub fn sequence_len(&self) -> usize {
        let mut count = 0;
        let mut cell = self;
        loop {
            if cell.left.is_none() {
                break;
            }
            count += 1;
            match &cell.right {
                Some(right) => cell = right,
                None => break,
            }
        }
        count
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth > 0 {
            write!(f, "{}├── ", "    ".repeat(depth - 1))?;
        }
        match &self.token {
            Some(token) if !token.lexeme.is_empty() => {
                writeln!(f, "{:?} ({})", self.kind, token.escaped_lexeme())?
            }
            _ => writeln!(f, "{:?}", self.kind)?,
        }
        if let Some(left) = &self.left {
            left.fmt_tree(f, depth + 1)?;
        }
        if let Some(right) = &self.right {
            right.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    /// Depth-indented pretty-print, one node per line, each line naming the
    /// kind and the anchor lexeme in parentheses where one exists.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opusc_lex::TokenKind;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, SourceLocation::new(1, 1), lexeme)
    }

    #[test]
    fn test_new_node_defaults() {
        let node = Node::new(NodeKind::Literal, token(TokenKind::Numeric, "1"));
        assert_eq!(node.inferred_type, TYPE_ANY);
        assert!(node.foldable);
        assert!(node.value.is_none());
        assert!(node.left.is_none() && node.right.is_none());
    }

    #[test]
    fn test_empty_node_is_terminal() {
        assert!(Node::empty(NodeKind::Program).is_terminal());
        let anchored = Node::new(NodeKind::Identifier, token(TokenKind::Identifier, "x"));
        assert!(!anchored.is_terminal());
    }

    #[test]
    fn test_sequence_shape() {
        let items = vec![
            Node::new(NodeKind::Identifier, token(TokenKind::Identifier, "a")),
            Node::new(NodeKind::Identifier, token(TokenKind::Identifier, "b")),
        ];
        let chain = Node::sequence(NodeKind::Program, items);

        assert_eq!(chain.kind, NodeKind::Program);
        assert_eq!(chain.sequence_len(), 2);
        assert_eq!(chain.left.as_ref().unwrap().lexeme(), "a");

        let rest = chain.right.as_ref().unwrap();
        assert_eq!(rest.left.as_ref().unwrap().lexeme(), "b");
        assert!(rest.right.as_ref().unwrap().is_terminal());
    }

    #[test]
    fn test_empty_sequence_is_terminal() {
        let chain = Node::sequence(NodeKind::CodeBlock, Vec::new());
        assert!(chain.is_terminal());
        assert_eq!(chain.sequence_len(), 0);
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::Int(1).type_name(), "Int");
        assert_eq!(Value::Float(1.5).type_name(), "Float");
        assert_eq!(Value::Bool(true).type_name(), "Bool");
        assert_eq!(Value::Str("s".into()).type_name(), "String");
    }

    #[test]
    fn test_display_names_kind_and_lexeme() {
        let node = Node::new(NodeKind::Binary, token(TokenKind::Plus, "+"))
            .with_left(Node::new(NodeKind::Literal, token(TokenKind::Numeric, "1")))
            .with_right(Node::new(NodeKind::Literal, token(TokenKind::Numeric, "2")));

        let dump = format!("{}", node);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "Binary (+)");
        assert_eq!(lines[1], "├── Literal (1)");
        assert_eq!(lines[2], "├── Literal (2)");
    }

    #[test]
    fn test_display_is_deterministic() {
        let build = || {
            Node::new(NodeKind::Unary, token(TokenKind::Minus, "-"))
                .with_left(Node::new(NodeKind::Literal, token(TokenKind::Numeric, "3")))
        };
        assert_eq!(format!("{}", build()), format!("{}", build()));
    }
}
