//! Statement parser with panic-mode recovery.
//!
//! The parser drives the lexer: it owns it and pulls one token at a time
//! with a single token of lookahead. Errors never abort parsing. Each
//! failed production reports a diagnostic, drains tokens up to the next
//! statement delimiter (or end of input), substitutes an `Error` node, and
//! resumes at a fresh statement, so one run surfaces as many syntax
//! problems as possible.
//!
//! Every diagnostic is anchored at the token where a legal continuation was
//! expected, and names the lexeme of the last good token:
//! `Expecting 'a type name' after ':'`.

use opusc_lex::{escape_lexeme, Lexer, Token, TokenKind};
use opusc_util::{Diagnostic, Handler, SourceLocation};

use crate::ast::{Node, NodeKind};
use crate::expr::is_expression_starter;

/// The closed set of parser diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    MissingIdentifier,
    MissingTypeAnnotation,
    MissingTypeName,
    MissingDelimiter,
    DeclarationSyntax,
    MissingRightValue,
    MissingArgumentLabel,
    MissingParameterLabel,
    MissingColonAfterLabel,
    MissingFunctionName,
    MissingOpeningBracket,
    MissingRightArrow,
    MissingReturnType,
    MissingOpeningCurlyBracket,
    MissingUntilCondition,
    MissingInStatement,
    MissingCondition,
    MissingOperand,
    MissingArgument,
    Unresolvable,
}

impl ParseErrorKind {
    /// What a legal continuation would have been, for the
    /// `Expecting 'X' after 'Y'` message form.
    fn expected(&self) -> &'static str {
        match self {
            ParseErrorKind::MissingIdentifier => "an identifier",
            ParseErrorKind::MissingTypeAnnotation => ":",
            ParseErrorKind::MissingTypeName => "a type name",
            ParseErrorKind::MissingDelimiter => "a new line",
            ParseErrorKind::DeclarationSyntax => "'=' or a new line",
            ParseErrorKind::MissingRightValue => "an expression",
            ParseErrorKind::MissingArgumentLabel => "an argument label",
            ParseErrorKind::MissingParameterLabel => "a parameter label",
            ParseErrorKind::MissingColonAfterLabel => ":",
            ParseErrorKind::MissingFunctionName => "a function name",
            ParseErrorKind::MissingOpeningBracket => "(",
            ParseErrorKind::MissingRightArrow => "->",
            ParseErrorKind::MissingReturnType => "a return type",
            ParseErrorKind::MissingOpeningCurlyBracket => "{",
            ParseErrorKind::MissingUntilCondition => "until",
            ParseErrorKind::MissingInStatement => "in",
            ParseErrorKind::MissingCondition => "a condition",
            ParseErrorKind::MissingOperand => "an operand",
            ParseErrorKind::MissingArgument => "an argument",
            ParseErrorKind::Unresolvable => "",
        }
    }
}

/// Top-down recursive-descent parser for Opus.
///
/// # Example
///
/// ```
/// use opusc_lex::Lexer;
/// use opusc_par::Parser;
/// use opusc_util::Handler;
///
/// let handler = Handler::new();
/// let program = {
///     let lexer = Lexer::new("let x: Int = 1\n", &handler);
///     Parser::new(lexer, &handler).parse()
/// };
/// assert!(!handler.has_errors());
/// assert_eq!(program.sequence_len(), 1);
/// ```
pub struct Parser<'a> {
    /// Token source; the parser pulls on demand.
    lexer: Lexer<'a>,

    /// Shared diagnostic handler.
    pub(crate) handler: &'a Handler,

    /// One-token lookahead.
    pub(crate) current: Token,

    /// Last consumed token, named in diagnostics.
    pub(crate) previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the given lexer, pulling the first token.
    pub fn new(mut lexer: Lexer<'a>, handler: &'a Handler) -> Self {
        let current = lexer.next_token();
        Self {
            lexer,
            handler,
            current,
            previous: Token::eof(SourceLocation::start()),
        }
    }

    /// Parses the whole file into a single `Program` cons-cell chain.
    ///
    /// Orphan delimiters between statements are skipped. A missing trailing
    /// newline is tolerated: end of input terminates the last statement as
    /// if it were a delimiter.
    pub fn parse(&mut self) -> Node {
        let mut statements = Vec::new();
        loop {
            while self.check(TokenKind::Delimiter) {
                self.advance();
            }
            if self.at_end() {
                break;
            }
            statements.push(self.parse_statement());
        }
        Node::sequence(NodeKind::Program, statements)
    }

    // =========================================================================
    // Statement productions
    // =========================================================================

    /// Dispatches on the leading token of a statement.
    fn parse_statement(&mut self) -> Node {
        match self.current.kind {
            TokenKind::Var | TokenKind::Let => self.parse_declaration_statement(),
            TokenKind::Func => self.parse_function_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::If => self.parse_conditional_statement(),
            TokenKind::Repeat => self.parse_repeat_until_statement(),
            TokenKind::For => self.parse_for_in_statement(),
            TokenKind::Error(_) => {
                // The lexer already reported this token; just resynchronize.
                let at = self.advance();
                self.synchronize();
                self.error_node(at)
            }
            kind if is_expression_starter(kind) => self.parse_expression_statement(),
            _ => self.syntax_error(ParseErrorKind::Unresolvable),
        }
    }

    /// `(var|let) Identifier ':' Identifier (Delimiter | '=' Expression Delimiter)`
    fn parse_declaration_statement(&mut self) -> Node {
        let keyword = self.advance();
        let kind = if keyword.kind == TokenKind::Var {
            NodeKind::VariableDeclaration
        } else {
            NodeKind::ConstantDeclaration
        };

        let Some(name) = self.eat(TokenKind::Identifier) else {
            return self.syntax_error(ParseErrorKind::MissingIdentifier);
        };
        if self.eat(TokenKind::Colon).is_none() {
            return self.syntax_error(ParseErrorKind::MissingTypeAnnotation);
        }
        let Some(type_name) = self.eat(TokenKind::Identifier) else {
            return self.syntax_error(ParseErrorKind::MissingTypeName);
        };

        let declaration = Node::new(kind, keyword)
            .with_left(Node::new(NodeKind::Identifier, name))
            .with_right(Node::new(NodeKind::TypeAnnotation, type_name));

        match self.current.kind {
            TokenKind::Assign => {
                let equals = self.advance();
                if !is_expression_starter(self.current.kind) {
                    return self.syntax_error(ParseErrorKind::MissingRightValue);
                }
                let Some(value) = self.parse_expression() else {
                    return self.recover_statement();
                };
                let assignment = Node::new(NodeKind::Assignment, equals)
                    .with_left(declaration)
                    .with_right(value);
                if self.expect_statement_end() {
                    assignment
                } else {
                    self.recover_statement()
                }
            }
            TokenKind::Delimiter | TokenKind::Eof | TokenKind::RBrace => {
                if self.check(TokenKind::Delimiter) {
                    self.advance();
                }
                declaration
            }
            _ => self.syntax_error(ParseErrorKind::DeclarationSyntax),
        }
    }

    /// `func Identifier '(' ParameterList? ')' '->' Identifier (CodeBlock)?`
    fn parse_function_statement(&mut self) -> Node {
        let keyword = self.advance();
        let Some(name) = self.eat(TokenKind::Identifier) else {
            return self.syntax_error(ParseErrorKind::MissingFunctionName);
        };
        let Some(open) = self.eat(TokenKind::LParen) else {
            return self.syntax_error(ParseErrorKind::MissingOpeningBracket);
        };

        let mut parameters = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let Some(parameter) = self.parse_parameter() else {
                    return self.recover_statement();
                };
                parameters.push(parameter);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        if self.eat(TokenKind::RParen).is_none() {
            return self.syntax_error(ParseErrorKind::Unresolvable);
        }
        if self.eat(TokenKind::Arrow).is_none() {
            return self.syntax_error(ParseErrorKind::MissingRightArrow);
        }
        let Some(return_type) = self.eat(TokenKind::Identifier) else {
            return self.syntax_error(ParseErrorKind::MissingReturnType);
        };

        let signature = Node::new(NodeKind::FunctionSignature, open)
            .with_left(Node::sequence(NodeKind::ParameterList, parameters))
            .with_right(Node::new(NodeKind::FunctionReturnType, return_type));
        let definition = Node::new(NodeKind::FunctionDefinition, keyword)
            .with_left(Node::new(NodeKind::Identifier, name))
            .with_right(signature);

        if self.check(TokenKind::LBrace) {
            let block = self.parse_code_block();
            let mut implementation = Node::empty(NodeKind::FunctionImplementation);
            implementation.token = definition.token.clone();
            implementation.with_left(definition).with_right(block)
        } else if self.expect_statement_end() {
            definition
        } else {
            self.recover_statement()
        }
    }

    /// One labeled parameter: `Identifier ':' Identifier`.
    fn parse_parameter(&mut self) -> Option<Node> {
        let Some(label) = self.eat(TokenKind::Identifier) else {
            self.report(ParseErrorKind::MissingParameterLabel);
            return None;
        };
        let Some(colon) = self.eat(TokenKind::Colon) else {
            self.report(ParseErrorKind::MissingColonAfterLabel);
            return None;
        };
        let Some(type_name) = self.eat(TokenKind::Identifier) else {
            self.report(ParseErrorKind::MissingTypeName);
            return None;
        };
        Some(
            Node::new(NodeKind::Parameter, colon)
                .with_left(Node::new(NodeKind::ParameterLabel, label))
                .with_right(Node::new(NodeKind::TypeAnnotation, type_name)),
        )
    }

    /// `return (Expression)? Delimiter`
    fn parse_return_statement(&mut self) -> Node {
        let keyword = self.advance();
        let node = Node::new(NodeKind::ReturnStatement, keyword);

        if matches!(
            self.current.kind,
            TokenKind::Delimiter | TokenKind::Eof | TokenKind::RBrace
        ) {
            if self.check(TokenKind::Delimiter) {
                self.advance();
            }
            return node;
        }

        let Some(value) = self.parse_expression() else {
            return self.recover_statement();
        };
        let node = node.with_left(value);
        if self.expect_statement_end() {
            node
        } else {
            self.recover_statement()
        }
    }

    /// `if Expression CodeBlock (else (if ... | CodeBlock))?`
    ///
    /// Delimiters between `}` and `else` are skipped, so the `else` may sit
    /// on its own line.
    fn parse_conditional_statement(&mut self) -> Node {
        let keyword = self.advance();
        if !is_expression_starter(self.current.kind) {
            return self.syntax_error(ParseErrorKind::MissingCondition);
        }
        let Some(condition) = self.parse_expression() else {
            return self.recover_statement();
        };
        if !self.check(TokenKind::LBrace) {
            return self.syntax_error(ParseErrorKind::MissingOpeningCurlyBracket);
        }
        let then_block = self.parse_code_block();

        while self.check(TokenKind::Delimiter) {
            self.advance();
        }

        let else_part = if self.eat(TokenKind::Else).is_some() {
            if self.check(TokenKind::If) {
                self.parse_conditional_statement()
            } else if self.check(TokenKind::LBrace) {
                self.parse_code_block()
            } else {
                return self.syntax_error(ParseErrorKind::MissingOpeningCurlyBracket);
            }
        } else {
            Node::empty(NodeKind::CodeBlock)
        };

        let body = Node::empty(NodeKind::ConditionalBody)
            .with_left(then_block)
            .with_right(else_part);
        Node::new(NodeKind::ConditionalStatement, keyword)
            .with_left(condition)
            .with_right(body)
    }

    /// `repeat CodeBlock until Expression Delimiter`
    fn parse_repeat_until_statement(&mut self) -> Node {
        let keyword = self.advance();
        if !self.check(TokenKind::LBrace) {
            return self.syntax_error(ParseErrorKind::MissingOpeningCurlyBracket);
        }
        let block = self.parse_code_block();

        if self.eat(TokenKind::Until).is_none() {
            return self.syntax_error(ParseErrorKind::MissingUntilCondition);
        }
        if !is_expression_starter(self.current.kind) {
            return self.syntax_error(ParseErrorKind::MissingCondition);
        }
        let Some(condition) = self.parse_expression() else {
            return self.recover_statement();
        };

        let node = Node::new(NodeKind::RepeatUntilStatement, keyword)
            .with_left(block)
            .with_right(condition);
        if self.expect_statement_end() {
            node
        } else {
            self.recover_statement()
        }
    }

    /// `for Identifier in Expression CodeBlock`
    fn parse_for_in_statement(&mut self) -> Node {
        let keyword = self.advance();
        let Some(variable) = self.eat(TokenKind::Identifier) else {
            return self.syntax_error(ParseErrorKind::MissingIdentifier);
        };
        let Some(in_keyword) = self.eat(TokenKind::In) else {
            return self.syntax_error(ParseErrorKind::MissingInStatement);
        };
        if !is_expression_starter(self.current.kind) {
            return self.syntax_error(ParseErrorKind::MissingRightValue);
        }
        let Some(iterable) = self.parse_expression() else {
            return self.recover_statement();
        };
        if !self.check(TokenKind::LBrace) {
            return self.syntax_error(ParseErrorKind::MissingOpeningCurlyBracket);
        }
        let block = self.parse_code_block();

        let context = Node::new(NodeKind::ForInContext, in_keyword)
            .with_left(Node::new(NodeKind::Identifier, variable))
            .with_right(iterable);
        Node::new(NodeKind::ForInStatement, keyword)
            .with_left(context)
            .with_right(block)
    }

    /// `'{' (Statement Delimiter)* '}'` as a CodeBlock cons-cell chain.
    ///
    /// The caller has already checked for the opening brace. An unclosed
    /// block runs to end of input; the lexer reports the unclosed bracket.
    fn parse_code_block(&mut self) -> Node {
        self.advance(); // opening brace
        let mut statements = Vec::new();
        loop {
            while self.check(TokenKind::Delimiter) {
                self.advance();
            }
            if self.check(TokenKind::RBrace) {
                self.advance();
                break;
            }
            if self.at_end() {
                break;
            }
            statements.push(self.parse_statement());
        }
        Node::sequence(NodeKind::CodeBlock, statements)
    }

    /// Expression used as a statement, including bare assignments.
    fn parse_expression_statement(&mut self) -> Node {
        let Some(expression) = self.parse_expression() else {
            return self.recover_statement();
        };
        if self.expect_statement_end() {
            expression
        } else {
            self.recover_statement()
        }
    }

    // =========================================================================
    // Token plumbing
    // =========================================================================

    /// Consumes the current token, pulls the next, and returns the consumed
    /// one.
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let consumed = std::mem::replace(&mut self.current, next);
        self.previous = consumed.clone();
        consumed
    }

    /// True if the lookahead has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes and returns the current token when it matches.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// True at end of input.
    pub(crate) fn at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    /// Accepts a statement terminator: a delimiter (consumed), end of
    /// input, or a closing brace (left for the block to consume). Reports
    /// missing-delimiter otherwise.
    fn expect_statement_end(&mut self) -> bool {
        match self.current.kind {
            TokenKind::Delimiter => {
                self.advance();
                true
            }
            TokenKind::Eof | TokenKind::RBrace => true,
            _ => {
                self.report(ParseErrorKind::MissingDelimiter);
                false
            }
        }
    }

    // =========================================================================
    // Diagnostics and recovery
    // =========================================================================

    /// Records a parse diagnostic anchored at the current token.
    pub(crate) fn report(&self, kind: ParseErrorKind) {
        let location = if self.current.location == SourceLocation::DUMMY {
            self.previous.location
        } else {
            self.current.location
        };
        let message = match kind {
            ParseErrorKind::Unresolvable => format!(
                "Unresolvable token '{}'",
                escape_lexeme(&self.current.lexeme)
            ),
            _ => format!(
                "Expecting '{}' after '{}'",
                kind.expected(),
                escape_lexeme(&self.previous.lexeme)
            ),
        };
        self.handler.emit(Diagnostic::error(
            format!("Parsing Error at {}\n[ERROR] {}", location, message),
            location,
        ));
    }

    /// Reports, then drains to the next statement boundary and substitutes
    /// an `Error` node anchored at the offending token.
    fn syntax_error(&mut self, kind: ParseErrorKind) -> Node {
        self.report(kind);
        self.recover_statement()
    }

    /// Drains to the next statement boundary (the diagnostic has already
    /// been reported) and substitutes an `Error` node.
    fn recover_statement(&mut self) -> Node {
        let at = self.current.clone();
        self.synchronize();
        self.error_node(at)
    }

    /// Panic-mode synchronization: drops tokens until just past the next
    /// delimiter, or to end of input.
    fn synchronize(&mut self) {
        while !matches!(self.current.kind, TokenKind::Delimiter | TokenKind::Eof) {
            self.advance();
        }
        if self.check(TokenKind::Delimiter) {
            self.advance();
        }
    }

    /// An `Error` node anchored at the given token.
    fn error_node(&self, at: Token) -> Node {
        Node::new(NodeKind::Error, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_source(source: &str) -> (Node, Handler) {
        let handler = Handler::new();
        let program = {
            let lexer = Lexer::new(source, &handler);
            let mut parser = Parser::new(lexer, &handler);
            parser.parse()
        };
        (program, handler)
    }

    fn first_statement(program: &Node) -> &Node {
        program.left.as_ref().expect("program is empty")
    }

    #[test]
    fn test_empty_file() {
        let (program, handler) = parse_source("");
        assert!(program.is_terminal());
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_orphan_delimiters_are_skipped() {
        let (program, handler) = parse_source("\n\n\nlet x: Int\n\n\n");
        assert_eq!(program.sequence_len(), 1);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_declaration_without_assignment() {
        let (program, handler) = parse_source("var total: Int\n");
        assert!(!handler.has_errors());

        let declaration = first_statement(&program);
        assert_eq!(declaration.kind, NodeKind::VariableDeclaration);
        assert_eq!(declaration.left.as_ref().unwrap().lexeme(), "total");
        assert_eq!(declaration.right.as_ref().unwrap().lexeme(), "Int");
        assert_eq!(
            declaration.right.as_ref().unwrap().kind,
            NodeKind::TypeAnnotation
        );
    }

    #[test]
    fn test_declaration_with_assignment() {
        let (program, handler) = parse_source("let quizGrade: Int = 100\n");
        assert!(!handler.has_errors());

        let assignment = first_statement(&program);
        assert_eq!(assignment.kind, NodeKind::Assignment);

        let declaration = assignment.left.as_ref().unwrap();
        assert_eq!(declaration.kind, NodeKind::ConstantDeclaration);
        assert_eq!(declaration.left.as_ref().unwrap().lexeme(), "quizGrade");
        assert_eq!(declaration.right.as_ref().unwrap().lexeme(), "Int");

        let value = assignment.right.as_ref().unwrap();
        assert_eq!(value.kind, NodeKind::Literal);
        assert_eq!(value.lexeme(), "100");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let (program, handler) = parse_source("let x: Int = 1");
        assert!(!handler.has_errors());
        assert_eq!(program.sequence_len(), 1);
    }

    #[test]
    fn test_declaration_missing_identifier() {
        let (program, handler) = parse_source("var : Int\n");
        assert!(handler.has_errors());
        assert_eq!(first_statement(&program).kind, NodeKind::Error);

        let message = &handler.diagnostics()[0].message;
        assert!(message.starts_with("Parsing Error at 1:5"));
        assert!(message.contains("Expecting 'an identifier' after 'var'"));
    }

    #[test]
    fn test_declaration_missing_colon() {
        let (_, handler) = parse_source("var x Int\n");
        assert!(handler.diagnostics()[0].message.contains("Expecting ':' after 'x'"));
    }

    #[test]
    fn test_declaration_missing_type_name() {
        let (_, handler) = parse_source("var x: = 1\n");
        assert!(handler.diagnostics()[0]
            .message
            .contains("Expecting 'a type name' after ':'"));
    }

    #[test]
    fn test_recovery_continues_after_error() {
        let (program, handler) = parse_source("var : Int\nlet y: Int = 2\n");
        assert_eq!(handler.error_count(), 1);
        assert_eq!(program.sequence_len(), 2);

        let second = program.right.as_ref().unwrap().left.as_ref().unwrap();
        assert_eq!(second.kind, NodeKind::Assignment);
    }

    #[test]
    fn test_bare_assignment_statement() {
        let (program, handler) = parse_source("x = 2\n");
        assert!(!handler.has_errors());

        let assignment = first_statement(&program);
        assert_eq!(assignment.kind, NodeKind::Assignment);
        assert_eq!(assignment.left.as_ref().unwrap().kind, NodeKind::Identifier);
        assert_eq!(assignment.left.as_ref().unwrap().lexeme(), "x");
    }

    #[test]
    fn test_return_with_expression() {
        let (program, handler) = parse_source("return 1 + 2\n");
        assert!(!handler.has_errors());

        let statement = first_statement(&program);
        assert_eq!(statement.kind, NodeKind::ReturnStatement);
        assert_eq!(statement.left.as_ref().unwrap().kind, NodeKind::Binary);
    }

    #[test]
    fn test_return_without_expression() {
        let (program, handler) = parse_source("return\n");
        assert!(!handler.has_errors());
        assert!(first_statement(&program).left.is_none());
    }

    #[test]
    fn test_function_definition_only() {
        let (program, handler) = parse_source("func area(width: Int, height: Int) -> Int\n");
        assert!(!handler.has_errors());

        let definition = first_statement(&program);
        assert_eq!(definition.kind, NodeKind::FunctionDefinition);
        assert_eq!(definition.left.as_ref().unwrap().lexeme(), "area");

        let signature = definition.right.as_ref().unwrap();
        assert_eq!(signature.kind, NodeKind::FunctionSignature);
        assert_eq!(signature.left.as_ref().unwrap().sequence_len(), 2);
        assert_eq!(signature.right.as_ref().unwrap().lexeme(), "Int");

        let parameter = signature.left.as_ref().unwrap().left.as_ref().unwrap();
        assert_eq!(parameter.kind, NodeKind::Parameter);
        assert_eq!(parameter.left.as_ref().unwrap().kind, NodeKind::ParameterLabel);
        assert_eq!(parameter.left.as_ref().unwrap().lexeme(), "width");
    }

    #[test]
    fn test_function_implementation() {
        let (program, handler) = parse_source("func one() -> Int {\nreturn 1\n}\n");
        assert!(!handler.has_errors());

        let implementation = first_statement(&program);
        assert_eq!(implementation.kind, NodeKind::FunctionImplementation);
        assert_eq!(
            implementation.left.as_ref().unwrap().kind,
            NodeKind::FunctionDefinition
        );

        let block = implementation.right.as_ref().unwrap();
        assert_eq!(block.kind, NodeKind::CodeBlock);
        assert_eq!(block.sequence_len(), 1);
    }

    #[test]
    fn test_function_missing_arrow() {
        let (_, handler) = parse_source("func f() Int\n");
        assert!(handler.diagnostics()[0].message.contains("Expecting '->' after ')'"));
    }

    #[test]
    fn test_conditional_with_else() {
        let (program, handler) =
            parse_source("if ready {\nx = 1\n}\nelse {\nx = 2\n}\n");
        assert!(!handler.has_errors());

        let conditional = first_statement(&program);
        assert_eq!(conditional.kind, NodeKind::ConditionalStatement);
        assert_eq!(conditional.left.as_ref().unwrap().kind, NodeKind::Identifier);

        let body = conditional.right.as_ref().unwrap();
        assert_eq!(body.kind, NodeKind::ConditionalBody);
        assert_eq!(body.left.as_ref().unwrap().sequence_len(), 1);
        assert_eq!(body.right.as_ref().unwrap().sequence_len(), 1);
    }

    #[test]
    fn test_conditional_else_if_chain() {
        let (program, handler) =
            parse_source("if a { x = 1 } else if b { x = 2 } else { x = 3 }\n");
        assert!(!handler.has_errors());

        let conditional = first_statement(&program);
        let body = conditional.right.as_ref().unwrap();
        let nested = body.right.as_ref().unwrap();
        assert_eq!(nested.kind, NodeKind::ConditionalStatement);

        let nested_body = nested.right.as_ref().unwrap();
        assert_eq!(nested_body.right.as_ref().unwrap().sequence_len(), 1);
    }

    #[test]
    fn test_conditional_without_else_has_empty_branch() {
        let (program, handler) = parse_source("if a { x = 1 }\n");
        assert!(!handler.has_errors());

        let body = first_statement(&program).right.as_ref().unwrap();
        assert!(body.right.as_ref().unwrap().is_terminal());
    }

    #[test]
    fn test_parenthesized_condition() {
        let (program, handler) = parse_source("if (a && b) { x = 1 }\n");
        assert!(!handler.has_errors());
        assert_eq!(
            first_statement(&program).left.as_ref().unwrap().kind,
            NodeKind::Binary
        );
    }

    #[test]
    fn test_repeat_until() {
        let (program, handler) = parse_source("repeat {\nx = x + 1\n} until x > 3\n");
        assert!(!handler.has_errors());

        let statement = first_statement(&program);
        assert_eq!(statement.kind, NodeKind::RepeatUntilStatement);
        assert_eq!(statement.left.as_ref().unwrap().kind, NodeKind::CodeBlock);
        assert_eq!(statement.right.as_ref().unwrap().kind, NodeKind::Binary);
    }

    #[test]
    fn test_repeat_missing_until() {
        let (_, handler) = parse_source("repeat {\nx = 1\n}\n");
        assert!(handler.has_errors());
        assert!(handler.diagnostics()[0].message.contains("Expecting 'until'"));
    }

    #[test]
    fn test_for_in() {
        let (program, handler) = parse_source("for item in items {\nx = item\n}\n");
        assert!(!handler.has_errors());

        let statement = first_statement(&program);
        assert_eq!(statement.kind, NodeKind::ForInStatement);

        let context = statement.left.as_ref().unwrap();
        assert_eq!(context.kind, NodeKind::ForInContext);
        assert_eq!(context.left.as_ref().unwrap().lexeme(), "item");
        assert_eq!(context.right.as_ref().unwrap().lexeme(), "items");
        assert_eq!(statement.right.as_ref().unwrap().kind, NodeKind::CodeBlock);
    }

    #[test]
    fn test_for_missing_in() {
        let (_, handler) = parse_source("for item of items { }\n");
        assert!(handler.diagnostics()[0].message.contains("Expecting 'in' after 'item'"));
    }

    #[test]
    fn test_unresolvable_statement() {
        let (program, handler) = parse_source("until x\nlet y: Int\n");
        assert!(handler.has_errors());
        assert!(handler.diagnostics()[0]
            .message
            .contains("Unresolvable token 'until'"));
        assert_eq!(program.sequence_len(), 2);
    }

    #[test]
    fn test_lexer_error_token_synchronizes_quietly() {
        // The malformed numeric is reported once, by the lexer.
        let (program, handler) = parse_source("1.2.3\nlet y: Int\n");
        assert_eq!(handler.error_count(), 1);
        assert!(handler.diagnostics()[0].message.contains("MalformedNumeric"));
        assert_eq!(first_statement(&program).kind, NodeKind::Error);
    }

    #[test]
    fn test_statements_in_source_order() {
        let (program, handler) = parse_source("let a: Int = 1\nlet b: Int = 2\nlet c: Int = 3\n");
        assert!(!handler.has_errors());

        let mut names = Vec::new();
        let mut cell = &program;
        while let Some(statement) = &cell.left {
            names.push(
                statement.left.as_ref().unwrap().left.as_ref().unwrap().lexeme().to_string(),
            );
            cell = cell.right.as_ref().unwrap();
        }
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_deterministic_dumps() {
        let source = "if a { x = 1 } else { x = 2 }\nreturn 1 + 2 * 3\n";
        let (first, _) = parse_source(source);
        let (second, _) = parse_source(source);
        assert_eq!(format!("{}", first), format!("{}", second));
    }

    #[test]
    fn test_missing_delimiter_between_statements() {
        let (_, handler) = parse_source("let x: Int = 1 let y: Int = 2\n");
        assert!(handler.has_errors());
        assert!(handler.diagnostics()[0]
            .message
            .contains("Expecting 'a new line' after '1'"));
    }
}
