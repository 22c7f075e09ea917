//! Expression parsing by precedence climbing.
//!
//! # Operator precedence (lowest to highest)
//!
//! | Tier | Operators | Associativity |
//! |------|-----------|---------------|
//! | 1 | `\|\|` | Left |
//! | 2 | `&&` | Left |
//! | 3 | `<`, `>`, `<=`, `>=`, `==`, `!=` | Left |
//! | 4 | `+`, `-` | Left |
//! | 5 | `*`, `/`, `%` | Left |
//! | 6 | prefix `-`, `!` | Right |
//! | 7 | postfix `!`, call `(...)` | Left, chainable |
//!
//! Each binary tier parses one tier above, then folds further operands of
//! its own tier into left-leaning `Binary` nodes. Prefix operators recurse
//! on themselves for right associativity; postfix loops so factorials and
//! calls chain.
//!
//! Expression methods return `Option<Node>`: `None` means a diagnostic has
//! already been reported (here or by the lexer) and the enclosing statement
//! should resynchronize.

use opusc_lex::TokenKind;

use crate::ast::{Node, NodeKind};
use crate::parser::{ParseErrorKind, Parser};

/// Tokens that may begin an expression.
pub(crate) fn is_expression_starter(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::Numeric
            | TokenKind::StringLiteral
            | TokenKind::BooleanLiteral
            | TokenKind::Minus
            | TokenKind::Not
            | TokenKind::LParen
    )
}

impl<'a> Parser<'a> {
    /// Entry point: parses a full expression.
    pub fn parse_expression(&mut self) -> Option<Node> {
        self.parse_logical_or()
    }

    /// `LogicalAnd ('||' LogicalAnd)*`
    fn parse_logical_or(&mut self) -> Option<Node> {
        let mut node = self.parse_logical_and()?;
        while self.check(TokenKind::OrOr) {
            let operator = self.advance();
            let rhs = self.parse_logical_and()?;
            node = Node::new(NodeKind::Binary, operator)
                .with_left(node)
                .with_right(rhs);
        }
        Some(node)
    }

    /// `Comparison ('&&' Comparison)*`
    fn parse_logical_and(&mut self) -> Option<Node> {
        let mut node = self.parse_comparison()?;
        while self.check(TokenKind::AndAnd) {
            let operator = self.advance();
            let rhs = self.parse_comparison()?;
            node = Node::new(NodeKind::Binary, operator)
                .with_left(node)
                .with_right(rhs);
        }
        Some(node)
    }

    /// `Additive (('<'|'>'|'<='|'>='|'=='|'!=') Additive)*`
    fn parse_comparison(&mut self) -> Option<Node> {
        let mut node = self.parse_additive()?;
        while matches!(
            self.current.kind,
            TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
                | TokenKind::EqEq
                | TokenKind::NotEq
        ) {
            let operator = self.advance();
            let rhs = self.parse_additive()?;
            node = Node::new(NodeKind::Binary, operator)
                .with_left(node)
                .with_right(rhs);
        }
        Some(node)
    }

    /// `Multiplicative (('+'|'-') Multiplicative)*`
    fn parse_additive(&mut self) -> Option<Node> {
        let mut node = self.parse_multiplicative()?;
        while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            let operator = self.advance();
            let rhs = self.parse_multiplicative()?;
            node = Node::new(NodeKind::Binary, operator)
                .with_left(node)
                .with_right(rhs);
        }
        Some(node)
    }

    /// `Prefix (('*'|'/'|'%') Prefix)*`
    fn parse_multiplicative(&mut self) -> Option<Node> {
        let mut node = self.parse_prefix()?;
        while matches!(
            self.current.kind,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            let operator = self.advance();
            let rhs = self.parse_prefix()?;
            node = Node::new(NodeKind::Binary, operator)
                .with_left(node)
                .with_right(rhs);
        }
        Some(node)
    }

    /// `('-'|'!') Prefix | Postfix` — right-associative by recursion.
    fn parse_prefix(&mut self) -> Option<Node> {
        if matches!(self.current.kind, TokenKind::Minus | TokenKind::Not) {
            let operator = self.advance();
            let operand = self.parse_prefix()?;
            Some(Node::new(NodeKind::Unary, operator).with_left(operand))
        } else {
            self.parse_postfix()
        }
    }

    /// `Primary ('!' | '(' ArgumentList? ')')*` — chainable postfix.
    fn parse_postfix(&mut self) -> Option<Node> {
        let mut node = self.parse_primary()?;
        loop {
            if self.check(TokenKind::Factorial) {
                let operator = self.advance();
                node = Node::new(NodeKind::Postfix, operator).with_left(node);
            } else if self.check(TokenKind::LParen) {
                node = self.parse_function_call(node)?;
            } else {
                break;
            }
        }
        Some(node)
    }

    /// Literals, booleans, identifiers (possibly assigned to),
    /// parenthesized expressions.
    fn parse_primary(&mut self) -> Option<Node> {
        match self.current.kind {
            TokenKind::Numeric | TokenKind::StringLiteral => {
                let token = self.advance();
                Some(Node::new(NodeKind::Literal, token))
            }
            TokenKind::BooleanLiteral => {
                let token = self.advance();
                Some(Node::new(NodeKind::BooleanLiteral, token))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                let identifier = Node::new(NodeKind::Identifier, token);
                if self.check(TokenKind::Assign) {
                    let equals = self.advance();
                    if !is_expression_starter(self.current.kind) {
                        self.report(ParseErrorKind::MissingRightValue);
                        return None;
                    }
                    let value = self.parse_expression()?;
                    Some(
                        Node::new(NodeKind::Assignment, equals)
                            .with_left(identifier)
                            .with_right(value),
                    )
                } else {
                    Some(identifier)
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                if self.eat(TokenKind::RParen).is_none() {
                    // An unclosed paren is already reported by the lexer at
                    // end of input; anything else here is a stray token.
                    if !self.at_end() {
                        self.report(ParseErrorKind::Unresolvable);
                    }
                    return None;
                }
                Some(inner)
            }
            TokenKind::Error(_) => {
                // Reported by the lexer; consume and let the statement
                // resynchronize.
                self.advance();
                None
            }
            _ => {
                self.report(ParseErrorKind::MissingOperand);
                None
            }
        }
    }

    /// `'(' (Argument (',' Argument)*)? ')'` after a callee.
    fn parse_function_call(&mut self, callee: Node) -> Option<Node> {
        let open = self.advance();
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                arguments.push(self.parse_argument()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        if self.eat(TokenKind::RParen).is_none() {
            if !self.at_end() {
                self.report(ParseErrorKind::Unresolvable);
            }
            return None;
        }
        Some(
            Node::new(NodeKind::FunctionCall, open)
                .with_left(callee)
                .with_right(Node::sequence(NodeKind::ArgumentList, arguments)),
        )
    }

    /// One labeled argument: `Identifier ':' Expression`.
    fn parse_argument(&mut self) -> Option<Node> {
        let Some(label) = self.eat(TokenKind::Identifier) else {
            self.report(ParseErrorKind::MissingArgumentLabel);
            return None;
        };
        let Some(colon) = self.eat(TokenKind::Colon) else {
            self.report(ParseErrorKind::MissingColonAfterLabel);
            return None;
        };
        if !is_expression_starter(self.current.kind) {
            self.report(ParseErrorKind::MissingArgument);
            return None;
        }
        let value = self.parse_expression()?;
        Some(
            Node::new(NodeKind::Argument, colon)
                .with_left(Node::new(NodeKind::ArgumentLabel, label))
                .with_right(value),
        )
    }
}
