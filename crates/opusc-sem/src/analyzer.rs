//! Semantic analysis: declaration recording, type inference and checking,
//! constant folding, and dead-branch elimination.
//!
//! The analyzer walks the program cons-cells depth-first, maintains the
//! scoped symbol table, and writes two annotations on every expression
//! node: an inferred type name and a foldability flag with the folded value
//! when folding succeeded. Errors are recorded and analysis continues with
//! the surrounding siblings, so one run surfaces as many problems as
//! possible; the overall result is the AND of all child results.

use indexmap::IndexMap;

use opusc_lex::TokenKind;
use opusc_par::{Node, NodeKind, Value};
use opusc_util::{Diagnostic, Handler, SourceLocation};

use crate::fold::{factorial, fold_binary, fold_unary};
use crate::table::{Symbol, SymbolTable};

/// Recorded signature of a declared function.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionInfo {
    /// Parameter labels and types, in declaration order.
    pub parameters: Vec<(String, String)>,
    /// Declared return type.
    pub return_type: String,
    /// Where the function was declared.
    pub location: SourceLocation,
}

/// True for the numeric types arithmetic accepts.
fn is_numeric(type_name: &str) -> bool {
    type_name == "Int" || type_name == "Float"
}

/// The semantic analyzer.
///
/// # Example
///
/// ```
/// use opusc_lex::Lexer;
/// use opusc_par::Parser;
/// use opusc_sem::SemanticAnalyzer;
/// use opusc_util::Handler;
///
/// let handler = Handler::new();
/// let mut program = {
///     let lexer = Lexer::new("let x: Int = 1\n", &handler);
///     Parser::new(lexer, &handler).parse()
/// };
///
/// let mut analyzer = SemanticAnalyzer::new(&handler);
/// assert!(analyzer.analyze(&mut program));
/// ```
pub struct SemanticAnalyzer<'a> {
    /// Shared diagnostic handler.
    handler: &'a Handler,

    /// Scoped symbol table, exclusively owned for the compilation.
    table: SymbolTable,

    /// Declared function signatures, in declaration order.
    functions: IndexMap<String, FunctionInfo>,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Creates a fresh analyzer.
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            handler,
            table: SymbolTable::new(),
            functions: IndexMap::new(),
        }
    }

    /// The symbol table, for dumps and inspection.
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// The recorded function signatures.
    pub fn functions(&self) -> &IndexMap<String, FunctionInfo> {
        &self.functions
    }

    /// Analyzes a whole program. Returns true only when every statement
    /// analyzed cleanly.
    pub fn analyze(&mut self, program: &mut Node) -> bool {
        self.analyze_sequence(program)
    }

    /// Walks a Program or CodeBlock cons-cell chain.
    fn analyze_sequence(&mut self, cell: &mut Node) -> bool {
        let mut ok = true;
        if let Some(statement) = cell.left.as_deref_mut() {
            ok &= self.analyze_statement(statement);
        }
        if let Some(rest) = cell.right.as_deref_mut() {
            ok &= self.analyze_sequence(rest);
        }
        ok
    }

    /// Dispatches one statement.
    fn analyze_statement(&mut self, node: &mut Node) -> bool {
        match node.kind {
            NodeKind::VariableDeclaration | NodeKind::ConstantDeclaration => {
                self.analyze_declaration(node)
            }
            NodeKind::Assignment => self.analyze_assignment(node),
            NodeKind::FunctionDefinition => self.analyze_function_definition(node),
            NodeKind::FunctionImplementation => self.analyze_function_implementation(node),
            NodeKind::ReturnStatement => match node.left.as_deref_mut() {
                Some(value) => self.analyze_expression(value).is_some(),
                None => true,
            },
            NodeKind::ConditionalStatement => self.analyze_conditional(node),
            NodeKind::RepeatUntilStatement => self.analyze_repeat_until(node),
            NodeKind::ForInStatement => self.analyze_for_in(node),
            NodeKind::Error => false,
            _ => self.analyze_expression(node).is_some(),
        }
    }

    // =========================================================================
    // Declarations and assignment
    // =========================================================================

    /// Records a `var`/`let` declaration, rejecting redeclaration at the
    /// current namespace level.
    fn analyze_declaration(&mut self, node: &mut Node) -> bool {
        let name = node
            .left
            .as_deref()
            .map(|n| n.lexeme().to_string())
            .unwrap_or_default();
        let type_name = node
            .right
            .as_deref()
            .map(|n| n.lexeme().to_string())
            .unwrap_or_default();
        let location = node
            .left
            .as_deref()
            .map(|n| n.location())
            .unwrap_or_else(|| node.location());

        if self.table.lookup_current(&name).is_some() {
            self.semantic_error(format!("Redeclared symbol '{}'", name), location);
            return false;
        }

        let mutable = node.kind == NodeKind::VariableDeclaration;
        let namespace = self.table.current_namespace();
        self.table
            .add(Symbol::new(&name, &type_name, namespace, mutable, location));

        node.inferred_type = type_name.clone();
        node.foldable = false;
        if let Some(identifier) = node.left.as_deref_mut() {
            identifier.inferred_type = type_name.clone();
            identifier.foldable = false;
        }
        if let Some(annotation) = node.right.as_deref_mut() {
            annotation.inferred_type = type_name;
            annotation.foldable = false;
        }
        true
    }

    /// Checks an assignment's target and value.
    ///
    /// The target is either an inline declaration (analyzed first) or an
    /// already-declared identifier, which must be mutable unless this is
    /// its first initialization. A foldable right-hand side propagates its
    /// value into the symbol.
    fn analyze_assignment(&mut self, node: &mut Node) -> bool {
        let target_name = {
            let Some(left) = node.left.as_deref_mut() else {
                return false;
            };
            match left.kind {
                NodeKind::VariableDeclaration | NodeKind::ConstantDeclaration => {
                    if !self.analyze_declaration(left) {
                        return false;
                    }
                    left.left
                        .as_deref()
                        .map(|n| n.lexeme().to_string())
                        .unwrap_or_default()
                }
                NodeKind::Identifier => {
                    let name = left.lexeme().to_string();
                    let Some(symbol) = self.table.resolve(&name) else {
                        self.semantic_error(
                            format!("Undeclared symbol '{}'", name),
                            left.location(),
                        );
                        return false;
                    };
                    if !symbol.mutable && symbol.initialized {
                        self.semantic_error(
                            format!("Cannot modify immutable symbol '{}'", name),
                            left.location(),
                        );
                        return false;
                    }
                    left.inferred_type = symbol.type_name.clone();
                    left.foldable = false;
                    name
                }
                _ => return false,
            }
        };

        let declared_type = match self.table.resolve(&target_name) {
            Some(symbol) => symbol.type_name.clone(),
            None => return false,
        };

        let Some(value) = node.right.as_deref_mut() else {
            return false;
        };
        let Some(value_type) = self.analyze_expression(value) else {
            return false;
        };

        if value_type != declared_type {
            self.semantic_error(
                format!(
                    "Cannot assign value of type '{}' to symbol '{}' of type '{}'",
                    value_type, target_name, declared_type
                ),
                node.location(),
            );
            return false;
        }

        let foldable = value.foldable;
        let folded = value.value.clone();
        node.inferred_type = declared_type;
        node.foldable = foldable;
        node.value = folded.clone();

        if let Some(symbol) = self.table.resolve_mut(&target_name) {
            if foldable {
                symbol.value = folded;
            }
            symbol.initialized = true;
        }
        true
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Infers and checks an expression, writing `inferred_type`,
    /// `foldable`, and `value` on the node. Returns the inferred type, or
    /// `None` after reporting an error.
    fn analyze_expression(&mut self, node: &mut Node) -> Option<String> {
        let inferred = match node.kind {
            NodeKind::Literal => {
                let token_kind = node.token.as_ref().map(|t| t.kind)?;
                match token_kind {
                    TokenKind::Numeric => {
                        if node.lexeme().contains('.') {
                            node.value = node.lexeme().parse::<f64>().ok().map(Value::Float);
                            node.foldable = node.value.is_some();
                            "Float".to_string()
                        } else {
                            // Digits that overflow an i64 simply never fold.
                            node.value = node.lexeme().parse::<i64>().ok().map(Value::Int);
                            node.foldable = node.value.is_some();
                            "Int".to_string()
                        }
                    }
                    TokenKind::StringLiteral => {
                        node.value = Some(Value::Str(node.lexeme().to_string()));
                        node.foldable = true;
                        "String".to_string()
                    }
                    _ => return None,
                }
            }
            NodeKind::BooleanLiteral => {
                node.value = Some(Value::Bool(node.lexeme() == "true"));
                node.foldable = true;
                "Bool".to_string()
            }
            NodeKind::Identifier => {
                let name = node.lexeme().to_string();
                let Some(symbol) = self.table.resolve(&name) else {
                    self.semantic_error(format!("Undeclared symbol '{}'", name), node.location());
                    return None;
                };
                let type_name = symbol.type_name.clone();
                // Only constants keep their value at every use site; a
                // variable may be reassigned at run time.
                node.value = if symbol.mutable {
                    None
                } else {
                    symbol.value.clone()
                };
                node.foldable = node.value.is_some();
                type_name
            }
            NodeKind::Unary => self.analyze_unary(node)?,
            NodeKind::Postfix => self.analyze_postfix(node)?,
            NodeKind::Binary => self.analyze_binary(node)?,
            NodeKind::Assignment => {
                if !self.analyze_assignment(node) {
                    return None;
                }
                node.inferred_type.clone()
            }
            NodeKind::FunctionCall => self.analyze_function_call(node)?,
            _ => return None,
        };
        node.inferred_type = inferred.clone();
        Some(inferred)
    }

    /// Prefix `-` (numeric, type preserved) and `!` (Bool).
    fn analyze_unary(&mut self, node: &mut Node) -> Option<String> {
        let op = node.token.as_ref().map(|t| t.kind)?;
        let location = node.location();

        let operand = node.left.as_deref_mut()?;
        let operand_type = self.analyze_expression(operand)?;

        let result = match op {
            TokenKind::Minus => {
                if !is_numeric(&operand_type) {
                    self.semantic_error(
                        format!("Operation '-' cannot be applied to '{}'", operand_type),
                        location,
                    );
                    return None;
                }
                operand_type
            }
            TokenKind::Not => {
                if operand_type != "Bool" {
                    self.semantic_error(
                        format!("Operation '!' cannot be applied to '{}'", operand_type),
                        location,
                    );
                    return None;
                }
                "Bool".to_string()
            }
            _ => return None,
        };

        node.value = if operand.foldable {
            operand.value.as_ref().and_then(|value| fold_unary(op, value))
        } else {
            None
        };
        node.foldable = node.value.is_some();
        Some(result)
    }

    /// Postfix factorial: operand must be `Int`, result `Int`.
    fn analyze_postfix(&mut self, node: &mut Node) -> Option<String> {
        let location = node.location();
        let operand = node.left.as_deref_mut()?;
        let operand_type = self.analyze_expression(operand)?;

        if operand_type != "Int" {
            self.semantic_error(
                format!("Operation '!' cannot be applied to '{}'", operand_type),
                location,
            );
            return None;
        }

        node.value = if operand.foldable {
            match &operand.value {
                Some(Value::Int(n)) => factorial(*n).map(Value::Int),
                _ => None,
            }
        } else {
            None
        };
        node.foldable = node.value.is_some();
        Some("Int".to_string())
    }

    /// Binary operators, per the type-rule table.
    fn analyze_binary(&mut self, node: &mut Node) -> Option<String> {
        let op = node.token.as_ref().map(|t| t.kind)?;
        let op_lexeme = node.lexeme().to_string();
        let location = node.location();

        let lhs_type = {
            let lhs = node.left.as_deref_mut()?;
            self.analyze_expression(lhs)?
        };
        let rhs_type = {
            let rhs = node.right.as_deref_mut()?;
            self.analyze_expression(rhs)?
        };

        let result = match op {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent => {
                if !is_numeric(&lhs_type) || !is_numeric(&rhs_type) {
                    self.semantic_error(
                        format!(
                            "Operation '{}' cannot be applied to '{}' and '{}'",
                            op_lexeme, lhs_type, rhs_type
                        ),
                        location,
                    );
                    return None;
                }
                if lhs_type == "Float" || rhs_type == "Float" {
                    "Float".to_string()
                } else {
                    "Int".to_string()
                }
            }
            TokenKind::AndAnd | TokenKind::OrOr => {
                if lhs_type != "Bool" || rhs_type != "Bool" {
                    self.semantic_error(
                        format!(
                            "Operation '{}' cannot be applied to '{}' and '{}'",
                            op_lexeme, lhs_type, rhs_type
                        ),
                        location,
                    );
                    return None;
                }
                "Bool".to_string()
            }
            TokenKind::EqEq | TokenKind::NotEq => {
                if lhs_type != rhs_type {
                    self.semantic_error(
                        format!(
                            "Operation '{}' cannot be applied to '{}' and '{}'",
                            op_lexeme, lhs_type, rhs_type
                        ),
                        location,
                    );
                    return None;
                }
                "Bool".to_string()
            }
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                if !is_numeric(&lhs_type) || !is_numeric(&rhs_type) {
                    self.semantic_error(
                        format!(
                            "Operation '{}' cannot be applied to '{}' and '{}'",
                            op_lexeme, lhs_type, rhs_type
                        ),
                        location,
                    );
                    return None;
                }
                "Bool".to_string()
            }
            _ => return None,
        };

        let lhs_value = node
            .left
            .as_deref()
            .filter(|n| n.foldable)
            .and_then(|n| n.value.clone());
        let rhs_value = node
            .right
            .as_deref()
            .filter(|n| n.foldable)
            .and_then(|n| n.value.clone());
        node.value = match (lhs_value, rhs_value) {
            (Some(lhs), Some(rhs)) => fold_binary(op, &lhs, &rhs),
            _ => None,
        };
        node.foldable = node.value.is_some();
        Some(result)
    }

    /// Call of a declared function: resolves the callee, checks arity,
    /// labels, and argument types against the recorded signature, and
    /// types the call as the declared return type.
    fn analyze_function_call(&mut self, node: &mut Node) -> Option<String> {
        let callee_is_identifier = node
            .left
            .as_deref()
            .map(|n| n.kind == NodeKind::Identifier)
            .unwrap_or(false);
        if !callee_is_identifier {
            let location = node.location();
            let callee_type = {
                let callee = node.left.as_deref_mut()?;
                self.analyze_expression(callee)?
            };
            self.semantic_error(
                format!("Cannot call a value of type '{}'", callee_type),
                location,
            );
            return None;
        }

        let callee_name = node.left.as_deref().map(|n| n.lexeme().to_string())?;
        let callee_location = node
            .left
            .as_deref()
            .map(|n| n.location())
            .unwrap_or_else(|| node.location());

        let Some(info) = self.functions.get(&callee_name).cloned() else {
            self.semantic_error(
                format!("Undeclared symbol '{}'", callee_name),
                callee_location,
            );
            return None;
        };

        if let Some(callee) = node.left.as_deref_mut() {
            callee.inferred_type = info.return_type.clone();
            callee.foldable = false;
        }

        let mut ok = true;
        let mut index = 0usize;
        let mut cell = node.right.as_deref_mut();
        while let Some(current) = cell {
            if let Some(argument) = current.left.as_deref_mut() {
                let label = argument
                    .left
                    .as_deref()
                    .map(|n| n.lexeme().to_string())
                    .unwrap_or_default();
                let label_location = argument
                    .left
                    .as_deref()
                    .map(|n| n.location())
                    .unwrap_or_else(|| argument.location());

                let value_type = match argument.right.as_deref_mut() {
                    Some(value) => self.analyze_expression(value),
                    None => None,
                };

                match info.parameters.get(index) {
                    Some((expected_label, expected_type)) => {
                        if &label != expected_label {
                            self.semantic_error(
                                format!(
                                    "Argument label '{}' does not match parameter '{}' of '{}'",
                                    label, expected_label, callee_name
                                ),
                                label_location,
                            );
                            ok = false;
                        }
                        match &value_type {
                            Some(value_type) if value_type != expected_type => {
                                self.semantic_error(
                                    format!(
                                        "Cannot pass value of type '{}' for parameter '{}' of type '{}'",
                                        value_type, expected_label, expected_type
                                    ),
                                    label_location,
                                );
                                ok = false;
                            }
                            None => ok = false,
                            _ => {}
                        }
                    }
                    None => {
                        // Arity overshoot reported once below.
                        if value_type.is_none() {
                            ok = false;
                        }
                    }
                }

                if let Some(value_type) = value_type {
                    argument.inferred_type = value_type;
                }
                argument.foldable = false;
                index += 1;
            }
            cell = current.right.as_deref_mut();
        }

        if index != info.parameters.len() {
            self.semantic_error(
                format!(
                    "Function '{}' expects {} arguments, found {}",
                    callee_name,
                    info.parameters.len(),
                    index
                ),
                callee_location,
            );
            ok = false;
        }

        if !ok {
            return None;
        }
        node.foldable = false;
        node.value = None;
        Some(info.return_type)
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Collects (label, type, location) triples from a ParameterList chain.
    fn collect_parameters(list: Option<&Node>) -> Vec<(String, String, SourceLocation)> {
        let mut parameters = Vec::new();
        let mut cell = list;
        while let Some(current) = cell {
            if let Some(parameter) = current.left.as_deref() {
                let label = parameter
                    .left
                    .as_deref()
                    .map(|n| n.lexeme().to_string())
                    .unwrap_or_default();
                let type_name = parameter
                    .right
                    .as_deref()
                    .map(|n| n.lexeme().to_string())
                    .unwrap_or_default();
                let location = parameter
                    .left
                    .as_deref()
                    .map(|n| n.location())
                    .unwrap_or_else(|| parameter.location());
                parameters.push((label, type_name, location));
            }
            cell = current.right.as_deref();
        }
        parameters
    }

    /// Records a function's signature and declares its name.
    fn analyze_function_definition(&mut self, node: &mut Node) -> bool {
        let name = node
            .left
            .as_deref()
            .map(|n| n.lexeme().to_string())
            .unwrap_or_default();
        let location = node
            .left
            .as_deref()
            .map(|n| n.location())
            .unwrap_or_else(|| node.location());
        let signature = node.right.as_deref();
        let return_type = signature
            .and_then(|s| s.right.as_deref())
            .map(|n| n.lexeme().to_string())
            .unwrap_or_default();
        let parameters = Self::collect_parameters(signature.and_then(|s| s.left.as_deref()));

        if self.functions.contains_key(&name) || self.table.lookup_current(&name).is_some() {
            self.semantic_error(format!("Redeclared symbol '{}'", name), location);
            return false;
        }

        let namespace = self.table.current_namespace();
        let mut symbol = Symbol::new(&name, &return_type, namespace, false, location);
        symbol.initialized = true;
        self.table.add(symbol);

        self.functions.insert(
            name,
            FunctionInfo {
                parameters: parameters
                    .into_iter()
                    .map(|(label, type_name, _)| (label, type_name))
                    .collect(),
                return_type: return_type.clone(),
                location,
            },
        );

        node.inferred_type = return_type;
        node.foldable = false;
        true
    }

    /// Definition plus body: parameters are declared in the body's
    /// namespace as initialized constants.
    fn analyze_function_implementation(&mut self, node: &mut Node) -> bool {
        let mut ok = true;
        let parameters = Self::collect_parameters(
            node.left
                .as_deref()
                .and_then(|d| d.right.as_deref())
                .and_then(|s| s.left.as_deref()),
        );

        if let Some(definition) = node.left.as_deref_mut() {
            ok &= self.analyze_function_definition(definition);
        }

        self.table.enter_namespace();
        let namespace = self.table.current_namespace();
        for (label, type_name, location) in parameters {
            let mut symbol = Symbol::new(&label, &type_name, namespace, false, location);
            symbol.initialized = true;
            self.table.add(symbol);
        }
        if let Some(body) = node.right.as_deref_mut() {
            ok &= self.analyze_sequence(body);
        }
        self.table.exit_namespace();
        ok
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    /// Opens a namespace around a code block.
    fn analyze_block(&mut self, block: &mut Node) -> bool {
        self.table.enter_namespace();
        let ok = self.analyze_sequence(block);
        self.table.exit_namespace();
        ok
    }

    /// The else part of a conditional: an else-block, a nested else-if
    /// chain, or the empty terminator.
    fn analyze_else(&mut self, node: &mut Node) -> bool {
        match node.kind {
            NodeKind::ConditionalStatement => self.analyze_conditional(node),
            NodeKind::CodeBlock => {
                if node.is_terminal() {
                    true
                } else {
                    self.analyze_block(node)
                }
            }
            _ => true,
        }
    }

    /// Conditional statements: the condition must be `Bool`. When the
    /// condition folds, exactly one branch is analyzed and the other is
    /// dead; otherwise both are.
    fn analyze_conditional(&mut self, node: &mut Node) -> bool {
        let mut ok = true;
        let mut condition_value: Option<bool> = None;

        if let Some(condition) = node.left.as_deref_mut() {
            match self.analyze_expression(condition) {
                Some(condition_type) if condition_type == "Bool" => {
                    if condition.foldable {
                        if let Some(Value::Bool(value)) = &condition.value {
                            condition_value = Some(*value);
                        }
                    }
                }
                Some(condition_type) => {
                    self.semantic_error(
                        format!("Condition must be 'Bool', found '{}'", condition_type),
                        condition.location(),
                    );
                    ok = false;
                }
                None => ok = false,
            }
        }

        let Some(body) = node.right.as_deref_mut() else {
            return ok;
        };
        match condition_value {
            Some(true) => {
                if let Some(then_block) = body.left.as_deref_mut() {
                    ok &= self.analyze_block(then_block);
                }
            }
            Some(false) => {
                if let Some(else_part) = body.right.as_deref_mut() {
                    ok &= self.analyze_else(else_part);
                }
            }
            None => {
                if let Some(then_block) = body.left.as_deref_mut() {
                    ok &= self.analyze_block(then_block);
                }
                if let Some(else_part) = body.right.as_deref_mut() {
                    ok &= self.analyze_else(else_part);
                }
            }
        }
        ok
    }

    /// Repeat-until: body in its own namespace, condition must be `Bool`.
    fn analyze_repeat_until(&mut self, node: &mut Node) -> bool {
        let mut ok = true;
        if let Some(block) = node.left.as_deref_mut() {
            ok &= self.analyze_block(block);
        }
        if let Some(condition) = node.right.as_deref_mut() {
            match self.analyze_expression(condition) {
                Some(condition_type) if condition_type == "Bool" => {}
                Some(condition_type) => {
                    self.semantic_error(
                        format!("Condition must be 'Bool', found '{}'", condition_type),
                        condition.location(),
                    );
                    ok = false;
                }
                None => ok = false,
            }
        }
        ok
    }

    /// For-in: the loop variable is declared in the body's namespace,
    /// typed by the iterable expression.
    fn analyze_for_in(&mut self, node: &mut Node) -> bool {
        let mut ok = true;
        let mut element_type = String::from("Any");
        let mut variable: Option<(String, SourceLocation)> = None;

        if let Some(context) = node.left.as_deref_mut() {
            if let Some(iterable) = context.right.as_deref_mut() {
                match self.analyze_expression(iterable) {
                    Some(iterable_type) => element_type = iterable_type,
                    None => ok = false,
                }
            }
            if let Some(identifier) = context.left.as_deref_mut() {
                identifier.inferred_type = element_type.clone();
                identifier.foldable = false;
                variable = Some((identifier.lexeme().to_string(), identifier.location()));
            }
            context.inferred_type = element_type.clone();
            context.foldable = false;
        }

        self.table.enter_namespace();
        if let Some((name, location)) = variable {
            let namespace = self.table.current_namespace();
            let mut symbol = Symbol::new(&name, &element_type, namespace, false, location);
            symbol.initialized = true;
            self.table.add(symbol);
        }
        if let Some(block) = node.right.as_deref_mut() {
            ok &= self.analyze_sequence(block);
        }
        self.table.exit_namespace();
        ok
    }

    /// Records an analyzer diagnostic in the wire format.
    fn semantic_error(&self, message: String, location: SourceLocation) {
        self.handler.emit(Diagnostic::error(
            format!("[ERROR] {} at location {}", message, location),
            location,
        ));
    }
}
