//! In-process pipeline tests: lex → parse → analyze over whole programs.

use opusc_drv::{CompileError, Config, Session};

fn compile(source: &str) -> (Result<(), CompileError>, Vec<String>) {
    let mut session = Session::new(Config::new("test.opus"));
    let result = session.compile_source(source);
    let messages = session
        .handler()
        .diagnostics()
        .into_iter()
        .map(|d| d.message)
        .collect();
    (result, messages)
}

#[test]
fn declaration_with_assignment() {
    let (result, messages) = compile("let quizGrade: Int = 100\n");
    assert!(result.is_ok(), "unexpected diagnostics: {:?}", messages);
}

#[test]
fn precedence_inside_function_body() {
    let source = "func seven() -> Int {\nreturn 1 + 2 * 3\n}\n";
    let (result, messages) = compile(source);
    assert!(result.is_ok(), "unexpected diagnostics: {:?}", messages);
}

#[test]
fn dead_branch_is_not_analyzed() {
    // `missing` is undeclared, but the else branch is statically dead.
    let source = "if true { var a: Int = 1 } else { missing = 2 }\n";
    let (result, messages) = compile(source);
    assert!(result.is_ok(), "unexpected diagnostics: {:?}", messages);
}

#[test]
fn immutable_reassignment_is_semantic_error() {
    let (result, messages) = compile("let x: Int = 1\nx = 2\n");
    assert!(matches!(result, Err(CompileError::Semantic(1))));
    assert!(messages[0].contains("Cannot modify immutable symbol 'x' at location 2:1"));
}

#[test]
fn declared_type_mismatch_is_semantic_error() {
    let (result, messages) = compile("var y: Int = 3.14\n");
    assert!(matches!(result, Err(CompileError::Semantic(1))));
    assert!(messages[0].contains("Cannot assign value of type 'Float'"));
}

#[test]
fn newlines_inside_parentheses_fold_to_three() {
    let (result, messages) = compile("var z: Int = (\n1\n+\n2\n)\n");
    assert!(result.is_ok(), "unexpected diagnostics: {:?}", messages);
}

#[test]
fn whole_program_exercises_every_statement_kind() {
    let source = "\
func area(width: Int, height: Int) -> Int {\n\
return width * height\n\
}\n\
let base: Int = 4\n\
var total: Int = 0\n\
total = area(width: base, height: 3)\n\
if total > 10 {\n\
total = total - 1\n\
} else if total == 0 {\n\
total = 1\n\
} else {\n\
total = total + 1\n\
}\n\
repeat {\n\
total = total - 1\n\
} until total < 1\n\
for step in base {\n\
total = total + step\n\
}\n\
return total\n";
    let (result, messages) = compile(source);
    assert!(result.is_ok(), "unexpected diagnostics: {:?}", messages);
}

#[test]
fn syntax_errors_suppress_analysis() {
    // `x = 2` would be an undeclared-symbol error, but the malformed first
    // line stops compilation at the parsing stage.
    let (result, messages) = compile("var : Int\nx = 2\n");
    assert!(matches!(result, Err(CompileError::Syntax(1))));
    assert!(messages[0].contains("Parsing Error"));
}

#[test]
fn lexer_and_parser_errors_accumulate() {
    let (result, messages) = compile("1.2.3\nvar x Int\n@\n");
    assert!(matches!(result, Err(CompileError::Syntax(_))));
    assert!(messages.iter().any(|m| m.contains("MalformedNumeric")));
    assert!(messages.iter().any(|m| m.contains("Expecting ':' after 'x'")));
    assert!(messages.iter().any(|m| m.contains("Unrecognizable")));
}

#[test]
fn factorial_program_folds() {
    let (result, messages) = compile("let f: Int = 5!\nlet g: Int = f + 1\n");
    assert!(result.is_ok(), "unexpected diagnostics: {:?}", messages);
}

#[test]
fn string_declarations_compile() {
    let (result, messages) = compile("let greeting: String = \"hello opus\"\n");
    assert!(result.is_ok(), "unexpected diagnostics: {:?}", messages);
}
