use pretty_assertions::assert_eq;

use larch_ir::{ArenaBuilder, Boxed, BoxedBuilder, Indexed, StringInterner, TranslationUnit};
use larch_parse::{IterSource, Parser};

use super::*;
use crate::error::RuntimeError;

fn parse_boxed(source: &str, interner: &StringInterner) -> TranslationUnit<Boxed> {
    let (tokens, lex_errors) = larch_lexer::lex(source, interner);
    assert_eq!(lex_errors.len(), 0, "lex errors: {lex_errors:?}");
    let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
    let unit = parser.parse();
    assert_eq!(parser.errors(), &[]);
    unit
}

fn run(source: &str) -> Vec<String> {
    let interner = StringInterner::new();
    let unit = parse_boxed(source, &interner);
    let mut interp = Interpreter::new(&interner, Vec::new());
    let result = interp.run(&unit, ());
    assert_eq!(result, Ok(()));
    interp.into_output()
}

fn run_err(source: &str) -> RuntimeError {
    let interner = StringInterner::new();
    let unit = parse_boxed(source, &interner);
    let mut interp = Interpreter::new(&interner, Vec::new());
    match interp.run(&unit, ()) {
        Ok(()) => panic!("expected a runtime error"),
        Err(err) => err,
    }
}

#[test]
fn assignment_reads_back() {
    assert_eq!(run("var x = 1; x = x + 1; print x;"), vec!["2"]);
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(run("print 1 + 2 * 3;"), vec!["7"]);
    assert_eq!(run("print (1 + 2) * 3;"), vec!["9"]);
}

#[test]
fn numbers_print_without_trailing_zero() {
    assert_eq!(run("print 4 / 2;"), vec!["2"]);
    assert_eq!(run("print 10 / 4;"), vec!["2.5"]);
    assert_eq!(run("print -7;"), vec!["-7"]);
}

#[test]
fn strings_concatenate_with_plus() {
    assert_eq!(run("print \"foo\" + \"bar\";"), vec!["foobar"]);
}

#[test]
fn nil_and_false_are_falsey() {
    assert_eq!(run("if (nil) print \"t\"; else print \"f\";"), vec!["f"]);
    assert_eq!(run("if (false) print \"t\"; else print \"f\";"), vec!["f"]);
    // Zero and the empty string are values, hence truthy.
    assert_eq!(run("if (0) print \"t\"; else print \"f\";"), vec!["t"]);
    assert_eq!(run("if (\"\") print \"t\"; else print \"f\";"), vec!["t"]);
}

#[test]
fn while_loops_accumulate() {
    assert_eq!(
        run("var i = 0; var total = 0; while (i < 4) { total = total + i; i = i + 1; } print total;"),
        vec!["6"]
    );
}

#[test]
fn for_loops_run_their_desugared_form() {
    assert_eq!(
        run("for (var i = 0; i < 3; i = i + 1) print i;"),
        vec!["0", "1", "2"]
    );
}

#[test]
fn functions_return_values() {
    assert_eq!(
        run("fun add(a, b) { return a + b; } print add(1, 2);"),
        vec!["3"]
    );
    // A bare return yields nil, as does falling off the end.
    assert_eq!(run("fun f() { return; } print f();"), vec!["nil"]);
    assert_eq!(run("fun g() { 1 + 1; } print g();"), vec!["nil"]);
}

#[test]
fn recursion_works_through_global_lookup() {
    assert_eq!(
        run("fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } print fib(10);"),
        vec!["55"]
    );
}

#[test]
fn return_stops_the_enclosing_loop() {
    assert_eq!(
        run("fun first() { var i = 0; while (true) { if (i > 2) return i; i = i + 1; } } print first();"),
        vec!["3"]
    );
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(run("var x = 1; true or (x = 2); print x;"), vec!["1"]);
    assert_eq!(run("var x = 1; false and (x = 3); print x;"), vec!["1"]);
    assert_eq!(run("var x = 1; false or (x = 2); print x;"), vec!["2"]);
}

#[test]
fn logical_operators_yield_the_deciding_operand() {
    assert_eq!(run("print 1 or 2;"), vec!["1"]);
    assert_eq!(run("print nil or 2;"), vec!["2"]);
    assert_eq!(run("print 1 and 2;"), vec!["2"]);
    assert_eq!(run("print nil and 2;"), vec!["nil"]);
}

#[test]
fn comma_yields_its_right_operand() {
    assert_eq!(run("print (1, 2);"), vec!["2"]);
}

#[test]
fn equality_is_typed() {
    assert_eq!(run("print 1 == 1;"), vec!["true"]);
    assert_eq!(run("print \"a\" == \"a\";"), vec!["true"]);
    assert_eq!(run("print 1 == \"1\";"), vec!["false"]);
    assert_eq!(run("print nil == nil;"), vec!["true"]);
    assert_eq!(run("print 1 != 2;"), vec!["true"]);
}

#[test]
fn blocks_shadow_and_restore() {
    assert_eq!(
        run("var a = 1; { var a = 2; print a; } print a;"),
        vec!["2", "1"]
    );
}

#[test]
fn clock_counts_seconds() {
    assert_eq!(run("print clock() >= 0;"), vec!["true"]);
}

#[test]
fn undefined_variable_is_an_error() {
    assert_eq!(
        run_err("print missing;"),
        RuntimeError::UndefinedVariable {
            name: "missing".to_owned()
        }
    );
    // Assignment requires a prior declaration too.
    assert_eq!(
        run_err("ghost = 1;"),
        RuntimeError::UndefinedVariable {
            name: "ghost".to_owned()
        }
    );
}

#[test]
fn operand_type_errors() {
    assert!(matches!(
        run_err("print 1 + \"a\";"),
        RuntimeError::InvalidOperands { .. }
    ));
    assert!(matches!(
        run_err("print -\"a\";"),
        RuntimeError::InvalidOperand { .. }
    ));
}

#[test]
fn call_errors() {
    assert!(matches!(
        run_err("fun f(a) { return a; } f(1, 2);"),
        RuntimeError::ArityMismatch { expected: 1, got: 2, .. }
    ));
    assert!(matches!(
        run_err("1(2);"),
        RuntimeError::NotCallable { callee: "number" }
    ));
}

#[test]
fn arena_trees_evaluate_identically() {
    let source = "fun twice(n) { return n * 2; } var x = 3; print twice(x) + 1;";
    let interner = StringInterner::new();
    let (tokens, _) = larch_lexer::lex(source, &interner);
    let mut parser = Parser::new(IterSource::new(tokens), ArenaBuilder::new());
    let unit: TranslationUnit<Indexed> = parser.parse();
    assert_eq!(parser.errors(), &[]);
    let builder = parser.into_builder();

    let mut interp = Interpreter::new(&interner, Vec::new());
    let result = interp.run(&unit, builder.arena());
    assert_eq!(result, Ok(()));
    assert_eq!(interp.into_output(), vec!["7"]);

    assert_eq!(run(source), vec!["7"]);
}
