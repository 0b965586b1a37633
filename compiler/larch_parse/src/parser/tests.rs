use pretty_assertions::assert_eq;

use larch_channel::{flush_on_newline, token_channel};
use larch_ir::visit::printer::{render_stmt, render_unit};
use larch_ir::{
    ArenaBuilder, Boxed, BoxedBuilder, DedupBuilder, Indexed, SharedBuilder, StringInterner,
    TranslationUnit,
};

use crate::source::IterSource;

use super::*;

fn lex_tokens(source: &str, interner: &StringInterner) -> Vec<Token> {
    let (tokens, errors) = larch_lexer::lex(source, interner);
    assert_eq!(errors.len(), 0, "unexpected lex errors: {errors:?}");
    tokens
}

fn parse_boxed(
    source: &str,
    interner: &StringInterner,
) -> (TranslationUnit<Boxed>, Vec<ParseError>) {
    let tokens = lex_tokens(source, interner);
    let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
    let unit = parser.parse();
    let errors = parser.take_errors();
    (unit, errors)
}

fn render_boxed(source: &str) -> String {
    let interner = StringInterner::new();
    let (unit, errors) = parse_boxed(source, &interner);
    assert_eq!(errors, vec![]);
    render_unit::<Boxed>(&unit, (), &interner)
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let interner = StringInterner::new();
    let (unit, errors) = parse_boxed("1 + 2 * 3;", &interner);
    assert_eq!(errors, vec![]);
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "+ (1) (* (2) (3));"
    );
}

#[test]
fn every_builder_parses_the_same_shape() {
    let source = "var x = 1; if (x < 2) { print x + 1; } else { print -x; } foo(x, 2 * x);";
    let interner = StringInterner::new();
    let tokens = lex_tokens(source, &interner);

    let (boxed_unit, errors) = parse_boxed(source, &interner);
    assert_eq!(errors, vec![]);
    let expected = render_unit::<Boxed>(&boxed_unit, (), &interner);

    let mut shared = Parser::new(IterSource::new(tokens.clone()), SharedBuilder::new());
    let unit = shared.parse();
    assert!(!shared.had_error());
    assert_eq!(render_unit::<larch_ir::Shared>(&unit, (), &interner), expected);

    let mut arena = Parser::new(IterSource::new(tokens.clone()), ArenaBuilder::new());
    let unit = arena.parse();
    assert!(!arena.had_error());
    let builder = arena.into_builder();
    assert_eq!(
        render_unit::<Indexed>(&unit, builder.arena(), &interner),
        expected
    );

    let mut dedup = Parser::new(IterSource::new(tokens), DedupBuilder::new());
    let unit = dedup.parse();
    assert!(!dedup.had_error());
    let builder = dedup.into_builder();
    assert_eq!(
        render_unit::<Indexed<_>>(&unit, builder.arena(), &interner),
        expected
    );
}

#[test]
fn one_error_per_broken_statement_and_parsing_continues() {
    let interner = StringInterner::new();
    let (unit, errors) = parse_boxed("1 + ; print 2;", &interner);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::Expected { .. }));
    assert_eq!(unit.statements.len(), 1);
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "print 2;"
    );
}

#[test]
fn recovery_restarts_at_statement_keywords() {
    let interner = StringInterner::new();
    let (unit, errors) = parse_boxed("var = 3 var ok = 1; print ok;", &interner);
    assert_eq!(errors.len(), 1);
    assert_eq!(unit.statements.len(), 2);
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "var ok = 1;"
    );
}

#[test]
fn recovery_consumes_keywords_without_a_rule() {
    // `class` is lexed but has no statement rule; recovery has to skip
    // past it instead of stopping in front of it and looping.
    let interner = StringInterner::new();
    let (unit, errors) = parse_boxed("class Foo {} print 1;", &interner);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::Expected { .. }));
    assert_eq!(unit.statements.len(), 1);
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "print 1;"
    );
}

#[test]
fn reset_rearms_the_parser_after_eof() {
    let interner = StringInterner::new();
    let mut tokens = lex_tokens("print 1;", &interner);
    tokens.extend(lex_tokens("print 2;", &interner));

    let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
    let first = parser.parse();
    assert!(parser.at_eof());
    assert_eq!(first.statements.len(), 1);

    parser.reset();
    assert!(!parser.at_eof());
    let second = parser.parse();
    assert!(!parser.had_error());
    assert_eq!(second.statements.len(), 1);
    assert_eq!(
        render_stmt::<Boxed>(&second.statements[0], (), &interner),
        "print 2;"
    );
}

#[test]
fn assignment_needs_a_variable_target() {
    let interner = StringInterner::new();
    let (unit, errors) = parse_boxed("1 = 2; x = 3;", &interner);
    assert!(matches!(
        errors[0],
        ParseError::InvalidAssignmentTarget { .. }
    ));
    assert_eq!(unit.statements.len(), 1);
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "x = (3);"
    );
}

#[test]
fn assignment_is_right_associative_through_targets() {
    assert_eq!(render_boxed("x = y;"), "x = (y);\n");
    assert_eq!(render_boxed("x = 1 or 2;"), "x = (or (1) (2));\n");
}

#[test]
fn comma_sequences_at_statement_level() {
    assert_eq!(render_boxed("1, 2;"), ", (1) (2);\n");
}

#[test]
fn call_arguments_sit_below_the_comma_operator() {
    assert_eq!(render_boxed("f(1, 2);"), "call (f)(1, 2);\n");
    assert_eq!(render_boxed("f(1)(2);"), "call (call (f)(1))(2);\n");
}

#[test]
fn grouping_resets_precedence() {
    assert_eq!(render_boxed("(1 + 2) * 3;"), "* ((+ (1) (2))) (3);\n");
}

#[test]
fn unary_operators_nest() {
    assert_eq!(render_boxed("!!true;"), "! (! (true));\n");
    assert_eq!(render_boxed("-x + 1;"), "+ (- (x)) (1);\n");
}

#[test]
fn function_declarations_and_returns() {
    assert_eq!(
        render_boxed("fun add(a, b) { return a + b; }"),
        "fun add(a, b) { return + (a) (b); }\n"
    );
    // A bare return yields nil.
    assert_eq!(
        render_boxed("fun f() { return; }"),
        "fun f() { return nil; }\n"
    );
}

#[test]
fn for_loops_desugar_to_while() {
    assert_eq!(
        render_boxed("for (var i = 0; i < 3; i = i + 1) print i;"),
        "{ var i = 0; while (< (i) (3)) { print i; i = (+ (i) (1)); } }\n"
    );
    // No clauses at all: an unconditional loop.
    assert_eq!(
        render_boxed("for (;;) print 1;"),
        "while (true) print 1;\n"
    );
}

#[test]
fn repl_expression_answers_back_as_print() {
    let interner = StringInterner::new();
    let tokens = lex_tokens("1 + 1\n", &interner);
    let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
    let unit = parser.parse_repl();
    assert!(!parser.had_error());
    assert_eq!(unit.statements.len(), 1);
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "print + (1) (1);"
    );
}

#[test]
fn repl_statement_with_semicolon_stays_plain() {
    let interner = StringInterner::new();
    let tokens = lex_tokens("var x = 1;\n", &interner);
    let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
    let unit = parser.parse_repl();
    assert!(!parser.had_error());
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "var x = 1;"
    );
}

#[test]
fn repl_else_must_share_the_line_with_if() {
    let interner = StringInterner::new();
    let tokens = lex_tokens("if (true) print 1; else print 2;\n", &interner);
    let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
    let unit = parser.parse_repl();
    assert!(!parser.had_error());
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "if (true) print 1; else print 2;"
    );

    // With the else pushed to the next line the if ends at the newline.
    let tokens = lex_tokens("if (true) print 1;\nelse print 2;\n", &interner);
    let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
    let unit = parser.parse_repl();
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "if (true) print 1;"
    );
}

#[test]
fn newlines_inside_nesting_do_not_end_repl_input() {
    let interner = StringInterner::new();
    let tokens = lex_tokens("{\nprint 1;\nprint 2;\n}\n", &interner);
    let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
    let unit = parser.parse_repl();
    assert!(!parser.had_error());
    assert_eq!(
        render_stmt::<Boxed>(&unit.statements[0], (), &interner),
        "{ print 1; print 2; }"
    );
}

#[test]
fn parser_reads_from_a_channel_fed_by_another_thread() {
    let interner = StringInterner::new();
    let tokens = lex_tokens("print 1;\nprint 2;\n", &interner);

    let (mut tx, rx) = token_channel(8, 4, flush_on_newline);
    let producer = std::thread::spawn(move || {
        for token in tokens {
            if tx.push(token).is_err() {
                return;
            }
        }
        // lex_tokens already appended Eof, which flushed the sender.
    });

    let mut parser = Parser::new(rx, BoxedBuilder::new());
    let unit = parser.parse();
    producer.join().unwrap();

    assert!(!parser.had_error());
    assert_eq!(unit.statements.len(), 2);
    assert_eq!(
        render_unit::<Boxed>(&unit, (), &interner),
        "print 1;\nprint 2;\n"
    );
}

#[test]
fn unexpected_end_is_a_single_error() {
    let interner = StringInterner::new();
    let (unit, errors) = parse_boxed("1 +", &interner);
    assert_eq!(unit.statements.len(), 0);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::UnexpectedEnd { .. }));
}
