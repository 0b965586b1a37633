//! Interactive mode.
//!
//! Reads a line, lexes and parses it in REPL mode (so a bare expression
//! answers back as a `print`), and evaluates it against an interpreter
//! that lives for the whole session. Input that ends mid-statement, an
//! opened block for instance, keeps accumulating lines until it parses.
//!
//! Each line's tree is leaked to give the interpreter `'static` borrows;
//! like the interner's leaked strings, the total is bounded by what the
//! user typed.

use std::io::{self, BufRead, Write};

use larch_eval::{Interpreter, Stdout};
use larch_ir::{Boxed, BoxedBuilder, StringInterner, TokenKind, TranslationUnit};
use larch_parse::{IterSource, ParseError, Parser};

pub fn run() -> i32 {
    let interner: &'static StringInterner = Box::leak(Box::new(StringInterner::new()));
    let mut interp: Interpreter<'static, Boxed, Stdout> = Interpreter::new(interner, Stdout);

    println!("larch {} interactive mode (ctrl-d to exit)", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut buffer = String::new();
    let mut line = String::new();
    loop {
        print!("{}", if buffer.is_empty() { "> " } else { ".. " });
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: {err}");
                return 74;
            }
        }
        buffer.push_str(&line);
        if !buffer.ends_with('\n') {
            buffer.push('\n');
        }
        if buffer.trim().is_empty() {
            buffer.clear();
            continue;
        }

        let (tokens, lex_errors) = larch_lexer::lex(&buffer, interner);
        if !lex_errors.is_empty() {
            for err in &lex_errors {
                eprintln!("{err}");
            }
            buffer.clear();
            continue;
        }

        let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::new());
        let unit = parser.parse_repl();
        let errors = parser.take_errors();
        let truncated = !errors.is_empty()
            && errors.iter().all(|e| {
                matches!(
                    e,
                    ParseError::UnexpectedEnd { .. }
                        | ParseError::Expected {
                            found: TokenKind::Eof,
                            ..
                        }
                )
            });
        if truncated {
            // Statement still open; wait for the rest of it.
            continue;
        }
        buffer.clear();
        if !errors.is_empty() {
            for err in &errors {
                eprintln!("{err}");
            }
            continue;
        }

        let unit: &'static TranslationUnit<Boxed> = Box::leak(Box::new(unit));
        if let Err(err) = interp.run(unit, ()) {
            eprintln!("runtime error: {err}");
        }
    }
    0
}
