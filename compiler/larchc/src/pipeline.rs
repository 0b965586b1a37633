//! The threaded front end: lexer on one thread, parser on the other,
//! joined by the batched token channel. Batches publish at line
//! boundaries, so the parser sees whole lines at a time.

use larch_channel::{flush_on_newline, token_channel};
use larch_ir::{NodeBuilder, StringInterner, TranslationUnit};
use larch_lexer::{LexError, Lexer};
use larch_parse::{ParseError, Parser};

const TOKEN_BATCH: usize = 64;
const CHANNEL_DEPTH: usize = 8;

pub struct FrontEndOutput<B: NodeBuilder> {
    pub unit: TranslationUnit<B::P>,
    pub builder: B,
    pub lex_errors: Vec<LexError>,
    pub parse_errors: Vec<ParseError>,
}

/// Lex `source` on a spawned thread while parsing on the calling one.
pub fn parse_threaded<B: NodeBuilder>(
    source: &str,
    interner: &StringInterner,
    builder: B,
) -> FrontEndOutput<B> {
    std::thread::scope(|scope| {
        let (mut tx, rx) = token_channel(TOKEN_BATCH, CHANNEL_DEPTH, flush_on_newline);
        let lexer_thread = scope.spawn(move || {
            let mut lexer = Lexer::new(source, interner);
            for token in lexer.by_ref() {
                // The parser hanging up early is not an error here; it
                // already has everything it wanted.
                if tx.push(token).is_err() {
                    break;
                }
            }
            lexer.into_errors()
        });

        let mut parser = Parser::new(rx, builder);
        let unit = parser.parse();
        let parse_errors = parser.take_errors();
        let lex_errors = lexer_thread.join().unwrap_or_default();

        FrontEndOutput {
            unit,
            builder: parser.into_builder(),
            lex_errors,
            parse_errors,
        }
    })
}
