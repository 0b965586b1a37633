//! Where the parser pulls tokens from.
//!
//! The grammar only ever asks for "the next token", so anything that can
//! answer that is a valid source: a pre-lexed vector in tests, a lexer
//! iterator in single-threaded drivers, or the channel receiver when the
//! lexer runs on its own thread.

use larch_ir::Token;

use larch_channel::TokenReceiver;

/// A pull-based token stream. Returning `None` means the stream is
/// exhausted; the parser treats that like an `Eof` token.
pub trait TokenSource {
    fn next_token(&mut self) -> Option<Token>;
}

/// Adapts any token iterator (a lexer, a `Vec`) into a source.
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = Token>> IterSource<I> {
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        IterSource {
            iter: tokens.into_iter(),
        }
    }
}

impl<I: Iterator<Item = Token>> TokenSource for IterSource<I> {
    fn next_token(&mut self) -> Option<Token> {
        self.iter.next()
    }
}

/// The cross-thread case: block on the channel until the lexer thread
/// flushes a batch.
impl TokenSource for TokenReceiver {
    fn next_token(&mut self) -> Option<Token> {
        self.recv()
    }
}
