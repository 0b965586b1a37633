//! Larch Channel - Batched Token Transport
//!
//! A bounded single-producer/single-consumer pipe between the lexer thread
//! and the parser thread. Pushed tokens land in a staging batch that the
//! consumer cannot see; the batch is published atomically when the producer
//! flushes, when the staging batch fills, or when a configurable predicate
//! fires on the just-pushed token (the drivers flush on newlines, so the
//! REPL's parser sees whole lines at once).
//!
//! Tokens become visible strictly in push order and never before their
//! batch was flushed. End of stream is an `Eof` token, which also forces a
//! flush; there is no separate close operation. Backpressure comes from
//! the bounded transport: pushing blocks while the consumer is behind by
//! `depth` full batches.

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tracing::trace;

use larch_ir::{Token, TokenKind};

/// The consumer went away; no further token can be delivered.
#[derive(thiserror::Error, Clone, Copy, PartialEq, Eq, Debug)]
#[error("token consumer disconnected")]
pub struct Disconnected;

/// Flush predicate used by the drivers: publish at line boundaries.
pub fn flush_on_newline(token: &Token) -> bool {
    token.kind == TokenKind::Newline
}

/// Create a token channel.
///
/// `batch` is the staging batch size (tokens buffered before an automatic
/// flush); `depth` is how many flushed batches may be in flight before the
/// producer blocks. Both are clamped to at least 1. `flush_when` is
/// evaluated on every pushed token; a `true` result publishes the batch
/// that token belongs to.
pub fn token_channel<F>(
    batch: usize,
    depth: usize,
    flush_when: F,
) -> (TokenSender<F>, TokenReceiver)
where
    F: Fn(&Token) -> bool,
{
    let (tx, rx) = crossbeam_channel::bounded(depth.max(1));
    let sender = TokenSender {
        tx,
        staged: Vec::with_capacity(batch.max(1)),
        batch: batch.max(1),
        flush_when,
    };
    let receiver = TokenReceiver {
        rx,
        buffered: VecDeque::new(),
    };
    (sender, receiver)
}

/// Producer half: stages tokens and publishes them in batches.
pub struct TokenSender<F> {
    tx: Sender<Vec<Token>>,
    staged: Vec<Token>,
    batch: usize,
    flush_when: F,
}

impl<F: Fn(&Token) -> bool> TokenSender<F> {
    /// Stage one token; flushes if the predicate fires on it, if it is
    /// `Eof`, or if the staging batch is now full.
    pub fn push(&mut self, token: Token) -> Result<(), Disconnected> {
        let publish = (self.flush_when)(&token) || token.kind == TokenKind::Eof;
        self.staged.push(token);
        if publish || self.staged.len() >= self.batch {
            self.flush()?;
        }
        Ok(())
    }

    /// Publish everything staged so far. No-op on an empty batch.
    pub fn flush(&mut self) -> Result<(), Disconnected> {
        if self.staged.is_empty() {
            return Ok(());
        }
        let batch = std::mem::replace(&mut self.staged, Vec::with_capacity(self.batch));
        trace!(len = batch.len(), "flushing token batch");
        self.tx.send(batch).map_err(|_| Disconnected)
    }
}

/// Consumer half: pulls tokens out of published batches in push order.
pub struct TokenReceiver {
    rx: Receiver<Vec<Token>>,
    buffered: VecDeque<Token>,
}

impl TokenReceiver {
    /// Next token, blocking until a batch is published. `None` once the
    /// producer is gone and every published token was consumed.
    pub fn recv(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.buffered.pop_front() {
                return Some(token);
            }
            match self.rx.recv() {
                Ok(batch) => self.buffered.extend(batch),
                Err(_) => return None,
            }
        }
    }

    /// Next token if one is already visible. Never blocks.
    pub fn try_recv(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.buffered.pop_front() {
                return Some(token);
            }
            match self.rx.try_recv() {
                Ok(batch) => self.buffered.extend(batch),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Look at the next token without consuming it, blocking like
    /// [`recv`](Self::recv).
    pub fn peek(&mut self) -> Option<&Token> {
        while self.buffered.is_empty() {
            match self.rx.recv() {
                Ok(batch) => self.buffered.extend(batch),
                Err(_) => return None,
            }
        }
        self.buffered.front()
    }

    /// Look at the next visible token without consuming it. Never blocks.
    pub fn try_peek(&mut self) -> Option<&Token> {
        while self.buffered.is_empty() {
            match self.rx.try_recv() {
                Ok(batch) => self.buffered.extend(batch),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
        self.buffered.front()
    }
}

#[cfg(test)]
mod tests;
