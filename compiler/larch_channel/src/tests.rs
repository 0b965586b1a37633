use super::*;
use larch_ir::Name;
use pretty_assertions::assert_eq;

fn token(kind: TokenKind) -> Token {
    Token::new(kind, Name::EMPTY, 1, 0)
}

#[test]
fn nothing_visible_before_the_predicate_fires() {
    let (mut tx, mut rx) = token_channel(64, 4, flush_on_newline);

    tx.push(token(TokenKind::Ident(Name::EMPTY))).unwrap();
    tx.push(token(TokenKind::Eq)).unwrap();
    tx.push(token(TokenKind::number(1.0))).unwrap();
    assert_eq!(rx.try_recv(), None);

    tx.push(token(TokenKind::Newline)).unwrap();

    let kinds: Vec<TokenKind> = std::iter::from_fn(|| rx.try_recv()).map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident(Name::EMPTY),
            TokenKind::Eq,
            TokenKind::number(1.0),
            TokenKind::Newline,
        ]
    );
}

#[test]
fn full_staging_batch_publishes_itself() {
    let (mut tx, mut rx) = token_channel(2, 4, |_| false);
    tx.push(token(TokenKind::Plus)).unwrap();
    assert_eq!(rx.try_recv(), None);
    tx.push(token(TokenKind::Minus)).unwrap();
    assert_eq!(rx.try_recv().map(|t| t.kind), Some(TokenKind::Plus));
    assert_eq!(rx.try_recv().map(|t| t.kind), Some(TokenKind::Minus));
}

#[test]
fn explicit_flush_publishes_a_partial_batch() {
    let (mut tx, mut rx) = token_channel(64, 4, |_| false);
    tx.push(token(TokenKind::Star)).unwrap();
    assert_eq!(rx.try_recv(), None);
    tx.flush().unwrap();
    assert_eq!(rx.try_recv().map(|t| t.kind), Some(TokenKind::Star));
}

#[test]
fn eof_always_flushes() {
    let (mut tx, mut rx) = token_channel(64, 4, |_| false);
    tx.push(token(TokenKind::Print)).unwrap();
    tx.push(Token::eof(1, 6)).unwrap();
    drop(tx);
    assert_eq!(rx.try_recv().map(|t| t.kind), Some(TokenKind::Print));
    assert_eq!(rx.try_recv().map(|t| t.kind), Some(TokenKind::Eof));
    // Sender gone, so the stream is over.
    assert_eq!(rx.recv(), None);
}

#[test]
fn peek_does_not_consume() {
    let (mut tx, mut rx) = token_channel(1, 4, |_| false);
    tx.push(token(TokenKind::If)).unwrap();
    assert_eq!(rx.peek().map(|t| t.kind), Some(TokenKind::If));
    assert_eq!(rx.recv().map(|t| t.kind), Some(TokenKind::If));
}

#[test]
fn try_peek_sees_only_published_tokens() {
    let (mut tx, mut rx) = token_channel(64, 4, flush_on_newline);
    tx.push(token(TokenKind::Var)).unwrap();
    assert_eq!(rx.try_peek(), None);
    tx.flush().unwrap();
    assert_eq!(rx.try_peek().map(|t| t.kind), Some(TokenKind::Var));
    // Still there; peeking does not consume.
    assert_eq!(rx.try_recv().map(|t| t.kind), Some(TokenKind::Var));
}

#[test]
fn recv_blocks_until_a_batch_arrives() {
    let (mut tx, mut rx) = token_channel(64, 4, flush_on_newline);

    let producer = std::thread::spawn(move || {
        tx.push(token(TokenKind::number(7.0))).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        tx.push(token(TokenKind::Newline)).unwrap();
    });

    assert_eq!(rx.recv().map(|t| t.kind), Some(TokenKind::number(7.0)));
    assert_eq!(rx.recv().map(|t| t.kind), Some(TokenKind::Newline));
    producer.join().unwrap();
}

#[test]
fn push_order_is_preserved_across_batches() {
    let (mut tx, mut rx) = token_channel(3, 8, |_| false);
    for i in 0..10 {
        tx.push(token(TokenKind::number(f64::from(i)))).unwrap();
    }
    tx.flush().unwrap();
    drop(tx);

    let mut seen = Vec::new();
    while let Some(t) = rx.recv() {
        seen.push(t.kind.number_value().unwrap());
    }
    assert_eq!(seen, (0..10).map(f64::from).collect::<Vec<_>>());
}

#[test]
fn push_after_consumer_drop_reports_disconnect() {
    let (mut tx, rx) = token_channel(1, 1, |_| false);
    drop(rx);
    assert_eq!(tx.push(token(TokenKind::Plus)), Err(Disconnected));
}
