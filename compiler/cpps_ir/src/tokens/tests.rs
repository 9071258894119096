use super::*;
use crate::{Lexeme, SourceLocation};

fn stream(lines: &[(u32, usize)]) -> Tokens<'static> {
    let mut tokens = Vec::new();
    for &(line, count) in lines {
        for column in 0..count {
            tokens.push(Token::new(
                Lexeme::IDENTIFIER,
                SourceLocation::new(line, u32::try_from(column).unwrap_or(0)),
                "x",
            ));
        }
    }
    Tokens::new(tokens, Vec::new())
}

#[test]
fn test_empty() {
    let tokens = Tokens::default();
    assert!(tokens.is_empty());
    assert_eq!(tokens.len(), 0);
    assert_eq!(tokens.lines(), 0);
    assert!(!tokens.exists(0));
    assert!(tokens.on(0).is_empty());
    assert!(!tokens.at(0).is_valid());
}

#[test]
fn test_sparse_lines() {
    let tokens = stream(&[(0, 3), (2, 3), (3, 2), (4, 1), (6, 1)]);
    assert_eq!(tokens.len(), 10);
    assert_eq!(tokens.lines(), 7);

    assert!(tokens.exists(0));
    assert!(!tokens.exists(1));
    assert!(!tokens.exists(5));
    assert!(!tokens.exists(100));

    assert_eq!(tokens.len_on(0), 3);
    assert_eq!(tokens.len_on(1), 0);
    assert_eq!(tokens.len_on(3), 2);
    assert_eq!(tokens.len_on(6), 1);
}

#[test]
fn test_on_line_returns_that_line() {
    let tokens = stream(&[(0, 3), (2, 3), (3, 2)]);
    let line = tokens.on(2);
    assert_eq!(line.len(), 3);
    assert!(line.iter().all(|t| t.location.line == 2));
    assert_eq!(tokens.at_line(3, 1).map(|t| t.location), Some(SourceLocation::new(3, 1)));
    assert!(tokens.at_line(3, 2).is_none());
}

#[test]
fn test_index_by_id() {
    let tokens = stream(&[(1, 2)]);
    assert_eq!(tokens[TokenId::new(1)].location, SourceLocation::new(1, 1));
    assert_eq!(tokens[0].location, SourceLocation::new(1, 0));
    assert_eq!(tokens.lines(), 2);
}

#[test]
fn test_token_id_index() {
    assert_eq!(TokenId::new(42).index(), 42);
}

#[cfg(target_pointer_width = "64")]
#[test]
#[should_panic(expected = "exceeds u32::MAX")]
fn test_token_id_overflow_panics() {
    let _ = TokenId::new(u32::MAX as usize + 1);
}
