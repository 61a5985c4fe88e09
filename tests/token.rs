use rocks_core::literal::Literal;
use rocks_core::token::{Token, Type};

#[test]
fn new_token_carries_its_fields() {
    let token = Token::new(Type::LeftParen, "(".to_string(), None, 3);

    assert_eq!(token.kind, Type::LeftParen);
    assert_eq!(token.lexeme, "(");
    assert_eq!(token.literal, None);
    assert_eq!(token.line, 3);
}

#[test]
fn a_number_token_carries_its_literal_value() {
    let token = Token::new(Type::Number, "1".to_string(), Some(Literal::Number(1.0)), 1);

    assert_eq!(token.literal, Some(Literal::Number(1.0)));
}

#[test]
fn display_shows_the_kind_and_lexeme() {
    let token = Token::new(Type::Semicolon, ";".to_string(), None, 1);

    assert_eq!(format!("{token}"), "Semicolon ';'");
}
