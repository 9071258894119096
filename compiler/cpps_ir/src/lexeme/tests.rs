use super::*;

fn assert_sorted<T: LexemeValue>() {
    for pair in T::STRINGS.windows(2) {
        assert!(pair[0] < pair[1], "{} must sort before {}", pair[0], pair[1]);
    }
}

// === Tables ===

#[test]
fn test_keyword_like_tables_are_sorted() {
    assert_sorted::<Keyword>();
    assert_sorted::<ParameterModifier>();
    assert_sorted::<FunctionModifier>();
    assert_sorted::<BooleanLiteral>();
    assert_sorted::<PointerLiteral>();
}

#[test]
fn test_table_sizes() {
    assert_eq!(Punctuator::STRINGS.len(), 52);
    assert_eq!(Punctuator::ALL.len(), 52);
    assert_eq!(Keyword::STRINGS.len(), 81);
    assert_eq!(ParameterModifier::STRINGS.len(), 6);
    assert_eq!(FunctionModifier::STRINGS.len(), 4);
}

#[test]
fn test_spelling() {
    assert_eq!(Punctuator::Spaceship.as_str(), "<=>");
    assert_eq!(Punctuator::LogicalAndEqual.as_str(), "&&=");
    assert_eq!(Keyword::Throws.as_str(), "throws");
    assert_eq!(Keyword::Char8.as_str(), "char8_t");
    assert_eq!(ParameterModifier::InOut.as_str(), "inout");
}

// === Packing ===

#[test]
fn test_payload_round_trip() {
    let lexeme = Lexeme::from(Keyword::Return);
    assert!(lexeme.is::<Keyword>());
    assert!(!lexeme.is::<Punctuator>());
    assert_eq!(lexeme.get::<Keyword>(), Some(Keyword::Return));
    assert_eq!(lexeme.get::<Punctuator>(), None);
    assert_eq!(lexeme.kind(), Some(LexemeKind::Keyword));
}

#[test]
fn test_equal_to_payload() {
    let lexeme = Lexeme::from(Punctuator::Semicolon);
    assert!(lexeme == Punctuator::Semicolon);
    assert!(lexeme != Punctuator::Colon);
    assert!(Lexeme::from(Keyword::Do) != Punctuator::Ampersand);
}

#[test]
fn test_same_index_different_kind() {
    // Index 0 in both tables.
    assert_ne!(Lexeme::from(Punctuator::Ampersand), Lexeme::from(Keyword::Alignas));
}

#[test]
fn test_invalid_lexeme() {
    let lexeme = Lexeme::default();
    assert!(!lexeme.is_valid());
    assert_eq!(lexeme.kind(), None);
    assert_eq!(lexeme.get::<Punctuator>(), None);
    assert_eq!(lexeme.bits(), 0xFFFF);
}

#[test]
fn test_every_punctuator_survives_packing() {
    for &p in Punctuator::ALL {
        assert_eq!(Lexeme::from(p).get::<Punctuator>(), Some(p));
    }
}

#[test]
fn test_literal_kinds() {
    assert!(Lexeme::of_kind(LexemeKind::StringLiteral).is_literal());
    assert!(Lexeme::from(BooleanLiteral::True).is_literal());
    assert!(!Lexeme::IDENTIFIER.is_literal());
    assert!(!Lexeme::from(Keyword::Int).is_literal());
}

// === Display ===

#[test]
fn test_display() {
    assert_eq!(Lexeme::from(Punctuator::Arrow).to_string(), "->");
    assert_eq!(Lexeme::from(Keyword::Int).to_string(), "int");
    assert_eq!(Lexeme::from(PointerLiteral::Nullptr).to_string(), "nullptr");
    assert_eq!(Lexeme::IDENTIFIER.to_string(), "Identifier");
    assert_eq!(
        Lexeme::of_kind(LexemeKind::DecimalLiteral).to_string(),
        "DecimalLiteral"
    );
    assert_eq!(Lexeme::INVALID.to_string(), "invalid");
}

#[test]
fn test_debug_names_kind_for_payloads() {
    assert_eq!(format!("{:?}", Lexeme::from(Keyword::If)), "Keyword(if)");
    assert_eq!(format!("{:?}", Lexeme::IDENTIFIER), "Identifier");
}
