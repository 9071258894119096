use super::*;

#[test]
fn test_every_keyword_resolves() {
    for &keyword in Keyword::ALL {
        assert_eq!(lookup(keyword.as_str()), Some(Lexeme::from(keyword)));
    }
}

#[test]
fn test_other_sets() {
    assert_eq!(lookup("true"), Some(Lexeme::from(BooleanLiteral::True)));
    assert_eq!(lookup("override"), Some(Lexeme::from(FunctionModifier::Override)));
    assert_eq!(lookup("inout"), Some(Lexeme::from(ParameterModifier::InOut)));
    assert_eq!(lookup("nullptr"), Some(Lexeme::from(PointerLiteral::Nullptr)));
}

#[test]
fn test_near_misses_are_identifiers() {
    assert_eq!(lookup("returning"), None);
    assert_eq!(lookup("retur"), None);
    assert_eq!(lookup("Int"), None);
    assert_eq!(lookup("true_"), None);
    assert_eq!(lookup(""), None);
}
