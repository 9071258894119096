//! Keyword-like word resolution.
//!
//! A word is tested against each closed set in a fixed order: boolean
//! literals, function modifiers, keywords, parameter modifiers, pointer
//! literals. Every table is sorted, so each probe is a binary search. The
//! caller passes the complete identifier run, so `returning` never matches
//! `return`.

use cpps_ir::{
    BooleanLiteral, FunctionModifier, Keyword, Lexeme, LexemeValue, ParameterModifier,
    PointerLiteral,
};

fn find<T: LexemeValue>(word: &str) -> Option<Lexeme> {
    let index = T::STRINGS.binary_search(&word).ok()?;
    T::from_index(u8::try_from(index).ok()?).map(Lexeme::with_value)
}

/// Lexeme for a reserved word, or `None` for a plain identifier.
pub(crate) fn lookup(word: &str) -> Option<Lexeme> {
    find::<BooleanLiteral>(word)
        .or_else(|| find::<FunctionModifier>(word))
        .or_else(|| find::<Keyword>(word))
        .or_else(|| find::<ParameterModifier>(word))
        .or_else(|| find::<PointerLiteral>(word))
}

#[cfg(test)]
mod tests;
