//! Binary operator precedence.
//!
//! Thirteen left-associative levels, loosest first. The parser climbs this
//! table with a single loop instead of one function per level.

use std::fmt;

use cpps_ir::{Keyword, Lexeme, Punctuator};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Precedence {
    Assignment,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Compare,
    Shift,
    Additive,
    Multiplicative,
    IsAs,
}

enum Operators {
    Punctuators(&'static [Punctuator]),
    Keywords(&'static [Keyword]),
}

struct Level {
    precedence: Precedence,
    operators: Operators,
}

/// Indexed by `Precedence as usize`.
static LEVELS: [Level; 13] = [
    Level {
        precedence: Precedence::Assignment,
        operators: Operators::Punctuators(&[
            Punctuator::AmpersandEqual,
            Punctuator::Assignment,
            Punctuator::CaretEqual,
            Punctuator::LeftShiftEqual,
            Punctuator::MinusEqual,
            Punctuator::ModuloEqual,
            Punctuator::MultiplyEqual,
            Punctuator::PipeEqual,
            Punctuator::PlusEqual,
            Punctuator::RightShiftEqual,
            Punctuator::SlashEqual,
        ]),
    },
    Level {
        precedence: Precedence::LogicalOr,
        operators: Operators::Punctuators(&[Punctuator::LogicalOr]),
    },
    Level {
        precedence: Precedence::LogicalAnd,
        operators: Operators::Punctuators(&[Punctuator::LogicalAnd]),
    },
    Level {
        precedence: Precedence::BitOr,
        operators: Operators::Punctuators(&[Punctuator::Pipe]),
    },
    Level {
        precedence: Precedence::BitXor,
        operators: Operators::Punctuators(&[Punctuator::Caret]),
    },
    Level {
        precedence: Precedence::BitAnd,
        operators: Operators::Punctuators(&[Punctuator::Ampersand]),
    },
    Level {
        precedence: Precedence::Equality,
        operators: Operators::Punctuators(&[
            Punctuator::CompareEqual,
            Punctuator::CompareNotEqual,
        ]),
    },
    Level {
        precedence: Precedence::Relational,
        operators: Operators::Punctuators(&[
            Punctuator::Less,
            Punctuator::LessEqual,
            Punctuator::Greater,
            Punctuator::GreaterEqual,
        ]),
    },
    Level {
        precedence: Precedence::Compare,
        operators: Operators::Punctuators(&[Punctuator::Spaceship]),
    },
    Level {
        precedence: Precedence::Shift,
        operators: Operators::Punctuators(&[Punctuator::LeftShift, Punctuator::RightShift]),
    },
    Level {
        precedence: Precedence::Additive,
        operators: Operators::Punctuators(&[Punctuator::Plus, Punctuator::Minus]),
    },
    Level {
        precedence: Precedence::Multiplicative,
        operators: Operators::Punctuators(&[
            Punctuator::Multiply,
            Punctuator::Slash,
            Punctuator::Modulo,
        ]),
    },
    Level {
        precedence: Precedence::IsAs,
        operators: Operators::Keywords(&[Keyword::As, Keyword::Is]),
    },
];

impl Precedence {
    pub const ALL: [Precedence; 13] = [
        Precedence::Assignment,
        Precedence::LogicalOr,
        Precedence::LogicalAnd,
        Precedence::BitOr,
        Precedence::BitXor,
        Precedence::BitAnd,
        Precedence::Equality,
        Precedence::Relational,
        Precedence::Compare,
        Precedence::Shift,
        Precedence::Additive,
        Precedence::Multiplicative,
        Precedence::IsAs,
    ];

    /// Level of the binary operator `lexeme`, if it is one.
    ///
    /// With `allow_relational` unset, `<`, `>`, `<=` and `>=` are not
    /// operators, leaving them to a caller that reads `<` as an opening
    /// bracket.
    pub fn of(lexeme: Lexeme, allow_relational: bool) -> Option<Precedence> {
        LEVELS
            .iter()
            .find(|level| level.matches(lexeme))
            .map(|level| level.precedence)
            .filter(|&precedence| allow_relational || precedence != Precedence::Relational)
    }

    /// The next tighter level, `None` for the tightest.
    pub fn tighter(self) -> Option<Precedence> {
        Self::ALL.get(self as usize + 1).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Precedence::Assignment => "assignment",
            Precedence::LogicalOr => "logical-or",
            Precedence::LogicalAnd => "logical-and",
            Precedence::BitOr => "bit-or",
            Precedence::BitXor => "bit-xor",
            Precedence::BitAnd => "bit-and",
            Precedence::Equality => "equality",
            Precedence::Relational => "relational",
            Precedence::Compare => "compare",
            Precedence::Shift => "shift",
            Precedence::Additive => "additive",
            Precedence::Multiplicative => "multiplicative",
            Precedence::IsAs => "is-as",
        }
    }
}

impl Level {
    fn matches(&self, lexeme: Lexeme) -> bool {
        match self.operators {
            Operators::Punctuators(operators) => lexeme
                .get::<Punctuator>()
                .is_some_and(|punctuator| operators.contains(&punctuator)),
            Operators::Keywords(operators) => lexeme
                .get::<Keyword>()
                .is_some_and(|keyword| operators.contains(&keyword)),
        }
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
