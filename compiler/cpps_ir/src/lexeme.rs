//! Packed lexemes.
//!
//! A [`Lexeme`] is one `u16`: the low byte is the [`LexemeKind`] and the high
//! byte the in-kind payload (which punctuator, which keyword, ...). Kinds
//! without a payload (literals, identifiers) store zero there. `0xFFFF` is the
//! invalid lexeme and never collides with a real kind.
//!
//! Payload enums carry a static table of their source spellings. The
//! keyword-like tables are sorted so the lexer can binary-search them.

use std::fmt;

/// Grammatical category of a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LexemeKind {
    BinaryLiteral,
    BooleanLiteral,
    CharacterLiteral,
    DecimalLiteral,
    FloatingLiteral,
    FunctionModifier,
    HexadecimalLiteral,
    Identifier,
    Keyword,
    ParameterModifier,
    PointerLiteral,
    Punctuator,
    StringLiteral,
}

impl LexemeKind {
    const ALL: [LexemeKind; 13] = [
        LexemeKind::BinaryLiteral,
        LexemeKind::BooleanLiteral,
        LexemeKind::CharacterLiteral,
        LexemeKind::DecimalLiteral,
        LexemeKind::FloatingLiteral,
        LexemeKind::FunctionModifier,
        LexemeKind::HexadecimalLiteral,
        LexemeKind::Identifier,
        LexemeKind::Keyword,
        LexemeKind::ParameterModifier,
        LexemeKind::PointerLiteral,
        LexemeKind::Punctuator,
        LexemeKind::StringLiteral,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            LexemeKind::BinaryLiteral => "BinaryLiteral",
            LexemeKind::BooleanLiteral => "BooleanLiteral",
            LexemeKind::CharacterLiteral => "CharacterLiteral",
            LexemeKind::DecimalLiteral => "DecimalLiteral",
            LexemeKind::FloatingLiteral => "FloatingLiteral",
            LexemeKind::FunctionModifier => "FunctionModifier",
            LexemeKind::HexadecimalLiteral => "HexadecimalLiteral",
            LexemeKind::Identifier => "Identifier",
            LexemeKind::Keyword => "Keyword",
            LexemeKind::ParameterModifier => "ParameterModifier",
            LexemeKind::PointerLiteral => "PointerLiteral",
            LexemeKind::Punctuator => "Punctuator",
            LexemeKind::StringLiteral => "StringLiteral",
        }
    }

    /// Literal kinds, including the keyword-spelled boolean and pointer
    /// literals.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            LexemeKind::BinaryLiteral
                | LexemeKind::BooleanLiteral
                | LexemeKind::CharacterLiteral
                | LexemeKind::DecimalLiteral
                | LexemeKind::FloatingLiteral
                | LexemeKind::HexadecimalLiteral
                | LexemeKind::PointerLiteral
                | LexemeKind::StringLiteral
        )
    }
}

impl fmt::Display for LexemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A payload enum stored in the high byte of a [`Lexeme`].
pub trait LexemeValue: Copy + Sized {
    /// Kind written to the low byte.
    const KIND: LexemeKind;

    /// Source spellings, indexed by discriminant.
    const STRINGS: &'static [&'static str];

    fn index(self) -> u8;

    fn from_index(index: u8) -> Option<Self>;

    fn as_str(self) -> &'static str {
        Self::STRINGS[usize::from(self.index())]
    }
}

macro_rules! lexeme_values {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:ident {
            $($variant:ident = $text:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl LexemeValue for $name {
            const KIND: LexemeKind = LexemeKind::$kind;
            const STRINGS: &'static [&'static str] = &[$($text),*];

            #[inline]
            fn index(self) -> u8 {
                self as u8
            }

            #[inline]
            fn from_index(index: u8) -> Option<Self> {
                Self::ALL.get(usize::from(index)).copied()
            }
        }

        impl From<$name> for Lexeme {
            #[inline]
            fn from(value: $name) -> Lexeme {
                Lexeme::with_value(value)
            }
        }

        impl PartialEq<$name> for Lexeme {
            #[inline]
            fn eq(&self, other: &$name) -> bool {
                *self == Lexeme::from(*other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

lexeme_values! {
    /// Operators and separators, ordered by name.
    Punctuator => Punctuator {
        Ampersand = "&",
        AmpersandEqual = "&=",
        Arrow = "->",
        Assignment = "=",
        Caret = "^",
        CaretEqual = "^=",
        CloseBrace = "}",
        CloseBracket = "]",
        CloseParenthesis = ")",
        Colon = ":",
        Comma = ",",
        CompareEqual = "==",
        CompareNotEqual = "!=",
        Dollar = "$",
        Dot = ".",
        DoubleColon = "::",
        Ellipsis = "...",
        Greater = ">",
        GreaterEqual = ">=",
        LeftShift = "<<",
        LeftShiftEqual = "<<=",
        Less = "<",
        LessEqual = "<=",
        LogicalAnd = "&&",
        LogicalAndEqual = "&&=",
        LogicalOr = "||",
        LogicalOrEqual = "||=",
        Minus = "-",
        MinusEqual = "-=",
        MinusMinus = "--",
        Modulo = "%",
        ModuloEqual = "%=",
        Not = "!",
        Multiply = "*",
        MultiplyEqual = "*=",
        OpenBrace = "{",
        OpenBracket = "[",
        OpenParenthesis = "(",
        Pipe = "|",
        PipeEqual = "|=",
        Plus = "+",
        PlusEqual = "+=",
        PlusPlus = "++",
        QuestionMark = "?",
        RightShift = ">>",
        RightShiftEqual = ">>=",
        Semicolon = ";",
        Slash = "/",
        SlashEqual = "/=",
        Spaceship = "<=>",
        Tilde = "~",
        TildeEqual = "~=",
    }
}

lexeme_values! {
    /// Reserved words. Sorted by spelling.
    Keyword => Keyword {
        Alignas = "alignas",
        Alignof = "alignof",
        As = "as",
        Asm = "asm",
        Auto = "auto",
        Bool = "bool",
        Break = "break",
        Case = "case",
        Catch = "catch",
        Char = "char",
        Char16 = "char16_t",
        Char32 = "char32_t",
        Char8 = "char8_t",
        Class = "class",
        CoAwait = "co_await",
        CoReturn = "co_return",
        CoYield = "co_yield",
        Concept = "concept",
        Const = "const",
        ConstCast = "const_cast",
        Consteval = "consteval",
        Constexpr = "constexpr",
        Constinit = "constinit",
        Continue = "continue",
        Decltype = "decltype",
        Default = "default",
        Do = "do",
        Double = "double",
        DynamicCast = "dynamic_cast",
        Else = "else",
        Enum = "enum",
        Explicit = "explicit",
        Export = "export",
        Extern = "extern",
        Float = "float",
        For = "for",
        Friend = "friend",
        Goto = "goto",
        If = "if",
        Import = "import",
        Inline = "inline",
        Int = "int",
        Is = "is",
        Long = "long",
        Module = "module",
        Mutable = "mutable",
        Namespace = "namespace",
        New = "new",
        Noexcept = "noexcept",
        Not = "not",
        Operator = "operator",
        Private = "private",
        Protected = "protected",
        Public = "public",
        Register = "register",
        ReinterpretCast = "reinterpret_cast",
        Requires = "requires",
        Return = "return",
        Short = "short",
        Signed = "signed",
        Sizeof = "sizeof",
        Static = "static",
        StaticAssert = "static_assert",
        StaticCast = "static_cast",
        Struct = "struct",
        Switch = "switch",
        Template = "template",
        This = "this",
        ThreadLocal = "thread_local",
        Throw = "throw",
        Throws = "throws",
        Try = "try",
        Typedef = "typedef",
        Typeid = "typeid",
        Typename = "typename",
        Unsigned = "unsigned",
        Using = "using",
        Void = "void",
        Volatile = "volatile",
        WcharT = "wchar_t",
        While = "while",
    }
}

lexeme_values! {
    /// Parameter passing direction. Sorted by spelling.
    ParameterModifier => ParameterModifier {
        Copy = "copy",
        Forward = "forward",
        In = "in",
        InOut = "inout",
        Move = "move",
        Out = "out",
    }
}

lexeme_values! {
    /// Function virtuality modifiers. Sorted by spelling.
    FunctionModifier => FunctionModifier {
        Final = "final",
        Implicit = "implicit",
        Override = "override",
        Virtual = "virtual",
    }
}

lexeme_values! {
    BooleanLiteral => BooleanLiteral {
        False = "false",
        True = "true",
    }
}

lexeme_values! {
    PointerLiteral => PointerLiteral {
        Nullptr = "nullptr",
    }
}

/// Compact `(kind, payload)` tag of a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lexeme(u16);

crate::static_assert_size!(Lexeme, 2);

impl Lexeme {
    /// The empty lexeme; no kind, no payload.
    pub const INVALID: Lexeme = Lexeme(0xFFFF);

    pub const IDENTIFIER: Lexeme = Lexeme::of_kind(LexemeKind::Identifier);

    /// A payload-free lexeme of `kind`.
    #[inline]
    pub const fn of_kind(kind: LexemeKind) -> Self {
        Lexeme(kind as u16)
    }

    #[inline]
    pub fn with_value<T: LexemeValue>(value: T) -> Self {
        Lexeme(T::KIND as u16 | (u16::from(value.index()) << 8))
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }

    /// Kind, or `None` for the invalid lexeme.
    #[inline]
    pub fn kind(self) -> Option<LexemeKind> {
        if self.is_valid() {
            LexemeKind::ALL.get(usize::from(self.0 & 0xFF)).copied()
        } else {
            None
        }
    }

    #[inline]
    pub fn is_kind(self, kind: LexemeKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Whether this lexeme holds a payload of type `T`.
    #[inline]
    pub fn is<T: LexemeValue>(self) -> bool {
        self.is_kind(T::KIND)
    }

    /// Payload as `T`, if this lexeme is of `T`'s kind.
    #[inline]
    pub fn get<T: LexemeValue>(self) -> Option<T> {
        if self.is::<T>() {
            T::from_index((self.0 >> 8) as u8)
        } else {
            None
        }
    }

    /// Raw packed word.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        self.kind().is_some_and(LexemeKind::is_literal)
    }

    #[inline]
    pub fn is_identifier(self) -> bool {
        self.is_kind(LexemeKind::Identifier)
    }
}

impl Default for Lexeme {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<LexemeKind> for Lexeme {
    fn from(kind: LexemeKind) -> Self {
        Lexeme::of_kind(kind)
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(kind) = self.kind() else {
            return f.write_str("invalid");
        };
        let text = match kind {
            LexemeKind::BooleanLiteral => self.get::<BooleanLiteral>().map(LexemeValue::as_str),
            LexemeKind::FunctionModifier => {
                self.get::<FunctionModifier>().map(LexemeValue::as_str)
            }
            LexemeKind::Keyword => self.get::<Keyword>().map(LexemeValue::as_str),
            LexemeKind::ParameterModifier => {
                self.get::<ParameterModifier>().map(LexemeValue::as_str)
            }
            LexemeKind::PointerLiteral => self.get::<PointerLiteral>().map(LexemeValue::as_str),
            LexemeKind::Punctuator => self.get::<Punctuator>().map(LexemeValue::as_str),
            _ => Some(kind.name()),
        };
        f.write_str(text.unwrap_or("invalid"))
    }
}

impl fmt::Debug for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) if kind.name() != self.to_string() => write!(f, "{kind}({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

#[cfg(test)]
mod tests;
