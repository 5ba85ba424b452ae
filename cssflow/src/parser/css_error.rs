use thiserror::Error;

/// Why a parse failed. `Display` is the bare message without location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid color")]
    InvalidColor,
    #[error("token too long")]
    TokenTooLong,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("expected keyword in property")]
    PropertyKeywordExpected,
    #[error("expected value")]
    ValueExpected,
    #[error("expected selector")]
    SelectorExpected,
    #[error("expected attribute value")]
    AttributeValueExpected,
    #[error("expected condition")]
    ConditionExpected,
    #[error("expected keyword after ':'")]
    PseudoKeywordExpected,
    #[error("expected keyword after '.'")]
    ClassKeywordExpected,
    #[error("expected keyword after '#'")]
    IdKeywordExpected,
    #[error("expected keyword after '['")]
    AttributeKeywordExpected,
}

/// Fatal diagnostic for a failed parse. The first error aborts the whole
/// parse; there is no skip-to-next-rule recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("css syntax error: {kind} ({file}:{line})")]
pub struct CssError {
    pub kind: SyntaxError,
    pub file: String,
    pub line: u32,
}
