use thiserror::Error;

/// Errors from signature decoding and the MAC primitive.
#[derive(Debug, Clone, Error)]
pub enum MacError {
    // ── Signature decoding ────────────────────────────────────────────
    #[error("invalid base64 signature: {0}")]
    InvalidBase64(String),
    #[error("hex signature has an odd number of digits ({0})")]
    OddHexLength(usize),

    // ── MAC primitive ─────────────────────────────────────────────────
    #[error("MAC key rejected: {0}")]
    KeyRejected(String),
}

/// Type alias for results that may return a [`MacError`].
pub type MacResult<T> = std::result::Result<T, MacError>;

/// Error returned by `FromStr` implementations on enum types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}
