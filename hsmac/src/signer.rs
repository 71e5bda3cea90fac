use core::fmt;

use crate::crypto;
use crate::encoding::{decode_signature, encode};
use crate::error::MacResult;
use crate::types::{Algorithm, Encoding};

/**
    Outcome of checking a received signature.

    Decode and primitive failures are reported separately as errors, so a
    caller can distinguish "the signature does not match" from "the
    received signature could not even be decoded".
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Recomputed MAC matches the received signature byte for byte.
    Valid,
    /// Recomputed MAC differs from the received signature.
    Invalid,
}

impl Verdict {
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

/**
    One sign-or-verify operation: payload text, shared secret, and the
    algorithm/encoding selectors. Built fresh per operation; nothing is
    retained between calls and nothing is mutated.
*/
#[derive(Debug, Clone)]
pub struct SigningRequest {
    payload: String,
    secret: String,
    pub algorithm: Algorithm,
    pub encoding: Encoding,
}

impl SigningRequest {
    /**
        Build a request from raw field values.

        Returns `None` when the payload or the secret trims to empty:
        there is nothing to compute, which is a neutral state rather than
        an error. Trimming only gates emptiness; the raw text is what
        gets signed, as its UTF-8 bytes.
    */
    pub fn new(
        payload: impl Into<String>,
        secret: impl Into<String>,
        algorithm: Algorithm,
        encoding: Encoding,
    ) -> Option<Self> {
        let payload = payload.into();
        let secret = secret.into();
        if payload.trim().is_empty() || secret.trim().is_empty() {
            return None;
        }
        Some(Self {
            payload,
            secret,
            algorithm,
            encoding,
        })
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// MAC over the payload keyed by the secret, encoded for display.
    pub fn generate(&self) -> MacResult<String> {
        let raw = crypto::compute(
            self.algorithm,
            self.secret.as_bytes(),
            self.payload.as_bytes(),
        )?;
        Ok(encode(self.encoding, &raw))
    }

    /**
        Check a received signature against this request.

        The received text is decoded per the request's encoding, then the
        MAC is recomputed and compared in constant time. `Ok(Invalid)` is
        a definite mismatch; decode failures come back as errors so the
        caller can present them as a distinct warning state.
    */
    pub fn verify(&self, received: &str) -> MacResult<Verdict> {
        let expected = decode_signature(self.encoding, received)?;
        let matches = crypto::verify(
            self.algorithm,
            self.secret.as_bytes(),
            self.payload.as_bytes(),
            &expected,
        )?;
        Ok(if matches {
            Verdict::Valid
        } else {
            Verdict::Invalid
        })
    }
}
