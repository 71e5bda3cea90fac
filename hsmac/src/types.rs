use core::fmt;
use core::str::FromStr;

use crate::error::ParseError;

/**
    MAC algorithm selector. Names follow the JWS convention:
    HS256/HS384/HS512 are HMAC over SHA-256/384/512.
*/
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    #[default]
    Hs256,
    Hs384,
    Hs512,
}

impl Algorithm {
    /// Output length of the underlying hash, in bytes.
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Hs256 => 32,
            Self::Hs384 => 48,
            Self::Hs512 => 64,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        match name.len() {
            5 if name.eq_ignore_ascii_case("hs256") => Some(Self::Hs256),
            5 if name.eq_ignore_ascii_case("hs384") => Some(Self::Hs384),
            5 if name.eq_ignore_ascii_case("hs512") => Some(Self::Hs512),
            6 if name.eq_ignore_ascii_case("sha256") => Some(Self::Hs256),
            6 if name.eq_ignore_ascii_case("sha384") => Some(Self::Hs384),
            6 if name.eq_ignore_ascii_case("sha512") => Some(Self::Hs512),
            _ => None,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Hs256 => "HS256",
            Self::Hs384 => "HS384",
            Self::Hs512 => "HS512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseError {
            kind: "algorithm",
            value: s.to_owned(),
        })
    }
}

/**
    Textual representation of raw signature bytes.
*/
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Encoding {
    /// Lowercase hex, two digits per byte.
    #[default]
    Hex,
    /// Standard base64 alphabet, with padding.
    Base64,
}

impl Encoding {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        match name.len() {
            3 if name.eq_ignore_ascii_case("hex") => Some(Self::Hex),
            3 if name.eq_ignore_ascii_case("b64") => Some(Self::Base64),
            6 if name.eq_ignore_ascii_case("base64") => Some(Self::Base64),
            _ => None,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for Encoding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseError {
            kind: "encoding",
            value: s.to_owned(),
        })
    }
}
