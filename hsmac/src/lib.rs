#![allow(clippy::doc_overindented_list_items)]

mod crypto;
mod encoding;
mod error;
mod signer;
mod types;

pub use self::encoding::{decode_signature, encode};
pub use self::error::{MacError, MacResult, ParseError};
pub use self::signer::{SigningRequest, Verdict};
pub use self::types::{Algorithm, Encoding};
