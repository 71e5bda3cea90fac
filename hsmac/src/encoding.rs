use crate::error::{MacError, MacResult};
use crate::types::Encoding;

/// Encode raw signature bytes for display.
pub fn encode(encoding: Encoding, bytes: &[u8]) -> String {
    match encoding {
        Encoding::Hex => hex::encode(bytes),
        Encoding::Base64 => data_encoding::BASE64.encode(bytes),
    }
}

/**
    Decode a received signature back into raw bytes.

    Hex input is scrubbed first: anything that is not a hex digit
    (whitespace, colons, other punctuation) is dropped, and the remaining
    digits are decoded in pairs. An odd number of digits is a decode error,
    not a silent truncation. A scrub that leaves nothing decodes to zero
    bytes, and the comparison downstream then simply fails.

    Base64 input is decoded strictly after trimming ASCII whitespace;
    malformed input is a decode error.
*/
pub fn decode_signature(encoding: Encoding, text: &str) -> MacResult<Vec<u8>> {
    match encoding {
        Encoding::Hex => decode_hex_lenient(text),
        Encoding::Base64 => data_encoding::BASE64
            .decode(text.trim().as_bytes())
            .map_err(|e| MacError::InvalidBase64(e.to_string())),
    }
}

fn decode_hex_lenient(text: &str) -> MacResult<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter_map(hex_digit).collect();
    if digits.len() % 2 != 0 {
        return Err(MacError::OddHexLength(digits.len()));
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Decode a single ASCII hex digit to its 4-bit value.
/// Returns `None` for non-hex characters.
const fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn hex_encoding_is_lowercase_and_zero_padded() {
        assert_eq!(encode(Encoding::Hex, &hex!("00ab0f")), "00ab0f");
        assert_eq!(encode(Encoding::Hex, &[]), "");
    }

    #[test]
    fn base64_encoding_is_standard_with_padding() {
        assert_eq!(encode(Encoding::Base64, b"hi"), "aGk=");
        assert_eq!(encode(Encoding::Base64, &hex!("fbff")), "+/8=");
    }

    #[test]
    fn both_encodings_decode_to_the_same_bytes() {
        let raw = hex!("0123456789abcdef00ff");
        let as_hex = encode(Encoding::Hex, &raw);
        let as_b64 = encode(Encoding::Base64, &raw);
        assert_eq!(decode_signature(Encoding::Hex, &as_hex).unwrap(), raw);
        assert_eq!(decode_signature(Encoding::Base64, &as_b64).unwrap(), raw);
    }

    #[test]
    fn hex_decoding_strips_non_hex_characters() {
        let decoded = decode_signature(Encoding::Hex, " de:ad BE-EF\n").unwrap();
        assert_eq!(decoded, hex!("deadbeef"));
    }

    #[test]
    fn hex_decoding_of_pure_garbage_yields_zero_bytes() {
        // No hex digits survive the scrub; verification will just mismatch.
        let decoded = decode_signature(Encoding::Hex, "zz!!").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn odd_hex_digit_count_is_an_error() {
        let err = decode_signature(Encoding::Hex, "abc").unwrap_err();
        assert!(matches!(err, MacError::OddHexLength(3)));
    }

    #[test]
    fn malformed_base64_is_an_error() {
        let err = decode_signature(Encoding::Base64, "not*base64").unwrap_err();
        assert!(matches!(err, MacError::InvalidBase64(_)));
    }

    #[test]
    fn base64_tolerates_surrounding_whitespace() {
        assert_eq!(
            decode_signature(Encoding::Base64, " aGk=\n").unwrap(),
            b"hi"
        );
    }
}
