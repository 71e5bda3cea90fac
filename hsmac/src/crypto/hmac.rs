use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::error::{MacError, MacResult};
use crate::types::Algorithm;

/**
    Compute the MAC over `payload` keyed by `secret`.

    HMAC accepts keys of any length (short keys are padded, long keys are
    hashed down by the construction itself), so key setup only fails if
    the underlying crate rejects it; such a failure is surfaced, never
    swallowed.
*/
pub fn compute(algorithm: Algorithm, secret: &[u8], payload: &[u8]) -> MacResult<Vec<u8>> {
    match algorithm {
        Algorithm::Hs256 => mac_bytes::<Hmac<Sha256>>(secret, payload),
        Algorithm::Hs384 => mac_bytes::<Hmac<Sha384>>(secret, payload),
        Algorithm::Hs512 => mac_bytes::<Hmac<Sha512>>(secret, payload),
    }
}

/**
    Recompute the MAC and compare it against `expected`.

    Returns `Ok(true)` only on an exact byte-for-byte match. The
    comparison is `Mac::verify_slice`, whose running time does not depend
    on where the two sequences first differ.
*/
pub fn verify(
    algorithm: Algorithm,
    secret: &[u8],
    payload: &[u8],
    expected: &[u8],
) -> MacResult<bool> {
    match algorithm {
        Algorithm::Hs256 => mac_matches::<Hmac<Sha256>>(secret, payload, expected),
        Algorithm::Hs384 => mac_matches::<Hmac<Sha384>>(secret, payload, expected),
        Algorithm::Hs512 => mac_matches::<Hmac<Sha512>>(secret, payload, expected),
    }
}

fn mac_bytes<M: Mac + KeyInit>(secret: &[u8], payload: &[u8]) -> MacResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| MacError::KeyRejected(e.to_string()))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn mac_matches<M: Mac + KeyInit>(secret: &[u8], payload: &[u8], expected: &[u8]) -> MacResult<bool> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| MacError::KeyRejected(e.to_string()))?;
    mac.update(payload);
    Ok(mac.verify_slice(expected).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 4231 test case 1: key = 0x0b * 20, data = "Hi There".
    const TC1_KEY: [u8; 20] = [0x0b; 20];
    const TC1_DATA: &[u8] = b"Hi There";

    // RFC 4231 test case 2: key = "Jefe", data = "what do ya want for nothing?".
    const TC2_KEY: &[u8] = b"Jefe";
    const TC2_DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn rfc4231_case_1() {
        assert_eq!(
            compute(Algorithm::Hs256, &TC1_KEY, TC1_DATA).unwrap(),
            hex!("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")
        );
        assert_eq!(
            compute(Algorithm::Hs384, &TC1_KEY, TC1_DATA).unwrap(),
            hex!(
                "afd03944d84895626b0825f4ab46907f15f9dadbe4101ec682aa034c7cebc59c"
                "faea9ea9076ede7f4af152e8b2fa9cb6"
            )
        );
        assert_eq!(
            compute(Algorithm::Hs512, &TC1_KEY, TC1_DATA).unwrap(),
            hex!(
                "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde"
                "daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
            )
        );
    }

    #[test]
    fn rfc4231_case_2() {
        assert_eq!(
            compute(Algorithm::Hs256, TC2_KEY, TC2_DATA).unwrap(),
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
        assert_eq!(
            compute(Algorithm::Hs384, TC2_KEY, TC2_DATA).unwrap(),
            hex!(
                "af45d2e376484031617f78d2b58a6b1b9c7ef464f5a01b47e42ec3736322445e"
                "8e2240ca5e69e2c78b3239ecfab21649"
            )
        );
        assert_eq!(
            compute(Algorithm::Hs512, TC2_KEY, TC2_DATA).unwrap(),
            hex!(
                "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554"
                "9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
            )
        );
    }

    #[test]
    fn output_lengths_match_the_hash_width() {
        for alg in [Algorithm::Hs256, Algorithm::Hs384, Algorithm::Hs512] {
            let tag = compute(alg, b"key", b"msg").unwrap();
            assert_eq!(tag.len(), alg.digest_len());
        }
    }

    #[test]
    fn verify_accepts_the_computed_tag() {
        let tag = compute(Algorithm::Hs256, TC2_KEY, TC2_DATA).unwrap();
        assert!(verify(Algorithm::Hs256, TC2_KEY, TC2_DATA, &tag).unwrap());
    }

    #[test]
    fn verify_rejects_a_wrong_tag() {
        let mut tag = compute(Algorithm::Hs256, TC2_KEY, TC2_DATA).unwrap();
        tag[0] ^= 0x01;
        assert!(!verify(Algorithm::Hs256, TC2_KEY, TC2_DATA, &tag).unwrap());
    }

    #[test]
    fn verify_rejects_a_wrong_key() {
        let tag = compute(Algorithm::Hs256, b"key one", TC2_DATA).unwrap();
        assert!(!verify(Algorithm::Hs256, b"key two", TC2_DATA, &tag).unwrap());
    }

    #[test]
    fn verify_rejects_a_truncated_tag() {
        let tag = compute(Algorithm::Hs256, TC2_KEY, TC2_DATA).unwrap();
        assert!(!verify(Algorithm::Hs256, TC2_KEY, TC2_DATA, &tag[..16]).unwrap());
        assert!(!verify(Algorithm::Hs256, TC2_KEY, TC2_DATA, &[]).unwrap());
    }
}
