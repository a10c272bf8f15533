#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Counter mode KDF (NIST SP 800-108)
//!
//! Each output block is computed as:
//!
//! K(i) = PRF(KI, [i]_2 || Label || 0x00 || Context || [L]_2)
//!
//! The 32-bit big-endian counter is always the first PRF input component;
//! unlike the feedback and double-pipeline modes, its inclusion is not
//! configurable. Blocks are independent of each other, so this is the
//! cheapest of the three modes and the one used by TPM and HSM stacks.

use tracing::instrument;
use zeroize::Zeroize;

use super::{derive_blocks, fixed_input_data, DerivedKey, KdfParams};
use crate::error::Result;
use crate::prf::Prf;

/// Derive a key using the SP 800-108 counter mode.
///
/// # Arguments
/// * `prf` - Pseudorandom function driving the derivation
/// * `key` - Keying material input (master secret)
/// * `params` - Derivation parameters (label and context)
/// * `bit_length` - Desired output length in bits
///
/// # Returns
/// Derived key material of ceil(`bit_length` / 8) bytes. A zero bit length
/// yields an empty key without invoking the PRF. Bit lengths that are not a
/// multiple of 8 keep the extra low-order bits of the final byte unmasked.
///
/// # Example
/// ```ignore
/// let params = KdfParams::for_encryption().with_context(b"my-app-v1");
/// let derived = counter_mode_key(&prf, master_secret, &params, 256)?;
/// ```
///
/// # Security Considerations
/// - Use unique labels for different key purposes
/// - Include context to ensure domain separation
/// - Never reuse the same (KI, label, context) for different purposes
///
/// # Errors
/// Returns an error if the PRF violates its capability contract (zero
/// declared output length, or a block of the wrong length) or if the PRF
/// itself fails.
#[instrument(
    level = "debug",
    skip(prf, key, params),
    fields(label_len = params.label.len(), context_len = params.context.len())
)]
pub fn counter_mode_key<P>(
    prf: &P,
    key: &[u8],
    params: &KdfParams,
    bit_length: u32,
) -> Result<DerivedKey>
where
    P: Prf + ?Sized,
{
    let fixed = fixed_input_data(&params.label, &params.context, bit_length);
    let derived = counter_mode_key_fixed(prf, key, &fixed, bit_length)?;
    Ok(DerivedKey { key: derived, bit_length })
}

/// Counter mode over caller-encoded fixed input data.
pub(crate) fn counter_mode_key_fixed<P>(
    prf: &P,
    key: &[u8],
    fixed: &[u8],
    bit_length: u32,
) -> Result<Vec<u8>>
where
    P: Prf + ?Sized,
{
    derive_blocks(prf.output_len(), bit_length, |i| {
        let mut input = Vec::with_capacity(fixed.len().saturating_add(4));
        input.extend_from_slice(&i.to_be_bytes());
        input.extend_from_slice(fixed);

        let block = prf.run(key, &input);
        input.zeroize();
        block
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use crate::kdf::test_prf::HmacSha256TestPrf;
    use hex_literal::hex;

    /// NIST CAVP KBKDF CTR_Mode sample, HMAC-SHA-256, counter before fixed
    /// input data, 32-bit counter, L = 128
    #[test]
    fn test_counter_mode_cavp_vector() {
        let ki = hex!("dd1d91b7d90b2bd3138533ce92b272fbf8a369316aefe242e659cc0ae238afe0");
        let fixed = hex!(
            "01322b96b30acd197979444e468e1c5c6859bf1b1cf951b7e725303e237e46b8"
            "64a145fab25e517b08f8683d0315bb2911d80a0e8aba17f3b413faac"
        );
        let expected = hex!("10621342bfb0fd40046c0e29f2cfdbf0");

        let derived = counter_mode_key_fixed(&HmacSha256TestPrf, &ki, &fixed, 128).unwrap();
        assert_eq!(derived, expected);
    }

    #[test]
    fn test_counter_mode_deterministic() {
        let params = KdfParams::new(b"Test Label").with_context(b"ctx");
        let a = counter_mode_key(&HmacSha256TestPrf, b"secret", &params, 256).unwrap();
        let b = counter_mode_key(&HmacSha256TestPrf, b"secret", &params, 256).unwrap();
        assert_eq!(a.key, b.key);
    }

    #[test]
    fn test_counter_mode_zero_bit_length() {
        let params = KdfParams::new(b"Label");
        let derived = counter_mode_key(&HmacSha256TestPrf, b"secret", &params, 0).unwrap();
        assert!(derived.key().is_empty());
    }

    /// 130 bits round up to 17 bytes, the last byte keeps its unmasked bits
    #[test]
    fn test_counter_mode_unaligned_bit_length() {
        let key = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
        let params = KdfParams::new(b"derive").with_context(b"kbkdf self-test");
        let derived = counter_mode_key(&HmacSha256TestPrf, &key, &params, 130).unwrap();
        assert_eq!(derived.key(), hex!("cf2a825327190b0df00b475a65fe717b0e"));
    }

    #[test]
    fn test_counter_mode_label_and_context_bind_output() {
        let base = KdfParams::new(b"Label").with_context(b"Context");
        let other_label = KdfParams::new(b"Label2").with_context(b"Context");
        let other_context = KdfParams::new(b"Label").with_context(b"Context2");

        let a = counter_mode_key(&HmacSha256TestPrf, b"secret", &base, 256).unwrap();
        let b = counter_mode_key(&HmacSha256TestPrf, b"secret", &other_label, 256).unwrap();
        let c = counter_mode_key(&HmacSha256TestPrf, b"secret", &other_context, 256).unwrap();

        assert_ne!(a.key, b.key);
        assert_ne!(a.key, c.key);
        assert_ne!(b.key, c.key);
    }

    /// The requested bit length is part of the fixed input, so different
    /// lengths do not share a prefix
    #[test]
    fn test_counter_mode_length_binds_output() {
        let params = KdfParams::new(b"Label");
        let short = counter_mode_key(&HmacSha256TestPrf, b"secret", &params, 128).unwrap();
        let long = counter_mode_key(&HmacSha256TestPrf, b"secret", &params, 256).unwrap();
        assert_ne!(&long.key()[..16], short.key());
    }
}
