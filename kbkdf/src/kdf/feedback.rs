#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Feedback mode KDF (NIST SP 800-108)
//!
//! Each output block is chained through the previous one:
//!
//! K(0) = IV
//! K(i) = PRF(KI, K(i-1) || {[i]_2} || Label || 0x00 || Context || [L]_2)
//!
//! The optional 32-bit big-endian iteration counter is controlled by
//! [`IterationCounterMode`]. The chaining makes iterations strictly
//! sequential; block i cannot be computed before block i-1.

use tracing::instrument;
use zeroize::Zeroize;

use super::{derive_blocks, fixed_input_data, DerivedKey, IterationCounterMode, KdfParams};
use crate::error::Result;
use crate::prf::Prf;

/// Derive a key using the SP 800-108 feedback mode.
///
/// # Arguments
/// * `prf` - Pseudorandom function driving the derivation
/// * `key` - Keying material input (master secret)
/// * `params` - Derivation parameters (label and context)
/// * `iv` - Initialization vector seeding the block chain; any length is
///   accepted, typically the PRF output length
/// * `bit_length` - Desired output length in bits
/// * `counter_mode` - Whether the iteration counter is fed to the PRF
///
/// # Returns
/// Derived key material of ceil(`bit_length` / 8) bytes. A zero bit length
/// yields an empty key without invoking the PRF.
///
/// # Security Considerations
/// - Use unique labels for different key purposes
/// - Include context to ensure domain separation
/// - The IV does not need to be secret, but it becomes part of the first PRF
///   input, so interoperating parties must agree on it
///
/// # Errors
/// Returns an error if the PRF violates its capability contract (zero
/// declared output length, or a block of the wrong length) or if the PRF
/// itself fails.
#[instrument(
    level = "debug",
    skip(prf, key, params, iv),
    fields(label_len = params.label.len(), context_len = params.context.len(), iv_len = iv.len())
)]
pub fn feedback_mode_key<P>(
    prf: &P,
    key: &[u8],
    params: &KdfParams,
    iv: &[u8],
    bit_length: u32,
    counter_mode: IterationCounterMode,
) -> Result<DerivedKey>
where
    P: Prf + ?Sized,
{
    let fixed = fixed_input_data(&params.label, &params.context, bit_length);
    let derived = feedback_mode_key_fixed(prf, key, &fixed, iv, bit_length, counter_mode)?;
    Ok(DerivedKey { key: derived, bit_length })
}

/// Feedback mode over caller-encoded fixed input data.
pub(crate) fn feedback_mode_key_fixed<P>(
    prf: &P,
    key: &[u8],
    fixed: &[u8],
    iv: &[u8],
    bit_length: u32,
    counter_mode: IterationCounterMode,
) -> Result<Vec<u8>>
where
    P: Prf + ?Sized,
{
    // Running block, seeded with the IV and replaced after every iteration
    let mut k = iv.to_vec();

    let result = derive_blocks(prf.output_len(), bit_length, |i| {
        let capacity = k.len().saturating_add(fixed.len()).saturating_add(4);
        let mut input = Vec::with_capacity(capacity);
        input.extend_from_slice(&k);
        if counter_mode == IterationCounterMode::Include {
            input.extend_from_slice(&i.to_be_bytes());
        }
        input.extend_from_slice(fixed);

        let block = prf.run(key, &input)?;
        input.zeroize();

        k.zeroize();
        k = block.clone();
        Ok(block)
    });

    k.zeroize();
    result
}
