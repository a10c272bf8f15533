#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Double-pipeline iteration mode KDF (NIST SP 800-108)
//!
//! A second chain of PRF outputs, the pipeline, feeds the output blocks:
//!
//! A(0) = Label || 0x00 || Context || [L]_2
//! A(i) = PRF(KI, A(i-1))
//! K(i) = PRF(KI, A(i) || {[i]_2} || Label || 0x00 || Context || [L]_2)
//!
//! The optional 32-bit big-endian iteration counter is controlled by
//! [`IterationCounterMode`]. Every iteration costs two PRF invocations, one
//! to advance the pipeline and one to emit the block. The pipeline chain can
//! be computed ahead of the output blocks, but A(i) still depends on A(i-1).

use tracing::instrument;
use zeroize::Zeroize;

use super::{derive_blocks, fixed_input_data, DerivedKey, IterationCounterMode, KdfParams};
use crate::error::Result;
use crate::prf::Prf;

/// Derive a key using the SP 800-108 double-pipeline iteration mode.
///
/// # Arguments
/// * `prf` - Pseudorandom function driving the derivation
/// * `key` - Keying material input (master secret)
/// * `params` - Derivation parameters (label and context)
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
pub fn pipeline_mode_key<P>(
    prf: &P,
    key: &[u8],
    params: &KdfParams,
    bit_length: u32,
    counter_mode: IterationCounterMode,
) -> Result<DerivedKey>
where
    P: Prf + ?Sized,
{
    let fixed = fixed_input_data(&params.label, &params.context, bit_length);
    let derived = pipeline_mode_key_fixed(prf, key, &fixed, bit_length, counter_mode)?;
    Ok(DerivedKey { key: derived, bit_length })
}

/// Double-pipeline mode over caller-encoded fixed input data.
pub(crate) fn pipeline_mode_key_fixed<P>(
    prf: &P,
    key: &[u8],
    fixed: &[u8],
    bit_length: u32,
    counter_mode: IterationCounterMode,
) -> Result<Vec<u8>>
where
    P: Prf + ?Sized,
{
    // Pipeline value, seeded with the fixed input itself
    let mut a = fixed.to_vec();

    let result = derive_blocks(prf.output_len(), bit_length, |i| {
        let next = prf.run(key, &a)?;
        a.zeroize();
        a = next;

        let capacity = a.len().saturating_add(fixed.len()).saturating_add(4);
        let mut input = Vec::with_capacity(capacity);
        input.extend_from_slice(&a);
        if counter_mode == IterationCounterMode::Include {
            input.extend_from_slice(&i.to_be_bytes());
        }
        input.extend_from_slice(fixed);

        let block = prf.run(key, &input);
        input.zeroize();
        block
    });

    a.zeroize();
    result
}
