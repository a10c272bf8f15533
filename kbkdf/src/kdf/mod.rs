#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! SP 800-108 key derivation engine
//!
//! NIST SP 800-108 derives keying material by iterating a pseudorandom
//! function over a fixed input string. All three modes defined by the
//! recommendation are provided:
//!
//! - [`counter`]: K(i) = PRF(KI, [i]_2 || FixedInput)
//! - [`feedback`]: K(i) = PRF(KI, K(i-1) || {[i]_2} || FixedInput)
//! - [`pipeline`]: A(i) = PRF(KI, A(i-1)), K(i) = PRF(KI, A(i) || {[i]_2} || FixedInput)
//!
//! Where:
//! - KI: keying material input (the master secret)
//! - i: iteration counter (32-bit big-endian, starting at 1)
//! - {x}: optional component, controlled by [`IterationCounterMode`]
//! - FixedInput: Label || 0x00 || Context || [L]_2, with L the requested
//!   output length in bits (32-bit big-endian)
//!
//! The derived output is the concatenation K(1) || K(2) || ... truncated to
//! ceil(L/8) bytes. When L is not a multiple of 8, the low-order bits of the
//! final byte beyond L are retained as produced by the PRF, not masked.

pub mod counter;
pub mod feedback;
pub mod pipeline;

pub use counter::*;
pub use feedback::*;
pub use pipeline::*;

use crate::error::{Error, Result};
use zeroize::Zeroize;

/// Controls whether the iteration counter is an input to the PRF.
///
/// Applies to the feedback and double-pipeline modes only; the counter mode
/// always includes the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IterationCounterMode {
    /// The 32-bit big-endian iteration counter is not fed to the PRF.
    Omit,
    /// The 32-bit big-endian iteration counter is fed to the PRF.
    Include,
}

/// Derivation parameters binding the output to a purpose
#[derive(Debug, Clone)]
pub struct KdfParams {
    /// Label identifying the purpose of key derivation
    pub label: Vec<u8>,
    /// Context-specific information
    pub context: Vec<u8>,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self { label: b"Derived Key".to_vec(), context: vec![] }
    }
}

impl KdfParams {
    /// Create new derivation parameters with a custom label
    #[must_use]
    pub fn new(label: &[u8]) -> Self {
        Self { label: label.to_vec(), context: vec![] }
    }

    /// Set context information
    #[must_use]
    pub fn with_context(mut self, context: &[u8]) -> Self {
        self.context = context.to_vec();
        self
    }

    /// Create parameters for an encryption key
    #[must_use]
    pub fn for_encryption() -> Self {
        Self::new(b"encryption key")
    }

    /// Create parameters for a MAC key
    #[must_use]
    pub fn for_mac() -> Self {
        Self::new(b"authentication key")
    }

    /// Create parameters for an IV/nonce
    #[must_use]
    pub fn for_iv() -> Self {
        Self::new(b"iv generation")
    }
}

/// Derived keying material
///
/// Holds ceil(`bit_length` / 8) bytes of PRF output. The buffer is zeroized
/// on drop.
#[derive(Clone, Debug)]
pub struct DerivedKey {
    /// Derived key material
    pub key: Vec<u8>,
    /// Requested output length in bits
    pub bit_length: u32,
}

impl Zeroize for DerivedKey {
    fn zeroize(&mut self) {
        self.key.zeroize();
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl DerivedKey {
    /// Get the derived key
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

/// Encode the fixed input data shared by all iterations of one derivation.
///
/// Produces `label || 0x00 || context || [bit_length]_2`, with the requested
/// output length in bits as an unsigned 32-bit big-endian integer. Empty
/// labels and contexts are valid; no content validation is performed. The
/// byte layout matches other SP 800-108 implementations bit for bit.
#[must_use]
pub fn fixed_input_data(label: &[u8], context: &[u8], bit_length: u32) -> Vec<u8> {
    let capacity = label.len().saturating_add(context.len()).saturating_add(5);
    let mut fixed = Vec::with_capacity(capacity);
    fixed.extend_from_slice(label);
    fixed.push(0x00);
    fixed.extend_from_slice(context);
    fixed.extend_from_slice(&bit_length.to_be_bytes());
    fixed
}

/// Iteration driver shared by the three modes.
///
/// Invokes `block` for i = 1..=n with n = ceil(bit_length / (8 * prf_len)),
/// concatenates the returned blocks, and truncates the result to
/// ceil(bit_length / 8) bytes. A zero bit length yields zero iterations and
/// an empty result. Each block must be exactly `prf_len` bytes; a mismatch
/// aborts the derivation rather than silently omitting requested bits.
pub(crate) fn derive_blocks<F>(prf_len: usize, bit_length: u32, mut block: F) -> Result<Vec<u8>>
where
    F: FnMut(u32) -> Result<Vec<u8>>,
{
    if prf_len == 0 {
        return Err(Error::InvalidParameter(
            "PRF output length must be greater than 0".to_string(),
        ));
    }

    let out_len = (bit_length as usize).div_ceil(8);
    let stride = (prf_len as u64).saturating_mul(8);
    let n = u64::from(bit_length).div_ceil(stride);
    // bit_length is 32-bit and stride >= 8, so n always fits the counter
    let n = u32::try_from(n).map_err(|_e| {
        Error::InvalidParameter("iteration count exceeds the 32-bit counter range".to_string())
    })?;

    let mut out = Vec::with_capacity(out_len);
    for i in 1..=n {
        let mut chunk = block(i)?;
        if chunk.len() != prf_len {
            let actual = chunk.len();
            chunk.zeroize();
            return Err(Error::PrfOutputLength { expected: prf_len, actual });
        }

        let take = prf_len.min(out_len.saturating_sub(out.len()));
        if let Some(bytes) = chunk.get(..take) {
            out.extend_from_slice(bytes);
        }
        chunk.zeroize();
    }

    Ok(out)
}


#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use hex_literal::hex;

    /// Exact byte layout: label || 0x00 || context || [L]_2
    #[test]
    fn test_fixed_input_data_layout() {
        let fixed = fixed_input_data(b"lbl", b"ctx", 256);
        assert_eq!(fixed, hex!("6c626c0063747800000100"));
    }

    /// Empty label and context collapse to separator plus length encoding
    #[test]
    fn test_fixed_input_data_empty_components() {
        let fixed = fixed_input_data(b"", b"", 128);
        assert_eq!(fixed, hex!("0000000080"));
    }

    #[test]
    fn test_fixed_input_data_length_is_big_endian() {
        let fixed = fixed_input_data(b"", b"", 0x0102_0304);
        assert_eq!(&fixed[1..], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_derive_blocks_zero_bit_length() {
        let mut calls = 0;
        let out = derive_blocks(32, 0, |_i| {
            calls += 1;
            Ok(vec![0u8; 32])
        })
        .unwrap();
        assert!(out.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_derive_blocks_counts_iterations() {
        let mut seen = Vec::new();
        let out = derive_blocks(32, 512, |i| {
            seen.push(i);
            Ok(vec![i as u8; 32])
        })
        .unwrap();
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(out.len(), 64);
        assert_eq!(&out[..32], &[1u8; 32]);
        assert_eq!(&out[32..], &[2u8; 32]);
    }

    #[test]
    fn test_derive_blocks_truncates_final_block() {
        // 260 bits -> 33 bytes, two 32-byte blocks with one byte kept from the second
        let out = derive_blocks(32, 260, |i| Ok(vec![i as u8; 32])).unwrap();
        assert_eq!(out.len(), 33);
        assert_eq!(out[32], 2);
    }

    #[test]
    fn test_derive_blocks_rejects_zero_prf_len() {
        let err = derive_blocks(0, 128, |_i| Ok(vec![])).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_derive_blocks_rejects_short_block() {
        let err = derive_blocks(32, 256, |_i| Ok(vec![0u8; 16])).unwrap_err();
        assert!(matches!(err, Error::PrfOutputLength { expected: 32, actual: 16 }));
    }

    #[test]
    fn test_kdf_params_builders() {
        let params = KdfParams::new(b"label").with_context(b"context");
        assert_eq!(params.label, b"label");
        assert_eq!(params.context, b"context");

        let default = KdfParams::default();
        assert_eq!(default.label, b"Derived Key");
        assert!(default.context.is_empty());
    }

    #[test]
    fn test_kdf_params_presets_are_distinct() {
        let enc = KdfParams::for_encryption();
        let mac = KdfParams::for_mac();
        let iv = KdfParams::for_iv();
        assert_ne!(enc.label, mac.label);
        assert_ne!(mac.label, iv.label);
        assert_ne!(enc.label, iv.label);
    }

    #[test]
    fn test_derived_key_accessor() {
        let derived = DerivedKey { key: vec![0xab; 16], bit_length: 128 };
        assert_eq!(derived.key(), &[0xab; 16]);
        assert_eq!(derived.bit_length, 128);
    }

    #[test]
    fn test_derived_key_zeroize() {
        let mut derived = DerivedKey { key: vec![0xab; 16], bit_length: 128 };
        derived.zeroize();
        assert!(derived.key.is_empty() || derived.key.iter().all(|&b| b == 0));
    }
}
