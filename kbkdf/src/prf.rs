#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Pseudorandom function capability contract.
//!
//! The derivation engine consumes PRFs only through this trait; it never
//! implements or selects hash algorithms itself. Any keyed deterministic
//! transform with a fixed output length can drive the engine: HMAC over an
//! approved hash function (FIPS 198-1), CMAC over a block cipher
//! (NIST SP 800-38B), or a custom construction.
//!
//! The `kbkdf-hmac` crate provides ready-made HMAC-SHA-2 implementations.

use crate::error::Result;

/// A pseudorandom function with a fixed output length.
///
/// Implementations must guarantee:
/// - [`output_len`](Prf::output_len) returns a strictly positive byte count
///   that never changes across calls on the same instance;
/// - [`run`](Prf::run) is a deterministic keyed transform returning exactly
///   `output_len()` bytes for any key and any input, including empty ones;
/// - distinct `(key, input)` pairs do not collide under normal cryptographic
///   assumptions.
///
/// The engine relies on PRF security but does not verify it; a transform
/// that is not actually pseudorandom yields derived keys with no security
/// guarantees. Implementations take `&self` and must hold no per-call
/// mutable state, so a single PRF value can serve concurrent derivations.
pub trait Prf {
    /// Returns the PRF output length in bytes.
    fn output_len(&self) -> usize;

    /// Computes the PRF over `input` keyed with `key`.
    ///
    /// # Errors
    /// Returns an error if the underlying transform cannot be constructed
    /// for the supplied key. The derivation engine propagates such errors
    /// unchanged.
    fn run(&self, key: &[u8], input: &[u8]) -> Result<Vec<u8>>;
}
