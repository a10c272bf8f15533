#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # kbkdf
//!
//! Key-based key derivation functions per NIST SP 800-108, deriving one or
//! more cryptographically strong keys from a single high-entropy secret.
//!
//! All three iteration modes of the recommendation are implemented:
//!
//! - **[`counter_mode_key`]**: independent blocks keyed by an iteration
//!   counter. Used extensively by TPM and HSM stacks.
//! - **[`feedback_mode_key`]**: each block chained through the previous one,
//!   seeded by a caller-supplied IV.
//! - **[`pipeline_mode_key`]**: a separate chained pipeline value feeds the
//!   output blocks, two PRF invocations per block.
//!
//! The pseudorandom function is pluggable via the [`Prf`] trait; this crate
//! contains no hash algorithm code. The companion `kbkdf-hmac` crate provides
//! HMAC-SHA-2 instantiations built on the audited RustCrypto `hmac` crate.
//!
//! ## Example
//!
//! ```ignore
//! use kbkdf::{counter_mode_key, KdfParams};
//! use kbkdf_hmac::HmacSha256Prf;
//!
//! let params = KdfParams::for_encryption().with_context(b"my-app-v1");
//! let derived = counter_mode_key(&HmacSha256Prf, master_secret, &params, 256)?;
//! assert_eq!(derived.key().len(), 32);
//! ```
//!
//! ## Scope
//!
//! This crate derives keys; it does not store them, exchange them, generate
//! randomness, or negotiate algorithms. Supplied PRFs are trusted to satisfy
//! the [`Prf`] contract; pseudorandomness itself is not verified.

pub mod error;
pub mod kdf;
pub mod prf;

pub use error::{Error, Result};
pub use kdf::*;
pub use prf::Prf;
