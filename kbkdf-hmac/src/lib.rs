#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # kbkdf-hmac
//!
//! HMAC based pseudorandom functions for the `kbkdf` derivation engine.
//!
//! HMAC is specified in FIPS 198-1 and is the PRF recommended by
//! NIST SP 800-108 for key-based key derivation. All algorithm code is
//! delegated to the audited RustCrypto `hmac` crate; this crate only adapts
//! it to the [`Prf`] capability contract:
//!
//! - Key padding to the hash block size, with longer keys hashed first
//! - Any key length accepted, including empty
//! - Output length fixed to the digest length
//!
//! ## Example
//!
//! ```ignore
//! use kbkdf::{counter_mode_key, KdfParams};
//! use kbkdf_hmac::HmacSha256Prf;
//!
//! let params = KdfParams::new(b"session").with_context(b"client");
//! let derived = counter_mode_key(&HmacSha256Prf, master_secret, &params, 256)?;
//! ```

use hmac::{Hmac, Mac};
use kbkdf::error::{Error, Result};
use kbkdf::Prf;
use sha2::{Sha256, Sha384, Sha512};

/// HMAC-SHA-256 pseudorandom function (32-byte output)
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Prf;

impl Prf for HmacSha256Prf {
    fn output_len(&self) -> usize {
        32
    }

    fn run(&self, key: &[u8], input: &[u8]) -> Result<Vec<u8>> {
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key)
            .map_err(|_e| Error::PrfFailed("invalid HMAC-SHA-256 key".to_string()))?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// HMAC-SHA-384 pseudorandom function (48-byte output)
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha384Prf;

impl Prf for HmacSha384Prf {
    fn output_len(&self) -> usize {
        48
    }

    fn run(&self, key: &[u8], input: &[u8]) -> Result<Vec<u8>> {
        let mut mac = <Hmac<Sha384> as Mac>::new_from_slice(key)
            .map_err(|_e| Error::PrfFailed("invalid HMAC-SHA-384 key".to_string()))?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// HMAC-SHA-512 pseudorandom function (64-byte output)
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha512Prf;

impl Prf for HmacSha512Prf {
    fn output_len(&self) -> usize {
        64
    }

    fn run(&self, key: &[u8], input: &[u8]) -> Result<Vec<u8>> {
        let mut mac = <Hmac<Sha512> as Mac>::new_from_slice(key)
            .map_err(|_e| Error::PrfFailed("invalid HMAC-SHA-512 key".to_string()))?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}
