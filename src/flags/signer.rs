//! Stateless flag tokens.
//!
//! A flag token lets an unauthenticated client retract a flag it created
//! without the server remembering who created what. The token embeds the
//! record id next to an HMAC-SHA256 over that id:
//!
//! ```text
//! token = "flag-" + id + "-" + hex(HMAC-SHA256(secret, decimal(id)))
//! ```
//!
//! # Security Properties
//!
//! - **Deterministic**: the same id and secret always yield the same token,
//!   so verification needs no lookup table
//! - **Uniform failure**: malformed input, a wrong id and a wrong signature
//!   all surface as [`FlagError::Invalid`]
//! - **Constant-time comparison**: signatures are compared with `subtle`
//!
//! # Example
//!
//! ```rust
//! use caption_gateway::flags::FlagSigner;
//!
//! let signer = FlagSigner::new("my-secret-key");
//! let token = signer.mint(42);
//!
//! assert!(token.starts_with("flag-42-"));
//! assert_eq!(signer.verify(&token), Ok(42));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::FlagError;

type HmacSha256 = Hmac<Sha256>;

/// Type tag every flag token starts with.
pub const FLAG_TOKEN_TAG: &str = "flag";

/// Length of the hex-encoded signature segment.
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Mints and verifies flag tokens under a single server-wide secret.
///
/// The secret is fixed at construction; build one signer at startup and
/// share it.
#[derive(Clone)]
pub struct FlagSigner {
    secret_key: Vec<u8>,
}

impl FlagSigner {
    /// Create a signer for the given secret key.
    pub fn new(secret_key: impl AsRef<[u8]>) -> Self {
        Self {
            secret_key: secret_key.as_ref().to_vec(),
        }
    }

    /// Build the client-facing token for a record id.
    pub fn mint(&self, id: i64) -> String {
        format!("{}-{}-{}", FLAG_TOKEN_TAG, id, self.signature(id))
    }

    /// Recover the record id from a token, or fail with [`FlagError::Invalid`].
    pub fn verify(&self, token: &str) -> Result<i64, FlagError> {
        let (id, presented) = parse_token(token).ok_or(FlagError::Invalid)?;
        let expected = self.signature(id);

        if presented.as_bytes().ct_eq(expected.as_bytes()).into() {
            Ok(id)
        } else {
            Err(FlagError::Invalid)
        }
    }

    fn signature(&self, id: i64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret_key).expect("HMAC can take key of any size");
        mac.update(id.to_string().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for FlagSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagSigner").finish_non_exhaustive()
    }
}

/// Split a token into its id and signature segments.
///
/// The signature is whatever follows the last hyphen, so negative ids
/// (`flag--7-...`) still parse. The id segment must be the canonical
/// decimal rendering of the parsed value.
fn parse_token(token: &str) -> Option<(i64, &str)> {
    let rest = token.strip_prefix(FLAG_TOKEN_TAG)?.strip_prefix('-')?;
    let (id_part, signature) = rest.rsplit_once('-')?;

    let id: i64 = id_part.parse().ok()?;
    if id.to_string() != id_part || signature.is_empty() {
        return None;
    }

    Some((id, signature))
}
