//! Caption flags.
//!
//! A flag is a timestamped note against a caption track, typically a
//! correction request. Submitting one needs no account; the response carries
//! a signed token, and presenting that token is the only way to retract the
//! flag.
//!
//! - [`signer`] - stateless HMAC tokens over record ids
//! - [`timestamp`] - `HH:MM:SS.mmm` rendering of millisecond offsets
//! - [`gateway`] - create/delete against a [`RecordStore`](crate::store::RecordStore)

pub mod gateway;
pub mod signer;
pub mod timestamp;

pub use gateway::FlagGateway;
pub use signer::{FlagSigner, FLAG_TOKEN_TAG, SIGNATURE_HEX_LEN};
pub use timestamp::{format_millis, format_seconds, millis_from_json, MILLIS_PER_DAY};
