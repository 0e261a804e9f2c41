//! Container-format decoding.
//!
//! Every layer follows the same convention:
//! - `layout` holds the signatures and sizes (single source of truth)
//! - one module per layer owning its header struct and `decode_*` function
//! - one [`DecodeError`] taxonomy shared across all layers
//!
//! Decoding is strict top-down delegation over a single shared cursor: each
//! `decode_*` validates its signature before reading anything else, reports
//! its header fields, then hands the same cursor to the next layer down. A
//! failure at any depth propagates unchanged; nothing is retried or
//! resynchronized.

pub mod frame;
pub mod layout;
pub mod lbd;
pub mod lmm;
pub mod mom;
pub mod mos;
pub mod packet;
pub mod tod;

pub use lbd::{Lbd, decode_lbd};

use thiserror::Error;

use crate::source::SourceError;

/// Errors raised while decoding the container chain.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The signature at the current layer did not match its expected value.
    #[error("{layer} signature mismatch: found {found:#X}, expected {expected:#X}")]
    SignatureMismatch {
        layer: &'static str,
        expected: u32,
        found: u32,
    },
    /// A packet declared a length of zero words, which cannot even cover
    /// its own four-byte prefix.
    #[error("packet for object {object_id} declares zero length")]
    ZeroPacketLength { object_id: u16 },
    #[error(transparent)]
    Source(#[from] SourceError),
}
