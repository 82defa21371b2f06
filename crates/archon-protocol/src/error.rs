//! Error types for the protocol layer.
//!
//! A `ProtocolError` means the bytes arrived but could not be turned into
//! (or out of) a valid record. Transport trouble lives in
//! `archon_transport::TransportError` instead.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Covers malformed JSON, missing fields, wrong types, and ranged
    /// values (rolls, encounter chances) outside their range.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The record decoded but breaks a rule of the contract, e.g. a
    /// `success` movement reply with no biome.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
