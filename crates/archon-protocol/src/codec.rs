//! Codec trait and implementations for turning wire records into bytes.
//!
//! Service clients and backends never call `serde_json` directly; they go
//! through a [`Codec`]. Swapping the wire format means adding one more
//! implementation here, nothing else.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `decode` takes `DeserializeOwned` rather than `Deserialize<'de>`: the
/// reply buffer is dropped as soon as the typed record comes out, so the
/// record must own its strings.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed, a
    /// required field is missing, or a ranged value is out of range.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Every backend speaks JSON, so this is the only codec in use. It sits
/// behind the `json` feature (on by default).
///
/// ## Example
///
/// ```rust
/// use archon_protocol::{Codec, EnemyRequest, JsonCodec, ServiceRequest};
///
/// let codec = JsonCodec;
/// let request = ServiceRequest::new("archon", EnemyRequest { biome: "desert".into() });
///
/// let bytes = codec.encode(&request).unwrap();
/// let decoded: ServiceRequest<EnemyRequest> = codec.decode(&bytes).unwrap();
/// assert_eq!(request, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::Roll;

    #[test]
    fn test_decode_rejects_garbage() {
        let result: Result<Roll, _> = JsonCodec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_error_message_mentions_decode() {
        let err = JsonCodec.decode::<Roll>(b"{").unwrap_err();
        assert!(err.to_string().starts_with("decode failed"));
    }
}
