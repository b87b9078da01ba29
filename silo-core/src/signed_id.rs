// Copyright 2026 Silo Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Signed-identifier envelope.
//!
//! Wraps a blob id string together with caller-supplied metadata into a
//! single opaque token. **This is a framing convention, not a signature**:
//! nothing is cryptographically protected, and callers must not rely on the
//! envelope for integrity or authenticity.

use crate::error::BlobIdError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Literal prefix marking a signed identifier.
pub const SIGNED_ID_PREFIX: &str = "signedId/";

#[derive(Debug, Serialize, Deserialize)]
struct SignedIdPayload {
    id: String,
    metadata: HashMap<String, String>,
}

/// True if `id` carries the signed-id prefix.
pub fn is_signed(id: &str) -> bool {
    id.starts_with(SIGNED_ID_PREFIX)
}

/// Wraps `blob_id` and `metadata` into the signed-id envelope.
///
/// # Errors
///
/// `SerializationFailure` if the JSON payload cannot be produced.
pub fn sign(blob_id: &str, metadata: &HashMap<String, String>) -> Result<String, BlobIdError> {
    let payload = SignedIdPayload {
        id: blob_id.to_string(),
        metadata: metadata.clone(),
    };
    let json = serde_json::to_string(&payload)?;
    Ok(format!("{SIGNED_ID_PREFIX}{}", URL_SAFE_NO_PAD.encode(json)))
}

/// Unwraps a signed identifier into the blob id string and its metadata.
///
/// # Errors
///
/// `NotSigned` if the prefix is missing, `InvalidBase64` if the envelope
/// body is not decodable, `SerializationFailure` if the JSON inside does not
/// parse.
pub fn parse(signed_id: &str) -> Result<(String, HashMap<String, String>), BlobIdError> {
    let encoded = signed_id
        .strip_prefix(SIGNED_ID_PREFIX)
        .ok_or(BlobIdError::NotSigned)?;
    let json = URL_SAFE_NO_PAD.decode(encoded)?;
    let payload: SignedIdPayload = serde_json::from_slice(&json)?;
    Ok((payload.id, payload.metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_parse_round_trip() {
        let mut metadata = HashMap::new();
        metadata.insert("chunk-count".to_string(), "12".to_string());
        metadata.insert("session".to_string(), "upload-7".to_string());

        let signed = sign("AAYAAQAAAAAAAAAAZHVtbXk", &metadata).unwrap();
        assert!(is_signed(&signed));
        assert!(signed.starts_with(SIGNED_ID_PREFIX));

        let (id, parsed) = parse(&signed).unwrap();
        assert_eq!(id, "AAYAAQAAAAAAAAAAZHVtbXk");
        assert_eq!(parsed, metadata);
    }

    #[test]
    fn test_empty_metadata_round_trips() {
        let signed = sign("someid", &HashMap::new()).unwrap();
        let (id, metadata) = parse(&signed).unwrap();
        assert_eq!(id, "someid");
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_parse_rejects_unsigned_strings() {
        assert!(!is_signed("AAYAAQ"));
        assert!(matches!(parse("AAYAAQ"), Err(BlobIdError::NotSigned)));
    }

    #[test]
    fn test_parse_rejects_garbage_envelope() {
        let err = parse("signedId/!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, BlobIdError::InvalidBase64(_)));

        let not_json = format!("{SIGNED_ID_PREFIX}{}", URL_SAFE_NO_PAD.encode("not json"));
        let err = parse(&not_json).unwrap_err();
        assert!(matches!(err, BlobIdError::SerializationFailure(_)));
    }
}
