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

//! Error types for blob identifiers.

use silo_clustermap::ClusterMapError;
use thiserror::Error;

/// Errors raised while encoding, decoding or deriving blob identifiers.
///
/// Nothing is retried internally; every failure is propagated to the caller.
#[derive(Error, Debug)]
pub enum BlobIdError {
    /// The identifier string is not valid unpadded base64url.
    #[error("Invalid base64 in blob id: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The legacy identifier string is not valid hex.
    #[error("Invalid hex in blob id: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The input ended before the version's layout was fully read.
    #[error("Truncated blob id: {0}")]
    TruncatedInput(#[from] std::io::Error),

    /// The version field is outside the known range.
    #[error("Unknown blob id version: {version}")]
    UnknownVersion {
        /// The version value found on the wire.
        version: u16,
    },

    /// The embedded partition does not resolve in the cluster map.
    #[error("Unknown partition in blob id: {0}")]
    UnknownPartition(String),

    /// The UUID length prefix is negative or disagrees with the bytes
    /// actually present.
    #[error("Bad uuid length: declared {declared}, {available} bytes available")]
    BadUuidLength {
        /// Length prefix as read from the wire, sign-extended.
        declared: i64,
        /// Bytes remaining after the partition identifier.
        available: usize,
    },

    /// The UUID bytes are not valid UTF-8.
    #[error("Blob id uuid is not valid UTF-8: {0}")]
    BadUtf8(#[from] std::string::FromUtf8Error),

    /// `craft` was asked for a version that cannot carry a crafted id.
    #[error("Crafting requires at least version 3, got {target}")]
    InvalidCraftTarget {
        /// The rejected target version.
        target: u16,
    },

    /// The data-type bits of a V5 flags byte are outside the known range.
    #[error("Unknown blob data type bits: {bits}")]
    BadDataType {
        /// The offending bit pattern, already shifted down.
        bits: u8,
    },

    /// The signed-id JSON payload could not be serialized or deserialized.
    #[error("Signed id serialization failed: {0}")]
    SerializationFailure(#[from] serde_json::Error),

    /// A signed-id operation was given a string without the signed prefix.
    #[error("Id is not a signed id")]
    NotSigned,
}

impl From<ClusterMapError> for BlobIdError {
    fn from(err: ClusterMapError) -> Self {
        match err {
            ClusterMapError::UnknownPartition(what) => BlobIdError::UnknownPartition(what),
            ClusterMapError::Truncated(io) => BlobIdError::TruncatedInput(io),
        }
    }
}
