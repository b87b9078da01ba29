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

//! Silo core identifier types.
//!
//! This crate owns the versioned blob identifier:
//! - The [`blobid`] codec: encode, decode, string-prefix accessors,
//!   crafting and ordering across wire versions V1-V5
//! - The [`signed_id`] envelope used by upload sessions to hand ids and
//!   metadata back to clients as one token

pub mod blobid;
pub mod error;
pub mod signed_id;

pub use blobid::{
    BlobDataType, BlobId, BlobIdType, BLOB_ID_V1, BLOB_ID_V2, BLOB_ID_V3, BLOB_ID_V4, BLOB_ID_V5,
    UNKNOWN_ACCOUNT_ID, UNKNOWN_CONTAINER_ID, UNKNOWN_DATACENTER_ID,
};
pub use error::BlobIdError;
