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

//! Versioned blob identifier codec.
//!
//! A [`BlobId`] uniquely names a stored blob and carries the routing metadata
//! (datacenter, account, container, partition) needed to reach it. Five wire
//! versions coexist on disk and must stay decodable forever. All integers are
//! big-endian:
//!
//! ```text
//! V1: [ver:u16][partition...][uuid_len:u32][uuid...]
//! V2: [ver:u16][0x00:u8][dc:i8][acct:i16][cont:i16][partition...][uuid_len:u32][uuid...]
//! V3: [ver:u16][flags:u8][dc:i8][acct:i16][cont:i16][partition...][uuid_len:u32][uuid...]
//! V4: same layout as V3, flags gained the encryption bit
//! V5: same layout as V3, flags gained the data-type bits
//! ```
//!
//! The flags byte packs the id type in bit 0, the encryption bit in bit 1
//! (V4+) and the data type in bits 2-3 (V5). The partition segment is the
//! partition identifier's self-describing wire form, owned by the cluster
//! map; this codec never looks inside it.
//!
//! The canonical string form is unpadded base64url of the byte form. A hex
//! form exists as a read-only legacy entry point.

use crate::error::BlobIdError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use silo_clustermap::{PartitionDirectory, PartitionId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Cursor, Read};
use std::sync::Arc;
use uuid::Uuid;

/// First wire version: version, partition and uuid only.
pub const BLOB_ID_V1: u16 = 1;
/// Added the datacenter, account and container routing fields.
pub const BLOB_ID_V2: u16 = 2;
/// Turned V2's reserved byte into a flags byte carrying the id type.
pub const BLOB_ID_V3: u16 = 3;
/// The flags byte gained the encryption bit.
pub const BLOB_ID_V4: u16 = 4;
/// The flags byte gained the data-type bits.
pub const BLOB_ID_V5: u16 = 5;

/// Datacenter id reported by V1 ids, which predate datacenter routing.
pub const UNKNOWN_DATACENTER_ID: i8 = -1;
/// Account id reported by V1 ids.
pub const UNKNOWN_ACCOUNT_ID: i16 = -1;
/// Container id reported by V1 ids.
pub const UNKNOWN_CONTAINER_ID: i16 = -1;

// Flag byte layout (V3+). Historical wire traffic depends on these exact
// positions.
const FLAG_CRAFTED: u8 = 0x01;
const FLAG_ENCRYPTED: u8 = 0x02;
const DATA_TYPE_SHIFT: u8 = 2;
const DATA_TYPE_MASK: u8 = 0b11 << DATA_TYPE_SHIFT;

/// Provenance of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobIdType {
    /// Generated fresh by the system.
    Native,
    /// Derived from another identifier with a new account/container binding.
    Crafted,
}

/// Kind of payload the blob holds. Carried on the wire by V5 ids only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobDataType {
    /// One chunk of a large, composite blob.
    DataChunk,
    /// A metadata blob describing the chunks of a composite blob.
    Metadata,
    /// A blob stored whole.
    Simple,
}

impl BlobDataType {
    fn to_bits(self) -> u8 {
        match self {
            BlobDataType::DataChunk => 0,
            BlobDataType::Metadata => 1,
            BlobDataType::Simple => 2,
        }
    }

    fn from_bits(bits: u8) -> Result<Self, BlobIdError> {
        match bits {
            0 => Ok(BlobDataType::DataChunk),
            1 => Ok(BlobDataType::Metadata),
            2 => Ok(BlobDataType::Simple),
            _ => Err(BlobIdError::BadDataType { bits }),
        }
    }
}

/// Uniquely identifies a stored blob as well as the partition holding it.
///
/// Identifiers are immutable: they come out of [`BlobId::new`] (fresh UUID),
/// out of one of the decode entry points, or out of [`BlobId::craft`], and
/// are never modified afterwards. Fields a version cannot carry are pinned
/// to their defaults at construction, so re-encoding always reproduces the
/// original bytes.
#[derive(Debug, Clone)]
pub struct BlobId {
    version: u16,
    id_type: BlobIdType,
    datacenter_id: i8,
    account_id: i16,
    container_id: i16,
    partition: Arc<dyn PartitionId>,
    is_encrypted: bool,
    data_type: Option<BlobDataType>,
    uuid: String,
}

impl BlobId {
    /// Creates a fresh identifier with a random UUID.
    ///
    /// Fields the version cannot carry are ignored: V1/V2 force the native
    /// type, V1 forces the unknown routing sentinels, versions below V4
    /// force `is_encrypted` off and versions below V5 drop the data type.
    /// A V5 id built without a data type defaults to
    /// [`BlobDataType::DataChunk`].
    ///
    /// # Errors
    ///
    /// `UnknownVersion` if `version` is not one of the five wire versions.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        version: u16,
        id_type: BlobIdType,
        datacenter_id: i8,
        account_id: i16,
        container_id: i16,
        partition: Arc<dyn PartitionId>,
        is_encrypted: bool,
        data_type: Option<BlobDataType>,
    ) -> Result<Self, BlobIdError> {
        Self::with_uuid(
            version,
            id_type,
            datacenter_id,
            account_id,
            container_id,
            partition,
            is_encrypted,
            data_type,
            Uuid::new_v4().to_string(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn with_uuid(
        version: u16,
        id_type: BlobIdType,
        datacenter_id: i8,
        account_id: i16,
        container_id: i16,
        partition: Arc<dyn PartitionId>,
        is_encrypted: bool,
        data_type: Option<BlobDataType>,
        uuid: String,
    ) -> Result<Self, BlobIdError> {
        if !(BLOB_ID_V1..=BLOB_ID_V5).contains(&version) {
            return Err(BlobIdError::UnknownVersion { version });
        }
        let v1 = version == BLOB_ID_V1;
        Ok(Self {
            version,
            id_type: if version < BLOB_ID_V3 {
                BlobIdType::Native
            } else {
                id_type
            },
            datacenter_id: if v1 {
                UNKNOWN_DATACENTER_ID
            } else {
                datacenter_id
            },
            account_id: if v1 { UNKNOWN_ACCOUNT_ID } else { account_id },
            container_id: if v1 {
                UNKNOWN_CONTAINER_ID
            } else {
                container_id
            },
            partition,
            is_encrypted: version >= BLOB_ID_V4 && is_encrypted,
            data_type: if version >= BLOB_ID_V5 {
                Some(data_type.unwrap_or(BlobDataType::DataChunk))
            } else {
                None
            },
            uuid,
        })
    }

    /// Derives a new crafted identifier bound to a different account and
    /// container.
    ///
    /// The datacenter, partition, uuid, encryption flag and data type are
    /// carried over from `input`. When the target version carries a data
    /// type and the input does not, it defaults to
    /// [`BlobDataType::DataChunk`]. Crafting an already-crafted id with its
    /// own account and container reproduces it byte for byte.
    ///
    /// # Errors
    ///
    /// `InvalidCraftTarget` if `target_version` predates crafted ids (V3).
    pub fn craft(
        input: &BlobId,
        target_version: u16,
        account_id: i16,
        container_id: i16,
    ) -> Result<BlobId, BlobIdError> {
        if target_version < BLOB_ID_V3 {
            return Err(BlobIdError::InvalidCraftTarget {
                target: target_version,
            });
        }
        Self::with_uuid(
            target_version,
            BlobIdType::Crafted,
            input.datacenter_id,
            account_id,
            container_id,
            Arc::clone(&input.partition),
            input.is_encrypted,
            input.data_type,
            input.uuid.clone(),
        )
    }

    // ------------------------------------------------------------------
    // Decoding
    // ------------------------------------------------------------------

    /// Decodes one identifier from `stream`.
    ///
    /// Exactly the bytes of the identifier are consumed; anything after the
    /// declared uuid length is left on the stream untouched.
    pub fn from_stream(
        stream: &mut dyn Read,
        directory: &dyn PartitionDirectory,
    ) -> Result<Self, BlobIdError> {
        let prefix = DecodedPrefix::read(stream, directory)?;
        let declared = read_u32(stream)?;
        if (declared as i32) < 0 {
            return Err(BlobIdError::BadUuidLength {
                declared: i64::from(declared as i32),
                available: 0,
            });
        }
        let mut uuid_bytes = vec![0u8; declared as usize];
        stream.read_exact(&mut uuid_bytes)?;
        prefix.into_blob_id(String::from_utf8(uuid_bytes)?)
    }

    /// Decodes an identifier that must occupy `bytes` exactly.
    ///
    /// Unlike [`BlobId::from_stream`], the declared uuid length has to match
    /// the remaining byte count, so truncated uuids and trailing garbage are
    /// both rejected.
    pub fn from_bytes(
        bytes: &[u8],
        directory: &dyn PartitionDirectory,
    ) -> Result<Self, BlobIdError> {
        let mut cursor = Cursor::new(bytes);
        let prefix = DecodedPrefix::read(&mut cursor, directory)?;
        let declared = read_u32(&mut cursor)?;
        let available = bytes.len() - cursor.position() as usize;
        if (declared as i32) < 0 || declared as usize != available {
            return Err(BlobIdError::BadUuidLength {
                declared: i64::from(declared as i32),
                available,
            });
        }
        let mut uuid_bytes = vec![0u8; available];
        cursor.read_exact(&mut uuid_bytes)?;
        prefix.into_blob_id(String::from_utf8(uuid_bytes)?)
    }

    /// Parses the canonical unpadded-base64url string form.
    pub fn from_string(id: &str, directory: &dyn PartitionDirectory) -> Result<Self, BlobIdError> {
        let bytes = URL_SAFE_NO_PAD.decode(id)?;
        Self::from_bytes(&bytes, directory)
    }

    /// Parses the legacy hex string form.
    ///
    /// Read-only compatibility path for ids printed by the earliest
    /// deployments; new code emits base64url via [`Display`](fmt::Display).
    pub fn from_hex_string(
        id: &str,
        directory: &dyn PartitionDirectory,
    ) -> Result<Self, BlobIdError> {
        let bytes = hex::decode(id)?;
        Self::from_bytes(&bytes, directory)
    }

    // ------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------

    /// Serializes to the version's wire layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let partition_bytes = self.partition.wire_bytes();
        let mut buf = Vec::with_capacity(8 + partition_bytes.len() + 4 + self.uuid.len());
        buf.extend_from_slice(&self.version.to_be_bytes());
        if self.version >= BLOB_ID_V2 {
            buf.push(self.flags_byte());
            buf.push(self.datacenter_id as u8);
            buf.extend_from_slice(&self.account_id.to_be_bytes());
            buf.extend_from_slice(&self.container_id.to_be_bytes());
        }
        buf.extend_from_slice(partition_bytes);
        buf.extend_from_slice(&(self.uuid.len() as u32).to_be_bytes());
        buf.extend_from_slice(self.uuid.as_bytes());
        buf
    }

    /// The flags byte for V3+, or V2's reserved zero byte.
    fn flags_byte(&self) -> u8 {
        if self.version < BLOB_ID_V3 {
            return 0;
        }
        let mut flags = 0u8;
        if self.id_type == BlobIdType::Crafted {
            flags |= FLAG_CRAFTED;
        }
        if self.version >= BLOB_ID_V4 && self.is_encrypted {
            flags |= FLAG_ENCRYPTED;
        }
        if self.version >= BLOB_ID_V5 {
            if let Some(data_type) = self.data_type {
                flags |= data_type.to_bits() << DATA_TYPE_SHIFT;
            }
        }
        flags
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Wire version of this identifier.
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Provenance of this identifier. V1/V2 ids are always native.
    pub fn id_type(&self) -> BlobIdType {
        self.id_type
    }

    /// Datacenter the blob was created in, or [`UNKNOWN_DATACENTER_ID`].
    pub fn datacenter_id(&self) -> i8 {
        self.datacenter_id
    }

    /// Account the blob belongs to, or [`UNKNOWN_ACCOUNT_ID`].
    pub fn account_id(&self) -> i16 {
        self.account_id
    }

    /// Container the blob belongs to, or [`UNKNOWN_CONTAINER_ID`].
    pub fn container_id(&self) -> i16 {
        self.container_id
    }

    /// Partition the blob is stored in.
    pub fn partition(&self) -> &Arc<dyn PartitionId> {
        &self.partition
    }

    /// True if the blob content is encrypted. Always false below V4.
    pub fn is_encrypted(&self) -> bool {
        self.is_encrypted
    }

    /// Payload kind, present on V5 ids only.
    pub fn data_type(&self) -> Option<BlobDataType> {
        self.data_type
    }

    /// UUID portion of the identifier.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// True if the id is bound to the given account and container.
    ///
    /// V1 ids predate the binding and match any pair.
    pub fn is_account_container_match(&self, account_id: i16, container_id: i16) -> bool {
        self.version == BLOB_ID_V1
            || (self.account_id == account_id && self.container_id == container_id)
    }

    /// Comparison collapses V4/V5 into V3's slot: once the scheme
    /// stabilised, the uuid became the primary key.
    fn version_rank(&self) -> u16 {
        self.version.min(BLOB_ID_V3)
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&URL_SAFE_NO_PAD.encode(self.to_bytes()))
    }
}

impl Ord for BlobId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version_rank()
            .cmp(&other.version_rank())
            .then_with(|| {
                if self.version_rank() <= BLOB_ID_V2 {
                    // How partitions order is the cluster map's business;
                    // delegate rather than interpret their wire form.
                    self.partition
                        .compare_to(other.partition.as_ref())
                        .then_with(|| self.uuid.cmp(&other.uuid))
                } else {
                    self.uuid.cmp(&other.uuid)
                }
            })
    }
}

impl PartialOrd for BlobId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Equality follows the comparison key, so ordered and hashed collections
/// agree on which ids are the same.
impl PartialEq for BlobId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BlobId {}

impl Hash for BlobId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // The partition is left out: equality already requires matching
        // version rank and uuid, and the codec stays agnostic of how a
        // partition encodes or orders itself.
        self.version_rank().hash(state);
        self.uuid.hash(state);
    }
}

/// Everything up to and including the partition, shared by the decode entry
/// points.
struct DecodedPrefix {
    version: u16,
    id_type: BlobIdType,
    datacenter_id: i8,
    account_id: i16,
    container_id: i16,
    is_encrypted: bool,
    data_type: Option<BlobDataType>,
    partition: Arc<dyn PartitionId>,
}

impl DecodedPrefix {
    fn read(
        stream: &mut dyn Read,
        directory: &dyn PartitionDirectory,
    ) -> Result<Self, BlobIdError> {
        let version = read_u16(stream)?;
        let (id_type, datacenter_id, account_id, container_id, is_encrypted, data_type) =
            match version {
                BLOB_ID_V1 => (
                    BlobIdType::Native,
                    UNKNOWN_DATACENTER_ID,
                    UNKNOWN_ACCOUNT_ID,
                    UNKNOWN_CONTAINER_ID,
                    false,
                    None,
                ),
                BLOB_ID_V2 => {
                    // Reserved byte; always written as zero, never inspected.
                    let _reserved = read_u8(stream)?;
                    let datacenter_id = read_u8(stream)? as i8;
                    let account_id = read_i16(stream)?;
                    let container_id = read_i16(stream)?;
                    (
                        BlobIdType::Native,
                        datacenter_id,
                        account_id,
                        container_id,
                        false,
                        None,
                    )
                }
                BLOB_ID_V3 | BLOB_ID_V4 | BLOB_ID_V5 => {
                    let flags = read_u8(stream)?;
                    let datacenter_id = read_u8(stream)? as i8;
                    let account_id = read_i16(stream)?;
                    let container_id = read_i16(stream)?;
                    let id_type = if flags & FLAG_CRAFTED != 0 {
                        BlobIdType::Crafted
                    } else {
                        BlobIdType::Native
                    };
                    // V3 ids may carry the encryption bit, but the field only
                    // became meaningful in V4.
                    let is_encrypted = version >= BLOB_ID_V4 && flags & FLAG_ENCRYPTED != 0;
                    let data_type = if version >= BLOB_ID_V5 {
                        Some(BlobDataType::from_bits(
                            (flags & DATA_TYPE_MASK) >> DATA_TYPE_SHIFT,
                        )?)
                    } else {
                        None
                    };
                    (
                        id_type,
                        datacenter_id,
                        account_id,
                        container_id,
                        is_encrypted,
                        data_type,
                    )
                }
                other => return Err(BlobIdError::UnknownVersion { version: other }),
            };
        let partition = directory.read_partition(stream)?;
        Ok(Self {
            version,
            id_type,
            datacenter_id,
            account_id,
            container_id,
            is_encrypted,
            data_type,
            partition,
        })
    }

    fn into_blob_id(self, uuid: String) -> Result<BlobId, BlobIdError> {
        BlobId::with_uuid(
            self.version,
            self.id_type,
            self.datacenter_id,
            self.account_id,
            self.container_id,
            self.partition,
            self.is_encrypted,
            self.data_type,
            uuid,
        )
    }
}

// ----------------------------------------------------------------------
// String-prefix accessors
// ----------------------------------------------------------------------
//
// Routing layers interrogate ids far more often than they fully decode
// them, so these read just enough of the base64 prefix to answer.

/// Decodes at least `n` leading wire bytes out of an encoded id string.
fn decode_prefix(id: &str, n: usize) -> Result<Vec<u8>, BlobIdError> {
    // Four base64 chars carry three wire bytes; round up to whole groups.
    let chars = n.div_ceil(3) * 4;
    let prefix = &id.as_bytes()[..id.len().min(chars)];
    let bytes = URL_SAFE_NO_PAD.decode(prefix)?;
    if bytes.len() < n {
        return Err(BlobIdError::TruncatedInput(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("need a {n} byte prefix, got {}", bytes.len()),
        )));
    }
    Ok(bytes)
}

/// Reads the wire version out of an encoded id string.
pub fn version_of(id: &str) -> Result<u16, BlobIdError> {
    let bytes = decode_prefix(id, 2)?;
    let version = u16::from_be_bytes([bytes[0], bytes[1]]);
    if !(BLOB_ID_V1..=BLOB_ID_V5).contains(&version) {
        return Err(BlobIdError::UnknownVersion { version });
    }
    Ok(version)
}

/// True if the encoded id carries the encryption bit.
///
/// Ids below V4 are never encrypted, whatever their flags byte says.
pub fn is_encrypted(id: &str) -> Result<bool, BlobIdError> {
    match version_of(id)? {
        BLOB_ID_V1 | BLOB_ID_V2 | BLOB_ID_V3 => Ok(false),
        _ => {
            let bytes = decode_prefix(id, 3)?;
            Ok(bytes[2] & FLAG_ENCRYPTED != 0)
        }
    }
}

/// True if the encoded id was crafted. Ids below V3 are always native.
pub fn is_crafted(id: &str) -> Result<bool, BlobIdError> {
    match version_of(id)? {
        BLOB_ID_V1 | BLOB_ID_V2 => Ok(false),
        _ => {
            let bytes = decode_prefix(id, 3)?;
            Ok(bytes[2] & FLAG_CRAFTED != 0)
        }
    }
}

/// Account and container of an encoded id.
///
/// V1 ids return the unknown sentinels.
pub fn account_and_container(id: &str) -> Result<(i16, i16), BlobIdError> {
    match version_of(id)? {
        BLOB_ID_V1 => Ok((UNKNOWN_ACCOUNT_ID, UNKNOWN_CONTAINER_ID)),
        _ => {
            let bytes = decode_prefix(id, 8)?;
            Ok((
                i16::from_be_bytes([bytes[4], bytes[5]]),
                i16::from_be_bytes([bytes[6], bytes[7]]),
            ))
        }
    }
}

// ----------------------------------------------------------------------
// Wire reading helpers
// ----------------------------------------------------------------------

fn read_u8(stream: &mut dyn Read) -> Result<u8, BlobIdError> {
    let mut buf = [0u8; 1];
    stream.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u16(stream: &mut dyn Read) -> Result<u16, BlobIdError> {
    let mut buf = [0u8; 2];
    stream.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

fn read_i16(stream: &mut dyn Read) -> Result<i16, BlobIdError> {
    let mut buf = [0u8; 2];
    stream.read_exact(&mut buf)?;
    Ok(i16::from_be_bytes(buf))
}

fn read_u32(stream: &mut dyn Read) -> Result<u32, BlobIdError> {
    let mut buf = [0u8; 4];
    stream.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use silo_clustermap::StaticPartitionDirectory;

    fn directory() -> StaticPartitionDirectory {
        StaticPartitionDirectory::new(3)
    }

    fn partition(directory: &StaticPartitionDirectory, index: u64) -> Arc<dyn PartitionId> {
        directory.get(0, index).expect("partition registered")
    }

    #[test]
    fn test_flag_byte_bit_positions() {
        let directory = directory();
        let id = BlobId::new(
            BLOB_ID_V5,
            BlobIdType::Crafted,
            7,
            100,
            200,
            partition(&directory, 1),
            true,
            Some(BlobDataType::Metadata),
        )
        .unwrap();
        let bytes = id.to_bytes();
        assert_eq!(bytes[..2], BLOB_ID_V5.to_be_bytes());
        // crafted (bit 0) | encrypted (bit 1) | metadata (bits 2-3 = 01)
        assert_eq!(bytes[2], 0b0000_0111);
        assert_eq!(bytes[3], 7);
        assert_eq!(bytes[4..6], 100i16.to_be_bytes());
        assert_eq!(bytes[6..8], 200i16.to_be_bytes());
    }

    #[test]
    fn test_v2_reserved_byte_is_zero() {
        let directory = directory();
        let id = BlobId::new(
            BLOB_ID_V2,
            BlobIdType::Crafted,
            3,
            10,
            20,
            partition(&directory, 0),
            true,
            None,
        )
        .unwrap();
        assert_eq!(id.to_bytes()[2], 0);
        // V2 cannot carry type or encryption; construction pins them.
        assert_eq!(id.id_type(), BlobIdType::Native);
        assert!(!id.is_encrypted());
    }

    #[test]
    fn test_v1_pins_routing_sentinels() {
        let directory = directory();
        let id = BlobId::new(
            BLOB_ID_V1,
            BlobIdType::Native,
            9,
            42,
            43,
            partition(&directory, 0),
            false,
            None,
        )
        .unwrap();
        assert_eq!(id.datacenter_id(), UNKNOWN_DATACENTER_ID);
        assert_eq!(id.account_id(), UNKNOWN_ACCOUNT_ID);
        assert_eq!(id.container_id(), UNKNOWN_CONTAINER_ID);
        assert!(id.is_account_container_match(123, -45));
    }

    #[test]
    fn test_unknown_version_rejected_at_construction() {
        let directory = directory();
        let err = BlobId::new(
            6,
            BlobIdType::Native,
            0,
            0,
            0,
            partition(&directory, 0),
            false,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, BlobIdError::UnknownVersion { version: 6 }));
    }

    #[test]
    fn test_bad_data_type_bits_rejected() {
        let directory = directory();
        let id = BlobId::new(
            BLOB_ID_V5,
            BlobIdType::Native,
            1,
            2,
            3,
            partition(&directory, 0),
            false,
            Some(BlobDataType::Simple),
        )
        .unwrap();
        let mut bytes = id.to_bytes();
        // Force the reserved data-type pattern 0b11.
        bytes[2] |= DATA_TYPE_MASK;
        let err = BlobId::from_bytes(&bytes, &directory).unwrap_err();
        assert!(matches!(err, BlobIdError::BadDataType { bits: 3 }));
    }

    #[test]
    fn test_craft_rejects_pre_v3_targets() {
        let directory = directory();
        let id = BlobId::new(
            BLOB_ID_V3,
            BlobIdType::Native,
            1,
            2,
            3,
            partition(&directory, 0),
            false,
            None,
        )
        .unwrap();
        for target in [BLOB_ID_V1, BLOB_ID_V2] {
            let err = BlobId::craft(&id, target, 4, 5).unwrap_err();
            assert!(matches!(err, BlobIdError::InvalidCraftTarget { .. }));
        }
    }

    #[test]
    fn test_craft_upgrades_data_type_to_default() {
        let directory = directory();
        let id = BlobId::new(
            BLOB_ID_V3,
            BlobIdType::Native,
            1,
            2,
            3,
            partition(&directory, 0),
            false,
            None,
        )
        .unwrap();
        let crafted = BlobId::craft(&id, BLOB_ID_V5, 4, 5).unwrap();
        assert_eq!(crafted.id_type(), BlobIdType::Crafted);
        assert_eq!(crafted.data_type(), Some(BlobDataType::DataChunk));
        assert_eq!(crafted.uuid(), id.uuid());
    }

    #[test]
    fn test_version_rank_ordering() {
        let directory = directory();
        let part = partition(&directory, 0);
        let v1 = BlobId::new(
            BLOB_ID_V1,
            BlobIdType::Native,
            0,
            0,
            0,
            Arc::clone(&part),
            false,
            None,
        )
        .unwrap();
        let v2 = BlobId::new(
            BLOB_ID_V2,
            BlobIdType::Native,
            0,
            0,
            0,
            Arc::clone(&part),
            false,
            None,
        )
        .unwrap();
        let v3 = BlobId::new(
            BLOB_ID_V3,
            BlobIdType::Native,
            0,
            0,
            0,
            Arc::clone(&part),
            false,
            None,
        )
        .unwrap();
        let v4 = BlobId::new(
            BLOB_ID_V4,
            BlobIdType::Native,
            0,
            0,
            0,
            Arc::clone(&part),
            false,
            None,
        )
        .unwrap();
        assert!(v1 < v2);
        assert!(v2 < v3);
        assert!(v1 < v4);
        assert!(v2 < v4);
        // V3 and V4 rank equal; the uuid decides.
        assert_eq!(v3.cmp(&v4), v3.uuid().cmp(v4.uuid()));
    }

    #[test]
    fn test_v1_ordering_delegates_to_partition_compare() {
        let directory = directory();
        let uuid = "2b5e9c1a-7d44-4f0b-a111-90a7c0ffee00";
        let a = BlobId::with_uuid(
            BLOB_ID_V1,
            BlobIdType::Native,
            0,
            0,
            0,
            partition(&directory, 0),
            false,
            None,
            uuid.to_string(),
        )
        .unwrap();
        let b = BlobId::with_uuid(
            BLOB_ID_V1,
            BlobIdType::Native,
            0,
            0,
            0,
            partition(&directory, 2),
            false,
            None,
            uuid.to_string(),
        )
        .unwrap();
        // Identical uuids, so the partitions' own order decides.
        assert_eq!(
            a.cmp(&b),
            a.partition().compare_to(b.partition().as_ref())
        );
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn test_prefix_accessors_reject_malformed_strings() {
        assert!(version_of("").is_err());
        assert!(is_crafted("").is_err());
        assert!(matches!(
            is_crafted("ZZZZ"),
            Err(BlobIdError::UnknownVersion { .. })
        ));
        assert!(matches!(
            is_encrypted("!!!!"),
            Err(BlobIdError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_prefix_accessors_match_full_decode() {
        let directory = directory();
        let id = BlobId::new(
            BLOB_ID_V4,
            BlobIdType::Crafted,
            -3,
            -100,
            300,
            partition(&directory, 2),
            true,
            None,
        )
        .unwrap();
        let id_string = id.to_string();
        assert_eq!(version_of(&id_string).unwrap(), BLOB_ID_V4);
        assert!(is_crafted(&id_string).unwrap());
        assert!(is_encrypted(&id_string).unwrap());
        assert_eq!(account_and_container(&id_string).unwrap(), (-100, 300));
    }
}
