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

//! Opaque partition identifiers and the directory that resolves them.

use crate::error::ClusterMapError;
use std::cmp::Ordering;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

/// A logical shard of the blob store, addressable by an opaque byte identifier.
///
/// Consumers such as the blob identifier codec treat partitions as a black
/// box: they embed the wire form verbatim and ask a [`PartitionDirectory`] to
/// re-read it. The wire form must therefore be self-describing: the
/// directory knows how many bytes to consume without an outer length prefix.
pub trait PartitionId: fmt::Debug + fmt::Display + Send + Sync {
    /// Self-describing wire form of this partition identifier.
    fn wire_bytes(&self) -> &[u8];

    /// Total order among partitions of the same cluster map.
    ///
    /// The order is a property of the partition implementation. Callers must
    /// not assume it can be recovered from the wire form.
    fn compare_to(&self, other: &dyn PartitionId) -> Ordering;
}

/// Resolves partition identifiers from their wire form.
pub trait PartitionDirectory: Send + Sync {
    /// Reads one partition identifier from `stream`, consuming exactly the
    /// bytes of its wire form and leaving everything after it unread.
    ///
    /// # Errors
    ///
    /// Returns `ClusterMapError::UnknownPartition` if the bytes parse but do
    /// not name a partition in this map, or `ClusterMapError::Truncated` if
    /// the stream ends early.
    fn read_partition(
        &self,
        stream: &mut dyn Read,
    ) -> Result<Arc<dyn PartitionId>, ClusterMapError>;
}
