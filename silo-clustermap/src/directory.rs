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

//! In-memory partition directory.
//!
//! The simplest real implementation of [`PartitionDirectory`]: a fixed set of
//! partitions registered up front. Production cluster maps replace this with
//! a directory backed by the cluster topology; the wire form stays the same.

use crate::error::ClusterMapError;
use crate::partition::{PartitionDirectory, PartitionId};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

/// Wire size of a static partition identifier: class tag plus index.
pub const PARTITION_WIRE_LEN: usize = 10;

/// A partition with a fixed 10-byte wire form: `[class:u16][index:u64]`,
/// big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPartition {
    class: u16,
    index: u64,
    wire: [u8; PARTITION_WIRE_LEN],
}

impl StaticPartition {
    /// Creates a partition identifier for the given class and index.
    pub fn new(class: u16, index: u64) -> Self {
        let mut wire = [0u8; PARTITION_WIRE_LEN];
        wire[..2].copy_from_slice(&class.to_be_bytes());
        wire[2..].copy_from_slice(&index.to_be_bytes());
        Self { class, index, wire }
    }

    /// Partition class tag.
    pub fn class(&self) -> u16 {
        self.class
    }

    /// Partition index within its class.
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl fmt::Display for StaticPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Partition[{}:{}]", self.class, self.index)
    }
}

impl PartitionId for StaticPartition {
    fn wire_bytes(&self) -> &[u8] {
        &self.wire
    }

    fn compare_to(&self, other: &dyn PartitionId) -> Ordering {
        // The fixed-width big-endian wire form sorts exactly like the
        // numeric (class, index) pair.
        self.wire.as_slice().cmp(other.wire_bytes())
    }
}

/// Partition directory over a fixed, in-memory set of partitions.
pub struct StaticPartitionDirectory {
    partitions: HashMap<(u16, u64), Arc<StaticPartition>>,
}

impl StaticPartitionDirectory {
    /// Creates a directory holding `count` partitions of class 0, indexed
    /// `0..count`.
    pub fn new(count: u64) -> Self {
        Self::with_partitions((0..count).map(|index| StaticPartition::new(0, index)))
    }

    /// Creates a directory from an explicit partition set.
    pub fn with_partitions(partitions: impl IntoIterator<Item = StaticPartition>) -> Self {
        let partitions = partitions
            .into_iter()
            .map(|p| ((p.class(), p.index()), Arc::new(p)))
            .collect();
        Self { partitions }
    }

    /// Looks up a registered partition.
    pub fn get(&self, class: u16, index: u64) -> Option<Arc<StaticPartition>> {
        self.partitions.get(&(class, index)).cloned()
    }

    /// Number of partitions in the directory.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// True if the directory holds no partitions.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

impl PartitionDirectory for StaticPartitionDirectory {
    fn read_partition(
        &self,
        stream: &mut dyn Read,
    ) -> Result<Arc<dyn PartitionId>, ClusterMapError> {
        let mut wire = [0u8; PARTITION_WIRE_LEN];
        stream.read_exact(&mut wire)?;
        let class = u16::from_be_bytes([wire[0], wire[1]]);
        let index = u64::from_be_bytes([
            wire[2], wire[3], wire[4], wire[5], wire[6], wire[7], wire[8], wire[9],
        ]);
        match self.get(class, index) {
            Some(partition) => Ok(partition),
            None => Err(ClusterMapError::UnknownPartition(format!(
                "class {class}, index {index}"
            ))),
        }
    }
}
