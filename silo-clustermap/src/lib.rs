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

//! Silo cluster map primitives.
//!
//! This crate provides the building blocks the cluster map is made of:
//! - Opaque partition identifiers and the directory that resolves them
//! - Per-resource health policies with failure windows and retry backoff
//! - Hardware-state views for data nodes and disks

pub mod config;
pub mod directory;
pub mod error;
pub mod hardware;
pub mod partition;
pub mod state_policy;
pub mod time;

pub use config::FixedBackoffPolicyConfig;
pub use directory::{StaticPartition, StaticPartitionDirectory, PARTITION_WIRE_LEN};
pub use error::ClusterMapError;
pub use hardware::{DataNodeStatePolicy, DiskStatePolicy, HardwareState};
pub use partition::{PartitionDirectory, PartitionId};
pub use state_policy::{FixedBackoffResourceStatePolicy, ResourceStatePolicy};
pub use time::{ManualTime, MonotonicTime, TimeSource};
