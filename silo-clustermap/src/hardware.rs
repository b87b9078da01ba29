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

//! Hardware-level views over the health policies.
//!
//! Data nodes and disks share the same failure detector; these wrappers only
//! translate its boolean answer into the [`HardwareState`] vocabulary the
//! rest of the cluster map speaks.

use crate::config::FixedBackoffPolicyConfig;
use crate::state_policy::{FixedBackoffResourceStatePolicy, ResourceStatePolicy};
use crate::time::TimeSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Operational state of a piece of cluster hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardwareState {
    /// The resource is serving requests.
    Available,
    /// The resource is down, soft or hard.
    Unavailable,
}

/// Health tracking for a data node.
pub struct DataNodeStatePolicy {
    policy: FixedBackoffResourceStatePolicy,
}

impl DataNodeStatePolicy {
    /// Creates a policy for the node at `hostname`.
    ///
    /// A node configured `Unavailable` is hard down and never recovers.
    pub fn new(
        hostname: impl Into<String>,
        initial_state: HardwareState,
        config: FixedBackoffPolicyConfig,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            policy: FixedBackoffResourceStatePolicy::new(
                hostname,
                initial_state == HardwareState::Unavailable,
                config,
                time,
            ),
        }
    }

    /// Current state of the node.
    pub fn state(&self) -> HardwareState {
        if self.policy.is_down() {
            HardwareState::Unavailable
        } else {
            HardwareState::Available
        }
    }

    /// Records one error against the node.
    pub fn on_error(&self) {
        self.policy.on_error();
    }

    /// True if the node was configured permanently unavailable.
    pub fn is_hard_down(&self) -> bool {
        self.policy.is_hard_down()
    }
}

/// Health tracking for a disk on a data node.
pub struct DiskStatePolicy {
    policy: FixedBackoffResourceStatePolicy,
}

impl DiskStatePolicy {
    /// Creates a policy for the disk mounted at `mount_path`.
    pub fn new(
        mount_path: impl Into<String>,
        initial_state: HardwareState,
        config: FixedBackoffPolicyConfig,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            policy: FixedBackoffResourceStatePolicy::new(
                mount_path,
                initial_state == HardwareState::Unavailable,
                config,
                time,
            ),
        }
    }

    /// Current state of the disk.
    pub fn state(&self) -> HardwareState {
        if self.policy.is_down() {
            HardwareState::Unavailable
        } else {
            HardwareState::Available
        }
    }

    /// Records one error against the disk.
    pub fn on_error(&self) {
        self.policy.on_error();
    }

    /// True if the disk was configured permanently unavailable.
    pub fn is_hard_down(&self) -> bool {
        self.policy.is_hard_down()
    }
}
