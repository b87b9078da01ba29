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

//! Configuration for the resource health policies.

use serde::{Deserialize, Serialize};

/// Tuning for the fixed-backoff failure detector.
///
/// A resource is marked down once `failure_count_threshold` errors land
/// within a sliding window of `failure_window_ms`, and is retried after
/// `retry_backoff_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedBackoffPolicyConfig {
    /// Sliding window over which errors are counted, in milliseconds.
    pub failure_window_ms: u64,
    /// Number of errors inside the window that marks the resource down.
    pub failure_count_threshold: usize,
    /// How long the resource stays down before it is retried, in milliseconds.
    pub retry_backoff_ms: u64,
}

impl Default for FixedBackoffPolicyConfig {
    fn default() -> Self {
        Self {
            failure_window_ms: 60_000,
            failure_count_threshold: 5,
            retry_backoff_ms: 30_000,
        }
    }
}
