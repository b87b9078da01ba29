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

//! Per-resource failure detection with a fixed retry backoff.

use crate::config::FixedBackoffPolicyConfig;
use crate::time::TimeSource;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Determines whether a resource (data node, disk) is up or down.
pub trait ResourceStatePolicy: Send + Sync {
    /// True if the resource is permanently down.
    fn is_hard_down(&self) -> bool;

    /// True if the resource is down, soft or hard.
    fn is_down(&self) -> bool;

    /// Records one error against the resource. May transition it to down.
    fn on_error(&self);
}

/// Marks a resource down once enough errors cluster inside the failure
/// window, and reopens it after a fixed backoff.
///
/// The healthy path of [`is_down`](ResourceStatePolicy::is_down) is a single
/// atomic load; the lock is taken only to record errors and for the one
/// "time to reopen" check while down. Swapping the dual check for a pure
/// atomic or a pure lock changes the contention profile under load, so both
/// halves stay as they are.
pub struct FixedBackoffResourceStatePolicy {
    resource: String,
    hard_down: bool,
    config: FixedBackoffPolicyConfig,
    time: Arc<dyn TimeSource>,
    down: AtomicBool,
    state: Mutex<BackoffState>,
}

#[derive(Debug, Default)]
struct BackoffState {
    /// Timestamps of recent errors. Never grows past the threshold.
    failures: VecDeque<u64>,
    /// Deadline after which the resource reopens. Only meaningful while down.
    down_until: u64,
}

impl FixedBackoffResourceStatePolicy {
    /// Creates a policy for `resource`.
    ///
    /// `hard_down` fixes the resource as permanently unavailable; no error or
    /// backoff ever changes its observed state.
    pub fn new(
        resource: impl Into<String>,
        hard_down: bool,
        config: FixedBackoffPolicyConfig,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            resource: resource.into(),
            hard_down,
            config,
            time,
            down: AtomicBool::new(false),
            state: Mutex::new(BackoffState::default()),
        }
    }

    /// Name of the resource this policy tracks.
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl ResourceStatePolicy for FixedBackoffResourceStatePolicy {
    fn is_hard_down(&self) -> bool {
        self.hard_down
    }

    fn is_down(&self) -> bool {
        if self.hard_down {
            return true;
        }
        if !self.down.load(Ordering::Acquire) {
            return false;
        }
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.time.now_ms() > state.down_until {
            self.down.store(false, Ordering::Release);
            tracing::debug!("resource {} reopened after backoff", self.resource);
            false
        } else {
            true
        }
    }

    fn on_error(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        // Errors while already down are absorbed; recovery is time-driven.
        if self.down.load(Ordering::Acquire) {
            return;
        }
        let now = self.time.now_ms();
        let horizon = now.saturating_sub(self.config.failure_window_ms);
        while state.failures.front().is_some_and(|&t| t < horizon) {
            state.failures.pop_front();
        }
        state.failures.push_back(now);
        if state.failures.len() >= self.config.failure_count_threshold {
            state.failures.clear();
            state.down_until = now + self.config.retry_backoff_ms;
            self.down.store(true, Ordering::Release);
            tracing::warn!(
                backoff_ms = self.config.retry_backoff_ms,
                "resource {} went down",
                self.resource
            );
        }
    }
}
