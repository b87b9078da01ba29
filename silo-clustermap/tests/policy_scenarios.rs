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

//! End-to-end scenarios for the fixed-backoff health policy, including
//! behavior under concurrent callers.

use silo_clustermap::{
    FixedBackoffPolicyConfig, FixedBackoffResourceStatePolicy, ManualTime, ResourceStatePolicy,
    TimeSource,
};
use std::sync::Arc;
use std::thread;

fn scenario_config() -> FixedBackoffPolicyConfig {
    FixedBackoffPolicyConfig {
        failure_window_ms: 1000,
        failure_count_threshold: 3,
        retry_backoff_ms: 500,
    }
}

/// Three errors inside the window trip the detector; the backoff reopens it.
#[test]
fn test_down_and_reopen_timeline() {
    let time = Arc::new(ManualTime::new(0));
    let policy = FixedBackoffResourceStatePolicy::new(
        "node1.dc1",
        false,
        scenario_config(),
        Arc::clone(&time) as Arc<dyn TimeSource>,
    );

    for t in [0, 100, 200] {
        time.set(t);
        policy.on_error();
    }
    assert!(policy.is_down(), "third error in window must mark down");

    time.set(400);
    assert!(policy.is_down(), "still inside the backoff");

    time.set(701);
    assert!(!policy.is_down(), "past down_until the resource reopens");
}

/// An error that slid out of the window no longer counts against the
/// threshold, while errors still inside it do.
#[test]
fn test_window_eviction_keeps_resource_up() {
    let time = Arc::new(ManualTime::new(0));
    let policy = FixedBackoffResourceStatePolicy::new(
        "node2.dc1",
        false,
        scenario_config(),
        Arc::clone(&time) as Arc<dyn TimeSource>,
    );

    time.set(0);
    policy.on_error();
    time.set(600);
    policy.on_error();
    time.set(1001);
    policy.on_error();
    assert!(
        !policy.is_down(),
        "only the error at t=0 left the window, leaving two in it"
    );

    // The survivor from t=600 still counts toward the threshold.
    time.set(1400);
    policy.on_error();
    assert!(policy.is_down());

    // The same error count kept entirely inside the window trips the
    // detector outright.
    let policy = FixedBackoffResourceStatePolicy::new(
        "node3.dc1",
        false,
        scenario_config(),
        Arc::clone(&time) as Arc<dyn TimeSource>,
    );
    for t in [2000, 2500, 2999] {
        time.set(t);
        policy.on_error();
    }
    assert!(policy.is_down());
}

/// Many threads reporting errors concurrently: the transition happens once
/// and every caller settles on the same answer.
#[test]
fn test_concurrent_error_reporting() {
    let time = Arc::new(ManualTime::new(0));
    let policy = Arc::new(FixedBackoffResourceStatePolicy::new(
        "node4.dc1",
        false,
        FixedBackoffPolicyConfig {
            failure_window_ms: 60_000,
            failure_count_threshold: 16,
            retry_backoff_ms: 1_000_000,
        },
        Arc::clone(&time) as Arc<dyn TimeSource>,
    ));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let policy = Arc::clone(&policy);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                policy.on_error();
                policy.is_down();
            }
        }));
    }
    for handle in handles {
        handle.join().expect("error-reporting thread panicked");
    }

    // 800 errors against a threshold of 16 in a wide window: down for sure.
    assert!(policy.is_down());
}

/// Two callers racing the expiry check both observe the reopened state.
#[test]
fn test_concurrent_reopen_is_consistent() {
    let time = Arc::new(ManualTime::new(0));
    let policy = Arc::new(FixedBackoffResourceStatePolicy::new(
        "node5.dc1",
        false,
        scenario_config(),
        Arc::clone(&time) as Arc<dyn TimeSource>,
    ));

    for t in [0, 1, 2] {
        time.set(t);
        policy.on_error();
    }
    assert!(policy.is_down());

    time.set(10_000);
    let mut handles = Vec::new();
    for _ in 0..4 {
        let policy = Arc::clone(&policy);
        handles.push(thread::spawn(move || policy.is_down()));
    }
    for handle in handles {
        assert!(!handle.join().expect("reopen thread panicked"));
    }
}
