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

//! Error types for the cluster map.

use thiserror::Error;

/// Errors that can occur while resolving cluster map entities.
#[derive(Error, Debug)]
pub enum ClusterMapError {
    /// Partition bytes parsed but name a partition this map does not know.
    #[error("Partition not in cluster map: {0}")]
    UnknownPartition(String),

    /// The input ended before a full partition identifier could be read.
    #[error("Truncated partition identifier: {0}")]
    Truncated(#[from] std::io::Error),
}
