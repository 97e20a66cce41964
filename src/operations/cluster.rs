/*
 * Copyright 2016-2019 Ben Ashford
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Cluster health, and the types only it uses

use std::fmt;

use crate::endpoint::EndpointBuilder;
use crate::error::EsError;
use crate::request::Method;
use crate::units::Duration;

use super::common::{strings, ActiveShardCount};
use super::params::Params;
use super::ToHttpRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            HealthStatus::Green => "green",
            HealthStatus::Yellow => "yellow",
            HealthStatus::Red => "red",
        })
    }
}

/// Priority of pending cluster tasks, for `wait_for_events`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Immediate,
    Urgent,
    High,
    Normal,
    Low,
    Languid,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Priority::Immediate => "immediate",
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
            Priority::Languid => "languid",
        })
    }
}

/// How much detail the health response contains
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    #[default]
    Cluster,
    Indices,
    Shards,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Level::Cluster => "cluster",
            Level::Indices => "indices",
            Level::Shards => "shards",
        })
    }
}

#[derive(Debug, Clone)]
pub struct ClusterHealthOperation {
    indices: Vec<String>,
    wait_for_status: Option<HealthStatus>,
    wait_for_no_relocating_shards: bool,
    wait_for_no_initializing_shards: bool,
    wait_for_active_shards: ActiveShardCount,
    wait_for_nodes: Option<String>,
    wait_for_events: Option<Priority>,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
    local: bool,
    level: Level,
}

impl ClusterHealthOperation {
    /// Health of the whole cluster, or only of `indices` when not empty
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        ClusterHealthOperation {
            indices: strings(indices),
            wait_for_status: None,
            wait_for_no_relocating_shards: false,
            wait_for_no_initializing_shards: false,
            wait_for_active_shards: ActiveShardCount::None,
            wait_for_nodes: None,
            wait_for_events: None,
            timeout: None,
            master_timeout: None,
            local: false,
            level: Level::Cluster,
        }
    }

    add_field!(with_wait_for_status, wait_for_status, HealthStatus);
    add_value!(
        with_wait_for_no_relocating_shards,
        wait_for_no_relocating_shards,
        bool
    );
    add_value!(
        with_wait_for_no_initializing_shards,
        wait_for_no_initializing_shards,
        bool
    );
    add_value!(with_wait_for_active_shards, wait_for_active_shards, ActiveShardCount);
    // e.g. `>=3` or `le(5)`
    add_field!(with_wait_for_nodes, wait_for_nodes, String);
    add_field!(with_wait_for_events, wait_for_events, Priority);
    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
    add_value!(with_local, local, bool);
    add_value!(with_level, level, Level);
}

impl ToHttpRequest for ClusterHealthOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok(EndpointBuilder::new()
            .add_part_as_is("_cluster/health")
            .add_comma_separated_parts(&self.indices)?
            .build())
    }

    fn params(&self, params: Params) -> Params {
        params
            .put_opt("wait_for_status", self.wait_for_status)
            .put_flag(
                "wait_for_no_relocating_shards",
                self.wait_for_no_relocating_shards,
            )
            .put_flag(
                "wait_for_no_initializing_shards",
                self.wait_for_no_initializing_shards,
            )
            .with_wait_for_active_shards(self.wait_for_active_shards, ActiveShardCount::None)
            .put_opt("wait_for_nodes", self.wait_for_nodes.as_deref())
            .put_opt("wait_for_events", self.wait_for_events)
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
            .with_local(self.local)
            .put("level", self.level.to_string())
    }
}
