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

//! Update-by-query, delete-by-query, and rethrottling of running by-query
//! and reindex tasks

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::endpoint::{indices_keyword_endpoint, EndpointBuilder};
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::common::{strings, ActiveShardCount, IndicesOptions};
use super::params::Params;
use super::script::Script;
use super::ToHttpRequest;

const DEFAULT_SCROLL_SIZE: u32 = 1000;

fn default_scroll() -> Duration {
    Duration::minutes(5)
}

/// Options shared by the operations that scroll over a query's matches
#[derive(Debug, Clone)]
struct ScrollSettings {
    routing: Option<String>,
    refresh: bool,
    timeout: Option<Duration>,
    wait_for_active_shards: ActiveShardCount,
    requests_per_second: f32,
    indices_options: Option<IndicesOptions>,
    abort_on_version_conflict: bool,
    scroll_size: u32,
    scroll: Duration,
    max_docs: u32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        ScrollSettings {
            routing: None,
            refresh: false,
            timeout: None,
            wait_for_active_shards: ActiveShardCount::Default,
            requests_per_second: f32::INFINITY,
            indices_options: Some(IndicesOptions::strict_expand_open()),
            abort_on_version_conflict: true,
            scroll_size: DEFAULT_SCROLL_SIZE,
            scroll: default_scroll(),
            max_docs: 0,
        }
    }
}

impl ScrollSettings {
    fn params(&self, params: Params) -> Params {
        let params = params
            .with_refresh(self.refresh)
            .with_timeout(self.timeout)
            .with_wait_for_active_shards(self.wait_for_active_shards, ActiveShardCount::Default)
            .with_requests_per_second(self.requests_per_second)
            .with_indices_options(self.indices_options)
            .put_opt(
                "conflicts",
                Some("proceed").filter(|_| !self.abort_on_version_conflict),
            )
            .put_opt(
                "scroll_size",
                Some(self.scroll_size).filter(|s| *s != DEFAULT_SCROLL_SIZE),
            )
            .put_opt("scroll", Some(self.scroll).filter(|s| *s != default_scroll()));
        params.put_opt("max_docs", Some(self.max_docs).filter(|m| *m > 0))
    }
}

macro_rules! add_setting_field {
    ($n:ident, $f:ident, $t:ty) => {
        pub fn $n<T: Into<$t>>(mut self, val: T) -> Self {
            self.settings.$f = Some(val.into());
            self
        }
    };
}

macro_rules! add_setting_value {
    ($n:ident, $f:ident, $t:ty) => {
        pub fn $n(mut self, val: $t) -> Self {
            self.settings.$f = val;
            self
        }
    };
}

macro_rules! scroll_settings {
    () => {
        add_setting_field!(with_routing, routing, String);
        add_setting_value!(with_refresh, refresh, bool);
        add_setting_field!(with_timeout, timeout, Duration);
        add_setting_value!(
            with_wait_for_active_shards,
            wait_for_active_shards,
            ActiveShardCount
        );
        add_setting_value!(with_requests_per_second, requests_per_second, f32);
        add_setting_value!(with_indices_options, indices_options, Option<IndicesOptions>);
        add_setting_value!(
            with_abort_on_version_conflict,
            abort_on_version_conflict,
            bool
        );
        add_setting_value!(with_scroll_size, scroll_size, u32);
        add_setting_value!(with_scroll, scroll, Duration);
        add_setting_value!(with_max_docs, max_docs, u32);
    };
}

#[derive(Serialize)]
struct ByQueryBody<'a> {
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    query: Option<&'a Value>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    script: Option<&'a Script>,
}

/// Run a script, or an ingest pipeline, over every document matching a
/// query
#[derive(Debug, Clone)]
pub struct UpdateByQueryOperation {
    indices: Vec<String>,
    query: Option<Value>,
    script: Option<Script>,
    pipeline: Option<String>,
    settings: ScrollSettings,
}

impl UpdateByQueryOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        UpdateByQueryOperation {
            indices: strings(indices),
            query: None,
            script: None,
            pipeline: None,
            settings: ScrollSettings::default(),
        }
    }

    add_field!(with_query, query, Value);
    add_field!(with_script, script, Script);
    add_field!(with_pipeline, pipeline, String);
    scroll_settings!();
}

impl ToHttpRequest for UpdateByQueryOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_update_by_query")
    }

    fn params(&self, params: Params) -> Params {
        let params = params
            .with_routing(self.settings.routing.as_deref())
            .with_pipeline(self.pipeline.as_deref());
        self.settings.params(params)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let body = ByQueryBody {
            query: self.query.as_ref(),
            script: self.script.as_ref(),
        };
        Ok(Some(Body::structured(&body, config.body_encoding)?))
    }
}

/// Delete every document matching a query
#[derive(Debug, Clone)]
pub struct DeleteByQueryOperation {
    indices: Vec<String>,
    query: Value,
    size: u32,
    settings: ScrollSettings,
}

impl DeleteByQueryOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>, query: Value) -> Self {
        DeleteByQueryOperation {
            indices: strings(indices),
            query,
            size: 0,
            settings: ScrollSettings::default(),
        }
    }

    add_value!(with_size, size, u32);
    scroll_settings!();
}

impl ToHttpRequest for DeleteByQueryOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_delete_by_query")
    }

    fn params(&self, params: Params) -> Params {
        let params = self
            .settings
            .params(params.with_routing(self.settings.routing.as_deref()));
        params.put_opt("size", Some(self.size).filter(|s| *s > 0))
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let body = ByQueryBody {
            query: Some(&self.query),
            script: None,
        };
        Ok(Some(Body::structured(&body, config.body_encoding)?))
    }
}

/// The kind of task being rethrottled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RethrottleKind {
    Reindex,
    UpdateByQuery,
    DeleteByQuery,
}

impl RethrottleKind {
    fn path(self) -> &'static str {
        match self {
            RethrottleKind::Reindex => "_reindex",
            RethrottleKind::UpdateByQuery => "_update_by_query",
            RethrottleKind::DeleteByQuery => "_delete_by_query",
        }
    }
}

/// Change the `requests_per_second` of a running task
#[derive(Debug, Clone)]
pub struct RethrottleOperation {
    kind: RethrottleKind,
    task_id: String,
    requests_per_second: f32,
}

impl RethrottleOperation {
    /// `task_id` is `node_id:task_number`.  An infinite `requests_per_second`
    /// removes the throttle.
    pub fn new<T: Into<String>>(kind: RethrottleKind, task_id: T, requests_per_second: f32) -> Self {
        RethrottleOperation {
            kind,
            task_id: task_id.into(),
            requests_per_second,
        }
    }
}

impl ToHttpRequest for RethrottleOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok(EndpointBuilder::new()
            .add_part_as_is(self.kind.path())
            .add_part(&self.task_id)?
            .add_part_as_is("_rethrottle")
            .build())
    }

    /// Tasks are listed flat, not grouped by node
    fn params(&self, params: Params) -> Params {
        params
            .with_requests_per_second(self.requests_per_second)
            .put("group_by", "none")
    }
}
