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

//! Implementation of the Reindex API

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::common::{strings, ActiveShardCount, VersionType};
use super::params::Params;
use super::script::Script;
use super::ToHttpRequest;

#[derive(Serialize)]
struct ReindexSource<'a> {
    index: &'a [String],
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    query: Option<&'a Value>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    size: Option<u32>,
}

#[derive(Serialize)]
struct ReindexDest<'a> {
    index: &'a str,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    routing: Option<&'a str>,
    op_type: &'static str,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    pipeline: Option<&'a str>,
    version_type: VersionType,
}

#[derive(Serialize)]
struct ReindexBody<'a> {
    source: ReindexSource<'a>,
    dest: ReindexDest<'a>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    script: Option<&'a Script>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    conflicts: Option<&'static str>,
}

/// Copy documents from one or more indices into another
#[derive(Debug, Clone)]
pub struct ReindexOperation {
    source_indices: Vec<String>,
    query: Option<Value>,
    batch_size: Option<u32>,

    dest_index: String,
    dest_routing: Option<String>,
    dest_create: bool,
    dest_pipeline: Option<String>,
    dest_version_type: VersionType,
    require_alias: bool,

    script: Option<Script>,
    abort_on_version_conflict: bool,
    refresh: bool,
    timeout: Option<Duration>,
    wait_for_active_shards: ActiveShardCount,
    requests_per_second: f32,
    scroll: Option<Duration>,
    slices: u32,
    max_docs: Option<u32>,
}

impl ReindexOperation {
    pub fn new<S, D>(source_indices: Vec<S>, dest_index: D) -> Self
    where
        S: Into<String>,
        D: Into<String>,
    {
        ReindexOperation {
            source_indices: strings(source_indices),
            query: None,
            batch_size: None,
            dest_index: dest_index.into(),
            dest_routing: None,
            dest_create: false,
            dest_pipeline: None,
            dest_version_type: VersionType::Internal,
            require_alias: false,
            script: None,
            abort_on_version_conflict: true,
            refresh: false,
            timeout: None,
            wait_for_active_shards: ActiveShardCount::Default,
            requests_per_second: f32::INFINITY,
            scroll: None,
            slices: 1,
            max_docs: None,
        }
    }

    add_field!(with_query, query, Value);

    /// Documents fetched per scroll batch
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    add_field!(with_dest_routing, dest_routing, String);
    add_value!(with_dest_create, dest_create, bool);
    add_field!(with_dest_pipeline, dest_pipeline, String);
    add_value!(with_dest_version_type, dest_version_type, VersionType);
    add_value!(with_require_alias, require_alias, bool);
    add_field!(with_script, script, Script);
    add_value!(with_abort_on_version_conflict, abort_on_version_conflict, bool);
    add_value!(with_refresh, refresh, bool);
    add_field!(with_timeout, timeout, Duration);
    add_value!(with_wait_for_active_shards, wait_for_active_shards, ActiveShardCount);
    add_value!(with_requests_per_second, requests_per_second, f32);
    add_field!(with_scroll, scroll, Duration);
    add_value!(with_slices, slices, u32);

    pub fn with_max_docs(mut self, max_docs: u32) -> Self {
        self.max_docs = Some(max_docs);
        self
    }

    /// Start the reindex as a background task rather than waiting for it
    pub fn submit(self) -> SubmitReindexOperation {
        SubmitReindexOperation(self)
    }

    fn reindex_params(&self, params: Params, wait_for_completion: bool) -> Params {
        params
            .with_wait_for_completion(wait_for_completion)
            .with_refresh(self.refresh)
            .with_timeout(self.timeout)
            .with_wait_for_active_shards(self.wait_for_active_shards, ActiveShardCount::Default)
            .with_requests_per_second(self.requests_per_second)
            .put_flag("require_alias", self.require_alias)
            .with_scroll(self.scroll)
            .put("slices", self.slices.to_string())
            .put_opt("max_docs", self.max_docs)
    }

    fn reindex_body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let body = ReindexBody {
            source: ReindexSource {
                index: &self.source_indices,
                query: self.query.as_ref(),
                size: self.batch_size,
            },
            dest: ReindexDest {
                index: &self.dest_index,
                routing: self.dest_routing.as_deref(),
                op_type: if self.dest_create { "create" } else { "index" },
                pipeline: self.dest_pipeline.as_deref(),
                version_type: self.dest_version_type,
            },
            script: self.script.as_ref(),
            conflicts: Some("proceed").filter(|_| !self.abort_on_version_conflict),
        };
        Ok(Some(Body::structured(&body, config.body_encoding)?))
    }
}

impl ToHttpRequest for ReindexOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok("/_reindex".to_owned())
    }

    fn params(&self, params: Params) -> Params {
        self.reindex_params(params, true)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        self.reindex_body(config)
    }
}

/// A reindex that returns a task ID immediately
#[derive(Debug, Clone)]
pub struct SubmitReindexOperation(pub ReindexOperation);

impl ToHttpRequest for SubmitReindexOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        self.0.endpoint()
    }

    fn params(&self, params: Params) -> Params {
        self.0.reindex_params(params, false)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        self.0.reindex_body(config)
    }
}
