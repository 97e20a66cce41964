/*
 * Copyright 2015-2019 Ben Ashford
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

//! Implementation of ElasticSearch Index operation

use crate::config::Config;
use crate::content::Source;
use crate::endpoint::EndpointBuilder;
use crate::error::EsError;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::common::{ActiveShardCount, RefreshPolicy, SeqNoPrimaryTerm, VersionType};
use super::params::Params;
use super::ToHttpRequest;

/// An indexing operation
#[derive(Debug, Clone)]
pub struct IndexOperation {
    /// The index into which the document will be added
    pub(crate) index: String,

    /// Optional the ID of the document.
    pub(crate) id: Option<String>,

    /// The document to be indexed, sent exactly as supplied
    pub(crate) source: Source,

    /// Fail if a document with the same ID exists
    pub(crate) create: bool,

    pub(crate) routing: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) version: Option<i64>,
    pub(crate) version_type: VersionType,
    pub(crate) seq_no_primary_term: Option<SeqNoPrimaryTerm>,
    pub(crate) pipeline: Option<String>,
    pub(crate) refresh: RefreshPolicy,
    pub(crate) wait_for_active_shards: ActiveShardCount,
}

impl IndexOperation {
    pub fn new<I: Into<String>>(index: I, source: Source) -> Self {
        IndexOperation {
            index: index.into(),
            id: None,
            source,
            create: false,
            routing: None,
            timeout: None,
            version: None,
            version_type: VersionType::Internal,
            seq_no_primary_term: None,
            pipeline: None,
            refresh: RefreshPolicy::None,
            wait_for_active_shards: ActiveShardCount::Default,
        }
    }

    add_field!(with_id, id, String);
    add_value!(with_create, create, bool);
    add_field!(with_routing, routing, String);
    add_field!(with_timeout, timeout, Duration);
    add_field!(with_version, version, i64);
    add_value!(with_version_type, version_type, VersionType);
    add_field!(with_seq_no_primary_term, seq_no_primary_term, SeqNoPrimaryTerm);
    add_field!(with_pipeline, pipeline, String);
    add_value!(with_refresh, refresh, RefreshPolicy);
    add_value!(with_wait_for_active_shards, wait_for_active_shards, ActiveShardCount);

    fn has_id(&self) -> bool {
        self.id.as_deref().map_or(false, |id| !id.is_empty())
    }
}

impl ToHttpRequest for IndexOperation {
    /// PUT to a known ID, POST to have one generated
    fn method(&self) -> Method {
        if self.has_id() {
            Method::Put
        } else {
            Method::Post
        }
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok(EndpointBuilder::new()
            .add_part(&self.index)?
            .add_optional_part(self.id.as_deref())?
            .add_part_as_is(if self.create { "_create" } else { "" })
            .build())
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_routing(self.routing.as_deref())
            .with_timeout(self.timeout)
            .with_version(self.version)
            .with_version_type(self.version_type)
            .with_seq_no_primary_term(self.seq_no_primary_term)
            .with_pipeline(self.pipeline.as_deref())
            .with_refresh_policy(self.refresh)
            .with_wait_for_active_shards(self.wait_for_active_shards, ActiveShardCount::Default)
    }

    fn body(&self, _config: &Config) -> Result<Option<Body>, EsError> {
        Ok(Some(Body::from(&self.source)))
    }
}
