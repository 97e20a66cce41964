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

//! Implementation of the Bulk API
//!
//! A bulk body is a stream of documents, each terminated by the separator of
//! the body's encoding: a metadata line per action, followed by the document
//! for index, create and update actions.  Every document in the stream has to
//! be in the same encoding, and only JSON and SMILE can be streamed.

use serde::Serialize;

use crate::config::Config;
use crate::content::negotiate::negotiate_bulk;
use crate::content::ContentEncoding;
use crate::error::EsError;
use crate::json::{FieldBased, NoOuter, ShouldSkip};
use crate::request::{Body, Method};
use crate::units::Duration;

use super::common::{FetchSource, RefreshPolicy, SeqNoPrimaryTerm, VersionType};
use super::delete::DeleteOperation;
use super::index::IndexOperation;
use super::params::Params;
use super::update::UpdateOperation;
use super::ToHttpRequest;

/// One write inside a bulk request.  Each wraps the single-document operation
/// it corresponds to; an `IndexOperation` with `with_create(true)` becomes a
/// `create` action.
#[derive(Debug, Clone)]
pub enum Action {
    Index(IndexOperation),
    Update(UpdateOperation),
    Delete(DeleteOperation),
}

from!(IndexOperation, Action, Index);
from!(UpdateOperation, Action, Update);
from!(DeleteOperation, Action, Delete);

impl Action {
    /// Create action, fails if the document already exists
    pub fn create(index: IndexOperation) -> Self {
        Action::Index(index.with_create(true))
    }

    fn op_type(&self) -> &'static str {
        match *self {
            Action::Index(ref index) if index.create => "create",
            Action::Index(_) => "index",
            Action::Update(_) => "update",
            Action::Delete(_) => "delete",
        }
    }

    /// The encodings of every document this action carries
    fn document_encodings(&self) -> Vec<ContentEncoding> {
        match *self {
            Action::Index(ref index) => vec![index.source.encoding()],
            Action::Update(ref update) => update
                .doc
                .iter()
                .chain(update.upsert.iter())
                .map(|source| source.encoding())
                .collect(),
            Action::Delete(_) => Vec::new(),
        }
    }

    fn metadata(&self) -> ActionMetadata<'_> {
        match *self {
            Action::Index(ref index) => ActionMetadata {
                pipeline: index.pipeline.as_deref(),
                ..ActionMetadata::common(
                    &index.index,
                    index.id.as_deref(),
                    index.routing.as_deref(),
                    index.version,
                    index.version_type,
                    index.seq_no_primary_term,
                )
            },
            Action::Update(ref update) => ActionMetadata {
                retry_on_conflict: Some(update.retry_on_conflict).filter(|r| *r > 0),
                fetch_source: update.fetch_source.as_ref(),
                ..ActionMetadata::common(
                    &update.index,
                    Some(update.id.as_str()),
                    update.routing.as_deref(),
                    update.version,
                    update.version_type,
                    update.seq_no_primary_term,
                )
            },
            Action::Delete(ref delete) => ActionMetadata::common(
                &delete.index,
                Some(delete.id.as_str()),
                delete.routing.as_deref(),
                delete.version,
                delete.version_type,
                delete.seq_no_primary_term,
            ),
        }
    }

    /// Append this action to the bulk body
    fn write(&self, encoding: ContentEncoding, body: &mut Vec<u8>) -> Result<(), EsError> {
        let separator = encoding.stream_separator();
        let metadata = FieldBased::new(self.op_type(), self.metadata(), NoOuter);
        body.extend(encoding.write(&metadata)?);
        body.push(separator);

        match *self {
            Action::Index(ref index) => {
                body.extend(index.source.reencode(encoding)?);
                body.push(separator);
            }
            Action::Update(ref update) => {
                body.extend(encoding.write(&update.body_value()?)?);
                body.push(separator);
            }
            Action::Delete(_) => (),
        }
        Ok(())
    }
}

/// The `{"<op_type>": {...}}` line preceding each action
#[derive(Debug, Default, Serialize)]
struct ActionMetadata<'a> {
    #[serde(rename = "_index", skip_serializing_if = "ShouldSkip::should_skip")]
    index: Option<&'a str>,
    #[serde(rename = "_id", skip_serializing_if = "ShouldSkip::should_skip")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    routing: Option<&'a str>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    version: Option<i64>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    version_type: VersionType,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    if_seq_no: Option<i64>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    if_primary_term: Option<u64>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    pipeline: Option<&'a str>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    retry_on_conflict: Option<u32>,
    #[serde(rename = "_source", skip_serializing_if = "ShouldSkip::should_skip")]
    fetch_source: Option<&'a FetchSource>,
}

impl<'a> ActionMetadata<'a> {
    fn common(
        index: &'a str,
        id: Option<&'a str>,
        routing: Option<&'a str>,
        version: Option<i64>,
        version_type: VersionType,
        seq_no_primary_term: Option<SeqNoPrimaryTerm>,
    ) -> Self {
        ActionMetadata {
            index: Some(index).filter(|i| !i.is_empty()),
            id: id.filter(|i| !i.is_empty()),
            routing: routing.filter(|r| !r.is_empty()),
            version,
            version_type,
            if_seq_no: seq_no_primary_term.map(|s| s.seq_no),
            if_primary_term: seq_no_primary_term.map(|s| s.primary_term),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BulkOperation {
    actions: Vec<Action>,
    timeout: Option<Duration>,
    refresh: RefreshPolicy,
}

impl BulkOperation {
    pub fn new(actions: Vec<Action>) -> Self {
        BulkOperation {
            actions,
            ..Default::default()
        }
    }

    pub fn add<A: Into<Action>>(mut self, action: A) -> Self {
        self.actions.push(action.into());
        self
    }

    add_field!(with_timeout, timeout, Duration);
    add_value!(with_refresh, refresh, RefreshPolicy);

    /// The single encoding the whole body will be written in
    fn negotiate(&self) -> Result<ContentEncoding, EsError> {
        negotiate_bulk(self.actions.iter().flat_map(Action::document_encodings))
    }
}

impl ToHttpRequest for BulkOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok("/_bulk".to_owned())
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_refresh_policy(self.refresh)
    }

    fn body(&self, _config: &Config) -> Result<Option<Body>, EsError> {
        let encoding = self.negotiate()?;
        debug!(
            "Bulk of {} actions encoded as {}",
            self.actions.len(),
            encoding
        );

        let mut bytes = Vec::new();
        for action in &self.actions {
            action.write(encoding, &mut bytes)?;
        }
        trace!("Bulk body: {}", String::from_utf8_lossy(&bytes));
        Ok(Some(Body::new(bytes, encoding)))
    }
}
