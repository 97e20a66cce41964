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

//! Implementation of the Multi Search API
//!
//! Like bulk, the body is a stream: a header line with each search's index
//! and options, then the search source, each followed by the separator of
//! the body encoding.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};

use super::super::common::IndicesOptions;
use super::super::params::Params;
use super::super::ToHttpRequest;
use super::{SearchOperation, SearchType};

#[derive(Serialize)]
struct SearchHeader<'a> {
    index: &'a [String],
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    expand_wildcards: Option<&'static str>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    ignore_unavailable: Option<bool>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    allow_no_indices: Option<bool>,
    search_type: SearchType,
    ccs_minimize_roundtrips: bool,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    request_cache: Option<bool>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    preference: Option<&'a str>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    routing: Option<&'a str>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    allow_partial_search_results: Option<bool>,
}

impl<'a> From<&'a SearchOperation> for SearchHeader<'a> {
    /// Indices options are only repeated when they differ from a plain
    /// search's
    fn from(search: &'a SearchOperation) -> SearchHeader<'a> {
        let options = search
            .indices_options
            .filter(|o| *o != IndicesOptions::strict_expand_open());
        SearchHeader {
            index: &search.indices,
            expand_wildcards: options.map(|o| o.expand_wildcards()),
            ignore_unavailable: options.map(|o| o.ignore_unavailable),
            allow_no_indices: options.map(|o| o.allow_no_indices),
            search_type: search.search_type,
            ccs_minimize_roundtrips: search.ccs_minimize_roundtrips,
            request_cache: search.request_cache,
            preference: search.preference.as_deref(),
            routing: search.routing.as_deref(),
            allow_partial_search_results: search.allow_partial_search_results,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MultiSearchOperation {
    searches: Vec<SearchOperation>,
    max_concurrent_searches: Option<u32>,
}

impl MultiSearchOperation {
    pub fn new(searches: Vec<SearchOperation>) -> Self {
        MultiSearchOperation {
            searches,
            max_concurrent_searches: None,
        }
    }

    pub fn add(mut self, search: SearchOperation) -> Self {
        self.searches.push(search);
        self
    }

    pub fn with_max_concurrent_searches(mut self, max: u32) -> Self {
        self.max_concurrent_searches = Some(max);
        self
    }
}

impl ToHttpRequest for MultiSearchOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok("/_msearch".to_owned())
    }

    fn params(&self, params: Params) -> Params {
        params
            .put("typed_keys", "true")
            .put_opt("max_concurrent_searches", self.max_concurrent_searches)
    }

    /// Only stream-safe encodings can be used
    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let encoding = config.body_encoding;
        if !encoding.is_bulk_compatible() {
            return Err(EsError::UnsupportedEncoding(encoding));
        }
        let separator = encoding.stream_separator();
        let empty = Value::Object(Map::new());

        let mut bytes = Vec::new();
        for search in &self.searches {
            bytes.extend(encoding.write(&SearchHeader::from(search))?);
            bytes.push(separator);
            bytes.extend(encoding.write(search.source.as_ref().unwrap_or(&empty))?);
            bytes.push(separator);
        }
        Ok(Some(Body::new(bytes, encoding)))
    }
}
