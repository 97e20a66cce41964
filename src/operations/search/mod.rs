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

//! Implementations of the Search API, and the other APIs that take a search
//! request or its query: templates, scrolling, multi-search, count, explain,
//! field capabilities and ranking evaluation.
//!
//! Search sources are given as JSON values; building the query DSL itself is
//! left to the caller.

pub mod count;
pub mod explain;
pub mod field_caps;
pub mod multi;
pub mod rank_eval;
pub mod scroll;
pub mod template;

use std::fmt;

use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::config::Config;
use crate::endpoint::indices_keyword_endpoint;
use crate::error::EsError;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::common::{strings, IndicesOptions};
use super::params::Params;
use super::ToHttpRequest;

/// Batched reduce size assumed by the cluster
const DEFAULT_BATCHED_REDUCE_SIZE: u32 = 512;

/// Options for the various search_type parameters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    #[default]
    QueryThenFetch,
    DfsQueryThenFetch,
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            SearchType::QueryThenFetch => "query_then_fetch",
            SearchType::DfsQueryThenFetch => "dfs_query_then_fetch",
        })
    }
}

impl Serialize for SearchType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A search over zero or more indices, all indices when none are given
#[derive(Debug, Clone)]
pub struct SearchOperation {
    pub(crate) indices: Vec<String>,
    pub(crate) source: Option<Value>,
    pub(crate) routing: Option<String>,
    pub(crate) preference: Option<String>,
    pub(crate) indices_options: Option<IndicesOptions>,
    pub(crate) search_type: SearchType,
    pub(crate) request_cache: Option<bool>,
    pub(crate) allow_partial_search_results: Option<bool>,
    pub(crate) batched_reduce_size: u32,
    pub(crate) scroll: Option<Duration>,
    pub(crate) ccs_minimize_roundtrips: bool,
}

impl SearchOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        SearchOperation {
            indices: strings(indices),
            source: None,
            routing: None,
            preference: None,
            indices_options: Some(IndicesOptions::strict_expand_open()),
            search_type: SearchType::QueryThenFetch,
            request_cache: None,
            allow_partial_search_results: None,
            batched_reduce_size: DEFAULT_BATCHED_REDUCE_SIZE,
            scroll: None,
            ccs_minimize_roundtrips: true,
        }
    }

    /// The search body: query, aggregations, sorting, paging and so on
    pub fn with_source(mut self, source: Value) -> Self {
        self.source = Some(source);
        self
    }

    add_field!(with_routing, routing, String);
    add_field!(with_preference, preference, String);
    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
    add_value!(with_search_type, search_type, SearchType);
    add_field!(with_request_cache, request_cache, bool);
    add_field!(
        with_allow_partial_search_results,
        allow_partial_search_results,
        bool
    );
    add_value!(with_batched_reduce_size, batched_reduce_size, u32);
    // keep a scroll context open this long
    add_field!(with_scroll, scroll, Duration);
    add_value!(with_ccs_minimize_roundtrips, ccs_minimize_roundtrips, bool);

    /// Parameters shared with search templates
    pub(crate) fn search_params(&self, params: Params) -> Params {
        params
            .put("typed_keys", "true")
            .with_routing(self.routing.as_deref())
            .with_preference(self.preference.as_deref())
            .with_indices_options(self.indices_options)
            .put("search_type", self.search_type.to_string())
            .put_opt("request_cache", self.request_cache)
            .put_opt(
                "allow_partial_search_results",
                self.allow_partial_search_results,
            )
            .put("batched_reduce_size", self.batched_reduce_size.to_string())
            .with_scroll(self.scroll)
    }
}

impl ToHttpRequest for SearchOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_search")
    }

    fn params(&self, params: Params) -> Params {
        self.search_params(params)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        match self.source {
            Some(ref source) => Ok(Some(Body::structured(source, config.body_encoding)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;
    use serde_json::json;

    use crate::config::Config;
    use crate::content::ContentEncoding;
    use crate::operations::common::IndicesOptions;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;
    use crate::units::Duration;

    use super::{SearchOperation, SearchType};

    #[test]
    fn test_search_defaults() {
        let request = SearchOperation::new(Vec::<String>::new())
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Post, request.method);
        assert_eq!("/_search", request.path);
        assert_eq!(
            btreemap! {
                "typed_keys".to_owned() => "true".to_owned(),
                "ignore_unavailable".to_owned() => "false".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open".to_owned(),
                "search_type".to_owned() => "query_then_fetch".to_owned(),
                "batched_reduce_size".to_owned() => "512".to_owned(),
            },
            request.params
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_search_options_and_source() {
        let request = SearchOperation::new(vec!["logs-*", "metrics"])
            .with_source(json!({"query": {"match_all": {}}, "size": 5}))
            .with_routing("r")
            .with_preference("_local")
            .with_indices_options(Some(IndicesOptions::lenient_expand_open_closed()))
            .with_search_type(SearchType::DfsQueryThenFetch)
            .with_request_cache(false)
            .with_allow_partial_search_results(true)
            .with_batched_reduce_size(64)
            .with_scroll(Duration::minutes(1))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/logs-*,metrics/_search", request.path);
        assert_eq!(
            btreemap! {
                "typed_keys".to_owned() => "true".to_owned(),
                "routing".to_owned() => "r".to_owned(),
                "preference".to_owned() => "_local".to_owned(),
                "ignore_unavailable".to_owned() => "true".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open,closed".to_owned(),
                "search_type".to_owned() => "dfs_query_then_fetch".to_owned(),
                "request_cache".to_owned() => "false".to_owned(),
                "allow_partial_search_results".to_owned() => "true".to_owned(),
                "batched_reduce_size".to_owned() => "64".to_owned(),
                "scroll".to_owned() => "1m".to_owned(),
            },
            request.params
        );
        assert_eq!(
            "{\"query\":{\"match_all\":{}},\"size\":5}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_search_source_in_configured_encoding() {
        let config = Config::default().with_body_encoding(ContentEncoding::Yaml);
        let request = SearchOperation::new(vec!["logs"])
            .with_source(json!({"size": 0}))
            .to_request(&config)
            .unwrap();
        let body = request.body.unwrap();
        assert_eq!("application/yaml", body.content_type());
        assert_eq!("size: 0\n", String::from_utf8(body.bytes).unwrap());
    }
}
