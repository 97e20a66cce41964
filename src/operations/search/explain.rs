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

//! Implementation of the Explain API

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::endpoint::doc_keyword_endpoint;
use crate::error::EsError;
use crate::request::{Body, Method};

use super::super::common::{strings, FetchSource};
use super::super::params::Params;
use super::super::ToHttpRequest;

/// Why (or why not) one document matches a query
#[derive(Debug, Clone, Serialize)]
pub struct ExplainOperation {
    #[serde(skip)]
    index: String,
    #[serde(skip)]
    id: String,
    #[serde(skip)]
    routing: Option<String>,
    #[serde(skip)]
    preference: Option<String>,
    #[serde(skip)]
    stored_fields: Vec<String>,
    #[serde(skip)]
    fetch_source: Option<FetchSource>,

    query: Value,
}

impl ExplainOperation {
    pub fn new<I, D>(index: I, id: D, query: Value) -> Self
    where
        I: Into<String>,
        D: Into<String>,
    {
        ExplainOperation {
            index: index.into(),
            id: id.into(),
            routing: None,
            preference: None,
            stored_fields: Vec::new(),
            fetch_source: None,
            query,
        }
    }

    add_field!(with_routing, routing, String);
    add_field!(with_preference, preference, String);
    add_field!(with_fetch_source, fetch_source, FetchSource);

    pub fn with_stored_fields<S: Into<String>>(mut self, stored_fields: Vec<S>) -> Self {
        self.stored_fields = strings(stored_fields);
        self
    }
}

impl ToHttpRequest for ExplainOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        doc_keyword_endpoint(&self.index, &self.id, "_explain")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_stored_fields(&self.stored_fields)
            .with_fetch_source(self.fetch_source.as_ref())
            .with_routing(self.routing.as_deref())
            .with_preference(self.preference.as_deref())
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        Ok(Some(Body::structured(self, config.body_encoding)?))
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;
    use serde_json::json;

    use crate::config::Config;
    use crate::operations::common::FetchSource;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::ExplainOperation;

    #[test]
    fn test_explain() {
        let request = ExplainOperation::new("logs", "1", json!({"match": {"msg": "boom"}}))
            .with_stored_fields(vec!["a", "b"])
            .with_fetch_source(FetchSource::includes(vec!["msg"]))
            .with_routing("r")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/logs/1/_explain", request.path);
        assert_eq!(
            btreemap! {
                "stored_fields".to_owned() => "a,b".to_owned(),
                "_source_includes".to_owned() => "msg".to_owned(),
                "routing".to_owned() => "r".to_owned(),
            },
            request.params
        );
        assert_eq!(
            "{\"query\":{\"match\":{\"msg\":\"boom\"}}}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }
}
