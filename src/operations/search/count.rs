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

//! Implementation of the Count API

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::endpoint::indices_keyword_endpoint;
use crate::error::EsError;
use crate::request::{Body, Method};

use super::super::common::{strings, IndicesOptions};
use super::super::params::Params;
use super::super::ToHttpRequest;

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a Value,
}

/// Count the documents matching a query, or all documents without one
#[derive(Debug, Clone)]
pub struct CountOperation {
    indices: Vec<String>,
    query: Option<Value>,
    routing: Option<String>,
    preference: Option<String>,
    indices_options: Option<IndicesOptions>,
}

impl CountOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        CountOperation {
            indices: strings(indices),
            query: None,
            routing: None,
            preference: None,
            indices_options: Some(IndicesOptions::strict_expand_open()),
        }
    }

    add_field!(with_query, query, Value);
    add_field!(with_routing, routing, String);
    add_field!(with_preference, preference, String);
    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
}

impl ToHttpRequest for CountOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_count")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_routing(self.routing.as_deref())
            .with_preference(self.preference.as_deref())
            .with_indices_options(self.indices_options)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        match self.query {
            Some(ref query) => Ok(Some(Body::structured(
                &QueryBody { query },
                config.body_encoding,
            )?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;
    use serde_json::json;

    use crate::config::Config;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::CountOperation;

    #[test]
    fn test_count_all() {
        let request = CountOperation::new(Vec::<String>::new())
            .with_indices_options(None)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Post, request.method);
        assert_eq!("/_count", request.path);
        assert!(request.params.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_count_query() {
        let request = CountOperation::new(vec!["logs"])
            .with_query(json!({"term": {"level": "error"}}))
            .with_routing("r")
            .with_preference("_local")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/logs/_count", request.path);
        assert_eq!(
            btreemap! {
                "routing".to_owned() => "r".to_owned(),
                "preference".to_owned() => "_local".to_owned(),
                "ignore_unavailable".to_owned() => "false".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open".to_owned(),
            },
            request.params
        );
        assert_eq!(
            "{\"query\":{\"term\":{\"level\":\"error\"}}}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }
}
