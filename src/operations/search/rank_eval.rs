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

//! Implementation of the Ranking Evaluation API

use serde_json::Value;

use crate::config::Config;
use crate::endpoint::indices_keyword_endpoint;
use crate::error::EsError;
use crate::request::{Body, Method};

use super::super::common::{strings, IndicesOptions};
use super::super::params::Params;
use super::super::ToHttpRequest;

/// Evaluate search quality against rated documents.  The evaluation spec
/// (requests, ratings and metric) is passed through as given.
#[derive(Debug, Clone)]
pub struct RankEvalOperation {
    indices: Vec<String>,
    spec: Value,
    indices_options: Option<IndicesOptions>,
}

impl RankEvalOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>, spec: Value) -> Self {
        RankEvalOperation {
            indices: strings(indices),
            spec,
            indices_options: Some(IndicesOptions::strict_expand_open()),
        }
    }

    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
}

impl ToHttpRequest for RankEvalOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_rank_eval")
    }

    fn params(&self, params: Params) -> Params {
        params.with_indices_options(self.indices_options)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        Ok(Some(Body::structured(&self.spec, config.body_encoding)?))
    }
}

#[cfg(test)]
pub mod tests {
    use serde_json::json;

    use crate::config::Config;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::RankEvalOperation;

    #[test]
    fn test_rank_eval() {
        let spec = json!({
            "requests": [{"id": "q1", "request": {"query": {"match_all": {}}}, "ratings": []}],
            "metric": {"precision": {"k": 10}}
        });
        let request = RankEvalOperation::new(vec!["logs"], spec.clone())
            .with_indices_options(None)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/logs/_rank_eval", request.path);
        assert!(request.params.is_empty());
        assert_eq!(
            spec,
            serde_json::from_slice::<serde_json::Value>(&request.body.unwrap().bytes).unwrap()
        );
    }
}
