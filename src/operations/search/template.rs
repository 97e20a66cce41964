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

//! Searching with a mustache template

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::endpoint::indices_keyword_endpoint;
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};

use super::super::params::Params;
use super::super::ToHttpRequest;
use super::SearchOperation;

#[derive(Debug, Clone)]
enum Template {
    Inline(String),
    Stored(String),
}

#[derive(Serialize)]
struct TemplateBody<'a> {
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    source: Option<&'a str>,
    params: &'a Map<String, Value>,
    explain: bool,
    profile: bool,
}

/// The indices, routing and other options come from the wrapped
/// `SearchOperation`; its source is ignored.
#[derive(Debug, Clone)]
pub struct SearchTemplateOperation {
    search: SearchOperation,
    template: Template,
    params: Map<String, Value>,
    explain: bool,
    profile: bool,
}

impl SearchTemplateOperation {
    fn new(search: SearchOperation, template: Template) -> Self {
        SearchTemplateOperation {
            search,
            template,
            params: Map::new(),
            explain: false,
            profile: false,
        }
    }

    /// A template given in full
    pub fn inline<S: Into<String>>(search: SearchOperation, source: S) -> Self {
        SearchTemplateOperation::new(search, Template::Inline(source.into()))
    }

    /// A template stored with `PutScriptOperation`
    pub fn stored<S: Into<String>>(search: SearchOperation, id: S) -> Self {
        SearchTemplateOperation::new(search, Template::Stored(id.into()))
    }

    pub fn with_param<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    add_value!(with_explain, explain, bool);
    add_value!(with_profile, profile, bool);
}

impl ToHttpRequest for SearchTemplateOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.search.indices, "_search/template")
    }

    fn params(&self, params: Params) -> Params {
        self.search.search_params(params)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let (id, source) = match self.template {
            Template::Inline(ref source) => (None, Some(source.as_str())),
            Template::Stored(ref id) => (Some(id.as_str()), None),
        };
        let body = TemplateBody {
            id,
            source,
            params: &self.params,
            explain: self.explain,
            profile: self.profile,
        };
        Ok(Some(Body::structured(&body, config.body_encoding)?))
    }
}

#[cfg(test)]
pub mod tests {
    use crate::config::Config;
    use crate::operations::search::SearchOperation;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::SearchTemplateOperation;

    #[test]
    fn test_inline_template() {
        let search = SearchOperation::new(vec!["logs"]).with_routing("r");
        let request = SearchTemplateOperation::inline(
            search.clone(),
            "{\"query\":{\"match\":{\"{{field}}\":\"{{value}}\"}}}",
        )
        .with_param("field", "user")
        .with_param("value", "kimchy")
        .to_request(&Config::default())
        .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/logs/_search/template", request.path);
        assert_eq!(
            search.to_request(&Config::default()).unwrap().params,
            request.params
        );
        assert_eq!(
            "{\"source\":\"{\\\"query\\\":{\\\"match\\\":{\\\"{{field}}\\\":\\\"{{value}}\\\"}}}\",\
             \"params\":{\"field\":\"user\",\"value\":\"kimchy\"},\"explain\":false,\"profile\":false}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_stored_template() {
        let request = SearchTemplateOperation::stored(SearchOperation::new(vec!["logs"]), "tmpl")
            .with_explain(true)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(
            "{\"id\":\"tmpl\",\"params\":{},\"explain\":true,\"profile\":false}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }
}
