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

//! Implementation of ElasticSearch Analyze operation

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::endpoint::EndpointBuilder;
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};

use super::common::strings;
use super::ToHttpRequest;

/// Run text through an analyzer, or through an ad hoc chain of tokenizer and
/// filters.  Filters and the tokenizer are either names or custom
/// definitions given as JSON objects.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyzeOperation {
    #[serde(skip)]
    index: Option<String>,

    text: Vec<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    analyzer: Option<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    tokenizer: Option<Value>,
    #[serde(rename = "filter", skip_serializing_if = "ShouldSkip::should_skip")]
    filters: Vec<Value>,
    #[serde(rename = "char_filter", skip_serializing_if = "ShouldSkip::should_skip")]
    char_filters: Vec<Value>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    field: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    explain: bool,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    attributes: Vec<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    normalizer: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl AnalyzeOperation {
    pub fn new<S: Into<String>>(text: Vec<S>) -> Self {
        AnalyzeOperation {
            text: strings(text),
            ..Default::default()
        }
    }

    // use the analyzers defined for this index
    add_field!(with_index, index, String);
    add_field!(with_analyzer, analyzer, String);
    add_field!(with_tokenizer, tokenizer, Value);
    add_field!(with_field, field, String);
    add_value!(with_explain, explain, bool);
    add_field!(with_normalizer, normalizer, String);

    pub fn add_filter<V: Into<Value>>(mut self, filter: V) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub fn add_char_filter<V: Into<Value>>(mut self, char_filter: V) -> Self {
        self.char_filters.push(char_filter.into());
        self
    }

    /// Token attributes to include when explaining
    pub fn with_attributes<S: Into<String>>(mut self, attributes: Vec<S>) -> Self {
        self.attributes = strings(attributes);
        self
    }
}

impl ToHttpRequest for AnalyzeOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok(EndpointBuilder::new()
            .add_optional_part(self.index.as_deref())?
            .add_part_as_is("_analyze")
            .build())
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        Ok(Some(Body::structured(self, config.body_encoding)?))
    }
}

#[cfg(test)]
pub mod tests {
    use serde_json::json;

    use crate::config::Config;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::AnalyzeOperation;

    #[test]
    fn test_analyze_with_analyzer() {
        let request = AnalyzeOperation::new(vec!["Quick Brown Foxes"])
            .with_analyzer("english")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/_analyze", request.path);
        assert!(request.params.is_empty());
        assert_eq!(
            "{\"text\":[\"Quick Brown Foxes\"],\"analyzer\":\"english\"}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_analyze_custom_chain_on_index() {
        let request = AnalyzeOperation::new(vec!["<b>Hello</b>"])
            .with_index("logs")
            .with_tokenizer("standard")
            .add_filter("lowercase")
            .add_filter(json!({"type": "stop", "stopwords": ["a"]}))
            .add_char_filter("html_strip")
            .with_explain(true)
            .with_attributes(vec!["keyword"])
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/logs/_analyze", request.path);
        assert_eq!(
            json!({
                "text": ["<b>Hello</b>"],
                "tokenizer": "standard",
                "filter": ["lowercase", {"type": "stop", "stopwords": ["a"]}],
                "char_filter": ["html_strip"],
                "explain": true,
                "attributes": ["keyword"]
            }),
            serde_json::from_slice::<serde_json::Value>(&request.body.unwrap().bytes).unwrap()
        );
    }
}
