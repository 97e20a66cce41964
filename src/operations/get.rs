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

//! Implementation of the Get API, and the related exists, source-exists and
//! multi-get calls

use serde::Serialize;

use crate::config::Config;
use crate::endpoint::{doc_endpoint, doc_keyword_endpoint};
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};

use super::common::{strings, FetchSource, VersionType};
use super::params::Params;
use super::ToHttpRequest;

/// An ES GET operation, to get a document by ID
#[derive(Debug, Clone)]
pub struct GetOperation {
    /// The index to load the document.
    pub(crate) index: String,

    /// The ID of the document.
    pub(crate) id: String,

    pub(crate) preference: Option<String>,
    pub(crate) routing: Option<String>,
    pub(crate) refresh: bool,
    pub(crate) realtime: bool,
    pub(crate) stored_fields: Vec<String>,
    pub(crate) version: Option<i64>,
    pub(crate) version_type: VersionType,
    pub(crate) fetch_source: Option<FetchSource>,
}

impl GetOperation {
    pub fn new<I, D>(index: I, id: D) -> Self
    where
        I: Into<String>,
        D: Into<String>,
    {
        GetOperation {
            index: index.into(),
            id: id.into(),
            preference: None,
            routing: None,
            refresh: false,
            realtime: true,
            stored_fields: Vec::new(),
            version: None,
            version_type: VersionType::Internal,
            fetch_source: None,
        }
    }

    add_field!(with_preference, preference, String);
    add_field!(with_routing, routing, String);
    add_value!(with_refresh, refresh, bool);
    add_value!(with_realtime, realtime, bool);
    add_field!(with_version, version, i64);
    add_value!(with_version_type, version_type, VersionType);
    add_field!(with_fetch_source, fetch_source, FetchSource);

    pub fn with_stored_fields<S: Into<String>>(mut self, stored_fields: Vec<S>) -> Self {
        self.stored_fields = strings(stored_fields);
        self
    }

    /// The same lookup, only checking whether the document exists
    pub fn exists(self) -> ExistsOperation {
        ExistsOperation(self)
    }

    /// The same lookup, only checking whether the document has a stored
    /// `_source`
    pub fn source_exists(self) -> SourceExistsOperation {
        SourceExistsOperation(self)
    }

    fn lookup_params(&self, params: Params) -> Params {
        params
            .with_preference(self.preference.as_deref())
            .with_routing(self.routing.as_deref())
            .with_refresh(self.refresh)
            .with_realtime(self.realtime)
    }
}

impl ToHttpRequest for GetOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        doc_endpoint(&self.index, &self.id)
    }

    fn params(&self, params: Params) -> Params {
        self.lookup_params(params)
            .with_stored_fields(&self.stored_fields)
            .with_version(self.version)
            .with_version_type(self.version_type)
            .with_fetch_source(self.fetch_source.as_ref())
    }
}

/// HEAD on a document
#[derive(Debug, Clone)]
pub struct ExistsOperation(pub GetOperation);

impl ToHttpRequest for ExistsOperation {
    fn method(&self) -> Method {
        Method::Head
    }

    fn endpoint(&self) -> Result<String, EsError> {
        self.0.endpoint()
    }

    fn params(&self, params: Params) -> Params {
        self.0.params(params)
    }
}

/// HEAD on a document's `_source`.  Version parameters aren't supported by
/// this API, so aren't sent.
#[derive(Debug, Clone)]
pub struct SourceExistsOperation(pub GetOperation);

impl ToHttpRequest for SourceExistsOperation {
    fn method(&self) -> Method {
        Method::Head
    }

    fn endpoint(&self) -> Result<String, EsError> {
        doc_keyword_endpoint(&self.0.index, &self.0.id, "_source")
    }

    fn params(&self, params: Params) -> Params {
        self.0.lookup_params(params)
    }
}

/// One document of a multi-get
#[derive(Debug, Clone, Serialize)]
pub struct MultiGetItem {
    #[serde(rename = "_index")]
    index: String,
    #[serde(rename = "_id")]
    id: String,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    routing: Option<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    stored_fields: Vec<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    version: Option<i64>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    version_type: VersionType,
    #[serde(rename = "_source", skip_serializing_if = "ShouldSkip::should_skip")]
    fetch_source: Option<FetchSource>,
}

impl MultiGetItem {
    pub fn new<I, D>(index: I, id: D) -> Self
    where
        I: Into<String>,
        D: Into<String>,
    {
        MultiGetItem {
            index: index.into(),
            id: id.into(),
            routing: None,
            stored_fields: Vec::new(),
            version: None,
            version_type: VersionType::Internal,
            fetch_source: None,
        }
    }

    add_field!(with_routing, routing, String);
    add_field!(with_version, version, i64);
    add_value!(with_version_type, version_type, VersionType);
    add_field!(with_fetch_source, fetch_source, FetchSource);

    pub fn with_stored_fields<S: Into<String>>(mut self, stored_fields: Vec<S>) -> Self {
        self.stored_fields = strings(stored_fields);
        self
    }
}

#[derive(Serialize)]
struct MultiGetBody<'a> {
    docs: &'a [MultiGetItem],
}

/// Fetch several documents in one request
#[derive(Debug, Clone)]
pub struct MultiGetOperation {
    items: Vec<MultiGetItem>,
    preference: Option<String>,
    realtime: bool,
    refresh: bool,
}

impl MultiGetOperation {
    pub fn new(items: Vec<MultiGetItem>) -> Self {
        MultiGetOperation {
            items,
            preference: None,
            realtime: true,
            refresh: false,
        }
    }

    pub fn add(mut self, item: MultiGetItem) -> Self {
        self.items.push(item);
        self
    }

    add_field!(with_preference, preference, String);
    add_value!(with_realtime, realtime, bool);
    add_value!(with_refresh, refresh, bool);
}

impl ToHttpRequest for MultiGetOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok("/_mget".to_owned())
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_preference(self.preference.as_deref())
            .with_realtime(self.realtime)
            .with_refresh(self.refresh)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let body = MultiGetBody { docs: &self.items };
        Ok(Some(Body::structured(&body, config.body_encoding)?))
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;

    use crate::config::Config;
    use crate::operations::common::{FetchSource, VersionType};
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::{GetOperation, MultiGetItem, MultiGetOperation};

    #[test]
    fn test_get_defaults() {
        let request = GetOperation::new("logs", "1")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/logs/1", request.path);
        assert!(request.params.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_get_with_options() {
        let request = GetOperation::new("logs", "a/b")
            .with_routing("r")
            .with_preference("_local")
            .with_realtime(false)
            .with_refresh(true)
            .with_stored_fields(vec!["f1", "f2"])
            .with_version(3)
            .with_version_type(VersionType::External)
            .with_fetch_source(FetchSource::Off)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/logs/a%2Fb", request.path);
        assert_eq!(
            btreemap! {
                "routing".to_owned() => "r".to_owned(),
                "preference".to_owned() => "_local".to_owned(),
                "realtime".to_owned() => "false".to_owned(),
                "refresh".to_owned() => "true".to_owned(),
                "stored_fields".to_owned() => "f1,f2".to_owned(),
                "version".to_owned() => "3".to_owned(),
                "version_type".to_owned() => "external".to_owned(),
                "_source".to_owned() => "false".to_owned(),
            },
            request.params
        );
    }

    #[test]
    fn test_exists_is_head_with_same_params() {
        let get = GetOperation::new("logs", "1").with_routing("r").with_version(2);
        let get_request = get.to_request(&Config::default()).unwrap();
        let exists_request = get.exists().to_request(&Config::default()).unwrap();
        assert_eq!(Method::Head, exists_request.method);
        assert_eq!(get_request.path, exists_request.path);
        assert_eq!(get_request.params, exists_request.params);
    }

    #[test]
    fn test_source_exists_drops_version() {
        let request = GetOperation::new("logs", "1")
            .with_routing("r")
            .with_version(2)
            .with_version_type(VersionType::External)
            .source_exists()
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Head, request.method);
        assert_eq!("/logs/1/_source", request.path);
        assert_eq!(
            btreemap! { "routing".to_owned() => "r".to_owned() },
            request.params
        );
    }

    #[test]
    fn test_multi_get() {
        let request = MultiGetOperation::new(vec![MultiGetItem::new("a", "1")])
            .add(
                MultiGetItem::new("b", "2")
                    .with_routing("r")
                    .with_fetch_source(FetchSource::includes(vec!["title"])),
            )
            .with_realtime(false)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Post, request.method);
        assert_eq!("/_mget", request.path);
        assert_eq!(
            btreemap! { "realtime".to_owned() => "false".to_owned() },
            request.params
        );
        let body = request.body.unwrap();
        assert_eq!("application/json", body.content_type());
        assert_eq!(
            "{\"docs\":[{\"_index\":\"a\",\"_id\":\"1\"},\
             {\"_index\":\"b\",\"_id\":\"2\",\"routing\":\"r\",\
             \"_source\":{\"includes\":[\"title\"],\"excludes\":[]}}]}",
            String::from_utf8(body.bytes).unwrap()
        );
    }
}
