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

//! Implementation of the Update API

use serde_json::{Map, Value};

use crate::config::Config;
use crate::content::negotiate::negotiate_update;
use crate::content::Source;
use crate::endpoint::doc_keyword_endpoint;
use crate::error::EsError;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::common::{
    ActiveShardCount, FetchSource, RefreshPolicy, SeqNoPrimaryTerm, VersionType,
};
use super::params::Params;
use super::script::Script;
use super::ToHttpRequest;

/// A partial update, scripted update, or upsert of one document
#[derive(Debug, Clone)]
pub struct UpdateOperation {
    pub(crate) index: String,
    pub(crate) id: String,
    pub(crate) doc: Option<Source>,
    pub(crate) upsert: Option<Source>,
    pub(crate) script: Option<Script>,
    pub(crate) doc_as_upsert: bool,
    pub(crate) scripted_upsert: bool,
    pub(crate) detect_noop: bool,
    pub(crate) fetch_source: Option<FetchSource>,
    pub(crate) retry_on_conflict: u32,
    pub(crate) routing: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) version: Option<i64>,
    pub(crate) version_type: VersionType,
    pub(crate) seq_no_primary_term: Option<SeqNoPrimaryTerm>,
    pub(crate) refresh: RefreshPolicy,
    pub(crate) wait_for_active_shards: ActiveShardCount,
}

impl UpdateOperation {
    pub fn new<I, D>(index: I, id: D) -> Self
    where
        I: Into<String>,
        D: Into<String>,
    {
        UpdateOperation {
            index: index.into(),
            id: id.into(),
            doc: None,
            upsert: None,
            script: None,
            doc_as_upsert: false,
            scripted_upsert: false,
            detect_noop: true,
            fetch_source: None,
            retry_on_conflict: 0,
            routing: None,
            timeout: None,
            version: None,
            version_type: VersionType::Internal,
            seq_no_primary_term: None,
            refresh: RefreshPolicy::None,
            wait_for_active_shards: ActiveShardCount::Default,
        }
    }

    // merged into the existing document
    add_field!(with_doc, doc, Source);
    // indexed when the document doesn't exist yet
    add_field!(with_upsert, upsert, Source);
    add_field!(with_script, script, Script);
    add_value!(with_doc_as_upsert, doc_as_upsert, bool);
    add_value!(with_scripted_upsert, scripted_upsert, bool);
    add_value!(with_detect_noop, detect_noop, bool);
    add_field!(with_fetch_source, fetch_source, FetchSource);
    add_value!(with_retry_on_conflict, retry_on_conflict, u32);
    add_field!(with_routing, routing, String);
    add_field!(with_timeout, timeout, Duration);
    add_field!(with_version, version, i64);
    add_value!(with_version_type, version_type, VersionType);
    // only carried by bulk update actions
    add_field!(with_seq_no_primary_term, seq_no_primary_term, SeqNoPrimaryTerm);
    add_value!(with_refresh, refresh, RefreshPolicy);
    add_value!(with_wait_for_active_shards, wait_for_active_shards, ActiveShardCount);

    /// The update body's structure, independent of the encoding it ends up in
    pub(crate) fn body_value(&self) -> Result<Value, EsError> {
        let mut body = Map::new();
        if self.doc_as_upsert {
            body.insert("doc_as_upsert".to_owned(), Value::Bool(true));
        }
        if let Some(ref doc) = self.doc {
            body.insert("doc".to_owned(), doc.to_value()?);
        }
        if let Some(ref script) = self.script {
            body.insert("script".to_owned(), serde_json::to_value(script)?);
        }
        if let Some(ref upsert) = self.upsert {
            body.insert("upsert".to_owned(), upsert.to_value()?);
        }
        if self.scripted_upsert {
            body.insert("scripted_upsert".to_owned(), Value::Bool(true));
        }
        if !self.detect_noop {
            body.insert("detect_noop".to_owned(), Value::Bool(false));
        }
        if let Some(ref fetch_source) = self.fetch_source {
            body.insert("_source".to_owned(), serde_json::to_value(fetch_source)?);
        }
        Ok(Value::Object(body))
    }
}

impl ToHttpRequest for UpdateOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        doc_keyword_endpoint(&self.index, &self.id, "_update")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_routing(self.routing.as_deref())
            .with_timeout(self.timeout)
            .with_refresh_policy(self.refresh)
            .with_wait_for_active_shards(self.wait_for_active_shards, ActiveShardCount::Default)
            .with_doc_as_upsert(self.doc_as_upsert)
            .with_fetch_source(self.fetch_source.as_ref())
            .with_retry_on_conflict(self.retry_on_conflict)
            .with_version(self.version)
            .with_version_type(self.version_type)
    }

    /// Written in the encoding of the partial and upsert documents, which
    /// must agree
    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let encoding = negotiate_update(
            self.doc.as_ref().map(Source::encoding),
            self.upsert.as_ref().map(Source::encoding),
            config.write_encoding,
        )?;
        Ok(Some(Body::structured(&self.body_value()?, encoding)?))
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;
    use serde_json::json;

    use crate::config::Config;
    use crate::content::{smile, ContentEncoding, Source};
    use crate::error::EsError;
    use crate::operations::common::{FetchSource, SeqNoPrimaryTerm};
    use crate::operations::script::Script;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::UpdateOperation;

    #[test]
    fn test_partial_update() {
        let request = UpdateOperation::new("logs", "1")
            .with_doc(Source::json(&json!({"status": "done"})).unwrap())
            .with_doc_as_upsert(true)
            .with_retry_on_conflict(3)
            .with_fetch_source(FetchSource::Off)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Post, request.method);
        assert_eq!("/logs/1/_update", request.path);
        assert_eq!(
            btreemap! {
                "doc_as_upsert".to_owned() => "true".to_owned(),
                "retry_on_conflict".to_owned() => "3".to_owned(),
                "_source".to_owned() => "false".to_owned(),
            },
            request.params
        );
        assert_eq!(
            "{\"doc_as_upsert\":true,\"doc\":{\"status\":\"done\"},\"_source\":false}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_scripted_upsert_body_order() {
        let request = UpdateOperation::new("logs", "1")
            .with_script(Script::inline("ctx._source.n += 1"))
            .with_upsert(Source::json(&json!({"n": 0})).unwrap())
            .with_scripted_upsert(true)
            .with_detect_noop(false)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(
            "{\"script\":{\"source\":\"ctx._source.n += 1\"},\"upsert\":{\"n\":0},\
             \"scripted_upsert\":true,\"detect_noop\":false}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_seq_no_is_not_a_parameter() {
        let request = UpdateOperation::new("logs", "1")
            .with_seq_no_primary_term(SeqNoPrimaryTerm::new(9, 1))
            .to_request(&Config::default())
            .unwrap();
        assert!(request.params.get("if_seq_no").is_none());
        assert!(request.params.get("if_primary_term").is_none());
        assert!(request.params.is_empty());
    }

    #[test]
    fn test_body_follows_document_encoding() {
        let doc = Source::json(&json!({"a": 1})).unwrap();
        let smile_doc = Source::new(doc.reencode(ContentEncoding::Smile).unwrap(), ContentEncoding::Smile);
        let request = UpdateOperation::new("logs", "1")
            .with_doc(smile_doc)
            .to_request(&Config::default())
            .unwrap();
        let body = request.body.unwrap();
        assert_eq!(ContentEncoding::Smile, body.encoding);
        assert_eq!(json!({"doc": {"a": 1}}), smile::from_slice(&body.bytes).unwrap());
    }

    #[test]
    fn test_script_only_uses_configured_encoding() {
        let config = Config::default().with_write_encoding(ContentEncoding::Yaml);
        let request = UpdateOperation::new("logs", "1")
            .with_script(Script::stored("bump"))
            .to_request(&config)
            .unwrap();
        assert_eq!("application/yaml", request.body.unwrap().content_type());
    }

    #[test]
    fn test_mismatched_doc_and_upsert() {
        let doc = Source::json(&json!({"a": 1})).unwrap();
        let upsert = Source::new("a: 1\n", ContentEncoding::Yaml);
        let result = UpdateOperation::new("logs", "1")
            .with_doc(doc)
            .with_upsert(upsert)
            .to_request(&Config::default());
        assert!(matches!(result, Err(EsError::ConflictingEncoding { .. })));
    }
}
