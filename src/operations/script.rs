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

//! Scripts, and the stored-script API

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::endpoint::EndpointBuilder;
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::params::Params;
use super::ToHttpRequest;

#[derive(Debug, Clone, PartialEq)]
enum ScriptCode {
    Inline(String),
    Stored(String),
}

/// A script, as used by updates, update-by-query and reindex
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    code: ScriptCode,
    lang: Option<String>,
    options: BTreeMap<String, String>,
    params: Map<String, Value>,
}

impl Script {
    /// A script given by its source
    pub fn inline<S: Into<String>>(source: S) -> Self {
        Script::with_code(ScriptCode::Inline(source.into()))
    }

    /// A script previously stored with `PutScriptOperation`
    pub fn stored<S: Into<String>>(id: S) -> Self {
        Script::with_code(ScriptCode::Stored(id.into()))
    }

    fn with_code(code: ScriptCode) -> Self {
        Script {
            code,
            lang: None,
            options: BTreeMap::new(),
            params: Map::new(),
        }
    }

    pub fn with_lang<S: Into<String>>(mut self, lang: S) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_param<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match self.code {
            ScriptCode::Inline(ref source) => map.serialize_entry("source", source)?,
            ScriptCode::Stored(ref id) => map.serialize_entry("id", id)?,
        }
        if let Some(ref lang) = self.lang {
            map.serialize_entry("lang", lang)?;
        }
        if !self.options.is_empty() {
            map.serialize_entry("options", &self.options)?;
        }
        if !self.params.is_empty() {
            map.serialize_entry("params", &self.params)?;
        }
        map.end()
    }
}

fn scripts_endpoint(id: &str) -> Result<String, EsError> {
    Ok(EndpointBuilder::new()
        .add_part_as_is("_scripts")
        .add_part(id)?
        .build())
}

#[derive(Serialize)]
struct StoredScriptSource<'a> {
    lang: &'a str,
    source: &'a str,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    options: Option<&'a BTreeMap<String, String>>,
}

#[derive(Serialize)]
struct PutScriptBody<'a> {
    script: StoredScriptSource<'a>,
}

/// Store a script under an ID
#[derive(Debug, Clone)]
pub struct PutScriptOperation {
    id: String,
    lang: String,
    source: String,
    options: BTreeMap<String, String>,
    context: Option<String>,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
}

impl PutScriptOperation {
    pub fn new<I, L, S>(id: I, lang: L, source: S) -> Self
    where
        I: Into<String>,
        L: Into<String>,
        S: Into<String>,
    {
        PutScriptOperation {
            id: id.into(),
            lang: lang.into(),
            source: source.into(),
            options: BTreeMap::new(),
            context: None,
            timeout: None,
            master_timeout: None,
        }
    }

    pub fn with_option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    add_field!(with_context, context, String);
    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for PutScriptOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        scripts_endpoint(&self.id)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
            .put_opt("context", self.context.as_deref())
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let body = PutScriptBody {
            script: StoredScriptSource {
                lang: &self.lang,
                source: &self.source,
                options: Some(&self.options).filter(|o| !o.is_empty()),
            },
        };
        Ok(Some(Body::structured(&body, config.body_encoding)?))
    }
}

#[derive(Debug, Clone)]
pub struct GetScriptOperation {
    id: String,
    master_timeout: Option<Duration>,
}

impl GetScriptOperation {
    pub fn new<I: Into<String>>(id: I) -> Self {
        GetScriptOperation {
            id: id.into(),
            master_timeout: None,
        }
    }

    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for GetScriptOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        scripts_endpoint(&self.id)
    }

    fn params(&self, params: Params) -> Params {
        params.with_master_timeout(self.master_timeout)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteScriptOperation {
    id: String,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
}

impl DeleteScriptOperation {
    pub fn new<I: Into<String>>(id: I) -> Self {
        DeleteScriptOperation {
            id: id.into(),
            timeout: None,
            master_timeout: None,
        }
    }

    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for DeleteScriptOperation {
    fn method(&self) -> Method {
        Method::Delete
    }

    fn endpoint(&self) -> Result<String, EsError> {
        scripts_endpoint(&self.id)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;

    use crate::config::Config;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;
    use crate::units::Duration;

    use super::{DeleteScriptOperation, GetScriptOperation, PutScriptOperation, Script};

    #[test]
    fn test_inline_script() {
        let script = Script::inline("ctx._source.count += params.n")
            .with_lang("painless")
            .with_param("n", 4);
        assert_eq!(
            "{\"source\":\"ctx._source.count += params.n\",\"lang\":\"painless\",\"params\":{\"n\":4}}",
            serde_json::to_string(&script).unwrap()
        );
    }

    #[test]
    fn test_stored_script_reference() {
        let script = Script::stored("bump");
        assert_eq!("{\"id\":\"bump\"}", serde_json::to_string(&script).unwrap());
    }

    #[test]
    fn test_put_script() {
        let request = PutScriptOperation::new("bump", "painless", "ctx._source.n++")
            .with_context("update")
            .with_master_timeout(Duration::seconds(10))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Post, request.method);
        assert_eq!("/_scripts/bump", request.path);
        assert_eq!(
            btreemap! {
                "context".to_owned() => "update".to_owned(),
                "master_timeout".to_owned() => "10s".to_owned(),
            },
            request.params
        );
        assert_eq!(
            "{\"script\":{\"lang\":\"painless\",\"source\":\"ctx._source.n++\"}}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_get_and_delete_script() {
        let get = GetScriptOperation::new("my/script")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, get.method);
        assert_eq!("/_scripts/my%2Fscript", get.path);

        let delete = DeleteScriptOperation::new("bump")
            .with_timeout(Duration::seconds(1))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Delete, delete.method);
        assert_eq!(
            btreemap! { "timeout".to_owned() => "1s".to_owned() },
            delete.params
        );
    }
}
