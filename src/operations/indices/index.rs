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

//! Creating, deleting, opening, closing and inspecting indices

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::endpoint::{indices_endpoint, indices_keyword_endpoint};
use crate::error::EsError;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::super::common::{strings, ActiveShardCount, IndicesOptions};
use super::super::params::Params;
use super::super::ToHttpRequest;
use super::alias::{AliasOptions, Aliases};

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Operations addressing existing indices need at least one of them
fn require_indices(indices: &[String]) -> Result<(), EsError> {
    if indices.is_empty() {
        Err(EsError::InvalidArgument("indices are mandatory".to_owned()))
    } else {
        Ok(())
    }
}

#[derive(Serialize)]
struct CreateIndexBody<'a> {
    settings: &'a Value,
    mappings: &'a Value,
    aliases: &'a Aliases,
}

/// Create an index with optional settings, mappings and aliases.  All three
/// are always sent, empty when not given.
#[derive(Debug, Clone)]
pub struct CreateIndexOperation {
    index: String,
    settings: Value,
    mappings: Value,
    aliases: Aliases,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
    wait_for_active_shards: ActiveShardCount,
}

impl CreateIndexOperation {
    pub fn new<S: Into<String>>(index: S) -> Self {
        CreateIndexOperation {
            index: index.into(),
            settings: empty_object(),
            mappings: empty_object(),
            aliases: Aliases::new(),
            timeout: None,
            master_timeout: None,
            wait_for_active_shards: ActiveShardCount::Default,
        }
    }

    add_value!(with_settings, settings, Value);
    add_value!(with_mappings, mappings, Value);
    add_value!(with_aliases, aliases, Aliases);

    pub fn add_alias<S: Into<String>>(mut self, name: S, options: AliasOptions) -> Self {
        self.aliases.insert(name.into(), options);
        self
    }

    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
    add_value!(with_wait_for_active_shards, wait_for_active_shards, ActiveShardCount);
}

impl ToHttpRequest for CreateIndexOperation {
    fn method(&self) -> Method {
        Method::Put
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_endpoint(&[&self.index])
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
            .with_wait_for_active_shards(self.wait_for_active_shards, ActiveShardCount::Default)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let body = CreateIndexBody {
            settings: &self.settings,
            mappings: &self.mappings,
            aliases: &self.aliases,
        };
        Ok(Some(Body::structured(&body, config.body_encoding)?))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteIndexOperation {
    indices: Vec<String>,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
    indices_options: Option<IndicesOptions>,
}

impl DeleteIndexOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        DeleteIndexOperation {
            indices: strings(indices),
            timeout: None,
            master_timeout: None,
            indices_options: Some(IndicesOptions::strict_expand_open_closed()),
        }
    }

    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
}

impl ToHttpRequest for DeleteIndexOperation {
    fn method(&self) -> Method {
        Method::Delete
    }

    /// `DELETE /` is never sent
    fn endpoint(&self) -> Result<String, EsError> {
        require_indices(&self.indices)?;
        indices_endpoint(&self.indices)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
            .with_indices_options(self.indices_options)
    }
}

#[derive(Debug, Clone)]
pub struct OpenIndexOperation {
    indices: Vec<String>,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
    wait_for_active_shards: ActiveShardCount,
    indices_options: Option<IndicesOptions>,
}

impl OpenIndexOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        OpenIndexOperation {
            indices: strings(indices),
            timeout: None,
            master_timeout: None,
            wait_for_active_shards: ActiveShardCount::None,
            // wildcards only match indices that are closed
            indices_options: Some(IndicesOptions::new(false, true, false, true)),
        }
    }

    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
    add_value!(with_wait_for_active_shards, wait_for_active_shards, ActiveShardCount);
    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
}

impl ToHttpRequest for OpenIndexOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_open")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
            .with_wait_for_active_shards(self.wait_for_active_shards, ActiveShardCount::None)
            .with_indices_options(self.indices_options)
    }
}

#[derive(Debug, Clone)]
pub struct CloseIndexOperation {
    indices: Vec<String>,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
    indices_options: Option<IndicesOptions>,
}

impl CloseIndexOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        CloseIndexOperation {
            indices: strings(indices),
            timeout: None,
            master_timeout: None,
            indices_options: Some(IndicesOptions::strict_expand_open()),
        }
    }

    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
}

impl ToHttpRequest for CloseIndexOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_close")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
            .with_indices_options(self.indices_options)
    }
}

/// Settings, mappings and aliases of indices
#[derive(Debug, Clone)]
pub struct GetIndexOperation {
    indices: Vec<String>,
    indices_options: Option<IndicesOptions>,
    local: bool,
    include_defaults: bool,
    human: bool,
    master_timeout: Option<Duration>,
}

impl GetIndexOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        GetIndexOperation {
            indices: strings(indices),
            indices_options: Some(IndicesOptions::strict_expand_open()),
            local: false,
            include_defaults: false,
            human: false,
            master_timeout: None,
        }
    }

    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
    add_value!(with_local, local, bool);
    add_value!(with_include_defaults, include_defaults, bool);
    add_value!(with_human, human, bool);
    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for GetIndexOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_endpoint(&self.indices)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_indices_options(self.indices_options)
            .with_local(self.local)
            .with_include_defaults(self.include_defaults)
            .with_human(self.human)
            .with_master_timeout(self.master_timeout)
    }
}

#[derive(Debug, Clone)]
pub struct IndexExistsOperation {
    indices: Vec<String>,
    local: bool,
    human: bool,
    indices_options: Option<IndicesOptions>,
    include_defaults: bool,
}

impl IndexExistsOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        IndexExistsOperation {
            indices: strings(indices),
            local: false,
            human: false,
            indices_options: Some(IndicesOptions::strict_expand_open()),
            include_defaults: false,
        }
    }

    add_value!(with_local, local, bool);
    add_value!(with_human, human, bool);
    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
    add_value!(with_include_defaults, include_defaults, bool);
}

impl ToHttpRequest for IndexExistsOperation {
    fn method(&self) -> Method {
        Method::Head
    }

    fn endpoint(&self) -> Result<String, EsError> {
        require_indices(&self.indices)?;
        indices_endpoint(&self.indices)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_local(self.local)
            .with_human(self.human)
            .with_indices_options(self.indices_options)
            .with_include_defaults(self.include_defaults)
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;
    use serde_json::json;

    use crate::config::Config;
    use crate::error::EsError;
    use crate::operations::common::{ActiveShardCount, IndicesOptions};
    use crate::operations::indices::alias::AliasOptions;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;
    use crate::units::Duration;

    use super::{
        CloseIndexOperation, CreateIndexOperation, DeleteIndexOperation, GetIndexOperation,
        IndexExistsOperation, OpenIndexOperation,
    };

    #[test]
    fn test_create_index_empty_body() {
        let request = CreateIndexOperation::new("logs")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Put, request.method);
        assert_eq!("/logs", request.path);
        assert!(request.params.is_empty());
        assert_eq!(
            "{\"settings\":{},\"mappings\":{},\"aliases\":{}}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_create_index() {
        let request = CreateIndexOperation::new("logs-1")
            .with_settings(json!({"number_of_shards": 3}))
            .with_mappings(json!({"properties": {"msg": {"type": "text"}}}))
            .add_alias("logs", AliasOptions::new().with_is_write_index(true))
            .with_timeout(Duration::seconds(10))
            .with_wait_for_active_shards(ActiveShardCount::All)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(
            btreemap! {
                "timeout".to_owned() => "10s".to_owned(),
                "wait_for_active_shards".to_owned() => "all".to_owned(),
            },
            request.params
        );
        assert_eq!(
            json!({
                "settings": {"number_of_shards": 3},
                "mappings": {"properties": {"msg": {"type": "text"}}},
                "aliases": {"logs": {"is_write_index": true}}
            }),
            serde_json::from_slice::<serde_json::Value>(&request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_delete_index() {
        let request = DeleteIndexOperation::new(vec!["logs-1", "logs-2"])
            .with_master_timeout(Duration::minutes(1))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Delete, request.method);
        assert_eq!("/logs-1,logs-2", request.path);
        assert_eq!(
            btreemap! {
                "master_timeout".to_owned() => "1m".to_owned(),
                "ignore_unavailable".to_owned() => "false".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open,closed".to_owned(),
            },
            request.params
        );

        let none = DeleteIndexOperation::new(Vec::<String>::new()).to_request(&Config::default());
        assert!(matches!(none, Err(EsError::InvalidArgument(_))));
    }

    #[test]
    fn test_open_and_close() {
        let open = OpenIndexOperation::new(vec!["logs"])
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Post, open.method);
        assert_eq!("/logs/_open", open.path);
        assert_eq!(Some(&"closed".to_owned()), open.params.get("expand_wildcards"));
        assert!(!open.params.contains_key("wait_for_active_shards"));

        let open = OpenIndexOperation::new(vec!["logs"])
            .with_wait_for_active_shards(ActiveShardCount::Default)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Some(&"1".to_owned()), open.params.get("wait_for_active_shards"));

        let close = CloseIndexOperation::new(vec!["logs"])
            .with_indices_options(None)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/logs/_close", close.path);
        assert!(close.params.is_empty());
    }

    #[test]
    fn test_get_index() {
        let request = GetIndexOperation::new(vec!["logs"])
            .with_indices_options(Some(IndicesOptions::lenient_expand_open()))
            .with_local(true)
            .with_include_defaults(true)
            .with_human(true)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/logs", request.path);
        assert_eq!(
            btreemap! {
                "ignore_unavailable".to_owned() => "true".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open".to_owned(),
                "local".to_owned() => "true".to_owned(),
                "include_defaults".to_owned() => "true".to_owned(),
                "human".to_owned() => "true".to_owned(),
            },
            request.params
        );
    }

    #[test]
    fn test_index_exists_needs_indices() {
        let request = IndexExistsOperation::new(vec!["logs"])
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Head, request.method);
        assert_eq!("/logs", request.path);

        let result = IndexExistsOperation::new(Vec::<String>::new()).to_request(&Config::default());
        assert!(matches!(result, Err(EsError::InvalidArgument(_))));
    }
}
