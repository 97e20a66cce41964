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

//! Index aliases

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::config::Config;
use crate::endpoint::indices_keyword_names_endpoint;
use crate::error::EsError;
use crate::json::{FieldBased, NoOuter, ShouldSkip};
use crate::request::{Body, Method};
use crate::units::Duration;

use super::super::common::{strings, IndicesOptions};
use super::super::params::Params;
use super::super::ToHttpRequest;

/// The definition of one alias, as used when adding it to an index, creating
/// an index or putting a template
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AliasOptions {
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    filter: Option<Value>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    routing: Option<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    index_routing: Option<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    search_routing: Option<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    is_write_index: Option<bool>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    is_hidden: Option<bool>,
}

impl AliasOptions {
    pub fn new() -> Self {
        Default::default()
    }

    add_field!(with_filter, filter, Value);
    add_field!(with_routing, routing, String);
    add_field!(with_index_routing, index_routing, String);
    add_field!(with_search_routing, search_routing, String);
    add_field!(with_is_write_index, is_write_index, bool);
    add_field!(with_is_hidden, is_hidden, bool);
}

/// Aliases by name, as they appear in index and template bodies
pub type Aliases = BTreeMap<String, AliasOptions>;

#[derive(Serialize)]
struct ActionBody<'a> {
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    indices: Option<&'a [String]>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    aliases: Option<&'a [String]>,
    #[serde(flatten)]
    options: Option<&'a AliasOptions>,
}

fn non_empty(values: &[String]) -> Option<&[String]> {
    Some(values).filter(|v| !v.is_empty())
}

/// One step of an atomic alias update
#[derive(Debug, Clone, PartialEq)]
pub enum AliasAction {
    Add {
        indices: Vec<String>,
        aliases: Vec<String>,
        options: AliasOptions,
    },
    Remove {
        indices: Vec<String>,
        aliases: Vec<String>,
    },
    /// Delete the indices themselves, e.g. to swap an alias onto a new index
    RemoveIndex { indices: Vec<String> },
}

impl AliasAction {
    pub fn add<S, A>(indices: Vec<S>, aliases: Vec<A>, options: AliasOptions) -> Self
    where
        S: Into<String>,
        A: Into<String>,
    {
        AliasAction::Add {
            indices: strings(indices),
            aliases: strings(aliases),
            options,
        }
    }

    pub fn remove<S, A>(indices: Vec<S>, aliases: Vec<A>) -> Self
    where
        S: Into<String>,
        A: Into<String>,
    {
        AliasAction::Remove {
            indices: strings(indices),
            aliases: strings(aliases),
        }
    }

    pub fn remove_index<S: Into<String>>(indices: Vec<S>) -> Self {
        AliasAction::RemoveIndex {
            indices: strings(indices),
        }
    }
}

/// `{"add": {"indices": [..], "aliases": [..], ..options}}` and so on
impl Serialize for AliasAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (kind, body) = match *self {
            AliasAction::Add {
                ref indices,
                ref aliases,
                ref options,
            } => (
                "add",
                ActionBody {
                    indices: non_empty(indices),
                    aliases: non_empty(aliases),
                    options: Some(options),
                },
            ),
            AliasAction::Remove {
                ref indices,
                ref aliases,
            } => (
                "remove",
                ActionBody {
                    indices: non_empty(indices),
                    aliases: non_empty(aliases),
                    options: None,
                },
            ),
            AliasAction::RemoveIndex { ref indices } => (
                "remove_index",
                ActionBody {
                    indices: non_empty(indices),
                    aliases: None,
                    options: None,
                },
            ),
        };
        FieldBased::new(kind, body, NoOuter).serialize(serializer)
    }
}

#[derive(Serialize)]
struct UpdateAliasesBody<'a> {
    actions: &'a [AliasAction],
}

/// Apply a list of alias actions atomically
#[derive(Debug, Clone, Default)]
pub struct UpdateAliasesOperation {
    actions: Vec<AliasAction>,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
}

impl UpdateAliasesOperation {
    pub fn new(actions: Vec<AliasAction>) -> Self {
        UpdateAliasesOperation {
            actions,
            ..Default::default()
        }
    }

    pub fn add(mut self, action: AliasAction) -> Self {
        self.actions.push(action);
        self
    }

    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for UpdateAliasesOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok("/_aliases".to_owned())
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        let body = UpdateAliasesBody {
            actions: &self.actions,
        };
        Ok(Some(Body::structured(&body, config.body_encoding)?))
    }
}

#[derive(Debug, Clone)]
pub struct GetAliasOperation {
    indices: Vec<String>,
    aliases: Vec<String>,
    indices_options: Option<IndicesOptions>,
    local: bool,
}

impl GetAliasOperation {
    /// Empty `indices` or `aliases` match all of them
    pub fn new<S, A>(indices: Vec<S>, aliases: Vec<A>) -> Self
    where
        S: Into<String>,
        A: Into<String>,
    {
        GetAliasOperation {
            indices: strings(indices),
            aliases: strings(aliases),
            indices_options: Some(IndicesOptions::strict_expand_open_closed()),
            local: false,
        }
    }

    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
    add_value!(with_local, local, bool);
}

impl ToHttpRequest for GetAliasOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_names_endpoint(&self.indices, "_alias", &self.aliases)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_indices_options(self.indices_options)
            .with_local(self.local)
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;
    use serde_json::json;

    use crate::config::Config;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;
    use crate::units::Duration;

    use super::{AliasAction, AliasOptions, GetAliasOperation, UpdateAliasesOperation};

    #[test]
    fn test_alias_actions_body() {
        let request = UpdateAliasesOperation::default()
            .add(AliasAction::remove(vec!["logs-1"], vec!["logs"]))
            .add(AliasAction::add(
                vec!["logs-2"],
                vec!["logs"],
                AliasOptions::new()
                    .with_routing("r")
                    .with_is_write_index(true),
            ))
            .add(AliasAction::remove_index(vec!["logs-0"]))
            .with_master_timeout(Duration::seconds(30))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Post, request.method);
        assert_eq!("/_aliases", request.path);
        assert_eq!(
            btreemap! { "master_timeout".to_owned() => "30s".to_owned() },
            request.params
        );
        assert_eq!(
            json!({"actions": [
                {"remove": {"indices": ["logs-1"], "aliases": ["logs"]}},
                {"add": {"indices": ["logs-2"], "aliases": ["logs"], "routing": "r", "is_write_index": true}},
                {"remove_index": {"indices": ["logs-0"]}}
            ]}),
            serde_json::from_slice::<serde_json::Value>(&request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_get_alias() {
        let request = GetAliasOperation::new(vec!["logs-*"], vec!["current"])
            .with_local(true)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/logs-*/_alias/current", request.path);
        assert_eq!(
            btreemap! {
                "ignore_unavailable".to_owned() => "false".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open,closed".to_owned(),
                "local".to_owned() => "true".to_owned(),
            },
            request.params
        );

        let all = GetAliasOperation::new(Vec::<String>::new(), Vec::<String>::new())
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/_alias", all.path);
    }
}
