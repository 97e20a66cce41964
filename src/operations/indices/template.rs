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

//! Index templates: settings, mappings and aliases applied to new indices
//! whose names match a pattern

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::endpoint::EndpointBuilder;
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::super::common::strings;
use super::super::params::Params;
use super::super::ToHttpRequest;
use super::alias::{AliasOptions, Aliases};

fn template_endpoint<S: AsRef<str>>(names: &[S]) -> Result<String, EsError> {
    Ok(EndpointBuilder::new()
        .add_part_as_is("_template")
        .add_comma_separated_parts(names)?
        .build())
}

fn is_empty(aliases: &Aliases) -> bool {
    aliases.is_empty()
}

#[derive(Debug, Clone, Serialize)]
pub struct PutTemplateOperation {
    #[serde(skip)]
    name: String,
    #[serde(skip)]
    create: bool,
    #[serde(skip)]
    cause: Option<String>,
    #[serde(skip)]
    master_timeout: Option<Duration>,

    index_patterns: Vec<String>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    order: Option<i32>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    version: Option<i32>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    settings: Option<Value>,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    mappings: Option<Value>,
    #[serde(skip_serializing_if = "is_empty")]
    aliases: Aliases,
}

impl PutTemplateOperation {
    pub fn new<N, S>(name: N, index_patterns: Vec<S>) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        PutTemplateOperation {
            name: name.into(),
            create: false,
            cause: None,
            master_timeout: None,
            index_patterns: strings(index_patterns),
            order: None,
            version: None,
            settings: None,
            mappings: None,
            aliases: Aliases::new(),
        }
    }

    // fail rather than replace an existing template
    add_value!(with_create, create, bool);
    add_field!(with_cause, cause, String);
    add_field!(with_master_timeout, master_timeout, Duration);
    add_field!(with_order, order, i32);
    add_field!(with_version, version, i32);
    add_field!(with_settings, settings, Value);
    add_field!(with_mappings, mappings, Value);

    pub fn add_alias<S: Into<String>>(mut self, name: S, options: AliasOptions) -> Self {
        self.aliases.insert(name.into(), options);
        self
    }
}

impl ToHttpRequest for PutTemplateOperation {
    fn method(&self) -> Method {
        Method::Put
    }

    fn endpoint(&self) -> Result<String, EsError> {
        template_endpoint(&[&self.name])
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_master_timeout(self.master_timeout)
            .put_flag("create", self.create)
            .put_opt("cause", self.cause.as_deref())
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        Ok(Some(Body::structured(self, config.body_encoding)?))
    }
}

/// Templates by name, wildcards allowed; all of them when no names are given
#[derive(Debug, Clone)]
pub struct GetTemplatesOperation {
    names: Vec<String>,
    local: bool,
    master_timeout: Option<Duration>,
}

impl GetTemplatesOperation {
    pub fn new<S: Into<String>>(names: Vec<S>) -> Self {
        GetTemplatesOperation {
            names: strings(names),
            local: false,
            master_timeout: None,
        }
    }

    add_value!(with_local, local, bool);
    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for GetTemplatesOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        template_endpoint(&self.names)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_local(self.local)
            .with_master_timeout(self.master_timeout)
    }
}

#[derive(Debug, Clone)]
pub struct TemplatesExistOperation {
    names: Vec<String>,
    local: bool,
    master_timeout: Option<Duration>,
}

impl TemplatesExistOperation {
    pub fn new<S: Into<String>>(names: Vec<S>) -> Self {
        TemplatesExistOperation {
            names: strings(names),
            local: false,
            master_timeout: None,
        }
    }

    add_value!(with_local, local, bool);
    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for TemplatesExistOperation {
    fn method(&self) -> Method {
        Method::Head
    }

    fn endpoint(&self) -> Result<String, EsError> {
        if self.names.is_empty() {
            return Err(EsError::InvalidArgument(
                "must provide at least one index template name".to_owned(),
            ));
        }
        template_endpoint(&self.names)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_local(self.local)
            .with_master_timeout(self.master_timeout)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteTemplateOperation {
    name: String,
    master_timeout: Option<Duration>,
}

impl DeleteTemplateOperation {
    pub fn new<S: Into<String>>(name: S) -> Self {
        DeleteTemplateOperation {
            name: name.into(),
            master_timeout: None,
        }
    }

    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for DeleteTemplateOperation {
    fn method(&self) -> Method {
        Method::Delete
    }

    fn endpoint(&self) -> Result<String, EsError> {
        template_endpoint(&[&self.name])
    }

    fn params(&self, params: Params) -> Params {
        params.with_master_timeout(self.master_timeout)
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;
    use serde_json::json;

    use crate::config::Config;
    use crate::error::EsError;
    use crate::operations::indices::alias::AliasOptions;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;
    use crate::units::Duration;

    use super::{
        DeleteTemplateOperation, GetTemplatesOperation, PutTemplateOperation,
        TemplatesExistOperation,
    };

    #[test]
    fn test_put_template() {
        let request = PutTemplateOperation::new("logs", vec!["logs-*"])
            .with_order(1)
            .with_settings(json!({"number_of_shards": 1}))
            .add_alias("all-logs", AliasOptions::new())
            .with_create(true)
            .with_cause("nightly")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Put, request.method);
        assert_eq!("/_template/logs", request.path);
        assert_eq!(
            btreemap! {
                "create".to_owned() => "true".to_owned(),
                "cause".to_owned() => "nightly".to_owned(),
            },
            request.params
        );
        assert_eq!(
            "{\"index_patterns\":[\"logs-*\"],\"order\":1,\
             \"settings\":{\"number_of_shards\":1},\"aliases\":{\"all-logs\":{}}}",
            String::from_utf8(request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_get_templates() {
        let request = GetTemplatesOperation::new(vec!["logs", "metrics-*"])
            .with_local(true)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/_template/logs,metrics-*", request.path);
        assert_eq!(
            btreemap! { "local".to_owned() => "true".to_owned() },
            request.params
        );

        let all = GetTemplatesOperation::new(Vec::<String>::new())
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/_template", all.path);
    }

    #[test]
    fn test_templates_exist_needs_names() {
        let request = TemplatesExistOperation::new(vec!["logs"])
            .with_master_timeout(Duration::seconds(30))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Head, request.method);
        assert_eq!("/_template/logs", request.path);
        assert_eq!(
            btreemap! { "master_timeout".to_owned() => "30s".to_owned() },
            request.params
        );

        let result = TemplatesExistOperation::new(Vec::<String>::new()).to_request(&Config::default());
        assert!(matches!(result, Err(EsError::InvalidArgument(_))));
    }

    #[test]
    fn test_delete_template() {
        let request = DeleteTemplateOperation::new("logs")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Delete, request.method);
        assert_eq!("/_template/logs", request.path);
        assert!(request.params.is_empty());
        assert!(request.body.is_none());
    }
}
