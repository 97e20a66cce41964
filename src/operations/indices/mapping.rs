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

//! Implementation of the "mapping" operations of the Indices API

use serde_json::Value;

use crate::config::Config;
use crate::endpoint::{indices_keyword_endpoint, indices_keyword_names_endpoint};
use crate::error::EsError;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::super::common::{strings, IndicesOptions};
use super::super::params::Params;
use super::super::ToHttpRequest;

/// Add fields to, or change parameters of, the mappings of existing indices
#[derive(Debug, Clone)]
pub struct PutMappingOperation {
    indices: Vec<String>,
    source: Value,
    timeout: Option<Duration>,
    master_timeout: Option<Duration>,
}

impl PutMappingOperation {
    /// `source` is the mapping body, e.g. `{"properties": {..}}`
    pub fn new<S: Into<String>>(indices: Vec<S>, source: Value) -> Self {
        PutMappingOperation {
            indices: strings(indices),
            source,
            timeout: None,
            master_timeout: None,
        }
    }

    add_field!(with_timeout, timeout, Duration);
    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for PutMappingOperation {
    fn method(&self) -> Method {
        Method::Put
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_mapping")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_timeout(self.timeout)
            .with_master_timeout(self.master_timeout)
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        Ok(Some(Body::structured(&self.source, config.body_encoding)?))
    }
}

#[derive(Debug, Clone)]
pub struct GetMappingsOperation {
    indices: Vec<String>,
    master_timeout: Option<Duration>,
    indices_options: Option<IndicesOptions>,
    local: bool,
}

impl GetMappingsOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        GetMappingsOperation {
            indices: strings(indices),
            master_timeout: None,
            indices_options: Some(IndicesOptions::strict_expand_open()),
            local: false,
        }
    }

    add_field!(with_master_timeout, master_timeout, Duration);
    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
    add_value!(with_local, local, bool);
}

impl ToHttpRequest for GetMappingsOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_mapping")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_master_timeout(self.master_timeout)
            .with_indices_options(self.indices_options)
            .with_local(self.local)
    }
}

/// The mappings of individual fields
#[derive(Debug, Clone)]
pub struct GetFieldMappingOperation {
    indices: Vec<String>,
    fields: Vec<String>,
    indices_options: Option<IndicesOptions>,
    include_defaults: bool,
}

impl GetFieldMappingOperation {
    pub fn new<S, F>(indices: Vec<S>, fields: Vec<F>) -> Self
    where
        S: Into<String>,
        F: Into<String>,
    {
        GetFieldMappingOperation {
            indices: strings(indices),
            fields: strings(fields),
            indices_options: Some(IndicesOptions::strict_expand_open()),
            include_defaults: false,
        }
    }

    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
    add_value!(with_include_defaults, include_defaults, bool);
}

impl ToHttpRequest for GetFieldMappingOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_names_endpoint(&self.indices, "_mapping/field", &self.fields)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_indices_options(self.indices_options)
            .with_include_defaults(self.include_defaults)
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

    use super::{GetFieldMappingOperation, GetMappingsOperation, PutMappingOperation};

    #[test]
    fn test_put_mapping() {
        let mapping = json!({"properties": {"field_a": {"type": "keyword"}}});
        let request = PutMappingOperation::new(vec!["logs"], mapping.clone())
            .with_timeout(Duration::seconds(5))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Put, request.method);
        assert_eq!("/logs/_mapping", request.path);
        assert_eq!(
            btreemap! { "timeout".to_owned() => "5s".to_owned() },
            request.params
        );
        assert_eq!(
            mapping,
            serde_json::from_slice::<serde_json::Value>(&request.body.unwrap().bytes).unwrap()
        );
    }

    #[test]
    fn test_get_mappings() {
        let request = GetMappingsOperation::new(Vec::<String>::new())
            .with_indices_options(None)
            .with_local(true)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/_mapping", request.path);
        assert_eq!(
            btreemap! { "local".to_owned() => "true".to_owned() },
            request.params
        );
    }

    #[test]
    fn test_get_field_mapping() {
        let request = GetFieldMappingOperation::new(vec!["logs"], vec!["msg", "host.*"])
            .with_indices_options(None)
            .with_include_defaults(true)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/logs/_mapping/field/msg,host.*", request.path);
        assert_eq!(
            btreemap! { "include_defaults".to_owned() => "true".to_owned() },
            request.params
        );

        let all = GetFieldMappingOperation::new(Vec::<String>::new(), vec!["msg"])
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/_mapping/field/msg", all.path);
    }
}
