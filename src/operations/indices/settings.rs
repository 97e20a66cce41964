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

//! Reading index settings

use crate::endpoint::indices_keyword_names_endpoint;
use crate::error::EsError;
use crate::request::Method;
use crate::units::Duration;

use super::super::common::{strings, IndicesOptions};
use super::super::params::Params;
use super::super::ToHttpRequest;

#[derive(Debug, Clone)]
pub struct GetSettingsOperation {
    indices: Vec<String>,
    names: Vec<String>,
    indices_options: Option<IndicesOptions>,
    local: bool,
    include_defaults: bool,
    master_timeout: Option<Duration>,
}

impl GetSettingsOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        GetSettingsOperation {
            indices: strings(indices),
            names: Vec::new(),
            indices_options: Some(IndicesOptions::strict_expand_open()),
            local: false,
            include_defaults: false,
            master_timeout: None,
        }
    }

    /// Only these settings, wildcards allowed, e.g. `index.number_*`
    pub fn with_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.names = strings(names);
        self
    }

    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
    add_value!(with_local, local, bool);
    add_value!(with_include_defaults, include_defaults, bool);
    add_field!(with_master_timeout, master_timeout, Duration);
}

impl ToHttpRequest for GetSettingsOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_names_endpoint(&self.indices, "_settings", &self.names)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_indices_options(self.indices_options)
            .with_local(self.local)
            .with_include_defaults(self.include_defaults)
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

    use super::GetSettingsOperation;

    #[test]
    fn test_get_settings() {
        let request = GetSettingsOperation::new(vec!["logs"])
            .with_names(vec!["index.number_*"])
            .with_include_defaults(true)
            .with_master_timeout(Duration::seconds(30))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/logs/_settings/index.number_*", request.path);
        assert_eq!(
            btreemap! {
                "ignore_unavailable".to_owned() => "false".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open".to_owned(),
                "include_defaults".to_owned() => "true".to_owned(),
                "master_timeout".to_owned() => "30s".to_owned(),
            },
            request.params
        );
    }

    #[test]
    fn test_get_all_settings() {
        let request = GetSettingsOperation::new(Vec::<String>::new())
            .to_request(&Config::default())
            .unwrap();
        assert_eq!("/_settings", request.path);
    }
}
