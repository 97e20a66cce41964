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

//! Implementation of the Field Capabilities API

use crate::endpoint::indices_keyword_endpoint;
use crate::error::EsError;
use crate::request::Method;

use super::super::common::{strings, IndicesOptions};
use super::super::params::Params;
use super::super::ToHttpRequest;

#[derive(Debug, Clone)]
pub struct FieldCapsOperation {
    indices: Vec<String>,
    fields: Vec<String>,
    indices_options: Option<IndicesOptions>,
}

impl FieldCapsOperation {
    /// `fields` may contain wildcards
    pub fn new<S, F>(indices: Vec<S>, fields: Vec<F>) -> Self
    where
        S: Into<String>,
        F: Into<String>,
    {
        FieldCapsOperation {
            indices: strings(indices),
            fields: strings(fields),
            indices_options: Some(IndicesOptions::strict_expand_open()),
        }
    }

    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
}

impl ToHttpRequest for FieldCapsOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_field_caps")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_fields(&self.fields)
            .with_indices_options(self.indices_options)
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;

    use crate::config::Config;
    use crate::operations::common::IndicesOptions;
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::FieldCapsOperation;

    #[test]
    fn test_field_caps() {
        let request = FieldCapsOperation::new(vec!["logs", "metrics"], vec!["host.*", "level"])
            .with_indices_options(Some(IndicesOptions::lenient_expand_open()))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Get, request.method);
        assert_eq!("/logs,metrics/_field_caps", request.path);
        assert_eq!(
            btreemap! {
                "fields".to_owned() => "host.*,level".to_owned(),
                "ignore_unavailable".to_owned() => "true".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open".to_owned(),
            },
            request.params
        );
        assert!(request.body.is_none());
    }
}
