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

//! Refresh and flush indices

use crate::endpoint::indices_keyword_endpoint;
use crate::error::EsError;
use crate::request::Method;

use super::super::common::{strings, IndicesOptions};
use super::super::params::Params;
use super::super::ToHttpRequest;

/// Make recent changes visible to search.  All indices when none are given.
#[derive(Debug, Clone)]
pub struct RefreshOperation {
    indices: Vec<String>,
    indices_options: Option<IndicesOptions>,
}

impl RefreshOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        RefreshOperation {
            indices: strings(indices),
            indices_options: Some(IndicesOptions::strict_expand_open()),
        }
    }

    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
}

impl ToHttpRequest for RefreshOperation {
    /// GET, as a body-less POST may be sent chunked and stall
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_refresh")
    }

    fn params(&self, params: Params) -> Params {
        params.with_indices_options(self.indices_options)
    }
}

#[derive(Debug, Clone)]
pub struct FlushOperation {
    indices: Vec<String>,
    indices_options: Option<IndicesOptions>,
    wait_if_ongoing: bool,
    force: bool,
}

impl FlushOperation {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        FlushOperation {
            indices: strings(indices),
            indices_options: Some(IndicesOptions::strict_expand_open()),
            wait_if_ongoing: true,
            force: false,
        }
    }

    add_value!(with_indices_options, indices_options, Option<IndicesOptions>);
    add_value!(with_wait_if_ongoing, wait_if_ongoing, bool);
    add_value!(with_force, force, bool);
}

impl ToHttpRequest for FlushOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        indices_keyword_endpoint(&self.indices, "_flush")
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_indices_options(self.indices_options)
            .put_bool("wait_if_ongoing", self.wait_if_ongoing)
            .put_bool("force", self.force)
    }
}
