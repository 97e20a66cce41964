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

//! Fetch ElasticSearch version information, or just check it's there

use crate::error::EsError;
use crate::request::Method;

use super::ToHttpRequest;

/// Calls the base ES path, returning the version number
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoOperation;

impl ToHttpRequest for InfoOperation {
    fn method(&self) -> Method {
        Method::Get
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok("/".to_owned())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PingOperation;

impl ToHttpRequest for PingOperation {
    fn method(&self) -> Method {
        Method::Head
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok("/".to_owned())
    }
}
