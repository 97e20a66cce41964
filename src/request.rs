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

//! The transport-neutral description of one HTTP call

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

use crate::content::{ContentEncoding, Source};
use crate::error::EsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body bytes and the encoding they're in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub bytes: Vec<u8>,
    pub encoding: ContentEncoding,
}

impl Body {
    pub fn new(bytes: Vec<u8>, encoding: ContentEncoding) -> Self {
        Body { bytes, encoding }
    }

    /// Serialize a structured body in `encoding`
    pub fn structured<T>(value: &T, encoding: ContentEncoding) -> Result<Self, EsError>
    where
        T: Serialize + ?Sized,
    {
        Ok(Body::new(encoding.write(value)?, encoding))
    }

    /// The value for the `Content-Type` header
    pub fn content_type(&self) -> &'static str {
        self.encoding.media_type()
    }
}

/// A document is sent exactly as it was supplied
impl<'a> From<&'a Source> for Body {
    fn from(from: &'a Source) -> Body {
        Body::new(from.bytes().to_vec(), from.encoding())
    }
}

/// A request ready to hand to an HTTP client.  `path` always starts with `/`
/// and is already percent-encoded; `params` are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub body: Option<Body>,
}

impl HttpRequest {
    /// The path followed by the form-urlencoded query string, if any
    pub fn path_and_query(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}
