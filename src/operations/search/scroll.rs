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

//! Fetching the next page of a scrolled search, and releasing scroll
//! contexts

use serde::Serialize;

use crate::config::Config;
use crate::error::EsError;
use crate::json::ShouldSkip;
use crate::request::{Body, Method};
use crate::units::Duration;

use super::super::common::strings;
use super::super::ToHttpRequest;

const SCROLL_ENDPOINT: &str = "/_search/scroll";

#[derive(Debug, Clone, Serialize)]
pub struct ScrollOperation {
    scroll_id: String,
    #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
    scroll: Option<Duration>,
}

impl ScrollOperation {
    pub fn new<S: Into<String>>(scroll_id: S) -> Self {
        ScrollOperation {
            scroll_id: scroll_id.into(),
            scroll: None,
        }
    }

    // extend the scroll context's keep-alive
    add_field!(with_scroll, scroll, Duration);
}

impl ToHttpRequest for ScrollOperation {
    fn method(&self) -> Method {
        Method::Post
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok(SCROLL_ENDPOINT.to_owned())
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        Ok(Some(Body::structured(self, config.body_encoding)?))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClearScrollOperation {
    scroll_id: Vec<String>,
}

impl ClearScrollOperation {
    pub fn new<S: Into<String>>(scroll_ids: Vec<S>) -> Self {
        ClearScrollOperation {
            scroll_id: strings(scroll_ids),
        }
    }

    pub fn add<S: Into<String>>(mut self, scroll_id: S) -> Self {
        self.scroll_id.push(scroll_id.into());
        self
    }
}

impl ToHttpRequest for ClearScrollOperation {
    fn method(&self) -> Method {
        Method::Delete
    }

    fn endpoint(&self) -> Result<String, EsError> {
        Ok(SCROLL_ENDPOINT.to_owned())
    }

    fn body(&self, config: &Config) -> Result<Option<Body>, EsError> {
        Ok(Some(Body::structured(self, config.body_encoding)?))
    }
}
