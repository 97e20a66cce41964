/*
 * Copyright 2015 Ben Ashford
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

//! Converts typed ElasticSearch operations into HTTP requests.
//!
//! Every operation is a plain struct built with `new` and `with_` methods.
//! Converting one, via [`ToHttpRequest`](operations/trait.ToHttpRequest.html)
//! or the [`Operation`](operations/enum.Operation.html) enum, yields an
//! [`HttpRequest`](request/struct.HttpRequest.html): method, path, query
//! parameters and an optional body.  Sending it is left to whichever HTTP
//! client the caller uses.
//!
//! ```
//! use rs_es_requests::operations::search::SearchOperation;
//! use rs_es_requests::{Config, Method, ToHttpRequest};
//!
//! let request = SearchOperation::new(vec!["logs"])
//!     .with_routing("r")
//!     .to_request(&Config::default())
//!     .unwrap();
//! assert_eq!(Method::Post, request.method);
//! assert_eq!("/logs/_search", request.path);
//! ```

#[macro_use]
extern crate log;

#[macro_use]
mod util;

pub mod config;
pub mod content;
pub mod endpoint;
pub mod error;
pub mod json;
pub mod operations;
pub mod request;
pub mod units;

pub use crate::config::Config;
pub use crate::content::{ContentEncoding, Source};
pub use crate::error::EsError;
pub use crate::operations::{convert, Operation, ToHttpRequest};
pub use crate::request::{Body, HttpRequest, Method};
