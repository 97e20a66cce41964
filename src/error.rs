/*
 * Copyright 2015-2019 Ben Ashford
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

// Error handling

use crate::content::ContentEncoding;

/// Errors that can occur while converting an operation into a request.
///
/// All of them are raised before any `HttpRequest` is returned, none of them
/// are worth retrying: the caller has to change the operation.
#[derive(Debug, thiserror::Error)]
pub enum EsError {
    /// A path segment could not be represented in a URL path
    #[error("Path part [{0}] couldn't be encoded")]
    Encoding(String),

    /// A write action carries a body in an encoding the bulk API refuses
    #[error("Unsupported content-type found for request with content-type [{0}], only JSON and SMILE are supported")]
    UnsupportedEncoding(ContentEncoding),

    /// Two parts of the same request disagree on their body encoding
    #[error("Mismatching content-type found for request with content-type [{found}], previous requests have content-type [{previous}]")]
    ConflictingEncoding {
        previous: ContentEncoding,
        found: ContentEncoding,
    },

    /// The operation is not valid as given
    #[error("{0}")]
    InvalidArgument(String),

    /// A body could not be read or written in its declared encoding
    #[error("Codec error: {0}")]
    Codec(String),

    /// Miscellaneous JSON error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Miscellaneous YAML error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
