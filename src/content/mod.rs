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

//! Body encodings understood by the cluster, and documents carried in them

pub mod negotiate;
pub mod smile;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EsError;

/// The formats a request body may be written in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    #[default]
    Json,
    Smile,
    Yaml,
}

impl ContentEncoding {
    /// The media type, without parameters, sent as `Content-Type`
    pub fn media_type(self) -> &'static str {
        match self {
            ContentEncoding::Json => "application/json",
            ContentEncoding::Smile => "application/smile",
            ContentEncoding::Yaml => "application/yaml",
        }
    }

    /// The byte that terminates each document in a multi-document stream
    /// (bulk and multi-search bodies)
    pub fn stream_separator(self) -> u8 {
        match self {
            ContentEncoding::Json | ContentEncoding::Yaml => b'\n',
            ContentEncoding::Smile => smile::END_OF_CONTENT,
        }
    }

    /// Only JSON and Smile can be framed into a bulk body
    pub fn is_bulk_compatible(self) -> bool {
        matches!(self, ContentEncoding::Json | ContentEncoding::Smile)
    }

    /// Parse a complete document in this encoding
    pub fn read(self, bytes: &[u8]) -> Result<Value, EsError> {
        Ok(match self {
            ContentEncoding::Json => serde_json::from_slice(bytes)?,
            ContentEncoding::Yaml => serde_yaml::from_slice(bytes)?,
            ContentEncoding::Smile => smile::from_slice(bytes)?,
        })
    }

    /// Write a value as one complete document in this encoding.  JSON output
    /// is compact, so it never contains a raw newline.
    pub fn write<T>(self, value: &T) -> Result<Vec<u8>, EsError>
    where
        T: Serialize + ?Sized,
    {
        Ok(match self {
            ContentEncoding::Json => serde_json::to_vec(value)?,
            ContentEncoding::Yaml => {
                serde_yaml::to_string(&yaml_value(&serde_json::to_value(value)?))?.into_bytes()
            }
            ContentEncoding::Smile => smile::to_vec(&serde_json::to_value(value)?)?,
        })
    }
}

/// Numbers keep their exact text only in JSON and Smile; YAML gets the
/// nearest 64 bit integer or double.
fn yaml_value(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_yaml::Value::from(i)
            } else if let Some(u) = n.as_u64() {
                serde_yaml::Value::from(u)
            } else {
                n.as_f64()
                    .map_or(serde_yaml::Value::Null, serde_yaml::Value::from)
            }
        }
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Array(items) => serde_yaml::Value::Sequence(items.iter().map(yaml_value).collect()),
        Value::Object(map) => serde_yaml::Value::Mapping(
            map.iter()
                .map(|(k, v)| (serde_yaml::Value::String(k.clone()), yaml_value(v)))
                .collect(),
        ),
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

/// A document payload, as produced by whatever builds documents: opaque bytes
/// and the encoding they are declared to be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    bytes: Vec<u8>,
    encoding: ContentEncoding,
}

impl Source {
    pub fn new<B: Into<Vec<u8>>>(bytes: B, encoding: ContentEncoding) -> Self {
        Source {
            bytes: bytes.into(),
            encoding,
        }
    }

    /// Serialize `doc` as a JSON document
    pub fn json<T: Serialize + ?Sized>(doc: &T) -> Result<Self, EsError> {
        Ok(Source::new(serde_json::to_vec(doc)?, ContentEncoding::Json))
    }

    pub fn encoding(&self) -> ContentEncoding {
        self.encoding
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The document's structure
    pub fn to_value(&self) -> Result<Value, EsError> {
        self.encoding.read(&self.bytes)
    }

    /// Copy the document's structure into `target`.  This converts the
    /// encoding only; keys, their order and all values are kept.
    pub fn reencode(&self, target: ContentEncoding) -> Result<Vec<u8>, EsError> {
        target.write(&self.to_value()?)
    }
}
