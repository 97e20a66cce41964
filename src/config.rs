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

//! Settings that apply to every conversion

use serde::Deserialize;

use crate::content::ContentEncoding;

/// Conversion settings.  Can be embedded in a host application's own
/// configuration file, every field is optional:
///
/// ```toml
/// [elasticsearch]
/// body_encoding = "smile"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encoding of bodies this crate builds itself: search sources,
    /// administrative bodies, multi-search lines.
    pub body_encoding: ContentEncoding,

    /// Encoding of an update body when neither a partial document nor an
    /// upsert document decides it
    pub write_encoding: ContentEncoding,
}

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_body_encoding(mut self, encoding: ContentEncoding) -> Self {
        self.body_encoding = encoding;
        self
    }

    pub fn with_write_encoding(mut self, encoding: ContentEncoding) -> Self {
        self.write_encoding = encoding;
        self
    }
}

#[cfg(test)]
pub mod tests {
    use serde::Deserialize;

    use crate::content::ContentEncoding;

    use super::Config;

    #[derive(Deserialize)]
    struct HostConfig {
        elasticsearch: Config,
    }

    #[test]
    fn test_defaults_to_json() {
        let config = Config::default();
        assert_eq!(ContentEncoding::Json, config.body_encoding);
        assert_eq!(ContentEncoding::Json, config.write_encoding);
    }

    #[test]
    fn test_parse_from_toml() {
        let host: HostConfig = toml::from_str(
            r#"
            [elasticsearch]
            body_encoding = "smile"
            "#,
        )
        .unwrap();
        assert_eq!(ContentEncoding::Smile, host.elasticsearch.body_encoding);
        assert_eq!(ContentEncoding::Json, host.elasticsearch.write_encoding);
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        let parsed: Result<HostConfig, _> = toml::from_str("[elasticsearch]\nbody_encoding = \"xml\"\n");
        assert!(parsed.is_err());
    }
}
