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

//! Building URL paths out of index names, ids and API keywords
//!
//! Every user supplied segment is percent-encoded on its own, so a `/` inside
//! an id can never be mistaken for a path boundary.  API keywords such as
//! `_search` are trusted and added as they are.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::EsError;

/// Everything outside the RFC 3986 `pchar` set, plus `/`.  Non-ASCII is always
/// escaped as UTF-8.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'/');

/// Percent-encode a single path segment.
///
/// `.` and `..` are refused: however they are escaped, a server normalising
/// the path would treat them as navigation.
pub fn encode_part(part: &str) -> Result<String, EsError> {
    if part == "." || part == ".." {
        return Err(EsError::Encoding(part.to_owned()));
    }
    Ok(utf8_percent_encode(part, PATH_SEGMENT).to_string())
}

/// Accumulates path segments in order
#[derive(Debug, Default, Clone)]
pub struct EndpointBuilder {
    parts: Vec<String>,
}

impl EndpointBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an encoded segment, empty segments are skipped
    pub fn add_part<S: AsRef<str>>(mut self, part: S) -> Result<Self, EsError> {
        let part = part.as_ref();
        if !part.is_empty() {
            self.parts.push(encode_part(part)?);
        }
        Ok(self)
    }

    pub fn add_optional_part(self, part: Option<&str>) -> Result<Self, EsError> {
        match part {
            Some(part) => self.add_part(part),
            None => Ok(self),
        }
    }

    /// Join `parts` with `,` and add them as one encoded segment
    pub fn add_comma_separated_parts<S: AsRef<str>>(self, parts: &[S]) -> Result<Self, EsError> {
        let joined = parts
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.add_part(joined)
    }

    /// Add a fixed API keyword without encoding, e.g. `_search` or
    /// `_cluster/health`
    pub fn add_part_as_is(mut self, part: &str) -> Self {
        if !part.is_empty() {
            self.parts.push(part.to_owned());
        }
        self
    }

    pub fn build(self) -> String {
        format!("/{}", self.parts.join("/"))
    }
}

/// `/{index}/{id}`
pub fn doc_endpoint(index: &str, id: &str) -> Result<String, EsError> {
    Ok(EndpointBuilder::new().add_part(index)?.add_part(id)?.build())
}

/// `/{index}/{id}/{keyword}`
pub fn doc_keyword_endpoint(index: &str, id: &str, keyword: &str) -> Result<String, EsError> {
    Ok(EndpointBuilder::new()
        .add_part(index)?
        .add_part(id)?
        .add_part_as_is(keyword)
        .build())
}

/// `/{indices}`
pub fn indices_endpoint<S: AsRef<str>>(indices: &[S]) -> Result<String, EsError> {
    Ok(EndpointBuilder::new()
        .add_comma_separated_parts(indices)?
        .build())
}

/// `/{indices}/{keyword}`, or just `/{keyword}` without indices
pub fn indices_keyword_endpoint<S: AsRef<str>>(
    indices: &[S],
    keyword: &str,
) -> Result<String, EsError> {
    Ok(EndpointBuilder::new()
        .add_comma_separated_parts(indices)?
        .add_part_as_is(keyword)
        .build())
}

/// `/{indices}/{keyword}/{names}`
pub fn indices_keyword_names_endpoint<S, T>(
    indices: &[S],
    keyword: &str,
    names: &[T],
) -> Result<String, EsError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    Ok(EndpointBuilder::new()
        .add_comma_separated_parts(indices)?
        .add_part_as_is(keyword)
        .add_comma_separated_parts(names)?
        .build())
}

#[cfg(test)]
pub mod tests {
    use percent_encoding::percent_decode_str;
    use regex::Regex;

    use crate::error::EsError;

    use super::{
        doc_endpoint, encode_part, indices_keyword_endpoint, indices_keyword_names_endpoint,
        EndpointBuilder,
    };

    #[test]
    fn test_slash_in_id_is_escaped() {
        assert_eq!("/logs/a%2Fb", doc_endpoint("logs", "a/b").unwrap());
    }

    #[test]
    fn test_reserved_but_safe_characters_stay_literal() {
        assert_eq!("-idx:1,2@x+y=z", encode_part("-idx:1,2@x+y=z").unwrap());
        assert_eq!("a%20b%3Fc%23d%25", encode_part("a b?c#d%").unwrap());
        assert_eq!("caf%C3%A9", encode_part("café").unwrap());
    }

    #[test]
    fn test_dot_segments_are_refused() {
        assert!(matches!(encode_part("."), Err(EsError::Encoding(_))));
        assert!(matches!(doc_endpoint("logs", ".."), Err(EsError::Encoding(_))));
        assert_eq!("...", encode_part("...").unwrap());
    }

    #[test]
    fn test_empty_parts_are_skipped() {
        let path = EndpointBuilder::new()
            .add_part("")
            .unwrap()
            .add_comma_separated_parts::<&str>(&[])
            .unwrap()
            .add_part_as_is("_search")
            .build();
        assert_eq!("/_search", path);
        assert_eq!("/", EndpointBuilder::new().build());
    }

    #[test]
    fn test_comma_separated_parts() {
        assert_eq!(
            "/a,b/_mapping/field/f1,f%2F2",
            indices_keyword_names_endpoint(&["a", "b"], "_mapping/field", &["f1", "f/2"]).unwrap()
        );
        assert_eq!("/_refresh", indices_keyword_endpoint::<&str>(&[], "_refresh").unwrap());
    }

    #[test]
    fn test_segments_decode_back() {
        let segments = ["my/index", "-leading", "a:b", "spaced out", "100%", "ünï"];
        let mut builder = EndpointBuilder::new();
        for s in &segments {
            builder = builder.add_part(s).unwrap();
        }
        let path = builder.build();

        let allowed = Regex::new(r"^[A-Za-z0-9\-._~!$&'()*+,;=:@%]+$").unwrap();
        let decoded: Vec<String> = path[1..]
            .split('/')
            .map(|seg| {
                assert!(allowed.is_match(seg), "bad segment {}", seg);
                percent_decode_str(seg).decode_utf8().unwrap().into_owned()
            })
            .collect();
        assert_eq!(segments.to_vec(), decoded);
    }
}
