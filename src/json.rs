/*
 * Copyright 2016 Ben Ashford
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

//! Helper for common requirements when producing request bodies

use serde::ser::{Serialize, SerializeMap, Serializer};

/// To tell Serde to skip various fields
pub trait ShouldSkip {
    fn should_skip(&self) -> bool;
}

/// To indicate whether an optional field should be skipped if None
impl<T> ShouldSkip for Option<T> {
    fn should_skip(&self) -> bool {
        self.is_none()
    }
}

/// Empty lists are left out entirely
impl<T> ShouldSkip for Vec<T> {
    fn should_skip(&self) -> bool {
        self.is_empty()
    }
}

/// No outer options
///
/// Literally serializes to nothing
#[derive(Debug, Default, Clone)]
pub struct NoOuter;

impl MergeSerialize for NoOuter {
    fn merge_serialize<S>(&self, _: &mut S) -> Result<(), S::Error>
    where
        S: SerializeMap,
    {
        // No-op
        Ok(())
    }
}

/// A recurring theme in ElasticSearch is for JSON to be `{"variable": {..map of options..}`
#[derive(Debug, Clone)]
pub struct FieldBased<F, I, O> {
    pub field: F,
    pub inner: I,
    pub outer: O,
}

impl<F, I, O> FieldBased<F, I, O> {
    pub fn new(field: F, inner: I, outer: O) -> Self {
        FieldBased {
            field,
            inner,
            outer,
        }
    }
}

impl<F, I, O> Serialize for FieldBased<F, I, O>
where
    F: Serialize,
    I: Serialize,
    O: MergeSerialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry(&self.field, &self.inner)?;
        self.outer.merge_serialize(&mut map)?;

        map.end()
    }
}

/// MergeSerialize, implemented by structs that want to add to an existing struct
pub trait MergeSerialize {
    fn merge_serialize<S>(&self, serializer: &mut S) -> Result<(), S::Error>
    where
        S: SerializeMap;
}

#[cfg(test)]
pub mod tests {
    use serde::ser::SerializeMap;
    use serde::Serialize;

    use super::{FieldBased, MergeSerialize, NoOuter, ShouldSkip};

    #[derive(Default, Serialize)]
    struct RoutingOptions {
        #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
        routing: Option<String>,
        #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
        aliases: Vec<String>,
    }

    struct Trailer {
        is_write_index: bool,
    }

    impl MergeSerialize for Trailer {
        fn merge_serialize<S>(&self, serializer: &mut S) -> Result<(), S::Error>
        where
            S: SerializeMap,
        {
            serializer.serialize_entry("is_write_index", &self.is_write_index)
        }
    }

    #[test]
    fn test_empty_inner_fields_are_skipped() {
        let t = FieldBased::new("add", RoutingOptions::default(), NoOuter);
        assert_eq!("{\"add\":{}}", serde_json::to_string(&t).unwrap());
    }

    #[test]
    fn test_inner_fields() {
        let inner = RoutingOptions {
            routing: Some("r1".to_owned()),
            aliases: Vec::new(),
        };
        let t = FieldBased::new("add", inner, NoOuter);
        assert_eq!(
            "{\"add\":{\"routing\":\"r1\"}}",
            serde_json::to_string(&t).unwrap()
        );
    }

    #[test]
    fn test_outer_fields_follow_the_field() {
        let t = FieldBased::new(
            "remove",
            RoutingOptions {
                routing: None,
                aliases: vec!["a1".to_owned(), "a2".to_owned()],
            },
            Trailer {
                is_write_index: true,
            },
        );
        assert_eq!(
            "{\"remove\":{\"aliases\":[\"a1\",\"a2\"]},\"is_write_index\":true}",
            serde_json::to_string(&t).unwrap()
        );
    }
}
