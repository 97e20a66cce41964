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

//! Option types shared by several operations

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::json::ShouldSkip;

/// Index names, field names and the like, as owned strings
pub(crate) fn strings<S: Into<String>>(values: Vec<S>) -> Vec<String> {
    values.into_iter().map(Into::into).collect()
}

/// Values for `version_type`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VersionType {
    #[default]
    Internal,
    External,
    ExternalGte,
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            VersionType::Internal => "internal",
            VersionType::External => "external",
            VersionType::ExternalGte => "external_gte",
        })
    }
}

impl Serialize for VersionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Internal versioning is what the cluster assumes, so is never sent
impl ShouldSkip for VersionType {
    fn should_skip(&self) -> bool {
        *self == VersionType::Internal
    }
}

/// Optimistic concurrency control: the write only succeeds if the document's
/// last change has this sequence number and primary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqNoPrimaryTerm {
    pub seq_no: i64,
    pub primary_term: u64,
}

impl SeqNoPrimaryTerm {
    pub fn new(seq_no: i64, primary_term: u64) -> Self {
        SeqNoPrimaryTerm {
            seq_no,
            primary_term,
        }
    }
}

from_exp!(
    (i64, u64),
    SeqNoPrimaryTerm,
    from,
    SeqNoPrimaryTerm::new(from.0, from.1)
);

/// When changes made by a write become visible to search
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    #[default]
    None,
    Immediate,
    WaitUntil,
}

impl RefreshPolicy {
    /// The `refresh` parameter value, `None` for the default policy
    pub fn value(self) -> Option<&'static str> {
        match self {
            RefreshPolicy::None => None,
            RefreshPolicy::Immediate => Some("true"),
            RefreshPolicy::WaitUntil => Some("wait_for"),
        }
    }
}

/// A boolean `refresh` means refresh immediately
impl From<bool> for RefreshPolicy {
    fn from(from: bool) -> RefreshPolicy {
        if from {
            RefreshPolicy::Immediate
        } else {
            RefreshPolicy::None
        }
    }
}

/// How many shard copies must be active before an operation proceeds
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ActiveShardCount {
    /// Whatever the index is configured with
    #[default]
    Default,
    All,
    None,
    Count(u32),
}

impl ActiveShardCount {
    /// The wire value.  `Default` can't be sent as such, one active shard is
    /// what it means.
    pub fn value(self) -> String {
        match self {
            ActiveShardCount::Default => "1".to_owned(),
            ActiveShardCount::All => "all".to_owned(),
            ActiveShardCount::None => "0".to_owned(),
            ActiveShardCount::Count(n) => n.to_string(),
        }
    }
}

from!(u32, ActiveShardCount, Count);

/// How index names, wildcards and aliases are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicesOptions {
    pub ignore_unavailable: bool,
    pub allow_no_indices: bool,
    pub expand_wildcards_open: bool,
    pub expand_wildcards_closed: bool,
}

impl IndicesOptions {
    pub fn new(
        ignore_unavailable: bool,
        allow_no_indices: bool,
        expand_wildcards_open: bool,
        expand_wildcards_closed: bool,
    ) -> Self {
        IndicesOptions {
            ignore_unavailable,
            allow_no_indices,
            expand_wildcards_open,
            expand_wildcards_closed,
        }
    }

    /// Missing indices are an error, wildcards expand to open indices
    pub fn strict_expand_open() -> Self {
        IndicesOptions::new(false, true, true, false)
    }

    pub fn strict_expand_open_closed() -> Self {
        IndicesOptions::new(false, true, true, true)
    }

    /// No wildcard expansion and no empty matches
    pub fn strict_single_index_no_expand() -> Self {
        IndicesOptions::new(false, false, false, false)
    }

    pub fn lenient_expand_open() -> Self {
        IndicesOptions::new(true, true, true, false)
    }

    pub fn lenient_expand_open_closed() -> Self {
        IndicesOptions::new(true, true, true, true)
    }

    /// `none`, `open`, `closed` or `open,closed`
    pub fn expand_wildcards(&self) -> &'static str {
        match (self.expand_wildcards_open, self.expand_wildcards_closed) {
            (false, false) => "none",
            (true, false) => "open",
            (false, true) => "closed",
            (true, true) => "open,closed",
        }
    }
}

/// Which parts of `_source` are returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchSource {
    /// Don't return the source at all
    Off,
    /// Return the source, optionally filtered
    Filter {
        includes: Vec<String>,
        excludes: Vec<String>,
    },
}

impl FetchSource {
    pub fn includes<S: Into<String>>(includes: Vec<S>) -> Self {
        FetchSource::Filter {
            includes: strings(includes),
            excludes: Vec::new(),
        }
    }

    pub fn excludes<S: Into<String>>(excludes: Vec<S>) -> Self {
        FetchSource::Filter {
            includes: Vec::new(),
            excludes: strings(excludes),
        }
    }

    pub fn filter<S: Into<String>, T: Into<String>>(includes: Vec<S>, excludes: Vec<T>) -> Self {
        FetchSource::Filter {
            includes: strings(includes),
            excludes: strings(excludes),
        }
    }
}

/// Inside bodies, `false` or `{"includes": [...], "excludes": [...]}`
impl Serialize for FetchSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FetchSource::Off => serializer.serialize_bool(false),
            FetchSource::Filter { includes, excludes } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("includes", includes)?;
                map.serialize_entry("excludes", excludes)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::{ActiveShardCount, FetchSource, IndicesOptions, RefreshPolicy, VersionType};

    #[test]
    fn test_wire_values() {
        assert_eq!("external_gte", VersionType::ExternalGte.to_string());
        assert_eq!(Some("wait_for"), RefreshPolicy::WaitUntil.value());
        assert_eq!(RefreshPolicy::Immediate, true.into());
        assert_eq!("1", ActiveShardCount::Default.value());
        assert_eq!("0", ActiveShardCount::None.value());
        assert_eq!("3", ActiveShardCount::from(3u32).value());
    }

    #[test]
    fn test_expand_wildcards() {
        assert_eq!("open", IndicesOptions::strict_expand_open().expand_wildcards());
        assert_eq!(
            "open,closed",
            IndicesOptions::strict_expand_open_closed().expand_wildcards()
        );
        assert_eq!(
            "none",
            IndicesOptions::strict_single_index_no_expand().expand_wildcards()
        );
    }

    #[test]
    fn test_fetch_source_body_form() {
        assert_eq!("false", serde_json::to_string(&FetchSource::Off).unwrap());
        assert_eq!(
            "{\"includes\":[\"title\"],\"excludes\":[]}",
            serde_json::to_string(&FetchSource::includes(vec!["title"])).unwrap()
        );
    }
}
