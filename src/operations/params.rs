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

//! Query-string parameters, and the rules for leaving defaults out

use std::collections::BTreeMap;

use crate::units::Duration;

use super::common::{
    ActiveShardCount, FetchSource, IndicesOptions, RefreshPolicy, SeqNoPrimaryTerm, VersionType,
};

/// Every ES operation has a set of options.  Each `with_` method consumes the
/// set and returns it, adding a parameter only when its value differs from
/// what the cluster would assume anyway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    params: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a parameter.  Blank values are dropped; a name set twice keeps the
    /// last value.
    pub fn put<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.params.insert(name.into(), value);
        }
        self
    }

    pub fn put_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.put(name, value.to_string()),
            None => self,
        }
    }

    /// `name=true` when set, nothing otherwise
    pub fn put_flag(self, name: &str, flag: bool) -> Self {
        if flag {
            self.put(name, "true")
        } else {
            self
        }
    }

    /// Always present, `true` or `false`
    pub fn put_bool(self, name: &str, value: bool) -> Self {
        self.put(name, value.to_string())
    }

    /// Comma joined, nothing when empty
    pub fn put_list<S: AsRef<str>>(self, name: &str, values: &[S]) -> Self {
        let joined = values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.put(name, joined)
    }

    pub fn with_routing(self, routing: Option<&str>) -> Self {
        self.put_opt("routing", routing)
    }

    pub fn with_preference(self, preference: Option<&str>) -> Self {
        self.put_opt("preference", preference)
    }

    pub fn with_pipeline(self, pipeline: Option<&str>) -> Self {
        self.put_opt("pipeline", pipeline)
    }

    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        self.put_opt("timeout", timeout)
    }

    pub fn with_master_timeout(self, master_timeout: Option<Duration>) -> Self {
        self.put_opt("master_timeout", master_timeout)
    }

    pub fn with_scroll(self, scroll: Option<Duration>) -> Self {
        self.put_opt("scroll", scroll)
    }

    /// `None` means "match any version"
    pub fn with_version(self, version: Option<i64>) -> Self {
        self.put_opt("version", version)
    }

    pub fn with_version_type(self, version_type: VersionType) -> Self {
        if version_type == VersionType::Internal {
            self
        } else {
            self.put("version_type", version_type.to_string())
        }
    }

    pub fn with_seq_no_primary_term(self, seq_no: Option<SeqNoPrimaryTerm>) -> Self {
        match seq_no {
            Some(s) => self
                .put("if_seq_no", s.seq_no.to_string())
                .put("if_primary_term", s.primary_term.to_string()),
            None => self,
        }
    }

    pub fn with_refresh_policy(self, policy: RefreshPolicy) -> Self {
        self.put_opt("refresh", policy.value())
    }

    /// The boolean form goes through the same policy encoding
    pub fn with_refresh(self, refresh: bool) -> Self {
        self.with_refresh_policy(refresh.into())
    }

    pub fn with_realtime(self, realtime: bool) -> Self {
        if realtime {
            self
        } else {
            self.put("realtime", "false")
        }
    }

    /// Omitted when equal to the operation's own default
    pub fn with_wait_for_active_shards(
        self,
        count: ActiveShardCount,
        default: ActiveShardCount,
    ) -> Self {
        if count == default {
            self
        } else {
            self.put("wait_for_active_shards", count.value())
        }
    }

    pub fn with_indices_options(self, options: Option<IndicesOptions>) -> Self {
        match options {
            Some(options) => self
                .put_bool("ignore_unavailable", options.ignore_unavailable)
                .put_bool("allow_no_indices", options.allow_no_indices)
                .put("expand_wildcards", options.expand_wildcards()),
            None => self,
        }
    }

    pub fn with_stored_fields<S: AsRef<str>>(self, stored_fields: &[S]) -> Self {
        self.put_list("stored_fields", stored_fields)
    }

    pub fn with_fields<S: AsRef<str>>(self, fields: &[S]) -> Self {
        self.put_list("fields", fields)
    }

    pub fn with_fetch_source(self, fetch_source: Option<&FetchSource>) -> Self {
        match fetch_source {
            Some(FetchSource::Off) => self.put("_source", "false"),
            Some(FetchSource::Filter { includes, excludes }) => self
                .put_list("_source_includes", includes)
                .put_list("_source_excludes", excludes),
            None => self,
        }
    }

    pub fn with_retry_on_conflict(self, retry_on_conflict: u32) -> Self {
        if retry_on_conflict > 0 {
            self.put("retry_on_conflict", retry_on_conflict.to_string())
        } else {
            self
        }
    }

    pub fn with_doc_as_upsert(self, doc_as_upsert: bool) -> Self {
        self.put_flag("doc_as_upsert", doc_as_upsert)
    }

    pub fn with_local(self, local: bool) -> Self {
        self.put_flag("local", local)
    }

    pub fn with_human(self, human: bool) -> Self {
        self.put_flag("human", human)
    }

    pub fn with_include_defaults(self, include_defaults: bool) -> Self {
        self.put_flag("include_defaults", include_defaults)
    }

    /// Always sent, `-1` for no limit
    pub fn with_requests_per_second(self, requests_per_second: f32) -> Self {
        if requests_per_second.is_finite() {
            self.put("requests_per_second", format!("{:?}", requests_per_second))
        } else {
            self.put("requests_per_second", "-1")
        }
    }

    pub fn with_wait_for_completion(self, wait_for_completion: bool) -> Self {
        self.put_bool("wait_for_completion", wait_for_completion)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;

    use crate::operations::common::{
        ActiveShardCount, FetchSource, IndicesOptions, RefreshPolicy, SeqNoPrimaryTerm, VersionType,
    };
    use crate::units::Duration;

    use super::Params;

    #[test]
    fn test_defaults_are_omitted() {
        let params = Params::new()
            .with_routing(None)
            .with_version(None)
            .with_version_type(VersionType::Internal)
            .with_seq_no_primary_term(None)
            .with_refresh_policy(RefreshPolicy::None)
            .with_refresh(false)
            .with_realtime(true)
            .with_wait_for_active_shards(ActiveShardCount::Default, ActiveShardCount::Default)
            .with_indices_options(None)
            .with_stored_fields::<String>(&[])
            .with_fetch_source(None)
            .with_retry_on_conflict(0)
            .with_doc_as_upsert(false)
            .with_timeout(None);
        assert!(params.into_map().is_empty());
    }

    #[test]
    fn test_non_defaults_are_present() {
        let source = FetchSource::filter(vec!["a", "b"], Vec::<String>::new());
        let params = Params::new()
            .with_routing(Some("user1"))
            .with_version(Some(7))
            .with_version_type(VersionType::External)
            .with_seq_no_primary_term(Some(SeqNoPrimaryTerm::new(5, 2)))
            .with_refresh_policy(RefreshPolicy::WaitUntil)
            .with_realtime(false)
            .with_wait_for_active_shards(ActiveShardCount::All, ActiveShardCount::Default)
            .with_indices_options(Some(IndicesOptions::lenient_expand_open()))
            .with_stored_fields(&["f1", "f2"])
            .with_fetch_source(Some(&source))
            .with_retry_on_conflict(3)
            .with_timeout(Some(Duration::seconds(30)));
        assert_eq!(
            btreemap! {
                "routing".to_owned() => "user1".to_owned(),
                "version".to_owned() => "7".to_owned(),
                "version_type".to_owned() => "external".to_owned(),
                "if_seq_no".to_owned() => "5".to_owned(),
                "if_primary_term".to_owned() => "2".to_owned(),
                "refresh".to_owned() => "wait_for".to_owned(),
                "realtime".to_owned() => "false".to_owned(),
                "wait_for_active_shards".to_owned() => "all".to_owned(),
                "ignore_unavailable".to_owned() => "true".to_owned(),
                "allow_no_indices".to_owned() => "true".to_owned(),
                "expand_wildcards".to_owned() => "open".to_owned(),
                "stored_fields".to_owned() => "f1,f2".to_owned(),
                "_source_includes".to_owned() => "a,b".to_owned(),
                "retry_on_conflict".to_owned() => "3".to_owned(),
                "timeout".to_owned() => "30s".to_owned(),
            },
            params.into_map()
        );
    }

    #[test]
    fn test_default_shard_count_sent_as_one() {
        let params = Params::new()
            .with_wait_for_active_shards(ActiveShardCount::Default, ActiveShardCount::None);
        assert_eq!(Some("1"), params.get("wait_for_active_shards"));
    }

    #[test]
    fn test_boolean_refresh_uses_policy() {
        assert_eq!(Some("true"), Params::new().with_refresh(true).get("refresh"));
    }

    #[test]
    fn test_source_off() {
        let params = Params::new().with_fetch_source(Some(&FetchSource::Off));
        assert_eq!(
            btreemap! { "_source".to_owned() => "false".to_owned() },
            params.into_map()
        );
    }

    #[test]
    fn test_requests_per_second() {
        assert_eq!(
            Some("-1"),
            Params::new()
                .with_requests_per_second(f32::INFINITY)
                .get("requests_per_second")
        );
        assert_eq!(
            Some("100.0"),
            Params::new()
                .with_requests_per_second(100.0)
                .get("requests_per_second")
        );
    }

    #[test]
    fn test_blank_values_and_overwrites() {
        let params = Params::new()
            .put("routing", "  ")
            .put("preference", "a")
            .put("preference", "b");
        assert_eq!(
            btreemap! { "preference".to_owned() => "b".to_owned() },
            params.into_map()
        );
    }
}
