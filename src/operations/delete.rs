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

//! Implementation of delete-by-id.  Delete-by-query lives in `by_query`.

use crate::endpoint::doc_endpoint;
use crate::error::EsError;
use crate::request::Method;
use crate::units::Duration;

use super::common::{ActiveShardCount, RefreshPolicy, SeqNoPrimaryTerm, VersionType};
use super::params::Params;
use super::ToHttpRequest;

#[derive(Debug, Clone)]
pub struct DeleteOperation {
    /// The index
    pub(crate) index: String,

    /// The ID
    pub(crate) id: String,

    pub(crate) routing: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) version: Option<i64>,
    pub(crate) version_type: VersionType,
    pub(crate) seq_no_primary_term: Option<SeqNoPrimaryTerm>,
    pub(crate) refresh: RefreshPolicy,
    pub(crate) wait_for_active_shards: ActiveShardCount,
}

impl DeleteOperation {
    pub fn new<I, D>(index: I, id: D) -> Self
    where
        I: Into<String>,
        D: Into<String>,
    {
        DeleteOperation {
            index: index.into(),
            id: id.into(),
            routing: None,
            timeout: None,
            version: None,
            version_type: VersionType::Internal,
            seq_no_primary_term: None,
            refresh: RefreshPolicy::None,
            wait_for_active_shards: ActiveShardCount::Default,
        }
    }

    add_field!(with_routing, routing, String);
    add_field!(with_timeout, timeout, Duration);
    add_field!(with_version, version, i64);
    add_value!(with_version_type, version_type, VersionType);
    add_field!(with_seq_no_primary_term, seq_no_primary_term, SeqNoPrimaryTerm);
    add_value!(with_refresh, refresh, RefreshPolicy);
    add_value!(with_wait_for_active_shards, wait_for_active_shards, ActiveShardCount);
}

impl ToHttpRequest for DeleteOperation {
    fn method(&self) -> Method {
        Method::Delete
    }

    fn endpoint(&self) -> Result<String, EsError> {
        doc_endpoint(&self.index, &self.id)
    }

    fn params(&self, params: Params) -> Params {
        params
            .with_routing(self.routing.as_deref())
            .with_timeout(self.timeout)
            .with_version(self.version)
            .with_version_type(self.version_type)
            .with_seq_no_primary_term(self.seq_no_primary_term)
            .with_refresh_policy(self.refresh)
            .with_wait_for_active_shards(self.wait_for_active_shards, ActiveShardCount::Default)
    }
}

#[cfg(test)]
pub mod tests {
    use maplit::btreemap;

    use crate::config::Config;
    use crate::operations::common::{RefreshPolicy, SeqNoPrimaryTerm, VersionType};
    use crate::operations::ToHttpRequest;
    use crate::request::Method;

    use super::DeleteOperation;

    #[test]
    fn test_delete() {
        let request = DeleteOperation::new("logs", "1")
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(Method::Delete, request.method);
        assert_eq!("/logs/1", request.path);
        assert!(request.params.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_delete_with_seq_no() {
        let request = DeleteOperation::new("logs", "1")
            .with_seq_no_primary_term(SeqNoPrimaryTerm::new(5, 2))
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(
            btreemap! {
                "if_seq_no".to_owned() => "5".to_owned(),
                "if_primary_term".to_owned() => "2".to_owned(),
            },
            request.params
        );
    }

    #[test]
    fn test_delete_with_external_version() {
        let request = DeleteOperation::new("logs", "1")
            .with_version(10)
            .with_version_type(VersionType::ExternalGte)
            .with_routing("user1")
            .with_refresh(RefreshPolicy::WaitUntil)
            .to_request(&Config::default())
            .unwrap();
        assert_eq!(
            btreemap! {
                "version".to_owned() => "10".to_owned(),
                "version_type".to_owned() => "external_gte".to_owned(),
                "routing".to_owned() => "user1".to_owned(),
                "refresh".to_owned() => "wait_for".to_owned(),
            },
            request.params
        );
    }
}
