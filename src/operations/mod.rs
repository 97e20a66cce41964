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

//! Implementations of specific ElasticSearch operations
//!
//! Each operation is a plain struct, built with `new` and `with_` methods,
//! implementing [`ToHttpRequest`](trait.ToHttpRequest.html).  The
//! [`Operation`](enum.Operation.html) enum wraps all of them for callers
//! that want to handle operations generically.

use crate::config::Config;
use crate::error::EsError;
use crate::request::{Body, HttpRequest, Method};

use self::params::Params;

pub mod common;
pub mod params;

pub mod analyze;
pub mod bulk;
pub mod by_query;
pub mod cluster;
pub mod delete;
pub mod get;
pub mod index;
pub mod indices;
pub mod info;
pub mod reindex;
pub mod script;
pub mod search;
pub mod update;

/// The conversion of one operation into an HTTP request
pub trait ToHttpRequest {
    fn method(&self) -> Method;

    /// The URL path, each user supplied segment encoded
    fn endpoint(&self) -> Result<String, EsError>;

    /// Add this operation's query-string parameters
    fn params(&self, params: Params) -> Params {
        params
    }

    fn body(&self, _config: &Config) -> Result<Option<Body>, EsError> {
        Ok(None)
    }

    fn to_request(&self, config: &Config) -> Result<HttpRequest, EsError> {
        let path = self.endpoint()?;
        let body = self.body(config)?;
        let method = self.method();
        debug!("{} {}", method, path);
        Ok(HttpRequest {
            method,
            path,
            params: self.params(Params::new()).into_map(),
            body,
        })
    }
}

macro_rules! operations {
    ($($v:ident($t:ty)),* $(,)*) => {
        /// Any of the supported operations
        #[derive(Debug, Clone)]
        pub enum Operation {
            $($v($t),)*
        }

        impl Operation {
            pub fn to_request(&self, config: &Config) -> Result<HttpRequest, EsError> {
                match *self {
                    $(Operation::$v(ref op) => op.to_request(config),)*
                }
            }
        }

        $(from!($t, Operation, $v);)*
    };
}

operations! {
    Info(info::InfoOperation),
    Ping(info::PingOperation),

    Get(get::GetOperation),
    Exists(get::ExistsOperation),
    SourceExists(get::SourceExistsOperation),
    MultiGet(get::MultiGetOperation),
    Index(index::IndexOperation),
    Update(update::UpdateOperation),
    Delete(delete::DeleteOperation),
    Bulk(bulk::BulkOperation),

    UpdateByQuery(by_query::UpdateByQueryOperation),
    DeleteByQuery(by_query::DeleteByQueryOperation),
    Rethrottle(by_query::RethrottleOperation),
    Reindex(reindex::ReindexOperation),
    SubmitReindex(reindex::SubmitReindexOperation),

    Search(search::SearchOperation),
    SearchTemplate(search::template::SearchTemplateOperation),
    Scroll(search::scroll::ScrollOperation),
    ClearScroll(search::scroll::ClearScrollOperation),
    MultiSearch(search::multi::MultiSearchOperation),
    Count(search::count::CountOperation),
    Explain(search::explain::ExplainOperation),
    FieldCaps(search::field_caps::FieldCapsOperation),
    RankEval(search::rank_eval::RankEvalOperation),

    PutScript(script::PutScriptOperation),
    GetScript(script::GetScriptOperation),
    DeleteScript(script::DeleteScriptOperation),
    Analyze(analyze::AnalyzeOperation),
    ClusterHealth(cluster::ClusterHealthOperation),

    CreateIndex(indices::index::CreateIndexOperation),
    DeleteIndex(indices::index::DeleteIndexOperation),
    OpenIndex(indices::index::OpenIndexOperation),
    CloseIndex(indices::index::CloseIndexOperation),
    GetIndex(indices::index::GetIndexOperation),
    IndexExists(indices::index::IndexExistsOperation),
    Refresh(indices::refresh::RefreshOperation),
    Flush(indices::refresh::FlushOperation),
    PutMapping(indices::mapping::PutMappingOperation),
    GetMappings(indices::mapping::GetMappingsOperation),
    GetFieldMapping(indices::mapping::GetFieldMappingOperation),
    GetSettings(indices::settings::GetSettingsOperation),
    UpdateAliases(indices::alias::UpdateAliasesOperation),
    GetAlias(indices::alias::GetAliasOperation),
    PutTemplate(indices::template::PutTemplateOperation),
    GetTemplates(indices::template::GetTemplatesOperation),
    TemplatesExist(indices::template::TemplatesExistOperation),
    DeleteTemplate(indices::template::DeleteTemplateOperation),
}

/// Convert an operation using the default `Config`
pub fn convert(op: &Operation) -> Result<HttpRequest, EsError> {
    op.to_request(&Config::default())
}

#[cfg(test)]
pub mod tests {
    use serde_json::json;

    use crate::config::Config;
    use crate::content::{ContentEncoding, Source};
    use crate::request::Method;

    use super::bulk::BulkOperation;
    use super::delete::DeleteOperation;
    use super::index::IndexOperation;
    use super::{convert, Operation, ToHttpRequest};

    #[test]
    fn test_operation_matches_direct_conversion() {
        let _ = env_logger::builder().is_test(true).try_init();
        let index = IndexOperation::new("logs", Source::json(&json!({"a": 1})).unwrap())
            .with_id("1");
        let direct = index.to_request(&Config::default()).unwrap();
        let op = Operation::from(index);
        assert_eq!(direct, convert(&op).unwrap());
        assert_eq!(convert(&op).unwrap(), convert(&op).unwrap());
    }

    #[test]
    fn test_config_reaches_the_operation() {
        let op: Operation = BulkOperation::default()
            .add(DeleteOperation::new("logs", "1"))
            .into();
        let config = Config::default().with_body_encoding(ContentEncoding::Yaml);
        let request = op.to_request(&config).unwrap();
        assert_eq!(Method::Post, request.method);
        // bulk bodies follow their documents, not the configured encoding
        assert_eq!(ContentEncoding::Json, request.body.unwrap().encoding);
    }
}
