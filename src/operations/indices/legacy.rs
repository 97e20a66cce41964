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

//! Request shapes from an older generation of the Indices API.
//!
//! Each converts into its current counterpart, which does the actual
//! conversion to a request, so both generations always produce the same
//! requests.

use serde_json::Value;

use crate::error::EsError;
use crate::units::Duration;

use super::super::common::{strings, ActiveShardCount, IndicesOptions};
use super::super::Operation;
use super::alias::AliasOptions;
use super::index::{CreateIndexOperation, GetIndexOperation, IndexExistsOperation};
use super::mapping::{GetMappingsOperation, PutMappingOperation};

/// Fields shared by the legacy get-index and index-exists shapes
#[derive(Debug, Clone)]
pub struct LegacyGetIndex {
    pub indices: Vec<String>,
    pub indices_options: Option<IndicesOptions>,
    pub local: bool,
    pub include_defaults: bool,
    pub human_readable: bool,
    pub master_node_timeout: Option<Duration>,
}

impl LegacyGetIndex {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        LegacyGetIndex {
            indices: strings(indices),
            indices_options: Some(IndicesOptions::strict_expand_open()),
            local: false,
            include_defaults: false,
            human_readable: false,
            master_node_timeout: None,
        }
    }
}

impl From<LegacyGetIndex> for GetIndexOperation {
    fn from(legacy: LegacyGetIndex) -> GetIndexOperation {
        let op = GetIndexOperation::new(legacy.indices)
            .with_indices_options(legacy.indices_options)
            .with_local(legacy.local)
            .with_include_defaults(legacy.include_defaults)
            .with_human(legacy.human_readable);
        match legacy.master_node_timeout {
            Some(timeout) => op.with_master_timeout(timeout),
            None => op,
        }
    }
}

/// The legacy index-exists check reused the get-index request
#[derive(Debug, Clone)]
pub struct LegacyIndexExists(pub LegacyGetIndex);

impl From<LegacyIndexExists> for IndexExistsOperation {
    fn from(legacy: LegacyIndexExists) -> IndexExistsOperation {
        let LegacyIndexExists(legacy) = legacy;
        IndexExistsOperation::new(legacy.indices)
            .with_local(legacy.local)
            .with_human(legacy.human_readable)
            .with_indices_options(legacy.indices_options)
            .with_include_defaults(legacy.include_defaults)
    }
}

/// An alias that carries its own name
#[derive(Debug, Clone)]
pub struct LegacyAlias {
    pub name: String,
    pub options: AliasOptions,
}

impl LegacyAlias {
    pub fn new<S: Into<String>>(name: S) -> Self {
        LegacyAlias {
            name: name.into(),
            options: AliasOptions::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LegacyCreateIndex {
    pub index: String,
    pub settings: Option<Value>,
    pub mappings: Option<Value>,
    pub aliases: Vec<LegacyAlias>,
    pub timeout: Option<Duration>,
    pub master_node_timeout: Option<Duration>,
    pub wait_for_active_shards: ActiveShardCount,
}

impl LegacyCreateIndex {
    pub fn new<S: Into<String>>(index: S) -> Self {
        LegacyCreateIndex {
            index: index.into(),
            settings: None,
            mappings: None,
            aliases: Vec::new(),
            timeout: None,
            master_node_timeout: None,
            wait_for_active_shards: ActiveShardCount::Default,
        }
    }
}

/// Settings, mappings and aliases become the three parts of one body
impl From<LegacyCreateIndex> for CreateIndexOperation {
    fn from(legacy: LegacyCreateIndex) -> CreateIndexOperation {
        let mut op = CreateIndexOperation::new(legacy.index)
            .with_aliases(
                legacy
                    .aliases
                    .into_iter()
                    .map(|alias| (alias.name, alias.options))
                    .collect(),
            )
            .with_wait_for_active_shards(legacy.wait_for_active_shards);
        if let Some(settings) = legacy.settings {
            op = op.with_settings(settings);
        }
        if let Some(mappings) = legacy.mappings {
            op = op.with_mappings(mappings);
        }
        if let Some(timeout) = legacy.timeout {
            op = op.with_timeout(timeout);
        }
        if let Some(timeout) = legacy.master_node_timeout {
            op = op.with_master_timeout(timeout);
        }
        op
    }
}

#[derive(Debug, Clone)]
pub struct LegacyPutMapping {
    pub indices: Vec<String>,
    /// Only meaningful inside the cluster, must be left unset
    pub concrete_index: Option<String>,
    pub source: Value,
    pub timeout: Option<Duration>,
    pub master_node_timeout: Option<Duration>,
}

impl LegacyPutMapping {
    pub fn new<S: Into<String>>(indices: Vec<S>, source: Value) -> Self {
        LegacyPutMapping {
            indices: strings(indices),
            concrete_index: None,
            source,
            timeout: None,
            master_node_timeout: None,
        }
    }
}

impl TryFrom<LegacyPutMapping> for PutMappingOperation {
    type Error = EsError;

    fn try_from(legacy: LegacyPutMapping) -> Result<PutMappingOperation, EsError> {
        if legacy.concrete_index.is_some() {
            return Err(EsError::InvalidArgument(
                "concrete index cannot be set on put mapping requests sent over HTTP".to_owned(),
            ));
        }
        let mut op = PutMappingOperation::new(legacy.indices, legacy.source);
        if let Some(timeout) = legacy.timeout {
            op = op.with_timeout(timeout);
        }
        if let Some(timeout) = legacy.master_node_timeout {
            op = op.with_master_timeout(timeout);
        }
        Ok(op)
    }
}

#[derive(Debug, Clone)]
pub struct LegacyGetMappings {
    pub indices: Vec<String>,
    pub indices_options: Option<IndicesOptions>,
    pub local: bool,
    pub master_node_timeout: Option<Duration>,
}

impl LegacyGetMappings {
    pub fn new<S: Into<String>>(indices: Vec<S>) -> Self {
        LegacyGetMappings {
            indices: strings(indices),
            indices_options: Some(IndicesOptions::strict_expand_open()),
            local: false,
            master_node_timeout: None,
        }
    }
}

impl From<LegacyGetMappings> for GetMappingsOperation {
    fn from(legacy: LegacyGetMappings) -> GetMappingsOperation {
        let op = GetMappingsOperation::new(legacy.indices)
            .with_indices_options(legacy.indices_options)
            .with_local(legacy.local);
        match legacy.master_node_timeout {
            Some(timeout) => op.with_master_timeout(timeout),
            None => op,
        }
    }
}

from_exp!(LegacyGetIndex, Operation, legacy, Operation::GetIndex(legacy.into()));
from_exp!(LegacyIndexExists, Operation, legacy, Operation::IndexExists(legacy.into()));
from_exp!(LegacyCreateIndex, Operation, legacy, Operation::CreateIndex(legacy.into()));
from_exp!(LegacyGetMappings, Operation, legacy, Operation::GetMappings(legacy.into()));

impl TryFrom<LegacyPutMapping> for Operation {
    type Error = EsError;

    fn try_from(legacy: LegacyPutMapping) -> Result<Operation, EsError> {
        Ok(Operation::PutMapping(PutMappingOperation::try_from(legacy)?))
    }
}
