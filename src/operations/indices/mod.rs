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

//! Implementations of the Indices API: creating, deleting, opening and
//! closing indices, mappings, settings, aliases and index templates.
//!
//! Older request shapes are kept in [`legacy`](legacy/index.html), each
//! converting into the current operation.

pub mod alias;
pub mod index;
pub mod legacy;
pub mod mapping;
pub mod refresh;
pub mod settings;
pub mod template;
