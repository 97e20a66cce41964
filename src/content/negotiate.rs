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

//! Agreeing on a single encoding for a body assembled from several documents

use super::ContentEncoding;
use crate::error::EsError;

/// Check `found` against the bulk-compatible encodings and against the
/// encoding already chosen, if any.  Returns the encoding to carry forward.
pub fn enforce_same_encoding(
    found: ContentEncoding,
    current: Option<ContentEncoding>,
) -> Result<ContentEncoding, EsError> {
    if !found.is_bulk_compatible() {
        return Err(EsError::UnsupportedEncoding(found));
    }
    match current {
        Some(previous) if previous != found => {
            Err(EsError::ConflictingEncoding { previous, found })
        }
        _ => Ok(found),
    }
}

/// The one encoding shared by every document in a bulk body.  With no
/// documents at all (only deletes) this is JSON.
pub fn negotiate_bulk<I>(encodings: I) -> Result<ContentEncoding, EsError>
where
    I: IntoIterator<Item = ContentEncoding>,
{
    let mut current = None;
    for found in encodings {
        current = Some(enforce_same_encoding(found, current)?);
    }
    Ok(current.unwrap_or(ContentEncoding::Json))
}

/// A partial document and an upsert document must agree, whichever is present
/// decides, and `fallback` applies when neither is.
pub fn negotiate_update(
    doc: Option<ContentEncoding>,
    upsert: Option<ContentEncoding>,
    fallback: ContentEncoding,
) -> Result<ContentEncoding, EsError> {
    match (doc, upsert) {
        (Some(previous), Some(found)) if previous != found => {
            Err(EsError::ConflictingEncoding { previous, found })
        }
        (Some(encoding), _) | (None, Some(encoding)) => Ok(encoding),
        (None, None) => Ok(fallback),
    }
}
