/*
 * Copyright 2015-2016 Ben Ashford
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

//! Various re-occuring types that are used by the ElasticSearch API.
//!
//! E.g. `Duration`
//!
//! This isn't all types. Types that are specific to one API are defined in the
//! appropriate place, e.g. types only used by cluster health are in
//! `operations/cluster.rs`

use std::fmt;

use serde::ser::{Serialize, Serializer};

/// The units by which duration is measured.
///
/// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/api-conventions.html#time-units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl DurationUnit {
    fn nanos(self) -> u128 {
        match self {
            DurationUnit::Day => 86_400_000_000_000,
            DurationUnit::Hour => 3_600_000_000_000,
            DurationUnit::Minute => 60_000_000_000,
            DurationUnit::Second => 1_000_000_000,
            DurationUnit::Millisecond => 1_000_000,
            DurationUnit::Microsecond => 1_000,
            DurationUnit::Nanosecond => 1,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            DurationUnit::Day => "d",
            DurationUnit::Hour => "h",
            DurationUnit::Minute => "m",
            DurationUnit::Second => "s",
            DurationUnit::Millisecond => "ms",
            DurationUnit::Microsecond => "micros",
            DurationUnit::Nanosecond => "nanos",
        })
    }
}

/// A time-period unit, will be formatted into the ElasticSearch standard format
///
/// # Examples
///
/// ```
/// use rs_es_requests::units::{Duration, DurationUnit};
///
/// assert_eq!("100d", Duration::new(100, DurationUnit::Day).to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    amt: i64,
    unit: DurationUnit,
}

impl Duration {
    pub fn new(amt: i64, unit: DurationUnit) -> Duration {
        Duration { amt, unit }
    }

    pub fn days(amt: i64) -> Duration {
        Duration::new(amt, DurationUnit::Day)
    }

    pub fn hours(amt: i64) -> Duration {
        Duration::new(amt, DurationUnit::Hour)
    }

    pub fn minutes(amt: i64) -> Duration {
        Duration::new(amt, DurationUnit::Minute)
    }

    pub fn seconds(amt: i64) -> Duration {
        Duration::new(amt, DurationUnit::Second)
    }

    pub fn milliseconds(amt: i64) -> Duration {
        Duration::new(amt, DurationUnit::Millisecond)
    }

    pub fn microseconds(amt: i64) -> Duration {
        Duration::new(amt, DurationUnit::Microsecond)
    }

    pub fn nanoseconds(amt: i64) -> Duration {
        Duration::new(amt, DurationUnit::Nanosecond)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.amt, self.unit)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Uses the coarsest unit that represents the value exactly
impl From<std::time::Duration> for Duration {
    fn from(from: std::time::Duration) -> Duration {
        let nanos = from.as_nanos();
        if nanos == 0 {
            return Duration::milliseconds(0);
        }
        let unit = [
            DurationUnit::Day,
            DurationUnit::Hour,
            DurationUnit::Minute,
            DurationUnit::Second,
            DurationUnit::Millisecond,
            DurationUnit::Microsecond,
        ]
        .into_iter()
        .find(|unit| nanos % unit.nanos() == 0)
        .unwrap_or(DurationUnit::Nanosecond);
        let amt = i64::try_from(nanos / unit.nanos()).unwrap_or(i64::MAX);
        Duration::new(amt, unit)
    }
}
