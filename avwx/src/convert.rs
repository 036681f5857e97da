// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Value conversion helpers shared by all decoders.
//!
//! Parsing is strict: no locale-sensitive formats, no silent truncation, and
//! an enumerated value outside the known set is a conversion failure rather
//! than a default. Every failure reports the wire field name and the raw
//! text that could not be converted.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::debug;
use serde_json::{Map, Value};

use crate::error::Error;

fn failed(field: &'static str, raw: &str) -> Error {
    Error::FieldConversionFailed {
        field,
        raw: raw.to_string(),
    }
}

pub(crate) fn integer(field: &'static str, raw: &str) -> Result<i32, Error> {
    raw.trim().parse().map_err(|_| failed(field, raw))
}

pub(crate) fn real(field: &'static str, raw: &str) -> Result<f64, Error> {
    raw.trim().parse().map_err(|_| failed(field, raw))
}

/// Parses an ISO-8601 timestamp as reported by the service
/// (e.g. `2020-02-20T13:48:00Z`).
pub(crate) fn datetime(field: &'static str, raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| failed(field, raw))
}

pub(crate) fn enumeration<T: FromStr>(field: &'static str, raw: &str) -> Result<T, Error> {
    raw.trim().parse().map_err(|_| failed(field, raw))
}

/// Lenient integer conversion for the METAR decoder: an unconvertible value
/// keeps the field absent instead of failing the decode.
pub(crate) fn lenient_integer(field: &'static str, raw: &str) -> Option<i32> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("keeping {field} absent, cannot convert {raw:?}");
            None
        }
    }
}

/// Lenient real conversion, see [`lenient_integer`].
pub(crate) fn lenient_real(field: &'static str, raw: &str) -> Option<f64> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("keeping {field} absent, cannot convert {raw:?}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// JSON scalar conversions
//
// Absent keys and JSON null are absent optional fields; a present value of
// the wrong type is a conversion failure.
// ---------------------------------------------------------------------------

pub(crate) fn json_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, Error> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(failed(field, &other.to_string())),
    }
}

pub(crate) fn json_integer(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<i32>, Error> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| failed(field, &value.to_string())),
    }
}

pub(crate) fn json_datetime(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, Error> {
    match json_string(object, field)? {
        Some(s) => datetime(field, &s).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn json_enumeration<T: FromStr>(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<T>, Error> {
    match json_string(object, field)? {
        Some(s) => enumeration(field, &s).map(Some),
        None => Ok(None),
    }
}
