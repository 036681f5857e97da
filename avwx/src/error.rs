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

use std::fmt;

use crate::request::ContentType;

/// Errors produced by the report decoders.
///
/// A decode call either returns a fully typed record sequence or exactly one
/// of these; no partial results are ever handed back.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The service reported zero results for the query, its documented signal
    /// for an unrecognized station identifier.
    InvalidStationQuery,
    /// The input is not well-formed XML/JSON or not the expected top-level
    /// document shape.
    MalformedDocument(String),
    /// A value present in the wire format could not be converted to its typed
    /// field.
    FieldConversionFailed {
        /// Wire name of the field that failed to convert.
        field: &'static str,
        /// The raw text as it appeared on the wire.
        raw: String,
    },
    /// The payload's content type does not match the decoder for this
    /// request. Detected by the transport before decoding starts.
    UnsupportedContentType {
        /// The content type the selected decoder expects.
        expected: ContentType,
    },
    /// The service embedded an explicit error report in its response.
    Service(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStationQuery => {
                write!(f, "the service returned no results for this station query")
            }
            Self::MalformedDocument(reason) => write!(f, "malformed document: {reason}"),
            Self::FieldConversionFailed { field, raw } => {
                write!(f, "failed to convert field {field} from {raw:?}")
            }
            Self::UnsupportedContentType { expected } => {
                write!(f, "unsupported content type, expected {}", expected.as_str())
            }
            Self::Service(message) => write!(f, "service error: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}
