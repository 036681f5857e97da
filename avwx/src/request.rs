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

//! Request descriptors for the Aviation Weather Center services.
//!
//! Transport is the caller's concern. A descriptor carries everything a
//! HTTP client needs to fetch a report set from `aviationweather.gov`
//! (service path, query parameters, the content type to expect) and the
//! [`decode`](AwcRequest::decode) entry point for the fetched bytes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::metar::{self, Metar};
use crate::sigmet::{self, ReportFamily, Sigmet};
use crate::taf::{self, Taf};

/// Content type of a service response body.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContentType {
    /// `text/xml`, used by the METAR and TAF data server.
    Xml,
    /// `application/json`, used by the SIGMET services.
    Json,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "text/xml",
            Self::Json => "application/json",
        }
    }
}

/// One fetchable report query against the AWC services.
pub trait AwcRequest {
    type Response;

    /// Path of the service endpoint, relative to `aviationweather.gov`.
    fn service_path(&self) -> &'static str;

    /// Query parameters in the order the service documents them.
    fn query_params(&self) -> Vec<(&'static str, String)>;

    /// The content type the decoder expects.
    fn content_type(&self) -> ContentType;

    /// Decodes a fetched response body.
    fn decode(&self, data: &[u8]) -> Result<Self::Response, Error>;

    /// Rejects a response whose MIME type does not match the decoder.
    /// Callers check this before handing the body to [`decode`](Self::decode).
    fn check_content_type(&self, mime: &str) -> Result<(), Error> {
        if mime == self.content_type().as_str() {
            Ok(())
        } else {
            Err(Error::UnsupportedContentType {
                expected: self.content_type(),
            })
        }
    }
}

const DATASERVER_PATH: &str = "/adds/dataserver_current/httpparam";

fn dataserver_params(data_source: &'static str, hours_before_now: u32, stations: &str) -> Vec<(&'static str, String)> {
    vec![
        ("requestType", "retrieve".to_string()),
        ("format", "xml".to_string()),
        ("dataSource", data_source.to_string()),
        ("hoursBeforeNow", hours_before_now.to_string()),
        ("stationString", stations.to_string()),
    ]
}

/// Query for the METAR observation history of one station.
#[derive(Clone, Debug)]
pub struct MetarRequest {
    station: String,
    hours_before_now: u32,
    most_recent: bool,
}

impl MetarRequest {
    /// A query for the past two hours of observations at `station`.
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            hours_before_now: 2,
            most_recent: false,
        }
    }

    pub fn hours_before_now(mut self, hours: u32) -> Self {
        self.hours_before_now = hours;
        self
    }

    /// Only the most recent observation of the whole result set.
    pub fn most_recent(mut self) -> Self {
        self.most_recent = true;
        self
    }
}

impl AwcRequest for MetarRequest {
    type Response = Vec<Metar>;

    fn service_path(&self) -> &'static str {
        DATASERVER_PATH
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = dataserver_params("metars", self.hours_before_now, &self.station);
        if self.most_recent {
            params.push(("mostRecent", "true".to_string()));
        }
        params
    }

    fn content_type(&self) -> ContentType {
        ContentType::Xml
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<Metar>, Error> {
        metar::decode(data)
    }
}

/// Query for the TAFs of one or more stations.
#[derive(Clone, Debug)]
pub struct TafRequest {
    stations: Vec<String>,
    hours_before_now: u32,
    most_recent: bool,
}

impl TafRequest {
    /// A query for the past twelve hours of forecasts at `stations`.
    pub fn new<I, S>(stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stations: stations.into_iter().map(Into::into).collect(),
            hours_before_now: 12,
            most_recent: false,
        }
    }

    pub fn hours_before_now(mut self, hours: u32) -> Self {
        self.hours_before_now = hours;
        self
    }

    /// Only the most recent forecast for each station.
    pub fn most_recent(mut self) -> Self {
        self.most_recent = true;
        self
    }
}

impl AwcRequest for TafRequest {
    type Response = Vec<Taf>;

    fn service_path(&self) -> &'static str {
        DATASERVER_PATH
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = dataserver_params("tafs", self.hours_before_now, &self.stations.join(","));
        if self.most_recent {
            params.push(("mostRecentForEachStation", "constraint".to_string()));
        }
        params
    }

    fn content_type(&self) -> ContentType {
        ContentType::Xml
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<Taf>, Error> {
        taf::decode(data)
    }
}

/// Query for all current SIGMETs of one report family.
#[derive(Clone, Debug)]
pub struct SigmetRequest {
    family: ReportFamily,
}

impl SigmetRequest {
    pub fn new(family: ReportFamily) -> Self {
        Self { family }
    }
}

impl AwcRequest for SigmetRequest {
    type Response = Vec<Sigmet>;

    fn service_path(&self) -> &'static str {
        match self.family {
            ReportFamily::International => "/cgi-bin/json/IsigmetJSON.php",
            ReportFamily::Us => "/cgi-bin/json/SigmetJSON.php",
        }
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn content_type(&self) -> ContentType {
        ContentType::Json
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<Sigmet>, Error> {
        sigmet::decode(data)
    }
}
