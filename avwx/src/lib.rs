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

//! Decoders for aviation weather reports from the Aviation Weather Center.
//!
//! This crate turns the raw report documents served by
//! `aviationweather.gov` into typed records: METAR surface observations
//! and TAF forecasts from the data server's XML, SIGMET hazard advisories
//! from the JSON services. Decoding is synchronous and allocation-local;
//! a call either returns the full record sequence or one [`Error`], never
//! a partial result.
//!
//! Fetching is left to the caller. The [`request`] module describes the
//! service endpoints and query parameters so any HTTP client can be used:
//!
//! ```
//! use avwx::request::{AwcRequest, MetarRequest};
//!
//! let request = MetarRequest::new("KFME").most_recent();
//! assert_eq!(request.service_path(), "/adds/dataserver_current/httpparam");
//!
//! // fetch the body with the client of your choice, then:
//! let body = br#"<response>
//!   <data num_results="1">
//!     <METAR>
//!       <station_id>KFME</station_id>
//!       <wind_speed_kt>6</wind_speed_kt>
//!       <flight_category>VFR</flight_category>
//!     </METAR>
//!   </data>
//! </response>"#;
//!
//! let metars = request.decode(body).unwrap();
//! assert_eq!(metars[0].station_id, "KFME");
//! ```

mod convert;
mod error;
mod xml;

pub mod metar;
pub mod request;
pub mod sigmet;
pub mod taf;

pub use error::Error;
pub use metar::Metar;
pub use sigmet::Sigmet;
pub use taf::Taf;
