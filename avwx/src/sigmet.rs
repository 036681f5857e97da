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

//! SIGMET hazard advisories.
//!
//! The wire format is a GeoJSON-like feature collection. Two incompatible
//! property schemas share it: international SIGMETs carry FIR and movement
//! data, US SIGMETs carry severity and layered altitude bounds. Which
//! schema a feature uses is discriminated by which raw-text field is
//! populated, and [`SigmetProperties`] keeps the two apart structurally
//! instead of flattening them into one record of mutually exclusive
//! options.
//!
//! Geometry coordinates are classified by the nesting depth of the
//! numeric payload alone. The declared `type` tag is not trusted; the
//! service has been observed disagreeing with its own payload shape.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::Error;

/// Which of the two report schemas a SIGMET uses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReportFamily {
    /// Issued by a FIR outside the continental US.
    International,
    /// Issued for the continental US (SIGMET or AIRMET outlook).
    Us,
}

/// The advised hazard.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hazard {
    Ice,
    /// Mountain wave.
    MountainWave,
    /// Tropical cyclone.
    TropicalCyclone,
    Thunderstorms,
    /// Thunderstorms with hail.
    ThunderstormsWithHail,
    Sandstorm,
    Duststorm,
    Turbulence,
    /// Low level wind shear.
    LowLevelWindShear,
    VolcanicAsh,
    RadioactiveCloud,
    // US reports only
    Convective,
    Icing,
    Ifr,
    MountainObscuration,
    Ash,
}

impl FromStr for Hazard {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ICE" => Ok(Self::Ice),
            "MTW" => Ok(Self::MountainWave),
            "TC" => Ok(Self::TropicalCyclone),
            "TS" => Ok(Self::Thunderstorms),
            "TSGR" => Ok(Self::ThunderstormsWithHail),
            "SS" => Ok(Self::Sandstorm),
            "DS" => Ok(Self::Duststorm),
            "TURB" => Ok(Self::Turbulence),
            "LLWS" => Ok(Self::LowLevelWindShear),
            "VA" => Ok(Self::VolcanicAsh),
            "RDOACT CLD" => Ok(Self::RadioactiveCloud),
            "CONVECTIVE" => Ok(Self::Convective),
            "ICING" => Ok(Self::Icing),
            "IFR" => Ok(Self::Ifr),
            "MTN OBSCN" => Ok(Self::MountainObscuration),
            "ASH" => Ok(Self::Ash),
            _ => Err(()),
        }
    }
}

/// Forecast change of the hazard's intensity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntensityChange {
    /// No change.
    Nc,
    /// Weakening.
    Wkn,
    /// Intensifying.
    Intsf,
}

impl FromStr for IntensityChange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NC" => Ok(Self::Nc),
            "WKN" => Ok(Self::Wkn),
            "INTSF" => Ok(Self::Intsf),
            _ => Err(()),
        }
    }
}

/// Region shape as declared in the report text.
///
/// This is the service's own reading of the raw report and is
/// independent of the [`SigmetGeometry`] attached to the feature. UNK
/// means the service could not determine a region and published the FIR
/// outline instead.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeclaredGeometryType {
    Area,
    Line,
    Point,
    Unknown,
}

impl FromStr for DeclaredGeometryType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AREA" => Ok(Self::Area),
            "LINE" => Ok(Self::Line),
            "POINT" => Ok(Self::Point),
            "UNK" => Ok(Self::Unknown),
            _ => Err(()),
        }
    }
}

/// Properties of an international SIGMET.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InternationalSigmet {
    /// ICAO identifier of the station that entered the SIGMET.
    pub icao_id: Option<String>,
    /// Flight Information Region identifier.
    pub fir_id: Option<String>,
    /// Long name of the FIR.
    pub fir_name: Option<String>,
    /// Identifier of the report series.
    pub series_id: Option<String>,
    /// The advised hazard.
    pub hazard: Option<Hazard>,
    /// When the SIGMET becomes valid.
    pub valid_time_from: Option<DateTime<Utc>>,
    /// When the SIGMET ends.
    pub valid_time_to: Option<DateTime<Utc>>,
    /// Hazard qualifier such as ISOL, SEV or EMBD. Free text on the wire.
    pub qualifier: Option<String>,
    /// Region shape as declared by the service.
    pub geometry_type: Option<DeclaredGeometryType>,
    /// Raw coordinate string from the report, e.g. `N OF N3200`.
    /// Longitudes beyond 180° indicate a region crossing the date line.
    pub coords: Option<String>,
    /// Lowest level the SIGMET is valid for (feet).
    pub base_ft: Option<i32>,
    /// Highest level the SIGMET is valid for (feet).
    pub top_ft: Option<i32>,
    /// Direction of movement in cardinals, or `-`.
    pub movement_dir: Option<String>,
    /// Speed of movement in knots, as reported.
    pub movement_speed: Option<String>,
    /// Forecast intensity change.
    pub change: Option<IntensityChange>,
    /// The raw SIGMET text. Non-empty, this is the family discriminator.
    pub raw_sigmet: String,
}

/// Properties of a US SIGMET or outlook.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UsSigmet {
    /// ICAO identifier of the issuing station.
    pub icao_id: Option<String>,
    /// SIGMET or OUTLOOK.
    pub air_sigmet_type: Option<String>,
    /// Series letter of the advisory.
    pub alpha_char: Option<String>,
    /// The advised hazard.
    pub hazard: Option<Hazard>,
    /// When the SIGMET becomes valid.
    pub valid_time_from: Option<DateTime<Utc>>,
    /// When the SIGMET ends.
    pub valid_time_to: Option<DateTime<Utc>>,
    /// Severity as reported. See [`severity_value`](Self::severity_value).
    pub severity: Option<String>,
    /// Lowest level the SIGMET is valid for (feet).
    pub altitude_low1_ft: Option<i32>,
    /// Secondary lowest level (feet).
    pub altitude_low2_ft: Option<i32>,
    /// Highest level the SIGMET is valid for (feet).
    pub altitude_hi1_ft: Option<i32>,
    /// Secondary highest level (feet).
    pub altitude_hi2_ft: Option<i32>,
    /// The raw SIGMET text.
    pub raw_air_sigmet: String,
}

impl UsSigmet {
    /// Numeric severity, typically 1 or 2, with 0 denoting an outlook
    /// rather than a fielded hazard. Absent when the reported severity is
    /// not numeric.
    pub fn severity_value(&self) -> Option<i32> {
        self.severity.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

/// The two mutually exclusive SIGMET property schemas.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SigmetProperties {
    International(InternationalSigmet),
    Us(UsSigmet),
}

impl SigmetProperties {
    pub fn report_family(&self) -> ReportFamily {
        match self {
            Self::International(_) => ReportFamily::International,
            Self::Us(_) => ReportFamily::Us,
        }
    }

    /// The raw report text, whichever field the family populates.
    pub fn text(&self) -> &str {
        match self {
            Self::International(properties) => &properties.raw_sigmet,
            Self::Us(properties) => &properties.raw_air_sigmet,
        }
    }

    pub fn valid_time_from(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::International(properties) => properties.valid_time_from,
            Self::Us(properties) => properties.valid_time_from,
        }
    }
}

/// Region geometry of a SIGMET feature.
///
/// Coordinates are `(longitude, latitude)` pairs in decimal degrees, in
/// the order the service delivers them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SigmetGeometry {
    Point((f64, f64)),
    LineString(Vec<(f64, f64)>),
    /// One or more rings, each a closed sequence of pairs.
    Polygon(Vec<Vec<(f64, f64)>>),
}

/// One decoded hazard advisory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sigmet {
    /// Feature identifier assigned by the service.
    pub id: Option<String>,
    /// The family-specific report properties.
    pub properties: SigmetProperties,
    /// Region geometry, when the service could derive one.
    pub geometry: Option<SigmetGeometry>,
}

impl Sigmet {
    pub fn report_family(&self) -> ReportFamily {
        self.properties.report_family()
    }

    /// The raw report text.
    pub fn text(&self) -> &str {
        self.properties.text()
    }
}

/// Decodes a SIGMET feature collection.
///
/// International responses lead with a non-report metadata feature which
/// is dropped from the output. Records are returned newest valid-from
/// first; a record without a valid-from time sorts last.
///
/// Any properties or geometry value that does not convert fails the
/// whole decode with [`Error::FieldConversionFailed`]; a document that is
/// not a feature collection fails with [`Error::MalformedDocument`].
pub fn decode(data: &[u8]) -> Result<Vec<Sigmet>, Error> {
    let document: Value = serde_json::from_slice(data)?;
    let root = document
        .as_object()
        .ok_or_else(|| Error::MalformedDocument("top level is not an object".to_string()))?;

    root.get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedDocument("missing collection type tag".to_string()))?;
    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MalformedDocument("missing features array".to_string()))?;

    let mut sigmets = features.iter().map(feature).collect::<Result<Vec<_>, _>>()?;

    // The service prepends a header feature to international responses
    // only. The header itself has no raw text and classifies as US, so
    // the check keys off the last feature's family. Fragile if the
    // service ever mixes families in one response, but kept for wire
    // compatibility.
    if sigmets
        .last()
        .is_some_and(|sigmet| sigmet.report_family() == ReportFamily::International)
    {
        sigmets.remove(0);
    }

    sigmets.sort_by(|a, b| {
        let key = |sigmet: &Sigmet| {
            sigmet
                .properties
                .valid_time_from()
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        };
        key(b).cmp(&key(a))
    });

    Ok(sigmets)
}

fn feature(value: &Value) -> Result<Sigmet, Error> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::MalformedDocument("feature is not an object".to_string()))?;

    let id = convert::json_string(object, "id")?;
    let properties = object
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::MalformedDocument("feature without properties".to_string()))?;
    let properties = decode_properties(properties)?;

    let geometry = match object.get("geometry") {
        None | Some(Value::Null) => None,
        Some(value) => Some(geometry(value)?),
    };

    Ok(Sigmet {
        id,
        properties,
        geometry,
    })
}

/// A populated `rawSigmet` selects the international schema; everything
/// else, including the header metadata feature with neither raw-text
/// field, decodes against the US schema.
fn decode_properties(object: &Map<String, Value>) -> Result<SigmetProperties, Error> {
    let raw_sigmet = convert::json_string(object, "rawSigmet")?.filter(|raw| !raw.is_empty());

    if let Some(raw_sigmet) = raw_sigmet {
        Ok(SigmetProperties::International(InternationalSigmet {
            icao_id: convert::json_string(object, "icaoId")?,
            fir_id: convert::json_string(object, "firId")?,
            fir_name: convert::json_string(object, "firName")?,
            series_id: convert::json_string(object, "seriesId")?,
            hazard: convert::json_enumeration(object, "hazard")?,
            valid_time_from: convert::json_datetime(object, "validTimeFrom")?,
            valid_time_to: convert::json_datetime(object, "validTimeTo")?,
            qualifier: convert::json_string(object, "qualifier")?,
            geometry_type: convert::json_enumeration(object, "geom")?,
            coords: convert::json_string(object, "coords")?,
            base_ft: convert::json_integer(object, "base")?,
            top_ft: convert::json_integer(object, "top")?,
            movement_dir: convert::json_string(object, "dir")?,
            movement_speed: convert::json_string(object, "speed")?,
            change: convert::json_enumeration(object, "chng")?,
            raw_sigmet,
        }))
    } else {
        Ok(SigmetProperties::Us(UsSigmet {
            icao_id: convert::json_string(object, "icaoId")?,
            air_sigmet_type: convert::json_string(object, "airSigmetType")?,
            alpha_char: convert::json_string(object, "alphaChar")?,
            hazard: convert::json_enumeration(object, "hazard")?,
            valid_time_from: convert::json_datetime(object, "validTimeFrom")?,
            valid_time_to: convert::json_datetime(object, "validTimeTo")?,
            severity: convert::json_string(object, "severity")?,
            altitude_low1_ft: convert::json_integer(object, "altitudeLow1")?,
            altitude_low2_ft: convert::json_integer(object, "altitudeLow2")?,
            altitude_hi1_ft: convert::json_integer(object, "altitudeHi1")?,
            altitude_hi2_ft: convert::json_integer(object, "altitudeHi2")?,
            raw_air_sigmet: convert::json_string(object, "rawAirSigmet")?.unwrap_or_default(),
        }))
    }
}

/// Classifies the coordinate payload by nesting depth: numbers make a
/// Point, arrays of numbers a LineString, arrays of arrays a Polygon. A
/// bare number is not a coordinate.
fn geometry(value: &Value) -> Result<SigmetGeometry, Error> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::MalformedDocument("geometry is not an object".to_string()))?;
    let coordinates = object
        .get("coordinates")
        .ok_or_else(|| Error::MalformedDocument("geometry without coordinates".to_string()))?;

    let failed = || Error::FieldConversionFailed {
        field: "coordinates",
        raw: coordinates.to_string(),
    };

    let entries = coordinates
        .as_array()
        .filter(|entries| !entries.is_empty())
        .ok_or_else(failed)?;

    match &entries[0] {
        Value::Number(_) => pair(coordinates).map(SigmetGeometry::Point).ok_or_else(failed),
        Value::Array(first) => match first.first() {
            Some(Value::Number(_)) => entries
                .iter()
                .map(pair)
                .collect::<Option<Vec<_>>>()
                .map(SigmetGeometry::LineString)
                .ok_or_else(failed),
            Some(Value::Array(_)) => entries
                .iter()
                .map(|ring| ring.as_array()?.iter().map(pair).collect())
                .collect::<Option<Vec<_>>>()
                .map(SigmetGeometry::Polygon)
                .ok_or_else(failed),
            _ => Err(failed()),
        },
        _ => Err(failed()),
    }
}

fn pair(value: &Value) -> Option<(f64, f64)> {
    match value.as_array()?.as_slice() {
        [x, y] => Some((x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}
