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

//! METAR surface observations.
//!
//! The wire format is the ADDS data server XML: a `response` document with
//! a `data` element carrying a `num_results` attribute and one `METAR`
//! element per observation. Leaf elements under `METAR` map directly onto
//! [`Metar`] fields; the decoder is a flat two-state machine over the
//! element stream.
//!
//! A field absent from the document stays absent in the record. Zero is a
//! legitimate observed value (calm wind, for example) and is never used as
//! a stand-in for "not reported".

use std::collections::HashMap;
use std::mem;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::Error;
use crate::xml::{self, SaxHandler};

/// The report type of a surface observation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetarType {
    /// A routine observation.
    Metar,
    /// A special, off-schedule observation.
    Speci,
}

impl FromStr for MetarType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "METAR" => Ok(Self::Metar),
            "SPECI" => Ok(Self::Speci),
            _ => Err(()),
        }
    }
}

/// Ceiling-and-visibility classification derived by the service.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
}

impl FromStr for FlightCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VFR" => Ok(Self::Vfr),
            "MVFR" => Ok(Self::Mvfr),
            "IFR" => Ok(Self::Ifr),
            "LIFR" => Ok(Self::Lifr),
            _ => Err(()),
        }
    }
}

/// Sky cover code of one cloud layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SkyCover {
    /// Sky clear, human observed.
    Skc,
    /// Clear below 12,000 ft, automated station.
    Clr,
    /// Ceiling and visibility OK.
    Cavok,
    /// Few clouds (1-2 oktas).
    Few,
    /// Scattered (3-4 oktas).
    Sct,
    /// Broken (5-7 oktas).
    Bkn,
    /// Overcast.
    Ovc,
    /// Sky obscured, reported with a vertical visibility.
    Ovx,
}

impl FromStr for SkyCover {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SKC" => Ok(Self::Skc),
            "CLR" => Ok(Self::Clr),
            "CAVOK" => Ok(Self::Cavok),
            "FEW" => Ok(Self::Few),
            "SCT" => Ok(Self::Sct),
            "BKN" => Ok(Self::Bkn),
            "OVC" => Ok(Self::Ovc),
            "OVX" => Ok(Self::Ovx),
            _ => Err(()),
        }
    }
}

/// One reported cloud layer.
///
/// When [`sky_cover`](Self::sky_cover) is [`SkyCover::Clr`] the base is
/// always 0, regardless of any altitude attribute in the source.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkyCondition {
    /// Reported sky cover.
    pub sky_cover: SkyCover,
    /// Cloud base in feet AGL.
    pub cloud_base_ft_agl: i32,
}

/// Station and sensor status flags from the `quality_control_flags` group.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QualityControlFlag {
    /// The report was corrected after initial distribution.
    Corrected,
    /// Fully automated report.
    Auto,
    /// Automated station of type A01/A01A/A02/A02A/AOA/AWOS.
    AutoStation,
    /// Maintenance check indicator, maintenance is needed.
    MaintenanceIndicatorOn,
    /// No signal from the station.
    NoSignal,
    /// The lightning detection sensor is not operating.
    LightningSensorOff,
    /// The freezing rain sensor is not operating.
    FreezingRainSensorOff,
    /// The present weather sensor is not operating.
    PresentWeatherSensorOff,
}

/// One decoded surface observation.
///
/// Numeric fields keep the units reported by the service: temperatures in
/// °C, wind in knots, visibility in statute miles, the altimeter in inHg,
/// pressures in mb, and altitudes in feet.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metar {
    /// The raw METAR text.
    pub raw_text: String,
    /// Station identifier, a four character alphanumeric (A-Z, 0-9).
    pub station_id: String,
    /// Time this METAR was observed.
    pub observation_time: Option<DateTime<Utc>>,
    /// Station latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Station longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// Air temperature (°C).
    pub temp_c: Option<f64>,
    /// Dewpoint temperature (°C).
    pub dewpoint_c: Option<f64>,
    /// Direction the wind is blowing from in degrees. 0 means variable.
    pub wind_dir_degrees: Option<i32>,
    /// Wind speed (knots). 0 together with a direction of 0 is calm wind.
    pub wind_speed_kt: Option<i32>,
    /// Wind gust (knots).
    pub wind_gust_kt: Option<i32>,
    /// Horizontal visibility (statute miles).
    pub visibility_statute_mi: Option<f64>,
    /// Altimeter setting (inches of mercury).
    pub altim_in_hg: Option<f64>,
    /// Sea level pressure (mb).
    pub sea_level_pressure_mb: Option<f64>,
    /// Station and sensor status flags.
    pub quality_control_flags: Vec<QualityControlFlag>,
    /// Up to four cloud layers. OVX is present when a vertical visibility
    /// is reported.
    pub sky_condition: Vec<SkyCondition>,
    /// Flight category derived by the service.
    pub flight_category: Option<FlightCategory>,
    /// Pressure change in the past three hours (mb).
    pub three_hr_pressure_tendency_mb: Option<f64>,
    /// Maximum air temperature from the past 6 hours (°C).
    pub max_temp_past_six_hours: Option<f64>,
    /// Minimum air temperature from the past 6 hours (°C).
    pub min_temp_past_six_hours: Option<f64>,
    /// Maximum air temperature from the past 24 hours (°C).
    pub max_temp_past_twenty_four_hours: Option<f64>,
    /// Minimum air temperature from the past 24 hours (°C).
    pub min_temp_past_twenty_four_hours: Option<f64>,
    /// Liquid precipitation since the last regular METAR (inches).
    pub precip_since_last_metar: Option<f64>,
    /// Liquid precipitation from the past 3 hours. 0.0005 is trace. (inches)
    pub precip_past_three_hours: Option<f64>,
    /// Liquid precipitation from the past 6 hours (inches).
    pub precip_past_six_hours: Option<f64>,
    /// Liquid precipitation from the past 24 hours (inches).
    pub precip_past_twenty_four_hours: Option<f64>,
    /// Snow depth on the ground (inches).
    pub snow_depth: Option<f64>,
    /// Vertical visibility (feet).
    pub vert_vis_ft: Option<i32>,
    /// The report type (METAR or SPECI).
    pub metar_type: Option<MetarType>,
    /// Station elevation (meters).
    pub station_elevation_m: Option<f64>,
}

/// Decodes an ADDS METAR XML document into observations in document order.
///
/// A declared result count of zero fails with
/// [`Error::InvalidStationQuery`]. Conversion failures on the observation
/// time, position, or report classification abort the decode; optional
/// numeric observations that fail to convert keep their absent state.
///
/// # Examples
///
/// ```
/// let xml = br#"<response>
///   <data num_results="1">
///     <METAR>
///       <raw_text>KFME 201348Z AUTO 33006KT 10SM CLR M04/M10 A3037 RMK AO1</raw_text>
///       <station_id>KFME</station_id>
///       <wind_speed_kt>6</wind_speed_kt>
///       <sky_condition sky_cover="CLR"/>
///     </METAR>
///   </data>
/// </response>"#;
///
/// let metars = avwx::metar::decode(xml).unwrap();
/// assert_eq!(metars[0].station_id, "KFME");
/// assert_eq!(metars[0].wind_speed_kt, Some(6));
/// ```
pub fn decode(data: &[u8]) -> Result<Vec<Metar>, Error> {
    let mut decoder = MetarDecoder::default();
    xml::drive(data, &mut decoder)?;
    decoder.finish()
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum State {
    Outside,
    InReport,
}

impl Default for State {
    fn default() -> Self {
        Self::Outside
    }
}

#[derive(Default)]
struct MetarDecoder {
    state: State,
    current: Metar,
    buffer: String,
    metars: Vec<Metar>,
}

impl MetarDecoder {
    fn finish(self) -> Result<Vec<Metar>, Error> {
        if self.state != State::Outside {
            return Err(Error::MalformedDocument(
                "document ended inside a METAR element".to_string(),
            ));
        }
        Ok(self.metars)
    }

    fn assign(&mut self, name: &str) -> Result<(), Error> {
        let raw = self.buffer.as_str();
        let metar = &mut self.current;

        match name {
            "raw_text" => metar.raw_text = raw.to_string(),
            "station_id" => metar.station_id = raw.to_string(),

            // Identity and classification fields abort the decode when they
            // cannot be converted.
            "observation_time" => {
                metar.observation_time = Some(convert::datetime("observation_time", raw)?)
            }
            "latitude" => metar.latitude = Some(convert::real("latitude", raw)?),
            "longitude" => metar.longitude = Some(convert::real("longitude", raw)?),
            "flight_category" => {
                metar.flight_category = Some(convert::enumeration("flight_category", raw)?)
            }
            "metar_type" => metar.metar_type = Some(convert::enumeration("metar_type", raw)?),

            // Optional numeric observations keep their absent state when the
            // raw text does not convert.
            "temp_c" => metar.temp_c = convert::lenient_real("temp_c", raw),
            "dewpoint_c" => metar.dewpoint_c = convert::lenient_real("dewpoint_c", raw),
            "wind_dir_degrees" => {
                metar.wind_dir_degrees = convert::lenient_integer("wind_dir_degrees", raw)
            }
            "wind_speed_kt" => {
                metar.wind_speed_kt = convert::lenient_integer("wind_speed_kt", raw)
            }
            "wind_gust_kt" => metar.wind_gust_kt = convert::lenient_integer("wind_gust_kt", raw),
            "visibility_statute_mi" => {
                metar.visibility_statute_mi = convert::lenient_real("visibility_statute_mi", raw)
            }
            "altim_in_hg" => metar.altim_in_hg = convert::lenient_real("altim_in_hg", raw),
            "sea_level_pressure_mb" => {
                metar.sea_level_pressure_mb = convert::lenient_real("sea_level_pressure_mb", raw)
            }
            "three_hr_pressure_tendency_mb" => {
                metar.three_hr_pressure_tendency_mb =
                    convert::lenient_real("three_hr_pressure_tendency_mb", raw)
            }
            "maxT_c" => metar.max_temp_past_six_hours = convert::lenient_real("maxT_c", raw),
            "minT_c" => metar.min_temp_past_six_hours = convert::lenient_real("minT_c", raw),
            "maxT24hr_c" => {
                metar.max_temp_past_twenty_four_hours = convert::lenient_real("maxT24hr_c", raw)
            }
            "minT24hr_c" => {
                metar.min_temp_past_twenty_four_hours = convert::lenient_real("minT24hr_c", raw)
            }
            "precip_in" => metar.precip_since_last_metar = convert::lenient_real("precip_in", raw),
            "pcp3hr_in" => metar.precip_past_three_hours = convert::lenient_real("pcp3hr_in", raw),
            "pcp6hr_in" => metar.precip_past_six_hours = convert::lenient_real("pcp6hr_in", raw),
            "pcp24hr_in" => {
                metar.precip_past_twenty_four_hours = convert::lenient_real("pcp24hr_in", raw)
            }
            "snow_in" => metar.snow_depth = convert::lenient_real("snow_in", raw),
            "vert_vis_ft" => metar.vert_vis_ft = convert::lenient_integer("vert_vis_ft", raw),
            "elevation_m" => {
                metar.station_elevation_m = convert::lenient_real("elevation_m", raw)
            }

            // Children of the quality_control_flags group carry TRUE when
            // the flag is set.
            _ => {
                if raw == "TRUE" {
                    if let Some(flag) = quality_control_flag(name) {
                        metar.quality_control_flags.push(flag);
                    }
                }
            }
        }

        Ok(())
    }
}

impl SaxHandler for MetarDecoder {
    fn element_start(
        &mut self,
        name: &str,
        attributes: &HashMap<String, String>,
    ) -> Result<(), Error> {
        match name {
            "data" => check_result_count(attributes, "METAR"),
            "METAR" => {
                self.state = State::InReport;
                self.current = Metar::default();
                Ok(())
            }
            "sky_condition" if self.state == State::InReport => {
                if let Some(layer) = sky_condition(attributes) {
                    self.current.sky_condition.push(layer);
                }
                Ok(())
            }
            _ => {
                if self.state == State::InReport {
                    self.buffer.clear();
                }
                Ok(())
            }
        }
    }

    fn element_end(&mut self, name: &str) -> Result<(), Error> {
        match name {
            "METAR" => {
                self.metars.push(mem::take(&mut self.current));
                self.state = State::Outside;
                Ok(())
            }
            _ if self.state == State::InReport => self.assign(name),
            _ => Ok(()),
        }
    }

    fn text(&mut self, fragment: &str) {
        if self.state == State::InReport {
            self.buffer.push_str(fragment);
        }
    }
}

/// Checks the declared result count on the `data` element.
///
/// The service reports zero results for an unrecognized station
/// identifier, which is surfaced as [`Error::InvalidStationQuery`] rather
/// than a generic parse fault.
pub(crate) fn check_result_count(
    attributes: &HashMap<String, String>,
    kind: &str,
) -> Result<(), Error> {
    let count: u32 = attributes
        .get("num_results")
        .and_then(|raw| raw.trim().parse().ok())
        .ok_or_else(|| {
            Error::MalformedDocument(format!("missing or invalid num_results in {kind} response"))
        })?;

    if count == 0 {
        return Err(Error::InvalidStationQuery);
    }
    Ok(())
}

/// Builds a sky condition layer from the `sky_condition` attributes.
///
/// CLR implies a base of 0 regardless of any reported altitude. Any other
/// cover requires a numeric `cloud_base_ft_agl`; a layer that does not
/// satisfy that is dropped without failing the decode.
pub(crate) fn sky_condition(attributes: &HashMap<String, String>) -> Option<SkyCondition> {
    let cover = attributes.get("sky_cover")?;

    if cover == "CLR" {
        return Some(SkyCondition {
            sky_cover: SkyCover::Clr,
            cloud_base_ft_agl: 0,
        });
    }

    let sky_cover = cover.parse().ok();
    let base = attributes
        .get("cloud_base_ft_agl")
        .and_then(|raw| raw.trim().parse().ok());

    match (sky_cover, base) {
        (Some(sky_cover), Some(cloud_base_ft_agl)) => Some(SkyCondition {
            sky_cover,
            cloud_base_ft_agl,
        }),
        _ => {
            debug!("dropping sky_condition layer with cover {cover:?} and no usable base");
            None
        }
    }
}

fn quality_control_flag(name: &str) -> Option<QualityControlFlag> {
    match name {
        "corrected" => Some(QualityControlFlag::Corrected),
        "auto" => Some(QualityControlFlag::Auto),
        "auto_station" => Some(QualityControlFlag::AutoStation),
        "maintenance_indicator_on" => Some(QualityControlFlag::MaintenanceIndicatorOn),
        "no_signal" => Some(QualityControlFlag::NoSignal),
        "lightning_sensor_off" => Some(QualityControlFlag::LightningSensorOff),
        "freezing_rain_sensor_off" => Some(QualityControlFlag::FreezingRainSensorOff),
        "present_weather_sensor_off" => Some(QualityControlFlag::PresentWeatherSensorOff),
        _ => None,
    }
}
