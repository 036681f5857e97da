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

//! TAF terminal aerodrome forecasts.
//!
//! The wire format is the ADDS data server XML, one `TAF` element per
//! report with nested `forecast` groups, one per forecast period. The
//! decoder runs three states deep: outside, in a report, in a forecast
//! period. Unlike the METAR decoder every declared field converts
//! strictly; a TAF with an unreadable value is not worth keeping, since
//! the forecast periods only make sense as a whole.

use std::collections::HashMap;
use std::mem;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::Error;
use crate::metar::{self, SkyCover};
use crate::xml::{self, SaxHandler};

/// Convective cloud type attached to a forecast cloud layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CloudType {
    /// Cumulonimbus.
    Cb,
    /// Towering cumulus.
    Tcu,
    /// Cumulus.
    Cu,
}

impl FromStr for CloudType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CB" => Ok(Self::Cb),
            "TCU" => Ok(Self::Tcu),
            "CU" => Ok(Self::Cu),
            _ => Err(()),
        }
    }
}

/// How a forecast period modifies the one before it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeIndicator {
    /// Temporary fluctuations within the period.
    Tempo,
    /// Gradual change across the period.
    Becmg,
    /// Rapid change from the given time.
    Fm,
    /// Probabilistic conditions.
    Prob,
}

impl FromStr for ChangeIndicator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEMPO" => Ok(Self::Tempo),
            "BECMG" => Ok(Self::Becmg),
            "FM" => Ok(Self::Fm),
            "PROB" => Ok(Self::Prob),
            _ => Err(()),
        }
    }
}

/// One forecast cloud layer.
///
/// A [`SkyCover::Clr`] layer always has a base of 0.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkyCondition {
    /// Forecast sky cover.
    pub sky_cover: SkyCover,
    /// Cloud base in feet AGL.
    pub cloud_base_ft_agl: i32,
    /// Convective cloud type, when one is forecast.
    pub cloud_type: Option<CloudType>,
}

/// A forecast turbulence layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurbulenceCondition {
    /// Turbulence intensity code 0-9, per WMO No. 306.
    pub intensity: i32,
    /// Bottom of the layer in feet AGL.
    pub min_alt_ft_agl: i32,
    /// Top of the layer in feet AGL.
    pub max_alt_ft_agl: i32,
}

/// A forecast icing layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IcingCondition {
    /// Icing intensity code 0-9, per WMO No. 306.
    pub intensity: i32,
    /// Bottom of the layer in feet AGL.
    pub min_alt_ft_agl: i32,
    /// Top of the layer in feet AGL.
    pub max_alt_ft_agl: i32,
}

/// A point temperature forecast within a period.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemperatureForecast {
    /// Time this temperature is valid for.
    pub valid_time: DateTime<Utc>,
    /// Surface temperature (°C).
    pub sfc_temp_c: Option<f64>,
    /// Maximum temperature (°C).
    pub max_temp_c: Option<f64>,
    /// Minimum temperature (°C).
    pub min_temp_c: Option<f64>,
}

/// One forecast period of a TAF.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Forecast {
    /// Start of this forecast period.
    pub fcst_time_from: Option<DateTime<Utc>>,
    /// End of this forecast period.
    pub fcst_time_to: Option<DateTime<Utc>>,
    /// Change indicator, absent for the initial period.
    pub change_indicator: Option<ChangeIndicator>,
    /// Time the change is forecast to complete (BECMG groups).
    pub time_becoming: Option<DateTime<Utc>>,
    /// Percent probability (PROB groups).
    pub probability: Option<i32>,
    /// Direction the wind is blowing from in degrees. 0 means variable.
    pub wind_dir_degrees: Option<i32>,
    /// Wind speed (knots).
    pub wind_speed_kt: Option<i32>,
    /// Wind gust (knots).
    pub wind_gust_kt: Option<i32>,
    /// Height of the wind shear (feet AGL).
    pub wind_shear_hgt_ft_agl: Option<i32>,
    /// Wind shear direction in degrees.
    pub wind_shear_dir_degrees: Option<i32>,
    /// Wind shear speed (knots).
    pub wind_shear_speed_kt: Option<i32>,
    /// Horizontal visibility (statute miles).
    pub visibility_statute_mi: Option<f64>,
    /// Altimeter setting (inches of mercury).
    pub altim_in_hg: Option<f64>,
    /// Vertical visibility (feet).
    pub vert_vis_ft: Option<f64>,
    /// Forecast weather phenomena string.
    pub wx_string: Option<String>,
    /// Raw text the service could not decode.
    pub not_decoded: Option<String>,
    /// Forecast cloud layers.
    pub sky_condition: Vec<SkyCondition>,
    /// Forecast turbulence layers.
    pub turbulence_condition: Vec<TurbulenceCondition>,
    /// Forecast icing layers.
    pub icing_condition: Vec<IcingCondition>,
    /// Point temperature forecasts.
    pub temperature: Vec<TemperatureForecast>,
}

/// One decoded terminal aerodrome forecast.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Taf {
    /// The raw TAF text.
    pub raw_text: String,
    /// Station identifier, a four character alphanumeric (A-Z, 0-9).
    pub station_id: String,
    /// Time the forecast was prepared.
    pub issue_time: Option<DateTime<Utc>>,
    /// Bulletin time from the WMO header.
    pub bulletin_time: Option<DateTime<Utc>>,
    /// Start of the report's validity.
    pub valid_time_from: Option<DateTime<Utc>>,
    /// End of the report's validity.
    pub valid_time_to: Option<DateTime<Utc>>,
    /// Remarks appended to the report.
    pub remarks: Option<String>,
    /// Station latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Station longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// Station elevation (meters).
    pub station_elevation_m: Option<f64>,
    /// The forecast periods in document order.
    pub forecast: Vec<Forecast>,
}

/// Decodes an ADDS TAF XML document.
///
/// Reports are returned newest issue first; within a report the forecast
/// periods keep their document order. A declared result count of zero
/// fails with [`Error::InvalidStationQuery`], any declared field that does
/// not convert fails with [`Error::FieldConversionFailed`], and an `error`
/// element embedded by the service fails with [`Error::Service`].
pub fn decode(data: &[u8]) -> Result<Vec<Taf>, Error> {
    let mut decoder = TafDecoder::default();
    xml::drive(data, &mut decoder)?;
    decoder.finish()
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum State {
    Outside,
    InTaf,
    InForecast,
}

impl Default for State {
    fn default() -> Self {
        Self::Outside
    }
}

/// Accumulates the children of a `temperature` group. Stays unset after
/// any child fails to convert, so a broken group is skipped whole.
#[derive(Default)]
struct TemperatureBuilder {
    valid_time: Option<DateTime<Utc>>,
    sfc_temp_c: Option<f64>,
    max_temp_c: Option<f64>,
    min_temp_c: Option<f64>,
}

#[derive(Default)]
struct TafDecoder {
    state: State,
    current: Taf,
    current_forecast: Forecast,
    temperature: Option<TemperatureBuilder>,
    buffer: String,
    tafs: Vec<Taf>,
}

impl TafDecoder {
    fn finish(mut self) -> Result<Vec<Taf>, Error> {
        if self.state != State::Outside {
            return Err(Error::MalformedDocument(
                "document ended inside a TAF element".to_string(),
            ));
        }

        // newest issue first; the stable sort keeps the service order for
        // reports sharing an issue time
        self.tafs.sort_by(|a, b| {
            let key = |taf: &Taf| taf.issue_time.unwrap_or(DateTime::<Utc>::MIN_UTC);
            key(b).cmp(&key(a))
        });
        Ok(self.tafs)
    }

    fn assign_taf(&mut self, name: &str) -> Result<(), Error> {
        let raw = self.buffer.as_str();
        let taf = &mut self.current;

        match name {
            "raw_text" => taf.raw_text = raw.to_string(),
            "station_id" => taf.station_id = raw.to_string(),
            "issue_time" => taf.issue_time = Some(convert::datetime("issue_time", raw)?),
            "bulletin_time" => taf.bulletin_time = Some(convert::datetime("bulletin_time", raw)?),
            "valid_time_from" => {
                taf.valid_time_from = Some(convert::datetime("valid_time_from", raw)?)
            }
            "valid_time_to" => taf.valid_time_to = Some(convert::datetime("valid_time_to", raw)?),
            "remarks" => taf.remarks = Some(raw.to_string()),
            "latitude" => taf.latitude = Some(convert::real("latitude", raw)?),
            "longitude" => taf.longitude = Some(convert::real("longitude", raw)?),
            "elevation_m" => taf.station_elevation_m = Some(convert::real("elevation_m", raw)?),
            _ => (),
        }
        Ok(())
    }

    fn assign_forecast(&mut self, name: &str) -> Result<(), Error> {
        let raw = self.buffer.as_str();
        let forecast = &mut self.current_forecast;

        match name {
            "fcst_time_from" => {
                forecast.fcst_time_from = Some(convert::datetime("fcst_time_from", raw)?)
            }
            "fcst_time_to" => {
                forecast.fcst_time_to = Some(convert::datetime("fcst_time_to", raw)?)
            }
            "change_indicator" => {
                forecast.change_indicator = Some(convert::enumeration("change_indicator", raw)?)
            }
            "time_becoming" => {
                forecast.time_becoming = Some(convert::datetime("time_becoming", raw)?)
            }
            "probability" => forecast.probability = Some(convert::integer("probability", raw)?),
            "wind_dir_degrees" => {
                forecast.wind_dir_degrees = Some(convert::integer("wind_dir_degrees", raw)?)
            }
            "wind_speed_kt" => {
                forecast.wind_speed_kt = Some(convert::integer("wind_speed_kt", raw)?)
            }
            "wind_gust_kt" => forecast.wind_gust_kt = Some(convert::integer("wind_gust_kt", raw)?),
            "wind_shear_hgt_ft_agl" => {
                forecast.wind_shear_hgt_ft_agl =
                    Some(convert::integer("wind_shear_hgt_ft_agl", raw)?)
            }
            "wind_shear_dir_degrees" => {
                forecast.wind_shear_dir_degrees =
                    Some(convert::integer("wind_shear_dir_degrees", raw)?)
            }
            "wind_shear_speed_kt" => {
                forecast.wind_shear_speed_kt = Some(convert::integer("wind_shear_speed_kt", raw)?)
            }
            "visibility_statute_mi" => {
                forecast.visibility_statute_mi =
                    Some(convert::real("visibility_statute_mi", raw)?)
            }
            "altim_in_hg" => forecast.altim_in_hg = Some(convert::real("altim_in_hg", raw)?),
            "vert_vis_ft" => forecast.vert_vis_ft = Some(convert::real("vert_vis_ft", raw)?),
            "wx_string" => forecast.wx_string = Some(raw.to_string()),
            "not_decoded" => forecast.not_decoded = Some(raw.to_string()),
            _ => (),
        }
        Ok(())
    }

    fn assign_temperature(&mut self, name: &str) {
        let raw = self.buffer.as_str();
        let Some(builder) = self.temperature.as_mut() else {
            return;
        };

        let converted = match name {
            "valid_time" => convert::datetime("valid_time", raw)
                .map(|dt| builder.valid_time = Some(dt)),
            "sfc_temp_c" => convert::real("sfc_temp_c", raw)
                .map(|value| builder.sfc_temp_c = Some(value)),
            "max_temp_c" => convert::real("max_temp_c", raw)
                .map(|value| builder.max_temp_c = Some(value)),
            "min_temp_c" => convert::real("min_temp_c", raw)
                .map(|value| builder.min_temp_c = Some(value)),
            _ => return,
        };

        if converted.is_err() {
            warn!("skipping temperature group, cannot convert {name} from {raw:?}");
            self.temperature = None;
        }
    }

    fn close_temperature(&mut self) {
        let Some(builder) = self.temperature.take() else {
            return;
        };

        match builder.valid_time {
            Some(valid_time) => self.current_forecast.temperature.push(TemperatureForecast {
                valid_time,
                sfc_temp_c: builder.sfc_temp_c,
                max_temp_c: builder.max_temp_c,
                min_temp_c: builder.min_temp_c,
            }),
            None => warn!("skipping temperature group without a valid_time"),
        }
    }
}

impl SaxHandler for TafDecoder {
    fn element_start(
        &mut self,
        name: &str,
        attributes: &HashMap<String, String>,
    ) -> Result<(), Error> {
        match name {
            "data" => return metar::check_result_count(attributes, "TAF"),
            "TAF" => {
                self.state = State::InTaf;
                self.current = Taf::default();
            }
            "forecast" => {
                self.state = State::InForecast;
                self.current_forecast = Forecast::default();
            }
            "sky_condition" if self.state == State::InForecast => {
                if let Some(layer) = sky_condition(attributes) {
                    self.current_forecast.sky_condition.push(layer);
                }
            }
            "turbulence_condition" if self.state == State::InForecast => {
                match turbulence_condition(attributes) {
                    Some(layer) => self.current_forecast.turbulence_condition.push(layer),
                    None => warn!("skipping turbulence_condition with unusable attributes"),
                }
            }
            "icing_condition" if self.state == State::InForecast => {
                match icing_condition(attributes) {
                    Some(layer) => self.current_forecast.icing_condition.push(layer),
                    None => warn!("skipping icing_condition with unusable attributes"),
                }
            }
            "temperature" if self.state == State::InForecast => {
                self.temperature = Some(TemperatureBuilder::default());
            }
            _ => self.buffer.clear(),
        }
        Ok(())
    }

    fn element_end(&mut self, name: &str) -> Result<(), Error> {
        match name {
            // the service reports its own faults inline
            "error" => {
                if !self.buffer.is_empty() {
                    return Err(Error::Service(mem::take(&mut self.buffer)));
                }
            }
            "warning" => {
                if !self.buffer.is_empty() {
                    warn!("service warning: {}", self.buffer);
                }
            }
            "TAF" => {
                self.tafs.push(mem::take(&mut self.current));
                self.state = State::Outside;
            }
            "forecast" => {
                self.current
                    .forecast
                    .push(mem::take(&mut self.current_forecast));
                self.state = State::InTaf;
            }
            "temperature" => self.close_temperature(),
            _ if self.temperature.is_some() => self.assign_temperature(name),
            _ if self.state == State::InTaf => return self.assign_taf(name),
            _ if self.state == State::InForecast => return self.assign_forecast(name),
            _ => (),
        }
        Ok(())
    }

    fn text(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
    }
}

fn sky_condition(attributes: &HashMap<String, String>) -> Option<SkyCondition> {
    let layer = metar::sky_condition(attributes)?;
    let cloud_type = attributes
        .get("cloud_type")
        .and_then(|raw| raw.parse().ok());

    Some(SkyCondition {
        sky_cover: layer.sky_cover,
        cloud_base_ft_agl: layer.cloud_base_ft_agl,
        cloud_type,
    })
}

fn turbulence_condition(attributes: &HashMap<String, String>) -> Option<TurbulenceCondition> {
    let int_attr = |name: &str| attributes.get(name)?.trim().parse().ok();

    Some(TurbulenceCondition {
        intensity: int_attr("turbulence_intensity")?,
        min_alt_ft_agl: int_attr("turbulence_min_alt_ft_agl")?,
        max_alt_ft_agl: int_attr("turbulence_max_alt_ft_agl")?,
    })
}

fn icing_condition(attributes: &HashMap<String, String>) -> Option<IcingCondition> {
    let int_attr = |name: &str| attributes.get(name)?.trim().parse().ok();

    Some(IcingCondition {
        intensity: int_attr("icing_intensity")?,
        min_alt_ft_agl: int_attr("icing_min_alt_ft_agl")?,
        max_alt_ft_agl: int_attr("icing_max_alt_ft_agl")?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const ONE_TAF: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
    <response>
      <data num_results="1">
        <TAF>
          <raw_text>KBWI 201740Z 2018/2118 34008KT P6SM SKC FM210000 VRB03KT P6SM SKC FM211500 16005KT P6SM BKN250</raw_text>
          <station_id>KBWI</station_id>
          <issue_time>2020-02-20T17:40:00Z</issue_time>
          <bulletin_time>2020-02-20T17:40:00Z</bulletin_time>
          <valid_time_from>2020-02-20T18:00:00Z</valid_time_from>
          <valid_time_to>2020-02-21T18:00:00Z</valid_time_to>
          <latitude>39.17</latitude>
          <longitude>-76.68</longitude>
          <elevation_m>45.0</elevation_m>
          <forecast>
            <fcst_time_from>2020-02-20T18:00:00Z</fcst_time_from>
            <fcst_time_to>2020-02-21T00:00:00Z</fcst_time_to>
            <wind_dir_degrees>340</wind_dir_degrees>
            <wind_speed_kt>8</wind_speed_kt>
            <visibility_statute_mi>6.21</visibility_statute_mi>
            <sky_condition sky_cover="SKC" cloud_base_ft_agl="0"/>
          </forecast>
          <forecast>
            <fcst_time_from>2020-02-21T00:00:00Z</fcst_time_from>
            <fcst_time_to>2020-02-21T15:00:00Z</fcst_time_to>
            <change_indicator>FM</change_indicator>
            <wind_dir_degrees>0</wind_dir_degrees>
            <wind_speed_kt>3</wind_speed_kt>
            <sky_condition sky_cover="CLR" cloud_base_ft_agl="9000"/>
          </forecast>
          <forecast>
            <fcst_time_from>2020-02-21T15:00:00Z</fcst_time_from>
            <fcst_time_to>2020-02-21T18:00:00Z</fcst_time_to>
            <change_indicator>FM</change_indicator>
            <wind_dir_degrees>160</wind_dir_degrees>
            <wind_speed_kt>5</wind_speed_kt>
            <sky_condition sky_cover="BKN" cloud_base_ft_agl="25000" cloud_type="CB"/>
          </forecast>
        </TAF>
      </data>
    </response>"#;

    #[test]
    fn decodes_forecast_periods_in_document_order() {
        let tafs = decode(ONE_TAF).unwrap();
        assert_eq!(tafs.len(), 1);

        let taf = &tafs[0];
        assert_eq!(taf.station_id, "KBWI");
        assert_eq!(
            taf.issue_time,
            Some(Utc.with_ymd_and_hms(2020, 2, 20, 17, 40, 0).unwrap())
        );
        assert_eq!(taf.latitude, Some(39.17));
        assert_eq!(taf.station_elevation_m, Some(45.0));
        assert_eq!(taf.forecast.len(), 3);

        assert_eq!(taf.forecast[0].change_indicator, None);
        assert_eq!(taf.forecast[0].wind_dir_degrees, Some(340));
        assert_eq!(taf.forecast[1].change_indicator, Some(ChangeIndicator::Fm));
        assert_eq!(taf.forecast[2].change_indicator, Some(ChangeIndicator::Fm));
        assert_eq!(taf.forecast[2].wind_speed_kt, Some(5));
    }

    #[test]
    fn clear_layer_base_is_zero_and_cloud_type_survives() {
        let tafs = decode(ONE_TAF).unwrap();
        let taf = &tafs[0];

        assert_eq!(
            taf.forecast[1].sky_condition,
            vec![SkyCondition {
                sky_cover: SkyCover::Clr,
                cloud_base_ft_agl: 0,
                cloud_type: None,
            }]
        );
        assert_eq!(
            taf.forecast[2].sky_condition,
            vec![SkyCondition {
                sky_cover: SkyCover::Bkn,
                cloud_base_ft_agl: 25_000,
                cloud_type: Some(CloudType::Cb),
            }]
        );
    }

    #[test]
    fn reports_sort_newest_issue_first() {
        let xml = br#"<response><data num_results="2">
            <TAF>
              <station_id>KBWI</station_id>
              <issue_time>2020-02-20T11:40:00Z</issue_time>
            </TAF>
            <TAF>
              <station_id>KBWI</station_id>
              <issue_time>2020-02-20T17:40:00Z</issue_time>
            </TAF>
        </data></response>"#;

        let tafs = decode(xml).unwrap();
        assert_eq!(
            tafs[0].issue_time,
            Some(Utc.with_ymd_and_hms(2020, 2, 20, 17, 40, 0).unwrap())
        );
        assert!(tafs[1].issue_time < tafs[0].issue_time);
    }

    #[test]
    fn every_declared_field_converts_strictly() {
        let xml = br#"<response><data num_results="1"><TAF>
            <station_id>KBWI</station_id>
            <forecast>
              <wind_speed_kt>light</wind_speed_kt>
            </forecast>
        </TAF></data></response>"#;

        assert_eq!(
            decode(xml).unwrap_err(),
            Error::FieldConversionFailed {
                field: "wind_speed_kt",
                raw: "light".to_string(),
            }
        );
    }

    #[test]
    fn embedded_error_element_aborts() {
        let xml = br#"<response>
            <error>query must be constrained by time</error>
            <data num_results="1"><TAF><station_id>KBWI</station_id></TAF></data>
        </response>"#;

        assert_eq!(
            decode(xml).unwrap_err(),
            Error::Service("query must be constrained by time".to_string())
        );
    }

    #[test]
    fn embedded_warning_element_does_not_abort() {
        let xml = br#"<response>
            <warning>results truncated</warning>
            <data num_results="1"><TAF><station_id>KBWI</station_id></TAF></data>
        </response>"#;

        let tafs = decode(xml).unwrap();
        assert_eq!(tafs[0].station_id, "KBWI");
    }

    #[test]
    fn turbulence_and_icing_layers() {
        let xml = br#"<response><data num_results="1"><TAF>
            <station_id>KBWI</station_id>
            <forecast>
              <turbulence_condition turbulence_intensity="3" turbulence_min_alt_ft_agl="2000" turbulence_max_alt_ft_agl="9000"/>
              <turbulence_condition turbulence_intensity="bad"/>
              <icing_condition icing_intensity="2" icing_min_alt_ft_agl="0" icing_max_alt_ft_agl="6000"/>
            </forecast>
        </TAF></data></response>"#;

        let tafs = decode(xml).unwrap();
        let forecast = &tafs[0].forecast[0];

        assert_eq!(
            forecast.turbulence_condition,
            vec![TurbulenceCondition {
                intensity: 3,
                min_alt_ft_agl: 2000,
                max_alt_ft_agl: 9000,
            }]
        );
        assert_eq!(
            forecast.icing_condition,
            vec![IcingCondition {
                intensity: 2,
                min_alt_ft_agl: 0,
                max_alt_ft_agl: 6000,
            }]
        );
    }

    #[test]
    fn temperature_groups() {
        let xml = br#"<response><data num_results="1"><TAF>
            <station_id>KBWI</station_id>
            <forecast>
              <temperature>
                <valid_time>2020-02-21T00:00:00Z</valid_time>
                <max_temp_c>8.0</max_temp_c>
              </temperature>
              <temperature>
                <sfc_temp_c>3.0</sfc_temp_c>
              </temperature>
            </forecast>
        </TAF></data></response>"#;

        let tafs = decode(xml).unwrap();
        let forecast = &tafs[0].forecast[0];

        // the group without a valid_time is skipped
        assert_eq!(
            forecast.temperature,
            vec![TemperatureForecast {
                valid_time: Utc.with_ymd_and_hms(2020, 2, 21, 0, 0, 0).unwrap(),
                sfc_temp_c: None,
                max_temp_c: Some(8.0),
                min_temp_c: None,
            }]
        );
    }

    #[test]
    fn zero_results_is_an_invalid_station_query() {
        let xml = br#"<response><data num_results="0"></data></response>"#;
        assert_eq!(decode(xml).unwrap_err(), Error::InvalidStationQuery);
    }

    #[test]
    fn truncated_document_is_malformed() {
        let xml = br#"<response><data num_results="1"><TAF><station_id>KBWI</station_id>"#;
        assert!(matches!(
            decode(xml).unwrap_err(),
            Error::MalformedDocument(_)
        ));
    }
}
