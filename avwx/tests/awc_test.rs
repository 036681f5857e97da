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

use avwx::metar::{FlightCategory, MetarType, QualityControlFlag, SkyCover};
use avwx::request::{AwcRequest, MetarRequest, SigmetRequest, TafRequest};
use avwx::sigmet::{Hazard, ReportFamily, SigmetGeometry, SigmetProperties};
use avwx::taf::ChangeIndicator;
use avwx::Error;

const METAR_DATA: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<response xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <request_index>60461486</request_index>
  <data_source name="metars"/>
  <request type="retrieve"/>
  <errors/>
  <warnings/>
  <time_taken_ms>7</time_taken_ms>
  <data num_results="2">
    <METAR>
      <raw_text>KFME 201348Z AUTO 33006KT 10SM CLR M04/M10 A3037 RMK AO1</raw_text>
      <station_id>KFME</station_id>
      <observation_time>2020-02-20T13:48:00Z</observation_time>
      <latitude>39.08</latitude>
      <longitude>-76.77</longitude>
      <temp_c>-4.0</temp_c>
      <dewpoint_c>-10.0</dewpoint_c>
      <wind_dir_degrees>330</wind_dir_degrees>
      <wind_speed_kt>6</wind_speed_kt>
      <visibility_statute_mi>10.0</visibility_statute_mi>
      <altim_in_hg>30.369095</altim_in_hg>
      <quality_control_flags>
        <auto>TRUE</auto>
        <auto_station>TRUE</auto_station>
      </quality_control_flags>
      <sky_condition sky_cover="CLR"/>
      <flight_category>VFR</flight_category>
      <metar_type>METAR</metar_type>
      <elevation_m>46.0</elevation_m>
    </METAR>
    <METAR>
      <raw_text>KFME 201248Z AUTO 32004KT 10SM BKN049 M03/M09 A3035 RMK AO1</raw_text>
      <station_id>KFME</station_id>
      <observation_time>2020-02-20T12:48:00Z</observation_time>
      <wind_dir_degrees>320</wind_dir_degrees>
      <wind_speed_kt>4</wind_speed_kt>
      <sky_condition sky_cover="BKN" cloud_base_ft_agl="4900"/>
      <flight_category>VFR</flight_category>
      <metar_type>METAR</metar_type>
    </METAR>
  </data>
</response>"#;

const TAF_DATA: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<response xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <data_source name="tafs"/>
  <errors/>
  <warnings/>
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
        <sky_condition sky_cover="CLR"/>
      </forecast>
      <forecast>
        <fcst_time_from>2020-02-21T15:00:00Z</fcst_time_from>
        <fcst_time_to>2020-02-21T18:00:00Z</fcst_time_to>
        <change_indicator>FM</change_indicator>
        <wind_dir_degrees>160</wind_dir_degrees>
        <wind_speed_kt>5</wind_speed_kt>
        <sky_condition sky_cover="BKN" cloud_base_ft_agl="25000"/>
      </forecast>
    </TAF>
  </data>
</response>"#;

const ISIGMET_DATA: &[u8] = br#"{
  "type": "FeatureCollection",
  "features": [
    {
      "properties": {
        "validTimeFrom": "2022-12-28T09:00:00Z",
        "validTimeTo": "2022-12-28T21:00:00Z"
      }
    },
    {
      "properties": {
        "icaoId": "LFPW",
        "firId": "LFBB",
        "firName": "BORDEAUX",
        "seriesId": "W3",
        "hazard": "TURB",
        "validTimeFrom": "2022-12-28T12:00:00Z",
        "validTimeTo": "2022-12-28T18:00:00Z",
        "qualifier": "SEV",
        "geom": "AREA",
        "base": 24000,
        "top": 34000,
        "dir": "NE",
        "speed": "15",
        "chng": "NC",
        "rawSigmet": "LFBB SIGMET W3 VALID 281200/281800 LFPW- LFBB BORDEAUX FIR SEV TURB FCST"
      },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-1.0, 44.0], [0.5, 45.0], [-0.5, 46.0], [-1.0, 44.0]]]
      }
    },
    {
      "properties": {
        "icaoId": "LFPW",
        "firId": "LFMM",
        "firName": "MARSEILLE",
        "hazard": "MTW",
        "validTimeFrom": "2022-12-28T14:00:00Z",
        "validTimeTo": "2022-12-28T20:00:00Z",
        "geom": "LINE",
        "rawSigmet": "LFMM SIGMET 2 VALID 281400/282000 LFPW- LFMM MARSEILLE FIR MTW FCST"
      },
      "geometry": {
        "type": "LineString",
        "coordinates": [[5.0, 43.0], [6.5, 44.0]]
      }
    }
  ]
}"#;

#[test]
fn metar_request_decodes_the_dataserver_response() {
    let request = MetarRequest::new("KFME").hours_before_now(4);
    request.check_content_type("text/xml").unwrap();

    let metars = request.decode(METAR_DATA).unwrap();
    assert_eq!(metars.len(), 2);

    let metar = &metars[0];
    assert_eq!(metar.station_id, "KFME");
    assert_eq!(metar.wind_speed_kt, Some(6));
    assert_eq!(metar.wind_gust_kt, None);
    assert_eq!(metar.flight_category, Some(FlightCategory::Vfr));
    assert_eq!(metar.metar_type, Some(MetarType::Metar));
    assert_eq!(metar.sky_condition[0].sky_cover, SkyCover::Clr);
    assert_eq!(metar.sky_condition[0].cloud_base_ft_agl, 0);
    assert!(metar
        .quality_control_flags
        .contains(&QualityControlFlag::Auto));

    assert_eq!(metars[1].sky_condition[0].sky_cover, SkyCover::Bkn);
    assert_eq!(metars[1].sky_condition[0].cloud_base_ft_agl, 4900);
}

#[test]
fn metar_decode_rejects_the_wrong_content_type() {
    let request = MetarRequest::new("KFME");
    assert!(request.check_content_type("application/json").is_err());
}

#[test]
fn taf_request_decodes_nested_forecast_periods() {
    let request = TafRequest::new(["KBWI"]);

    let tafs = request.decode(TAF_DATA).unwrap();
    assert_eq!(tafs.len(), 1);

    let taf = &tafs[0];
    assert_eq!(taf.station_id, "KBWI");
    assert_eq!(taf.forecast.len(), 3);
    assert_eq!(taf.forecast[0].change_indicator, None);
    assert_eq!(taf.forecast[1].change_indicator, Some(ChangeIndicator::Fm));
    assert_eq!(taf.forecast[2].change_indicator, Some(ChangeIndicator::Fm));

    // calm variable wind is reported, not defaulted
    assert_eq!(taf.forecast[1].wind_dir_degrees, Some(0));
    assert_eq!(taf.forecast[1].sky_condition[0].cloud_base_ft_agl, 0);
}

#[test]
fn sigmet_request_decodes_and_filters_the_header() {
    let request = SigmetRequest::new(ReportFamily::International);
    request.check_content_type("application/json").unwrap();

    let sigmets = request.decode(ISIGMET_DATA).unwrap();

    // the leading metadata feature is gone, newest valid-from first
    assert_eq!(sigmets.len(), 2);
    assert!(sigmets
        .iter()
        .all(|sigmet| sigmet.report_family() == ReportFamily::International));
    assert!(sigmets[0].text().contains("LFMM SIGMET 2"));
    assert!(sigmets[1].text().contains("LFBB SIGMET W3"));

    let SigmetProperties::International(properties) = &sigmets[1].properties else {
        panic!("expected international properties");
    };
    assert_eq!(properties.hazard, Some(Hazard::Turbulence));
    assert_eq!(properties.top_ft, Some(34_000));

    assert!(matches!(
        sigmets[0].geometry,
        Some(SigmetGeometry::LineString(_))
    ));
    assert!(matches!(
        sigmets[1].geometry,
        Some(SigmetGeometry::Polygon(_))
    ));
}

#[test]
fn no_partial_results_on_failure() {
    let truncated = &METAR_DATA[..METAR_DATA.len() / 2];
    let request = MetarRequest::new("KFME");

    assert!(matches!(
        request.decode(truncated).unwrap_err(),
        Error::MalformedDocument(_)
    ));
}
