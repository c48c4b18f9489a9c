/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! conversion of positional upstream state vector arrays into snapshot records. The upstream service sends
//! each state vector as a JSON array with a fixed field order:
//! `[icao24, callsign, origin_country, time_position, last_contact, longitude, latitude, baro_altitude,
//!   on_ground, velocity, true_track, vertical_rate, sensors, geo_altitude, squawk, spi, position_source, ..]`

use serde::{Serialize,Deserialize};
use serde_json::Value;

use crate::snapshot::{Snapshot,StateRecord};

const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
const BARO_ALTITUDE: usize = 7;
const VELOCITY: usize = 9;
const GEO_ALTITUDE: usize = 13;

#[derive(Serialize,Deserialize,Debug,Clone,Default)]
pub struct UpstreamResponse {
    #[serde(default)]
    pub time: Option<i64>,

    #[serde(default)]
    pub states: Option<Vec<Vec<Value>>>,
}

impl UpstreamResponse {
    pub fn into_snapshot (self)->Snapshot {
        let states = self.states.unwrap_or_default().iter()
            .map( |sv| state_record_from_array( sv.as_slice()))
            .collect();
        Snapshot::new( self.time, states)
    }
}

/// note that missing or mistyped array elements just result in `None` fields
pub fn state_record_from_array (sv: &[Value])->StateRecord {
    StateRecord {
        icao24: str_at( sv, ICAO24).map( |s| s.trim().to_lowercase()).filter( |s| !s.is_empty()),
        callsign: str_at( sv, CALLSIGN).map( |s| s.trim().to_string()).filter( |s| !s.is_empty()),
        latitude: f64_at( sv, LATITUDE),
        longitude: f64_at( sv, LONGITUDE),
        baro_altitude: f64_at( sv, BARO_ALTITUDE),
        geo_altitude: f64_at( sv, GEO_ALTITUDE),
        velocity: f64_at( sv, VELOCITY),
    }
}

fn str_at<'a> (sv: &'a [Value], idx: usize)->Option<&'a str> {
    sv.get(idx).and_then( |v| v.as_str())
}

fn f64_at (sv: &[Value], idx: usize)->Option<f64> {
    sv.get(idx).and_then( |v| v.as_f64())
}
