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

//! the snapshot file exchanged between poller and viewer

use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize,Deserializer};
use fir_common::is_none;

use crate::errors::Result;

/// one aircraft state vector of a snapshot. All fields are optional since we get them from an external source,
/// consumers have to decide what they can do with partial records
#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
pub struct StateRecord {
    #[serde(default, skip_serializing_if="is_none")]
    pub icao24: Option<String>,

    #[serde(default, skip_serializing_if="is_none")]
    pub callsign: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>, // degrees

    #[serde(default)]
    pub longitude: Option<f64>, // degrees

    #[serde(default)]
    pub baro_altitude: Option<f64>, // meters

    #[serde(default)]
    pub geo_altitude: Option<f64>, // meters

    #[serde(default)]
    pub velocity: Option<f64>, // m/s over ground
}

impl StateRecord {
    /// barometric altitude if we have it, geometric altitude otherwise (meters)
    pub fn altitude (&self)->Option<f64> {
        self.baro_altitude.or( self.geo_altitude)
    }

    /// (longitude,latitude) in degrees, if we have both
    pub fn position (&self)->Option<(f64,f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon),Some(lat)) => Some((lon,lat)),
            _ => None
        }
    }

    pub fn id (&self)->Option<&str> { self.icao24.as_deref() }
}

/// the full set of state vectors captured at one point in time
#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if="is_none")]
    pub time: Option<i64>, // capture time in epoch seconds

    #[serde(default, deserialize_with="de_null_as_empty")]
    pub states: Vec<StateRecord>,
}

impl Snapshot {
    pub fn empty ()->Self { Snapshot { time: None, states: Vec::new() } }

    pub fn new (time: Option<i64>, states: Vec<StateRecord>)->Self { Snapshot { time, states } }

    pub fn from_json (bytes: &[u8])->Result<Self> {
        Ok( serde_json::from_slice( bytes)? )
    }

    pub fn to_json (&self)->Result<Vec<u8>> {
        Ok( serde_json::to_vec( self)? )
    }

    pub fn captured (&self)->Option<DateTime<Utc>> {
        self.time.and_then( |t| DateTime::<Utc>::from_timestamp( t, 0))
    }

    pub fn len (&self)->usize { self.states.len() }
    pub fn is_empty (&self)->bool { self.states.is_empty() }
}

// the upstream source reports `"states": null` if there is no traffic in the requested area
fn de_null_as_empty <'a,D>(deserializer: D) -> std::result::Result<Vec<StateRecord>,D::Error> where D: Deserializer<'a> {
    let opt: Option<Vec<StateRecord>> = Option::deserialize(deserializer)?;
    Ok( opt.unwrap_or_default() )
}
