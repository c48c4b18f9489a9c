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

#![allow(unused)]

use fir_traffic::{snapshot::Snapshot, upstream::{state_record_from_array, UpstreamResponse}};

const RESPONSE: &str = r#"{
  "time": 1735689600,
  "states": [
    ["896180", "IAW221  ", "Iraq", 1735689598, 1735689599, 44.3661, 33.2625, 10972.8, false, 231.5, 90.0, 0.0, null, 11049.0, "1000", false, 0],
    ["  4B1814", "", "Switzerland", null, 1735689590, null, null, null, true, 0.0, null, null, null, null, null, false, 0],
    ["738065", "ELY12", "Israel", 1735689595, 1735689599, 45.1, 30.5, null, false, 240.0, 120.0, 0.0, null, 9800.5, null, false, 0]
  ]
}"#;

#[test]
fn test_convert_upstream () {
    let response: UpstreamResponse = serde_json::from_str( RESPONSE).unwrap();
    let snapshot = response.into_snapshot();

    assert_eq!( snapshot.time, Some(1735689600));
    assert_eq!( snapshot.len(), 3);

    let r = &snapshot.states[0];
    assert_eq!( r.id(), Some("896180"));
    assert_eq!( r.callsign.as_deref(), Some("IAW221"));
    assert_eq!( r.position(), Some((44.3661, 33.2625)));
    assert_eq!( r.altitude(), Some(10972.8));
    assert_eq!( r.geo_altitude, Some(11049.0));
    assert_eq!( r.velocity, Some(231.5));

    let r = &snapshot.states[1];
    assert_eq!( r.id(), Some("4b1814"));
    assert!( r.callsign.is_none());
    assert!( r.position().is_none());
    assert!( r.altitude().is_none());

    let r = &snapshot.states[2];
    assert_eq!( r.altitude(), Some(9800.5)); // geo fallback
}

#[test]
fn test_no_traffic () {
    let response: UpstreamResponse = serde_json::from_str( r#"{"time": 1735689600, "states": null}"#).unwrap();
    assert!( response.into_snapshot().is_empty());

    let snapshot = Snapshot::from_json( br#"{"time": 1735689600, "states": null}"#).unwrap();
    assert!( snapshot.is_empty());
    assert!( snapshot.captured().is_some());
}

#[test]
fn test_short_array () {
    let sv: Vec<serde_json::Value> = serde_json::from_str( r#"["abc123", "TEST"]"#).unwrap();
    let r = state_record_from_array( &sv);
    assert_eq!( r.id(), Some("abc123"));
    assert!( r.latitude.is_none() && r.velocity.is_none());
}
