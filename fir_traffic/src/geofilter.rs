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

use serde::{Serialize,Deserialize};
use fir_common::BoundingBox;

use crate::snapshot::{Snapshot,StateRecord};

/// approximation of the Baghdad FIR: lat [28,37], lon [38,49] (degrees)
pub const FIR_BOUNDS: BoundingBox<f64> = BoundingBox { west: 38.0, south: 28.0, east: 49.0, north: 37.0 };

/// the region filter that is applied to each snapshot before anything gets classified. The poller already
/// requests region-limited data but we don't rely on it
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct GeoFilter {
    pub bounds: BoundingBox<f64>
}

impl Default for GeoFilter {
    fn default()->Self { GeoFilter { bounds: FIR_BOUNDS } }
}

impl GeoFilter {
    pub fn new (bounds: BoundingBox<f64>)->Self { GeoFilter { bounds } }

    /// records without a complete position are rejected
    pub fn accepts (&self, rec: &StateRecord)->bool {
        match rec.position() {
            Some((lon,lat)) => self.bounds.contains( lon, lat),
            None => false
        }
    }

    pub fn filter<'a> (&'a self, snapshot: &'a Snapshot)->impl Iterator<Item=&'a StateRecord> + 'a {
        snapshot.states.iter().filter( move |rec| self.accepts(rec))
    }
}
