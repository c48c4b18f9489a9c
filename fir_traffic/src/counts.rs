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

use serde::{Serialize,Deserialize,Serializer,ser::SerializeStruct};

use crate::{classify::{Classification,Classifier,Sector}, snapshot::StateRecord};

/// counts for one sector (or the total of both)
#[derive(Serialize,Deserialize,Debug,Clone,Copy,Default,PartialEq,Eq)]
pub struct BandCounts {
    pub lower: usize,  // lower band
    pub upper: usize,  // upper band
    pub all: usize,    // everything at or above the floor
}

impl BandCounts {
    fn add (&mut self, c: &Classification) {
        self.all += 1;
        if c.in_lower_band { self.lower += 1 }
        if c.in_upper_band { self.upper += 1 }
    }

    pub fn sum (&self, other: &BandCounts)->BandCounts {
        BandCounts { lower: self.lower + other.lower, upper: self.upper + other.upper, all: self.all + other.all }
    }
}

/// the six counters we display. Totals are derived on demand and only show up in the serialized form
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq)]
pub struct TrafficCounts {
    pub north: BandCounts,
    pub south: BandCounts,
}

impl TrafficCounts {
    pub fn zero ()->Self { TrafficCounts::default() }

    pub fn add (&mut self, c: &Classification) {
        match c.sector {
            Sector::North => self.north.add(c),
            Sector::South => self.south.add(c),
        }
    }

    pub fn sector (&self, sector: Sector)->&BandCounts {
        match sector {
            Sector::North => &self.north,
            Sector::South => &self.south,
        }
    }

    pub fn total (&self)->BandCounts { self.north.sum( &self.south) }

    pub fn is_zero (&self)->bool { *self == TrafficCounts::zero() }
}

impl Serialize for TrafficCounts {
    fn serialize<S: Serializer> (&self, serializer: S)->Result<S::Ok,S::Error> {
        let mut state = serializer.serialize_struct( "TrafficCounts", 3)?;
        state.serialize_field( "north", &self.north)?;
        state.serialize_field( "south", &self.south)?;
        state.serialize_field( "total", &self.total())?;
        state.end()
    }
}

/// single pass over the (already geo filtered) records
pub fn count_traffic<'a> (records: impl IntoIterator<Item=&'a StateRecord>, classifier: &Classifier)->TrafficCounts {
    let mut counts = TrafficCounts::zero();
    for rec in records {
        if let Some(c) = classifier.classify( rec) {
            counts.add( &c);
        }
    }
    counts
}
