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

use std::{collections::{HashMap,HashSet}, fmt, sync::Arc};
use serde::{Serialize,Serializer,ser::SerializeSeq};
use fir_common::{datetime::EpochMillis, is_none};

use crate::{classify::{Classifier,Sector}, snapshot::StateRecord};

/// the display data for an aircraft
#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct Marker {
    pub icao24: Arc<String>, // we keep that in an Arc so that we can report changes without heap allocation
    #[serde(skip_serializing_if="is_none")]
    pub callsign: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if="is_none")]
    pub altitude: Option<f64>, // meters
    #[serde(skip_serializing_if="is_none")]
    pub velocity: Option<f64>, // m/s
    pub sector: Sector,
    pub last_update: EpochMillis,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Marker( icao24: {}", self.icao24)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{cs}\"")?; }
        write!( f, ", pos: ({:.4},{:.4})", self.latitude, self.longitude)?;
        if let Some(alt) = self.altitude { write!( f, ", alt: {:.0}", alt)?; }
        if let Some(spd) = self.velocity { write!( f, ", spd: {:.1}", spd)?; }
        write!( f, ", sector: {})", self.sector)
    }
}

impl Marker {
    fn set_from (&mut self, rec: &StateRecord, lon: f64, lat: f64, sector: Sector, now: EpochMillis) {
        self.callsign = rec.callsign.clone();
        self.latitude = lat;
        self.longitude = lon;
        self.altitude = rec.altitude();
        self.velocity = rec.velocity;
        self.sector = sector;
        self.last_update = now;
    }
}

/// what changed in the last reconciliation
#[derive(Debug,Clone,Default,PartialEq)]
pub struct MarkerDiff {
    pub added: Vec<Arc<String>>,
    pub updated: Vec<Arc<String>>,
    pub removed: Vec<Arc<String>>,
}

/// the markers we currently show, keyed by icao24. Each snapshot is reconciled against the existing markers
/// (update retained, add new, drop missing) so that markers are not re-created on every refresh
#[derive(Debug,Default)]
pub struct MarkerSet {
    markers: HashMap<String,Marker>,
}

impl MarkerSet {
    pub fn new ()->Self { MarkerSet::default() }

    pub fn len (&self)->usize { self.markers.len() }
    pub fn is_empty (&self)->bool { self.markers.is_empty() }
    pub fn get (&self, icao24: &str)->Option<&Marker> { self.markers.get( icao24) }
    pub fn iter (&self)->impl Iterator<Item=&Marker> { self.markers.values() }

    /// records without id, without position or known to be below the floor don't get a marker.
    /// If a snapshot contains the same id more than once the last record wins
    pub fn reconcile<'a> (&mut self, records: impl IntoIterator<Item=&'a StateRecord>, classifier: &Classifier, now: EpochMillis)->MarkerDiff {
        let mut diff = MarkerDiff::default();
        let mut seen: HashSet<Arc<String>> = HashSet::with_capacity( self.markers.len());

        for rec in records {
            if !classifier.is_displayable( rec) { continue }
            let (Some(id), Some((lon,lat))) = (rec.id(), rec.position()) else { continue };
            let sector = classifier.sector( lat);

            if let Some(marker) = self.markers.get_mut( id) {
                marker.set_from( rec, lon, lat, sector, now);
                if seen.insert( marker.icao24.clone()) {
                    diff.updated.push( marker.icao24.clone());
                }
            } else {
                let icao24 = Arc::new( id.to_string());
                let mut marker = Marker {
                    icao24: icao24.clone(), callsign: None, latitude: lat, longitude: lon,
                    altitude: None, velocity: None, sector, last_update: now
                };
                marker.set_from( rec, lon, lat, sector, now);
                self.markers.insert( id.to_string(), marker);
                seen.insert( icao24.clone());
                diff.added.push( icao24);
            }
        }

        self.markers.retain( |_,marker| {
            if seen.contains( &marker.icao24) {
                true
            } else {
                diff.removed.push( marker.icao24.clone());
                false
            }
        });

        diff
    }

    /// drop all markers, reporting them as removed
    pub fn clear (&mut self)->MarkerDiff {
        let removed = self.markers.drain().map( |(_,m)| m.icao24).collect();
        MarkerDiff { removed, ..MarkerDiff::default() }
    }
}

/// markers are serialized as a list sorted by icao24 so that status output is stable
impl Serialize for MarkerSet {
    fn serialize<S: Serializer> (&self, serializer: S)->Result<S::Ok,S::Error> {
        let mut list: Vec<&Marker> = self.markers.values().collect();
        list.sort_by( |a,b| a.icao24.cmp( &b.icao24));

        let mut seq = serializer.serialize_seq( Some(list.len()))?;
        for m in list {
            seq.serialize_element( m)?;
        }
        seq.end()
    }
}
