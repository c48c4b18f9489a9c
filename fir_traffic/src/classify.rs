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

//! altitude band and sector classification of state records

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::si::f64::Length;
use fir_common::uom::{flight_level,meters};

use crate::snapshot::StateRecord;

/// latitude that separates the North and the South sector (degrees)
pub const DEFAULT_REFERENCE_LATITUDE: f64 = 33.0;

pub const FLOOR_FL: f64 = 240.0;
pub const LOWER_BAND_FL: (f64,f64) = (240.0, 350.0);
pub const UPPER_BAND_FL: (f64,f64) = (360.0, 460.0);

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Sector { North, South }

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sector::North => write!(f, "North"),
            Sector::South => write!(f, "South"),
        }
    }
}

/// inclusive altitude band
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct AltitudeBand {
    pub bottom: Length,
    pub top: Length,
}

impl AltitudeBand {
    pub fn from_flight_levels (bottom: f64, top: f64)->Self {
        AltitudeBand { bottom: flight_level(bottom), top: flight_level(top) }
    }

    pub fn contains (&self, alt: Length)->bool {
        alt >= self.bottom && alt <= self.top
    }
}

/// what we know about a record that counts
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Classification {
    pub sector: Sector,
    pub altitude: Length,
    pub in_lower_band: bool,
    pub in_upper_band: bool,
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Classifier {
    pub reference_latitude: f64,
    pub floor: Length,
    pub lower_band: AltitudeBand,
    pub upper_band: AltitudeBand,
}

impl Default for Classifier {
    fn default()->Self { Classifier::new( DEFAULT_REFERENCE_LATITUDE) }
}

impl Classifier {
    pub fn new (reference_latitude: f64)->Self {
        Classifier {
            reference_latitude,
            floor: flight_level( FLOOR_FL),
            lower_band: AltitudeBand::from_flight_levels( LOWER_BAND_FL.0, LOWER_BAND_FL.1),
            upper_band: AltitudeBand::from_flight_levels( UPPER_BAND_FL.0, UPPER_BAND_FL.1),
        }
    }

    /// strictly north of the reference latitude is North, everything else South
    pub fn sector (&self, latitude: f64)->Sector {
        if latitude > self.reference_latitude { Sector::North } else { Sector::South }
    }

    pub fn altitude (&self, rec: &StateRecord)->Option<Length> {
        rec.altitude().map( meters)
    }

    pub fn is_above_floor (&self, alt: Length)->bool {
        alt >= self.floor
    }

    /// records with a known altitude below the floor are not shown at all. Records without altitude are
    /// shown (if they have a position) but never counted
    pub fn is_displayable (&self, rec: &StateRecord)->bool {
        rec.position().is_some() && self.altitude(rec).map_or( true, |alt| self.is_above_floor(alt))
    }

    /// `None` if the record does not count: no latitude, no altitude or altitude below floor.
    /// Band membership is determined independently for both bands
    pub fn classify (&self, rec: &StateRecord)->Option<Classification> {
        let latitude = rec.latitude?;
        let altitude = self.altitude( rec)?;

        if !self.is_above_floor( altitude) { return None }

        Some( Classification {
            sector: self.sector( latitude),
            altitude,
            in_lower_band: self.lower_band.contains( altitude),
            in_upper_band: self.upper_band.contains( altitude),
        })
    }
}
