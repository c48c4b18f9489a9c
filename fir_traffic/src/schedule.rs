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

//! peak window schedule and alarm evaluation

use std::{fmt, str::FromStr};
use chrono::{DateTime,Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize,Deserialize};
use fir_common::datetime::minute_of_day;

use crate::{classify::Sector, errors::{parse_error, ScheduleError}};

lazy_static! {
    // strict 24h "HH:MM" - two digit hours 00..23, two digit minutes 00..59
    static ref HH_MM_RE: Regex = Regex::new( r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap();
}

/// a UTC time of day with minute resolution, stored as minute of day in `[0,1440)`
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_hm (hour: u32, minute: u32)->Result<Self,ScheduleError> {
        if hour < 24 && minute < 60 {
            Ok( TimeOfDay( (hour * 60 + minute) as u16) )
        } else {
            Err( ScheduleError::InvalidTime( format!("{hour}:{minute}")) )
        }
    }

    pub fn of (dt: &DateTime<Utc>)->Self {
        TimeOfDay( minute_of_day(dt) as u16)
    }

    pub fn minute_of_day (&self)->u32 { self.0 as u32 }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str (s: &str)->Result<Self,ScheduleError> {
        let cap = HH_MM_RE.captures( s).ok_or_else( || ScheduleError::InvalidTime( s.to_string()))?;
        let hour: u32 = cap[1].parse().map_err( |_| ScheduleError::InvalidTime( s.to_string()))?;
        let minute: u32 = cap[2].parse().map_err( |_| ScheduleError::InvalidTime( s.to_string()))?;
        TimeOfDay::from_hm( hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// the altitude band a peak window refers to. Descriptive only, the alarm does not look at it
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Hash)]
#[serde(rename_all="kebab-case")]
pub enum Band { LowerBand, UpperBand, BothBands, AllAltitudes }

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Band::LowerBand => "lower-band",
            Band::UpperBand => "upper-band",
            Band::BothBands => "both-bands",
            Band::AllAltitudes => "all-altitudes",
        };
        write!( f, "{s}")
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str (s: &str)->Result<Self,String> {
        match s {
            "lower-band" => Ok(Band::LowerBand),
            "upper-band" => Ok(Band::UpperBand),
            "both-bands" => Ok(Band::BothBands),
            "all-altitudes" => Ok(Band::AllAltitudes),
            _ => Err( format!("unknown band '{s}'"))
        }
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str (s: &str)->Result<Self,String> {
        match s {
            "North" | "north" => Ok(Sector::North),
            "South" | "south" => Ok(Sector::South),
            _ => Err( format!("unknown sector '{s}'"))
        }
    }
}

/// the two ways a window can lie on the 24h clock. Kept as separate cases so that the boundaries of each can be
/// checked directly
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum WindowSpan {
    /// `start <= end`, both ends inclusive. `start == end` is a single minute
    Daytime { start: u32, end: u32 },

    /// `start > end`, the window crosses midnight
    Overnight { start: u32, end: u32 },
}

impl WindowSpan {
    pub fn new (start: TimeOfDay, end: TimeOfDay)->Self {
        let (start,end) = (start.minute_of_day(), end.minute_of_day());
        if start <= end {
            WindowSpan::Daytime { start, end }
        } else {
            WindowSpan::Overnight { start, end }
        }
    }

    pub fn contains (&self, minute: u32)->bool {
        match *self {
            WindowSpan::Daytime { start, end } => minute >= start && minute <= end,
            WindowSpan::Overnight { start, end } => minute >= start || minute <= end,
        }
    }
}

/// the serialized (and user edited) form of a window. Times are validated when converting into a [`PeakWindow`]
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct WindowSpec {
    pub start: String,
    pub end: String,
    pub sector: Sector,
    pub band: Band,
}

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
#[serde(try_from="WindowSpec", into="WindowSpec")]
pub struct PeakWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub sector: Sector,
    pub band: Band,
}

impl PeakWindow {
    pub fn new (start: TimeOfDay, end: TimeOfDay, sector: Sector, band: Band)->Self {
        PeakWindow { start, end, sector, band }
    }

    /// this is the input boundary for user provided times - anything that is not a strict "HH:MM" is rejected
    pub fn parse (start: &str, end: &str, sector: Sector, band: Band)->Result<Self,ScheduleError> {
        Ok( PeakWindow { start: start.parse()?, end: end.parse()?, sector, band } )
    }

    /// all fields as user provided strings (e.g. from command line arguments)
    pub fn from_strs (start: &str, end: &str, sector: &str, band: &str)->crate::errors::Result<Self> {
        let sector: Sector = sector.parse().map_err( |e| parse_error!("{}", e))?;
        let band: Band = band.parse().map_err( |e| parse_error!("{}", e))?;
        Ok( PeakWindow::parse( start, end, sector, band)? )
    }

    pub fn span (&self)->WindowSpan { WindowSpan::new( self.start, self.end) }

    pub fn contains (&self, t: TimeOfDay)->bool {
        self.span().contains( t.minute_of_day())
    }
}

impl fmt::Display for PeakWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}-{} {} {}", self.start, self.end, self.sector, self.band)
    }
}

impl TryFrom<WindowSpec> for PeakWindow {
    type Error = ScheduleError;

    fn try_from (spec: WindowSpec)->Result<Self,ScheduleError> {
        PeakWindow::parse( spec.start.as_str(), spec.end.as_str(), spec.sector, spec.band)
    }
}

impl From<PeakWindow> for WindowSpec {
    fn from (w: PeakWindow)->Self {
        WindowSpec { start: w.start.to_string(), end: w.end.to_string(), sector: w.sector, band: w.band }
    }
}

/// the built-in example schedule we seed if there is no stored one yet. This is a placeholder until the
/// operational peak hours are confirmed
pub fn seed_schedule ()->Vec<PeakWindow> {
    use Sector::*;
    use Band::*;

    let w = |start: (u32,u32), end: (u32,u32), sector: Sector, band: Band| -> Option<PeakWindow> {
        Some( PeakWindow::new( TimeOfDay::from_hm( start.0, start.1).ok()?, TimeOfDay::from_hm( end.0, end.1).ok()?, sector, band))
    };

    [
        w( (5,30), (7,30), North, LowerBand),
        w( (5,30), (7,30), South, LowerBand),
        w( (12,0), (14,0), North, BothBands),
        w( (12,0), (14,0), South, BothBands),
        w( (23,30), (1,30), North, UpperBand),
        w( (23,30), (1,30), South, AllAltitudes),
    ].into_iter().flatten().collect()
}

/* #region alarm *******************************************************************************************/

/// the alarm indicator - serialized as the colors we show
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,Default)]
pub enum AlarmState {
    #[serde(rename="red")] Active,
    #[default]
    #[serde(rename="green")] Inactive,
}

impl AlarmState {
    pub fn is_active (&self)->bool { *self == AlarmState::Active }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmState::Active => write!( f, "red"),
            AlarmState::Inactive => write!( f, "green"),
        }
    }
}

/// positions of all windows that contain the given time
pub fn active_windows (windows: &[PeakWindow], t: TimeOfDay)->Vec<usize> {
    windows.iter().enumerate()
        .filter( |(_,w)| w.contains(t))
        .map( |(i,_)| i)
        .collect()
}

/// the alarm is on if any window contains the current time. Sector and band of the windows do not matter,
/// neither do live counts
pub fn evaluate_alarm (windows: &[PeakWindow], t: TimeOfDay)->AlarmState {
    if windows.iter().any( |w| w.contains(t)) { AlarmState::Active } else { AlarmState::Inactive }
}

/* #endregion alarm */
