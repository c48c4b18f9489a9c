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

use chrono::{TimeZone, Utc};
use fir_traffic::{
    classify::Sector,
    errors::ScheduleError,
    schedule::{active_windows, evaluate_alarm, seed_schedule, AlarmState, Band, PeakWindow, TimeOfDay, WindowSpan},
};

fn t (s: &str)->TimeOfDay { s.parse().unwrap() }

#[test]
fn test_time_of_day_parsing () {
    assert_eq!( t("00:00").minute_of_day(), 0);
    assert_eq!( t("23:59").minute_of_day(), 1439);
    assert_eq!( t("05:30").to_string(), "05:30");

    for s in ["24:00", "5:30", "05:3", "12:60", "", "noon", "05:30:00", " 05:30"] {
        assert_eq!( s.parse::<TimeOfDay>(), Err(ScheduleError::InvalidTime(s.to_string())), "accepted '{s}'");
    }
}

#[test]
fn test_daytime_window () {
    let w = PeakWindow::parse( "05:30", "07:30", Sector::North, Band::LowerBand).unwrap();
    assert!( matches!( w.span(), WindowSpan::Daytime{..}));

    assert!( !w.contains( t("05:29")));
    assert!( w.contains( t("05:30")));
    assert!( w.contains( t("06:45")));
    assert!( w.contains( t("07:30")));
    assert!( !w.contains( t("07:31")));
}

#[test]
fn test_overnight_window () {
    let w = PeakWindow::parse( "23:30", "01:30", Sector::South, Band::AllAltitudes).unwrap();
    assert!( matches!( w.span(), WindowSpan::Overnight{..}));

    assert!( !w.contains( t("23:29")));
    assert!( w.contains( t("23:30")));
    assert!( w.contains( t("23:59")));
    assert!( w.contains( t("23:45")));
    assert!( w.contains( t("00:00")));
    assert!( w.contains( t("00:15")));
    assert!( w.contains( t("01:30")));
    assert!( !w.contains( t("01:31")));
    assert!( !w.contains( t("02:00")));
    assert!( !w.contains( t("23:00")));
    assert!( !w.contains( t("12:00")));
}

#[test]
fn test_single_minute_window () {
    let w = PeakWindow::parse( "12:00", "12:00", Sector::North, Band::BothBands).unwrap();
    assert!( w.contains( t("12:00")));
    assert!( !w.contains( t("11:59")));
    assert!( !w.contains( t("12:01")));
}

#[test]
fn test_seed_schedule_alarm () {
    let windows = seed_schedule();
    assert_eq!( windows.len(), 6);

    assert_eq!( evaluate_alarm( &windows, t("13:00")), AlarmState::Active);
    assert_eq!( evaluate_alarm( &windows, t("09:00")), AlarmState::Inactive);
    assert_eq!( evaluate_alarm( &windows, t("00:45")), AlarmState::Active);
    assert_eq!( active_windows( &windows, t("06:00")), vec![0,1]);
    assert_eq!( active_windows( &windows, t("23:45")), vec![4,5]);

    let dt = Utc.with_ymd_and_hms( 2025, 3, 1, 12, 0, 30).unwrap();
    assert!( evaluate_alarm( &windows, TimeOfDay::of( &dt)).is_active());

    assert_eq!( evaluate_alarm( &[], t("13:00")), AlarmState::Inactive);
}

#[test]
fn test_window_serde () {
    let w = PeakWindow::parse( "23:30", "01:30", Sector::North, Band::UpperBand).unwrap();
    let json = serde_json::to_string( &w).unwrap();
    assert_eq!( json, r#"{"start":"23:30","end":"01:30","sector":"North","band":"upper-band"}"#);

    let w2: PeakWindow = serde_json::from_str( &json).unwrap();
    assert_eq!( w, w2);

    let bad = r#"{"start":"7:30","end":"09:00","sector":"North","band":"upper-band"}"#;
    assert!( serde_json::from_str::<PeakWindow>( bad).is_err());

    assert_eq!( serde_json::to_string( &AlarmState::Active).unwrap(), "\"red\"");
}

#[test]
fn test_window_from_strs () {
    let w = PeakWindow::from_strs( "12:00", "14:00", "south", "both-bands").unwrap();
    assert_eq!( w.sector, Sector::South);
    assert_eq!( w.to_string(), "12:00-14:00 South both-bands");

    assert!( PeakWindow::from_strs( "12:00", "14:00", "east", "both-bands").is_err());
    assert!( PeakWindow::from_strs( "12:00", "14:00", "North", "mid-band").is_err());
    assert!( PeakWindow::from_strs( "12", "14:00", "North", "both-bands").is_err());
}
