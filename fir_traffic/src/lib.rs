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

//! Baghdad FIR traffic counting and peak window alarm.
//!
//! The `fir_poller` binary periodically writes snapshots of the upstream state vectors for the FIR region into a
//! file. Any number of `fir_viewer` processes read that file, classify the aircraft by sector and altitude band,
//! keep a set of map markers and raise an alarm during configured peak windows.

pub mod errors;
pub mod snapshot;
pub mod upstream;
pub mod geofilter;
pub mod classify;
pub mod counts;
pub mod schedule;
pub mod schedule_store;
pub mod markers;
pub mod viewer;
pub mod poller;
pub mod server;

pub use errors::{FirTrafficError, Result, ScheduleError};
pub use snapshot::{Snapshot, StateRecord};
pub use classify::{Classifier, Sector};
pub use counts::{count_traffic, TrafficCounts};
pub use schedule::{PeakWindow, TimeOfDay, Band, AlarmState};
pub use schedule_store::{ScheduleStore, FileStorage, MemoryStorage, SharedScheduleStore};
