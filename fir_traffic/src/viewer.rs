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

//! the viewer side: periodically fetch the latest snapshot, count and display the traffic and evaluate the
//! peak schedule

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use async_trait::async_trait;
use chrono::{DateTime,Utc};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tokio::{sync::{mpsc::UnboundedReceiver, RwLock}, time::{interval, MissedTickBehavior}};
use tracing::{debug,info,warn};
use fir_common::{
    datetime::{deserialize_duration, deserialize_optional_duration, secs, ser_short_rfc3339_option, utc_clock_string, utc_now, EpochMillis},
    fs::filepath_contents,
    is_none,
    net::{cache_busting_url, create_client, get_json, no_cache_headers}
};

use crate::{
    classify::{Classifier, DEFAULT_REFERENCE_LATITUDE},
    counts::{count_traffic, TrafficCounts},
    errors::Result,
    geofilter::GeoFilter,
    markers::{MarkerDiff, MarkerSet},
    schedule::{active_windows, evaluate_alarm, AlarmState, PeakWindow, TimeOfDay},
    schedule_store::{with_store, SharedScheduleStore},
    snapshot::Snapshot,
};

/* #region config ***************************************************************************************/

/// where the viewer gets its snapshots from
#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
pub enum SnapshotLocation {
    Url(String),
    File(PathBuf),
}

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct ViewerConfig {
    pub snapshot: SnapshotLocation,

    #[serde(deserialize_with="deserialize_duration", serialize_with="fir_common::datetime::serialize_duration")]
    pub refresh_interval: Duration, // how often we fetch a new snapshot

    #[serde(deserialize_with="deserialize_duration", serialize_with="fir_common::datetime::serialize_duration")]
    pub clock_interval: Duration, // how often we update the displayed clock

    pub schedule_dir: PathBuf, // where the peak schedule is stored

    #[serde(default)]
    pub server_addr: Option<SocketAddr>, // status server, none if we only log

    #[serde(default="default_reference_latitude")]
    pub reference_latitude: f64, // North/South sector boundary

    #[serde(default, deserialize_with="deserialize_optional_duration", skip_serializing)]
    pub timeout: Option<Duration>, // for http snapshot requests
}

fn default_reference_latitude ()->f64 { DEFAULT_REFERENCE_LATITUDE }

impl Default for ViewerConfig {
    fn default ()->Self {
        ViewerConfig {
            snapshot: SnapshotLocation::File( PathBuf::from("data/flights.json")),
            refresh_interval: secs(30),
            clock_interval: secs(1),
            schedule_dir: PathBuf::from("local"),
            server_addr: None,
            reference_latitude: DEFAULT_REFERENCE_LATITUDE,
            timeout: None,
        }
    }
}

/* #endregion config */

/* #region snapshot sources *****************************************************************************/

/// abstraction of where snapshots come from. Each fetch has to return the latest snapshot, never a cached one
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch (&self)->Result<Snapshot>;
    fn describe (&self)->String;
}

/// snapshot file served by a web server. Requests bypass caches
pub struct HttpSnapshotSource {
    client: Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn new (url: impl ToString, timeout: Option<Duration>)->Result<Self> {
        Ok( HttpSnapshotSource { client: create_client( timeout)?, url: url.to_string() } )
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch (&self)->Result<Snapshot> {
        let url = cache_busting_url( &self.url);
        let snapshot: Snapshot = get_json( &self.client, &url, &Some(no_cache_headers()), &None).await?;
        Ok(snapshot)
    }

    fn describe (&self)->String { self.url.clone() }
}

/// snapshot file on the local file system, re-read on each fetch
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new (path: impl Into<PathBuf>)->Self { FileSnapshotSource { path: path.into() } }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch (&self)->Result<Snapshot> {
        let bytes = filepath_contents( &self.path)?;
        Snapshot::from_json( &bytes)
    }

    fn describe (&self)->String { self.path.display().to_string() }
}

pub fn create_snapshot_source (config: &ViewerConfig)->Result<Box<dyn SnapshotSource>> {
    match &config.snapshot {
        SnapshotLocation::Url(url) => Ok( Box::new( HttpSnapshotSource::new( url, config.timeout)?) ),
        SnapshotLocation::File(path) => Ok( Box::new( FileSnapshotSource::new( path)) ),
    }
}

#[async_trait]
impl SnapshotSource for Box<dyn SnapshotSource> {
    async fn fetch (&self)->Result<Snapshot> { self.as_ref().fetch().await }
    fn describe (&self)->String { self.as_ref().describe() }
}

/* #endregion snapshot sources */

/* #region view state ***********************************************************************************/

/// everything that is displayed
#[derive(Serialize,Debug,Default)]
pub struct ViewState {
    #[serde(serialize_with="ser_short_rfc3339_option")]
    pub clock: Option<DateTime<Utc>>,

    #[serde(serialize_with="ser_short_rfc3339_option")]
    pub last_refresh: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if="is_none")]
    pub snapshot_time: Option<i64>,

    pub fetch_ok: bool,
    pub counts: TrafficCounts, // serialized with derived totals

    pub alarm: AlarmState,
    pub active_windows: Vec<usize>,
    pub n_windows: usize,

    pub aircraft: MarkerSet,
}

impl ViewState {
    pub fn new ()->Self { ViewState::default() }

    pub fn clock_string (&self)->Option<String> { self.clock.as_ref().map( utc_clock_string) }

    /// apply a fetched snapshot (or `None` if the fetch failed, which shows as no traffic)
    pub fn apply_snapshot (&mut self, snapshot: Option<&Snapshot>, geo_filter: &GeoFilter, classifier: &Classifier, now: DateTime<Utc>)->MarkerDiff {
        self.last_refresh = Some(now);
        self.fetch_ok = snapshot.is_some();

        match snapshot {
            Some(snapshot) => {
                self.snapshot_time = snapshot.time;
                self.counts = count_traffic( geo_filter.filter( snapshot), classifier);
                self.aircraft.reconcile( geo_filter.filter( snapshot), classifier, EpochMillis::from(now))
            }
            None => {
                self.snapshot_time = None;
                self.counts = TrafficCounts::zero();
                self.aircraft.clear()
            }
        }
    }

    pub fn apply_schedule (&mut self, windows: &[PeakWindow], now: DateTime<Utc>) {
        let t = TimeOfDay::of( &now);
        self.active_windows = active_windows( windows, t);
        self.n_windows = windows.len();
        self.alarm = evaluate_alarm( windows, t);
    }
}

pub type SharedViewState = Arc<RwLock<ViewState>>;

/* #endregion view state */

/// the refresh loop driver
pub struct Viewer<S: SnapshotSource> {
    config: ViewerConfig,
    source: S,
    classifier: Classifier,
    geo_filter: GeoFilter,
    schedule: SharedScheduleStore,
    state: SharedViewState,
}

/// what a refresh tick did, mostly for logging and tests
#[derive(Debug,Clone,PartialEq)]
pub struct RefreshOutcome {
    pub fetch_ok: bool,
    pub counts: TrafficCounts,
    pub alarm: AlarmState,
    pub markers: MarkerDiff,
}

impl<S: SnapshotSource> Viewer<S> {
    pub fn new (config: ViewerConfig, source: S, schedule: SharedScheduleStore)->Self {
        let classifier = Classifier::new( config.reference_latitude);
        let geo_filter = GeoFilter::default();
        let state = Arc::new( RwLock::new( ViewState::new()));
        Viewer { config, source, classifier, geo_filter, schedule, state }
    }

    pub fn state (&self)->SharedViewState { self.state.clone() }
    pub fn schedule (&self)->SharedScheduleStore { self.schedule.clone() }
    pub fn classifier (&self)->&Classifier { &self.classifier }

    /// current schedule, empty if we can't read it
    fn current_schedule (&self)->Vec<PeakWindow> {
        match with_store( &self.schedule, |store| store.load()) {
            Ok(windows) => windows,
            Err(e) => {
                warn!("failed to load schedule: {e}");
                Vec::new()
            }
        }
    }

    /// one refresh tick: fetch -> filter -> classify/count -> markers -> alarm.
    /// Fetch errors are not propagated, they just result in an empty display until the next tick
    pub async fn refresh_at (&self, now: DateTime<Utc>)->RefreshOutcome {
        let snapshot = match self.source.fetch().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("failed to fetch snapshot from {}: {e}", self.source.describe());
                None
            }
        };
        let windows = self.current_schedule();

        let mut state = self.state.write().await;
        let markers = state.apply_snapshot( snapshot.as_ref(), &self.geo_filter, &self.classifier, now);
        state.apply_schedule( &windows, now);

        let outcome = RefreshOutcome { fetch_ok: state.fetch_ok, counts: state.counts, alarm: state.alarm, markers };
        let total = state.counts.total();
        info!("traffic N: {:?} S: {:?} total: {:?}, alarm: {}, {} aircraft (+{} -{})",
              state.counts.north, state.counts.south, total, state.alarm, state.aircraft.len(),
              outcome.markers.added.len(), outcome.markers.removed.len());

        outcome
    }

    /// re-evaluate the alarm without fetching (e.g. after the schedule was edited)
    pub async fn evaluate_alarm_at (&self, now: DateTime<Utc>)->AlarmState {
        let windows = self.current_schedule();
        let mut state = self.state.write().await;
        let last = state.alarm;
        state.apply_schedule( &windows, now);
        if state.alarm != last {
            info!("alarm changed to {}", state.alarm);
        }
        state.alarm
    }

    pub async fn update_clock (&self, now: DateTime<Utc>) {
        let mut state = self.state.write().await;
        state.clock = Some(now);
    }

    /// run the refresh and clock ticks until the task is aborted. The first refresh happens immediately.
    /// Schedule change notifications trigger an alarm re-evaluation
    pub async fn run (&self, mut schedule_changes: UnboundedReceiver<()>) {
        let mut refresh_timer = interval( self.config.refresh_interval);
        refresh_timer.set_missed_tick_behavior( MissedTickBehavior::Delay);
        let mut clock_timer = interval( self.config.clock_interval);
        clock_timer.set_missed_tick_behavior( MissedTickBehavior::Skip);

        info!("viewer started, reading snapshots from {} every {:?}", self.source.describe(), self.config.refresh_interval);

        loop {
            tokio::select! {
                _ = refresh_timer.tick() => {
                    self.refresh_at( utc_now()).await;
                }
                _ = clock_timer.tick() => {
                    self.update_clock( utc_now()).await;
                }
                Some(_) = schedule_changes.recv() => {
                    debug!("schedule changed");
                    self.evaluate_alarm_at( utc_now()).await;
                }
            }
        }
    }
}
