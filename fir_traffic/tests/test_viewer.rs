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

use std::{sync::{Arc, Mutex, atomic::{AtomicUsize, Ordering}}, time::Duration};
use tokio::{sync::mpsc, time::{sleep, timeout}};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use fir_traffic::{
    errors::{FirTrafficError, Result},
    classify::Sector,
    schedule::{AlarmState, Band, PeakWindow},
    schedule_store::{MemoryStorage, ScheduleStore},
    snapshot::{Snapshot, StateRecord},
    poller::write_snapshot,
    viewer::{FileSnapshotSource, HttpSnapshotSource, SnapshotSource, Viewer, ViewerConfig},
};

/// a source that returns queued results in order
struct StubSource {
    results: Mutex<Vec<Option<Snapshot>>>,
}

impl StubSource {
    fn new (mut results: Vec<Option<Snapshot>>)->Self {
        results.reverse();
        StubSource { results: Mutex::new(results) }
    }
}

#[async_trait]
impl SnapshotSource for StubSource {
    async fn fetch (&self)->Result<Snapshot> {
        match self.results.lock().unwrap().pop().flatten() {
            Some(snapshot) => Ok(snapshot),
            None => Err( FirTrafficError::OpFailedError("no snapshot".to_string()))
        }
    }
    fn describe (&self)->String { "stub".to_string() }
}

fn rec (id: &str, lat: f64, lon: f64, alt: f64)->StateRecord {
    StateRecord {
        icao24: Some(id.to_string()), callsign: None,
        latitude: Some(lat), longitude: Some(lon),
        baro_altitude: Some(alt), geo_altitude: None, velocity: None
    }
}

fn traffic ()->Snapshot {
    Snapshot::new( Some(1735740000), vec![
        rec("aaa", 35.0, 44.0, 9000.0),
        rec("bbb", 31.0, 45.0, 11500.0),
        rec("ccc", 39.0, 45.0, 11500.0), // outside
    ])
}

#[tokio::test]
async fn test_refresh_and_failed_fetch () {
    let source = StubSource::new( vec![ Some(traffic()), None, Some(traffic()) ]);
    let schedule = ScheduleStore::new( MemoryStorage::new()).into_shared();
    let viewer = Viewer::new( ViewerConfig::default(), source, schedule);

    let noon = Utc.with_ymd_and_hms( 2025, 1, 1, 13, 0, 0).unwrap();

    let outcome = viewer.refresh_at( noon).await;
    assert!( outcome.fetch_ok);
    assert_eq!( outcome.counts.north.lower, 1);
    assert_eq!( outcome.counts.south.upper, 1);
    assert_eq!( outcome.counts.total().all, 2);
    assert_eq!( outcome.markers.added.len(), 2);
    assert_eq!( outcome.alarm, AlarmState::Active);

    // a failed fetch shows as no traffic
    let outcome = viewer.refresh_at( noon).await;
    assert!( !outcome.fetch_ok);
    assert!( outcome.counts.is_zero());
    assert_eq!( outcome.markers.removed.len(), 2);
    {
        let state = viewer.state();
        let state = state.read().await;
        assert!( state.aircraft.is_empty());
        assert_eq!( state.counts.total().all, 0);
        assert_eq!( state.alarm, AlarmState::Active); // the schedule still applies
    }

    let outcome = viewer.refresh_at( noon).await;
    assert!( outcome.fetch_ok);
    assert_eq!( outcome.markers.added.len(), 2);
}

#[tokio::test]
async fn test_schedule_edit_updates_alarm () {
    let schedule = ScheduleStore::new( MemoryStorage::new()).into_shared();
    let viewer = Viewer::new( ViewerConfig::default(), StubSource::new( vec![]), schedule.clone());

    let morning = Utc.with_ymd_and_hms( 2025, 1, 1, 9, 0, 0).unwrap();
    assert_eq!( viewer.evaluate_alarm_at( morning).await, AlarmState::Inactive);

    let window = PeakWindow::parse( "08:30", "09:30", Sector::South, Band::AllAltitudes).unwrap();
    schedule.lock().unwrap().append( window).unwrap();

    assert_eq!( viewer.evaluate_alarm_at( morning).await, AlarmState::Active);

    viewer.update_clock( morning).await;
    let state = viewer.state();
    let state = state.read().await;
    assert_eq!( state.clock_string().as_deref(), Some("09:00:00"));
    assert_eq!( state.n_windows, 7);
    assert_eq!( state.active_windows, vec![6]);
}

/// counts fetches, every second fetch fails
struct FlakySource {
    n_fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl SnapshotSource for FlakySource {
    async fn fetch (&self)->Result<Snapshot> {
        let n = self.n_fetches.fetch_add( 1, Ordering::SeqCst);
        if n % 2 == 0 { Ok( traffic()) } else { Err( FirTrafficError::OpFailedError("upstream down".to_string())) }
    }
    fn describe (&self)->String { "flaky".to_string() }
}

#[tokio::test]
async fn test_run_loop () {
    let n_fetches = Arc::new( AtomicUsize::new(0));
    let source = FlakySource { n_fetches: n_fetches.clone() };

    let (tx,rx) = mpsc::unbounded_channel::<()>();
    let mut store = ScheduleStore::new( MemoryStorage::new());
    store.save( &[]).unwrap(); // no windows, alarm off
    store.on_change( move |_| { let _ = tx.send(()); });
    let schedule = store.into_shared();

    let config = ViewerConfig {
        refresh_interval: Duration::from_millis(300),
        clock_interval: Duration::from_millis(10),
        ..ViewerConfig::default()
    };
    let viewer = Viewer::new( config, source, schedule.clone());
    let state = viewer.state();

    let checks = async {
        // first refresh happens right away
        sleep( Duration::from_millis(100)).await;
        assert_eq!( n_fetches.load( Ordering::SeqCst), 1);
        {
            let state = state.read().await;
            assert!( state.fetch_ok);
            assert_eq!( state.counts.total().all, 2);
            assert!( state.clock.is_some());
            assert_eq!( state.alarm, AlarmState::Inactive);
        }

        // second refresh fails and shows no traffic
        sleep( Duration::from_millis(300)).await;
        assert_eq!( n_fetches.load( Ordering::SeqCst), 2);
        {
            let state = state.read().await;
            assert!( !state.fetch_ok);
            assert!( state.counts.is_zero());
            assert!( state.aircraft.is_empty());
        }

        // the loop keeps going after the failure
        sleep( Duration::from_millis(300)).await;
        assert_eq!( n_fetches.load( Ordering::SeqCst), 3);
        assert!( state.read().await.fetch_ok);

        // a schedule edit switches the alarm on before the next refresh
        let all_day = PeakWindow::parse( "00:00", "23:59", Sector::North, Band::AllAltitudes).unwrap();
        schedule.lock().unwrap().append( all_day).unwrap();
        sleep( Duration::from_millis(50)).await;
        assert_eq!( n_fetches.load( Ordering::SeqCst), 3);
        {
            let state = state.read().await;
            assert_eq!( state.alarm, AlarmState::Active);
            assert_eq!( state.active_windows, vec![0]);
        }
    };

    let (res,_) = tokio::join!( timeout( Duration::from_millis(1000), viewer.run( rx)), checks);
    assert!( res.is_err()); // run only ends when it is cancelled
}

#[tokio::test]
async fn test_file_source () {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flights.json");
    let source = FileSnapshotSource::new( &path);

    assert!( source.fetch().await.is_err()); // not there yet

    write_snapshot( &path, &traffic()).unwrap();
    assert_eq!( source.fetch().await.unwrap().len(), 3);

    // re-read on each fetch
    write_snapshot( &path, &Snapshot::empty()).unwrap();
    assert!( source.fetch().await.unwrap().is_empty());

    std::fs::write( &path, "{ garbage").unwrap();
    assert!( source.fetch().await.is_err());
}

#[tokio::test]
async fn test_http_source () {
    use axum::{routing::get, Router};

    let json = String::from_utf8( traffic().to_json().unwrap()).unwrap();
    let app = Router::new().route( "/flights.json", get( move || async move { json }));
    let listener = tokio::net::TcpListener::bind( "127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn( async move { axum::serve( listener, app).await.unwrap() });

    let source = HttpSnapshotSource::new( format!("http://{addr}/flights.json"), None).unwrap();
    let snapshot = source.fetch().await.unwrap();
    assert_eq!( snapshot, traffic());

    let missing = HttpSnapshotSource::new( format!("http://{addr}/nothing.json"), None).unwrap();
    assert!( missing.fetch().await.is_err());
}
