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

use axum::{body::{to_bytes, Body}, Router};
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot
use fir_traffic::{
    schedule::seed_schedule,
    schedule_store::{MemoryStorage, ScheduleStore, SharedScheduleStore},
    server::{router, StatusServerState},
    viewer::SharedViewState,
};

fn app ()->(Router, SharedScheduleStore) {
    let schedule = ScheduleStore::new( MemoryStorage::new()).into_shared();
    let view = SharedViewState::default();
    (router( StatusServerState { view, schedule: schedule.clone() }), schedule)
}

async fn request (app: &Router, method: &str, uri: &str, body: Option<&str>)->(StatusCode, Value) {
    let body = body.map( |s| Body::from( s.to_string())).unwrap_or_else( Body::empty);
    let req = Request::builder().method( method).uri( uri).body( body).unwrap();
    let response = app.clone().oneshot( req).await.unwrap();

    let status = response.status();
    let bytes = to_bytes( response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice( &bytes).unwrap_or( Value::Null))
}

#[tokio::test]
async fn test_status () {
    let (app,_) = app();
    let (status, value) = request( &app, "GET", "/api/status", None).await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( value["alarm"], "green");
    assert_eq!( value["counts"]["north"]["all"], 0);
    assert_eq!( value["counts"]["total"]["all"], 0);
    assert!( value.get("totals").is_none());
    assert!( value["aircraft"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_edits () {
    let (app,schedule) = app();

    let (status, value) = request( &app, "GET", "/api/schedule", None).await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( value.as_array().unwrap().len(), seed_schedule().len());

    let window = json!({"start":"08:00","end":"09:00","sector":"South","band":"lower-band"}).to_string();
    let (status, value) = request( &app, "POST", "/api/schedule", Some(&window)).await;
    assert_eq!( status, StatusCode::CREATED);
    assert_eq!( value.as_array().unwrap().len(), 7);
    assert_eq!( value[6]["start"], "08:00");

    let (status, value) = request( &app, "DELETE", "/api/schedule/0", None).await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( value.as_array().unwrap().len(), 6);

    let (status, value) = request( &app, "DELETE", "/api/schedule/6", None).await;
    assert_eq!( status, StatusCode::NOT_FOUND);
    assert!( value["error"].is_string());

    let replacement = json!([{"start":"23:00","end":"02:00","sector":"North","band":"all-altitudes"}]).to_string();
    let (status, _) = request( &app, "PUT", "/api/schedule", Some(&replacement)).await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( schedule.lock().unwrap().load().unwrap().len(), 1);

    let (status, value) = request( &app, "POST", "/api/schedule/reset", None).await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( value.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_malformed_input () {
    let (app,schedule) = app();

    let bad_time = json!({"start":"8:00","end":"09:00","sector":"South","band":"lower-band"}).to_string();
    let (status, value) = request( &app, "POST", "/api/schedule", Some(&bad_time)).await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert!( value["error"].is_string());

    let (status, _) = request( &app, "PUT", "/api/schedule", Some("not json")).await;
    assert_eq!( status, StatusCode::BAD_REQUEST);

    let (status, _) = request( &app, "DELETE", "/api/schedule/first", None).await;
    assert_eq!( status, StatusCode::BAD_REQUEST);

    // nothing got changed
    assert_eq!( schedule.lock().unwrap().load().unwrap(), seed_schedule());
}
