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

//! read-only status and schedule editing over http

use std::net::SocketAddr;
use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, delete},
    Json, Router,
};
use serde_json::json;
use tracing::info;

use crate::{
    errors::{FirTrafficError, Result, ScheduleError},
    schedule::PeakWindow,
    schedule_store::{with_store, SharedScheduleStore},
    viewer::SharedViewState,
};

#[derive(Clone)]
pub struct StatusServerState {
    pub view: SharedViewState,
    pub schedule: SharedScheduleStore,
}

/// error responses of the api
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response (self)->Response {
        let (status,msg) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json( json!({ "error": msg }))).into_response()
    }
}

impl From<FirTrafficError> for ApiError {
    fn from (e: FirTrafficError)->Self {
        match e {
            FirTrafficError::ScheduleError( se @ ScheduleError::InvalidTime(_)) => ApiError::BadRequest( se.to_string()),
            FirTrafficError::ScheduleError( se @ ScheduleError::IndexOutOfRange{..}) => ApiError::NotFound( se.to_string()),
            other => ApiError::Internal( other.to_string())
        }
    }
}

type ApiResult<T> = std::result::Result<T,ApiError>;

/// the routes of the status server
pub fn router (state: StatusServerState) -> Router<()> {
    Router::new()
        .route("/api/status", get(self::get::status))
        .route("/api/schedule", get(self::get::schedule).put(self::put::schedule).post(self::post::window))
        .route("/api/schedule/reset", post(self::post::reset))
        .route("/api/schedule/{index}", delete(self::delete::window))
        .with_state(state)
}

pub async fn serve (addr: SocketAddr, router: Router<()>)->Result<()> {
    let listener = tokio::net::TcpListener::bind( addr).await?;
    info!("serving http://{addr}/api/status");
    axum::serve( listener, router).await?;
    Ok(())
}

// user input is parsed here (instead of using the Json extractor) so that all malformed windows end up as 400
fn parse_body<T> (body: &str)->ApiResult<T> where T: for<'a> serde::Deserialize<'a> {
    serde_json::from_str( body).map_err( |e| ApiError::BadRequest( e.to_string()))
}

mod get {
    use super::*;

    pub async fn status (State(state): State<StatusServerState>) -> ApiResult<Json<serde_json::Value>> {
        let view = state.view.read().await;
        let value = serde_json::to_value( &*view).map_err( |e| ApiError::Internal( e.to_string()))?;
        Ok( Json(value) )
    }

    pub async fn schedule (State(state): State<StatusServerState>) -> ApiResult<Json<Vec<PeakWindow>>> {
        Ok( Json( with_store( &state.schedule, |store| store.load())?) )
    }
}

mod put {
    use super::*;

    /// replace the whole schedule
    pub async fn schedule (State(state): State<StatusServerState>, body: String) -> ApiResult<Json<Vec<PeakWindow>>> {
        let windows: Vec<PeakWindow> = parse_body( &body)?;
        with_store( &state.schedule, |store| store.save( &windows))?;
        Ok( Json(windows) )
    }
}

mod post {
    use super::*;

    /// append one window
    pub async fn window (State(state): State<StatusServerState>, body: String) -> ApiResult<(StatusCode,Json<Vec<PeakWindow>>)> {
        let window: PeakWindow = parse_body( &body)?;
        let windows = with_store( &state.schedule, |store| store.append( window))?;
        Ok( (StatusCode::CREATED, Json(windows)) )
    }

    pub async fn reset (State(state): State<StatusServerState>) -> ApiResult<Json<Vec<PeakWindow>>> {
        Ok( Json( with_store( &state.schedule, |store| store.reset())?) )
    }
}

mod delete {
    use super::*;

    /// remove the window at the given (0-based) position
    pub async fn window (State(state): State<StatusServerState>, AxumPath(index): AxumPath<usize>) -> ApiResult<Json<Vec<PeakWindow>>> {
        let windows = with_store( &state.schedule, |store| {
            store.remove( index)?;
            store.load()
        })?;
        Ok( Json(windows) )
    }
}
