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

//! the poller side: periodically retrieve state vectors for the FIR region from the upstream service and
//! (atomically) write them to the snapshot file the viewers read

use std::{path::{Path,PathBuf}, time::Duration};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tokio::time::sleep;
use tracing::{error,info};
use fir_common::{
    BoundingBox,
    datetime::{deserialize_duration, deserialize_optional_duration, serialize_duration},
    fs::set_filepath_contents_atomic,
    net::{create_client, get_json, no_cache_headers, BasicAuth}
};

use crate::{
    errors::{op_failed, Result},
    geofilter::FIR_BOUNDS,
    snapshot::Snapshot,
    upstream::UpstreamResponse,
};

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct PollerConfig {
    pub url: String, // of the upstream state vector service

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    #[serde(default="default_bounds")]
    pub bounds: BoundingBox<f64>, // region we request

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub interval: Duration, // between polls

    pub output: PathBuf, // the snapshot file we write

    #[serde(default, deserialize_with="deserialize_optional_duration", skip_serializing)]
    pub timeout: Option<Duration>,
}

fn default_bounds ()->BoundingBox<f64> { FIR_BOUNDS }

pub struct Poller {
    config: PollerConfig,
    client: Client,
}

impl Poller {
    pub fn new (config: PollerConfig)->Result<Self> {
        if config.interval.is_zero() {
            return Err( op_failed!("poll interval must not be zero"))
        }
        let client = create_client( config.timeout)?;
        Ok( Poller { config, client } )
    }

    pub fn config (&self)->&PollerConfig { &self.config }

    /// the upstream query for our bounding box
    pub fn request_url (&self)->String {
        let b = &self.config.bounds;
        let sep = if self.config.url.contains('?') { '&' } else { '?' };
        format!("{}{}lamin={}&lomin={}&lamax={}&lomax={}", self.config.url, sep, b.south, b.west, b.north, b.east)
    }

    fn auth (&self)->Option<BasicAuth> {
        self.config.username.as_ref().map( |user| BasicAuth { user: user.clone(), password: self.config.password.clone() })
    }

    pub async fn fetch_snapshot (&self)->Result<Snapshot> {
        let url = self.request_url();
        let response: UpstreamResponse = get_json( &self.client, &url, &Some(no_cache_headers()), &self.auth()).await?;
        Ok( response.into_snapshot() )
    }

    /// one fetch-and-write cycle. Returns the number of written state records. If anything fails the
    /// previously written snapshot stays as it is
    pub async fn poll_once (&self)->Result<usize> {
        let snapshot = self.fetch_snapshot().await?;
        write_snapshot( &self.config.output, &snapshot)?;
        Ok( snapshot.len() )
    }

    /// poll until the task gets aborted. Failures are logged, the next poll supersedes
    pub async fn run (&self) {
        info!("polling {} every {:?} into {:?}", self.config.url, self.config.interval, self.config.output);
        loop {
            match self.poll_once().await {
                Ok(n) => info!("wrote snapshot with {n} state vectors"),
                Err(e) => error!("poll failed: {e}")
            }
            sleep( self.config.interval).await;
        }
    }
}

pub fn write_snapshot (path: impl AsRef<Path>, snapshot: &Snapshot)->Result<()> {
    let json = snapshot.to_json()?;
    set_filepath_contents_atomic( path, &json)?;
    Ok(())
}
