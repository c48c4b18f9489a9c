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

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info,error};
use fir_common::{check_cli, config::load_config_path, define_cli, trace::init_tracing};
use fir_traffic::{
    schedule_store::{FileStorage, ScheduleStore},
    server::{self, StatusServerState},
    viewer::{create_snapshot_source, Viewer, ViewerConfig},
};

define_cli! { ARGS [about="Baghdad FIR traffic viewer"] =
    config: String [help="pathname of viewer config", long, default_value="configs/viewer.ron"]
}

#[tokio::main(flavor="current_thread")]
async fn main() -> Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config: ViewerConfig = load_config_path( &ARGS.config)?;

    // schedule edits (from the status server) trigger an alarm re-evaluation in the viewer loop
    let (tx,rx) = mpsc::unbounded_channel::<()>();
    let mut store = ScheduleStore::new( FileStorage::new( &config.schedule_dir));
    store.on_change( move |_| { let _ = tx.send(()); });
    let windows = store.load()?;
    info!("loaded peak schedule with {} windows", windows.len());
    let schedule = store.into_shared();

    let source = create_snapshot_source( &config)?;
    let server_addr = config.server_addr;
    let viewer = Viewer::new( config, source, schedule.clone());

    if let Some(addr) = server_addr {
        let router = server::router( StatusServerState { view: viewer.state(), schedule });
        tokio::spawn( async move {
            if let Err(e) = server::serve( addr, router).await {
                error!("status server terminated: {e}");
            }
        });
    }

    viewer.run( rx).await;
    Ok(())
}
