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
use fir_common::{check_cli, config::load_config_path, define_cli, trace::init_tracing};
use fir_traffic::poller::{Poller, PollerConfig};

define_cli! { ARGS [about="Baghdad FIR state vector poller"] =
    once: bool [help="poll only once and exit", long],
    config: String [help="pathname of poller config", long, default_value="configs/poller.ron"]
}

#[tokio::main]
async fn main() -> Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config: PollerConfig = load_config_path( &ARGS.config)?;
    let poller = Poller::new( config)?;

    if ARGS.once {
        let n = poller.poll_once().await?;
        println!("wrote {n} state vectors to {:?}", poller.config().output);
    } else {
        poller.run().await;
    }
    Ok(())
}
