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
use clap::{Parser, Subcommand};
use fir_traffic::{
    schedule::PeakWindow,
    schedule_store::{FileStorage, ScheduleStore},
};

/// edit the stored peak window schedule
#[derive(Parser)]
#[command(about="Baghdad FIR peak schedule editor")]
struct CliOpts {
    #[arg(help="directory of stored schedule", long, default_value="local")]
    dir: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// show the stored windows with their positions
    List,
    /// append a window
    Add {
        #[arg(help="start time HH:MM (UTC)")]
        start: String,
        #[arg(help="end time HH:MM (UTC), can be before start for windows across midnight")]
        end: String,
        #[arg(help="North or South")]
        sector: String,
        #[arg(help="lower-band, upper-band, both-bands or all-altitudes")]
        band: String,
    },
    /// remove the window at the given position
    Remove {
        index: usize
    },
    /// go back to the built-in schedule
    Reset,
}

fn print_schedule (windows: &[PeakWindow]) {
    for (i,w) in windows.iter().enumerate() {
        println!("{i:3}: {w}");
    }
}

fn main() -> Result<()> {
    let opts = CliOpts::parse();
    let mut store = ScheduleStore::new( FileStorage::new( &opts.dir));

    match opts.cmd {
        Command::List => {
            print_schedule( &store.load()?);
        }
        Command::Add { start, end, sector, band } => {
            let window = PeakWindow::from_strs( &start, &end, &sector, &band)?;
            print_schedule( &store.append( window)?);
        }
        Command::Remove { index } => {
            let removed = store.remove( index)?;
            println!("removed {removed}");
            print_schedule( &store.load()?);
        }
        Command::Reset => {
            print_schedule( &store.reset()?);
        }
    }
    Ok(())
}
