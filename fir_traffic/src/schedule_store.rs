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

//! persistent storage of the peak schedule. The schedule is a per-installation setting that is not shared
//! between viewers. All operations work on the whole list

use std::{collections::HashMap, path::{Path,PathBuf}, sync::{Arc,Mutex}};
use tracing::{debug,info,warn};
use fir_common::fs::{filepath_contents_as_string, remove_if_exists, set_filepath_contents_atomic};

use crate::{
    errors::{op_failed, Result, ScheduleError},
    schedule::{seed_schedule, PeakWindow}
};

/// the fixed key under which we store the schedule
pub const SCHEDULE_KEY: &str = "fir_peak_schedule";

/// abstraction for a simple string key-value store
pub trait KeyValueStorage: Send {
    fn get (&self, key: &str)->Result<Option<String>>;
    fn set (&mut self, key: &str, value: &str)->Result<()>;
    fn remove (&mut self, key: &str)->Result<()>;
}

/// one `<key>.json` file per key within a directory
#[derive(Debug,Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new (dir: impl AsRef<Path>)->Self {
        FileStorage { dir: dir.as_ref().to_path_buf() }
    }

    pub fn key_path (&self, key: &str)->PathBuf {
        self.dir.join( format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get (&self, key: &str)->Result<Option<String>> {
        let path = self.key_path( key);
        if path.is_file() {
            Ok( Some( filepath_contents_as_string( &path)?) )
        } else {
            Ok(None)
        }
    }

    fn set (&mut self, key: &str, value: &str)->Result<()> {
        Ok( set_filepath_contents_atomic( self.key_path( key), value.as_bytes())? )
    }

    fn remove (&mut self, key: &str)->Result<()> {
        remove_if_exists( self.key_path( key))?;
        Ok(())
    }
}

#[derive(Debug,Clone,Default)]
pub struct MemoryStorage {
    map: HashMap<String,String>
}

impl MemoryStorage {
    pub fn new ()->Self { MemoryStorage::default() }
}

impl KeyValueStorage for MemoryStorage {
    fn get (&self, key: &str)->Result<Option<String>> {
        Ok( self.map.get( key).cloned() )
    }

    fn set (&mut self, key: &str, value: &str)->Result<()> {
        self.map.insert( key.to_string(), value.to_string());
        Ok(())
    }

    fn remove (&mut self, key: &str)->Result<()> {
        self.map.remove( key);
        Ok(())
    }
}

/// called with the new schedule whenever it was changed through the store
pub type ChangeListener = Box<dyn Fn(&[PeakWindow]) + Send>;

pub struct ScheduleStore {
    storage: Box<dyn KeyValueStorage>,
    listeners: Vec<ChangeListener>,
}

/// the store is shared between the refresh loop and whoever edits the schedule. All operations are synchronous
/// so the lock is never held across await points
pub type SharedScheduleStore = Arc<Mutex<ScheduleStore>>;

impl ScheduleStore {
    pub fn new (storage: impl KeyValueStorage + 'static)->Self {
        ScheduleStore { storage: Box::new(storage), listeners: Vec::new() }
    }

    pub fn into_shared (self)->SharedScheduleStore { Arc::new( Mutex::new(self)) }

    pub fn on_change (&mut self, listener: impl Fn(&[PeakWindow]) + Send + 'static) {
        self.listeners.push( Box::new(listener));
    }

    /// get the current schedule. If nothing is stored yet we store and return the seed schedule.
    /// A stored value we can't parse is reported and treated as empty schedule
    pub fn load (&mut self)->Result<Vec<PeakWindow>> {
        match self.storage.get( SCHEDULE_KEY)? {
            Some(json) => {
                match serde_json::from_str::<Vec<PeakWindow>>( &json) {
                    Ok(windows) => Ok(windows),
                    Err(e) => {
                        warn!("stored schedule corrupted, using empty schedule: {e}");
                        Ok(Vec::new())
                    }
                }
            }
            None => {
                let windows = seed_schedule();
                info!("no stored schedule, seeding {} example windows", windows.len());
                self.store( &windows)?;
                Ok(windows)
            }
        }
    }

    /// replace the stored schedule and notify listeners
    pub fn save (&mut self, windows: &[PeakWindow])->Result<()> {
        self.store( windows)?;
        debug!("saved schedule with {} windows", windows.len());
        self.notify( windows);
        Ok(())
    }

    pub fn append (&mut self, window: PeakWindow)->Result<Vec<PeakWindow>> {
        let mut windows = self.load()?;
        windows.push( window);
        self.save( &windows)?;
        Ok(windows)
    }

    /// remove the window at the given position of the current list. Remaining windows move up
    pub fn remove (&mut self, index: usize)->Result<PeakWindow> {
        let mut windows = self.load()?;
        if index >= windows.len() {
            return Err( ScheduleError::IndexOutOfRange{ index, len: windows.len() }.into())
        }
        let removed = windows.remove( index);
        self.save( &windows)?;
        Ok(removed)
    }

    /// drop the stored schedule. The next load seeds the example schedule again, which we return
    pub fn reset (&mut self)->Result<Vec<PeakWindow>> {
        self.storage.remove( SCHEDULE_KEY)?;
        let windows = self.load()?;
        self.notify( &windows);
        Ok(windows)
    }

    fn store (&mut self, windows: &[PeakWindow])->Result<()> {
        let json = serde_json::to_string_pretty( windows)?;
        self.storage.set( SCHEDULE_KEY, &json)
    }

    fn notify (&self, windows: &[PeakWindow]) {
        for listener in &self.listeners {
            listener( windows);
        }
    }
}

/// run `f` with the locked store
pub fn with_store<F,T> (store: &SharedScheduleStore, f: F)->Result<T> where F: FnOnce(&mut ScheduleStore)->Result<T> {
    let mut guard = store.lock().map_err( |_| op_failed!("schedule store lock poisoned"))?;
    f( &mut guard)
}
