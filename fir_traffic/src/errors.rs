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

 use thiserror::Error;

 pub type Result<T> = std::result::Result<T,FirTrafficError>;


#[derive(Error,Debug)]
pub enum FirTrafficError {

    #[error("parse error {0}")]
    ParseError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("net error {0}")]
    NetError( #[from] fir_common::net::FirNetError),

    #[error("config error {0}")]
    ConfigError( #[from] fir_common::config::FirConfigError),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),

    #[error("schedule error {0}")]
    ScheduleError( #[from] ScheduleError),

    #[error("operation failed {0}")]
    OpFailedError(String)
}

/// errors that are reported back to whoever edits the schedule
#[derive(Error,Debug,Clone,PartialEq)]
pub enum ScheduleError {
    #[error("invalid time of day '{0}' (expected HH:MM)")]
    InvalidTime(String),

    #[error("no schedule entry at position {index} (schedule has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::FirTrafficError::ParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::FirTrafficError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
