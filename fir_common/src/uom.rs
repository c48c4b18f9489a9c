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

use uom::si::{length::{meter,foot},f64::Length};

#[inline]
pub fn meters (len: f64)-> Length { Length::new::<meter>(len) }

/// a flight level is a pressure altitude in hundreds of feet (FL240 = 24,000ft)
#[inline]
pub fn flight_level (level: f64)-> Length { Length::new::<foot>(level * 100.0) }

/// shortcut for the altitude of a flight level in meters (FL240 ~ 7315m)
#[inline]
pub fn flight_level_meters (level: f64)-> f64 { flight_level(level).get::<meter>() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_levels () {
        assert!( (flight_level_meters(240.0) - 7315.2).abs() < 1e-6);
        assert!( (flight_level_meters(350.0) - 10668.0).abs() < 1e-6);
        assert!( (flight_level_meters(460.0) - 14020.8).abs() < 1e-6);
        assert!( flight_level(360.0) > flight_level(350.0));
        assert_eq!( meters( flight_level_meters(350.0)), flight_level(350.0));
    }
}
