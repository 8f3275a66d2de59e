/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

use adt_engine::config::AdtConfig;
use adt_engine::pw::{wind, pressure, pw_value, ckz_params, CkzParams, PwKind, TEN_MINUTE_WIND_FACTOR};

// run with "cargo test test_pw -- --nocapture"

#[test]
fn test_pw_wind() {
    assert_eq!( wind( 1.0), 25.0);
    assert_eq!( wind( 4.0), 65.0);
    assert_eq!( wind( 5.0), 90.0);
    assert_eq!( wind( 4.95), 90.0); // rounds up to the next table entry
    assert_eq!( wind( 9.5), 200.0);
    assert!( (wind( 5.0) * TEN_MINUTE_WIND_FACTOR - 79.2).abs() < 1e-9);
}

#[test]
fn test_pw_pressure() {
    let config = AdtConfig::default();

    let p = pressure( 5.0, 20.0, 60.0, &config);
    println!("Atlantic CI 5.0 -> {p}hPa");
    assert_eq!( p, 970.0);

    // west positive: -130 is in the western Pacific
    let p = pressure( 5.0, 20.0, -130.0, &config);
    println!("West Pacific CI 5.0 -> {p}hPa");
    assert_eq!( p, 954.0);

    assert_eq!( pw_value( PwKind::Wind, 4.5, 20.0, 60.0, &config), 77.0);
    assert_eq!( pw_value( PwKind::Pressure, 4.5, 20.0, 60.0, &config), 979.0);
    assert_eq!( ckz_params( &config), None);
}

#[test]
fn test_pw_ckz() {
    let mut config = AdtConfig::default();
    config.use_ckz = true;
    config.ckz_gale_radius = 150.0;
    config.ckz_penv = 1010.0;

    let p = pressure( 5.0, 20.0, 60.0, &config);
    println!("CKZ CI 5.0 -> {p:.1}hPa");
    assert!( p > 940.0 && p < 990.0);
    assert_eq!( ckz_params( &config), Some( CkzParams { r34: 150, penv: 1010 }));

    // weak storms never get a pressure above the environment
    let p = pressure( 1.0, 20.0, 60.0, &config);
    println!("CKZ CI 1.0 -> {p:.1}hPa");
    assert!( p <= 1008.0);
}
