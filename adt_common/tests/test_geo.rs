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

use adt_common::geo::*;
use adt_common::{MeanStdv, trunc_tenth, sign_factor};

// run with "cargo test test_distance -- --nocapture"

#[test]
fn test_distance() {
    let (d,a) = distance_angle( 25.0, 80.0, 26.0, 80.0, DistanceUnit::Km);
    println!("one degree north: {d:.3}km at {a:.2}°");
    assert!( (d - 111.19).abs() < 0.1);
    assert!( a.abs() < 0.001);

    // west positive longitudes: decreasing longitude is east
    let (d,a) = distance_angle( 0.0, 80.0, 0.0, 79.0, DistanceUnit::Km);
    println!("one degree east: {d:.3}km at {a:.2}°");
    assert!( (a - 90.0).abs() < 0.01);

    let (_,a) = distance_angle( 0.0, 80.0, -1.0, 80.0, DistanceUnit::Km);
    assert!( (a - 180.0).abs() < 0.01);

    let (_,a) = distance_angle( 0.0, 80.0, 0.0, 81.0, DistanceUnit::Km);
    assert!( (a - 270.0).abs() < 0.01);

    let (nm,_) = distance_angle( 25.0, 80.0, 26.0, 80.0, DistanceUnit::NauticalMiles);
    println!("in nautical miles: {nm:.2}");
    assert!( (nm - 60.6).abs() < 0.2);
}

#[test]
fn test_dead_reckoning() {
    // the angle is the direction the point is seen *from*, so 180 moves north
    let (lat,lon) = distance_angle2( 25.0, 80.0, 111.1, 180.0);
    println!("north: {lat:.4},{lon:.4}");
    assert!( (lat - 26.0).abs() < 0.001);
    assert!( (lon - 80.0).abs() < 0.001);

    let (lat,lon) = distance_angle2( 25.0, 80.0, 111.1, 270.0);
    println!("east: {lat:.4},{lon:.4}");
    assert!( lon < 80.0);
    assert!( (lat - 25.0).abs() < 0.01);

    let (lat,lon) = distance_angle2( -25.0, 80.0, 111.1, 180.0);
    println!("southern hemisphere north: {lat:.4},{lon:.4}");
    assert!( (lat + 24.0).abs() < 0.001);

    // round trip against the distance function
    let (lat,lon) = distance_angle2( 15.0, 120.0, 50.0, 135.0);
    let d = distance_km( 15.0, 120.0, lat, lon);
    println!("round trip distance: {d:.3}");
    assert!( (d - 50.0).abs() < 0.5);
}

#[test]
fn test_ocean_basin() {
    // west positive longitudes
    assert_eq!( ocean_basin( 25.0, 80.0), Some(OceanBasin::Atlantic));
    assert_eq!( ocean_basin( 15.0, 110.0), Some(OceanBasin::EastPacific));
    assert_eq!( ocean_basin( 20.0, -130.0), Some(OceanBasin::WestPacific));
    assert_eq!( ocean_basin( 15.0, -88.0), Some(OceanBasin::Indian));
    assert_eq!( ocean_basin( -15.0, -150.0), Some(OceanBasin::WestPacific));
    assert_eq!( ocean_basin( 95.0, 0.0), None);

    assert_eq!( regression_domain( 15.0, 110.0, BasinDomain::Auto), RegressionDomain::Atlantic);
    assert_eq!( regression_domain( 20.0, -130.0, BasinDomain::Auto), RegressionDomain::Pacific);
    assert_eq!( regression_domain( 20.0, -130.0, BasinDomain::Atlantic), RegressionDomain::Atlantic);
}

#[test]
fn test_zenith_angle() {
    let za = zenith_angle( 0.0, -75.0, 285.0);
    println!("sub-satellite zenith angle: {za}");
    assert!( za.abs() < 0.001);

    let za = zenith_angle( 30.0, -75.0, 285.0);
    println!("30N zenith angle: {za}");
    assert!( za > 30.0 && za < 40.0);
}

#[test]
fn test_accumulators() {
    let mut acc = MeanStdv::new();
    for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] { acc.add(x) }
    println!("mean={}, stdv={}", acc.mean(), acc.stdv());
    assert!( (acc.mean() - 5.0).abs() < 1e-9);
    assert!( (acc.stdv() - 2.13809).abs() < 1e-4);

    assert_eq!( trunc_tenth( 4.37), 4.3);
    assert_eq!( trunc_tenth( -1.25), -1.2);
    assert_eq!( sign_factor( 0.0), 1.0);
    assert_eq!( sign_factor( -3.0), -1.0);
}
