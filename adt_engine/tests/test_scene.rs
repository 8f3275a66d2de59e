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

use adt_common::K_TO_C;
use adt_common::geo::distance_km;
use adt_engine::config::AdtConfig;
use adt_engine::grid::GridField;
use adt_engine::history::AnalysisRecord;
use adt_engine::ringdata::{eye_cloud_temps, calc_rmw, harmonic_count, nearest_pixel};
use adt_engine::cdo::{cdo_size, shear_distance};
use adt_engine::scene::{bd_level, bd_float, classify, EyeScene, CloudScene, BD_CURVE};

// run with "cargo test test_scene -- --nocapture"

/// 101x101 grid with 0.04deg spacing centered on 20N 60W (west positive): a warm eye out to 15km,
/// a cold ring out to 150km and a warm environment beyond
fn eye_grid()->GridField {
    GridField::regular( 22.0, 62.0, 0.04, -0.04, 101, 101, 4.0, |lat,lon| {
        let d = distance_km( lat, lon, 20.0, 60.0);
        if d < 15.0 { 290.0 } else if d <= 150.0 { 200.0 } else { 280.0 }
    }).unwrap()
}

#[test]
fn test_scene_bd_curve() {
    assert_eq!( bd_level( 35.0), (0, 0.0));
    assert_eq!( bd_level( 20.0), (0, 0.0)); // no fraction within the warmest category

    let (cat,frac) = bd_level( 0.0);
    println!("0C -> category {cat} + {frac:.3}");
    assert_eq!( cat, 1);
    assert!( (frac - 9.0/39.0).abs() < 1e-9);

    assert_eq!( bd_float( -54.0), 4.0);
    assert!( (bd_float( -67.0) - 5.5).abs() < 1e-9);
    assert_eq!( bd_level( -110.0), (BD_CURVE.len() - 2, 1.0));
}

#[test]
fn test_scene_codes() {
    for code in 0..4 {
        assert_eq!( EyeScene::from_code(code).unwrap().code(), code);
    }
    for code in 0..6 {
        assert_eq!( CloudScene::from_code(code).unwrap().code(), code);
    }
    assert_eq!( EyeScene::from_code(4), None);
    assert_eq!( CloudScene::from_code(-1), None);
    println!("{} {}", EyeScene::Pinhole, CloudScene::EmbeddedCenter);
}

#[test]
fn test_scene_harmonics() {
    assert_eq!( harmonic_count( &[0.0; 64]), 0);
    assert_eq!( harmonic_count( &[3.0; 64]), 0);

    let mut spike = [0.0; 64];
    spike[0] = 1.0;
    let n = harmonic_count( &spike);
    println!("single spike harmonics: {n}");
    assert_eq!( n, 31);
}

#[test]
fn test_scene_ring_temps() {
    let grid = eye_grid();
    assert_eq!( nearest_pixel( &grid, 20.0, 60.0), (50,50));

    let m = eye_cloud_temps( &grid, 20.0, 60.0);
    println!("{m:?}");
    assert!( (m.eye_temp - (290.0 - K_TO_C)).abs() < 1e-9);
    assert!( (m.cloud_temp - (200.0 - K_TO_C)).abs() < 1e-9);
    assert!( (m.cw_cloud_temp - (200.0 - K_TO_C)).abs() < 1e-9);
    assert_eq!( m.cw_ring, 24.0);
    assert!( m.cloud_symmetry < 1e-9);
    assert!( m.eye_stdv > 10.0);

    let (rmw, radius) = calc_rmw( &grid, 20.0, 60.0, m.eye_temp, m.cloud_temp).unwrap();
    println!("eye radius {radius:.2}km, rmw {rmw:.2}km");
    assert!( radius > 14.0 && radius < 20.0);
    assert!( (rmw - (2.8068 + 0.8361 * radius)).abs() < 1e-9);
}

#[test]
fn test_scene_cdo() {
    let grid = eye_grid();

    let cdo = cdo_size( &grid, 20.0, 60.0, 230.0);
    println!("cdo radius {:.1}km, symmetry {:.3}", cdo.radius, cdo.symmetry);
    assert!( cdo.radius > 148.0 && cdo.radius < 160.0);
    assert!( cdo.symmetry < 1.05);

    // everything warmer than the threshold
    let cdo = cdo_size( &grid, 20.0, 60.0, 150.0);
    assert_eq!( cdo.radius, 0.0);

    let d = shear_distance( &grid, 20.0, 60.0, 230.0).unwrap();
    println!("distance to cold cloud {d:.1}km");
    assert!( d > 14.0 && d < 20.0);
    assert_eq!( shear_distance( &grid, 20.0, 60.0, 150.0), None);
}

#[test]
fn test_scene_classify() {
    let grid = eye_grid();
    let config = AdtConfig::default();
    let m = eye_cloud_temps( &grid, 20.0, 60.0);

    let mut cur = AnalysisRecord::default();
    cur.date = 2024200;
    cur.time = 120000;
    cur.latitude = 20.0;
    cur.longitude = 60.0;
    cur.eye_temp = m.eye_temp;
    cur.cloud_temp = m.cloud_temp;
    cur.cloud2_temp = m.cloud2_temp;
    cur.cw_cloud_temp = m.cw_cloud_temp;
    cur.cw_ring = m.cw_ring;
    cur.cloud_symmetry = m.cloud_symmetry;
    cur.eye_stdv = m.eye_stdv;
    cur.eye_fft = m.eye_fft;
    cur.cloud_fft = m.cloud_fft;

    let (eye, cloud) = classify( &grid, &[], &mut cur, &config, 4.5);
    println!("scene: {eye} / {cloud}, rmw {:.1}", cur.rmw);
    assert_eq!( cur.eye_scene, eye.code());
    assert_eq!( cur.cloud_scene, cloud.code());
    assert!( cur.rmw > 0.0);
}
