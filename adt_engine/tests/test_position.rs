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

use adt_common::{cos, rad};
use adt_engine::config::AdtConfig;
use adt_engine::grid::GridField;
use adt_engine::history::AnalysisRecord;
use adt_engine::position::{auto_position, pick_final_location, CenterFix, PositionMethod};
use adt_engine::ring::{circle_template, lalo_to_index, index_to_lalo};
use adt_engine::spiral::spiral_center;

// run with "cargo test test_position -- --nocapture"

/// 50x50 grid with 0.1deg spacing and a Gaussian cold core at 25.2N 80.3W (west positive longitudes)
fn cold_core_grid()->GridField {
    cold_core_grid_at( 25.2, 80.3)
}

fn cold_core_grid_at (clat: f64, clon: f64)->GridField {
    let coslat = cos( rad(clat));
    GridField::regular( clat + 2.45, clon + 2.45, 0.1, -0.1, 50, 50, 11.0, |lat,lon| {
        let d2 = (lat - clat).powi(2) + ((lon - clon) * coslat).powi(2);
        290.0 - 90.0 * (-d2 / (2.0 * 0.5 * 0.5)).exp()
    }).unwrap()
}

#[test]
fn test_position_spiral() {
    let grid = cold_core_grid();
    let fit = spiral_center( &grid, 25.0, 80.0).unwrap();
    println!("spiral center {:.2},{:.2} score {:.3} from {} candidates", fit.lat, fit.lon, fit.score, fit.candidates.len());
    assert!( (fit.lat - 25.2).abs() < 0.3);
    assert!( (fit.lon - 80.3).abs() < 0.3);
    assert_eq!( fit.candidates.len(), 25);
}

#[test]
fn test_position_end_to_end() {
    let grid = cold_core_grid();
    let config = AdtConfig::default();

    let fix = auto_position( &grid, 25.0, 80.0, &config).unwrap();
    println!("auto position {:.2},{:.2} score {:.2} method {} ({})", fix.lat, fix.lon, fix.score, fix.method, fix.method.abbr());

    assert!( (fix.lat - 25.2).abs() < 0.3);
    assert!( (fix.lon - 80.3).abs() < 0.3);
    assert!( fix.method == PositionMethod::Spiral || fix.method == PositionMethod::Combo);
    assert!( fix.method.code() == 4 || fix.method.code() == 5);
    assert!( fix.score > 0.0);
}

#[test]
fn test_position_far_guess() {
    // the cold core is outside of the search radius, nothing better than the first guess
    let grid = cold_core_grid();
    let config = AdtConfig::default();

    let fix = auto_position( &grid, 23.0, 82.5, &config).unwrap();
    println!("far guess {:.2},{:.2} score {:.2} method {}", fix.lat, fix.lon, fix.score, fix.method);
    if fix.method == PositionMethod::Forecast {
        assert_eq!( (fix.lat, fix.lon, fix.score), (23.0, 82.5, 0.0));
    } else {
        assert!( fix.score > 0.0);
    }
}

#[test]
fn test_position_final_location() {
    let config = AdtConfig::default();
    let guess = CenterFix { lat: 25.0, lon: 80.0, score: 0.0, method: PositionMethod::Forecast };
    let auto = CenterFix { lat: 25.2, lon: 80.3, score: 0.8, method: PositionMethod::Spiral };
    let cur = AnalysisRecord::new( 2024200, 120000);

    // weak new storm: not eligible for automated positioning
    let fix = pick_final_location( &[], &cur, &config, 2.5, guess, auto);
    assert_eq!( fix, guess);

    // strong storm: accepted
    let fix = pick_final_location( &[], &cur, &config, 5.0, guess, auto);
    assert_eq!( fix, auto);

    // moderate storm without eye needs a score of at least 1
    let fix = pick_final_location( &[], &cur, &config, 3.5, guess, auto);
    assert_eq!( fix, guess);
    let fix = pick_final_location( &[], &cur, &config, 3.5, guess, CenterFix { score: 2.0, ..auto });
    assert_eq!( fix.method, PositionMethod::Spiral);
}

#[test]
fn test_position_ring_helpers() {
    let t = circle_template( 3);
    println!("radius 3 template: {} points", t.len());
    assert!( t.contains( &(0,3)) && t.contains( &(-3,0)));
    assert!( !t.contains( &(0,0)));

    let grid = cold_core_grid();
    let (x,y) = lalo_to_index( &grid, 25.2, 80.3);
    println!("25.2N 80.3W at index {x},{y}");
    let (lat,lon) = index_to_lalo( &grid, x, y);
    assert!( (lat - 25.2).abs() <= 0.1 + 1e-9);
    assert!( (lon - 80.3).abs() <= 0.1 + 1e-9);
}

#[test]
fn test_position_spiral_hemispheres() {
    let north = spiral_center( &cold_core_grid_at( 25.2, 80.3), 25.0, 80.0).unwrap();
    let south = spiral_center( &cold_core_grid_at( -25.2, 80.3), -25.0, 80.0).unwrap();
    println!("north {:.2},{:.2} score {:.4}", north.lat, north.lon, north.score);
    println!("south {:.2},{:.2} score {:.4}", south.lat, south.lon, south.score);

    // mirrored storms get mirrored centers. Scores differ since the spiral terms are not symmetric
    assert!( (south.lat + 25.2).abs() < 0.3);
    assert!( (south.lon - 80.3).abs() < 0.3);
    assert!( (south.lat + north.lat).abs() < 0.05);
    assert!( (south.lon - north.lon).abs() < 0.05);
    assert!( south.score > 0.0);
}
