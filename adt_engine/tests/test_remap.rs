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

use ndarray::Array2;
use adt_engine::grid::{GridField, ScoreField};
use adt_engine::remap::{rectify, remap, find_point};
use adt_engine::errors::AdtError;

// run with "cargo test test_remap -- --nocapture"

#[test]
fn test_remap_uniform_identity() {
    let grid = GridField::regular( 21.0, 61.0, 0.1, -0.1, 20, 30, 11.0, |lat,lon| 200.0 + lat + lon).unwrap();
    assert!( grid.is_uniform());
    assert!( !grid.crosses_dateline());

    let rect = rectify( &grid, (3,3)).unwrap();
    assert_eq!( rect, grid);
}

#[test]
fn test_remap_dateline_shift() {
    // 178E..178W in west positive coordinates
    let lat = Array2::from_shape_fn( (20,41), |(y,_)| 1.0 - y as f64 * 0.1);
    let lon = Array2::from_shape_fn( (20,41), |(_,x)| {
        let v = -178.0 - x as f64 * 0.1;
        if v < -180.0 { v + 360.0 } else { v }
    });
    let temp = Array2::from_elem( (20,41), 280.0);
    let grid = GridField::new( lat, lon, temp, 11.0).unwrap();
    println!("corners: {:?}", grid.corner_longitudes());
    assert!( grid.crosses_dateline());

    let rect = rectify( &grid, (3,3)).unwrap();
    println!("shifted corners: {:?}", rect.corner_longitudes());
    assert!( (rect.lon[[0,0]] - 182.0).abs() < 1e-9);
    assert!( (rect.lon[[0,40]] - 178.0).abs() < 1e-9);
    assert!( !rect.crosses_dateline());
}

#[test]
fn test_remap_non_uniform() {
    // lat spacing 0.08, lon spacing 0.1 and a temperature that only depends on latitude
    let grid = GridField::regular( 21.0, 61.0, 0.08, -0.1, 26, 21, 9.0, |lat,_| 10.0 * lat).unwrap();
    assert!( !grid.is_uniform());

    let rect = rectify( &grid, (3,3)).unwrap();
    println!("remapped {}x{} -> {}x{}, increments {:?}", grid.rows(), grid.cols(), rect.rows(), rect.cols(), rect.increments());
    assert!( rect.is_uniform());

    let mut max_err: f64 = 0.0;
    for ((y,x),t) in rect.temp.indexed_iter() {
        max_err = max_err.max( (t - 10.0 * rect.lat[[y,x]]).abs());
    }
    println!("max temperature error: {max_err:.3}");
    assert!( max_err < 2.0);

    let (l,e) = find_point( &grid, 20.0, 60.0).unwrap();
    println!("20N 60W is at source pixel {l},{e}");
    assert!( (grid.lat[[l,e]] - 20.0).abs() < 0.05);
    assert!( (grid.lon[[l,e]] - 60.0).abs() < 0.06);
    assert!( find_point( &grid, 30.0, 60.0).is_none());
}

#[test]
fn test_grid_validation() {
    let a = Array2::<f64>::zeros( (3,3));
    let b = Array2::<f64>::zeros( (3,4));
    let res = GridField::new( a.clone(), b, a.clone(), 4.0);
    println!("mismatched shapes: {:?}", res.as_ref().err());
    assert!( matches!( res, Err(AdtError::InvalidInput(_))));

    let res = GridField::new( Array2::zeros((1,3)), Array2::zeros((1,3)), Array2::zeros((1,3)), 4.0);
    assert!( matches!( res, Err(AdtError::InvalidInput(_))));

    let grid = GridField::regular( 10.0, 10.0, 0.04, -0.04, 10, 250, 4.0, |_,_| 280.0).unwrap();
    assert!( grid.check_size( 200).is_err());
    assert!( grid.check_size( 250).is_ok());

    let json = r#"{ "lat": [[1.0,1.0],[0.9,0.9]], "lon": [[-60.0,-59.9],[-60.0,-59.9]], "temp": [[280.0,270.0],[260.0,250.0]] }"#;
    let mut grid: GridField = serde_json::from_str( json).unwrap();
    assert_eq!( grid.resolution_km, 4.0);
    assert_eq!( grid.temp[[1,0]], 260.0);
    grid.flip_longitudes();
    assert_eq!( grid.lon[[0,0]], 60.0);

    let json = r#"{ "lat": [[1.0,1.0],[0.9]], "lon": [[-60.0,-59.9],[-60.0,-59.9]], "temp": [[280.0,270.0],[260.0,250.0]] }"#;
    assert!( serde_json::from_str::<GridField>( json).is_err());
}

#[test]
fn test_score_field() {
    let mut sf = ScoreField::new();
    assert!( sf.max_point().is_none());
    sf.push( 1.0, 20.0, 60.0);
    sf.push( 3.0, 20.1, 60.0);
    sf.push( 3.0, 20.2, 60.0);
    assert_eq!( sf.len(), 3);

    let p = sf.max_point().unwrap();
    assert_eq!( (p.score, p.lat), (3.0, 20.1));
}
