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

//! CDO size and shear distance measurements

use adt_common::geo::{distance_angle, DistanceUnit};
use crate::grid::GridField;
use crate::ringdata::{EYE_SEARCH_RADIUS, RING_WIDTH};

const BEARINGS: [f64;4] = [45.0, 135.0, 225.0, 315.0];
const MAX_ANGLE_DIFF: f64 = 15.0;
const DEFAULT_RADIUS: f64 = 300.0;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CdoSize {
    /// mean radius (km) of the cold overcast, 0 if it could not be determined
    pub radius: f64,
    /// ratio of the two diagonal diameters (>= 1)
    pub symmetry: f64,
}

/// size of the region at or below `threshold` (K) around the storm center, measured along the
/// four diagonal bearings as the distance to the nearest warmer pixel outside of the eye
pub fn cdo_size (grid: &GridField, lat: f64, lon: f64, threshold: f64)->CdoSize {
    let mut radii = [DEFAULT_RADIUS; 4];
    let mut max_dist: f64 = 0.0;
    let mut n_warm = 0;

    for ((y,x),t) in grid.temp.indexed_iter() {
        if *t > threshold {
            n_warm += 1;
            let (d,a) = distance_angle( lat, lon, grid.lat[[y,x]], grid.lon[[y,x]], DistanceUnit::Km);
            max_dist = max_dist.max(d);
            if d > EYE_SEARCH_RADIUS {
                for (i,b) in BEARINGS.iter().enumerate() {
                    if (a - b).abs() <= MAX_ANGLE_DIFF && d < radii[i] { radii[i] = d }
                }
            }
        }
    }

    if n_warm == grid.temp.len() {
        return CdoSize { radius: 0.0, symmetry: 1.0 }
    }

    let n_valid = radii.iter().filter( |r| **r >= EYE_SEARCH_RADIUS + RING_WIDTH).count();
    if n_valid < 3 {
        return CdoSize { radius: 0.0, symmetry: 1.0 }
    }

    for r in radii.iter_mut() { *r = r.min(max_dist) }
    let radius = radii.iter().sum::<f64>() / 4.0;

    let d13 = radii[0] + radii[2];
    let d24 = radii[1] + radii[3];
    let symmetry = if d13 > 0.0 && d24 > 0.0 { (d13/d24).max(d24/d13) } else { 1.0 };

    CdoSize { radius, symmetry }
}

/// distance (km) from the storm center to the closest pixel at or below `threshold` (K)
pub fn shear_distance (grid: &GridField, lat: f64, lon: f64, threshold: f64)->Option<f64> {
    grid.temp.indexed_iter()
        .filter( |(_,t)| **t <= threshold)
        .map( |((y,x),_)| distance_angle( lat, lon, grid.lat[[y,x]], grid.lon[[y,x]], DistanceUnit::Km).0)
        .min_by( |a,b| a.total_cmp(b))
}
