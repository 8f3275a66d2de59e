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

//! logarithmic spiral band search used for curved band and embedded center scenes

use tracing::debug;
use adt_common::abs;
use adt_common::geo::{distance_angle2, distance_km};
use crate::grid::GridField;
use crate::ringdata::RING_WIDTH;

/// where to place spiral centers
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum SpiralSearch {
    /// only at the given storm center
    Point,
    /// over a 2x2 degree box around the storm center at 0.2 degree steps
    Box
}

/// longest run of consecutive 15 degree arc steps that lie over cold pixels, and the
/// spiral center it was found for
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SpiralBand {
    pub amount: i32,
    pub lat: f64,
    pub lon: f64,
}

const MIN_START_DIST: f64 = 12.0;
const MIN_ARC_PIXELS: usize = 4;

/// arc radius (km) at spiral angle `theta` (degrees): r = 25 e^(10/57.29578 * theta/57.29578)
fn spiral_radius (theta: f64)->f64 {
    let rad = 57.29578;
    25.0 * ((10.0 / rad) * (theta / rad)).exp()
}

/// run the log spiral search for pixels at or below `threshold` (K). Returns `None` only in
/// box mode if every candidate center is too close to a cold pixel
pub fn log_spiral (grid: &GridField, lat: f64, lon: f64, threshold: f64, mode: SpiralSearch)->Option<SpiralBand> {
    let res = grid.resolution_km;
    let max_dist = res + res / 2.0;
    let stride = if res > RING_WIDTH { 1 } else { (RING_WIDTH - res + 1.0) as usize };

    let mut cold: Vec<(f64,f64)> = Vec::new();
    for y in (0..grid.rows()).step_by(stride) {
        for x in (0..grid.cols()).step_by(stride) {
            if grid.temp[[y,x]] <= threshold {
                cold.push( (grid.lat[[y,x]], grid.lon[[y,x]]) );
            }
        }
    }

    let (lat_range, lon_range) = match mode {
        SpiralSearch::Box => (
            ((lat - 1.0) * 100.0) as i64 ..= ((lat + 1.0) * 100.0) as i64,
            ((lon - 1.0) * 100.0) as i64 ..= ((lon + 1.0) * 100.0) as i64
        ),
        SpiralSearch::Point => (
            (lat * 100.0) as i64 ..= (lat * 100.0) as i64,
            (lon * 100.0) as i64 ..= (lon * 100.0) as i64
        )
    };

    let mut best: Option<SpiralBand> = None;

    for ilat in lat_range.step_by(20) {
        let clat = ilat as f64 / 100.0;
        for ilon in lon_range.clone().step_by(20) {
            let clon = ilon as f64 / 100.0;

            if mode == SpiralSearch::Box && cold.iter().any( |(plat,plon)| distance_km( clat, clon, *plat, *plon) <= MIN_START_DIST) {
                continue
            }

            let amount = max_arc_run( &cold, clat, clon, max_dist);
            if best.map_or( true, |b| amount > b.amount) {
                best = Some( SpiralBand { amount, lat: clat, lon: clon });
            }
        }
    }

    if let Some(b) = &best {
        debug!("log spiral at {:.0}K: amount {} at {:.2},{:.2}", threshold, b.amount, b.lat, b.lon);
    }
    best
}

/// max over all 12 rotations of the longest run of arc points that have enough cold pixels nearby
fn max_arc_run (cold: &[(f64,f64)], clat: f64, clon: f64, max_dist: f64)->i32 {
    let mut max_run = 0;

    for rotation in (0..=330).step_by(30) {
        let mut run = 0;
        for theta in (0..=540).step_by(15) {
            let r = spiral_radius( theta as f64);
            let angle = if clat < 0.0 { -theta + rotation } else { theta + rotation } as f64;
            let (alat, alon) = distance_angle2( clat, clon, r, angle + 180.0);

            let n = cold.iter()
                .filter( |(plat,plon)| abs(alat - plat) <= 0.1 && abs(alon - plon) <= 0.1)
                .filter( |(plat,plon)| distance_km( alat, alon, *plat, *plon) <= max_dist)
                .count();

            if n >= MIN_ARC_PIXELS {
                run += 1;
                if run > max_run { max_run = run }
            } else {
                run = 0;
            }
        }
    }
    max_run
}
