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

//! low resolution spiral cross product center fit

use ndarray::Array2;
use tracing::debug;
use adt_common::{sign_factor, pow2, cos, sqrt, rad};
use crate::grid::{GridField, ScoreField};
use crate::gradient::{gradient, log_compress};

const ALPHA: f64 = 5.0 * std::f64::consts::PI / 180.0; // log spiral pitch angle
const OUTSIDE_FACTOR: f64 = 0.62;
const OUTER_SEARCH_RADIUS: f64 = 1.75;
const COARSE_SPACING: f64 = 0.2;
const FINE_SPACING: f64 = 0.1;
const RING_WIDTH: f64 = 4.0;

#[derive(Debug,Clone)]
pub struct SpiralFit {
    pub lat: f64,
    pub lon: f64,
    pub score: f64,

    /// all fine grid candidates (score, lat, lon)
    pub candidates: ScoreField,
}

/// the first guess centered coordinate system the spiral scores are computed in
struct NormGrid {
    x: Array2<f64>, // (lon - lon0) * cos(lat0), scaled by the longitude direction
    y: Array2<f64>,
    ns: Array2<f64>,
    ew: Array2<f64>,
    lon_mult: f64,
    sign: f64,
}

impl NormGrid {
    fn new (grid: &GridField, lat0: f64, lon0: f64)->Self {
        let coslat = cos( rad(lat0));
        let xn = grid.lon.mapv( |lon| (lon - lon0) * coslat);
        let y = grid.lat.mapv( |lat| lat - lat0);

        let lon_inc = (xn[[0,0]] - xn[[0,1]]).abs();
        let lat_inc = (y[[0,0]] - y[[1,0]]).abs();
        let lon_mult = if xn[[0,0]] - xn[[0,1]] < 0.0 { 1.0 } else { -1.0 };

        let (mut ns, mut ew) = gradient( &grid.temp, lon_inc, lat_inc);
        log_compress( &mut ns, &mut ew);

        let x = xn.mapv( |v| v * lon_mult);
        NormGrid { x, y, ns, ew, lon_mult, sign: sign_factor(lat0) }
    }

    /// mean cross product score for a candidate offset. Pixels are restricted to the disc around the first guess
    fn mean_score (&self, xoff: f64, yoff: f64, step: usize)->Option<f64> {
        let (rows,cols) = self.x.dim();
        let disc = pow2( OUTER_SEARCH_RADIUS + 2.0 * FINE_SPACING);
        let alpha_p1 = 1.0 + pow2(ALPHA);

        let mut sum = 0.0;
        let mut n = 0usize;
        for y in (1..rows.saturating_sub(2)).step_by(step) {
            for x in (1..cols.saturating_sub(2)).step_by(step) {
                if pow2(self.x[[y,x]]) + pow2(self.y[[y,x]]) < disc {
                    let px = self.x[[y,x]] - xoff;
                    let py = self.y[[y,x]] - yoff;
                    let denom = sqrt( alpha_p1 * (pow2(px) + pow2(py)));
                    if denom > 0.0 {
                        let sx = (ALPHA * px + self.sign * py) / denom;
                        let sy = (ALPHA * py - self.sign * px) / denom;
                        let raw = sx * self.ns[[y,x]] - sy * self.ew[[y,x]];
                        sum += f64::max(0.0, -raw) + OUTSIDE_FACTOR * f64::max(0.0, raw);
                    }
                    n += 1;
                }
            }
        }

        if n > 0 { Some(sum / n as f64) } else { None }
    }
}

fn offsets (min: f64, max: f64, step: f64)->impl Iterator<Item=f64> {
    let n = ((max - min) / step + 1e-6).floor() as usize + 1;
    (0..n).map( move |i| min + i as f64 * step)
}

/// spiral center fit around the first guess (`lat0`,`lon0`, west positive) on a rectilinear grid.
/// Returns `None` if no candidate could be scored
pub fn spiral_center (grid: &GridField, lat0: f64, lon0: f64)->Option<SpiralFit> {
    let res = grid.resolution_km as i64;
    let step = if res > RING_WIDTH as i64 { 1 } else { (RING_WIDTH as i64 - res + 1) as usize };

    let ymax = grid.rows() - 1;
    let lon0 = if lon0 < 0.0 && (grid.lon[[0,0]] > 180.0 || grid.lon[[ymax,0]] > 180.0) { lon0 + 360.0 } else { lon0 };

    let norm = NormGrid::new( grid, lat0, lon0);

    //--- coarse grid
    let max_radius = pow2( OUTER_SEARCH_RADIUS + (2.0 * COARSE_SPACING) / 3.0);
    let mut best = (-99.0, 0.0, 0.0); // (score, xoff, yoff)
    for xoff in offsets( -OUTER_SEARCH_RADIUS, OUTER_SEARCH_RADIUS, COARSE_SPACING) {
        for yoff in offsets( -OUTER_SEARCH_RADIUS, OUTER_SEARCH_RADIUS, COARSE_SPACING) {
            if pow2(xoff) + pow2(yoff) <= max_radius {
                if let Some(score) = norm.mean_score( xoff, yoff, step) {
                    if score > best.0 { best = (score, xoff, yoff) }
                }
            }
        }
    }
    debug!("coarse spiral maximum {:.3} at offset ({:.2},{:.2})", best.0, best.1, best.2);

    //--- fine grid around the coarse maximum
    let coslat = cos( rad(lat0));
    let to_lon = |xoff: f64| (norm.lon_mult * xoff) / coslat + lon0;

    let (cx, cy) = (best.1, best.2);
    let mut best = (-99.0, cx, cy);
    let mut candidates = ScoreField::new();
    for xoff in offsets( cx - COARSE_SPACING, cx + COARSE_SPACING, FINE_SPACING) {
        for yoff in offsets( cy - COARSE_SPACING, cy + COARSE_SPACING, FINE_SPACING) {
            if let Some(score) = norm.mean_score( xoff, yoff, 1) {
                if score > best.0 { best = (score, xoff, yoff) }
                candidates.push( score, yoff + lat0, to_lon(xoff));
            }
        }
    }

    if candidates.is_empty() { return None }

    let fit = SpiralFit { lat: best.2 + lat0, lon: to_lon(best.1), score: best.0, candidates };
    debug!("spiral center {:.2},{:.2} score {:.3}", fit.lat, fit.lon, fit.score);
    Some(fit)
}
