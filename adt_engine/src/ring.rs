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

//! ring (gradient dot product) center fit

use ndarray::Array2;
use tracing::debug;
use crate::grid::{GridField, ScoreField};
use crate::gradient::gradient;

const SEARCH_RADIUS_DEG: f64 = 0.75;
const MIN_RADIUS_DEG: f64 = 0.06;
const MAX_RADIUS_DEG: f64 = 0.40;
const MAX_MISSING_RATIO: f64 = 0.575;
const RING_WIDTH: i64 = 4;

#[derive(Debug,Clone)]
pub struct RingFit {
    pub lat: f64,
    pub lon: f64,
    pub score: f64,

    /// every scored (radius, center) combination
    pub candidates: ScoreField,
}

/// pixel offsets (dy,dx) of a ring with the given radius
pub fn circle_template (radius: i64)->Vec<(i64,i64)> {
    let r1 = radius + 1;
    let threshold = 0.5 * (((radius+1)*(radius+1)) - (radius*radius)) as f64;
    let mut pts = Vec::new();
    for dx in -r1..=r1 {
        for dy in -r1..=r1 {
            let diff = (dy*dy + dx*dx - radius*radius) as f64;
            if diff.abs() <= threshold { pts.push((dy,dx)) }
        }
    }
    pts
}

/// grid indices (x,y) of a position on a rectilinear grid
pub fn lalo_to_index (grid: &GridField, lat: f64, lon: f64)->(i64,i64) {
    let (rows,cols) = (grid.rows(), grid.cols());
    let lat_min = grid.lat[[rows-1,0]];
    let lat_max = grid.lat[[0,0]];
    let lon_min = grid.lon[[0,cols-1]];
    let lon_max = grid.lon[[0,0]];

    let y = ((rows as f64 - 1.0) / (lat_max - lat_min) * (lat_max - lat)) as i64;
    let x = ((cols as f64 - 1.0) / (lon_max - lon_min) * (lon_max - lon)) as i64;
    (x,y)
}

/// position of grid indices on a rectilinear grid
pub fn index_to_lalo (grid: &GridField, x: i64, y: i64)->(f64,f64) {
    let (rows,cols) = (grid.rows(), grid.cols());
    let lat_min = grid.lat[[rows-1,0]];
    let lat_max = grid.lat[[0,0]];
    let lon_min = grid.lon[[0,cols-1]];
    let lon_max = grid.lon[[0,0]];

    let lon = lon_max - (x as f64 / (cols as f64 - 1.0)) * (lon_max - lon_min);
    let lat = lat_max - (y as f64 / (rows as f64 - 1.0)) * (lat_max - lat_min);
    (lat,lon)
}

/// ring fit around a first guess position on a rectilinear grid. Ring points inside the `moat`
/// mask veto their candidate. Returns `None` if no candidate could be evaluated
pub fn ring_fit (grid: &GridField, moat: &Array2<bool>, lat0: f64, lon0: f64)->Option<RingFit> {
    let (rows,cols) = (grid.rows() as i64, grid.cols() as i64);
    let res = grid.resolution_km as i64;
    let step = if res > RING_WIDTH { 1 } else { (RING_WIDTH - res + 1) as usize };

    let deg_per_pixel = (grid.lat[[0,0]] - grid.lat[[1,0]]).abs();
    if deg_per_pixel <= 0.0 { return None }

    let search_radius = (SEARCH_RADIUS_DEG / deg_per_pixel).round() as i64;
    let min_radius = f64::max( 2.0, (MIN_RADIUS_DEG / deg_per_pixel).round()) as i64;
    let max_radius = (MAX_RADIUS_DEG / deg_per_pixel).round() as i64;

    // pixel index based gradients, y increasing to the south
    let (gy, gx) = gradient( &grid.temp, 1.0, -1.0);

    let (x0,y0) = lalo_to_index( grid, lat0, lon0);

    let mut best: Option<(f64,i64,i64)> = None;
    let mut candidates = ScoreField::new();

    for radius in min_radius..max_radius {
        let template = circle_template( radius);
        let n = template.len();
        if n == 0 { continue }

        for x in (1..cols-1).step_by(step) {
            for y in (1..rows-1).step_by(step) {
                let dist = (x-x0)*(x-x0) + (y-y0)*(y-y0);
                if dist > search_radius * search_radius { continue }

                let mut sum = 0.0;
                let mut missing = 0;
                let mut in_moat = false;

                for (dy,dx) in &template {
                    let (cx,cy) = (x + dx, y + dy);
                    if cx < 1 || cy < 1 || cx >= cols-1 || cy >= rows-1 {
                        missing += 1;
                        continue;
                    }
                    let (ux,uy) = (cx as usize, cy as usize);
                    if moat[[uy,ux]] { in_moat = true }
                    if in_moat {
                        missing += 1;
                        continue;
                    }

                    let dot = (*dy as f64 / radius as f64) * gy[[uy,ux]] + (*dx as f64 / radius as f64) * gx[[uy,ux]];
                    let sign = if dot == 0.0 { 0.0 } else { dot.signum() };
                    sum += sign * (1.0 + dot.abs()).ln();
                }

                let score = if in_moat || (missing as f64) > MAX_MISSING_RATIO * n as f64 {
                    0.0
                } else {
                    -(n as f64 / (n - missing) as f64) * sum / (n as f64).sqrt()
                };

                if best.map_or( true, |b| score > b.0) { best = Some((score,x,y)) }
                let (ux,uy) = (x as usize, y as usize);
                candidates.push( score, grid.lat[[uy,ux]], grid.lon[[uy,ux]]);
            }
        }
    }

    let (score,x,y) = best?;
    let (lat,lon) = index_to_lalo( grid, x, y);
    debug!("ring fit {:.2},{:.2} score {:.3} ({} candidates)", lat, lon, score, candidates.len());
    Some( RingFit { lat, lon, score, candidates })
}
