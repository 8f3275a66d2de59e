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

//! eye and cloud region temperature measurements around the storm center

use num::complex::Complex64;
use adt_common::{MeanStdv, K_TO_C, TWO_PI, cos, sin};
use adt_common::geo::{distance_angle, DistanceUnit};
use crate::grid::GridField;

pub const OUTER_RADIUS: f64 = 136.0;
pub const INNER_RADIUS: f64 = 24.0;
pub const RING_WIDTH: f64 = 4.0;
pub const EYE_SEARCH_RADIUS: f64 = 24.0;

const N_SECTORS: usize = 24;
const SECTOR_WIDTH: f64 = 15.0;
const TEMP_BINS: usize = 64;

/// pixel relative to the storm center
#[derive(Debug,Clone,Copy)]
pub struct RingPixel {
    pub distance: f64,
    pub angle: f64,
    pub temp: f64,
}

/// measurements derived from the ring data. Temperatures are in Celsius, `cw_ring` in km
#[derive(Debug,Clone,PartialEq)]
pub struct RingMeasurements {
    pub eye_temp: f64,
    pub cw_cloud_temp: f64,
    pub cw_ring: f64,
    pub cloud_temp: f64,
    pub cloud2_temp: f64,
    pub cloud_symmetry: f64,
    pub eye_stdv: f64,
    pub eye_fft: i32,
    pub cloud_fft: i32,
}

/// all pixels within `OUTER_RADIUS + 80` km of the given (west positive) center
pub fn load_ring_data (grid: &GridField, lat: f64, lon: f64)->Vec<RingPixel> {
    let max_dist = OUTER_RADIUS + 80.0;
    let mut pixels = Vec::new();

    for ((y,x),t) in grid.temp.indexed_iter() {
        let (distance,angle) = distance_angle( grid.lat[[y,x]], grid.lon[[y,x]], lat, lon, DistanceUnit::Km);
        if distance <= max_dist {
            pixels.push( RingPixel { distance, angle, temp: *t });
        }
    }
    pixels
}

/// warmest pixel within the eye search radius (K), -99 if there is none
pub fn eye_temperature (pixels: &[RingPixel])->f64 {
    pixels.iter()
        .filter( |p| p.distance <= EYE_SEARCH_RADIUS)
        .fold( -99.0, |acc,p| if p.temp > acc { p.temp } else { acc })
}

/// coldest of the per ring maximum temperatures and the inner radius of that ring.
/// Returns (10000,0) if no ring has a max above 160K
pub fn cw_cloud_info (pixels: &[RingPixel])->(f64,f64) {
    let n_rings = ((OUTER_RADIUS - INNER_RADIUS) / RING_WIDTH) as usize;
    let mut ring_max = vec![-999.0; n_rings];

    for p in pixels.iter().filter( |p| p.distance >= INNER_RADIUS && p.distance < OUTER_RADIUS) {
        let i = ((p.distance - INNER_RADIUS) as usize) / RING_WIDTH as usize;
        if i < n_rings && p.temp > ring_max[i] { ring_max[i] = p.temp }
    }

    let mut cw = (10000.0, 0.0);
    for (j,t) in ring_max.iter().enumerate() {
        if *t < cw.0 && *t > 160.0 {
            cw = (*t, j as f64 * RING_WIDTH + INNER_RADIUS);
        }
    }
    cw
}

/// histogram of 2K temperature bins starting at 26C, counted over pixels within `[r0,r1]` km
fn temp_histogram (pixels: &[RingPixel], r0: f64, r1: f64)->[f64;TEMP_BINS] {
    let edges: Vec<f64> = (0..TEMP_BINS).map( |i| K_TO_C + 26.0 - i as f64 * 2.0).collect();
    let mut counts = [0.0; TEMP_BINS];

    for p in pixels.iter().filter( |p| p.distance >= r0 && p.distance <= r1) {
        for j in 0..TEMP_BINS-1 {
            if p.temp <= edges[j] && p.temp > edges[j+1] {
                counts[j] += 1.0;
            }
        }
    }
    counts
}

/// number of significant harmonics in a histogram: harmonics 1..N/2 whose amplitude exceeds
/// 10% of the mean (DC) term
pub fn harmonic_count (hist: &[f64])->i32 {
    let n = hist.len();
    let dc: f64 = hist.iter().sum();
    if n < 2 || dc <= 0.0 { return 0 }

    let mut count = 0;
    for k in 1..n/2 {
        let mut c = Complex64::new(0.0, 0.0);
        for (i,v) in hist.iter().enumerate() {
            let a = -TWO_PI * (k * i) as f64 / n as f64;
            c += Complex64::new( v * cos(a), v * sin(a));
        }
        if c.norm() > 0.1 * dc { count += 1 }
    }
    count
}

/// compute all ring measurements for a storm at (lat,lon)
pub fn eye_cloud_temps (grid: &GridField, lat: f64, lon: f64)->RingMeasurements {
    let pixels = load_ring_data( grid, lat, lon);

    let eye_temp = eye_temperature( &pixels);
    let (cw_temp, cw_ring) = cw_cloud_info( &pixels);

    let cloud_fft = harmonic_count( &temp_histogram( &pixels, INNER_RADIUS, OUTER_RADIUS));
    let eye_fft = harmonic_count( &temp_histogram( &pixels, 0.0, INNER_RADIUS));

    let mut sectors: Vec<MeanStdv> = vec![MeanStdv::new(); N_SECTORS];
    let mut eye = MeanStdv::new();
    for p in &pixels {
        let angle = if p.angle == 360.0 { 0.0 } else { p.angle };
        if p.distance >= INNER_RADIUS && p.distance <= OUTER_RADIUS {
            let i = (angle / SECTOR_WIDTH) as usize;
            if i < N_SECTORS { sectors[i].add( p.temp) }
        }
        if p.distance >= 0.0 && p.distance < INNER_RADIUS {
            eye.add( p.temp);
        }
    }

    let r0 = f64::max( 28.0, cw_ring - 40.0);
    let r1 = f64::max( 108.0, cw_ring + 40.0);
    let mut annulus = MeanStdv::new();
    for p in pixels.iter().filter( |p| p.distance >= r0 && p.distance <= r1) {
        annulus.add( p.temp);
    }

    let sector_means: Vec<f64> = sectors.iter().map( |s| s.mean()).collect();
    let cloud2 = sector_means.iter().sum::<f64>() / N_SECTORS as f64;

    let half = N_SECTORS / 2;
    let symmetry = (0..half).map( |i| (sector_means[i] - sector_means[i+half]).abs()).sum::<f64>() / half as f64;

    RingMeasurements {
        eye_temp: eye_temp - K_TO_C,
        cw_cloud_temp: cw_temp - K_TO_C,
        cw_ring,
        cloud_temp: annulus.mean() - K_TO_C,
        cloud2_temp: cloud2 - K_TO_C,
        cloud_symmetry: symmetry,
        eye_stdv: eye.stdv(),
        eye_fft,
        cloud_fft,
    }
}

/// radius of max wind (km) and eye radius (km) from the eye wall extent along the row and column
/// through the storm center. `eye_temp` and `cloud_temp` are in Celsius.
/// Returns `None` if the eye wall is not found within the search bounds
pub fn calc_rmw (grid: &GridField, lat: f64, lon: f64, eye_temp: f64, cloud_temp: f64)->Option<(f64,f64)> {
    let (rows, cols) = (grid.rows() as i64, grid.cols() as i64);
    let (mut cy, mut cx) = nearest_pixel( grid, lat, lon);

    let crit = if cloud_temp >= 223.0 - K_TO_C {
        K_TO_C + (eye_temp + 2.0*cloud_temp) / 3.0
    } else {
        228.0
    };

    let x_max = cols.min( cx + 320);
    let x_min = 0.max( cx - 320);
    let y_max = rows.min( cy + 240);
    let y_min = 0.max( cy - 240);

    let t = |y: i64, x: i64| grid.temp[[y as usize, x as usize]];

    // walk from the center in direction (dy,dx) until the temperature drops to crit
    let walk = |y0: i64, x0: i64, dy: i64, dx: i64|->Option<i64> {
        let (mut y, mut x) = (y0, x0);
        while t(y,x) > crit {
            y += dy;
            x += dx;
            if (dx < 0 && x <= x_min) || (dx > 0 && x >= x_max) || (dy < 0 && y <= y_min) || (dy > 0 && y >= y_max) {
                return None // eye wall not found
            }
        }
        Some( if dx != 0 { x } else { y })
    };

    let (mut x0, mut x1, mut y0, mut y1) = (cx, cx, cy, cy);
    for _ in 0..5 {
        x0 = walk( cy, cx, 0, -1)?;
        x1 = walk( cy, cx, 0, 1)?;
        y0 = walk( cy, cx, -1, 0)?;
        y1 = walk( cy, cx, 1, 0)?;
        cx = (x0 + x1) / 2;
        cy = (y0 + y1) / 2;
    }

    let (clat, clon) = (grid.lat[[cy as usize, cx as usize]], grid.lon[[cy as usize, cx as usize]]);
    let d = |y: i64, x: i64| distance_angle( grid.lat[[y as usize, x as usize]], grid.lon[[y as usize, x as usize]], clat, clon, DistanceUnit::Km).0;
    let avg = (d(cy,x0) + d(cy,x1) + d(y0,cx) + d(y1,cx)) / 4.0;

    if avg > 0.0 {
        Some( (2.8068 + 0.8361 * avg, avg) )
    } else {
        None
    }
}

/// grid index (row,col) of the pixel closest to the given position
pub fn nearest_pixel (grid: &GridField, lat: f64, lon: f64)->(i64,i64) {
    let mut best = (f64::MAX, 0, 0);
    for ((y,x),plat) in grid.lat.indexed_iter() {
        let d = (plat - lat).powi(2) + (grid.lon[[y,x]] - lon).powi(2);
        if d < best.0 { best = (d, y as i64, x as i64) }
    }
    (best.1, best.2)
}
