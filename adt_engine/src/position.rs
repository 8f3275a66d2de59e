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

//! automated storm center positioning: spiral and ring fits merged into a scored position, and the
//! intensity dependent decision whether to use it

use serde_repr::{Deserialize_repr,Serialize_repr};
use strum::{Display,EnumString};
use tracing::{debug,info};
use adt_common::geo::{distance_km, KM_PER_DEG};
use crate::config::AdtConfig;
use crate::errors::Result;
use crate::grid::{GridField, ScoreField};
use crate::history::AnalysisRecord;
use crate::labeling::moat_mask;
use crate::remap::rectify;
use crate::ring::{ring_fit, RingFit};
use crate::spiral::{spiral_center, SpiralFit};

pub const MOAT_THRESHOLD: f64 = 237.0;
pub const MOAT_MAX_RADIUS: f64 = 0.5;

/// expected max forecast error in degrees
const MAX_FORECAST_ERROR: f64 = 1.0;
const SPIRAL_WEIGHT: f64 = 10.0;
const DIST_PENALTY_WEIGHT: f64 = 0.5 / MAX_FORECAST_ERROR;
const PROXIMITY_BONUS: f64 = 4.5;
const PROXIMITY_THRESHOLD: f64 = 0.25;
const COMBO_SCORE_THRESHOLD: f64 = 15.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize_repr,Deserialize_repr,Display,EnumString)]
#[repr(i32)]
pub enum PositionMethod {
    #[default] Manual = 0,
    Forecast = 1,
    Laplacian = 2,
    WarmSpot = 3,
    Spiral = 4,
    Combo = 5,
    Extrapolation = 6,
    External = 7,
}

impl PositionMethod {
    pub fn code (&self)->i32 { *self as i32 }

    /// fixed width label used in history listings
    pub fn abbr (&self)->&'static str {
        match self {
            PositionMethod::Manual => " MAN ",
            PositionMethod::Forecast => "FCST ",
            PositionMethod::Laplacian => "LAPL ",
            PositionMethod::WarmSpot => "WARM ",
            PositionMethod::Spiral => "SPRL ",
            PositionMethod::Combo => "COMBO",
            PositionMethod::Extrapolation => "EXTRP",
            PositionMethod::External => "NETCDF",
        }
    }

    pub fn is_automated (&self)->bool {
        matches!( self, PositionMethod::Spiral | PositionMethod::Combo)
    }
}

/// a scored storm center (west positive longitude)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CenterFix {
    pub lat: f64,
    pub lon: f64,
    pub score: f64,
    pub method: PositionMethod,
}

/// spiral and ring fit around the first guess (`lat0`,`lon0`, west positive) on a grid with west
/// positive longitudes. Non-uniform grids are remapped first
pub fn auto_position (grid: &GridField, lat0: f64, lon0: f64, config: &AdtConfig)->Result<CenterFix> {
    let grid = rectify( grid, config.remap_spline)?;

    let Some(spiral) = spiral_center( &grid, lat0, lon0) else {
        info!("no spiral center found around {:.2},{:.2}", lat0, lon0);
        return Ok( CenterFix { lat: lat0, lon: lon0, score: 0.0, method: PositionMethod::Forecast } )
    };

    let moat = moat_mask( &grid, MOAT_THRESHOLD, MOAT_MAX_RADIUS, true);
    let ring = ring_fit( &grid, &moat, spiral.lat, spiral.lon);

    let fix = calc_scores( &grid, lat0, lon0, &spiral, ring.as_ref());
    info!("auto position {:.2},{:.2} score {:.2} method {}", fix.lat, fix.lon, fix.score, fix.method);
    Ok(fix)
}

/// max ring score of all ring candidates within half a grid increment of (lat,lon)
pub fn find_ring_score (grid: &GridField, ring: &ScoreField, lat: f64, lon: f64)->Option<f64> {
    let (dlon, dlat) = grid.increments();
    let (dlon, dlat) = (dlon / 2.0, dlat / 2.0);

    ring.iter()
        .filter( |p| (p.lat - lat).abs() <= dlat && (p.lon - lon).abs() <= dlon)
        .map( |p| p.score)
        .fold( None, |acc: Option<f64>, s| Some( acc.map_or( s, |a| a.max(s))))
}

/// merge the fine grid spiral candidates with distance penalties, proximity bonus and ring scores
pub fn calc_scores (grid: &GridField, lat0: f64, lon0: f64, spiral: &SpiralFit, ring: Option<&RingFit>)->CenterFix {
    let deg_dist = |lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64| distance_km( lat_a, lon_a, lat_b, lon_b) / KM_PER_DEG;

    // (enhanced spiral score, full spiral score, lat, lon) per candidate
    let scored: Vec<(f64,f64,f64,f64)> = spiral.candidates.iter().map( |p| {
        let penalty = -DIST_PENALTY_WEIGHT * deg_dist( lat0, lon0, p.lat, p.lon);
        let initial = SPIRAL_WEIGHT * (p.score - spiral.score);
        let bonus = if deg_dist( spiral.lat, spiral.lon, p.lat, p.lon) <= PROXIMITY_THRESHOLD { PROXIMITY_BONUS } else { 0.0 };
        (initial + penalty, initial + penalty + bonus, p.lat, p.lon)
    }).collect();

    let mut esp = (-999.99, -99.99, -999.99);
    for (enhanced,_,lat,lon) in &scored {
        if *enhanced > esp.0 { esp = (*enhanced, *lat, *lon) }
    }

    if deg_dist( lat0, lon0, esp.1, esp.2) > MAX_FORECAST_ERROR * 1.15 {
        debug!("enhanced spiral maximum too far from first guess");
        return CenterFix { lat: lat0, lon: lon0, score: 0.0, method: PositionMethod::Forecast }
    }

    let mut combo = (-99.99, -99.99, -999.99);
    if let Some(ring) = ring {
        for (_,full,lat,lon) in &scored {
            if let Some(rs) = find_ring_score( grid, &ring.candidates, *lat, *lon) {
                let s = full + rs;
                if s > combo.0 { combo = (s, *lat, *lon) }
            }
        }
    }

    if combo.0 >= COMBO_SCORE_THRESHOLD {
        CenterFix { lat: combo.1, lon: combo.2, score: combo.0, method: PositionMethod::Combo }
    } else {
        CenterFix { lat: esp.1, lon: esp.2, score: 1.0 + esp.0, method: PositionMethod::Spiral }
    }
}

#[inline] fn is_eye_like (eye_scene: i32, cloud_scene: i32)->bool {
    eye_scene < 3 || (cloud_scene == 1 && eye_scene == 3)
}

/// decide between the automated fix and the first guess position, based on the storm intensity.
/// Weak storms without an established eye need a convincing score
pub fn pick_final_location (history: &[AnalysisRecord], cur: &AnalysisRecord, config: &AdtConfig, init_raw_t: f64,
                            first_guess: CenterFix, auto: CenterFix)->CenterFix {
    let cur_time = cur.calc_time();
    let mut found_eye = false;

    let (tfinal, max_ci, traw) = if config.has_history_file() {
        (9.0, 9.0, 9.0)
    } else if history.is_empty() {
        (init_raw_t, init_raw_t, init_raw_t)
    } else {
        let (mut tfinal, mut max_ci, mut traw) = (cur.traw, cur.traw, cur.traw);
        let mut eye_count = 0;
        for rec in history.iter().filter( |r| r.is_valid( config.land_flag) && r.calc_time() < cur_time) {
            tfinal = rec.tfinal;
            traw = rec.traw;
            max_ci = max_ci.max( rec.ci);
            if is_eye_like( rec.eye_scene, rec.cloud_scene) {
                eye_count += 1;
                if eye_count == 3 { found_eye = true }
            } else {
                eye_count = 0;
            }
        }
        if is_eye_like( cur.eye_scene, cur.cloud_scene) && eye_count == 2 { found_eye = true }
        (tfinal, max_ci, traw)
    };

    let eligible = (traw >= 3.0 && max_ci < 5.0) || (traw >= 3.5 && max_ci >= 5.0);
    let mut score = auto.score;
    if eligible && tfinal <= 4.5 && score < 1.0 && !found_eye {
        debug!("auto position score {:.2} too low for a weak storm without eye", score);
        score = -99.99;
    }

    if eligible && score > 0.0 {
        CenterFix { score, ..auto }
    } else {
        CenterFix { score: 0.0, ..first_guess }
    }
}
