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

//! first guess storm positions from forecast tracks, with a fallback to extrapolating the
//! position history

use std::{fs, path::Path};
use serde::{Deserialize,Serialize};
use tracing::{debug,warn};
use adt_common::datetime::calc_time;
use crate::errors::{ForecastError, Result};
use crate::history::AnalysisRecord;
use crate::intensity::{slope_cal, SlopeKind};
use crate::position::PositionMethod;

/// max number of track points used for interpolation
pub const MAX_TRACK_POINTS: usize = 5;

/// status code of a good forecast interpolation
pub const FORECAST_OK: i32 = 43;
/// status code of a failed interpolation that was replaced by a good extrapolation
pub const EXTRAPOLATION_OK: i32 = 46;

/// one forecast fix. Longitudes are east positive (external convention)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct ForecastPoint {
    pub date: i32,
    pub time: i32,
    pub lat: f64,
    pub lon: f64,
    /// forecast intensity (kt)
    pub strength: f64,
}

impl ForecastPoint {
    pub fn calc_time (&self)->f64 { calc_time( self.date, self.time) }
}

#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct ForecastTrack {
    pub points: Vec<ForecastPoint>,
}

impl ForecastTrack {
    pub fn new (points: Vec<ForecastPoint>)->Self { ForecastTrack { points } }

    /// read a JSON track
    pub fn load<P: AsRef<Path>> (path: P)->Result<Self> {
        let bytes = fs::read( path)?;
        Ok( serde_json::from_slice( &bytes)? )
    }
}

/// interpolated position (east positive longitude) and the intensity of the last fix before the image
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ForecastFix {
    pub lat: f64,
    pub lon: f64,
    pub intensity: f64,
}

/// Neville polynomial interpolation of (xs,ys) at `x`
pub fn polint (xs: &[f64], ys: &[f64], x: f64)->std::result::Result<f64,ForecastError> {
    let n = xs.len();
    if n == 0 || n != ys.len() { return Err( ForecastError::NoPoints) }

    let mut ns = 0;
    let mut dif = (x - xs[0]).abs();
    for (i,xi) in xs.iter().enumerate() {
        let d = (x - xi).abs();
        if d < dif {
            ns = i;
            dif = d;
        }
    }

    let mut c = ys.to_vec();
    let mut d = ys.to_vec();
    let mut y = ys[ns];
    let mut s = ns as i64;

    for m in 1..n {
        for i in 0..n-m {
            let ho = xs[i] - x;
            let hp = xs[i+m] - x;
            let den = ho - hp;
            if den == 0.0 { return Err( ForecastError::Interpolation) }
            let w = (c[i+1] - d[i]) / den;
            d[i] = hp * w;
            c[i] = ho * w;
        }
        let dy = if 2 * s < (n - m) as i64 {
            c[s as usize]
        } else {
            s -= 1;
            d[s as usize]
        };
        y += dy;
    }
    Ok(y)
}

/// continuous day value of `t` relative to the Julian date `hold` of the previous year
fn continue_year (t: f64, hold: i64)->f64 {
    let year = (t as i64) / 1000;
    hold as f64 + (t - (year * 1000) as f64)
}

/// interpolate the track at `cur_time`. The track has to start with a fix before the image time
/// that is not older than `stale_days`, and has to extend to or beyond the image time
pub fn interpolate (track: &ForecastTrack, cur_time: f64, stale_days: f64)->std::result::Result<ForecastFix,ForecastError> {
    let mut pts: Vec<ForecastPoint> = track.points.clone();
    pts.sort_by( |a,b| a.calc_time().total_cmp( &b.calc_time()));

    // last fix before the image plus the following ones
    let first = pts.iter().rposition( |p| p.calc_time() < cur_time).unwrap_or(0);
    let pts: Vec<ForecastPoint> = pts.into_iter().skip(first).take( MAX_TRACK_POINTS).collect();
    if pts.is_empty() { return Err( ForecastError::NoPoints) }

    let intensity = pts[0].strength;
    let mut times: Vec<f64> = pts.iter().map( |p| p.calc_time()).collect();
    let lats: Vec<f64> = pts.iter().map( |p| p.lat).collect();
    let mut lons: Vec<f64> = pts.iter().map( |p| p.lon).collect();
    let mut cur_time = cur_time;

    let mut hold: Option<i64> = None;
    let mut change_hemisphere = false;
    let mut last = times[0];
    for i in 1..times.len() {
        if times[i] - last > 100.0 {
            // year change
            let h = *hold.get_or_insert( last as i64);
            times[i] = continue_year( times[i], h);
            last = times[i];
        }
        if (lons[i] - lons[0]).abs() > 180.0 {
            change_hemisphere = true;
            lons[i] += if lons[0] < 0.0 { -360.0 } else { 360.0 };
        }
    }
    if let Some(h) = hold {
        if cur_time - times[0] > 100.0 { cur_time = continue_year( cur_time, h) }
    }

    if cur_time < times[0] && cur_time > times[0] - 0.015 { times[0] = cur_time }

    if times[0] > cur_time || times[times.len()-1] < cur_time {
        return Err( ForecastError::NotBracketing)
    }
    if cur_time - stale_days > times[0] {
        return Err( ForecastError::Stale)
    }

    let lat = polint( &times, &lats, cur_time)?;
    let mut lon = polint( &times, &lons, cur_time)?;
    if change_hemisphere {
        if lon > 180.0 { lon -= 360.0 } else if lon < -180.0 { lon += 360.0 }
    }

    debug!("forecast interpolation {:.2},{:.2} from {} points", lat, lon, times.len());
    Ok( ForecastFix { lat, lon, intensity } )
}

/// the position the automated center search starts from. Longitude is west positive
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct FirstGuess {
    /// 43 for forecast interpolation, 46 for extrapolation, negative if neither worked
    pub code: i32,
    pub lat: f64,
    pub lon: f64,
    pub intensity: Option<f64>,
    pub method: PositionMethod,
}

/// first guess from the forecast track, or extrapolated from the last 12h of history positions
pub fn first_guess (track: Option<&ForecastTrack>, history: &[AnalysisRecord], cur: &AnalysisRecord, stale_days: f64, land_flag: bool)->FirstGuess {
    let cur_time = cur.calc_time();
    let res = match track {
        Some(track) => interpolate( track, cur_time, stale_days),
        None => Err( ForecastError::NoPoints)
    };

    match res {
        Ok(fix) => FirstGuess {
            code: FORECAST_OK, lat: fix.lat, lon: -fix.lon, intensity: Some(fix.intensity), method: PositionMethod::Forecast
        },
        Err(e) => {
            warn!("forecast interpolation failed ({e}), extrapolating history positions");
            let code = 46 - e.code();
            let lat = slope_cal( history, cur, 12.0, SlopeKind::Lat, land_flag);
            let lon = slope_cal( history, cur, 12.0, SlopeKind::Lon, land_flag);
            match (lat, lon) {
                (Some(lat), Some(lon)) if lat.abs() <= 90.0 && lon.abs() <= 180.0 => FirstGuess {
                    code: EXTRAPOLATION_OK, lat, lon, intensity: None, method: PositionMethod::Extrapolation
                },
                _ => FirstGuess {
                    code: -code, lat: -99.99, lon: -99.99, intensity: None, method: PositionMethod::Manual
                }
            }
        }
    }
}
