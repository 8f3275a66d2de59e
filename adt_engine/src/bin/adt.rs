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

//! command line driver for ADT analyses and history ledger edits

use std::fs;
use anyhow::{anyhow, Result};
use adt_common::{define_cli, check_cli};
use adt_common::datetime::{calc_time, cmonth_to_julian};
use adt_engine::{AdtConfig, AnalysisSession, ForecastTrack, GridField, GuessSource, ImageInput, MwObservation};

define_cli! { ARGS [about="Advanced Dvorak Technique tropical cyclone intensity analysis"] =
    config: Option<String> [help="pathname of RON AdtConfig", long],
    grid: Option<String> [help="pathname of JSON grid (lat,lon west negative,temp in K)", long],
    date: Option<String> [help="image date as yyyyddd or yyyyMONdd", long],
    time: Option<i32> [help="image time hhmmss", long],
    sat: i32 [help="satellite type code", long, default_value="0"],
    land: bool [help="storm center is over land", long],
    lat: Option<f64> [help="first guess latitude", long, allow_negative_numbers=true],
    lon: Option<f64> [help="first guess longitude (west negative)", long, allow_negative_numbers=true],
    forecast: Option<String> [help="pathname of JSON forecast track", long],
    mw_score: Option<f64> [help="microwave eye score", long, allow_negative_numbers=true],
    mw_date: Option<String> [help="microwave date as yyyyddd or yyyyMONdd (default image date)", long],
    mw_time: Option<i32> [help="microwave time hhmmss (default image time)", long],
    list: bool [help="print the history listing", long],
    ten_minute: bool [help="list 10-min instead of 1-min winds", long],
    delete: Option<String> [help="delete records in range: <date>:<hhmmss>,<date>:<hhmmss>", long],
    comment: Option<String> [help="comment records in range: <date>:<hhmmss>,<date>:<hhmmss>,<text>", long]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt::init();

    let config = match &ARGS.config {
        Some(path) => AdtConfig::load( path)?,
        None => AdtConfig::default()
    };
    let mut session = AnalysisSession::new( config)?;

    if let Some(range) = &ARGS.delete {
        let (start, end, _) = parse_range( range, false)?;
        let (modified, deleted) = session.delete( start, end)?;
        println!("deleted {deleted} records, {modified} records recomputed");
    }

    if let Some(range) = &ARGS.comment {
        let (start, end, text) = parse_range( range, true)?;
        match session.comment( start, end, &text)? {
            Some(n) => println!("commented {n} records"),
            None => println!("no records in comment range")
        }
    }

    if let Some(path) = &ARGS.grid {
        run_analysis( &mut session, path)?;
    }

    if ARGS.list {
        print!("{}", session.listing( ARGS.ten_minute));
    }

    Ok(())
}

fn run_analysis (session: &mut AnalysisSession, grid_path: &str)->Result<()> {
    let date = parse_date( ARGS.date.as_deref().ok_or_else( || anyhow!("no --date for image"))?)?;
    let time = ARGS.time.ok_or_else( || anyhow!("no --time for image"))?;

    let grid: GridField = serde_json::from_slice( &fs::read( grid_path)?)?;

    let guess = if let Some(path) = &ARGS.forecast {
        GuessSource::Forecast( ForecastTrack::load( path)?)
    } else if let (Some(lat), Some(lon)) = (ARGS.lat, ARGS.lon) {
        GuessSource::Position { lat, lon }
    } else {
        return Err( anyhow!("either --forecast or --lat and --lon required"))
    };

    let mw = match ARGS.mw_score {
        Some(score) => {
            let mw_date = match &ARGS.mw_date { Some(s) => parse_date(s)?, None => date };
            MwObservation::new( score, mw_date, ARGS.mw_time.unwrap_or(time))
        }
        None => MwObservation::missing()
    };

    let input = ImageInput { date, time, grid, sat_type: ARGS.sat, over_land: ARGS.land };
    let res = session.analyze( input, guess, mw)?;
    let rec = &res.record;

    println!("{} {:06}  {:.2}N {:.2}W ({})", rec.date, rec.time, rec.latitude, rec.longitude, rec.auto_pos);
    println!("  CI {:.1}  Tfinal {:.1}  Traw {:.1}  scene {}/{}", rec.ci, rec.tfinal, rec.traw, rec.eye_scene, rec.cloud_scene);
    println!("  {:.1} hPa  {:.0} kt", res.pressure, res.wind);
    Ok(())
}

fn parse_date (s: &str)->Result<i32> {
    if s.chars().any( |c| c.is_ascii_alphabetic()) {
        Ok( cmonth_to_julian( s)? )
    } else {
        Ok( s.parse::<i32>()? )
    }
}

fn parse_time_spec (s: &str)->Result<f64> {
    let (d, t) = s.split_once(':').unwrap_or( (s, "0"));
    let t = calc_time( parse_date( d.trim())?, t.trim().parse::<i32>()?);
    if t <= 0.0 { Err( anyhow!("invalid date/time '{s}'")) } else { Ok(t) }
}

/// `<start>,<end>[,<text>]`
fn parse_range (s: &str, with_text: bool)->Result<(f64,f64,String)> {
    let mut parts = s.splitn( 3, ',');
    let start = parse_time_spec( parts.next().ok_or_else( || anyhow!("missing range start"))?)?;
    let end = parse_time_spec( parts.next().ok_or_else( || anyhow!("missing range end"))?)?;
    let text = parts.next().unwrap_or("").to_string();
    if with_text && text.is_empty() { return Err( anyhow!("missing comment text")) }
    Ok( (start, end, text) )
}
