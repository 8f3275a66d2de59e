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

//! the per storm analysis session that owns all mutable state and runs the pipeline stages in order

use std::path::Path;
use tracing::{debug,info,warn};
use adt_common::{ensure, geo::zenith_angle};
use crate::config::AdtConfig;
use crate::errors::{Result, invalid_input};
use crate::forecast::{first_guess, FirstGuess, ForecastTrack};
use crate::grid::GridField;
use crate::history::{AnalysisRecord, HistoryLedger, InsertOutcome};
use crate::intensity::IntensityEngine;
use crate::listing::list_history;
use crate::mwadj::MwObservation;
use crate::position::{auto_position, pick_final_location, CenterFix, PositionMethod};
use crate::pw::{ckz_params, pressure, wind};
use crate::ringdata::eye_cloud_temps;
use crate::scene::classify;

/// one satellite image to analyze. Grid longitudes use the external (west negative) convention
#[derive(Debug,Clone)]
pub struct ImageInput {
    pub date: i32,
    pub time: i32,
    pub grid: GridField,
    pub sat_type: i32,
    pub over_land: bool,
}

/// where the center search starts
#[derive(Debug,Clone)]
pub enum GuessSource {
    /// analyst provided position (west negative longitude)
    Position { lat: f64, lon: f64 },
    Forecast (ForecastTrack),
}

#[derive(Debug,Clone)]
pub struct AnalysisResult {
    pub record: AnalysisRecord,
    pub first_guess_code: i32,
    pub pressure: f64,
    pub wind: f64,
    pub insert: InsertOutcome,
}

pub struct AnalysisSession {
    config: AdtConfig,
    ledger: HistoryLedger,
    init_raw_t: f64,
    current: Option<AnalysisRecord>,
}

impl AnalysisSession {
    /// create a session, loading the ledger from the configured history file
    pub fn new (config: AdtConfig)->Result<Self> {
        let ledger = match &config.history_file {
            Some(path) => HistoryLedger::load( path)?,
            None => HistoryLedger::new()
        };
        Ok( Self::with_ledger( config, ledger) )
    }

    pub fn with_ledger (config: AdtConfig, ledger: HistoryLedger)->Self {
        let init_raw_t = config.init_raw_t;
        AnalysisSession { config, ledger, init_raw_t, current: None }
    }

    pub fn config (&self)->&AdtConfig { &self.config }
    pub fn ledger (&self)->&HistoryLedger { &self.ledger }
    pub fn init_raw_t (&self)->f64 { self.init_raw_t }

    /// the record of the last analysis
    pub fn current (&self)->Option<&AnalysisRecord> { self.current.as_ref() }

    /// run all stages for one image: first guess, center fix, ring measurements, scene classification,
    /// intensity and ledger insertion
    pub fn analyze (&mut self, input: ImageInput, guess: GuessSource, mw: MwObservation)->Result<AnalysisResult> {
        let cfg = &self.config;
        let ImageInput { date, time, mut grid, sat_type, over_land } = input;

        let mut rec = AnalysisRecord::new( date, time);
        ensure!( rec.calc_time() > 0.0, invalid_input( format!("invalid image date/time {date} {time}")));
        ensure!( !(cfg.init_strength && self.ledger.is_empty() && self.init_raw_t < 1.0),
            invalid_input("new storm without initial strength"));
        grid.check_size( cfg.max_grid_dim)?;
        grid.flip_longitudes();

        rec.sat_type = sat_type;
        rec.land = if over_land { 1 } else { 0 };

        //--- first guess
        let guess = match guess {
            GuessSource::Position { lat, lon } => FirstGuess {
                code: 0, lat, lon: -lon, intensity: None, method: PositionMethod::Manual
            },
            GuessSource::Forecast( track) => {
                first_guess( Some(&track), self.ledger.records(), &rec, cfg.forecast_stale_days, cfg.land_flag)
            }
        };
        ensure!( guess.code >= 0 && guess.lat.abs() <= 90.0,
            invalid_input( format!("no usable first guess position (code {})", guess.code)));
        debug!("first guess {:.2},{:.2} code {}", guess.lat, guess.lon, guess.code);

        //--- center fix
        let auto = auto_position( &grid, guess.lat, guess.lon, cfg)?;
        let fallback = CenterFix { lat: guess.lat, lon: guess.lon, score: 0.0, method: guess.method };
        let fix = pick_final_location( self.ledger.records(), &rec, cfg, self.init_raw_t, fallback, auto);
        rec.latitude = fix.lat;
        rec.longitude = if fix.lon > 180.0 { fix.lon - 360.0 } else { fix.lon };
        rec.auto_pos = fix.method;

        //--- ring measurements
        let m = eye_cloud_temps( &grid, rec.latitude, rec.longitude);
        rec.eye_temp = m.eye_temp;
        rec.cloud_temp = m.cloud_temp;
        rec.cloud2_temp = m.cloud2_temp;
        rec.cw_cloud_temp = m.cw_cloud_temp;
        rec.cw_ring = m.cw_ring;
        rec.cloud_symmetry = m.cloud_symmetry;
        rec.eye_stdv = m.eye_stdv;
        rec.eye_fft = m.eye_fft;
        rec.cloud_fft = m.cloud_fft;

        mw.apply_to( &mut rec);

        //--- scene and intensity
        let (eye, cloud) = classify( &grid, self.ledger.records(), &mut rec, cfg, self.init_raw_t);
        debug!("scene eye={} cloud={}", eye, cloud);

        IntensityEngine::new( &self.config, &mut self.init_raw_t, self.ledger.records_mut()).calculate_intensity( &mut rec, false);

        let cfg = &self.config;
        if let Some(ckz) = ckz_params( cfg) {
            rec.r34 = ckz.r34;
            rec.mslp_env = ckz.penv;
        }
        if let Some(sub_lon) = cfg.sat_subpoint_lon {
            rec.vza = zenith_angle( rec.latitude, -rec.longitude, sub_lon);
        }

        let pres = pressure( rec.ci, rec.latitude, rec.longitude, cfg) + if cfg.use_ckz { 0.0 } else { rec.ci_adj_p };
        let vmax = wind( rec.ci);

        //--- ledger
        let insert = self.ledger.insert( rec.clone(), &self.config, &mut self.init_raw_t)?;
        self.save()?;

        info!("{} {:06} CI {:.1} {:.1}hPa {:.0}kt at {:.2},{:.2} ({})",
              rec.date, rec.time, rec.ci, pres, vmax, rec.latitude, rec.longitude, rec.auto_pos);
        self.current = Some( rec.clone());

        Ok( AnalysisResult { record: rec, first_guess_code: guess.code, pressure: pres, wind: vmax, insert } )
    }

    /// delete all records in the continuous time range and recompute the rest. Returns (modified,deleted)
    pub fn delete (&mut self, start: f64, end: f64)->Result<(usize,usize)> {
        let res = self.ledger.delete_range( start, end, &self.config, &mut self.init_raw_t)?;
        if res.1 > 0 { self.save()? }
        Ok(res)
    }

    pub fn comment (&mut self, start: f64, end: f64, text: &str)->Result<Option<usize>> {
        let n = self.ledger.comment_range( start, end, text);
        if n.is_some() { self.save()? }
        Ok(n)
    }

    pub fn listing (&self, ten_minute_wind: bool)->String {
        list_history( self.ledger.records(), &self.config, ten_minute_wind)
    }

    /// write the ledger if a history file is configured
    pub fn save (&self)->Result<()> {
        if let Some(path) = &self.config.history_file {
            self.ledger.save( path)?;
        }
        Ok(())
    }
}
