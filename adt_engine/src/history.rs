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

//! the per storm history of analysis records and the edit operations on it

use std::{fs, path::Path};
use itertools::Itertools;
use serde::{Deserialize,Serialize};
use tracing::{debug,info};
use adt_common::{ensure, datetime::calc_time};
use crate::config::AdtConfig;
use crate::errors::{Result, history_error, invalid_input};
use crate::intensity::IntensityEngine;
use crate::position::PositionMethod;

pub const UNSET_DATE: i32 = 1900001;
pub const UNSET_POSITION: f64 = 999.5;
pub const UNSET_TEMP: f64 = 99.5;

/// the persisted result of analyzing one image. Longitudes are west positive, temperatures in Celsius
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    pub date: i32,
    pub time: i32,

    pub traw_o: f64,
    pub traw: f64,
    pub tfinal: f64,
    pub ci: f64,
    pub ci_adj_p: f64,

    pub eye_temp: f64,
    pub cloud_temp: f64,
    pub cloud2_temp: f64,
    pub cw_cloud_temp: f64,
    pub cw_ring: f64,

    pub eye_cdo_size: f64,
    pub eye_stdv: f64,
    pub cloud_symmetry: f64,
    pub eye_fft: i32,
    pub cloud_fft: i32,

    pub eye_scene: i32,
    pub cloud_scene: i32,
    pub eye_scene_old: i32,
    pub cloud_scene_old: i32,

    pub ring_cb: i32,
    pub ring_cb_val: i32,
    pub ring_cb_val_max: f64,
    pub ring_cb_val_max_lat: f64,
    pub ring_cb_val_max_lon: f64,

    pub land: i32,
    pub rule8: i32,
    pub rule9: i32,
    pub rapid_diss: i32,
    pub lb_flag: i32,

    pub rmw: f64,
    pub mw_score: f64,
    pub mw_date: i32,
    pub mw_time: i32,

    pub latitude: f64,
    pub longitude: f64,
    pub auto_pos: PositionMethod,

    pub sat_type: i32,
    pub r34: i32,
    pub mslp_env: i32,
    pub vza: f64,
    pub comment: String,
}

impl Default for AnalysisRecord {
    fn default()->Self {
        let mut rec = AnalysisRecord {
            date: UNSET_DATE, time: 0,
            traw_o: 0.0, traw: 0.0, tfinal: 0.0, ci: 0.0, ci_adj_p: 0.0,
            eye_temp: UNSET_TEMP, cloud_temp: UNSET_TEMP, cloud2_temp: UNSET_TEMP, cw_cloud_temp: UNSET_TEMP, cw_ring: 0.0,
            eye_cdo_size: 0.0, eye_stdv: 0.0, cloud_symmetry: 0.0, eye_fft: 0, cloud_fft: 0,
            eye_scene: 0, cloud_scene: 0, eye_scene_old: -1, cloud_scene_old: -1,
            ring_cb: 0, ring_cb_val: 0, ring_cb_val_max: 0.0, ring_cb_val_max_lat: 0.0, ring_cb_val_max_lon: 0.0,
            land: 0, rule8: 0, rule9: 0, rapid_diss: 0, lb_flag: 0,
            rmw: -99.5, mw_score: -99.5, mw_date: UNSET_DATE, mw_time: 0,
            latitude: UNSET_POSITION, longitude: UNSET_POSITION, auto_pos: PositionMethod::Manual,
            sat_type: 0, r34: -99, mslp_env: -999, vza: 0.0,
            comment: String::new(),
        };
        rec
    }
}

impl AnalysisRecord {
    pub fn new (date: i32, time: i32)->Self {
        AnalysisRecord { date, time, ..Default::default() }
    }

    /// continuous time (Julian day plus day fraction)
    #[inline] pub fn calc_time (&self)->f64 { calc_time( self.date, self.time) }

    /// records over land (if land checks are enabled) or without a usable raw T# are skipped by all rules
    #[inline] pub fn is_valid (&self, land_flag: bool)->bool {
        !(land_flag && self.land == 1) && self.traw >= 1.0
    }

    #[inline] pub fn is_land (&self)->bool { self.land == 1 }

    /// blank all derived values but keep the time, position, land and satellite info
    pub fn reset_intensity (&mut self) {
        let keep = AnalysisRecord {
            date: self.date, time: self.time,
            latitude: self.latitude, longitude: self.longitude,
            land: self.land, auto_pos: self.auto_pos, sat_type: self.sat_type,
            ..Default::default()
        };
        *self = keep;
    }

    pub fn has_mw_score (&self)->bool { self.mw_score >= -99.0 }
}

/* #region ledger ***************************************************************************/

/// where a record was put by [`HistoryLedger::insert`]
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum InsertKind {
    Overwrite,
    Insert,
    First,
    Append,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct InsertOutcome {
    pub kind: InsertKind,
    /// number of later records that were recomputed
    pub modified: usize,
}

/// time ordered sequence of analysis records with at most one record per time
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
#[serde(transparent)]
pub struct HistoryLedger {
    records: Vec<AnalysisRecord>,
}

impl HistoryLedger {
    pub fn new()->Self { HistoryLedger { records: Vec::new() } }

    /// build a ledger from records that have to be in strictly increasing time order
    pub fn from_records (records: Vec<AnalysisRecord>)->Result<Self> {
        for (a,b) in records.iter().tuple_windows() {
            ensure!( a.calc_time() < b.calc_time(),
                invalid_input( format!("history record {} {} out of time order", b.date, b.time)));
        }
        Ok( HistoryLedger { records } )
    }

    /// read a JSON ledger. A missing file is an empty ledger
    pub fn load<P: AsRef<Path>> (path: P)->Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            debug!("no history file {}, starting new ledger", path.display());
            return Ok( HistoryLedger::new() )
        }
        let bytes = fs::read(path)?;
        let records: Vec<AnalysisRecord> = serde_json::from_slice(&bytes)?;
        HistoryLedger::from_records( records)
    }

    pub fn save<P: AsRef<Path>> (&self, path: P)->Result<()> {
        let s = serde_json::to_string_pretty( &self.records)?;
        fs::write( path, s)?;
        Ok(())
    }

    #[inline] pub fn len (&self)->usize { self.records.len() }
    #[inline] pub fn is_empty (&self)->bool { self.records.is_empty() }
    #[inline] pub fn records (&self)->&[AnalysisRecord] { &self.records }
    pub fn iter (&self)->impl Iterator<Item=&AnalysisRecord> { self.records.iter() }
    pub fn last (&self)->Option<&AnalysisRecord> { self.records.last() }

    pub(crate) fn records_mut (&mut self)->&mut Vec<AnalysisRecord> { &mut self.records }

    pub(crate) fn replace_records (&mut self, records: Vec<AnalysisRecord>) { self.records = records }

    /// record with exactly the given time
    pub fn find (&self, t: f64)->Option<&AnalysisRecord> {
        self.records.iter().find( |r| r.calc_time() == t)
    }

    /// put the record at its time position and recompute all later records
    pub fn insert (&mut self, rec: AnalysisRecord, config: &AdtConfig, init_raw_t: &mut f64)->Result<InsertOutcome> {
        let t = rec.calc_time();
        ensure!( t > 0.0, invalid_input( format!("invalid record date/time {} {}", rec.date, rec.time)));

        let pos = self.records.iter().position( |r| r.calc_time() >= t);
        let (kind, idx) = match pos {
            Some(i) if self.records[i].calc_time() == t => {
                self.records[i] = rec;
                (InsertKind::Overwrite, i)
            }
            Some(i) => {
                self.check_capacity( config)?;
                self.records.insert( i, rec);
                (InsertKind::Insert, i)
            }
            None => {
                self.check_capacity( config)?;
                let kind = if self.records.is_empty() { InsertKind::First } else { InsertKind::Append };
                self.records.push( rec);
                (kind, self.records.len() - 1)
            }
        };

        let modified = self.recompute_from( idx + 1, config, init_raw_t);
        info!("history {:?} at {:.4}, {} later records recomputed", kind, t, modified);
        Ok( InsertOutcome { kind, modified } )
    }

    /// remove all records within `[start,end]` (continuous times). Returns (modified,deleted) counts
    pub fn delete_range (&mut self, start: f64, end: f64, config: &AdtConfig, init_raw_t: &mut f64)->Result<(usize,usize)> {
        ensure!( start <= end, invalid_input( format!("invalid delete range {start}..{end}")));

        let n0 = self.records.len();
        let first = self.records.iter().position( |r| r.calc_time() >= start);
        self.records.retain( |r| { let t = r.calc_time(); t < start || t > end });
        let deleted = n0 - self.records.len();

        let modified = if deleted > 0 {
            first.map_or( 0, |i| self.recompute_from( i, config, init_raw_t))
        } else { 0 };
        info!("history delete {:.4}..{:.4}: {} deleted, {} recomputed", start, end, deleted, modified);
        Ok( (modified, deleted) )
    }

    /// set the comment of all records within `[start,end]`, returning the number of changed records
    pub fn comment_range (&mut self, start: f64, end: f64, comment: &str)->Option<usize> {
        let mut n = 0;
        for rec in self.records.iter_mut() {
            let t = rec.calc_time();
            if t >= start && t <= end {
                rec.comment = comment.to_string();
                n += 1;
            }
        }
        info!("history comment {:.4}..{:.4}: {} records", start, end, n);
        if n > 0 { Some(n) } else { None }
    }

    fn check_capacity (&self, config: &AdtConfig)->Result<()> {
        ensure!( self.records.len() < config.max_history_records,
            history_error( format!("history exceeds max number of records {}", config.max_history_records)));
        Ok(())
    }

    /// re-run the intensity computation for every record starting at `idx`, in time order
    fn recompute_from (&mut self, idx: usize, config: &AdtConfig, init_raw_t: &mut f64)->usize {
        let mut n = 0;
        for i in idx..self.records.len() {
            let mut rec = self.records[i].clone();
            if rec.is_valid( config.land_flag) {
                let mut engine = IntensityEngine::new( config, init_raw_t, &mut self.records);
                engine.calculate_intensity( &mut rec, true);
            } else {
                rec.reset_intensity();
            }
            self.records[i] = rec;
            n += 1;
        }
        n
    }
}

/* #endregion ledger */
