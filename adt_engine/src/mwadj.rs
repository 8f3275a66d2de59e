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

//! microwave eye score adjustment. The MW state of a storm is carried in the rule8 code of its
//! history records (30..=34) and evaluated against the whole record sequence on every analysis

use serde::{Deserialize,Serialize};
use tracing::debug;
use adt_common::datetime::calc_time;
use crate::history::AnalysisRecord;

pub const MW_SCORE_ON: f64 = 20.0;
pub const MW_SCORE_HIGH: f64 = 60.0;
pub const MW_T_LOW: f64 = 4.3;
pub const MW_T_MERGE: f64 = 4.8;
pub const MW_T_HIGH: f64 = 5.0;

/// raw score values below this are missing
pub const MW_SCORE_MISSING: f64 = -999.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum MwState {
    /// history record that was merged towards a new MW score
    Transitional = 30,
    FirstOn = 31,
    On = 32,
    Hold = 33,
    Off = 34,
}

impl MwState {
    pub fn from_rule8 (rule8: i32)->Option<Self> {
        match rule8 {
            30 => Some(MwState::Transitional),
            31 => Some(MwState::FirstOn),
            32 => Some(MwState::On),
            33 => Some(MwState::Hold),
            34 => Some(MwState::Off),
            _ => None
        }
    }

    #[inline] pub fn code (&self)->i32 { *self as i32 }

    /// does this state (still) adjust the intensity
    pub fn is_active (&self)->bool { *self != MwState::Off }
}

/// an externally provided microwave eye score
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct MwObservation {
    pub score: Option<f64>,
    pub date: i32,
    pub time: i32,
}

impl MwObservation {
    /// raw scores below -900 are treated as missing
    pub fn new (score: f64, date: i32, time: i32)->Self {
        let score = if score < -900.0 { None } else { Some(score) };
        MwObservation { score, date, time }
    }

    pub fn missing()->Self { MwObservation { score: None, date: 1900001, time: 0 } }

    pub fn raw_score (&self)->f64 { self.score.unwrap_or( MW_SCORE_MISSING) }

    pub fn calc_time (&self)->f64 { calc_time( self.date, self.time) }

    /// store this observation in a record
    pub fn apply_to (&self, rec: &mut AnalysisRecord) {
        rec.mw_score = self.raw_score();
        rec.mw_date = self.date;
        rec.mw_time = self.time;
    }
}

/// result of the MW adjustment. If `applied` is set `value` replaces the raw T# and Rule 8 is skipped
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct MwAdjustment {
    pub applied: bool,
    pub value: f64,
}

/// what the records before the MW time tell us about the MW state
#[derive(Debug,Clone,Default)]
pub struct MwTrack {
    pub last_rule8: i32,
    pub last_score: f64,
    pub last_valid_ci: f64,
    pub last_valid_time: f64,
    pub first_ci: f64,
    pub first_time: f64,
    pub first_time_12h: f64,
    pub currently_on: bool,
    pub records_after: bool,
}

impl MwTrack {
    /// linear ramp from the CI at the first MW record towards `MW_T_MERGE` over 12h
    fn ramp (&self, t: f64)->f64 {
        let span = self.first_time_12h - self.first_time;
        if span <= 0.0 { return MW_T_MERGE }
        let part = 1.0 - (self.first_time_12h - t) / span;
        (MW_T_MERGE - self.first_ci) * part + self.first_ci
    }

    fn target (&self, score: f64, t: f64)->f64 {
        if score < MW_SCORE_HIGH { self.ramp(t) } else { MW_T_HIGH }
    }
}

/// the MW observation being evaluated, in the time frame of the current analysis
#[derive(Debug,Clone)]
pub struct MwEvent {
    pub cur_time: f64,
    pub mw_time: f64,
    pub score: f64,
    pub mw_date: i32,
    pub mw_hms: i32,
    pub land_flag: bool,
}

impl MwEvent {
    fn stamp (&self, rec: &mut AnalysisRecord) {
        rec.mw_score = self.score;
        rec.mw_date = self.mw_date;
        rec.mw_time = self.mw_hms;
    }
}

#[inline] fn set_t (rec: &mut AnalysisRecord, v: f64) {
    rec.traw = v;
    rec.tfinal = v;
    rec.ci = v;
}

#[inline] fn is_mw_on (rule8: i32)->bool { (30..=33).contains(&rule8) }

/// evaluate the MW eye score of `cur` against `history`. This might modify history records, which
/// is done on a copy of the sequence that replaces `history` once the evaluation is complete
pub fn mw_adjust (history: &mut Vec<AnalysisRecord>, cur: &mut AnalysisRecord, raw: f64, land_flag: bool)->MwAdjustment {
    let cur_time = cur.calc_time();

    if cur.mw_score < -900.0 {
        // reuse the last valid history score
        if let Some(last) = history.iter().filter( |r| r.is_valid(land_flag)).last() {
            cur.mw_score = last.mw_score;
            cur.mw_date = last.mw_date;
            cur.mw_time = last.mw_time;
        }
    }

    let ctx = MwEvent {
        cur_time,
        mw_time: calc_time( cur.mw_date, cur.mw_time),
        score: cur.mw_score,
        mw_date: cur.mw_date,
        mw_hms: cur.mw_time,
        land_flag
    };

    let mut applied = ctx.score >= MW_SCORE_ON;
    let mut value = raw;
    if ctx.score >= MW_SCORE_ON && ctx.score <= MW_SCORE_HIGH { value = MW_T_LOW + 0.01 }
    if ctx.score >= MW_SCORE_HIGH { value = MW_T_HIGH + 0.01 }
    if cur_time > ctx.mw_time + 0.5 { applied = false }

    let mut exit = false;

    if cur_time - ctx.mw_time > 0.3333 {
        // MW observation older than 8h
        exit = true;
        let mut last_rule8 = 0;
        let mut last_valid_ci = 0.0;
        let mut non_eir = 0;
        let mut first_hold = true;
        let mut first_hold_time = 0.0;

        for rec in history.iter().filter( |r| r.is_valid(land_flag) && r.calc_time() < cur_time) {
            let t = rec.calc_time();
            last_rule8 = rec.rule8;
            last_valid_ci = rec.ci;
            non_eir = if rec.cloud_scene >= 4 { non_eir + 1 } else { 0 };
            if rec.rule8 == MwState::Hold.code() {
                if first_hold {
                    first_hold_time = t;
                    first_hold = false;
                }
            } else {
                first_hold_time = t;
                first_hold = true;
            }
        }

        let shear_off = non_eir >= 2 && cur.cloud_scene == 4;

        match MwState::from_rule8(last_rule8) {
            Some(MwState::On) | Some(MwState::Hold) if shear_off => {
                cur.rule8 = MwState::Off.code();
                value = raw;
                applied = false;
            }
            Some(MwState::On) => {
                cur.rule8 = MwState::Hold.code();
                value = last_valid_ci;
                applied = true;
            }
            Some(MwState::Hold) => {
                cur.rule8 = MwState::Hold.code();
                value = last_valid_ci;
                applied = true;
                if cur_time - first_hold_time >= 0.25 {
                    value = raw;
                    cur.rule8 = MwState::Off.code();
                    applied = false;
                    cur.comment = "MW OFF HOLD >=6hrs old".to_string();
                }
            }
            _ => {
                applied = false;
                value = raw;
            }
        }

    } else {
        // MW corrections are for non-eye scenes, turn off after three consecutive eyes
        let mut eye_count = 0;
        let mut last_ci = 1.0;
        let mut last_rule8 = 0;
        let mut off = false;

        for rec in history.iter() {
            let t = rec.calc_time();
            if rec.is_valid(land_flag) && t < cur_time {
                if t < ctx.mw_time { last_ci = rec.ci }
                last_rule8 = rec.rule8;
                eye_count = if rec.eye_scene <= 2 { eye_count + 1 } else { 0 };
                if eye_count >= 3 { off = true }
            }
            // re-arm if CI dropped below 4 or MW was turned back on
            if last_ci < 4.0 || last_rule8 == MwState::FirstOn.code() { off = false }
        }
        if cur.eye_scene <= 2 {
            eye_count += 1;
            if eye_count >= 3 { off = true }
        }

        if off {
            if is_mw_on(last_rule8) { cur.rule8 = MwState::Off.code() }
            value = raw;
            exit = true;
            applied = false;
        }
    }

    // land interaction of more than 3h turns MW off
    let mut last_rule8 = 0;
    let mut last_non_land = 0.0;
    let mut over_land = false;
    for rec in history.iter() {
        let t = rec.calc_time();
        if !rec.is_valid(land_flag) {
            if t - last_non_land >= 0.125 { over_land = true }
        } else {
            last_rule8 = rec.rule8;
            last_non_land = t;
            over_land = false;
        }
    }
    if over_land && cur.land == 2 && is_mw_on(last_rule8) {
        cur.rule8 = MwState::Off.code();
        value = raw;
        exit = true;
        applied = false;
    }

    if exit {
        for rec in history.iter_mut().filter( |r| r.calc_time() >= ctx.mw_time) {
            ctx.stamp(rec);
        }
        debug!("MW adjustment exit: rule8={} applied={} value={:.2}", cur.rule8, applied, value);
        return MwAdjustment { applied, value }
    }

    let (mut records, mut track) = merge_backward( history, &ctx, value, applied);

    if track.records_after {
        forward_pass( &mut records, &mut track, &ctx, &mut value, &mut applied);
    }
    *history = records;

    //--- the current record
    let lvci = track.last_valid_ci;
    match MwState::from_rule8( track.last_rule8) {
        Some(MwState::Transitional) => {
            cur.rule8 = MwState::FirstOn.code();
            value = lvci.max(MW_T_LOW);
            applied = true;
        }
        Some(MwState::FirstOn) => {
            cur.rule8 = MwState::On.code();
            value = lvci.max(MW_T_LOW);
            applied = true;
        }
        Some(MwState::On) => {
            cur.rule8 = MwState::On.code();
            applied = true;
            if ctx.score >= MW_SCORE_ON {
                if cur_time <= track.first_time_12h {
                    value = track.target( ctx.score, cur_time);
                } else if cur_time <= ctx.mw_time + 0.5 {
                    value = lvci;
                } else {
                    cur.comment = "MW OFF  >=12hrs old".to_string();
                    cur.rule8 = MwState::Off.code();
                    value = lvci;
                    applied = false;
                }
            } else {
                cur.rule8 = MwState::Hold.code();
                value = lvci;
            }
        }
        Some(MwState::Hold) => {
            if cur_time <= ctx.mw_time + 0.25 {
                cur.rule8 = if ctx.score >= MW_SCORE_ON { MwState::On.code() } else { MwState::Hold.code() };
                value = lvci;
                applied = true;
            } else {
                cur.comment = "MW OFF HOLD >=6hrs old".to_string();
                cur.rule8 = MwState::Off.code();
                value = lvci;
                applied = false;
            }
        }
        Some(MwState::Off) => {
            if ctx.score >= MW_SCORE_ON {
                cur.rule8 = MwState::FirstOn.code();
                value = lvci;
                applied = true;
            } else {
                value = raw;
                applied = false;
            }
        }
        None => {
            value = raw;
            applied = false;
        }
    }

    let value = ((value + 0.05) * 10.0).trunc() / 10.0;
    debug!("MW adjustment: rule8={} applied={} value={:.1}", cur.rule8, applied, value);
    MwAdjustment { applied, value }
}

/// scan the records before the MW time and, if MW just turned on (or got stronger), merge the
/// preceding 12 hours of history towards the MW intensity. Returns the updated sequence
pub fn merge_backward (history: &[AnalysisRecord], ctx: &MwEvent, value: f64, applied: bool)->(Vec<AnalysisRecord>,MwTrack) {
    let mut records = history.to_vec();
    let mut track = MwTrack::default();
    let mut first31 = true;
    let mut rule8 = 0;

    for rec in records.iter().filter( |r| r.calc_time() < ctx.mw_time && r.is_valid(ctx.land_flag)) {
        let t = rec.calc_time();
        track.last_score = rec.mw_score;
        track.last_valid_ci = rec.ci;
        rule8 = rec.rule8;
        track.currently_on = false;
        if (31..=33).contains(&rule8) {
            track.currently_on = true;
            if first31 {
                track.first_ci = rec.ci;
                track.first_time = t;
                track.first_time_12h = t + 0.5;
                first31 = false;
            }
        } else {
            first31 = true;
        }
        if (30..=32).contains(&rule8) {
            track.last_valid_time = t;
        }
    }
    track.last_rule8 = rule8;

    let mw_minus_12h = ctx.mw_time - 0.5;
    let mut ci_12h: Option<(f64,f64)> = None; // (ci,time) of first record in the 12h merge window

    match (track.currently_on, applied) {
        (false, true) => {
            // MW was off and turns on now
            for rec in records.iter_mut() {
                let t = rec.calc_time();
                if t < ctx.mw_time {
                    if rec.is_valid(ctx.land_flag) && t >= mw_minus_12h {
                        let (ci0,t0) = *ci_12h.get_or_insert( (rec.ci, t));
                        if rec.rule8 != MwState::Transitional.code() {
                            let comment = format!("MWinit1={:3.1}/{:3.1}/{:3.1}", rec.traw, rec.tfinal, rec.ci);
                            let part = (t - t0) / (ctx.mw_time - t0);
                            let merged = value.max(ci0);
                            set_t( rec, (merged - ci0) * part + ci0);
                            rec.rule8 = MwState::Transitional.code();
                            rec.comment = comment;
                        }
                    }
                    track.last_valid_ci = rec.ci;
                    track.last_rule8 = MwState::Transitional.code();
                } else {
                    track.records_after = true;
                }
            }
        }
        (true, true) => {
            // MW was on and stays on
            for rec in records.iter_mut() {
                let t = rec.calc_time();
                if t < ctx.mw_time {
                    if track.last_score < MW_SCORE_HIGH && value >= MW_T_HIGH {
                        if rec.is_valid(ctx.land_flag) && t >= mw_minus_12h {
                            let (ci0,t0) = *ci_12h.get_or_insert( (rec.ci, t));
                            if rec.comment.is_empty() {
                                rec.comment = format!("MWinit2={:3.1}/{:3.1}/{:3.1}", rec.traw, rec.tfinal, rec.ci);
                            }
                            let part = (t - t0) / (ctx.mw_time - t0);
                            set_t( rec, (value - ci0) * part + ci0);
                            if rec.rule8 >= MwState::On.code() { rec.rule8 = MwState::On.code() }
                        }
                    } else if track.last_score < MW_SCORE_ON && ctx.score >= MW_SCORE_ON {
                        if rec.is_valid(ctx.land_flag) && t >= track.first_time && rec.rule8 == MwState::Hold.code() {
                            if rec.comment.is_empty() {
                                rec.comment = format!("MWinit3={:3.1}/{:3.1}/{:3.1}", rec.traw, rec.tfinal, rec.ci);
                            }
                            let span = track.first_time_12h - track.first_time;
                            let part = if span > 0.0 { ((t - track.first_time) / span).min(1.0) } else { 1.0 };
                            set_t( rec, (MW_T_MERGE - track.first_ci) * part + track.first_ci);
                            rec.rule8 = MwState::On.code();
                        }
                    }
                    track.last_valid_ci = rec.ci;
                } else {
                    track.records_after = true;
                }
            }
        }
        _ => {
            track.records_after = records.iter().any( |r| r.calc_time() >= ctx.mw_time);
        }
    }

    (records, track)
}

/// advance the MW state over all valid records at or after the MW time
fn forward_pass (records: &mut [AnalysisRecord], track: &mut MwTrack, ctx: &MwEvent, value: &mut f64, applied: &mut bool) {
    for rec in records.iter_mut() {
        let t = rec.calc_time();
        if rec.rule8 == MwState::Off.code() { track.last_rule8 = MwState::Off.code() }
        if !rec.is_valid(ctx.land_flag) { continue }

        if t >= ctx.mw_time {
            match MwState::from_rule8( track.last_rule8) {
                Some(MwState::Transitional) => {
                    rec.rule8 = MwState::On.code();
                    track.last_valid_ci = value.max( track.last_valid_ci);
                    set_t( rec, track.last_valid_ci);
                    track.last_valid_time = t;
                    track.first_ci = rec.ci;
                    track.first_time = t;
                    track.first_time_12h = t + 0.5;
                }
                Some(MwState::FirstOn) => {
                    rec.rule8 = MwState::On.code();
                    if t <= track.first_time_12h {
                        set_t( rec, track.ramp(t));
                    }
                    track.last_valid_time = t;
                }
                Some(MwState::On) => {
                    rec.rule8 = MwState::On.code();
                    if t <= track.first_time_12h {
                        if ctx.score >= MW_SCORE_ON {
                            let v = track.target( ctx.score, t);
                            set_t( rec, v);
                            track.last_valid_ci = v;
                            track.last_valid_time = t;
                        } else {
                            rec.rule8 = MwState::Hold.code();
                            *value = track.last_valid_ci;
                            set_t( rec, track.last_valid_ci);
                        }
                    } else if t <= ctx.mw_time + 0.5 {
                        set_t( rec, track.last_valid_ci);
                        if ctx.score >= MW_SCORE_ON {
                            track.last_valid_time = t;
                        } else {
                            rec.rule8 = MwState::Hold.code();
                            *value = track.last_valid_ci;
                        }
                    } else {
                        rec.rule8 = MwState::Off.code();
                        set_t( rec, track.last_valid_ci);
                        *applied = false;
                    }
                }
                Some(MwState::Hold) => {
                    if t <= track.last_valid_time + 0.25 {
                        if ctx.score >= MW_SCORE_ON {
                            rec.rule8 = MwState::On.code();
                            track.last_valid_time = t;
                        } else {
                            rec.rule8 = MwState::Hold.code();
                        }
                        set_t( rec, track.last_valid_ci);
                        *applied = true;
                    } else {
                        rec.rule8 = MwState::Off.code();
                        rec.comment = "MW OFF HOLD >=6hrs old".to_string();
                        *applied = false;
                    }
                }
                Some(MwState::Off) => {
                    if ctx.score >= MW_SCORE_ON {
                        rec.rule8 = MwState::FirstOn.code();
                        track.last_valid_time = t;
                        set_t( rec, track.last_valid_ci);
                        *applied = true;
                        rec.comment.clear();
                    } else {
                        *applied = false;
                    }
                }
                None => {}
            }
            ctx.stamp(rec);
        }

        track.last_rule8 = rec.rule8;
        track.last_score = rec.mw_score;
    }
}
