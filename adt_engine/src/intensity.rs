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

//! the Dvorak intensity rules. Raw T# from the scene regression, Rule 8 rate limits, the MW
//! adjustment, time averaged final T# and the Rule 9 CI, all evaluated against the storm history

use tracing::{debug,warn};
use adt_common::{sqrt, abs};
use adt_common::geo::{ocean_basin, regression_domain, OceanBasin};
use crate::config::AdtConfig;
use crate::history::AnalysisRecord;
use crate::mwadj::{mw_adjust, MwState};
use crate::scene::BD_CURVE;

/* #region regression tables ******************************************************************/

// rows are (Atlantic,Pacific) regression domains, columns BD curve levels
const EYE_BASE: [[f64;11];2] = [
    [1.00, 2.00, 3.25, 4.00, 4.75, 5.25, 5.75, 6.50, 7.25, 7.75, 8.25],
    [1.50, 2.25, 3.30, 3.85, 4.50, 4.75, 5.15, 5.50, 6.00, 6.25, 6.75]
];
const CLOUD_BASE: [[f64;11];2] = [
    [2.00, 2.40, 3.25, 3.50, 3.75, 4.00, 4.10, 4.20, 4.30, 4.40, 4.70],
    [2.05, 2.40, 3.00, 3.20, 3.40, 3.55, 3.65, 3.75, 3.80, 3.90, 4.10]
];

/// T# for each 20% of curved band wrap around the center
const CURVED_BAND_T: [f64;7] = [1.5, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];

const SHEAR_DIST: [f64;6] = [0.0, 35.0, 50.0, 80.0, 110.0, 140.0];
const SHEAR_T: [f64;6] = [3.50, 3.00, 2.50, 2.25, 2.00, 1.50];

// Rule 8 limits, rows are (shear, eye, other) scene categories
//   columns 1..5: 1h 6h 12h 18h 24h, 6: post-MW eye 6h, 8: first 6h 1h, 9: Velden 1h
const RULE8_LIMITS: [[f64;10];3] = [
    [0.0, 0.51, 1.01, 1.71, 2.21, 2.71, 0.0, 0.0, 0.21, 0.51],
    [0.0, 0.51, 1.01, 2.71, 3.21, 3.71, 1.31, 0.0, 0.21, 0.51],
    [0.0, 0.51, 0.71, 1.21, 1.71, 2.21, 0.0, 0.0, 0.21, 0.51]
];

const EYE_TEMP_DIFF_F: [f64;2] = [0.011, 0.015];
const EYE_SYM_F: [f64;2] = [-0.015, -0.015];
const CDO_SIZE_F: [f64;2] = [0.002, 0.001];
const CLOUD_SYM_F: [f64;2] = [-0.030, -0.015];

/* #endregion regression tables */

/// Rule 8 scene categories
const CAT_SHEAR: usize = 0;
const CAT_EYE: usize = 1;
const CAT_OTHER: usize = 2;

#[inline] fn trunc_t (t: f64)->f64 { ((t + 0.01) * 10.0).trunc() / 10.0 }

#[inline] fn clamp_to (prior: f64, limit: f64, t: f64)->f64 {
    f64::max( prior - limit, f64::min( prior + limit, t))
}

/// what `slope_cal` regresses over time
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum SlopeKind { Tfinal, Traw, Lat, Lon }

impl SlopeKind {
    fn is_intensity (&self)->bool { matches!( self, SlopeKind::Tfinal | SlopeKind::Traw) }

    fn value (&self, rec: &AnalysisRecord)->f64 {
        match self {
            SlopeKind::Tfinal => rec.tfinal,
            SlopeKind::Traw => rec.traw,
            SlopeKind::Lat => rec.latitude,
            SlopeKind::Lon => rec.longitude,
        }
    }
}

/// the intensity computation for one record against the preceding history. The engine only
/// borrows the history and the initial strength state from its owner
pub struct IntensityEngine<'a> {
    config: &'a AdtConfig,
    init_raw_t: &'a mut f64,
    history: &'a mut Vec<AnalysisRecord>,
}

impl<'a> IntensityEngine<'a> {
    pub fn new (config: &'a AdtConfig, init_raw_t: &'a mut f64, history: &'a mut Vec<AnalysisRecord>)->Self {
        IntensityEngine { config, init_raw_t, history }
    }

    #[inline] fn is_valid (&self, rec: &AnalysisRecord)->bool { rec.is_valid( self.config.land_flag) }

    /// compute raw T#, final T# and CI for `cur`. `redo` is set when recomputing an existing
    /// record, in which case the MW observation stored in that record is used
    pub fn calculate_intensity (&mut self, cur: &mut AnalysisRecord, redo: bool) {
        let cfg = self.config;
        let mut traw = 0.0;
        let mut mw_applied = false;

        if redo {
            debug!("redo intensity {} {}, MW {} {}", cur.date, cur.time, cur.mw_date, cur.mw_time);
        }

        if !(cfg.land_flag && cur.land == 1) {
            (traw, mw_applied) = self.tno_raw( cur);
            cur.traw = traw;
        }

        if !cfg.run_full_analysis {
            // spot analysis, raw T# only
            cur.tfinal = traw;
            cur.ci = traw;
            cur.ci_adj_p = self.latbias( cur);
            cur.rule9 = 0;

        } else if (self.history.is_empty() && cfg.init_strength && cfg.has_history_file()) || mw_applied {
            cur.tfinal = traw;
            cur.ci = traw;
            cur.ci_adj_p = 0.0;
            if mw_applied {
                let (ci, rule9) = self.ci_no( cur);
                cur.ci = ci;
                cur.rule9 = rule9;
            } else {
                cur.rule9 = 0;
            }

        } else {
            cur.tfinal = self.tno_final( cur);
            let (ci, rule9) = self.ci_no( cur);
            cur.ci = ci;
            cur.rule9 = rule9;
        }

        debug!("intensity {} {}: traw={:.1} tfinal={:.1} ci={:.1} rule8={} rule9={}",
               cur.date, cur.time, cur.traw, cur.tfinal, cur.ci, cur.rule8, cur.rule9);
    }

    /// raw T# of the current scene, constrained by Rule 8 or replaced by the MW adjustment.
    /// Returns the value and if the MW adjustment was applied
    pub fn tno_raw (&mut self, cur: &mut AnalysisRecord)->(f64,bool) {
        let cfg = self.config;
        let lf = cfg.land_flag;
        let cur_time = cur.calc_time();
        let init = *self.init_raw_t;
        let has_file = cfg.has_history_file();

        let mut first48 = false;
        let mut prev_ci = 0.0;

        if self.history.is_empty() && has_file {
            if cfg.init_strength {
                cur.traw_o = init;
                return (init, false)
            }
        } else {
            if let Some(first) = self.history.first() {
                first48 = cur_time - first.calc_time() <= 2.0;
            }

            let mut last_idx = 0;
            let mut last_time = 1900001.0;
            for (i,rec) in self.history.iter().enumerate() {
                let t = rec.calc_time();
                if t > cur_time { break }
                if self.is_valid(rec) {
                    if t == cur_time && i == 0 && init != 0.0 {
                        // first record of a non-empty history
                        cur.traw_o = init;
                        return (init, false)
                    }
                    last_idx = i;
                    last_time = t;
                }
            }

            prev_ci = if has_file { self.history.get(last_idx).map_or( 0.0, |r| r.ci) } else { 4.0 };

            if cur_time - last_time > 1.0 && has_file {
                warn!("history gap of more than 24h before {} {}, re-initializing", cur.date, cur.time);
                cur.traw_o = init;
                *self.init_raw_t = -1.0;
                return (init, false)
            }
        }

        let domain = regression_domain( cur.latitude, cur.longitude, cfg.domain).index();
        let (cat, frac) = cloud_bd_category( cur.cloud_temp);

        if cur.eye_scene == 1 {
            // pinhole eye
            cur.eye_temp = (cur.eye_temp + 9.0) / 2.0;
        }

        let (t, rule8_cat) = if cur.cloud_scene == 3 {
            let amount = i32::min( 30, cur.ring_cb_val + 1);
            let pct = (amount / 5) as usize;
            let mult = if pct == 1 { 0.2 } else { 0.1 };
            let mut t = CURVED_BAND_T[pct] + mult * (amount - pct as i32 * 5) as f64;
            if cur.ring_cb == 5 { t = f64::min( 4.0, t + 0.5) }
            if cur.ring_cb == 6 { t = f64::min( 4.5, t + 1.0) }
            (t, CAT_OTHER)

        } else if cur.cloud_scene == 4 {
            let d = cur.eye_cdo_size;
            let mut t = SHEAR_DIST.windows(2).zip( SHEAR_T.windows(2))
                .find( |(dw,_)| d >= dw[0] && d < dw[1])
                .map_or( 1.5, |(dw,tw)| tw[0] + (d - dw[0]) / (dw[1] - dw[0]) * (tw[1] - tw[0]));
            if first48 {
                t = f64::min( 2.5, t);
                debug!("constraining shear intensity to 2.5 during first 48h");
            }
            (t, CAT_SHEAR)

        } else if cur.eye_scene <= 2 {
            let base = &EYE_BASE[domain];
            let mut t = base[cat] + frac * (base[cat+1] - base[cat])
                + EYE_TEMP_DIFF_F[domain] * (cur.eye_temp - cur.cloud_temp)
                + EYE_SYM_F[domain] * cur.cloud_symmetry;
            t = f64::min( t, 9.0);
            if cur.eye_scene == 2 { t = f64::min( t - 0.5, 6.5) } // large eye
            (t, CAT_EYE)

        } else {
            let base = &CLOUD_BASE[domain];
            let mut t = base[cat] + frac * (base[cat+1] - base[cat])
                + CDO_SIZE_F[domain] * cur.eye_cdo_size
                + CLOUD_SYM_F[domain] * cur.cloud_symmetry
                - 0.1;
            match cur.cloud_scene {
                0 => {
                    if prev_ci >= 4.5 { t += (prev_ci - 4.5).clamp( 0.0, 1.0) }
                    if prev_ci <= 3.0 { t += (prev_ci - 3.0).clamp( -1.0, 0.0) }
                }
                1 => { t += (prev_ci - 4.0).clamp( 0.0, 1.5) }
                2 => { t = (t + 0.3).clamp( 2.5, 3.5) }
                _ => {}
            }
            (t, CAT_OTHER)
        };

        let t = trunc_t(t);
        cur.traw_o = t;

        let mw = mw_adjust( &mut *self.history, cur, t, lf);
        let mut t = trunc_t( mw.value);

        let mw_off = cur.rule8 == MwState::Off.code();
        let post_mw_eye = mw_off && rule8_cat == CAT_EYE;

        if !mw.applied {
            if !self.history.is_empty() {
                t = self.rule8( cur, cur_time, t, rule8_cat, post_mw_eye);
            }
            if mw_off { cur.rule8 = MwState::Off.code() }
        }

        (t, mw.applied)
    }

    /// rate of change limits against the values 1, 6, 12, 18 and 24 hours before `cur_time`
    fn rule8 (&self, cur: &mut AnalysisRecord, cur_time: f64, t0: f64, cat: usize, post_mw_eye: bool)->f64 {
        let limits = &RULE8_LIMITS[cat];
        let mut t = t0;

        // (window start, found, final T#)
        let windows = [0.05, 0.26, 0.51, 0.76, 1.01];
        let mut prior: [Option<f64>;5] = [None; 5];
        let mut raw_1h = t0;
        let mut raw_6h = t0;
        let mut raw_6h_time = cur_time;

        let first_6h = self.history.first().map_or( false, |r| r.calc_time() >= cur_time - 0.26);

        let mut prev_final = t0;
        let mut prev_rd = 0;
        let mut prev_rule9 = 0;
        let mut eye_count = 0;
        let mut non_eye_count = 0;
        let mut velden_flag = false;
        let mut apply_velden = true;

        for rec in self.history.iter() {
            let rt = rec.calc_time();
            if rt >= cur_time { break }
            if !self.is_valid(rec) { continue }

            for (i,w) in windows.iter().enumerate() {
                if prior[i].is_none() && rt >= cur_time - w {
                    prior[i] = Some( rec.tfinal);
                    if i == 0 { raw_1h = rec.traw }
                    if i == 1 {
                        raw_6h = rec.traw;
                        raw_6h_time = rt;
                    }
                }
            }

            prev_final = rec.tfinal;
            prev_rule9 = rec.rule9;
            prev_rd = rec.rapid_diss;
            if rec.eye_scene <= 2 {
                eye_count += 1;
                non_eye_count = 0;
                if eye_count >= 3 || velden_flag {
                    apply_velden = false;
                    velden_flag = true;
                }
            } else {
                eye_count = 0;
                non_eye_count += 1;
                if non_eye_count >= 3 {
                    apply_velden = true;
                    velden_flag = false;
                }
            }
            if prev_rd >= 2 { apply_velden = false }
        }

        if cur.land == 2 {
            if cur.eye_scene <= 2 {
                if eye_count >= 2 || velden_flag { apply_velden = false }
            } else {
                apply_velden = true;
            }
        }

        let base_code = cat as i32 * 10;
        cur.rule8 = base_code;
        let prior_t = |i: usize| prior[i].unwrap_or( t0);

        if prev_final < 4.0 {
            if first_6h {
                if prior[0].is_some() {
                    if abs( raw_1h - t) > limits[8] {
                        t = clamp_to( raw_1h, limits[8], t);
                        cur.rule8 = base_code + 8;
                    }
                } else {
                    // 0.1 per hour since the 6h raw value
                    let d = 0.1 * (abs( cur_time - raw_6h_time) / 0.0416);
                    if t > raw_6h + d || t < raw_6h - d {
                        t = f64::max( raw_6h - d, f64::min( raw_6h + d, t));
                        cur.rule8 = base_code + 8;
                    }
                }
            } else {
                if abs( prior_t(0) - t) > limits[9] && prior[0].is_some() && apply_velden {
                    t = clamp_to( prior_t(0), limits[9], t);
                    cur.rule8 = base_code + 9;
                }
                // a storm weakening under rule 9 gets the tighter 6h limit
                let (limit_6h, code_6h) = if prev_rule9 < 2 { (limits[2], 2) } else { (limits[1], 1) };
                if abs( prior_t(1) - t) > limit_6h && prior[1].is_some() {
                    t = clamp_to( prior_t(1), limit_6h, t);
                    cur.rule8 = base_code + code_6h;
                }
            }
        } else {
            if abs( prior_t(0) - t) > limits[9] && prior[0].is_some() && apply_velden {
                t = clamp_to( prior_t(0), limits[9], t);
                cur.rule8 = base_code + 9;
            }

            let (limit_6h, code_6h) = if post_mw_eye { (limits[6], 6) } else { (limits[2], 2) };
            if abs( prior_t(1) - t) > limit_6h && prior[1].is_some() {
                t = clamp_to( prior_t(1), limit_6h, t);
                cur.rule8 = base_code + code_6h;
            } else if abs( prior_t(2) - t) > limits[3] && prior[2].is_some() {
                t = clamp_to( prior_t(2), limits[3], t);
                cur.rule8 = base_code + 3;
            } else if abs( prior_t(3) - t) > limits[4] && prior[3].is_some() {
                t = clamp_to( prior_t(3), limits[4], t);
                cur.rule8 = base_code + 4;
            } else if abs( prior_t(4) - t) > limits[5] && prior[4].is_some() {
                t = clamp_to( prior_t(4), limits[5], t);
                cur.rule8 = base_code + 5;
            }
        }

        if cur.rule8 != base_code {
            debug!("rule 8 ({}) constrained raw T# {:.1} to {:.1}", cur.rule8, t0, t);
        }
        t
    }

    /// time averaged raw T# over the configured trailing window
    pub fn tno_final (&self, cur: &AnalysisRecord)->f64 {
        let window = self.config.time_avg_window;
        let hours = window.days() * 24.0;
        let weighted = window.is_weighted();
        let cur_time = cur.calc_time();
        let begin = cur_time - window.days();

        let mut sum = 0.0;
        let mut weights = 0.0;
        let mut found = false;

        for rec in self.history.iter() {
            let t = rec.calc_time();
            if t >= begin && t < cur_time {
                if self.is_valid(rec) {
                    let w = if weighted { hours - (cur_time - t) * 24.0 } else { hours };
                    sum += w * rec.traw;
                    weights += w;
                    found = true;
                }
            } else if found {
                break
            }
        }

        if found {
            sum += hours * cur.traw;
            weights += hours;
            trunc_t( sum / weights)
        } else {
            cur.traw
        }
    }

    /// Rule 9 CI and the rule 9 flag. Also sets the rapid dissipation code and pressure bias of `cur`
    pub fn ci_no (&self, cur: &mut AnalysisRecord)->(f64,i32) {
        let cur_time = cur.calc_time();

        if self.history.is_empty() {
            let flag = if *self.init_raw_t >= 6.0 { 2 } else { 0 };
            cur.ci_adj_p = self.latbias( cur);
            return (cur.traw, flag)
        }

        if (30..=33).contains( &cur.rule8) {
            // MW adjustment holds the intensity
            cur.ci_adj_p = self.latbias( cur);
            return (cur.tfinal, 0)
        }

        let mut prev_ci = 0.0;
        let mut prev_rule9 = 0;
        let mut prev_rd = 0;
        let mut max_6h = 0.0;
        let mut min_rd = 99;
        let mut land_only = true;
        let mut n_before = 0;

        for rec in self.history.iter() {
            let t = rec.calc_time();
            if t >= cur_time { break }
            n_before += 1;
            if !self.is_valid(rec) { continue }

            prev_ci = rec.ci;
            prev_rule9 = rec.rule9;
            prev_rd = rec.rapid_diss;
            if t >= cur_time - 0.25 {
                land_only = false;
                min_rd = min_rd.min( rec.rapid_diss);
                max_6h = f64::max( max_6h, rec.tfinal);
            }
        }

        let tfinal = cur.tfinal;
        if n_before == 0 {
            cur.ci_adj_p = self.latbias( cur);
            return (tfinal, 0)
        }

        let east_pacific = ocean_basin( cur.latitude, cur.longitude) == Some(OceanBasin::EastPacific);
        let slope6 = self.slope_cal( cur, 6.0, SlopeKind::Traw).unwrap_or(0.0);

        let mut additive = 1.0;
        let mut rd;
        if prev_rd <= 1 {
            rd = 0;
            if (!east_pacific && slope6 >= 2.0) || (east_pacific && slope6 >= 1.5) { rd = 1 }
            if min_rd == 1 && rd == 1 {
                additive = 0.5;
                rd = 2;
            }
        } else {
            additive = 0.5;
            rd = 2;
            if (!east_pacific && slope6 < 1.5) || (east_pacific && slope6 < 1.0) { rd = 3 }
            if min_rd == 3 && rd == 3 {
                additive = 1.0;
                rd = 0;
            }
        }

        let mut ci = f64::min( tfinal + additive, f64::max( max_6h, tfinal));
        let mut rule9 = prev_rule9;
        if ci > tfinal { rule9 = 1 }
        if prev_rule9 == 1 && prev_ci <= tfinal { rule9 = 0 }

        if land_only {
            rule9 = 0;
            ci = cur.traw;
            rd = 0;
        }

        cur.ci_adj_p = self.latbias( cur);
        cur.rapid_diss = rd;
        (ci, rule9)
    }

    /// MSLP correction for storms that are in an enhanced IR scene. Sets the bias flag of `cur`
    pub fn latbias (&self, cur: &mut AnalysisRecord)->f64 {
        if self.config.use_ckz { return 0.0 }

        let (lb, mult) = self.scene_search( cur);
        cur.lb_flag = lb;

        if lb >= 2 {
            let (lat, lon) = (cur.latitude, cur.longitude);
            if lat >= 0.0 && (-100.0..=-40.0).contains(&lon) {
                0.0
            } else {
                mult * (7.325 - 0.302 * abs(lat))
            }
        } else {
            0.0
        }
    }

    /// bias flag and merge factor from how long the storm has been in an enhanced IR scene over
    /// the trailing 6 hours
    pub fn scene_search (&self, cur: &AnalysisRecord)->(i32,f64) {
        let cfg = self.config;
        if self.history.is_empty() && cfg.init_strength && cfg.has_history_file() { return (0, -999.9) }
        if !cfg.has_history_file() { return (2, 1.0) }
        // flag kept when the trailing 6h are not all enhanced IR scenes
        let seed = if (2..=5).contains( &cur.cloud_scene) { 0 } else { -1 };

        let cur_time = cur.calc_time();
        let mut last_lb = 0;
        let mut eir = true;
        let mut first_time: Option<f64> = None;
        let mut merge_first: Option<f64> = None;

        for rec in self.history.iter() {
            let t = rec.calc_time();
            if t < cur_time && self.is_valid(rec) {
                last_lb = rec.lb_flag;
                if t >= cur_time - 0.26 && eir {
                    first_time.get_or_insert(t);
                    if rec.lb_flag == 0 { eir = false }
                    if rec.lb_flag == 2 { merge_first.get_or_insert(t); }
                }
            }
        }

        match first_time {
            None => (if last_lb >= 1 { 2 } else { last_lb }, 1.0),
            Some(first) if eir => {
                let merge = merge_first.unwrap_or( cur_time);
                let span = cur_time - first;
                let mult = if span > 0.0 { (cur_time - merge) / span } else { 1.0 };
                (2, mult)
            }
            Some(_) => (seed, -999.0)
        }
    }

    /// see [`slope_cal`]
    pub fn slope_cal (&self, cur: &AnalysisRecord, hours: f64, kind: SlopeKind)->Option<f64> {
        slope_cal( &self.history[..], cur, hours, kind, self.config.land_flag)
    }
}

/// least squares slope (per day, 0.1 precision) of an intensity value over the trailing `hours`,
/// or the extrapolated current position for `Lat`/`Lon`. The intensity slope includes the
/// current record and is 0 if there are not enough points. Position returns `None` then
pub fn slope_cal (history: &[AnalysisRecord], cur: &AnalysisRecord, hours: f64, kind: SlopeKind, land_flag: bool)->Option<f64> {
    let cur_time = cur.calc_time();
    let begin = cur_time - hours / 24.0;

    let mut n = 0usize;
    let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let mut first_lon: Option<f64> = None;
    let mut found = false;

    for rec in history.iter() {
        let t = rec.calc_time();
        if t < cur_time && t >= begin {
            if kind.is_intensity() && !rec.is_valid(land_flag) { continue }

            let x = cur_time - t;
            let mut y = kind.value(rec);
            if kind == SlopeKind::Lon {
                match first_lon {
                    None => first_lon = Some(y),
                    Some(lon0) => {
                        if lon0 > 100.0 && y < -100.0 { y += 360.0 }
                        if lon0 < -100.0 && y > 100.0 { y -= 360.0 }
                    }
                }
            }
            sx += x;
            sy += y;
            sxx += x*x;
            syy += y*y;
            sxy += x*y;
            n += 1;
            found = true;
        } else if found {
            break
        }
    }

    let min_count = if kind.is_intensity() {
        let y = kind.value(cur);
        sy += y;
        syy += y*y;
        n += 1;
        6
    } else {
        4
    };

    if n < min_count {
        return if kind.is_intensity() { Some(0.0) } else { None }
    }

    let nf = n as f64;
    let (mx, my) = (sx / nf, sy / nf);
    let vx = sxx / nf - mx*mx;
    let vy = syy / nf - my*my;
    let cov = sxy / nf - mx*my;

    let slope = if vx.abs() <= 0.0001 || vy.abs() <= 0.0001 {
        0.0
    } else {
        let r = cov / sqrt( vx * vy);
        r * sqrt( vy / vx)
    };
    let slope = (slope * 10.0).trunc() / 10.0;

    match kind {
        SlopeKind::Tfinal | SlopeKind::Traw => Some(slope),
        SlopeKind::Lat => Some( my - slope * mx),
        SlopeKind::Lon => {
            let mut lon = my - slope * mx;
            if lon < -180.0 { lon += 360.0 }
            if lon > 180.0 { lon -= 360.0 }
            Some(lon)
        }
    }
}

/// BD category and fractional position of the cloud temperature (Celsius), clamped to the curve
fn cloud_bd_category (t: f64)->(usize,f64) {
    for i in 0..BD_CURVE.len()-1 {
        if t <= BD_CURVE[i] && t > BD_CURVE[i+1] {
            return (i, (t - BD_CURVE[i]) / (BD_CURVE[i+1] - BD_CURVE[i]))
        }
    }
    if t > BD_CURVE[0] { (0, 0.0) } else { (BD_CURVE.len() - 2, 1.0) }
}
