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

//! text listing of the history ledger

use std::fmt::Write;
use adt_common::datetime::julian_to_cmonth;
use crate::config::AdtConfig;
use crate::history::AnalysisRecord;
use crate::mwadj::MwState;
use crate::pw::{pressure, wind, TEN_MINUTE_WIND_FACTOR};

/// indexed by the rule8 code
pub const RULE8_LABELS: [&str;35] = [
    "NO LIMIT ", "0.5T/6hr ", "1.0T/6hr ", "1.7T/12hr", "2.2T/18hr", "2.7T/24hr", "         ", "         ", "0.2T/hour", "0.5T/hour",
    "NO LIMIT ", "0.5T/6hr ", "1.0T/6hr ", "2.7T/12hr", "3.2T/18hr", "3.7T/24hr", "         ", "         ", "0.2T/hour", "0.5T/hour",
    "NO LIMIT ", "0.5T/6hr ", "0.7T/6hr ", "1.2T/12hr", "1.7T/18hr", "2.2T/24hr", "         ", "         ", "0.2T/hour", "0.5T/hour",
    "MW Adjst ", " MW ON    ", "MW ON    ", "MW HOLD  ", "MW AdjEnd"
];

pub const RULE9_LABELS: [&str;4] = ["OFF", " ON", "WKN", "N/A"];
pub const RAPID_DISS_LABELS: [&str;5] = ["OFF", "FLG", "ON ", "ON ", "N/A"];
pub const EYE_SCENE_LABELS: [&str;6] = ["EYE   ", "EYE/P ", "EYE/L ", "EYE/LR", "EYE/R ", "EYE/OB"];
pub const CLOUD_SCENE_LABELS: [&str;6] = ["UNIFRM", "EMBC  ", "IRRCDO", "CRVBND", "SHEAR ", "EYE MW"];

const NA: &str = "N/A";

#[inline] fn label<'a> (labels: &[&'a str], i: i32)->&'a str {
    usize::try_from(i).ok().and_then( |i| labels.get(i).copied()).unwrap_or( NA)
}

pub fn rule8_label (code: i32)->&'static str { label( &RULE8_LABELS, code) }
pub fn rule9_label (flag: i32)->&'static str { label( &RULE9_LABELS, flag) }
pub fn rapid_diss_label (flag: i32)->&'static str { label( &RAPID_DISS_LABELS, flag) }

pub fn mw_state_label (state: MwState)->&'static str { rule8_label( state.code()) }

/// curved band and shear scenes are listed by their cloud scene, eyes by their eye scene
pub fn scene_label (rec: &AnalysisRecord)->&'static str {
    if rec.cloud_scene == 3 || rec.cloud_scene == 4 || rec.eye_scene >= 3 {
        label( &CLOUD_SCENE_LABELS, rec.cloud_scene)
    } else {
        label( &EYE_SCENE_LABELS, rec.eye_scene)
    }
}

/// a listing line per record. Pressure includes the latitude bias unless the CKZ model is used,
/// in which case it is computed with the gale radius and environmental pressure of the record
pub fn list_history (records: &[AnalysisRecord], config: &AdtConfig, ten_minute_wind: bool)->String {
    let mut s = String::new();
    let wind_label = if ten_minute_wind { "Vmax10" } else { "Vmax  " };
    let _ = writeln!( s, "                  --------Intensity-------  ---Tno Values--  -Tno/CI Rules-  -Temperature-                    ");
    let _ = writeln!( s, "           Time    MSLP/BiasAdj/{}    Fnl Adj Ini   Cnstrnt Wkng Rpd    Cntr   Mean   Scene  EstRMW   MW   Storm Location  Fix", wind_label);
    let _ = writeln!( s, "   Date    (UTC)   CI  (DvT)/BiasAdj/(kts)  Tno Raw Raw    Limit  Flag Wkng  Region  Cloud  Type    (km)  Score   Lat     Lon    Mthd    Sat   VZA  Comments");

    for rec in records {
        s.push_str( &list_record( rec, config, ten_minute_wind));
        s.push('\n');
    }
    s
}

pub fn list_record (rec: &AnalysisRecord, config: &AdtConfig, ten_minute_wind: bool)->String {
    let over_land = rec.land == 1 && rec.ci < 1.0;

    let (pres, adj, vmax, scene, rmw, mw, r8, r9, rd) = if over_land {
        (0.0, 0.0, 0.0, "LAND  ", "  N/A ".to_string(), "  N/A".to_string(), "         ", NA, NA)
    } else {
        let mut cfg = config.clone();
        if cfg.use_ckz {
            cfg.ckz_gale_radius = rec.r34 as f64;
            cfg.ckz_penv = rec.mslp_env as f64;
        }
        let mut vmax = wind( rec.ci);
        if ten_minute_wind { vmax *= TEN_MINUTE_WIND_FACTOR }
        let adj = if cfg.use_ckz { 0.0 } else { rec.ci_adj_p };
        let pres = pressure( rec.ci, rec.latitude, rec.longitude, &cfg) + adj;

        let rmw = if rec.cloud_scene <= 5 && rec.eye_scene <= 2 { format!("{:3} IR", rec.rmw as i32) } else { "  N/A ".to_string() };
        let mw = if rec.mw_score >= -99.0 { format!("{:5.1}", rec.mw_score) } else { "  N/A".to_string() };

        (pres, adj, vmax, scene_label(rec), rmw, mw, rule8_label( rec.rule8), rule9_label( rec.rule9), rapid_diss_label( rec.rapid_diss))
    };

    let latlon = format!("{:6.2} {:7.2}", rec.latitude, rec.longitude);
    format!("{:>9} {:06}  {:3.1} {:6.1}  {:+5.1}  {:5.1}  {:3.1} {:3.1} {:3.1}  {:>8} {:>3}  {:>3}  {:6.2} {:6.2}  {:>6} {:>6} {:>5} {:>15}  {:>5} {:>7} {:4.1} {}",
            julian_to_cmonth( rec.date), rec.time, rec.ci, pres, adj, vmax,
            rec.tfinal, rec.traw, rec.traw_o, r8, r9, rd,
            rec.eye_temp, rec.cloud_temp, scene, rmw, mw, latlon,
            rec.auto_pos.abbr(), rec.sat_type, rec.vza, rec.comment)
}
