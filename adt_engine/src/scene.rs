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

//! scene type classification from BD curve categories, image geometry and storm history

use serde_repr::{Serialize_repr,Deserialize_repr};
use strum::{Display,EnumString};
use tracing::debug;
use adt_common::K_TO_C;
use crate::cdo::{cdo_size, shear_distance};
use crate::config::AdtConfig;
use crate::grid::GridField;
use crate::history::AnalysisRecord;
use crate::logspiral::{log_spiral, SpiralSearch};
use crate::ringdata::calc_rmw;

/// Dvorak enhancement (BD) curve temperature levels in Celsius
pub const BD_CURVE: [f64;11] = [30.0, 9.0, -30.0, -42.0, -54.0, -64.0, -70.0, -76.0, -80.0, -84.0, -100.0];

pub const LARGE_EYE_RADIUS: f64 = 38.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize_repr,Deserialize_repr,Display,EnumString)]
#[repr(i32)]
pub enum EyeScene {
    Eye = 0,
    Pinhole = 1,
    Large = 2,
    NoEye = 3,
}

impl EyeScene {
    pub fn code (&self)->i32 { *self as i32 }

    pub fn from_code (code: i32)->Option<Self> {
        match code {
            0 => Some(EyeScene::Eye),
            1 => Some(EyeScene::Pinhole),
            2 => Some(EyeScene::Large),
            3 => Some(EyeScene::NoEye),
            _ => None
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize_repr,Deserialize_repr,Display,EnumString)]
#[repr(i32)]
pub enum CloudScene {
    UniformCdo = 0,
    EmbeddedCenter = 1,
    IrregularCdo = 2,
    CurvedBand = 3,
    Shear = 4,
    MwEye = 5,
}

impl CloudScene {
    pub fn code (&self)->i32 { *self as i32 }

    pub fn from_code (code: i32)->Option<Self> {
        match code {
            0 => Some(CloudScene::UniformCdo),
            1 => Some(CloudScene::EmbeddedCenter),
            2 => Some(CloudScene::IrregularCdo),
            3 => Some(CloudScene::CurvedBand),
            4 => Some(CloudScene::Shear),
            5 => Some(CloudScene::MwEye),
            _ => None
        }
    }
}

/// BD curve category and the fractional position within it for a temperature in Celsius.
/// Temperatures outside of the curve are clamped to the first and last category
pub fn bd_level (t: f64)->(usize,f64) {
    if t > BD_CURVE[0] { return (0, 0.0) }

    for i in 0..BD_CURVE.len()-1 {
        if t <= BD_CURVE[i] && t > BD_CURVE[i+1] {
            let frac = if i == 0 { 0.0 } else { (t - BD_CURVE[i]) / (BD_CURVE[i+1] - BD_CURVE[i]) };
            return (i, frac)
        }
    }
    (BD_CURVE.len() - 2, 1.0)
}

/// continuous BD category value
#[inline] pub fn bd_float (t: f64)->f64 {
    let (cat,frac) = bd_level(t);
    cat as f64 + frac
}

#[inline] fn bd_kelvin (level: usize)->f64 { BD_CURVE[level] + K_TO_C }

/// what the classifier needs to know about the preceding records
#[derive(Debug,Clone)]
struct SceneHistory {
    prev_eye: i32,
    prev_cloud: i32,
    t_minus_12h: f64,
    found_12h: bool,
    found_eye: bool,
    max_tfinal: f64,
    last_rule9: i32,
    prev_t: f64,
}

impl SceneHistory {
    fn new (history: &[AnalysisRecord], cur_time: f64, config: &AdtConfig, init_raw_t: f64, cw_bd: f64)->Self {
        if history.is_empty() || !config.run_full_analysis {
            let (prev_cloud, t_minus_12h) = if cw_bd < 3.5 && init_raw_t < 3.5 {
                (3, init_raw_t)
            } else {
                (0, init_raw_t.max(4.0))
            };
            return SceneHistory {
                prev_eye: 3, prev_cloud, t_minus_12h, found_12h: true, found_eye: false,
                max_tfinal: -99.0, last_rule9: 1, prev_t: -99.0
            }
        }

        let mut h = SceneHistory {
            prev_eye: -1, prev_cloud: 3, t_minus_12h: 0.0, found_12h: false, found_eye: false,
            max_tfinal: -99.0, last_rule9: 0, prev_t: -99.0
        };
        let mut prev_valid_t = h.prev_t;
        let mut last_valid_time = 0.0;

        for rec in history {
            let t = rec.calc_time();
            let valid = rec.is_valid( config.land_flag);

            if t < cur_time && valid {
                last_valid_time = t;
                if t >= cur_time - 0.5 && !h.found_12h {
                    h.t_minus_12h = rec.tfinal;
                    h.found_12h = true;
                }
                h.prev_t = rec.tfinal;
                h.prev_cloud = rec.cloud_scene;
                h.prev_eye = rec.eye_scene;
                if h.prev_eye <= 2 { h.found_eye = true }
                if h.prev_cloud == 4 && h.prev_eye == 3 { h.found_eye = false }
                prev_valid_t = h.prev_t;
                h.last_rule9 = rec.rule9;
                if h.prev_t > h.max_tfinal { h.max_tfinal = h.prev_t }

            } else if !valid && t - last_valid_time > 0.5 {
                // more than 12h over land
                h.found_eye = false;
                h.prev_t = prev_valid_t - (t - last_valid_time);
            }
        }

        if !h.found_12h { h.t_minus_12h = h.prev_t }
        h
    }
}

/// classify the eye and cloud scene of the current record. The ring measurements (eye, cloud and
/// cold wall temperatures, symmetry, FFT counts) have to be set in `cur` already
pub fn classify (grid: &GridField, history: &[AnalysisRecord], cur: &mut AnalysisRecord, config: &AdtConfig, init_raw_t: f64)->(EyeScene,CloudScene) {
    let (lat, lon) = (cur.latitude, cur.longitude);
    let (eye_t, cloud_t, cw_t) = (cur.eye_temp, cur.cloud_temp, cur.cw_cloud_temp);

    let (cloud_cat, cloud_frac) = bd_level( cloud_t);
    let (eye_cat, eye_frac) = bd_level( eye_t);
    let (cw_cat, cw_frac) = bd_level( cw_t);
    let cloud_bd = cloud_cat as f64 + cloud_frac;
    let eye_bd = eye_cat as f64 + eye_frac;
    let cw_bd = cw_cat as f64 + cw_frac;

    let cloud_temp_diff = cloud_t - cw_t;
    let eye_cw_bd_diff = cw_bd - eye_bd;
    let eye_cloud_bd_diff = cloud_bd - eye_bd;
    let cloud_cw_bd_diff = cloud_bd - cw_bd;
    let cloud_cw_cat_diff = cloud_cat as i32 - cw_cat as i32;
    let eye_cloud_cat_diff = cloud_cat as i32 - eye_cat as i32;
    let eye_cloud_temp_diff2 = eye_t - cloud_t.min(cw_t);

    let h = SceneHistory::new( history, cur.calc_time(), config, init_raw_t, cw_bd);

    //--- eye region
    let mut eye_factor_c = if cur.eye_stdv > 10.0 { 0.5 } else { 0.0 };
    if h.found_12h && h.prev_eye < 3 && h.max_tfinal > 5.0 {
        eye_factor_c += 0.25;
    }
    let mut eye_factor_e = if h.t_minus_12h <= 4.5 { (h.t_minus_12h - 4.5).max(-1.0) } else { 0.0 };
    if h.last_rule9 > 0 && h.prev_t < 4.0 {
        eye_factor_e -= 0.5;
    }
    let eye_total = (1.0 - (cur.eye_fft - 2) as f64 * 0.1)
        - eye_bd * 0.5
        + eye_factor_c
        + (eye_cloud_bd_diff * 0.25 + eye_cw_bd_diff * 0.5)
        + eye_factor_e;

    let mut eye = if eye_total >= 0.5 { 0 } else { 3 };

    let mut eye_cdo_size = 0.0;
    if let Some(rmw) = config.manual_rmw() {
        cur.rmw = rmw;
        eye_cdo_size = rmw - 1.0;
    } else {
        cur.rmw = calc_rmw( grid, lat, lon, eye_t, cloud_t).map_or( -99.5, |(rmw,_)| rmw);
    }

    if eye == 0 && eye_cdo_size >= LARGE_EYE_RADIUS {
        eye = 2;
    }

    //--- cloud region
    let mut shear = false;
    let mut irregular = false;
    let mut curved_band = true;
    let mut cb_gray = true;
    let mut cb_bw = false;
    let mut embedded = false;

    let mut cloud_factor_e = 0.0;
    if cw_bd > 2.0 {
        if h.t_minus_12h >= 2.5 {
            if eye == 0 { cloud_factor_e = (h.t_minus_12h - 2.5).min(1.0) }
            if h.t_minus_12h >= 3.5 { cloud_factor_e += 1.0 }
        }
        if h.found_12h && h.found_eye { cloud_factor_e += 1.25 }
    }
    let cloud_total = cw_bd * 0.25
        + cloud_bd * 0.25
        + if cur.cloud_fft <= 2 { (cw_bd * 0.25).min(1.5) } else { 0.0 }
        + if h.prev_cloud >= 3 { -0.5 } else { 0.5 }
        + cloud_factor_e;

    if cloud_total < 0.0 {
        shear = true;
    }
    if cloud_total >= 1.0 && eye_cloud_temp_diff2 < 0.0 && cur.cloud_symmetry > 40.0 {
        irregular = true;
    }
    if cloud_total >= 2.0 && cloud_total < 3.0 {
        if eye_cloud_temp_diff2 < 0.0 && cur.cloud_symmetry > 30.0 {
            irregular = true;
        }
        if cw_cat >= 3 {
            if cloud_cw_cat_diff > 0 && cloud_temp_diff < -8.0 {
                cb_gray = false;
                cb_bw = true;
            }
            if eye == 0 || (eye_bd > 1.0 && eye_cloud_cat_diff >= 2) {
                curved_band = false; // eye
            }
            if cloud_cw_bd_diff <= 0.0 && eye_cw_bd_diff < 1.0 {
                curved_band = false; // CDO
            }
        }
    }
    if cloud_total >= 3.0 {
        curved_band = false;
        if cloud_cw_cat_diff < 0 && cloud_temp_diff > 8.0 && cur.cloud_symmetry > 30.0 {
            irregular = true;
            curved_band = true;
        }
    }

    let spiral_amount = |level: usize| {
        log_spiral( grid, lat, lon, bd_kelvin(level), SpiralSearch::Point).map_or( 0, |b| b.amount)
    };

    if !curved_band && cloud_t < cw_t && cw_t < eye_t {
        let amount = spiral_amount( cw_cat + 1);
        if (8..20).contains(&amount) { embedded = true }
    }

    let mut cloud = -99;
    let mut cb_cat = 0;
    let mut cb_amount = 0;
    let mut cb_max = (0, lat, lon);

    if curved_band {
        if shear {
            eye = 3;
            cloud = 4;
            eye_cdo_size = shear_size( grid, lat, lon);
        } else if irregular {
            eye = 3;
            cloud = 2;
        } else {
            let mut found = false;
            let mut level: i32 = 4;
            let mut amount = 0;

            if cb_gray {
                while level >= 2 && !found {
                    amount = spiral_amount( level as usize);
                    if amount >= 8 || level == 2 {
                        if amount > 25 {
                            if level == 4 {
                                cb_gray = false;
                                cb_bw = true;
                                found = true;
                            } else {
                                level = 0;
                            }
                        } else if level == 2 && amount < 7 {
                            // not enough banding, probably shear
                            cb_bw = false;
                            shear = true;
                            if eye_bd > 1.5 || cloud_bd > 2.5 {
                                shear = false;
                                irregular = true;
                            }
                            level -= 1;
                        } else {
                            found = true;
                        }
                    } else {
                        level -= 1;
                    }
                }
            }

            if cb_bw {
                found = false;
                curved_band = false;
                level = 6;
                while level > 4 && !found {
                    amount = spiral_amount( level as usize);
                    if (9..=25).contains(&amount) {
                        found = true;
                    } else {
                        level -= 1;
                    }
                }
            }

            if found {
                cb_cat = level;
                cb_amount = amount;
                eye = 3;
                cloud = 3;
                if let Some(band) = log_spiral( grid, lat, lon, bd_kelvin(level as usize), SpiralSearch::Box) {
                    cb_max = (band.amount, band.lat, band.lon);
                }
            } else {
                cloud = 0;
                curved_band = false;
                embedded = false;
            }
        }
    }

    if !curved_band {
        if shear {
            eye = 3;
            cloud = 4;
            eye_cdo_size = shear_size( grid, lat, lon);
        } else {
            cloud = 0;
            if embedded { cloud = 1 }
            if irregular { cloud = 2 }

            if config.manual_rmw().is_some_and( |rmw| rmw < 12.0) {
                eye = 1;
            }
            if eye_total > -0.25 && eye_total < 1.5
                && eye_cloud_cat_diff >= 2 && cur.eye_fft <= 2
                && cw_bd > 6.0 && cloud <= 1
                && cur.cloud_fft <= 4 && h.t_minus_12h >= 3.5 {
                eye = 1;
            }
        }
    }

    if cloud <= 2 && eye == 3 {
        eye_cdo_size = cdo_size( grid, lat, lon, bd_kelvin(2)).radius;
    }

    cur.eye_scene = eye;
    cur.cloud_scene = cloud;
    cur.eye_scene_old = -1;
    cur.cloud_scene_old = -1;
    cur.eye_cdo_size = eye_cdo_size;
    cur.ring_cb = cb_cat;
    cur.ring_cb_val = cb_amount;
    cur.ring_cb_val_max = cb_max.0 as f64;
    cur.ring_cb_val_max_lat = cb_max.1;
    cur.ring_cb_val_max_lon = cb_max.2;

    debug!("scene: eye={} (factor {:.2}) cloud={} (factor {:.2}) size={:.1}", eye, eye_total, cloud, cloud_total, eye_cdo_size);

    (EyeScene::from_code(eye).unwrap_or(EyeScene::NoEye), CloudScene::from_code(cloud).unwrap_or(CloudScene::UniformCdo))
}

/// shear scene size: distance to the shear threshold isotherm, at least 4km
fn shear_size (grid: &GridField, lat: f64, lon: f64)->f64 {
    let threshold = (BD_CURVE[2] + BD_CURVE[3]) / 2.0 + K_TO_C;
    shear_distance( grid, lat, lon, threshold).unwrap_or(0.0).max(4.0)
}
