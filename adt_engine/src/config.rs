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

use std::path::{Path,PathBuf};
use serde::{Deserialize,Serialize};
use adt_common::geo::BasinDomain;
use adt_common::ron::load_ron_config;
use crate::errors::Result;

/// time averaging scheme for the final T-number
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum TimeAvgWindow {
    ThreeHour,
    #[default] SixHourWeighted,
    TwelveHour
}

impl TimeAvgWindow {
    /// trailing window length in days
    pub fn days (&self)->f64 {
        match self {
            TimeAvgWindow::ThreeHour => 0.125,
            TimeAvgWindow::SixHourWeighted => 0.25,
            TimeAvgWindow::TwelveHour => 0.5,
        }
    }

    pub fn is_weighted (&self)->bool { *self == TimeAvgWindow::SixHourWeighted }
}

/// analysis configuration, normally loaded from a RON file
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct AdtConfig {
    /// use `init_raw_t` as the intensity of the first record of a new storm
    pub init_strength: bool,

    /// initial raw T# for new storms (also used to seed spot analyses)
    pub init_raw_t: f64,

    /// exclude records over land from the rule computations
    pub land_flag: bool,

    /// manually set radius of max wind in km, <= 0 means derive it from the image
    pub rmw_size: f64,

    /// use the Courtney-Knaff-Zehr wind/pressure relationship
    pub use_ckz: bool,
    pub ckz_gale_radius: f64,
    pub ckz_penv: f64,

    pub domain: BasinDomain,

    /// history based analysis. If false only a spot analysis of the current image is performed
    pub run_full_analysis: bool,

    pub time_avg_window: TimeAvgWindow,

    /// where the history ledger is persisted. Several rules only apply if this is set
    pub history_file: Option<PathBuf>,

    /// max age of the first forecast point relative to the image time
    pub forecast_stale_days: f64,

    /// (line,element) interval of the remap spline grid
    pub remap_spline: (usize,usize),

    pub max_grid_dim: usize,
    pub max_history_records: usize,

    /// sub-satellite longitude (east positive 0..360) for zenith angle computation
    pub sat_subpoint_lon: Option<f64>,
}

impl Default for AdtConfig {
    fn default()->Self {
        AdtConfig {
            init_strength: false,
            init_raw_t: 1.0,
            land_flag: true,
            rmw_size: -99.0,
            use_ckz: false,
            ckz_gale_radius: -99.0,
            ckz_penv: 1012.0,
            domain: BasinDomain::Auto,
            run_full_analysis: true,
            time_avg_window: TimeAvgWindow::SixHourWeighted,
            history_file: None,
            forecast_stale_days: 1.0,
            remap_spline: (3,3),
            max_grid_dim: 200,
            max_history_records: 1000,
            sat_subpoint_lon: None,
        }
    }
}

impl AdtConfig {
    pub fn load<P: AsRef<Path>> (path: P)->Result<AdtConfig> {
        Ok( load_ron_config(path)? )
    }

    pub fn has_history_file (&self)->bool { self.history_file.is_some() }

    /// manual RMW if configured
    pub fn manual_rmw (&self)->Option<f64> {
        if self.rmw_size > 0.0 { Some(self.rmw_size) } else { None }
    }
}
