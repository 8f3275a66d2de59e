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

//! Advanced Dvorak Technique analysis of tropical cyclone intensity from IR satellite imagery

pub mod errors;
pub mod config;

pub mod grid;
pub mod remap;
pub mod gradient;
pub mod labeling;
pub mod spiral;
pub mod ring;
pub mod logspiral;
pub mod cdo;
pub mod forecast;
pub mod position;

pub mod ringdata;
pub mod scene;
pub mod pw;
pub mod mwadj;
pub mod intensity;
pub mod history;
pub mod listing;
pub mod session;

pub use errors::{AdtError, ForecastError, Result};
pub use config::{AdtConfig, TimeAvgWindow};
pub use grid::{GridField, GridData};
pub use history::{AnalysisRecord, HistoryLedger};
pub use position::{CenterFix, PositionMethod};
pub use mwadj::{MwObservation, MwState};
pub use forecast::{ForecastPoint, ForecastTrack};
pub use session::{AnalysisSession, AnalysisResult, GuessSource, ImageInput};
