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

use thiserror::Error;
use adt_common::errors::AdtCommonError;

pub type Result<T> = std::result::Result<T, AdtError>;

#[derive(Error,Debug)]
pub enum AdtError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),

    #[error("common error {0}")]
    CommonError( #[from] AdtCommonError),

    #[error("invalid input {0}")]
    InvalidInput( String ),

    #[error("forecast error {0}")]
    ForecastError( #[from] ForecastError),

    #[error("history error {0}")]
    HistoryError( String ),

    #[error("Misc error {0}")]
    MiscError( String ),
}

/// reasons why a forecast track could not be interpolated. The numeric codes are the ones
/// reported in the auto-positioning return status
#[derive(Error,Debug,Clone,Copy,PartialEq,Eq)]
pub enum ForecastError {
    #[error("no usable forecast points")]
    NoPoints,

    #[error("forecast track does not extend beyond the image time")]
    NotBracketing,

    #[error("forecast track is stale")]
    Stale,

    #[error("polynomial interpolation failed")]
    Interpolation,
}

impl ForecastError {
    pub fn code (&self)->i32 {
        match self {
            ForecastError::NoPoints => 2,
            ForecastError::NotBracketing => 3,
            ForecastError::Stale => 4,
            ForecastError::Interpolation => 5,
        }
    }
}

pub fn invalid_input (msg: impl ToString)->AdtError {
    AdtError::InvalidInput(msg.to_string())
}

pub fn history_error (msg: impl ToString)->AdtError {
    AdtError::HistoryError(msg.to_string())
}

pub fn misc_error (msg: impl ToString)->AdtError {
    AdtError::MiscError(msg.to_string())
}
