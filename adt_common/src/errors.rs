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

pub type Result<T> = std::result::Result<T, AdtCommonError>;

#[derive(Error,Debug)]
pub enum AdtCommonError {

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("RON parse error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("RON serialization error {0}")]
    RonSerError( #[from] ron::Error),

    #[error("config parse error {0}")]
    ConfigParseError( String ),

    #[error("date error {0}")]
    DateError( String ),

    #[error("Misc error {0}")]
    MiscError( String )
}

pub fn config_parse_error (msg: impl ToString)->AdtCommonError {
    AdtCommonError::ConfigParseError(msg.to_string())
}

pub fn date_error (msg: impl ToString)->AdtCommonError {
    AdtCommonError::DateError(msg.to_string())
}

pub fn misc_error (msg: impl ToString)->AdtCommonError {
    AdtCommonError::MiscError(msg.to_string())
}
