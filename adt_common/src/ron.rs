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

/// module with utility functions to read and write RON configuration files

use std::{fs, path::Path};
use ron::ser::PrettyConfig;
use serde::{Serialize, de::DeserializeOwned};
use crate::errors::{Result, config_parse_error};

pub fn pretty_ron_opts()->PrettyConfig {
    PrettyConfig::new()
        .depth_limit(4)
        .struct_names(true)
        .separate_tuple_members(false)
        .enumerate_arrays(false)
}

pub fn to_pretty_ron<T> (v: &T)->Result<String> where T: Serialize {
    Ok( ron::ser::to_string_pretty( v, pretty_ron_opts())? )
}

/// deserialize a config from a RON string
pub fn config_from_ron_str<C> (s: &str)->Result<C> where C: DeserializeOwned {
    Ok( ron::from_str(s)? )
}

/// load a config struct from a RON file
pub fn load_ron_config<C,P> (path: P)->Result<C> where C: DeserializeOwned, P: AsRef<Path> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err( config_parse_error( format!("config file not found: {}", path.display())))
    }
    let bytes = fs::read(path)?;
    Ok( ron::de::from_bytes(&bytes)? )
}

pub fn save_ron_config<C,P> (config: &C, path: P)->Result<()> where C: Serialize, P: AsRef<Path> {
    let s = to_pretty_ron(config)?;
    fs::write(path, s)?;
    Ok(())
}
