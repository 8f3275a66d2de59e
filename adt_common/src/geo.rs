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

//! spherical earth helpers. Unless noted otherwise all longitudes are **west positive**,
//! which is the convention used throughout the analysis kernels.

use serde::{Serialize,Deserialize};
use strum::{Display,EnumString};
use crate::{sin,cos,asin,acos,atan,sqrt,pow2,abs,PI,HALF_PI};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KM_PER_DEG: f64 = 111.0;

const RADIANS: f64 = 0.017453292;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum DistanceUnit { Km, Miles, NauticalMiles }

/// great circle distance and bearing (degrees clockwise from north) from `(lat0,lon0)` to `(lat1,lon1)`
pub fn distance_angle (lat0: f64, lon0: f64, lat1: f64, lon1: f64, unit: DistanceUnit)->(f64,f64) {
    let (rlat0, rlon0) = (lat0 * RADIANS, lon0 * RADIANS);
    let (rlat1, rlon1) = (lat1 * RADIANS, lon1 * RADIANS);

    let dcc = cos(rlat1)*cos(rlon1) - cos(rlat0)*cos(rlon0);
    let dcs = cos(rlat1)*sin(rlon1) - cos(rlat0)*sin(rlon0);
    let ds = sin(rlat1) - sin(rlat0);
    let chord = sqrt( pow2(dcc) + pow2(dcs) + pow2(ds));

    let dist_km = 2.0 * asin(chord / 2.0) * EARTH_RADIUS_KM;
    let dist = match unit {
        DistanceUnit::Km => dist_km,
        DistanceUnit::Miles => (69.0 * dist_km + 55.0) / 111.0,
        DistanceUnit::NauticalMiles => (60.0 * dist_km + 55.0) / 111.0,
    };

    let mut angle = if abs(dist) > 0.0001 {
        (sin(rlon0 - rlon1) * sin(HALF_PI - rlat1)) / sin(chord)
    } else {
        0.0
    };
    angle = angle.clamp(-1.0, 1.0);
    angle = asin(angle) / RADIANS;
    if rlat1 < rlat0 { angle = 180.0 - angle }
    if angle < 0.0 { angle += 360.0 }

    (dist, angle)
}

#[inline]
pub fn distance_km (lat0: f64, lon0: f64, lat1: f64, lon1: f64)->f64 {
    distance_angle(lat0, lon0, lat1, lon1, DistanceUnit::Km).0
}

/// dead reckoning: position reached from `(lat,lon)` after `dist_km` along bearing `angle` (degrees)
pub fn distance_angle2 (lat: f64, lon: f64, dist_km: f64, angle: f64)->(f64,f64) {
    let mut colat = (90.0 - lat) * RADIANS;
    let mut colat_flipped = colat;
    let mut rlon = lon * RADIANS;
    let mut angle = angle;

    if lat < 0.0 {
        colat_flipped = -(90.0 + lat) * RADIANS;
        rlon = (lon - 180.0) * RADIANS;
        angle = 360.0 - angle;
    }

    let rangle = -(((540 - angle as i32) % 360) as f64) * RADIANS;
    let rdist = (dist_km / 111.1) * RADIANS;

    let end_colat = acos( cos(colat)*cos(rdist) + sin(colat)*sin(rdist)*cos(rangle));
    let mut dlon = 0.0;
    if abs(end_colat) >= 0.0000001 {
        let arg = ((sin(rdist) * sin(rangle)) / sin(end_colat)).clamp(-1.0, 1.0);
        dlon = asin(arg);
        let t = atan( sin(HALF_PI - rangle)) / (HALF_PI - rdist).tan();
        if t > colat_flipped {
            dlon = PI - dlon;
        }
    }

    let end_lat = 90.0 - end_colat / RADIANS;
    let mut end_lon = ((10000.0 * ((rlon - dlon) / RADIANS)) as i64 % 3600000) as f64 / 10000.0;
    if end_lon < -180.0 { end_lon += 360.0 }

    (end_lat, end_lon)
}

/* #region ocean basins *****************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Display,EnumString)]
pub enum OceanBasin { Atlantic, WestPacific, EastPacific, Indian }

/// which of the two Dvorak regression table sets is used
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Display,EnumString)]
pub enum RegressionDomain { Atlantic, Pacific }

impl RegressionDomain {
    pub fn index (&self)->usize {
        match self { RegressionDomain::Atlantic => 0, RegressionDomain::Pacific => 1 }
    }
}

/// domain selection policy, `Auto` derives it from the ocean basin
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum BasinDomain { #[default] Auto, Atlantic, Pacific }

/// ocean basin for a west positive position, `None` if the position is out of range
pub fn ocean_basin (lat: f64, lon: f64)->Option<OceanBasin> {
    let lon = -lon; // classification is done in east positive coordinates

    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return None
    }

    let basin = if lat >= 0.0 {
        if lon <= -100.0 {
            OceanBasin::WestPacific
        } else if lon <= -20.0 {
            OceanBasin::Indian
        } else if lon >= 100.0 {
            OceanBasin::EastPacific
        } else if lat > 20.0 {
            OceanBasin::Atlantic
        } else if lat < 10.0 {
            if lon < 80.0 { OceanBasin::Atlantic } else { OceanBasin::EastPacific }
        } else {
            // 10N..20N: slanted Atlantic/East Pacific division across Central America
            if (100.0 - lon) / (20.0 - lat) > 2.0 { OceanBasin::Atlantic } else { OceanBasin::EastPacific }
        }
    } else {
        if lon <= -135.0 {
            OceanBasin::WestPacific
        } else if lon <= -20.0 {
            OceanBasin::Indian
        } else if lon <= 67.0 {
            OceanBasin::Atlantic
        } else {
            OceanBasin::EastPacific
        }
    };
    Some(basin)
}

/// regression domain for a position. Unknown positions fall into the Pacific domain
pub fn regression_domain (lat: f64, lon: f64, policy: BasinDomain)->RegressionDomain {
    match policy {
        BasinDomain::Atlantic => RegressionDomain::Atlantic,
        BasinDomain::Pacific => RegressionDomain::Pacific,
        BasinDomain::Auto => match ocean_basin(lat, lon) {
            Some(OceanBasin::Atlantic) | Some(OceanBasin::EastPacific) => RegressionDomain::Atlantic,
            _ => RegressionDomain::Pacific
        }
    }
}

/* #endregion ocean basins */

/// local zenith angle (degrees) of a geostationary satellite with sub-point longitude `sat_lon`
/// (east positive, 0..360) seen from `(lat,lon)` (east positive)
pub fn zenith_angle (lat: f64, lon: f64, sat_lon: f64)->f64 {
    let r = 6371.229;
    let sd = r + 35790.0;

    let lat = abs(lat);
    let lon = if lon < 0.0 { lon + 360.0 } else { lon };
    let dif = abs(sat_lon - lon);

    let cosal = cos(lat.to_radians()) * cos(dif.to_radians());
    let dp = sqrt( pow2(r) + pow2(sd) - 2.0*r*sd*cosal);
    let alpha = atan( sqrt(1.0 - pow2(cosal)) / cosal);
    let zz = sd * sin(alpha) / dp;

    atan( zz / sqrt(1.0 - pow2(zz))).to_degrees()
}
