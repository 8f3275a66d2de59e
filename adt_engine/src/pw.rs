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

//! conversion of CI numbers into minimum sea level pressure and maximum sustained wind

use adt_common::{abs, pow2};
use adt_common::geo::{regression_domain, RegressionDomain};
use crate::config::AdtConfig;

/// ratio of 10-min to 1-min sustained winds
pub const TEN_MINUTE_WIND_FACTOR: f64 = 0.88;

const PW_LEN: usize = 83;

const PW_TNO: [f64; PW_LEN] = [
    -9999.0, -8888.0, 1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9, 2.0, 2.1, 2.2, 2.3, 2.4, 2.5, 2.6, 2.7, 2.8, 2.9,
    3.0, 3.1, 3.2, 3.3, 3.4, 3.5, 3.6, 3.7, 3.8, 3.9, 4.0, 4.1, 4.2, 4.3, 4.4, 4.5, 4.6, 4.7, 4.8, 4.9, 5.0, 5.1, 5.2,
    5.3, 5.4, 5.5, 5.6, 5.7, 5.8, 5.9, 6.0, 6.1, 6.2, 6.3, 6.4, 6.5, 6.6, 6.7, 6.8, 6.9, 7.0, 7.1, 7.2, 7.3, 7.4, 7.5,
    7.6, 7.7, 7.8, 7.9, 8.0, 8.1, 8.2, 8.3, 8.4, 8.5, 8.6, 8.7, 8.8, 8.9, 9.0
];

const PW_PRESSURE: [[f64; PW_LEN]; 2] = [
    [ // Atlantic
        -9999.0, -8888.0, 1014.0, 1013.6, 1013.2, 1012.8, 1012.4, 1012.0, 1011.4, 1010.8, 1010.2, 1009.6, 1009.0, 1008.2,
        1007.4, 1006.6, 1005.8, 1005.0, 1004.0, 1003.0, 1002.0, 1001.0, 1000.0, 998.8, 997.6, 996.4, 995.2, 994.0, 992.6,
        991.2, 989.8, 988.4, 987.0, 985.4, 983.8, 982.2, 980.6, 979.0, 977.2, 975.4, 973.6, 971.8, 970.0, 968.0, 966.0,
        964.0, 962.0, 960.0, 957.6, 955.2, 952.8, 950.4, 948.0, 945.4, 942.8, 940.2, 937.6, 935.0, 932.2, 929.4, 926.6,
        923.8, 921.0, 918.0, 915.0, 912.0, 909.0, 906.0, 902.8, 899.6, 896.4, 893.2, 890.0, 886.6, 883.2, 879.8, 876.4,
        873.0, 869.4, 865.8, 862.2, 858.6, 855.0
    ],
    [ // Pacific
        -9999.0, -8888.0, 1005.0, 1004.6, 1004.2, 1003.8, 1003.4, 1003.0, 1002.4, 1001.8, 1001.2, 1000.6, 1000.0, 999.4,
        998.8, 998.2, 997.6, 997.0, 995.8, 994.6, 993.4, 992.2, 991.0, 989.6, 988.2, 986.8, 985.4, 984.0, 982.4, 980.8,
        979.2, 977.6, 976.0, 974.0, 972.0, 970.0, 968.0, 966.0, 963.6, 961.2, 958.8, 956.4, 954.0, 951.4, 948.8, 946.2,
        943.6, 941.0, 938.2, 935.4, 932.6, 929.8, 927.0, 924.4, 921.8, 919.2, 916.6, 914.0, 910.8, 907.6, 904.4, 901.2,
        898.0, 894.2, 890.4, 886.6, 882.8, 879.0, 874.8, 870.6, 866.4, 862.2, 858.0, 853.4, 848.8, 844.2, 839.6, 835.0,
        830.0, 825.0, 820.0, 815.0, 810.0
    ]
];

const PW_WIND: [f64; PW_LEN] = [
    -9999.0, -8888.0, 25.0, 25.0, 25.0, 25.0, 25.0, 25.0, 26.0, 27.0, 28.0, 29.0, 30.0, 31.0, 32.0, 33.0, 34.0, 35.0,
    37.0, 39.0, 41.0, 43.0, 45.0, 47.0, 49.0, 51.0, 53.0, 55.0, 57.0, 59.0, 61.0, 63.0, 65.0, 67.4, 69.8, 72.2, 74.6,
    77.0, 79.6, 82.2, 84.8, 87.4, 90.0, 92.4, 94.8, 97.2, 99.6, 102.0, 104.6, 107.2, 109.8, 112.4, 115.0, 117.4, 119.8,
    122.2, 124.6, 127.0, 129.6, 132.2, 134.8, 137.4, 140.0, 143.0, 146.0, 149.0, 152.0, 155.0, 158.0, 161.0, 164.0,
    167.0, 170.0, 173.0, 176.0, 179.0, 182.0, 185.0, 188.0, 191.0, 194.0, 197.0, 200.0
];

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum PwKind { Pressure, Wind }

/// CKZ model inputs that end up in the record
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CkzParams {
    pub r34: i32,
    pub penv: i32,
}

fn table_index (ci: f64)->usize {
    let mut i = 2;
    while ci - 0.001 > PW_TNO[i] && i < PW_LEN - 1 { i += 1 }
    i
}

/// maximum sustained 1-min wind (kt) for a CI number
pub fn wind (ci: f64)->f64 {
    PW_WIND[ table_index(ci)]
}

/// minimum sea level pressure (hPa) for a CI number at a (west positive) position, using either the
/// Dvorak table of the regression domain or the Courtney-Knaff-Zehr relationship
pub fn pressure (ci: f64, lat: f64, lon: f64, config: &AdtConfig)->f64 {
    let i = table_index(ci);
    if config.use_ckz {
        ckz_pressure( PW_WIND[i], lat, config.ckz_gale_radius, config.ckz_penv)
    } else {
        let domain = regression_domain( lat, lon, config.domain);
        PW_PRESSURE[domain.index()][i]
    }
}

pub fn pw_value (kind: PwKind, ci: f64, lat: f64, lon: f64, config: &AdtConfig)->f64 {
    match kind {
        PwKind::Wind => wind(ci),
        PwKind::Pressure => pressure( ci, lat, lon, config)
    }
}

/// CKZ parameters to record with the analysis, `None` if the CKZ model is not used
pub fn ckz_params (config: &AdtConfig)->Option<CkzParams> {
    if config.use_ckz {
        Some( CkzParams { r34: config.ckz_gale_radius as i32, penv: config.ckz_penv as i32 })
    } else {
        None
    }
}

/// CKZ pressure. A negative gale radius is interpreted as the radius of the outermost closed isobar
fn ckz_pressure (vmax: f64, lat: f64, gale_radius: f64, penv: f64)->f64 {
    let storm_speed: f64 = 11.0; // kt, climatology
    let alat = abs(lat);

    let r34 = if gale_radius < 0.0 { 0.354 * abs(gale_radius) + 13.3 } else { gale_radius };
    let vs = vmax - 1.5 * storm_speed.powf(0.63);
    let exp = 0.1147 + 0.0055 * vs - 0.001 * (alat - 25.0);
    let v500 = r34 / 9.0 - 3.0;
    let v500c = vs * ((66.785 - 0.09102 * vs + 1.0619 * (alat - 25.0)) / 500.0).powf(exp);
    let s = f64::max( v500 / v500c, 0.4);

    let p = 23.286 - 0.483 * vs - pow2(vs / 24.254) - 12.587 * s - 0.483 * alat + penv;
    if p >= penv - 1.0 { penv - 2.0 } else { p }
}
