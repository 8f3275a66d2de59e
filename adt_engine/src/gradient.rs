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

use ndarray::Array2;

/// centered finite difference temperature gradients (north-south, east-west).
/// Border rows and columns are left zero
pub fn gradient (temp: &Array2<f64>, lon_inc: f64, lat_inc: f64)->(Array2<f64>,Array2<f64>) {
    let (rows,cols) = temp.dim();
    let mut ns = Array2::<f64>::zeros((rows,cols));
    let mut ew = Array2::<f64>::zeros((rows,cols));

    if rows < 3 || cols < 3 { return (ns,ew) }

    for y in 1..rows-1 {
        for x in 1..cols-1 {
            ns[[y,x]] = (temp[[y-1,x]] - temp[[y+1,x]]) / (2.0 * lat_inc);
            ew[[y,x]] = (temp[[y,x+1]] - temp[[y,x-1]]) / (2.0 * lon_inc);
        }
    }
    (ns,ew)
}

/// compress gradient magnitudes to ln(1+|g|) while keeping their direction
pub fn log_compress (ns: &mut Array2<f64>, ew: &mut Array2<f64>) {
    for (n,e) in ns.iter_mut().zip( ew.iter_mut()) {
        let mag = (*n * *n + *e * *e).sqrt();
        if mag > 0.0 {
            let reduction = (1.0 + mag).ln() / mag;
            *n *= reduction;
            *e *= reduction;
        }
    }
}
