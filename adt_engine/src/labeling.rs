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

//! two-pass connected component labeling and the moat (false eye) mask built on top of it

use ndarray::Array2;
use adt_common::{pow2, cos, rad};
use crate::grid::GridField;

/// pixel neighbourhood used to connect foreground pixels. `Six` adds the NW/SE diagonal to `Four`
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Connectivity { Four, Six, Eight }

fn find (table: &[usize], mut i: usize)->usize {
    while table[i] != i { i = table[i] }
    i
}

/// label the connected foreground regions of `bw`. Returns the label field (0 = background,
/// 1..=n consecutive object labels in raster order of first appearance) and the number of objects
pub fn label_components (bw: &Array2<bool>, conn: Connectivity)->(Array2<usize>,usize) {
    let (rows,cols) = bw.dim();
    let mut labels = Array2::<usize>::zeros((rows,cols));
    let mut table: Vec<usize> = vec![0];

    for y in 0..rows {
        for x in 0..cols {
            if !bw[[y,x]] { continue }

            let b = if x > 0 { find( &table, labels[[y,x-1]]) } else { 0 };
            let c = if y > 0 { find( &table, labels[[y-1,x]]) } else { 0 };
            let d = if y > 0 && x > 0 { find( &table, labels[[y-1,x-1]]) } else { 0 };
            let e = if y > 0 && x < cols-1 { find( &table, labels[[y-1,x+1]]) } else { 0 };

            let label = match conn {
                Connectivity::Four => {
                    if b != 0 && c != 0 {
                        if b != c { table[c] = b }
                        b
                    } else if b != 0 { b } else if c != 0 { c } else { 0 }
                }
                Connectivity::Six => {
                    if d != 0 {
                        d
                    } else if b != 0 && c != 0 {
                        let l = b.min(c);
                        table[b] = l;
                        table[c] = l;
                        l
                    } else if b != 0 { b } else if c != 0 { c } else { 0 }
                }
                Connectivity::Eight => {
                    let l = [b,c,d,e].into_iter().find( |v| *v != 0).unwrap_or(0);
                    if l != 0 {
                        for v in [b,c,d,e] {
                            if v != 0 && v != l { table[v] = l }
                        }
                    }
                    l
                }
            };

            labels[[y,x]] = if label == 0 {
                let l = table.len();
                table.push(l);
                l
            } else {
                label
            };
        }
    }

    // flatten the equivalence table
    for i in 0..table.len() {
        table[i] = find( &table, i);
    }
    labels.mapv_inplace( |l| table[l]);

    // renumber to consecutive labels
    let mut counts = vec![0usize; table.len()];
    for l in labels.iter() { counts[*l] += 1 }

    let mut n = 0;
    let mut renum = vec![0usize; table.len()];
    for i in 1..table.len() {
        if counts[i] > 0 {
            n += 1;
            renum[i] = n;
        }
    }
    labels.mapv_inplace( |l| renum[l]);

    (labels, n)
}

/// mask of foreground objects (temperatures above `threshold` if `warm`, below otherwise) whose
/// diagonal extent exceeds twice `max_radius` degrees. Masked pixels are excluded from ring fits
pub fn moat_mask (grid: &GridField, threshold: f64, max_radius: f64, warm: bool)->Array2<bool> {
    let bw = grid.temp.mapv( |t| if warm { t > threshold } else { t < threshold });
    let (labels, n) = label_components( &bw, Connectivity::Eight);

    // per object lat/lon bounds: (lat_min, lat_max, lon_min, lon_max)
    let mut bounds = vec![(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY); n+1];
    for (l, (lat,lon)) in labels.iter().zip( grid.lat.iter().zip( grid.lon.iter())) {
        if *l > 0 {
            let b = &mut bounds[*l];
            b.0 = b.0.min(*lat);
            b.1 = b.1.max(*lat);
            b.2 = b.2.min(*lon);
            b.3 = b.3.max(*lon);
        }
    }

    let is_moat: Vec<bool> = bounds.iter().enumerate().map( |(i,b)| {
        if i == 0 { return false }
        let avg_lat = 0.5 * (b.0 + b.1);
        let len = (pow2(b.1 - b.0) + pow2( (b.3 - b.2) / cos( rad(avg_lat)))).sqrt();
        len > max_radius * 2.0
    }).collect();

    labels.mapv( |l| is_moat[l])
}
