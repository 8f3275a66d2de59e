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

use std::f64::consts::{PI as STD_PI};

pub mod errors;
pub mod macros;
pub mod datetime;
pub mod geo;
pub mod ron;

// syntactic sugar - the numeric kernels read closer to the formulas this way
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn tan(x:f64) -> f64 { x.tan() }
#[inline(always)] pub fn asin(x:f64) -> f64 { x.asin() }
#[inline(always)] pub fn acos(x:f64) -> f64 { x.acos() }
#[inline(always)] pub fn atan(x:f64) -> f64 { x.atan() }
#[inline(always)] pub fn atan2(y:f64,x:f64) -> f64 { y.atan2(x) }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }
#[inline(always)] pub fn abs(x:f64) -> f64 { x.abs() }
#[inline(always)] pub fn deg(x:f64)->f64 { x.to_degrees() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

/// sign that maps 0.0 to +1.0 (f64::signum would give +1.0 as well but not for -0.0)
#[inline(always)] pub fn sign_factor(x:f64)->f64 { if x < 0.0 { -1.0 } else { 1.0 } }

/// truncate (towards zero) to one decimal, which is how all T-numbers are quantized
#[inline] pub fn trunc_tenth (x: f64)->f64 { ((x * 10.0) as i64) as f64 / 10.0 }

/* #region accumulators ***********************************************************************/

/// incremental mean/standard deviation accumulator (Welford)
#[derive(Debug,Clone,Default)]
pub struct MeanStdv {
    pub n: usize,
    mean: f64,
    m2: f64,
}

impl MeanStdv {
    pub fn new()->Self { MeanStdv { n: 0, mean: 0.0, m2: 0.0 } }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;
        let d = x - self.mean;
        self.mean += d / self.n as f64;
        self.m2 += d * (x - self.mean);
    }

    pub fn mean (&self)->f64 { if self.n > 0 { self.mean } else { 0.0 } }

    /// sample standard deviation, 0 for less than two observations
    pub fn stdv (&self)->f64 {
        if self.n > 1 { (self.m2 / (self.n - 1) as f64).sqrt() } else { 0.0 }
    }
}

/// simple min/max tracker that also remembers an associated payload (e.g. the grid location)
#[derive(Debug,Clone)]
pub struct MaxWith<T> {
    pub value: f64,
    pub item: Option<T>
}

impl <T> MaxWith<T> {
    pub fn new (init: f64)->Self { MaxWith { value: init, item: None } }

    /// replace if `v` is strictly greater than the current value. Returns true if replaced
    pub fn offer (&mut self, v: f64, item: T)->bool {
        if v > self.value {
            self.value = v;
            self.item = Some(item);
            true
        } else {
            false
        }
    }
}

/* #endregion accumulators */

pub const PI: f64 = STD_PI;
pub const HALF_PI: f64 = PI / 2.0;
pub const TWO_PI: f64 = PI * 2.0;

/// conversion between Kelvin and Celsius as used by the Dvorak tables
pub const K_TO_C: f64 = 273.16;
