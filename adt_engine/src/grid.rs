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

//! gridded satellite input data and scratch score fields

use ndarray::Array2;
use serde::{Deserialize,Serialize};
use adt_common::ensure;
use crate::errors::{AdtError, Result, invalid_input};

/// tolerance (degrees) for grid spacing comparisons
pub const UNIFORM_EPS: f64 = 0.001;

/// serialized form of a [`GridField`], using nested rows (north to south) so that it can be written by hand
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct GridData {
    pub lat: Vec<Vec<f64>>,
    pub lon: Vec<Vec<f64>>,
    pub temp: Vec<Vec<f64>>,

    #[serde(default="default_resolution")]
    pub resolution_km: f64,
}

fn default_resolution()->f64 { 4.0 }

/// brightness temperature grid with per pixel lat/lon coordinates. Rows run north to south,
/// columns west to east. Temperatures are in Kelvin
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(try_from="GridData", into="GridData")]
pub struct GridField {
    pub lat: Array2<f64>,
    pub lon: Array2<f64>,
    pub temp: Array2<f64>,
    pub resolution_km: f64,
}

impl GridField {
    pub fn new (lat: Array2<f64>, lon: Array2<f64>, temp: Array2<f64>, resolution_km: f64)->Result<Self> {
        ensure!( lat.nrows() >= 2 && lat.ncols() >= 2, invalid_input("grid needs at least 2x2 points"));
        ensure!( lat.dim() == lon.dim() && lat.dim() == temp.dim(),
            invalid_input( format!("mismatched grid shapes: lat={:?}, lon={:?}, temp={:?}", lat.dim(), lon.dim(), temp.dim())));
        ensure!( resolution_km > 0.0, invalid_input("image resolution must be positive"));

        Ok( GridField { lat, lon, temp, resolution_km } )
    }

    /// build a rectilinear grid from its NW corner and spacing, computing temperatures with `f(lat,lon)`
    pub fn regular<F> (lat0: f64, lon0: f64, dlat: f64, dlon: f64, rows: usize, cols: usize, resolution_km: f64, f: F)->Result<Self>
        where F: Fn(f64,f64)->f64
    {
        let lat = Array2::from_shape_fn( (rows,cols), |(y,_)| lat0 - y as f64 * dlat);
        let lon = Array2::from_shape_fn( (rows,cols), |(_,x)| lon0 + x as f64 * dlon);
        let temp = Array2::from_shape_fn( (rows,cols), |(y,x)| f( lat[[y,x]], lon[[y,x]]));
        GridField::new( lat, lon, temp, resolution_km)
    }

    #[inline] pub fn rows (&self)->usize { self.lat.nrows() }
    #[inline] pub fn cols (&self)->usize { self.lat.ncols() }

    /// check the dimensions against the configured maximum
    pub fn check_size (&self, max_dim: usize)->Result<()> {
        ensure!( self.rows() <= max_dim && self.cols() <= max_dim,
            invalid_input( format!("grid {}x{} exceeds max dimension {}", self.rows(), self.cols(), max_dim)));
        Ok(())
    }

    /// switch between east and west positive longitudes
    pub fn flip_longitudes (&mut self) {
        self.lon.mapv_inplace( |v| -v);
    }

    /// NW corner based spacing test. A uniform grid does not need to be remapped
    pub fn is_uniform (&self)->bool {
        let dlon = self.lon[[0,0]] - self.lon[[0,1]];
        let dlat = self.lat[[0,0]] - self.lat[[1,1]];
        (dlon - dlat).abs() < UNIFORM_EPS
    }

    /// (NW,NE,SW,SE) corner longitudes
    pub fn corner_longitudes (&self)->(f64,f64,f64,f64) {
        let (ymax,xmax) = (self.rows()-1, self.cols()-1);
        (self.lon[[0,0]], self.lon[[0,xmax]], self.lon[[ymax,0]], self.lon[[ymax,xmax]])
    }

    /// in west positive coordinates the western corners have larger longitudes unless the grid
    /// wraps around the antimeridian
    pub fn crosses_dateline (&self)->bool {
        let (nw,ne,sw,se) = self.corner_longitudes();
        nw < ne || sw < se
    }

    /// make longitudes continuous across the antimeridian by shifting negative values by 360
    pub fn unwrap_dateline (&mut self)->bool {
        if self.crosses_dateline() {
            self.lon.mapv_inplace( |v| if v < 0.0 { v + 360.0 } else { v });
            true
        } else {
            false
        }
    }

    /// (lon,lat) increments of a rectilinear grid
    pub fn increments (&self)->(f64,f64) {
        ((self.lon[[0,0]] - self.lon[[0,1]]).abs(), (self.lat[[0,0]] - self.lat[[1,0]]).abs())
    }
}

impl TryFrom<GridData> for GridField {
    type Error = AdtError;

    fn try_from (data: GridData)->Result<Self> {
        let lat = rows_to_array( data.lat)?;
        let lon = rows_to_array( data.lon)?;
        let temp = rows_to_array( data.temp)?;
        GridField::new( lat, lon, temp, data.resolution_km)
    }
}

impl From<GridField> for GridData {
    fn from (grid: GridField)->Self {
        GridData {
            lat: array_to_rows( &grid.lat),
            lon: array_to_rows( &grid.lon),
            temp: array_to_rows( &grid.temp),
            resolution_km: grid.resolution_km
        }
    }
}

fn rows_to_array (rows: Vec<Vec<f64>>)->Result<Array2<f64>> {
    let nrows = rows.len();
    ensure!( nrows > 0, invalid_input("empty grid"));
    let ncols = rows[0].len();
    ensure!( rows.iter().all( |r| r.len() == ncols), invalid_input("grid rows have different lengths"));

    let data: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec( (nrows,ncols), data).map_err( |e| invalid_input(e))
}

fn array_to_rows (a: &Array2<f64>)->Vec<Vec<f64>> {
    a.rows().into_iter().map( |r| r.to_vec()).collect()
}

/* #region score field ******************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ScorePoint {
    pub score: f64,
    pub lat: f64,
    pub lon: f64
}

/// append-log of candidate center scores produced by the spiral and ring searches
#[derive(Debug,Clone,Default)]
pub struct ScoreField {
    points: Vec<ScorePoint>
}

impl ScoreField {
    pub fn new()->Self { ScoreField { points: Vec::new() } }

    pub fn push (&mut self, score: f64, lat: f64, lon: f64) {
        self.points.push( ScorePoint{ score, lat, lon })
    }

    pub fn len (&self)->usize { self.points.len() }
    pub fn is_empty (&self)->bool { self.points.is_empty() }

    pub fn iter (&self)->impl Iterator<Item=&ScorePoint> { self.points.iter() }

    pub fn iter_mut (&mut self)->impl Iterator<Item=&mut ScorePoint> { self.points.iter_mut() }

    /// first point with the maximum score
    pub fn max_point (&self)->Option<ScorePoint> {
        let mut best: Option<ScorePoint> = None;
        for p in &self.points {
            if best.map_or( true, |b| p.score > b.score) { best = Some(*p) }
        }
        best
    }
}

/* #endregion score field */
