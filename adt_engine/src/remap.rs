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

//! reprojection of (possibly non rectilinear) satellite grids onto a regular lat/lon grid.
//! Destination corners of a coarse spline grid are mapped back into the source image, and pixels
//! inside each spline cell are copied through bilinear interpolation of those corner positions

use ndarray::Array2;
use tracing::debug;
use adt_common::{ensure, geo::distance_km};
use crate::grid::GridField;
use crate::errors::{Result, invalid_input};

/// source (line,element) coordinates of a destination corner
type Corner = Option<(f64,f64)>;

/// directions used to extrapolate missing corners: (line step, element step)
const FILL_DIRS: [(i64,i64); 8] = [(-1,0), (-1,1), (0,1), (1,1), (1,0), (1,-1), (0,-1), (-1,-1)];

/// return a rectilinear version of `grid` (west positive longitudes). Grids that already have uniform
/// spacing are only corrected for antimeridian crossing
pub fn rectify (grid: &GridField, spline: (usize,usize))->Result<GridField> {
    if grid.is_uniform() {
        let mut g = grid.clone();
        if g.unwrap_dateline() { debug!("uniform grid crosses dateline, longitudes shifted") }
        Ok(g)
    } else {
        remap( grid, spline)
    }
}

/// remap with a (line,element) spline interval. A (1,1) spline copies the nearest source pixel
pub fn remap (grid: &GridField, spline: (usize,usize))->Result<GridField> {
    let (ls, es) = (spline.0.max(1), spline.1.max(1));

    let mut src = grid.clone();
    src.unwrap_dateline();

    let mut dest = destination_grid( &src)?;
    let (out_lines, out_elems) = (dest.rows(), dest.cols());

    // corner positions in destination pixel coordinates, the last one clamped to the grid
    let ys: Vec<usize> = (0..out_lines + ls - 1).step_by(ls).map( |y| y.min(out_lines-1)).collect();
    let xs: Vec<usize> = (0..out_elems + es - 1).step_by(es).map( |x| x.min(out_elems-1)).collect();

    let mut corners: Array2<Corner> = Array2::from_shape_fn( (ys.len(), xs.len()), |(cy,cx)| {
        let (y,x) = (ys[cy], xs[cx]);
        find_point( &src, dest.lat[[y,x]], dest.lon[[y,x]]).map( |(l,e)| (l as f64, e as f64))
    });

    let mut temp: Array2<Option<f64>> = Array2::from_elem( (out_lines,out_elems), None);

    if ls == 1 && es == 1 {
        for (cy,y) in ys.iter().enumerate() {
            for (cx,x) in xs.iter().enumerate() {
                if let Some((l,e)) = corners[[cy,cx]] {
                    temp[[*y,*x]] = Some( src.temp[[l as usize, e as usize]]);
                }
            }
        }
    } else {
        fill_missing_corners( &mut corners);
        copy_spline_cells( &src, &corners, &ys, &xs, &mut temp);
    }

    dest.temp = backfill( &temp);
    debug!("remapped {}x{} grid to {}x{}", grid.rows(), grid.cols(), out_lines, out_elems);
    Ok(dest)
}

/// rectilinear destination grid spanning the inner corner box of the source
fn destination_grid (src: &GridField)->Result<GridField> {
    let (ymax, xmax) = (src.rows()-1, src.cols()-1);
    let (nw_lat, ne_lat) = (src.lat[[0,0]], src.lat[[0,xmax]]);
    let (sw_lat, se_lat) = (src.lat[[ymax,0]], src.lat[[ymax,xmax]]);
    let (nw_lon, ne_lon, sw_lon, se_lon) = src.corner_longitudes();

    let lat_max = nw_lat.min(ne_lat);
    let lat_min = sw_lat.max(se_lat);
    let lon_max = nw_lon.max(sw_lon);
    let lon_min = ne_lon.min(se_lon);

    let lat_inc = (lat_max - lat_min) / src.cols() as f64;
    let lon_inc = (lon_max - lon_min) / src.rows() as f64;
    let inc = lat_inc.max(lon_inc);
    ensure!( inc > 0.0, invalid_input("degenerate grid corners"));

    let out_lines = ((lat_max - lat_min) / inc) as usize;
    let out_elems = ((lon_max - lon_min) / inc) as usize;
    ensure!( out_lines >= 2 && out_elems >= 2, invalid_input("remapped grid would be smaller than 2x2"));

    let lat = Array2::from_shape_fn( (out_lines,out_elems), |(y,_)| lat_max - y as f64 * inc);
    let lon = Array2::from_shape_fn( (out_lines,out_elems), |(_,x)| lon_max - x as f64 * inc);
    let temp = Array2::zeros( (out_lines,out_elems));

    GridField::new( lat, lon, temp, src.resolution_km)
}

/// source grid (line,element) closest to the given position, walking from the NW corner towards it.
/// Returns `None` if the walk leaves the source grid
pub fn find_point (src: &GridField, lat: f64, lon: f64)->Option<(usize,usize)> {
    let (lines, elems) = (src.rows() as i64, src.cols() as i64);
    let (mut l, mut e) = (0i64, 0i64);
    let mut prev_dist = f64::MAX;

    loop {
        let (ul, ue) = (l as usize, e as usize);
        let (lat0, lon0) = (src.lat[[ul,ue]], src.lon[[ul,ue]]);
        let (lat3, lon3) = (src.lat[[ul+1,ue+1]], src.lon[[ul+1,ue+1]]);

        let de = if lon < lon3 { 1 } else if lon > lon0 { -1 } else { 0 };
        let dl = if lat < lat3 { 1 } else if lat > lat0 { -1 } else { 0 };

        let dist = distance_km( lat, lon, lat0, lon0);
        if (de == 0 && dl == 0) || prev_dist <= dist { break }
        prev_dist = dist;

        e += de;
        l += dl;
        if e < 0 || e > elems-2 || l < 0 || l > lines-2 { return None }
    }

    // pick the nearest of the cell corners
    let (ul, ue) = (l as usize, e as usize);
    let cell = [(ul,ue), (ul,ue+1), (ul+1,ue), (ul+1,ue+1)];
    let mut best = cell[0];
    let mut best_dist = f64::MAX;
    for (cl,ce) in cell {
        let d = distance_km( lat, lon, src.lat[[cl,ce]], src.lon[[cl,ce]]);
        if d < best_dist {
            best_dist = d;
            best = (cl,ce);
        }
    }
    Some(best)
}

/// estimate unresolved corners by linear extrapolation from pairs of resolved neighbours in 8 directions.
/// Estimated corners are not used to estimate others
fn fill_missing_corners (corners: &mut Array2<Corner>) {
    let (nr, nc) = corners.dim();
    let mut estimated = Array2::from_elem( (nr,nc), false);

    fn get (corners: &Array2<Corner>, estimated: &Array2<bool>, y: i64, x: i64)->Corner {
        let (nr, nc) = corners.dim();
        if y < 0 || x < 0 || y >= nr as i64 || x >= nc as i64 { return None }
        let (y,x) = (y as usize, x as usize);
        if estimated[[y,x]] { None } else { corners[[y,x]] }
    }

    for y in 0..nr as i64 {
        for x in 0..nc as i64 {
            if corners[[y as usize, x as usize]].is_some() { continue }

            let mut sum = (0.0, 0.0);
            let mut n = 0;
            for (dy,dx) in FILL_DIRS {
                let near = get( &*corners, &estimated, y + dy, x + dx);
                let far = get( &*corners, &estimated, y + 2*dy, x + 2*dx);
                if let (Some(c1), Some(c2)) = (near, far) {
                    sum.0 += 2.0 * c1.0 - c2.0;
                    sum.1 += 2.0 * c1.1 - c2.1;
                    n += 1;
                }
            }
            if n > 0 {
                corners[[y as usize, x as usize]] = Some( (sum.0 / n as f64, sum.1 / n as f64));
                estimated[[y as usize, x as usize]] = true;
            }
        }
    }
}

fn copy_spline_cells (src: &GridField, corners: &Array2<Corner>, ys: &[usize], xs: &[usize], temp: &mut Array2<Option<f64>>) {
    let (in_lines, in_elems) = (src.rows() as i64, src.cols() as i64);
    let (nr, nc) = corners.dim();

    for cy in 0..nr.saturating_sub(1) {
        for cx in 0..nc.saturating_sub(1) {
            let (Some(ul), Some(ur), Some(ll), Some(lr)) =
                (corners[[cy,cx]], corners[[cy,cx+1]], corners[[cy+1,cx]], corners[[cy+1,cx+1]]) else { continue };

            let mut elems = [ul.1, ur.1, ll.1, lr.1];
            let emin = elems.iter().fold( f64::MAX, |a,b| a.min(*b)) + 0.5;
            let emax = elems.iter().fold( f64::MIN, |a,b| a.max(*b)) + 0.5;

            // cells spanning most of the source width wrap around its left/right edge
            let edge_fix = (emax as i64 - emin as i64) > (0.75 * in_elems as f64) as i64;
            if edge_fix {
                for e in elems.iter_mut() {
                    if *e < (in_elems / 2) as f64 { *e += in_elems as f64 }
                }
            }
            let [eul, eur, ell, elr] = elems;

            let (y0, y1) = (ys[cy], ys[cy+1]);
            let (x0, x1) = (xs[cx], xs[cx+1]);
            let fy_den = (y1 - y0).max(1) as f64;
            let fx_den = (x1 - x0).max(1) as f64;

            for y in y0..=y1 {
                let fy = (y - y0) as f64 / fy_den;
                for x in x0..=x1 {
                    let fx = (x - x0) as f64 / fx_den;

                    let line = bilinear( ul.0, ur.0, ll.0, lr.0, fx, fy) + 0.5;
                    let elem = bilinear( eul, eur, ell, elr, fx, fy) + 0.5;
                    let (sl, mut se) = (line as i64, elem as i64);

                    if se >= in_elems && edge_fix { se -= in_elems }
                    if sl >= 0 && sl < in_lines && se >= 0 && se < in_elems {
                        temp[[y,x]] = Some( src.temp[[sl as usize, se as usize]]);
                    }
                }
            }
        }
    }
}

#[inline]
fn bilinear (ul: f64, ur: f64, ll: f64, lr: f64, fx: f64, fy: f64)->f64 {
    ul + fx * (ur - ul) + fy * (ll - ul) + fx * fy * (lr + ul - ur - ll)
}

/// fill unmapped pixels with the previous pixel in raster order (leading gaps use the first mapped value)
fn backfill (temp: &Array2<Option<f64>>)->Array2<f64> {
    let mut last = temp.iter().find_map( |t| *t).unwrap_or(0.0);
    let mut out = Array2::<f64>::zeros( temp.dim());
    for ((y,x), t) in temp.indexed_iter() {
        if let Some(v) = t { last = *v }
        out[[y,x]] = last;
    }
    out
}
