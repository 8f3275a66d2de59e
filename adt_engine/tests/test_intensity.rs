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

use std::path::PathBuf;
use adt_engine::config::{AdtConfig, TimeAvgWindow};
use adt_engine::history::AnalysisRecord;
use adt_engine::intensity::{IntensityEngine, SlopeKind, slope_cal};

// run with "cargo test test_intensity -- --nocapture"

fn new_storm_config()->AdtConfig {
    AdtConfig {
        init_strength: true,
        init_raw_t: 2.5,
        history_file: Some( PathBuf::from("/tmp/adt_unused_history.json")),
        ..AdtConfig::default()
    }
}

#[test]
fn test_intensity_new_storm() {
    let config = new_storm_config();
    let mut init_raw_t = config.init_raw_t;
    let mut history: Vec<AnalysisRecord> = Vec::new();

    // the scene inputs are irrelevant for the first record of a new storm
    for (eye_scene, cloud_scene, cloud_temp) in [(0, 0, -75.0), (3, 0, -30.0), (3, 4, 10.0)] {
        let mut cur = AnalysisRecord::new( 2024200, 120000);
        cur.latitude = 15.0;
        cur.longitude = 45.0;
        cur.eye_scene = eye_scene;
        cur.cloud_scene = cloud_scene;
        cur.eye_temp = 15.0;
        cur.cloud_temp = cloud_temp;

        IntensityEngine::new( &config, &mut init_raw_t, &mut history).calculate_intensity( &mut cur, false);
        println!("scene {eye_scene}/{cloud_scene} at {cloud_temp}C: traw_o={} traw={} tfinal={} ci={}", cur.traw_o, cur.traw, cur.tfinal, cur.ci);

        assert_eq!( cur.traw_o, 2.5);
        assert_eq!( cur.traw, 2.5);
        assert_eq!( cur.tfinal, 2.5);
        assert_eq!( cur.ci, 2.5);
        assert_eq!( cur.rule9, 0);
    }
}

#[test]
fn test_intensity_land() {
    let config = AdtConfig::default();
    let mut init_raw_t = config.init_raw_t;
    let mut history: Vec<AnalysisRecord> = Vec::new();

    let mut cur = AnalysisRecord::new( 2024200, 120000);
    cur.latitude = 15.0;
    cur.longitude = 45.0;
    cur.land = 1;
    cur.cloud_temp = -70.0;

    IntensityEngine::new( &config, &mut init_raw_t, &mut history).calculate_intensity( &mut cur, false);
    println!("over land: traw={} ci={}", cur.traw, cur.ci);
    assert_eq!( cur.traw, 0.0);
    assert!( !cur.is_valid( config.land_flag));
}

fn track (values: &[(i32,f64)], f: impl Fn(&mut AnalysisRecord,f64))->Vec<AnalysisRecord> {
    values.iter().map( |(hhmmss,v)| {
        let mut rec = AnalysisRecord::new( 2024200, *hhmmss);
        rec.traw = 3.0; // valid record
        f( &mut rec, *v);
        rec
    }).collect()
}

#[test]
fn test_slope_intensifying() {
    // +0.1 every 2h is -1.2 per day (positive slopes are weakening)
    let history = track( &[(0,3.0), (20000,3.1), (40000,3.2), (60000,3.3), (80000,3.4), (100000,3.5)], |r,v| r.traw = v);
    let mut cur = AnalysisRecord::new( 2024200, 120000);
    cur.traw = 3.6;

    let slope = slope_cal( &history, &cur, 12.0, SlopeKind::Traw, true).unwrap();
    println!("12h Traw slope: {slope}");
    assert!( (slope + 1.2).abs() <= 0.1 + 1e-9);

    // not enough points
    let slope = slope_cal( &history[3..], &cur, 12.0, SlopeKind::Traw, true).unwrap();
    assert_eq!( slope, 0.0);

    // the window only reaches back 6h
    let slope = slope_cal( &history, &cur, 6.0, SlopeKind::Traw, true).unwrap();
    assert_eq!( slope, 0.0);
}

#[test]
fn test_slope_weakening() {
    let history = track( &[(0,6.0), (20000,5.5), (40000,5.0), (60000,4.5), (80000,4.0), (100000,3.5)], |r,v| r.tfinal = v);
    let mut cur = AnalysisRecord::new( 2024200, 120000);
    cur.tfinal = 3.0;

    let slope = slope_cal( &history, &cur, 12.0, SlopeKind::Tfinal, true).unwrap();
    println!("12h Tfinal slope: {slope}");
    assert!( (slope - 6.0).abs() <= 0.1 + 1e-9);
}

#[test]
fn test_slope_extrapolation() {
    let mut history = track( &[(0,20.0), (30000,20.3), (60000,20.6), (90000,20.9)], |r,v| r.latitude = v);
    for (i,rec) in history.iter_mut().enumerate() {
        rec.longitude = 179.7 + 0.2 * i as f64;
        if rec.longitude > 180.0 { rec.longitude -= 360.0 }
    }
    let cur = AnalysisRecord::new( 2024200, 120000);

    let lat = slope_cal( &history, &cur, 12.0, SlopeKind::Lat, true).unwrap();
    let lon = slope_cal( &history, &cur, 12.0, SlopeKind::Lon, true).unwrap();
    println!("extrapolated position: {lat:.3},{lon:.3}");
    assert!( (lat - 21.2).abs() < 0.05);
    assert!( (lon + 179.5).abs() < 0.05);

    // positions need at least 4 history records
    assert!( slope_cal( &history[1..], &cur, 12.0, SlopeKind::Lat, true).is_none());
}

fn prior_record (hhmmss: i32, tfinal: f64, rule9: i32, lb_flag: i32)->AnalysisRecord {
    let mut rec = AnalysisRecord::new( 2024200, hhmmss);
    rec.latitude = 15.0;
    rec.longitude = 45.0;
    rec.eye_scene = 3;
    rec.cloud_scene = 0;
    rec.traw = tfinal;
    rec.tfinal = tfinal;
    rec.ci = tfinal;
    rec.rule9 = rule9;
    rec.lb_flag = lb_flag;
    rec
}

#[test]
fn test_intensity_rule8_weakening_limit() {
    let config = AdtConfig::default();

    // curved band with 19 ring points is a raw T# of 2.9, 0.6 below the 6h value
    let curved_band = || {
        let mut cur = AnalysisRecord::new( 2024200, 120000);
        cur.latitude = 15.0;
        cur.longitude = 45.0;
        cur.eye_scene = 3;
        cur.cloud_scene = 3;
        cur.ring_cb_val = 18;
        cur
    };

    for (rule9, expected_t, expected_rule8) in [(0, 2.9, 20), (2, 2.99, 21)] {
        let mut init_raw_t = config.init_raw_t;
        let mut history = vec![ prior_record( 0, 3.5, rule9, 0), prior_record( 60000, 3.5, rule9, 0) ];
        let mut cur = curved_band();

        let (t, mw_applied) = IntensityEngine::new( &config, &mut init_raw_t, &mut history).tno_raw( &mut cur);
        println!("previous rule9 {rule9}: traw_o={} t={t:.2} rule8={}", cur.traw_o, cur.rule8);

        assert!( !mw_applied);
        assert!( (cur.traw_o - 2.9).abs() < 1e-9);
        assert!( (t - expected_t).abs() < 1e-9);
        assert_eq!( cur.rule8, expected_rule8);
    }
}

#[test]
fn test_intensity_scene_search() {
    let config = AdtConfig {
        history_file: Some( PathBuf::from("/tmp/adt_unused_history.json")),
        ..AdtConfig::default()
    };
    let mut init_raw_t = config.init_raw_t;

    let mut cur = AnalysisRecord::new( 2024200, 120000);
    cur.cloud_scene = 2; // irregular CDO

    // enhanced IR over the last 6h, merging since 3h ago
    let mut history = vec![ prior_record( 60000, 4.0, 0, 1), prior_record( 90000, 4.0, 0, 2) ];
    let (lb, mult) = IntensityEngine::new( &config, &mut init_raw_t, &mut history).scene_search( &cur);
    println!("enhanced IR history: lb={lb} mult={mult:.3}");
    assert_eq!( lb, 2);
    assert!( (mult - 0.5).abs() < 1e-6);

    // a non enhanced IR record keeps the scene flag
    let mut history = vec![ prior_record( 60000, 4.0, 0, 0), prior_record( 90000, 4.0, 0, 2) ];
    let (lb, mult) = IntensityEngine::new( &config, &mut init_raw_t, &mut history).scene_search( &cur);
    assert_eq!( (lb, mult), (0, -999.0));

    cur.cloud_scene = 0;
    let (lb, _) = IntensityEngine::new( &config, &mut init_raw_t, &mut history).scene_search( &cur);
    assert_eq!( lb, -1);

    // nothing within 6h: the last flag is carried over
    let mut history = vec![ prior_record( 0, 4.0, 0, 1) ];
    let (lb, mult) = IntensityEngine::new( &config, &mut init_raw_t, &mut history).scene_search( &cur);
    assert_eq!( (lb, mult), (2, 1.0));
}
