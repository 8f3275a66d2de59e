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

use adt_engine::config::AdtConfig;
use adt_engine::history::AnalysisRecord;
use adt_engine::mwadj::MwState;
use adt_engine::listing::*;

// run with "cargo test test_listing -- --nocapture"

fn eye_record()->AnalysisRecord {
    let mut rec = AnalysisRecord::default();
    rec.date = 2024200;
    rec.time = 120000;
    rec.ci = 4.5;
    rec.tfinal = 4.5;
    rec.traw = 4.6;
    rec.traw_o = 4.6;
    rec.latitude = 20.0;
    rec.longitude = 60.0;
    rec.eye_scene = 0;
    rec.cloud_scene = 0;
    rec.rule8 = 31;
    rec.rmw = 25.0;
    rec.mw_score = 45.0;
    rec
}

#[test]
fn test_listing_labels() {
    assert_eq!( rule8_label( 31), " MW ON    ");
    assert_eq!( rule8_label( 35), "N/A");
    assert_eq!( rule8_label( -1), "N/A");
    assert_eq!( rule9_label( 1), " ON");
    assert_eq!( rapid_diss_label( 7), "N/A");
    assert_eq!( mw_state_label( MwState::Hold), "MW HOLD  ");

    let mut rec = eye_record();
    assert_eq!( scene_label( &rec), "EYE   ");
    rec.eye_scene = 3;
    rec.cloud_scene = 1;
    assert_eq!( scene_label( &rec), "EMBC  ");
    rec.eye_scene = 1;
    rec.cloud_scene = 4;
    assert_eq!( scene_label( &rec), "SHEAR ");
}

#[test]
fn test_listing_lines() {
    let config = AdtConfig::default();
    let rec = eye_record();

    let line = list_record( &rec, &config, false);
    println!("{line}");
    assert!( line.starts_with( "2024JUL18 120000"));
    assert!( line.contains( "979.0"));
    assert!( line.contains( "77.0"));
    assert!( line.contains( "MW ON"));
    assert!( line.contains( " 25 IR"));
    assert!( line.contains( "45.0"));

    let mut land = AnalysisRecord::default();
    land.date = 2024200;
    land.time = 150000;
    land.land = 1;
    let line = list_record( &land, &config, false);
    println!("{line}");
    assert!( line.contains( "LAND"));

    let listing = list_history( &[rec, land], &config, true);
    println!("{listing}");
    assert_eq!( listing.lines().count(), 5);
    assert!( listing.contains( "Vmax10"));
    assert!( listing.contains( "67.8")); // 77kt scaled to 10-min winds
}
