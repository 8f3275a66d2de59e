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

use adt_common::datetime::calc_time;
use adt_engine::config::AdtConfig;
use adt_engine::history::{AnalysisRecord, HistoryLedger, InsertKind};
use adt_engine::intensity::IntensityEngine;
use adt_engine::errors::AdtError;

// run with "cargo test test_history -- --nocapture"

fn record (date: i32, time: i32, cloud_temp: f64)->AnalysisRecord {
    let mut rec = AnalysisRecord::new( date, time);
    rec.latitude = 20.0;
    rec.longitude = 60.0;
    rec.eye_scene = 3;
    rec.cloud_scene = 0;
    rec.eye_temp = cloud_temp + 5.0;
    rec.cloud_temp = cloud_temp;
    rec.cw_cloud_temp = cloud_temp;
    rec.cloud_symmetry = 5.0;
    rec
}

/// analyze the record against the ledger and append it, the way a session does
fn add (ledger: &mut HistoryLedger, mut rec: AnalysisRecord, config: &AdtConfig, init_raw_t: &mut f64) {
    let mut records = ledger.records().to_vec();
    IntensityEngine::new( config, init_raw_t, &mut records).calculate_intensity( &mut rec, false);
    ledger.insert( rec, config, init_raw_t).unwrap();
}

fn storm (config: &AdtConfig, init_raw_t: &mut f64)->HistoryLedger {
    let mut ledger = HistoryLedger::new();
    for (i,t) in [-40.0, -45.0, -50.0, -55.0, -58.0, -60.0, -62.0, -65.0].iter().enumerate() {
        let hhmmss = i as i32 * 30000;
        add( &mut ledger, record( 2024200, hhmmss, *t), config, init_raw_t);
    }
    ledger
}

#[test]
fn test_history_insert_kinds() {
    let config = AdtConfig::default();
    let mut init_raw_t = config.init_raw_t;
    let mut ledger = HistoryLedger::new();

    let mut rec = record( 2024200, 60000, -50.0);
    rec.traw = 3.0;
    let res = ledger.insert( rec.clone(), &config, &mut init_raw_t).unwrap();
    assert_eq!( res.kind, InsertKind::First);

    let res = ledger.insert( record( 2024200, 120000, -50.0), &config, &mut init_raw_t).unwrap();
    assert_eq!( (res.kind, res.modified), (InsertKind::Append, 0));

    let res = ledger.insert( record( 2024200, 0, -50.0), &config, &mut init_raw_t).unwrap();
    assert_eq!( res.kind, InsertKind::Insert);
    assert_eq!( res.modified, 2);

    let res = ledger.insert( record( 2024200, 120000, -55.0), &config, &mut init_raw_t).unwrap();
    assert_eq!( res.kind, InsertKind::Overwrite);
    assert_eq!( ledger.len(), 3);

    let times: Vec<i32> = ledger.iter().map( |r| r.time).collect();
    assert_eq!( times, vec![0, 60000, 120000]);

    assert!( ledger.insert( AnalysisRecord::new( 2024000, 0), &config, &mut init_raw_t).is_err());
}

#[test]
fn test_history_capacity() {
    let mut config = AdtConfig::default();
    config.max_history_records = 2;
    let mut init_raw_t = config.init_raw_t;
    let mut ledger = HistoryLedger::new();

    ledger.insert( record( 2024200, 0, -50.0), &config, &mut init_raw_t).unwrap();
    ledger.insert( record( 2024200, 30000, -50.0), &config, &mut init_raw_t).unwrap();
    let res = ledger.insert( record( 2024200, 60000, -50.0), &config, &mut init_raw_t);
    println!("third record: {:?}", res.as_ref().err());
    assert!( matches!( res, Err(AdtError::HistoryError(_))));

    // overwriting does not grow the ledger
    assert!( ledger.insert( record( 2024200, 30000, -55.0), &config, &mut init_raw_t).is_ok());
}

#[test]
fn test_history_insert_delete_round_trip() {
    let config = AdtConfig::default();
    let mut init_raw_t = config.init_raw_t;
    let mut ledger = storm( &config, &mut init_raw_t);
    assert_eq!( ledger.len(), 8);

    // a first round trip brings all records into their recomputed state
    let x = record( 2024200, 100000, -70.0);
    let tx = calc_time( 2024200, 100000);
    ledger.insert( x.clone(), &config, &mut init_raw_t).unwrap();
    ledger.delete_range( tx, tx, &config, &mut init_raw_t).unwrap();
    let before = ledger.clone();

    let res = ledger.insert( x.clone(), &config, &mut init_raw_t).unwrap();
    assert_eq!( res.kind, InsertKind::Insert);
    assert_eq!( ledger.len(), 9);
    assert!( ledger.find( tx).is_some());

    let (modified, deleted) = ledger.delete_range( tx, tx, &config, &mut init_raw_t).unwrap();
    println!("deleted {deleted}, recomputed {modified}");
    assert_eq!( deleted, 1);
    assert_eq!( modified, 4);

    for (a,b) in before.iter().zip( ledger.iter()) {
        println!("{} {:06}: ci {:.1} / {:.1}", a.date, a.time, a.ci, b.ci);
    }
    assert_eq!( ledger, before);
}

#[test]
fn test_history_delete_comment() {
    let config = AdtConfig::default();
    let mut init_raw_t = config.init_raw_t;
    let mut ledger = storm( &config, &mut init_raw_t);

    let t0 = calc_time( 2024200, 30000);
    let t1 = calc_time( 2024200, 90000);

    assert_eq!( ledger.comment_range( t0, t1, "reviewed"), Some(3));
    assert_eq!( ledger.iter().filter( |r| r.comment == "reviewed").count(), 3);
    assert_eq!( ledger.comment_range( calc_time( 2024201, 0), calc_time( 2024202, 0), "none"), None);

    assert!( ledger.delete_range( t1, t0, &config, &mut init_raw_t).is_err());

    let (_, deleted) = ledger.delete_range( t0, t1, &config, &mut init_raw_t).unwrap();
    assert_eq!( deleted, 3);
    assert_eq!( ledger.len(), 5);
    assert!( ledger.iter().all( |r| r.comment != "reviewed"));

    let (modified, deleted) = ledger.delete_range( calc_time( 2024201, 0), calc_time( 2024202, 0), &config, &mut init_raw_t).unwrap();
    assert_eq!( (modified, deleted), (0, 0));
}

#[test]
fn test_history_persistence() {
    let config = AdtConfig::default();
    let mut init_raw_t = config.init_raw_t;
    let ledger = storm( &config, &mut init_raw_t);

    let path = std::env::temp_dir().join( "adt_test_history_persistence.json");
    ledger.save( &path).unwrap();
    let restored = HistoryLedger::load( &path).unwrap();
    std::fs::remove_file( &path).unwrap();
    assert_eq!( restored, ledger);

    let missing = HistoryLedger::load( std::env::temp_dir().join( "adt_no_such_history.json")).unwrap();
    assert!( missing.is_empty());

    let mut records = ledger.records().to_vec();
    records.swap( 0, 1);
    assert!( HistoryLedger::from_records( records).is_err());
}

#[test]
fn test_history_random_insert_order() {
    use rand::{SeedableRng, seq::SliceRandom};

    let config = AdtConfig::default();
    let mut init_raw_t = config.init_raw_t;
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    let mut times: Vec<i32> = (0..8).map( |i| i * 30000).collect();
    times.shuffle( &mut rng);
    println!("insert order: {times:?}");

    let mut ledger = HistoryLedger::new();
    for t in &times {
        ledger.insert( record( 2024200, *t, -50.0), &config, &mut init_raw_t).unwrap();
    }
    assert_eq!( ledger.len(), 8);

    let ordered: Vec<f64> = ledger.iter().map( |r| r.calc_time()).collect();
    assert!( ordered.windows(2).all( |w| w[0] < w[1]));

    let mut reversed = ledger.records().to_vec();
    reversed.reverse();
    assert!( HistoryLedger::from_records( reversed).is_err());
}
