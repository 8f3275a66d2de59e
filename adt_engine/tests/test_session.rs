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

use std::fs;
use adt_common::{cos, rad, datetime::calc_time};
use adt_engine::{AdtConfig, AdtError, AnalysisSession, GridField, GuessSource, ImageInput, MwObservation, PositionMethod};
use adt_engine::history::InsertKind;

// run with "cargo test test_session -- --nocapture"

/// cold core at 25.2N 80.3W, in the external west negative longitude convention
fn image (date: i32, time: i32)->ImageInput {
    let (clat, clon) = (25.2, -80.3);
    let coslat = cos( rad(clat));
    let grid = GridField::regular( clat + 2.45, clon - 2.45, 0.1, 0.1, 50, 50, 11.0, |lat,lon| {
        let d2 = (lat - clat).powi(2) + ((lon - clon) * coslat).powi(2);
        290.0 - 90.0 * (-d2 / (2.0 * 0.5 * 0.5)).exp()
    }).unwrap();

    ImageInput { date, time, grid, sat_type: 1, over_land: false }
}

#[test]
fn test_session_analyze() {
    let path = std::env::temp_dir().join( "adt_test_session_history.ron");
    let _ = fs::remove_file( &path);

    let mut config = AdtConfig::default();
    config.history_file = Some( path.clone());
    let mut session = AnalysisSession::new( config.clone()).unwrap();
    assert!( session.ledger().is_empty());

    let guess = GuessSource::Position { lat: 25.0, lon: -80.0 };
    let res = session.analyze( image( 2024200, 120000), guess, MwObservation::missing()).unwrap();
    let rec = &res.record;
    println!("{}", session.listing( false));
    println!("fix {:.2},{:.2} ({}) CI {:.1} {:.1}hPa {:.0}kt", rec.latitude, rec.longitude, rec.auto_pos, rec.ci, res.pressure, res.wind);

    assert_eq!( res.first_guess_code, 0);
    assert_eq!( res.insert.kind, InsertKind::First);
    assert_eq!( session.ledger().len(), 1);
    assert!( (rec.latitude - 25.2).abs() < 0.3);
    assert!( (rec.longitude - 80.3).abs() < 0.3); // west positive internally
    assert!( rec.auto_pos != PositionMethod::Manual);
    assert!( res.wind >= 25.0);
    assert_eq!( session.current().map( |r| r.time), Some(120000));
    assert!( path.is_file());

    // the persisted ledger is picked up by a new session
    let session2 = AnalysisSession::new( config).unwrap();
    assert_eq!( session2.ledger().len(), 1);

    let t = calc_time( 2024200, 120000);
    assert_eq!( session.comment( t, t, "test image").unwrap(), Some(1));
    assert!( session.listing( false).contains( "test image"));
    assert_eq!( session.comment( t + 1.0, t + 2.0, "none").unwrap(), None);

    let (_, deleted) = session.delete( t, t).unwrap();
    assert_eq!( deleted, 1);
    assert!( session.ledger().is_empty());

    let _ = fs::remove_file( &path);
}

#[test]
fn test_session_invalid_input() {
    let mut config = AdtConfig::default();
    config.init_strength = true;
    config.init_raw_t = 0.0;
    let mut session = AnalysisSession::new( config).unwrap();

    let guess = GuessSource::Position { lat: 25.0, lon: -80.0 };
    let res = session.analyze( image( 2024200, 120000), guess.clone(), MwObservation::missing());
    println!("{res:?}");
    assert!( res.is_err());

    let mut session = AnalysisSession::new( AdtConfig::default()).unwrap();
    assert!( session.analyze( image( 2024000, 120000), guess.clone(), MwObservation::missing()).is_err());

    let guess = GuessSource::Position { lat: 95.0, lon: -80.0 };
    assert!( session.analyze( image( 2024200, 120000), guess, MwObservation::missing()).is_err());
    assert!( session.ledger().is_empty());
}
