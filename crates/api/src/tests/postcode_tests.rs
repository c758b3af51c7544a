// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::check_postcode;
use crate::request_response::{CheckPostcodeRequest, CheckPostcodeResponse};
use crate::tests::helpers::{create_test_persistence, seed_catalogue};
use time::macros::date;

#[test]
fn test_check_postcode_normalizes_and_matches() {
    let mut persistence = create_test_persistence();
    seed_catalogue(&mut persistence);

    let response: CheckPostcodeResponse = check_postcode(
        &mut persistence,
        &CheckPostcodeRequest {
            postcode: String::from("cf36  5aa"),
        },
        date!(2024 - 01 - 01),
    )
    .unwrap();

    assert_eq!(response.postcode, "CF36 5AA");
    assert!(response.in_area);
    assert_eq!(response.matches.len(), 1);

    let default = response.default.unwrap();
    assert_eq!(default.area_name, "Porthcawl");
    assert_eq!(default.weekday, "Monday");
    assert_eq!(default.slot, "AM");
    // 2024-01-01 is a Monday: the first collection is that same day.
    assert_eq!(default.next_date, "2024-01-01");
}

#[test]
fn test_check_postcode_out_of_area_is_not_an_error() {
    let mut persistence = create_test_persistence();
    seed_catalogue(&mut persistence);

    let response: CheckPostcodeResponse = check_postcode(
        &mut persistence,
        &CheckPostcodeRequest {
            postcode: String::from("SA1 1AA"),
        },
        date!(2024 - 01 - 01),
    )
    .unwrap();

    assert!(!response.in_area);
    assert!(response.matches.is_empty());
    assert!(response.default.is_none());
}

#[test]
fn test_check_postcode_rejects_empty_input() {
    let mut persistence = create_test_persistence();

    let result = check_postcode(
        &mut persistence,
        &CheckPostcodeRequest {
            postcode: String::from("   "),
        },
        date!(2024 - 01 - 01),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { field, .. }) if field == "postcode"));
}

#[test]
fn test_check_postcode_first_collection_rolls_to_route_day() {
    let mut persistence = create_test_persistence();
    seed_catalogue(&mut persistence);

    // Bridgend runs Wednesdays; from Monday 2024-01-01 the first
    // collection is Wednesday 2024-01-03.
    let response: CheckPostcodeResponse = check_postcode(
        &mut persistence,
        &CheckPostcodeRequest {
            postcode: String::from("CF31 4AB"),
        },
        date!(2024 - 01 - 01),
    )
    .unwrap();

    assert_eq!(response.default.unwrap().next_date, "2024-01-03");
}
