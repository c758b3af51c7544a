// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod backend_validation_tests;
mod subscription_tests;

use crate::Persistence;
use kerbside_domain::{
    Frequency, Postcode, RouteArea, Slot, Subscription, SubscriptionStatus,
};
use time::Weekday;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_subscription() -> Subscription {
    Subscription::new(
        String::from("Test Customer"),
        Postcode::new("CF36 5AA").unwrap(),
        String::from("1 Esplanade Avenue, Porthcawl"),
        Frequency::Weekly,
        2,
        true,
        SubscriptionStatus::Active,
    )
}

pub fn create_test_route_area() -> RouteArea {
    RouteArea::new(
        "Porthcawl",
        Weekday::Monday,
        Slot::Am,
        &[String::from("CF36"), String::from("CF33")],
        10,
    )
}
