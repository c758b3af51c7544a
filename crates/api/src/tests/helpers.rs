// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::{AuthenticatedActor, Role};
use crate::request_response::CreateSubscriptionRequest;
use kerbside_domain::{RouteArea, Slot};
use kerbside_persistence::Persistence;
use time::Weekday;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn ops_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("office1"), Role::Ops)
}

pub fn driver_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("driver1"), Role::Driver)
}

/// Seeds the catalogue with a Monday AM Porthcawl route and a Wednesday
/// Bridgend route.
pub fn seed_catalogue(persistence: &mut Persistence) {
    persistence
        .insert_route_area(&RouteArea::new(
            "Porthcawl",
            Weekday::Monday,
            Slot::Am,
            &[String::from("CF36"), String::from("CF33")],
            10,
        ))
        .unwrap();
    persistence
        .insert_route_area(&RouteArea::new(
            "Bridgend",
            Weekday::Wednesday,
            Slot::Any,
            &[String::from("CF31"), String::from("CF32")],
            20,
        ))
        .unwrap();
}

pub fn subscription_request(postcode: &str) -> CreateSubscriptionRequest {
    CreateSubscriptionRequest {
        customer_name: String::from("Test Customer"),
        postcode: postcode.to_string(),
        address: String::from("1 Esplanade Avenue"),
        frequency: String::from("weekly"),
        extra_bags: 0,
        use_own_bin: false,
        status: None,
    }
}
