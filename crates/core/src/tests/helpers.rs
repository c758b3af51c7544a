// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use kerbside_domain::{Frequency, Postcode, RouteArea, Slot, Subscription, SubscriptionStatus};
use time::Weekday;

pub fn test_subscription() -> Subscription {
    Subscription::new(
        String::from("Test Customer"),
        Postcode::new("CF36 5AA").unwrap(),
        String::from("1 Esplanade Avenue, Porthcawl"),
        Frequency::Weekly,
        0,
        false,
        SubscriptionStatus::Active,
    )
}

pub fn persisted_subscription(subscription_id: i64) -> Subscription {
    let mut subscription: Subscription = test_subscription();
    subscription.subscription_id = Some(subscription_id);
    subscription
}

pub fn test_catalogue() -> Vec<RouteArea> {
    vec![
        RouteArea::with_id(
            1,
            "Porthcawl",
            Weekday::Monday,
            Slot::Am,
            &[String::from("CF36"), String::from("CF33")],
            true,
            10,
        ),
        RouteArea::with_id(
            2,
            "Bridgend",
            Weekday::Wednesday,
            Slot::Any,
            &[String::from("CF31"), String::from("CF32")],
            true,
            20,
        ),
    ]
}
