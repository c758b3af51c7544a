// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod error;
mod frequency;
mod postcode;
mod recurrence;
mod route_match;
mod slot;
mod status;
mod subscription;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{
    add_days, format_ymd, next_occurrence_of_weekday, parse_weekday, parse_ymd,
    today_in_operational_zone, weekday_index, weekday_name, weekday_of,
};
pub use error::DomainError;
pub use frequency::Frequency;
pub use postcode::Postcode;
pub use recurrence::{MAX_RECURRENCE_STEPS, next_due};
pub use route_match::{RouteArea, RouteMatch, RouteMatchResult, match_postcode};
pub use slot::Slot;
pub use status::SubscriptionStatus;
pub use subscription::Subscription;
pub use validation::{validate_extra_bags, validate_pause_window, validate_route_day};
