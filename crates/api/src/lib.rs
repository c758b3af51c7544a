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
    clippy::all
)]

mod auth;
mod csv_catalogue;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use csv_catalogue::{
    CsvImportSummary, CsvRowPreview, CsvRowStatus, import_route_catalogue,
    preview_route_catalogue,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    assign_run, bulk_reassign, cancel_subscription, check_postcode, create_subscription,
    due_count, ensure_daily_run, get_subscription, list_issues_for_run, list_route_areas,
    list_runs, open_issue, override_next_collection, pause_subscription, record_collection,
    resolve_issue, undo_last_collection,
};
pub use request_response::{
    AssignRunRequest, BulkReassignRequest, BulkReassignResponse, CheckPostcodeRequest,
    CheckPostcodeResponse, CreateSubscriptionRequest, CreateSubscriptionResponse, DailyRunInfo,
    DueCountInfo, DueCountResponse, EnsureRunRequest, IssueInfo, OpenIssueRequest,
    OpenIssueResponse, OverrideNextRequest, PauseSubscriptionRequest, ReassignRowInfo,
    RecordCollectionRequest, RecordCollectionResponse, ResolveIssueRequest, ResolveIssueResponse,
    RouteAreaInfo, RouteMatchInfo, SubscriptionInfo, UndoCollectionResponse,
};
