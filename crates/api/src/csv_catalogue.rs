// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV import of the route catalogue.
//!
//! Ops maintain route areas in a spreadsheet; this module previews and
//! imports that sheet. Preview classifies every row without writing
//! anything, so ops can fix a bad sheet before any import happens.
//! Import writes the valid rows and reports the rejected ones; it never
//! aborts the whole file on one bad row.
//!
//! Expected header: `area_name,weekday,slot,prefixes,sort_order,active`
//! with prefixes separated by semicolons (e.g., `CF36;CF33`).

use csv::ReaderBuilder;
use kerbside_domain::{DomainError, RouteArea, Slot, parse_weekday};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use kerbside_persistence::Persistence;

/// The classification of one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsvRowStatus {
    /// The row parsed cleanly and can be imported.
    Valid,
    /// The row is malformed and will be rejected.
    Invalid {
        /// Why the row was rejected.
        reason: String,
    },
}

/// One previewed CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRowPreview {
    /// The 1-based data row number (excluding the header).
    pub row: usize,
    /// The area name as it appeared in the sheet.
    pub area_name: String,
    /// The row classification.
    pub status: CsvRowStatus,
}

/// Result of importing a route catalogue sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvImportSummary {
    /// Rows imported.
    pub imported: u32,
    /// Rows rejected, with reasons.
    pub rejected: Vec<CsvRowPreview>,
}

#[derive(Debug, Deserialize)]
struct RouteAreaRecord {
    area_name: String,
    weekday: String,
    slot: String,
    prefixes: String,
    sort_order: i32,
    #[serde(default)]
    active: Option<String>,
}

fn record_to_route_area(record: &RouteAreaRecord) -> Result<RouteArea, String> {
    if record.area_name.trim().is_empty() {
        return Err(String::from("area_name must not be empty"));
    }

    let weekday = parse_weekday(record.weekday.trim()).map_err(|e: DomainError| e.to_string())?;
    let slot: Slot = Slot::parse(&record.slot).map_err(|e: DomainError| e.to_string())?;

    let prefixes: Vec<String> = record
        .prefixes
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();
    if prefixes.is_empty() {
        return Err(String::from("prefixes must contain at least one postcode prefix"));
    }

    let mut area: RouteArea = RouteArea::new(
        &record.area_name,
        weekday,
        slot,
        &prefixes,
        record.sort_order,
    );

    if let Some(active) = record.active.as_deref() {
        let is_active: bool = match active.trim().to_lowercase().as_str() {
            "" | "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            other => return Err(format!("Unrecognized active flag '{other}'")),
        };
        if !is_active {
            area = area.deactivated();
        }
    }

    Ok(area)
}

fn parse_rows(csv_text: &str) -> Vec<(usize, String, Result<RouteArea, String>)> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut rows: Vec<(usize, String, Result<RouteArea, String>)> = Vec::new();
    for (index, record) in reader.deserialize::<RouteAreaRecord>().enumerate() {
        let row: usize = index + 1;
        match record {
            Ok(record) => {
                let parsed: Result<RouteArea, String> = record_to_route_area(&record);
                rows.push((row, record.area_name, parsed));
            }
            Err(e) => rows.push((row, String::new(), Err(e.to_string()))),
        }
    }
    rows
}

/// Previews a route catalogue sheet without writing anything.
///
/// Row problems are reported per-row, never as failures: a sheet full of
/// bad rows still previews cleanly so ops can see every problem at once.
#[must_use]
pub fn preview_route_catalogue(csv_text: &str) -> Vec<CsvRowPreview> {
    parse_rows(csv_text)
        .into_iter()
        .map(|(row, area_name, parsed)| CsvRowPreview {
            row,
            area_name,
            status: match parsed {
                Ok(_) => CsvRowStatus::Valid,
                Err(reason) => CsvRowStatus::Invalid { reason },
            },
        })
        .collect()
}

/// Imports the valid rows of a route catalogue sheet.
///
/// Invalid rows are reported in the summary and skipped; valid rows are
/// inserted in sheet order.
///
/// # Errors
///
/// Returns an error if the actor is not ops or an insert fails.
pub fn import_route_catalogue(
    persistence: &mut Persistence,
    csv_text: &str,
    actor: &AuthenticatedActor,
) -> Result<CsvImportSummary, ApiError> {
    AuthorizationService::authorize_ops_action(actor, "import_route_catalogue")?;

    let rows = parse_rows(csv_text);
    let mut imported: u32 = 0;
    let mut rejected: Vec<CsvRowPreview> = Vec::new();

    for (row, area_name, parsed) in rows {
        match parsed {
            Ok(area) => {
                persistence
                    .insert_route_area(&area)
                    .map_err(translate_persistence_error)?;
                imported += 1;
            }
            Err(reason) => rejected.push(CsvRowPreview {
                row,
                area_name,
                status: CsvRowStatus::Invalid { reason },
            }),
        }
    }

    info!(
        imported,
        rejected = rejected.len(),
        actor_id = %actor.id,
        "Imported route catalogue"
    );
    Ok(CsvImportSummary { imported, rejected })
}
