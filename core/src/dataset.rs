//! CSV-backed data context.
//!
//! RULE: only this module touches the filesystem. The four tables are
//! loaded once at startup, validated row by row, and never mutated
//! afterwards — views receive a shared `&DataContext` and build transient
//! projections over it.

use crate::{
    error::{DashError, DashResult},
    types::{Money, Year},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub const COMPANY_FILE: &str = "company_info.csv";
pub const AUDIENCE_FILE: &str = "audience_info.csv";
pub const BUDGET_FILE: &str = "event_budget.csv";
pub const HISTORY_FILE: &str = "history_event.csv";

/// Date formats accepted in `history_event.csv`, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "ParticipationTimes")]
    pub participation_times: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceMember {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "TicketType")]
    pub ticket_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    #[serde(rename = "EventName")]
    pub event_name: String,
    #[serde(rename = "PlannedBudget")]
    pub planned_budget: Money,
    #[serde(rename = "PromotionCost")]
    pub promotion_cost: Money,
    #[serde(rename = "VenueCost")]
    pub venue_cost: Money,
    #[serde(rename = "ActualRevenue")]
    pub actual_revenue: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub audience_count: u64,
}

impl HistoryPoint {
    /// Calendar year of the event date. Derived on every access, not stored.
    pub fn year(&self) -> Year {
        self.date.year()
    }
}

/// Raw row shape for `history_event.csv`; the date stays a string until the
/// loader has a line number to attach to a parse failure.
#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "AudienceCount")]
    audience_count: i64,
}

// ── Data context ─────────────────────────────────────────────────────────────

/// The four tables, read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct DataContext {
    pub companies: Vec<Company>,
    pub audience: Vec<AudienceMember>,
    pub budgets: Vec<Budget>,
    pub history: Vec<HistoryPoint>,
}

impl DataContext {
    /// Load all four tables from `data_dir`. Any missing file or malformed
    /// row aborts the load — there is no partial-table recovery.
    pub fn load(data_dir: &Path) -> DashResult<Self> {
        let companies = load_companies(&data_dir.join(COMPANY_FILE))?;
        let audience = load_audience(&data_dir.join(AUDIENCE_FILE))?;
        let budgets = load_budgets(&data_dir.join(BUDGET_FILE))?;
        let history = load_history(&data_dir.join(HISTORY_FILE))?;

        log::debug!(
            "loaded {} companies, {} audience members, {} budgets, {} history points",
            companies.len(),
            audience.len(),
            budgets.len(),
            history.len()
        );

        Ok(Self {
            companies,
            audience,
            budgets,
            history,
        })
    }

    /// In-memory fixture used by unit and view tests.
    pub fn sample() -> Self {
        let companies = vec![
            company("Tech", "Large", 3),
            company("Tech", "Small", 1),
            company("Finance", "Medium", 5),
            company("Health", "Small", 2),
        ];
        let audience = vec![
            member("Female", 24, "Hong Kong", "Standard"),
            member("Male", 31, "Shenzhen", "VIP"),
            member("Female", 45, "Hong Kong", "Standard"),
            member("Male", 24, "Macau", "Student"),
            member("Female", 52, "Shenzhen", "Standard"),
        ];
        let budgets = vec![
            budget("Spring Expo", 1000, 300, 250, 1200),
            budget("Autumn Fair", 999, 400, 330, 800),
            budget("Winter Gala", 500, 150, 125, 610),
        ];
        let history = vec![
            point(2019, 5, 1, 800),
            point(2020, 6, 15, 350),
            point(2021, 4, 20, 500),
            point(2022, 5, 10, 950),
            point(2023, 6, 2, 1100),
            point(2024, 4, 28, 1250),
        ];
        Self {
            companies,
            audience,
            budgets,
            history,
        }
    }
}

fn company(industry: &str, size: &str, times: u32) -> Company {
    Company {
        industry: industry.into(),
        size: size.into(),
        participation_times: times,
    }
}

fn member(gender: &str, age: u32, city: &str, ticket: &str) -> AudienceMember {
    AudienceMember {
        gender: gender.into(),
        age,
        city: city.into(),
        ticket_type: ticket.into(),
    }
}

fn budget(name: &str, planned: Money, promo: Money, venue: Money, revenue: Money) -> Budget {
    Budget {
        event_name: name.into(),
        planned_budget: planned,
        promotion_cost: promo,
        venue_cost: venue,
        actual_revenue: revenue,
    }
}

fn point(y: i32, m: u32, d: u32, count: u64) -> HistoryPoint {
    HistoryPoint {
        date: NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date"),
        audience_count: count,
    }
}

// ── Loaders ──────────────────────────────────────────────────────────────────

fn open_reader(path: &Path) -> DashResult<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| DashError::StartupIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file))
}

/// Line number for error messages: headers occupy line 1, rows are 1-based.
fn csv_line(idx: usize) -> usize {
    idx + 2
}

fn load_companies(path: &Path) -> DashResult<Vec<Company>> {
    let mut reader = open_reader(path)?;
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<Company>().enumerate() {
        let row = result.map_err(|e| DashError::DataFormat {
            table: COMPANY_FILE,
            line: csv_line(idx),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn load_audience(path: &Path) -> DashResult<Vec<AudienceMember>> {
    let mut reader = open_reader(path)?;
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<AudienceMember>().enumerate() {
        let row = result.map_err(|e| DashError::DataFormat {
            table: AUDIENCE_FILE,
            line: csv_line(idx),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn load_budgets(path: &Path) -> DashResult<Vec<Budget>> {
    let mut reader = open_reader(path)?;
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<Budget>().enumerate() {
        let line = csv_line(idx);
        let row: Budget = result.map_err(|e| DashError::DataFormat {
            table: BUDGET_FILE,
            line,
            message: e.to_string(),
        })?;
        let amounts = [
            ("PlannedBudget", row.planned_budget),
            ("PromotionCost", row.promotion_cost),
            ("VenueCost", row.venue_cost),
            ("ActualRevenue", row.actual_revenue),
        ];
        for (column, value) in amounts {
            if value < 0 {
                return Err(DashError::DataFormat {
                    table: BUDGET_FILE,
                    line,
                    message: format!("{column} must be non-negative, got {value}"),
                });
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

fn load_history(path: &Path) -> DashResult<Vec<HistoryPoint>> {
    let mut reader = open_reader(path)?;
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<HistoryRow>().enumerate() {
        let line = csv_line(idx);
        let raw: HistoryRow = result.map_err(|e| DashError::DataFormat {
            table: HISTORY_FILE,
            line,
            message: e.to_string(),
        })?;
        let date = parse_date(&raw.date).ok_or_else(|| DashError::DataFormat {
            table: HISTORY_FILE,
            line,
            message: format!("unparseable Date '{}'", raw.date),
        })?;
        if raw.audience_count < 0 {
            return Err(DashError::DataFormat {
                table: HISTORY_FILE,
                line,
                message: format!("AudienceCount must be non-negative, got {}", raw.audience_count),
            });
        }
        rows.push(HistoryPoint {
            date,
            audience_count: raw.audience_count as u64,
        });
    }
    Ok(rows)
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}
