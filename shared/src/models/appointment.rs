//! Service Appointment Model (repairs and bike fittings)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentKind {
    Repair,
    Fitting,
}

/// Appointment lifecycle
///
/// ```text
/// booked -> in-progress -> completed
///    \__________\_______> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Booked,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const fn all() -> &'static [AppointmentStatus] {
        &[
            AppointmentStatus::Booked,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "booked",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Booked, InProgress) | (InProgress, Completed) | (Booked, Cancelled) | (InProgress, Cancelled)
        )
    }

    pub fn is_open(self) -> bool {
        matches!(self, AppointmentStatus::Booked | AppointmentStatus::InProgress)
    }
}

/// Repair or fitting appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub kind: AppointmentKind,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub bike_description: String,
    pub issue: Option<String>,
    pub preferred_date: chrono::NaiveDate,
    pub status: AppointmentStatus,
    pub technician_id: Option<i64>,
    pub notes: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub final_cost: Option<Decimal>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Booking payload (anonymous storefront customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub kind: AppointmentKind,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub bike_description: String,
    pub issue: Option<String>,
    pub preferred_date: chrono::NaiveDate,
}

/// Workshop update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub final_cost: Option<Decimal>,
}

/// Technician assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentAssign {
    pub technician_id: i64,
}

/// Admin appointment list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub status: Option<AppointmentStatus>,
    pub kind: Option<AppointmentKind>,
    pub technician_id: Option<i64>,
}
