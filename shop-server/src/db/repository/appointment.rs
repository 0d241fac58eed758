//! Appointment Repository (repairs and bike fittings)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    Appointment, AppointmentCreate, AppointmentQuery, AppointmentStatus, AppointmentUpdate,
    MAX_AMOUNT, Permission,
};
use shared::util::{normalize_email, now_millis, snowflake_id};

use super::{RepoError, RepoResult};
use crate::auth::permissions;
use crate::db::models::StaffRecord;
use crate::db::{APPOINTMENTS_TABLE, STAFF_TABLE, Storage};

#[derive(Clone)]
pub struct AppointmentRepository {
    storage: Storage,
}

impl AppointmentRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Appointments ordered by preferred date, then booking time
    pub fn find_all(&self, query: &AppointmentQuery) -> RepoResult<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self
            .storage
            .list::<Appointment>(APPOINTMENTS_TABLE)?
            .into_iter()
            .filter(|a| query.status.is_none_or(|s| a.status == s))
            .filter(|a| query.kind.is_none_or(|k| a.kind == k))
            .filter(|a| {
                query
                    .technician_id
                    .is_none_or(|t| a.technician_id == Some(t))
            })
            .collect();
        appointments.sort_by(|a, b| {
            a.preferred_date
                .cmp(&b.preferred_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(appointments)
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Appointment>> {
        Ok(self.storage.get(APPOINTMENTS_TABLE, id)?)
    }

    /// Book an appointment; `today` is the shop's current date
    pub fn create(&self, data: AppointmentCreate, today: NaiveDate) -> RepoResult<Appointment> {
        if data.preferred_date < today {
            return Err(RepoError::rule(
                ErrorCode::AppointmentDateInPast,
                format!("Preferred date {} is in the past", data.preferred_date),
            ));
        }

        let now = now_millis();
        let appointment = Appointment {
            id: snowflake_id(),
            kind: data.kind,
            customer_name: data.customer_name.trim().to_string(),
            customer_email: normalize_email(&data.customer_email),
            customer_phone: data.customer_phone,
            bike_description: data.bike_description.trim().to_string(),
            issue: data.issue,
            preferred_date: data.preferred_date,
            status: AppointmentStatus::Booked,
            technician_id: None,
            notes: None,
            estimated_cost: None,
            final_cost: None,
            created_at: now,
            updated_at: now,
        };
        self.storage
            .put(APPOINTMENTS_TABLE, appointment.id, &appointment)?;
        Ok(appointment)
    }

    /// Workshop update: status, notes and costs
    ///
    /// Starting work requires an assigned technician. Notes and costs are
    /// frozen once the appointment is completed or cancelled; the update
    /// that closes it may still set them.
    pub fn update(&self, id: i64, data: AppointmentUpdate) -> RepoResult<Appointment> {
        for cost in [data.estimated_cost, data.final_cost].into_iter().flatten() {
            if cost < Decimal::ZERO || cost > MAX_AMOUNT {
                return Err(RepoError::rule(
                    ErrorCode::ValueOutOfRange,
                    format!("Costs must be between 0 and {MAX_AMOUNT}"),
                ));
            }
        }

        let txn = self.storage.begin_write()?;
        let mut appointment: Appointment =
            Storage::get_txn(&txn, APPOINTMENTS_TABLE, id)?.ok_or_else(|| not_found(id))?;

        let edits_details =
            data.notes.is_some() || data.estimated_cost.is_some() || data.final_cost.is_some();
        if edits_details && !appointment.status.is_open() {
            return Err(RepoError::Rule(
                shared::AppError::with_message(
                    ErrorCode::AppointmentInvalidTransition,
                    format!(
                        "Cannot edit a {} appointment",
                        appointment.status.as_str()
                    ),
                )
                .with_detail("status", appointment.status.as_str()),
            ));
        }

        if let Some(next) = data.status {
            if next != appointment.status {
                if !appointment.status.can_transition_to(next) {
                    return Err(RepoError::Rule(
                        shared::AppError::with_message(
                            ErrorCode::AppointmentInvalidTransition,
                            format!(
                                "Cannot change appointment from {} to {}",
                                appointment.status.as_str(),
                                next.as_str()
                            ),
                        )
                        .with_detail("from", appointment.status.as_str())
                        .with_detail("to", next.as_str()),
                    ));
                }
                if next == AppointmentStatus::InProgress && appointment.technician_id.is_none() {
                    return Err(RepoError::rule(
                        ErrorCode::TechnicianRequired,
                        "Assign a technician before starting work",
                    ));
                }
                appointment.status = next;
            }
        }
        if data.notes.is_some() {
            appointment.notes = data.notes;
        }
        if data.estimated_cost.is_some() {
            appointment.estimated_cost = data.estimated_cost;
        }
        if data.final_cost.is_some() {
            appointment.final_cost = data.final_cost;
        }

        appointment.updated_at = now_millis();
        Storage::put_txn(&txn, APPOINTMENTS_TABLE, id, &appointment)?;
        Storage::commit(txn)?;
        Ok(appointment)
    }

    /// Assign an open appointment to a technician
    ///
    /// The assignee must be an active staff user whose role can manage repairs.
    pub fn assign(&self, id: i64, technician_id: i64) -> RepoResult<Appointment> {
        let txn = self.storage.begin_write()?;
        let mut appointment: Appointment =
            Storage::get_txn(&txn, APPOINTMENTS_TABLE, id)?.ok_or_else(|| not_found(id))?;

        if !appointment.status.is_open() {
            return Err(RepoError::rule(
                ErrorCode::AppointmentInvalidTransition,
                format!(
                    "Cannot assign a {} appointment",
                    appointment.status.as_str()
                ),
            ));
        }

        let technician: StaffRecord = Storage::get_txn(&txn, STAFF_TABLE, technician_id)?
            .filter(|s: &StaffRecord| s.is_active)
            .ok_or_else(|| {
                RepoError::rule(
                    ErrorCode::TechnicianNotFound,
                    format!("Technician {} not found", technician_id),
                )
            })?;
        let eligible = technician
            .role()
            .is_some_and(|role| permissions::has_permission(role, Permission::ManageRepairs));
        if !eligible {
            return Err(RepoError::rule(
                ErrorCode::TechnicianNotEligible,
                format!(
                    "{} ({}) cannot take workshop assignments",
                    technician.name, technician.role
                ),
            ));
        }

        appointment.technician_id = Some(technician_id);
        appointment.updated_at = now_millis();
        Storage::put_txn(&txn, APPOINTMENTS_TABLE, id, &appointment)?;
        Storage::commit(txn)?;
        Ok(appointment)
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(
        ErrorCode::AppointmentNotFound,
        format!("Appointment {} not found", id),
    )
}
