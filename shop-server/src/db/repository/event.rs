//! Community Event Repository

use shared::error::ErrorCode;
use shared::models::{Event, EventCreate, EventRegister, EventRegistration, EventUpdate};
use shared::util::{normalize_email, now_millis, snowflake_id};

use super::{RepoError, RepoResult};
use crate::db::{EVENTS_TABLE, Storage};

#[derive(Clone)]
pub struct EventRepository {
    storage: Storage,
}

impl EventRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// All events ordered by start time
    pub fn find_all(&self) -> RepoResult<Vec<Event>> {
        let mut events: Vec<Event> = self.storage.list(EVENTS_TABLE)?;
        events.sort_by_key(|e| e.starts_at);
        Ok(events)
    }

    pub fn find_published(&self) -> RepoResult<Vec<Event>> {
        Ok(self.find_all()?.into_iter().filter(|e| e.published).collect())
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Event>> {
        Ok(self.storage.get(EVENTS_TABLE, id)?)
    }

    pub fn create(&self, data: EventCreate) -> RepoResult<Event> {
        check_capacity(data.capacity)?;
        let now = now_millis();
        let event = Event {
            id: snowflake_id(),
            title: data.title.trim().to_string(),
            description: data.description,
            location: data.location.trim().to_string(),
            starts_at: data.starts_at,
            capacity: data.capacity,
            registrations: Vec::new(),
            published: data.published,
            created_at: now,
            updated_at: now,
        };
        self.storage.put(EVENTS_TABLE, event.id, &event)?;
        Ok(event)
    }

    pub fn update(&self, id: i64, data: EventUpdate) -> RepoResult<Event> {
        let txn = self.storage.begin_write()?;
        let mut event: Event =
            Storage::get_txn(&txn, EVENTS_TABLE, id)?.ok_or_else(|| not_found(id))?;

        if let Some(title) = data.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = data.description {
            event.description = description;
        }
        if let Some(location) = data.location {
            event.location = location.trim().to_string();
        }
        if let Some(starts_at) = data.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(capacity) = data.capacity {
            check_capacity(capacity)?;
            if (capacity as usize) < event.registrations.len() {
                return Err(RepoError::rule(
                    ErrorCode::ValueOutOfRange,
                    format!(
                        "Capacity {} is below the {} existing registrations",
                        capacity,
                        event.registrations.len()
                    ),
                ));
            }
            event.capacity = capacity;
        }
        if let Some(published) = data.published {
            event.published = published;
        }

        event.updated_at = now_millis();
        Storage::put_txn(&txn, EVENTS_TABLE, id, &event)?;
        Storage::commit(txn)?;
        Ok(event)
    }

    pub fn delete(&self, id: i64) -> RepoResult<()> {
        if !self.storage.remove(EVENTS_TABLE, id)? {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Sign a participant up for a published, upcoming event
    pub fn register(&self, id: i64, data: EventRegister, now: i64) -> RepoResult<Event> {
        let txn = self.storage.begin_write()?;
        let mut event: Event = Storage::get_txn(&txn, EVENTS_TABLE, id)?
            .filter(|e: &Event| e.published)
            .ok_or_else(|| not_found(id))?;

        if event.starts_at <= now {
            return Err(RepoError::rule(
                ErrorCode::EventAlreadyStarted,
                "Registration is closed for this event",
            ));
        }
        let email = normalize_email(&data.email);
        if event.registrations.iter().any(|r| r.email == email) {
            return Err(RepoError::rule(
                ErrorCode::EventAlreadyRegistered,
                format!("{} is already registered", email),
            ));
        }
        if event.spots_left() == 0 {
            return Err(RepoError::rule(
                ErrorCode::EventFull,
                format!("'{}' is fully booked", event.title),
            ));
        }

        event.registrations.push(EventRegistration {
            name: data.name.trim().to_string(),
            email,
            registered_at: now,
        });
        event.updated_at = now;
        Storage::put_txn(&txn, EVENTS_TABLE, id, &event)?;
        Storage::commit(txn)?;
        Ok(event)
    }
}

fn check_capacity(capacity: u32) -> RepoResult<()> {
    if capacity == 0 {
        return Err(RepoError::rule(
            ErrorCode::ValueOutOfRange,
            "Capacity must be at least 1",
        ));
    }
    Ok(())
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(ErrorCode::EventNotFound, format!("Event {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_800_000_000_000;

    fn ride(repo: &EventRepository, capacity: u32, published: bool) -> Event {
        repo.create(EventCreate {
            title: "Sunday gravel ride".to_string(),
            description: "60km, coffee stop".to_string(),
            location: "Shop front".to_string(),
            starts_at: NOW + 86_400_000,
            capacity,
            published,
        })
        .unwrap()
    }

    fn rider(name: &str, email: &str) -> EventRegister {
        EventRegister {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    fn code(err: RepoError) -> ErrorCode {
        match err {
            RepoError::Rule(e) => e.code,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_registration_rules() {
        let repo = EventRepository::new(Storage::open_in_memory().unwrap());
        let event = ride(&repo, 1, true);

        let event = repo.register(event.id, rider("Kim", "kim@example.com"), NOW).unwrap();
        assert_eq!(event.spots_left(), 0);

        assert_eq!(
            code(
                repo.register(event.id, rider("Kim", "KIM@example.com"), NOW)
                    .unwrap_err()
            ),
            ErrorCode::EventAlreadyRegistered
        );
        assert_eq!(
            code(
                repo.register(event.id, rider("Jo", "jo@example.com"), NOW)
                    .unwrap_err()
            ),
            ErrorCode::EventFull
        );
    }

    #[test]
    fn test_past_and_unpublished_events() {
        let repo = EventRepository::new(Storage::open_in_memory().unwrap());
        let draft = ride(&repo, 10, false);
        assert_eq!(
            code(
                repo.register(draft.id, rider("Kim", "kim@example.com"), NOW)
                    .unwrap_err()
            ),
            ErrorCode::EventNotFound
        );

        let event = ride(&repo, 10, true);
        let later = event.starts_at + 1;
        assert_eq!(
            code(
                repo.register(event.id, rider("Kim", "kim@example.com"), later)
                    .unwrap_err()
            ),
            ErrorCode::EventAlreadyStarted
        );
    }

    #[test]
    fn test_capacity_cannot_drop_below_registrations() {
        let repo = EventRepository::new(Storage::open_in_memory().unwrap());
        let event = ride(&repo, 2, true);
        repo.register(event.id, rider("A", "a@example.com"), NOW).unwrap();
        repo.register(event.id, rider("B", "b@example.com"), NOW).unwrap();
        let err = repo
            .update(
                event.id,
                EventUpdate {
                    capacity: Some(1),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ValueOutOfRange);
    }
}
