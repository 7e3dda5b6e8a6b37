use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::booking::admission::BookingRequest;
use crate::booking::slots::TimeOfDay;
use crate::booking::store::{ScheduleStore, StoreError};
use crate::db::models::{Appointment, AppointmentDetails, BusinessHours, Service};

/// In-memory `ScheduleStore` double. Mirrors the Postgres implementation's
/// contract, including the composite-key uniqueness check on insert.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    hours: HashMap<Uuid, BusinessHours>,
    services: HashMap<Uuid, Vec<Service>>,
    appointments: Vec<Appointment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_barber(&self, hours: BusinessHours) -> Uuid {
        let barber_id = Uuid::new_v4();
        let mut inner = self.inner.lock().unwrap();
        inner.hours.insert(barber_id, hours);
        inner.services.insert(barber_id, Vec::new());
        barber_id
    }

    pub async fn set_services(&self, barber_id: Uuid, services: Vec<Service>) {
        self.inner.lock().unwrap().services.insert(barber_id, services);
    }

    /// Insert a booked slot directly, bypassing admission.
    pub async fn seed_appointment(&self, barber_id: Uuid, date: Date, time: &str) {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            barber_id,
            user_id: Uuid::new_v4(),
            date,
            time: time.parse().unwrap(),
            service_ids: vec![Uuid::new_v4()],
            created_at: OffsetDateTime::now_utc(),
        };
        self.inner.lock().unwrap().appointments.push(appointment);
    }

    pub async fn appointment_by_id(&self, id: Uuid) -> Option<Appointment> {
        self.inner
            .lock()
            .unwrap()
            .appointments
            .iter()
            .find(|appointment| appointment.id == id)
            .cloned()
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn business_hours(&self, barber_id: Uuid) -> Result<BusinessHours, StoreError> {
        self.inner
            .lock()
            .unwrap()
            .hours
            .get(&barber_id)
            .cloned()
            .ok_or(StoreError::BusinessNotFound)
    }

    async fn booked_slots(
        &self,
        barber_id: Uuid,
        date: Date,
    ) -> Result<HashSet<TimeOfDay>, StoreError> {
        let booked = {
            let inner = self.inner.lock().unwrap();
            inner
                .appointments
                .iter()
                .filter(|appointment| {
                    appointment.barber_id == barber_id && appointment.date == date
                })
                .map(|appointment| appointment.time)
                .collect()
        };
        // Yield after snapshotting, like a real store read suspending on I/O,
        // so racing admissions can interleave between their read and write.
        tokio::task::yield_now().await;
        Ok(booked)
    }

    async fn create_appointment(
        &self,
        request: &BookingRequest,
    ) -> Result<Appointment, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let taken = inner.appointments.iter().any(|appointment| {
            appointment.barber_id == request.barber_id
                && appointment.date == request.date
                && appointment.time == request.time
        });
        if taken {
            return Err(StoreError::DuplicateSlot);
        }
        let appointment = Appointment {
            id: Uuid::new_v4(),
            barber_id: request.barber_id,
            user_id: request.user_id,
            date: request.date,
            time: request.time,
            service_ids: request.service_ids.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        inner.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn services(&self, barber_id: Uuid) -> Result<Vec<Service>, StoreError> {
        self.inner
            .lock()
            .unwrap()
            .services
            .get(&barber_id)
            .cloned()
            .ok_or(StoreError::BusinessNotFound)
    }

    async fn shop_appointments(
        &self,
        barber_id: Uuid,
    ) -> Result<Vec<AppointmentDetails>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut catalogue = inner.services.get(&barber_id).cloned().unwrap_or_default();
        catalogue.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));

        let mut feed: Vec<AppointmentDetails> = inner
            .appointments
            .iter()
            .filter(|appointment| appointment.barber_id == barber_id)
            .map(|appointment| AppointmentDetails {
                id: appointment.id,
                user_id: appointment.user_id,
                date: appointment.date,
                time: appointment.time,
                service_names: catalogue
                    .iter()
                    .filter(|service| appointment.service_ids.contains(&service.id))
                    .map(|service| service.name.clone())
                    .collect(),
                created_at: appointment.created_at,
            })
            .collect();
        feed.sort_by(|a, b| b.date.cmp(&a.date).then(b.time.cmp(&a.time)));
        Ok(feed)
    }
}
