use sqlx::{Error, PgPool};
use time::Date;
use uuid::Uuid;

use crate::booking::admission::BookingRequest;
use crate::booking::slots::TimeOfDay;
use crate::db::models::{Appointment, AppointmentDetails};

const APPOINTMENT_COLUMNS: &str =
    "id, barber_id, user_id, date, slot_time, service_ids, created_at";

pub struct AppointmentRepository;

impl AppointmentRepository {
    /// Insert a new appointment. The unique index on
    /// (barber_id, date, slot_time) makes this the serialization point for
    /// concurrent bookings; a losing writer gets a unique violation.
    pub async fn create(pool: &PgPool, request: &BookingRequest) -> Result<Appointment, Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            r#"
            INSERT INTO appointments (id, barber_id, user_id, date, slot_time, service_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.barber_id)
        .bind(request.user_id)
        .bind(request.date)
        .bind(request.time)
        .bind(&request.service_ids)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(pool: &PgPool, appointment_id: Uuid) -> Result<Option<Appointment>, Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(appointment_id)
        .fetch_optional(pool)
        .await
    }

    /// Slot labels already taken for one barber on one date. Scoped
    /// server-side; never fetch-and-filter the whole appointment history.
    pub async fn booked_slots(
        pool: &PgPool,
        barber_id: Uuid,
        date: Date,
    ) -> Result<Vec<TimeOfDay>, Error> {
        sqlx::query_scalar::<_, TimeOfDay>(
            "SELECT slot_time FROM appointments WHERE barber_id = $1 AND date = $2",
        )
        .bind(barber_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Every booking held at one shop, newest first, each with its service
    /// ids resolved to display names in a single round trip. Names follow
    /// catalogue order; a booking whose services were since deleted gets an
    /// empty name list.
    pub async fn list_for_barber(
        pool: &PgPool,
        barber_id: Uuid,
    ) -> Result<Vec<AppointmentDetails>, Error> {
        sqlx::query_as::<_, AppointmentDetails>(
            r#"
            SELECT a.id, a.user_id, a.date, a.slot_time, a.created_at,
                   COALESCE(
                       array_agg(s.name ORDER BY s.position, s.id)
                           FILTER (WHERE s.id IS NOT NULL),
                       '{}'
                   ) AS service_names
            FROM appointments a
            LEFT JOIN services s ON s.id = ANY(a.service_ids)
            WHERE a.barber_id = $1
            GROUP BY a.id
            ORDER BY a.date DESC, a.slot_time DESC
            "#,
        )
        .bind(barber_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Appointment>, Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
             WHERE user_id = $1 ORDER BY date DESC, slot_time DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
