//! Modelo de Trip
//!
//! Un viaje mueve uno o varios vehículos entre dos estaciones distintas.
//! Los vehículos se referencian sólo por identificador: borrar un viaje
//! nunca afecta a los recursos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::audit::{Audit, Audited};
use crate::utils::errors::{DomainError, DomainResult};

/// Datos de entrada para crear un viaje
#[derive(Debug, Clone)]
pub struct TripDraft {
    pub from_station: Uuid,
    pub to_station: Uuid,
    pub vehicles: Vec<Uuid>,
    pub departure_date_time: DateTime<Utc>,
    pub arrival_date_time: Option<DateTime<Utc>>,
    pub passengers_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub from_station: Uuid,
    pub to_station: Uuid,
    pub vehicles: Vec<Uuid>,
    pub departure_date_time: DateTime<Utc>,
    pub arrival_date_time: Option<DateTime<Utc>>,
    pub passengers_count: u32,
    pub audit: Audit,
}

fn check_arrival(departure: DateTime<Utc>, arrival: DateTime<Utc>) -> DomainResult<()> {
    if arrival <= departure {
        return Err(DomainError::InvalidArrival(format!(
            "arrival {} must be after departure {}",
            arrival.to_rfc3339(),
            departure.to_rfc3339()
        )));
    }
    Ok(())
}

fn check_count(count: i64) -> DomainResult<u32> {
    if count < 0 {
        return Err(DomainError::NegativeCount(count));
    }
    u32::try_from(count).map_err(|_| DomainError::CountOutOfRange(count))
}

impl Trip {
    /// Valida y construye. Origen y destino se comparan por identidad.
    pub fn new(draft: TripDraft, created_by: &str) -> DomainResult<Self> {
        if draft.from_station == draft.to_station {
            return Err(DomainError::InvalidTrip(format!(
                "origin and destination are the same station ({})",
                draft.from_station
            )));
        }
        if let Some(arrival) = draft.arrival_date_time {
            check_arrival(draft.departure_date_time, arrival)?;
        }
        let passengers_count = check_count(draft.passengers_count)?;

        let mut vehicles: Vec<Uuid> = Vec::with_capacity(draft.vehicles.len());
        for id in draft.vehicles {
            if !vehicles.contains(&id) {
                vehicles.push(id);
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            from_station: draft.from_station,
            to_station: draft.to_station,
            vehicles,
            departure_date_time: draft.departure_date_time,
            arrival_date_time: draft.arrival_date_time,
            passengers_count,
            audit: Audit::new(created_by),
        })
    }

    /// Intervalo ocupado por el viaje; sin llegada es el instante de salida
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            self.departure_date_time,
            self.arrival_date_time.unwrap_or(self.departure_date_time),
        )
    }

    pub fn has_vehicle(&self, resource_id: Uuid) -> bool {
        self.vehicles.contains(&resource_id)
    }

    /// Devuelve `true` si el vehículo no estaba ya en el viaje
    pub fn add_vehicle(&mut self, resource_id: Uuid, actor: &str) -> bool {
        let added = !self.has_vehicle(resource_id);
        if added {
            self.vehicles.push(resource_id);
        }
        self.touch(actor);
        added
    }

    /// Quitar un vehículo ausente no hace nada. Devuelve `true` si se quitó.
    pub fn remove_vehicle(&mut self, resource_id: Uuid, actor: &str) -> bool {
        let before = self.vehicles.len();
        self.vehicles.retain(|id| *id != resource_id);
        self.touch(actor);
        self.vehicles.len() != before
    }

    pub fn update_departure(&mut self, new_date_time: DateTime<Utc>, actor: &str) -> DomainResult<()> {
        self.update_departure_at(new_date_time, actor, Utc::now())
    }

    pub fn update_departure_at(
        &mut self,
        new_date_time: DateTime<Utc>,
        actor: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if new_date_time < now {
            return Err(DomainError::PastDeparture(format!(
                "{} is before {}",
                new_date_time.to_rfc3339(),
                now.to_rfc3339()
            )));
        }
        if let Some(arrival) = self.arrival_date_time {
            check_arrival(new_date_time, arrival)?;
        }
        self.departure_date_time = new_date_time;
        self.touch(actor);
        Ok(())
    }

    /// La llegada debe ser estrictamente posterior a la salida
    pub fn update_arrival(&mut self, new_date_time: DateTime<Utc>, actor: &str) -> DomainResult<()> {
        check_arrival(self.departure_date_time, new_date_time)?;
        self.arrival_date_time = Some(new_date_time);
        self.touch(actor);
        Ok(())
    }

    pub fn update_passenger_count(&mut self, new_count: i64, actor: &str) -> DomainResult<()> {
        self.passengers_count = check_count(new_count)?;
        self.touch(actor);
        Ok(())
    }
}

impl Audited for Trip {
    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft() -> TripDraft {
        TripDraft {
            from_station: Uuid::new_v4(),
            to_station: Uuid::new_v4(),
            vehicles: vec![],
            departure_date_time: Utc::now() + Duration::days(1),
            arrival_date_time: None,
            passengers_count: 0,
        }
    }

    #[test]
    fn test_same_station_is_rejected_regardless_of_other_fields() {
        let station = Uuid::new_v4();
        for passengers in [0, 12, -3] {
            let mut d = draft();
            d.from_station = station;
            d.to_station = station;
            d.passengers_count = passengers;
            d.arrival_date_time = Some(d.departure_date_time - Duration::hours(1));
            assert!(matches!(Trip::new(d, "admin"), Err(DomainError::InvalidTrip(_))));
        }
    }

    #[test]
    fn test_new_validates_arrival_and_count() {
        let mut d = draft();
        d.arrival_date_time = Some(d.departure_date_time);
        assert!(matches!(Trip::new(d, "admin"), Err(DomainError::InvalidArrival(_))));

        let mut d = draft();
        d.passengers_count = -1;
        assert!(matches!(Trip::new(d, "admin"), Err(DomainError::NegativeCount(-1))));
    }

    #[test]
    fn test_new_deduplicates_vehicles() {
        let bus = Uuid::new_v4();
        let mut d = draft();
        d.vehicles = vec![bus, bus, Uuid::new_v4()];
        let trip = Trip::new(d, "admin").unwrap();
        assert_eq!(trip.vehicles.len(), 2);
        assert_eq!(trip.vehicles[0], bus);
    }

    #[test]
    fn test_vehicle_set_semantics() {
        let mut trip = Trip::new(draft(), "admin").unwrap();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(trip.add_vehicle(a, "op"));
        assert!(trip.add_vehicle(b, "op"));
        assert!(!trip.add_vehicle(a, "op"));
        assert_eq!(trip.vehicles, vec![a, b]);

        assert!(!trip.remove_vehicle(Uuid::new_v4(), "op"));
        assert_eq!(trip.vehicles, vec![a, b]);
        assert!(trip.remove_vehicle(a, "op"));
        assert_eq!(trip.vehicles, vec![b]);
    }

    #[test]
    fn test_update_departure_rejects_past() {
        let mut trip = Trip::new(draft(), "admin").unwrap();
        let before = trip.clone();
        let now = Utc::now();
        let result = trip.update_departure_at(now - Duration::minutes(1), "op", now);
        assert!(matches!(result, Err(DomainError::PastDeparture(_))));
        assert_eq!(trip, before);

        trip.update_departure_at(now + Duration::hours(2), "op", now).unwrap();
        assert_eq!(trip.departure_date_time, now + Duration::hours(2));
        assert_eq!(trip.audit.updated_by, "op");
    }

    #[test]
    fn test_update_departure_keeps_arrival_after_departure() {
        let mut trip = Trip::new(draft(), "admin").unwrap();
        let arrival = trip.departure_date_time + Duration::hours(3);
        trip.update_arrival(arrival, "op").unwrap();

        let result = trip.update_departure(arrival + Duration::hours(1), "op");
        assert!(matches!(result, Err(DomainError::InvalidArrival(_))));
    }

    #[test]
    fn test_update_arrival_requires_strict_inequality() {
        let mut trip = Trip::new(draft(), "admin").unwrap();
        let departure = trip.departure_date_time;

        let result = trip.update_arrival(departure, "op");
        assert!(matches!(result, Err(DomainError::InvalidArrival(_))));
        assert!(trip.arrival_date_time.is_none());

        trip.update_arrival(departure + Duration::seconds(1), "op").unwrap();
        assert_eq!(trip.window(), (departure, departure + Duration::seconds(1)));
    }

    #[test]
    fn test_update_passenger_count() {
        let mut trip = Trip::new(draft(), "admin").unwrap();
        assert!(matches!(
            trip.update_passenger_count(-5, "op"),
            Err(DomainError::NegativeCount(-5))
        ));
        assert_eq!(trip.passengers_count, 0);

        let too_many = i64::from(u32::MAX) + 1;
        assert!(matches!(
            trip.update_passenger_count(too_many, "op"),
            Err(DomainError::CountOutOfRange(n)) if n == too_many
        ));
        assert_eq!(trip.passengers_count, 0);

        trip.update_passenger_count(42, "driver").unwrap();
        assert_eq!(trip.passengers_count, 42);
        assert_eq!(trip.audit.updated_by, "driver");
        assert_eq!(trip.audit.created_by, "admin");
    }
}
