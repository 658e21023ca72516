//! Servicio de asignación de recursos a viajes
//!
//! Reglas que cruzan entidades: un recurso en mantenimiento no se asigna a un
//! viaje cuya franja cae dentro de la ventana de mantenimiento (ni al crear
//! o editar el viaje, ni al programar el mantenimiento), y el conteo de
//! pasajeros se contrasta con los asientos de los vehículos asignados.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Ownable, Trip, Vehicle, VehicleModel};
use crate::utils::errors::{DomainError, DomainResult};

/// Falla con `ResourceUnavailable` si el recurso no está libre durante el viaje
pub fn ensure_available<R: Ownable>(trip: &Trip, resource: &R) -> DomainResult<()> {
    let (from, to) = trip.window();
    if !resource.is_available(from, to) {
        return Err(DomainError::ResourceUnavailable(format!(
            "resource {} is under maintenance during trip {}",
            resource.resource_id(),
            trip.id
        )));
    }
    Ok(())
}

/// Añade el vehículo al viaje tras comprobar su disponibilidad
pub fn assign_vehicle(trip: &mut Trip, vehicle: &Vehicle, actor: &str) -> DomainResult<bool> {
    ensure_available(trip, vehicle)?;
    let added = trip.add_vehicle(vehicle.resource_id(), actor);
    if added {
        tracing::info!("🚌 Vehicle {} assigned to trip {}", vehicle.immatriculation, trip.id);
    }
    Ok(added)
}

/// Comprueba los vehículos asignados al viaje contra su franja actual.
/// Los vehículos que no están en el viaje se ignoran.
pub fn ensure_vehicles_available(trip: &Trip, vehicles: &[Vehicle]) -> DomainResult<()> {
    vehicles
        .iter()
        .filter(|v| trip.has_vehicle(v.resource_id()))
        .try_for_each(|v| ensure_available(trip, v))
}

/// Aplica un cambio de horario y revalida los vehículos asignados.
/// Si el cambio o la revalidación fallan, el viaje no cambia.
pub fn reschedule<F>(trip: &mut Trip, vehicles: &[Vehicle], change: F) -> DomainResult<()>
where
    F: FnOnce(&mut Trip) -> DomainResult<()>,
{
    let mut candidate = trip.clone();
    change(&mut candidate)?;
    ensure_vehicles_available(&candidate, vehicles)?;
    *trip = candidate;
    Ok(())
}

/// Falla si el recurso, con su mantenimiento actual, ya no está libre para
/// alguno de los viajes en los que figura
pub fn ensure_free_for_trips<R: Ownable>(resource: &R, trips: &[Trip]) -> DomainResult<()> {
    trips
        .iter()
        .filter(|t| t.has_vehicle(resource.resource_id()))
        .try_for_each(|t| ensure_available(t, resource))
}

/// Balance de plazas de un viaje
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAccounting {
    pub capacity: u32,
    pub passengers: u32,
    pub remaining: u32,
    pub overbooked: bool,
}

/// Suma los asientos de los vehículos del viaje.
///
/// Vehículos con modelo de nombre libre (sin distribución) o ausentes de
/// `vehicles` aportan 0 plazas.
pub fn seat_accounting(trip: &Trip, vehicles: &[Vehicle], models: &[VehicleModel]) -> SeatAccounting {
    let seats_by_model: HashMap<Uuid, u32> = models.iter().map(|m| (m.id, m.number_seats())).collect();
    let capacity = vehicles
        .iter()
        .filter(|v| trip.has_vehicle(v.resource_id()))
        .filter_map(|v| v.model.catalog_id())
        .filter_map(|id| seats_by_model.get(&id).copied())
        .sum::<u32>();

    SeatAccounting {
        capacity,
        passengers: trip.passengers_count,
        remaining: capacity.saturating_sub(trip.passengers_count),
        overbooked: trip.passengers_count > capacity,
    }
}
