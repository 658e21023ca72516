//! Repositorio sobre ficheros JSON planos
//!
//! Cada colección se guarda como un array JSON (`<DATA_DIR>/<coleccion>.json`)
//! y se mantiene en memoria detrás de un `RwLock`. Las escrituras se hacen
//! bajo el lock de escritura: primero el fichero, luego la memoria, de modo que
//! un fallo deja ambos intactos.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Entity, Page, Repository};
use crate::utils::errors::{conflict_error, not_found_error, AppResult, DomainError};

/// Dirección de ordenación para los listados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

pub struct JsonRepository<T> {
    path: PathBuf,
    page_size: usize,
    items: RwLock<Vec<T>>,
}

impl<T: Entity> JsonRepository<T> {
    /// Abre (o crea vacía) la colección en `data_dir`
    pub async fn open(data_dir: &Path, page_size: usize) -> AppResult<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let path = data_dir.join(format!("{}.json", T::COLLECTION));

        let items: Vec<T> = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        log::info!("📂 Loaded {} {} from {}", items.len(), T::COLLECTION, path.display());

        Ok(Self {
            path,
            page_size: page_size.max(1),
            items: RwLock::new(items),
        })
    }

    async fn persist(&self, items: &[T]) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("💾 Persisted {} {}", items.len(), T::COLLECTION);
        Ok(())
    }

    /// Lectura-modificación-escritura atómica sobre la entidad `key`.
    ///
    /// Si `mutate` falla no se escribe nada.
    pub async fn update_with<F, R>(&self, key: &str, mutate: F) -> AppResult<(T, R)>
    where
        F: FnOnce(&mut T) -> Result<R, DomainError> + Send,
        R: Send,
    {
        let mut items = self.items.write().await;
        let idx = items
            .iter()
            .position(|item| item.key() == key)
            .ok_or_else(|| not_found_error(T::COLLECTION, key))?;

        let mut updated = items[idx].clone();
        let outcome = mutate(&mut updated)?;

        let mut next = items.clone();
        next[idx] = updated.clone();
        self.persist(&next).await?;
        *items = next;
        Ok((updated, outcome))
    }

    /// Borra por clave. Devuelve `false` si no existía.
    pub async fn delete(&self, key: &str) -> AppResult<bool> {
        let mut items = self.items.write().await;
        let Some(idx) = items.iter().position(|item| item.key() == key) else {
            return Ok(false);
        };
        let mut next = items.clone();
        next.remove(idx);
        self.persist(&next).await?;
        *items = next;
        Ok(true)
    }

    /// Como `save`, pero además rechaza la entidad si otra ya tiene `value`
    /// en `field`. La comprobación y la escritura ocurren bajo el mismo lock.
    pub async fn save_unique(&self, entity: T, field: &str, value: &str) -> AppResult<T> {
        let mut items = self.items.write().await;
        for item in items.iter() {
            if field_matches(&serde_json::to_value(item)?, field, value) {
                return Err(conflict_error(T::COLLECTION, field, value));
            }
        }
        self.insert_locked(&mut items, entity).await
    }

    async fn insert_locked(&self, items: &mut Vec<T>, entity: T) -> AppResult<T> {
        let key = entity.key();
        if items.iter().any(|item| item.key() == key) {
            return Err(conflict_error(T::COLLECTION, T::KEY_FIELD, &key));
        }
        let mut next = items.clone();
        next.push(entity.clone());
        self.persist(&next).await?;
        *items = next;
        Ok(entity)
    }

    pub async fn all(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for JsonRepository<T> {
    async fn save(&self, entity: T) -> AppResult<T> {
        let mut items = self.items.write().await;
        self.insert_locked(&mut items, entity).await
    }

    async fn update(&self, key_field: &str, key_value: &str, entity: T) -> AppResult<()> {
        let mut items = self.items.write().await;
        let mut found = None;
        for (idx, item) in items.iter().enumerate() {
            if field_matches(&serde_json::to_value(item)?, key_field, key_value) {
                found = Some(idx);
                break;
            }
        }
        let idx = found.ok_or_else(|| not_found_error(T::COLLECTION, key_value))?;

        let mut next = items.clone();
        next[idx] = entity;
        self.persist(&next).await?;
        *items = next;
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<T>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.key() == id).cloned())
    }

    async fn get_all(
        &self,
        filter_text: &str,
        offset: usize,
        sort_field: Option<&str>,
        sort_direction: Option<SortDirection>,
    ) -> AppResult<Page<T>> {
        let items = self.items.read().await;
        let needle = filter_text.trim().to_lowercase();

        let mut matching: Vec<(Value, &T)> = Vec::with_capacity(items.len());
        for item in items.iter() {
            let value = serde_json::to_value(item)?;
            if needle.is_empty() || contains_text(&value, &needle) {
                matching.push((value, item));
            }
        }

        if let Some(field) = sort_field {
            let direction = sort_direction.unwrap_or_default();
            matching.sort_by(|(a, _), (b, _)| {
                let ordering = compare_values(lookup(a, field), lookup(b, field));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let total_count = matching.len();
        let page: Vec<T> = matching
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .map(|(_, item)| item.clone())
            .collect();
        let new_offset = offset.min(total_count) + page.len();

        Ok(Page {
            items: page,
            new_offset,
            total_count,
        })
    }
}

fn lookup<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    field.split('.').try_fold(value, |current, part| current.get(part))
}

fn scalar_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_matches(value: &Value, field: &str, expected: &str) -> bool {
    lookup(value, field)
        .and_then(scalar_as_string)
        .map_or(false, |actual| actual == expected)
}

fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|v| contains_text(v, needle)),
        Value::Object(map) => map.values().any(|v| contains_text(v, needle)),
        other => scalar_as_string(other).map_or(false, |s| s.to_lowercase().contains(needle)),
    }
}

// Nulos y ausentes van al final en orden ascendente
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => scalar_as_string(x)
            .unwrap_or_default()
            .to_lowercase()
            .cmp(&scalar_as_string(y).unwrap_or_default().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Station, Trip, TripDraft};
    use crate::utils::errors::AppError;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn station(name: &str, city: &str) -> Station {
        Station::new(name.to_string(), city.to_string(), None, "admin")
    }

    async fn repo(dir: &Path, page_size: usize) -> JsonRepository<Station> {
        JsonRepository::open(dir, page_size).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_and_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let stations = repo(dir.path(), 20).await;
        let saved = stations.save(station("Tunis Nord", "Tunis")).await.unwrap();

        let reopened = repo(dir.path(), 20).await;
        let loaded = reopened.get_by_id(&saved.id.to_string()).await.unwrap();
        assert_eq!(loaded, Some(saved));
        assert!(dir.path().join("stations.json").exists());
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_key() {
        let dir = tempfile::tempdir().unwrap();
        let stations = repo(dir.path(), 20).await;
        let s = station("Sfax", "Sfax");
        stations.save(s.clone()).await.unwrap();
        assert!(matches!(stations.save(s).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_save_unique_rejects_duplicate_field_value() {
        let dir = tempfile::tempdir().unwrap();
        let stations = std::sync::Arc::new(repo(dir.path(), 20).await);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let stations = stations.clone();
            handles.push(tokio::spawn(async move {
                stations
                    .save_unique(station("Bizerte", "Bizerte"), "name", "Bizerte")
                    .await
            }));
        }
        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(e) => assert!(matches!(e, AppError::Conflict(_))),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(stations.count().await, 1);
        assert_eq!(repo(dir.path(), 20).await.count().await, 1);
    }

    #[tokio::test]
    async fn test_get_all_filters_sorts_and_pages() {
        let dir = tempfile::tempdir().unwrap();
        let stations = repo(dir.path(), 2).await;
        for (name, city) in [("Gabes", "Gabes"), ("Bab Saadoun", "Tunis"), ("Sousse", "Sousse"), ("Carthage", "Tunis")] {
            stations.save(station(name, city)).await.unwrap();
        }

        let page = stations
            .get_all("", 0, Some("name"), Some(SortDirection::Asc))
            .await
            .unwrap();
        assert_eq!(page.total_count, 4);
        assert_eq!(page.new_offset, 2);
        let names: Vec<_> = page.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bab Saadoun", "Carthage"]);

        let next = stations
            .get_all("", page.new_offset, Some("name"), Some(SortDirection::Asc))
            .await
            .unwrap();
        let names: Vec<_> = next.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Gabes", "Sousse"]);
        assert_eq!(next.new_offset, 4);

        let tunis = stations
            .get_all("TUNIS", 0, Some("name"), Some(SortDirection::Desc))
            .await
            .unwrap();
        assert_eq!(tunis.total_count, 2);
        assert_eq!(tunis.items[0].name, "Carthage");
    }

    #[tokio::test]
    async fn test_update_by_key_field() {
        let dir = tempfile::tempdir().unwrap();
        let stations = repo(dir.path(), 20).await;
        let mut s = stations.save(station("Monastir", "Monastir")).await.unwrap();
        s.name = "Monastir Centre".to_string();

        stations.update("id", &s.id.to_string(), s.clone()).await.unwrap();
        let loaded = stations.get_by_id(&s.id.to_string()).await.unwrap();
        assert_eq!(loaded.map(|l| l.name), Some("Monastir Centre".to_string()));

        let missing = stations.update("id", "nope", s).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_with_failure_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let trips: JsonRepository<Trip> = JsonRepository::open(dir.path(), 20).await.unwrap();
        let trip = Trip::new(
            TripDraft {
                from_station: Uuid::new_v4(),
                to_station: Uuid::new_v4(),
                vehicles: vec![],
                departure_date_time: Utc::now() + Duration::days(1),
                arrival_date_time: None,
                passengers_count: 3,
            },
            "admin",
        )
        .unwrap();
        let key = trip.id.to_string();
        trips.save(trip.clone()).await.unwrap();

        let result = trips
            .update_with(&key, |t| t.update_passenger_count(-1, "op"))
            .await;
        assert!(matches!(result, Err(AppError::Domain(DomainError::NegativeCount(-1)))));
        assert_eq!(trips.get_by_id(&key).await.unwrap(), Some(trip));

        let (updated, _) = trips
            .update_with(&key, |t| t.update_passenger_count(9, "op"))
            .await
            .unwrap();
        assert_eq!(updated.passengers_count, 9);

        let reopened: JsonRepository<Trip> = JsonRepository::open(dir.path(), 20).await.unwrap();
        assert_eq!(reopened.get_by_id(&key).await.unwrap().map(|t| t.passengers_count), Some(9));
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let stations = repo(dir.path(), 20).await;
        let s = stations.save(station("Bizerte", "Bizerte")).await.unwrap();
        assert!(stations.delete(&s.id.to_string()).await.unwrap());
        assert!(!stations.delete(&s.id.to_string()).await.unwrap());
        assert_eq!(stations.count().await, 0);
    }

    #[tokio::test]
    async fn test_save_unique_on_nested_field() {
        use crate::models::{Resource, Vehicle, VehicleModelRef};

        let dir = tempfile::tempdir().unwrap();
        let vehicles: JsonRepository<Vehicle> = JsonRepository::open(dir.path(), 20).await.unwrap();
        let bus = Vehicle::new(
            Resource::new("station-a", "admin").unwrap(),
            "AB-123-CD".to_string(),
            VehicleModelRef::Named("Setra".to_string()),
            None,
        );
        vehicles.save(bus).await.unwrap();

        let other = Vehicle::new(
            Resource::new("station-b", "admin").unwrap(),
            "EF-456-GH".to_string(),
            VehicleModelRef::Named("Setra".to_string()),
            None,
        );
        let result = vehicles.save_unique(other.clone(), "model.value", "Setra").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(vehicles.save_unique(other, "immatriculation", "EF-456-GH").await.is_ok());
        assert_eq!(vehicles.count().await, 2);
    }
}
