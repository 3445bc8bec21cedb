//! In-memory caching using moka
//!
//! Property listings change rarely and are read on every quote, so they are
//! cached briefly. Reservation lists are never cached: availability must
//! reflect the bookings table at query time.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::booking::models::Property;
use crate::booking::queries;
use crate::error::Result;

/// Application cache holding property listings
#[derive(Clone)]
pub struct AppCache {
    /// Properties (id -> Property)
    pub properties: Cache<i32, Arc<Property>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Properties: 1000 entries, 5 min TTL, 2 min idle
            properties: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(5 * 60))
                .time_to_idle(Duration::from_secs(2 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            properties_size: self.properties.entry_count(),
        }
    }

    /// Fetch a property, going to the database on a miss
    pub async fn property(&self, pool: &PgPool, property_id: i32) -> Result<Arc<Property>> {
        if let Some(cached) = self.properties.get(&property_id).await {
            debug!("Cache HIT for property: {}", property_id);
            return Ok(cached);
        }

        debug!("Cache MISS for property: {}", property_id);
        let property = Arc::new(queries::get_property(pool, property_id).await?);
        self.properties
            .insert(property_id, Arc::clone(&property))
            .await;
        Ok(property)
    }

}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub properties_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id: i32) -> Property {
        Property {
            id,
            host_id: 1,
            title: "Lake view cottage".to_string(),
            location: "Udaipur".to_string(),
            price_per_night: 2500,
            bedrooms: 2,
            bathrooms: 1,
            max_guests: 4,
            property_type: "cottage".to_string(),
            status: "active".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cached_property_served_without_database() {
        let cache = AppCache::new();
        cache.properties.insert(3, Arc::new(property(3))).await;

        // Lazy pool never connects; a hit must not touch it
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/staylocal_test")
            .unwrap();
        let found = cache.property(&pool, 3).await.unwrap();
        assert_eq!(found.location, "Udaipur");
    }
}
