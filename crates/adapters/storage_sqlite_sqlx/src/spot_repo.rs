//! `SQLite` implementation of [`SpotRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use spothub_app::ports::SpotRepository;
use spothub_domain::error::SpotHubError;
use spothub_domain::id::{SpotId, UserId};
use spothub_domain::spot::Spot;

use crate::error::StorageError;
use crate::columns;

/// Wrapper for converting database rows into domain [`Spot`]s without
/// polluting domain structs with database concerns.
struct Wrapper(Spot);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Spot> {
        value.map(|w| w.0)
    }

    fn all(values: Vec<Self>) -> Vec<Spot> {
        values.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Spot {
            id: columns::parse(row, "id")?,
            owner_id: columns::parse(row, "owner_id")?,
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            country: row.try_get("country")?,
            lat: row.try_get("lat")?,
            lng: row.try_get("lng")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            created_at: columns::timestamp(row, "created_at")?,
            updated_at: columns::timestamp(row, "updated_at")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO spots (id, owner_id, address, city, state, country, lat, lng, name, description, price, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM spots WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM spots ORDER BY created_at";
const SELECT_BY_OWNER: &str = "SELECT * FROM spots WHERE owner_id = ? ORDER BY created_at";

const UPDATE: &str = r"
    UPDATE spots
    SET address = ?, city = ?, state = ?, country = ?, lat = ?, lng = ?,
        name = ?, description = ?, price = ?, updated_at = ?
    WHERE id = ?
";

const DELETE_BY_ID: &str = "DELETE FROM spots WHERE id = ?";

/// `SQLite`-backed spot repository.
#[derive(Clone)]
pub struct SqliteSpotRepository {
    pool: SqlitePool,
}

impl SqliteSpotRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SpotRepository for SqliteSpotRepository {
    fn create(&self, spot: Spot) -> impl Future<Output = Result<Spot, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(spot.id.to_string())
                .bind(spot.owner_id.to_string())
                .bind(&spot.address)
                .bind(&spot.city)
                .bind(&spot.state)
                .bind(&spot.country)
                .bind(spot.lat)
                .bind(spot.lng)
                .bind(&spot.name)
                .bind(&spot.description)
                .bind(spot.price)
                .bind(spot.created_at.to_rfc3339())
                .bind(spot.updated_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(spot)
        }
    }

    fn get_by_id(
        &self,
        id: SpotId,
    ) -> impl Future<Output = Result<Option<Spot>, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Spot>, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::all(rows))
        }
    }

    fn find_by_owner(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<Vec<Spot>, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_OWNER)
                .bind(owner_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::all(rows))
        }
    }

    fn update(&self, spot: Spot) -> impl Future<Output = Result<Spot, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&spot.address)
                .bind(&spot.city)
                .bind(&spot.state)
                .bind(&spot.country)
                .bind(spot.lat)
                .bind(spot.lng)
                .bind(&spot.name)
                .bind(&spot.description)
                .bind(spot.price)
                .bind(spot.updated_at.to_rfc3339())
                .bind(spot.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(spot)
        }
    }

    fn delete(&self, id: SpotId) -> impl Future<Output = Result<(), SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
