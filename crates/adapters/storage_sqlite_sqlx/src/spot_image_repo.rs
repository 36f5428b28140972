//! `SQLite` implementation of [`SpotImageRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use spothub_app::ports::SpotImageRepository;
use spothub_domain::error::SpotHubError;
use spothub_domain::id::{SpotId, SpotImageId};
use spothub_domain::spot_image::SpotImage;

use crate::columns;
use crate::error::StorageError;

struct Wrapper(SpotImage);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(SpotImage {
            id: columns::parse(row, "id")?,
            spot_id: columns::parse(row, "spot_id")?,
            url: row.try_get("url")?,
            preview: row.try_get("preview")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO spot_images (id, spot_id, url, preview) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM spot_images WHERE id = ?";
const SELECT_BY_SPOT: &str = "SELECT * FROM spot_images WHERE spot_id = ? ORDER BY rowid";
const DELETE_BY_ID: &str = "DELETE FROM spot_images WHERE id = ?";

/// `SQLite`-backed spot image repository.
#[derive(Clone)]
pub struct SqliteSpotImageRepository {
    pool: SqlitePool,
}

impl SqliteSpotImageRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SpotImageRepository for SqliteSpotImageRepository {
    fn create(
        &self,
        image: SpotImage,
    ) -> impl Future<Output = Result<SpotImage, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(image.id.to_string())
                .bind(image.spot_id.to_string())
                .bind(&image.url)
                .bind(image.preview)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(image)
        }
    }

    fn get_by_id(
        &self,
        id: SpotImageId,
    ) -> impl Future<Output = Result<Option<SpotImage>, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn find_by_spot(
        &self,
        spot_id: SpotId,
    ) -> impl Future<Output = Result<Vec<SpotImage>, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_SPOT)
                .bind(spot_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: SpotImageId) -> impl Future<Output = Result<(), SpotHubError>> + Send {
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
