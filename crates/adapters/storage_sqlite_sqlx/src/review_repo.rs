//! `SQLite` implementation of [`ReviewRepository`].

use std::collections::HashMap;
use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use spothub_app::ports::ReviewRepository;
use spothub_domain::error::{ForbiddenError, SpotHubError};
use spothub_domain::id::{ReviewId, SpotId, UserId};
use spothub_domain::review::{Review, ReviewDetails, ReviewImage};
use spothub_domain::user::UserSummary;

use crate::columns;
use crate::error::StorageError;

struct Wrapper(Review);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let stars: i64 = row.try_get("stars")?;
        let stars = u8::try_from(stars).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Review {
            id: columns::parse(row, "id")?,
            spot_id: columns::parse(row, "spot_id")?,
            user_id: columns::parse(row, "user_id")?,
            review: row.try_get("review")?,
            stars,
            created_at: columns::timestamp(row, "created_at")?,
            updated_at: columns::timestamp(row, "updated_at")?,
        }))
    }
}

/// A review row joined with its author's display name.
struct AuthoredWrapper(Review, UserSummary);

impl<'r> FromRow<'r, SqliteRow> for AuthoredWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let Wrapper(review) = Wrapper::from_row(row)?;
        let user = UserSummary {
            id: review.user_id,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        };
        Ok(Self(review, user))
    }
}

struct ImageWrapper(ReviewImage);

impl<'r> FromRow<'r, SqliteRow> for ImageWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(ReviewImage {
            id: columns::parse(row, "id")?,
            review_id: columns::parse(row, "review_id")?,
            url: row.try_get("url")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO reviews (id, spot_id, user_id, review, stars, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_SPOT_AND_USER: &str = "SELECT * FROM reviews WHERE spot_id = ? AND user_id = ?";

const SELECT_AUTHORED_BY_SPOT: &str = r"
    SELECT r.*, u.first_name, u.last_name
    FROM reviews r
    JOIN users u ON u.id = r.user_id
    WHERE r.spot_id = ?
    ORDER BY r.created_at
";

const SELECT_IMAGES_BY_SPOT: &str = r"
    SELECT ri.id, ri.review_id, ri.url
    FROM review_images ri
    JOIN reviews r ON r.id = ri.review_id
    WHERE r.spot_id = ?
    ORDER BY ri.rowid
";

/// `SQLite`-backed review repository.
///
/// The `(spot_id, user_id)` unique index backs the one-review-per-user rule;
/// a violation is reported as [`ForbiddenError::DuplicateReview`].
#[derive(Clone)]
pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReviewRepository for SqliteReviewRepository {
    fn create(&self, review: Review) -> impl Future<Output = Result<Review, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(review.id.to_string())
                .bind(review.spot_id.to_string())
                .bind(review.user_id.to_string())
                .bind(&review.review)
                .bind(i64::from(review.stars))
                .bind(review.created_at.to_rfc3339())
                .bind(review.updated_at.to_rfc3339())
                .execute(&pool)
                .await;

            match result.map_err(StorageError::from) {
                Ok(_) => Ok(review),
                Err(err) if err.is_unique_violation() => {
                    Err(ForbiddenError::DuplicateReview.into())
                }
                Err(err) => Err(err.into()),
            }
        }
    }

    fn find_by_spot_and_user(
        &self,
        spot_id: SpotId,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Review>, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_SPOT_AND_USER)
                .bind(spot_id.to_string())
                .bind(user_id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn find_details_by_spot(
        &self,
        spot_id: SpotId,
    ) -> impl Future<Output = Result<Vec<ReviewDetails>, SpotHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let reviews: Vec<AuthoredWrapper> = sqlx::query_as(SELECT_AUTHORED_BY_SPOT)
                .bind(spot_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let images: Vec<ImageWrapper> = sqlx::query_as(SELECT_IMAGES_BY_SPOT)
                .bind(spot_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let mut images_by_review: HashMap<ReviewId, Vec<ReviewImage>> = HashMap::new();
            for ImageWrapper(image) in images {
                images_by_review
                    .entry(image.review_id)
                    .or_default()
                    .push(image);
            }

            Ok(reviews
                .into_iter()
                .map(|AuthoredWrapper(review, user)| ReviewDetails {
                    images: images_by_review.remove(&review.id).unwrap_or_default(),
                    review,
                    user,
                })
                .collect())
        }
    }
}
