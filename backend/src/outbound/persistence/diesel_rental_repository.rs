//! PostgreSQL-backed `RentalRepository` implementation using Diesel ORM.
//!
//! Shares the boxed-query layout of the user repository. The owner-username
//! filter is the one cross-table predicate in the listing layer: it resolves
//! matching owners through a subselect on `users` rather than a join, so the
//! envelope count stays a plain count over `rentals`.

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageRequest, PaginatedResult};
use uuid::Uuid;

use crate::domain::ports::{RentalRepository, RentalRepositoryError};
use crate::domain::{Rental, RentalListOptions, RentalSortField, SortOrder, SortSpec};

use super::diesel_basic_error_mapping::{
    contains_pattern, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewRentalRow, RentalChangeset, RentalRow};
use super::pool::{DbPool, PoolError};
use super::schema::{rentals, users};

type BoxedRentalsQuery<'a> = rentals::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<RentalRow, Pg>>>;

/// Diesel-backed implementation of the `RentalRepository` port.
#[derive(Clone)]
pub struct DieselRentalRepository {
    pool: DbPool,
}

impl DieselRentalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain rental repository errors.
fn map_pool_error(error: PoolError) -> RentalRepositoryError {
    map_basic_pool_error(error, |message| RentalRepositoryError::connection(message))
}

/// Map Diesel errors to domain rental repository errors.
fn map_diesel_error(error: diesel::result::Error) -> RentalRepositoryError {
    map_basic_diesel_error(
        error,
        RentalRepositoryError::query,
        RentalRepositoryError::connection,
        RentalRepositoryError::constraint,
    )
}

/// Convert a database row to a domain rental.
fn row_to_rental(row: RentalRow) -> Rental {
    Rental {
        id: row.id,
        name: row.name,
        description: row.description,
        price: row.price,
        owner_id: row.owner_id,
        cover_image: row.cover_image,
        images: row.images,
        created_at: row.created_at,
    }
}

/// Add one predicate per present filter, combined conjunctively.
///
/// Price limits are inclusive bounds. The owner-username filter restricts
/// `owner_id` to owners whose username contains the term.
macro_rules! apply_rental_filters {
    ($query:expr, $options:expr) => {{
        let mut query = $query;
        if let Some(term) = &$options.name {
            query = query.filter(rentals::name.like(contains_pattern(term)));
        }
        if let Some(term) = &$options.description {
            query = query.filter(rentals::description.like(contains_pattern(term)));
        }
        if let Some(lower) = $options.price_lower_limit {
            query = query.filter(rentals::price.ge(lower));
        }
        if let Some(upper) = $options.price_upper_limit {
            query = query.filter(rentals::price.le(upper));
        }
        if let Some(term) = &$options.owner_username {
            let owners = users::table
                .filter(users::username.like(contains_pattern(term)))
                .select(users::id);
            query = query.filter(rentals::owner_id.eq_any(owners));
        }
        query
    }};
}

/// Order the page query by the allow-listed sort selection.
fn apply_rental_sort(
    query: BoxedRentalsQuery<'static>,
    sort: SortSpec<RentalSortField>,
) -> BoxedRentalsQuery<'static> {
    use RentalSortField as Field;
    use SortOrder::{Ascending, Descending};

    match (sort.field, sort.order) {
        (Field::Name, Ascending) => query.order(rentals::name.asc()),
        (Field::Name, Descending) => query.order(rentals::name.desc()),
        (Field::Description, Ascending) => query.order(rentals::description.asc()),
        (Field::Description, Descending) => query.order(rentals::description.desc()),
        (Field::Price, Ascending) => query.order(rentals::price.asc()),
        (Field::Price, Descending) => query.order(rentals::price.desc()),
        (Field::CreatedAt, Ascending) => query.order(rentals::created_at.asc()),
        (Field::CreatedAt, Descending) => query.order(rentals::created_at.desc()),
    }
}

#[async_trait]
impl RentalRepository for DieselRentalRepository {
    async fn create(&self, rental: &Rental) -> Result<(), RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRentalRow {
            id: rental.id,
            name: &rental.name,
            description: &rental.description,
            price: rental.price,
            owner_id: rental.owner_id,
            cover_image: &rental.cover_image,
            images: &rental.images,
            created_at: rental.created_at,
        };

        diesel::insert_into(rentals::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Rental>, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<RentalRow> = rentals::table
            .filter(rentals::id.eq(id))
            .select(RentalRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_rental))
    }

    async fn list(
        &self,
        options: &RentalListOptions,
    ) -> Result<PaginatedResult<Rental>, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total_count: i64 = apply_rental_filters!(rentals::table.count().into_boxed(), options)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut query = apply_rental_filters!(
            rentals::table.select(RentalRow::as_select()).into_boxed(),
            options
        );
        if let Some(sort) = options.sort {
            query = apply_rental_sort(query, sort);
        }

        let rows: Vec<RentalRow> = query
            .offset(options.page.offset())
            .limit(options.page.page_size())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(row_to_rental).collect();
        Ok(PaginatedResult::new(items, options.page, total_count))
    }

    async fn list_for_owner(
        &self,
        owner_id: &Uuid,
        page: &PageRequest,
    ) -> Result<PaginatedResult<Rental>, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total_count: i64 = rentals::table
            .filter(rentals::owner_id.eq(owner_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<RentalRow> = rentals::table
            .filter(rentals::owner_id.eq(owner_id))
            .select(RentalRow::as_select())
            .offset(page.offset())
            .limit(page.page_size())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(row_to_rental).collect();
        Ok(PaginatedResult::new(items, *page, total_count))
    }

    async fn update(&self, rental: &Rental) -> Result<(), RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = RentalChangeset {
            name: &rental.name,
            description: &rental.description,
            price: rental.price,
            owner_id: rental.owner_id,
            cover_image: &rental.cover_image,
            images: &rental.images,
        };

        diesel::update(rentals::table.filter(rentals::id.eq(rental.id)))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(rentals::table.filter(rentals::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
