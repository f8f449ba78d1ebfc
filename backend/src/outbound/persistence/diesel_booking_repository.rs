//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.
//!
//! Status is stored as its PascalCase text name. Rows carrying a value outside
//! the known set are not rejected on read; they convert to `Pending` with a
//! warning so one bad row cannot take a listing down.

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageRequest, PaginatedResult};
use uuid::Uuid;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingListOptions, BookingSortField, BookingStatus, SortOrder, SortSpec};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BookingChangeset, BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

type BoxedBookingsQuery<'a> = bookings::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<BookingRow, Pg>>>;

/// Diesel-backed implementation of the `BookingRepository` port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain booking repository errors.
fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    map_basic_pool_error(error, |message| BookingRepositoryError::connection(message))
}

/// Map Diesel errors to domain booking repository errors.
fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_basic_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
        BookingRepositoryError::constraint,
    )
}

/// Convert a database row to a domain booking.
fn row_to_booking(row: BookingRow) -> Booking {
    let status = match row.status.parse::<BookingStatus>() {
        Ok(status) => status,
        Err(_) => {
            tracing::warn!(
                value = row.status.as_str(),
                booking_id = %row.id,
                "unrecognised booking status value, defaulting to Pending"
            );
            BookingStatus::Pending
        }
    };

    Booking {
        id: row.id,
        rental_id: row.rental_id,
        user_id: row.user_id,
        check_in: row.check_in,
        check_out: row.check_out,
        amount_paid: row.amount_paid,
        status,
        created_at: row.created_at,
    }
}

/// Add one predicate per present filter, combined conjunctively.
///
/// `check_in_from` and `check_out_until` are independent one-sided bounds,
/// not an overlap query. An absent status means the `All` sentinel and adds
/// no predicate.
macro_rules! apply_booking_filters {
    ($query:expr, $options:expr) => {{
        let mut query = $query;
        if let Some(rental_id) = $options.rental_id {
            query = query.filter(bookings::rental_id.eq(rental_id));
        }
        if let Some(user_id) = $options.user_id {
            query = query.filter(bookings::user_id.eq(user_id));
        }
        if let Some(status) = $options.status {
            query = query.filter(bookings::status.eq(status.as_str()));
        }
        if let Some(from) = $options.check_in_from {
            query = query.filter(bookings::check_in.ge(from));
        }
        if let Some(until) = $options.check_out_until {
            query = query.filter(bookings::check_out.le(until));
        }
        query
    }};
}

/// Order the page query by the allow-listed sort selection.
fn apply_booking_sort(
    query: BoxedBookingsQuery<'static>,
    sort: SortSpec<BookingSortField>,
) -> BoxedBookingsQuery<'static> {
    use BookingSortField as Field;
    use SortOrder::{Ascending, Descending};

    match (sort.field, sort.order) {
        (Field::CheckIn, Ascending) => query.order(bookings::check_in.asc()),
        (Field::CheckIn, Descending) => query.order(bookings::check_in.desc()),
        (Field::CheckOut, Ascending) => query.order(bookings::check_out.asc()),
        (Field::CheckOut, Descending) => query.order(bookings::check_out.desc()),
        (Field::AmountPaid, Ascending) => query.order(bookings::amount_paid.asc()),
        (Field::AmountPaid, Descending) => query.order(bookings::amount_paid.desc()),
        (Field::Status, Ascending) => query.order(bookings::status.asc()),
        (Field::Status, Descending) => query.order(bookings::status.desc()),
        (Field::CreatedAt, Ascending) => query.order(bookings::created_at.asc()),
        (Field::CreatedAt, Descending) => query.order(bookings::created_at.desc()),
    }
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewBookingRow {
            id: booking.id,
            rental_id: booking.rental_id,
            user_id: booking.user_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            amount_paid: booking.amount_paid,
            status: booking.status.as_str(),
            created_at: booking.created_at,
        };

        diesel::insert_into(bookings::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<BookingRow> = bookings::table
            .filter(bookings::id.eq(id))
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_booking))
    }

    async fn list(
        &self,
        options: &BookingListOptions,
    ) -> Result<PaginatedResult<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total_count: i64 =
            apply_booking_filters!(bookings::table.count().into_boxed(), options)
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        let mut query = apply_booking_filters!(
            bookings::table.select(BookingRow::as_select()).into_boxed(),
            options
        );
        if let Some(sort) = options.sort {
            query = apply_booking_sort(query, sort);
        }

        let rows: Vec<BookingRow> = query
            .offset(options.page.offset())
            .limit(options.page.page_size())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(row_to_booking).collect();
        Ok(PaginatedResult::new(items, options.page, total_count))
    }

    async fn list_for_user(
        &self,
        user_id: &Uuid,
        page: &PageRequest,
    ) -> Result<PaginatedResult<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total_count: i64 = bookings::table
            .filter(bookings::user_id.eq(user_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::user_id.eq(user_id))
            .select(BookingRow::as_select())
            .offset(page.offset())
            .limit(page.page_size())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(row_to_booking).collect();
        Ok(PaginatedResult::new(items, *page, total_count))
    }

    async fn update(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = BookingChangeset {
            rental_id: booking.rental_id,
            user_id: booking.user_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            amount_paid: booking.amount_paid,
            status: booking.status.as_str(),
        };

        diesel::update(bookings::table.filter(bookings::id.eq(booking.id)))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(bookings::table.filter(bookings::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;

    fn sample_row(status: &str) -> BookingRow {
        BookingRow {
            id: Uuid::new_v4(),
            rental_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            check_in: Utc::now(),
            check_out: Utc::now(),
            amount_paid: Decimal::new(45000, 2),
            status: status.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("timed out"));

        assert!(matches!(repo_err, BookingRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("timed out"));
    }

    #[rstest]
    #[case("Pending", BookingStatus::Pending)]
    #[case("AwaitingPayment", BookingStatus::AwaitingPayment)]
    #[case("Refunded", BookingStatus::Refunded)]
    fn row_to_booking_parses_stored_status(
        #[case] stored: &str,
        #[case] expected: BookingStatus,
    ) {
        let booking = row_to_booking(sample_row(stored));
        assert_eq!(booking.status, expected);
    }

    #[rstest]
    fn unknown_stored_status_defaults_to_pending() {
        let booking = row_to_booking(sample_row("Archived"));
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[rstest]
    fn status_filter_compares_the_stored_name() {
        let options = BookingListOptions {
            status: Some(BookingStatus::AwaitingPayment),
            ..BookingListOptions::default()
        };

        let query = apply_booking_filters!(
            bookings::table.select(BookingRow::as_select()).into_boxed(),
            &options
        );
        let sql = diesel::debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains("\"bookings\".\"status\" = $1"));
        assert!(sql.contains("AwaitingPayment"));
    }

    #[rstest]
    fn date_bounds_are_one_sided_and_inclusive() {
        let options = BookingListOptions {
            check_in_from: Some(Utc::now()),
            check_out_until: Some(Utc::now()),
            ..BookingListOptions::default()
        };

        let query = apply_booking_filters!(
            bookings::table.select(BookingRow::as_select()).into_boxed(),
            &options
        );
        let sql = diesel::debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains("\"bookings\".\"check_in\" >= $1"));
        assert!(sql.contains("\"bookings\".\"check_out\" <= $2"));
    }

    #[rstest]
    #[case(
        BookingSortField::AmountPaid,
        SortOrder::Descending,
        "ORDER BY \"bookings\".\"amount_paid\" DESC"
    )]
    #[case(
        BookingSortField::CheckIn,
        SortOrder::Ascending,
        "ORDER BY \"bookings\".\"check_in\" ASC"
    )]
    fn sort_selection_orders_by_the_mapped_column(
        #[case] field: BookingSortField,
        #[case] order: SortOrder,
        #[case] fragment: &str,
    ) {
        let query = apply_booking_sort(
            bookings::table.select(BookingRow::as_select()).into_boxed(),
            SortSpec { field, order },
        );
        let sql = diesel::debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(fragment), "missing `{fragment}` in `{sql}`");
    }
}
