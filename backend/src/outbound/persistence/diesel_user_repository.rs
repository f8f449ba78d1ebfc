//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Listing builds one boxed query per request: every present filter becomes a
//! `LIKE` predicate over an escaped pattern, the filtered set is counted
//! before the page is fetched, and the sort selection maps onto typed columns
//! so no client string ever reaches the query builder.

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PaginatedResult;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{SortOrder, SortSpec, User, UserListOptions, UserSortField};

use super::diesel_basic_error_mapping::{
    contains_pattern, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

type BoxedUsersQuery<'a> = users::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<UserRow, Pg>>>;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, |message| UserRepositoryError::connection(message))
}

/// Map Diesel errors to domain user repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
        UserRepositoryError::constraint,
    )
}

/// Convert a database row to a domain user.
fn row_to_user(row: UserRow) -> User {
    User {
        id: row.id,
        username: row.username,
        nickname: row.nickname,
        email: row.email,
        age: row.age,
        profile_image: row.profile_image,
        created_at: row.created_at,
    }
}

/// Add one `LIKE` predicate per present filter, combined conjunctively.
///
/// Works on any boxed query over `users` so the count and the page query
/// share one definition of the filtered set.
macro_rules! apply_user_filters {
    ($query:expr, $options:expr) => {{
        let mut query = $query;
        if let Some(term) = &$options.username {
            query = query.filter(users::username.like(contains_pattern(term)));
        }
        if let Some(term) = &$options.nickname {
            query = query.filter(users::nickname.like(contains_pattern(term)));
        }
        if let Some(term) = &$options.email {
            query = query.filter(users::email.like(contains_pattern(term)));
        }
        query
    }};
}

/// Order the page query by the allow-listed sort selection.
fn apply_user_sort(
    query: BoxedUsersQuery<'static>,
    sort: SortSpec<UserSortField>,
) -> BoxedUsersQuery<'static> {
    use SortOrder::{Ascending, Descending};
    use UserSortField as Field;

    match (sort.field, sort.order) {
        (Field::Username, Ascending) => query.order(users::username.asc()),
        (Field::Username, Descending) => query.order(users::username.desc()),
        (Field::Nickname, Ascending) => query.order(users::nickname.asc()),
        (Field::Nickname, Descending) => query.order(users::nickname.desc()),
        (Field::Email, Ascending) => query.order(users::email.asc()),
        (Field::Email, Descending) => query.order(users::email.desc()),
        (Field::Age, Ascending) => query.order(users::age.asc()),
        (Field::Age, Descending) => query.order(users::age.desc()),
        (Field::CreatedAt, Ascending) => query.order(users::created_at.asc()),
        (Field::CreatedAt, Descending) => query.order(users::created_at.desc()),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: user.id,
            username: &user.username,
            nickname: &user.nickname,
            email: &user.email,
            age: user.age,
            profile_image: &user.profile_image,
            created_at: user.created_at,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_user))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_user))
    }

    async fn list(
        &self,
        options: &UserListOptions,
    ) -> Result<PaginatedResult<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total_count: i64 = apply_user_filters!(users::table.count().into_boxed(), options)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut query = apply_user_filters!(
            users::table.select(UserRow::as_select()).into_boxed(),
            options
        );
        if let Some(sort) = options.sort {
            query = apply_user_sort(query, sort);
        }

        let rows: Vec<UserRow> = query
            .offset(options.page.offset())
            .limit(options.page.page_size())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(row_to_user).collect();
        Ok(PaginatedResult::new(items, options.page, total_count))
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserChangeset {
            username: &user.username,
            nickname: &user.nickname,
            email: &user.email,
            age: user.age,
            profile_image: &user.profile_image,
        };

        diesel::update(users::table.filter(users::id.eq(user.id)))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
