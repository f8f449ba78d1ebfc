//! Shared Diesel error mapping for the user, rental and booking repositories.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection/constraint
/// constructors.
///
/// Unique and foreign key violations carry the violated constraint's name so
/// the services can translate races on pre-checked rules into the same
/// validation failures the pre-checks produce.
pub fn map_basic_diesel_error<E, Q, C, K>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
    constraint: K,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
    K: Fn(String, &'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => constraint(
            info.constraint_name().unwrap_or("unique").to_owned(),
            "unique constraint violated",
        ),
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => constraint(
            info.constraint_name().unwrap_or("foreign key").to_owned(),
            "foreign key constraint violated",
        ),
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Build a LIKE pattern matching values that contain `term`.
///
/// `%`, `_` and the backslash are escaped with a backslash, PostgreSQL's
/// default LIKE escape character, so filter terms match literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
