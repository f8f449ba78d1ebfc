//! Listing options: optional filters, allow-listed sort fields, and paging.
//!
//! Sort fields are typed enums parsed at the boundary, so arbitrary client
//! strings never reach the query builder. Every filter is optional and
//! independent; present filters are combined conjunctively.

use chrono::{DateTime, Utc};
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::BookingStatus;

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A parsed sort selection over an allow-listed field enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub order: SortOrder,
}

/// Allow-listed sort keys parsed from a client `sortBy` string.
pub trait SortKey: Sized + Copy {
    /// Resolve the camelCase wire name to a field, `None` when unknown.
    fn from_key(key: &str) -> Option<Self>;
}

/// Error for `sortBy` values outside the entity's allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{raw}' is not a sortable field")]
pub struct SortParseError {
    /// The offending value as the client supplied it.
    pub raw: String,
}

/// Parse a client `sortBy` value.
///
/// A leading `-` selects descending order; a leading `+` is stripped with no
/// effect. The remainder must name an allow-listed field.
pub fn parse_sort_by<F: SortKey>(raw: &str) -> Result<SortSpec<F>, SortParseError> {
    let (order, key) = match raw.strip_prefix('-') {
        Some(rest) => (SortOrder::Descending, rest),
        None => (SortOrder::Ascending, raw.strip_prefix('+').unwrap_or(raw)),
    };

    F::from_key(key)
        .map(|field| SortSpec { field, order })
        .ok_or_else(|| SortParseError { raw: raw.into() })
}

/// Fields the users listing may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Username,
    Nickname,
    Email,
    Age,
    CreatedAt,
}

impl SortKey for UserSortField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "username" => Some(Self::Username),
            "nickname" => Some(Self::Nickname),
            "email" => Some(Self::Email),
            "age" => Some(Self::Age),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Fields the rentals listing may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalSortField {
    Name,
    Description,
    Price,
    CreatedAt,
}

impl SortKey for RentalSortField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "description" => Some(Self::Description),
            "price" => Some(Self::Price),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Fields the bookings listing may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingSortField {
    CheckIn,
    CheckOut,
    AmountPaid,
    Status,
    CreatedAt,
}

impl SortKey for BookingSortField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "checkIn" => Some(Self::CheckIn),
            "checkOut" => Some(Self::CheckOut),
            "amountPaid" => Some(Self::AmountPaid),
            "status" => Some(Self::Status),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Filters, sort, and paging for the users listing.
///
/// String filters match by substring containment.
#[derive(Debug, Clone, Default)]
pub struct UserListOptions {
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub sort: Option<SortSpec<UserSortField>>,
    pub page: PageRequest,
}

/// Filters, sort, and paging for the rentals listing.
///
/// Price limits are inclusive bounds; `owner_username` matches owners whose
/// username contains the supplied substring.
#[derive(Debug, Clone, Default)]
pub struct RentalListOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_lower_limit: Option<i32>,
    pub price_upper_limit: Option<i32>,
    pub owner_username: Option<String>,
    pub sort: Option<SortSpec<RentalSortField>>,
    pub page: PageRequest,
}

/// Filters, sort, and paging for the bookings listing.
///
/// `check_in_from` is a lower bound on check-in and `check_out_until` an
/// upper bound on check-out; they are independent one-sided bounds, not an
/// overlap query. `status: None` means the `All` sentinel was supplied or the
/// filter was absent.
#[derive(Debug, Clone, Default)]
pub struct BookingListOptions {
    pub rental_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub check_in_from: Option<DateTime<Utc>>,
    pub check_out_until: Option<DateTime<Utc>>,
    pub sort: Option<SortSpec<BookingSortField>>,
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("price", RentalSortField::Price, SortOrder::Ascending)]
    #[case("+price", RentalSortField::Price, SortOrder::Ascending)]
    #[case("-price", RentalSortField::Price, SortOrder::Descending)]
    #[case("-createdAt", RentalSortField::CreatedAt, SortOrder::Descending)]
    fn sort_prefixes_select_direction(
        #[case] raw: &str,
        #[case] field: RentalSortField,
        #[case] order: SortOrder,
    ) {
        let spec = parse_sort_by::<RentalSortField>(raw).expect("allow-listed field");
        assert_eq!(spec.field, field);
        assert_eq!(spec.order, order);
    }

    #[rstest]
    #[case("ownerId")]
    #[case("-unknown")]
    #[case("Price")]
    #[case("")]
    #[case("+")]
    fn unknown_sort_keys_are_rejected(#[case] raw: &str) {
        let err = parse_sort_by::<RentalSortField>(raw).expect_err("outside allow-list");
        assert_eq!(err.raw, raw);
    }

    #[rstest]
    #[case("username", UserSortField::Username)]
    #[case("createdAt", UserSortField::CreatedAt)]
    fn user_allow_list_uses_wire_names(#[case] key: &str, #[case] field: UserSortField) {
        assert_eq!(UserSortField::from_key(key), Some(field));
    }

    #[rstest]
    #[case("checkIn", BookingSortField::CheckIn)]
    #[case("amountPaid", BookingSortField::AmountPaid)]
    #[case("status", BookingSortField::Status)]
    fn booking_allow_list_uses_wire_names(#[case] key: &str, #[case] field: BookingSortField) {
        assert_eq!(BookingSortField::from_key(key), Some(field));
    }

    #[rstest]
    fn snake_case_names_are_not_sortable() {
        assert_eq!(BookingSortField::from_key("check_in"), None);
        assert_eq!(UserSortField::from_key("created_at"), None);
    }
}
