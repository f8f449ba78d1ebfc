//! Shared query-parameter parsing for the list endpoints.
//!
//! Raw optional query values become domain types here; broken values are
//! reported through the standard validation body under the boundary property
//! names `Page`, `PageSize`, `SortBy`, and `Status`.

use pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageRequest, PageRequestError};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{BookingStatus, Error, SortKey, SortSpec, parse_sort_by};

/// Status filter sentinel selecting every booking state.
const ALL_STATUSES: &str = "All";

/// Paging query parameters for the sub-resource listings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// 1-based page number, defaults to the first page.
    pub page: Option<i64>,
    /// Items per page, defaults to 10.
    pub page_size: Option<i64>,
}

impl PageParams {
    pub(crate) fn request(&self) -> Result<PageRequest, Error> {
        page_request(self.page, self.page_size)
    }
}

/// Build a [`PageRequest`] from optional query values, applying defaults.
pub(crate) fn page_request(
    page: Option<i64>,
    page_size: Option<i64>,
) -> Result<PageRequest, Error> {
    PageRequest::new(
        page.unwrap_or(DEFAULT_PAGE),
        page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .map_err(|error| match error {
        PageRequestError::PageOutOfRange => {
            Error::single("Page", "Page must be greater than or equal to 1.")
        }
        PageRequestError::PageSizeOutOfRange => {
            Error::single("PageSize", "Page size must be greater than or equal to 1.")
        }
    })
}

/// Parse an optional `sortBy` value against the entity's allow-list.
pub(crate) fn sort_spec<F: SortKey>(raw: Option<&str>) -> Result<Option<SortSpec<F>>, Error> {
    raw.map(|value| {
        parse_sort_by(value).map_err(|error| Error::single("SortBy", error.to_string()))
    })
    .transpose()
}

/// Parse an optional booking status filter; absent or `All` matches every
/// state.
pub(crate) fn status_filter(raw: Option<&str>) -> Result<Option<BookingStatus>, Error> {
    match raw {
        None => Ok(None),
        Some(ALL_STATUSES) => Ok(None),
        Some(value) => value
            .parse::<BookingStatus>()
            .map(Some)
            .map_err(|error| Error::single("Status", error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::{SortOrder, UserSortField};

    fn single_failure(error: &Error) -> (&str, &str) {
        let failures = error.failures().expect("validation failures");
        assert_eq!(failures.len(), 1);
        (&failures[0].property_name, &failures[0].message)
    }

    #[rstest]
    fn absent_paging_values_fall_back_to_defaults() {
        let request = page_request(None, None).expect("defaults are valid");

        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), 10);
    }

    #[rstest]
    #[case(Some(0), None, "Page", "Page must be greater than or equal to 1.")]
    #[case(Some(-3), None, "Page", "Page must be greater than or equal to 1.")]
    #[case(
        None,
        Some(0),
        "PageSize",
        "Page size must be greater than or equal to 1."
    )]
    #[case(
        Some(2),
        Some(-1),
        "PageSize",
        "Page size must be greater than or equal to 1."
    )]
    fn out_of_range_paging_is_rejected(
        #[case] page: Option<i64>,
        #[case] page_size: Option<i64>,
        #[case] property: &str,
        #[case] message: &str,
    ) {
        let error = page_request(page, page_size).expect_err("below the lower bound");

        assert_eq!(single_failure(&error), (property, message));
    }

    #[rstest]
    fn absent_sort_is_no_sort() {
        let spec = sort_spec::<UserSortField>(None).expect("absent is fine");
        assert!(spec.is_none());
    }

    #[rstest]
    fn sort_values_parse_field_and_direction() {
        let spec = sort_spec::<UserSortField>(Some("-age"))
            .expect("allow-listed field")
            .expect("a sort was requested");

        assert_eq!(spec.field, UserSortField::Age);
        assert_eq!(spec.order, SortOrder::Descending);
    }

    #[rstest]
    fn sort_outside_the_allow_list_is_rejected() {
        let error = sort_spec::<UserSortField>(Some("ownerId")).expect_err("unknown field");

        assert_eq!(
            single_failure(&error),
            ("SortBy", "'ownerId' is not a sortable field")
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some("All"))]
    fn absent_or_all_status_matches_everything(#[case] raw: Option<&str>) {
        let status = status_filter(raw).expect("no filter requested");
        assert!(status.is_none());
    }

    #[rstest]
    fn known_status_names_become_the_filter() {
        let status = status_filter(Some("Confirmed")).expect("known status");
        assert_eq!(status, Some(BookingStatus::Confirmed));
    }

    #[rstest]
    fn unknown_status_names_are_rejected() {
        let error = status_filter(Some("confirmed")).expect_err("case sensitive");

        assert_eq!(
            single_failure(&error),
            ("Status", "'confirmed' is not a valid booking status")
        );
    }
}
