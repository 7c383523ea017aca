use crate::form::{rule_error, FormInput};
use crate::list_options::{ListOptions, Order, SortKey, Status};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Raw `status`/`sort`/`order` query parameters of the listing page.
///
/// Every field is optional; a supplied value must be the exact query spelling
/// of one of the known variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ListOptionsForm {
    #[validate(custom(function = "known_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "known_sort"))]
    pub sort: Option<String>,
    #[validate(custom(function = "known_order"))]
    pub order: Option<String>,
}

fn one_of<const N: usize>(
    value: &str,
    allowed: [&'static str; N],
) -> Result<(), ValidationError> {
    if value.trim().is_empty() || allowed.iter().any(|a| *a == value) {
        Ok(())
    } else {
        Err(rule_error("any_of", "Not a valid choice."))
    }
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, Status::VARIANTS.map(|s| s.as_str()))
}

fn known_sort(value: &str) -> Result<(), ValidationError> {
    one_of(value, SortKey::VARIANTS.map(|s| s.as_str()))
}

fn known_order(value: &str) -> Result<(), ValidationError> {
    one_of(value, Order::VARIANTS.map(|o| o.as_str()))
}

fn parse_or_default<T: FromStr + Default>(value: Option<&str>) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}

impl FormInput for ListOptionsForm {
    type Model = ListOptions;

    fn into_model(self) -> ListOptions {
        ListOptions {
            status: parse_or_default(self.status.as_deref()),
            sort: parse_or_default(self.sort.as_deref()),
            order: parse_or_default(self.order.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ValidatedInput;
    use rstest::rstest;

    fn query(status: Option<&str>, sort: Option<&str>, order: Option<&str>) -> ListOptionsForm {
        ListOptionsForm {
            status: status.map(str::to_string),
            sort: sort.map(str::to_string),
            order: order.map(str::to_string),
        }
    }

    #[test]
    fn empty_query_yields_defaults() {
        let mut input = ValidatedInput::new(ListOptionsForm::default());
        assert!(input.validate());
        assert_eq!(input.into_model().unwrap(), ListOptions::default());
    }

    #[test]
    fn known_values_are_applied() {
        let mut input = ValidatedInput::new(query(Some("completed"), Some("dueDate"), Some("asc")));
        assert!(input.validate());
        assert_eq!(
            input.into_model().unwrap(),
            ListOptions::new(Status::Completed, SortKey::DueDate, Order::Asc)
        );
    }

    #[test]
    fn blank_values_fall_back_per_field() {
        let mut input = ValidatedInput::new(query(Some(""), Some("title"), None));
        assert!(input.validate());
        assert_eq!(
            input.into_model().unwrap(),
            ListOptions::new(Status::All, SortKey::Title, Order::Desc)
        );
    }

    #[rstest]
    #[case(Some("incomplete"), None, None)]
    #[case(Some("Completed"), None, None)]
    #[case(None, Some("TITLE"), None)]
    #[case(None, Some("duedate"), None)]
    #[case(None, None, Some(" asc "))]
    fn only_exact_spellings_are_valid(
        #[case] status: Option<&str>,
        #[case] sort: Option<&str>,
        #[case] order: Option<&str>,
    ) {
        let mut input = ValidatedInput::new(query(status, sort, order));
        assert!(!input.validate());

        input.reset_to_default();
        assert_eq!(input.into_model().unwrap(), ListOptions::default());
    }

    #[test]
    fn whitespace_only_values_count_as_absent() {
        let mut input = ValidatedInput::new(query(Some("  "), None, Some("asc")));
        assert!(input.validate());
        assert_eq!(
            input.into_model().unwrap(),
            ListOptions::new(Status::All, SortKey::CreatedAt, Order::Asc)
        );
    }

    #[test]
    fn one_bad_value_resets_every_field() {
        let mut input = ValidatedInput::new(query(Some("completed"), Some("priority"), Some("asc")));
        assert!(!input.validate());
        assert!(input.errors().contains_key("sort"));

        input.reset_to_default();
        assert!(input.is_valid());
        assert_eq!(input.into_model().unwrap(), ListOptions::default());
    }
}
