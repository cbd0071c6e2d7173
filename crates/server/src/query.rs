//! Wire values to engine values.

use api_types::{ExpenseKind, FilterQuery};
use engine::{
    Category, CategoryFilter, Criteria, KindFilter, MoneyCents, Parties, Party, PartyFilter,
    Period, RecordKind,
};

use crate::ServerError;

fn is_all(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty() || v.trim().eq_ignore_ascii_case("all"))
}

pub(crate) fn party(parties: &Parties, name: &str) -> Result<Party, ServerError> {
    Ok(parties.require(name.trim())?)
}

pub(crate) fn category(value: &str) -> Result<Category, ServerError> {
    Ok(Category::try_from(value.trim())?)
}

/// Amount given either in paise or as a decimal rupee string.
pub(crate) fn amount(
    minor: Option<i64>,
    decimal: Option<&str>,
) -> Result<Option<MoneyCents>, ServerError> {
    match (minor, decimal) {
        (Some(_), Some(_)) => Err(ServerError::Generic(
            "give either amount or amount_minor, not both".to_string(),
        )),
        (Some(minor), None) => Ok(Some(MoneyCents::new(minor))),
        (None, Some(decimal)) => Ok(Some(decimal.parse::<MoneyCents>()?)),
        (None, None) => Ok(None),
    }
}

pub(crate) fn kind(kind: ExpenseKind) -> RecordKind {
    match kind {
        ExpenseKind::Personal => RecordKind::Personal,
        ExpenseKind::Shared => RecordKind::Shared,
        ExpenseKind::Settlement => RecordKind::Settlement,
    }
}

pub(crate) fn api_kind(kind: RecordKind) -> ExpenseKind {
    match kind {
        RecordKind::Personal => ExpenseKind::Personal,
        RecordKind::Shared => ExpenseKind::Shared,
        RecordKind::Settlement => ExpenseKind::Settlement,
    }
}

fn period(query: &FilterQuery) -> Result<Period, ServerError> {
    let value = query.period.as_deref().map(str::trim).unwrap_or("all");
    match value.to_ascii_lowercase().as_str() {
        "" | "all" => Ok(Period::All),
        "today" => Ok(Period::Today),
        "week" => Ok(Period::Week),
        "month" => Ok(Period::Month),
        "custom" => {
            let (Some(start), Some(end)) = (query.start, query.end) else {
                return Err(ServerError::Generic(
                    "custom period requires start and end".to_string(),
                ));
            };
            Ok(Period::custom(start, end)?)
        }
        other => Err(ServerError::Generic(format!("unknown period: {other}"))),
    }
}

/// Builds filter criteria from query parameters.
pub(crate) fn criteria(query: &FilterQuery, parties: &Parties) -> Result<Criteria, ServerError> {
    let party = if is_all(query.party.as_deref()) {
        PartyFilter::All
    } else {
        PartyFilter::Only(party(parties, query.party.as_deref().unwrap_or_default())?)
    };

    let category = if is_all(query.category.as_deref()) {
        CategoryFilter::All
    } else {
        CategoryFilter::Only(category(query.category.as_deref().unwrap_or_default())?)
    };

    let kind = match query.kind.as_deref().map(str::trim) {
        None | Some("") | Some("all") => KindFilter::All,
        Some("personal") => KindFilter::Personal,
        Some("shared") => KindFilter::Shared,
        Some(other) => {
            return Err(ServerError::Generic(format!("unknown kind filter: {other}")));
        }
    };

    Ok(Criteria {
        party,
        category,
        kind,
        period: period(query)?,
    })
}
