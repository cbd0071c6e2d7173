//! Closed set of spending categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Shopping,
    Groceries,
    Rent,
    Travel,
    Clothes,
    Entertainment,
    Health,
    Utilities,
    Miscellaneous,
    /// Sentinel carried by settlement records.
    Settlement,
}

impl Category {
    /// Categories a personal or shared expense may use, in display order.
    pub const SPENDING: [Category; 10] = [
        Category::Food,
        Category::Shopping,
        Category::Groceries,
        Category::Rent,
        Category::Travel,
        Category::Clothes,
        Category::Entertainment,
        Category::Health,
        Category::Utilities,
        Category::Miscellaneous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Groceries => "groceries",
            Self::Rent => "rent",
            Self::Travel => "travel",
            Self::Clothes => "clothes",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Utilities => "utilities",
            Self::Miscellaneous => "miscellaneous",
            Self::Settlement => "settlement",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Shopping => "Shopping",
            Self::Groceries => "Groceries",
            Self::Rent => "Rent",
            Self::Travel => "Travel",
            Self::Clothes => "Clothes",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Utilities => "Utilities",
            Self::Miscellaneous => "Misc",
            Self::Settlement => "Settlement",
        }
    }

    pub fn is_spending(self) -> bool {
        self != Self::Settlement
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "food" => Ok(Self::Food),
            "shopping" => Ok(Self::Shopping),
            "groceries" => Ok(Self::Groceries),
            "rent" => Ok(Self::Rent),
            "travel" => Ok(Self::Travel),
            "clothes" => Ok(Self::Clothes),
            "entertainment" => Ok(Self::Entertainment),
            "health" => Ok(Self::Health),
            "utilities" => Ok(Self::Utilities),
            "miscellaneous" => Ok(Self::Miscellaneous),
            "settlement" => Ok(Self::Settlement),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid category: {other}"
            ))),
        }
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_parses_back() {
        for category in Category::SPENDING {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(
            "settlement".parse::<Category>().unwrap(),
            Category::Settlement
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("dining".parse::<Category>().is_err());
    }

    #[test]
    fn settlement_is_not_spending() {
        assert!(!Category::Settlement.is_spending());
        assert!(Category::SPENDING.iter().all(|c| c.is_spending()));
    }
}
