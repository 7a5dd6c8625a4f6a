//! Display tags for categories and institutions.
//!
//! Every tag maps to an icon and color through an exhaustive `match`, and
//! parsing an unmapped key fails instead of falling back to a default.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryTag {
    Housing,
    Groceries,
    Dining,
    Transport,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Income,
    Transfer,
    Other,
}

impl CategoryTag {
    pub fn icon(&self) -> &'static str {
        match self {
            CategoryTag::Housing => "home",
            CategoryTag::Groceries => "shopping-cart",
            CategoryTag::Dining => "utensils",
            CategoryTag::Transport => "car",
            CategoryTag::Utilities => "zap",
            CategoryTag::Entertainment => "film",
            CategoryTag::Shopping => "shopping-bag",
            CategoryTag::Health => "heart-pulse",
            CategoryTag::Income => "trending-up",
            CategoryTag::Transfer => "arrow-left-right",
            CategoryTag::Other => "circle",
        }
    }

    /// Hex color used by charts
    pub fn color(&self) -> &'static str {
        match self {
            CategoryTag::Housing => "#6366f1",
            CategoryTag::Groceries => "#22c55e",
            CategoryTag::Dining => "#f97316",
            CategoryTag::Transport => "#0ea5e9",
            CategoryTag::Utilities => "#eab308",
            CategoryTag::Entertainment => "#ec4899",
            CategoryTag::Shopping => "#a855f7",
            CategoryTag::Health => "#ef4444",
            CategoryTag::Income => "#10b981",
            CategoryTag::Transfer => "#64748b",
            CategoryTag::Other => "#94a3b8",
        }
    }
}

impl FromStr for CategoryTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "housing" | "rent" | "mortgage" => Ok(CategoryTag::Housing),
            "groceries" | "grocery" => Ok(CategoryTag::Groceries),
            "dining" | "restaurants" | "fooddining" => Ok(CategoryTag::Dining),
            "transport" | "transportation" | "auto" => Ok(CategoryTag::Transport),
            "utilities" | "billsutilities" => Ok(CategoryTag::Utilities),
            "entertainment" | "subscriptions" => Ok(CategoryTag::Entertainment),
            "shopping" => Ok(CategoryTag::Shopping),
            "health" | "healthcare" | "fitness" => Ok(CategoryTag::Health),
            "income" | "salary" | "freelance" => Ok(CategoryTag::Income),
            "transfer" | "transfers" => Ok(CategoryTag::Transfer),
            "other" | "uncategorized" => Ok(CategoryTag::Other),
            _ => Err(CoreError::UnknownTag {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstitutionTag {
    Chase,
    BankOfAmerica,
    WellsFargo,
    CapitalOne,
    AmericanExpress,
    Ally,
    Fidelity,
    Vanguard,
    Schwab,
    Coinbase,
}

impl InstitutionTag {
    pub fn color(&self) -> &'static str {
        match self {
            InstitutionTag::Chase => "#117aca",
            InstitutionTag::BankOfAmerica => "#e31837",
            InstitutionTag::WellsFargo => "#d71e28",
            InstitutionTag::CapitalOne => "#004977",
            InstitutionTag::AmericanExpress => "#006fcf",
            InstitutionTag::Ally => "#650360",
            InstitutionTag::Fidelity => "#368727",
            InstitutionTag::Vanguard => "#96151d",
            InstitutionTag::Schwab => "#00a0df",
            InstitutionTag::Coinbase => "#0052ff",
        }
    }

    /// Short monogram shown in place of a logo
    pub fn monogram(&self) -> &'static str {
        match self {
            InstitutionTag::Chase => "CH",
            InstitutionTag::BankOfAmerica => "BA",
            InstitutionTag::WellsFargo => "WF",
            InstitutionTag::CapitalOne => "C1",
            InstitutionTag::AmericanExpress => "AX",
            InstitutionTag::Ally => "AL",
            InstitutionTag::Fidelity => "FI",
            InstitutionTag::Vanguard => "VG",
            InstitutionTag::Schwab => "CS",
            InstitutionTag::Coinbase => "CB",
        }
    }
}

impl FromStr for InstitutionTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "chase" | "jpmorganchase" => Ok(InstitutionTag::Chase),
            "bankofamerica" | "boa" => Ok(InstitutionTag::BankOfAmerica),
            "wellsfargo" => Ok(InstitutionTag::WellsFargo),
            "capitalone" => Ok(InstitutionTag::CapitalOne),
            "americanexpress" | "amex" => Ok(InstitutionTag::AmericanExpress),
            "ally" | "allybank" => Ok(InstitutionTag::Ally),
            "fidelity" => Ok(InstitutionTag::Fidelity),
            "vanguard" => Ok(InstitutionTag::Vanguard),
            "schwab" | "charlesschwab" => Ok(InstitutionTag::Schwab),
            "coinbase" => Ok(InstitutionTag::Coinbase),
            _ => Err(CoreError::UnknownTag {
                kind: "institution",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tag_parsing() {
        assert_eq!("Groceries".parse::<CategoryTag>().unwrap(), CategoryTag::Groceries);
        assert_eq!("Food & Dining".parse::<CategoryTag>().unwrap(), CategoryTag::Dining);
        assert_eq!(CategoryTag::Housing.icon(), "home");
    }

    #[test]
    fn test_unmapped_category_is_an_error() {
        let err = "Llama grooming".parse::<CategoryTag>().unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownTag { kind: "category", value: "Llama grooming".to_string() }
        );
    }

    #[test]
    fn test_institution_tags() {
        let amex: InstitutionTag = "American Express".parse().unwrap();
        assert_eq!(amex, InstitutionTag::AmericanExpress);
        assert_eq!(amex.monogram(), "AX");
        assert_eq!("Capital One".parse::<InstitutionTag>().unwrap().color(), "#004977");
        assert!("Bank of Narnia".parse::<InstitutionTag>().is_err());
    }
}
