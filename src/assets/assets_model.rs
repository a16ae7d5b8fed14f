use serde::{Deserialize, Serialize};

/// Broad asset classification used for allocation breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Equity,
    FixedIncome,
    Cash,
    RealEstate,
    Commodity,
    Alternative,
    Other,
}

impl AssetClass {
    /// Returns the string representation of this asset class.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "EQUITY",
            AssetClass::FixedIncome => "FIXED_INCOME",
            AssetClass::Cash => "CASH",
            AssetClass::RealEstate => "REAL_ESTATE",
            AssetClass::Commodity => "COMMODITY",
            AssetClass::Alternative => "ALTERNATIVE",
            AssetClass::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static reference data for a tradable security.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: String,
    pub symbol: String,
    pub name: Option<String>,
    pub asset_class: AssetClass,
    pub currency: String,
}
