use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use orderflow_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Built-in product types.
///
/// The stored form of a type is its upper-case tag (`NORMAL`, `SEASONAL`,
/// `EXPIRABLE`). Products keep the tag as a string, so storage may hold tags
/// that no strategy knows about; those surface when the order is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Normal,
    Seasonal,
    Expirable,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Normal,
        ProductType::Seasonal,
        ProductType::Expirable,
    ];

    /// Stored tag for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Normal => "NORMAL",
            ProductType::Seasonal => "SEASONAL",
            ProductType::Expirable => "EXPIRABLE",
        }
    }

    /// Bring a caller-supplied tag into stored form (trimmed, upper-case).
    ///
    /// Unknown tags are normalized too; whether a strategy exists for them is
    /// decided at processing time.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ProductType {
    type Err = DomainError;

    /// Exact, case-sensitive match on the stored form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown product type: {s}")))
    }
}

/// Half-open sales window `[start, end)` of a seasonal product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ValueObject for SeasonWindow {}

impl SeasonWindow {
    /// `start <= end` is expected but not enforced; an inverted window simply
    /// contains no day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `day` falls inside the window. The end date itself is outside.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

/// Product record.
///
/// `expiry_date` only matters for expirable products and the season dates only
/// for seasonal ones; for other types they are usually `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    #[serde(rename = "type", deserialize_with = "deserialize_tag")]
    type_tag: String,
    name: String,
    available: u32,
    lead_time: u32,
    #[serde(default)]
    expiry_date: Option<NaiveDate>,
    #[serde(default)]
    season_start_date: Option<NaiveDate>,
    #[serde(default)]
    season_end_date: Option<NaiveDate>,
}

fn deserialize_tag<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(ProductType::normalize(&raw))
}

impl Product {
    /// Product with an arbitrary type tag. The tag is normalized before it is
    /// stored.
    pub fn tagged(
        id: ProductId,
        type_tag: &str,
        name: impl Into<String>,
        available: u32,
        lead_time: u32,
    ) -> Self {
        Self {
            id,
            type_tag: ProductType::normalize(type_tag),
            name: name.into(),
            available,
            lead_time,
            expiry_date: None,
            season_start_date: None,
            season_end_date: None,
        }
    }

    pub fn new(
        id: ProductId,
        product_type: ProductType,
        name: impl Into<String>,
        available: u32,
        lead_time: u32,
    ) -> Self {
        Self::tagged(id, product_type.as_str(), name, available, lead_time)
    }

    pub fn normal(name: impl Into<String>, available: u32, lead_time: u32) -> Self {
        Self::new(ProductId::new(), ProductType::Normal, name, available, lead_time)
    }

    pub fn seasonal(
        name: impl Into<String>,
        available: u32,
        lead_time: u32,
        season_start: NaiveDate,
        season_end: NaiveDate,
    ) -> Self {
        Self::new(ProductId::new(), ProductType::Seasonal, name, available, lead_time)
            .with_season(season_start, season_end)
    }

    pub fn expirable(
        name: impl Into<String>,
        available: u32,
        lead_time: u32,
        expiry_date: NaiveDate,
    ) -> Self {
        Self::new(ProductId::new(), ProductType::Expirable, name, available, lead_time)
            .with_expiry_date(expiry_date)
    }

    pub fn with_expiry_date(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn with_season(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.season_start_date = Some(start);
        self.season_end_date = Some(end);
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Built-in type for the stored tag, if it is one.
    pub fn product_type(&self) -> Option<ProductType> {
        self.type_tag.parse().ok()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn in_stock(&self) -> bool {
        self.available > 0
    }

    /// Days needed to restock.
    pub fn lead_time(&self) -> u32 {
        self.lead_time
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    pub fn season_start_date(&self) -> Option<NaiveDate> {
        self.season_start_date
    }

    pub fn season_end_date(&self) -> Option<NaiveDate> {
        self.season_end_date
    }

    /// Season window, present only when both bounds are set.
    pub fn season_window(&self) -> Option<SeasonWindow> {
        match (self.season_start_date, self.season_end_date) {
            (Some(start), Some(end)) => Some(SeasonWindow::new(start, end)),
            _ => None,
        }
    }

    /// Consume one unit of stock.
    ///
    /// `available` never goes below zero: taking from an empty product is an
    /// invariant violation and leaves the record untouched.
    pub fn take_one(&mut self) -> DomainResult<()> {
        self.available = self
            .available
            .checked_sub(1)
            .ok_or_else(|| {
                DomainError::invariant(format!("product '{}' has no stock", self.name))
            })?;
        Ok(())
    }

    /// Shape checks applied before a product is accepted into storage.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.type_tag.is_empty() {
            return Err(DomainError::validation("type cannot be empty"));
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
