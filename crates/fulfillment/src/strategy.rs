//! Per-type processing strategies.
//!
//! Every product type follows the same flow:
//!
//! ```text
//! gate closed?  → notify (gate-specific), no stock change
//! in stock?     → consume one unit
//! otherwise     → backorder notification (gate-specific)
//! ```
//!
//! [`Gated`] implements that flow once; an [`AvailabilityGate`] supplies the
//! two type-specific steps. Strategies only decide; applying the decision is
//! the processor's job.

use chrono::{Days, NaiveDate};

use orderflow_products::{Product, SeasonWindow};

use crate::decision::{Decision, Notification};
use crate::error::{FulfillmentError, FulfillmentResult};

/// Decision rules for one product type.
pub trait ProcessingStrategy: Send + Sync {
    /// Decide what to do with `product` on `today`. Must not have side effects.
    fn decide(&self, product: &Product, today: NaiveDate) -> FulfillmentResult<Decision>;
}

/// The type-specific half of a [`Gated`] strategy.
pub trait AvailabilityGate: Send + Sync {
    /// Notification that applies regardless of stock, or `None` while the
    /// product may be sold.
    fn closed(&self, product: &Product, today: NaiveDate)
    -> FulfillmentResult<Option<Notification>>;

    /// Notification for a sellable product with no stock left.
    fn backorder(&self, product: &Product, today: NaiveDate) -> FulfillmentResult<Notification>;
}

/// Strategy built from a gate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gated<G> {
    gate: G,
}

impl<G> Gated<G> {
    pub fn new(gate: G) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }
}

impl<G: AvailabilityGate> ProcessingStrategy for Gated<G> {
    fn decide(&self, product: &Product, today: NaiveDate) -> FulfillmentResult<Decision> {
        if let Some(notification) = self.gate.closed(product, today)? {
            return Ok(Decision::Notify(notification));
        }
        if product.in_stock() {
            return Ok(Decision::ConsumeStock);
        }
        self.gate.backorder(product, today).map(Decision::Notify)
    }
}

pub type NormalStrategy = Gated<StockGate>;
pub type SeasonalStrategy = Gated<SeasonGate>;
pub type ExpirableStrategy = Gated<ExpiryGate>;

/// Normal products: always sellable; an empty shelf means a restock delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct StockGate;

impl AvailabilityGate for StockGate {
    fn closed(
        &self,
        _product: &Product,
        _today: NaiveDate,
    ) -> FulfillmentResult<Option<Notification>> {
        Ok(None)
    }

    fn backorder(&self, product: &Product, _today: NaiveDate) -> FulfillmentResult<Notification> {
        Ok(Notification::delay(product.lead_time(), product.name()))
    }
}

/// Seasonal products: sellable inside `[season start, season end)`. A restock
/// is only announced if it arrives strictly before the season ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeasonGate;

impl SeasonGate {
    fn window(product: &Product) -> FulfillmentResult<SeasonWindow> {
        product
            .season_window()
            .ok_or_else(|| FulfillmentError::missing(product.name(), "season window"))
    }
}

impl AvailabilityGate for SeasonGate {
    fn closed(
        &self,
        product: &Product,
        today: NaiveDate,
    ) -> FulfillmentResult<Option<Notification>> {
        let window = Self::window(product)?;
        if window.contains(today) {
            Ok(None)
        } else {
            Ok(Some(Notification::out_of_stock(product.name())))
        }
    }

    fn backorder(&self, product: &Product, today: NaiveDate) -> FulfillmentResult<Notification> {
        let window = Self::window(product)?;
        if delivery_date(today, product.lead_time()) < window.end {
            Ok(Notification::delay(product.lead_time(), product.name()))
        } else {
            Ok(Notification::out_of_stock(product.name()))
        }
    }
}

/// Expirable products: unsellable on or after the expiry date. A restock is
/// only announced if it arrives strictly before that date.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpiryGate;

impl ExpiryGate {
    fn expiry(product: &Product) -> FulfillmentResult<NaiveDate> {
        product
            .expiry_date()
            .ok_or_else(|| FulfillmentError::missing(product.name(), "expiry date"))
    }
}

impl AvailabilityGate for ExpiryGate {
    fn closed(
        &self,
        product: &Product,
        today: NaiveDate,
    ) -> FulfillmentResult<Option<Notification>> {
        let expiry = Self::expiry(product)?;
        if expiry <= today {
            Ok(Some(Notification::expiration(product.name(), expiry)))
        } else {
            Ok(None)
        }
    }

    fn backorder(&self, product: &Product, today: NaiveDate) -> FulfillmentResult<Notification> {
        let expiry = Self::expiry(product)?;
        if delivery_date(today, product.lead_time()) < expiry {
            Ok(Notification::delay(product.lead_time(), product.name()))
        } else {
            Ok(Notification::expiration(product.name(), expiry))
        }
    }
}

/// `today + lead_time` days, saturating at the last representable date.
fn delivery_date(today: NaiveDate, lead_time: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(lead_time)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_core::ProductId;
    use orderflow_products::ProductType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    fn days_from_today(days: i64) -> NaiveDate {
        today() + chrono::Duration::days(days)
    }

    fn seasonal(name: &str, available: u32, lead_time: u32, start: i64, end: i64) -> Product {
        Product::seasonal(name, available, lead_time, days_from_today(start), days_from_today(end))
    }

    fn expirable(name: &str, available: u32, lead_time: u32, expires_in: i64) -> Product {
        Product::expirable(name, available, lead_time, days_from_today(expires_in))
    }

    #[test]
    fn normal_consumes_stock_when_available() {
        let decision = NormalStrategy::default()
            .decide(&Product::normal("USB Cable", 5, 10), today())
            .unwrap();
        assert_eq!(decision, Decision::ConsumeStock);
    }

    #[test]
    fn normal_consumes_from_large_stock() {
        let decision = NormalStrategy::default()
            .decide(&Product::normal("HDMI Cable", 100, 20), today())
            .unwrap();
        assert!(decision.consumes_stock());
    }

    #[test]
    fn normal_notifies_delay_when_out_of_stock() {
        let decision = NormalStrategy::default()
            .decide(&Product::normal("USB Dongle", 0, 15), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::delay(15, "USB Dongle")));
    }

    #[test]
    fn seasonal_consumes_stock_in_season() {
        let decision = SeasonalStrategy::default()
            .decide(&seasonal("Watermelon", 5, 20, -10, 30), today())
            .unwrap();
        assert_eq!(decision, Decision::ConsumeStock);
    }

    #[test]
    fn seasonal_before_season_is_out_of_stock() {
        let decision = SeasonalStrategy::default()
            .decide(&seasonal("Grapes", 5, 20, 180, 240), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::out_of_stock("Grapes")));
    }

    #[test]
    fn seasonal_after_season_is_out_of_stock() {
        let decision = SeasonalStrategy::default()
            .decide(&seasonal("Strawberries", 5, 20, -100, -10), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::out_of_stock("Strawberries")));
    }

    #[test]
    fn seasonal_first_day_of_season_is_in_season() {
        let decision = SeasonalStrategy::default()
            .decide(&seasonal("Cherry", 5, 10, 0, 30), today())
            .unwrap();
        assert_eq!(decision, Decision::ConsumeStock);
    }

    #[test]
    fn seasonal_end_date_is_already_out_of_season() {
        let decision = SeasonalStrategy::default()
            .decide(&seasonal("Plum", 5, 10, -30, 0), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::out_of_stock("Plum")));
    }

    #[test]
    fn seasonal_delay_when_restock_lands_before_season_end() {
        let decision = SeasonalStrategy::default()
            .decide(&seasonal("Peach", 0, 10, -10, 30), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::delay(10, "Peach")));
    }

    #[test]
    fn seasonal_out_of_stock_when_restock_misses_season() {
        let decision = SeasonalStrategy::default()
            .decide(&seasonal("Mango", 0, 50, -10, 20), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::out_of_stock("Mango")));
    }

    #[test]
    fn seasonal_restock_on_season_end_is_too_late() {
        let decision = SeasonalStrategy::default()
            .decide(&seasonal("Apricot", 0, 20, -10, 20), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::out_of_stock("Apricot")));
    }

    #[test]
    fn seasonal_without_window_is_rejected() {
        let product = Product::new(ProductId::new(), ProductType::Seasonal, "Melon", 3, 20);
        let err = SeasonalStrategy::default().decide(&product, today()).unwrap_err();
        assert_eq!(err, FulfillmentError::missing("Melon", "season window"));
    }

    #[test]
    fn expirable_consumes_stock_before_expiry() {
        let decision = ExpirableStrategy::default()
            .decide(&expirable("Butter", 5, 10, 20), today())
            .unwrap();
        assert_eq!(decision, Decision::ConsumeStock);
    }

    #[test]
    fn expirable_expired_notifies_expiration() {
        let expiry = days_from_today(-2);
        let decision = ExpirableStrategy::default()
            .decide(&expirable("Milk", 5, 10, -2), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::expiration("Milk", expiry)));
    }

    #[test]
    fn expirable_expiring_today_is_expired() {
        let decision = ExpirableStrategy::default()
            .decide(&expirable("Yogurt", 5, 10, 0), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::expiration("Yogurt", today())));
    }

    #[test]
    fn expirable_expiring_tomorrow_still_sells() {
        let decision = ExpirableStrategy::default()
            .decide(&expirable("Eggs", 5, 10, 1), today())
            .unwrap();
        assert_eq!(decision, Decision::ConsumeStock);
    }

    #[test]
    fn expirable_long_shelf_life_sells() {
        let decision = ExpirableStrategy::default()
            .decide(&expirable("Canned Food", 100, 30, 730), today())
            .unwrap();
        assert_eq!(decision, Decision::ConsumeStock);
    }

    #[test]
    fn expirable_delay_when_restock_lands_before_expiry() {
        let decision = ExpirableStrategy::default()
            .decide(&expirable("Cheese", 0, 10, 20), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::delay(10, "Cheese")));
    }

    #[test]
    fn expirable_expiration_when_restock_lands_after_expiry() {
        let expiry = days_from_today(5);
        let decision = ExpirableStrategy::default()
            .decide(&expirable("Cream", 0, 10, 5), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::expiration("Cream", expiry)));
    }

    #[test]
    fn expirable_restock_on_expiry_date_is_too_late() {
        let expiry = days_from_today(10);
        let decision = ExpirableStrategy::default()
            .decide(&expirable("Kefir", 0, 10, 10), today())
            .unwrap();
        assert_eq!(decision, Decision::Notify(Notification::expiration("Kefir", expiry)));
    }

    #[test]
    fn expirable_without_expiry_is_rejected() {
        let product = Product::new(ProductId::new(), ProductType::Expirable, "Milk", 3, 20);
        let err = ExpirableStrategy::default().decide(&product, today()).unwrap_err();
        assert_eq!(err, FulfillmentError::missing("Milk", "expiry date"));
    }

    #[test]
    fn delivery_date_saturates_instead_of_overflowing() {
        let near_end = NaiveDate::MAX - chrono::Duration::days(3);
        assert_eq!(delivery_date(near_end, u32::MAX), NaiveDate::MAX);
        assert_eq!(delivery_date(today(), 0), today());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: normal products consume stock iff any is left, else one delay notice.
            #[test]
            fn normal_consumes_iff_in_stock(available in 0u32..10_000, lead_time in 0u32..365) {
                let product = Product::normal("Widget", available, lead_time);
                let decision = NormalStrategy::default().decide(&product, today()).unwrap();

                if available > 0 {
                    prop_assert_eq!(decision, Decision::ConsumeStock);
                } else {
                    prop_assert_eq!(
                        decision,
                        Decision::Notify(Notification::delay(lead_time, "Widget"))
                    );
                }
            }

            /// Property: out of season always means out-of-stock notice, whatever the stock.
            #[test]
            fn out_of_season_never_consumes(
                available in 0u32..1_000,
                lead_time in 0u32..365,
                start in -400i64..400,
                length in 0i64..200,
            ) {
                let end = start + length;
                prop_assume!(!(start <= 0 && 0 < end));

                let product = seasonal("Berry", available, lead_time, start, end);
                let decision = SeasonalStrategy::default().decide(&product, today()).unwrap();
                prop_assert_eq!(decision, Decision::Notify(Notification::out_of_stock("Berry")));
            }

            /// Property: in season with stock always consumes.
            #[test]
            fn in_season_with_stock_consumes(
                available in 1u32..1_000,
                lead_time in 0u32..365,
                start in -200i64..=0,
                end in 1i64..200,
            ) {
                let product = seasonal("Berry", available, lead_time, start, end);
                let decision = SeasonalStrategy::default().decide(&product, today()).unwrap();
                prop_assert_eq!(decision, Decision::ConsumeStock);
            }

            /// Property: expired products always get an expiration notice, whatever the stock.
            #[test]
            fn expired_never_consumes(
                available in 0u32..1_000,
                lead_time in 0u32..365,
                expired_days_ago in 0i64..1_000,
            ) {
                let expiry = days_from_today(-expired_days_ago);
                let product = Product::expirable("Milk", available, lead_time, expiry);
                let decision = ExpirableStrategy::default().decide(&product, today()).unwrap();
                prop_assert_eq!(
                    decision,
                    Decision::Notify(Notification::expiration("Milk", expiry))
                );
            }

            /// Property: an empty, unexpired product is delayed iff restock beats expiry.
            #[test]
            fn empty_unexpired_delay_iff_restock_beats_expiry(
                lead_time in 0u32..365,
                expires_in in 1i64..400,
            ) {
                let expiry = days_from_today(expires_in);
                let product = Product::expirable("Milk", 0, lead_time, expiry);
                let decision = ExpirableStrategy::default().decide(&product, today()).unwrap();

                if i64::from(lead_time) < expires_in {
                    prop_assert_eq!(
                        decision,
                        Decision::Notify(Notification::delay(lead_time, "Milk"))
                    );
                } else {
                    prop_assert_eq!(
                        decision,
                        Decision::Notify(Notification::expiration("Milk", expiry))
                    );
                }
            }
        }
    }
}
