use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assets::{AssetClass, Security};
use crate::constants::ALLOCATION_TOLERANCE;
use crate::portfolio::holdings::{compute_holdings, HoldingsInput};
use crate::positions::Position;
use crate::quotes::Price;

const ACCOUNT_ID: &str = "acct-1";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn security(id: &str, symbol: &str, asset_class: AssetClass) -> Security {
    Security {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: Some(format!("{} Inc.", symbol)),
        asset_class,
        currency: "USD".to_string(),
    }
}

fn position(
    d: NaiveDate,
    security_id: Option<&str>,
    quantity: Option<Decimal>,
    average_cost: Option<Decimal>,
    market_value: Decimal,
) -> Position {
    Position {
        account_id: ACCOUNT_ID.to_string(),
        date: d,
        security_id: security_id.map(|s| s.to_string()),
        quantity,
        average_cost,
        market_value,
    }
}

fn price(security_id: &str, d: NaiveDate, close: Decimal) -> Price {
    Price {
        security_id: security_id.to_string(),
        date: d,
        close,
    }
}

#[test]
fn test_empty_positions_yield_empty_report() {
    let input = HoldingsInput {
        positions: &[],
        prices: &[],
        securities: &[],
    };

    let report = compute_holdings(ACCOUNT_ID, date(2024, 3, 31), &input).unwrap();
    assert!(report.holdings.is_empty());
    assert!(report.asset_classes.is_empty());
    assert_eq!(report.summary.total_market_value, Decimal::ZERO);
    assert_eq!(report.summary.holding_count, 0);
}

#[test]
fn test_market_value_and_unrealized_pnl() {
    let securities = vec![security("SEC-1", "AAPL", AssetClass::Equity)];
    let positions = vec![position(
        date(2024, 3, 29),
        Some("SEC-1"),
        Some(dec!(100)),
        Some(dec!(150)),
        dec!(15000),
    )];
    let prices = vec![price("SEC-1", date(2024, 3, 28), dec!(160))];

    let input = HoldingsInput {
        positions: &positions,
        prices: &prices,
        securities: &securities,
    };
    let report = compute_holdings(ACCOUNT_ID, date(2024, 3, 31), &input).unwrap();

    assert_eq!(report.holdings.len(), 1);
    let holding = &report.holdings[0];
    assert_eq!(holding.symbol, "AAPL");
    assert_eq!(holding.price, Some(dec!(160)));
    assert_eq!(holding.market_value, dec!(16000));
    assert_eq!(holding.unrealized_pnl, Some(dec!(1000)));
    assert!(!holding.stale_price);
    assert_eq!(holding.allocation_percent, dec!(100));
}

#[test]
fn test_missing_price_falls_back_to_average_cost() {
    let securities = vec![security("SEC-1", "VTI", AssetClass::Equity)];
    let positions = vec![position(
        date(2024, 3, 29),
        Some("SEC-1"),
        Some(dec!(10)),
        Some(dec!(200)),
        dec!(2000),
    )];

    let input = HoldingsInput {
        positions: &positions,
        prices: &[],
        securities: &securities,
    };
    let report = compute_holdings(ACCOUNT_ID, date(2024, 3, 31), &input).unwrap();

    let holding = &report.holdings[0];
    assert!(holding.stale_price);
    assert_eq!(holding.price, Some(dec!(200)));
    assert_eq!(holding.market_value, dec!(2000));
    assert_eq!(holding.unrealized_pnl, Some(Decimal::ZERO));
    assert_eq!(report.summary.stale_price_count, 1);
}

#[test]
fn test_cash_position_uses_stored_market_value() {
    let positions = vec![position(date(2024, 3, 29), None, None, None, dec!(85000))];
    let input = HoldingsInput {
        positions: &positions,
        prices: &[],
        securities: &[],
    };

    let report = compute_holdings(ACCOUNT_ID, date(2024, 3, 31), &input).unwrap();
    let holding = &report.holdings[0];
    assert_eq!(holding.symbol, "CASH");
    assert_eq!(holding.asset_class, AssetClass::Cash);
    assert_eq!(holding.market_value, dec!(85000));
    assert_eq!(holding.unrealized_pnl, None);
}

#[test]
fn test_zero_quantity_positions_are_skipped() {
    let securities = vec![security("SEC-1", "AAPL", AssetClass::Equity)];
    let positions = vec![position(
        date(2024, 3, 29),
        Some("SEC-1"),
        Some(Decimal::ZERO),
        Some(dec!(150)),
        Decimal::ZERO,
    )];
    let prices = vec![price("SEC-1", date(2024, 3, 29), dec!(160))];

    let input = HoldingsInput {
        positions: &positions,
        prices: &prices,
        securities: &securities,
    };
    let report = compute_holdings(ACCOUNT_ID, date(2024, 3, 31), &input).unwrap();
    assert!(report.holdings.is_empty());
}

#[test]
fn test_allocation_closure() {
    let securities = vec![
        security("SEC-1", "AAPL", AssetClass::Equity),
        security("SEC-2", "AGG", AssetClass::FixedIncome),
        security("SEC-3", "GLD", AssetClass::Commodity),
    ];
    let as_of = date(2024, 3, 31);
    let positions = vec![
        position(as_of, Some("SEC-1"), Some(dec!(3)), Some(dec!(100)), dec!(300)),
        position(as_of, Some("SEC-2"), Some(dec!(7)), Some(dec!(100)), dec!(700)),
        position(as_of, Some("SEC-3"), Some(dec!(1)), Some(dec!(100)), dec!(100)),
        position(as_of, None, None, None, dec!(123.45)),
    ];
    let prices = vec![
        price("SEC-1", as_of, dec!(101.33)),
        price("SEC-2", as_of, dec!(99.17)),
        price("SEC-3", as_of, dec!(187.01)),
    ];

    let input = HoldingsInput {
        positions: &positions,
        prices: &prices,
        securities: &securities,
    };
    let report = compute_holdings(ACCOUNT_ID, as_of, &input).unwrap();

    let allocation_sum: Decimal = report.holdings.iter().map(|h| h.allocation_percent).sum();
    assert!((allocation_sum - dec!(100)).abs() <= ALLOCATION_TOLERANCE);

    let class_sum: Decimal = report
        .asset_classes
        .iter()
        .map(|c| c.percent_of_total)
        .sum();
    assert!((class_sum - dec!(100)).abs() <= ALLOCATION_TOLERANCE);
}

#[test]
fn test_asset_class_breakdown_groups_and_sorts() {
    let securities = vec![
        security("SEC-1", "AAPL", AssetClass::Equity),
        security("SEC-2", "MSFT", AssetClass::Equity),
        security("SEC-3", "AGG", AssetClass::FixedIncome),
    ];
    let as_of = date(2024, 3, 31);
    let positions = vec![
        position(as_of, Some("SEC-1"), Some(dec!(10)), None, dec!(1000)),
        position(as_of, Some("SEC-2"), Some(dec!(20)), None, dec!(2000)),
        position(as_of, Some("SEC-3"), Some(dec!(5)), None, dec!(500)),
    ];
    let prices = vec![
        price("SEC-1", as_of, dec!(100)),
        price("SEC-2", as_of, dec!(100)),
        price("SEC-3", as_of, dec!(100)),
    ];

    let input = HoldingsInput {
        positions: &positions,
        prices: &prices,
        securities: &securities,
    };
    let report = compute_holdings(ACCOUNT_ID, as_of, &input).unwrap();

    assert_eq!(report.asset_classes.len(), 2);
    let equity = &report.asset_classes[0];
    assert_eq!(equity.asset_class, AssetClass::Equity);
    assert_eq!(equity.market_value, dec!(3000));
    assert_eq!(equity.holding_count, 2);

    let fixed_income = &report.asset_classes[1];
    assert_eq!(fixed_income.asset_class, AssetClass::FixedIncome);
    assert_eq!(fixed_income.holding_count, 1);
}

#[test]
fn test_uses_latest_snapshot_per_security() {
    let securities = vec![security("SEC-1", "AAPL", AssetClass::Equity)];
    let positions = vec![
        position(date(2024, 3, 1), Some("SEC-1"), Some(dec!(50)), Some(dec!(150)), dec!(7500)),
        position(date(2024, 3, 15), Some("SEC-1"), Some(dec!(100)), Some(dec!(150)), dec!(15000)),
        // After the as-of date, must be ignored
        position(date(2024, 4, 2), Some("SEC-1"), Some(dec!(200)), Some(dec!(150)), dec!(30000)),
    ];
    let prices = vec![price("SEC-1", date(2024, 3, 15), dec!(155))];

    let input = HoldingsInput {
        positions: &positions,
        prices: &prices,
        securities: &securities,
    };
    let report = compute_holdings(ACCOUNT_ID, date(2024, 3, 31), &input).unwrap();

    assert_eq!(report.holdings.len(), 1);
    assert_eq!(report.holdings[0].quantity, Some(dec!(100)));
    assert_eq!(report.holdings[0].market_value, dec!(15500));
}
