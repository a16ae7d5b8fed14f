use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for calculation results
pub const DECIMAL_PRECISION: u32 = 6;

/// Default tolerance for the AUM identity check (one cent)
pub const IDENTITY_TOLERANCE: Decimal = dec!(0.01);

/// Tolerance for allocation closure (percentage points)
pub const ALLOCATION_TOLERANCE: Decimal = dec!(0.01);

/// Trading-day annualization convention
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Calendar-day annualization convention
pub const CALENDAR_DAYS_PER_YEAR: u32 = 365;

/// sqrt(252), fallback when Decimal::sqrt is unavailable
pub const SQRT_TRADING_DAYS_APPROX: Decimal = dec!(15.874507866);

/// sqrt(365), fallback for the calendar-day convention
pub const SQRT_CALENDAR_DAYS_APPROX: Decimal = dec!(19.104973174);

/// Window, in days, within which a price counts as "nearby" a transaction
/// date for the position-completeness check
pub const NEARBY_PRICE_WINDOW_DAYS: i64 = 7;
