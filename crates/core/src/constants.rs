/// Decimal precision for money amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Page used when the caller does not ask for one (1-based)
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a listing will return
pub const MAX_PAGE_SIZE: i64 = 100;
