/// Default API base URL when running on the host machine
pub const DESKTOP_BASE_URL: &str = "http://localhost:5052/api/v1";

/// Default API base URL from inside the Android emulator (host loopback alias)
pub const EMULATOR_BASE_URL: &str = "http://10.0.2.2:5052/api/v1";

/// Per-request network timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default catalog page size
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Bounds of the quantity picker when adding a product to the cart
pub const MIN_ADD_QUANTITY: i64 = 1;
pub const MAX_ADD_QUANTITY: i64 = 99;

/// File name of the local database inside the platform data directory
pub const DB_FILE_NAME: &str = "store.db";

/// Status given to freshly placed orders
pub const ORDER_STATUS_PENDING: &str = "pending";
