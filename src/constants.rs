/// Column layout of the tour audit spreadsheet export (0-based).
/// Columns not listed here (status flags, computed PVPs, channel ids) are ignored.
pub mod columns {
    // Identity
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const PROVIDER: usize = 2;
    pub const LOCATION: usize = 3;

    // Economics, shared adult
    pub const NET_RATE: usize = 8;
    pub const FACTOR_SHARED: usize = 9;
    pub const PUBLIC_PRICE: usize = 10;

    // Child rates
    pub const NET_CHILD: usize = 11;
    pub const PUBLIC_CHILD: usize = 12;

    // Operational
    pub const INFANT_AGE: usize = 13;
    pub const MIN_PAX_SHARED: usize = 14;
    pub const MIN_PAX_PRIVATE: usize = 15;

    // Private rates
    pub const NET_PRIVATE: usize = 16;
    pub const FACTOR_PRIVATE: usize = 17;
    pub const PUBLIC_PRIVATE: usize = 18;

    pub const LAST_UPDATE: usize = 19;

    // Assets and logistics
    pub const IMAGES: usize = 20;
    pub const DURATION: usize = 21;
    pub const OPS_DAYS: usize = 22;
    pub const CXL_POLICY: usize = 23;
    pub const LANDING_PAGE_URL: usize = 24;
    pub const STORYTELLING: usize = 25;
    pub const MEETING_POINT: usize = 26;
    pub const EXTRA_FEES: usize = 27;

    // Sales channels
    pub const EXPEDIA_STATUS: usize = 31;
    pub const VIATOR_STATUS: usize = 34;
    pub const CIVITATIS_STATUS: usize = 36;

    pub const AUDIT_NOTES: usize = 37;
}

/// Provider used when the supplier column is blank
pub const DEFAULT_PROVIDER: &str = "Por Definir";

/// Prefix for generated names, followed by the tour id
pub const DEFAULT_NAME_PREFIX: &str = "Tour ";

/// Min pax used when the column is not a plain number
pub const DEFAULT_MIN_PAX: u32 = 1;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/tours";
pub const DEFAULT_CSV_PATH: &str = "tours.csv";
pub const DEFAULT_CONFIG_PATH: &str = "tour_importer.toml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header and metadata records at the top of the export; data starts on the fourth.
pub const DEFAULT_HEADER_ROWS: usize = 3;

/// Currency markers stripped before numeric parsing. `US$` must come before `$`.
pub const CURRENCY_SYMBOLS: &[&str] = &["US$", "$", "€", "£", "¥"];

/// Plausible range for net-to-public factors
pub const MIN_FACTOR: f64 = 0.5;
pub const MAX_FACTOR: f64 = 10.0;

/// Failure messages are cut to this many characters in the run log
pub const FAILURE_MESSAGE_LIMIT: usize = 50;

/// Tour names are cut to this many characters in progress lines
pub const PROGRESS_NAME_LIMIT: usize = 50;

/// Status strings sent for channel flags
pub const CHANNEL_ACTIVE: &str = "Active";
pub const CHANNEL_INACTIVE: &str = "Inactive";

/// Default cut-off for white background removal
pub const DEFAULT_WHITE_THRESHOLD: u8 = 200;
