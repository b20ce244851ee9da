/// Identity column names shared by the forecast and observation exports
pub const SITE_NAME_COLUMN: &str = "Site_Name";
pub const STATION_COLUMN: &str = "Station";
pub const LATITUDE_COLUMN: &str = "Lat";
pub const LONGITUDE_COLUMN: &str = "Lon";
pub const UTC_DATE_COLUMN: &str = "UTC_DATE";
pub const UTC_TIME_COLUMN: &str = "UTC_TIME";
pub const DAILY_AQI_COLUMN: &str = "DAILY_AQI";

/// Column name markers used during schema discovery
pub const TIMESTAMP_MARKER: &str = "UTC";
pub const THREE_HOUR_MARKER: &str = "3HR";
pub const LEGACY_MARKER: &str = "OLD";
pub const AQI_MARKER: &str = "AQI";

/// Model provenance suffix and its shortened form
pub const MODEL_SUFFIX: &str = "_TCNN";
pub const SHORT_MODEL_TAG: &str = "_CNN";

/// Raw cell contents treated as missing values
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// File naming
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";
pub const FORECAST_FILE_STEM: &str = "pred";
pub const OBSERVATION_FILE_STEM: &str = "aqi";
pub const OBSERVATION_SUBDIR: &str = "aqi";
pub const OUTPUT_FILE_SUFFIX: &str = "_forecast.geojson";

/// Station catalog columns
pub const CATALOG_SITE_COLUMN: &str = "sitename";
pub const CATALOG_LATITUDE_COLUMN: &str = "Latitude";
pub const CATALOG_LONGITUDE_COLUMN: &str = "Longitude";
pub const CATALOG_NETWORK_COLUMN: &str = "Forecast";

/// Driver defaults
pub const DEFAULT_WEB_DIR: &str = "/var/www/html/aeronet/data_push/AQI/";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3600;
pub const CONFIG_ENV_PREFIX: &str = "AQI_FORECAST";
