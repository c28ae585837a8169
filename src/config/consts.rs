// src/config/consts.rs

// Sources
pub const ALLOWED_URLS: &[&str] = &[
    // Community mirror of the accepted guess dictionary
    "https://raw.githubusercontent.com/tabatkins/wordle-list/main/words",
];
pub const USED_SOURCES: &[(&str, &str)] = &[
    ("techradar", "https://www.techradar.com/news/past-wordle-answers"),
    ("wordfinder", "https://wordfinder.yourdictionary.com/wordle/answers/"),
];

// Net config
pub const USER_AGENT: &str = concat!("wordle_data/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 30;

// Reconcile
pub const MIN_CONFIDENCE: usize = 100;

// Output
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const STAGING_EXT: &str = "tmp";
