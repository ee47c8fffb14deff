//! Defaults and well-known names

/// Data file rewritten when no path is given
pub const DEFAULT_SOURCE_PATH: &str = "src/data/personalities.ts";

/// Field after which injected fields are placed
pub const DEFAULT_ANCHOR: &str = "achievements";

/// Name of the default author-name field
pub const AUTHOR_NAME_FIELD: &str = "authorName";

/// Default author name
pub const DEFAULT_AUTHOR_NAME: &str = "Inspire India";

/// Name of the default author-profile field
pub const AUTHOR_LINKEDIN_FIELD: &str = "authorLinkedin";

/// Default author profile URL
pub const DEFAULT_AUTHOR_LINKEDIN: &str = "https://www.linkedin.com/company/inspire-india";

/// Suffix appended to the source path to form its lock file
pub const LOCK_SUFFIX: &str = ".lock";
