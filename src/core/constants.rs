//! Crawler defaults derived from the national-capitals tour.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Base URI that relative detail-page locators are joined onto.
pub const DEFAULT_BASE_URL: &str = "http://en.wikipedia.org";

/// Index page listing every capital in a sortable table.
pub const DEFAULT_INDEX_URL: &str = "http://en.wikipedia.org/wiki/List_of_national_capitals";

/// How many markers stay on the map at once.
pub const DEFAULT_WINDOW_CAPACITY: usize = 5;

/// Pause after a go-to animation completes before the next detail fetch.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1_000;

/// Per-request timeout for index and detail fetches.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Identifies the crawler to the remote server.
pub const DEFAULT_USER_AGENT: &str = "placemark/0.1.0";

/// Table holding one capital per row on the index page.
pub const DEFAULT_INDEX_TABLE_SELECTOR: &str = "table.wikitable.sortable";

/// Primary heading carrying the place name on a detail page.
pub const DEFAULT_HEADING_SELECTOR: &str = "h1#firstHeading";

/// Geo microformat element whose text is `"<lat>; <lon>"`.
pub const DEFAULT_GEO_SELECTOR: &str = "span.geo";
