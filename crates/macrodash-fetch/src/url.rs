//! FRED URL construction.

/// Base URL for the FRED API.
pub const BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Builds the observations URL for a series.
///
/// URL format: `{base}/series/observations?series_id={ID}&api_key={KEY}&file_type=json`
///
/// # Example
///
/// ```
/// use macrodash_fetch::url::{BASE_URL, observations_url};
///
/// let url = observations_url(BASE_URL, "cpiaucsl", "abc123");
/// assert_eq!(
///     url,
///     "https://api.stlouisfed.org/fred/series/observations?series_id=CPIAUCSL&api_key=abc123&file_type=json"
/// );
/// ```
#[must_use]
pub fn observations_url(base_url: &str, series_id: &str, api_key: &str) -> String {
    format!(
        "{}/series/observations?series_id={}&api_key={}&file_type=json",
        base_url.trim_end_matches('/'),
        series_id.to_uppercase(),
        api_key
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observations_url() {
        let url = observations_url(BASE_URL, "GDP", "key");
        assert_eq!(
            url,
            "https://api.stlouisfed.org/fred/series/observations?series_id=GDP&api_key=key&file_type=json"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let url = observations_url("http://localhost:8080/fred/", "unrate", "k");
        assert!(url.starts_with("http://localhost:8080/fred/series/observations?"));
        assert!(url.contains("series_id=UNRATE"));
    }
}
