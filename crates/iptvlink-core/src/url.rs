//! URL helper functions
//!
//! Builds request URLs for the OMDb, TMDB and stalker-portal endpoints.

/// Default OMDb endpoint
pub const OMDB_BASE_URL: &str = "http://www.omdbapi.com/";

/// Default TMDB API root
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default portal `load.php` endpoint
pub const PORTAL_LOAD_URL: &str = "https://ipro4k.rocd.cc/stalker_portal/server/load.php";

/// Appends percent-encoded query parameters to a base URL
///
/// Parameters with empty values are kept (`token=`), since the portal
/// expects the key to be present during the handshake.
///
/// # Example
/// ```
/// use iptvlink_core::url::build_query_url;
/// let url = build_query_url("http://host/api", &[("t", "The Matrix"), ("token", "")]);
/// assert_eq!(url, "http://host/api?t=The%20Matrix&token=");
/// ```
pub fn build_query_url(base: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }

    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}

/// Builds the OMDb title lookup URL
///
/// # Example
/// ```
/// use iptvlink_core::url::build_omdb_url;
/// let url = build_omdb_url("http://www.omdbapi.com/", "k3y", "Dune");
/// assert_eq!(url, "http://www.omdbapi.com/?apikey=k3y&t=Dune");
/// ```
pub fn build_omdb_url(base: &str, api_key: &str, title: &str) -> String {
    build_query_url(base, &[("apikey", api_key), ("t", title)])
}

/// Builds the TMDB weekly trending movies URL
///
/// # Example
/// ```
/// use iptvlink_core::url::build_trending_url;
/// let url = build_trending_url("https://api.themoviedb.org/3", "k3y");
/// assert_eq!(url, "https://api.themoviedb.org/3/trending/movie/week?api_key=k3y");
/// ```
pub fn build_trending_url(base: &str, api_key: &str) -> String {
    let root = base.trim_end_matches('/');
    build_query_url(
        &format!("{}/trending/movie/week", root),
        &[("api_key", api_key)],
    )
}

/// Builds a portal `load.php` request URL from its query parameters
pub fn build_portal_url(load_url: &str, params: &[(&str, &str)]) -> String {
    build_query_url(load_url, params)
}
