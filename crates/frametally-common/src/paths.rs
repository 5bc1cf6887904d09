//! `/`-segment utilities shared by the log parsers and the merge engine.
//!
//! Segments are counted the way `str::split('/')` yields them, so the empty
//! string before a leading `/` is segment 0. Station log paths carry one
//! fewer mount segment than facility locations, which is why the skip
//! counts below differ.

/// Segments dropped from a Baselight path to form its log key.
pub const BASELIGHT_KEY_SKIP: usize = 2;

/// Segments dropped from a Flame `"{secondary} {path}"` pair to form its log key.
pub const FLAME_KEY_SKIP: usize = 1;

/// Segments dropped from a canonical location to form its match suffix.
pub const LOCATION_SUFFIX_SKIP: usize = 3;

/// Drop the first `count` `/`-delimited segments and rejoin the rest.
///
/// # Examples
///
/// ```
/// use frametally_common::paths::strip_segments;
///
/// assert_eq!(strip_segments("/hpsans13/production/Dune2/reel1", 3), "Dune2/reel1");
/// assert_eq!(strip_segments("/baselightfilesystem1/Dune2/reel1", 2), "Dune2/reel1");
/// assert_eq!(strip_segments("/short", 3), "");
/// ```
pub fn strip_segments(path: &str, count: usize) -> String {
    path.split('/').skip(count).collect::<Vec<_>>().join("/")
}

/// Return the `/`-delimited segment at `index`, if present.
///
/// # Examples
///
/// ```
/// use frametally_common::paths::segment;
///
/// assert_eq!(segment("/hpsans13/production", 1), Some("hpsans13"));
/// assert_eq!(segment("/hpsans13/production", 0), Some(""));
/// assert_eq!(segment("/hpsans13", 4), None);
/// ```
pub fn segment(path: &str, index: usize) -> Option<&str> {
    path.split('/').nth(index)
}
