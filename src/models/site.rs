//! Heritage registry record types.

/// One row of the heritage-site registry.
///
/// Only the region field is consumed downstream; the site name is carried
/// for logging and exports.
#[derive(Debug, Clone)]
pub struct HeritageSite {
    pub name: String,

    /// Raw region list as spelled in the registry, possibly comma-delimited
    /// (a site can straddle several districts).
    pub regions: String,
}

/// One (site, single-region) pair after expansion.
///
/// Invariant: `region` contains no comma and no surrounding whitespace.
#[derive(Debug, Clone)]
pub struct SiteRegion {
    pub site: String,
    pub region: String,
}
