//! Include/exclude match criteria.

/// Substring-based match criteria, evaluated case-insensitively against the
/// full path.
///
/// A path matches when it is clean of every exclude substring OR any include
/// substring occurs in it. The asymmetry is deliberate and preserved from
/// the engine this reimplements: an empty exclude list is vacuously clean,
/// so a default configuration marks every path a match, while an empty
/// include list never hits anything.
#[derive(Debug, Clone, Default)]
pub struct MatchCriteria {
    exclude: Vec<String>,
    include: Vec<String>,
}

impl MatchCriteria {
    /// Build criteria from the configured lists. Criteria are lowercased
    /// once here so evaluation only lowercases the candidate path.
    pub fn new(exclude: &[String], include: &[String]) -> Self {
        Self {
            exclude: exclude.iter().map(|c| c.to_lowercase()).collect(),
            include: include.iter().map(|c| c.to_lowercase()).collect(),
        }
    }

    /// Evaluate a path: `excludes_clean OR includes_hit`.
    pub fn evaluate(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        let excludes_clean = self.exclude.iter().all(|c| !path.contains(c));
        let includes_hit = self.include.iter().any(|c| path.contains(c));
        excludes_clean || includes_hit
    }
}
