//! Left join of neighborhood polygons with aggregated sample attributes.

use std::collections::{BTreeMap, BTreeSet};

use sisagua_map_neighborhood_models::{NeighborhoodBoundary, NeighborhoodKey};
use sisagua_map_sample_models::NeighborhoodAttributes;

/// A polygon with the attributes of its neighborhood, if sampled.
#[derive(Debug, Clone)]
pub struct JoinedNeighborhood {
    /// Polygon and its join key.
    pub boundary: NeighborhoodBoundary,
    /// Aggregated attributes, `None` when no sample matched.
    pub attributes: Option<NeighborhoodAttributes>,
}

/// Attaches attributes to every polygon with the same key.
///
/// Every polygon is kept exactly once, in input order. Several polygons
/// may share one neighborhood's attributes.
#[must_use]
pub fn join(
    boundaries: Vec<NeighborhoodBoundary>,
    attributes: &BTreeMap<NeighborhoodKey, NeighborhoodAttributes>,
) -> Vec<JoinedNeighborhood> {
    let mut used = BTreeSet::new();

    let joined: Vec<JoinedNeighborhood> = boundaries
        .into_iter()
        .map(|boundary| {
            let attributes = attributes.get(&boundary.name).cloned();
            if attributes.is_some() {
                used.insert(boundary.name.clone());
            }
            JoinedNeighborhood {
                boundary,
                attributes,
            }
        })
        .collect();

    let matched = joined.iter().filter(|j| j.attributes.is_some()).count();
    log::info!(
        "Joined {} polygons: {matched} with samples, {} without",
        joined.len(),
        joined.len() - matched
    );

    for key in attributes.keys().filter(|key| !used.contains(*key)) {
        log::debug!("Sampled neighborhood {key} matched no polygon");
    }

    let unused = attributes.len() - used.len();
    if unused > 0 {
        log::warn!("{unused} sampled neighborhoods matched no polygon");
    }
    if matched == 0 && !joined.is_empty() && !attributes.is_empty() {
        log::warn!("No polygon matched any sampled neighborhood; check the join columns");
    }

    joined
}
