use keepsake_core::draft::{ClusterDraft, GeoPoint};

use crate::formula::ScoreContext;

/// Weight of spatial compactness.
const W_COMPACTNESS: f64 = 0.6;
/// Weight of GPS coverage.
const W_COVERAGE: f64 = 0.4;
/// Mean centroid distance (km) at which compactness halves.
const COMPACT_HALFWAY_KM: f64 = 5.0;

/// Location component: spatial compactness around the centroid plus GPS
/// coverage. No member GPS at all → 0.0.
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let items = ctx.member_items(draft);
    if items.is_empty() {
        return 0.0;
    }
    let n = items.len() as f64;

    let points: Vec<GeoPoint> = items.iter().filter_map(|m| m.location).collect();
    if points.is_empty() {
        return 0.0;
    }
    let coverage = points.len() as f64 / n;

    let centroid = draft.effective_centroid().unwrap_or_else(|| {
        let lat = points.iter().map(|p| p.lat).sum::<f64>() / points.len() as f64;
        let lon = points.iter().map(|p| p.lon).sum::<f64>() / points.len() as f64;
        GeoPoint::new(lat, lon)
    });

    let mean_km = points
        .iter()
        .map(|p| p.distance_m(centroid))
        .sum::<f64>()
        / points.len() as f64
        / 1000.0;
    let compactness = 1.0 / (1.0 + mean_km / COMPACT_HALFWAY_KM);

    (W_COMPACTNESS * compactness + W_COVERAGE * coverage).clamp(0.0, 1.0)
}
