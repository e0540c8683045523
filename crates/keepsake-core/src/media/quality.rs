//! Per-item quality and aesthetic components, shared by member ranking and
//! the composite scorer. Each component is in [0.0, 1.0]; `None` means the
//! item carries no usable inputs for it.

use crate::constants::PHASH_BITS;
use crate::media::MediaItem;

/// Weight of the resolution signal inside the quality component.
const W_RESOLUTION: f64 = 0.4;
/// Weight of the sharpness signal.
const W_SHARPNESS: f64 = 0.4;
/// Weight of the ISO-noise signal.
const W_ISO: f64 = 0.2;

/// ISO at or below this contributes no noise penalty.
const ISO_CLEAN: f64 = 100.0;
/// Doublings of `ISO_CLEAN` at which the noise score reaches zero.
const ISO_STOPS_TO_ZERO: f64 = 6.0;

/// Technical quality of one item: resolution vs. a megapixel baseline,
/// sharpness, and ISO noise, weighted over whichever signals are present.
pub fn quality_component(item: &MediaItem, baseline_megapixels: f64) -> Option<f64> {
    let resolution = item
        .megapixels()
        .map(|mp| (mp / baseline_megapixels.max(f64::EPSILON)).min(1.0));
    let sharpness = item.sharpness.map(|s| s.clamp(0.0, 1.0));
    let iso_noise = item.iso.map(|iso| {
        let stops = (iso as f64 / ISO_CLEAN).max(1.0).log2();
        (1.0 - stops / ISO_STOPS_TO_ZERO).clamp(0.0, 1.0)
    });

    weighted_mean(&[
        (resolution, W_RESOLUTION),
        (sharpness, W_SHARPNESS),
        (iso_noise, W_ISO),
    ])
}

/// Aesthetic quality of one item: brightness balance, contrast, entropy,
/// colorfulness — equal-weight mean over whichever signals are present.
pub fn aesthetic_component(item: &MediaItem) -> Option<f64> {
    let balance = item
        .brightness
        .map(|b| 1.0 - (b.clamp(0.0, 1.0) - 0.5).abs() * 2.0);
    let contrast = item.contrast.map(|c| c.clamp(0.0, 1.0));
    let entropy = item.entropy.map(|e| e.clamp(0.0, 1.0));
    let colorfulness = item.colorfulness.map(|c| c.clamp(0.0, 1.0));

    weighted_mean(&[
        (balance, 1.0),
        (contrast, 1.0),
        (entropy, 1.0),
        (colorfulness, 1.0),
    ])
}

/// Hamming distance between two 64-bit perceptual hashes.
pub fn phash_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Hamming distance normalized to [0.0, 1.0].
pub fn normalized_phash_delta(a: u64, b: u64) -> f64 {
    phash_distance(a, b) as f64 / PHASH_BITS as f64
}

fn weighted_mean(signals: &[(Option<f64>, f64)]) -> Option<f64> {
    let (mut sum, mut weight) = (0.0f64, 0.0f64);
    for (value, w) in signals {
        if let Some(v) = value {
            sum += v * w;
            weight += w;
        }
    }
    if weight < f64::EPSILON {
        None
    } else {
        Some((sum / weight).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::MediaId;

    #[test]
    fn bare_item_has_no_components() {
        let item = MediaItem::bare(MediaId(1));
        assert_eq!(quality_component(&item, 12.0), None);
        assert_eq!(aesthetic_component(&item), None);
    }

    #[test]
    fn full_resolution_sharp_low_iso_scores_high() {
        let mut item = MediaItem::bare(MediaId(1));
        item.width = Some(4000);
        item.height = Some(3000);
        item.sharpness = Some(0.9);
        item.iso = Some(100);
        let q = quality_component(&item, 12.0).unwrap();
        assert!(q > 0.9, "got {q}");
    }

    #[test]
    fn high_iso_drags_quality_down() {
        let mut clean = MediaItem::bare(MediaId(1));
        clean.iso = Some(100);
        let mut noisy = clean.clone();
        noisy.iso = Some(6400);
        let q_clean = quality_component(&clean, 12.0).unwrap();
        let q_noisy = quality_component(&noisy, 12.0).unwrap();
        assert!(q_noisy < q_clean);
    }

    #[test]
    fn midtone_brightness_beats_extremes() {
        let mut mid = MediaItem::bare(MediaId(1));
        mid.brightness = Some(0.5);
        let mut dark = MediaItem::bare(MediaId(2));
        dark.brightness = Some(0.05);
        let a_mid = aesthetic_component(&mid).unwrap();
        let a_dark = aesthetic_component(&dark).unwrap();
        assert!(a_mid > a_dark);
    }

    #[test]
    fn phash_distance_counts_differing_bits() {
        assert_eq!(phash_distance(0, 0), 0);
        assert_eq!(phash_distance(0b1011, 0b0010), 2);
        assert_eq!(phash_distance(u64::MAX, 0), 64);
        assert!((normalized_phash_delta(u64::MAX, 0) - 1.0).abs() < f64::EPSILON);
    }
}
