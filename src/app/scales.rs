use eframe::egui::Color32;

/// Domain used when no node carries a publication year.
pub(in crate::app) const YEAR_FALLBACK_DOMAIN: (i32, i32) = (2020, 2025);

/// Node radius range in pixels; area, not radius, tracks the weight.
pub(in crate::app) const NODE_RADIUS_RANGE: (f32, f32) = (4.0, 14.0);

/// Fraction of each angular step left as a gap between year sectors.
pub(in crate::app) const SECTOR_PADDING: f32 = 0.1;

const MISSING_YEAR_COLOR: Color32 = Color32::from_gray(136);

pub(in crate::app) fn year_domain(years: impl Iterator<Item = i32>) -> (i32, i32) {
    let mut min = i32::MAX;
    let mut max = i32::MIN;
    for year in years {
        min = min.min(year);
        max = max.max(year);
    }

    if min > max { YEAR_FALLBACK_DOMAIN } else { (min, max) }
}

/// Turbo colormap, polynomial approximation per channel.
fn turbo(t: f32) -> Color32 {
    const RED: [f32; 6] = [
        0.13572138,
        4.61539260,
        -42.66032258,
        132.13108234,
        -152.94239396,
        59.28637943,
    ];
    const GREEN: [f32; 6] = [
        0.09140261,
        2.19418839,
        4.84296658,
        -14.18503333,
        4.27729857,
        2.82956604,
    ];
    const BLUE: [f32; 6] = [
        0.10667330,
        12.64194608,
        -60.58204836,
        110.36276771,
        -89.90310912,
        27.34824973,
    ];

    let t = t.clamp(0.0, 1.0);
    let channel = |coefficients: &[f32; 6]| {
        let mut value = 0.0;
        for &coefficient in coefficients.iter().rev() {
            value = value * t + coefficient;
        }
        ((value.clamp(0.0, 1.0)) * 255.0).round() as u8
    };

    Color32::from_rgb(channel(&RED), channel(&GREEN), channel(&BLUE))
}

/// Continuous year -> color mapping over `domain`; nodes without a year get
/// a fixed neutral gray.
pub(in crate::app) fn year_color(year: Option<i32>, domain: (i32, i32)) -> Color32 {
    let Some(year) = year else {
        return MISSING_YEAR_COLOR;
    };

    let (min, max) = domain;
    let t = if max > min {
        (year - min) as f32 / (max - min) as f32
    } else {
        0.5
    };
    turbo(t)
}

/// Square-root scale from `[0, max(1, max_weight)]` to the pixel radius
/// range; a missing weight is treated as 0.
pub(in crate::app) fn weight_radius(weight: u64, max_weight: u64) -> f32 {
    let (min_radius, max_radius) = NODE_RADIUS_RANGE;
    let domain_max = max_weight.max(1) as f32;
    let t = (weight as f32 / domain_max).clamp(0.0, 1.0).sqrt();
    min_radius + (max_radius - min_radius) * t
}

/// Evenly partitioned angular sectors over the full circle, one per distinct
/// group value, with a fixed inner gap between neighbors. Returns
/// `(start_angle, span)` per sector in group order.
pub(in crate::app) fn year_sectors(count: usize) -> Vec<(f32, f32)> {
    if count == 0 {
        return Vec::new();
    }

    let step = std::f32::consts::TAU / (count as f32 - SECTOR_PADDING).max(1.0);
    let span = step * (1.0 - SECTOR_PADDING);
    (0..count).map(|index| (index as f32 * step, span)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_domain_falls_back_when_empty() {
        assert_eq!(year_domain(std::iter::empty()), YEAR_FALLBACK_DOMAIN);
        assert_eq!(year_domain([2021, 2018, 2024].into_iter()), (2018, 2024));
    }

    #[test]
    fn weight_radius_spans_configured_range() {
        assert_eq!(weight_radius(0, 250), NODE_RADIUS_RANGE.0);
        assert_eq!(weight_radius(250, 250), NODE_RADIUS_RANGE.1);

        // An all-zero weight set degenerates to the minimum radius.
        assert_eq!(weight_radius(0, 0), NODE_RADIUS_RANGE.0);
    }

    #[test]
    fn weight_radius_is_linear_in_area() {
        let quarter = weight_radius(25, 100) - NODE_RADIUS_RANGE.0;
        let full = weight_radius(100, 100) - NODE_RADIUS_RANGE.0;
        assert!((quarter * 2.0 - full).abs() < 1e-4);
    }

    #[test]
    fn missing_year_maps_to_neutral_gray() {
        let color = year_color(None, (2018, 2024));
        assert_eq!(color, Color32::from_gray(136));
    }

    #[test]
    fn year_color_varies_across_domain() {
        let low = year_color(Some(2018), (2018, 2024));
        let high = year_color(Some(2024), (2018, 2024));
        assert_ne!(low, high);

        // Degenerate domain still yields a defined in-range color.
        let mid = year_color(Some(2020), (2020, 2020));
        assert_ne!(mid, Color32::from_gray(136));
    }

    #[test]
    fn year_sectors_partition_the_circle_with_padding() {
        let sectors = year_sectors(4);
        assert_eq!(sectors.len(), 4);

        let step = std::f32::consts::TAU / (4.0 - SECTOR_PADDING);
        for (index, &(start, span)) in sectors.iter().enumerate() {
            assert!((start - index as f32 * step).abs() < 1e-5);
            assert!((span - step * (1.0 - SECTOR_PADDING)).abs() < 1e-5);
        }

        // The last sector plus its gap closes the circle.
        let (last_start, _) = sectors[3];
        assert!(last_start + step <= std::f32::consts::TAU + 1e-4);
    }

    #[test]
    fn single_sector_spans_most_of_the_circle() {
        let sectors = year_sectors(1);
        assert_eq!(sectors.len(), 1);
        let (start, span) = sectors[0];
        assert_eq!(start, 0.0);
        assert!(span < std::f32::consts::TAU);
        assert!(span > std::f32::consts::TAU * 0.8);
    }
}
