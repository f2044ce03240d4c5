//! Chart Palette Module
//! Fixed colors shared by the dashboard panels and the network figure.

use plotters::style::RGBColor;

use crate::stats::HealthBand;

/// Pastel cycle for per-collection series.
pub const PASTEL: [RGBColor; 8] = [
    RGBColor(141, 211, 199),
    RGBColor(255, 255, 179),
    RGBColor(190, 186, 218),
    RGBColor(251, 128, 114),
    RGBColor(128, 177, 211),
    RGBColor(253, 180, 98),
    RGBColor(179, 222, 105),
    RGBColor(252, 205, 229),
];

/// Vivid cycle for the categorical pies.
pub const VIVID: [RGBColor; 10] = [
    RGBColor(231, 76, 60),   // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(255, 87, 34),   // Deep Orange
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

/// Fixed palette for the product category bars.
pub const CATEGORY: [RGBColor; 4] = [
    RGBColor(255, 107, 107),
    RGBColor(78, 205, 196),
    RGBColor(69, 183, 209),
    RGBColor(150, 206, 180),
];

/// Accent cycle for the schema diagram arrows.
pub const ACCENT: [RGBColor; 3] = [
    RGBColor(220, 20, 20),
    RGBColor(0, 140, 60),
    RGBColor(30, 60, 220),
];

pub const GOLD: RGBColor = RGBColor(255, 215, 0);
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const LIGHT_CORAL: RGBColor = RGBColor(240, 128, 128);
pub const TREND_PURPLE: RGBColor = RGBColor(128, 0, 128);

pub const NODE_FILL: RGBColor = RGBColor(173, 216, 230);
pub const NODE_EDGE: RGBColor = RGBColor(0, 0, 128);
pub const LINK: RGBColor = RGBColor(222, 45, 38);

pub const HEALTH_GOOD: RGBColor = RGBColor(0, 140, 60);
pub const HEALTH_WATCH: RGBColor = RGBColor(255, 165, 0);
pub const HEALTH_POOR: RGBColor = RGBColor(211, 47, 47);

pub fn pastel(idx: usize) -> RGBColor {
    PASTEL[idx % PASTEL.len()]
}

pub fn vivid(idx: usize) -> RGBColor {
    VIVID[idx % VIVID.len()]
}

pub fn category(idx: usize) -> RGBColor {
    CATEGORY[idx % CATEGORY.len()]
}

pub fn accent(idx: usize) -> RGBColor {
    ACCENT[idx % ACCENT.len()]
}

pub fn health(band: HealthBand) -> RGBColor {
    match band {
        HealthBand::Good => HEALTH_GOOD,
        HealthBand::Watch => HEALTH_WATCH,
        HealthBand::Poor => HEALTH_POOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_wrap_around() {
        assert_eq!(pastel(0), pastel(PASTEL.len()));
        assert_eq!(vivid(3), vivid(VIVID.len() + 3));
        assert_eq!(category(1), category(CATEGORY.len() + 1));
    }

    #[test]
    fn health_bands_map_to_distinct_colors() {
        assert_ne!(health(HealthBand::Good), health(HealthBand::Watch));
        assert_ne!(health(HealthBand::Watch), health(HealthBand::Poor));
    }
}
