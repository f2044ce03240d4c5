//! Static Dashboard Renderer
//! Renders the 3x4 MyDB overview dashboard as a single PNG.
//!
//! Layout (row major):
//! 1. Document count bars      2. Storage pie        3. Avg doc size bars  4. Schema diagram
//! 5. Order status pie         6. Category bars (h)  7. Age histogram      8. Rating bars
//! 9. Monthly trend (area)    10. Price range bars  11. Doc count bars (h) 12. Health bars

use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::palette;
use crate::data::DatabaseSample;
use crate::stats::{HealthBand, SummaryCalculator};

/// Output bitmap dimensions in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
}

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Fraction of a unit slot covered by a bar.
const BAR_HALF_WIDTH: f64 = 0.35;
/// Headroom multiplier above the tallest bar.
const HEADROOM: f64 = 1.2;

/// Renders the dashboard figure.
pub struct DashboardRenderer {
    config: RenderConfig,
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self {
            config: RenderConfig {
                width: 2000,
                height: 1500,
            },
        }
    }
}

impl DashboardRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render all twelve panels into `path`.
    pub fn render(&self, sample: &DatabaseSample, ages: &[f64], path: &Path) -> Result<()> {
        debug!(path = %path.display(), "rendering dashboard");

        let root = BitMapBackend::new(path, (self.config.width, self.config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let body = root.titled(
            "MyDB Database Visualization Dashboard",
            ("sans-serif", 44).into_font().color(&BLACK),
        )?;
        let cells = body.split_evenly((3, 4));

        Self::document_count_panel(&cells[0], sample)?;
        Self::storage_pie_panel(&cells[1], sample)?;
        Self::avg_size_panel(&cells[2], sample)?;
        Self::schema_panel(&cells[3], sample)?;
        Self::order_status_panel(&cells[4], sample)?;
        Self::category_panel(&cells[5], sample)?;
        Self::age_histogram_panel(&cells[6], ages)?;
        Self::rating_panel(&cells[7], sample)?;
        Self::monthly_trend_panel(&cells[8], sample)?;
        Self::price_range_panel(&cells[9], sample)?;
        Self::collection_size_panel(&cells[10], sample)?;
        Self::health_panel(&cells[11], sample)?;

        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "dashboard written");
        Ok(())
    }

    fn document_count_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let labels: Vec<String> = sample.collections.iter().map(|c| c.name.clone()).collect();
        let values: Vec<f64> = sample
            .collections
            .iter()
            .map(|c| f64::from(c.doc_count))
            .collect();
        let fills: Vec<ShapeStyle> = (0..values.len())
            .map(|i| palette::pastel(i).filled())
            .collect();
        let value_labels = sample
            .collections
            .iter()
            .map(|c| c.doc_count.to_string())
            .collect();

        Self::vertical_bars(
            area,
            &BarPanel {
                title: "Document Count by Collection",
                x_desc: "",
                y_desc: "Number of Documents",
                labels,
                values,
                fills,
                outline: None,
                y_max: None,
                value_labels: Some(value_labels),
            },
        )
    }

    fn storage_pie_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let sizes = SummaryCalculator::storage_kb(&sample.collections);
        let labels: Vec<String> = sample.collections.iter().map(|c| c.name.clone()).collect();
        let colors: Vec<RGBColor> = (0..sizes.len()).map(palette::pastel).collect();
        Self::pie(area, "Storage Distribution (KB)", &sizes, &colors, &labels, true)
    }

    fn avg_size_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let labels: Vec<String> = sample.collections.iter().map(|c| c.name.clone()).collect();
        let values: Vec<f64> = sample
            .collections
            .iter()
            .map(|c| f64::from(c.avg_doc_bytes))
            .collect();
        let fills: Vec<ShapeStyle> = (0..values.len())
            .map(|i| palette::pastel(i).filled())
            .collect();

        Self::vertical_bars(
            area,
            &BarPanel {
                title: "Average Document Size (bytes)",
                x_desc: "",
                y_desc: "Bytes",
                labels,
                values,
                fills,
                outline: None,
                y_max: None,
                value_labels: None,
            },
        )
    }

    /// Schematic box-and-arrow view of the core collections. Drawn in raw
    /// pixel coordinates on a 10x10 design grid, no axes.
    fn schema_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let area = area.titled(
            "Data Relationships",
            ("sans-serif", 18).into_font().color(&BLACK),
        )?;
        let (w, h) = area.dim_in_pixel();
        let to_px = |x: f64| (x / 10.0 * f64::from(w)) as i32;
        let to_py = |y: f64| ((1.0 - y / 10.0) * f64::from(h)) as i32;

        for b in &sample.schema_boxes {
            let corners = [
                (to_px(b.x), to_py(b.y + b.h)),
                (to_px(b.x + b.w), to_py(b.y)),
            ];
            area.draw(&Rectangle::new(corners, palette::NODE_FILL.mix(0.7).filled()))?;
            area.draw(&Rectangle::new(corners, palette::NODE_EDGE.stroke_width(2)))?;
            area.draw(&Text::new(
                b.name.clone(),
                (
                    (corners[0].0 + corners[1].0) / 2,
                    (corners[0].1 + corners[1].1) / 2,
                ),
                centered(("sans-serif", 15).into_font().color(&BLACK)),
            ))?;
        }

        for (i, arrow) in sample.schema_arrows.iter().enumerate() {
            let color = palette::accent(i);
            let tail = (to_px(arrow.x), to_py(arrow.y));
            let head = (to_px(arrow.x + arrow.dx), to_py(arrow.y + arrow.dy));
            area.draw(&PathElement::new(vec![tail, head], color.stroke_width(2)))?;
            Self::arrow_head(&area, tail, head, color)?;

            let mid = ((tail.0 + head.0) / 2, (tail.1 + head.1) / 2);
            if arrow.dy.abs() > arrow.dx.abs() {
                // Vertical arrow: rotated label to its left, reading upward.
                area.draw(&Text::new(
                    arrow.label.clone(),
                    (mid.0 - 18, mid.1 + 20),
                    ("sans-serif", 13)
                        .into_font()
                        .transform(FontTransform::Rotate270)
                        .color(&color),
                ))?;
            } else {
                area.draw(&Text::new(
                    arrow.label.clone(),
                    (mid.0, mid.1 - 8),
                    above(("sans-serif", 13).into_font().color(&color)),
                ))?;
            }
        }

        Ok(())
    }

    fn arrow_head(area: &Panel<'_>, tail: (i32, i32), head: (i32, i32), color: RGBColor) -> Result<()> {
        let (dx, dy) = (f64::from(head.0 - tail.0), f64::from(head.1 - tail.1));
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1.0 {
            return Ok(());
        }
        let (ux, uy) = (dx / len, dy / len);
        let (nx, ny) = (-uy, ux);
        let base = (f64::from(head.0) - ux * 10.0, f64::from(head.1) - uy * 10.0);

        area.draw(&Polygon::new(
            vec![
                head,
                ((base.0 + nx * 5.0) as i32, (base.1 + ny * 5.0) as i32),
                ((base.0 - nx * 5.0) as i32, (base.1 - ny * 5.0) as i32),
            ],
            color.filled(),
        ))?;
        Ok(())
    }

    fn order_status_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let sizes: Vec<f64> = sample
            .order_statuses
            .iter()
            .map(|s| f64::from(s.count))
            .collect();
        // Counts are folded into the labels; no percentage annotation here.
        let labels: Vec<String> = sample
            .order_statuses
            .iter()
            .map(|s| format!("{} ({})", s.label, s.count))
            .collect();
        let colors: Vec<RGBColor> = (0..sizes.len()).map(palette::vivid).collect();
        Self::pie(area, "Order Status Distribution", &sizes, &colors, &labels, false)
    }

    fn category_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let labels: Vec<String> = sample
            .product_categories
            .iter()
            .map(|c| c.label.clone())
            .collect();
        let values: Vec<f64> = sample
            .product_categories
            .iter()
            .map(|c| f64::from(c.count))
            .collect();
        let fills: Vec<ShapeStyle> = (0..values.len())
            .map(|i| palette::category(i).filled())
            .collect();

        Self::horizontal_bars(area, "Products by Category", "Number of Products", &labels, &values, &fills)
    }

    fn age_histogram_panel(area: &Panel<'_>, ages: &[f64]) -> Result<()> {
        let bins = SummaryCalculator::bin(ages, 6)?;
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return Ok(());
        };
        let y_max = f64::from(bins.iter().map(|b| b.count).max().unwrap_or(1)) * HEADROOM;

        let mut chart = ChartBuilder::on(area)
            .caption("User Age Distribution", ("sans-serif", 18))
            .margin(8)
            .set_label_area_size(LabelAreaPosition::Left, 48)
            .set_label_area_size(LabelAreaPosition::Bottom, 36)
            .build_cartesian_2d(first.lower..last.upper, 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Age")
            .y_desc("Number of Users")
            .label_style(("sans-serif", 13))
            .axis_desc_style(("sans-serif", 14))
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new(
                [(b.lower, 0.0), (b.upper, f64::from(b.count))],
                palette::SKY_BLUE.mix(0.7).filled(),
            )
        }))?;
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new(
                [(b.lower, 0.0), (b.upper, f64::from(b.count))],
                BLACK.stroke_width(1),
            )
        }))?;

        Ok(())
    }

    fn rating_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let labels: Vec<String> = sample
            .review_ratings
            .iter()
            .map(|r| r.label.clone())
            .collect();
        let values: Vec<f64> = sample
            .review_ratings
            .iter()
            .map(|r| f64::from(r.count))
            .collect();
        let fills = vec![palette::GOLD.mix(0.8).filled(); values.len()];

        Self::vertical_bars(
            area,
            &BarPanel {
                title: "Product Review Ratings",
                x_desc: "Rating (1-5 stars)",
                y_desc: "Number of Reviews",
                labels,
                values,
                fills,
                outline: Some(palette::ORANGE.stroke_width(1)),
                y_max: None,
                value_labels: None,
            },
        )
    }

    fn monthly_trend_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let months = &sample.monthly_orders;
        let labels: Vec<String> = months.iter().map(|m| m.month.clone()).collect();
        let y_max = f64::from(months.iter().map(|m| m.orders).max().unwrap_or(1)) * HEADROOM;
        let points: Vec<(f64, f64)> = months
            .iter()
            .enumerate()
            .map(|(i, m)| (i as f64, f64::from(m.orders)))
            .collect();

        let mut chart = ChartBuilder::on(area)
            .caption("Monthly Order Trend", ("sans-serif", 18))
            .margin(8)
            .set_label_area_size(LabelAreaPosition::Left, 48)
            .set_label_area_size(LabelAreaPosition::Bottom, 36)
            .build_cartesian_2d(-0.5f64..(months.len() as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Number of Orders")
            .x_labels(months.len())
            .x_label_formatter(&|x| index_label(&labels, *x))
            .label_style(("sans-serif", 13))
            .axis_desc_style(("sans-serif", 14))
            .draw()?;

        chart.draw_series(
            AreaSeries::new(points.iter().copied(), 0.0, palette::TREND_PURPLE.mix(0.3).filled())
                .border_style(palette::TREND_PURPLE.stroke_width(3)),
        )?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, palette::TREND_PURPLE.filled())),
        )?;

        Ok(())
    }

    fn price_range_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let labels: Vec<String> = sample.price_ranges.iter().map(|p| p.label.clone()).collect();
        let values: Vec<f64> = sample
            .price_ranges
            .iter()
            .map(|p| f64::from(p.count))
            .collect();
        let fills = vec![palette::LIGHT_CORAL.mix(0.8).filled(); values.len()];

        Self::vertical_bars(
            area,
            &BarPanel {
                title: "Product Price Ranges",
                x_desc: "",
                y_desc: "Number of Products",
                labels,
                values,
                fills,
                outline: None,
                y_max: None,
                value_labels: None,
            },
        )
    }

    fn collection_size_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let labels: Vec<String> = sample.collections.iter().map(|c| c.name.clone()).collect();
        let values: Vec<f64> = sample
            .collections
            .iter()
            .map(|c| f64::from(c.doc_count))
            .collect();
        let fills: Vec<ShapeStyle> = (0..values.len())
            .map(|i| palette::pastel(i).mix(0.8).filled())
            .collect();

        Self::horizontal_bars(area, "Collection Size Comparison", "Document Count", &labels, &values, &fills)
    }

    fn health_panel(area: &Panel<'_>, sample: &DatabaseSample) -> Result<()> {
        let labels: Vec<String> = sample.health_metrics.iter().map(|m| m.name.clone()).collect();
        let values: Vec<f64> = sample
            .health_metrics
            .iter()
            .map(|m| f64::from(m.score))
            .collect();
        let fills: Vec<ShapeStyle> = sample
            .health_metrics
            .iter()
            .map(|m| palette::health(HealthBand::classify(m.score)).mix(0.7).filled())
            .collect();
        let value_labels = sample
            .health_metrics
            .iter()
            .map(|m| format!("{}%", m.score))
            .collect();

        Self::vertical_bars(
            area,
            &BarPanel {
                title: "Database Health Metrics",
                x_desc: "",
                y_desc: "Score (%)",
                labels,
                values,
                fills,
                outline: None,
                y_max: Some(100.0),
                value_labels: Some(value_labels),
            },
        )
    }

    fn vertical_bars(area: &Panel<'_>, panel: &BarPanel<'_>) -> Result<()> {
        let n = panel.values.len();
        let y_max = panel.y_max.unwrap_or_else(|| {
            panel.values.iter().copied().fold(0.0f64, f64::max) * HEADROOM
        });

        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, ("sans-serif", 18))
            .margin(8)
            .set_label_area_size(LabelAreaPosition::Left, 48)
            .set_label_area_size(LabelAreaPosition::Bottom, 36)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(panel.x_desc)
            .y_desc(panel.y_desc)
            .x_labels(n)
            .x_label_formatter(&|x| index_label(&panel.labels, *x))
            .label_style(("sans-serif", 13))
            .axis_desc_style(("sans-serif", 14))
            .draw()?;

        chart.draw_series(panel.values.iter().enumerate().map(|(i, &v)| {
            Rectangle::new(
                [(i as f64 - BAR_HALF_WIDTH, 0.0), (i as f64 + BAR_HALF_WIDTH, v)],
                panel.fills[i % panel.fills.len()],
            )
        }))?;

        if let Some(outline) = panel.outline {
            chart.draw_series(panel.values.iter().enumerate().map(|(i, &v)| {
                Rectangle::new(
                    [(i as f64 - BAR_HALF_WIDTH, 0.0), (i as f64 + BAR_HALF_WIDTH, v)],
                    outline,
                )
            }))?;
        }

        if let Some(value_labels) = &panel.value_labels {
            chart.draw_series(panel.values.iter().zip(value_labels).enumerate().map(
                |(i, (&v, label))| {
                    Text::new(
                        label.clone(),
                        (i as f64, v + y_max * 0.015),
                        above(("sans-serif", 13).into_font().color(&BLACK)),
                    )
                },
            ))?;
        }

        Ok(())
    }

    fn horizontal_bars(
        area: &Panel<'_>,
        title: &str,
        x_desc: &str,
        labels: &[String],
        values: &[f64],
        fills: &[ShapeStyle],
    ) -> Result<()> {
        let n = values.len();
        let x_max = values.iter().copied().fold(0.0f64, f64::max) * HEADROOM;

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 18))
            .margin(8)
            .set_label_area_size(LabelAreaPosition::Left, 96)
            .set_label_area_size(LabelAreaPosition::Bottom, 36)
            .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(x_desc)
            .y_labels(n)
            .y_label_formatter(&|y| index_label(labels, *y))
            .label_style(("sans-serif", 13))
            .axis_desc_style(("sans-serif", 14))
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
            Rectangle::new(
                [(0.0, i as f64 - BAR_HALF_WIDTH), (v, i as f64 + BAR_HALF_WIDTH)],
                fills[i % fills.len()],
            )
        }))?;

        Ok(())
    }

    fn pie(
        area: &Panel<'_>,
        title: &str,
        sizes: &[f64],
        colors: &[RGBColor],
        labels: &[String],
        percentages: bool,
    ) -> Result<()> {
        let area = area.titled(title, ("sans-serif", 18).into_font().color(&BLACK))?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.30;

        let mut pie = Pie::new(&center, &radius, sizes, colors, labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 13).into_font().color(&BLACK));
        if percentages {
            pie.percentages(("sans-serif", 12).into_font().color(&BLACK));
        }
        area.draw(&pie)?;
        Ok(())
    }
}

/// Bar/axis description for the shared vertical bar panel.
struct BarPanel<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    labels: Vec<String>,
    values: Vec<f64>,
    fills: Vec<ShapeStyle>,
    outline: Option<ShapeStyle>,
    y_max: Option<f64>,
    value_labels: Option<Vec<String>>,
}

/// Map an axis position back to its slot label. Positions between slots
/// produce no label.
fn index_label(labels: &[String], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 0.3 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

fn centered(style: TextStyle<'_>) -> TextStyle<'_> {
    style.pos(Pos::new(HPos::Center, VPos::Center))
}

fn above(style: TextStyle<'_>) -> TextStyle<'_> {
    style.pos(Pos::new(HPos::Center, VPos::Bottom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_user_ages, DatabaseSample, AGE_SEED};
    use tempfile::TempDir;

    #[test]
    fn index_label_snaps_to_slots() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(index_label(&labels, 0.0), "a");
        assert_eq!(index_label(&labels, 1.1), "b");
        assert_eq!(index_label(&labels, 0.5), "");
        assert_eq!(index_label(&labels, 5.0), "");
        assert_eq!(index_label(&labels, -1.0), "");
    }

    #[test]
    fn renders_dashboard_png() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dashboard.png");
        let sample = DatabaseSample::mydb();
        let ages = sample_user_ages(sample.user_document_count(), AGE_SEED).unwrap();

        DashboardRenderer::default()
            .render(&sample, &ages, &path)
            .unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (2000, 1500));
    }
}
