//! Relationship Network Renderer
//! Renders the node-link view of the collection relationships as a PNG.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use super::dashboard::RenderConfig;
use super::palette;
use crate::data::DatabaseSample;

/// Node layout grid dimensions (matches the fixed node positions).
const GRID_W: f64 = 8.0;
const GRID_H: f64 = 7.0;
const MARGIN_PX: f64 = 48.0;

/// Renders the relationship network figure.
pub struct NetworkRenderer {
    config: RenderConfig,
}

impl Default for NetworkRenderer {
    fn default() -> Self {
        Self {
            config: RenderConfig {
                width: 1200,
                height: 800,
            },
        }
    }
}

impl NetworkRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, sample: &DatabaseSample, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "rendering network graph");

        let root = BitMapBackend::new(path, (self.config.width, self.config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let body = root.titled(
            "MyDB Data Relationship Network",
            ("sans-serif", 32).into_font().color(&BLACK),
        )?;
        let (w, h) = body.dim_in_pixel();
        let step_x = (f64::from(w) - 2.0 * MARGIN_PX) / GRID_W;
        let step_y = (f64::from(h) - 2.0 * MARGIN_PX) / GRID_H;
        let to_px = |x: f64| (MARGIN_PX + x * step_x) as i32;
        let to_py = |y: f64| (f64::from(h) - MARGIN_PX - y * step_y) as i32;

        let node_at = |name: &str| {
            sample
                .network_nodes
                .iter()
                .find(|n| n.name == name)
                .map(|n| (to_px(n.x), to_py(n.y)))
        };

        // Edges first so the nodes cover the line ends.
        for rel in &sample.relationships {
            let (Some(a), Some(b)) = (node_at(&rel.from), node_at(&rel.to)) else {
                continue;
            };
            body.draw(&PathElement::new(
                vec![a, b],
                palette::LINK.mix(0.7).stroke_width(3),
            ))?;

            let mid = ((a.0 + b.0) / 2, (a.1 + b.1) / 2);
            let half_w = rel.field.len() as i32 * 4 + 6;
            body.draw(&Rectangle::new(
                [(mid.0 - half_w, mid.1 - 10), (mid.0 + half_w, mid.1 + 10)],
                WHITE.mix(0.85).filled(),
            ))?;
            body.draw(&Text::new(
                rel.field.clone(),
                mid,
                centered(("sans-serif", 14).into_font().color(&BLACK)),
            ))?;
        }

        let node_radius = (0.5 * step_x.min(step_y)) as i32;
        for node in &sample.network_nodes {
            let center = (to_px(node.x), to_py(node.y));
            body.draw(&Circle::new(center, node_radius, palette::NODE_FILL.filled()))?;
            body.draw(&Circle::new(
                center,
                node_radius,
                palette::NODE_EDGE.stroke_width(2),
            ))?;
            body.draw(&Text::new(
                node.name.clone(),
                center,
                centered(("sans-serif", 15).into_font().color(&BLACK)),
            ))?;
        }

        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "network graph written");
        Ok(())
    }
}

fn centered(style: TextStyle<'_>) -> TextStyle<'_> {
    style.pos(Pos::new(HPos::Center, VPos::Center))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatabaseSample;
    use tempfile::TempDir;

    #[test]
    fn renders_network_png() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("network.png");
        let sample = DatabaseSample::mydb();

        NetworkRenderer::default().render(&sample, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (1200, 800));
    }

    #[test]
    fn renders_with_no_relationships() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sparse.png");
        let mut sample = DatabaseSample::mydb();
        sample.relationships.clear();

        NetworkRenderer::default().render(&sample, &path).unwrap();
        assert!(path.exists());
    }
}
