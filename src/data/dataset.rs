//! Sample Dataset Module
//! Holds the MyDB sample statistics and exposes the collection table as a DataFrame.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to build collection frame: {0}")]
    Frame(#[from] PolarsError),
    #[error("invalid age distribution parameters")]
    InvalidDistribution,
}

/// Per-collection statistics as reported by the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub doc_count: u32,
    pub storage_bytes: u64,
    pub avg_doc_bytes: u32,
}

/// A labeled count, used for the categorical distributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledCount {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyVolume {
    pub month: String,
    pub orders: u32,
}

/// A health score out of 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetric {
    pub name: String,
    pub score: u32,
}

/// A join relationship between two collections.
///
/// `field` is the short edge label drawn on the charts; `via` is the
/// phrase used in the printed summary ("items array" vs. "items").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub field: String,
    pub via: String,
}

/// A named box on the schema diagram, in 10x10 design-grid units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaBox {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A labeled arrow on the schema diagram, in design-grid units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaArrow {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub label: String,
}

/// A node on the relationship network, on an 8x7 layout grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePosition {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// The full MyDB sample: collection stats plus the categorical
/// distributions and layout data the dashboard panels consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSample {
    pub collections: Vec<CollectionInfo>,
    pub order_statuses: Vec<LabeledCount>,
    pub product_categories: Vec<LabeledCount>,
    pub review_ratings: Vec<LabeledCount>,
    pub monthly_orders: Vec<MonthlyVolume>,
    pub price_ranges: Vec<LabeledCount>,
    pub health_metrics: Vec<HealthMetric>,
    pub schema_boxes: Vec<SchemaBox>,
    pub schema_arrows: Vec<SchemaArrow>,
    pub network_nodes: Vec<NodePosition>,
    pub relationships: Vec<Relationship>,
}

fn counts(pairs: &[(&str, u32)]) -> Vec<LabeledCount> {
    pairs
        .iter()
        .map(|(label, count)| LabeledCount {
            label: label.to_string(),
            count: *count,
        })
        .collect()
}

impl DatabaseSample {
    /// The MyDB snapshot the dashboard renders.
    pub fn mydb() -> Self {
        let names = ["users", "orders", "products", "reviews", "home", "testCollection"];
        let doc_counts = [18u32, 18, 18, 18, 14, 3];
        let storage_bytes = [2514u64, 4477, 2443, 3826, 2324, 928];
        let avg_doc_bytes = [139u32, 248, 135, 212, 166, 309];

        let collections = names
            .iter()
            .zip(doc_counts)
            .zip(storage_bytes)
            .zip(avg_doc_bytes)
            .map(|(((name, doc_count), storage_bytes), avg_doc_bytes)| CollectionInfo {
                name: name.to_string(),
                doc_count,
                storage_bytes,
                avg_doc_bytes,
            })
            .collect();

        Self {
            collections,
            order_statuses: counts(&[
                ("shipped", 8),
                ("pending", 4),
                ("delivered", 4),
                ("cancelled", 2),
            ]),
            product_categories: counts(&[
                ("Electronics", 6),
                ("Furniture", 5),
                ("Books", 4),
                ("Clothing", 3),
            ]),
            review_ratings: counts(&[("1", 1), ("2", 2), ("3", 3), ("4", 7), ("5", 5)]),
            monthly_orders: [
                ("Jan", 12u32),
                ("Feb", 15),
                ("Mar", 18),
                ("Apr", 22),
                ("May", 19),
                ("Jun", 25),
            ]
            .iter()
            .map(|(month, orders)| MonthlyVolume {
                month: month.to_string(),
                orders: *orders,
            })
            .collect(),
            price_ranges: counts(&[
                ("$0-50", 3),
                ("$51-200", 5),
                ("$201-500", 4),
                ("$501-1000", 4),
                ("$1000+", 2),
            ]),
            health_metrics: [
                ("Index Efficiency", 85u32),
                ("Query Performance", 92),
                ("Storage Optimization", 78),
                ("Data Integrity", 95),
            ]
            .iter()
            .map(|(name, score)| HealthMetric {
                name: name.to_string(),
                score: *score,
            })
            .collect(),
            schema_boxes: vec![
                schema_box("Users", 1.0, 8.0),
                schema_box("Orders", 1.0, 6.0),
                schema_box("Products", 6.0, 8.0),
                schema_box("Reviews", 6.0, 6.0),
            ],
            schema_arrows: vec![
                SchemaArrow {
                    x: 3.0,
                    y: 8.75,
                    dx: 2.8,
                    dy: 0.0,
                    label: "orders".to_string(),
                },
                SchemaArrow {
                    x: 3.0,
                    y: 6.75,
                    dx: 2.8,
                    dy: 0.0,
                    label: "reviews".to_string(),
                },
                SchemaArrow {
                    x: 2.0,
                    y: 6.0,
                    dx: 0.0,
                    dy: 1.8,
                    label: "user_email".to_string(),
                },
            ],
            network_nodes: vec![
                node("Users", 2.0, 4.0),
                node("Orders", 4.0, 6.0),
                node("Products", 6.0, 4.0),
                node("Reviews", 4.0, 2.0),
                node("Home", 1.0, 1.0),
                node("TestCollection", 7.0, 1.0),
            ],
            relationships: vec![
                relationship("Users", "Orders", "user_email", "user_email"),
                relationship("Users", "Reviews", "user_email", "user_email"),
                relationship("Products", "Orders", "items", "items array"),
                relationship("Products", "Reviews", "product", "product name"),
            ],
        }
    }

    /// Document count of the `users` collection (size of the age sample).
    pub fn user_document_count(&self) -> usize {
        self.collections
            .iter()
            .find(|c| c.name == "users")
            .map(|c| c.doc_count as usize)
            .unwrap_or(0)
    }

    /// Build the collection table as a DataFrame for aggregation.
    pub fn collections_frame(&self) -> Result<DataFrame, DataError> {
        let names: Vec<String> = self.collections.iter().map(|c| c.name.clone()).collect();
        let doc_counts: Vec<u32> = self.collections.iter().map(|c| c.doc_count).collect();
        let storage: Vec<u64> = self.collections.iter().map(|c| c.storage_bytes).collect();
        let avg_sizes: Vec<u32> = self.collections.iter().map(|c| c.avg_doc_bytes).collect();

        let df = DataFrame::new(vec![
            Column::new("collection".into(), names),
            Column::new("doc_count".into(), doc_counts),
            Column::new("storage_bytes".into(), storage),
            Column::new("avg_doc_bytes".into(), avg_sizes),
        ])?;

        Ok(df)
    }
}

fn schema_box(name: &str, x: f64, y: f64) -> SchemaBox {
    SchemaBox {
        name: name.to_string(),
        x,
        y,
        w: 2.0,
        h: 1.5,
    }
}

fn node(name: &str, x: f64, y: f64) -> NodePosition {
    NodePosition {
        name: name.to_string(),
        x,
        y,
    }
}

fn relationship(from: &str, to: &str, field: &str, via: &str) -> Relationship {
    Relationship {
        from: from.to_string(),
        to: to.to_string(),
        field: field.to_string(),
        via: via.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_six_collections() {
        let sample = DatabaseSample::mydb();
        assert_eq!(sample.collections.len(), 6);
        assert_eq!(sample.collections[0].name, "users");
        assert_eq!(sample.collections[5].doc_count, 3);
    }

    #[test]
    fn user_count_matches_users_collection() {
        let sample = DatabaseSample::mydb();
        assert_eq!(sample.user_document_count(), 18);
    }

    #[test]
    fn frame_has_expected_shape() {
        let sample = DatabaseSample::mydb();
        let df = sample.collections_frame().unwrap();
        assert_eq!(df.height(), 6);
        let cols: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(cols, ["collection", "doc_count", "storage_bytes", "avg_doc_bytes"]);
    }

    #[test]
    fn every_relationship_endpoint_is_a_network_node() {
        let sample = DatabaseSample::mydb();
        for rel in &sample.relationships {
            assert!(sample.network_nodes.iter().any(|n| n.name == rel.from));
            assert!(sample.network_nodes.iter().any(|n| n.name == rel.to));
        }
    }

    #[test]
    fn sample_round_trips_through_json() {
        let sample = DatabaseSample::mydb();
        let json = serde_json::to_string(&sample).unwrap();
        let back: DatabaseSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back.collections.len(), sample.collections.len());
        assert_eq!(back.relationships.len(), sample.relationships.len());
    }
}
