//! Seeded marketplace catalog and listing filters.
//!
//! The marketplace lists a curated set of batches until indexing minted
//! tokens off chain is wired up; filters run client-side over this set.

use chrono::NaiveDate;
use shared::dto::{BatchTimeline, Product};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid catalog date")
}

/// The curated batch listing shown on the marketplace page.
pub fn seeded_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Batch Arabica Kintamani #A1".to_string(),
            origin: "Kintamani, Bali".to_string(),
            process: "Natural".to_string(),
            notes: "Fruity, Citrus, Caramel".to_string(),
            price_eth: 0.015,
            quantity: 120,
            timeline: BatchTimeline {
                harvested: date(2024, 7, 12),
                roasted: date(2024, 7, 20),
                packed: date(2024, 7, 22),
            },
            image: "https://source.unsplash.com/200x200/?coffee,beans".to_string(),
        },
        Product {
            id: 2,
            name: "Batch Robusta Temanggung #R7".to_string(),
            origin: "Temanggung, Central Java".to_string(),
            process: "Washed".to_string(),
            notes: "Bold, Nutty, Dark Chocolate".to_string(),
            price_eth: 0.010,
            quantity: 200,
            timeline: BatchTimeline {
                harvested: date(2024, 8, 1),
                roasted: date(2024, 8, 5),
                packed: date(2024, 8, 6),
            },
            image: "https://source.unsplash.com/200x200/?coffee,robusta".to_string(),
        },
        Product {
            id: 3,
            name: "Batch Liberica Jambi #L3".to_string(),
            origin: "Jambi, Sumatra".to_string(),
            process: "Honey Process".to_string(),
            notes: "Floral, Herbal, Sweet Finish".to_string(),
            price_eth: 0.022,
            quantity: 90,
            timeline: BatchTimeline {
                harvested: date(2024, 6, 18),
                roasted: date(2024, 6, 26),
                packed: date(2024, 6, 27),
            },
            image: "https://source.unsplash.com/200x200/?coffee,liberica".to_string(),
        },
        Product {
            id: 4,
            name: "Batch Excelsa Sulawesi #EX9".to_string(),
            origin: "South Sulawesi".to_string(),
            process: "Natural".to_string(),
            notes: "Tropical Fruit, Complex, Vibrant Acidity".to_string(),
            price_eth: 0.018,
            quantity: 150,
            timeline: BatchTimeline {
                harvested: date(2024, 9, 2),
                roasted: date(2024, 9, 10),
                packed: date(2024, 9, 11),
            },
            image: "https://source.unsplash.com/200x200/?coffee,excelsa".to_string(),
        },
        Product {
            id: 5,
            name: "Batch Geisha Gayo #G2".to_string(),
            origin: "Gayo Highlands, Aceh".to_string(),
            process: "Washed".to_string(),
            notes: "Jasmine, Bergamot, Honey".to_string(),
            price_eth: 0.042,
            quantity: 40,
            timeline: BatchTimeline {
                harvested: date(2024, 5, 30),
                roasted: date(2024, 6, 8),
                packed: date(2024, 6, 9),
            },
            image: "https://source.unsplash.com/200x200/?coffee,geisha".to_string(),
        },
    ]
}

/// Active listing filters. `None` means "no restriction".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilters {
    pub product_type: Option<String>,
    pub process: Option<String>,
    /// Inclusive ETH price bounds.
    pub price_range: Option<(f64, f64)>,
}

impl ListingFilters {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(product_type) = &self.product_type {
            if !product.name.contains(product_type.as_str()) {
                return false;
            }
        }
        if let Some(process) = &self.process {
            if &product.process != process {
                return false;
            }
        }
        if let Some((min, max)) = self.price_range {
            if product.price_eth < min || product.price_eth > max {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_keeps_everything() {
        let products = seeded_products();
        assert_eq!(ListingFilters::default().apply(&products).len(), products.len());
    }

    #[test]
    fn test_type_filter_matches_name() {
        let filters = ListingFilters {
            product_type: Some("Arabica".to_string()),
            ..Default::default()
        };
        let filtered = filters.apply(&seeded_products());
        assert_eq!(filtered.len(), 1);
        assert!(filtered[0].name.contains("Arabica"));
    }

    #[test]
    fn test_process_filter_is_exact() {
        let filters = ListingFilters {
            process: Some("Washed".to_string()),
            ..Default::default()
        };
        let filtered = filters.apply(&seeded_products());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.process == "Washed"));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let filters = ListingFilters {
            price_range: Some((0.010, 0.015)),
            ..Default::default()
        };
        let filtered = filters.apply(&seeded_products());
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|p| p.price_eth >= 0.010 && p.price_eth <= 0.015));
    }

    #[test]
    fn test_filters_compose() {
        let filters = ListingFilters {
            product_type: Some("Robusta".to_string()),
            process: Some("Natural".to_string()),
            price_range: None,
        };
        assert!(filters.apply(&seeded_products()).is_empty());
    }
}
