//! Sorting and grouping rules
//!
//! At most one sorter and at most one grouping rule are active at a time.
//! When grouping is present it is the primary ordering key and the sorter
//! orders rows within each bucket. The two are independent: changing one
//! never clears the other.

use std::cmp::Ordering;

use shared::models::Product;

use crate::utils::price::format_usd;

/// Sortable product properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    Rating,
    ReleaseDate,
}

impl SortField {
    /// Resolve a sort-dialog key.
    ///
    /// Panics on an unknown key, the dialog schema and this list must match.
    pub fn from_path(path: &str) -> Self {
        match path {
            "Name" => Self::Name,
            "Price" => Self::Price,
            "Rating" => Self::Rating,
            "ReleaseDate" => Self::ReleaseDate,
            _ => panic!("Can't sort by product property '{}'", path),
        }
    }
}

/// Active sorter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorter {
    pub field: SortField,
    pub descending: bool,
}

impl Sorter {
    pub fn new(field: SortField, descending: bool) -> Self {
        Self { field, descending }
    }

    /// Compare two products under this sorter
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Price => a.price_cents.cmp(&b.price_cents),
            SortField::Rating => a
                .rating
                .partial_cmp(&b.rating)
                .unwrap_or(Ordering::Equal),
            SortField::ReleaseDate => a.release_date.cmp(&b.release_date),
        };

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Groupable product properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Price,
    Rating,
    Discount,
}

impl GroupKey {
    /// Resolve a group-dialog key.
    ///
    /// Panics on an unknown key, mirroring the fail-fast contract of the
    /// filter schema.
    pub fn from_path(path: &str) -> Self {
        match path {
            "Price" => Self::Price,
            "Rating" => Self::Rating,
            "DiscountDate" => Self::Discount,
            _ => panic!("Can't create group function for product property '{}'", path),
        }
    }
}

/// Bucket a grouping rule assigns to a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBucket {
    pub key: String,
    pub label: String,
}

/// Active grouping rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grouping {
    pub key: GroupKey,
    pub descending: bool,
}

impl Grouping {
    pub fn new(key: GroupKey, descending: bool) -> Self {
        Self { key, descending }
    }

    /// Bucket of one product
    pub fn bucket(&self, product: &Product) -> GroupBucket {
        match self.key {
            GroupKey::Price => {
                let (key, label) = if product.price_cents <= 100_00 {
                    ("LessThan100", format!("Price: {} and less", format_usd(100_00)))
                } else if product.price_cents <= 1000_00 {
                    ("Between100And1000", format!(
                        "Price: between {} and {}",
                        format_usd(100_00),
                        format_usd(1000_00)
                    ))
                } else {
                    ("MoreThan1000", format!("Price: more than {}", format_usd(1000_00)))
                };

                GroupBucket {
                    key: key.to_string(),
                    label,
                }
            }

            GroupKey::Rating => GroupBucket {
                key: format!("{}", product.rating),
                label: format!("Rating: {}", product.rating),
            },

            GroupKey::Discount => {
                if product.discount_date.is_some() {
                    GroupBucket {
                        key: "WithDiscount".to_string(),
                        label: "With discount".to_string(),
                    }
                } else {
                    GroupBucket {
                        key: "WithoutDiscount".to_string(),
                        label: "Without discount".to_string(),
                    }
                }
            }
        }
    }

    /// Orderable rank of a product's bucket
    fn rank(&self, product: &Product) -> i64 {
        match self.key {
            GroupKey::Price => {
                if product.price_cents <= 100_00 {
                    0
                } else if product.price_cents <= 1000_00 {
                    1
                } else {
                    2
                }
            }
            // Identity bucketing per rating value, scaled to keep halves apart
            GroupKey::Rating => (product.rating * 100.0).round() as i64,
            GroupKey::Discount => i64::from(product.discount_date.is_none()),
        }
    }

    /// Compare two products by bucket under this grouping
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = self.rank(a).cmp(&self.rank(b));

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Order rows under the composed `[grouping, sorter]` rule.
///
/// The sort is stable: with neither rule active the insertion order stands.
pub fn order_products(products: &mut [Product], grouping: Option<&Grouping>, sorter: Option<&Sorter>) {
    products.sort_by(|a, b| {
        let grouped = grouping
            .map(|rule| rule.compare(a, b))
            .unwrap_or(Ordering::Equal);

        grouped.then_with(|| {
            sorter
                .map(|rule| rule.compare(a, b))
                .unwrap_or(Ordering::Equal)
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn product(name: &str, price_cents: i64, rating: f32) -> Product {
        Product {
            id: name.to_lowercase(),
            name: name.into(),
            description: String::new(),
            rating,
            release_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            discount_date: None,
            price_cents,
            image: None,
            category_id: "c1".into(),
            subcategory_ids: Vec::new(),
            supplier_ids: Vec::new(),
        }
    }

    #[test]
    fn test_price_buckets() {
        let grouping = Grouping::new(GroupKey::Price, false);

        assert_eq!(grouping.bucket(&product("A", 100_00, 0.0)).key, "LessThan100");
        assert_eq!(
            grouping.bucket(&product("B", 100_01, 0.0)).key,
            "Between100And1000"
        );
        assert_eq!(grouping.bucket(&product("C", 1000_01, 0.0)).key, "MoreThan1000");
    }

    #[test]
    fn test_discount_bucket_by_presence() {
        let grouping = Grouping::new(GroupKey::Discount, false);

        let mut discounted = product("A", 100, 0.0);
        discounted.discount_date = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        assert_eq!(grouping.bucket(&discounted).key, "WithDiscount");
        assert_eq!(grouping.bucket(&product("B", 100, 0.0)).key, "WithoutDiscount");
    }

    #[test]
    fn test_grouping_dominates_sorter() {
        // Grouping by price, secondary sort by name ascending: every row of
        // the cheap bucket precedes every row of the middle bucket.
        let mut rows = vec![
            product("Anvil", 500_00, 0.0),
            product("Zinc", 40_00, 0.0),
            product("Mallet", 90_00, 0.0),
            product("Drill", 200_00, 0.0),
        ];

        let grouping = Grouping::new(GroupKey::Price, false);
        let sorter = Sorter::new(SortField::Name, false);
        order_products(&mut rows, Some(&grouping), Some(&sorter));

        let names: Vec<&str> = rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mallet", "Zinc", "Anvil", "Drill"]);
    }

    #[test]
    fn test_no_rules_keep_insertion_order() {
        let mut rows = vec![
            product("B", 2, 0.0),
            product("A", 1, 0.0),
        ];
        order_products(&mut rows, None, None);

        assert_eq!(rows[0].name, "B");
        assert_eq!(rows[1].name, "A");
    }

    #[test]
    fn test_descending_sorter() {
        let mut rows = vec![
            product("A", 100, 1.0),
            product("B", 300, 5.0),
            product("C", 200, 3.0),
        ];
        let sorter = Sorter::new(SortField::Price, true);
        order_products(&mut rows, None, Some(&sorter));

        let prices: Vec<i64> = rows.iter().map(|p| p.price_cents).collect();
        assert_eq!(prices, vec![300, 200, 100]);
    }

    #[test]
    #[should_panic(expected = "Can't create group function")]
    fn test_unknown_group_path_panics() {
        GroupKey::from_path("Description");
    }
}
