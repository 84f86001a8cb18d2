//! # Product Catalog & Synthetic Sales
//!
//! A fixed 15-entry catalog used to populate the ledger with demo data.
//!
//! ## Generation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For each of `count` iterations:                                        │
//! │                                                                         │
//! │    item     = uniform pick from CATALOG (15 entries)                    │
//! │    quantity = uniform in [1, 10]                                        │
//! │    date     = today - uniform offset in [0, 11] days                    │
//! │    total    = item.price × quantity                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both the random source and "today" are parameters, so a seeded `StdRng`
//! and a fixed date make generation fully reproducible in tests.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::NewSale;
use crate::{SYNTHETIC_QUANTITY_MAX, SYNTHETIC_QUANTITY_MIN, SYNTHETIC_WINDOW_DAYS};

/// One product the generator can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: &'static str,
    pub category: &'static str,
    pub price: Money,
}

const fn item(name: &'static str, category: &'static str, units: i64) -> CatalogItem {
    CatalogItem {
        name,
        category,
        price: Money::from_units(units),
    }
}

/// The fixed product catalog. Prices are whole currency units.
pub const CATALOG: [CatalogItem; 15] = [
    item("Televisor LED 42\"", "Electrónica", 299_000),
    item("Smartphone 128GB", "Electrónica", 599_000),
    item("Laptop 15\"", "Electrónica", 799_000),
    item("Licuadora", "Hogar y Cocina", 49_000),
    item("Olla de Presión", "Hogar y Cocina", 29_000),
    item("Juego de Sartenes", "Hogar y Cocina", 79_000),
    item("Camiseta", "Ropa y Accesorios", 19_000),
    item("Pantalones Jeans", "Ropa y Accesorios", 39_000),
    item("Gafas de Sol", "Ropa y Accesorios", 49_000),
    item("Bicicleta de Montaña", "Deportes y Aire Libre", 299_000),
    item("Pelota de Fútbol", "Deportes y Aire Libre", 24_000),
    item("Raqueta de Tenis", "Deportes y Aire Libre", 79_000),
    item("Libro de Ficción", "Libros y Papelería", 14_000),
    item("Cuaderno de Notas", "Libros y Papelería", 4_000),
    item("Pluma Estilográfica", "Libros y Papelería", 29_000),
];

impl CatalogItem {
    /// Looks up a catalog entry by position.
    pub fn at(index: usize) -> CoreResult<&'static CatalogItem> {
        CATALOG.get(index).ok_or(CoreError::UnknownCatalogIndex(index))
    }

    /// Returns true if `(name, category, price)` is exactly a catalog entry.
    pub fn contains(name: &str, category: &str, price: Money) -> bool {
        CATALOG
            .iter()
            .any(|c| c.name == name && c.category == category && c.price == price)
    }
}

/// First day of the synthetic window ending at `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(SYNTHETIC_WINDOW_DAYS - 1)
}

/// Generates `count` synthetic sales dated within the window ending `today`.
pub fn generate_synthetic_sales<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    count: usize,
) -> CoreResult<Vec<NewSale>> {
    let mut sales = Vec::with_capacity(count);

    for _ in 0..count {
        let index = rng.gen_range(0..CATALOG.len());
        let product = CatalogItem::at(index)?;
        let quantity = rng.gen_range(SYNTHETIC_QUANTITY_MIN..=SYNTHETIC_QUANTITY_MAX);
        let offset = rng.gen_range(0..SYNTHETIC_WINDOW_DAYS);
        let date = today - Duration::days(offset);

        sales.push(NewSale::new(
            date,
            product.name,
            product.category,
            product.price,
            quantity,
        )?);
    }

    Ok(sales)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_catalog_shape() {
        assert_eq!(CATALOG.len(), 15);
        let names: HashSet<_> = CATALOG.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), 15);
        let categories: HashSet<_> = CATALOG.iter().map(|c| c.category).collect();
        assert_eq!(categories.len(), 5);
        assert_eq!(CATALOG[2].price.cents(), 79_900_000);
    }

    #[test]
    fn test_generates_exact_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let sales = generate_synthetic_sales(&mut rng, today(), 250).unwrap();
        assert_eq!(sales.len(), 250);

        let none = generate_synthetic_sales(&mut rng, today(), 0).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_generated_sales_follow_rules() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = window_start(today());
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

        for sale in generate_synthetic_sales(&mut rng, today(), 500).unwrap() {
            assert!(CatalogItem::contains(
                sale.product_name(),
                sale.category(),
                sale.unit_price()
            ));
            assert!((1..=10).contains(&sale.quantity()));
            assert!(sale.date() >= start && sale.date() <= today());
            assert_eq!(
                sale.total(),
                sale.unit_price().checked_multiply_quantity(sale.quantity()).unwrap()
            );
        }
    }

    #[test]
    fn test_generation_covers_window_and_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let sales = generate_synthetic_sales(&mut rng, today(), 2_000).unwrap();

        let dates: HashSet<_> = sales.iter().map(|s| s.date()).collect();
        assert_eq!(dates.len(), 12);

        let products: HashSet<_> = sales.iter().map(|s| s.product_name().to_string()).collect();
        assert_eq!(products.len(), 15);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_synthetic_sales(&mut StdRng::seed_from_u64(9), today(), 20).unwrap();
        let b = generate_synthetic_sales(&mut StdRng::seed_from_u64(9), today(), 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(CatalogItem::at(0).unwrap().name, "Televisor LED 42\"");
        assert!(matches!(
            CatalogItem::at(15),
            Err(CoreError::UnknownCatalogIndex(15))
        ));
    }
}
