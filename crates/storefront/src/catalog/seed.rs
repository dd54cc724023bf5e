//! The default TechStore product list.

use rust_decimal::Decimal;
use techstore_core::{Category, Price, Product, ProductId, Rating};

struct SeedProduct {
    id: i32,
    name: &'static str,
    description: &'static str,
    price: i64,
    category: Category,
    rating_tenths: i64,
    badge: Option<&'static str>,
    photo: u32,
}

const SEED: [SeedProduct; 12] = [
    SeedProduct {
        id: 1,
        name: "iPhone 14 Pro",
        description: "Latest iPhone with A16 Bionic chip, Pro camera system, and Dynamic Island.",
        price: 999,
        category: Category::Smartphones,
        rating_tenths: 48,
        badge: Some("New"),
        photo: 788_946,
    },
    SeedProduct {
        id: 2,
        name: "MacBook Pro 14\"",
        description: "Powerful laptop with M2 Pro chip, stunning Liquid Retina XDR display.",
        price: 1999,
        category: Category::Laptops,
        rating_tenths: 49,
        badge: Some("Popular"),
        photo: 812_264,
    },
    SeedProduct {
        id: 3,
        name: "AirPods Pro",
        description: "Premium wireless earbuds with active noise cancellation and spatial audio.",
        price: 249,
        category: Category::Headphones,
        rating_tenths: 47,
        badge: None,
        photo: 8_534_088,
    },
    SeedProduct {
        id: 4,
        name: "iPad Air",
        description: "Versatile tablet with M1 chip, perfect for creativity and productivity.",
        price: 599,
        category: Category::Accessories,
        rating_tenths: 46,
        badge: None,
        photo: 1_334_597,
    },
    SeedProduct {
        id: 5,
        name: "Samsung Galaxy S23",
        description: "Android flagship with exceptional camera and performance capabilities.",
        price: 899,
        category: Category::Smartphones,
        rating_tenths: 45,
        badge: None,
        photo: 404_280,
    },
    SeedProduct {
        id: 6,
        name: "Dell XPS 13",
        description: "Ultra-portable laptop with stunning InfinityEdge display and premium build.",
        price: 1299,
        category: Category::Laptops,
        rating_tenths: 44,
        badge: None,
        photo: 238_118,
    },
    SeedProduct {
        id: 7,
        name: "Sony WH-1000XM5",
        description: "Industry-leading noise canceling headphones with exceptional sound quality.",
        price: 399,
        category: Category::Headphones,
        rating_tenths: 48,
        badge: Some("Bestseller"),
        photo: 3_945_683,
    },
    SeedProduct {
        id: 8,
        name: "Apple Watch Series 8",
        description: "Advanced health monitoring, fitness tracking, and seamless connectivity.",
        price: 399,
        category: Category::Accessories,
        rating_tenths: 46,
        badge: None,
        photo: 437_037,
    },
    SeedProduct {
        id: 9,
        name: "Google Pixel 7",
        description: "Pure Android experience with computational photography excellence.",
        price: 699,
        category: Category::Smartphones,
        rating_tenths: 44,
        badge: None,
        photo: 699_122,
    },
    SeedProduct {
        id: 10,
        name: "Surface Laptop 5",
        description: "Elegant Windows laptop with premium materials and all-day battery life.",
        price: 1499,
        category: Category::Laptops,
        rating_tenths: 43,
        badge: None,
        photo: 1_229_861,
    },
    SeedProduct {
        id: 11,
        name: "Bose QuietComfort 45",
        description: "Premium comfort meets world-class noise cancellation technology.",
        price: 329,
        category: Category::Headphones,
        rating_tenths: 45,
        badge: None,
        photo: 3_394_650,
    },
    SeedProduct {
        id: 12,
        name: "Magic Keyboard",
        description: "Wireless keyboard with precise typing experience and long battery life.",
        price: 179,
        category: Category::Accessories,
        rating_tenths: 42,
        badge: None,
        photo: 2_582_937,
    },
];

fn photo_url(photo: u32) -> String {
    format!("https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg")
}

/// The twelve products the storefront ships with, in catalog order.
#[must_use]
pub fn default_products() -> Vec<Product> {
    SEED.iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            price: Price::usd(Decimal::from(seed.price)),
            category: seed.category,
            rating: Rating::from_tenths(seed.rating_tenths).unwrap_or(Rating::ZERO),
            badge: seed.badge.map(str::to_owned),
            image: photo_url(seed.photo),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = default_products().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), SEED.len());
    }

    #[test]
    fn test_ratings_are_valid() {
        for seed in &SEED {
            assert!(Rating::from_tenths(seed.rating_tenths).is_ok(), "{}", seed.name);
        }
    }

    #[test]
    fn test_image_url() {
        let products = default_products();
        assert_eq!(
            products[0].image,
            "https://images.pexels.com/photos/788946/pexels-photo-788946.jpeg"
        );
    }
}
