use serde::{Deserialize, Serialize};

/// Unique product identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// A product listing in the MKRM storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub pack_size_kg: u32,
    /// Price per pack in INR.
    pub price_inr: f64,
}

/// The built-in MKRM product range shown by the storefront.
pub fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId("sona-masoori-25".into()),
            name: "Sona Masoori Premium Rice".into(),
            description: "Lightweight, aromatic medium-grain rice from central India.".into(),
            pack_size_kg: 25,
            price_inr: 1450.0,
        },
        Product {
            id: ProductId("basmati-5".into()),
            name: "Classic Basmati Rice".into(),
            description: "Aged long-grain basmati with a distinct aroma.".into(),
            pack_size_kg: 5,
            price_inr: 799.0,
        },
        Product {
            id: ProductId("kolam-10".into()),
            name: "Wada Kolam Rice".into(),
            description: "Soft-cooking short-grain rice, everyday staple.".into(),
            pack_size_kg: 10,
            price_inr: 720.0,
        },
        Product {
            id: ProductId("brown-5".into()),
            name: "Whole Grain Brown Rice".into(),
            description: "Unpolished brown rice, fibre-rich.".into(),
            pack_size_kg: 5,
            price_inr: 410.0,
        },
    ]
}

/// Find a product in a listing by id.
pub fn find<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| p.id == *id)
}
