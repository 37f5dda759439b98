//! Sample-catalog bootstrap.
//!
//! Dev/demo fixture only: fills an empty store with a fixed catalog and some
//! synthetic stock movements, all through the store's public contract. The
//! core never seeds itself.

use stockroom_inventory::{InventoryStore, NewProduct, ProductFilter};

/// Seed the fixed sample catalog plus synthetic history. No-op when the
/// store already holds products.
pub fn seed_sample_catalog(store: &InventoryStore) {
    if !store.list_products(&ProductFilter::default()).is_empty() {
        return;
    }

    let mut seeded = Vec::new();
    for new in sample_catalog() {
        match store.create_product(new) {
            Ok(product) => seeded.push(product),
            Err(e) => tracing::warn!(error = %e, "skipping sample product"),
        }
    }

    // Paired in/out movements: realistic history without changing the
    // catalog's fixed stock levels.
    let movements = [
        (12, "New shipment received", "Online order fulfilled"),
        (8, "Return processed", "Damaged items removed"),
    ];
    for product in seeded.iter().take(5) {
        for (delta, inbound, outbound) in movements {
            if store.adjust_stock(&product.id, delta, Some(inbound)).is_ok() {
                let _ = store.adjust_stock(&product.id, -delta, Some(outbound));
            }
        }
    }

    tracing::info!(products = seeded.len(), "seeded sample catalog");
}

fn sample_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Yonex Astrox 88D Pro Racket".to_string(),
            sku: "RACKET-YONEX-88DP".to_string(),
            price: 229.99,
            stock: 15,
            min_stock: 5,
            description: Some("Professional badminton racket, 4U weight, extra stiff flex".to_string()),
            category: Some("Rackets".to_string()),
        },
        NewProduct {
            name: "Victor Feather Shuttlecocks (Tube of 12)".to_string(),
            sku: "SHUT-VICTOR-GOLD".to_string(),
            price: 34.99,
            stock: 8,
            min_stock: 15,
            description: Some("Premium goose feather shuttlecocks, tournament grade".to_string()),
            category: Some("Shuttlecocks".to_string()),
        },
        NewProduct {
            name: "Badminton Team T-Shirt".to_string(),
            sku: "APPAREL-TSHIRT-M".to_string(),
            price: 24.99,
            stock: 42,
            min_stock: 20,
            description: Some("Dry-fit polyester t-shirt, moisture wicking, multiple colors".to_string()),
            category: Some("Apparel".to_string()),
        },
        NewProduct {
            name: "Li-Ning Court Shoes AYZM026".to_string(),
            sku: "SHOES-LINING-PRO".to_string(),
            price: 129.99,
            stock: 0,
            min_stock: 8,
            description: Some("Professional court shoes with carbon fiber plate".to_string()),
            category: Some("Footwear".to_string()),
        },
        NewProduct {
            name: "Plastic Shuttlecocks (Bag of 10)".to_string(),
            sku: "SHUT-PLASTIC-10".to_string(),
            price: 12.99,
            stock: 75,
            min_stock: 30,
            description: Some("Durable plastic shuttlecocks for training and recreation".to_string()),
            category: Some("Shuttlecocks".to_string()),
        },
        NewProduct {
            name: "Badminton Grip Towel".to_string(),
            sku: "ACC-GRIP-TOWEL".to_string(),
            price: 8.99,
            stock: 120,
            min_stock: 50,
            description: Some("Absorbent grip towel with anti-slip pattern".to_string()),
            category: Some("Accessories".to_string()),
        },
        NewProduct {
            name: "Training Track Suit".to_string(),
            sku: "APPAREL-TRACKSET".to_string(),
            price: 59.99,
            stock: 6,
            min_stock: 10,
            description: Some("Full track suit for training, breathable fabric".to_string()),
            category: Some("Apparel".to_string()),
        },
        NewProduct {
            name: "Stringing Machine Professional".to_string(),
            sku: "EQUIP-STRINGER-PRO".to_string(),
            price: 899.99,
            stock: 2,
            min_stock: 1,
            description: Some("6-point mounting system, electronic tension control".to_string()),
            category: Some("Equipment".to_string()),
        },
    ]
}
