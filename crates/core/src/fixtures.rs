//! Built-in demo dataset used when no catalog file is configured.

use rust_decimal::Decimal;

use crate::catalog::{Catalog, Dataset};
use crate::domain::product::{Product, ProductId};
use crate::domain::retailer::{RetailerId, RetailerProfile};

pub fn demo_dataset() -> Dataset {
    Dataset { products: demo_products(), retailers: demo_retailers() }
}

pub fn demo_catalog() -> Catalog {
    Catalog::new(demo_products())
}

pub fn demo_retailers() -> Vec<RetailerProfile> {
    vec![
        retailer("ica", "ICA", 49, 500, "1-2 days", Decimal::ONE),
        retailer("coop", "COOP", 39, 700, "Same day", Decimal::new(103, 2)),
        retailer("willys", "Willys", 29, 600, "1-3 days", Decimal::new(98, 2)),
        retailer("hemkop", "Hemköp", 59, 400, "1 day", Decimal::new(105, 2)),
    ]
}

fn demo_products() -> Vec<Product> {
    vec![
        product("bregott-normalsaltat", "Bregott Normal Salted 75%", "Bregott", 4790, Some(5890)),
        product("brew-coffee-medium", "Brew Coffee Medium Roast", "Arvid Nordquist", 7500, Some(9995)),
        product("falukorv-classic", "Falun Sausage Classic", "Scan", 3000, Some(4090)),
        product("coca-cola-zero-15", "Coca-Cola Zero 1.5L", "Coca-Cola", 1950, Some(2190)),
        product("coca-cola-15", "Coca-Cola 1.5L", "Coca-Cola", 2495, None),
        product("prastost-31", "Priest Cheese 31% Medium Aged", "Arla Ko", 8568, Some(10008)),
        product("ikaffe-oat-drink", "iKaffe Oat Drink", "Oatly", 1600, Some(2095)),
        product("oat-drink-barista", "Oat Drink Barista Edition", "Oatly", 2490, None),
        product("standard-milk-3", "Standard Milk 3%", "Arla Ko", 1795, None),
        product("chocolate-milk", "Chocolate Milk Drink", "Oboy", 2250, None),
        product("rye-bread", "Rye Bread Sliced", "Pågen", 3200, None),
        product("cinnamon-buns", "Cinnamon Buns", "Pågen", 3495, Some(3995)),
        product("cheddar-cheese", "Cheddar Cheese Mature", "Arla Ko", 4995, None),
        product("bananas-1kg", "Bananas Fairtrade", "Garant Eko", 2690, None),
        product("pasta-penne", "Penne Pasta", "Barilla", 2195, Some(2695)),
        product("ground-coffee", "Ground Coffee Mellanrost", "Zoegas", 6295, None),
    ]
}

fn product(id: &str, name: &str, brand: &str, price: i64, original: Option<i64>) -> Product {
    Product {
        id: ProductId(id.to_owned()),
        name: name.to_owned(),
        brand: brand.to_owned(),
        price: Decimal::new(price, 2),
        original_price: original.map(|cents| Decimal::new(cents, 2)),
        image_url: format!("/images/products/{id}.png"),
        href: format!("/products/{id}"),
    }
}

fn retailer(
    id: &str,
    name: &str,
    delivery_fee: i64,
    min_order: i64,
    delivery_time: &str,
    price_multiplier: Decimal,
) -> RetailerProfile {
    RetailerProfile {
        id: RetailerId(id.to_owned()),
        name: name.to_owned(),
        delivery_fee: Decimal::from(delivery_fee),
        min_order: Decimal::from(min_order),
        delivery_time: delivery_time.to_owned(),
        price_multiplier,
    }
}
