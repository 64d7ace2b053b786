use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cartpilot::{
    Basket, CartPilotConfig, CartPilotError, FjallStore, PostcodeClient, ProductIndex, find_nearby,
    plan_route,
};

const USAGE: &str = "CartPilot - UK grocery shopping assistant

Usage:
  cartpilot stores <postcode> [radius-miles]   Find supermarkets near a postcode
  cartpilot search <query>                     Search the product catalog
  cartpilot add <product-id> [quantity]        Add a product to the basket
  cartpilot basket                             Show the basket and totals
  cartpilot route                              Show the aisle-ordered route
  cartpilot clear                              Empty the basket";

#[tokio::main]
async fn main() -> ExitCode {
    let config = match CartPilotConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&config, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &CartPilotConfig, args: &[String]) -> cartpilot::Result<()> {
    match args.first().map(String::as_str) {
        Some("stores") => {
            let postcode = args
                .get(1)
                .ok_or_else(|| CartPilotError::invalid_input("a postcode is required"))?;
            let radius = match args.get(2) {
                Some(raw) => raw.parse::<f64>().map_err(|_| {
                    CartPilotError::invalid_input(format!("'{raw}' is not a valid radius"))
                })?,
                None => config.search.radius_miles,
            };
            stores_command(config, postcode, radius).await
        }
        Some("search") => {
            let query = args
                .get(1)
                .ok_or_else(|| CartPilotError::invalid_input("a search query is required"))?;
            search_command(config, query)
        }
        Some("add") => {
            let product_id = args
                .get(1)
                .ok_or_else(|| CartPilotError::invalid_input("a product id is required"))?;
            let quantity = match args.get(2) {
                Some(raw) => raw.parse::<u32>().map_err(|_| {
                    CartPilotError::invalid_input(format!("'{raw}' is not a valid quantity"))
                })?,
                None => 1,
            };
            add_command(config, product_id, quantity)
        }
        Some("basket") => basket_command(config),
        Some("route") => route_command(config),
        Some("clear") => clear_command(config),
        _ => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

async fn stores_command(
    config: &CartPilotConfig,
    postcode: &str,
    radius: f64,
) -> cartpilot::Result<()> {
    let client = PostcodeClient::new(&config.geocoding)?;
    let geocoded = client.resolve(postcode).await?;
    let stores = cartpilot::bundled_stores()?;
    let nearby = find_nearby(&stores, geocoded.coordinates, radius);

    if nearby.is_empty() {
        println!(
            "No supermarkets within {radius} miles of {}.",
            geocoded.postcode
        );
        return Ok(());
    }

    println!(
        "Supermarkets within {radius} miles of {} ({}):",
        geocoded.postcode,
        geocoded.district.as_deref().unwrap_or("unknown district")
    );
    for store in &nearby {
        println!(
            "  {:4.1} mi  {}  [{}]  {}",
            store.distance.unwrap_or_default(),
            store.name,
            store.id,
            store.address
        );
    }
    Ok(())
}

fn search_command(config: &CartPilotConfig, query: &str) -> cartpilot::Result<()> {
    let products = cartpilot::bundled_products()?;
    let index = ProductIndex::new(&products, config.search.min_query_length);
    let results = index.search(query, config.search.max_results);

    if results.is_empty() {
        println!("No products matched '{query}'.");
        return Ok(());
    }

    for product in results {
        println!(
            "  [{}] {}  aisle {}  \u{a3}{:.2}",
            product.id, product.name, product.aisle, product.price
        );
    }
    Ok(())
}

fn open_basket(config: &CartPilotConfig) -> cartpilot::Result<Basket> {
    let products = cartpilot::bundled_products()?;
    let storage = FjallStore::open(&config.storage.location)?;
    Ok(Basket::open(Box::new(storage), &products))
}

fn add_command(config: &CartPilotConfig, product_id: &str, quantity: u32) -> cartpilot::Result<()> {
    let products = cartpilot::bundled_products()?;
    let product = products
        .iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| {
            CartPilotError::invalid_input(format!("no product with id '{product_id}'"))
        })?;

    let mut basket = open_basket(config)?;
    for _ in 0..quantity.max(1) {
        basket.add(product)?;
    }

    println!(
        "Added {} x{}. Basket: {} items, \u{a3}{:.2}",
        product.name,
        quantity.max(1),
        basket.total_items(),
        basket.total_price()
    );
    Ok(())
}

fn basket_command(config: &CartPilotConfig) -> cartpilot::Result<()> {
    let basket = open_basket(config)?;
    if basket.is_empty() {
        println!("Your basket is empty.");
        return Ok(());
    }

    for item in basket.items() {
        println!(
            "  {} x{}  \u{a3}{:.2}",
            item.product.name,
            item.quantity,
            item.line_price()
        );
    }
    println!(
        "Total: {} items, \u{a3}{:.2}",
        basket.total_items(),
        basket.total_price()
    );
    Ok(())
}

fn route_command(config: &CartPilotConfig) -> cartpilot::Result<()> {
    let basket = open_basket(config)?;
    let route = plan_route(&basket);

    if route.is_empty() {
        println!("Your basket is empty - nothing to route.");
        return Ok(());
    }

    println!("Shopping route ({} stops):", route.len());
    for stop in &route {
        let section = stop.section.unwrap_or("General");
        println!("  Aisle {} ({section}):", stop.aisle);
        for item in &stop.items {
            println!("    {} x{}", item.product.name, item.quantity);
        }
    }
    Ok(())
}

fn clear_command(config: &CartPilotConfig) -> cartpilot::Result<()> {
    let mut basket = open_basket(config)?;
    basket.clear()?;
    println!("Basket cleared.");
    Ok(())
}
