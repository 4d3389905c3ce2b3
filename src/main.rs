use std::{env, sync::Arc};

use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

use pancake_lab::{
    constants::ORDERS_FILE, orders_reader::read_orders, pancake_shop::PancakeShop,
    InMemoryOrderLogger, PancakeService,
};

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .expect("Error initializing the logger");

    let path = env::args().nth(1).unwrap_or_else(|| ORDERS_FILE.to_string());
    let requests = match read_orders(&path) {
        Ok(requests) => requests,
        Err(err) => {
            error!("[MAIN] Could not read orders from {}: {}", path, err);
            return;
        }
    };

    let service = Arc::new(PancakeService::new(Arc::new(InMemoryOrderLogger::instance())));
    let shop = PancakeShop::new(service.clone());
    match shop.manage_orders(requests) {
        Ok(delivered) => info!("[MAIN] Delivered {} orders", delivered),
        Err(err) => error!("[MAIN] The shop stopped: {}", err),
    }

    service.clear_all_finished_orders();
}
