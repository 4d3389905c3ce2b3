//! Lectura de los pedidos de la simulacion desde un archivo JSON
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, error};
use serde::Deserialize;

use crate::errors::PancakeError;

/// Pancakes iguales a agregar a un pedido
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PancakeRequest {
    pub ingredients: Vec<String>,
    pub quantity: usize,
}

/// Pedido que arma un cliente
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub building: u32,
    pub room: u32,
    pub pancakes: Vec<PancakeRequest>,
}

#[derive(Deserialize)]
struct OrdersConfiguration {
    orders: Vec<OrderRequest>,
}

pub fn parse_orders(json: &str) -> Result<Vec<OrderRequest>, PancakeError> {
    orders_from_config(serde_json::from_str(json))
}

pub fn read_orders<P: AsRef<Path>>(path: P) -> Result<Vec<OrderRequest>, PancakeError> {
    let file = File::open(path.as_ref()).map_err(|err| {
        error!("[READER] Error opening {:?}: {}", path.as_ref(), err);
        PancakeError::DomainArgument(format!("Cannot open orders file: {}", err))
    })?;
    let reader = BufReader::new(file);
    orders_from_config(serde_json::from_reader(reader))
}

fn orders_from_config(
    config: serde_json::Result<OrdersConfiguration>,
) -> Result<Vec<OrderRequest>, PancakeError> {
    let orders_config = config
        .map_err(|err| PancakeError::DomainArgument(format!("Invalid orders file: {}", err)))?;
    debug!("[READER] Read {} orders", orders_config.orders.len());
    Ok(orders_config.orders)
}
