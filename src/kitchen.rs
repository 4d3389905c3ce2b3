//! Cocinero de la pancakeria. Prepara y entrega los pedidos completados.
use std::sync::{Arc, Condvar, Mutex};

use log::{debug, info};

use crate::{errors::PancakeError, orders_queue::OrdersQueue, service::PancakeService};

/// Representa a un cocinero.
/// Tiene referencias a la cola de pedidos completados (junto con su variable condicional),
/// al servicio de pedidos y al contador de pedidos entregados
pub struct Cook {
    id: usize,
    orders_queue: Arc<Mutex<OrdersQueue>>,
    orders_cond: Arc<Condvar>,
    service: Arc<PancakeService>,
    orders_delivered: Arc<Mutex<u64>>,
}

impl Cook {
    pub fn new(
        id: usize,
        orders_queue: Arc<Mutex<OrdersQueue>>,
        orders_cond: Arc<Condvar>,
        service: Arc<PancakeService>,
        orders_delivered: Arc<Mutex<u64>>,
    ) -> Cook {
        Cook {
            id,
            orders_queue,
            orders_cond,
            service,
            orders_delivered,
        }
    }

    pub fn handle_orders(&self) -> Result<(), PancakeError> {
        loop {
            let order_id = {
                let mut orders = self
                    .orders_cond
                    .wait_while(self.orders_queue.lock()?, |queue| queue.must_wait())?;

                match orders.pop() {
                    Some(order_id) => order_id,
                    None => return Ok(()),
                }
            };

            debug!("[COOK {}] Takes order {}", self.id, order_id);
            self.service.prepare_order(order_id)?;
            let delivered = self.service.deliver_order(order_id)?;
            *self.orders_delivered.lock()? += 1;

            let summary = serde_json::to_string(&delivered)
                .unwrap_or_else(|_| delivered.id().to_string());
            info!("[COOK {}] Delivered {}", self.id, summary);
        }
    }
}
