//! Clientes de la simulacion. Arman pedidos y los completan o cancelan.
use std::{
    collections::VecDeque,
    sync::{Arc, Condvar, Mutex},
};

use log::{debug, info, warn};
use rand::{thread_rng, Rng};
use uuid::Uuid;

use crate::{
    constants::CANCEL_PROBABILITY,
    errors::PancakeError,
    orders_queue::OrdersQueue,
    orders_reader::OrderRequest,
    service::PancakeService,
};

/// Representa a un cliente que toma pedidos de la lista compartida de pedidos a armar.
/// Los pedidos que completa los deja en la cola de la cocina y despierta a un cocinero.
pub struct Customer {
    id: usize,
    requests: Arc<Mutex<VecDeque<OrderRequest>>>,
    service: Arc<PancakeService>,
    kitchen_queue: Arc<Mutex<OrdersQueue>>,
    kitchen_cond: Arc<Condvar>,
    cancel_probability: f64,
}

impl std::fmt::Debug for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("cancel_probability", &self.cancel_probability)
            .finish_non_exhaustive()
    }
}

impl Customer {
    pub fn new(
        id: usize,
        requests: Arc<Mutex<VecDeque<OrderRequest>>>,
        service: Arc<PancakeService>,
        kitchen_queue: Arc<Mutex<OrdersQueue>>,
        kitchen_cond: Arc<Condvar>,
    ) -> Customer {
        Customer {
            id,
            requests,
            service,
            kitchen_queue,
            kitchen_cond,
            cancel_probability: CANCEL_PROBABILITY,
        }
    }

    pub fn with_cancel_probability(mut self, cancel_probability: f64) -> Result<Customer, PancakeError> {
        self.cancel_probability = validate_probability(cancel_probability)?;
        Ok(self)
    }

    pub fn place_orders(&self) -> Result<(), PancakeError> {
        loop {
            let request = {
                let mut requests = self.requests.lock()?;
                match requests.pop_front() {
                    Some(request) => request,
                    None => return Ok(()),
                }
            };

            if let Err(err) = self.place_order(&request) {
                if err == PancakeError::LockError {
                    return Err(err);
                }
                warn!("[CUSTOMER {}] Skipped order {:?}: {}", self.id, request, err);
            }
        }
    }

    fn place_order(&self, request: &OrderRequest) -> Result<(), PancakeError> {
        let order = self.service.create_order(request.building, request.room)?;
        debug!("[CUSTOMER {}] Created order {}", self.id, order.id());

        if let Err(err) = self.add_pancakes(order.id(), request) {
            self.service.cancel_order(order.id())?;
            return Err(err);
        }

        if thread_rng().gen_bool(self.cancel_probability) {
            self.service.cancel_order(order.id())?;
            info!("[CUSTOMER {}] Changed their mind, cancelled order {}", self.id, order.id());
            return Ok(());
        }

        if let Err(err) = self.service.complete_order(order.id()) {
            self.service.cancel_order(order.id())?;
            return Err(err);
        }

        let mut queue = self.kitchen_queue.lock()?;
        queue.push(order.id());
        self.kitchen_cond.notify_one();
        Ok(())
    }

    fn add_pancakes(&self, order_id: Uuid, request: &OrderRequest) -> Result<(), PancakeError> {
        for pancakes in &request.pancakes {
            self.service
                .add_pancakes(order_id, pancakes.ingredients.as_slice(), pancakes.quantity)?;
        }
        Ok(())
    }
}

/// `gen_bool` solo acepta probabilidades en [0, 1]
pub(crate) fn validate_probability(probability: f64) -> Result<f64, PancakeError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(PancakeError::DomainArgument(format!(
            "Cancel probability must be between 0 and 1 (got {})",
            probability
        )));
    }
    Ok(probability)
}
