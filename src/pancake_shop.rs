//! Simulacion de la pancakeria: clientes, cocineros y estadisticas en hilos separados
use std::{
    collections::VecDeque,
    sync::{Arc, Condvar, Mutex},
    thread::{self, JoinHandle},
};

use log::error;

use crate::{
    constants::{CANCEL_PROBABILITY, N_COOKS, N_CUSTOMERS},
    customer::{validate_probability, Customer},
    errors::PancakeError,
    kitchen::Cook,
    orders_queue::OrdersQueue,
    orders_reader::OrderRequest,
    service::PancakeService,
    statistics::StatisticsPrinter,
};

pub struct PancakeShop {
    service: Arc<PancakeService>,
    kitchen_queue: Arc<Mutex<OrdersQueue>>,
    kitchen_cond: Arc<Condvar>,
    orders_delivered: Arc<Mutex<u64>>,
    n_customers: usize,
    n_cooks: usize,
    cancel_probability: f64,
}

impl PancakeShop {
    pub fn new(service: Arc<PancakeService>) -> PancakeShop {
        PancakeShop {
            service,
            kitchen_queue: Arc::new(Mutex::new(OrdersQueue::new())),
            kitchen_cond: Arc::new(Condvar::new()),
            orders_delivered: Arc::new(Mutex::new(0)),
            n_customers: N_CUSTOMERS,
            n_cooks: N_COOKS,
            cancel_probability: CANCEL_PROBABILITY,
        }
    }

    pub fn with_cancel_probability(mut self, cancel_probability: f64) -> Result<PancakeShop, PancakeError> {
        self.cancel_probability = validate_probability(cancel_probability)?;
        Ok(self)
    }

    /// Atiende todos los pedidos y devuelve cuantos se entregaron
    pub fn manage_orders(&self, requests: Vec<OrderRequest>) -> Result<u64, PancakeError> {
        let requests = Arc::new(Mutex::new(VecDeque::from(requests)));
        let customers = (0..self.n_customers)
            .map(|id| {
                Customer::new(
                    id,
                    requests.clone(),
                    self.service.clone(),
                    self.kitchen_queue.clone(),
                    self.kitchen_cond.clone(),
                )
                .with_cancel_probability(self.cancel_probability)
            })
            .collect::<Result<Vec<Customer>, PancakeError>>()?;

        let statistics = Arc::new(StatisticsPrinter::new(
            self.service.clone(),
            self.orders_delivered.clone(),
        ));
        let statistics_clone = statistics.clone();
        let statistics_thread = thread::spawn(move || statistics_clone.process_statistics());

        let cook_threads: Vec<JoinHandle<Result<(), PancakeError>>> = (0..self.n_cooks)
            .map(|id| {
                let cook = Cook::new(
                    id,
                    self.kitchen_queue.clone(),
                    self.kitchen_cond.clone(),
                    self.service.clone(),
                    self.orders_delivered.clone(),
                );
                thread::spawn(move || cook.handle_orders())
            })
            .collect();

        let customer_threads: Vec<JoinHandle<Result<(), PancakeError>>> = customers
            .into_iter()
            .map(|customer| thread::spawn(move || customer.place_orders()))
            .collect();

        join_all("customer", customer_threads);
        self.close_kitchen()?;
        join_all("cook", cook_threads);

        statistics.finish();
        join_all("statistics", vec![statistics_thread]);

        let delivered = *self.orders_delivered.lock()?;
        Ok(delivered)
    }

    fn close_kitchen(&self) -> Result<(), PancakeError> {
        let mut queue = self.kitchen_queue.lock()?;
        queue.close();
        self.kitchen_cond.notify_all();
        Ok(())
    }
}

fn join_all(name: &str, handles: Vec<JoinHandle<Result<(), PancakeError>>>) {
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!("[SHOP] A {} thread failed: {}", name, err),
            Err(_) => error!("[SHOP] A {} thread panicked", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        logger::InMemoryOrderLogger,
        order::OrderStatus,
        orders_reader::PancakeRequest,
    };

    fn request(building: u32, room: u32, ingredients: &[&str], quantity: usize) -> OrderRequest {
        OrderRequest {
            building,
            room,
            pancakes: vec![PancakeRequest {
                ingredients: ingredients.iter().map(|name| name.to_string()).collect(),
                quantity,
            }],
        }
    }

    #[test]
    fn should_deliver_every_order_when_nobody_cancels() {
        let service = Arc::new(PancakeService::new(Arc::new(InMemoryOrderLogger::new())));
        let shop = PancakeShop::new(service.clone()).with_cancel_probability(0.0).unwrap();
        let requests: Vec<OrderRequest> = (1..=20)
            .map(|room| request(1 + room % 10, room, &["dark chocolate"], 2))
            .collect();

        let delivered = shop.manage_orders(requests).unwrap();

        assert_eq!(20, delivered);
        assert_eq!(
            20,
            service
                .list_orders_with_status(OrderStatus::Delivered)
                .unwrap()
                .len()
        );
    }

    #[test]
    fn should_cancel_every_order_when_everybody_changes_their_mind() {
        let service = Arc::new(PancakeService::new(Arc::new(InMemoryOrderLogger::new())));
        let shop = PancakeShop::new(service.clone()).with_cancel_probability(1.0).unwrap();
        let requests = vec![
            request(1, 1, &["hazelnuts"], 1),
            request(2, 2, &["whipped cream"], 3),
        ];

        let delivered = shop.manage_orders(requests).unwrap();

        assert_eq!(0, delivered);
        assert_eq!(
            2,
            service
                .list_orders_with_status(OrderStatus::Cancelled)
                .unwrap()
                .len()
        );
    }

    #[test]
    fn should_skip_invalid_requests() {
        let service = Arc::new(PancakeService::new(Arc::new(InMemoryOrderLogger::new())));
        let shop = PancakeShop::new(service.clone()).with_cancel_probability(0.0).unwrap();
        let requests = vec![
            request(11, 1, &["hazelnuts"], 1),
            request(1, 1, &["bacon"], 1),
            request(1, 2, &["milk chocolate"], 1),
        ];

        let delivered = shop.manage_orders(requests).unwrap();

        assert_eq!(1, delivered);
        assert_eq!(
            1,
            service
                .list_orders_with_status(OrderStatus::Cancelled)
                .unwrap()
                .len()
        );
    }

    #[test]
    fn should_cancel_orders_that_cannot_be_completed() {
        let service = Arc::new(PancakeService::new(Arc::new(InMemoryOrderLogger::new())));
        let shop = PancakeShop::new(service.clone()).with_cancel_probability(0.0).unwrap();
        let requests = vec![
            OrderRequest {
                building: 1,
                room: 1,
                pancakes: Vec::new(),
            },
            request(1, 2, &["dark chocolate"], 1),
        ];

        let delivered = shop.manage_orders(requests).unwrap();

        assert_eq!(1, delivered);
        assert_eq!(
            true,
            service
                .list_orders_with_status(OrderStatus::New)
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            1,
            service
                .list_orders_with_status(OrderStatus::Cancelled)
                .unwrap()
                .len()
        );
    }

    #[test]
    fn should_reject_an_invalid_cancel_probability() {
        let service = Arc::new(PancakeService::new(Arc::new(InMemoryOrderLogger::new())));
        let result = PancakeShop::new(service).with_cancel_probability(2.0);
        assert_eq!(true, result.is_err());
    }
}
