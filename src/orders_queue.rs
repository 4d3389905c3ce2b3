//! Cola de pedidos completados que esperan a la cocina
use std::collections::VecDeque;

use uuid::Uuid;

/// Ids de pedidos en estado COMPLETED, en el orden en que los clientes los completaron.
/// Una vez cerrada no se le agregan mas pedidos, pero los que quedan se siguen sacando.
#[derive(Default)]
pub struct OrdersQueue {
    pending: VecDeque<Uuid>,
    closed: bool,
}

impl OrdersQueue {
    pub fn new() -> OrdersQueue {
        OrdersQueue::default()
    }

    pub fn push(&mut self, order_id: Uuid) {
        self.pending.push_back(order_id);
    }

    pub fn pop(&mut self) -> Option<Uuid> {
        self.pending.pop_front()
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Un cocinero espera mientras no haya pedidos y los clientes sigan atendiendo
    pub fn must_wait(&self) -> bool {
        self.pending.is_empty() && !self.closed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{logger::InMemoryOrderLogger, service::PancakeService};

    fn completed_order(service: &PancakeService, room: u32) -> Uuid {
        let order_id = service.create_order(2, room).unwrap().id();
        service.add_pancakes(order_id, &["milk chocolate"], 1).unwrap();
        service.complete_order(order_id).unwrap();
        order_id
    }

    #[test]
    fn should_hand_orders_to_the_kitchen_in_completion_order() {
        let service = PancakeService::new(Arc::new(InMemoryOrderLogger::new()));
        let completed: Vec<Uuid> = (1..=4).map(|room| completed_order(&service, room)).collect();

        let mut queue = OrdersQueue::new();
        for order_id in &completed {
            queue.push(*order_id);
        }

        let popped: Vec<Uuid> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(completed, popped);
    }

    #[test]
    fn should_let_cooks_drain_a_closed_queue() {
        let service = PancakeService::new(Arc::new(InMemoryOrderLogger::new()));
        let mut queue = OrdersQueue::new();
        assert_eq!(true, queue.must_wait());

        let order_id = completed_order(&service, 7);
        queue.push(order_id);
        queue.close();

        assert_eq!(false, queue.must_wait());
        assert_eq!(Some(order_id), queue.pop());
        assert_eq!(false, queue.must_wait());
        assert_eq!(None, queue.pop());
    }
}
