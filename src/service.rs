//! Servicio de pedidos de pancakes.
//!
//! Los pedidos activos (NEW, COMPLETED, PREPARING) viven en `active_orders`, cada uno
//! detras de su propio mutex junto con su lista de pancakes. Toda validacion de estado y
//! toda modificacion de un pedido se hace con ese mutex tomado, por lo que las operaciones
//! sobre un mismo pedido quedan serializadas y las de pedidos distintos nunca compiten.
//! Los pedidos entregados o cancelados pasan a `finished_orders`.
//!
//! Nunca se toma el mutex de un pedido mientras se tiene una referencia a una entrada de
//! los mapas: primero se clona el `Arc` y se suelta la entrada.
use std::{
    collections::HashSet,
    mem,
    sync::{Arc, Mutex},
};

use dashmap::DashMap;
use log::debug;
use uuid::Uuid;

use crate::{
    dto::{OrderDto, PancakeDto},
    errors::PancakeError,
    ingredient::Ingredient,
    logger::{InMemoryOrderLogger, OrderLogger},
    order::{Order, OrderStatus},
    pancake::{Pancake, PancakeBuilder},
};

/// Pedido activo junto con sus pancakes, en orden de llegada.
#[derive(Debug)]
struct ActiveOrder {
    order: Order,
    pancakes: Vec<Pancake>,
}

type OrderSlot = Arc<Mutex<ActiveOrder>>;

enum FoundOrder {
    Active(OrderSlot),
    Finished(Order),
}

pub struct PancakeService {
    active_orders: DashMap<Uuid, OrderSlot>,
    finished_orders: DashMap<Uuid, Order>,
    logger: Arc<dyn OrderLogger>,
}

impl Default for PancakeService {
    fn default() -> Self {
        PancakeService::new(Arc::new(InMemoryOrderLogger::instance()))
    }
}

impl PancakeService {
    pub fn new(logger: Arc<dyn OrderLogger>) -> PancakeService {
        PancakeService {
            active_orders: DashMap::new(),
            finished_orders: DashMap::new(),
            logger,
        }
    }

    pub fn create_order(&self, building: u32, room: u32) -> Result<OrderDto, PancakeError> {
        let order = Order::new(building, room)?;
        let order_id = order.id();
        let slot = Arc::new(Mutex::new(ActiveOrder {
            order,
            pancakes: Vec::new(),
        }));

        let active = slot.lock()?;
        self.active_orders.insert(order_id, Arc::clone(&slot));
        self.logger.log_order_created(&active.order);
        Ok(OrderDto::new(&active.order, &active.pancakes))
    }

    /// Agrega `quantity` pancakes con los mismos ingredientes.
    /// Se valida primero la cantidad, despues el estado del pedido y por ultimo los nombres.
    pub fn add_pancakes<S: AsRef<str>>(
        &self,
        order_id: Uuid,
        ingredient_names: &[S],
        quantity: usize,
    ) -> Result<(), PancakeError> {
        if quantity < 1 {
            return Err(PancakeError::DomainArgument(
                "Quantity must be positive".to_string(),
            ));
        }

        self.with_new_order(order_id, |active| {
            let ingredients = resolve_ingredients(ingredient_names)?;
            if ingredients.is_empty() {
                return Err(PancakeError::DomainArgument(
                    "At least one ingredient is required".to_string(),
                ));
            }

            let pancakes = (0..quantity)
                .map(|_| {
                    PancakeBuilder::new(order_id)
                        .add_ingredients(&ingredients)
                        .build()
                })
                .collect::<Result<Vec<Pancake>, PancakeError>>()?;

            for pancake in pancakes {
                active.pancakes.push(pancake);
                if let Some(added) = active.pancakes.last() {
                    self.logger.log_pancake_added(order_id, added);
                }
            }
            Ok(())
        })
    }

    /// Quita el primer pancake cuyos ingredientes coinciden (como conjunto) con los pedidos
    pub fn remove_pancake<S: AsRef<str>>(
        &self,
        order_id: Uuid,
        ingredient_names: &[S],
    ) -> Result<(), PancakeError> {
        self.with_new_order(order_id, |active| {
            let ingredients: HashSet<Ingredient> =
                resolve_ingredients(ingredient_names)?.into_iter().collect();
            let position = active
                .pancakes
                .iter()
                .position(|pancake| pancake.has_ingredients(&ingredients))
                .ok_or_else(|| {
                    let names: Vec<&str> = ingredient_names.iter().map(|name| name.as_ref()).collect();
                    PancakeError::DomainArgument(format!(
                        "Pancake with ingredients {:?} not found in order {}",
                        names, order_id
                    ))
                })?;
            let removed = active.pancakes.remove(position);
            self.logger.log_pancake_removed(order_id, &removed);
            Ok(())
        })
    }

    pub fn remove_pancake_by_id(&self, order_id: Uuid, pancake_id: Uuid) -> Result<(), PancakeError> {
        self.with_new_order(order_id, |active| {
            let position = active
                .pancakes
                .iter()
                .position(|pancake| pancake.pancake_id() == pancake_id)
                .ok_or_else(|| {
                    PancakeError::DomainArgument(format!(
                        "Pancake with ID {} not found in order {}",
                        pancake_id, order_id
                    ))
                })?;
            let removed = active.pancakes.remove(position);
            self.logger.log_pancake_removed(order_id, &removed);
            Ok(())
        })
    }

    /// Quita los primeros `quantity` pancakes con exactamente esa descripcion.
    /// Si no hay suficientes no se quita ninguno.
    pub fn remove_pancakes(
        &self,
        description: &str,
        order_id: Uuid,
        quantity: usize,
    ) -> Result<(), PancakeError> {
        self.with_new_order(order_id, |active| {
            let available = active
                .pancakes
                .iter()
                .filter(|pancake| pancake.description() == description)
                .take(quantity)
                .count();
            if available < quantity {
                return Err(PancakeError::DomainArgument(format!(
                    "Cannot remove {} pancakes of type {}; only {} available",
                    quantity, description, available
                )));
            }

            let mut removed = Vec::with_capacity(quantity);
            let mut kept = Vec::with_capacity(active.pancakes.len() - quantity);
            for pancake in mem::take(&mut active.pancakes) {
                if removed.len() < quantity && pancake.description() == description {
                    removed.push(pancake);
                } else {
                    kept.push(pancake);
                }
            }
            active.pancakes = kept;

            for pancake in &removed {
                self.logger.log_pancake_removed(order_id, pancake);
            }
            Ok(())
        })
    }

    pub fn complete_order(&self, order_id: Uuid) -> Result<(), PancakeError> {
        match self.find_order(order_id)? {
            FoundOrder::Active(slot) => {
                let mut active = slot.lock()?;
                if active.pancakes.is_empty() {
                    return Err(no_pancakes_error(order_id));
                }
                self.apply_transition(&mut active.order, "Completed", Order::complete)?;
                self.logger.log_order_status_change(&active.order, "Completed");
                Ok(())
            }
            FoundOrder::Finished(_) => Err(no_pancakes_error(order_id)),
        }
    }

    pub fn prepare_order(&self, order_id: Uuid) -> Result<(), PancakeError> {
        match self.find_order(order_id)? {
            FoundOrder::Active(slot) => {
                let mut active = slot.lock()?;
                self.apply_transition(&mut active.order, "Preparing", Order::prepare)?;
                self.logger.log_order_status_change(&active.order, "Preparing");
                Ok(())
            }
            FoundOrder::Finished(mut order) => {
                self.apply_transition(&mut order, "Preparing", Order::prepare)
            }
        }
    }

    /// Entrega el pedido y devuelve una copia de como estaba en el momento de la entrega
    pub fn deliver_order(&self, order_id: Uuid) -> Result<OrderDto, PancakeError> {
        match self.find_order(order_id)? {
            FoundOrder::Active(slot) => {
                let mut active = slot.lock()?;
                self.apply_transition(&mut active.order, "Delivered", Order::deliver)?;

                let pancakes = mem::take(&mut active.pancakes);
                let delivered = OrderDto::new(&active.order, &pancakes);
                self.finish(&active.order);
                self.logger.log_order_delivered(&active.order);
                Ok(delivered)
            }
            FoundOrder::Finished(mut order) => {
                self.apply_transition(&mut order, "Delivered", Order::deliver)?;
                Ok(OrderDto::new(&order, &[]))
            }
        }
    }

    pub fn cancel_order(&self, order_id: Uuid) -> Result<(), PancakeError> {
        match self.find_order(order_id)? {
            FoundOrder::Active(slot) => {
                let mut active = slot.lock()?;
                self.apply_transition(&mut active.order, "Cancelled", Order::cancel)?;

                active.pancakes.clear();
                self.finish(&active.order);
                self.logger.log_order_status_change(&active.order, "Cancelled");
                Ok(())
            }
            FoundOrder::Finished(mut order) => {
                self.apply_transition(&mut order, "Cancelled", Order::cancel)
            }
        }
    }

    pub fn clear_all_finished_orders(&self) {
        debug!("Clearing {} finished orders", self.finished_orders.len());
        self.finished_orders.clear();
    }

    pub fn get_order_status(&self, order_id: Uuid) -> Result<OrderDto, PancakeError> {
        match self.find_order(order_id)? {
            FoundOrder::Active(slot) => {
                let active = slot.lock()?;
                Ok(OrderDto::new(&active.order, &active.pancakes))
            }
            FoundOrder::Finished(order) => Ok(OrderDto::new(&order, &[])),
        }
    }

    /// Pancakes actuales del pedido. Para pedidos terminados o inexistentes devuelve una lista vacia.
    pub fn get_pancake_descriptions(&self, order_id: Uuid) -> Result<Vec<PancakeDto>, PancakeError> {
        match self.active_order(order_id) {
            Some(slot) => {
                let active = slot.lock()?;
                Ok(active.pancakes.iter().map(PancakeDto::from).collect())
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn view_order(&self, order_id: Uuid) -> Result<Vec<String>, PancakeError> {
        match self.active_order(order_id) {
            Some(slot) => {
                let active = slot.lock()?;
                Ok(active
                    .pancakes
                    .iter()
                    .map(|pancake| pancake.description().to_string())
                    .collect())
            }
            None => Ok(Vec::new()),
        }
    }

    /// Ids de los pedidos que estan en `status`. Un pedido que cambia de estado mientras
    /// se recorre aparece a lo sumo una vez.
    pub fn list_orders_with_status(&self, status: OrderStatus) -> Result<HashSet<Uuid>, PancakeError> {
        let slots: Vec<OrderSlot> = self
            .active_orders
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut ids = HashSet::new();
        for slot in slots {
            let active = slot.lock()?;
            if active.order.status() == status {
                ids.insert(active.order.id());
            }
        }
        ids.extend(
            self.finished_orders
                .iter()
                .filter(|entry| entry.value().status() == status)
                .map(|entry| *entry.key()),
        );
        Ok(ids)
    }

    fn active_order(&self, order_id: Uuid) -> Option<OrderSlot> {
        self.active_orders
            .get(&order_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn finished_order(&self, order_id: Uuid) -> Option<Order> {
        self.finished_orders
            .get(&order_id)
            .map(|entry| entry.value().clone())
    }

    fn find_order(&self, order_id: Uuid) -> Result<FoundOrder, PancakeError> {
        if let Some(slot) = self.active_order(order_id) {
            return Ok(FoundOrder::Active(slot));
        }
        self.finished_order(order_id)
            .map(FoundOrder::Finished)
            .ok_or_else(|| {
                PancakeError::DomainArgument(format!("Order {} not found", order_id))
            })
    }

    /// Ejecuta `action` con el pedido tomado, solo si esta en NEW
    fn with_new_order<T, F>(&self, order_id: Uuid, action: F) -> Result<T, PancakeError>
    where
        F: FnOnce(&mut ActiveOrder) -> Result<T, PancakeError>,
    {
        match self.find_order(order_id)? {
            FoundOrder::Active(slot) => {
                let mut active = slot.lock()?;
                require_status(&active.order, OrderStatus::New)?;
                action(&mut *active)
            }
            FoundOrder::Finished(order) => Err(wrong_status_error(&order, OrderStatus::New)),
        }
    }

    fn apply_transition(
        &self,
        order: &mut Order,
        action: &str,
        transition: fn(&mut Order) -> Result<(), PancakeError>,
    ) -> Result<(), PancakeError> {
        if let Err(error) = transition(order) {
            self.logger.log_invalid_transition(order, action);
            return Err(error);
        }
        Ok(())
    }

    /// Mueve el pedido a `finished_orders`. Se llama con el mutex del pedido tomado,
    /// despues de la transicion a un estado final.
    /// Entre las dos operaciones el id esta en ambos mapas, nunca en ninguno; quien lo
    /// encuentre en `active_orders` espera el mutex y ve el estado final.
    fn finish(&self, order: &Order) {
        debug_assert!(!order.status().is_active());
        self.finished_orders.insert(order.id(), order.clone());
        self.active_orders.remove(&order.id());
    }
}

fn resolve_ingredients<S: AsRef<str>>(names: &[S]) -> Result<Vec<Ingredient>, PancakeError> {
    names
        .iter()
        .map(|name| Ingredient::from_name(name.as_ref()))
        .collect()
}

fn require_status(order: &Order, expected: OrderStatus) -> Result<(), PancakeError> {
    if order.status() != expected {
        return Err(wrong_status_error(order, expected));
    }
    Ok(())
}

fn wrong_status_error(order: &Order, expected: OrderStatus) -> PancakeError {
    PancakeError::InvalidState(format!(
        "Order {} must be {} (current: {})",
        order.id(),
        expected,
        order.status()
    ))
}

fn no_pancakes_error(order_id: Uuid) -> PancakeError {
    PancakeError::InvalidState(format!(
        "Cannot complete order {} with no pancakes",
        order_id
    ))
}
