//! Registro de eventos de los pedidos
use std::{
    collections::VecDeque,
    sync::{Mutex, OnceLock},
};

use chrono::{SecondsFormat, Utc};
use log::{error, info, warn};
use uuid::Uuid;

use crate::{order::Order, pancake::Pancake};

/// Destino de los eventos que emite el servicio. Cada evento se registra
/// cuando el cambio que describe ya es visible para el resto de los hilos.
pub trait OrderLogger: Send + Sync {
    fn log_order_created(&self, order: &Order);
    fn log_pancake_added(&self, order_id: Uuid, pancake: &Pancake);
    fn log_pancake_removed(&self, order_id: Uuid, pancake: &Pancake);
    fn log_order_status_change(&self, order: &Order, action: &str);
    fn log_order_delivered(&self, order: &Order);
    fn log_invalid_transition(&self, order: &Order, action: &str);
    fn last_log(&self) -> Option<String>;
    fn clear_logs(&self);
}

/// Logger que guarda los registros en memoria y ademas los reenvia a `log`.
#[derive(Debug, Default)]
pub struct InMemoryOrderLogger {
    records: Mutex<VecDeque<String>>,
}

static INSTANCE: OnceLock<InMemoryOrderLogger> = OnceLock::new();

impl InMemoryOrderLogger {
    pub fn new() -> InMemoryOrderLogger {
        InMemoryOrderLogger::default()
    }

    /// Instancia compartida por todo el proceso
    pub fn instance() -> &'static InMemoryOrderLogger {
        INSTANCE.get_or_init(InMemoryOrderLogger::new)
    }

    /// Copia de todos los registros, del mas viejo al mas nuevo
    pub fn records(&self) -> Vec<String> {
        match self.records.lock() {
            Ok(records) => records.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn record(&self, message: String) {
        let record = format!(
            "[{}] {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            message
        );
        if let Ok(mut records) = self.records.lock() {
            records.push_back(record);
            return;
        }
        error!("Error while taking the log queue lock");
    }
}

impl OrderLogger for InMemoryOrderLogger {
    fn log_order_created(&self, order: &Order) {
        let message = format!(
            "[CREATE] Order {} for building {} room {}",
            order.id(),
            order.building(),
            order.room()
        );
        info!("{}", message);
        self.record(message);
    }

    fn log_pancake_added(&self, order_id: Uuid, pancake: &Pancake) {
        let message = format!("[ADD] {} to order {}", pancake.description(), order_id);
        info!("{}", message);
        self.record(message);
    }

    fn log_pancake_removed(&self, order_id: Uuid, pancake: &Pancake) {
        let message = format!("[REMOVE] {} from order {}", pancake.description(), order_id);
        info!("{}", message);
        self.record(message);
    }

    fn log_order_status_change(&self, order: &Order, action: &str) {
        let message = format!(
            "[STATUS] Order {} {} → {}",
            order.id(),
            action,
            order.status()
        );
        info!("{}", message);
        self.record(message);
    }

    fn log_order_delivered(&self, order: &Order) {
        let message = format!("[DELIVER] Order {}", order.id());
        info!("{}", message);
        self.record(message);
    }

    fn log_invalid_transition(&self, order: &Order, action: &str) {
        let message = format!(
            "[ERROR] Invalid {} for order {} (current: {})",
            action,
            order.id(),
            order.status()
        );
        warn!("{}", message);
        self.record(message);
    }

    fn last_log(&self) -> Option<String> {
        self.records.lock().ok()?.back().cloned()
    }

    fn clear_logs(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl<L: OrderLogger + ?Sized> OrderLogger for &'static L {
    fn log_order_created(&self, order: &Order) {
        (**self).log_order_created(order)
    }

    fn log_pancake_added(&self, order_id: Uuid, pancake: &Pancake) {
        (**self).log_pancake_added(order_id, pancake)
    }

    fn log_pancake_removed(&self, order_id: Uuid, pancake: &Pancake) {
        (**self).log_pancake_removed(order_id, pancake)
    }

    fn log_order_status_change(&self, order: &Order, action: &str) {
        (**self).log_order_status_change(order, action)
    }

    fn log_order_delivered(&self, order: &Order) {
        (**self).log_order_delivered(order)
    }

    fn log_invalid_transition(&self, order: &Order, action: &str) {
        (**self).log_invalid_transition(order, action)
    }

    fn last_log(&self) -> Option<String> {
        (**self).last_log()
    }

    fn clear_logs(&self) {
        (**self).clear_logs()
    }
}
