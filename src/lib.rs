//! Servicio de pedidos de pancakes en memoria.
//!
//! Los clientes crean pedidos para un edificio y una habitacion, les agregan o quitan
//! pancakes y la cocina los hace avanzar por NEW → COMPLETED → PREPARING → DELIVERED.
//! Un pedido puede cancelarse mientras siga en NEW o COMPLETED.
//! [`service::PancakeService`] puede usarse desde varios hilos a la vez.
pub mod constants;
pub mod customer;
pub mod dto;
pub mod errors;
pub mod ingredient;
pub mod kitchen;
pub mod logger;
pub mod order;
pub mod orders_queue;
pub mod orders_reader;
pub mod pancake;
pub mod pancake_shop;
pub mod service;
pub mod statistics;

pub use dto::{OrderDto, PancakeDto};
pub use errors::PancakeError;
pub use ingredient::Ingredient;
pub use logger::{InMemoryOrderLogger, OrderLogger};
pub use order::{Order, OrderStatus};
pub use pancake::{Pancake, PancakeBuilder};
pub use service::PancakeService;
