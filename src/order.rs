//! Pedido y su ciclo de vida
use std::{fmt, str::FromStr};

use uuid::Uuid;

use crate::{
    constants::{MAX_BUILDING, MAX_ROOM, MIN_BUILDING, MIN_ROOM},
    errors::PancakeError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    New,
    Completed,
    Preparing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn name(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Indica si el pedido sigue en la pancakeria (NEW, COMPLETED o PREPARING)
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::New | OrderStatus::Completed | OrderStatus::Preparing
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderStatus {
    type Err = PancakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(OrderStatus::New),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(PancakeError::DomainArgument(format!(
                "Unknown order status: {}",
                s
            ))),
        }
    }
}

/// Pedido a entregar en un edificio y habitacion.
/// Solo el estado cambia luego de crearlo; las transiciones reciben `&mut self`,
/// por lo que quien tenga el pedido detras de un lock las ejecuta de forma atomica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: Uuid,
    building: u32,
    room: u32,
    status: OrderStatus,
}

impl Order {
    pub fn new(building: u32, room: u32) -> Result<Order, PancakeError> {
        Ok(Order {
            id: Uuid::new_v4(),
            building: validate_building(building)?,
            room: validate_room(room)?,
            status: OrderStatus::New,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn building(&self) -> u32 {
        self.building
    }

    pub fn room(&self) -> u32 {
        self.room
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn complete(&mut self) -> Result<(), PancakeError> {
        self.transition(OrderStatus::New, OrderStatus::Completed)
    }

    pub fn prepare(&mut self) -> Result<(), PancakeError> {
        self.transition(OrderStatus::Completed, OrderStatus::Preparing)
    }

    pub fn deliver(&mut self) -> Result<(), PancakeError> {
        self.transition(OrderStatus::Preparing, OrderStatus::Delivered)
    }

    pub fn cancel(&mut self) -> Result<(), PancakeError> {
        if self.status != OrderStatus::New && self.status != OrderStatus::Completed {
            return Err(PancakeError::InvalidState(
                "Can only cancel either NEW or COMPLETED orders".to_string(),
            ));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    fn transition(&mut self, required: OrderStatus, next: OrderStatus) -> Result<(), PancakeError> {
        if self.status != required {
            return Err(PancakeError::InvalidState(format!(
                "Order must be {} (current: {})",
                required, self.status
            )));
        }
        self.status = next;
        Ok(())
    }
}

fn validate_building(building: u32) -> Result<u32, PancakeError> {
    if !(MIN_BUILDING..=MAX_BUILDING).contains(&building) {
        return Err(PancakeError::DomainArgument(format!(
            "Building must be between {} and {}",
            MIN_BUILDING, MAX_BUILDING
        )));
    }
    Ok(building)
}

fn validate_room(room: u32) -> Result<u32, PancakeError> {
    if !(MIN_ROOM..=MAX_ROOM).contains(&room) {
        return Err(PancakeError::DomainArgument(format!(
            "Room must be between {} and {}",
            MIN_ROOM, MAX_ROOM
        )));
    }
    Ok(room)
}
