//! Copias inmutables de pedidos y pancakes que se devuelven a los clientes
use serde::Serialize;
use uuid::Uuid;

use crate::{order::Order, pancake::Pancake};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PancakeDto {
    order_id: Uuid,
    pancake_id: Uuid,
    ingredients: Vec<String>,
    description: String,
}

impl PancakeDto {
    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn pancake_id(&self) -> Uuid {
        self.pancake_id
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl From<&Pancake> for PancakeDto {
    fn from(pancake: &Pancake) -> Self {
        PancakeDto {
            order_id: pancake.order_id(),
            pancake_id: pancake.pancake_id(),
            ingredients: pancake
                .ingredients()
                .iter()
                .map(|ingredient| ingredient.display_name().to_string())
                .collect(),
            description: pancake.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDto {
    id: Uuid,
    building: u32,
    room: u32,
    status: String,
    pancakes: Vec<PancakeDto>,
}

impl OrderDto {
    pub fn new(order: &Order, pancakes: &[Pancake]) -> OrderDto {
        OrderDto {
            id: order.id(),
            building: order.building(),
            room: order.room(),
            status: order.status().name().to_string(),
            pancakes: pancakes.iter().map(PancakeDto::from).collect(),
        }
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

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn pancakes(&self) -> &[PancakeDto] {
        &self.pancakes
    }
}
