//! Pancakes y su construccion
use std::collections::HashSet;

use uuid::Uuid;

use crate::{errors::PancakeError, ingredient::Ingredient};

/// Pancake de un pedido. No cambia luego de construido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pancake {
    order_id: Uuid,
    pancake_id: Uuid,
    ingredients: Vec<Ingredient>,
    description: String,
}

impl Pancake {
    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn pancake_id(&self) -> Uuid {
        self.pancake_id
    }

    /// Ingredientes sin repetir, en el orden en que se agregaron
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Compara los ingredientes como conjunto, sin importar el orden
    pub fn has_ingredients(&self, ingredients: &HashSet<Ingredient>) -> bool {
        self.ingredients.len() == ingredients.len()
            && self.ingredients.iter().all(|ingredient| ingredients.contains(ingredient))
    }
}

/// Arma la descripcion de un pancake a partir de sus ingredientes
pub fn describe(ingredients: &[Ingredient]) -> String {
    let names: Vec<&str> = ingredients.iter().map(Ingredient::display_name).collect();
    format!("Delicious pancake with {}!", names.join(", "))
}

/// Constructor de pancakes. Se crea uno por llamada y se consume al construir.
#[derive(Debug)]
pub struct PancakeBuilder {
    order_id: Uuid,
    ingredients: Vec<Ingredient>,
}

impl PancakeBuilder {
    pub fn new(order_id: Uuid) -> PancakeBuilder {
        PancakeBuilder {
            order_id,
            ingredients: Vec::new(),
        }
    }

    /// Agrega un ingrediente; los repetidos se ignoran
    pub fn add_ingredient(mut self, ingredient: Ingredient) -> PancakeBuilder {
        if !self.ingredients.contains(&ingredient) {
            self.ingredients.push(ingredient);
        }
        self
    }

    pub fn add_ingredients<'a, I>(self, ingredients: I) -> PancakeBuilder
    where
        I: IntoIterator<Item = &'a Ingredient>,
    {
        ingredients
            .into_iter()
            .fold(self, |builder, ingredient| builder.add_ingredient(*ingredient))
    }

    pub fn build(self) -> Result<Pancake, PancakeError> {
        if self.ingredients.is_empty() {
            return Err(PancakeError::Contract(
                "Pancake must have at least one ingredient".to_string(),
            ));
        }
        let description = describe(&self.ingredients);
        Ok(Pancake {
            order_id: self.order_id,
            pancake_id: Uuid::new_v4(),
            ingredients: self.ingredients,
            description,
        })
    }
}
