//! Catalogo de ingredientes disponibles para los pancakes
use std::{fmt, str::FromStr};

use crate::errors::PancakeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ingredient {
    DarkChocolate,
    MilkChocolate,
    WhippedCream,
    Hazelnuts,
}

impl Ingredient {
    pub const ALL: [Ingredient; 4] = [
        Ingredient::DarkChocolate,
        Ingredient::MilkChocolate,
        Ingredient::WhippedCream,
        Ingredient::Hazelnuts,
    ];

    /// Nombre con el que se muestra el ingrediente en las descripciones
    pub fn display_name(&self) -> &'static str {
        match self {
            Ingredient::DarkChocolate => "dark chocolate",
            Ingredient::MilkChocolate => "milk chocolate",
            Ingredient::WhippedCream => "whipped cream",
            Ingredient::Hazelnuts => "hazelnuts",
        }
    }

    /// Busca el ingrediente por su nombre, sin distinguir mayusculas de minusculas
    pub fn from_name(name: &str) -> Result<Ingredient, PancakeError> {
        let lowercase = name.to_lowercase();
        Ingredient::ALL
            .iter()
            .copied()
            .find(|ingredient| ingredient.display_name() == lowercase)
            .ok_or_else(|| PancakeError::DomainArgument(format!("Unknown ingredient: {}", name)))
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Ingredient {
    type Err = PancakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ingredient::from_name(s)
    }
}
