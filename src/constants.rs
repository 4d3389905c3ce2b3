//! Parametros de configuracion de la pancakeria

/// Numero minimo de edificio al que se puede entregar
pub const MIN_BUILDING: u32 = 1;

/// Numero maximo de edificio al que se puede entregar
pub const MAX_BUILDING: u32 = 10;

/// Numero minimo de habitacion
pub const MIN_ROOM: u32 = 1;

/// Numero maximo de habitacion
pub const MAX_ROOM: u32 = 999;

/// Cantidad de cocineros que preparan y entregan pedidos en la simulacion
pub const N_COOKS: usize = 4;

/// Cantidad de clientes que arman pedidos en paralelo en la simulacion
pub const N_CUSTOMERS: usize = 6;

/// Probabilidad de que un cliente cancele su pedido en lugar de completarlo
pub const CANCEL_PROBABILITY: f64 = 0.2;

/// Indica cuanto tiempo se debe de esperar (por lo menos) para imprimir las estadisticas de los pedidos
pub const STATISTICS_WAIT_IN_MS: u64 = 50;

/// Archivo de pedidos por defecto
pub const ORDERS_FILE: &str = "orders.json";
