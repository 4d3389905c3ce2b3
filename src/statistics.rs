use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use log::{error, info};

use crate::{
    constants::STATISTICS_WAIT_IN_MS,
    errors::PancakeError,
    order::OrderStatus,
    service::PancakeService,
};

const STATUSES: [OrderStatus; 5] = [
    OrderStatus::New,
    OrderStatus::Completed,
    OrderStatus::Preparing,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

pub struct StatisticsPrinter {
    service: Arc<PancakeService>,
    delivered: Arc<Mutex<u64>>,
    finished: Mutex<bool>,
}

impl StatisticsPrinter {
    pub fn new(service: Arc<PancakeService>, delivered: Arc<Mutex<u64>>) -> StatisticsPrinter {
        StatisticsPrinter {
            service,
            delivered,
            finished: Mutex::new(false),
        }
    }

    /// Pide al hilo de estadisticas que imprima un ultimo resumen y termine
    pub fn finish(&self) {
        match self.finished.lock() {
            Ok(mut finished) => *finished = true,
            Err(_) => error!("[STATISTICS] Could not stop the statistics thread"),
        }
    }

    pub fn process_statistics(&self) -> Result<(), PancakeError> {
        while !*self.finished.lock()? {
            self.print_statistics()?;
            thread::sleep(Duration::from_millis(STATISTICS_WAIT_IN_MS));
        }
        self.print_statistics()
    }

    fn print_statistics(&self) -> Result<(), PancakeError> {
        info!("{}", self.statistics()?);
        Ok(())
    }

    pub fn statistics(&self) -> Result<String, PancakeError> {
        let delivered = *self.delivered.lock()?;
        let mut statistics = format!("[STATISTICS] Orders delivered={} | Orders by status |", delivered);
        for status in STATUSES {
            let count = self.service.list_orders_with_status(status)?.len();
            statistics.push_str(&format!(" {}={} ", status, count));
        }
        Ok(statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::InMemoryOrderLogger;

    #[test]
    fn should_count_orders_by_status() {
        let service = Arc::new(PancakeService::new(Arc::new(InMemoryOrderLogger::new())));
        service.create_order(1, 1).unwrap();
        let cancelled = service.create_order(1, 2).unwrap();
        service.cancel_order(cancelled.id()).unwrap();

        let printer = StatisticsPrinter::new(service, Arc::new(Mutex::new(0)));
        let statistics = printer.statistics().unwrap();

        assert_eq!(
            "[STATISTICS] Orders delivered=0 | Orders by status | NEW=1  COMPLETED=0  PREPARING=0  DELIVERED=0  CANCELLED=1 ",
            statistics
        );
    }

    #[test]
    fn should_stop_after_being_finished() {
        let service = Arc::new(PancakeService::new(Arc::new(InMemoryOrderLogger::new())));
        let printer = StatisticsPrinter::new(service, Arc::new(Mutex::new(0)));
        printer.finish();
        assert_eq!(true, printer.process_statistics().is_ok());
    }
}
