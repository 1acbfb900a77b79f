use crate::storage::memory::{get_metrics_memory, Memory};
use crate::storage::storable::Cbor;
use crate::error::{ShipmentError, ShipmentResult};
use crate::metrics::ShipmentMetrics;
use ic_stable_structures::StableCell;
use std::cell::RefCell;

type StorableShipmentMetrics = Cbor<ShipmentMetrics>;

thread_local! {
    /// Global shipment counters
    pub static METRICS_CELL: RefCell<StableCell<StorableShipmentMetrics, Memory>> = RefCell::new(
        StableCell::init(get_metrics_memory(), Cbor(ShipmentMetrics::default()))
            .expect("Failed to initialize metrics stable cell")
    );
}

pub fn get_metrics() -> ShipmentMetrics {
    METRICS_CELL.with(|cell| cell.borrow().get().0.clone())
}

/// Applies `update_fn` to a copy of the metrics and writes it back.
pub fn update_metrics<F>(update_fn: F) -> ShipmentResult<()>
where
    F: FnOnce(&mut ShipmentMetrics),
{
    METRICS_CELL.with(|cell| {
        let mut metrics = cell.borrow().get().0.clone();
        update_fn(&mut metrics);
        cell.borrow_mut()
            .set(Cbor(metrics))
            .map_err(|e| ShipmentError::storage("Failed to update metrics", e))?;
        Ok(())
    })
}
