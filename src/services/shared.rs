//! Thread-safe handle to a single lot
//!
//! All mutations go through one `parking_lot::Mutex`, so check-in and
//! check-out are serialized and a slot is never handed to two vehicles.

use crate::error::LotResult;
use crate::infra::metrics::LotMetrics;
use crate::services::lot::{CheckInReceipt, CheckOutReceipt, ParkingLot};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle; clones refer to the same lot
#[derive(Debug, Clone)]
pub struct SharedParkingLot {
    inner: Arc<Mutex<ParkingLot>>,
    metrics: Arc<LotMetrics>,
}

impl SharedParkingLot {
    pub fn new(lot: ParkingLot) -> Self {
        let metrics = lot.metrics().clone();
        Self { inner: Arc::new(Mutex::new(lot)), metrics }
    }

    pub fn check_in_plate(&self, plate: &str, owner: &str) -> LotResult<CheckInReceipt> {
        self.inner.lock().check_in_plate(plate, owner)
    }

    pub fn check_out(&self, plate: &str) -> LotResult<CheckOutReceipt> {
        self.inner.lock().check_out(plate)
    }

    /// Run `f` with exclusive access to the lot
    pub fn with<R>(&self, f: impl FnOnce(&mut ParkingLot) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Metrics readable without taking the lot lock
    pub fn metrics(&self) -> &Arc<LotMetrics> {
        &self.metrics
    }
}
