//! Buffer capacity management
//!
//! Grows the chunk buffer geometrically and gives memory back once a large
//! in-flight value has been released. Hysteresis keeps a buffer that is
//! repeatedly filled and drained from reallocating on every cycle.

use bytes::BytesMut;

/// Smallest saving worth a shrinking reallocation
const MIN_SHRINK_SAVING: usize = 8192;

#[derive(Debug)]
pub struct CapacityManager {
    pub(super) initial_capacity: usize,
    /// Capacity the buffer had when it was last shrunk
    pub(super) last_shrink_size: Option<usize>,
    /// Number of growth operations since last shrink
    pub(super) growth_operations: u32,
    /// Minimum growth operations before a shrink is considered
    pub(super) hysteresis_threshold: u32,
}

impl CapacityManager {
    pub(super) fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            last_shrink_size: None,
            growth_operations: 0,
            hysteresis_threshold: 3,
        }
    }

    pub(super) fn ensure_capacity(&mut self, buffer: &mut BytesMut, needed: usize) {
        let current_capacity = buffer.capacity();
        let required = buffer.len().saturating_add(needed);

        if required > current_capacity {
            let new_capacity = required.max(current_capacity.saturating_mul(2));
            buffer.reserve(new_capacity - buffer.len());
            self.growth_operations = self.growth_operations.saturating_add(1);

            tracing::debug!(
                target: "jsonreader::buffer",
                from = current_capacity,
                to = buffer.capacity(),
                growth_operations = self.growth_operations,
                "Chunk buffer grown"
            );
        }
    }

    /// Reallocate a mostly empty buffer down to a size proportional to its contents
    pub(super) fn maybe_shrink(&mut self, buffer: &mut BytesMut) {
        if self.growth_operations < self.hysteresis_threshold {
            return;
        }

        let capacity = buffer.capacity();
        let size = buffer.len();

        // Don't shrink back toward a size we recently shrunk from
        if let Some(last_shrink) = self.last_shrink_size {
            if capacity <= last_shrink.saturating_mul(2) {
                return;
            }
        }

        // Less than 25% utilized, well above the initial size, and a real saving
        let under_utilized = size.saturating_mul(4) < capacity;
        if !under_utilized
            || capacity <= self.initial_capacity.saturating_mul(2)
            || capacity <= size.saturating_add(MIN_SHRINK_SAVING)
        {
            return;
        }

        let target_capacity = size.saturating_mul(4).max(self.initial_capacity);
        if target_capacity >= capacity / 2 {
            return;
        }

        let mut new_buffer = BytesMut::with_capacity(target_capacity);
        new_buffer.extend_from_slice(&buffer[..]);
        *buffer = new_buffer;

        self.last_shrink_size = Some(capacity);
        self.growth_operations = 0;

        log::debug!(
            "Buffer shrunk: {} bytes -> {} bytes (saved {} bytes)",
            capacity,
            target_capacity,
            capacity - target_capacity
        );
    }

    pub(super) fn reset(&mut self) {
        self.last_shrink_size = None;
        self.growth_operations = 0;
    }
}
