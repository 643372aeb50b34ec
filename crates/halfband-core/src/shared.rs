//! Lock-free parameter store for cross-thread control.
//!
//! [`SharedParams`] keeps one `AtomicU32` per active parameter, holding the
//! `f32` bit pattern. A control thread calls [`set`](SharedParams::set); the
//! audio thread calls [`Engine::apply_shared`](crate::Engine::apply_shared)
//! once per callback to copy the latest values into the inner processor.
//! Values are stored as given, without clamping.

use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::param_info::ParamDescriptor;
use crate::param_table::ParameterTable;
use crate::processor::InnerProcessor;

/// Atomic `f32` values indexed like a [`ParameterTable`].
#[derive(Debug)]
pub struct SharedParams {
    values: Vec<AtomicU32>,
}

impl SharedParams {
    /// Creates a store initialized to each descriptor's initial value.
    pub fn new<'a>(descriptors: impl IntoIterator<Item = &'a ParamDescriptor>) -> Self {
        let values = descriptors
            .into_iter()
            .map(|d| AtomicU32::new(d.range.init.to_bits()))
            .collect();
        Self { values }
    }

    /// Creates a store for processor type `P`.
    pub fn for_processor<P: InnerProcessor>() -> Self {
        Self::new(ParameterTable::<P>::of().descriptors())
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the store has no slots.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads slot `index`, or `0.0` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.values
            .get(index)
            .map_or(0.0, |v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Writes slot `index`. Out-of-range indices are ignored.
    #[inline]
    pub fn set(&self, index: usize, value: f32) {
        if let Some(slot) = self.values.get(index) {
            slot.store(value.to_bits(), Ordering::Release);
        }
    }

    /// Iterates over the current values in index order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.values
            .iter()
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }
}
