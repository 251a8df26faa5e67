//! Panel shared between contexts that do not serialize their calls
//!
//! Every lifecycle call runs to completion, settle delays included, while
//! holding the lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::delay::DelayNs;

use crate::error::AllocationError;
use crate::mode::ModeSink;
use crate::panel::{Panel, PanelState};

pub struct SharedPanel<M: RawMutex, P> {
    inner: Mutex<M, RefCell<P>>,
}

impl<M: RawMutex, P: Panel> SharedPanel<M, P> {
    pub const fn new(panel: P) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(panel)),
        }
    }

    pub fn prepare<D: DelayNs>(&self, delay: &mut D) -> Result<(), P::Error> {
        self.inner.lock(|panel| panel.borrow_mut().prepare(delay))
    }

    pub fn unprepare<D: DelayNs>(&self, delay: &mut D) -> Result<(), P::Error> {
        self.inner.lock(|panel| panel.borrow_mut().unprepare(delay))
    }

    pub fn enable(&self) {
        self.inner.lock(|panel| panel.borrow_mut().enable())
    }

    pub fn disable(&self) {
        self.inner.lock(|panel| panel.borrow_mut().disable())
    }

    pub fn get_modes(&self, sink: &mut impl ModeSink) -> Result<usize, AllocationError> {
        self.inner.lock(|panel| panel.borrow().get_modes(sink))
    }

    pub fn state(&self) -> PanelState {
        self.inner.lock(|panel| panel.borrow().state())
    }

    pub fn into_inner(self) -> P {
        self.inner.into_inner().into_inner()
    }
}
