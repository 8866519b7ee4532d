//! The id-keyed map of materialized transports.
//!
//! Entries are created on first use and never torn down before process
//! exit; re-binding a catalog after a UI re-attach finds them again, which
//! is what keeps in-flight playback alive.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::catalog::Track;

use super::transport::{TransportError, TransportFactory};

pub(super) struct Registry<H> {
    handles: HashMap<u32, H>,
}

impl<H> Registry<H> {
    pub(super) fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    pub(super) fn get_mut(&mut self, id: u32) -> Option<&mut H> {
        self.handles.get_mut(&id)
    }

    pub(super) fn iter_mut(&mut self) -> impl Iterator<Item = (&u32, &mut H)> {
        self.handles.iter_mut()
    }

    /// Return the transport for `track`, materializing it on first use.
    pub(super) fn open_or_reuse<F>(
        &mut self,
        factory: &mut F,
        track: &Track,
    ) -> Result<&mut H, TransportError>
    where
        F: TransportFactory<Handle = H>,
    {
        match self.handles.entry(track.id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(factory.open(track)?)),
        }
    }
}
