use std::{fmt, ops::Deref};

/// Errors that can occur during wire operations
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Wire with the given ID was not found
    #[error("Wire with id {0} not found")]
    WireNotFound(WireId),
    /// Wire with the given ID is already registered
    #[error("Wire with id {0} already exists")]
    WireAlreadyExists(WireId),
    /// Polarity of the wire instance was flipped a second time
    #[error("Wire instance {0} is inverted twice")]
    DoubleInversion(WireId),
}
pub type WireError = Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireId(pub usize);

impl WireId {
    /// Decode a netlist index: `id = idx / 2`, odd indices are inverted.
    pub fn from_netlist_index(idx: usize) -> (WireId, bool) {
        (WireId(idx / 2), idx % 2 == 1)
    }

    /// Inverse of [`WireId::from_netlist_index`].
    pub fn netlist_index(self, inverted: bool) -> usize {
        self.0 * 2 + usize::from(inverted)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for WireId {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<usize> for WireId {
    fn from(v: usize) -> Self {
        WireId(v)
    }
}

impl From<WireId> for usize {
    fn from(w: WireId) -> usize {
        w.0
    }
}

/// Value cell of a wire. `None` means the value is not known yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wire {
    pub id: WireId,
    pub value: Option<bool>,
}

/// A usage of a wire together with its polarity.
///
/// The polarity may be flipped exactly once over the lifetime of an instance;
/// a second flip means some builder inverted the same signal twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WireInstance {
    pub wire: WireId,
    inverted: bool,
    flips: u8,
}

impl WireInstance {
    pub fn new(wire: WireId, inverted: bool) -> Self {
        Self {
            wire,
            inverted,
            flips: 0,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn invert(&mut self) -> Result<(), WireError> {
        if self.flips != 0 {
            return Err(WireError::DoubleInversion(self.wire));
        }
        self.flips += 1;
        self.inverted = !self.inverted;
        Ok(())
    }

    /// Apply this instance's polarity to a raw wire value.
    #[inline]
    pub fn resolve(&self, raw: bool) -> bool {
        raw ^ self.inverted
    }
}

mod wires {
    use std::collections::{BTreeMap, btree_map::Entry};

    use super::{Wire, WireError, WireId, WireInstance};

    #[derive(Clone, Copy, Debug)]
    struct Slot {
        wire: Wire,
        instance: WireInstance,
    }

    /// Wire cells and their registered instances, keyed by id. Ids may be
    /// sparse; iteration is in ascending id order.
    #[derive(Debug, Default)]
    pub struct Wires {
        slots: BTreeMap<WireId, Slot>,
    }

    impl Wires {
        pub fn insert(
            &mut self,
            instance: WireInstance,
            value: Option<bool>,
        ) -> Result<&WireInstance, WireError> {
            let id = instance.wire;
            match self.slots.entry(id) {
                Entry::Occupied(_) => Err(WireError::WireAlreadyExists(id)),
                Entry::Vacant(vacant) => {
                    let slot = vacant.insert(Slot {
                        wire: Wire { id, value },
                        instance,
                    });
                    Ok(&slot.instance)
                }
            }
        }

        fn slot(&self, id: WireId) -> Result<&Slot, WireError> {
            self.slots.get(&id).ok_or(WireError::WireNotFound(id))
        }

        fn slot_mut(&mut self, id: WireId) -> Result<&mut Slot, WireError> {
            self.slots.get_mut(&id).ok_or(WireError::WireNotFound(id))
        }

        pub fn contains(&self, id: WireId) -> bool {
            self.slots.contains_key(&id)
        }

        pub fn get(&self, id: WireId) -> Result<&Wire, WireError> {
            self.slot(id).map(|slot| &slot.wire)
        }

        pub fn instance(&self, id: WireId) -> Result<&WireInstance, WireError> {
            self.slot(id).map(|slot| &slot.instance)
        }

        pub fn instance_mut(&mut self, id: WireId) -> Result<&mut WireInstance, WireError> {
            self.slot_mut(id).map(|slot| &mut slot.instance)
        }

        pub fn set_value(&mut self, id: WireId, value: bool) -> Result<(), WireError> {
            self.slot_mut(id)?.wire.value = Some(value);
            Ok(())
        }

        /// Raw value seen through the registered instance polarity.
        #[inline]
        pub fn effective(&self, id: WireId) -> Result<Option<bool>, WireError> {
            let slot = self.slot(id)?;
            Ok(slot.wire.value.map(|raw| slot.instance.resolve(raw)))
        }

        pub fn iter(&self) -> impl Iterator<Item = (&Wire, &WireInstance)> {
            self.slots
                .values()
                .map(|slot| (&slot.wire, &slot.instance))
        }

        pub fn len(&self) -> usize {
            self.slots.len()
        }
    }
}
pub use wires::Wires;
