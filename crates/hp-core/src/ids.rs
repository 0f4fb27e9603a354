use core::fmt;
use core::num::NonZeroU32;

use crate::error::{HpError, HpResult};

/// 1-based index of a refrigerant cycle (stage) in a heat pump.
///
/// Cycle 1 is the lowest stage, attached to the heat source evaporator;
/// the highest cycle carries the condenser towards the consumer.
/// `NonZero` makes cycle 0 unrepresentable and keeps `Option<CycleId>` small.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CycleId(NonZeroU32);

impl CycleId {
    /// The lowest cycle.
    pub const FIRST: CycleId = CycleId(NonZeroU32::MIN);

    /// Create a cycle id from its 1-based number.
    pub fn new(number: u32) -> HpResult<Self> {
        NonZeroU32::new(number)
            .map(Self)
            .ok_or(HpError::InvalidArg {
                what: "cycle numbers start at 1",
            })
    }

    /// The 1-based cycle number.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The cycle below this one, if any.
    pub fn prev(self) -> Option<Self> {
        NonZeroU32::new(self.0.get() - 1).map(Self)
    }

    /// The cycle above this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Iterate over cycles `1..=count`.
    pub fn range(count: u32) -> impl Iterator<Item = CycleId> {
        (1..=count).filter_map(NonZeroU32::new).map(Self)
    }
}

impl TryFrom<u32> for CycleId {
    type Error = HpError;

    fn try_from(number: u32) -> HpResult<Self> {
        Self::new(number)
    }
}

impl From<CycleId> for u32 {
    fn from(id: CycleId) -> Self {
        id.get()
    }
}

impl fmt::Debug for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CycleId({})", self.get())
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(matches!(
            CycleId::new(0),
            Err(HpError::InvalidArg { .. })
        ));
        assert_eq!(CycleId::new(3).unwrap().get(), 3);
    }

    #[test]
    fn neighbours() {
        let c = CycleId::new(2).unwrap();
        assert_eq!(c.prev(), Some(CycleId::FIRST));
        assert_eq!(CycleId::FIRST.prev(), None);
        assert_eq!(c.next().get(), 3);
    }

    #[test]
    fn range_is_one_based_and_inclusive() {
        let numbers: Vec<u32> = CycleId::range(3).map(CycleId::get).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(CycleId::range(0).count(), 0);
    }

    #[test]
    fn option_cycle_id_is_small() {
        assert_eq!(
            core::mem::size_of::<CycleId>(),
            core::mem::size_of::<Option<CycleId>>()
        );
    }
}
