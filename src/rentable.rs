//! Readiness tracking for reader and writer cursors.
//!
//! Every cursor may act only while it is [`State::Ready`]. Opening an array or object
//! *rents* the cursor's readiness out to the nested scope, which hands it back when it
//! closes. Cursors that stand for exactly one value (an object entry, an array element on
//! the read side) keep their readiness in a slot owned by the enclosing container, and
//! become [`State::Spent`] once their value is done.

use crate::errors::Result;

/// Readiness of a cursor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum State {
    /// The cursor may read or write its next value.
    Ready,
    /// A nested scope opened through this cursor has not been closed.
    Busy,
    /// The cursor stood for a single value, and that value is complete.
    Spent,
}

/// Where a cursor keeps its [`State`].
#[derive(Debug)]
pub(crate) enum Rentable<'a> {
    /// Stream cursors own their state and can be reused for any number of values.
    Owned(State),
    /// Single-value cursors borrow a slot from the container that handed them out.
    Slot(&'a mut State),
}

impl<'a> Rentable<'a> {
    /// A reusable cursor, ready for its first value.
    #[inline(always)]
    pub(crate) fn stream() -> Rentable<'a> { Rentable::Owned(State::Ready) }

    /// A single-value cursor backed by `slot`, which is reset to ready.
    #[inline(always)]
    pub(crate) fn single(slot: &'a mut State) -> Rentable<'a> {
        *slot = State::Ready;
        Rentable::Slot(slot)
    }

    #[inline(always)]
    fn state(&self) -> State {
        match self {
            Rentable::Owned(s) => *s,
            Rentable::Slot(s) => **s,
        }
    }

    #[inline(always)]
    fn state_mut(&mut self) -> &mut State {
        match self {
            Rentable::Owned(s) => s,
            Rentable::Slot(s) => s,
        }
    }

    #[inline(always)]
    fn reusable(&self) -> bool {
        match self {
            Rentable::Owned(_) => true,
            Rentable::Slot(_) => false,
        }
    }

    /// Fails with a logic error unless the cursor may act now.
    #[inline]
    pub(crate) fn check(&self) -> Result<()> {
        match self.state() {
            State::Ready => Ok(()),
            State::Busy => logic_bail!("cursor used while a nested scope is still open"),
            State::Spent => logic_bail!("single-value cursor used after its value was complete"),
        }
    }

    /// Marks the current value as complete.
    #[inline]
    pub(crate) fn complete(&mut self) {
        let reusable = self.reusable();
        *self.state_mut() = if reusable { State::Ready } else { State::Spent };
    }

    /// Rents the readiness out to a nested scope. The cursor stays busy until the
    /// returned [`Rent`] is handed back with [`Rent::replace`].
    #[inline]
    pub(crate) fn rent(&mut self) -> Rent<'_> {
        let reusable = self.reusable();
        let slot = self.state_mut();
        *slot = State::Busy;
        Rent { slot, reusable }
    }
}

/// Readiness rented out by a parent cursor to a nested scope.
#[derive(Debug)]
pub(crate) struct Rent<'a> {
    slot: &'a mut State,
    reusable: bool,
}

impl<'a> Rent<'a> {
    /// Returns the readiness after the nested scope closed, completing the parent's value.
    #[inline]
    pub(crate) fn replace(&mut self) {
        *self.slot = if self.reusable {
            State::Ready
        } else {
            State::Spent
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_is_reusable() {
        let mut r = Rentable::stream();
        assert!(r.check().is_ok());
        r.complete();
        assert!(r.check().is_ok());
    }

    #[test]
    fn single_is_spent_after_one_value() {
        let mut slot = State::Spent;
        let mut r = Rentable::single(&mut slot);
        assert!(r.check().is_ok());
        r.complete();
        assert!(r.check().unwrap_err().is_logic());
        assert_eq!(slot, State::Spent);
    }

    #[test]
    fn rented_until_replaced() {
        let mut r = Rentable::stream();
        let mut rent = r.rent();
        rent.replace();
        assert!(r.check().is_ok());

        let leaked = r.rent();
        drop(leaked);
        assert!(r.check().unwrap_err().is_logic());
    }

    #[test]
    fn rented_single_completes() {
        let mut slot = State::Spent;
        {
            let mut r = Rentable::single(&mut slot);
            r.rent().replace();
            assert!(r.check().is_err());
        }
        assert_eq!(slot, State::Spent);
    }
}
