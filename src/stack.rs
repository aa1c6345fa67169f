use log::error;

use crate::cells::Position;
use crate::errors::*;

/// Bounded LIFO of grid positions driving the depth-first carving.
#[derive(Debug, Clone)]
pub struct PositionStack {
    positions: Vec<Position>,
    capacity: usize,
}

impl PositionStack {
    /// Allocate room for `capacity` positions up front.
    ///
    /// Fails with `ErrorKind::Allocation` if the storage cannot be obtained.
    pub fn with_capacity(capacity: usize) -> Result<PositionStack> {
        let mut positions = Vec::new();
        positions.try_reserve_exact(capacity)
                 .map_err(|_| Error::from(ErrorKind::Allocation("position stack", capacity)))?;
        Ok(PositionStack {
            positions,
            capacity,
        })
    }

    /// Push onto the top of the stack.
    ///
    /// The capacity bound is never exceeded: a push onto a full stack is dropped and reported.
    /// Returns whether the position was stored.
    pub fn push(&mut self, pos: Position) -> bool {
        if self.positions.len() < self.capacity {
            self.positions.push(pos);
            true
        } else {
            error!("Position stack full ({} entries), dropping {:?}", self.capacity, pos);
            false
        }
    }

    /// Remove the top position, None when there is nothing left.
    #[inline]
    pub fn pop(&mut self) -> Option<Position> {
        self.positions.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_order() {
        let mut stack = PositionStack::with_capacity(3).expect("allocation failed");
        let gc = |x, y| Position::new(x, y);
        assert!(stack.push(gc(0, 0)));
        assert!(stack.push(gc(1, 0)));
        assert!(stack.push(gc(2, 0)));
        assert_eq!(stack.len(), 3);

        assert_eq!(stack.pop(), Some(gc(2, 0)));
        assert_eq!(stack.pop(), Some(gc(1, 0)));
        assert_eq!(stack.pop(), Some(gc(0, 0)));
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_empty_is_none() {
        let mut stack = PositionStack::with_capacity(1).expect("allocation failed");
        assert_eq!(stack.pop(), None);
        assert!(stack.push(Position::new(4, 2)));
        assert_eq!(stack.pop(), Some(Position::new(4, 2)));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn capacity_bound_holds() {
        let mut stack = PositionStack::with_capacity(2).expect("allocation failed");
        assert!(stack.push(Position::new(0, 0)));
        assert!(stack.push(Position::new(0, 1)));
        assert!(!stack.push(Position::new(0, 2)));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.capacity(), 2);
        assert_eq!(stack.pop(), Some(Position::new(0, 1)));
    }

    #[test]
    fn clear_empties() {
        let mut stack = PositionStack::with_capacity(4).expect("allocation failed");
        stack.push(Position::new(1, 1));
        stack.push(Position::new(1, 2));
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), 4);
    }

    #[test]
    fn absurd_capacity_is_an_error() {
        let result = PositionStack::with_capacity(usize::MAX);
        match result {
            Err(Error(ErrorKind::Allocation(_, count), _)) => assert_eq!(count, usize::MAX),
            other => panic!("expected an allocation error, got {:?}", other),
        }
    }
}
