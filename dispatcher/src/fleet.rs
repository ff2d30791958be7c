/// ----- FLEET -----
/// The fixed, ordered set of elevators shared between the dispatch loop
/// and the movement workers. Every elevator sits behind its own lock so
/// mutations of one car never wait on another. The fleet epoch is bumped
/// on reset and lets workers recognize orders that belong to an earlier
/// run of the simulation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared_resources::elevator::{Elevator, ElevatorStatus};

pub type SharedElevator = Arc<Mutex<Elevator>>;

/// Elevator state is plain counters, so a panic while holding the lock
/// cannot leave it half-written.
pub fn lock(elevator: &SharedElevator) -> MutexGuard<'_, Elevator> {
    elevator.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Default)]
pub struct Epoch(Arc<AtomicU64>);

impl Epoch {
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn advance(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.current() == epoch
    }
}

#[derive(Debug, Clone)]
pub struct Fleet {
    elevators: Vec<SharedElevator>,
    epoch: Epoch,
}

impl Fleet {
    /// Ids are 1-based and follow fleet order.
    pub fn new(num_elevators: u8, capacity: u8) -> Self {
        Fleet {
            elevators: (1..=num_elevators)
                .map(|id| Arc::new(Mutex::new(Elevator::new(id, capacity))))
                .collect(),
            epoch: Epoch::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.elevators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevators.is_empty()
    }

    pub fn elevator(&self, index: usize) -> Option<&SharedElevator> {
        self.elevators.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedElevator> {
        self.elevators.iter()
    }

    pub fn epoch(&self) -> &Epoch {
        &self.epoch
    }

    /// Current floor of every elevator in fleet order, each read under
    /// its own lock.
    pub fn floors(&self) -> Vec<u8> {
        self.elevators.iter().map(|elevator| lock(elevator).floor()).collect()
    }

    pub fn status(&self, id: u8) -> Option<ElevatorStatus> {
        let index = (id as usize).checked_sub(1)?;
        self.elevators.get(index).map(|elevator| lock(elevator).status())
    }

    pub fn statuses(&self) -> Vec<ElevatorStatus> {
        self.elevators.iter().map(|elevator| lock(elevator).status()).collect()
    }

    /// Advances the epoch first so any order a worker picks up afterwards
    /// is recognized as stale, then reinitializes each car in place.
    pub fn reset(&self) {
        self.epoch.advance();
        for elevator in &self.elevators {
            lock(elevator).reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_based() {
        let fleet = Fleet::new(3, 5);
        let ids: Vec<u8> = fleet.statuses().iter().map(|status| status.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn status_lookup_by_id() {
        let fleet = Fleet::new(2, 5);
        assert_eq!(fleet.status(2).map(|status| status.id), Some(2));
        assert!(fleet.status(0).is_none());
        assert!(fleet.status(3).is_none());
    }

    #[test]
    fn reset_advances_epoch_and_clears_state() {
        let fleet = Fleet::new(2, 5);
        let before = fleet.epoch().current();
        {
            let mut elevator = lock(fleet.elevator(1).unwrap());
            elevator.move_to(6);
            elevator.try_board();
        }
        fleet.reset();
        assert!(!fleet.epoch().is_current(before));
        assert_eq!(fleet.floors(), vec![0, 0]);
        assert!(fleet.statuses().iter().all(|status| status.load == 0));
    }
}
