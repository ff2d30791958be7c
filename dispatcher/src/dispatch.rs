/// ----- DISPATCH MODULE -----
/// Owns the pending request queue and the fleet. Requests are queued by
/// `submit_request` and only assigned when `dispatch_pending` drains the
/// queue. Each assignment boards a passenger synchronously and leaves the
/// movement itself to the elevator's worker thread.

use std::collections::VecDeque;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use shared_resources::config::ElevatorConfig;
use shared_resources::elevator::ElevatorStatus;
use shared_resources::error::DispatchError;
use shared_resources::event::Event;
use shared_resources::request::Request;

use crate::fleet::{lock, Fleet};
use crate::movement::{self, MoveOrder, MovementWorkers};
use crate::selection::closest_elevator;

pub struct Dispatcher {
    num_floors: u8,
    pending: VecDeque<Request>,
    dispatched: u64,
    event_tx: Sender<Event>,
    workers: MovementWorkers,
    fleet: Fleet,
}

impl Dispatcher {
    /// Builds the fleet, starts one movement worker per elevator and
    /// returns the receiving end of the notification channel.
    pub fn new(config: &ElevatorConfig) -> Result<(Self, Receiver<Event>), DispatchError> {
        config.validate()?;
        let fleet = Fleet::new(config.num_elevators, config.capacity);
        let (event_tx, event_rx) = unbounded();
        let workers = MovementWorkers::spawn(&fleet, event_tx.clone())?;
        info!(
            elevators = config.num_elevators,
            floors = config.num_floors,
            capacity = config.capacity,
            "dispatcher started"
        );
        let dispatcher = Dispatcher {
            num_floors: config.num_floors,
            pending: VecDeque::new(),
            dispatched: 0,
            event_tx,
            workers,
            fleet,
        };
        Ok((dispatcher, event_rx))
    }

    pub fn submit_request(&mut self, floor: i32) -> Result<Request, DispatchError> {
        let floor = u8::try_from(floor)
            .ok()
            .filter(|&floor| floor < self.num_floors)
            .ok_or(DispatchError::InvalidFloor { floor, num_floors: self.num_floors })?;
        let request = Request::new(floor);
        self.pending.push_back(request.clone());
        info!(floor, pending = self.pending.len(), "request queued");
        self.notify(Event::Requested { floor });
        Ok(request)
    }

    /// Drains the queue in FIFO order. Returns the assignment decisions;
    /// the arrivals follow asynchronously on the notification channel.
    pub fn dispatch_pending(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.pending.len());
        while let Some(request) = self.pending.pop_front() {
            if let Some(event) = self.assign(request) {
                events.push(event);
            }
        }
        events
    }

    /// Publishes the decision itself, `Moving` always ahead of the order
    /// reaching the worker so it precedes the matching `Arrived`.
    fn assign(&mut self, request: Request) -> Option<Event> {
        let floors = self.fleet.floors();
        let Some((index, elevator)) = closest_elevator(&floors, request.floor)
            .and_then(|index| Some((index, self.fleet.elevator(index)?)))
        else {
            error!(floor = request.floor, ?floors, "no elevator to serve request, dropping it");
            return None
        };
        debug!(floor = request.floor, ?floors, index, "selected closest elevator");

        let (boarded, elevator_id) = {
            let mut elevator = lock(elevator);
            (elevator.try_board(), elevator.id())
        };
        if !boarded {
            warn!(elevator_id, floor = request.floor, "elevator at full capacity, dropping request");
            let event = Event::CapacityExceeded { elevator_id };
            self.notify(event);
            return Some(event)
        }

        let target_floor = request.floor;
        let event = Event::Moving { elevator_id, target_floor };
        self.notify(event);
        let order = MoveOrder { request, epoch: self.fleet.epoch().current() };
        if let Err(order) = self.workers.send(index, order) {
            movement::serve(elevator, self.fleet.epoch(), order, &self.event_tx);
        }
        self.dispatched += 1;
        info!(elevator_id, target_floor, "elevator dispatched");
        Some(event)
    }

    /// Empties the queue and puts every car back on the ground floor.
    /// Orders already handed to workers are discarded when they come up.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.fleet.reset();
        self.dispatched = 0;
        info!("simulation reset");
        self.notify(Event::Reset);
    }

    pub fn elevator_status(&self, id: u8) -> Option<ElevatorStatus> {
        self.fleet.status(id)
    }

    pub fn statuses(&self) -> Vec<ElevatorStatus> {
        self.fleet.statuses()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn dispatched_count(&self) -> u64 {
        self.dispatched
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    fn notify(&self, event: Event) {
        // nobody listening is fine, the simulation carries on
        let _ = self.event_tx.send(event);
    }
}
