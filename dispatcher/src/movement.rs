/// ----- MOVEMENT MODULE -----
/// One worker thread per elevator. The dispatcher boards a passenger and
/// hands the worker a movement order; the worker moves the car, lets the
/// passenger off and reports the arrival. Orders for one elevator are
/// applied in the order they were dispatched. Orders stamped with an
/// epoch older than the fleet's current one are discarded.

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error};

use shared_resources::event::Event;
use shared_resources::request::Request;

use crate::fleet::{lock, Epoch, Fleet, SharedElevator};

#[derive(Debug, Clone)]
pub struct MoveOrder {
    pub request: Request,
    pub epoch: u64,
}

pub struct MovementWorkers {
    order_txs: Vec<Sender<MoveOrder>>,
    handles: Vec<JoinHandle<()>>,
}

impl MovementWorkers {
    pub fn spawn(fleet: &Fleet, event_tx: Sender<Event>) -> io::Result<Self> {
        let mut order_txs = Vec::with_capacity(fleet.len());
        let mut handles = Vec::with_capacity(fleet.len());
        for elevator in fleet.iter() {
            let (order_tx, order_rx) = unbounded::<MoveOrder>();
            let id = lock(elevator).id();
            let elevator = elevator.clone();
            let epoch = fleet.epoch().clone();
            let event_tx = event_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("elevator_{}", id))
                .spawn(move || main(elevator, epoch, order_rx, event_tx))?;
            order_txs.push(order_tx);
            handles.push(handle);
        }
        Ok(MovementWorkers { order_txs, handles })
    }

    /// Hands the order to the worker owning `index`. If that worker is
    /// gone the order is returned so the caller can apply it itself.
    pub fn send(&self, index: usize, order: MoveOrder) -> Result<(), MoveOrder> {
        match self.order_txs.get(index) {
            Some(order_tx) => order_tx.send(order).map_err(|e| {
                error!(index, "movement worker is gone, applying order inline");
                e.into_inner()
            }),
            None => Err(order),
        }
    }
}

impl Drop for MovementWorkers {
    fn drop(&mut self) {
        // closing the channels ends the worker loops
        self.order_txs.clear();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                error!("movement worker panicked");
            }
        }
    }
}

fn main(
    elevator: SharedElevator,
    epoch: Epoch,
    order_rx: Receiver<MoveOrder>,
    event_tx: Sender<Event>,
) {
    for order in order_rx.iter() {
        serve(&elevator, &epoch, order, &event_tx);
    }
}

/// Applies one order under the elevator's lock. Returns false when the
/// order was discarded because the fleet has been reset since dispatch.
pub fn serve(elevator: &SharedElevator, epoch: &Epoch, order: MoveOrder, event_tx: &Sender<Event>) -> bool {
    let mut elevator = lock(elevator);
    if !epoch.is_current(order.epoch) {
        debug!(
            elevator_id = elevator.id(),
            floor = order.request.floor,
            "discarding movement order from before reset"
        );
        return false
    }
    elevator.move_to(order.request.floor);
    elevator.alight();
    debug!(
        elevator_id = elevator.id(),
        floor = elevator.floor(),
        load = elevator.load(),
        "arrived"
    );
    // the sink may already be gone when the shell is shutting down
    let _ = event_tx.send(Event::Arrived {
        elevator_id: elevator.id(),
        floor: elevator.floor(),
    });
    true
}
