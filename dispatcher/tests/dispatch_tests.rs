use std::time::Duration;

use crossbeam_channel::Receiver;

use dispatcher::fleet::lock;
use dispatcher::Dispatcher;
use shared_resources::config::ElevatorConfig;
use shared_resources::elevator::ElevatorStatus;
use shared_resources::event::Event;
use shared_resources::logging;

const TIMEOUT: Duration = Duration::from_secs(2);

fn setup(num_elevators: u8, capacity: u8) -> (Dispatcher, Receiver<Event>) {
    logging::init_test();
    Dispatcher::new(&ElevatorConfig { num_elevators, num_floors: 10, capacity }).unwrap()
}

fn wait_for_arrivals(events: &Receiver<Event>, count: usize) -> Vec<Event> {
    let mut arrivals = Vec::new();
    while arrivals.len() < count {
        match events.recv_timeout(TIMEOUT) {
            Ok(event @ Event::Arrived { .. }) => arrivals.push(event),
            Ok(_) => {},
            Err(e) => panic!("expected {} arrivals, got {:?}: {}", count, arrivals, e),
        }
    }
    arrivals
}

#[test]
fn two_requests_from_ground_floor_share_first_elevator() {
    let (mut dispatcher, events) = setup(2, 5);
    dispatcher.submit_request(4).unwrap();
    dispatcher.submit_request(7).unwrap();

    // floor 7 is weighed against elevator 1 at 0 or 4, both beat elevator 2 at 0
    let decisions = dispatcher.dispatch_pending();
    assert_eq!(
        decisions,
        vec![
            Event::Moving { elevator_id: 1, target_floor: 4 },
            Event::Moving { elevator_id: 1, target_floor: 7 },
        ]
    );
    assert_eq!(dispatcher.dispatched_count(), 2);
    assert!(!dispatcher.has_pending());

    let arrivals = wait_for_arrivals(&events, 2);
    assert_eq!(
        arrivals,
        vec![
            Event::Arrived { elevator_id: 1, floor: 4 },
            Event::Arrived { elevator_id: 1, floor: 7 },
        ]
    );
    assert_eq!(
        dispatcher.elevator_status(1),
        Some(ElevatorStatus { id: 1, floor: 7, load: 0, capacity: 5 })
    );
    assert_eq!(
        dispatcher.elevator_status(2),
        Some(ElevatorStatus { id: 2, floor: 0, load: 0, capacity: 5 })
    );
}

#[test]
fn events_are_published_in_submission_order() {
    let (mut dispatcher, events) = setup(2, 5);
    lock(dispatcher.fleet().elevator(1).unwrap()).move_to(9);
    dispatcher.submit_request(1).unwrap();
    dispatcher.submit_request(8).unwrap();
    dispatcher.dispatch_pending();

    let published: Vec<Event> = (0..6).map(|_| events.recv_timeout(TIMEOUT).unwrap()).collect();
    let synchronous: Vec<Event> = published
        .iter()
        .copied()
        .filter(|event| !matches!(event, Event::Arrived { .. }))
        .collect();
    assert_eq!(
        synchronous,
        vec![
            Event::Requested { floor: 1 },
            Event::Requested { floor: 8 },
            Event::Moving { elevator_id: 1, target_floor: 1 },
            Event::Moving { elevator_id: 2, target_floor: 8 },
        ]
    );
    assert!(published.contains(&Event::Arrived { elevator_id: 1, floor: 1 }));
    assert!(published.contains(&Event::Arrived { elevator_id: 2, floor: 8 }));
}

#[test]
fn capacity_is_released_after_arrival() {
    let (mut dispatcher, events) = setup(1, 1);
    dispatcher.submit_request(3).unwrap();
    assert_eq!(
        dispatcher.dispatch_pending(),
        vec![Event::Moving { elevator_id: 1, target_floor: 3 }]
    );
    wait_for_arrivals(&events, 1);

    dispatcher.submit_request(6).unwrap();
    assert_eq!(
        dispatcher.dispatch_pending(),
        vec![Event::Moving { elevator_id: 1, target_floor: 6 }]
    );
    wait_for_arrivals(&events, 1);
    assert_eq!(dispatcher.elevator_status(1).map(|status| status.floor), Some(6));
}

#[test]
fn busy_elevators_never_exceed_capacity() {
    let (mut dispatcher, events) = setup(3, 2);
    for floor in [2, 5, 9, 2, 5, 9, 0, 4] {
        dispatcher.submit_request(floor).unwrap();
    }
    let decisions = dispatcher.dispatch_pending();
    assert_eq!(decisions.len(), 8);

    let moved = decisions.iter().filter(|event| matches!(event, Event::Moving { .. })).count();
    wait_for_arrivals(&events, moved);
    assert_eq!(dispatcher.dispatched_count(), moved as u64);
    for status in dispatcher.statuses() {
        assert!(status.load <= status.capacity);
        assert_eq!(status.load, 0);
    }
}

#[test]
fn reset_discards_movement_not_yet_applied() {
    let (mut dispatcher, events) = setup(2, 5);
    for floor in [3, 6, 9, 1, 8] {
        dispatcher.submit_request(floor).unwrap();
    }
    dispatcher.dispatch_pending();
    dispatcher.reset();

    // anything arriving after the reset marker must not exist
    let mut after_reset = Vec::new();
    let mut seen_reset = false;
    while let Ok(event) = events.recv_timeout(Duration::from_millis(200)) {
        if seen_reset {
            after_reset.push(event);
        }
        seen_reset |= event == Event::Reset;
    }
    assert!(seen_reset);
    assert!(after_reset.is_empty(), "stale events after reset: {:?}", after_reset);

    assert_eq!(dispatcher.fleet().floors(), vec![0, 0]);
    assert!(dispatcher.statuses().iter().all(|status| status.load == 0));
    assert_eq!(dispatcher.pending_len(), 0);
    assert_eq!(dispatcher.dispatched_count(), 0);
}

#[test]
fn simulation_keeps_working_after_reset() {
    let (mut dispatcher, events) = setup(2, 5);
    dispatcher.submit_request(5).unwrap();
    dispatcher.reset();
    assert!(dispatcher.dispatch_pending().is_empty());

    dispatcher.submit_request(2).unwrap();
    dispatcher.dispatch_pending();
    let arrivals = wait_for_arrivals(&events, 1);
    assert_eq!(arrivals, vec![Event::Arrived { elevator_id: 1, floor: 2 }]);
    assert_eq!(dispatcher.dispatched_count(), 1);
}

#[test]
fn moving_is_published_before_arrival() {
    let (mut dispatcher, events) = setup(1, 5);
    for round in 0..2000 {
        let floor = round % 10;
        dispatcher.submit_request(floor).unwrap();
        dispatcher.dispatch_pending();

        let published: Vec<Event> = (0..3).map(|_| events.recv_timeout(TIMEOUT).unwrap()).collect();
        assert_eq!(
            published,
            vec![
                Event::Requested { floor: floor as u8 },
                Event::Moving { elevator_id: 1, target_floor: floor as u8 },
                Event::Arrived { elevator_id: 1, floor: floor as u8 },
            ],
            "round {}",
            round
        );
    }
}
