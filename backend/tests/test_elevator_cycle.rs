//! Elevator service cycle integration tests
//!
//! Drives a single car through button presses and complete service cycles
//! on a simulated clock, then checks position, direction, door history and
//! pending requests.

use elevator_sim_core_rs::policy::{DispatchDecision, DispatchPolicy, DispatchView};
use elevator_sim_core_rs::{Clock, Direction, DoorState, Event, RequestError, ServiceOutcome};
use proptest::prelude::*;

mod common;

fn door_changes_at(events: &[Event], at: i32) -> Vec<(DoorState, DoorState)> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::DoorChanged { floor, from, to, .. } if *floor == at => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_press_marks_button_and_pending() {
    let (mut elevator, _clock) = common::simulated_elevator(1);

    elevator.press_floor_button(7).unwrap();

    assert!(elevator.button(7).unwrap().is_pressed());
    assert!(elevator.requested_floors().contains(&7));
    assert_eq!(elevator.direction(), Direction::Up);
}

#[test]
fn test_duplicate_press_keeps_single_request() {
    let (mut elevator, _clock) = common::simulated_elevator(1);

    elevator.press_floor_button(4).unwrap();
    elevator.press_floor_button(4).unwrap();

    assert_eq!(elevator.pending_count(), 1);
    assert_eq!(elevator.events().events_of_type("ButtonPressed").len(), 2);
    assert_eq!(elevator.events().events_of_type("RequestAdded").len(), 1);
}

#[test]
fn test_stuck_button_changes_nothing() {
    let (mut elevator, _clock) = common::simulated_elevator(1);
    elevator.button_mut(5).unwrap().set_stuck(true);

    let result = elevator.press_floor_button(5);

    assert_eq!(result, Err(RequestError::ButtonStuck { floor: 5 }));
    assert!(!elevator.button(5).unwrap().is_pressed());
    assert!(elevator.requested_floors().is_empty());
    assert_eq!(elevator.direction(), Direction::Idle);
}

#[test]
fn test_out_of_bounds_press_rejected() {
    let (mut elevator, _clock) = common::simulated_elevator(1);

    assert_eq!(
        elevator.press_floor_button(16),
        Err(RequestError::OutOfBounds {
            floor: 16,
            min: 1,
            max: 15
        })
    );
    assert!(elevator.press_floor_button(0).is_err());
    assert!(elevator.requested_floors().is_empty());
    assert_eq!(elevator.direction(), Direction::Idle);
}

#[test]
fn test_full_cycle_visits_floors_in_scan_order() {
    let (mut elevator, clock) = common::simulated_elevator(1);

    elevator.press_floor_button(4).unwrap();
    elevator.press_floor_button(2).unwrap();
    assert_eq!(elevator.direction(), Direction::Up);

    assert_eq!(
        elevator.process_next_request(),
        ServiceOutcome::Serviced { floor: 2 }
    );
    assert_eq!(elevator.current_floor(), 2);
    assert!(!elevator.button(2).unwrap().is_pressed());
    assert_eq!(elevator.direction(), Direction::Up);

    assert_eq!(
        elevator.process_next_request(),
        ServiceOutcome::Serviced { floor: 4 }
    );
    assert_eq!(elevator.current_floor(), 4);
    assert_eq!(elevator.direction(), Direction::Idle);
    assert!(elevator.requested_floors().is_empty());
    assert!(elevator.door().is_closed());

    // 3 floors at 2s plus two door cycles of 2 x 3s
    assert_eq!(clock.elapsed_ms(), 18_000);

    let cycle = vec![
        (DoorState::Closed, DoorState::Opening),
        (DoorState::Opening, DoorState::Open),
        (DoorState::Open, DoorState::Closing),
        (DoorState::Closing, DoorState::Closed),
    ];
    let events = elevator.events().events();
    assert_eq!(door_changes_at(events, 2), cycle);
    assert_eq!(door_changes_at(events, 4), cycle);
    assert!(door_changes_at(events, 3).is_empty());
    assert_eq!(elevator.events().serviced_floors(), vec![2, 4]);
}

#[test]
fn test_door_is_open_when_request_clears() {
    let (mut elevator, _clock) = common::simulated_elevator(1);
    elevator.press_floor_button(3).unwrap();
    elevator.process_next_request();

    let events = elevator.events().events();
    let opened = events
        .iter()
        .position(|e| matches!(e, Event::DoorChanged { to: DoorState::Open, .. }))
        .unwrap();
    let serviced = events
        .iter()
        .position(|e| matches!(e, Event::RequestServiced { floor: 3, .. }))
        .unwrap();
    let closing = events
        .iter()
        .position(|e| matches!(e, Event::DoorChanged { to: DoorState::Closing, .. }))
        .unwrap();

    assert!(opened < serviced && serviced < closing);
}

#[test]
fn test_process_with_nothing_pending_goes_idle() {
    let (mut elevator, clock) = common::simulated_elevator(1);

    assert_eq!(elevator.process_next_request(), ServiceOutcome::Idle);
    assert_eq!(elevator.direction(), Direction::Idle);
    assert_eq!(clock.sleep_count(), 0);
}

#[test]
fn test_current_floor_request_served_in_place() {
    let (mut elevator, clock) = common::simulated_elevator(1);

    elevator.press_floor_button(1).unwrap();
    assert_eq!(
        elevator.process_next_request(),
        ServiceOutcome::Serviced { floor: 1 }
    );

    assert_eq!(elevator.current_floor(), 1);
    assert_eq!(elevator.direction(), Direction::Idle);
    assert!(elevator.events().events_of_type("FloorReached").is_empty());
    // Door cycle only
    assert_eq!(clock.elapsed_ms(), 6_000);
}

#[test]
fn test_resolve_request_is_idempotent() {
    let (mut elevator, _clock) = common::simulated_elevator(1);
    elevator.press_floor_button(9).unwrap();

    assert!(elevator.resolve_request(9));
    assert!(!elevator.resolve_request(9));
    assert!(!elevator.button(9).unwrap().is_pressed());
    assert_eq!(elevator.events().serviced_floors(), vec![9]);
}

#[test]
fn test_press_during_travel_is_picked_up_on_the_way() {
    let (mut elevator, _clock) = common::simulated_elevator(1);
    elevator.press_floor_button(10).unwrap();

    assert_eq!(elevator.plan_next_request(), Some(10));
    elevator.step_toward(10);
    elevator.step_toward(10);
    assert_eq!(elevator.current_floor(), 3);

    elevator.press_floor_button(5).unwrap();
    assert_eq!(elevator.run_until_idle(), vec![5, 10]);
}

#[test]
fn test_floors_reached_one_at_a_time() {
    let (mut elevator, _clock) = common::simulated_elevator(1);
    elevator.press_floor_button(5).unwrap();
    elevator.process_next_request();

    let reached: Vec<i32> = elevator
        .events()
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::FloorReached { floor, .. } => Some(*floor),
            _ => None,
        })
        .collect();
    assert_eq!(reached, vec![2, 3, 4, 5]);
}

#[test]
fn test_events_are_time_ordered() {
    let (mut elevator, _clock) = common::simulated_elevator(1);
    for floor in [6, 2, 11] {
        elevator.press_floor_button(floor).unwrap();
    }
    elevator.run_until_idle();

    let times: Vec<u64> = elevator.events().events().iter().map(Event::at_ms).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

/// Always sends the car to a floor the building does not have
struct OffTheMapPolicy;

impl DispatchPolicy for OffTheMapPolicy {
    fn name(&self) -> &'static str {
        "off_the_map"
    }

    fn next_floor(&self, view: &DispatchView<'_>) -> Option<DispatchDecision> {
        view.pending.lowest()?;
        Some(DispatchDecision {
            floor: 99,
            direction: Direction::Up,
        })
    }
}

#[test]
fn test_unreachable_dispatch_target_is_not_serviced() {
    let (elevator, clock) = common::simulated_elevator(1);
    let mut elevator = elevator.with_policy(Box::new(OffTheMapPolicy));
    elevator.press_floor_button(3).unwrap();

    assert_eq!(elevator.process_next_request(), ServiceOutcome::Idle);
    assert_eq!(elevator.current_floor(), 1);
    assert!(elevator.requested_floors().contains(&3));
    assert!(elevator.events().serviced_floors().is_empty());
    assert_eq!(clock.sleep_count(), 0);
}

proptest! {
    #[test]
    fn prop_presses_respect_stuck_buttons(
        stuck in proptest::collection::vec(any::<bool>(), 15),
        presses in proptest::collection::vec(1i32..=15, 0..40),
    ) {
        let (mut elevator, _clock) = common::simulated_elevator(1);
        for (floor, is_stuck) in (1..=15).zip(&stuck) {
            elevator.button_mut(floor).unwrap().set_stuck(*is_stuck);
        }

        for floor in presses {
            let was_pressed = elevator.button(floor).unwrap().is_pressed();
            let before = elevator.requested_floors();

            let result = elevator.press_floor_button(floor);

            if stuck[(floor - 1) as usize] {
                prop_assert_eq!(result, Err(RequestError::ButtonStuck { floor }));
                prop_assert_eq!(elevator.button(floor).unwrap().is_pressed(), was_pressed);
                prop_assert_eq!(elevator.requested_floors(), before);
            } else {
                prop_assert!(result.is_ok());
                prop_assert!(elevator.button(floor).unwrap().is_pressed());
            }

            for pending in elevator.requested_floors() {
                prop_assert!(elevator.button(pending).unwrap().is_pressed());
            }
        }

        elevator.run_until_idle();
        for floor in 1..=15 {
            prop_assert!(!elevator.button(floor).unwrap().is_pressed());
        }
    }
}
