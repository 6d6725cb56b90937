//! Building integration tests
//!
//! Cars in one building are independent: work on one never moves another.

use std::sync::Arc;

use elevator_sim_core_rs::{
    Building, BuildingError, Clock, Direction, Elevator, ElevatorConfig, SimulatedClock,
};

fn three_car_building() -> (Building, SimulatedClock) {
    let clock = SimulatedClock::new();
    let mut building = Building::new("TechCorp Building");
    for (seed, id) in ["A", "B", "C"].into_iter().enumerate() {
        let elevator = Elevator::new(
            id,
            ElevatorConfig::default(),
            Arc::new(clock.clone()),
            seed as u64 + 1,
        )
        .unwrap();
        building.add_elevator(elevator);
    }
    (building, clock)
}

#[test]
fn test_building_holds_cars_in_order() {
    let (building, _clock) = three_car_building();

    assert_eq!(building.name(), "TechCorp Building");
    assert_eq!(building.len(), 3);
    let ids: Vec<&str> = building.elevators().iter().map(Elevator::id).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[test]
fn test_select_out_of_range() {
    let (mut building, _clock) = three_car_building();

    let err = building.select(3).unwrap_err();
    assert_eq!(err, BuildingError::ElevatorNotFound { index: 3, count: 3 });
    assert_eq!(err.to_string(), "No elevator at index 3 (building has 3)");
}

#[test]
fn test_cars_do_not_share_requests() {
    let (mut building, clock) = three_car_building();

    let car = building.select(1).unwrap();
    car.press_floor_button(6).unwrap();
    car.run_until_idle();

    assert_eq!(building.elevator(1).unwrap().current_floor(), 6);
    for index in [0, 2] {
        let other = building.elevator(index).unwrap();
        assert_eq!(other.current_floor(), 1);
        assert_eq!(other.direction(), Direction::Idle);
        assert!(other.events().is_empty());
    }
    assert!(clock.elapsed_ms() > 0);
}

#[test]
fn test_stuck_button_is_per_car() {
    let (mut building, _clock) = three_car_building();
    building
        .elevator_mut(2)
        .unwrap()
        .button_mut(5)
        .unwrap()
        .set_stuck(true);

    assert!(building.select(2).unwrap().press_floor_button(5).is_err());
    assert!(building.select(0).unwrap().press_floor_button(5).is_ok());
}

#[test]
fn test_empty_building() {
    let building = Building::new("Empty");
    assert!(building.is_empty());
    assert!(building.elevator(0).is_none());
}
