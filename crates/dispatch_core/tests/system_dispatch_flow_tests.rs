mod support;

use dispatch_core::clock::{EventKind, EventSubject, SimulationClock};
use dispatch_core::dispatch::Dispatcher;
use dispatch_core::ecs::{Driver, Rider, RiderStatus};
use dispatch_core::geometry::Location;
use dispatch_core::test_helpers::{create_test_world, spawn_driver, spawn_rider};

use support::{run_all, run_one, schedule};

#[test]
fn driver_registers_then_serves_a_rider_end_to_end() {
    let mut world = create_test_world();
    let bob = spawn_driver(&mut world, "Bob", Location::new(2, 3), 1);
    let jim = spawn_rider(&mut world, "Jim", Location::new(1, 1), Location::new(2, 3), 10);

    schedule(&mut world, 0, EventKind::DriverRequest, EventSubject::Driver(bob));
    schedule(&mut world, 1, EventKind::RiderRequest, EventSubject::Rider(jim));

    // Bob's first request registers him with nobody waiting.
    assert!(run_one(&mut world));
    {
        let dispatcher = world.resource::<Dispatcher>();
        assert_eq!(dispatcher.registered_drivers(), &[bob]);
        assert!(dispatcher.waiting_riders().is_empty());
    }
    let driver = world.get::<Driver>(bob).expect("driver");
    assert!(driver.is_idle);

    // Jim's request matches the only idle driver and starts the drive.
    assert!(run_one(&mut world));
    let driver = world.get::<Driver>(bob).expect("driver");
    assert!(!driver.is_idle);
    assert_eq!(driver.destination, Some(Location::new(1, 1)));
    // A matched rider is never queued.
    assert!(world.resource::<Dispatcher>().waiting_riders().is_empty());

    // Pickup at t=4, dropoff at t=7, final driver request, patience no-op.
    let steps = run_all(&mut world);
    assert_eq!(steps, 4);

    let rider = world.get::<Rider>(jim).expect("rider");
    assert_eq!(rider.status, RiderStatus::Satisfied);
    let driver = world.get::<Driver>(bob).expect("driver");
    assert!(driver.is_idle);
    assert_eq!(driver.location, Location::new(2, 3));
    assert_eq!(driver.destination, None);
    assert_eq!(world.resource::<SimulationClock>().now(), 11);
}

#[test]
fn rider_waits_until_a_driver_shows_up() {
    let mut world = create_test_world();
    let jim = spawn_rider(&mut world, "Jim", Location::new(0, 0), Location::new(2, 0), 100);
    let bob = spawn_driver(&mut world, "Bob", Location::new(0, 3), 1);

    schedule(&mut world, 0, EventKind::RiderRequest, EventSubject::Rider(jim));
    schedule(&mut world, 1, EventKind::DriverRequest, EventSubject::Driver(bob));

    // With no driver registered the rider joins the waiting list.
    assert!(run_one(&mut world));
    {
        let dispatcher = world.resource::<Dispatcher>();
        assert_eq!(dispatcher.waiting_riders(), &[jim]);
        assert!(!dispatcher.has_drivers());
    }
    let rider = world.get::<Rider>(jim).expect("rider");
    assert_eq!(rider.status, RiderStatus::Waiting);

    run_all(&mut world);

    let rider = world.get::<Rider>(jim).expect("rider");
    assert_eq!(rider.status, RiderStatus::Satisfied);
    let driver = world.get::<Driver>(bob).expect("driver");
    assert!(driver.is_idle);
    assert_eq!(driver.location, Location::new(2, 0));

    // Assignment never removes from the waiting list; only cancellation does.
    assert_eq!(world.resource::<Dispatcher>().waiting_riders(), &[jim]);
}

#[test]
fn nearest_idle_driver_gets_the_dispatch() {
    let mut world = create_test_world();
    let far = spawn_driver(&mut world, "Far", Location::new(0, 9), 1);
    let near = spawn_driver(&mut world, "Near", Location::new(0, 2), 1);
    let jim = spawn_rider(&mut world, "Jim", Location::new(0, 0), Location::new(5, 5), 50);

    schedule(&mut world, 0, EventKind::DriverRequest, EventSubject::Driver(far));
    schedule(&mut world, 1, EventKind::DriverRequest, EventSubject::Driver(near));
    schedule(&mut world, 2, EventKind::RiderRequest, EventSubject::Rider(jim));

    assert!(run_one(&mut world));
    assert!(run_one(&mut world));
    assert!(run_one(&mut world));

    let near_driver = world.get::<Driver>(near).expect("driver");
    assert!(!near_driver.is_idle);
    assert_eq!(near_driver.destination, Some(Location::new(0, 0)));
    let far_driver = world.get::<Driver>(far).expect("driver");
    assert!(far_driver.is_idle);
}

#[test]
fn faster_driver_wins_on_travel_time_not_distance() {
    let mut world = create_test_world();
    // Travel times to the origin: 3 ticks vs 2 ticks.
    let slow = spawn_driver(&mut world, "Slow", Location::new(0, 3), 1);
    let fast = spawn_driver(&mut world, "Fast", Location::new(0, 4), 2);
    let jim = spawn_rider(&mut world, "Jim", Location::new(0, 0), Location::new(5, 5), 50);

    schedule(&mut world, 0, EventKind::DriverRequest, EventSubject::Driver(slow));
    schedule(&mut world, 0, EventKind::DriverRequest, EventSubject::Driver(fast));
    schedule(&mut world, 1, EventKind::RiderRequest, EventSubject::Rider(jim));

    run_all(&mut world);

    let fast_driver = world.get::<Driver>(fast).expect("driver");
    let slow_driver = world.get::<Driver>(slow).expect("driver");
    // The fast driver served Jim and finished at his destination.
    assert_eq!(fast_driver.location, Location::new(5, 5));
    assert_eq!(slow_driver.location, Location::new(0, 3));
}

#[test]
fn riders_arriving_while_every_driver_is_busy_are_dropped() {
    let mut world = create_test_world();
    let bob = spawn_driver(&mut world, "Bob", Location::new(0, 5), 1);
    let first = spawn_rider(&mut world, "First", Location::new(0, 0), Location::new(9, 9), 100);
    let second = spawn_rider(&mut world, "Second", Location::new(0, 1), Location::new(3, 3), 4);

    schedule(&mut world, 0, EventKind::DriverRequest, EventSubject::Driver(bob));
    schedule(&mut world, 1, EventKind::RiderRequest, EventSubject::Rider(first));
    // Bob is still en route to First at t=2.
    schedule(&mut world, 2, EventKind::RiderRequest, EventSubject::Rider(second));

    assert!(run_one(&mut world));
    assert!(run_one(&mut world));
    assert!(run_one(&mut world));

    // Second was neither matched nor queued: the registry was non-empty.
    assert!(world.resource::<Dispatcher>().waiting_riders().is_empty());
    let rider = world.get::<Rider>(second).expect("rider");
    assert_eq!(rider.status, RiderStatus::Waiting);

    run_all(&mut world);

    // Patience eventually cancelled the dropped rider.
    let rider = world.get::<Rider>(second).expect("rider");
    assert_eq!(rider.status, RiderStatus::Cancelled);
    let rider = world.get::<Rider>(first).expect("rider");
    assert_eq!(rider.status, RiderStatus::Satisfied);
}

#[test]
fn a_waiting_rider_can_be_handed_to_two_drivers() {
    let mut world = create_test_world();
    let jim = spawn_rider(&mut world, "Jim", Location::new(0, 0), Location::new(0, 2), 100);
    let near = spawn_driver(&mut world, "Near", Location::new(0, 4), 1);
    let far = spawn_driver(&mut world, "Far", Location::new(0, 8), 1);

    // Jim queues first; both drivers then request and are each handed Jim,
    // because assignment does not remove him from the waiting list.
    schedule(&mut world, 0, EventKind::RiderRequest, EventSubject::Rider(jim));
    schedule(&mut world, 1, EventKind::DriverRequest, EventSubject::Driver(near));
    schedule(&mut world, 2, EventKind::DriverRequest, EventSubject::Driver(far));

    assert!(run_one(&mut world));
    assert!(run_one(&mut world));
    assert!(run_one(&mut world));

    let near_driver = world.get::<Driver>(near).expect("driver");
    let far_driver = world.get::<Driver>(far).expect("driver");
    assert_eq!(near_driver.destination, Some(Location::new(0, 0)));
    assert_eq!(far_driver.destination, Some(Location::new(0, 0)));

    run_all(&mut world);

    // Near arrives first and takes the ride; Far finds the rider satisfied,
    // goes back to the dispatcher, and ends up idle at the pickup cell.
    let rider = world.get::<Rider>(jim).expect("rider");
    assert_eq!(rider.status, RiderStatus::Satisfied);
    let near_driver = world.get::<Driver>(near).expect("driver");
    assert_eq!(near_driver.location, Location::new(0, 2));
    assert!(near_driver.is_idle);
    let far_driver = world.get::<Driver>(far).expect("driver");
    assert_eq!(far_driver.location, Location::new(0, 0));
    assert!(far_driver.is_idle);
}
