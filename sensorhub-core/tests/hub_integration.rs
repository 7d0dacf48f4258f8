//! Integration tests for the hub: registration, polling, analytics and the
//! fault-escalation ladder, driven cycle by cycle on a mock clock.

mod common;

use common::adapters::{climate_series, light_series, smoke_series, ScriptedAdapter};
use common::{attach_recorder, drive, hub_with_clock};

use sensorhub_core::{
    AdapterError, Reading, RegistryError, SensorEvent, SensorKind, SensorStatus,
};

#[test]
fn history_matches_fed_sequence_oldest_first() {
    let (hub, clock) = hub_with_clock();
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    hub.register(SensorKind::Light, "GY-30", light_series(&values), 100)
        .unwrap();

    hub.run_cycle(); // init
    drive(&hub, &clock, values.len(), 100);

    let history = hub.primary_history(SensorKind::Light).unwrap();
    assert_eq!(history.as_slice(), &values);
}

#[test]
fn circular_overwrite_keeps_most_recent_window() {
    let (hub, clock) = hub_with_clock();
    let values: Vec<f32> = (1..=25).map(|i| i as f32).collect();
    hub.register(SensorKind::Smoke, "MQ-2", smoke_series(&values), 100)
        .unwrap();

    hub.run_cycle();
    drive(&hub, &clock, values.len(), 100);

    let history = hub.primary_history(SensorKind::Smoke).unwrap();
    assert_eq!(history.len(), sensorhub_core::HISTORY_LEN);
    // Oldest five values fell out of the window
    let expected: Vec<f32> = (6..=25).map(|i| i as f32).collect();
    assert_eq!(history.as_slice(), expected.as_slice());
}

#[test]
fn windowed_stats_match_hand_computed_values() {
    let (hub, clock) = hub_with_clock();
    hub.register(
        SensorKind::Light,
        "GY-30",
        light_series(&[10.0, 20.0, 30.0]),
        100,
    )
    .unwrap();

    hub.run_cycle();
    drive(&hub, &clock, 3, 100);

    let stats = hub.stats(SensorKind::Light).unwrap();
    assert_eq!(stats.window_min, 10.0);
    assert_eq!(stats.window_max, 30.0);
    assert_eq!(stats.window_avg, 20.0);
    assert_eq!(stats.avg, 20.0);
}

#[test]
fn lifetime_bounds_survive_window_eviction() {
    let (hub, clock) = hub_with_clock();
    // One spike, then enough quiet values to push it out of the window
    let mut values = vec![500.0];
    values.extend(std::iter::repeat(1.0).take(sensorhub_core::HISTORY_LEN + 3));
    hub.register(SensorKind::Smoke, "MQ-2", smoke_series(&values), 100)
        .unwrap();

    hub.run_cycle();
    drive(&hub, &clock, values.len(), 100);

    let stats = hub.stats(SensorKind::Smoke).unwrap();
    assert_eq!(stats.max, 500.0);
    assert_eq!(stats.window_max, 1.0);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.avg, 1.0);
}

#[test]
fn dual_channel_stats_and_history() {
    let (hub, clock) = hub_with_clock();
    hub.register(
        SensorKind::Climate,
        "SHT30",
        climate_series(&[(20.0, 50.0), (22.0, 55.0)]),
        100,
    )
    .unwrap();

    hub.run_cycle();
    drive(&hub, &clock, 2, 100);

    let primary = hub.stats(SensorKind::Climate).unwrap();
    assert_eq!(primary.min, 20.0);
    assert_eq!(primary.max, 22.0);
    assert_eq!(primary.avg, 21.0);

    let secondary = hub.secondary_stats(SensorKind::Climate).unwrap();
    assert_eq!(secondary.min, 50.0);
    assert_eq!(secondary.max, 55.0);
    assert_eq!(secondary.avg, 52.5);

    let temps = hub.primary_history(SensorKind::Climate).unwrap();
    let humidity = hub.secondary_history(SensorKind::Climate).unwrap();
    assert_eq!(temps.as_slice(), &[20.0, 22.0]);
    assert_eq!(humidity.as_slice(), &[50.0, 55.0]);
}

#[test]
fn escalation_walks_soft_then_hard_ladder() {
    let (hub, clock) = hub_with_clock();
    let adapter = ScriptedAdapter::new()
        .with_inits(
            std::iter::once(Ok(()))
                .chain(std::iter::repeat(Err(AdapterError::Bus)).take(5)),
        )
        .with_reads(
            std::iter::once(Ok(Reading::Smoke { ppm: 5.0 }))
                .chain(std::iter::repeat(Err(AdapterError::Timeout)).take(5)),
        );
    let deinits = adapter.deinit_probe();
    let events = attach_recorder(&hub);

    hub.register(SensorKind::Smoke, "MQ-2", adapter, 100).unwrap();

    hub.run_cycle(); // init ok -> Online
    assert_eq!(
        hub.sensor_status(SensorKind::Smoke).unwrap(),
        SensorStatus::Online
    );

    // One good read, then five read failures (soft threshold) and five init
    // failures (hard threshold)
    drive(&hub, &clock, 11, 100);

    assert_eq!(
        hub.sensor_status(SensorKind::Smoke).unwrap(),
        SensorStatus::Error
    );
    assert_eq!(hub.active_sensor_count(), 0);
    assert_eq!(deinits.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(
        hub.sensor_data(SensorKind::Smoke),
        Err(RegistryError::NoData(SensorKind::Smoke))
    );

    {
        let log = events.lock().unwrap();
        assert!(log.contains(&SensorEvent::StatusChange {
            kind: SensorKind::Smoke,
            status: SensorStatus::Error,
        }));
        // Fault events counted every failure up to the hard threshold
        let max_count = log
            .iter()
            .filter_map(|e| match e {
                SensorEvent::Fault { error_count, .. } => Some(*error_count),
                _ => None,
            })
            .max();
        assert_eq!(max_count, Some(10));
    }

    // Re-enabling resets the counter and restarts the state machine
    hub.enable(SensorKind::Smoke).unwrap();
    assert_eq!(
        hub.sensor_status(SensorKind::Smoke).unwrap(),
        SensorStatus::Initializing
    );

    hub.run_cycle(); // init (script exhausted -> ok)
    clock.advance(100);
    hub.run_cycle(); // read (script exhausted -> NotReady)

    let log = events.lock().unwrap();
    let last_fault = log
        .iter()
        .rev()
        .find_map(|e| match e {
            SensorEvent::Fault { error_count, .. } => Some(*error_count),
            _ => None,
        });
    assert_eq!(last_fault, Some(1));
}

#[test]
fn one_failing_sensor_does_not_halt_the_others() {
    let (hub, clock) = hub_with_clock();
    hub.register(
        SensorKind::Light,
        "GY-30",
        // Bring-up never succeeds: ten failures reach the hard threshold
        ScriptedAdapter::new()
            .with_inits(std::iter::repeat(Err(AdapterError::Bus)).take(12)),
        100,
    )
    .unwrap();
    let values: Vec<f32> = (1..=12).map(|i| i as f32).collect();
    hub.register(SensorKind::Smoke, "MQ-2", smoke_series(&values), 100)
        .unwrap();

    hub.run_cycle();
    drive(&hub, &clock, 12, 100);

    // The light sensor has hard-faulted by now ...
    assert_eq!(
        hub.sensor_status(SensorKind::Light).unwrap(),
        SensorStatus::Error
    );
    // ... while the smoke sensor kept producing data every cycle
    let history = hub.primary_history(SensorKind::Smoke).unwrap();
    assert_eq!(history.len(), 12);
}

#[test]
fn init_success_defers_first_read_by_one_interval() {
    let (hub, clock) = hub_with_clock();
    let events = attach_recorder(&hub);
    hub.register(SensorKind::Light, "GY-30", light_series(&[42.0]), 100)
        .unwrap();

    hub.run_cycle(); // init at t=0
    hub.run_cycle(); // still t=0: interval not elapsed, no read

    let updates = |log: &common::EventLog| {
        log.lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, SensorEvent::DataUpdate { .. }))
            .count()
    };
    assert_eq!(updates(&events), 0);

    clock.advance(100);
    hub.run_cycle();
    assert_eq!(updates(&events), 1);

    let sample = hub.sensor_data(SensorKind::Light).unwrap();
    assert_eq!(sample.reading, Reading::Light { lux: 42.0 });
    assert_eq!(sample.timestamp, 100);
}

#[test]
fn interval_change_takes_effect_next_cycle() {
    let (hub, clock) = hub_with_clock();
    let events = attach_recorder(&hub);
    let values: Vec<f32> = (1..=6).map(|i| i as f32).collect();
    hub.register(SensorKind::Light, "GY-30", light_series(&values), 100)
        .unwrap();

    hub.run_cycle();
    hub.set_update_interval(SensorKind::Light, 300).unwrap();

    drive(&hub, &clock, 6, 100); // t = 100..600

    let updates = events
        .lock()
        .unwrap()
        .iter()
        .filter(|e| matches!(e, SensorEvent::DataUpdate { .. }))
        .count();
    // Reads at t=300 and t=600 only
    assert_eq!(updates, 2);
}

#[test]
fn rejected_interval_leaves_previous_in_effect() {
    let (hub, clock) = hub_with_clock();
    hub.register(SensorKind::Light, "GY-30", light_series(&[7.0]), 100)
        .unwrap();
    hub.run_cycle();

    assert_eq!(
        hub.set_update_interval(SensorKind::Light, 50),
        Err(RegistryError::IntervalTooShort {
            requested_ms: 50,
            min_ms: 100,
        })
    );

    // Still polling at the original 100 ms interval
    drive(&hub, &clock, 1, 100);
    let history = hub.primary_history(SensorKind::Light).unwrap();
    assert_eq!(history.as_slice(), &[7.0]);
}

#[test]
fn disable_runs_deinit_and_preserves_registration() {
    let (hub, clock) = hub_with_clock();
    let adapter = light_series(&[3.0]);
    let deinits = adapter.deinit_probe();
    hub.register(SensorKind::Light, "GY-30", adapter, 100).unwrap();

    hub.run_cycle();
    drive(&hub, &clock, 1, 100);
    assert!(hub.sensor_data(SensorKind::Light).is_ok());

    hub.disable(SensorKind::Light).unwrap();
    assert_eq!(deinits.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(
        hub.sensor_status(SensorKind::Light).unwrap(),
        SensorStatus::Offline
    );
    assert_eq!(hub.active_sensor_count(), 0);
    assert_eq!(
        hub.sensor_data(SensorKind::Light),
        Err(RegistryError::NoData(SensorKind::Light))
    );

    // Re-enable restarts at Initializing with the history intact
    hub.enable(SensorKind::Light).unwrap();
    assert_eq!(
        hub.sensor_status(SensorKind::Light).unwrap(),
        SensorStatus::Initializing
    );
    hub.run_cycle();
    let history = hub.primary_history(SensorKind::Light).unwrap();
    assert_eq!(history.as_slice(), &[3.0]);
}

#[test]
fn mismatched_reading_kind_counts_as_failure() {
    let (hub, clock) = hub_with_clock();
    let events = attach_recorder(&hub);
    let adapter =
        ScriptedAdapter::new().with_reads([Ok(Reading::Smoke { ppm: 1.0 })]);
    hub.register(SensorKind::Light, "GY-30", adapter, 100).unwrap();

    hub.run_cycle();
    drive(&hub, &clock, 1, 100);

    assert_eq!(
        hub.sensor_data(SensorKind::Light),
        Err(RegistryError::NoData(SensorKind::Light))
    );
    let log = events.lock().unwrap();
    assert!(log.contains(&SensorEvent::Fault {
        kind: SensorKind::Light,
        error_count: 1,
    }));
}

#[test]
fn event_sequence_for_a_healthy_sensor() {
    let (hub, clock) = hub_with_clock();
    let events = attach_recorder(&hub);
    hub.register(SensorKind::Climate, "SHT30", climate_series(&[(21.0, 40.0)]), 100)
        .unwrap();

    hub.run_cycle();
    drive(&hub, &clock, 1, 100);

    let log = events.lock().unwrap();
    assert_eq!(
        log[0],
        SensorEvent::StatusChange {
            kind: SensorKind::Climate,
            status: SensorStatus::Initializing,
        }
    );
    assert_eq!(
        log[1],
        SensorEvent::StatusChange {
            kind: SensorKind::Climate,
            status: SensorStatus::Online,
        }
    );
    match log[2] {
        SensorEvent::DataUpdate { kind, sample } => {
            assert_eq!(kind, SensorKind::Climate);
            assert_eq!(
                sample.reading,
                Reading::Climate {
                    temperature: 21.0,
                    humidity: 40.0,
                }
            );
        }
        ref other => panic!("expected DataUpdate, got {other:?}"),
    }
}
