//! Fault Recovery Example
//!
//! Wraps a smoke sensor in the [`Flaky`] fault injector and walks the hub's
//! escalation ladder: consecutive failures trigger a soft re-init, more
//! failures hard-disable the sensor with `Error` status, and an explicit
//! re-enable brings it back.
//!
//! ## Running the Example
//!
//! ```bash
//! RUST_LOG=warn cargo run --example 03_fault_recovery
//! ```

use sensorhub_core::{
    HubConfig, MockTimeSource, SensorEvent, SensorHub, SensorKind, SensorStatus,
};
use sensorhub_sim::{Flaky, SimSmoke};

fn main() {
    env_logger::init();

    println!("SensorHub Fault Recovery Example");
    println!("================================\n");

    let clock = MockTimeSource::new(0);
    let hub = SensorHub::with_time_source(
        HubConfig::default().with_startup_delay(0),
        clock.clone(),
    );

    hub.register_event_callback(|event| match event {
        SensorEvent::StatusChange { kind, status } => {
            println!(">>> {} status -> {status}", kind.name());
        }
        SensorEvent::Fault { kind, error_count } => {
            println!("    {} failure #{error_count}", kind.name());
        }
        SensorEvent::DataUpdate { .. } => {}
    });

    // Bring-up fails ten times in a row, enough to hard-disable the slot;
    // once it finally comes up, every third read still fails
    let sensor = Flaky::new(SimSmoke::new(7))
        .failing_first_inits(10)
        .failing_every_nth_read(3);
    hub.register(SensorKind::Smoke, "MQ-2", sensor, 1000)
        .expect("smoke registration");

    println!("\n-- polling with a dead sensor --");
    hub.run_cycle(); // first bring-up attempt
    let mut cycles = 0;
    while hub.sensor_status(SensorKind::Smoke).expect("status") != SensorStatus::Error {
        clock.advance(1000);
        hub.run_cycle();
        cycles += 1;
        assert!(cycles < 100, "escalation never reached the hard threshold");
    }
    println!(
        "\nsensor reached ERROR after {cycles} cycles, {} sensors still active",
        hub.active_sensor_count()
    );

    println!("\n-- operator re-enables the sensor --");
    hub.enable(SensorKind::Smoke).expect("re-enable");
    hub.run_cycle(); // bring-up finally succeeds, error counter starts fresh
    for _ in 0..5 {
        clock.advance(1000);
        hub.run_cycle();
    }

    println!(
        "\nfinal status: {}",
        hub.sensor_status(SensorKind::Smoke).expect("status")
    );
}
