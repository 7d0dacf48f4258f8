//! Basic Polling Example
//!
//! Registers the three simulated sensors, starts the polling thread and
//! streams scheduler events for a few seconds — the same wiring a GUI
//! application would do at startup.
//!
//! ## Running the Example
//!
//! ```bash
//! RUST_LOG=info cargo run --example 01_basic_polling
//! ```

use std::thread;
use std::time::Duration;

use sensorhub_core::{HubConfig, SensorEvent, SensorHub, SensorKind};
use sensorhub_sim::{SimClimate, SimLight, SimSmoke};

fn main() {
    env_logger::init();

    println!("SensorHub Basic Polling Example");
    println!("===============================\n");

    let config = HubConfig::default().with_startup_delay(200);
    let hub = SensorHub::new(config);

    hub.register_event_callback(|event| match event {
        SensorEvent::DataUpdate { kind, sample } => {
            println!(
                "[{:>8} ms] {:<8} {:?}",
                sample.timestamp,
                kind.name(),
                sample.reading
            );
        }
        SensorEvent::StatusChange { kind, status } => {
            println!("            {:<8} -> {status}", kind.name());
        }
        SensorEvent::Fault { kind, error_count } => {
            println!("            {:<8} fault #{error_count}", kind.name());
        }
    });

    hub.register(SensorKind::Light, "GY-30", SimLight::new(11), 500)
        .expect("light registration");
    hub.register(SensorKind::Climate, "SHT30", SimClimate::new(23), 1000)
        .expect("climate registration");
    hub.register(SensorKind::Smoke, "MQ-2", SimSmoke::new(47), 700)
        .expect("smoke registration");

    let handle = hub.spawn().expect("spawn poll thread");
    println!(
        "polling {} sensors, press Ctrl-C to abort early\n",
        hub.active_sensor_count()
    );

    thread::sleep(Duration::from_secs(6));

    hub.stop();
    handle.join().expect("join poll thread");
    println!("\ndone");
}
