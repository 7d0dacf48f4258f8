//! History and Statistics Example
//!
//! Drives the scheduler cycle by cycle on a mock clock — no threads, no
//! waiting — then dumps each sensor's rolling history and its windowed vs
//! lifetime statistics.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_history_stats
//! ```

use sensorhub_core::{HubConfig, MockTimeSource, SensorHub, SensorKind};
use sensorhub_sim::{SimClimate, SimLight, SimSmoke};

fn main() {
    env_logger::init();

    println!("SensorHub History & Statistics Example");
    println!("======================================\n");

    let clock = MockTimeSource::new(0);
    let hub = SensorHub::with_time_source(
        HubConfig::default().with_startup_delay(0),
        clock.clone(),
    );

    hub.register(SensorKind::Light, "GY-30", SimLight::new(101), 1000)
        .expect("light registration");
    hub.register(SensorKind::Climate, "SHT30", SimClimate::new(202), 1000)
        .expect("climate registration");
    hub.register(
        SensorKind::Smoke,
        "MQ-2",
        SimSmoke::new(303).with_spike(8, 10, 180.0),
        1000,
    )
    .expect("smoke registration");

    // One sweep to initialize, then simulate 40 seconds of polling
    hub.run_cycle();
    for _ in 0..40 {
        clock.advance(1000);
        hub.run_cycle();
    }

    for kind in SensorKind::ALL {
        let unit = hub.sensor_unit(kind).unwrap_or("");
        println!("--- {} ({unit}) ---", kind.name());

        let history = hub.primary_history(kind).expect("history");
        print!("history ({} samples):", history.len());
        for value in &history {
            print!(" {value:.1}");
        }
        println!();

        let stats = hub.stats(kind).expect("stats");
        println!(
            "window:   min {:.1}  max {:.1}  avg {:.1}",
            stats.window_min, stats.window_max, stats.window_avg
        );
        println!(
            "lifetime: min {:.1}  max {:.1}  avg {:.1}",
            stats.min, stats.max, stats.avg
        );

        if kind.has_secondary() {
            let stats = hub.secondary_stats(kind).expect("secondary stats");
            println!(
                "humidity: min {:.1}  max {:.1}  avg {:.1} %RH",
                stats.min, stats.max, stats.avg
            );
        }
        println!();
    }

    // The smoke spike fell out of the 20-deep window by now, but lifetime
    // max still remembers it
    let smoke = hub.stats(SensorKind::Smoke).expect("smoke stats");
    println!(
        "smoke spike: lifetime max {:.1} ppm vs window max {:.1} ppm",
        smoke.max, smoke.window_max
    );
}
