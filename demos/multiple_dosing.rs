//! Compare dosing regimens against an efficacy window
//!
//! Run with `cargo run --example multiple_dosing --features plot` to also write a PNG.

use std::collections::HashMap;

use multidose::prelude::*;

fn main() -> anyhow::Result<()> {
    let props: HashMap<String, f64> = [
        ("F", 1.0),
        ("ka", 1.5),
        ("kel", 0.1),
        ("Vd", 50.0),
        ("min_eff", 2.0),
        ("max_eff", 10.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let mut engine = MultipleDosing::new(Parameters::from_map(&props)?);
    engine.set_observation_times(0.0, 48.0, 1.0)?;

    for (dose, tau) in [(500.0, 12.0), (250.0, 6.0), (1000.0, 24.0)] {
        engine.add_regimen(dose, tau)?;
    }

    for profile in engine.profiles() {
        println!(
            "{:<36} cmax={:.2} auc={:.1}",
            legend_label(profile),
            profile.cmax().unwrap_or(f64::NAN),
            profile.auc()?
        );
    }

    write_summary_csv(engine.session(), std::io::stdout(), &CsvOptions::default())?;

    #[cfg(feature = "plot")]
    plot_engine(&engine, "multiple_dosing.png", None)?;

    Ok(())
}
