//! Zero-rate curve over maturities (in years) with a not-a-knot cubic,
//! printed together with its slope. Set `RUST_LOG=debug` to see the solved system.

extern crate poly_spline;

use poly_spline::{BoundaryCondition, ExtrapolationPolicy, Spline, SplineCache, SplineConfig, Knot};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let maturities = [0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0, 30.0];
    let zero_rates = [0.0525, 0.0530, 0.0512, 0.0478, 0.0455, 0.0432, 0.0428, 0.0425, 0.0448, 0.0441];

    let knots: Vec<Knot> = maturities
        .iter()
        .zip(zero_rates.iter())
        .map(|(t, r)| Knot::new(*t, *r))
        .collect();

    let config = SplineConfig::default().with_extrapolation(ExtrapolationPolicy::Clamp);
    let mut cache = SplineCache::new();
    let curve = match cache.get_or_build(&knots, 3, BoundaryCondition::NotAKnot, &config) {
        Ok(curve) => curve,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    let natural = Spline::new(knots, 3, BoundaryCondition::Natural).unwrap();

    println!("maturity;not_a_knot;natural;slope");
    let number_of_steps = 120;
    let step = 30.0 / number_of_steps as f64;
    for i in 0..=number_of_steps {
        let maturity = step * i as f64;
        let natural_rate = natural
            .evaluate(maturity)
            .map(|r| format!("{:.5}", r))
            .unwrap_or_else(|_| "".to_string());
        println!(
            "{:.2};{:.5};{};{:.6}",
            maturity,
            curve.evaluate(maturity).unwrap(),
            natural_rate,
            curve.evaluate_derivative(maturity, 1).unwrap()
        );
    }
}
