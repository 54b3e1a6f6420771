extern crate poly_spline;

use poly_spline::{BoundaryCondition, ExtrapolationPolicy, Knot, Spline};

fn main() {

    let knots = vec![
        Knot::new(1.0, 1.0),
        Knot::new(2.0, 0.0),
        Knot::new(3.0, -2.0),
        Knot::new(4.0, 1.0),
        Knot::new(5.0, 1.0)
    ];

    let boundary = BoundaryCondition::Clamped { left: 0.0, right: -1.0 };
    let linear = Spline::new(knots, 3, boundary)
        .unwrap()
        .with_extrapolation(ExtrapolationPolicy::Linear);
    let clamped = linear.clone().with_extrapolation(ExtrapolationPolicy::Clamp);

    let x_min = 0.0;
    let x_max = 6.0;
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;linear;clamp");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!("{:.2};{:.2};{:.2}", x, linear.evaluate(x).unwrap(), clamped.evaluate(x).unwrap());
    }
}
