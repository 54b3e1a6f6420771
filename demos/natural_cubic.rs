extern crate poly_spline;

use poly_spline::{BoundaryCondition, Knot, Spline};

fn main() {

    let x_min = 0.0;
    let x_max = 6.0;

    let knots = vec![
        Knot::new(x_min, 1.0),
        Knot::new(1.0, -1.0),
        Knot::new(2.0, 0.0),
        Knot::new(4.0, 3.0),
        Knot::new(5.0, 1.0),
        Knot::new(x_max, 1.0)
    ];

    let spline = Spline::new(knots, 3, BoundaryCondition::Natural).unwrap();

    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y;dy;d2y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!(
            "{:.2};{:.4};{:.4};{:.4}",
            x,
            spline.evaluate(x).unwrap(),
            spline.evaluate_derivative(x, 1).unwrap(),
            spline.evaluate_derivative(x, 2).unwrap()
        );
    }
}
