//! Interactive visualizations of stepwise solvers.
//!
//! Each mode integrates a test oscillator and opens an interactive plot
//! window showing the result.
//!
//! # Usage
//!
//! ```text
//! cargo run --example plot --features plot -- fixed
//! cargo run --example plot --features plot -- fixed 0.5
//! cargo run --example plot --features plot -- euler 1e-4
//! cargo run --example plot --features plot -- rk4
//! cargo run --example plot --features plot -- compare
//! cargo run --example plot --features plot -- steps
//! cargo run --example plot --features plot -- sweep
//! ```
//!
//! # Modes
//!
//! - **fixed [step]**: Damped oscillator y″ = −3y − 0.1y′ from (0.1, 0) on a
//!   uniform grid (default step 0.1). Shows y and y′.
//!
//! - **euler [acc]**: Same oscillator with the adaptive Euler solver
//!   (default acc 1e-5).
//!
//! - **rk4 [acc]**: Same oscillator with the adaptive RK4 solver.
//!
//! - **compare**: Fixed-grid, adaptive Euler, and adaptive RK4 overlaid with
//!   the closed-form solution.
//!
//! - **steps [acc]**: Accepted and rejected step sizes of the adaptive RK4
//!   solver on a log scale. Shows the step size oscillating by factors of two.
//!
//! - **sweep**: Four undamped-to-damped oscillators with rising natural
//!   frequency and damping, overlaid in one figure.

use std::{error::Error, str::FromStr};

use stepwise_core::{Component, Derivative, State, from_fn};
use stepwise_observers::{PlotObserver, Series, ShowConfig, show_series};
use stepwise_solvers::{
    adaptive::{self, Rule},
    fixed::{self, Method},
};

const END_TIME: f64 = 10.0;
const INITIAL: State = State { y: 0.1, dy: 0.0 };

fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "compare".into());
    match mode.as_str() {
        "fixed" => fixed_grid(arg(2, 0.1)),
        "euler" => adaptive_run(Rule::Euler, arg(2, 1e-5)),
        "rk4" => adaptive_run(Rule::Rk4, arg(2, 1e-5)),
        "compare" => compare(),
        "steps" => steps(arg(2, 1e-4)),
        "sweep" => sweep(),
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: plot [fixed [step]|euler [acc]|rk4 [acc]|compare|steps [acc]|sweep]");
            std::process::exit(1);
        }
    }
}

/// Parses the positional argument at `index`, falling back to `default`.
fn arg<T: FromStr + Copy>(index: usize, default: T) -> T {
    std::env::args()
        .nth(index)
        .as_deref()
        .map(str::parse::<T>)
        .transpose()
        .unwrap_or_else(|_| {
            eprintln!("Invalid argument {index}: expected a number, e.g. 0.1");
            std::process::exit(1);
        })
        .unwrap_or(default)
}

/// y″ = −3y − 0.1y′
fn damped(s: &State, _t: f64) -> Derivative {
    Derivative::new(s.dy, -3.0 * s.y - 0.1 * s.dy)
}

/// Closed form of [`damped`] from [`INITIAL`].
fn damped_exact(t: f64) -> f64 {
    let decay = 0.05;
    let omega = (3.0_f64 - decay * decay).sqrt();
    0.1 * (-decay * t).exp() * ((omega * t).cos() + decay / omega * (omega * t).sin())
}

fn value_and_derivative(trajectory: &stepwise_core::Trajectory) -> Vec<Series> {
    vec![
        Series::from_trajectory("y", trajectory, Component::Value),
        Series::from_trajectory("y′", trajectory, Component::Derivative),
    ]
}

fn fixed_grid(step: f64) -> Result<(), Box<dyn Error>> {
    let solution =
        fixed::solve_uniform(&from_fn(damped), INITIAL, END_TIME, step, Method::default())?;
    println!(
        "fixed: {} samples, {} evaluations",
        solution.trajectory.len(),
        solution.evaluations
    );

    show_series(
        value_and_derivative(&solution.trajectory),
        ShowConfig::new()
            .title(format!("Fixed grid (step {step}): y″ = −3y − 0.1y′"))
            .labels("Time, s", "Value")
            .legend(),
    )?;
    Ok(())
}

fn adaptive_run(rule: Rule, acc: f64) -> Result<(), Box<dyn Error>> {
    let config = adaptive::Config::new(acc)?;
    let solution = adaptive::solve_unobserved(&from_fn(damped), INITIAL, END_TIME, rule, &config)?;
    println!("{rule:?}: {:?}", solution.stats);

    show_series(
        value_and_derivative(&solution.trajectory),
        ShowConfig::new()
            .title(format!("Adaptive {rule:?} (acc {acc:e}): y″ = −3y − 0.1y′"))
            .labels("Time, s", "Value")
            .legend(),
    )?;
    Ok(())
}

fn compare() -> Result<(), Box<dyn Error>> {
    let system = from_fn(damped);
    let reference = fixed::solve_uniform(&system, INITIAL, END_TIME, 0.1, Method::default())?;
    let euler = adaptive::euler(&system, INITIAL, END_TIME, 1e-5)?;
    let rk4 = adaptive::rk4(&system, INITIAL, END_TIME, 1e-5)?;

    let exact = reference
        .trajectory
        .times()
        .into_iter()
        .map(|t| [t, damped_exact(t)])
        .collect();

    show_series(
        vec![
            Series::from_trajectory("Fixed grid", &reference.trajectory, Component::Value),
            Series::from_trajectory("Adaptive Euler", &euler.trajectory, Component::Value),
            Series::from_trajectory("Adaptive RK4", &rk4.trajectory, Component::Value),
            Series::new("Closed form", exact),
        ],
        ShowConfig::new()
            .title("Fixed grid vs. adaptive step doubling")
            .labels("Time, s", "y")
            .legend(),
    )?;
    Ok(())
}

fn steps(acc: f64) -> Result<(), Box<dyn Error>> {
    let mut obs = PlotObserver::<2>::new(["Accepted", "Rejected"]);
    let config = adaptive::Config::new(acc)?;
    let solution = adaptive::solve(
        &from_fn(damped),
        INITIAL,
        END_TIME,
        Rule::Rk4,
        &config,
        &mut obs,
    )?;
    println!("rk4: {:?}", solution.stats);

    obs.show(
        ShowConfig::new()
            .title(format!("Adaptive RK4 step sizes (acc {acc:e})"))
            .labels("Time, s", "h")
            .legend()
            .log_y(),
    )?;
    Ok(())
}

fn sweep() -> Result<(), Box<dyn Error>> {
    let mut series = Vec::new();

    for i in 0..4_u32 {
        let omega = 1.0 + 0.2 * f64::from(i);
        let damping = 0.05 * f64::from(i);
        let system = from_fn(move |s: &State, _t| {
            Derivative::new(s.dy, -damping * s.dy - omega * omega * s.y)
        });

        let solution = fixed::solve_uniform(
            &system,
            State::new(1.0, 0.0),
            END_TIME,
            0.001,
            Method::default(),
        )?;
        series.push(Series::from_trajectory(
            format!("c={damping:.2}, ω={omega:.1}"),
            &solution.trajectory,
            Component::Value,
        ));
    }

    show_series(
        series,
        ShowConfig::new()
            .title("y″ = −c·y′ − ω²·y for rising ω and c")
            .labels("Time, s", "y")
            .legend(),
    )?;
    Ok(())
}
