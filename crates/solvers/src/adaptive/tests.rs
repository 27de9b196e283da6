use std::convert::Infallible;

use approx::assert_abs_diff_eq;
use stepwise_core::{Component, Derivative, State, System, from_fn};

use super::{
    Action, Config, ConfigError, Error, Estimator, Event, Rule, Status, euler, rk4, solve,
    solve_unobserved,
};

/// Undamped harmonic oscillator: y″ = −y.
fn harmonic() -> impl System<Error = Infallible> {
    from_fn(|s: &State, _t| Derivative::new(s.dy, -s.y))
}

/// Damped oscillator: y″ = −3y − 0.1y′.
fn damped() -> impl System<Error = Infallible> {
    from_fn(|s: &State, _t| Derivative::new(s.dy, -3.0 * s.y - 0.1 * s.dy))
}

/// Analytic solution of [`damped`] for y(0) = 0.1, y′(0) = 0.
fn damped_exact(t: f64) -> f64 {
    let zeta_omega = 0.05;
    let omega_d = (3.0_f64 - zeta_omega * zeta_omega).sqrt();
    0.1 * (-zeta_omega * t).exp()
        * ((omega_d * t).cos() + zeta_omega / omega_d * (omega_d * t).sin())
}

#[test]
fn rk4_tracks_cosine_within_accuracy() {
    let acc = 1e-4;
    let solution = rk4(&harmonic(), State::new(1.0, 0.0), 10.0, acc).expect("should solve");

    assert_eq!(solution.status, Status::Complete);
    for sample in &solution.trajectory {
        assert!(
            (sample.state.y - sample.t.cos()).abs() < acc,
            "error too large at t={}",
            sample.t
        );
    }
}

#[test]
fn rk4_tracks_damped_oscillator_within_accuracy() {
    let acc = 1e-4;
    let solution = rk4(&damped(), State::new(0.1, 0.0), 10.0, acc).expect("should solve");

    for sample in &solution.trajectory {
        assert_abs_diff_eq!(sample.state.y, damped_exact(sample.t), epsilon = acc);
    }
}

#[test]
fn euler_tracks_damped_oscillator() {
    let solution = euler(&damped(), State::new(0.1, 0.0), 10.0, 1e-5).expect("should solve");

    let last = solution.trajectory.last();
    assert_abs_diff_eq!(last.state.y, damped_exact(last.t), epsilon = 1e-3);
}

#[test]
fn accepted_times_increase_and_reach_end_time() {
    for rule in [Rule::Euler, Rule::Rk4] {
        let config = Config::new(1e-4).expect("valid acc");
        let solution = solve_unobserved(&damped(), State::new(0.1, 0.0), 5.0, rule, &config)
            .expect("should solve");

        let times = solution.trajectory.times();
        assert_eq!(times[0], 0.0);
        assert!(times.windows(2).all(|w| w[1] > w[0]), "{rule:?}");
        assert!(*times.last().unwrap() >= 5.0, "{rule:?}");

        // Only the final sample may lie at or past the end time.
        assert!(times[..times.len() - 1].iter().all(|&t| t < 5.0));
    }
}

#[test]
fn first_sample_is_the_initial_condition() {
    let initial = State::new(0.1, 0.0);
    let solution = euler(&damped(), initial, 1.0, 1e-4).expect("should solve");

    assert_eq!(solution.trajectory.first().t, 0.0);
    assert_eq!(solution.trajectory.first().state, initial);
}

#[test]
fn repeated_runs_are_identical() {
    let config = Config::new(1e-4).expect("valid acc");
    let run = || {
        solve_unobserved(&damped(), State::new(0.1, 0.0), 3.0, Rule::Rk4, &config)
            .expect("should solve")
    };

    let first = run();
    let second = run();

    assert_eq!(first.trajectory, second.trajectory);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn step_size_doubles_after_accept_and_halves_after_reject() {
    let config = Config::new(1e-5).expect("valid acc");
    let mut events = Vec::new();

    solve(
        &damped(),
        State::new(0.1, 0.0),
        2.0,
        Rule::Euler,
        &config,
        |event: &Event| {
            events.push(*event);
            None
        },
    )
    .expect("should solve");

    assert!(events.iter().any(Event::is_accepted));
    assert!(events.iter().any(|e| !e.is_accepted()));

    assert_eq!(events[0].step(), config.initial_step());
    for event in &events {
        if event.is_accepted() {
            assert!(event.next_step() > event.step());
            assert_eq!(event.next_step(), 2.0 * event.step());
        } else {
            assert!(event.next_step() < event.step());
            assert_eq!(event.next_step(), 0.5 * event.step());
        }
    }
    for pair in events.windows(2) {
        assert_eq!(pair[1].step(), pair[0].next_step());
    }
}

#[test]
fn accepted_events_match_trajectory() {
    let config = Config::new(1e-4).expect("valid acc");
    let mut accepted = Vec::new();

    let solution = solve(
        &harmonic(),
        State::new(1.0, 0.0),
        1.0,
        Rule::Rk4,
        &config,
        |event: &Event| {
            if let Event::Accepted { t, state, .. } = event {
                accepted.push((*t, *state));
            }
            None
        },
    )
    .expect("should solve");

    let recorded: Vec<_> = solution
        .trajectory
        .iter()
        .skip(1)
        .map(|s| (s.t, s.state))
        .collect();
    assert_eq!(accepted, recorded);
}

#[test]
fn stats_are_consistent_with_trajectory() {
    let config = Config::new(1e-4).expect("valid acc");
    let solution = solve_unobserved(&damped(), State::new(0.1, 0.0), 2.0, Rule::Rk4, &config)
        .expect("should solve");
    let stats = solution.stats;

    assert_eq!(stats.iters, stats.accepted + stats.rejected);
    assert_eq!(solution.trajectory.len(), stats.accepted + 1);
    // HalfStep: one full and one half update per attempt, four evaluations each.
    assert_eq!(stats.evaluations, stats.iters * 8);

    let min = stats.min_step.expect("steps were accepted");
    let max = stats.max_step.expect("steps were accepted");
    assert!(min > 0.0 && min <= max);
}

#[test]
fn observer_can_stop_early() {
    let config = Config::new(1e-4).expect("valid acc");
    let mut accepted = 0;

    let solution = solve(
        &harmonic(),
        State::new(1.0, 0.0),
        10.0,
        Rule::Rk4,
        &config,
        |event: &Event| {
            if event.is_accepted() {
                accepted += 1;
            }
            (accepted >= 5).then_some(Action::StopEarly)
        },
    )
    .expect("should stop early");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.trajectory.len(), 6); // initial + 5 accepted
}

#[test]
fn tiny_accuracy_stops_at_iteration_cap() {
    let config = Config::new(1e-12)
        .expect("valid acc")
        .with_max_iters(20_000);

    let solution = solve_unobserved(&harmonic(), State::new(1.0, 0.0), 1.0, Rule::Rk4, &config)
        .expect("cap is not an error");

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.stats.iters, 20_000);
    assert!(solution.trajectory.last().t < 1.0);
}

#[test]
fn two_half_steps_takes_far_fewer_steps() {
    let base = Config::new(1e-5).expect("valid acc");
    let textbook = base.with_estimator(Estimator::TwoHalfSteps);
    let initial = State::new(1.0, 0.0);

    let heuristic =
        solve_unobserved(&harmonic(), initial, 10.0, Rule::Rk4, &base).expect("should solve");
    let doubling =
        solve_unobserved(&harmonic(), initial, 10.0, Rule::Rk4, &textbook).expect("should solve");

    assert!(doubling.stats.accepted * 100 < heuristic.stats.accepted);
    assert!(doubling.trajectory.last().t >= 10.0);
    for sample in &doubling.trajectory {
        assert_abs_diff_eq!(sample.state.y, sample.t.cos(), epsilon = 1e-3);
    }
}

#[test]
fn rejects_invalid_accuracy() {
    for acc in [0.0, -1e-5, f64::NAN] {
        let error = euler(&harmonic(), State::new(1.0, 0.0), 1.0, acc).unwrap_err();
        assert!(
            matches!(error, Error::InvalidConfig(ConfigError::Accuracy)),
            "acc = {acc}: {error}"
        );
    }
}

#[test]
fn rejects_invalid_end_time() {
    for end_time in [0.0, -1.0, f64::INFINITY] {
        let error = rk4(&harmonic(), State::new(1.0, 0.0), end_time, 1e-5).unwrap_err();
        assert!(matches!(error, Error::InvalidEndTime(_)), "{error}");
    }
}

#[test]
fn rejects_non_finite_initial_state() {
    let error = rk4(&harmonic(), State::new(f64::NAN, 0.0), 1.0, 1e-5).unwrap_err();
    assert!(matches!(error, Error::NonFiniteInitialState));
}

#[test]
fn nan_system_fails_instead_of_looping() {
    let system = from_fn(|_: &State, _t| Derivative::new(f64::NAN, f64::NAN));

    for rule in [Rule::Euler, Rule::Rk4] {
        let config = Config::default();
        let error = solve_unobserved(&system, State::new(1.0, 0.0), 1.0, rule, &config)
            .unwrap_err();
        assert!(matches!(error, Error::NonFinite { t, .. } if t == 0.0), "{error}");
    }
}

#[test]
fn rejection_limit_is_enforced() {
    // Euler from y′ = 1: the first estimate is h₀/2 ≈ 1.6e-3, far above acc.
    let config = Config::new(1e-5)
        .expect("valid acc")
        .with_max_rejections(1)
        .expect("valid limit");

    let error = solve_unobserved(&damped(), State::new(0.1, 1.0), 1.0, Rule::Euler, &config)
        .unwrap_err();

    assert!(
        matches!(error, Error::RejectionLimit { rejections: 2, t, .. } if t == 0.0),
        "{error}"
    );
}

#[test]
fn min_step_is_enforced() {
    let config = Config::new(1e-5)
        .expect("valid acc")
        .with_min_step(1e-3)
        .expect("valid min step");

    let error = solve_unobserved(&damped(), State::new(0.1, 1.0), 1.0, Rule::Euler, &config)
        .unwrap_err();

    let Error::StepUnderflow { t, step } = error else {
        panic!("expected StepUnderflow, got {error}");
    };
    assert_eq!(t, 0.0);
    assert!(step < 1e-3);
}

#[test]
fn system_errors_are_propagated() {
    #[derive(Debug, thiserror::Error)]
    #[error("evaluation failed at t={0}")]
    struct Failure(f64);

    struct FailsLate;

    impl System for FailsLate {
        type Error = Failure;

        fn derivative(&self, state: &State, t: f64) -> Result<Derivative, Failure> {
            if t > 0.5 {
                Err(Failure(t))
            } else {
                Ok(Derivative::new(state.dy, -state.y))
            }
        }
    }

    let error = rk4(&FailsLate, State::new(1.0, 0.0), 1.0, 1e-4).unwrap_err();

    let Error::System(source) = error else {
        panic!("expected a system error, got {error}");
    };
    assert!(source.to_string().starts_with("evaluation failed"));
}

#[test]
fn derivative_series_is_available_for_plotting() {
    let solution = rk4(&harmonic(), State::new(1.0, 0.0), 1.0, 1e-4).expect("should solve");
    let trajectory = &solution.trajectory;

    let velocity = trajectory.series(Component::Derivative);
    assert_eq!(velocity.len(), trajectory.times().len());
    for (t, v) in trajectory.times().into_iter().zip(velocity) {
        assert_abs_diff_eq!(v, -t.sin(), epsilon = 1e-4);
    }
}
