use std::{sync::Arc, thread, time::Duration};

use gherkin_harness::{
    out::WritableString,
    stats::{Rendering, RunStats, Status, Summary},
    Coloring,
};

fn monochrome() -> RunStats {
    RunStats::new(Rendering {
        coloring: Coloring::Never,
        ..Rendering::default()
    })
}

fn written(stats: &RunStats) -> String {
    let mut out = WritableString::default();
    stats.write_summary(&mut out).unwrap();
    out.0
}

#[test]
fn zero_activity_prints_fixed_lines() {
    let stats = monochrome();
    assert_eq!(written(&stats), "0 Scenarios\n0 Steps\n0m0.000s\n");
    assert_eq!(stats.summary(), Summary::empty());
}

#[test]
fn scenarios_without_steps_still_print_as_zero() {
    let stats = monochrome();
    stats.record_scenario(Status::Passed);

    assert_eq!(written(&stats), "0 Scenarios\n0 Steps\n0m0.000s\n");
    assert_eq!(stats.summary(), Summary::empty());
}

#[test]
fn breakdown_lists_categories_in_fixed_order() {
    let stats = monochrome();
    for status in [
        Status::Passed,
        Status::Failed,
        Status::Skipped,
        Status::Pending,
        Status::Undefined,
        Status::Passed,
    ] {
        stats.record_step(status, None);
        stats.record_scenario(status);
    }

    assert_eq!(
        written(&stats),
        "6 Scenarios (1 failed, 1 skipped, 1 pending, 1 undefined, \
         2 passed)\n\
         6 Steps (1 failed, 1 skipped, 1 pending, 1 undefined, \
         2 passed)\n\
         0m0.000s\n",
    );
}

#[test]
fn breakdown_omits_empty_categories() {
    let stats = monochrome();
    stats.record_step(Status::Passed, None);
    stats.record_step(Status::Failed, None);
    stats.record_scenario(Status::Failed);

    assert_eq!(
        written(&stats),
        "1 Scenarios (1 failed)\n\
         2 Steps (1 failed, 1 passed)\n\
         0m0.000s\n",
    );
}

#[test]
fn unrecognized_statuses_are_not_counted() {
    let stats = monochrome();
    stats.record_step(Status::classify("exotic"), None);
    stats.record_scenario(Status::Unrecognized);

    assert_eq!(written(&stats), "0 Scenarios\n0 Steps\n0m0.000s\n");
}

#[test]
fn durations_of_steps_and_hooks_accumulate() {
    let stats = monochrome();
    stats.record_step(
        Status::Passed,
        Some(Duration::from_nanos(125_000_000_000)),
    );
    stats.record_step(Status::Passed, None);
    stats.record_hook(Some(Duration::from_millis(500)));
    stats.record_hook(None);
    stats.record_scenario(Status::Passed);

    assert_eq!(
        written(&stats),
        "1 Scenarios (1 passed)\n2 Steps (2 passed)\n2m5.500s\n",
    );
}

#[test]
fn summary_value_matches_monochrome_rendering() {
    let stats = monochrome();
    stats.record_step(Status::Failed, Some(Duration::from_secs(1)));
    stats.record_scenario(Status::Failed);

    assert_eq!(
        stats.summary(),
        Summary {
            scenarios: "1 Scenarios (1 failed)".into(),
            steps: "1 Steps (1 failed)".into(),
            duration: "0m1.000s".into(),
        },
    );
}

#[test]
fn rendering_is_idempotent() {
    let stats = monochrome();
    stats.record_step(Status::Passed, Some(Duration::from_millis(42)));
    stats.record_scenario(Status::Passed);

    assert_eq!(written(&stats), written(&stats));
    assert_eq!(stats.summary(), stats.summary());
}

#[test]
fn colored_rendering_styles_each_category() {
    let stats = RunStats::new(Rendering {
        coloring: Coloring::Always,
        ..Rendering::default()
    });
    stats.record_step(Status::Passed, None);
    stats.record_step(Status::Failed, None);
    stats.record_scenario(Status::Failed);

    let out = written(&stats);
    assert!(out.contains("\u{1b}[31m1 failed\u{1b}[0m"), "no red: {out}");
    assert!(out.contains("\u{1b}[32m2 passed\u{1b}[0m"), "no green: {out}");

    // The plain value form stays monochrome regardless.
    assert_eq!(stats.summary().steps, "2 Steps (1 failed, 2 passed)");
}

#[test]
fn decimal_mark_is_configurable() {
    let stats = RunStats::new(Rendering {
        coloring: Coloring::Never,
        decimal_mark: ',',
    });
    stats.record_step(Status::Passed, Some(Duration::from_millis(1500)));

    assert_eq!(stats.summary().duration, "0m1,500s");
}

#[test]
fn concurrent_recording_loses_no_updates() {
    let stats = Arc::new(monochrome());

    let workers = (0..8)
        .map(|_| {
            let stats = Arc::clone(&stats);
            thread::spawn(move || {
                for _ in 0..1000 {
                    stats.record_step(
                        Status::Passed,
                        Some(Duration::from_nanos(1)),
                    );
                    stats.record_scenario(Status::Failed);
                }
            })
        })
        .collect::<Vec<_>>();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(stats.steps().passed, 8000);
    assert_eq!(stats.scenarios().failed, 8000);
    assert_eq!(stats.duration(), Duration::from_nanos(8000));
}
