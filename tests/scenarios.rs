//! End-to-end engine scenarios through the public API.

use assert_matches::assert_matches;

use cafe_dispatch::config::DispatchConfig;
use cafe_dispatch::dispatch::Dispatcher;
use cafe_dispatch::models::{AlertTag, NewOrder, OrderStatus, MS_PER_MINUTE};
use cafe_dispatch::priority::{PriorityCalculator, ScoringContext};
use cafe_dispatch::simulation::{SimulationConfig, Simulator, WorkloadProfile};
use cafe_dispatch::DispatchError;

fn three_baristas() -> Dispatcher {
    Dispatcher::new(DispatchConfig::default()).unwrap()
}

/// Submits three long orders at t=0 so every barista is busy.
fn saturate(d: &mut Dispatcher) {
    for _ in 0..3 {
        let order = d.submit(NewOrder::new("Mocha", 8), 0).unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);
    }
}

fn saturate_one(d: &mut Dispatcher) {
    d.submit(NewOrder::new("Mocha", 8), 0).unwrap();
}

/// Checks the worker-side invariants.
fn assert_consistent(d: &Dispatcher) {
    for b in d.baristas() {
        let in_progress: Vec<_> = d
            .orders()
            .filter(|o| o.status == OrderStatus::InProgress && o.assigned_barista_id == Some(b.id))
            .collect();
        assert!(in_progress.len() <= 1, "barista {} holds {} orders", b.name, in_progress.len());
        assert_eq!(b.available, in_progress.is_empty());
        assert_eq!(b.current_order, in_progress.first().map(|o| o.id));
        let pending: u32 = in_progress.iter().map(|o| o.prep_time_minutes).sum();
        assert_eq!(b.total_pending_minutes, pending);
    }
}

#[test]
fn test_loyal_regular_outranks_new_customer() {
    let mut d = Dispatcher::new(DispatchConfig::default().with_baristas(["Alice"])).unwrap();
    saturate_one(&mut d);

    let vip = d
        .submit(NewOrder::new("Latte", 5).with_loyalty_tier(5).regular(true), 0)
        .unwrap();
    let new = d.submit(NewOrder::new("Latte", 5), 0).unwrap();
    assert!(vip.priority > new.priority);

    let direct = PriorityCalculator::new();
    let ctx = ScoringContext::at_time(0);
    let queue = d.queue(None);
    assert_eq!(queue[0].id, vip.id);
    assert!(
        direct.score(&queue[0], &ctx).priority > direct.score(&queue[1], &ctx).priority
    );
}

#[test]
fn test_queued_order_skips_once_per_tick_until_a_barista_frees() {
    let mut d = three_baristas();
    saturate(&mut d);
    let waiting = d.submit(NewOrder::new("Espresso", 2), 0).unwrap();
    assert_eq!(waiting.status, OrderStatus::Queued);
    assert_eq!(waiting.skip_count, 1);

    for tick in 1..=5 {
        d.tick(tick * 2_000);
        let order = d.order(waiting.id).unwrap();
        assert_eq!(order.status, OrderStatus::Queued);
        assert_eq!(order.skip_count, 1 + tick as u32);
    }

    let freed_at = 60_000;
    d.complete(2, freed_at).unwrap();
    let order = d.order(waiting.id).unwrap().clone();
    assert_eq!(order.status, OrderStatus::InProgress);
    assert_eq!(order.assigned_barista_id, Some(2));

    // Frozen once dispatched.
    d.tick(freed_at + 2_000);
    assert_eq!(d.order(waiting.id).unwrap().skip_count, order.skip_count);
    assert_consistent(&d);
}

#[test]
fn test_overloaded_barista_raises_fairness_alert_in_same_tick() {
    let mut d = three_baristas();
    let before = d.alerts().len();
    let order = d.submit(NewOrder::new("Mocha", 8), 0).unwrap();
    assert_eq!(order.assigned_barista_id, Some(1));

    let alerts = d.alerts().since(before as u64);
    let alert = alerts
        .iter()
        .find(|a| a.tag == AlertTag::Fairness)
        .expect("fairness alert expected");
    assert!(alert.message.contains("Alice"));
    assert!(d.baristas()[0].workload_ratio > 1.2);
}

#[test]
fn test_balanced_pool_raises_no_workload_alert() {
    let mut d = three_baristas();
    d.submit(NewOrder::new("Mocha", 8), 0).unwrap();
    d.submit(NewOrder::new("Mocha", 8), 0).unwrap();
    let fairness_before = d.alerts().count_tagged(AlertTag::Fairness);

    // The third equal order evens every ratio out to 1.0.
    d.submit(NewOrder::new("Mocha", 8), 0).unwrap();
    assert_eq!(d.alerts().count_tagged(AlertTag::Fairness), fairness_before);
    for b in d.baristas() {
        assert!((b.workload_ratio - 1.0).abs() < 1e-10);
    }
}

#[test]
fn test_untouched_order_times_out_after_deadline() {
    let mut d = three_baristas();
    saturate(&mut d);
    let waiting = d.submit(NewOrder::new("Latte", 5), MS_PER_MINUTE).unwrap();

    // Free everyone at 8 minutes; the Mochas expire at exactly their deadline.
    let report = d.sweep_timeouts(8 * MS_PER_MINUTE);
    assert_eq!(report.expired.len(), 3);
    assert_eq!(d.order(waiting.id).unwrap().status, OrderStatus::InProgress);

    let before = d.timeout_count();
    let critical_before = d.alerts().count_tagged(AlertTag::Critical);
    d.sweep_timeouts(9 * MS_PER_MINUTE);
    assert_eq!(d.order(waiting.id).unwrap().status, OrderStatus::TimedOut);
    assert_eq!(d.timeout_count(), before + 1);
    assert_eq!(d.alerts().count_tagged(AlertTag::Critical), critical_before + 1);

    let last = d.alerts().all().last().unwrap();
    assert_eq!(last.tag, AlertTag::Critical);
    assert!(last.message.contains(&format!("#{}", waiting.id)));
    assert!(last.message.contains("Latte"));
    assert_consistent(&d);
}

#[test]
fn test_no_active_order_survives_a_sweep_past_its_deadline() {
    let mut d = three_baristas();
    for i in 0..10 {
        d.submit(NewOrder::new("Cappuccino", 4), i * 20_000).unwrap();
    }
    let now = 12 * MS_PER_MINUTE;
    d.sweep_timeouts(now);
    for order in d.orders() {
        if order.wait_ms(now) >= 8 * MS_PER_MINUTE {
            assert!(!order.status.is_active(), "order {} still active", order.id);
        }
    }
    assert_consistent(&d);
}

#[test]
fn test_skip_counts_never_decrease() {
    let mut d = Dispatcher::new(DispatchConfig::default().with_baristas(["Alice"])).unwrap();
    for i in 0..4 {
        d.submit(NewOrder::new("Americano", 3), i).unwrap();
    }
    let mut last: Vec<u32> = d.orders().map(|o| o.skip_count).collect();
    let mut now = 0;
    for step in 0..30 {
        now += 20_000;
        if step % 5 == 4 {
            d.complete_due(now);
        }
        d.tick(now);
        let current: Vec<u32> = d.orders().map(|o| o.skip_count).collect();
        for (before, after) in last.iter().zip(&current) {
            assert!(after >= before);
        }
        last = current;
        assert_consistent(&d);
    }
}

#[test]
fn test_rescoring_is_idempotent_within_a_tick() {
    let mut d = Dispatcher::new(DispatchConfig::default().with_baristas(["Alice"])).unwrap();
    saturate_one(&mut d);
    d.submit(NewOrder::new("Latte", 5).with_loyalty_tier(3), 0).unwrap();
    d.tick(5 * MS_PER_MINUTE);

    let calc = PriorityCalculator::new();
    let ctx = ScoringContext::at_time(7 * MS_PER_MINUTE);
    for order in d.queue(None) {
        let a = calc.score(&order, &ctx);
        let b = calc.score(&order, &ctx);
        assert_eq!(a, b);
    }
}

#[test]
fn test_completion_errors_leave_state_untouched() {
    let mut d = three_baristas();
    let ticks = d.tick_count();
    assert_matches!(d.complete(42, 0), Err(DispatchError::NotFound { .. }));
    assert_matches!(d.complete(1, 0), Err(DispatchError::StateConflict(_)));
    assert_matches!(
        d.submit(NewOrder::new("Latte", 5).with_loyalty_tier(0), 0),
        Err(DispatchError::Validation(_))
    );
    assert_eq!(d.tick_count(), ticks);
    assert_eq!(d.orders().count(), 0);
}

#[test]
fn test_simulation_is_reproducible() {
    let config = SimulationConfig::default()
        .with_seed(2024)
        .with_workload(WorkloadProfile {
            window_minutes: 45,
            ..WorkloadProfile::default()
        });
    let first = Simulator::new(config.clone()).unwrap().run(3).unwrap();
    let second = Simulator::new(config).unwrap().run(3).unwrap();
    assert_eq!(first, second);
    for case in &first {
        assert!(case.drained);
        assert_eq!(case.barista_orders.len(), 3);
        assert_eq!(case.completed + case.timeouts, case.total_orders as u64);
    }
}
