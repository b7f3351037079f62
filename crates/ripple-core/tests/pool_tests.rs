// Host-side tests for the impulse ring: spawning, decay and recycling.

use glam::Vec2;
use ripple_core::{Impulse, ImpulsePool, WaveParams};
use std::f32::consts::TAU;

fn pool_with_capacity(capacity: usize) -> ImpulsePool {
    let params = WaveParams {
        capacity,
        ..WaveParams::default()
    };
    ImpulsePool::new(&params, 42)
}

fn snapshot(pool: &ImpulsePool) -> Vec<Impulse> {
    (0..pool.capacity())
        .map(|i| *pool.slot(i).unwrap())
        .collect()
}

#[test]
fn spawn_initializes_slot() {
    let mut pool = pool_with_capacity(4);
    let slot = pool.spawn(Vec2::new(12.0, -30.0));
    assert_eq!(slot, 0);
    assert_eq!(pool.cursor(), 1);

    let imp = pool.slot(slot).unwrap();
    assert!(imp.active);
    assert_eq!(imp.position, Vec2::new(12.0, -30.0));
    assert_eq!(imp.opacity, 1.0);
    assert_eq!(imp.scale_x, 1.0);
    assert_eq!(imp.scale_y, 1.0);
    assert!(imp.rotation >= 0.0 && imp.rotation < TAU);
}

#[test]
fn opacity_decays_geometrically_until_deactivation() {
    let mut pool = ImpulsePool::new(&WaveParams::default(), 1);
    let slot = pool.spawn(Vec2::ZERO);

    let mut prev = 1.0f32;
    let mut frames = 0usize;
    while pool.slot(slot).unwrap().active {
        pool.advance();
        frames += 1;
        let o = pool.slot(slot).unwrap().opacity;
        assert!(o < prev, "opacity must strictly decrease");
        assert!((o - prev * 0.93).abs() < 1e-6);
        prev = o;
        assert!(frames < 500, "impulse never deactivated");
    }

    let expected = (0.002f64.ln() / 0.93f64.ln()).ceil() as usize;
    assert_eq!(expected, 86);
    assert_eq!(frames, expected);
    assert!(prev < 0.002);
}

#[test]
fn scale_y_tracks_scale_x_every_frame() {
    let params = WaveParams {
        scale_target: 5.0,
        ..WaveParams::default()
    };
    let mut pool = ImpulsePool::new(&params, 3);
    pool.spawn(Vec2::ZERO);
    pool.spawn(Vec2::new(50.0, 50.0));

    for _ in 0..60 {
        pool.advance();
        pool.for_each_active(|_, imp| {
            assert!((imp.scale_y - 1.01 * imp.scale_x).abs() < 1e-5);
        });
    }
}

#[test]
fn scale_x_eases_toward_target() {
    let params = WaveParams {
        scale_target: 5.0,
        ..WaveParams::default()
    };
    let mut pool = ImpulsePool::new(&params, 3);
    let slot = pool.spawn(Vec2::ZERO);
    for _ in 0..10 {
        pool.advance();
    }
    // x_n = target - (target - 1) * smooth^n
    let expected = 5.0 - 4.0 * 0.98f32.powi(10);
    let imp = pool.slot(slot).unwrap();
    assert!((imp.scale_x - expected).abs() < 1e-4);
    assert!(imp.scale_x < 5.0);
}

#[test]
fn default_scale_stays_at_steady_state() {
    let mut pool = ImpulsePool::new(&WaveParams::default(), 3);
    let slot = pool.spawn(Vec2::ZERO);
    for _ in 0..20 {
        pool.advance();
    }
    let imp = pool.slot(slot).unwrap();
    assert!((imp.scale_x - 1.0).abs() < 1e-5);
    assert!((imp.scale_y - 1.01).abs() < 1e-5);
}

#[test]
fn advance_on_idle_pool_is_noop() {
    let mut pool = pool_with_capacity(8);
    let before = snapshot(&pool);
    pool.advance();
    pool.advance();
    assert_eq!(before, snapshot(&pool));
    assert_eq!(pool.active_count(), 0);
}

#[test]
fn advance_skips_inactive_slots() {
    let mut pool = pool_with_capacity(4);
    pool.spawn(Vec2::ZERO);
    let idle_before = *pool.slot(2).unwrap();
    pool.advance();
    assert_eq!(idle_before, *pool.slot(2).unwrap());
}

#[test]
fn spawn_past_capacity_wraps_to_slot_zero() {
    let mut pool = pool_with_capacity(100);
    for i in 0..100 {
        assert_eq!(pool.spawn(Vec2::new(i as f32, 0.0)), i);
    }
    assert_eq!(pool.active_count(), 100);

    let slot = pool.spawn(Vec2::new(-1.0, -1.0));
    assert_eq!(slot, 0);
    assert_eq!(pool.capacity(), 100);
    assert_eq!(pool.active_count(), 100);
    assert_eq!(pool.slot(0).unwrap().position, Vec2::new(-1.0, -1.0));
    assert!(pool.slot(100).is_none());
}

#[test]
fn reused_slot_is_fully_reset() {
    let mut pool = pool_with_capacity(2);
    pool.spawn(Vec2::ZERO);
    for _ in 0..5 {
        pool.advance();
    }
    pool.spawn(Vec2::ONE);
    let slot = pool.spawn(Vec2::new(3.0, 4.0));
    assert_eq!(slot, 0);

    let imp = pool.slot(0).unwrap();
    assert_eq!(imp.opacity, 1.0);
    assert_eq!(imp.scale_x, 1.0);
    assert_eq!(imp.scale_y, 1.0);
    assert_eq!(imp.position, Vec2::new(3.0, 4.0));
}

#[test]
fn iteration_follows_slot_order() {
    let mut pool = pool_with_capacity(4);
    for i in 0..6 {
        pool.spawn(Vec2::splat(i as f32));
    }
    let indices: Vec<usize> = pool.iter_active().map(|(i, _)| i).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    // Slots 0 and 1 were overwritten by the 5th and 6th spawn.
    assert_eq!(pool.slot(0).unwrap().position, Vec2::splat(4.0));
    assert_eq!(pool.slot(1).unwrap().position, Vec2::splat(5.0));
}

#[test]
fn faded_impulses_are_not_visited() {
    let mut pool = pool_with_capacity(4);
    pool.spawn(Vec2::ZERO);
    for _ in 0..50 {
        pool.advance();
    }
    pool.spawn(Vec2::ONE);
    for _ in 0..40 {
        pool.advance();
    }

    let mut seen = Vec::new();
    pool.for_each_active(|i, _| seen.push(i));
    assert_eq!(seen, vec![1]);
    assert!(!pool.slot(0).unwrap().active);
}

#[test]
fn single_impulse_after_ten_frames() {
    let mut pool = ImpulsePool::new(&WaveParams::default(), 9);
    let slot = pool.spawn(Vec2::ZERO);
    let r0 = pool.slot(slot).unwrap().rotation;
    for _ in 0..10 {
        pool.advance();
    }
    let imp = pool.slot(slot).unwrap();
    assert!((imp.opacity - 0.93f32.powi(10)).abs() < 1e-5);
    assert!((imp.opacity - 0.484).abs() < 1e-3);
    assert!((imp.rotation - r0 - 0.2).abs() < 1e-5);
    assert!(imp.active);
}

#[test]
fn same_seed_gives_same_rotations() {
    let mut a = ImpulsePool::new(&WaveParams::default(), 1234);
    let mut b = ImpulsePool::new(&WaveParams::default(), 1234);
    for _ in 0..5 {
        let sa = a.spawn(Vec2::ZERO);
        let sb = b.spawn(Vec2::ZERO);
        assert_eq!(a.slot(sa).unwrap().rotation, b.slot(sb).unwrap().rotation);
    }
}
