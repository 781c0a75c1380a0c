//! Integration tests for the lab behaviours
//!
//! These tests drive behaviours through a real Stage frame loop:
//! 1. Camera follow lands on target + offset after the target moves
//! 2. Controller translation/rotation scale with axis input and dt
//! 3. Camera switching stays exclusive
//! 4. The windowed mover triggers only at its exact minute and runs to completion
//! 5. Disabling the mover detaches it from the clock

use stagehand_core::behaviours::{
    CameraFollower, CameraPair, DualAxisController, MoverSettings, RetriggerPolicy, WindowedMover,
    DEFAULT_FOLLOW_OFFSET,
};
use stagehand_core::{
    AxisMap, BehaviourError, BehaviourKey, Clock, Entity, EntityKey, InputBinding, InputState,
    KeyCode, Stage, Transform, Vec3, World,
};

const EPSILON: f32 = 0.0001;
const START: Vec3 = Vec3::new(62.0, -126.0, 0.0);
const TARGET: Vec3 = Vec3::new(729.0, 465.0, 0.0);

fn position(stage: &Stage, key: EntityKey) -> Vec3 {
    stage.world().get(key).expect("entity should exist").transform.position
}

fn camera_enabled(stage: &Stage, key: EntityKey) -> bool {
    stage.world().get(key).and_then(|e| e.camera).expect("camera").enabled
}

struct Vehicle {
    stage: Stage,
    car: EntityKey,
    main: EntityKey,
    hood: EntityKey,
    controller: BehaviourKey,
}

fn vehicle(turn_speed: f32, main_on: bool, hood_on: bool) -> Vehicle {
    let mut stage = Stage::new(World::new(), Clock::new(8, 0, 60.0), InputState::default());
    let car = stage.world_mut().add_entity(Entity::default().with_name("Car"));
    let main = stage.world_mut().add_entity(Entity::default().with_name("Main").with_camera(main_on));
    let hood = stage.world_mut().add_entity(Entity::default().with_name("Hood").with_camera(hood_on));

    let binding = InputBinding::resolve("1", &AxisMap::default()).unwrap();
    let controller = DualAxisController::new(binding, KeyCode::KeyC, CameraPair { main, hood })
        .with_turn_speed(turn_speed);
    let controller = stage.attach(car, controller);

    Vehicle { stage, car, main, hood, controller }
}

fn mover_stage(hour: u32, minute: u32, settings: MoverSettings) -> (Stage, EntityKey, BehaviourKey) {
    // Each 0.5s frame advances the clock exactly one minute
    let mut stage = Stage::new(World::new(), Clock::new(hour, minute, 0.5), InputState::default());
    let square = stage
        .world_mut()
        .add_entity(Entity::new(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))).with_name("Square"));
    let mover = stage.attach(square, WindowedMover::new(settings));
    (stage, square, mover)
}

fn mover(stage: &Stage, key: BehaviourKey) -> &WindowedMover {
    stage.get::<WindowedMover>(key).expect("mover attached")
}

// ==================== Camera Follow ====================

/// Follower lands exactly on target + offset
#[test]
fn test_follower_tracks_target_plus_offset() {
    let mut stage = Stage::default();
    let target = stage.world_mut().add_entity(Entity::default());
    let camera = stage.world_mut().add_entity(Entity::default().with_camera(true));
    stage.attach(camera, CameraFollower::new(target));

    for p in [Vec3::ZERO, Vec3::new(3.5, -1.0, 12.25), Vec3::new(-100.0, 0.5, 7.0)] {
        stage.world_mut().get_mut(target).unwrap().transform.position = p;
        stage.frame(0.016);
        assert_eq!(position(&stage, camera), p + DEFAULT_FOLLOW_OFFSET);
    }
}

/// Follower sees the target's position from the same frame (late phase)
#[test]
fn test_follower_has_no_frame_lag() {
    let mut v = vehicle(0.0, true, false);
    v.stage.attach(v.main, CameraFollower::new(v.car));

    v.stage.input_mut().press(KeyCode::KeyW);
    v.stage.frame(0.5);

    let car = position(&v.stage, v.car);
    assert!(car.abs_diff_eq(Vec3::new(0.0, 0.0, 2.5), EPSILON), "car at {:?}", car);
    assert_eq!(position(&v.stage, v.main), car + DEFAULT_FOLLOW_OFFSET);
}

/// A removed target is reported, not a crash
#[test]
fn test_follower_missing_target_reported() {
    let mut stage = Stage::default();
    let target = stage.world_mut().add_entity(Entity::default());
    let camera = stage.world_mut().add_entity(Entity::default());
    stage.attach(camera, CameraFollower::new(target));
    stage.world_mut().remove_entity(target);

    let report = stage.frame(0.016);
    assert_eq!(
        report.errors,
        vec![BehaviourError::MissingEntity { role: "follow target", key: target }]
    );
}

// ==================== Vehicle Controller ====================

/// Translation is speed * forward * dt, rotation is turn_speed * horizontal * dt
#[test]
fn test_controller_moves_and_turns() {
    let mut v = vehicle(90.0, true, false);
    v.stage.input_mut().set_axis("Vertical1", 0.5);
    v.stage.input_mut().set_axis("Horizontal1", -1.0);

    v.stage.frame(0.2);

    let transform = v.stage.world().get(v.car).unwrap().transform;
    // 5.0 * 0.5 * 0.2 along the pre-turn forward (+Z)
    assert!(transform.position.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), EPSILON));
    assert!((transform.yaw_degrees() - (-18.0)).abs() < 0.001, "yaw {}", transform.yaw_degrees());
}

/// Default turn speed is zero: horizontal input never rotates
#[test]
fn test_controller_default_turn_speed_is_noop() {
    let mut v = vehicle(0.0, true, false);
    v.stage.input_mut().set_axis("Horizontal1", 1.0);

    for _ in 0..10 {
        v.stage.frame(0.1);
    }

    let transform = v.stage.world().get(v.car).unwrap().transform;
    assert!(transform.yaw_degrees().abs() < EPSILON);
    assert_eq!(transform.position, Vec3::ZERO);
}

/// The other player's keys do not drive this controller
#[test]
fn test_controller_ignores_other_binding() {
    let mut v = vehicle(0.0, true, false);
    v.stage.input_mut().press(KeyCode::ArrowUp);
    v.stage.frame(1.0);
    assert_eq!(position(&v.stage, v.car), Vec3::ZERO);
}

/// Movement follows the vehicle's heading
#[test]
fn test_controller_moves_along_heading() {
    let mut v = vehicle(0.0, true, false);
    v.stage.world_mut().get_mut(v.car).unwrap().transform = Transform::from_position_yaw(Vec3::ZERO, 90.0);
    v.stage.input_mut().set_axis("Vertical1", 1.0);

    v.stage.frame(1.0);

    assert!(position(&v.stage, v.car).abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), EPSILON));
}

// ==================== Camera Switching ====================

/// Odd number of presses swaps the views, even restores them
#[test]
fn test_camera_toggle_is_exclusive() {
    let mut v = vehicle(0.0, true, false);

    for presses in 1..=6 {
        v.stage.input_mut().press(KeyCode::KeyC);
        v.stage.frame(0.016);
        v.stage.input_mut().release(KeyCode::KeyC);
        v.stage.frame(0.016);

        let main = camera_enabled(&v.stage, v.main);
        let hood = camera_enabled(&v.stage, v.hood);
        assert!(main != hood, "exactly one camera after {} presses", presses);
        assert_eq!(main, presses % 2 == 0, "main camera after {} presses", presses);
    }
}

/// Holding the key toggles once
#[test]
fn test_camera_toggle_on_rising_edge_only() {
    let mut v = vehicle(0.0, true, false);
    v.stage.input_mut().press(KeyCode::KeyC);
    for _ in 0..5 {
        v.stage.frame(0.016);
        // key-repeat events while held
        v.stage.input_mut().press(KeyCode::KeyC);
    }
    assert!(!camera_enabled(&v.stage, v.main));
    assert!(camera_enabled(&v.stage, v.hood));
}

/// A pair that starts in the same state is normalized on enable
#[test]
fn test_camera_pair_normalized_on_enable() {
    let v = vehicle(0.0, true, true);
    assert!(camera_enabled(&v.stage, v.main));
    assert!(!camera_enabled(&v.stage, v.hood));
    assert!(v.stage.is_enabled(v.controller));
}

// ==================== Windowed Mover ====================

/// Every minute other than 10:10 leaves the mover idle
#[test]
fn test_mover_ignores_other_minutes() {
    for (hour, minute) in [(10, 9), (10, 11), (9, 10), (22, 10), (11, 10), (0, 0)] {
        // Start one minute earlier so the first frame lands on (hour, minute)
        let (start_hour, start_minute) = if minute == 0 {
            ((hour + 23) % 24, 59)
        } else {
            (hour, minute - 1)
        };
        let (mut stage, square, key) = mover_stage(start_hour, start_minute, MoverSettings::default());

        stage.frame(0.5);

        assert!(stage.clock().reads(hour, minute));
        assert!(!mover(&stage, key).is_moving(), "triggered at {}:{}", hour, minute);
        assert_eq!(position(&stage, square), Vec3::new(1.0, 2.0, 3.0));
    }
}

/// At 10:10 the mover snaps to start and begins moving
#[test]
fn test_mover_triggers_at_exact_minute() {
    let (mut stage, square, key) = mover_stage(10, 9, MoverSettings::default());

    stage.frame(0.5);

    assert!(stage.clock().reads(10, 10));
    assert!(mover(&stage, key).is_moving());
    assert_eq!(position(&stage, square), START);
}

/// Position follows lerp(start, target, elapsed / 3) and stops one frame short
#[test]
fn test_mover_path_and_completion() {
    let (mut stage, square, key) = mover_stage(10, 9, MoverSettings::default());

    // Trigger frame writes elapsed 0; the next three write 0.5, 1.0, 1.5
    for _ in 0..4 {
        stage.frame(0.5);
    }
    assert_eq!(position(&stage, square), Vec3::new(395.5, 169.5, 0.0));

    // Writes at 2.0 and 2.5; the frame at 3.0 ends the job without writing
    stage.frame(0.5);
    stage.frame(0.5);
    assert!(mover(&stage, key).is_moving());
    stage.frame(0.5);
    assert!(!mover(&stage, key).is_moving());

    let last = position(&stage, square);
    assert!(last.abs_diff_eq(START.lerp(TARGET, 2.5 / 3.0), 0.001), "got {:?}", last);
    assert!(last.x < TARGET.x, "final frame should not reach the target exactly");

    // Idle again: further frames leave it alone
    stage.frame(0.5);
    assert_eq!(position(&stage, square), last);
}

/// A long frame that skips past 10:10 still triggers
#[test]
fn test_mover_triggers_when_frame_spans_minutes() {
    let (mut stage, square, key) = mover_stage(10, 8, MoverSettings::default());

    let report = stage.frame(1.5);

    assert_eq!(report.minutes_elapsed, 3);
    assert!(stage.clock().reads(10, 11));
    assert!(mover(&stage, key).is_moving());
    assert_eq!(position(&stage, square), START);
}

/// Disabled movers are deaf to the clock
#[test]
fn test_disabled_mover_does_not_move() {
    let (mut stage, square, key) = mover_stage(10, 9, MoverSettings::default());
    assert!(mover(&stage, key).is_subscribed());

    stage.set_enabled(key, false);
    assert!(!mover(&stage, key).is_subscribed());
    assert!(stage.clock().minute_changed().is_empty());

    stage.frame(0.5);
    assert!(stage.clock().reads(10, 10));
    assert!(!mover(&stage, key).is_moving());
    assert_eq!(position(&stage, square), Vec3::new(1.0, 2.0, 3.0));

    // Re-enabling subscribes again
    stage.set_enabled(key, true);
    assert_eq!(stage.clock().minute_changed().len(), 1);
}

/// Custom activation time
#[test]
fn test_mover_custom_window() {
    let settings = MoverSettings { hour: 18, minute: 30, ..Default::default() };
    let (mut stage, _, key) = mover_stage(18, 29, settings);
    stage.frame(0.5);
    assert!(mover(&stage, key).is_moving());
}

// ==================== Re-trigger Policies ====================

/// Run the move for two frames, then rewind the clock to 10:09 and hit 10:10 again
fn retrigger(policy: RetriggerPolicy) -> (Stage, EntityKey, BehaviourKey) {
    retrigger_with(MoverSettings { retrigger: policy, ..Default::default() })
}

fn retrigger_with(settings: MoverSettings) -> (Stage, EntityKey, BehaviourKey) {
    let (mut stage, square, key) = mover_stage(10, 9, settings);
    stage.frame(0.5);
    stage.frame(0.5);
    stage.set_clock(Clock::new(10, 9, 0.5));
    stage.frame(0.5);
    (stage, square, key)
}

#[test]
fn test_retrigger_restart() {
    let (stage, square, key) = retrigger(RetriggerPolicy::Restart);
    assert_eq!(mover(&stage, key).active_jobs(), 1);
    assert_eq!(position(&stage, square), START);
}

#[test]
fn test_retrigger_ignore() {
    let (stage, square, key) = retrigger(RetriggerPolicy::Ignore);
    assert_eq!(mover(&stage, key).active_jobs(), 1);
    // Third frame of the first move: elapsed 1.0
    assert!(position(&stage, square).abs_diff_eq(START.lerp(TARGET, 1.0 / 3.0), 0.001));
}

/// An unconfigured mover starts a second move alongside the first
#[test]
fn test_retrigger_default_overlaps() {
    assert_eq!(MoverSettings::default().retrigger, RetriggerPolicy::Overlap);

    let (mut stage, square, key) = retrigger_with(MoverSettings::default());
    assert_eq!(mover(&stage, key).active_jobs(), 2);
    assert_eq!(position(&stage, square), START);

    // Both keep stepping; the newest still writes last
    stage.frame(0.5);
    assert_eq!(mover(&stage, key).active_jobs(), 2);
    assert!(position(&stage, square).abs_diff_eq(START.lerp(TARGET, 0.5 / 3.0), 0.001));
}

#[test]
fn test_retrigger_overlap() {
    let (stage, square, key) = retrigger(RetriggerPolicy::Overlap);
    assert_eq!(mover(&stage, key).active_jobs(), 2);
    // Newest job writes last
    assert_eq!(position(&stage, square), START);
}
