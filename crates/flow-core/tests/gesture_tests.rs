// Host-side tests for hand metrics and the gesture interpreter.
// Hands come from synthetic poses, so every check runs through real landmark
// geometry rather than hand-set control values.

use flow_core::constants::*;
use flow_core::{
    sample_with, ControlSignal, DetectorFrame, GestureInterpreter, GestureState, HandPose,
    Handedness, InterpreterConfig, Shape, SpinDirection, TargetBuffer, ThumbTest,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const COUNT: usize = 256;

struct Rig {
    interpreter: GestureInterpreter,
    control: ControlSignal,
    target: TargetBuffer,
    rng: StdRng,
}

impl Rig {
    fn new(base: Shape) -> Self {
        Self::with_config(base, InterpreterConfig::default())
    }

    fn with_config(base: Shape, config: InterpreterConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(42);
        let target = TargetBuffer::new(sample_with(&base, COUNT, &mut rng));
        Self {
            interpreter: GestureInterpreter::new(config),
            control: ControlSignal::new(base),
            target,
            rng,
        }
    }

    fn feed(&mut self, frame: &DetectorFrame) {
        self.interpreter
            .update(&mut self.control, frame, &mut self.target, &mut self.rng);
    }

    fn feed_poses(&mut self, poses: &[HandPose]) {
        let frame = DetectorFrame::with_hands(poses.iter().map(HandPose::to_observation));
        self.feed(&frame);
    }
}

fn center() -> Vec2 {
    Vec2::new(0.5, 0.6)
}

#[test]
fn synthetic_poses_read_back_as_intended() {
    for hand in [Handedness::Left, Handedness::Right] {
        let open = HandPose::open(center(), hand).to_observation();
        assert!(open.fist_tension() < 0.5, "open hand tension {}", open.fist_tension());
        assert!(!open.is_pinching());

        let fist = HandPose::fist(center(), hand).to_observation();
        assert!(fist.fist_tension() > 0.99, "fist tension {}", fist.fist_tension());
        assert!(!fist.is_pinching(), "a fist must not read as a pinch");

        let pinch = HandPose::pinch(center(), hand).to_observation();
        assert!(pinch.is_pinching());
        assert!(pinch.fist_tension() < 0.5);
    }
}

#[test]
fn finger_count_matches_pose_for_both_thumb_tests() {
    let tests = [
        ThumbTest::default(),
        ThumbTest::TipIpOffset {
            margin: THUMB_IP_OFFSET_MARGIN,
        },
    ];
    for thumb in tests {
        for hand in [Handedness::Left, Handedness::Right] {
            for n in 0..=5u8 {
                let obs = HandPose::counting(n, center(), hand).to_observation();
                assert_eq!(
                    obs.extended_fingers(thumb),
                    n,
                    "{hand:?} hand showing {n} with {thumb:?}"
                );
            }
        }
    }
}

#[test]
fn identical_single_hand_converges_to_direct_formula() {
    let mut rig = Rig::new(Shape::Heart);
    let pose = HandPose::open(center(), Handedness::Right);
    let expected = pose.to_observation().fist_tension();
    let mut prev_scale = rig.control.scale;
    for _ in 0..200 {
        rig.feed_poses(&[pose]);
        assert_eq!(rig.control.tension, expected);
        let scale = rig.control.scale;
        assert!((scale - 1.0).abs() <= (prev_scale - 1.0).abs() + 1e-7, "scale drifted");
        prev_scale = scale;
    }
    assert!((rig.control.scale - 1.0).abs() < 1e-6);
    assert_eq!(rig.control.gesture, GestureState::Idle);
}

#[test]
fn identical_two_hands_hold_scale_at_spread_formula() {
    let mut rig = Rig::new(Shape::Flower);
    let left = HandPose::open(Vec2::new(0.3, 0.6), Handedness::Left);
    let right = HandPose::open(Vec2::new(0.7, 0.6), Handedness::Right);
    for _ in 0..50 {
        rig.feed_poses(&[left, right]);
        assert!((rig.control.scale - (0.5 + 0.4 * 3.0)).abs() < 1e-5);
    }
    assert_eq!(rig.control.gesture, GestureState::TwoHandScaling);
}

#[test]
fn no_hands_decays_tension_and_scale_geometrically() {
    let mut rig = Rig::new(Shape::Saturn);
    rig.control.tension = 1.0;
    rig.control.scale = 2.0;
    let empty = DetectorFrame::empty();
    for k in 1..=40 {
        rig.feed(&empty);
        let expected_tension = 0.95f32.powi(k);
        let expected_scale = 1.0 + 0.95f32.powi(k);
        assert!((rig.control.tension - expected_tension).abs() < 1e-4, "frame {k}");
        assert!((rig.control.scale - expected_scale).abs() < 1e-4, "frame {k}");
    }
    assert_eq!(rig.control.spin_speed, SPIN_IDLE);
    assert_eq!(rig.control.gesture, GestureState::Idle);
}

#[test]
fn invalid_frame_counts_as_no_hands() {
    let mut rig = Rig::new(Shape::Heart);
    rig.control.tension = 1.0;
    let mut frame =
        DetectorFrame::with_hands([HandPose::fist(center(), Handedness::Right).to_observation()]);
    frame.valid = false;
    rig.feed(&frame);
    assert!((rig.control.tension - 0.95).abs() < 1e-6);
}

#[test]
fn pinch_side_sets_spin_direction() {
    let mut rig = Rig::new(Shape::Heart);

    rig.feed_poses(&[HandPose::pinch(center(), Handedness::Left)]);
    assert_eq!(rig.control.spin_speed, SPIN_FAST);
    assert_eq!(rig.control.spin_direction, SpinDirection::CounterClockwise);
    assert_eq!(
        rig.control.gesture,
        GestureState::Pinching(SpinDirection::CounterClockwise)
    );

    rig.feed_poses(&[HandPose::pinch(center(), Handedness::Right)]);
    assert_eq!(rig.control.spin_direction, SpinDirection::Clockwise);
    assert!(rig.control.spin_step() > 0.0);

    // Both pinching: fast spin, direction kept.
    rig.feed_poses(&[
        HandPose::pinch(Vec2::new(0.3, 0.6), Handedness::Left),
        HandPose::pinch(Vec2::new(0.7, 0.6), Handedness::Right),
    ]);
    assert_eq!(rig.control.spin_speed, SPIN_FAST);
    assert_eq!(rig.control.spin_direction, SpinDirection::Clockwise);

    // Releasing the pinch drops back to the idle spin.
    rig.feed_poses(&[HandPose::open(center(), Handedness::Right)]);
    assert_eq!(rig.control.spin_speed, SPIN_IDLE);
    assert_eq!(rig.control.spin_direction, SpinDirection::Clockwise);
}

#[test]
fn unknown_handed_pinch_spins_without_changing_direction() {
    let mut rig = Rig::new(Shape::Heart);
    rig.control.spin_direction = SpinDirection::CounterClockwise;
    rig.feed_poses(&[HandPose::pinch(center(), Handedness::Unknown)]);
    assert_eq!(rig.control.spin_speed, SPIN_FAST);
    assert_eq!(rig.control.spin_direction, SpinDirection::CounterClockwise);
}

#[test]
fn fist_implodes_and_keeps_idle_spin() {
    let mut rig = Rig::new(Shape::Heart);
    rig.feed_poses(&[HandPose::fist(center(), Handedness::Right)]);
    assert!(rig.control.tension > 0.99);
    assert_eq!(rig.control.spin_speed, SPIN_IDLE);
    assert_eq!(rig.control.gesture, GestureState::Fisted);
    assert!(rig.control.shrink_factor() < 0.25);
}

#[test]
fn pinch_outranks_fist() {
    let mut rig = Rig::new(Shape::Heart);
    rig.feed_poses(&[
        HandPose::fist(Vec2::new(0.3, 0.6), Handedness::Left),
        HandPose::fist(Vec2::new(0.7, 0.6), Handedness::Left),
        HandPose::pinch(Vec2::new(0.5, 0.6), Handedness::Right),
    ]);
    assert!(rig.control.tension > 0.5);
    assert_eq!(rig.control.spin_speed, SPIN_FAST);
    assert!(matches!(rig.control.gesture, GestureState::Pinching(_)));
}

#[test]
fn fireworks_mode_never_spins_on_pinch() {
    let mut rig = Rig::new(Shape::Fireworks);
    assert_eq!(rig.control.spin_speed, 0.0);
    rig.feed_poses(&[HandPose::pinch(center(), Handedness::Right)]);
    assert_eq!(rig.control.spin_speed, 0.0);
    rig.feed(&DetectorFrame::empty());
    assert_eq!(rig.control.spin_speed, 0.0);
}

#[test]
fn finger_count_reveals_text_and_zero_returns_to_burst() {
    let mut rig = Rig::new(Shape::Fireworks);
    let before = rig.target.generation();

    rig.feed_poses(&[HandPose::counting(3, center(), Handedness::Right)]);
    assert_eq!(rig.control.reveal_slot, Some(3));
    assert_eq!(
        rig.control.active_shape,
        Shape::Text("THREESOME?".to_string())
    );
    assert_eq!(rig.control.gesture, GestureState::RevealShowing(3));
    assert!(rig.control.is_showing_text());
    assert_eq!(rig.control.scale, 1.0);
    assert_eq!(rig.control.spin_speed, 0.0);
    assert_eq!(rig.control.shrink_factor(), 1.0);
    assert_eq!(rig.target.generation(), before + 1);
    assert_eq!(rig.target.len(), COUNT);

    // Holding the same count does not re-sample.
    rig.feed_poses(&[HandPose::counting(3, center(), Handedness::Right)]);
    assert_eq!(rig.target.generation(), before + 1);

    rig.feed_poses(&[HandPose::counting(0, center(), Handedness::Right)]);
    assert_eq!(rig.control.active_shape, Shape::Fireworks);
    assert_eq!(rig.control.reveal_slot, None);
    assert_eq!(rig.target.generation(), before + 2);
    assert_eq!(rig.target.len(), COUNT);
    // Burst cloud again, not the flat text slab.
    assert!(rig.target.points().iter().any(|p| p.z.abs() > 0.5));
}

#[test]
fn every_finger_count_maps_to_its_slot() {
    let config = InterpreterConfig::default();
    let mut rig = Rig::new(Shape::Fireworks);
    for n in 1..=5u8 {
        rig.feed_poses(&[HandPose::counting(n, center(), Handedness::Left)]);
        assert_eq!(rig.control.reveal_slot, Some(n));
        assert_eq!(
            rig.control.active_shape,
            Shape::Text(config.reveal_texts[n as usize - 1].clone())
        );
    }
}

#[test]
fn losing_hands_drops_reveal_text() {
    let mut rig = Rig::new(Shape::Fireworks);
    rig.feed_poses(&[HandPose::counting(2, center(), Handedness::Right)]);
    assert!(rig.control.is_showing_text());
    rig.feed(&DetectorFrame::empty());
    assert_eq!(rig.control.active_shape, Shape::Fireworks);
    assert!(!rig.control.is_showing_text());
}

#[test]
fn reveal_only_applies_to_fireworks_base() {
    let mut rig = Rig::new(Shape::Heart);
    let before = rig.target.generation();
    rig.feed_poses(&[HandPose::counting(3, center(), Handedness::Right)]);
    assert_eq!(rig.control.active_shape, Shape::Heart);
    assert_eq!(rig.control.reveal_slot, None);
    assert_eq!(rig.target.generation(), before);
}

#[test]
fn reveal_texts_are_configurable() {
    let config = InterpreterConfig {
        reveal_texts: ["A", "B", "C", "D", "E"].map(String::from),
        thumb_test: ThumbTest::TipIpOffset {
            margin: THUMB_IP_OFFSET_MARGIN,
        },
    };
    let mut rig = Rig::with_config(Shape::Fireworks, config);
    rig.feed_poses(&[HandPose::counting(5, center(), Handedness::Right)]);
    assert_eq!(rig.control.active_shape, Shape::Text("E".to_string()));
    assert_eq!(rig.interpreter.reveal_for(0), None);
    assert_eq!(rig.interpreter.reveal_for(6), None);
}

#[test]
fn showing_text_pins_scale_even_with_two_hands() {
    let mut rig = Rig::new(Shape::Fireworks);
    rig.feed_poses(&[
        HandPose::open(Vec2::new(0.1, 0.6), Handedness::Left),
        HandPose::counting(4, Vec2::new(0.9, 0.6), Handedness::Right),
    ]);
    assert_eq!(rig.control.reveal_slot, Some(4));
    assert_eq!(rig.control.scale, 1.0);
}

#[test]
fn base_shape_change_clears_reveal() {
    let mut control = ControlSignal::new(Shape::Fireworks);
    control.reveal_slot = Some(2);
    control.active_shape = Shape::Text("PEACE?".to_string());
    control.set_base_shape(Shape::Flower);
    assert_eq!(control.active_shape, Shape::Flower);
    assert!(!control.is_showing_text());
    assert!(!control.flickers());
}
