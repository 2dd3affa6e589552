use phys_oscillator::{
    SimulationConfig, SpringBlockOscillator, OscillatorConfig, SpringStyle, Vector2,
    error::PhysicsError,
    oscillator::{synthesize, JointChange, OscillatorState},
    scene::Scene,
};
use approx::assert_relative_eq;
use rand::Rng;

const FRAME: f32 = 1.0 / 60.0;

/// Anchor at the origin, rest length 2.5, 0.8 x 0.8 block
fn origin_oscillator(scene: &mut Scene) -> SpringBlockOscillator {
    let config = OscillatorConfig::default().with_anchor_point(Vector2::zero());
    SpringBlockOscillator::new(scene, config).unwrap()
}

fn attached_oscillator() -> (Scene, SpringBlockOscillator) {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let mut osc = origin_oscillator(&mut scene);
    osc.attach(&mut scene).unwrap();
    (scene, osc)
}

fn assert_curve_tracks_ends(scene: &Scene, osc: &SpringBlockOscillator) {
    let points = scene.shape(osc.spring_shape()).unwrap().points();
    let anchor = osc.anchor_point(scene).unwrap();
    let block = osc.block_anchor_point(scene).unwrap();

    let first = points[0];
    let last = points[points.len() - 1];
    assert_relative_eq!(first.x, anchor.x, epsilon = 1e-5);
    assert_relative_eq!(first.y, anchor.y, epsilon = 1e-5);
    assert_relative_eq!(last.x, block.x, epsilon = 1e-5);
    assert_relative_eq!(last.y, block.y, epsilon = 1e-5);
}

#[test]
fn test_point_count_scales_with_coils() {
    for coils in 0..40 {
        let style = SpringStyle::new(coils, 0.1);
        let curve = synthesize(Vector2::zero(), Vector2::new(3.0, 1.0), &style);
        assert_eq!(curve.count(), (4 * coils as usize).max(8));
    }
}

#[test]
fn test_curve_endpoints_are_exact() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let anchor = Vector2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        let far = anchor + Vector2::new(rng.gen_range(0.1..5.0), rng.gen_range(-5.0..5.0));
        let style = SpringStyle::new(rng.gen_range(0..30), rng.gen_range(0.0..0.5));

        let points: Vec<Vector2> = synthesize(anchor, far, &style).collect();
        assert_eq!(points[0], anchor);
        assert_eq!(points[points.len() - 1], far);
        assert!(points.iter().all(|p| p.is_finite()));
    }
}

#[test]
fn test_zero_length_spring_is_drawable() {
    let point = Vector2::new(1.0, 1.0);
    let points: Vec<Vector2> = synthesize(point, point, &SpringStyle::default()).collect();

    assert_eq!(points.len(), 48);
    assert!(points.iter().all(|p| p.is_finite()));
}

#[test]
fn test_start_before_attach_fails_without_side_effects() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let mut osc = origin_oscillator(&mut scene);
    let center_before = scene.shape(osc.block_shape()).unwrap().get_center();

    let result = osc.start(&mut scene, 1.0, 2.0);

    assert!(matches!(result, Err(PhysicsError::NotAttached(_))));
    assert_eq!(osc.state(&scene), OscillatorState::Unattached);
    assert_eq!(scene.world().body_count(), 0);
    assert_eq!(scene.world().constraint_count(), 0);
    assert_eq!(scene.shape(osc.block_shape()).unwrap().get_center(), center_before);

    // Stop and reset are harmless before attach
    assert_eq!(osc.stop(&mut scene).unwrap(), JointChange::NotActive);
    osc.reset(&mut scene).unwrap();
    assert_eq!(scene.world().body_count(), 0);
}

#[test]
fn test_attach_registers_bodies_and_spring() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let mut osc = origin_oscillator(&mut scene);

    let change = osc.attach(&mut scene).unwrap();
    assert!(matches!(change, JointChange::Created(_)));
    assert_eq!(osc.state(&scene), OscillatorState::Oscillating);
    assert_eq!(scene.world().body_count(), 2);
    assert_eq!(scene.world().constraint_count(), 1);

    let body = scene.world().get_body(osc.block_body(&scene).unwrap()).unwrap();
    assert_relative_eq!(body.get_mass(), 1.5, epsilon = 1e-5);

    // A second attach changes nothing
    assert!(matches!(osc.attach(&mut scene).unwrap(), JointChange::AlreadyActive(_)));
    assert_eq!(scene.world().body_count(), 2);
    assert_eq!(scene.world().constraint_count(), 1);
}

#[test]
fn test_attach_after_stop_keeps_spring_removed() {
    let (mut scene, mut osc) = attached_oscillator();
    let body = osc.block_body(&scene).unwrap();

    osc.start(&mut scene, 1.0, 0.0).unwrap();
    assert!(osc.stop(&mut scene).unwrap().is_change());

    let change = osc.attach(&mut scene).unwrap();

    assert_eq!(change, JointChange::NotActive);
    assert!(!change.is_change());
    assert_eq!(osc.state(&scene), OscillatorState::Attached);
    assert_eq!(scene.world().constraint_count(), 0);
    assert!(scene.world().get_body(body).unwrap().is_sleeping());

    // Only start brings the spring back
    assert!(osc.start(&mut scene, 0.0, 0.0).unwrap().is_change());
    assert_eq!(scene.world().constraint_count(), 1);
}

#[test]
fn test_attach_does_not_move_spring_ends() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let mut osc = SpringBlockOscillator::new(&mut scene, OscillatorConfig::default()).unwrap();
    let anchor_before = osc.anchor_point(&scene).unwrap();
    let block_before = osc.block_anchor_point(&scene).unwrap();

    osc.attach(&mut scene).unwrap();

    let anchor_after = osc.anchor_point(&scene).unwrap();
    let block_after = osc.block_anchor_point(&scene).unwrap();
    assert_relative_eq!((anchor_after - anchor_before).length(), 0.0, epsilon = 1e-6);
    assert_relative_eq!((block_after - block_before).length(), 0.0, epsilon = 1e-6);

    scene.advance(FRAME).unwrap();
    assert_curve_tracks_ends(&scene, &osc);
}

#[test]
fn test_start_places_block_for_any_condition() {
    let mut rng = rand::thread_rng();
    let (mut scene, mut osc) = attached_oscillator();
    let rest = osc.rest_center(&scene).unwrap();
    let body = osc.block_body(&scene).unwrap();

    for _ in 0..50 {
        let displacement = rng.gen_range(-2.0..2.0);
        let velocity = rng.gen_range(-5.0..5.0);
        osc.start(&mut scene, displacement, velocity).unwrap();

        let rb = scene.world().get_body(body).unwrap();
        assert_relative_eq!(rb.get_position().x, rest.x + displacement, epsilon = 1e-5);
        assert_relative_eq!(rb.get_position().y, rest.y, epsilon = 1e-5);
        assert_relative_eq!(rb.get_linear_velocity().x, velocity, epsilon = 1e-5);
        assert_eq!(rb.get_linear_velocity().y, 0.0);
        assert_eq!(rb.get_angular_velocity(), 0.0);
        assert_eq!(rb.get_angle(), 0.0);
        assert!(!rb.is_sleeping());
    }
    assert_eq!(scene.world().constraint_count(), 1);
}

#[test]
fn test_start_and_stop_are_idempotent() {
    let (mut scene, mut osc) = attached_oscillator();

    osc.start(&mut scene, 0.5, 0.0).unwrap();
    osc.start(&mut scene, 0.5, 0.0).unwrap();
    assert_eq!(scene.world().constraint_count(), 1);

    assert!(matches!(osc.stop(&mut scene).unwrap(), JointChange::Removed(_)));
    assert_eq!(osc.stop(&mut scene).unwrap(), JointChange::NotActive);
    assert_eq!(scene.world().constraint_count(), 0);
    assert_eq!(osc.state(&scene), OscillatorState::Attached);

    assert!(matches!(osc.start(&mut scene, 0.0, 1.0).unwrap(), JointChange::Created(_)));
    assert_eq!(scene.world().constraint_count(), 1);
    assert!(osc.is_oscillating(&scene));
}

#[test]
fn test_reset_keeps_constraint_state() {
    let (mut scene, mut osc) = attached_oscillator();
    let rest = osc.rest_center(&scene).unwrap();
    let body = osc.block_body(&scene).unwrap();

    osc.start(&mut scene, 1.5, -0.5).unwrap();
    osc.reset(&mut scene).unwrap();

    let rb = scene.world().get_body(body).unwrap();
    assert_relative_eq!(rb.get_position().x, rest.x, epsilon = 1e-5);
    assert!(rb.get_linear_velocity().is_zero());
    assert_eq!(osc.state(&scene), OscillatorState::Oscillating);
    assert_eq!(scene.world().constraint_count(), 1);

    osc.start(&mut scene, 1.5, 0.0).unwrap();
    osc.stop(&mut scene).unwrap();
    osc.reset(&mut scene).unwrap();

    let rb = scene.world().get_body(body).unwrap();
    assert_relative_eq!(rb.get_position().x, rest.x, epsilon = 1e-5);
    assert!(rb.is_sleeping());
    assert_eq!(osc.state(&scene), OscillatorState::Attached);
    assert_eq!(scene.world().constraint_count(), 0);
}

#[test]
fn test_stop_start_scenario() {
    let (mut scene, mut osc) = attached_oscillator();
    let body = osc.block_body(&scene).unwrap();

    let rest = osc.rest_center(&scene).unwrap();
    assert_relative_eq!(rest.x, 2.9, epsilon = 1e-5);

    osc.start(&mut scene, 1.0, 0.0).unwrap();
    assert_relative_eq!(scene.world().get_body(body).unwrap().get_position().x, 3.9, epsilon = 1e-5);

    osc.stop(&mut scene).unwrap();
    assert_eq!(scene.world().constraint_count(), 0);
    assert!(scene.world().get_body(body).unwrap().is_sleeping());

    osc.start(&mut scene, 0.0, 2.0).unwrap();
    let rb = scene.world().get_body(body).unwrap();
    assert_relative_eq!(rb.get_position().x, 2.9, epsilon = 1e-5);
    assert_relative_eq!(rb.get_linear_velocity().x, 2.0, epsilon = 1e-5);
    assert!(!rb.is_sleeping());
    assert_eq!(scene.world().constraint_count(), 1);
    assert!(osc.is_oscillating(&scene));
}

#[test]
fn test_spring_pulls_block_back_and_curve_follows() {
    let (mut scene, mut osc) = attached_oscillator();
    let body = osc.block_body(&scene).unwrap();
    osc.start(&mut scene, 1.0, 0.0).unwrap();

    for _ in 0..15 {
        scene.advance(FRAME).unwrap();
        assert_curve_tracks_ends(&scene, &osc);
    }

    let rb = scene.world().get_body(body).unwrap();
    assert!(rb.get_position().x < 3.9);
    assert!(rb.get_linear_velocity().x < 0.0);

    // The drawn block follows its body
    let center = scene.shape(osc.block_shape()).unwrap().get_center();
    assert_relative_eq!(center.x, rb.get_position().x, epsilon = 1e-5);
    assert_eq!(scene.frame_count(), 15);
}

#[test]
fn test_stopped_block_coasts_without_spring() {
    let (mut scene, mut osc) = attached_oscillator();
    let body = osc.block_body(&scene).unwrap();

    osc.start(&mut scene, 0.0, 0.0).unwrap();
    osc.stop(&mut scene).unwrap();
    // Without a spring, a woken block keeps its velocity
    scene.world_mut().wake_body(body).unwrap();
    scene.world_mut().get_body_mut(body).unwrap().set_linear_velocity(Vector2::new(1.0, 0.0));

    for _ in 0..30 {
        scene.advance(FRAME).unwrap();
    }

    let rb = scene.world().get_body(body).unwrap();
    assert_relative_eq!(rb.get_linear_velocity().x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(rb.get_position().x, 3.4, epsilon = 1e-4);
    assert_curve_tracks_ends(&scene, &osc);
}

#[test]
fn test_unanimated_spring_redraws_on_demand() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let config = OscillatorConfig::default().with_animate_spring(false);
    let mut osc = SpringBlockOscillator::new(&mut scene, config).unwrap();
    osc.attach(&mut scene).unwrap();
    osc.start(&mut scene, 0.5, 0.0).unwrap();

    let before = scene.shape(osc.spring_shape()).unwrap().points();
    scene.advance(FRAME).unwrap();
    assert_eq!(scene.shape(osc.spring_shape()).unwrap().points(), before);

    osc.redraw_spring(&mut scene).unwrap();
    assert_curve_tracks_ends(&scene, &osc);
}

#[test]
fn test_zero_size_block_uses_unit_density() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let config = OscillatorConfig::default().with_block_size(0.0, 0.0);
    let mut osc = SpringBlockOscillator::new(&mut scene, config).unwrap();

    osc.attach(&mut scene).unwrap();

    let body = scene.world().get_body(osc.block_body(&scene).unwrap()).unwrap();
    assert_relative_eq!(body.get_mass(), 1.0);
}

#[test]
fn test_custom_spring_style() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let style = SpringStyle::new(3, 0.25).with_stroke_width(2.0);
    let osc = SpringBlockOscillator::new(&mut scene, OscillatorConfig::default().with_spring_style(style)).unwrap();

    let spring = scene.shape(osc.spring_shape()).unwrap();
    assert_eq!(spring.point_count(), 12);
    assert_eq!(spring.style().stroke_width, 2.0);
    let max_offset = spring.points().iter().map(|p| p.y.abs()).fold(0.0f32, f32::max);
    assert!(max_offset <= 0.25 + 1e-6);
    assert!(max_offset > 0.1);
}
