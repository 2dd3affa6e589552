use phys_oscillator::{
    PhysicsWorld, RigidBody, RigidBodyType, SimulationConfig, Vector2,
    bodies::BodyState,
    constraints::DampedSpring,
    core::{BodyEventType, ConstraintEventType, GravityType},
    math::Transform,
    scene::{Scene, Shape},
};
use approx::assert_relative_eq;

fn dynamic_at(x: f32, y: f32) -> RigidBody {
    RigidBody::new(Transform::from_position(Vector2::new(x, y)), RigidBodyType::Dynamic, 1.0, 1.0)
}

fn static_at(x: f32, y: f32) -> RigidBody {
    RigidBody::new(Transform::from_position(Vector2::new(x, y)), RigidBodyType::Static, 0.0, 0.0)
}

#[test]
fn test_gravity_simulation() {
    let mut world = PhysicsWorld::new();
    world.set_gravity(GravityType::Constant(Vector2::new(0.0, -9.81)));

    let ball = world.add_body(dynamic_at(0.0, 10.0));
    let floor = world.add_body(static_at(0.0, 0.0));

    let time_step = 1.0 / 60.0;
    for _ in 0..60 {
        world.step(time_step);
    }

    let body = world.get_body(ball).unwrap();
    assert_relative_eq!(body.get_linear_velocity().y, -9.81, epsilon = 1e-3);
    assert!(body.get_position().y < 5.2 && body.get_position().y > 4.8);

    // Static bodies are never integrated
    assert_eq!(world.get_body(floor).unwrap().get_position(), Vector2::zero());
}

#[test]
fn test_shape_registration() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let wall = scene.add_shape(Shape::line(Vector2::new(0.0, 1.0), Vector2::new(0.0, -1.0)));
    let mut block = Shape::rectangle(2.0, 0.5);
    block.move_to(Vector2::new(3.0, 0.0));
    let block = scene.add_shape(block);

    let wall_body = scene.make_static_body(wall).unwrap();
    let block_body = scene.make_rigid_body(block, 2.0).unwrap();

    // Registering the same shape twice hands back the existing body
    assert_eq!(scene.make_rigid_body(block, 5.0).unwrap(), block_body);
    assert_eq!(scene.world().body_count(), 2);

    let world = scene.world();
    assert_eq!(world.body_for_shape(wall), Some(wall_body));
    assert_eq!(world.body_for_shape(block), Some(block_body));

    let body = world.get_body(block_body).unwrap();
    assert_eq!(body.get_body_type(), RigidBodyType::Dynamic);
    assert_relative_eq!(body.get_mass(), 2.0);
    assert_eq!(body.get_position(), Vector2::new(3.0, 0.0));
    assert_eq!(world.get_body(wall_body).unwrap().get_body_type(), RigidBodyType::Static);
}

#[test]
fn test_zero_area_shape_gets_unit_area_mass() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let flat = scene.add_shape(Shape::rectangle(0.0, 0.0));

    let body = scene.make_rigid_body(flat, 3.0).unwrap();

    assert_relative_eq!(scene.world().get_body(body).unwrap().get_mass(), 3.0);
}

#[test]
fn test_remove_body_cleans_up() {
    let mut scene = Scene::new(SimulationConfig::weightless());
    let wall = scene.add_shape(Shape::line(Vector2::new(0.0, 1.0), Vector2::new(0.0, -1.0)));
    let block = scene.add_shape(Shape::rectangle(1.0, 1.0));
    let a = scene.make_static_body(wall).unwrap();
    let b = scene.make_rigid_body(block, 1.0).unwrap();

    let world = scene.world_mut();
    let spring = world.add_constraint(Box::new(DampedSpring::new(
        a, b, Vector2::zero(), Vector2::zero(), 1.0, 10.0, 0.5,
    )));
    assert!(world.has_constraint(spring));

    world.remove_body(b).unwrap();

    assert!(!world.has_constraint(spring));
    assert_eq!(world.constraint_count(), 0);
    assert_eq!(world.body_for_shape(block), None);
    assert!(world.get_body(b).is_err());
    assert!(world.remove_body(b).is_err());
}

#[test]
fn test_spring_oscillates_about_rest_length() {
    let mut world = PhysicsWorld::with_config(SimulationConfig::weightless());
    let anchor = world.add_body(static_at(0.0, 0.0));
    let block = world.add_body(dynamic_at(3.0, 0.0));
    world.add_constraint(Box::new(DampedSpring::new(
        anchor, block, Vector2::zero(), Vector2::zero(), 2.0, 10.0, 0.0,
    )));

    let mut min_x = f32::MAX;
    for _ in 0..120 {
        world.step(1.0 / 60.0);
        let x = world.get_body(block).unwrap().get_position().x;
        min_x = min_x.min(x);
        assert!(x > 0.5 && x < 3.5, "block escaped to x = {}", x);
    }

    // Stretched by one unit, the block swings through the rest length
    assert!(min_x < 1.5);
    assert!(!world.get_body(block).unwrap().is_sleeping());
}

#[test]
fn test_damping_settles_the_spring() {
    let mut world = PhysicsWorld::with_config(SimulationConfig::weightless());
    let anchor = world.add_body(static_at(0.0, 0.0));
    let block = world.add_body(dynamic_at(3.0, 0.0));
    world.add_constraint(Box::new(DampedSpring::new(
        anchor, block, Vector2::zero(), Vector2::zero(), 2.0, 10.0, 4.0,
    )));

    for _ in 0..600 {
        world.step(1.0 / 60.0);
    }

    let body = world.get_body(block).unwrap();
    assert_relative_eq!(body.get_position().x, 2.0, epsilon = 0.05);
    assert!(body.get_linear_velocity().length() < 0.05);
}

#[test]
fn test_sleep_and_wake() {
    let mut world = PhysicsWorld::with_config(SimulationConfig::weightless());
    let body = world.add_body(dynamic_at(0.0, 0.0));
    world.get_body_mut(body).unwrap().set_linear_velocity(Vector2::new(1.0, 0.0));

    world.sleep_body(body).unwrap();
    let rb = world.get_body(body).unwrap();
    assert!(rb.is_sleeping());
    assert!(rb.get_linear_velocity().is_zero());
    assert_eq!(world.get_events().get_body_events_of_type(BodyEventType::Sleep).len(), 1);

    // Sleeping bodies stay put
    world.step(1.0 / 60.0);
    assert_eq!(world.get_body(body).unwrap().get_position(), Vector2::zero());

    world.wake_body(body).unwrap();
    assert!(!world.get_body(body).unwrap().is_sleeping());
    assert_eq!(world.get_events().get_body_events_of_type(BodyEventType::Awake).len(), 1);
}

#[test]
fn test_resting_body_falls_asleep() {
    let mut world = PhysicsWorld::with_config(SimulationConfig::weightless());
    let body = world.add_body(dynamic_at(0.0, 0.0));

    for _ in 0..90 {
        world.step(1.0 / 60.0);
    }
    assert!(world.get_body(body).unwrap().is_sleeping());

    world.get_config_mut().allow_sleeping = false;
    world.wake_body(body).unwrap();
    for _ in 0..90 {
        world.step(1.0 / 60.0);
    }
    assert!(!world.get_body(body).unwrap().is_sleeping());
}

#[test]
fn test_set_body_state_leaves_sleep_alone() {
    let mut world = PhysicsWorld::with_config(SimulationConfig::weightless());
    let body = world.add_body(dynamic_at(0.0, 0.0));
    world.sleep_body(body).unwrap();

    let state = BodyState {
        position: Vector2::new(1.0, 2.0),
        angle: 0.5,
        linear_velocity: Vector2::new(3.0, 0.0),
        angular_velocity: 1.0,
    };
    world.set_body_state(body, state).unwrap();

    let rb = world.get_body(body).unwrap();
    assert!(rb.is_sleeping());
    assert_eq!(rb.get_state(), state);
    assert_eq!(world.get_events().get_body_events_of_type(BodyEventType::StateInjected).len(), 1);
}

#[test]
fn test_constraint_wakes_its_bodies() {
    let mut world = PhysicsWorld::with_config(SimulationConfig::weightless());
    let anchor = world.add_body(static_at(0.0, 0.0));
    let block = world.add_body(dynamic_at(3.0, 0.0));
    world.sleep_body(block).unwrap();

    let spring = world.add_constraint(Box::new(DampedSpring::new(
        anchor, block, Vector2::zero(), Vector2::zero(), 2.0, 10.0, 0.0,
    )));
    assert!(!world.get_body(block).unwrap().is_sleeping());
    assert_eq!(world.get_events().get_constraint_events_of_type(ConstraintEventType::Added).len(), 1);
    assert_eq!(world.get_constraint(spring).unwrap().constraint_type(), "DampedSpring");

    world.remove_constraint(spring).unwrap();
    assert!(world.remove_constraint(spring).is_err());
}
