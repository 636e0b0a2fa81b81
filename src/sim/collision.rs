//! Contact resolution against the goal, platforms and terrain
//!
//! Checks run in a fixed order each frame: goal, then platforms, then ground.
//! A later check sees the position corrected by an earlier one.

use super::motion::roll_step;
use super::state::{ActorState, CameraState, Course, GoalMarker, Platform};
use super::terrain::Terrain;
use crate::settings::{ExplosionSettings, GoalResponse, PhysicsSettings};
use crate::{GOAL_REACHED, NEUTRAL, Rgb};

/// Ground impact outcome for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// Ball is swelling; render it at `scale` with `color`
    Swelling { scale: f32, color: Rgb },
    /// Explosion ran its course and the ball is back at the start
    Reset,
}

/// What the resolver did this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactReport {
    /// Goal touched this frame
    pub goal_touched: bool,
    /// Goal changed from untouched to reached this frame
    pub goal_newly_reached: bool,
    /// Index of the platform the ball rests on
    pub landed_on: Option<usize>,
    pub impact: Option<Impact>,
}

/// Box test against the goal, applying its response on contact
///
/// The test is per axis, not a circle: the contact region is a square of
/// half-size `radius + goal.radius` around the marker.
pub fn check_goal(actor: &mut ActorState, goal: &mut GoalMarker, radius: f32) -> bool {
    let reach = radius + goal.radius;
    let touching =
        (goal.pos.x - actor.pos.x).abs() < reach && (goal.pos.z - actor.pos.z).abs() < reach;
    if !touching {
        return false;
    }

    goal.reached = true;
    if let GoalResponse::Bounce { damping } = goal.response {
        // Undo this frame's roll, then knock the ball back
        actor.pos -= roll_step(actor.dr, actor.heading);
        actor.dr *= -damping;
    }
    true
}

/// Land on the first platform whose top the ball is sinking into
///
/// The ball lands when it is inside the platform footprint and its center is
/// less than one radius below the roll height. Only the first match counts;
/// overlapping platforms are a course layout error.
pub fn land_on_platforms(actor: &mut ActorState, platforms: &[Platform], radius: f32) -> Option<usize> {
    actor.on_platform = false;

    for (i, platform) in platforms.iter().enumerate() {
        let roll = platform.roll_height(radius);
        if platform.covers(actor.pos.x, actor.pos.z)
            && actor.pos.y < roll
            && actor.pos.y > roll - radius
        {
            actor.pos.y = roll;
            actor.dy = 0.0;
            actor.on_platform = true;
            return Some(i);
        }
    }
    None
}

/// Explode on contact with the ground, resetting once fully blown up
pub fn ground_impact(
    actor: &mut ActorState,
    camera: &mut CameraState,
    start: &Platform,
    terrain: &impl Terrain,
    physics: &PhysicsSettings,
    explosion: &ExplosionSettings,
) -> Option<Impact> {
    let ground = terrain.height(actor.pos.x, actor.pos.z);
    let grounded = actor.pos.y < ground + physics.radius;
    let continuing = explosion.sticky && actor.is_exploding();
    if !grounded && !continuing {
        return None;
    }

    // Sticky explosions sit on the swelling radius
    let lift = if explosion.sticky {
        physics.radius * actor.expl
    } else {
        physics.radius
    };
    actor.pos.y = ground + lift;
    actor.dy = 0.0;

    let scale = actor.expl;
    actor.expl *= explosion.growth;
    actor.color = [explosion.tint * actor.expl, 0.0, 0.0];

    if actor.expl > explosion.limit {
        reset_to_start(actor, camera, start, physics);
        return Some(Impact::Reset);
    }
    Some(Impact::Swelling {
        scale,
        color: actor.color,
    })
}

/// Put the ball back above the start platform, intact and at rest
///
/// Heading is kept so the player does not lose their bearings.
pub fn reset_to_start(
    actor: &mut ActorState,
    camera: &mut CameraState,
    start: &Platform,
    physics: &PhysicsSettings,
) {
    actor.dr = 0.0;
    actor.dy = 0.0;
    actor.expl = 1.0;
    actor.color = NEUTRAL;
    actor.on_platform = false;
    actor.pos = start.spawn_point(physics);
    camera.pos = actor.pos;
}

/// Run all contact checks for one frame
pub fn resolve(
    actor: &mut ActorState,
    camera: &mut CameraState,
    course: &mut Course,
    terrain: &impl Terrain,
    physics: &PhysicsSettings,
    explosion: &ExplosionSettings,
) -> ContactReport {
    let was_reached = course.goal.reached;
    let goal_touched = check_goal(actor, &mut course.goal, physics.radius);

    let landed_on = land_on_platforms(actor, &course.platforms, physics.radius);

    let impact = ground_impact(actor, camera, course.start(), terrain, physics, explosion);

    ContactReport {
        goal_touched,
        goal_newly_reached: goal_touched && !was_reached,
        landed_on,
        impact,
    }
}

/// Marker color once the goal has been reached
pub fn goal_color(goal: &GoalMarker) -> Option<Rgb> {
    goal.reached.then_some(GOAL_REACHED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::FlatTerrain;
    use glam::Vec3;

    fn actor_at(pos: Vec3) -> ActorState {
        ActorState {
            pos,
            dr: 0.0,
            dy: 0.0,
            heading: 0.0,
            expl: 1.0,
            on_platform: false,
            color: NEUTRAL,
        }
    }

    fn goal(radius: f32, response: GoalResponse) -> GoalMarker {
        GoalMarker {
            pos: Vec3::new(0.0, 5.0, 0.0),
            radius,
            response,
            reached: false,
        }
    }

    #[test]
    fn test_goal_box_not_circle() {
        let mut g = goal(0.0, GoalResponse::Mark);
        // corner of the box: outside a radius-1 circle, inside the square
        let mut actor = actor_at(Vec3::new(0.9, 1.0, 0.9));
        assert!(check_goal(&mut actor, &mut g, 1.0));
        assert!(g.reached);

        let mut g = goal(0.0, GoalResponse::Mark);
        let mut actor = actor_at(Vec3::new(1.0, 1.0, 0.0));
        assert!(!check_goal(&mut actor, &mut g, 1.0));
        assert!(!g.reached);
    }

    #[test]
    fn test_goal_color_once_reached() {
        let mut g = goal(0.0, GoalResponse::Mark);
        assert_eq!(goal_color(&g), None);
        g.reached = true;
        assert_eq!(goal_color(&g), Some(GOAL_REACHED));
    }

    #[test]
    fn test_goal_bounce_undoes_step() {
        let mut g = goal(2.0, GoalResponse::Bounce { damping: 0.1 });
        let mut actor = actor_at(Vec3::new(0.0, 1.0, 2.5));
        actor.dr = 0.5;
        // heading 0 rolls along +z; the bounce steps back 0.5 in z
        assert!(check_goal(&mut actor, &mut g, 1.0));
        assert!((actor.pos.z - 2.0).abs() < 1e-6);
        assert!((actor.dr - (-0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_lands_at_roll_height() {
        let platforms = vec![Platform::new(Vec3::new(44.0, 5.0, 43.0), 8.0, 1.5)];
        let mut actor = actor_at(Vec3::new(44.0, 6.5, 43.0));
        actor.dy = -0.2;
        assert_eq!(land_on_platforms(&mut actor, &platforms, 1.0), Some(0));
        assert!((actor.pos.y - 6.75).abs() < 1e-6);
        assert_eq!(actor.dy, 0.0);
        assert!(actor.on_platform);
    }

    #[test]
    fn test_too_deep_falls_through() {
        let platforms = vec![Platform::new(Vec3::new(0.0, 5.0, 0.0), 8.0, 1.5)];
        // roll height 6.75, landing band is (5.75, 6.75)
        let mut actor = actor_at(Vec3::new(0.0, 5.7, 0.0));
        assert_eq!(land_on_platforms(&mut actor, &platforms, 1.0), None);
        assert!(!actor.on_platform);
    }

    #[test]
    fn test_first_platform_wins() {
        let platforms = vec![
            Platform::new(Vec3::new(0.0, 5.0, 0.0), 8.0, 1.5),
            Platform::new(Vec3::new(1.0, 5.3, 1.0), 8.0, 1.5),
        ];
        // inside both landing bands: (5.75, 6.75) and (6.05, 7.05)
        let mut actor = actor_at(Vec3::new(0.5, 6.5, 0.5));
        actor.dy = -0.3;
        assert_eq!(land_on_platforms(&mut actor, &platforms, 1.0), Some(0));
        assert!((actor.pos.y - 6.75).abs() < 1e-6);
    }

    #[test]
    fn test_ground_explosion_grows_then_resets() {
        let physics = PhysicsSettings::default();
        let explosion = ExplosionSettings::default();
        let start = Platform::new(Vec3::new(44.0, 5.0, 43.0), 8.0, 1.5);
        let mut camera = CameraState::at(Vec3::ZERO);
        let mut actor = actor_at(Vec3::new(0.0, 0.5, 0.0));
        actor.dr = 0.3;

        let mut last = actor.expl;
        let mut frames = 0;
        loop {
            // stay buried so every frame is a ground contact
            actor.pos.y = 0.5;
            let impact = ground_impact(&mut actor, &mut camera, &start, &FlatTerrain(0.0), &physics, &explosion);
            frames += 1;
            match impact {
                Some(Impact::Swelling { scale, color }) => {
                    assert_eq!(scale, last);
                    assert!(actor.expl > last);
                    assert!(actor.expl <= explosion.limit);
                    assert!((color[0] - 0.2 * actor.expl).abs() < 1e-5);
                    last = actor.expl;
                }
                Some(Impact::Reset) => break,
                None => panic!("buried ball must hit the ground"),
            }
            assert!(frames < 100);
        }

        // 1.25^11 is the first power above 10
        assert_eq!(frames, 11);
        assert_eq!(actor.expl, 1.0);
        assert_eq!(actor.dr, 0.0);
        assert_eq!(actor.dy, 0.0);
        assert_eq!(actor.color, NEUTRAL);
        assert_eq!(actor.pos, Vec3::new(44.0, 11.0, 43.0));
        assert_eq!(camera.pos, actor.pos);
    }

    #[test]
    fn test_sticky_explosion_continues_in_air() {
        let physics = PhysicsSettings::default();
        let explosion = ExplosionSettings {
            growth: 2.5,
            limit: 75.0,
            tint: 0.5,
            sticky: true,
        };
        let start = Platform::new(Vec3::new(0.0, 5.0, 0.0), 10.0, 1.5);
        let mut camera = CameraState::at(Vec3::ZERO);
        let mut actor = actor_at(Vec3::new(0.0, 0.5, 0.0));

        let first = ground_impact(&mut actor, &mut camera, &start, &FlatTerrain(0.0), &physics, &explosion);
        assert!(matches!(first, Some(Impact::Swelling { scale, .. }) if scale == 1.0));
        assert!((actor.pos.y - 1.0).abs() < 1e-6);

        // well above the ground now, but the explosion carries on
        actor.pos.y = 30.0;
        let second = ground_impact(&mut actor, &mut camera, &start, &FlatTerrain(0.0), &physics, &explosion);
        assert!(matches!(second, Some(Impact::Swelling { scale, .. }) if scale == 2.5));
        assert!((actor.pos.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_airborne_no_impact() {
        let physics = PhysicsSettings::default();
        let start = Platform::new(Vec3::ZERO, 8.0, 1.5);
        let mut camera = CameraState::at(Vec3::ZERO);
        let mut actor = actor_at(Vec3::new(0.0, 1.5, 0.0));
        let impact = ground_impact(
            &mut actor,
            &mut camera,
            &start,
            &FlatTerrain(0.0),
            &physics,
            &ExplosionSettings::default(),
        );
        assert_eq!(impact, None);
        assert_eq!(actor.expl, 1.0);
    }
}
