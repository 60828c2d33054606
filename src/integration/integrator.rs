use crate::math::Vec2;
use crate::objects::RigidBody;

/// Advances a body by one sub-step using semi-implicit Euler.
///
/// `damping` is the per-sub-step velocity scale, `1 - air_resistance / iterations`.
pub fn integrate(body: &mut RigidBody, gravity: Vec2, dt: f64, damping: f64) {
    if body.is_static() {
        // Static object, do not integrate
        return;
    }

    // v = v + (F/m + g) * dt
    let linear_acceleration = body.force() * body.inv_mass();
    body.linear_velocity += (linear_acceleration + gravity) * dt;
    // p = p + v * dt
    body.move_by(body.linear_velocity * dt);

    if body.angular_velocity != 0.0 {
        let rotation = body.rotation() + body.angular_velocity * dt;
        body.rotate_to(wrap_angle(rotation));
    }

    body.clear_force();
    body.linear_velocity *= damping;
    body.angular_velocity *= damping;
}

/// Per-sub-step damping factor for the given air resistance, clamped to `[0, 1]`.
pub fn damping_factor(air_resistance: f64, iterations: usize) -> f64 {
    (1.0 - air_resistance / iterations.max(1) as f64).clamp(0.0, 1.0)
}

/// Wraps an angle in radians to the range [-PI, PI].
fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodyLimits;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn ball(is_static: bool) -> RigidBody {
        RigidBody::circle(Vec2::ZERO, 1.0, 1.0, 0.0, is_static, &BodyLimits::default()).unwrap()
    }

    #[test]
    fn test_integrate_linear_motion_no_force() {
        let mut rb = ball(false);
        rb.linear_velocity = Vec2::new(10.0, -5.0);

        integrate(&mut rb, Vec2::ZERO, 0.1, 1.0);

        assert!((rb.position().x - 1.0).abs() < EPSILON);
        assert!((rb.position().y + 0.5).abs() < EPSILON);
        assert_eq!(rb.linear_velocity, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_integrate_constant_force_is_cleared() {
        let mut rb = ball(false);
        let mass = rb.mass();
        rb.add_force(Vec2::new(10.0 * mass, 0.0)); // a = (10, 0)

        integrate(&mut rb, Vec2::ZERO, 0.1, 1.0);

        // v = a*dt = 1, p = v*dt = 0.1
        assert!((rb.linear_velocity.x - 1.0).abs() < EPSILON);
        assert!((rb.position().x - 0.1).abs() < EPSILON);
        assert_eq!(rb.force(), Vec2::ZERO);
    }

    #[test]
    fn test_integrate_gravity_is_mass_independent() {
        let limits = BodyLimits::default();
        let mut light = RigidBody::circle(Vec2::ZERO, 1.0, 1.0, 0.0, false, &limits).unwrap();
        let mut heavy = RigidBody::circle(Vec2::ZERO, 20.0, 3.0, 0.0, false, &limits).unwrap();
        let gravity = Vec2::new(0.0, -9.81);

        integrate(&mut light, gravity, 0.5, 1.0);
        integrate(&mut heavy, gravity, 0.5, 1.0);

        assert!((light.linear_velocity.y - heavy.linear_velocity.y).abs() < EPSILON);
        assert!((light.linear_velocity.y + 4.905).abs() < EPSILON);
        assert!((light.position().y + 2.4525).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_rotation() {
        let mut rb = ball(false);
        rb.angular_velocity = 2.0;

        integrate(&mut rb, Vec2::ZERO, 0.25, 1.0);

        assert!((rb.rotation() - 0.5).abs() < EPSILON);
        assert!((rb.angular_velocity - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_applies_damping_after_moving() {
        let mut rb = ball(false);
        rb.linear_velocity = Vec2::new(4.0, 0.0);

        integrate(&mut rb, Vec2::ZERO, 1.0, 0.5);

        assert!((rb.position().x - 4.0).abs() < EPSILON);
        assert!((rb.linear_velocity.x - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_static_object() {
        let mut rb = ball(true);
        rb.move_to(Vec2::new(1.0, 1.0));
        rb.rotate_to(1.0);
        rb.linear_velocity = Vec2::new(1.0, 1.0);
        rb.angular_velocity = 1.0;
        rb.add_force(Vec2::new(10.0, 10.0));

        integrate(&mut rb, Vec2::new(0.0, -9.81), 0.1, 1.0);

        assert_eq!(rb.position(), Vec2::new(1.0, 1.0));
        assert_eq!(rb.rotation(), 1.0);
    }

    #[test]
    fn test_damping_factor() {
        assert_eq!(damping_factor(0.0, 8), 1.0);
        assert!((damping_factor(0.4, 4) - 0.9).abs() < EPSILON);
        assert_eq!(damping_factor(1.0, 1), 0.0);
        assert_eq!(damping_factor(0.5, 0), 0.5);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0) - 0.0).abs() < EPSILON);
        assert!((wrap_angle(PI) - PI).abs() < EPSILON);
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < EPSILON);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < EPSILON);
        assert!((wrap_angle(2.0 * PI) - 0.0).abs() < EPSILON);
    }
}
