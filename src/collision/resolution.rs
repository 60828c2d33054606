//! Positional correction and impulse resolution for a single manifold.

use crate::math::Vec2;
use crate::objects::RigidBody;

use super::manifold::CollisionManifold;

/// Pushes the bodies apart along `normal` by `depth`. A static body never
/// moves, so its partner takes the full correction.
pub fn separate_bodies(body_a: &mut RigidBody, body_b: &mut RigidBody, normal: Vec2, depth: f64) {
    match (body_a.is_static(), body_b.is_static()) {
        (true, true) => {}
        (true, false) => body_b.move_by(normal * depth),
        (false, true) => body_a.move_by(-normal * depth),
        (false, false) => {
            body_a.move_by(-normal * depth * 0.5);
            body_b.move_by(normal * depth * 0.5);
        }
    }
}

/// Linear impulse along the contact normal.
///
/// ```text
/// j = -(1 + e) * dot(v_b - v_a, n) / (1/m_a + 1/m_b)
/// ```
pub fn resolve_collision(body_a: &mut RigidBody, body_b: &mut RigidBody, manifold: &CollisionManifold) {
    let inv_mass_sum = body_a.inv_mass() + body_b.inv_mass();
    if inv_mass_sum <= 0.0 {
        return;
    }

    let normal = manifold.normal;
    let relative_velocity = body_b.linear_velocity - body_a.linear_velocity;
    let velocity_along_normal = relative_velocity.dot(normal);

    // Already separating.
    if velocity_along_normal > 0.0 {
        return;
    }

    let e = body_a.restitution().min(body_b.restitution());
    let j = -(1.0 + e) * velocity_along_normal / inv_mass_sum;
    let impulse = normal * j;

    body_a.linear_velocity -= impulse * body_a.inv_mass();
    body_b.linear_velocity += impulse * body_b.inv_mass();
}

/// Impulse resolution at each contact point, including the angular response.
/// With two contacts the impulse is shared equally between them.
pub fn resolve_collision_with_rotation(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    manifold: &CollisionManifold,
) {
    if body_a.inv_mass() + body_b.inv_mass() <= 0.0 {
        return;
    }

    let normal = manifold.normal;
    let e = body_a.restitution().min(body_b.restitution());
    let contacts = manifold.contact_points();
    let count = contacts.len() as f64;

    // Every impulse is computed from the pre-resolution velocities.
    let mut impulses = [(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO); 2];
    for (slot, &contact) in impulses.iter_mut().zip(contacts) {
        let r_a = contact - body_a.position();
        let r_b = contact - body_b.position();
        let r_a_perp = r_a.perpendicular();
        let r_b_perp = r_b.perpendicular();

        let relative_velocity = (body_b.linear_velocity + r_b_perp * body_b.angular_velocity)
            - (body_a.linear_velocity + r_a_perp * body_a.angular_velocity);
        let contact_velocity = relative_velocity.dot(normal);
        if contact_velocity > 0.0 {
            continue;
        }

        let ra_perp_dot_n = r_a_perp.dot(normal);
        let rb_perp_dot_n = r_b_perp.dot(normal);
        let denominator = body_a.inv_mass()
            + body_b.inv_mass()
            + ra_perp_dot_n * ra_perp_dot_n * body_a.inv_inertia()
            + rb_perp_dot_n * rb_perp_dot_n * body_b.inv_inertia();

        let j = -(1.0 + e) * contact_velocity / denominator / count;
        *slot = (normal * j, r_a, r_b);
    }

    for &(impulse, r_a, r_b) in &impulses[..contacts.len()] {
        body_a.linear_velocity -= impulse * body_a.inv_mass();
        body_a.angular_velocity -= r_a.cross(impulse) * body_a.inv_inertia();
        body_b.linear_velocity += impulse * body_b.inv_mass();
        body_b.angular_velocity += r_b.cross(impulse) * body_b.inv_inertia();
    }
}
