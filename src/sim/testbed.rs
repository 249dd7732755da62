//! In-memory physics double
//!
//! Not a physics engine: a minimal stand-in implementing [`PhysicsPort`]
//! so integration tests and the headless demo can host a session without a
//! real simulator. Bodies fall under gravity, rest on the floor, push apart
//! on overlap, and report circle-overlap contact pairs with begin/persist
//! phases. Unit tests also use it statically (spawn, reposition, inspect)
//! without ever stepping.

use std::collections::HashSet;

use glam::Vec2;

use super::entity::Tier;
use super::physics::{BodyHandle, BodyState, ContactPair, ContactPhase, PhysicsPort};

const GRAVITY: f32 = 900.0;
/// Velocity kept after a floor or wall hit
const SURFACE_DAMPING: f32 = 0.3;
/// Fraction of pair penetration corrected per step. Partial correction keeps
/// overlapping pairs in contact across several steps, which is exactly the
/// begin-then-persist stream the merge engine is built to consume.
const SEPARATION_CORRECTION: f32 = 0.35;

#[derive(Debug, Clone)]
struct TestBody {
    handle: BodyHandle,
    radius: f32,
    mass: f32,
    pos: Vec2,
    vel: Vec2,
    angular_vel: f32,
}

/// Gravity-and-circles stand-in for the rigid-body collaborator
#[derive(Debug)]
pub struct TestbedPhysics {
    width: f32,
    height: f32,
    bodies: Vec<TestBody>,
    next_handle: u64,
    contacts: Vec<ContactPair>,
    touching: HashSet<(BodyHandle, BodyHandle)>,
}

impl TestbedPhysics {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            bodies: Vec::new(),
            next_handle: 1,
            contacts: Vec::new(),
            touching: HashSet::new(),
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Teleport a body (test setup)
    pub fn set_position(&mut self, body: BodyHandle, pos: Vec2) {
        if let Some(b) = self.bodies.iter_mut().find(|b| b.handle == body) {
            b.pos = pos;
        }
    }

    /// Override a body's velocity (test setup)
    pub fn set_velocity(&mut self, body: BodyHandle, vel: Vec2) {
        if let Some(b) = self.bodies.iter_mut().find(|b| b.handle == body) {
            b.vel = vel;
        }
    }

    /// Advance the toy simulation by `dt` seconds and record contact pairs
    pub fn step(&mut self, dt: f32) {
        for body in &mut self.bodies {
            body.vel.y += GRAVITY * dt;
            body.pos += body.vel * dt;

            // Floor
            let floor = self.height - body.radius;
            if body.pos.y > floor {
                body.pos.y = floor;
                body.vel.y = 0.0;
                body.vel.x *= SURFACE_DAMPING;
                body.angular_vel *= SURFACE_DAMPING;
            }
            // Walls
            if body.pos.x < body.radius {
                body.pos.x = body.radius;
                body.vel.x = 0.0;
            } else if body.pos.x > self.width - body.radius {
                body.pos.x = self.width - body.radius;
                body.vel.x = 0.0;
            }
        }

        // Positional separation so stacks settle instead of sinking into
        // each other, then contact reporting.
        let mut now_touching = HashSet::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (left, right) = self.bodies.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];

                let delta = b.pos - a.pos;
                let min_dist = a.radius + b.radius;
                let dist = delta.length();
                if dist >= min_dist {
                    continue;
                }

                let axis = if dist > 1e-4 {
                    delta / dist
                } else {
                    Vec2::new(0.0, -1.0)
                };
                // Split the correction by mass so heavier pieces move less
                let correction = (min_dist - dist) * SEPARATION_CORRECTION;
                let total = a.mass + b.mass;
                a.pos -= axis * correction * (b.mass / total);
                b.pos += axis * correction * (a.mass / total);

                // Cancel approaching velocity along the axis (inelastic)
                let approach = (b.vel - a.vel).dot(axis);
                if approach < 0.0 {
                    a.vel += axis * (approach * 0.5);
                    b.vel -= axis * (approach * 0.5);
                }

                let key = (a.handle.min(b.handle), a.handle.max(b.handle));
                let phase = if self.touching.contains(&key) {
                    ContactPhase::Persisted
                } else {
                    ContactPhase::Began
                };
                now_touching.insert(key);
                self.contacts.push(ContactPair {
                    a: key.0,
                    b: key.1,
                    phase,
                });
            }
        }
        self.touching = now_touching;
    }

    /// Drain the contact pairs recorded since the last call
    pub fn take_contacts(&mut self) -> Vec<ContactPair> {
        std::mem::take(&mut self.contacts)
    }
}

impl PhysicsPort for TestbedPhysics {
    fn spawn_body(&mut self, tier: Tier, pos: Vec2) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        let info = tier.info();
        self.bodies.push(TestBody {
            handle,
            radius: info.radius,
            mass: info.mass,
            pos,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
        });
        handle
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.retain(|b| b.handle != body);
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2) {
        if let Some(b) = self.bodies.iter_mut().find(|b| b.handle == body) {
            b.vel += impulse / b.mass;
        }
    }

    fn body_state(&self, body: BodyHandle) -> Option<BodyState> {
        self.bodies.iter().find(|b| b.handle == body).map(|b| BodyState {
            pos: b.pos,
            linear_speed: b.vel.length(),
            angular_speed: b.angular_vel.abs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies_fall_and_rest_on_floor() {
        let mut physics = TestbedPhysics::new(480.0, 640.0);
        let body = physics.spawn_body(Tier(1), Vec2::new(240.0, 100.0));

        for _ in 0..1200 {
            physics.step(1.0 / 120.0);
        }

        let state = physics.body_state(body).unwrap();
        assert!((state.pos.y - (640.0 - Tier(1).radius())).abs() < 1.0);
        assert!(state.linear_speed < 1.0);
    }

    #[test]
    fn test_contact_phases_begin_then_persist() {
        let mut physics = TestbedPhysics::new(480.0, 640.0);
        let floor_y = 640.0 - Tier(1).radius();
        physics.spawn_body(Tier(1), Vec2::new(240.0, floor_y));
        physics.spawn_body(Tier(1), Vec2::new(245.0, floor_y));

        physics.step(1.0 / 120.0);
        let first = physics.take_contacts();
        assert!(first.iter().any(|c| c.phase == ContactPhase::Began));

        physics.step(1.0 / 120.0);
        let second = physics.take_contacts();
        assert!(second.iter().any(|c| c.phase == ContactPhase::Persisted));
    }

    #[test]
    fn test_removed_body_reports_no_state() {
        let mut physics = TestbedPhysics::new(480.0, 640.0);
        let body = physics.spawn_body(Tier(2), Vec2::new(100.0, 100.0));
        physics.remove_body(body);
        assert!(physics.body_state(body).is_none());
        // Removing again is a no-op
        physics.remove_body(body);
    }
}
