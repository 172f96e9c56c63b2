//! Steering force rules.
//!
//! Each rule is a pure function from an agent plus a pre-filtered neighbor
//! set (or the viewport bounds) to a force vector. Neighbor ids double as
//! indices into the swarm slice; the simulation assigns ids densely from
//! zero and never reuses them.
//!
//! An isolated agent must feel zero net force from a rule with no neighbors,
//! so every average divides by max(count, 1).

use crate::boid::Boid;
use crate::config::Viewport;
use crate::vector::Vec2;

/// Push away from close neighbors: average of `boid.position - neighbor.position`.
pub fn separation(boid: &Boid, boids: &[Boid], close: &[u32], weight: f32) -> Vec2 {
    let mut sum = Vec2::zero();
    for &id in close {
        sum += boid.position - boids[id as usize].position;
    }
    sum / close.len().max(1) as f32 * weight
}

/// Match the average heading of nearby peers: average neighbor velocity.
/// The agent's own velocity does not enter the average.
pub fn alignment(boids: &[Boid], neighbors: &[u32], weight: f32) -> Vec2 {
    let mut sum = Vec2::zero();
    for &id in neighbors {
        sum += boids[id as usize].velocity;
    }
    sum / neighbors.len().max(1) as f32 * weight
}

/// Pull toward the neighborhood centroid: average of
/// `neighbor.position - boid.position`.
pub fn cohesion(boid: &Boid, boids: &[Boid], neighbors: &[u32], weight: f32) -> Vec2 {
    let mut sum = Vec2::zero();
    for &id in neighbors {
        sum += boids[id as usize].position - boid.position;
    }
    sum / neighbors.len().max(1) as f32 * weight
}

/// Push away from any wall closer than `margin`, proportional to penetration
/// depth. The axes are independent; an agent deep in a corner is pushed on
/// both.
pub fn avoidance(boid: &Boid, viewport: Viewport, margin: f32) -> Vec2 {
    let mut force = Vec2::zero();
    let pos = boid.position;

    if pos.x < margin {
        force.x += margin - pos.x;
    } else if pos.x > viewport.width - margin {
        force.x -= pos.x - (viewport.width - margin);
    }

    if pos.y < margin {
        force.y += margin - pos.y;
    } else if pos.y > viewport.height - margin {
        force.y -= pos.y - (viewport.height - margin);
    }

    force
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_boid(id: u32, x: f32, y: f32) -> Boid {
        Boid::new(id, Vec2::new(x, y), Vec2::zero())
    }

    #[test]
    fn separation_of_two_agents_one_unit_apart() {
        let boids = vec![make_boid(0, 0.0, 0.0), make_boid(1, 1.0, 0.0)];
        let force = separation(&boids[0], &boids, &[1], 1.0);
        assert_eq!(force, Vec2::new(-1.0, 0.0));
        let force = separation(&boids[1], &boids, &[0], 1.0);
        assert_eq!(force, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn separation_averages_over_count() {
        let boids = vec![
            make_boid(0, 0.0, 0.0),
            make_boid(1, 2.0, 0.0),
            make_boid(2, 0.0, 2.0),
        ];
        let force = separation(&boids[0], &boids, &[1, 2], 1.0);
        assert_eq!(force, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn empty_neighbor_sets_yield_zero_force() {
        let boids = vec![make_boid(0, 10.0, 10.0)];
        assert_eq!(separation(&boids[0], &boids, &[], 1.0), Vec2::zero());
        assert_eq!(alignment(&boids, &[], 1.0), Vec2::zero());
        assert_eq!(cohesion(&boids[0], &boids, &[], 1.0), Vec2::zero());
    }

    #[test]
    fn alignment_averages_neighbor_velocities() {
        let mut boids = vec![
            make_boid(0, 0.0, 0.0),
            make_boid(1, 5.0, 0.0),
            make_boid(2, 0.0, 5.0),
        ];
        boids[1].velocity = Vec2::new(2.0, 0.0);
        boids[2].velocity = Vec2::new(0.0, 4.0);
        let force = alignment(&boids, &[1, 2], 0.5);
        assert_eq!(force, Vec2::new(0.5, 1.0));
    }

    #[test]
    fn cohesion_points_at_centroid() {
        let boids = vec![
            make_boid(0, 0.0, 0.0),
            make_boid(1, 4.0, 0.0),
            make_boid(2, 0.0, 4.0),
        ];
        let force = cohesion(&boids[0], &boids, &[1, 2], 1.0);
        assert_eq!(force, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn rules_scale_by_weight() {
        let boids = vec![make_boid(0, 0.0, 0.0), make_boid(1, 1.0, 0.0)];
        let force = separation(&boids[0], &boids, &[1], 2.5);
        assert_eq!(force, Vec2::new(-2.5, 0.0));
    }

    #[test]
    fn rules_do_not_mutate_inputs() {
        let boids = vec![make_boid(0, 0.0, 0.0), make_boid(1, 1.0, 0.0)];
        let before = boids[0].position;
        let _ = separation(&boids[0], &boids, &[1], 1.0);
        let _ = cohesion(&boids[0], &boids, &[1], 1.0);
        assert_eq!(boids[0].position, before);
        assert_eq!(boids[1].position, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn avoidance_is_zero_away_from_walls() {
        let viewport = Viewport::new(200.0, 200.0).unwrap();
        let boid = make_boid(0, 100.0, 100.0);
        assert_eq!(avoidance(&boid, viewport, 50.0), Vec2::zero());
    }

    #[test]
    fn avoidance_pushes_proportional_to_penetration() {
        let viewport = Viewport::new(200.0, 200.0).unwrap();
        let boid = make_boid(0, 10.0, 100.0);
        assert_eq!(avoidance(&boid, viewport, 50.0), Vec2::new(40.0, 0.0));
        let boid = make_boid(0, 190.0, 100.0);
        assert_eq!(avoidance(&boid, viewport, 50.0), Vec2::new(-40.0, 0.0));
        let boid = make_boid(0, 100.0, 195.0);
        assert_eq!(avoidance(&boid, viewport, 50.0), Vec2::new(0.0, -45.0));
    }

    #[test]
    fn avoidance_acts_on_both_axes_in_a_corner() {
        let viewport = Viewport::new(200.0, 200.0).unwrap();
        let boid = make_boid(0, 5.0, 198.0);
        assert_eq!(avoidance(&boid, viewport, 50.0), Vec2::new(45.0, -48.0));
    }
}
