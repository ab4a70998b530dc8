//! Parallax starfield drawn behind the world container.
//!
//! Stars live in screen space. Each has a depth in `(0, parallax]`; the
//! camera focus moves a star by `-focus * depth`, wrapped so the field
//! always covers the viewport.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starwake_core::types::wrap;
use starwake_scene::{NodeId, NodeKind, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub node: NodeId,
    /// Screen position when the focus is at the origin.
    pub home: DVec2,
    pub depth: f64,
}

pub struct Starfield {
    container: NodeId,
    stars: Vec<Star>,
    width: f64,
    height: f64,
    focus: DVec2,
}

impl Starfield {
    /// Scatter `count` stars over a `width` x `height` viewport.
    pub fn new(
        scene: &mut SceneGraph,
        rng: &mut ChaCha8Rng,
        count: usize,
        parallax: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let container = scene.create_container();
        let mut stars = Vec::with_capacity(count);

        for _ in 0..count {
            let home = DVec2::new(rng.gen_range(0.0..width.max(1.0)), rng.gen_range(0.0..height.max(1.0)));
            let depth = parallax * rng.gen_range(0.1..=1.0);
            let brightness = rng.gen_range(0.3..=1.0);

            let node = scene.create(NodeKind::Star { brightness });
            scene.set_position(node, home);
            scene.add_child(container, node);
            stars.push(Star { node, home, depth });
        }

        Self {
            container,
            stars,
            width,
            height,
            focus: DVec2::ZERO,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn focus(&self) -> DVec2 {
        self.focus
    }

    /// Set the world point the camera is looking at.
    pub fn set_position(&mut self, focus: DVec2) {
        self.focus = focus;
    }

    /// Screen position of `star` for the current focus.
    pub fn star_position(&self, star: &Star) -> DVec2 {
        let shifted = star.home - self.focus * star.depth;
        DVec2::new(wrap(shifted.x, self.width), wrap(shifted.y, self.height))
    }

    /// Move every star node to its parallax position.
    pub fn update(&self, scene: &mut SceneGraph) {
        for star in &self.stars {
            scene.set_position(star.node, self.star_position(star));
        }
    }
}
