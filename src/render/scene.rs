//! Scene building for 2D primitives
//!
//! Turns a read-only `Frame` into a flat list of draw commands. Pure, so the
//! look of the game can be checked without a canvas.

use glam::Vec2;
use std::f32::consts::PI;

use crate::game::Frame;
use crate::sim::{Avatar, Obstacle};

/// CSS color string
pub type Color = &'static str;

/// Colors for game elements
pub mod palette {
    use super::Color;

    pub const SKY_TOP: Color = "#8fd3ff";
    pub const SKY_BOTTOM: Color = "#dff5ff";
    pub const GROUND: Color = "#f6c65b";
    pub const GROUND_SHADOW: Color = "#d99e3c";
    pub const OBSTACLE: Color = "#2ecc71";
    pub const OBSTACLE_SHADOW: Color = "#1e9f57";
    pub const AVATAR: Color = "#ffb703";
    pub const AVATAR_WING: Color = "#fb8500";
    pub const BEAK: Color = "#ff6700";
    pub const EYE: Color = "#1d3557";
}

/// Width of the darker strip on an obstacle's trailing side
pub const OBSTACLE_SHADOW_WIDTH: f32 = 6.0;
/// Height of the darker strip along the top of the ground
pub const GROUND_SHADOW_HEIGHT: f32 = 6.0;

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Rectangle filled with a top-to-bottom gradient
    VerticalGradient {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        top: Color,
        bottom: Color,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: Color,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
    },
    /// Following commands are relative to `origin`, rotated by `rotation`
    PushTransform { origin: Vec2, rotation: f32 },
    PopTransform,
}

/// Nose-up / nose-down angle for a given vertical velocity
#[inline]
pub fn avatar_tilt(velocity: f32) -> f32 {
    (velocity / 10.0).clamp(-0.4, 0.6)
}

/// Build the full scene for one frame, back to front
pub fn build_scene(frame: &Frame<'_>) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(9 + frame.obstacles.len() * 4);
    background(frame, &mut cmds);
    for obstacle in frame.obstacles.iter() {
        obstacle_cmds(frame, obstacle, &mut cmds);
    }
    avatar_cmds(frame.avatar, &mut cmds);
    cmds
}

fn background(frame: &Frame<'_>, cmds: &mut Vec<DrawCmd>) {
    let config = frame.config;
    cmds.push(DrawCmd::VerticalGradient {
        x: 0.0,
        y: 0.0,
        w: config.width,
        h: config.height,
        top: palette::SKY_TOP,
        bottom: palette::SKY_BOTTOM,
    });

    let ground_y = config.ground_line();
    cmds.push(DrawCmd::Rect {
        x: 0.0,
        y: ground_y,
        w: config.width,
        h: config.ground_height,
        color: palette::GROUND,
    });
    cmds.push(DrawCmd::Rect {
        x: 0.0,
        y: ground_y,
        w: config.width,
        h: GROUND_SHADOW_HEIGHT,
        color: palette::GROUND_SHADOW,
    });
}

fn obstacle_cmds(frame: &Frame<'_>, obstacle: &Obstacle, cmds: &mut Vec<DrawCmd>) {
    let config = frame.config;
    let w = config.obstacle_width;
    let top_h = obstacle.gap_top(config.gap_size).max(0.0);
    let bottom_y = obstacle.gap_bottom(config.gap_size);
    let bottom_h = (config.ground_line() - bottom_y).max(0.0);
    let shadow_x = obstacle.x + w - OBSTACLE_SHADOW_WIDTH;

    cmds.push(DrawCmd::Rect {
        x: obstacle.x,
        y: 0.0,
        w,
        h: top_h,
        color: palette::OBSTACLE,
    });
    cmds.push(DrawCmd::Rect {
        x: obstacle.x,
        y: bottom_y,
        w,
        h: bottom_h,
        color: palette::OBSTACLE,
    });
    cmds.push(DrawCmd::Rect {
        x: shadow_x,
        y: 0.0,
        w: OBSTACLE_SHADOW_WIDTH,
        h: top_h,
        color: palette::OBSTACLE_SHADOW,
    });
    cmds.push(DrawCmd::Rect {
        x: shadow_x,
        y: bottom_y,
        w: OBSTACLE_SHADOW_WIDTH,
        h: bottom_h,
        color: palette::OBSTACLE_SHADOW,
    });
}

fn avatar_cmds(avatar: &Avatar, cmds: &mut Vec<DrawCmd>) {
    let r = avatar.radius;
    cmds.push(DrawCmd::PushTransform {
        origin: avatar.pos,
        rotation: avatar_tilt(avatar.velocity),
    });
    cmds.push(DrawCmd::Circle {
        center: Vec2::ZERO,
        radius: r,
        color: palette::AVATAR,
    });
    cmds.push(DrawCmd::Ellipse {
        center: Vec2::new(-4.0, 2.0),
        radii: Vec2::new(6.0, 4.0),
        rotation: PI / 4.0,
        color: palette::AVATAR_WING,
    });
    cmds.push(DrawCmd::Triangle {
        points: [
            Vec2::new(r - 2.0, -3.0),
            Vec2::new(r + 8.0, 0.0),
            Vec2::new(r - 2.0, 3.0),
        ],
        color: palette::BEAK,
    });
    cmds.push(DrawCmd::Circle {
        center: Vec2::new(-4.0, -4.0),
        radius: 2.2,
        color: palette::EYE,
    });
    cmds.push(DrawCmd::PopTransform);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{GamePhase, Run};

    fn frame_of<'a>(run: &'a Run, config: &'a GameConfig) -> Frame<'a> {
        Frame {
            phase: GamePhase::Playing,
            avatar: &run.avatar,
            obstacles: &run.obstacles,
            config,
        }
    }

    #[test]
    fn test_tilt_clamped() {
        assert_eq!(avatar_tilt(0.0), 0.0);
        assert_eq!(avatar_tilt(-6.2), -0.4);
        assert_eq!(avatar_tilt(20.0), 0.6);
        assert!((avatar_tilt(3.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_empty_scene_layout() {
        let config = GameConfig::default();
        let run = Run::new(&config);
        let cmds = build_scene(&frame_of(&run, &config));
        assert_eq!(cmds.len(), 9);
        match &cmds[0] {
            DrawCmd::VerticalGradient { w, h, .. } => assert_eq!((*w, *h), (320.0, 480.0)),
            other => panic!("expected sky gradient, got {other:?}"),
        }
        assert_eq!(
            cmds[1],
            DrawCmd::Rect {
                x: 0.0,
                y: 410.0,
                w: 320.0,
                h: 70.0,
                color: palette::GROUND
            }
        );
        assert_eq!(cmds.last(), Some(&DrawCmd::PopTransform));
    }

    #[test]
    fn test_obstacle_segments() {
        let config = GameConfig::default();
        let mut run = Run::new(&config);
        run.obstacles.push(Obstacle::new(100.0, 200.0));
        let cmds = build_scene(&frame_of(&run, &config));
        assert_eq!(cmds.len(), 13);
        assert_eq!(
            cmds[3],
            DrawCmd::Rect {
                x: 100.0,
                y: 0.0,
                w: 54.0,
                h: 130.0,
                color: palette::OBSTACLE
            }
        );
        assert_eq!(
            cmds[4],
            DrawCmd::Rect {
                x: 100.0,
                y: 270.0,
                w: 54.0,
                h: 140.0,
                color: palette::OBSTACLE
            }
        );
        match &cmds[5] {
            DrawCmd::Rect { x, w, color, .. } => {
                assert_eq!((*x, *w), (148.0, 6.0));
                assert_eq!(*color, palette::OBSTACLE_SHADOW);
            }
            other => panic!("expected shadow strip, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_gap_never_negative() {
        let config = GameConfig {
            gap_size: 900.0,
            ..Default::default()
        };
        let mut run = Run::new(&config);
        run.obstacles.push(Obstacle::new(100.0, 205.0));
        for cmd in build_scene(&frame_of(&run, &config)) {
            if let DrawCmd::Rect { h, .. } = cmd {
                assert!(h >= 0.0);
            }
        }
    }

    #[test]
    fn test_avatar_group_follows_avatar() {
        let config = GameConfig::default();
        let mut run = Run::new(&config);
        run.avatar.velocity = 4.0;
        let cmds = build_scene(&frame_of(&run, &config));
        let push = cmds
            .iter()
            .find(|c| matches!(c, DrawCmd::PushTransform { .. }))
            .unwrap();
        assert_eq!(
            *push,
            DrawCmd::PushTransform {
                origin: Vec2::new(90.0, 240.0),
                rotation: avatar_tilt(4.0),
            }
        );
    }
}
