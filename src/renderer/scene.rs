//! Per-frame display lists for each game

use super::palette;
use super::shapes::DrawCmd;
use crate::sim::{BalloonShape, BalloonState, RunnerState};

/// Road, lane dividers, player car, traffic
pub fn runner_scene(state: &RunnerState) -> Vec<DrawCmd> {
    let vp = state.viewport;
    let tuning = &state.tuning;
    let lane_width = state.lane_width();

    let dividers = tuning.num_lanes.saturating_sub(1) as usize;
    let mut cmds = Vec::with_capacity(3 + dividers * state.markings.len() + state.cars.len());

    cmds.push(DrawCmd::Clear {
        width: vp.width,
        height: vp.height,
    });
    cmds.push(DrawCmd::rect(0.0, 0.0, vp.width, vp.height, palette::ROAD));

    for lane in 1..tuning.num_lanes {
        let x = lane as f32 * lane_width - tuning.marking_width / 2.0;
        for mark in &state.markings {
            cmds.push(DrawCmd::rect(
                x,
                mark.y,
                tuning.marking_width,
                tuning.marking_length,
                palette::LANE_DIVIDER,
            ));
        }
    }

    let player = state.player.bounds();
    cmds.push(DrawCmd::FillRect {
        rect: player,
        color: palette::PLAYER_CAR,
    });

    for car in &state.cars {
        cmds.push(DrawCmd::FillRect {
            rect: car.bounds(),
            color: palette::car_color(car.hue),
        });
    }

    cmds
}

/// Sky, obstacle pairs, balloon
pub fn balloon_scene(state: &BalloonState) -> Vec<DrawCmd> {
    let vp = state.viewport;
    let mut cmds = Vec::with_capacity(3 + state.obstacles.len() * 2);

    cmds.push(DrawCmd::Clear {
        width: vp.width,
        height: vp.height,
    });
    cmds.push(DrawCmd::rect(0.0, 0.0, vp.width, vp.height, palette::SKY));

    for obstacle in &state.obstacles {
        cmds.push(DrawCmd::FillRect {
            rect: obstacle.top_block(),
            color: palette::OBSTACLE,
        });
        cmds.push(DrawCmd::FillRect {
            rect: obstacle.bottom_block(vp.height),
            color: palette::OBSTACLE,
        });
    }

    let balloon = &state.balloon;
    cmds.push(match balloon.shape {
        BalloonShape::Rect { .. } => DrawCmd::FillRect {
            rect: balloon.bounds(),
            color: palette::BALLOON,
        },
        BalloonShape::Circle { radius } => DrawCmd::circle(balloon.pos, radius, palette::BALLOON),
    });

    cmds.retain(DrawCmd::is_visible);
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::{BalloonVariant, Rect};

    #[test]
    fn test_runner_scene_layers() {
        let mut state = RunnerState::new(3, Viewport::default());
        state.spawn_car_in_lane(1);

        let cmds = runner_scene(&state);
        assert!(matches!(cmds[0], DrawCmd::Clear { .. }));
        assert_eq!(cmds[1], DrawCmd::rect(0.0, 0.0, 405.0, 720.0, palette::ROAD));

        let expected = 2 + 3 * state.markings.len() + 1 + 1;
        assert_eq!(cmds.len(), expected);

        // Player is drawn before traffic so cars paint over it
        assert_eq!(
            cmds[cmds.len() - 2],
            DrawCmd::FillRect {
                rect: state.player.bounds(),
                color: palette::PLAYER_CAR,
            }
        );
    }

    #[test]
    fn test_first_divider_sits_on_lane_boundary() {
        let state = RunnerState::new(3, Viewport::default());
        let cmds = runner_scene(&state);
        let DrawCmd::FillRect { rect, color } = &cmds[2] else {
            panic!("expected a divider dash");
        };
        assert_eq!(*color, palette::LANE_DIVIDER);
        assert!((rect.left() - (405.0 / 4.0 - 2.5)).abs() < 0.001);
        assert_eq!(rect.width(), 5.0);
        assert_eq!(rect.height(), 50.0);
    }

    #[test]
    fn test_balloon_scene_shapes() {
        let mut state = BalloonState::new(1, Viewport::default(), BalloonVariant::Circle);
        state.spawn_obstacle_at(200.0, 300.0);

        let cmds = balloon_scene(&state);
        assert_eq!(cmds.len(), 2 + 2 + 1);
        assert_eq!(
            cmds[2],
            DrawCmd::FillRect {
                rect: Rect::from_xywh(200.0, 0.0, 60.0, 225.0),
                color: palette::OBSTACLE,
            }
        );
        assert!(matches!(cmds[4], DrawCmd::FillCircle { radius, .. } if radius == 20.0));

        let rect_state = BalloonState::new(1, Viewport::default(), BalloonVariant::Rect);
        let cmds = balloon_scene(&rect_state);
        assert_eq!(
            cmds.last(),
            Some(&DrawCmd::FillRect {
                rect: rect_state.balloon.bounds(),
                color: palette::BALLOON,
            })
        );
    }

    #[test]
    fn test_empty_blocks_are_skipped() {
        let mut state = BalloonState::new(1, Viewport::default(), BalloonVariant::Rect);
        // Gap runs off the top of the screen, so there is no top block
        state.spawn_obstacle_at(200.0, 40.0);
        let cmds = balloon_scene(&state);
        assert_eq!(cmds.len(), 2 + 1 + 1);
    }
}
