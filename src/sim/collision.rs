//! Collision detection and response
//!
//! Everything here is a pure query against the play field plus the entities
//! passed in; the only mutation is rewriting a ball's angle on a bounce.

use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

use super::ball::{Ball, Quadrant};
use super::brick::{BrickGrid, CellCoord};
use super::paddle::Paddle;
use super::powerup::PowerUp;
use crate::config::PlayField;
use crate::consts::MIN_BOUNCE_ANGLE;

/// Collision queries bound to one play field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    field: PlayField,
}

impl Collider {
    pub fn new(field: PlayField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    /// Ball touches the side wall it is moving toward
    pub fn ball_hits_wall(&self, ball: &Ball) -> bool {
        let angle = ball.angle();
        let heading_left = !(-FRAC_PI_2..=FRAC_PI_2).contains(&angle);
        let at_left = ball.pos.x - ball.radius <= self.field.left + 1.0;
        let at_right = ball.pos.x + ball.radius >= self.field.right() - 1.0;
        (at_left && heading_left) || (at_right && !heading_left)
    }

    /// Ball touches the ceiling
    pub fn ball_hits_upper_bound(&self, ball: &Ball) -> bool {
        ball.pos.y - ball.radius - 1.0 <= self.field.top
    }

    /// Ball touches the floor
    pub fn ball_falls_down(&self, ball: &Ball) -> bool {
        ball.pos.y + ball.radius >= self.field.bottom() - 1.0
    }

    /// Ball's lower edge reaches the paddle top while its center is still above it
    pub fn ball_hits_paddle(&self, ball: &Ball, paddle: &Paddle) -> bool {
        let top = paddle.top() as f32;
        ball.pos.y + ball.radius + 1.0 >= top
            && ball.pos.y < top
            && ball.pos.x + ball.radius >= paddle.left() as f32
            && ball.pos.x - ball.radius <= paddle.right() as f32
    }

    /// Power-up's lower edge reaches the paddle top within the paddle's span
    pub fn paddle_hits_powerup(&self, paddle: &Paddle, powerup: &PowerUp) -> bool {
        paddle.top() as f32 <= powerup.pos.y + powerup.radius
            && paddle.left() as f32 <= powerup.pos.x
            && paddle.right() as f32 >= powerup.pos.x
    }

    /// Reflect off a vertical surface
    pub fn bounce_horizontally(&self, ball: &mut Ball) {
        ball.set_angle(PI - ball.angle());
    }

    /// Reflect off a horizontal surface
    pub fn bounce_vertically(&self, ball: &mut Ball) {
        ball.set_angle(-ball.angle());
    }

    /// Reflect off the paddle as if it were the top chord of a circle
    ///
    /// The circle has the paddle's curvature radius and sits below the paddle
    /// center, so hits near the edges are deflected outward. The result never
    /// comes closer than `MIN_BOUNCE_ANGLE` to the horizontal.
    pub fn bounce_on_paddle(&self, ball: &mut Ball, paddle: &Paddle) {
        let x_dist = (ball.pos.x - paddle.x as f32).abs();
        let curvature = paddle.curvature_radius.max(1) as f32;
        let theta = (x_dist / curvature).min(1.0).acos();

        ball.set_angle(clamp_bounce_angle(2.0 * theta - ball.angle() - PI));
    }

    /// First alive brick the ball overlaps, scanning in its direction of travel
    ///
    /// The ball is approximated by its inscribed square. Candidate cells are
    /// swept rows-then-columns in the order the ball would reach them, so a
    /// ball heading up-right meets the lowest row first and, within a row, the
    /// leftmost brick first.
    pub fn ball_hits_brick(&self, ball: &Ball, grid: &BrickGrid) -> Option<CellCoord> {
        let rows = grid.rows();
        let columns = grid.columns();
        if rows == 0 || columns == 0 {
            return None;
        }
        // Entirely below, above or beside the grid
        if ball.pos.y - ball.radius > grid.bottom() || ball.pos.y + ball.radius < grid.origin_y {
            return None;
        }
        if ball.pos.x + ball.radius < grid.origin_x || ball.pos.x - ball.radius > grid.right() {
            return None;
        }

        let half = ball.radius * FRAC_1_SQRT_2;
        let x = ball.pos.x - grid.origin_x;
        let y = ball.pos.y - grid.origin_y;
        let width = grid.brick_width as f32;
        let height = grid.brick_height as f32;

        let min_row = cell_index(y - half - 1.0, height, rows);
        let max_row = cell_index(y + half + 1.0, height, rows);
        let min_column = cell_index(x - half - 1.0, width, columns);
        let max_column = cell_index(x + half + 1.0, width, columns);

        let (rows_bottom_up, columns_right_to_left) = match ball.quadrant() {
            Quadrant::First => (true, false),
            Quadrant::Second => (true, true),
            Quadrant::Third => (false, true),
            Quadrant::Fourth => (false, false),
        };
        let row_order = sweep(min_row, max_row, rows_bottom_up);
        let column_order = sweep(min_column, max_column, columns_right_to_left);

        row_order
            .iter()
            .flat_map(|&row| column_order.iter().map(move |&column| CellCoord::new(row, column)))
            .find(|&cell| grid.is_alive_at(cell))
    }
}

/// Keep a paddle bounce at least `MIN_BOUNCE_ANGLE` away from 0 and ±π
pub fn clamp_bounce_angle(angle: f32) -> f32 {
    let min = MIN_BOUNCE_ANGLE;
    if angle >= 0.0 {
        if angle < min {
            min
        } else if angle > PI - min {
            PI - min
        } else {
            angle
        }
    } else if angle > -min {
        -min
    } else if angle < -PI + min {
        -PI + min
    } else {
        angle
    }
}

/// Grid index containing coordinate `v`, clamped to `0..count`
fn cell_index(v: f32, size: f32, count: usize) -> usize {
    let index = (v / size).floor();
    if index <= 0.0 {
        0
    } else {
        (index as usize).min(count - 1)
    }
}

fn sweep(min: usize, max: usize, reverse: bool) -> Vec<usize> {
    if reverse {
        (min..=max).rev().collect()
    } else {
        (min..=max).collect()
    }
}
