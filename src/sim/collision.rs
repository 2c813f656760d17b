//! Collision and blueprint checks against the grid
//!
//! Both checks are pure functions of their inputs. Cells above the grid
//! (y < 0) never collide so pieces can spawn and rotate partially hidden.

use glam::IVec2;

use super::catalog::{Blueprint, ShapeMask};
use super::grid::Grid;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};

/// True if any occupied cell of `shape` anchored at `anchor` leaves the grid
/// sideways, sinks below the floor, or lands on an occupied visible cell
pub fn collides(shape: &ShapeMask, anchor: IVec2, grid: &Grid) -> bool {
    shape.cells().any(|offset| {
        let p = anchor + offset;
        p.x < 0 || p.x >= GRID_WIDTH || p.y >= GRID_HEIGHT || (p.y >= 0 && grid.is_occupied(p))
    })
}

/// Negation of [`collides`]
#[inline]
pub fn fits(shape: &ShapeMask, anchor: IVec2, grid: &Grid) -> bool {
    !collides(shape, anchor, grid)
}

/// Top-left anchor of `blueprint` when bottom-aligned and horizontally centered
pub fn blueprint_anchor(blueprint: &Blueprint) -> IVec2 {
    IVec2::new(
        (GRID_WIDTH - blueprint.shape.width()) / 2,
        GRID_HEIGHT - blueprint.shape.height(),
    )
}

/// True if every required cell of the placed blueprint is occupied.
/// Don't-care cells impose nothing; a missing blueprint is never satisfied.
pub fn blueprint_satisfied(grid: &Grid, blueprint: Option<&Blueprint>) -> bool {
    let Some(blueprint) = blueprint else {
        return false;
    };
    let anchor = blueprint_anchor(blueprint);
    blueprint
        .shape
        .cells()
        .all(|offset| grid.is_occupied(anchor + offset))
}

/// Lowest anchor reachable by dropping `shape` straight down from `anchor`
pub fn landing_anchor(shape: &ShapeMask, anchor: IVec2, grid: &Grid) -> IVec2 {
    let mut landing = anchor;
    while fits(shape, landing + IVec2::Y, grid) {
        landing += IVec2::Y;
    }
    landing
}
