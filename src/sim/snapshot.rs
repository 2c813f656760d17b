//! Read-only view of the store for the rendering collaborator
//!
//! Owned and serializable so it can be handed across a frame boundary or
//! dumped as JSON by the headless driver.

use glam::IVec2;
use serde::Serialize;

use super::catalog::{CellKind, PowerUp};
use super::collision::blueprint_anchor;
use super::game::Game;
use super::grid::Cell;
use super::rules::Projectile;
use super::state::{ActiveEntity, GameMode, GameStatus};
use crate::in_bounds;

#[derive(Debug, Clone, Serialize)]
pub struct BlueprintView {
    pub name: &'static str,
    /// Top-left anchor of the bottom-aligned, centered placement
    pub anchor: IVec2,
    pub required: Vec<IVec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub status: GameStatus,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub recipes: u32,
    pub time_ticks: u64,
    pub tick_interval_ms: u32,
    /// Rows top to bottom
    pub grid: Vec<Vec<Cell>>,
    pub active: Option<ActiveEntity>,
    pub next_piece: Option<CellKind>,
    pub ghost: Option<IVec2>,
    pub body: Vec<IVec2>,
    pub projectiles: Vec<Projectile>,
    pub blueprint: Option<BlueprintView>,
    pub power_up_pool: Vec<PowerUp>,
    pub active_power_ups: Vec<&'static str>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        let state = game.state();
        Self {
            mode: state.mode,
            status: state.status,
            score: state.score,
            level: state.level,
            lines: state.lines,
            recipes: state.recipes,
            time_ticks: state.time_ticks,
            tick_interval_ms: game.tick_interval_ms(),
            grid: state.grid.rows().map(|row| row.to_vec()).collect(),
            active: state.active,
            next_piece: state.next_piece,
            ghost: game.ghost_anchor(),
            body: game.snake_body().to_vec(),
            projectiles: game.projectiles().to_vec(),
            blueprint: state.blueprint.map(|b| BlueprintView {
                name: b.name,
                anchor: blueprint_anchor(&b),
                required: b.shape.cells().collect(),
            }),
            power_up_pool: state.power_up_pool.clone(),
            active_power_ups: state.active_power_ups.clone(),
        }
    }

    /// Compact text rendering, one line per row, for logs and tests
    pub fn to_ascii(&self) -> String {
        let mut rows: Vec<Vec<char>> = self
            .grid
            .iter()
            .map(|row| row.iter().map(|c| c.map_or('.', glyph)).collect())
            .collect();
        let mut put = |pos: IVec2, ch: char| {
            if in_bounds(pos) {
                rows[pos.y as usize][pos.x as usize] = ch;
            }
        };
        for &seg in &self.body {
            put(seg, 'o');
        }
        for shot in &self.projectiles {
            put(shot.pos, '|');
        }
        if let Some(active) = self.active {
            for cell in active.cells() {
                put(cell, '@');
            }
        }
        rows.into_iter()
            .map(|r| r.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::I | CellKind::J | CellKind::L | CellKind::O | CellKind::S | CellKind::T | CellKind::Z => '#',
        CellKind::BottomBun => 'b',
        CellKind::Patty => 'm',
        CellKind::Lettuce => 'l',
        CellKind::TopBun => 't',
        CellKind::Dirt => ':',
        CellKind::Rock => 'R',
        CellKind::Pooka => 'P',
        CellKind::Fygar => 'F',
        CellKind::Food => '*',
        CellKind::Segment => 'C',
        CellKind::Mushroom => 'M',
        CellKind::Digger | CellKind::SnakeHead | CellKind::SnakeBody | CellKind::Blaster | CellKind::Bullet => '@',
    }
}
