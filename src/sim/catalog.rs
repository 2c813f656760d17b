//! Static catalog data
//!
//! Cell kinds with their shapes and display colors, the construction blueprints,
//! the power-up catalog and the fixed four-layer recipe. Pure data, no behavior
//! beyond lookups.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Largest shape edge in the catalog (the I piece)
pub const MAX_SHAPE: usize = 4;

/// Every identifier a grid cell or entity can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    // Tetrominoes
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
    // Recipe ingredients, bottom to top
    BottomBun,
    Patty,
    Lettuce,
    TopBun,
    // Tunneling
    Digger,
    Dirt,
    Rock,
    /// Mobile hazard, inflates when pumped
    Pooka,
    /// Mobile hazard, fire-breathing variant
    Fygar,
    // Collector
    SnakeHead,
    SnakeBody,
    Food,
    // Defense
    Blaster,
    Segment,
    Mushroom,
    Bullet,
}

impl CellKind {
    pub const TETROMINOES: [CellKind; 7] = [
        CellKind::I,
        CellKind::J,
        CellKind::L,
        CellKind::O,
        CellKind::S,
        CellKind::T,
        CellKind::Z,
    ];

    /// Display color as 0xRRGGBB
    pub fn color(self) -> u32 {
        match self {
            CellKind::I => 0x00ffff,
            CellKind::J => 0x2979ff,
            CellKind::L => 0xff9100,
            CellKind::O => 0xffea00,
            CellKind::S => 0x00e676,
            CellKind::T => 0xd500f9,
            CellKind::Z => 0xff1744,
            CellKind::BottomBun | CellKind::TopBun => 0xd2b48c,
            CellKind::Patty => 0x633917,
            CellKind::Lettuce => 0x2ecc71,
            CellKind::Digger => 0xffffff,
            CellKind::Dirt => 0x5d4037,
            CellKind::Rock => 0x757575,
            CellKind::Pooka => 0xff1744,
            CellKind::Fygar => 0x00e676,
            CellKind::SnakeHead => 0x00ffcc,
            CellKind::SnakeBody => 0x00aaff,
            CellKind::Food => 0xff00ff,
            CellKind::Blaster => 0xffffff,
            CellKind::Segment => 0xff0055,
            CellKind::Mushroom => 0xffea00,
            CellKind::Bullet => 0x00ffff,
        }
    }

    /// Spawn shape for this kind; everything but the tetrominoes is a single cell
    pub fn shape(self) -> ShapeMask {
        match self {
            CellKind::I => ShapeMask::from_rows(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]),
            CellKind::J => ShapeMask::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            CellKind::L => ShapeMask::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
            CellKind::O => ShapeMask::from_rows(&[&[1, 1], &[1, 1]]),
            CellKind::S => ShapeMask::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            CellKind::T => ShapeMask::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            CellKind::Z => ShapeMask::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
            _ => ShapeMask::single(),
        }
    }

    /// Tunneling creatures that kill on contact and can be pumped
    pub fn is_monster(self) -> bool {
        matches!(self, CellKind::Pooka | CellKind::Fygar)
    }
}

/// Rotatable cell matrix, row-major, `true` = occupied / required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeMask {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE]; MAX_SHAPE],
}

impl ShapeMask {
    /// Build from 0/1 rows. Rows longer than `MAX_SHAPE` are truncated.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len().min(MAX_SHAPE);
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0).min(MAX_SHAPE);
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        for (y, row) in rows.iter().take(height).enumerate() {
            for (x, &v) in row.iter().take(width).enumerate() {
                cells[y][x] = v == 1;
            }
        }
        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    pub fn single() -> Self {
        Self::from_rows(&[&[1]])
    }

    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.cells[y][x]
    }

    /// Offsets of every set cell relative to the top-left anchor
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.height as usize).flat_map(move |y| {
            (0..self.width as usize)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| IVec2::new(x as i32, y as i32))
        })
    }

    /// Clockwise quarter turn: transpose, then reverse each row
    pub fn rotated(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        for (i, row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Target fill-pattern for construction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blueprint {
    pub name: &'static str,
    pub shape: ShapeMask,
}

/// All blueprints, cycled by level
pub fn blueprints() -> [Blueprint; 4] {
    [
        Blueprint {
            name: "Small Square",
            shape: ShapeMask::from_rows(&[&[1, 1], &[1, 1]]),
        },
        Blueprint {
            name: "Tower",
            shape: ShapeMask::from_rows(&[&[1], &[1], &[1], &[1]]),
        },
        Blueprint {
            name: "Bridge",
            shape: ShapeMask::from_rows(&[&[1, 1, 1], &[1, 0, 1]]),
        },
        Blueprint {
            name: "Pyramid",
            shape: ShapeMask::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        },
    ]
}

/// Blueprint for a level index, wrapping around the catalog
pub fn blueprint_for(index: u32) -> Blueprint {
    let all = blueprints();
    all[index as usize % all.len()]
}

/// A selectable power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerUp {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Power-up catalog. `hammer`, `nuke` and `switch` are recorded on selection but carry
/// no gameplay effect.
pub const POWER_UPS: [PowerUp; 10] = [
    PowerUp { id: "master", name: "Master Builder", description: "Next 5 pieces are I-blocks" },
    PowerUp { id: "hammer", name: "Jackhammer", description: "Landings destroy 2 rows" },
    PowerUp { id: "warp", name: "Time Warp", description: "Permanent slow motion" },
    PowerUp { id: "nuke", name: "Neon Nuke", description: "Clears bottom 5 rows" },
    PowerUp { id: "hack", name: "Blueprint Hack", description: "Skip current shape" },
    PowerUp { id: "glue", name: "Glue Gun", description: "Double score for 1 min" },
    PowerUp { id: "switch", name: "Spectrum Switch", description: "Active piece becomes \"Wild\"" },
    PowerUp { id: "flip", name: "Gravity Flip", description: "Pieces fall slower" },
    PowerUp { id: "pulse", name: "Score Pulse", description: "Level multiplier x2" },
    PowerUp { id: "ghost", name: "Ghost Vision", description: "Show perfect landing spot" },
];

pub fn power_up(id: &str) -> Option<PowerUp> {
    POWER_UPS.iter().copied().find(|p| p.id == id)
}

/// Recipe layers from bottom to top
pub const RECIPE: [CellKind; 4] = [
    CellKind::BottomBun,
    CellKind::Patty,
    CellKind::Lettuce,
    CellKind::TopBun,
];
