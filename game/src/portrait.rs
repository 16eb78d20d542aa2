//! Built-in character portraits, one per presence tier.
//!
//! The art is a 10x15 grid (the 2:3 shape of the on-screen portrait box) that the renderer
//! scales up with nearest-neighbour sampling.

use engine::graphics::{Color, Sprite};
use engine::view_tree::SpriteSource;

use crate::meter::PresenceTier;

/// Scene sprites are keyed by the tier they depict.
pub type PortraitKey = PresenceTier;

const ART_W: u32 = 10;
const ART_H: u32 = 15;

const HEAD: [&str; 6] = [
    "...HHHH...",
    "..HHHHHH..",
    ".HHSSSSHH.",
    ".SSSSSSSS.",
    ".SEESSEES.",
    ".SSSSSSSS.",
];

const FROWN: [&str; 2] = [".SSMMMMSS.", ".SMSSSSMS."];
const FLAT: [&str; 2] = [".SSSSSSSS.", ".SSMMMMSS."];
const SMILE: [&str; 2] = [".SMSSSSMS.", ".SSMMMMSS."];

const BODY: [&str; 7] = [
    "..SSSSSS..",
    "....SS....",
    ".BBBBBBBB.",
    "BBBBBBBBBB",
    "BBBBBBBBBB",
    "BBBBBBBBBB",
    "BBBBBBBBBB",
];

const TRANSPARENT: Color = [0, 0, 0, 0];
const HAIR: Color = [92, 64, 51, 255];
const SKIN: Color = [241, 194, 125, 255];
const EYE: Color = [20, 20, 20, 255];
const MOUTH: Color = [150, 40, 40, 255];

fn shirt(tier: PresenceTier) -> Color {
    match tier {
        PresenceTier::Low => [110, 110, 130, 255],
        PresenceTier::Medium => [70, 130, 180, 255],
        PresenceTier::High => [240, 190, 40, 255],
    }
}

fn mouth(tier: PresenceTier) -> [&'static str; 2] {
    match tier {
        PresenceTier::Low => FROWN,
        PresenceTier::Medium => FLAT,
        PresenceTier::High => SMILE,
    }
}

fn portrait(tier: PresenceTier) -> Sprite {
    let rows: Vec<&str> = HEAD
        .iter()
        .chain(mouth(tier).iter())
        .chain(BODY.iter())
        .copied()
        .collect();
    let shirt = shirt(tier);

    Sprite::from_fn(ART_W, ART_H, |x, y| {
        let cell = rows
            .get(y as usize)
            .and_then(|row| row.as_bytes().get(x as usize))
            .copied();
        match cell {
            Some(b'H') => HAIR,
            Some(b'S') => SKIN,
            Some(b'E') => EYE,
            Some(b'M') => MOUTH,
            Some(b'B') => shirt,
            _ => TRANSPARENT,
        }
    })
}

#[derive(Debug, Clone)]
pub struct Portraits {
    low: Sprite,
    medium: Sprite,
    high: Sprite,
}

impl Default for Portraits {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Portraits {
    pub fn builtin() -> Self {
        Self {
            low: portrait(PresenceTier::Low),
            medium: portrait(PresenceTier::Medium),
            high: portrait(PresenceTier::High),
        }
    }

    pub fn get(&self, tier: PresenceTier) -> &Sprite {
        match tier {
            PresenceTier::Low => &self.low,
            PresenceTier::Medium => &self.medium,
            PresenceTier::High => &self.high,
        }
    }
}

impl SpriteSource<PortraitKey> for Portraits {
    fn sprite(&self, key: &PortraitKey) -> Option<&Sprite> {
        Some(self.get(*key))
    }
}
