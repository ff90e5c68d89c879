use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// File name of the snake segment sprite inside the assets directory
pub const SNAKE_SPRITE: &str = "snake.png";
/// File name of the food sprite inside the assets directory
pub const FOOD_SPRITE: &str = "food.png";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load sprite {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("sprite {} has no visible pixels", path.display())]
    Transparent { path: PathBuf },
}

/// A sprite reduced to the colour used to paint its cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub rgb: (u8, u8, u8),
}

impl Sprite {
    /// A sprite of a single solid colour
    pub fn solid(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: (r, g, b) }
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let img = image::open(path).map_err(|source| AssetError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();

        let (mut r, mut g, mut b, mut n) = (0u64, 0u64, 0u64, 0u64);
        for pixel in rgba.pixels() {
            let [pr, pg, pb, alpha] = pixel.0;
            if alpha == 0 {
                continue;
            }
            r += u64::from(pr);
            g += u64::from(pg);
            b += u64::from(pb);
            n += 1;
        }

        if n == 0 {
            return Err(AssetError::Transparent {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            rgb: ((r / n) as u8, (g / n) as u8, (b / n) as u8),
        })
    }
}

/// Both sprites the game needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprites {
    pub snake: Sprite,
    pub food: Sprite,
}

impl Sprites {
    /// Load `snake.png` and `food.png` from `dir`
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let snake = Sprite::load(&dir.join(SNAKE_SPRITE))?;
        let food = Sprite::load(&dir.join(FOOD_SPRITE))?;
        info!(dir = %dir.display(), ?snake, ?food, "sprites loaded");

        Ok(Self { snake, food })
    }
}
