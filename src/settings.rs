use crate::error::SettingsError;

pub const DEFAULT_SAMPLES: u32 = 100;
pub const DEFAULT_MAX_DEPTH: u32 = 50;
pub const DEFAULT_GAMMA: f64 = 2.0;
pub const DEFAULT_LINES_PER_CHUNK: u32 = 8;

/// Everything the frame renderer needs besides the scene and camera.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub gamma: f64,
    /// Base seed; every chunk derives its own generator from it.
    pub seed: u64,
    pub lines_per_chunk: u32,
}

impl RenderSettings {
    /// Settings for an image `width` pixels wide, height derived from `aspect_ratio`.
    pub fn new(width: u32, aspect_ratio: f64) -> Result<Self, SettingsError> {
        if !(aspect_ratio > 0.0) {
            return Err(SettingsError::AspectRatio(aspect_ratio));
        }
        let height = ((width as f64 / aspect_ratio) as u32).max(1);
        RenderSettings {
            width,
            height,
            samples_per_pixel: DEFAULT_SAMPLES,
            max_depth: DEFAULT_MAX_DEPTH,
            gamma: DEFAULT_GAMMA,
            seed: 0,
            lines_per_chunk: DEFAULT_LINES_PER_CHUNK,
        }
        .validated()
    }

    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn validated(self) -> Result<Self, SettingsError> {
        if self.width < 2 || self.height < 2 {
            return Err(SettingsError::ImageTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(SettingsError::NoSamples);
        }
        if self.max_depth == 0 {
            return Err(SettingsError::NoDepth);
        }
        if !(self.gamma > 0.0) {
            return Err(SettingsError::Gamma(self.gamma));
        }
        if self.lines_per_chunk == 0 {
            return Err(SettingsError::EmptyChunk);
        }
        Ok(self)
    }
}
