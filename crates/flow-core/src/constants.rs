// Tuning constants shared by the core and both front-ends.

// Session
pub const DEFAULT_PARTICLE_COUNT: usize = 8000;
pub const INITIAL_SCATTER_HALF_EXTENT: f32 = 5.0; // current buffer starts in [-5, 5)^3

// Simulation
pub const CONVERGENCE_RATE: f32 = 0.08; // per-frame EMA factor toward the scaled target
pub const IMPLOSION_STRENGTH: f32 = 0.8; // shrink = 1 - tension * strength
pub const JITTER_TENSION_THRESHOLD: f32 = 0.5;
pub const JITTER_GAIN: f32 = 0.1; // jitter span = (tension - threshold) * gain

// Flicker (burst and reveal shapes only)
pub const FLICKER_FLASH_LEVEL: f32 = 1.5;
pub const FLICKER_GLOW_LEVEL: f32 = 1.2;
pub const FLICKER_FLASH_NOISE: f32 = 0.9;
pub const FLICKER_GLOW_NOISE: f32 = 0.5;
pub const FLICKER_BASE: f32 = 0.8;
pub const FLICKER_SHIMMER: f32 = 0.2;

// Gesture smoothing
pub const TENSION_DECAY: f32 = 0.95; // per frame with no hands
pub const SCALE_REST: f32 = 1.0;
pub const SCALE_BLEND: f32 = 0.05; // per frame toward SCALE_REST
pub const SCALE_BASE: f32 = 0.5; // two-hand scale = base + wrist distance * gain
pub const SCALE_GAIN: f32 = 3.0;

// Gesture thresholds (normalized landmark space)
pub const FIST_REFERENCE_DISTANCE: f32 = 0.35;
pub const FIST_GAIN: f32 = 4.0;
pub const FIST_TENSION_THRESHOLD: f32 = 0.5;
pub const PINCH_DISTANCE: f32 = 0.08;
pub const FINGER_EXTENSION_MARGIN: f32 = 0.08;
pub const THUMB_INDEX_MCP_DISTANCE: f32 = 0.15;
pub const THUMB_IP_OFFSET_MARGIN: f32 = 0.02;

// Spin (radians per frame)
pub const SPIN_IDLE: f32 = 0.002;
pub const SPIN_FAST: f32 = 0.05;

// Shape geometry
pub const HEART_SCALE: f32 = 0.1;
pub const HEART_DEPTH: f32 = 2.0; // initial z spread, +-1
pub const HEART_JITTER: f32 = 0.2; // +-0.1 per axis
pub const FLOWER_PETALS: f32 = 4.0;
pub const FLOWER_RADIUS: f32 = 2.0;
pub const SATURN_SPHERE_PROBABILITY: f32 = 0.7;
pub const SATURN_SPHERE_RADIUS: f32 = 1.5;
pub const SATURN_RING_INNER: f32 = 2.2;
pub const SATURN_RING_OUTER: f32 = 3.2;
pub const SATURN_RING_THICKNESS: f32 = 0.1;
pub const SATURN_TILT: f32 = std::f32::consts::FRAC_PI_6;
pub const BURST_RADIUS: f32 = 4.0;

// Pixel text
pub const GLYPH_SIZE: usize = 5;
pub const GLYPH_CELL: f32 = 0.25;
pub const GLYPH_GAP: f32 = 0.4;
pub const TEXT_DEPTH: f32 = 0.2; // +-0.1 on z
