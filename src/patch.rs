//! Synthesis parameters and performance state.

/// Continuous synthesis parameters read by the engine on every block.
///
/// All values are nominally in the range from `0.0` to `1.0`, but nothing
/// here enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    /// Attack/decay balance of the exciter envelope. Default is `0.2`.
    pub exciter_envelope_shape: f32,

    /// Bow exciter level. Default is `0.4`.
    pub exciter_bow_level: f32,

    /// Bow exciter timbre. Default is `0.4`.
    pub exciter_bow_timbre: f32,

    /// Blow exciter level. Default is `0.0`.
    pub exciter_blow_level: f32,

    /// Blow exciter meta (flow noise vs. external input). Default is `0.0`.
    pub exciter_blow_meta: f32,

    /// Blow exciter timbre. Default is `0.0`.
    pub exciter_blow_timbre: f32,

    /// Strike exciter level. Default is `0.7`.
    pub exciter_strike_level: f32,

    /// Strike exciter meta (mallet hardness). Default is `0.5`.
    pub exciter_strike_meta: f32,

    /// Strike exciter timbre. Default is `0.4`.
    pub exciter_strike_timbre: f32,

    /// Resonator geometry (partial stretching). Default is `0.2`.
    pub resonator_geometry: f32,

    /// Resonator brightness. Default is `0.8`.
    pub resonator_brightness: f32,

    /// Resonator damping. Default is `0.5`.
    pub resonator_damping: f32,

    /// Excitation position on the resonator. Default is `0.3`.
    pub resonator_position: f32,

    /// Reverb send and stereo width. Default is `0.8`.
    pub space: f32,
}

impl Default for Patch {
    fn default() -> Self {
        Self {
            exciter_envelope_shape: 0.2,
            exciter_bow_level: 0.4,
            exciter_bow_timbre: 0.4,
            exciter_blow_level: 0.0,
            exciter_blow_meta: 0.0,
            exciter_blow_timbre: 0.0,
            exciter_strike_level: 0.7,
            exciter_strike_meta: 0.5,
            exciter_strike_timbre: 0.4,
            resonator_geometry: 0.2,
            resonator_brightness: 0.8,
            resonator_damping: 0.5,
            resonator_position: 0.3,
            space: 0.8,
        }
    }
}

/// Per-block control values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceState {
    /// Pitch as MIDI note number. Default is `30.0`.
    pub note: f32,

    /// Note on. Default is `false`.
    pub gate: bool,

    /// Modulation amount. Default is `0.0`.
    pub modulation: f32,
}

impl Default for PerformanceState {
    fn default() -> Self {
        Self {
            note: 30.0,
            gate: false,
            modulation: 0.0,
        }
    }
}
