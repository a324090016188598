//! Host-facing parameter identifiers and metadata.

/// Parameters exposed to the host, in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    ExciterEnvShape,
    ExciterBowLevel,
    ExciterBowTimbre,
    ExciterBlowLevel,
    ExciterBlowMeta,
    ExciterBlowTimbre,
    ExciterStrikeLevel,
    ExciterStrikeMeta,
    ExciterStrikeTimbre,
    ResonatorGeometry,
    ResonatorBrightness,
    ResonatorDamping,
    ResonatorPosition,
    Space,
    ResonatorModel,
}

pub const NUM_PARAMETERS: usize = 15;

/// Display names of the resonator model choices, indexed by host value.
pub const RESONATOR_MODEL_CHOICES: [&str; 4] = ["Modal", "Non-linear", "Chords", "Ominous"];

impl Parameter {
    pub const ALL: [Parameter; NUM_PARAMETERS] = [
        Self::ExciterEnvShape,
        Self::ExciterBowLevel,
        Self::ExciterBowTimbre,
        Self::ExciterBlowLevel,
        Self::ExciterBlowMeta,
        Self::ExciterBlowTimbre,
        Self::ExciterStrikeLevel,
        Self::ExciterStrikeMeta,
        Self::ExciterStrikeTimbre,
        Self::ResonatorGeometry,
        Self::ResonatorBrightness,
        Self::ResonatorDamping,
        Self::ResonatorPosition,
        Self::Space,
        Self::ResonatorModel,
    ];

    /// Identifier used by the host.
    pub fn name(self) -> &'static str {
        match self {
            Self::ExciterEnvShape => "exciterEnvShape",
            Self::ExciterBowLevel => "exciterBowLevel",
            Self::ExciterBowTimbre => "exciterBowTimbre",
            Self::ExciterBlowLevel => "exciterBlowLevel",
            Self::ExciterBlowMeta => "exciterBlowMeta",
            Self::ExciterBlowTimbre => "exciterBlowTimbre",
            Self::ExciterStrikeLevel => "exciterStrikeLevel",
            Self::ExciterStrikeMeta => "exciterStrikeMeta",
            Self::ExciterStrikeTimbre => "exciterStrikeTimbre",
            Self::ResonatorGeometry => "resonatorGeometry",
            Self::ResonatorBrightness => "resonatorBrightness",
            Self::ResonatorDamping => "resonatorDamping",
            Self::ResonatorPosition => "resonatorPosition",
            Self::Space => "space",
            Self::ResonatorModel => "resonatorModel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|parameter| parameter.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ExciterEnvShape => "Exciter: Env Shape",
            Self::ExciterBowLevel => "Bow Level",
            Self::ExciterBowTimbre => "Bow Timbre",
            Self::ExciterBlowLevel => "Blow Level",
            Self::ExciterBlowMeta => "Blow Meta",
            Self::ExciterBlowTimbre => "Blow Timbre",
            Self::ExciterStrikeLevel => "Strike Level",
            Self::ExciterStrikeMeta => "Strike Meta",
            Self::ExciterStrikeTimbre => "Strike Timbre",
            Self::ResonatorGeometry => "Resonator Geometry",
            Self::ResonatorBrightness => "Resonator Brightness",
            Self::ResonatorDamping => "Resonator Damping",
            Self::ResonatorPosition => "Resonator Position",
            Self::Space => "Space",
            Self::ResonatorModel => "Resonator Model",
        }
    }

    /// Minimum and maximum value offered to the user.
    pub fn range(self) -> (f32, f32) {
        match self {
            Self::Space => (0.0, 2.0),
            Self::ResonatorModel => (0.0, (RESONATOR_MODEL_CHOICES.len() - 1) as f32),
            _ => (0.0, 1.0),
        }
    }

    /// Initial value the host control starts at.
    ///
    /// This is a property of the host control surface and differs from
    /// [`crate::Patch::default`] for several parameters.
    pub fn default_value(self) -> f32 {
        match self {
            Self::ExciterStrikeLevel => 0.7,
            Self::ExciterStrikeMeta | Self::ExciterStrikeTimbre => 0.5,
            Self::ResonatorGeometry
            | Self::ResonatorBrightness
            | Self::ResonatorDamping
            | Self::ResonatorPosition => 0.3,
            Self::Space => 0.5,
            _ => 0.0,
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, Self::ResonatorModel)
    }
}
