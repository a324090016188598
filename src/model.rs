//! Resonator model selection.

/// Value passed to [`crate::Instance::set_resonator_model`] to enter easter egg mode.
pub const EASTER_EGG_MODEL: i32 = 3;

/// Physical resonator algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResonatorModel {
    /// Bank of tuned band-pass modes.
    #[default]
    Modal = 0,

    /// Single non-linear string.
    String = 1,

    /// Chord of sympathetic strings.
    Strings = 2,
}

impl TryFrom<i32> for ResonatorModel {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Modal),
            1 => Ok(Self::String),
            2 => Ok(Self::Strings),
            _ => Err(value),
        }
    }
}

/// Model selection with the easter egg mode layered on top.
///
/// Easter egg mode keeps the concrete model it replaced, so leaving it
/// restores the previous selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSelection {
    Concrete(ResonatorModel),
    EasterEgg(ResonatorModel),
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self::Concrete(ResonatorModel::default())
    }
}

impl ModelSelection {
    /// Leave easter egg mode if active and select `model`.
    pub fn select(&mut self, model: ResonatorModel) {
        *self = Self::Concrete(model);
    }

    pub fn enter_easter_egg(&mut self) {
        *self = Self::EasterEgg(self.model());
    }

    pub fn leave_easter_egg(&mut self) {
        *self = Self::Concrete(self.model());
    }

    pub fn is_easter_egg(&self) -> bool {
        matches!(self, Self::EasterEgg(_))
    }

    /// Concrete model, remembered underneath easter egg mode.
    pub fn model(&self) -> ResonatorModel {
        match *self {
            Self::Concrete(model) | Self::EasterEgg(model) => model,
        }
    }

    /// Apply a raw host value. Returns `false` if the value was ignored.
    pub fn apply(&mut self, value: i32) -> bool {
        if value == EASTER_EGG_MODEL {
            self.enter_easter_egg();
            return true;
        }

        match ResonatorModel::try_from(value) {
            Ok(model) => {
                self.select(model);
                true
            }
            Err(_) => false,
        }
    }
}
