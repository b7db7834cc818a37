//! Start-up configuration of the slave
//!
//! Everything here is fixed before the interrupts are unmasked; nothing is
//! reconfigured at runtime.

/// Default TOP of the PWM timer, giving a 14 bit duty cycle range.
pub const DEFAULT_PWM_TOP: u16 = 0x3FFF;

/// What happens to a partially received frame when chip-select is released
/// before all 16 bits arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscardPolicy {
    /// Keep the partial bits in the accumulator. They end up in the top of
    /// the next frame, which then loses its trailing bits to the 16 bit cap.
    #[default]
    Retain,
    /// Clear accumulator and bit counter so the next frame starts clean.
    Reset,
}

/// Clock divider of the PWM timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    #[default]
    Div1,
    Div2,
    Div4,
    Div8,
    Div16,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    pub fn from_divider(divider: u16) -> Result<Self, ConfigError> {
        match divider {
            1 => Ok(Prescaler::Div1),
            2 => Ok(Prescaler::Div2),
            4 => Ok(Prescaler::Div4),
            8 => Ok(Prescaler::Div8),
            16 => Ok(Prescaler::Div16),
            64 => Ok(Prescaler::Div64),
            256 => Ok(Prescaler::Div256),
            1024 => Ok(Prescaler::Div1024),
            _ => Err(ConfigError::InvalidPrescaler),
        }
    }

    pub fn divider(self) -> u16 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div2 => 2,
            Prescaler::Div4 => 4,
            Prescaler::Div8 => 8,
            Prescaler::Div16 => 16,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }

    /// Value of the TC CTRLA.PRESCALER field.
    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// Errors that can occur while building a [`Config`].
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A PWM timer TOP of zero leaves no duty cycle range
    InvalidTop,
    /// The divider is not one the timer prescaler supports
    InvalidPrescaler,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub pwm_top: u16,
    pub prescaler: Prescaler,
    pub discard: DiscardPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Config {
            pwm_top: DEFAULT_PWM_TOP,
            prescaler: Prescaler::Div1,
            discard: DiscardPolicy::Retain,
        }
    }

    pub fn with_pwm_top(mut self, pwm_top: u16) -> Result<Self, ConfigError> {
        if pwm_top == 0 {
            return Err(ConfigError::InvalidTop);
        }

        self.pwm_top = pwm_top;
        Ok(self)
    }

    pub fn with_prescaler(mut self, prescaler: Prescaler) -> Self {
        self.prescaler = prescaler;
        self
    }

    pub fn with_discard(mut self, discard: DiscardPolicy) -> Self {
        self.discard = discard;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_device() {
        let config = Config::default();

        assert_eq!(config.pwm_top, 0x3FFF);
        assert_eq!(config.prescaler, Prescaler::Div1);
        assert_eq!(config.discard, DiscardPolicy::Retain);
    }

    #[test]
    fn zero_top_rejected() {
        let r = Config::new().with_pwm_top(0);

        assert_eq!(r.unwrap_err(), ConfigError::InvalidTop);
    }

    #[test]
    fn builder_chain() {
        let config = Config::new()
            .with_pwm_top(0x00FF)
            .unwrap()
            .with_prescaler(Prescaler::Div8)
            .with_discard(DiscardPolicy::Reset);

        assert_eq!(config.pwm_top, 0x00FF);
        assert_eq!(config.prescaler.divider(), 8);
        assert_eq!(config.discard, DiscardPolicy::Reset);
    }

    #[test]
    fn prescaler_dividers() {
        for divider in [1, 2, 4, 8, 16, 64, 256, 1024] {
            let prescaler = Prescaler::from_divider(divider).unwrap();
            assert_eq!(prescaler.divider(), divider);
        }

        assert_eq!(Prescaler::from_divider(32), Err(ConfigError::InvalidPrescaler));
        assert_eq!(Prescaler::Div1024.bits(), 7);
    }
}
