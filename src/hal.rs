/// Input lines of the bit-banged serial link.
///
/// Methods take `&self` so implementations can live in `static`s shared
/// with the interrupt handlers.
pub trait SerialLines {
    /// Current level of the data (MOSI) line.
    fn data_high(&self) -> bool;

    /// Whether the master currently selects this slave.
    fn select_asserted(&self) -> bool;
}

/// Raw access to the PWM duty cycle compare register.
///
/// The register may be wider than a single bus write, so a bare
/// `write_compare` can be observed half done. Go through
/// [`write_pwm`](crate::output::write_pwm) instead of calling it directly.
pub trait PwmCompare {
    fn write_compare(&self, value: u16);
}
