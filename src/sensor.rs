//! Unified sensor records shared by the temperature and humidity channels.

/// Sensor type tags, numbered as in the unified sensor convention.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum SensorType {
    /// Relative humidity in percent.
    RelativeHumidity = 12,
    /// Ambient temperature in degrees Celsius.
    AmbientTemperature = 13,
}

/// The single scalar carried by a [`SensorEvent`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorValue {
    /// Degrees Celsius, `NaN` if the read failed.
    AmbientTemperature(f32),
    /// Percent, `NaN` if the read failed.
    RelativeHumidity(f32),
}

impl SensorValue {
    /// Returns the contained scalar regardless of its kind.
    pub fn value(&self) -> f32 {
        match *self {
            SensorValue::AmbientTemperature(v) | SensorValue::RelativeHumidity(v) => v,
        }
    }
}

/// One timestamped reading from a channel.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorEvent {
    /// Size of this record in bytes.
    pub version: i32,
    /// Id given to the channel at construction.
    pub sensor_id: i32,
    /// Kind of quantity carried in `value`.
    pub sensor_type: SensorType,
    /// Milliseconds from the monotonic clock handed to the driver.
    pub timestamp: u32,
    /// The reading itself.
    pub value: SensorValue,
}

impl SensorEvent {
    pub(crate) const VERSION: i32 = core::mem::size_of::<SensorEvent>() as i32;
}

/// Static description of a channel.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorDescriptor {
    /// Device model name.
    pub name: &'static str,
    /// Descriptor version.
    pub version: i32,
    /// Id given to the channel at construction.
    pub sensor_id: i32,
    /// Kind of quantity the channel reports.
    pub sensor_type: SensorType,
    /// Highest value the channel reports.
    pub max_value: f32,
    /// Lowest value the channel reports.
    pub min_value: f32,
    /// Smallest meaningful change between two readings.
    pub resolution: f32,
    /// Minimum time between two readings, in microseconds.
    pub min_delay: i32,
}

/// Common interface of the temperature and humidity channels.
pub trait UnifiedSensor {
    /// Takes a reading and wraps it into an event.
    ///
    /// Never fails: a failed read is reported as a `NaN` value.
    fn event(&mut self) -> SensorEvent;

    /// Returns the channel metadata. Does not touch the bus.
    fn descriptor(&self) -> SensorDescriptor;
}

/// Monotonic millisecond clock used to timestamp events.
pub trait Clock {
    /// Milliseconds since boot.
    fn millis(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    fn millis(&self) -> u32 {
        self()
    }
}
