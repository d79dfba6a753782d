//! Temperature and humidity views over an [`Am2320`].
//!
//! A channel borrows the driver mutably for as long as it lives, so the
//! driver always outlives its channels and the two can never drive the bus
//! concurrently.

use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    am2320::Am2320,
    sensor::{Clock, SensorDescriptor, SensorEvent, SensorType, SensorValue, UnifiedSensor},
};

/// Model name reported in every descriptor.
const SENSOR_NAME: &str = "AM2320";
/// Descriptor version.
const SENSOR_VERSION: i32 = 1;
/// The sensor needs 2 s between measurements.
const MIN_DELAY_US: i32 = 2_000_000;

/// Temperature channel of an [`Am2320`].
pub struct Temperature<'a, I2C, D, C> {
    parent: &'a mut Am2320<I2C, D, C>,
}

/// Humidity channel of an [`Am2320`].
pub struct Humidity<'a, I2C, D, C> {
    parent: &'a mut Am2320<I2C, D, C>,
}

impl<'a, I2C, D, C> Temperature<'a, I2C, D, C> {
    pub(crate) fn new(parent: &'a mut Am2320<I2C, D, C>) -> Self {
        Temperature { parent }
    }
}

impl<'a, I2C, D, C> Humidity<'a, I2C, D, C> {
    pub(crate) fn new(parent: &'a mut Am2320<I2C, D, C>) -> Self {
        Humidity { parent }
    }
}

impl<I2C, D, C, E> UnifiedSensor for Temperature<'_, I2C, D, C>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    C: Clock,
{
    fn event(&mut self) -> SensorEvent {
        SensorEvent {
            version: SensorEvent::VERSION,
            sensor_id: self.parent.temperature_id,
            sensor_type: SensorType::AmbientTemperature,
            timestamp: self.parent.clock.millis(),
            value: SensorValue::AmbientTemperature(self.parent.read_temperature()),
        }
    }

    fn descriptor(&self) -> SensorDescriptor {
        // Range and resolution are not in the datasheet
        SensorDescriptor {
            name: SENSOR_NAME,
            version: SENSOR_VERSION,
            sensor_id: self.parent.temperature_id,
            sensor_type: SensorType::AmbientTemperature,
            max_value: 80.0,
            min_value: -20.0,
            resolution: 2.0,
            min_delay: MIN_DELAY_US,
        }
    }
}

impl<I2C, D, C, E> UnifiedSensor for Humidity<'_, I2C, D, C>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    C: Clock,
{
    fn event(&mut self) -> SensorEvent {
        SensorEvent {
            version: SensorEvent::VERSION,
            sensor_id: self.parent.humidity_id,
            sensor_type: SensorType::RelativeHumidity,
            timestamp: self.parent.clock.millis(),
            value: SensorValue::RelativeHumidity(self.parent.read_humidity()),
        }
    }

    fn descriptor(&self) -> SensorDescriptor {
        SensorDescriptor {
            name: SENSOR_NAME,
            version: SENSOR_VERSION,
            sensor_id: self.parent.humidity_id,
            sensor_type: SensorType::RelativeHumidity,
            max_value: 100.0,
            min_value: 0.0,
            resolution: 1.0,
            min_delay: MIN_DELAY_US,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::am2320::{ADDRESS, REG_HUM_H, REG_TEMP_H};
    use crate::crc::crc16;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTx};

    const TEMPERATURE_ID: i32 = 20;
    const HUMIDITY_ID: i32 = 21;

    fn clock() -> u32 {
        4242
    }

    fn exchange(register: u8, data: [u8; 2]) -> Vec<I2cTx> {
        let mut response = vec![0x03, 0x02, data[0], data[1]];
        response.extend_from_slice(&crc16(&response).to_le_bytes());
        vec![
            I2cTx::write(ADDRESS, vec![0x00]),
            I2cTx::write(ADDRESS, vec![0x03, register, 0x02]),
            I2cTx::read(ADDRESS, response),
        ]
    }

    fn failed_exchange(register: u8) -> Vec<I2cTx> {
        vec![
            I2cTx::write(ADDRESS, vec![0x00]),
            I2cTx::write(ADDRESS, vec![0x03, register, 0x02]),
            I2cTx::read(ADDRESS, vec![0; 6]).with_error(ErrorKind::Other),
        ]
    }

    #[test]
    fn test_temperature_event() {
        // 0x00F6 => 24.6C
        let mut i2c = I2cMock::new(&exchange(REG_TEMP_H, [0x00, 0xF6]));
        let mut am2320 = Am2320::new(i2c.clone(), NoopDelay, clock, TEMPERATURE_ID, HUMIDITY_ID);

        let event = am2320.temperature().event();
        assert_eq!(
            event,
            SensorEvent {
                version: SensorEvent::VERSION,
                sensor_id: TEMPERATURE_ID,
                sensor_type: SensorType::AmbientTemperature,
                timestamp: 4242,
                value: SensorValue::AmbientTemperature(24.6),
            }
        );

        i2c.done();
    }

    #[test]
    fn test_humidity_event() {
        // 0x022B => 55.5%
        let mut i2c = I2cMock::new(&exchange(REG_HUM_H, [0x02, 0x2B]));
        let mut am2320 = Am2320::new(i2c.clone(), NoopDelay, clock, TEMPERATURE_ID, HUMIDITY_ID);

        let event = am2320.humidity().event();
        assert_eq!(event.sensor_id, HUMIDITY_ID);
        assert_eq!(event.sensor_type, SensorType::RelativeHumidity);
        assert_eq!(event.timestamp, 4242);
        assert_eq!(event.value, SensorValue::RelativeHumidity(55.5));

        i2c.done();
    }

    #[test]
    fn test_failed_read_still_produces_event() {
        let mut expect = failed_exchange(REG_TEMP_H);
        expect.extend(failed_exchange(REG_HUM_H));
        let mut i2c = I2cMock::new(&expect);
        let mut am2320 = Am2320::new(i2c.clone(), NoopDelay, clock, TEMPERATURE_ID, HUMIDITY_ID);

        let temperature = am2320.temperature().event();
        assert_eq!(temperature.sensor_id, TEMPERATURE_ID);
        assert!(matches!(
            temperature.value,
            SensorValue::AmbientTemperature(v) if v.is_nan()
        ));

        let humidity = am2320.humidity().event();
        assert_eq!(humidity.sensor_id, HUMIDITY_ID);
        assert!(humidity.value.value().is_nan());

        i2c.done();
    }

    #[test]
    fn test_temperature_descriptor() {
        let mut expect = failed_exchange(REG_TEMP_H);
        expect.extend(exchange(REG_TEMP_H, [0x00, 0xF6]));
        let mut i2c = I2cMock::new(&expect);
        let mut am2320 = Am2320::new(i2c.clone(), NoopDelay, clock, TEMPERATURE_ID, HUMIDITY_ID);

        let expected = SensorDescriptor {
            name: "AM2320",
            version: 1,
            sensor_id: TEMPERATURE_ID,
            sensor_type: SensorType::AmbientTemperature,
            max_value: 80.0,
            min_value: -20.0,
            resolution: 2.0,
            min_delay: 2_000_000,
        };

        let mut channel = am2320.temperature();
        assert_eq!(channel.descriptor(), expected);
        channel.event();
        assert_eq!(channel.descriptor(), expected);
        channel.event();
        assert_eq!(channel.descriptor(), expected);

        i2c.done();
    }

    #[test]
    fn test_humidity_descriptor() {
        let mut expect = failed_exchange(REG_HUM_H);
        expect.extend(exchange(REG_HUM_H, [0x02, 0x2B]));
        let mut i2c = I2cMock::new(&expect);
        let mut am2320 = Am2320::new(i2c.clone(), NoopDelay, clock, TEMPERATURE_ID, HUMIDITY_ID);

        let expected = SensorDescriptor {
            name: "AM2320",
            version: 1,
            sensor_id: HUMIDITY_ID,
            sensor_type: SensorType::RelativeHumidity,
            max_value: 100.0,
            min_value: 0.0,
            resolution: 1.0,
            min_delay: 2_000_000,
        };

        let mut channel = am2320.humidity();
        assert_eq!(channel.descriptor(), expected);
        channel.event();
        assert_eq!(channel.descriptor(), expected);
        channel.event();
        assert_eq!(channel.descriptor(), expected);

        i2c.done();
    }

    #[test]
    fn test_channels_as_trait_objects() {
        let mut i2c = I2cMock::new(&[]);
        let mut am2320 = Am2320::new(i2c.clone(), NoopDelay, clock, TEMPERATURE_ID, HUMIDITY_ID);

        let ids = {
            let temperature = am2320.temperature();
            let sensor: &dyn UnifiedSensor = &temperature;
            sensor.descriptor().sensor_id
        };
        assert_eq!(ids, TEMPERATURE_ID);
        assert_eq!(am2320.humidity().descriptor().sensor_id, HUMIDITY_ID);

        i2c.done();
    }
}
