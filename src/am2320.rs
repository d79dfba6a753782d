use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    channel::{Humidity, Temperature},
    crc::crc16,
    error::Error,
    sensor::Clock,
};

/// Fixed 7-bit bus address of the AM2320.
pub const ADDRESS: u8 = 0x5C;

/// Humidity high byte register.
pub const REG_HUM_H: u8 = 0x00;
/// Temperature high byte register.
pub const REG_TEMP_H: u8 = 0x02;

/// Raw value reported when no valid reading could be obtained.
pub const SENTINEL: u16 = 0xFFFF;

/// Function code for "read registers", echoed back in the reply.
const CMD_READ_REGISTER: u8 = 0x03;
/// Number of register bytes requested per read.
const READ_LEN: u8 = 2;

/// Time the sensor needs to leave sleep mode after the wake-up write.
const WAKE_DELAY_MS: u32 = 10;
/// Time the sensor needs to prepare its reply after a command.
const COMMAND_DELAY_MS: u32 = 2;

/// Driver for the AM2320 temperature and humidity sensor.
///
/// The driver holds no state between reads besides its collaborators and
/// the two channel ids, so it can be built over a borrowed bus
/// (`&mut I2C`) that other devices share.
pub struct Am2320<I2C, D, C> {
    i2c: I2C,
    delay: D,
    pub(crate) clock: C,
    address: u8,
    pub(crate) temperature_id: i32,
    pub(crate) humidity_id: i32,
}

impl<I2C, D, C, E> Am2320<I2C, D, C>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    C: Clock,
{
    /// Creates a new instance of the AM2320 driver.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C bus the sensor is attached to.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    /// * `clock` - Monotonic millisecond clock used to timestamp events.
    /// * `temperature_id` - Sensor id reported by the temperature channel.
    /// * `humidity_id` - Sensor id reported by the humidity channel.
    pub fn new(i2c: I2C, delay: D, clock: C, temperature_id: i32, humidity_id: i32) -> Self {
        Am2320 {
            i2c,
            delay,
            clock,
            address: ADDRESS,
            temperature_id,
            humidity_id,
        }
    }

    /// Bus address the driver talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Reads the temperature in degrees Celsius.
    ///
    /// Returns `NaN` if the sensor did not deliver a valid reading.
    pub fn read_temperature(&mut self) -> f32 {
        match self.read_register16(REG_TEMP_H) {
            SENTINEL => f32::NAN,
            raw => raw as i16 as f32 / 10.0,
        }
    }

    /// Reads the relative humidity in percent.
    ///
    /// Returns `NaN` if the sensor did not deliver a valid reading.
    pub fn read_humidity(&mut self) -> f32 {
        match self.read_register16(REG_HUM_H) {
            SENTINEL => f32::NAN,
            raw => raw as f32 / 10.0,
        }
    }

    /// Reads a 16-bit register, returning [`SENTINEL`] on any failure.
    pub fn read_register16(&mut self, register: u8) -> u16 {
        self.try_read_register16(register).unwrap_or(SENTINEL)
    }

    /// Reads a 16-bit register.
    ///
    /// This method performs the complete AM2320 exchange: waking the sensor,
    /// sending the read command, reading the 6 byte reply and validating its
    /// preamble and checksum. It blocks for at least 12 ms and never retries.
    ///
    /// # Returns
    ///
    /// * `Ok(u16)` with the big-endian register value.
    /// * `Err(Error)` describing why the reply was rejected.
    pub fn try_read_register16(&mut self, register: u8) -> Result<u16, Error<E>> {
        self.wake();

        // A NACKed command can still be followed by a valid reply
        if self
            .i2c
            .write(self.address, &[CMD_READ_REGISTER, register, READ_LEN])
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::debug!("AM2320: command for register {=u8:#04x} not acknowledged", register);
        }
        self.delay.delay_ms(COMMAND_DELAY_MS);

        let mut reply = [0; 6];
        if let Err(e) = self.i2c.read(self.address, &mut reply) {
            #[cfg(feature = "defmt")]
            defmt::warn!("AM2320: short reply for register {=u8:#04x}", register);
            return Err(Error::I2c(e));
        }

        let raw = parse_reply(reply)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("AM2320: register {=u8:#04x} = {=u16:#06x}", register, raw);
        Ok(raw)
    }

    /// Borrows the temperature channel.
    pub fn temperature(&mut self) -> Temperature<'_, I2C, D, C> {
        Temperature::new(self)
    }

    /// Borrows the humidity channel.
    pub fn humidity(&mut self) -> Humidity<'_, I2C, D, C> {
        Humidity::new(self)
    }

    /// Releases the bus, delay and clock.
    pub fn release(self) -> (I2C, D, C) {
        (self.i2c, self.delay, self.clock)
    }

    /// Wakes the sensor from sleep mode.
    ///
    /// A sleeping sensor does not acknowledge its address, so the result of
    /// the write is ignored.
    fn wake(&mut self) {
        let _ = self.i2c.write(self.address, &[0x00]);
        self.delay.delay_ms(WAKE_DELAY_MS);
    }
}

/// Validates a `[code, len, data_hi, data_lo, crc_lo, crc_hi]` reply and
/// extracts the register value.
fn parse_reply<E>(reply: [u8; 6]) -> Result<u16, Error<E>> {
    let [code, len, data_hi, data_lo, crc_lo, crc_hi] = reply;

    if code != CMD_READ_REGISTER || len != READ_LEN {
        #[cfg(feature = "defmt")]
        defmt::warn!("AM2320: unexpected reply code {=u8:#04x} len {=u8}", code, len);
        return Err(Error::UnexpectedReply { code, len });
    }

    let received = u16::from_le_bytes([crc_lo, crc_hi]);
    let expected = crc16(&reply[..4]);
    if received != expected {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "AM2320: checksum mismatch, expected {=u16:#06x} received {=u16:#06x}",
            expected,
            received
        );
        return Err(Error::ChecksumMismatch { expected, received });
    }

    Ok(u16::from_be_bytes([data_hi, data_lo]))
}
