/// Possible errors from the AM2320 driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// The response read failed, usually because the sensor returned fewer
    /// bytes than requested.
    I2c(E),
    /// The reply preamble did not carry the expected function code and length.
    UnexpectedReply {
        /// Function code received (expected `0x03`).
        code: u8,
        /// Payload length received (expected `2`).
        len: u8,
    },
    /// Checksum did not match the received data.
    ChecksumMismatch {
        /// CRC computed over the preamble and data.
        expected: u16,
        /// CRC sent by the sensor.
        received: u16,
    },
}

impl<E> From<E> for Error<E> {
    fn from(value: E) -> Self {
        Self::I2c(value)
    }
}
