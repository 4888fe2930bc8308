use std::borrow::Cow;

// Functionality bits from uapi/linux/i2c.h
pub const I2C: u32 = 0x0000_0001;
/// Required for I2C_M_TEN
pub const TEN_BIT_ADDR: u32 = 0x0000_0002;
/// Required for I2C_M_IGNORE_NAK and friends
pub const PROTOCOL_MANGLING: u32 = 0x0000_0004;
pub const SMBUS_PEC: u32 = 0x0000_0008;
/// Required for I2C_M_NOSTART
pub const NOSTART: u32 = 0x0000_0010;
pub const SLAVE: u32 = 0x0000_0020;
pub const SMBUS_BLOCK_PROC_CALL: u32 = 0x0000_8000;
pub const SMBUS_QUICK: u32 = 0x0001_0000;
pub const SMBUS_READ_BYTE: u32 = 0x0002_0000;
pub const SMBUS_WRITE_BYTE: u32 = 0x0004_0000;
pub const SMBUS_READ_BYTE_DATA: u32 = 0x0008_0000;
pub const SMBUS_WRITE_BYTE_DATA: u32 = 0x0010_0000;
pub const SMBUS_READ_WORD_DATA: u32 = 0x0020_0000;
pub const SMBUS_WRITE_WORD_DATA: u32 = 0x0040_0000;
pub const SMBUS_PROC_CALL: u32 = 0x0080_0000;
pub const SMBUS_READ_BLOCK_DATA: u32 = 0x0100_0000;
pub const SMBUS_WRITE_BLOCK_DATA: u32 = 0x0200_0000;
/// I2C-like block transfer
pub const SMBUS_READ_I2C_BLOCK: u32 = 0x0400_0000;
/// I2C-like block transfer with a 1-byte register address
pub const SMBUS_WRITE_I2C_BLOCK: u32 = 0x0800_0000;
pub const SMBUS_HOST_NOTIFY: u32 = 0x1000_0000;

// Multi-bit flags
pub const SMBUS_BYTE: u32 = SMBUS_READ_BYTE | SMBUS_WRITE_BYTE;
pub const SMBUS_BYTE_DATA: u32 = SMBUS_READ_BYTE_DATA | SMBUS_WRITE_BYTE_DATA;
pub const SMBUS_WORD_DATA: u32 = SMBUS_READ_WORD_DATA | SMBUS_WRITE_WORD_DATA;
pub const SMBUS_BLOCK_DATA: u32 = SMBUS_READ_BLOCK_DATA | SMBUS_WRITE_BLOCK_DATA;
pub const SMBUS_I2C_BLOCK: u32 = SMBUS_READ_I2C_BLOCK | SMBUS_WRITE_I2C_BLOCK;
/// Everything an adapter can emulate on top of plain I2C
pub const SMBUS_EMUL: u32 = SMBUS_QUICK
    | SMBUS_BYTE
    | SMBUS_BYTE_DATA
    | SMBUS_WORD_DATA
    | SMBUS_PROC_CALL
    | SMBUS_WRITE_BLOCK_DATA
    | SMBUS_I2C_BLOCK
    | SMBUS_PEC;

/// Known functionality patterns and their names.
///
/// Composite patterns come after their constituents, so decomposing a mask
/// lists both the narrow and the combined reading.
pub static REGISTRY: &[(u32, &str)] = &[
    (I2C, "I2C"),
    (TEN_BIT_ADDR, "10-bit address"),
    (PROTOCOL_MANGLING, "Protocol mangling"),
    (SMBUS_PEC, "SMBus PEC"),
    (NOSTART, "No start"),
    (SLAVE, "Slave"),
    (SMBUS_BLOCK_PROC_CALL, "Block procedure call"),
    (SMBUS_QUICK, "Quick"),
    (SMBUS_READ_BYTE, "Read byte"),
    (SMBUS_WRITE_BYTE, "Write byte"),
    (SMBUS_READ_BYTE_DATA, "Read byte data"),
    (SMBUS_WRITE_BYTE_DATA, "Write byte data"),
    (SMBUS_READ_WORD_DATA, "Read word data"),
    (SMBUS_WRITE_WORD_DATA, "Write word data"),
    (SMBUS_PROC_CALL, "Procedure call"),
    (SMBUS_READ_BLOCK_DATA, "Read block data"),
    (SMBUS_WRITE_BLOCK_DATA, "Write block data"),
    (SMBUS_READ_I2C_BLOCK, "Read I2C block"),
    (SMBUS_WRITE_I2C_BLOCK, "Write I2C block"),
    (SMBUS_HOST_NOTIFY, "Host notify"),
    (SMBUS_BYTE, "Byte"),
    (SMBUS_BYTE_DATA, "Byte data"),
    (SMBUS_WORD_DATA, "Word data"),
    (SMBUS_BLOCK_DATA, "Block data"),
    (SMBUS_I2C_BLOCK, "I2C block"),
    (SMBUS_EMUL, "Emulated"),
];

/// Returns the name of exactly one registered pattern.
///
/// Bits from a newer kernel than this table knows about are not an error;
/// they come back as a placeholder carrying the raw value.
pub fn name_of(bits: u32) -> Cow<'static, str> {
    REGISTRY
        .iter()
        .find(|&&(pattern, _)| pattern == bits)
        .map(|&(_, name)| Cow::Borrowed(name))
        .unwrap_or_else(|| Cow::Owned(format!("unknown flag bits: 0x{:08x}", bits)))
}

/// Union of every bit some registry entry covers.
pub(crate) fn known_bits() -> u32 {
    REGISTRY.iter().fold(0, |acc, &(pattern, _)| acc | pattern)
}
