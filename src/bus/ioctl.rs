//! Argument blocks of the i2c-dev ioctl interface.
//!
//! Layouts follow uapi/linux/i2c.h and uapi/linux/i2c-dev.h and must stay
//! bit-for-bit compatible with them.

use std::fmt;
use std::marker::PhantomData;
use std::ptr;
use std::slice;

use libc::{c_ulong, c_void};

use super::error::{Error, Result};
use super::rw_bit::{ReadWrite, TransactionSize};

/// Maximum payload of an SMBus block transfer.
pub const BLOCK_MAX: usize = 32;

// i2c_msg flags
pub const M_RD: u16 = 0x0001;
pub const M_TEN: u16 = 0x0010;

/// ioctl requests understood by i2c-dev.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Use this slave address
    SetSlaveAddress,
    /// Treat slave addresses as 10-bit (0 for 7-bit)
    TenBit,
    /// Get the adapter functionality mask
    Funcs,
    /// Use this slave address, even if it is already in use by a driver
    ForceSlaveAddress,
    /// Combined read/write transfer, one STOP only
    Rdwr,
    /// Non-zero to use PEC with SMBus
    Pec,
    /// SMBus transfer
    Smbus,
}

impl Command {
    pub fn code(self) -> u32 {
        match self {
            Command::SetSlaveAddress => 0x0703,
            Command::TenBit => 0x0704,
            Command::Funcs => 0x0705,
            Command::ForceSlaveAddress => 0x0706,
            Command::Rdwr => 0x0707,
            Command::Pec => 0x0708,
            Command::Smbus => 0x0720,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::SetSlaveAddress => "I2C_SLAVE",
            Command::TenBit => "I2C_TENBIT",
            Command::Funcs => "I2C_FUNCS",
            Command::ForceSlaveAddress => "I2C_SLAVE_FORCE",
            Command::Rdwr => "I2C_RDWR",
            Command::Pec => "I2C_PEC",
            Command::Smbus => "I2C_SMBUS",
        }
    }

    /// Whether `argument` has the shape the kernel expects for this request.
    pub fn accepts(self, argument: &Argument) -> bool {
        match (self, argument) {
            (Command::Funcs, Argument::Funcs(_))
            | (Command::Smbus, Argument::Smbus(_))
            | (Command::Rdwr, Argument::Rdwr(_)) => true,
            (Command::SetSlaveAddress, Argument::Value(_))
            | (Command::ForceSlaveAddress, Argument::Value(_))
            | (Command::TenBit, Argument::Value(_))
            | (Command::Pec, Argument::Value(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (0x{:04x})", self.name(), self.code())
    }
}

/// Argument block handed to the kernel together with a `Command`.
pub enum Argument<'a> {
    /// Plain integer argument (address, PEC or 10-bit toggle)
    Value(c_ulong),
    /// Out parameter of `I2C_FUNCS`
    Funcs(&'a mut c_ulong),
    Smbus(SmbusTransfer<'a>),
    Rdwr(&'a mut [Message<'a>]),
}

impl<'a> fmt::Debug for Argument<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Argument::Value(value) => write!(f, "Value({:#x})", value),
            Argument::Funcs(_) => f.write_str("Funcs"),
            Argument::Smbus(transfer) => write!(f, "Smbus({:?})", transfer),
            Argument::Rdwr(messages) => write!(f, "Rdwr({} messages)", messages.len()),
        }
    }
}

/// Data block of an SMBus transfer (`union i2c_smbus_data`).
///
/// A byte lives in the first slot, a word in the first two (native byte
/// order), a block as a length byte followed by up to 32 bytes plus one
/// byte of padding.
#[repr(C, align(2))]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SmbusData {
    block: [u8; BLOCK_MAX + 2],
}

impl Default for SmbusData {
    fn default() -> Self {
        SmbusData::new()
    }
}

impl SmbusData {
    pub fn new() -> Self {
        SmbusData {
            block: [0u8; BLOCK_MAX + 2],
        }
    }

    pub fn with_byte(value: u8) -> Self {
        let mut data = SmbusData::new();
        data.block[0] = value;
        data
    }

    pub fn with_word(value: u16) -> Self {
        let mut data = SmbusData::new();
        data.block[..2].copy_from_slice(&value.to_ne_bytes());
        data
    }

    pub fn with_block(values: &[u8]) -> Result<Self> {
        if values.len() > BLOCK_MAX {
            return Err(Error::BlockTooLong(values.len()));
        }

        let mut data = SmbusData::new();
        data.block[0] = values.len() as u8;
        data.block[1..=values.len()].copy_from_slice(values);
        Ok(data)
    }

    pub fn byte(&self) -> u8 {
        self.block[0]
    }

    pub fn word(&self) -> u16 {
        u16::from_ne_bytes([self.block[0], self.block[1]])
    }

    /// Block payload; a corrupt length byte is clamped to `BLOCK_MAX`.
    pub fn block(&self) -> &[u8] {
        let len = (self.block[0] as usize).min(BLOCK_MAX);
        &self.block[1..=len]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.block
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.block
    }
}

/// One `I2C_SMBUS` request.
#[derive(Debug)]
pub struct SmbusTransfer<'a> {
    pub read_write: ReadWrite,
    pub command: u8,
    pub size: TransactionSize,
    pub data: Option<&'a mut SmbusData>,
}

impl<'a> SmbusTransfer<'a> {
    pub(crate) fn as_raw(&mut self) -> SmbusIoctlData {
        SmbusIoctlData {
            read_write: self.read_write as u8,
            command: self.command,
            size: self.size as u32,
            data: match self.data {
                Some(ref mut data) => &mut **data as *mut SmbusData,
                None => ptr::null_mut(),
            },
        }
    }
}

// struct i2c_smbus_ioctl_data
#[repr(C)]
pub(crate) struct SmbusIoctlData {
    read_write: u8,
    command: u8,
    size: u32,
    data: *mut SmbusData,
}

// struct i2c_rdwr_ioctl_data
#[repr(C)]
pub(crate) struct RdwrIoctlData {
    msgs: *mut c_void,
    nmsgs: u32,
}

impl RdwrIoctlData {
    pub(crate) fn new(messages: &mut [Message]) -> Self {
        RdwrIoctlData {
            msgs: messages.as_mut_ptr() as *mut c_void,
            nmsgs: messages.len() as u32,
        }
    }
}

/// One segment of a combined `I2C_RDWR` transfer (`struct i2c_msg`).
#[repr(C)]
pub struct Message<'a> {
    addr: u16,
    flags: u16,
    len: u16,
    buf: *mut u8,
    _buf: PhantomData<&'a mut [u8]>,
}

impl<'a> Message<'a> {
    /// Segment sending `data` to the slave at `addr`.
    pub fn write(addr: u16, data: &'a [u8]) -> Result<Self> {
        // The kernel only reads from buffers without M_RD.
        Message::new(addr, 0, data.as_ptr() as *mut u8, data.len())
    }

    /// Segment filling `buf` from the slave at `addr`.
    pub fn read(addr: u16, buf: &'a mut [u8]) -> Result<Self> {
        Message::new(addr, M_RD, buf.as_mut_ptr(), buf.len())
    }

    fn new(addr: u16, flags: u16, buf: *mut u8, len: usize) -> Result<Self> {
        if len > u16::max_value() as usize {
            return Err(Error::BlockTooLong(len));
        }

        Ok(Message {
            addr,
            flags,
            len: len as u16,
            buf,
            _buf: PhantomData,
        })
    }

    /// Marks `addr` as a 10-bit address.
    pub fn ten_bit(mut self) -> Self {
        self.flags |= M_TEN;
        self
    }

    pub fn address(&self) -> u16 {
        self.addr
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn is_read(&self) -> bool {
        self.flags & M_RD != 0
    }

    pub fn data(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.buf, self.len as usize) }
    }

    /// The receive buffer of a read segment.
    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        if self.is_read() {
            Some(unsafe { slice::from_raw_parts_mut(self.buf, self.len as usize) })
        } else {
            None
        }
    }
}

impl<'a> fmt::Debug for Message<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Message")
            .field("addr", &format_args!("{:#04x}", self.addr))
            .field("flags", &format_args!("{:#06x}", self.flags))
            .field("len", &self.len)
            .finish()
    }
}
