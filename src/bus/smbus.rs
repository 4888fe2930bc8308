//! SMBus transaction verbs built on `Bus::dispatch`.
//!
//! Every verb selects the slave address first (cached, see `Bus::select`)
//! and then issues exactly one `I2C_SMBUS` request. Whether an error such
//! as a NACK is worth retrying is left to the caller.

use super::backend::Backend;
use super::error::{Error, Result};
use super::ioctl::{Argument, Command, Message, SmbusData, SmbusTransfer, BLOCK_MAX};
use super::rw_bit::{ReadWrite, TransactionSize};
use super::Bus;

impl<B: Backend> Bus<B> {
    fn smbus(
        &mut self,
        read_write: ReadWrite,
        command: u8,
        size: TransactionSize,
        data: Option<&mut SmbusData>,
    ) -> Result<()> {
        trace!("SMBus {} {} command 0x{:02x}", read_write, size, command);
        self.dispatch(
            Command::Smbus,
            Argument::Smbus(SmbusTransfer {
                read_write,
                command,
                size,
                data,
            }),
        )
    }

    /// Sends only the address, with `bit` in the read/write position.
    pub fn write_quick(&mut self, address: u16, bit: bool) -> Result<()> {
        self.select(address)?;
        let read_write = if bit { ReadWrite::Read } else { ReadWrite::Write };
        self.smbus(read_write, 0, TransactionSize::Quick, None)
    }

    /// Receives one byte without naming a register.
    pub fn read_byte(&mut self, address: u16) -> Result<u8> {
        self.select(address)?;
        let mut data = SmbusData::new();
        self.smbus(ReadWrite::Read, 0, TransactionSize::Byte, Some(&mut data))?;
        Ok(data.byte())
    }

    /// Sends one byte without naming a register.
    pub fn write_byte(&mut self, address: u16, value: u8) -> Result<()> {
        self.select(address)?;
        // the byte travels in the command field
        self.smbus(ReadWrite::Write, value, TransactionSize::Byte, None)
    }

    pub fn read_byte_data(&mut self, address: u16, register: u8) -> Result<u8> {
        self.select(address)?;
        let mut data = SmbusData::new();
        self.smbus(ReadWrite::Read, register, TransactionSize::ByteData, Some(&mut data))?;
        Ok(data.byte())
    }

    pub fn write_byte_data(&mut self, address: u16, register: u8, value: u8) -> Result<()> {
        self.select(address)?;
        let mut data = SmbusData::with_byte(value);
        self.smbus(ReadWrite::Write, register, TransactionSize::ByteData, Some(&mut data))
    }

    pub fn read_word_data(&mut self, address: u16, register: u8) -> Result<u16> {
        self.select(address)?;
        let mut data = SmbusData::new();
        self.smbus(ReadWrite::Read, register, TransactionSize::WordData, Some(&mut data))?;
        Ok(data.word())
    }

    pub fn write_word_data(&mut self, address: u16, register: u8, value: u16) -> Result<()> {
        self.select(address)?;
        let mut data = SmbusData::with_word(value);
        self.smbus(ReadWrite::Write, register, TransactionSize::WordData, Some(&mut data))
    }

    /// Writes a word to `register` and reads the word the slave answers with.
    pub fn process_call(&mut self, address: u16, register: u8, value: u16) -> Result<u16> {
        self.select(address)?;
        let mut data = SmbusData::with_word(value);
        self.smbus(ReadWrite::Write, register, TransactionSize::ProcCall, Some(&mut data))?;
        Ok(data.word())
    }

    /// Reads a block whose length the slave sends first.
    pub fn read_block_data(&mut self, address: u16, register: u8) -> Result<Vec<u8>> {
        self.select(address)?;
        let mut data = SmbusData::new();
        self.smbus(ReadWrite::Read, register, TransactionSize::BlockData, Some(&mut data))?;
        Ok(data.block().to_vec())
    }

    pub fn write_block_data(&mut self, address: u16, register: u8, values: &[u8]) -> Result<()> {
        self.live_fd()?;
        let mut data = SmbusData::with_block(values)?;
        self.select(address)?;
        self.smbus(ReadWrite::Write, register, TransactionSize::BlockData, Some(&mut data))
    }

    /// Writes a block to `register` and reads back the block the slave
    /// answers with.
    pub fn block_process_call(
        &mut self,
        address: u16,
        register: u8,
        values: &[u8],
    ) -> Result<Vec<u8>> {
        self.live_fd()?;
        let mut data = SmbusData::with_block(values)?;
        self.select(address)?;
        self.smbus(ReadWrite::Write, register, TransactionSize::BlockProcCall, Some(&mut data))?;
        Ok(data.block().to_vec())
    }

    /// Reads `len` bytes starting at `register`, I2C style: the slave sends
    /// no length byte.
    pub fn read_i2c_block_data(
        &mut self,
        address: u16,
        register: u8,
        len: usize,
    ) -> Result<Vec<u8>> {
        self.live_fd()?;
        if len > BLOCK_MAX {
            return Err(Error::BlockTooLong(len));
        }

        self.select(address)?;
        let mut data = SmbusData::new();
        data.as_bytes_mut()[0] = len as u8;
        self.smbus(ReadWrite::Read, register, TransactionSize::I2cBlockData, Some(&mut data))?;
        Ok(data.block().to_vec())
    }

    pub fn write_i2c_block_data(
        &mut self,
        address: u16,
        register: u8,
        values: &[u8],
    ) -> Result<()> {
        self.live_fd()?;
        let mut data = SmbusData::with_block(values)?;
        self.select(address)?;
        self.smbus(ReadWrite::Write, register, TransactionSize::I2cBlockData, Some(&mut data))
    }

    /// Runs `messages` as one combined transfer with a single STOP at the
    /// end. Each segment names its own address.
    pub fn transfer<'a>(&mut self, messages: &'a mut [Message<'a>]) -> Result<()> {
        trace!("Combined transfer of {} segments", messages.len());
        self.dispatch(Command::Rdwr, Argument::Rdwr(messages))
    }
}
