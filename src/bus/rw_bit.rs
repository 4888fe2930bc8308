use std::fmt;

impl fmt::Display for ReadWrite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadWrite::Read => f.write_str("Read"),
            ReadWrite::Write => f.write_str("Write"),
        }
    }
}

/// Direction marker of an SMBus transfer, from the master's point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadWrite {
    Read = 1,
    Write = 0,
}

/// Transaction size class of an `I2C_SMBUS` request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransactionSize {
    Quick = 0,
    Byte = 1,
    ByteData = 2,
    WordData = 3,
    ProcCall = 4,
    BlockData = 5,
    I2cBlockBroken = 6,
    // SMBus 2.0
    BlockProcCall = 7,
    I2cBlockData = 8,
}

impl fmt::Display for TransactionSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            TransactionSize::Quick => "quick",
            TransactionSize::Byte => "byte",
            TransactionSize::ByteData => "byte data",
            TransactionSize::WordData => "word data",
            TransactionSize::ProcCall => "process call",
            TransactionSize::BlockData => "block data",
            TransactionSize::I2cBlockBroken => "i2c block (broken)",
            TransactionSize::BlockProcCall => "block process call",
            TransactionSize::I2cBlockData => "i2c block data",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_matches_kernel_values() {
        assert_eq!(ReadWrite::Read as u8, 1);
        assert_eq!(ReadWrite::Write as u8, 0);
        assert_eq!(ReadWrite::Read.to_string(), "Read");
    }

    #[test]
    fn size_classes_match_kernel_values() {
        assert_eq!(TransactionSize::Quick as u32, 0);
        assert_eq!(TransactionSize::ProcCall as u32, 4);
        assert_eq!(TransactionSize::BlockProcCall as u32, 7);
        assert_eq!(TransactionSize::I2cBlockData as u32, 8);
    }
}
