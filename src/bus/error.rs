use std::path::PathBuf;
use std::{error, fmt, io, result};

use super::ioctl::Command;
use crate::capability;

#[derive(Debug)]
pub enum Error {
    /// The device node could not be opened
    Open { path: PathBuf, source: io::Error },
    /// An ioctl against the open descriptor failed
    Ioctl { command: Command, source: io::Error },
    /// The OS refused to release the descriptor
    Close(io::Error),
    /// The handle was already closed
    Closed,
    /// The argument block does not have the shape the command expects
    InvalidArgument(Command),
    InvalidAddress(u16),
    BlockTooLong(usize),
    /// The adapter does not advertise these functionality bits
    Unsupported(u32),
}

impl Error {
    /// OS error number behind this error, if there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match *self {
            Error::Open { ref source, .. } | Error::Ioctl { ref source, .. } => {
                source.raw_os_error()
            }
            Error::Close(ref e) => e.raw_os_error(),
            _ => None,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Open { ref source, .. } | Error::Ioctl { ref source, .. } => Some(source),
            Error::Close(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Open { ref path, ref source } => {
                write!(f, "Could not open {}: {}", path.display(), source)
            }
            Error::Ioctl { command, ref source } => {
                write!(f, "ioctl {} failed: {}", command, source)
            }
            Error::Close(ref e) => write!(f, "Could not close bus: {}", e),
            Error::Closed => write!(f, "Bus handle used after close"),
            Error::InvalidArgument(command) => {
                write!(f, "Argument does not match ioctl {}", command)
            }
            Error::InvalidAddress(address) => write!(f, "Invalid slave address 0x{:x}", address),
            Error::BlockTooLong(len) => write!(f, "Block of {} bytes is too long", len),
            Error::Unsupported(bits) => write!(
                f,
                "Adapter does not support {}",
                capability::name_of(bits)
            ),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
