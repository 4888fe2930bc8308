use std::fs::OpenOptions;
use std::io;
use std::os::unix::io::{IntoRawFd, RawFd};
use std::path::Path;

use libc::{self, c_ulong};

use super::ioctl::{Argument, Command, RdwrIoctlData, SmbusIoctlData};

#[cfg(target_env = "musl")]
type IoctlLong = libc::c_int;
#[cfg(not(target_env = "musl"))]
type IoctlLong = c_ulong;

macro_rules! parse_retval {
    ($retval:expr) => {{
        let retval = $retval;

        if retval == -1 {
            Err(io::Error::last_os_error())
        } else {
            Ok(retval)
        }
    }};
}

/// The system calls a bus handle is built on.
///
/// `Linux` talks to the kernel; tests substitute their own implementation
/// to drive the failure paths.
pub trait Backend {
    /// Opens `path` for reading and writing, handing ownership of the
    /// descriptor to the caller.
    fn open(&self, path: &Path) -> io::Result<RawFd>;

    /// Issues one ioctl. The argument shape has already been checked
    /// against `command`.
    fn ioctl(&self, fd: RawFd, command: Command, argument: Argument) -> io::Result<()>;

    fn close(&self, fd: RawFd) -> io::Result<()>;
}

/// i2c-dev character devices through libc.
#[derive(Copy, Clone, Debug, Default)]
pub struct Linux;

impl Backend for Linux {
    fn open(&self, path: &Path) -> io::Result<RawFd> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        Ok(file.into_raw_fd())
    }

    fn ioctl(&self, fd: RawFd, command: Command, argument: Argument) -> io::Result<()> {
        let request = command.code() as IoctlLong;

        match argument {
            Argument::Value(value) => parse_retval!(unsafe { libc::ioctl(fd, request, value) })?,
            Argument::Funcs(funcs) => {
                parse_retval!(unsafe { libc::ioctl(fd, request, funcs as *mut c_ulong) })?
            }
            Argument::Smbus(mut transfer) => {
                let mut data = transfer.as_raw();
                let data = &mut data as *mut SmbusIoctlData;
                parse_retval!(unsafe { libc::ioctl(fd, request, data) })?
            }
            Argument::Rdwr(messages) => {
                let mut data = RdwrIoctlData::new(messages);
                let data = &mut data as *mut RdwrIoctlData;
                parse_retval!(unsafe { libc::ioctl(fd, request, data) })?
            }
        };

        Ok(())
    }

    fn close(&self, fd: RawFd) -> io::Result<()> {
        parse_retval!(unsafe { libc::close(fd) })?;

        Ok(())
    }
}
