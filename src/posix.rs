//! Thin wrappers over the libc process and descriptor primitives.
//!
//! Everything here returns `io::Result` built from `errno`; the executor
//! layers ownership and error reporting on top.

use std::ffi::{CString, OsStr};
use std::fs::File;
use std::io::{Error, Result};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::FromRawFd;
use std::path::Path;
use std::ptr;

fn check_err<T: Ord + Default>(num: T) -> Result<T> {
    if num < T::default() {
        return Err(Error::last_os_error());
    }
    Ok(num)
}

/// Create an anonymous pipe; returns `(read end, write end)`.
pub fn pipe() -> Result<(File, File)> {
    let mut fds = [0 as libc::c_int; 2];
    check_err(unsafe { libc::pipe(fds.as_mut_ptr()) })?;
    Ok(unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) })
}

/// Fork the current process; returns 0 in the child, the child's pid in the
/// parent.
pub fn fork() -> Result<u32> {
    check_err(unsafe { libc::fork() }).map(|pid| pid as u32)
}

pub fn dup2(oldfd: i32, newfd: i32) -> Result<()> {
    check_err(unsafe { libc::dup2(oldfd, newfd) })?;
    Ok(())
}

/// Close a raw descriptor, ignoring errors.
pub fn close(fd: i32) {
    unsafe {
        libc::close(fd);
    }
}

fn os_to_cstring(s: &OsStr) -> Result<CString> {
    let bytes = s.as_bytes();
    if bytes.iter().any(|&b| b == 0) {
        return Err(Error::from_raw_os_error(libc::EINVAL));
    }
    // Cannot fail past the NUL check: Unix strings are already C strings.
    Ok(CString::new(bytes).expect("converting OsStr to C string"))
}

fn cstring_ptr(s: &CString) -> *const libc::c_char {
    s.as_bytes_with_nul().as_ptr() as _
}

/// Replace the process image with `path`, passing `args` as the argument
/// vector. The current environment is inherited. Returns only on failure.
pub fn execv<S: AsRef<OsStr>>(path: &Path, args: &[S]) -> Result<()> {
    let args_cstring: Vec<CString> = args
        .iter()
        .map(|x| os_to_cstring(x.as_ref()))
        .collect::<Result<_>>()?;
    let mut args_ptr: Vec<*const libc::c_char> =
        args_cstring.iter().map(cstring_ptr).collect();
    args_ptr.push(ptr::null());

    let path_cstring = os_to_cstring(path.as_os_str())?;
    check_err(unsafe { libc::execv(cstring_ptr(&path_cstring), args_ptr.as_ptr()) })?;

    Ok(())
}

/// Terminate the process immediately, without running destructors or
/// flushing stdio. The only safe way for a forked child to bail out.
pub fn _exit(status: u8) -> ! {
    unsafe { libc::_exit(status as libc::c_int) }
}

/// How a waited-on child terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Exited(u32),
    Signaled(u8),
    Other(i32),
}

/// Wait for the given child; blocks until it terminates.
pub fn waitpid(pid: u32) -> Result<(u32, ExitStatus)> {
    let mut status = 0 as libc::c_int;
    let pid = check_err(unsafe {
        libc::waitpid(pid as libc::pid_t, &mut status as *mut libc::c_int, 0)
    })?;
    Ok((pid as u32, decode_exit_status(status)))
}

fn decode_exit_status(status: i32) -> ExitStatus {
    if libc::WIFEXITED(status) {
        ExitStatus::Exited(libc::WEXITSTATUS(status) as u32)
    } else if libc::WIFSIGNALED(status) {
        ExitStatus::Signaled(libc::WTERMSIG(status) as u8)
    } else {
        ExitStatus::Other(status)
    }
}

/// Whether the current process may execute `path`, per `access(2)`.
pub fn is_executable(path: &Path) -> bool {
    match os_to_cstring(path.as_os_str()) {
        Ok(cstring) => unsafe { libc::access(cstring_ptr(&cstring), libc::X_OK) == 0 },
        Err(_) => false,
    }
}
