use crate::error::ProbeError;

/// Kernel name, e.g. `Linux` or `Darwin`.
#[cfg(unix)]
pub fn kernel_name() -> Result<Option<String>, ProbeError> {
    use std::ffi::CStr;
    use std::io;

    // SAFETY: utsname is plain old data and uname only writes into it.
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    if unsafe { libc::uname(&mut uts) } != 0 {
        return Err(io::Error::last_os_error().into());
    }

    // SAFETY: uname NUL-terminates every field it fills.
    let sysname = unsafe { CStr::from_ptr(uts.sysname.as_ptr()) };
    Ok(Some(sysname.to_string_lossy().into_owned()))
}

#[cfg(not(unix))]
pub fn kernel_name() -> Result<Option<String>, ProbeError> {
    Ok(match std::env::consts::OS {
        "windows" => Some("Windows_NT".to_string()),
        _ => None,
    })
}
