//! Reading the operating system’s clock.


/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(unix)]
pub(crate) fn sys_time() -> (i64, i16) {
    let mut ts = libc::timespec { tv_sec: 0, tv_nsec: 0 };

    // CLOCK_REALTIME is always available, and the pointer is to a live
    // timespec, so this can’t fail.
    let _ = unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut ts) };
    (ts.tv_sec as i64, (ts.tv_nsec / 1_000_000) as i16)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(windows)]
pub(crate) fn sys_time() -> (i64, i16) {
    use winapi::shared::minwindef::FILETIME;
    use winapi::um::sysinfoapi::GetSystemTimeAsFileTime;

    // File times count 100ns ticks from the start of 1601.
    const TICKS_PER_SECOND: i64 = 10_000_000;
    const SECONDS_BEFORE_1970: i64 = 11_644_473_600;

    let mut ft = FILETIME { dwLowDateTime: 0, dwHighDateTime: 0 };
    unsafe { GetSystemTimeAsFileTime(&mut ft) };

    let ticks = ((ft.dwHighDateTime as u64) << 32 | ft.dwLowDateTime as u64) as i64;
    let seconds = ticks.div_euclid(TICKS_PER_SECOND) - SECONDS_BEFORE_1970;
    let milliseconds = ticks.rem_euclid(TICKS_PER_SECOND) / 10_000;
    (seconds, milliseconds as i16)
}
