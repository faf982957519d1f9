//! OS thread identity for log lines

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        /// Kernel thread id of the calling thread.
        #[inline]
        pub fn thread_id() -> u64 {
            // Safety: gettid takes no arguments and cannot fail.
            unsafe { libc::syscall(libc::SYS_gettid) as u64 }
        }
    } else {
        /// Not available on this platform; always 0.
        #[inline]
        pub fn thread_id() -> u64 {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_thread_ids_differ() {
        let here = thread_id();
        let there = std::thread::spawn(thread_id).join().unwrap();
        assert_ne!(here, 0);
        assert_ne!(here, there);
        assert_eq!(here, thread_id());
    }
}
