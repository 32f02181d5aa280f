//! wiping of secret buffers

/// zero the given slice.
///
/// `write_volatile` keeps the compiler from eliding the writes even when
/// the buffer is about to be released.
pub fn zero(to_zero: &mut [u8]) {
    for byte in to_zero.iter_mut() {
        // the pointer comes from a live mutable reference, valid for writes
        unsafe { ::std::ptr::write_volatile(byte, 0) }
    }
    ::std::sync::atomic::compiler_fence(::std::sync::atomic::Ordering::SeqCst);
}
