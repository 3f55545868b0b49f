#[cfg(feature = "log")]
macro_rules! trace {
    ($($t:tt)*) => (::log::trace!($($t)*););
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($t:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! debug {
    ($($t:tt)*) => (::log::debug!($($t)*););
}

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($t:tt)*) => {};
}

#[cfg(feature = "log")]
#[allow(unused_macros)]
macro_rules! warn {
    ($($t:tt)*) => (::log::warn!($($t)*););
}

#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! warn {
    ($($t:tt)*) => {};
}

#[cfg(feature = "log")]
#[allow(unused_macros)]
macro_rules! info {
    ($($t:tt)*) => (::log::info!($($t)*););
}

#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! info {
    ($($t:tt)*) => {};
}
