pub mod headers;
pub mod time;

/// 三目运算符，用宏简单实现
#[macro_export]
macro_rules! do_if {
    ($pat:expr => $suc:expr, $e:expr) => {
        if $pat {
            $suc
        } else {
            $e
        }
    };
}

/// Lower-cased copy used by every case-insensitive comparison.
#[inline]
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}
