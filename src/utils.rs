/// Records the name of a chosen code path.
/// Messages are collected only if the `for_testing` feature is enabled.
macro_rules! test_log {
    ($s:expr) => {
        #[cfg(feature = "for_testing")]
        {
            use crate::testing::log_message;
            log_message($s);
        }
    };
}
