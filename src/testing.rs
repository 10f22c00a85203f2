//! Thread-local log of code paths used by the last resize calls.
//!
//! Only messages emitted from the thread that called the resizer are
//! recorded, workers don't write into it.
use std::cell::RefCell;

thread_local!(static TEST_LOGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) });

pub fn log_message(msg: &str) {
    TEST_LOGS.with(|f| {
        let mut logs = f.borrow_mut();
        logs.push(msg.to_string());
    });
}

pub fn logs_contain(msg: &str) -> bool {
    TEST_LOGS.with(|f| {
        let logs = f.borrow();
        logs.iter().any(|line| line.contains(msg))
    })
}

pub fn clear_log() {
    TEST_LOGS.with(|f| {
        let mut logs = f.borrow_mut();
        logs.clear();
    })
}
