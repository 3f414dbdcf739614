//! Adds the emitting thread to each record

use crate::core::{LogRecord, Processor};
use std::cell::RefCell;

thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn current_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Sets `extra["thread_id"]` and, for named threads, `extra["thread_name"]`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadProcessor;

impl ThreadProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for ThreadProcessor {
    fn process(&self, mut record: LogRecord) -> LogRecord {
        let extra = record.extra_mut();
        extra.insert("thread_id", current_thread_id());
        if let Some(name) = current_thread_name() {
            extra.insert("thread_name", name);
        }
        record
    }
}
