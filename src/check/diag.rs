use log::Level;

/// Receives the user-facing messages of a check, one leveled message at a time
pub trait Diagnostics {
    fn emit(&self, level: Level, message: &str);

    fn error(&self, message: &str) {
        self.emit(Level::Error, message)
    }
    fn info(&self, message: &str) {
        self.emit(Level::Info, message)
    }
}

/// Forwards every message to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Diagnostics for LogSink {
    fn emit(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);
    }
}
