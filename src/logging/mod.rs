mod logger;
mod sink;

pub use logger::{EventLogger, LogLevel, LoggerState};
pub use sink::{ConsoleSink, FileSink, LogSink, SinkError};
