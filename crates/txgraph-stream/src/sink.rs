//! Destinations for emitted medians.

use std::io::{self, Write};

use txgraph_core::Median;

/// Receives one median per valid event, in input order.
pub trait MedianSink {
    /// Record a median.
    fn emit(&mut self, median: Median) -> io::Result<()>;

    /// Push buffered output through.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each median as a fixed-point line, e.g. `1.50`.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MedianSink for LineSink<W> {
    fn emit(&mut self, median: Median) -> io::Result<()> {
        writeln!(self.writer, "{}", median)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Collects medians in memory.
impl MedianSink for Vec<Median> {
    fn emit(&mut self, median: Median) -> io::Result<()> {
        self.push(median);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_sink_formats_fixed_point() {
        let mut sink = LineSink::new(Vec::new());
        sink.emit(Median::single(1)).unwrap();
        sink.emit(Median::between(1, 2)).unwrap();
        sink.flush().unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "1.00\n1.50\n");
    }
}
